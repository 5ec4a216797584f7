//! Response-path reshaping of cast data: the centimeter-to-imperial height
//! rendering and the sort requested by the caller.

use std::cmp::Ordering;

use crate::models::{Character, SortBy, SortOrder};

/// Renders a height in centimeters as e.g. `"5ft 10.87in"`. Inches are
/// rounded to two decimal places.
pub fn cm_to_feet_inches(cm: f64) -> String {
    let feet = (cm / 30.48).floor();
    let inches = ((cm / 30.48) - feet) * 12.0;
    let inches = (inches * 100.0).round() / 100.0;
    format!("{}ft {inches:.2}in", feet as i64)
}

/// Sorts in place on the raw upstream fields; heights compare numerically on
/// the centimeter value. Without a recognized sort field the upstream order
/// is left untouched.
pub fn sort_characters(
    characters: &mut [Character],
    sort_by: Option<SortBy>,
    sort_order: SortOrder,
) {
    let Some(field) = sort_by else {
        return;
    };
    characters.sort_by(|a, b| {
        let ord = match field {
            SortBy::Name => a.name.cmp(&b.name),
            SortBy::Gender => a.gender.cmp(&b.gender),
            SortBy::Height => match (a.height.parse::<f64>(), b.height.parse::<f64>()) {
                (Ok(left), Ok(right)) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            },
        };
        match sort_order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}
