use serde::{Deserialize, Serialize};

use crate::entities::comment;

/// A catalogue movie. Upstream payloads deserialize straight into this
/// shape; `id` and the comment fields are filled in by the resolver. The
/// identifier stays a string throughout the core and is only numeric by
/// convention of the counter that mints it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub opening_crawl: String,
    pub release_date: String,
    pub characters: Vec<String>,
    #[serde(default)]
    pub comments: Vec<comment::Model>,
    #[serde(default)]
    pub comments_count: usize,
}

/// A cast member. `height` is cached exactly as upstream sends it, either
/// "unknown" or a number of centimeters; it is rewritten to feet and inches
/// only on the response path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub gender: String,
    pub height: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortBy {
    Name,
    Gender,
    Height,
}

impl SortBy {
    /// An absent or unrecognized field means no sorting is applied.
    pub fn parse(value: Option<&str>) -> Option<Self> {
        match value? {
            "name" => Some(SortBy::Name),
            "gender" => Some(SortBy::Gender),
            "height" => Some(SortBy::Height),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Anything other than an explicit "asc" sorts descending.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentPayload {
    pub body: String,
    pub user_public_ip: String,
}

#[derive(Debug, Serialize)]
pub struct CommentCreated {
    pub id: i32,
}

/// Response envelope shared by every endpoint, success and failure alike.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self { status: 200, message: message.into(), data: Some(data) }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self { status: 200, message: message.into(), data: None }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), data: None }
    }
}
