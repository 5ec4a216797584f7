//! Cache key derivation. Three namespaces share one logical keyspace: movie
//! records by synthetic id, a secondary title index, and per-movie character
//! records keyed by their upstream URL.

/// Shared counter incremented once per newly observed movie.
pub const MOVIE_ID_COUNTER: &str = "movie_id_counter";

pub fn movie_key(movie_id: &str) -> String {
    movie_id.to_string()
}

pub fn title_key(title: &str) -> String {
    format!("movie_title:{title}")
}

pub fn character_key(movie_id: &str, character_url: &str) -> String {
    format!("movie_character:{movie_id}:{character_url}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_key_is_bare_id() {
        assert_eq!(movie_key("42"), "42");
    }

    #[test]
    fn title_key_is_namespaced() {
        assert_eq!(title_key("A New Hope"), "movie_title:A New Hope");
    }

    #[test]
    fn character_key_includes_movie_and_url() {
        assert_eq!(
            character_key("3", "https://swapi.dev/api/people/1/"),
            "movie_character:3:https://swapi.dev/api/people/1/"
        );
    }
}
