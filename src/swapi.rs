use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    models::{Character, Movie},
};

/// Upstream catalogue reads. A missing film is `Ok(None)`; any other
/// non-success status is an error.
#[async_trait]
pub trait Catalogue: Send + Sync {
    async fn fetch_film(&self, movie_id: &str) -> ApiResult<Option<Movie>>;
    async fn fetch_films(&self) -> ApiResult<Vec<Movie>>;
    async fn fetch_character(&self, url: &str) -> ApiResult<Character>;
}

pub struct SwapiClient {
    client: reqwest::Client,
    base_url: String,
}

impl SwapiClient {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url: base_url.trim_end_matches('/').to_string() }
    }
}

#[async_trait]
impl Catalogue for SwapiClient {
    async fn fetch_film(&self, movie_id: &str) -> ApiResult<Option<Movie>> {
        let url = format!("{}/films/{}/", self.base_url, movie_id);
        let resp = self.client.get(&url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let movie: Movie = resp.error_for_status()?.json().await?;
        Ok(Some(movie))
    }

    async fn fetch_films(&self) -> ApiResult<Vec<Movie>> {
        let url = format!("{}/films/", self.base_url);
        let page: FilmListResponse =
            self.client.get(&url).send().await?.error_for_status()?.json().await?;
        Ok(page.results)
    }

    async fn fetch_character(&self, url: &str) -> ApiResult<Character> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Internal(anyhow::anyhow!(
                "received non-OK status code {status} from {url}"
            )));
        }
        let character: Character = resp.json().await?;
        Ok(character)
    }
}

#[derive(Debug, Deserialize)]
struct FilmListResponse {
    results: Vec<Movie>,
}
