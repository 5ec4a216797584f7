//! Cache-aside resolution of movies and cast members. The resolver owns the
//! read path end to end: cache lookup, upstream fill, synthetic id
//! assignment, comment join, and the character height pipeline.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    cache::CacheStore,
    comments::CommentStore,
    error::{ApiError, ApiResult},
    keys,
    models::{Character, Movie, SortBy, SortOrder},
    swapi::Catalogue,
    transform,
};

pub struct Resolver {
    cache: Arc<dyn CacheStore>,
    catalogue: Arc<dyn Catalogue>,
    comments: Arc<dyn CommentStore>,
}

impl Resolver {
    pub fn new(
        cache: Arc<dyn CacheStore>,
        catalogue: Arc<dyn Catalogue>,
        comments: Arc<dyn CommentStore>,
    ) -> Self {
        Self { cache, catalogue, comments }
    }

    /// Resolves a single movie and joins its comments.
    pub async fn get_movie(&self, movie_id: &str) -> ApiResult<Movie> {
        let mut movie = self.resolve_movie(movie_id).await?;
        self.attach_comments(&mut movie, movie_id).await?;
        Ok(movie)
    }

    /// Cache-aside resolution without the comment join. A miss fetches from
    /// upstream and fills the cache before returning; an upstream absence is
    /// a `NotFound` and leaves the cache untouched.
    async fn resolve_movie(&self, movie_id: &str) -> ApiResult<Movie> {
        if let Some(raw) = self.cache.get(&keys::movie_key(movie_id)).await? {
            debug!(movie_id, "movie cache hit");
            return Ok(serde_json::from_str(&raw)?);
        }
        debug!(movie_id, "movie cache miss, fetching upstream");
        let Some(movie) = self.catalogue.fetch_film(movie_id).await? else {
            return Err(ApiError::NotFound(format!("movie with id {movie_id} not found")));
        };
        self.cache.set(&keys::movie_key(movie_id), &serde_json::to_string(&movie)?).await?;
        Ok(movie)
    }

    async fn attach_comments(&self, movie: &mut Movie, movie_id: &str) -> ApiResult<()> {
        let comments = self.comments.fetch(movie_id).await?;
        movie.comments_count = comments.len();
        movie.comments = comments;
        Ok(())
    }

    /// Returns the full catalogue ordered by release date ascending, each
    /// movie carrying a stable synthetic id and its joined comments.
    ///
    /// Movies are matched to cache entries through the title index; a fresh
    /// title mints a new id from the shared counter and writes both the
    /// primary record and the index entry. Any single failure aborts the
    /// whole listing.
    pub async fn list_movies(&self) -> ApiResult<Vec<Movie>> {
        let mut films = self.catalogue.fetch_films().await?;
        films.sort_by_key(|m| {
            m.release_date.parse::<jiff::civil::Date>().unwrap_or(jiff::civil::Date::MIN)
        });

        let mut movies = Vec::with_capacity(films.len());
        for mut movie in films {
            let title_key = keys::title_key(&movie.title);
            let movie_id = if self.cache.exists(&title_key).await? {
                let Some(id) = self.cache.get(&title_key).await? else {
                    return Err(ApiError::Internal(anyhow::anyhow!(
                        "title index entry for {:?} vanished",
                        movie.title
                    )));
                };
                // The index promised a primary record; a hole here is a
                // consistency failure, not a missing movie.
                movie = match self.cache.get(&keys::movie_key(&id)).await? {
                    Some(raw) => serde_json::from_str(&raw)?,
                    None => {
                        return Err(ApiError::Internal(anyhow::anyhow!(
                            "movie {id} indexed under title {:?} missing from cache",
                            movie.title
                        )));
                    }
                };
                id
            } else {
                let id = self.cache.incr(keys::MOVIE_ID_COUNTER).await?.to_string();
                debug!(movie_id = %id, title = %movie.title, "assigning synthetic movie id");
                movie.id = Some(id.clone());
                self.cache.set(&keys::movie_key(&id), &serde_json::to_string(&movie)?).await?;
                // Two concurrent first sightings of a title each mint an id;
                // the later index write wins and orphans the earlier record.
                if self.cache.exists(&title_key).await? {
                    warn!(title = %movie.title, "title indexed concurrently, duplicate synthetic id assigned");
                }
                self.cache.set(&title_key, &id).await?;
                id
            };
            self.attach_comments(&mut movie, &movie_id).await?;
            movies.push(movie);
        }
        Ok(movies)
    }

    /// Returns a movie's cast in upstream order unless a sort is requested,
    /// heights rendered as feet and inches. Cast members whose height is
    /// "unknown" are cached raw but excluded from the response.
    pub async fn get_characters(
        &self,
        movie_id: &str,
        sort_by: Option<SortBy>,
        sort_order: SortOrder,
    ) -> ApiResult<Vec<Character>> {
        let movie = self.resolve_movie(movie_id).await?;

        let mut characters = Vec::with_capacity(movie.characters.len());
        for url in &movie.characters {
            let key = keys::character_key(movie_id, url);
            let character: Character = match self.cache.get(&key).await? {
                Some(raw) => serde_json::from_str(&raw)?,
                None => {
                    debug!(movie_id, url = %url, "character cache miss, fetching upstream");
                    let character = self.catalogue.fetch_character(url).await?;
                    self.cache.set(&key, &serde_json::to_string(&character)?).await?;
                    character
                }
            };
            if character.height != "unknown" {
                characters.push(character);
            }
        }

        // Sort on the raw centimeter values, then render.
        transform::sort_characters(&mut characters, sort_by, sort_order);
        for character in &mut characters {
            let cm: f64 = character.height.parse().map_err(|_| {
                ApiError::Internal(anyhow::anyhow!(
                    "unparsable height {:?} for character {}",
                    character.height,
                    character.name
                ))
            })?;
            character.height = transform::cm_to_feet_inches(cm);
        }
        Ok(characters)
    }

    /// Verifies the movie exists (through the same cache-aside path) before
    /// inserting, so comments can never reference an unknown movie id.
    pub async fn add_comment(
        &self,
        movie_id: &str,
        body: &str,
        user_public_ip: &str,
    ) -> ApiResult<i32> {
        self.resolve_movie(movie_id).await?;
        self.comments.insert(movie_id, body, user_public_ip).await
    }
}
