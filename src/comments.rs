use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    entities::comment,
    error::{ApiError, ApiResult},
};

/// Budget for the write path; reads are left unbounded like the rest of the
/// request pipeline.
const DB_TIMEOUT: Duration = Duration::from_secs(3);

/// Append-only comment storage keyed by the movie's string identifier.
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn fetch(&self, movie_id: &str) -> ApiResult<Vec<comment::Model>>;
    async fn insert(&self, movie_id: &str, body: &str, user_public_ip: &str) -> ApiResult<i32>;
}

#[derive(Clone)]
pub struct SqlCommentStore {
    db: DatabaseConnection,
}

impl SqlCommentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentStore for SqlCommentStore {
    async fn fetch(&self, movie_id: &str) -> ApiResult<Vec<comment::Model>> {
        let comments = comment::Entity::find()
            .filter(comment::Column::MovieId.eq(movie_id))
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await?;
        Ok(comments)
    }

    async fn insert(&self, movie_id: &str, body: &str, user_public_ip: &str) -> ApiResult<i32> {
        let now = chrono::Utc::now().naive_utc();
        let model = comment::ActiveModel {
            id: Default::default(),
            movie_id: Set(movie_id.to_string()),
            body: Set(body.to_string()),
            user_public_ip: Set(user_public_ip.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let res = tokio::time::timeout(DB_TIMEOUT, comment::Entity::insert(model).exec(&self.db))
            .await
            .map_err(|_| ApiError::Internal(anyhow::anyhow!("comment insert timed out")))??;
        Ok(res.last_insert_id)
    }
}
