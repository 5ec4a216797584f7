use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};

use crate::error::ApiResult;

/// Key-value operations the resolver needs from the cache backend. Entries
/// never expire; `incr` must be atomic on the backend.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> ApiResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> ApiResult<()>;
    async fn exists(&self, key: &str) -> ApiResult<bool>;
    async fn incr(&self, key: &str) -> ApiResult<i64>;
}

#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    pub async fn connect(redis_url: &str) -> ApiResult<Self> {
        let client = redis::Client::open(redis_url)?;
        let mut conn = ConnectionManager::new(client).await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> ApiResult<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> ApiResult<()> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value).await?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> ApiResult<bool> {
        let mut conn = self.conn.clone();
        let exists: bool = conn.exists(key).await?;
        Ok(exists)
    }

    async fn incr(&self, key: &str) -> ApiResult<i64> {
        let mut conn = self.conn.clone();
        let value: i64 = conn.incr(key, 1).await?;
        Ok(value)
    }
}
