mod cache;
mod comments;
mod config;
mod db;
mod entities;
mod error;
mod keys;
mod models;
mod resolver;
mod routes;
mod swapi;
mod transform;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    cache::RedisCache, comments::SqlCommentStore, config::Config, resolver::Resolver,
    swapi::SwapiClient,
};

pub struct AppState {
    pub resolver: Resolver,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movies_api=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let http = reqwest::Client::builder().user_agent("movies-api/0.1").build()?;

    let cache = RedisCache::connect(&config.redis_url).await?;
    tracing::info!("redis connected");

    let db = db::connect(&config.database_url).await?;
    db::ensure_schema(&db).await?;

    let resolver = Resolver::new(
        Arc::new(cache),
        Arc::new(SwapiClient::new(http, config.swapi_base_url.clone())),
        Arc::new(SqlCommentStore::new(db)),
    );

    let state = Arc::new(AppState { resolver });

    let app = Router::new()
        .route("/ping", get(routes::ping))
        .route("/movies", get(routes::fetch_movies))
        .route("/movies/{movie_id}", get(routes::fetch_movie))
        .route("/movies/{movie_id}/characters", get(routes::fetch_movie_characters))
        .route("/movies/{movie_id}/comment", post(routes::add_comment))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
