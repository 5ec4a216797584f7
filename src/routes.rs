use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    models::{ApiResponse, Character, CommentCreated, CreateCommentPayload, Movie, SortBy, SortOrder},
};

const MAX_COMMENT_LEN: usize = 500;

pub async fn ping() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message("pong"))
}

pub async fn fetch_movies(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ApiResponse<Vec<Movie>>>> {
    let movies = state.resolver.list_movies().await?;
    Ok(Json(ApiResponse::ok("fetch movies successfully", movies)))
}

pub async fn fetch_movie(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<String>,
) -> ApiResult<Json<ApiResponse<Movie>>> {
    let movie = state.resolver.get_movie(&movie_id).await?;
    Ok(Json(ApiResponse::ok("fetch movie successfully", movie)))
}

#[derive(Debug, Deserialize)]
pub struct SortQuery {
    sort_by: Option<String>,
    sort_order: Option<String>,
}

pub async fn fetch_movie_characters(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<String>,
    Query(query): Query<SortQuery>,
) -> ApiResult<Json<ApiResponse<Vec<Character>>>> {
    let sort_by = SortBy::parse(query.sort_by.as_deref());
    let sort_order = SortOrder::parse(query.sort_order.as_deref());
    let characters = state.resolver.get_characters(&movie_id, sort_by, sort_order).await?;
    Ok(Json(ApiResponse::ok("fetch movie characters successfully", characters)))
}

pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<String>,
    Json(payload): Json<CreateCommentPayload>,
) -> ApiResult<Json<ApiResponse<CommentCreated>>> {
    let body = payload.body.trim();
    if body.is_empty() {
        return Err(ApiError::Validation("body is required".to_string()));
    }
    if body.chars().count() > MAX_COMMENT_LEN {
        return Err(ApiError::Validation(format!(
            "body must be at most {MAX_COMMENT_LEN} characters"
        )));
    }
    let user_public_ip = payload.user_public_ip.trim();
    if user_public_ip.is_empty() {
        return Err(ApiError::Validation("user_public_ip is required".to_string()));
    }

    let id = state.resolver.add_comment(&movie_id, body, user_public_ip).await?;
    Ok(Json(ApiResponse::ok("comment added successfully", CommentCreated { id })))
}
