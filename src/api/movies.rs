use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::collections::HashMap;

use super::error::ApiError;
use super::pagination::PageParams;
use super::types::MovieList;
use crate::db::model::Movie;
use crate::server::AppState;

pub const TRENDING_LIMIT: i64 = 10;

/// GET /api/movies
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<MovieList>, ApiError> {
    let page = PageParams::from_query(&params);
    let (movies, total) = state
        .store
        .list_movies(page.offset(), page.limit)
        .await
        .map_err(|e| ApiError::internal("GET /api/movies", e))?;

    Ok(Json(MovieList {
        page: Some(page.page),
        limit: page.limit,
        total,
        movies,
    }))
}

/// GET /api/movies/search?q=
/// A blank query returns an empty envelope without touching the store.
pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<MovieList>, ApiError> {
    let page = PageParams::from_query(&params);

    let text = params.get("q").map(|q| q.trim()).unwrap_or("");
    if text.is_empty() {
        return Ok(Json(MovieList {
            page: Some(page.page),
            limit: page.limit,
            total: 0,
            movies: Vec::new(),
        }));
    }

    let (movies, total) = state
        .store
        .search_movies(text, page.offset(), page.limit)
        .await
        .map_err(|e| ApiError::internal("GET /api/movies/search", e))?;

    Ok(Json(MovieList {
        page: Some(page.page),
        limit: page.limit,
        total,
        movies,
    }))
}

/// GET /api/movies/trending — fixed top 10 by average rating.
pub async fn trending_movies(
    State(state): State<AppState>,
) -> Result<Json<MovieList>, ApiError> {
    let (movies, total) = state
        .store
        .trending_movies(TRENDING_LIMIT)
        .await
        .map_err(|e| ApiError::internal("GET /api/movies/trending", e))?;

    Ok(Json(MovieList {
        page: None,
        limit: TRENDING_LIMIT,
        total,
        movies,
    }))
}

/// GET /api/movies/genre/:genreId — the path segment is the genre name,
/// matched case-insensitively in the store.
pub async fn movies_by_genre(
    State(state): State<AppState>,
    Path(genre_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<MovieList>, ApiError> {
    let page = PageParams::from_query(&params);
    let (movies, total) = state
        .store
        .movies_by_genre(&genre_id, page.offset(), page.limit)
        .await
        .map_err(|e| ApiError::internal("GET /api/movies/genre/:genreId", e))?;

    Ok(Json(MovieList {
        page: Some(page.page),
        limit: page.limit,
        total,
        movies,
    }))
}

/// GET /api/movies/:id
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    let movie = state
        .store
        .movie_by_id(&id)
        .await
        .map_err(|e| ApiError::internal("GET /api/movies/:id", e))?;

    movie.map(Json).ok_or(ApiError::NotFound)
}
