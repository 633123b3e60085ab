use axum::{
    extract::{Path, State},
    Json,
};

use super::error::ApiError;
use super::types::MovieList;
use crate::server::AppState;

pub const RECOMMENDATION_LIMIT: i64 = 10;

/// GET /api/recommendations/:movieId
/// "Users who rated this movie also rated..." — a movie with no co-raters
/// yields an empty list, not an error.
pub async fn recommendations_for_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Json<MovieList>, ApiError> {
    let (movies, total) = state
        .store
        .recommendations(&movie_id, RECOMMENDATION_LIMIT)
        .await
        .map_err(|e| ApiError::internal("GET /api/recommendations/:movieId", e))?;

    Ok(Json(MovieList {
        page: None,
        limit: RECOMMENDATION_LIMIT,
        total,
        movies,
    }))
}
