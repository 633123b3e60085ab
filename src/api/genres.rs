use axum::{extract::State, Json};

use super::error::ApiError;
use crate::db::model::Genre;
use crate::server::AppState;

/// GET /api/genres
/// Ids are the 1-based position within the alphabetical listing. They are
/// recomputed per request and not stable across store changes.
pub async fn list_genres(State(state): State<AppState>) -> Result<Json<Vec<Genre>>, ApiError> {
    let names = state
        .store
        .genre_names()
        .await
        .map_err(|e| ApiError::internal("GET /api/genres", e))?;

    let genres = names
        .into_iter()
        .enumerate()
        .map(|(index, name)| Genre {
            id: (index + 1).to_string(),
            slug: genre_slug(&name),
            name,
        })
        .collect();

    Ok(Json(genres))
}

/// Lowercased, whitespace runs replaced by hyphens ("Science Fiction" ->
/// "science-fiction"). Unlike movie slugs, punctuation is kept.
fn genre_slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
