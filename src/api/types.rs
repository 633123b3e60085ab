use serde::{Deserialize, Serialize};

use crate::db::model::Movie;

/// Envelope for every list endpoint. `page` is null for fixed-size results
/// (trending, recommendations); `total` is the full matching count
/// regardless of page/limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieList {
    pub page: Option<i64>,
    pub limit: i64,
    pub total: i64,
    pub movies: Vec<Movie>,
}
