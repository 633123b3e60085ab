use async_trait::async_trait;

use super::model::Movie;
use super::DbResult;

/// Read-only access to the movie catalog. Handlers depend on this trait
/// rather than on the Neo4j client so the store can be swapped in tests.
///
/// List methods return the page of movies plus the total count of matching
/// movies, independent of offset/limit.
#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn list_movies(&self, offset: i64, limit: i64) -> DbResult<(Vec<Movie>, i64)>;

    /// Case-insensitive substring match on title, actor name or director
    /// name. Callers short-circuit blank queries before getting here.
    async fn search_movies(&self, text: &str, offset: i64, limit: i64)
        -> DbResult<(Vec<Movie>, i64)>;

    /// Movies with at least one rating, best average first.
    async fn trending_movies(&self, limit: i64) -> DbResult<(Vec<Movie>, i64)>;

    /// Movies linked to a genre whose name matches case-insensitively.
    async fn movies_by_genre(&self, genre: &str, offset: i64, limit: i64)
        -> DbResult<(Vec<Movie>, i64)>;

    async fn movie_by_id(&self, id: &str) -> DbResult<Option<Movie>>;

    /// Distinct genre names in ascending alphabetical order.
    async fn genre_names(&self) -> DbResult<Vec<String>>;

    /// Movies co-rated by users who also rated the target movie, excluding
    /// the target, ordered by the number of distinct co-raters.
    async fn recommendations(&self, movie_id: &str, limit: i64) -> DbResult<(Vec<Movie>, i64)>;
}
