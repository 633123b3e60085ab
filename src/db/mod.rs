pub mod mapper;
pub mod model;
pub mod neo4j;
pub mod repo;

pub use model::*;
pub use neo4j::Neo4jStore;
pub use repo::MovieStore;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("graph query failed: {0}")]
    Query(#[from] neo4rs::Error),
    #[error("result row is missing column {0}")]
    MissingColumn(&'static str),
}
