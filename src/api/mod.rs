pub mod error;
pub mod genres;
pub mod movies;
pub mod pagination;
pub mod recommendations;
pub mod types;

pub use error::ApiError;
pub use types::MovieList;
