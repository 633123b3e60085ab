use serde::{Deserialize, Serialize};

/// Normalized movie document as served on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub original_title: String,
    pub poster: String,
    pub backdrop: String,
    pub year: Option<i64>,
    pub duration: i64,
    pub rating: f64,
    pub synopsis: String,
    pub genres: Vec<String>,
    pub director: Option<Director>,
    pub actors: Vec<Actor>,
    pub trailer_url: Option<String>,
    pub budget: Option<i64>,
    pub revenue: Option<i64>,
    pub release_date: String,
    pub language: String,
    pub tagline: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Director {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// Typed projection of one movie result row, decoded at the store boundary.
/// Every movie query returns this shape: the movie node, an optional
/// director, the collected actor nodes and the averaged user rating.
#[derive(Debug, Clone, Default)]
pub struct MovieRow {
    pub movie: MovieNode,
    pub director: Option<PersonNode>,
    pub actors: Vec<PersonNode>,
    pub avg_rating: Option<f64>,
}

/// Properties of a Movie node. Absent or mistyped properties decode to
/// `None` and degrade to defaults in the mapper, never to an error.
#[derive(Debug, Clone, Default)]
pub struct MovieNode {
    pub movie_id: Option<String>,
    pub title: String,
    pub released: Option<i64>,
    pub runtime: Option<i64>,
    pub plot: Option<String>,
    pub tagline: Option<String>,
    pub poster: Option<String>,
    pub backdrop: Option<String>,
    pub budget: Option<i64>,
    pub revenue: Option<i64>,
    pub languages: Vec<String>,
}

/// A Director or Actor node. The id is the graph-internal node identity.
#[derive(Debug, Clone, Default)]
pub struct PersonNode {
    pub node_id: i64,
    pub name: String,
    pub role: Option<String>,
}
