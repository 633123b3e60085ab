use neo4rs::{query, ConfigBuilder, Graph, Node, Query, Row};
use tracing::info;

use super::mapper;
use super::model::{Movie, MovieNode, MovieRow, PersonNode};
use super::repo::MovieStore;
use super::{DbError, DbResult};
use crate::config::Neo4jConfig;
use async_trait::async_trait;

// Every movie query projects the same row shape: the movie node as `m`,
// an optional director `d`, `collect(DISTINCT a)` as `actors` and the
// averaged user rating as `avgRating`. The store's default row order is
// kept; only trending and recommendations sort.

const LIST_MOVIES: &str = "
    MATCH (m:Movie)
    OPTIONAL MATCH (d:Director)-[:DIRECTED]->(m)
    OPTIONAL MATCH (a:Actor)-[:ACTED_IN]->(m)
    OPTIONAL MATCH (u:User)-[:RATED]->(m)
    RETURN m, d, collect(DISTINCT a) AS actors, avg(u.rating) AS avgRating
    SKIP $offset LIMIT $limit";

const COUNT_MOVIES: &str = "
    MATCH (m:Movie)
    RETURN count(m) AS total";

const SEARCH_MOVIES: &str = "
    MATCH (m:Movie)
    OPTIONAL MATCH (d:Director)-[:DIRECTED]->(m)
    OPTIONAL MATCH (a:Actor)-[:ACTED_IN]->(m)
    WHERE toLower(m.title) CONTAINS toLower($query)
       OR toLower(d.name) CONTAINS toLower($query)
       OR toLower(a.name) CONTAINS toLower($query)
    OPTIONAL MATCH (u:User)-[:RATED]->(m)
    RETURN m, d, collect(DISTINCT a) AS actors, avg(u.rating) AS avgRating
    SKIP $offset LIMIT $limit";

const COUNT_SEARCH: &str = "
    MATCH (m:Movie)
    OPTIONAL MATCH (d:Director)-[:DIRECTED]->(m)
    OPTIONAL MATCH (a:Actor)-[:ACTED_IN]->(m)
    WHERE toLower(m.title) CONTAINS toLower($query)
       OR toLower(d.name) CONTAINS toLower($query)
       OR toLower(a.name) CONTAINS toLower($query)
    RETURN count(DISTINCT m) AS total";

const TRENDING_MOVIES: &str = "
    MATCH (m:Movie)<-[:RATED]-(u:User)
    OPTIONAL MATCH (d:Director)-[:DIRECTED]->(m)
    OPTIONAL MATCH (a:Actor)-[:ACTED_IN]->(m)
    RETURN m, d, collect(DISTINCT a) AS actors, avg(u.rating) AS avgRating
    ORDER BY avgRating DESC
    LIMIT $limit";

const COUNT_TRENDING: &str = "
    MATCH (m:Movie)<-[:RATED]-(:User)
    RETURN count(DISTINCT m) AS total";

const MOVIES_BY_GENRE: &str = "
    MATCH (m:Movie)-[:IN_GENRE]->(g:Genre)
    WHERE toLower(g.name) = toLower($genre)
    OPTIONAL MATCH (d:Director)-[:DIRECTED]->(m)
    OPTIONAL MATCH (a:Actor)-[:ACTED_IN]->(m)
    OPTIONAL MATCH (u:User)-[:RATED]->(m)
    RETURN m, d, collect(DISTINCT a) AS actors, avg(u.rating) AS avgRating
    SKIP $offset LIMIT $limit";

const COUNT_BY_GENRE: &str = "
    MATCH (m:Movie)-[:IN_GENRE]->(g:Genre)
    WHERE toLower(g.name) = toLower($genre)
    RETURN count(DISTINCT m) AS total";

const MOVIE_BY_ID: &str = "
    MATCH (m:Movie {movieId: $movieId})
    OPTIONAL MATCH (d:Director)-[:DIRECTED]->(m)
    OPTIONAL MATCH (a:Actor)-[:ACTED_IN]->(m)
    OPTIONAL MATCH (u:User)-[:RATED]->(m)
    RETURN m, d, collect(DISTINCT a) AS actors, avg(u.rating) AS avgRating
    LIMIT 1";

const GENRE_NAMES: &str = "
    MATCH (g:Genre)
    RETURN DISTINCT g.name AS name
    ORDER BY name";

// Collaborative filtering: users who rated the target movie also rated
// the candidates; rank by how many distinct co-raters each candidate has.
const RECOMMENDATIONS: &str = "
    MATCH (m:Movie {movieId: $movieId})<-[:RATED]-(u:User)-[:RATED]->(rec:Movie)
    WHERE rec.movieId <> $movieId
    OPTIONAL MATCH (d:Director)-[:DIRECTED]->(rec)
    OPTIONAL MATCH (a:Actor)-[:ACTED_IN]->(rec)
    OPTIONAL MATCH (u2:User)-[:RATED]->(rec)
    RETURN
      rec AS m,
      d,
      collect(DISTINCT a) AS actors,
      avg(u2.rating) AS avgRating,
      count(DISTINCT u) AS score
    ORDER BY score DESC
    LIMIT $limit";

const COUNT_RECOMMENDATIONS: &str = "
    MATCH (:Movie {movieId: $movieId})<-[:RATED]-(u:User)-[:RATED]->(rec:Movie)
    WHERE rec.movieId <> $movieId
    RETURN count(DISTINCT rec) AS total";

/// Neo4j-backed movie catalog. Holds a pooled driver; each query checks a
/// connection out of the pool and returns it on every path, including
/// failure.
pub struct Neo4jStore {
    graph: Graph,
}

impl Neo4jStore {
    pub async fn connect(cfg: &Neo4jConfig) -> DbResult<Self> {
        let config = ConfigBuilder::default()
            .uri(cfg.uri.as_str())
            .user(cfg.username.as_str())
            .password(cfg.password.as_str())
            .db(cfg.database.as_str())
            .max_connections(10)
            .build()?;

        let graph = Graph::connect(config).await?;
        info!("Connected to Neo4j at {} (db {})", cfg.uri, cfg.database);

        Ok(Self { graph })
    }

    /// Run one query and drain the result stream into ordered rows.
    async fn fetch(&self, q: Query) -> DbResult<Vec<Row>> {
        let mut stream = self.graph.execute(q).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    async fn fetch_count(&self, q: Query) -> DbResult<i64> {
        let mut stream = self.graph.execute(q).await?;
        let total = match stream.next().await? {
            Some(row) => row.get::<i64>("total").unwrap_or(0),
            None => 0,
        };
        Ok(total)
    }

    /// Run the data query and its count query concurrently, then map.
    async fn movie_page(&self, data: Query, count: Query) -> DbResult<(Vec<Movie>, i64)> {
        let (rows, total) = tokio::try_join!(self.fetch(data), self.fetch_count(count))?;
        let movies = map_rows(&rows)?;
        Ok((movies, total))
    }
}

#[async_trait]
impl MovieStore for Neo4jStore {
    async fn list_movies(&self, offset: i64, limit: i64) -> DbResult<(Vec<Movie>, i64)> {
        let data = query(LIST_MOVIES).param("offset", offset).param("limit", limit);
        self.movie_page(data, query(COUNT_MOVIES)).await
    }

    async fn search_movies(
        &self,
        text: &str,
        offset: i64,
        limit: i64,
    ) -> DbResult<(Vec<Movie>, i64)> {
        let data = query(SEARCH_MOVIES)
            .param("query", text)
            .param("offset", offset)
            .param("limit", limit);
        let count = query(COUNT_SEARCH).param("query", text);
        self.movie_page(data, count).await
    }

    async fn trending_movies(&self, limit: i64) -> DbResult<(Vec<Movie>, i64)> {
        let data = query(TRENDING_MOVIES).param("limit", limit);
        self.movie_page(data, query(COUNT_TRENDING)).await
    }

    async fn movies_by_genre(
        &self,
        genre: &str,
        offset: i64,
        limit: i64,
    ) -> DbResult<(Vec<Movie>, i64)> {
        let data = query(MOVIES_BY_GENRE)
            .param("genre", genre)
            .param("offset", offset)
            .param("limit", limit);
        let count = query(COUNT_BY_GENRE).param("genre", genre);
        self.movie_page(data, count).await
    }

    async fn movie_by_id(&self, id: &str) -> DbResult<Option<Movie>> {
        let rows = self.fetch(query(MOVIE_BY_ID).param("movieId", id)).await?;
        match rows.first() {
            Some(row) => Ok(Some(mapper::to_movie(decode_row(row)?))),
            None => Ok(None),
        }
    }

    async fn genre_names(&self) -> DbResult<Vec<String>> {
        let rows = self.fetch(query(GENRE_NAMES)).await?;
        let names = rows
            .iter()
            .map(|row| row.get::<String>("name").unwrap_or_default())
            .collect();
        Ok(names)
    }

    async fn recommendations(&self, movie_id: &str, limit: i64) -> DbResult<(Vec<Movie>, i64)> {
        let data = query(RECOMMENDATIONS)
            .param("movieId", movie_id)
            .param("limit", limit);
        let count = query(COUNT_RECOMMENDATIONS).param("movieId", movie_id);
        self.movie_page(data, count).await
    }
}

fn map_rows(rows: &[Row]) -> DbResult<Vec<Movie>> {
    rows.iter()
        .map(|row| decode_row(row).map(mapper::to_movie))
        .collect()
}

/// Decode one result row into the typed projection. Only a missing movie
/// column is an error; everything else degrades per the mapper rules.
fn decode_row(row: &Row) -> DbResult<MovieRow> {
    let movie: Node = row.get("m").map_err(|_| DbError::MissingColumn("m"))?;

    let director = row
        .get::<Option<Node>>("d")
        .ok()
        .flatten()
        .map(|n| decode_person(&n));

    let actors = row
        .get::<Vec<Node>>("actors")
        .unwrap_or_default()
        .iter()
        .map(decode_person)
        .collect();

    // avg() yields a float, or null when the movie has no ratings.
    let avg_rating = row
        .get::<f64>("avgRating")
        .ok()
        .or_else(|| row.get::<i64>("avgRating").ok().map(|v| v as f64));

    Ok(MovieRow {
        movie: decode_movie(&movie),
        director,
        actors,
        avg_rating,
    })
}

fn decode_movie(node: &Node) -> MovieNode {
    MovieNode {
        movie_id: node
            .get::<String>("movieId")
            .ok()
            .or_else(|| get_i64(node, "movieId").map(|v| v.to_string())),
        title: node.get::<String>("title").unwrap_or_default(),
        released: get_i64(node, "released"),
        runtime: get_i64(node, "runtime"),
        plot: node.get::<String>("plot").ok(),
        tagline: node.get::<String>("tagline").ok(),
        poster: node.get::<String>("poster").ok(),
        backdrop: node.get::<String>("backdrop").ok(),
        budget: get_i64(node, "budget"),
        revenue: get_i64(node, "revenue"),
        languages: node.get::<Vec<String>>("languages").unwrap_or_default(),
    }
}

fn decode_person(node: &Node) -> PersonNode {
    PersonNode {
        node_id: node.id(),
        name: node.get::<String>("name").unwrap_or_default(),
        role: node.get::<String>("role").ok(),
    }
}

/// Numeric graph properties arrive as integers or floats depending on how
/// the dataset was loaded; normalize both to i64.
fn get_i64(node: &Node, key: &str) -> Option<i64> {
    node.get::<i64>(key)
        .ok()
        .or_else(|| node.get::<f64>(key).ok().map(|v| v as i64))
}
