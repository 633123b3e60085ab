use axum::{http::Method, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::db::MovieStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn MovieStore>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn MovieStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    // Literal segments (search, trending, genre) are registered before the
    // catch-all /:id detail route so they are never shadowed by it.
    let movie_routes = Router::new()
        .route("/api/movies", get(crate::api::movies::list_movies))
        .route("/api/movies/search", get(crate::api::movies::search_movies))
        .route(
            "/api/movies/trending",
            get(crate::api::movies::trending_movies),
        )
        .route(
            "/api/movies/genre/:genre_id",
            get(crate::api::movies::movies_by_genre),
        )
        .route("/api/movies/:id", get(crate::api::movies::get_movie));

    let recommendation_routes = Router::new().route(
        "/api/recommendations/:movie_id",
        get(crate::api::recommendations::recommendations_for_movie),
    );

    let genre_routes = Router::new().route("/api/genres", get(crate::api::genres::list_genres));

    Router::new()
        .merge(movie_routes)
        .merge(recommendation_routes)
        .merge(genre_routes)
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::model::Movie;
    use crate::db::{DbError, DbResult};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tower::ServiceExt;

    #[derive(Default)]
    struct MockStore {
        movies: Vec<Movie>,
        genres: Vec<String>,
        fail: bool,
        store_calls: AtomicUsize,
        last_page: Mutex<Option<(i64, i64)>>,
    }

    impl MockStore {
        fn check(&self) -> DbResult<()> {
            if self.fail {
                return Err(DbError::MissingColumn("m"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl MovieStore for MockStore {
        async fn list_movies(&self, offset: i64, limit: i64) -> DbResult<(Vec<Movie>, i64)> {
            self.check()?;
            self.store_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_page.lock().unwrap() = Some((offset, limit));
            let page = self
                .movies
                .iter()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect();
            Ok((page, self.movies.len() as i64))
        }

        async fn search_movies(
            &self,
            text: &str,
            _offset: i64,
            _limit: i64,
        ) -> DbResult<(Vec<Movie>, i64)> {
            self.check()?;
            self.store_calls.fetch_add(1, Ordering::SeqCst);
            let needle = text.to_lowercase();
            let hits: Vec<Movie> = self
                .movies
                .iter()
                .filter(|m| m.title.to_lowercase().contains(&needle))
                .cloned()
                .collect();
            let total = hits.len() as i64;
            Ok((hits, total))
        }

        async fn trending_movies(&self, limit: i64) -> DbResult<(Vec<Movie>, i64)> {
            self.check()?;
            self.store_calls.fetch_add(1, Ordering::SeqCst);
            let page = self.movies.iter().take(limit as usize).cloned().collect();
            Ok((page, self.movies.len() as i64))
        }

        async fn movies_by_genre(
            &self,
            _genre: &str,
            offset: i64,
            limit: i64,
        ) -> DbResult<(Vec<Movie>, i64)> {
            self.check()?;
            self.store_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_page.lock().unwrap() = Some((offset, limit));
            Ok((Vec::new(), 0))
        }

        async fn movie_by_id(&self, id: &str) -> DbResult<Option<Movie>> {
            self.check()?;
            self.store_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.movies.iter().find(|m| m.id == id).cloned())
        }

        async fn genre_names(&self) -> DbResult<Vec<String>> {
            self.check()?;
            self.store_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.genres.clone())
        }

        async fn recommendations(
            &self,
            _movie_id: &str,
            _limit: i64,
        ) -> DbResult<(Vec<Movie>, i64)> {
            self.check()?;
            self.store_calls.fetch_add(1, Ordering::SeqCst);
            Ok((Vec::new(), 0))
        }
    }

    fn sample_movie(id: &str, title: &str) -> Movie {
        Movie {
            id: id.to_string(),
            title: title.to_string(),
            original_title: title.to_string(),
            poster: String::new(),
            backdrop: String::new(),
            year: Some(1999),
            duration: 120,
            rating: 7.5,
            synopsis: String::new(),
            genres: Vec::new(),
            director: None,
            actors: Vec::new(),
            trailer_url: None,
            budget: None,
            revenue: None,
            release_date: "1999-01-01".to_string(),
            language: "en".to_string(),
            tagline: String::new(),
        }
    }

    fn app_with(store: MockStore) -> (Router, Arc<MockStore>) {
        let store = Arc::new(store);
        let state = AppState {
            config: Arc::new(Config::default()),
            store: store.clone(),
        };
        (build_router(state), store)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn test_detail_not_found_body() {
        let (app, _) = app_with(MockStore::default());
        let (status, body) = get_json(app, "/api/movies/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Movie not found" }));
    }

    #[tokio::test]
    async fn test_detail_returns_movie() {
        let store = MockStore {
            movies: vec![sample_movie("603", "The Matrix")],
            ..Default::default()
        };
        let (app, _) = app_with(store);
        let (status, body) = get_json(app, "/api/movies/603").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "603");
        assert_eq!(body["title"], "The Matrix");
        // wire casing
        assert_eq!(body["releaseDate"], "1999-01-01");
        assert_eq!(body["director"], Value::Null);
        assert_eq!(body["actors"], json!([]));
    }

    #[tokio::test]
    async fn test_blank_search_skips_the_store() {
        let (app, store) = app_with(MockStore::default());
        let (status, body) = get_json(app, "/api/movies/search?q=%20%20").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 0);
        assert_eq!(body["movies"], json!([]));
        assert_eq!(store.store_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_search_is_not_shadowed_by_detail_route() {
        let store = MockStore {
            movies: vec![sample_movie("603", "The Matrix")],
            ..Default::default()
        };
        let (app, _) = app_with(store);
        let (status, body) = get_json(app, "/api/movies/search?q=matrix").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["movies"][0]["title"], "The Matrix");
    }

    #[tokio::test]
    async fn test_list_pagination_passthrough() {
        let movies = (1..=25)
            .map(|n| sample_movie(&n.to_string(), &format!("Movie {}", n)))
            .collect();
        let store = MockStore {
            movies,
            ..Default::default()
        };
        let (app, store) = app_with(store);

        let (status, body) = get_json(app, "/api/movies?page=2&limit=10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], 2);
        assert_eq!(body["limit"], 10);
        assert_eq!(body["total"], 25);
        assert_eq!(body["movies"].as_array().unwrap().len(), 10);
        assert_eq!(body["movies"][0]["title"], "Movie 11");
        assert_eq!(*store.last_page.lock().unwrap(), Some((10, 10)));
    }

    #[tokio::test]
    async fn test_trending_envelope_has_null_page() {
        let store = MockStore {
            movies: vec![sample_movie("1", "Heat")],
            ..Default::default()
        };
        let (app, _) = app_with(store);
        let (status, body) = get_json(app, "/api/movies/trending").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], Value::Null);
        assert_eq!(body["limit"], 10);
        assert_eq!(body["total"], 1);
    }

    #[tokio::test]
    async fn test_genres_get_positional_ids_and_slugs() {
        let store = MockStore {
            genres: vec![
                "Action".to_string(),
                "Comedy".to_string(),
                "Drama".to_string(),
            ],
            ..Default::default()
        };
        let (app, _) = app_with(store);
        let (status, body) = get_json(app, "/api/genres").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                { "id": "1", "name": "Action", "slug": "action" },
                { "id": "2", "name": "Comedy", "slug": "comedy" },
                { "id": "3", "name": "Drama", "slug": "drama" }
            ])
        );
    }

    #[tokio::test]
    async fn test_recommendations_without_coraters_is_empty_list() {
        let (app, _) = app_with(MockStore::default());
        let (status, body) = get_json(app, "/api/recommendations/603").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], Value::Null);
        assert_eq!(body["limit"], 10);
        assert_eq!(body["total"], 0);
        assert_eq!(body["movies"], json!([]));
    }

    #[tokio::test]
    async fn test_store_failure_returns_generic_server_error() {
        let store = MockStore {
            fail: true,
            ..Default::default()
        };
        let (app, _) = app_with(store);
        let routes = [
            "/api/movies",
            "/api/movies/search?q=matrix",
            "/api/movies/trending",
            "/api/movies/genre/Action",
            "/api/movies/603",
            "/api/genres",
            "/api/recommendations/603",
        ];
        for uri in routes {
            let (status, body) = get_json(app.clone(), uri).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
            assert_eq!(body, json!({ "message": "Server error" }), "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_movies_by_genre_paginates() {
        let (app, store) = app_with(MockStore::default());
        let (status, body) = get_json(app, "/api/movies/genre/Action?page=3&limit=5").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], 3);
        assert_eq!(body["limit"], 5);
        assert_eq!(*store.last_page.lock().unwrap(), Some((10, 5)));
    }
}
