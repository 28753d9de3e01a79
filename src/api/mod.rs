// src/api/mod.rs
//
// HTTP boundary: router, handlers, error envelope.

pub mod dto;
pub mod error;
pub mod favorites_handlers;
pub mod pokemon_handlers;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, patch},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::{AppError, AppResult};
use crate::services::PokemonService;

pub use error::{error_envelope, ErrorBody};

#[derive(Clone)]
pub struct AppState {
    pub pokemon_service: Arc<PokemonService>,
}

pub fn build_router(state: AppState, cors_origin: &str) -> AppResult<Router> {
    let origin: HeaderValue = cors_origin
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid CORS origin: {}", cors_origin)))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(Any);

    let router = Router::new()
        .route("/pokemon", get(pokemon_handlers::get_all_pokemon))
        .route("/pokemon/search", get(pokemon_handlers::search_pokemon))
        .route(
            "/pokemon/:id/details",
            get(pokemon_handlers::get_pokemon_details),
        )
        .route("/pokemon/:id/favorite", patch(pokemon_handlers::set_favorite))
        .route(
            "/favorites",
            get(favorites_handlers::list_favorites)
                .post(favorites_handlers::add_favorite)
                .delete(favorites_handlers::remove_favorite),
        )
        .layer(middleware::from_fn(error_envelope))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::db::{create_connection_pool, initialize_database};
    use crate::integrations::pokeapi::types::SpeciesEntry;
    use crate::integrations::pokeapi::MockPokemonDataSource;
    use crate::repositories::SqlitePokemonRepository;
    use crate::services::EnrichmentService;

    fn test_router(source: MockPokemonDataSource) -> (tempfile::TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let pool = Arc::new(create_connection_pool(&dir.path().join("test.db")).unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();

        let repo = Arc::new(SqlitePokemonRepository::new(pool));
        let source = Arc::new(source);
        let enrichment = Arc::new(EnrichmentService::new(source.clone(), repo.clone()));
        let service = Arc::new(PokemonService::new(repo, source, enrichment));

        let router = build_router(
            AppState {
                pokemon_service: service,
            },
            "http://localhost:5173",
        )
        .unwrap();

        (dir, router)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn sample_details(id: i64, name: &str) -> crate::integrations::pokeapi::PokemonDetailsResponse {
        serde_json::from_value(json!({
            "id": id,
            "name": name,
            "types": [{"type": {"name": "grass"}}],
            "abilities": [],
            "height": 7,
            "weight": 69,
            "base_experience": 64,
            "stats": [],
            "sprites": {"front_default": "front.png"},
            "moves": []
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn list_seeds_and_returns_contract_shape() {
        let mut source = MockPokemonDataSource::new();
        source.expect_list_species().returning(|_| {
            Ok(vec![
                SpeciesEntry {
                    name: "bulbasaur".to_string(),
                    url: "https://pokeapi.co/api/v2/pokemon/1/".to_string(),
                },
                SpeciesEntry {
                    name: "ivysaur".to_string(),
                    url: "https://pokeapi.co/api/v2/pokemon/2/".to_string(),
                },
            ])
        });
        source
            .expect_fetch_details()
            .returning(|_| Ok(sample_details(1, "bulbasaur")));

        let (_dir, router) = test_router(source);

        let response = router
            .oneshot(
                Request::get("/pokemon?offset=0&limit=20")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let records = json.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].get("_id").is_some());
        assert_eq!(records[0]["isFav"], json!(false));
        assert_eq!(records[0]["isViewed"], json!(false));
        assert!(records[0].get("details").is_some());
    }

    #[tokio::test]
    async fn favorite_toggle_on_unknown_id_returns_enveloped_404() {
        let (_dir, router) = test_router(MockPokemonDataSource::new());

        let path = format!("/pokemon/{}/favorite", Uuid::new_v4());
        let response = router
            .oneshot(
                Request::patch(&path)
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"isFavorite": true}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["statusCode"], json!(404));
        assert_eq!(json["path"], json!(path));
        assert_eq!(json["method"], json!("PATCH"));
        assert!(json["message"].as_str().unwrap().contains("not found"));
        assert!(json.get("timestamp").is_some());
    }

    #[tokio::test]
    async fn search_without_query_is_a_validation_error() {
        let (_dir, router) = test_router(MockPokemonDataSource::new());

        let response = router
            .oneshot(
                Request::get("/pokemon/search")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["statusCode"], json!(400));
    }

    #[tokio::test]
    async fn legacy_favorites_roundtrip() {
        let mut source = MockPokemonDataSource::new();
        source
            .expect_fetch_details()
            .returning(|_| Ok(sample_details(25, "pikachu")));

        let (dir, router) = test_router(source);

        // Seed one record directly through the store
        let pool = Arc::new(create_connection_pool(&dir.path().join("test.db")).unwrap());
        let repo = SqlitePokemonRepository::new(pool);
        crate::repositories::PokemonRepository::insert_bare(
            &repo,
            &[crate::domain::PokemonRecord::new(
                "pikachu".to_string(),
                "https://pokeapi.co/api/v2/pokemon/25/".to_string(),
            )],
        )
        .unwrap();

        let add = router
            .clone()
            .oneshot(
                Request::post("/favorites")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name": "pikachu"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(add.status(), StatusCode::CREATED);

        let conflict = router
            .clone()
            .oneshot(
                Request::post("/favorites")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name": "pikachu"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let list = router
            .clone()
            .oneshot(Request::get("/favorites").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(list.status(), StatusCode::OK);
        assert_eq!(body_json(list).await, json!(["pikachu"]));

        let remove = router
            .oneshot(
                Request::delete("/favorites")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name": "pikachu"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(remove.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn empty_favorite_name_is_a_validation_error() {
        let (_dir, router) = test_router(MockPokemonDataSource::new());

        let response = router
            .oneshot(
                Request::post("/favorites")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name": "  "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
