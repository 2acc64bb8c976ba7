//! HTTP server wiring for the Ladle recipe API
//!
//! Builds the axum router over a shared [`RecipeStore`] and runs the
//! listener. The router is exposed on its own so tests can drive the full
//! surface without binding a socket.

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get};
use ladle_core::config::LadleConfig;
use ladle_core::store::RecipeStore;
use tower_http::cors::CorsLayer;

use crate::handlers::{
    create_recipe, delete_recipe, filter_by_ingredient, filter_by_title, hello, list_recipes,
    update_recipe,
};

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    /// The single authoritative recipe table
    pub store: Arc<RecipeStore>,
}

/// Builds the recipe API router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route("/recipes/{id}", delete(delete_recipe).put(update_recipe))
        .route("/recipes/filterByTitle/{filter}", get(filter_by_title))
        .route(
            "/recipes/filterByIngredient/{ingredient}",
            get(filter_by_ingredient),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the configured address and serves the recipe API until shutdown.
///
/// # Errors
///
/// - `LadleError::Io` - If the listener cannot bind or the server fails
pub async fn run_server(config: LadleConfig, store: Arc<RecipeStore>) -> ladle_core::Result<()> {
    let app = router(AppState { store });

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Ladle recipe server running on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;

    fn test_router() -> Router {
        router(AppState {
            store: Arc::new(RecipeStore::new()),
        })
    }

    #[tokio::test]
    async fn test_root_serves_greeting() {
        let response = test_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Hello World!");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_integer_id_rejected_at_extraction() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/recipes/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
