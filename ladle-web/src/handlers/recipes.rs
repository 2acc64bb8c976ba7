//! Recipe CRUD handlers
//!
//! Each handler validates nothing beyond shape, performs one operation
//! against the shared [`RecipeStore`], and maps the outcome to an HTTP
//! status. Malformed bodies and non-integer path ids are rejected by the
//! axum extraction layer before these run.

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json};
use ladle_core::recipe::{Recipe, RecipeDto, RecipeId};
use ladle_core::store::StoreError;

use crate::server::AppState;

/// Maps a store failure to the HTTP status the client sees.
fn error_status(error: &StoreError) -> StatusCode {
    match error {
        StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        StoreError::IdCollision { .. } => {
            tracing::error!("recipe id counter handed out a duplicate: {error}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Root greeting, kept as a plain-text liveness probe.
pub async fn hello() -> &'static str {
    "Hello World!"
}

/// Lists all current recipes in unspecified order.
pub async fn list_recipes(State(state): State<AppState>) -> Json<Vec<Recipe>> {
    Json(state.store.all_recipes().await)
}

/// Creates a recipe and answers 201 with a `Location` pointing at it.
///
/// # Errors
///
/// - `500 Internal Server Error` - If the id counter handed out a duplicate
pub async fn create_recipe(
    State(state): State<AppState>,
    Json(dto): Json<RecipeDto>,
) -> Result<impl IntoResponse, StatusCode> {
    let recipe = state
        .store
        .create(dto)
        .await
        .map_err(|e| error_status(&e))?;

    tracing::debug!("created recipe {} ({})", recipe.id, recipe.title);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/recipes/{}", recipe.id))],
        Json(recipe),
    ))
}

/// Removes a recipe and returns the removed record.
///
/// # Errors
///
/// - `404 Not Found` - If no recipe exists under the path id
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Recipe>, StatusCode> {
    let recipe = state
        .store
        .remove(RecipeId::new(id))
        .await
        .map_err(|e| error_status(&e))?;

    tracing::debug!("deleted recipe {}", recipe.id);
    Ok(Json(recipe))
}

/// Replaces the recipe at the path id wholesale.
///
/// # Errors
///
/// - `404 Not Found` - If no recipe exists under the path id
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(dto): Json<RecipeDto>,
) -> Result<Json<Recipe>, StatusCode> {
    let recipe = state
        .store
        .replace(RecipeId::new(id), dto)
        .await
        .map_err(|e| error_status(&e))?;

    Ok(Json(recipe))
}

/// Lists recipes whose title contains the path segment, case-insensitively.
pub async fn filter_by_title(
    State(state): State<AppState>,
    Path(filter): Path<String>,
) -> Json<Vec<Recipe>> {
    Json(state.store.filter_by_title(&filter).await)
}

/// Lists recipes with at least one matching ingredient name.
pub async fn filter_by_ingredient(
    State(state): State<AppState>,
    Path(ingredient): Path<String>,
) -> Json<Vec<Recipe>> {
    Json(state.store.filter_by_ingredient(&ingredient).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let not_found = StoreError::NotFound {
            id: RecipeId::new(4),
        };
        assert_eq!(error_status(&not_found), StatusCode::NOT_FOUND);

        let collision = StoreError::IdCollision {
            id: RecipeId::new(4),
        };
        assert_eq!(error_status(&collision), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_hello_body() {
        assert_eq!(hello().await, "Hello World!");
    }
}
