//! Full-surface HTTP tests for the recipe API
//!
//! Each test builds a fresh router over its own store and drives it
//! in-process with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use ladle_core::store::RecipeStore;
use ladle_web::{AppState, router};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    router(AppState {
        store: Arc::new(RecipeStore::new()),
    })
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, headers, bytes)
}

fn as_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

fn pasta_payload() -> Value {
    json!({
        "title": "Pasta",
        "ingredients": [{"name": "Flour", "unit": "g", "quantity": 200}],
        "description": "Simple pasta"
    })
}

#[tokio::test]
async fn test_create_returns_201_with_location_and_body() {
    let app = app();

    let (status, headers, bytes) = send(&app, "POST", "/recipes", Some(pasta_payload())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        headers.get(header::LOCATION).unwrap().to_str().unwrap(),
        "/recipes/1"
    );

    let recipe = as_json(&bytes);
    assert_eq!(recipe["id"], 1);
    assert_eq!(recipe["title"], "Pasta");
    assert_eq!(recipe["ingredients"][0]["name"], "Flour");
    assert_eq!(recipe["description"], "Simple pasta");
    assert!(recipe["imageUrl"].is_null());
}

#[tokio::test]
async fn test_create_ignores_client_supplied_id() {
    let app = app();

    let mut payload = pasta_payload();
    payload["id"] = json!(777);

    let (status, headers, bytes) = send(&app, "POST", "/recipes", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(as_json(&bytes)["id"], 1);
    assert_eq!(
        headers.get(header::LOCATION).unwrap().to_str().unwrap(),
        "/recipes/1"
    );
}

#[tokio::test]
async fn test_list_reflects_created_recipes() {
    let app = app();

    let (_, _, empty) = send(&app, "GET", "/recipes", None).await;
    assert_eq!(as_json(&empty), json!([]));

    send(&app, "POST", "/recipes", Some(pasta_payload())).await;
    let (status, _, bytes) = send(&app, "GET", "/recipes", None).await;

    assert_eq!(status, StatusCode::OK);
    let listing = as_json(&bytes);
    assert_eq!(listing.as_array().unwrap().len(), 1);
    assert_eq!(listing[0]["title"], "Pasta");
}

#[tokio::test]
async fn test_delete_returns_removed_recipe_exactly_once() {
    let app = app();
    send(&app, "POST", "/recipes", Some(pasta_payload())).await;

    let (status, _, bytes) = send(&app, "DELETE", "/recipes/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&bytes)["title"], "Pasta");

    let (second, _, _) = send(&app, "DELETE", "/recipes/1", None).await;
    assert_eq!(second, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ids_keep_increasing_after_delete() {
    let app = app();

    send(&app, "POST", "/recipes", Some(pasta_payload())).await;
    send(&app, "DELETE", "/recipes/1", None).await;
    let (_, _, bytes) = send(&app, "POST", "/recipes", Some(pasta_payload())).await;

    assert_eq!(as_json(&bytes)["id"], 2);
}

#[tokio::test]
async fn test_update_replaces_all_fields_except_id() {
    let app = app();
    send(&app, "POST", "/recipes", Some(pasta_payload())).await;

    let replacement = json!({
        "id": 99,
        "title": "Ravioli",
        "ingredients": [{"name": "Egg", "unit": "pcs", "quantity": 2}],
        "description": "Filled pasta",
        "imageUrl": "https://example.org/ravioli.jpg"
    });

    let (status, _, bytes) = send(&app, "PUT", "/recipes/1", Some(replacement)).await;
    assert_eq!(status, StatusCode::OK);

    let updated = as_json(&bytes);
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["title"], "Ravioli");
    assert_eq!(updated["imageUrl"], "https://example.org/ravioli.jpg");

    let (_, _, listing) = send(&app, "GET", "/recipes", None).await;
    assert_eq!(as_json(&listing)[0]["title"], "Ravioli");
}

#[tokio::test]
async fn test_update_missing_recipe_is_404() {
    let app = app();
    let (status, _, _) = send(&app, "PUT", "/recipes/5", Some(pasta_payload())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_filter_by_title_is_case_insensitive() {
    let app = app();
    send(&app, "POST", "/recipes", Some(pasta_payload())).await;
    send(
        &app,
        "POST",
        "/recipes",
        Some(json!({"title": "Tomato Soup", "description": "soup"})),
    )
    .await;

    let (status, _, bytes) = send(&app, "GET", "/recipes/filterByTitle/TOMATO", None).await;
    assert_eq!(status, StatusCode::OK);
    let matches = as_json(&bytes);
    assert_eq!(matches.as_array().unwrap().len(), 1);
    assert_eq!(matches[0]["title"], "Tomato Soup");

    let (status, _, bytes) = send(&app, "GET", "/recipes/filterByTitle/curry", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&bytes), json!([]));
}

#[tokio::test]
async fn test_filter_by_ingredient_matches_embedded_names() {
    let app = app();
    send(&app, "POST", "/recipes", Some(pasta_payload())).await;
    send(
        &app,
        "POST",
        "/recipes",
        Some(json!({
            "title": "Salad",
            "ingredients": [{"name": "Lettuce", "unit": "g", "quantity": 100}],
            "description": "Green"
        })),
    )
    .await;

    let (status, _, bytes) = send(&app, "GET", "/recipes/filterByIngredient/FLOUR", None).await;
    assert_eq!(status, StatusCode::OK);
    let matches = as_json(&bytes);
    assert_eq!(matches.as_array().unwrap().len(), 1);
    assert_eq!(matches[0]["title"], "Pasta");
}

#[tokio::test]
async fn test_malformed_json_body_is_a_client_error() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/recipes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

// The concrete scenario from the service contract: create, find by
// ingredient, delete, observe the empty table.
#[tokio::test]
async fn test_create_filter_delete_roundtrip() {
    let app = app();

    let (status, _, bytes) = send(&app, "POST", "/recipes", Some(pasta_payload())).await;
    assert_eq!(status, StatusCode::CREATED);
    let created = as_json(&bytes);
    assert_eq!(created["id"], 1);

    let (_, _, bytes) = send(&app, "GET", "/recipes/filterByIngredient/flour", None).await;
    let matches = as_json(&bytes);
    assert_eq!(matches.as_array().unwrap().len(), 1);
    assert_eq!(matches[0]["id"], 1);

    let (status, _, bytes) = send(&app, "DELETE", "/recipes/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&bytes), created);

    let (_, _, bytes) = send(&app, "GET", "/recipes", None).await;
    assert_eq!(as_json(&bytes), json!([]));
}
