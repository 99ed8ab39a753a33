mod common;

use axum::http::{header, Method, StatusCode};
use serde_json::{json, Value};

use common::*;

fn authed(method: Method, uri: &str, body: &Value, token: &str) -> axum::http::Request<axum::body::Body> {
    with_header(
        json_request(method, uri, body),
        header::AUTHORIZATION,
        &format!("Bearer {}", token),
    )
}

fn tiramisu(price: Value) -> Value {
    json!({
        "tenantId": TENANT,
        "name": "Tiramisu",
        "priceCents": price,
        "currency": "eur",
        "tags": ["Dessert", "dessert", " sweet "],
        "section": "Desserts"
    })
}

#[tokio::test]
async fn test_create_requires_owner_token() {
    let app = app(seeded_store().await);

    let anonymous = send(&app, json_request(Method::POST, "/api/v1/menu/items", &tiramisu(json!(650)))).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.body["code"], "UNAUTHORIZED");

    let forged = send(
        &app,
        authed(Method::POST, "/api/v1/menu/items", &tiramisu(json!(650)), "not.a.jwt"),
    )
    .await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);

    let other_tenant = send(
        &app,
        authed(
            Method::POST,
            "/api/v1/menu/items",
            &tiramisu(json!(650)),
            &owner_token(LOCKED_TENANT),
        ),
    )
    .await;
    assert_eq!(other_tenant.status, StatusCode::FORBIDDEN);
    assert_eq!(other_tenant.body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_create_item_normalizes_input() {
    let app = app(seeded_store().await);
    let response = send(
        &app,
        authed(Method::POST, "/api/v1/menu/items", &tiramisu(json!(650)), &owner_token(TENANT)),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    let item = &response.body["data"];
    assert_eq!(item["currency"], "EUR");
    assert_eq!(item["tags"], json!(["dessert", "sweet"]));
    assert_eq!(item["isAvailable"], true);
    assert_eq!(item["version"], 1);
}

#[tokio::test]
async fn test_missing_name_is_reported() {
    let app = app(seeded_store().await);
    let response = send(
        &app,
        authed(
            Method::POST,
            "/api/v1/menu/items",
            &json!({"tenantId": TENANT, "priceCents": 650, "currency": "EUR"}),
            &owner_token(TENANT),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "BAD_REQUEST");
    let issues = response.body["issues"].as_array().unwrap();
    assert!(issues.iter().any(|issue| issue["path"] == "name"));
}

#[tokio::test]
async fn test_price_must_be_integer_minor_units() {
    let app = app(seeded_store().await);
    let token = owner_token(TENANT);

    let fractional = send(
        &app,
        authed(Method::POST, "/api/v1/menu/items", &tiramisu(json!(19.99)), &token),
    )
    .await;
    assert_eq!(fractional.status, StatusCode::BAD_REQUEST);
    assert_eq!(fractional.body["issues"][0]["path"], "priceCents");

    let integral = send(
        &app,
        authed(Method::POST, "/api/v1/menu/items", &tiramisu(json!(1999)), &token),
    )
    .await;
    assert_eq!(integral.status, StatusCode::CREATED);
    assert_eq!(integral.body["data"]["priceCents"], 1999);
}

#[tokio::test]
async fn test_duplicate_name_conflicts() {
    let app = app(seeded_store().await);
    let token = owner_token(TENANT);

    let first = send(&app, authed(Method::POST, "/api/v1/menu/items", &tiramisu(json!(650)), &token)).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = send(&app, authed(Method::POST, "/api/v1/menu/items", &tiramisu(json!(700)), &token)).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_update_uses_optimistic_versions() {
    let app = app(seeded_store().await);
    let token = owner_token(TENANT);

    let created = send(&app, authed(Method::POST, "/api/v1/menu/items", &tiramisu(json!(650)), &token)).await;
    let item_id = created.body["data"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/v1/menu/items/{}", item_id);

    let updated = send(
        &app,
        authed(
            Method::PATCH,
            &uri,
            &json!({"tenantId": TENANT, "version": 1, "priceCents": 700}),
            &token,
        ),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK, "{}", updated.body);
    assert_eq!(updated.body["data"]["version"], 2);
    assert_eq!(updated.body["data"]["priceCents"], 700);

    let stale = send(
        &app,
        authed(
            Method::PATCH,
            &uri,
            &json!({"tenantId": TENANT, "version": 1, "isAvailable": false}),
            &token,
        ),
    )
    .await;
    assert_eq!(stale.status, StatusCode::CONFLICT);
    assert_eq!(stale.body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_update_edge_cases() {
    let app = app(seeded_store().await);
    let token = owner_token(TENANT);

    let unknown = send(
        &app,
        authed(
            Method::PATCH,
            "/api/v1/menu/items/0d7c4a8e-5b1f-4e2a-9c3d-6f8e0a1b2c3d",
            &json!({"tenantId": TENANT, "version": 1, "name": "Panna Cotta"}),
            &token,
        ),
    )
    .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let no_changes = send(
        &app,
        authed(
            Method::PATCH,
            "/api/v1/menu/items/0d7c4a8e-5b1f-4e2a-9c3d-6f8e0a1b2c3d",
            &json!({"tenantId": TENANT, "version": 1}),
            &token,
        ),
    )
    .await;
    assert_eq!(no_changes.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_version_out_of_range_names_the_field() {
    let app = app(seeded_store().await);
    let response = send(
        &app,
        authed(
            Method::PATCH,
            "/api/v1/menu/items/0d7c4a8e-5b1f-4e2a-9c3d-6f8e0a1b2c3d",
            &json!({"tenantId": TENANT, "version": 1_099_511_627_776_i64, "isAvailable": false}),
            &owner_token(TENANT),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["issues"][0]["path"], "version");
}

#[tokio::test]
async fn test_hidden_items_leave_public_menu() {
    let app = app(seeded_store().await);
    let token = owner_token(TENANT);

    let created = send(&app, authed(Method::POST, "/api/v1/menu/items", &tiramisu(json!(650)), &token)).await;
    let item_id = created.body["data"]["id"].as_str().unwrap().to_string();

    let menu_uri = format!("/api/v1/menu?tenantId={}", TENANT);
    let before = send(&app, get(&menu_uri)).await;
    assert_eq!(before.body["data"]["sections"].as_array().unwrap().len(), 3);

    send(
        &app,
        authed(
            Method::PATCH,
            &format!("/api/v1/menu/items/{}", item_id),
            &json!({"tenantId": TENANT, "version": 1, "isAvailable": false}),
            &token,
        ),
    )
    .await;

    let after = send(&app, get(&menu_uri)).await;
    let names: Vec<&str> = after.body["data"]["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Mains", "Other"]);
}
