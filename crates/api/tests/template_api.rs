//! HTTP-level integration tests for the `/templates` endpoints, including
//! attribute reconciliation on update.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put, put_json};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `<p>Hello</p>` in base64.
const BODY_B64: &str = "PHA+SGVsbG88L3A+";

async fn create_template(pool: &PgPool, project_id: i64, attributes: Value) -> Value {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/templates",
        json!({
            "name": "Welcome",
            "type": "campaign",
            "subject": "Hello",
            "body": BODY_B64,
            "project_id": project_id,
            "attributes": attributes,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

async fn update_attributes(
    pool: &PgPool,
    template: &Value,
    attributes: Value,
) -> axum::http::Response<axum::body::Body> {
    let id = template["id"].as_i64().unwrap();
    put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/templates/{id}"),
        json!({
            "name": template["name"],
            "subject": template["subject"],
            "body": template["body"],
            "project_id": template["project_id"],
            "attributes": attributes,
        }),
    )
    .await
}

fn attribute_keys(template: &Value) -> Vec<String> {
    template["attributes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["key"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_enriched_template(pool: PgPool) {
    let project_id = common::create_project(&pool, "Mailers").await;

    let t = create_template(
        &pool,
        project_id,
        json!([{"key": "first_name", "required": true}, {"key": "due", "type": "date"}]),
    )
    .await;

    assert_eq!(t["type"], "campaign");
    assert_eq!(t["body"], BODY_B64);
    assert_eq!(t["project"]["id"], project_id);
    assert_eq!(t["project"]["sender_email"], "team@example.com");
    assert_eq!(attribute_keys(&t), vec!["first_name", "due"]);
    assert_eq!(t["attributes"][0]["type"], "string");
    assert_eq!(t["attributes"][0]["required"], true);
    assert_eq!(t["attributes"][1]["template_id"], t["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_without_attributes(pool: PgPool) {
    let project_id = common::create_project(&pool, "Mailers").await;

    let t = create_template(&pool, project_id, json!([])).await;

    assert_eq!(t["attributes"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_invalid_input(pool: PgPool) {
    let project_id = common::create_project(&pool, "Mailers").await;
    let cases = [
        json!({"name": "", "type": "campaign", "project_id": project_id}),
        json!({"name": "T", "type": "newsletter", "project_id": project_id}),
        json!({"name": "T", "type": "tx", "project_id": project_id,
               "attributes": [{"key": "a"}, {"key": "a"}]}),
        json!({"name": "T", "type": "tx", "project_id": project_id,
               "attributes": [{"key": "a", "type": "blob"}]}),
    ];

    for body in cases {
        let response = post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/templates",
            body.clone(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "payload: {body}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_body_that_is_not_base64(pool: PgPool) {
    let project_id = common::create_project(&pool, "Mailers").await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/templates",
        json!({"name": "T", "type": "tx", "body": "<p>raw</p>", "project_id": project_id}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_unknown_project_returns_not_found(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/templates",
        json!({"name": "T", "type": "tx", "project_id": 999_999}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Project with id 999999 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_and_list_can_omit_body(pool: PgPool) {
    let project_id = common::create_project(&pool, "Mailers").await;
    let t = create_template(&pool, project_id, json!([{"key": "a"}])).await;
    let id = t["id"].as_i64().unwrap();

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/templates/{id}?no_body=true"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["body"], "");
    assert_eq!(attribute_keys(&json["data"]), vec!["a"]);

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/templates?status=campaign",
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["body"], BODY_B64);

    let response = get(common::build_test_app(pool), "/api/v1/templates?status=tx").await;
    assert_eq!(body_json(response).await["data"], json!([]));
}

// ---------------------------------------------------------------------------
// Update / reconciliation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_reconciles_attributes(pool: PgPool) {
    let project_id = common::create_project(&pool, "Mailers").await;
    let t = create_template(&pool, project_id, json!([{"key": "a"}, {"key": "b"}])).await;
    let id_a = t["attributes"][0]["id"].as_i64().unwrap();
    let id_b = t["attributes"][1]["id"].as_i64().unwrap();

    let desired = json!([{"id": id_a, "key": "a2"}, {"key": "c"}]);
    let response = update_attributes(&pool, &t, desired).await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await["data"].clone();
    assert_eq!(attribute_keys(&updated), vec!["a2", "c"]);
    assert_eq!(updated["attributes"][0]["id"], id_a);
    let ids: Vec<i64> = updated["attributes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert!(!ids.contains(&id_b));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn resubmitting_is_idempotent(pool: PgPool) {
    let project_id = common::create_project(&pool, "Mailers").await;
    let t = create_template(&pool, project_id, json!([{"key": "a"}, {"key": "b"}])).await;

    let response = update_attributes(&pool, &t, t["attributes"].clone()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let again = body_json(response).await["data"].clone();
    assert_eq!(again["attributes"], t["attributes"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_attribute_list_deletes_all(pool: PgPool) {
    let project_id = common::create_project(&pool, "Mailers").await;
    let t = create_template(&pool, project_id, json!([{"key": "a"}, {"key": "b"}])).await;

    let response = update_attributes(&pool, &t, json!([])).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["attributes"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stale_attribute_id_is_rejected_without_changes(pool: PgPool) {
    let project_id = common::create_project(&pool, "Mailers").await;
    let t = create_template(&pool, project_id, json!([{"key": "a"}])).await;
    let id = t["id"].as_i64().unwrap();

    let response = update_attributes(&pool, &t, json!([{"id": 987_654, "key": "ghost"}])).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = get(common::build_test_app(pool), &format!("/api/v1/templates/{id}")).await;
    let after = body_json(response).await["data"].clone();
    assert_eq!(after["attributes"], t["attributes"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_missing_template_returns_not_found(pool: PgPool) {
    let project_id = common::create_project(&pool, "Mailers").await;

    let response = put_json(
        common::build_test_app(pool),
        "/api/v1/templates/999999",
        json!({"name": "T", "project_id": project_id, "attributes": []}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Default / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn default_template_cannot_be_deleted(pool: PgPool) {
    let project_id = common::create_project(&pool, "Mailers").await;
    let t = create_template(&pool, project_id, json!([])).await;
    let id = t["id"].as_i64().unwrap();

    let response = put(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/templates/{id}/default"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_default"], true);

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/templates/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = get(common::build_test_app(pool), &format!("/api/v1/templates/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_non_default_template(pool: PgPool) {
    let project_id = common::create_project(&pool, "Mailers").await;
    let t = create_template(&pool, project_id, json!([{"key": "a"}])).await;
    let id = t["id"].as_i64().unwrap();

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/templates/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(common::build_test_app(pool), &format!("/api/v1/templates/{id}")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_project_with_templates_fails(pool: PgPool) {
    let project_id = common::create_project(&pool, "Mailers").await;
    create_template(&pool, project_id, json!([])).await;

    let response = delete(
        common::build_test_app(pool),
        &format!("/api/v1/projects/{project_id}"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(json["error"].as_str().unwrap().starts_with("Database error:"));
}
