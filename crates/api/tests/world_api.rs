//! HTTP-level integration tests for world-building elements.

mod common;

use axum::http::StatusCode;
use common::{
    add_member, body_json, create_project, create_user, delete_auth, get_auth, post_json_auth,
    put_json_auth, token_for,
};
use serde_json::{json, Value};
use sqlx::PgPool;

use scribe_db::repositories::WorldElementRepo;

fn world_uri(project_id: i64) -> String {
    format!("/api/v1/projects/{project_id}/world")
}

async fn create_element(pool: &PgPool, project_id: i64, token: &str, body: Value) -> Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, &world_uri(project_id), body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

fn research_file(name: &str) -> Value {
    json!({
        "category": "research",
        "name": name,
        "attributes": { "research_type": "file", "summary": "notes" },
    })
}

fn research_content(name: &str, file_id: i64) -> Value {
    json!({
        "category": "research",
        "name": name,
        "attributes": {
            "research_type": "content",
            "research_file_id": file_id,
            "content_type": "quote",
            "body": "Ships were caulked with pitch.",
        },
    })
}

// ---------------------------------------------------------------------------
// Create / list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_and_list_by_category(pool: PgPool) {
    let owner = create_user(&pool, "owner").await;
    let project = create_project(&pool, &owner, "Saltmarsh").await;
    let token = token_for(&owner);

    let arc = create_element(
        &pool,
        project.id,
        &token,
        json!({
            "category": "arcs",
            "name": "The Drowned King",
            "attributes": { "arc_type": "main", "start_chapter": 1, "end_chapter": 12 },
            "tags": ["politics", "sea"],
        }),
    )
    .await;
    assert_eq!(arc["category"], "arcs");
    assert_eq!(arc["tags"], json!(["politics", "sea"]));
    assert_eq!(arc["attributes"]["start_chapter"], 1);

    create_element(
        &pool,
        project.id,
        &token,
        json!({
            "category": "magic",
            "name": "Tidecalling",
            "attributes": { "magic_type": "elemental", "power_level": 7 },
        }),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("{}?category=arcs", world_uri(project.id)), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["The Drowned King"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_requires_known_category(pool: PgPool) {
    let owner = create_user(&pool, "owner").await;
    let project = create_project(&pool, &owner, "Saltmarsh").await;
    let token = token_for(&owner);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &world_uri(project.id), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response =
        get_auth(app, &format!("{}?category=dragons", world_uri(project.id)), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_attributes_are_rejected(pool: PgPool) {
    let owner = create_user(&pool, "owner").await;
    let project = create_project(&pool, &owner, "Saltmarsh").await;
    let token = token_for(&owner);

    let cases = [
        // Unknown category.
        json!({ "category": "dragons", "name": "x", "attributes": {} }),
        // Power level out of range.
        json!({ "category": "magic", "name": "x", "attributes": { "magic_type": "wild", "power_level": 11 } }),
        // Unknown attribute key.
        json!({ "category": "arcs", "name": "x", "attributes": { "colour": "red" } }),
        // Arc ends before it starts.
        json!({ "category": "arcs", "name": "x", "attributes": { "start_chapter": 5, "end_chapter": 2 } }),
        // Year length does not match the months.
        json!({
            "category": "calendar_system",
            "name": "x",
            "attributes": { "months": [{ "name": "Thaw", "days": 30 }], "year_length": 31 },
        }),
    ];

    for body in cases {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(app, &world_uri(project.id), body.clone(), &token).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "expected 400 for {body}"
        );
        assert!(body_json(response).await["error"].is_string());
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_viewer_can_read_but_not_write(pool: PgPool) {
    let owner = create_user(&pool, "owner").await;
    let viewer = create_user(&pool, "viewer").await;
    let project = create_project(&pool, &owner, "Saltmarsh").await;
    add_member(&pool, project.id, &viewer, "viewer", &[]).await;

    let element = create_element(&pool, project.id, &token_for(&owner), research_file("Ships")).await;
    let viewer_token = token_for(&viewer);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("{}/{}", world_uri(project.id), element["id"]),
        &viewer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response =
        post_json_auth(app, &world_uri(project.id), research_file("Nope"), &viewer_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = delete_auth(
        app,
        &format!("{}/{}", world_uri(project.id), element["id"]),
        &viewer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// References
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_research_content_must_reference_a_research_file(pool: PgPool) {
    let owner = create_user(&pool, "owner").await;
    let project = create_project(&pool, &owner, "Saltmarsh").await;
    let other = create_project(&pool, &owner, "Elsewhere").await;
    let token = token_for(&owner);

    let magic = create_element(
        &pool,
        project.id,
        &token,
        json!({ "category": "magic", "name": "Tidecalling", "attributes": { "magic_type": "elemental" } }),
    )
    .await;
    let foreign_file = create_element(&pool, other.id, &token, research_file("Foreign")).await;

    for target in [magic["id"].as_i64().unwrap(), foreign_file["id"].as_i64().unwrap(), 999_999] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            &world_uri(project.id),
            research_content("Stray", target),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "target {target}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_calendar_event_date_is_checked_against_its_system(pool: PgPool) {
    let owner = create_user(&pool, "owner").await;
    let project = create_project(&pool, &owner, "Saltmarsh").await;
    let token = token_for(&owner);

    let system = create_element(
        &pool,
        project.id,
        &token,
        json!({
            "category": "calendar_system",
            "name": "Tidal Reckoning",
            "attributes": {
                "months": [{ "name": "Ebb", "days": 20 }, { "name": "Flow", "days": 25 }],
                "year_length": 45,
            },
        }),
    )
    .await;
    let system_id = system["id"].as_i64().unwrap();

    let event = |month: u32, day: u32| {
        json!({
            "category": "calendar",
            "name": "Flood",
            "attributes": {
                "calendar_system_id": system_id,
                "year": 312,
                "month": month,
                "day": day,
                "importance": "high",
            },
        })
    };

    create_element(&pool, project.id, &token, event(2, 25)).await;

    for bad in [event(2, 26), event(3, 1)] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(app, &world_uri(project.id), bad, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_replaces_attributes_but_not_category(pool: PgPool) {
    let owner = create_user(&pool, "owner").await;
    let project = create_project(&pool, &owner, "Saltmarsh").await;
    let token = token_for(&owner);

    let magic = create_element(
        &pool,
        project.id,
        &token,
        json!({
            "category": "magic",
            "name": "Tidecalling",
            "attributes": { "magic_type": "elemental", "cost": "memories" },
        }),
    )
    .await;
    let uri = format!("{}/{}", world_uri(project.id), magic["id"]);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &uri,
        json!({ "name": "Deep Tidecalling", "attributes": { "magic_type": "divine" } }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await["data"].clone();
    assert_eq!(updated["name"], "Deep Tidecalling");
    assert_eq!(updated["attributes"]["magic_type"], "divine");
    assert_eq!(updated["attributes"]["cost"], Value::Null);

    let app = common::build_test_app(pool);
    let response = put_json_auth(app, &uri, json!({ "category": "arcs" }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Deleting a research file removes its research content in the same step.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_deleting_research_file_deletes_its_content(pool: PgPool) {
    let owner = create_user(&pool, "owner").await;
    let project = create_project(&pool, &owner, "Saltmarsh").await;
    let token = token_for(&owner);

    let file = create_element(&pool, project.id, &token, research_file("Shipbuilding")).await;
    let file_id = file["id"].as_i64().unwrap();
    let first = create_element(&pool, project.id, &token, research_content("Pitch", file_id)).await;
    let second = create_element(&pool, project.id, &token, research_content("Oak", file_id)).await;
    assert_eq!(first["parent_id"], file_id);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("{}/{file_id}/children", world_uri(project.id)),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("{}/{file_id}", world_uri(project.id)), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    for child in [first, second] {
        let id = child["id"].as_i64().unwrap();
        let found = WorldElementRepo::find_by_id(&pool, id).await.unwrap();
        assert!(found.is_none(), "research content {id} should be gone");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_research_file_with_content_cannot_become_content(pool: PgPool) {
    let owner = create_user(&pool, "owner").await;
    let project = create_project(&pool, &owner, "Saltmarsh").await;
    let token = token_for(&owner);

    let file = create_element(&pool, project.id, &token, research_file("Shipbuilding")).await;
    let other_file = create_element(&pool, project.id, &token, research_file("Sails")).await;
    let file_id = file["id"].as_i64().unwrap();
    create_element(&pool, project.id, &token, research_content("Pitch", file_id)).await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("{}/{file_id}", world_uri(project.id)),
        json!({ "attributes": research_content("x", other_file["id"].as_i64().unwrap())["attributes"] }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_element_from_other_project_is_not_found(pool: PgPool) {
    let owner = create_user(&pool, "owner").await;
    let project = create_project(&pool, &owner, "Saltmarsh").await;
    let other = create_project(&pool, &owner, "Elsewhere").await;
    let token = token_for(&owner);

    let file = create_element(&pool, other.id, &token, research_file("Foreign")).await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("{}/{}", world_uri(project.id), file["id"]),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
