/// End-to-end tests for the HTTP API
///
/// Each test drives the router through `tower::Service::call` against the
/// seeded in-memory store (see `common`).

mod common;

use axum::http::StatusCode;
use common::{TestContext, MANAGER, MEMBER, OTHER_MEMBER};
use serde_json::json;
use taskledger_shared::auth::identity::UnknownIdentityPolicy;

#[tokio::test]
async fn test_welcome_and_health() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.send("GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Welcome to the Project Management API"));

    let (status, body) = ctx.send("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn test_login() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .send(
            "POST",
            "/login",
            None,
            Some(json!({ "username": "manager1", "password": "password123" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["role"], "Manager");
    assert_eq!(body["user_id"], MANAGER);
    assert!(body.get("password").is_none());

    let (status, body) = ctx
        .send(
            "POST",
            "/login",
            None,
            Some(json!({ "username": "manager1", "password": "nope" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
    assert_eq!(body["message"], "Unauthorized: Invalid credentials");
}

#[tokio::test]
async fn test_project_create_and_read_back() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .send("POST", "/projects", Some(MANAGER), Some(json!({ "project_name": "X" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Project created successfully");
    let id = body["id"].as_i64().unwrap();

    let (status, body) = ctx.send("GET", &format!("/projects/{}", id), Some(MANAGER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["project_name"], "X");
    assert_eq!(body["description"], "");
    assert_eq!(body["start_date"], json!(null));
    assert_eq!(body["end_date"], json!(null));

    let (status, body) = ctx.send("GET", "/projects", Some(MANAGER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_missing_user_header_is_unauthorized() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .send("POST", "/projects", None, Some(json!({ "project_name": "X" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized: User ID is missing");
    assert_eq!(ctx.store.project_count().await, 3);
}

#[tokio::test]
async fn test_team_member_cannot_manage_projects() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .send("POST", "/projects", Some(MEMBER), Some(json!({ "project_name": "X" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Permission denied: Manager access required");

    let (status, _) = ctx.send("DELETE", "/projects/1", Some(MEMBER), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(ctx.store.project_count().await, 3);
}

#[tokio::test]
async fn test_project_update_is_sparse() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .send(
            "PUT",
            "/projects/1",
            Some(MANAGER),
            Some(json!({ "status": "On Hold", "end_date": null })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Project updated successfully");

    let (_, body) = ctx.send("GET", "/projects/1", Some(MANAGER), None).await;
    assert_eq!(body["status"], "On Hold");
    assert_eq!(body["project_name"], "Website Redesign");
    assert_eq!(body["end_date"], "2025-01-31");

    let (status, body) = ctx
        .send("PUT", "/projects/99", Some(MANAGER), Some(json!({ "status": "Done" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Project not found");
}

#[tokio::test]
async fn test_project_delete_keeps_tasks() {
    let ctx = TestContext::new().await;

    let (status, _) = ctx.send("DELETE", "/projects/1", Some(MANAGER), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = ctx.send("GET", "/projects/1", Some(MANAGER), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = ctx.send("GET", "/tasks/1", Some(MANAGER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["project_id"], 1);
}

#[tokio::test]
async fn test_task_create_validation() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .send(
            "POST",
            "/tasks",
            Some(MANAGER),
            Some(json!({ "project_id": 1, "task_name": "Audit", "status": "Archived" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Invalid status 'Archived'. Allowed values are: Not Started, In Progress, Completed"
    );

    let (status, body) = ctx
        .send("POST", "/tasks", Some(MANAGER), Some(json!({ "project_id": 1 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid input: task_name must be provided");

    let (status, _) = ctx
        .send(
            "POST",
            "/tasks",
            Some(MANAGER),
            Some(json!({ "project_id": 42, "task_name": "Orphan" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(ctx.store.task_count().await, 6);
}

#[tokio::test]
async fn test_task_create_assign_and_list() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .send(
            "POST",
            "/tasks",
            Some(MANAGER),
            Some(json!({ "project_id": 2, "task_name": "Newsletter", "due_date": "2024-12-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    let (_, body) = ctx.send("GET", &format!("/tasks/{}", id), Some(MANAGER), None).await;
    assert_eq!(body["status"], "Not Started");
    assert_eq!(body["assigned_user_id"], json!(null));

    let (status, body) = ctx
        .send("PUT", &format!("/tasks/{}/assign", id), Some(MANAGER), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid input: assigned_user_id must be provided");

    let (status, body) = ctx
        .send(
            "PUT",
            &format!("/tasks/{}/assign", id),
            Some(MANAGER),
            Some(json!({ "assigned_user_id": MEMBER })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task assigned/reassigned successfully");

    let (status, body) = ctx.send("GET", "/tasks/assigned", Some(MEMBER), None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["task_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Create Wireframes", "Newsletter"]);

    let (status, _) = ctx.send("GET", "/tasks/assigned", Some(MANAGER), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_task_edit_and_delete() {
    let ctx = TestContext::new().await;

    let (status, _) = ctx
        .send("PUT", "/tasks/2", Some(MANAGER), Some(json!({ "status": "In Progress" })))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = ctx.send("GET", "/tasks/2", Some(MANAGER), None).await;
    assert_eq!(body["status"], "In Progress");
    assert_eq!(body["task_name"], "Develop Frontend");
    assert_eq!(body["assigned_user_id"], OTHER_MEMBER);

    let (status, _) = ctx
        .send("PUT", "/tasks/2", Some(MANAGER), Some(json!({ "status": "Blocked" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx.send("DELETE", "/tasks/2", Some(MANAGER), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = ctx.send("DELETE", "/tasks/2", Some(MANAGER), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_status_update_by_assignee_only() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .send("PUT", "/tasks/1/status", Some(MEMBER), Some(json!({ "status": "Completed" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task status updated successfully");

    // Task 1 belongs to team_member1
    let (status, _) = ctx
        .send(
            "PUT",
            "/tasks/1/status",
            Some(OTHER_MEMBER),
            Some(json!({ "status": "In Progress" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = ctx.send("GET", "/tasks/1", Some(MANAGER), None).await;
    assert_eq!(body["status"], "Completed");

    let (status, _) = ctx
        .send("PUT", "/tasks/404/status", Some(MEMBER), Some(json!({ "status": "Completed" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx
        .send("PUT", "/tasks/1/status", Some(MEMBER), Some(json!({ "status": "Archived" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_log_time() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .send("POST", "/tasks/1/log-time", Some(MEMBER), Some(json!({ "hours_spent": 2.5 })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Time logged successfully");

    for hours in [json!(-1), json!(0), json!("abc")] {
        let (status, body) = ctx
            .send("POST", "/tasks/1/log-time", Some(MEMBER), Some(json!({ "hours_spent": hours })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid input: hours_spent must be a positive number");
    }

    let (status, _) = ctx
        .send(
            "POST",
            "/tasks/1/log-time",
            Some(OTHER_MEMBER),
            Some(json!({ "hours_spent": 1 })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = ctx
        .send("POST", "/tasks/1/log-time", Some(MANAGER), Some(json!({ "hours_spent": 1 })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    assert_eq!(ctx.store.task_log_count().await, 1);

    let (status, body) = ctx.send("GET", "/tasks/1/logs", Some(MANAGER), None).await;
    assert_eq!(status, StatusCode::OK);
    let logs = body.as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["hours_spent"], 2.5);
    assert_eq!(logs[0]["user_id"], MEMBER);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .send("POST", "/projects", Some(MANAGER), Some(json!({ "project_name": 17 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_gate_runs_before_body_decoding() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .send("POST", "/projects", Some(MEMBER), Some(json!({ "project_name": 17 })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Permission denied: Manager access required");

    let (status, _) = ctx
        .send("PUT", "/tasks/1", Some(MEMBER), Some(json!({ "due_date": "tomorrow" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = ctx.send("POST", "/tasks/1/log-time", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    let (status, _) = ctx.send("POST", "/tasks/1/log-time", Some(MANAGER), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = ctx
        .send("PUT", "/tasks/1/status", None, Some(json!({ "status": 5 })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Admitted callers still get the body error
    let (status, body) = ctx
        .send("PUT", "/tasks/1/status", Some(MEMBER), Some(json!({ "status": 5 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, _) = ctx.send("POST", "/tasks/1/log-time", Some(MEMBER), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(ctx.store.project_count().await, 3);
    assert_eq!(ctx.store.task_log_count().await, 0);
}

#[tokio::test]
async fn test_status_update_requires_status() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .send("PUT", "/tasks/1/status", Some(MEMBER), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid input: status must be provided");
}

#[tokio::test]
async fn test_unknown_user_id_policy() {
    let ctx = TestContext::new().await;
    let (status, _) = ctx.send("GET", "/tasks/assigned", Some(999), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let ctx = TestContext::with_policy(UnknownIdentityPolicy::TeamMember).await;
    let (status, body) = ctx.send("GET", "/tasks/assigned", Some(999), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = ctx.send("GET", "/projects", Some(999), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_security_headers_on_api_responses() {
    let ctx = TestContext::new().await;

    let response = {
        use axum::{body::Body, http::Request};
        use tower::Service as _;

        ctx.app
            .clone()
            .call(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap()
    };

    assert_eq!(response.headers().get("X-Content-Type-Options").unwrap(), "nosniff");
    assert!(response.headers().get("Strict-Transport-Security").is_none());
}
