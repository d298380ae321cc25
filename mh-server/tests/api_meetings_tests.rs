//! Integration tests for meeting API handlers
mod common;

use crate::common::{authed_user, body_json, create_test_state, json_request};

use mh_core::Permission;
use mh_server::build_router;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

fn future_ms(minutes: i64) -> i64 {
    (Utc::now() + Duration::minutes(minutes)).timestamp_millis()
}

async fn manager_token(state: &mh_server::AppState) -> String {
    authed_user(
        state,
        "manager-1",
        "Manager",
        &[Permission::ViewMeetings, Permission::ManageMeetings],
    )
    .await
}

async fn create_meeting(app: &axum::Router, token: &str, body: Value) -> Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/meetings", Some(token), Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn test_create_then_get_round_trips_times_exactly() {
    let state = create_test_state().await;
    let token = manager_token(&state).await;
    let app = build_router(state);

    let start = future_ms(60);
    let end = future_ms(120);
    let created = create_meeting(
        &app,
        &token,
        json!({
            "type": "meeting",
            "name": "Weekly sync",
            "start_time": start,
            "end_time": end,
            "location": "Room 42",
            "description": "Agenda: everything",
        }),
    )
    .await;

    let id = created["meeting"]["id"].as_str().unwrap();
    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/api/meetings/{}", id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["meeting"]["name"], "Weekly sync");
    assert_eq!(json["meeting"]["start_time"], start);
    assert_eq!(json["meeting"]["end_time"], end);
    assert_eq!(json["meeting"]["type"], "meeting");
}

#[tokio::test]
async fn test_creator_is_the_authenticated_user_not_the_body() {
    let state = create_test_state().await;
    let token = manager_token(&state).await;
    let app = build_router(state);

    // A client-supplied requester field must be ignored
    let created = create_meeting(
        &app,
        &token,
        json!({
            "type": "meeting",
            "name": "Weekly sync",
            "start_time": future_ms(60),
            "end_time": future_ms(120),
            "location": "Room 42",
            "requester": "somebody-else",
            "creator": "somebody-else",
        }),
    )
    .await;

    assert_eq!(created["meeting"]["creator"]["id"], "manager-1");
}

#[tokio::test]
async fn test_meeting_ending_before_it_starts_is_rejected() {
    let state = create_test_state().await;
    let token = manager_token(&state).await;
    let app = build_router(state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/meetings",
            Some(&token),
            Some(json!({
                "type": "meeting",
                "name": "Backwards",
                "start_time": future_ms(120),
                "end_time": future_ms(60),
                "location": "Room 42",
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_patching_location_leaves_name_and_times_unchanged() {
    let state = create_test_state().await;
    let token = manager_token(&state).await;
    let app = build_router(state);

    let start = future_ms(60);
    let end = future_ms(120);
    let created = create_meeting(
        &app,
        &token,
        json!({
            "type": "meeting",
            "name": "Weekly sync",
            "start_time": start,
            "end_time": end,
            "location": "Room 42",
        }),
    )
    .await;
    let id = created["meeting"]["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/meetings/{}", id),
            Some(&token),
            Some(json!({"location": "Room 7"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/api/meetings/{}", id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["meeting"]["location"], "Room 7");
    assert_eq!(json["meeting"]["name"], "Weekly sync");
    assert_eq!(json["meeting"]["start_time"], start);
    assert_eq!(json["meeting"]["end_time"], end);
}

#[tokio::test]
async fn test_delete_then_get_reports_not_found() {
    let state = create_test_state().await;
    let token = manager_token(&state).await;
    let app = build_router(state);

    let created = create_meeting(
        &app,
        &token,
        json!({
            "type": "meeting",
            "name": "Doomed",
            "start_time": future_ms(60),
            "end_time": future_ms(120),
            "location": "Room 42",
        }),
    )
    .await;
    let id = created["meeting"]["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/meetings/{}", id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/api/meetings/{}", id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert!(json["error"]["message"].as_str().unwrap().contains(id));
}

#[tokio::test]
async fn test_listing_excludes_passed_meetings_unless_overridden() {
    let state = create_test_state().await;
    let token = manager_token(&state).await;
    let app = build_router(state);

    create_meeting(
        &app,
        &token,
        json!({
            "type": "meeting",
            "name": "Upcoming",
            "start_time": future_ms(60),
            "end_time": future_ms(120),
            "location": "Room 42",
        }),
    )
    .await;
    // A meeting that already happened
    create_meeting(
        &app,
        &token,
        json!({
            "type": "meeting",
            "name": "Passed",
            "start_time": future_ms(-120),
            "end_time": future_ms(-60),
            "location": "Room 42",
        }),
    )
    .await;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/meetings", Some(&token), None))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["meetings"][0]["name"], "Upcoming");

    // passed=true lifts the default bound
    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/api/meetings?passed=true",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["total"], 2);

    // passed=false is treated like the default
    let response = app
        .oneshot(json_request(
            "GET",
            "/api/meetings?passed=false",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
}

#[tokio::test]
async fn test_listing_filters_and_pages() {
    let state = create_test_state().await;
    let token = manager_token(&state).await;
    let app = build_router(state);

    for i in 0..5i64 {
        create_meeting(
            &app,
            &token,
            json!({
                "type": "meeting",
                "name": format!("Sync {}", i),
                "start_time": future_ms(60 + i * 30),
                "end_time": future_ms(120 + i * 30),
                "location": "Room 42",
            }),
        )
        .await;
    }

    // Substring filter on name is case-insensitive
    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/api/meetings?name=SYNC%203",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["meetings"][0]["name"], "Sync 3");

    // Page 2 of limit 2 holds the third and fourth meetings
    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/api/meetings?page=2&limit=2",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["total"], 5);
    assert_eq!(json["page"], 2);
    assert_eq!(json["limit"], 2);
    assert_eq!(json["meetings"][0]["name"], "Sync 2");
    assert_eq!(json["meetings"][1]["name"], "Sync 3");
}

#[tokio::test]
async fn test_non_numeric_page_and_limit_fall_back_to_defaults() {
    let state = create_test_state().await;
    let token = manager_token(&state).await;
    let app = build_router(state);

    create_meeting(
        &app,
        &token,
        json!({
            "type": "meeting",
            "name": "Only one",
            "start_time": future_ms(60),
            "end_time": future_ms(120),
            "location": "Room 42",
        }),
    )
    .await;

    let response = app
        .oneshot(json_request(
            "GET",
            "/api/meetings?page=NaN&limit=banana",
            Some(&token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["page"], 1);
    assert_eq!(json["limit"], 25);
    assert_eq!(json["total"], 1);
}

#[tokio::test]
async fn test_empty_attendance_is_not_an_error() {
    let state = create_test_state().await;
    let token = manager_token(&state).await;
    let app = build_router(state);

    let created = create_meeting(
        &app,
        &token,
        json!({
            "type": "meeting",
            "name": "Weekly sync",
            "start_time": future_ms(60),
            "end_time": future_ms(120),
            "location": "Room 42",
        }),
    )
    .await;
    let id = created["meeting"]["id"].as_str().unwrap();

    // A present meeting with no entries returns the empty list,
    // distinct from a missing meeting
    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/api/meetings/{}/attendances", id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["attendance"].as_array().unwrap().len(), 0);

    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/api/meetings/{}/attendances", uuid::Uuid::new_v4()),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_attendance_replace_patch_and_clear() {
    let state = create_test_state().await;
    let token = manager_token(&state).await;
    let app = build_router(state);

    let created = create_meeting(
        &app,
        &token,
        json!({
            "type": "meeting",
            "name": "Weekly sync",
            "start_time": future_ms(60),
            "end_time": future_ms(120),
            "location": "Room 42",
        }),
    )
    .await;
    let id = created["meeting"]["id"].as_str().unwrap();

    // Replace the whole list
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/meetings/{}/attendances", id),
            Some(&token),
            Some(json!({"attendance": [
                {"user": "member-1"},
                {"user": "member-2", "did_attend": true, "notes": "On time"},
            ]})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Patch one user's entry
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/meetings/{}/attendances/users/member-1", id),
            Some(&token),
            Some(json!({"did_attend": true})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["attendance"]["did_attend"], true);

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/api/meetings/{}/attendances/users/member-1", id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["attendance"]["user"], "member-1");
    assert_eq!(json["attendance"]["did_attend"], true);

    // Clear the list
    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/meetings/{}/attendances", id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/api/meetings/{}/attendances", id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["attendance"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_duplicate_attendance_users_are_rejected() {
    let state = create_test_state().await;
    let token = manager_token(&state).await;
    let app = build_router(state);

    let created = create_meeting(
        &app,
        &token,
        json!({
            "type": "meeting",
            "name": "Weekly sync",
            "start_time": future_ms(60),
            "end_time": future_ms(120),
            "location": "Room 42",
        }),
    )
    .await;
    let id = created["meeting"]["id"].as_str().unwrap();

    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/api/meetings/{}/attendances", id),
            Some(&token),
            Some(json!({"attendance": [
                {"user": "member-1"},
                {"user": "member-1"},
            ]})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_feedback_rating_outside_range_is_rejected() {
    let state = create_test_state().await;
    let token = manager_token(&state).await;
    let app = build_router(state);

    let created = create_meeting(
        &app,
        &token,
        json!({
            "type": "meeting",
            "name": "Weekly sync",
            "start_time": future_ms(60),
            "end_time": future_ms(120),
            "location": "Room 42",
        }),
    )
    .await;
    let id = created["meeting"]["id"].as_str().unwrap();

    for rating in [0, 6, -1] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/meetings/{}/feedback/users/member-1", id),
                Some(&token),
                Some(json!({"feedback_rating": rating})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_feedback_for_user_is_stripped_of_identity() {
    let state = create_test_state().await;
    let token = manager_token(&state).await;
    let app = build_router(state);

    let created = create_meeting(
        &app,
        &token,
        json!({
            "type": "meeting",
            "name": "Weekly sync",
            "start_time": future_ms(60),
            "end_time": future_ms(120),
            "location": "Room 42",
        }),
    )
    .await;
    let id = created["meeting"]["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/meetings/{}/feedback/users/member-1", id),
            Some(&token),
            Some(json!({"feedback_rating": 4, "feedback_description": "Ran long"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/api/meetings/{}/feedback/users/member-1", id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["feedback"]["feedback_rating"], 4);
    assert_eq!(json["feedback"]["feedback_description"], "Ran long");
    // Identity and attendance fields are stripped
    assert!(json["feedback"].get("user").is_none());
    assert!(json["feedback"].get("did_attend").is_none());

    // A user without feedback resolves to null, not an error
    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/api/meetings/{}/feedback/users/member-2", id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["feedback"].is_null());
}
