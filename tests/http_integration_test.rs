//! Integration tests driving the full HTTP surface (router -> handlers ->
//! orchestrator) end to end, grounded on the same `tower::ServiceExt::oneshot`
//! pattern used against `axum::Router` elsewhere in the retrieved corpus.

use academic_scheduler::config::AppConfig;
use academic_scheduler::http::{build_router, AppState};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn router() -> axum::Router {
    build_router(AppState::new(AppConfig::default()))
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    let response = router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn minimal_request() -> Value {
    json!({
        "teachers": [{"teacher_id": "t1", "name": "Ada"}],
        "teacher_courses": [{
            "course_id": "c1",
            "course_title": "Algorithms",
            "course_credit": 3,
            "course_type": "theory",
            "course_hours": 3,
            "teacher_id": "t1",
            "teacher_name": "Ada"
        }],
        "halls": [{"hall_id": "h1", "hall_name": "Hall 1", "hall_capacity": 30, "hall_type": "lecture"}],
        "break_period": {"start_time": "12:00", "end_time": "13:00", "daily": true},
        "operational_period": {
            "start_time": "08:00",
            "end_time": "17:00",
            "daily": true,
            "days": ["monday", "tuesday", "wednesday", "thursday", "friday"]
        }
    })
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn root_endpoint_also_reports_healthy() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn s1_minimal_feasible_request_returns_optimal_over_http() {
    let (status, body) = post("/schedule/without-preference", minimal_request()).await;

    // Per the exit policy (spec.md §6), HTTP status is 200 even when the
    // core's own `status` field reports an error.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OPTIMAL");

    let teaching_slots: usize = body["timetable"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|day| day["slots"].as_array().unwrap())
        .filter(|slot| slot["break"] == json!(false))
        .count();
    assert_eq!(teaching_slots, 3);
}

#[tokio::test]
async fn with_preference_endpoint_restricts_sessions_to_the_preferred_window() {
    let mut request = minimal_request();
    request["teacher_prefered_teaching_period"] = json!([{
        "teacher_id": "t1",
        "teacher_name": "Ada",
        "day": "monday",
        "start_time": "09:00",
        "end_time": "12:00"
    }]);

    let (status, body) = post("/schedule/with-preference", request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OPTIMAL");

    let monday = body["timetable"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["day"] == "Monday");
    if let Some(monday) = monday {
        for slot in monday["slots"].as_array().unwrap() {
            if slot["break"] == json!(false) {
                let start = slot["start_time"].as_str().unwrap();
                let end = slot["end_time"].as_str().unwrap();
                assert!(start >= "09:00");
                assert!(end <= "12:00");
            }
        }
    }
}

#[tokio::test]
async fn malformed_json_body_is_rejected_with_422_before_the_core_runs() {
    let request = Request::builder()
        .method("POST")
        .uri("/schedule/without-preference")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not valid json"))
        .unwrap();
    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn empty_teachers_yields_error_status_with_200_http_status() {
    let mut request = minimal_request();
    request["teachers"] = json!([]);

    let (status, body) = post("/schedule/without-preference", request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ERROR");
    assert!(body["timetable"].as_array().unwrap().is_empty());
    assert!(!body["diagnostics"]["constraints"]["hard"]
        .as_array()
        .unwrap()
        .is_empty());
}
