// Handlers for the top-level event collection.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use campus_events::core::event::Event;
use campus_events::core::patch::EventPatch;

use crate::handlers::error_response;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Response {
    Json(state.store.list().await).into_response()
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Event>, JsonRejection>,
) -> Response {
    let Ok(Json(event)) = body else {
        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
    };
    match state.store.create(event).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.get(&id).await {
        Some(event) => Json(event).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<EventPatch>, JsonRejection>,
) -> Response {
    let Ok(Json(patch)) = body else {
        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
    };
    match state.store.update(&id, patch).await {
        Ok(updated) => Json(updated).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    state.store.delete(&id).await;
    StatusCode::NO_CONTENT.into_response()
}

#[derive(Deserialize)]
pub struct ApprovalBody {
    pub approved: bool,
}

pub async fn set_approval(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ApprovalBody>, JsonRejection>,
) -> Response {
    let Ok(Json(body)) = body else {
        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
    };
    match state.store.set_approval(&id, body.approved).await {
        Ok(updated) => Json(updated).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Serialize)]
pub struct ReconcileResponse {
    pub changed: usize,
}

/// Run the date-driven status pass against today's date. Callable, not
/// scheduled; the console invokes it when a fresh view matters.
pub async fn reconcile(State(state): State<AppState>) -> Response {
    let changed = state.store.reconcile_statuses(Utc::now().date_naive()).await;
    Json(ReconcileResponse { changed }).into_response()
}

#[cfg(test)]
mod events_http_tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use rstest::rstest;
    use tower::ServiceExt;

    use campus_events::adapters::in_memory::in_memory_gateway::InMemoryGateway;
    use campus_events::application::store::EventStore;
    use campus_events::test_support::fixtures::events::EventBuilder;

    use crate::routes::router;
    use crate::state::AppState;

    fn app() -> axum::Router {
        let store = Arc::new(EventStore::new(Arc::new(InMemoryGateway::new())));
        router(AppState { store })
    }

    fn json_request(method: &str, uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_create_and_fetch_an_event() {
        let app = app();
        let event = EventBuilder::new().build();
        let body = serde_json::to_string(&event).unwrap();

        let response = app
            .clone()
            .oneshot(json_request("POST", "/events", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(Request::get("/events/evt-fixed-0001").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let fetched: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(fetched["title"], "TechXplore 2026: Annual Symposium");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_map_a_duplicate_create_to_conflict() {
        let app = app();
        let body = serde_json::to_string(&EventBuilder::new().build()).unwrap();

        let first = app
            .clone()
            .oneshot(json_request("POST", "/events", body.clone()))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app.oneshot(json_request("POST", "/events", body)).await.unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_map_an_update_of_a_missing_event_to_not_found() {
        let response = app()
            .oneshot(json_request(
                "PATCH",
                "/events/evt-missing",
                r#"{"title":"renamed"}"#.into(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_answer_no_content_for_any_delete() {
        let response = app()
            .oneshot(
                Request::delete("/events/evt-missing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_a_malformed_body() {
        let response = app()
            .oneshot(json_request("POST", "/events", "{ not valid".into()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
