// Handlers for student-facing registration and day-of check-in.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use campus_events::application::store::GuestRegistration;

use crate::handlers::error_response;
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    body: Result<Json<GuestRegistration>, JsonRejection>,
) -> Response {
    let Ok(Json(registration)) = body else {
        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
    };
    match state.store.register_guest(&event_id, registration).await {
        Ok(guest) => (StatusCode::CREATED, Json(guest)).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInBody {
    pub registration_id: String,
}

pub async fn check_in(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    body: Result<Json<CheckInBody>, JsonRejection>,
) -> Response {
    let Ok(Json(body)) = body else {
        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
    };
    match state.store.check_in_guest(&event_id, &body.registration_id).await {
        Ok(guest) => Json(guest).into_response(),
        Err(err) => error_response(err),
    }
}

#[cfg(test)]
mod registration_http_tests {
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

    async fn app_with_event() -> axum::Router {
        let store = Arc::new(EventStore::new(Arc::new(InMemoryGateway::new())));
        store
            .create(EventBuilder::new().build())
            .await
            .expect("fixture event");
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
    async fn it_should_register_then_check_in_a_student() {
        let app = app_with_event().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/events/evt-fixed-0001/register",
                r#"{"name":"Asha Nair","email":"asha@example.edu"}"#.into(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let guest: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let registration_id = guest["registrationId"].as_str().unwrap().to_string();
        assert_eq!(guest["status"], "registered");

        let body = serde_json::json!({ "registrationId": registration_id }).to_string();
        let response = app
            .oneshot(json_request("POST", "/events/evt-fixed-0001/check-in", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let checked_in: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(checked_in["status"], "attended");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_map_an_unknown_registration_code_to_not_found() {
        let app = app_with_event().await;
        let response = app
            .oneshot(json_request(
                "POST",
                "/events/evt-fixed-0001/check-in",
                r#"{"registrationId":"CAM-0000-XXX"}"#.into(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
