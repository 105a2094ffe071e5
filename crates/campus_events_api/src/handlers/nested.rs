// Handlers for the nested collections of one event.
//
// All eight kinds share the same shape (add / update / delete under the
// parent id), so the handlers are stamped out by a macro; the store performs
// the kind-specific recomputation.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use campus_events::core::event::{
    BudgetItem, ChecklistItem, Guest, Risk, Staff, TimelineItem, Vendor, Venue,
};
use campus_events::core::patch::{
    BudgetItemPatch, ChecklistItemPatch, GuestPatch, RiskPatch, StaffPatch, TimelineItemPatch,
    VendorPatch, VenuePatch,
};

use crate::handlers::error_response;
use crate::state::AppState;

macro_rules! nested_handlers {
    ($item:ty, $patch:ty, $add:ident, $update:ident, $delete:ident) => {
        pub async fn $add(
            State(state): State<AppState>,
            Path(event_id): Path<String>,
            body: Result<Json<$item>, JsonRejection>,
        ) -> Response {
            let Ok(Json(item)) = body else {
                return StatusCode::UNPROCESSABLE_ENTITY.into_response();
            };
            match state.store.$add(&event_id, item).await {
                Ok(event) => (StatusCode::CREATED, Json(event)).into_response(),
                Err(err) => error_response(err),
            }
        }

        pub async fn $update(
            State(state): State<AppState>,
            Path((event_id, item_id)): Path<(String, String)>,
            body: Result<Json<$patch>, JsonRejection>,
        ) -> Response {
            let Ok(Json(patch)) = body else {
                return StatusCode::UNPROCESSABLE_ENTITY.into_response();
            };
            match state.store.$update(&event_id, &item_id, patch).await {
                Ok(event) => Json(event).into_response(),
                Err(err) => error_response(err),
            }
        }

        pub async fn $delete(
            State(state): State<AppState>,
            Path((event_id, item_id)): Path<(String, String)>,
        ) -> Response {
            match state.store.$delete(&event_id, &item_id).await {
                Ok(event) => Json(event).into_response(),
                Err(err) => error_response(err),
            }
        }
    };
}

nested_handlers!(BudgetItem, BudgetItemPatch, add_budget_item, update_budget_item, delete_budget_item);
nested_handlers!(TimelineItem, TimelineItemPatch, add_timeline_item, update_timeline_item, delete_timeline_item);
nested_handlers!(Venue, VenuePatch, add_venue, update_venue, delete_venue);
nested_handlers!(Vendor, VendorPatch, add_vendor, update_vendor, delete_vendor);
nested_handlers!(Staff, StaffPatch, add_staff, update_staff, delete_staff);
nested_handlers!(Guest, GuestPatch, add_guest, update_guest, delete_guest);
nested_handlers!(Risk, RiskPatch, add_risk, update_risk, delete_risk);
nested_handlers!(ChecklistItem, ChecklistItemPatch, add_checklist_item, update_checklist_item, delete_checklist_item);

#[cfg(test)]
mod nested_http_tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use rstest::rstest;
    use tower::ServiceExt;

    use campus_events::adapters::in_memory::in_memory_gateway::InMemoryGateway;
    use campus_events::application::store::EventStore;
    use campus_events::test_support::fixtures::events::{BudgetItemBuilder, EventBuilder};

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
    async fn it_should_add_a_budget_item_and_return_the_updated_aggregate() {
        let app = app_with_event().await;
        let item = BudgetItemBuilder::new().id("b-1").actual_cost(200.0).paid(true).build();

        let response = app
            .oneshot(json_request(
                "POST",
                "/events/evt-fixed-0001/budget-items",
                serde_json::to_string(&item).unwrap(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let event: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(event["budget"]["spent"], 200.0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_map_a_missing_parent_to_not_found() {
        let app = app_with_event().await;
        let item = BudgetItemBuilder::new().build();

        let response = app
            .oneshot(json_request(
                "POST",
                "/events/evt-missing/budget-items",
                serde_json::to_string(&item).unwrap(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_an_invalid_timeline_time() {
        let app = app_with_event().await;
        let body = serde_json::json!({
            "id": "t-1",
            "time": "late evening",
            "title": "DJ night",
            "description": "",
            "durationMinutes": 120
        });

        let response = app
            .oneshot(json_request(
                "POST",
                "/events/evt-fixed-0001/timeline-items",
                body.to_string(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
