use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{events, nested, registration};
use crate::state::AppState;

macro_rules! nested_routes {
    ($router:expr, $segment:literal, $add:ident, $update:ident, $delete:ident) => {
        $router
            .route(concat!("/events/{id}/", $segment), post(nested::$add))
            .route(
                concat!("/events/{id}/", $segment, "/{item_id}"),
                patch(nested::$update).delete(nested::$delete),
            )
    };
}

pub fn router(state: AppState) -> Router {
    let router = Router::new()
        .route("/events", get(events::list).post(events::create))
        .route(
            "/events/{id}",
            get(events::get).patch(events::update).delete(events::delete),
        )
        .route("/events/{id}/approval", post(events::set_approval))
        .route("/events/reconcile", post(events::reconcile))
        .route("/events/{id}/register", post(registration::register))
        .route("/events/{id}/check-in", post(registration::check_in));

    let router = nested_routes!(router, "budget-items", add_budget_item, update_budget_item, delete_budget_item);
    let router = nested_routes!(router, "timeline-items", add_timeline_item, update_timeline_item, delete_timeline_item);
    let router = nested_routes!(router, "venues", add_venue, update_venue, delete_venue);
    let router = nested_routes!(router, "vendors", add_vendor, update_vendor, delete_vendor);
    let router = nested_routes!(router, "staff", add_staff, update_staff, delete_staff);
    let router = nested_routes!(router, "guests", add_guest, update_guest, delete_guest);
    let router = nested_routes!(router, "risks", add_risk, update_risk, delete_risk);
    let router = nested_routes!(router, "checklist-items", add_checklist_item, update_checklist_item, delete_checklist_item);

    router.with_state(state)
}
