use std::sync::Arc;

use campus_events::application::store::EventStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EventStore>,
}
