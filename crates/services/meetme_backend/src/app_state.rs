// --- File: crates/services/meetme_backend/src/app_state.rs ---
use meetme_config::AppConfig;
use meetme_scheduling::{SchedulingError, SchedulingState};
use std::sync::Arc;

use crate::service_factory::MeetmeServiceFactory;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub scheduling: Arc<SchedulingState>,
}

impl AppState {
    /// Wires the scheduling engine to the services produced by `factory`.
    pub fn new(
        config: Arc<AppConfig>,
        factory: &MeetmeServiceFactory,
    ) -> Result<Self, SchedulingError> {
        let scheduling = SchedulingState::new(
            config.clone(),
            factory.calendar_service(),
            factory.link_store(),
        )?;
        Ok(Self {
            config,
            scheduling: Arc::new(scheduling),
        })
    }
}
