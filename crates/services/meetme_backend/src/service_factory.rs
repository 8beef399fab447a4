// --- File: crates/services/meetme_backend/src/service_factory.rs ---
//! Builds the external collaborators of the scheduling engine from configuration.
use meetme_common::{DynCalendarService, DynLinkStore, MeetmeError};
use meetme_config::AppConfig;
use meetme_scheduling::{BusinessRules, InMemoryLinkStore};
use std::sync::Arc;
#[allow(unused_imports)] // some are only used by certain features
use tracing::{error, info, warn};

#[cfg(feature = "gcal")]
use {
    meetme_common::BoxedCalendarService,
    meetme_gcal::{create_calendar_hub, GoogleCalendarService},
};

#[cfg(feature = "database")]
use meetme_db::{DbClient, SqlLinkStore};

/// The calendar provider and link store the application runs with.
pub struct MeetmeServiceFactory {
    calendar_service: Option<DynCalendarService>,
    link_store: DynLinkStore,
}

impl MeetmeServiceFactory {
    /// Creates the services selected by `config`.
    ///
    /// A calendar that fails to initialize is logged and left out; availability and
    /// booking then answer 503. A configured database that cannot be opened is an error,
    /// and so are invalid scheduling rules.
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, MeetmeError> {
        let rules = BusinessRules::from_config(&config.scheduling)?;
        let calendar_service = Self::init_calendar(&config, &rules).await;
        let link_store = Self::init_link_store(&config).await?;
        Ok(Self {
            calendar_service,
            link_store,
        })
    }

    /// A factory with explicitly provided services.
    pub fn with_services(
        calendar_service: Option<DynCalendarService>,
        link_store: DynLinkStore,
    ) -> Self {
        Self {
            calendar_service,
            link_store,
        }
    }

    pub fn calendar_service(&self) -> Option<DynCalendarService> {
        self.calendar_service.clone()
    }

    pub fn link_store(&self) -> DynLinkStore {
        self.link_store.clone()
    }

    #[allow(unused_variables)]
    async fn init_calendar(
        config: &AppConfig,
        rules: &BusinessRules,
    ) -> Option<DynCalendarService> {
        #[cfg(feature = "gcal")]
        {
            if let Some(gcal_config) = config.gcal.as_ref().filter(|_| config.use_gcal) {
                info!("ℹ️ Initializing Google Calendar service...");
                match create_calendar_hub(gcal_config).await {
                    Ok(hub) => {
                        let service = GoogleCalendarService::new(
                            Arc::new(hub),
                            gcal_config.calendar_id.clone(),
                        )
                        .with_time_zone(rules.time_zone());
                        info!(
                            "✅ Google Calendar service initialized for calendar {} ({}).",
                            service.calendar_id(),
                            service.time_zone()
                        );
                        let calendar: DynCalendarService = Arc::new(BoxedCalendarService(service));
                        return Some(calendar);
                    }
                    Err(e) => {
                        error!(
                            "🚨 Failed to initialize Google Calendar service: {}. Availability and booking disabled.",
                            e
                        );
                        return None;
                    }
                }
            }
            info!("ℹ️ GCal feature compiled, but disabled via runtime config or missing gcal config section.");
        }
        warn!("No calendar provider configured; availability and booking will answer 503.");
        None
    }

    async fn init_link_store(config: &AppConfig) -> Result<DynLinkStore, MeetmeError> {
        #[cfg(feature = "database")]
        {
            if let Some(db_config) = config.database.as_ref() {
                info!("ℹ️ Opening link database...");
                let client = DbClient::from_config(db_config)
                    .await
                    .map_err(|e| MeetmeError::DatabaseError(e.to_string()))?;
                let store = SqlLinkStore::new(client);
                store
                    .init_schema()
                    .await
                    .map_err(|e| MeetmeError::DatabaseError(e.to_string()))?;
                info!("✅ Scheduling links are stored in the database.");
                return Ok(Arc::new(store));
            }
        }
        #[cfg(not(feature = "database"))]
        {
            if config.database.is_some() {
                warn!("Database configured but the database feature is not compiled in.");
            }
        }

        info!("ℹ️ Scheduling links are kept in memory.");
        Ok(Arc::new(InMemoryLinkStore::new()))
    }
}
