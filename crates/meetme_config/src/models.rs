// --- File: crates/meetme_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8086,
        }
    }
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. sqlite:data/meetme.db, loaded via MEETME__DATABASE__URL
}

// --- Google Calendar Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GcalConfig {
    pub calendar_id: Option<String>,
    /// Path to a service account key file.
    pub key_path: Option<String>,
    /// Base64 encoded service account key, usually "secret_from_env" (GCAL_CREDENTIALS_BASE64).
    pub credentials_base64: Option<String>,
}

/// How slots that start before "now" are treated.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PastSlotPolicy {
    /// Past slots can be neither selected nor booked.
    #[default]
    Block,
    /// Past slots are shown as past in the grid but remain selectable.
    GrayOnly,
}

// --- Scheduling Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SchedulingConfig {
    /// IANA zone name the business rules are evaluated in.
    pub time_zone: String,
    /// Three letter weekday names, e.g. "Mon".
    pub working_days: Vec<String>,
    pub business_start_hour: u32,
    pub business_end_hour: u32,
    pub past_slot_policy: PastSlotPolicy,
    pub slot_step_minutes: i64,
    pub default_duration_minutes: i64,
    pub max_range_days: i64,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            time_zone: "UTC".to_string(),
            working_days: ["Mon", "Tue", "Wed", "Thu", "Fri"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
            business_start_hour: 9,
            business_end_hour: 17,
            past_slot_policy: PastSlotPolicy::Block,
            slot_step_minutes: 30,
            default_duration_minutes: 30,
            max_range_days: 31,
        }
    }
}

// --- Admin Config ---
// page_secret is normally "secret_from_env" and resolved from ADMIN_PAGE_SECRET.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AdminConfig {
    pub page_secret: Option<String>,
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// When set, logs are additionally written to a daily rolling file here.
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    // --- Runtime Flags ---
    #[serde(default)]
    pub use_gcal: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub gcal: Option<GcalConfig>,
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub admin: Option<AdminConfig>,

    #[serde(default)]
    pub scheduling: SchedulingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
