// File: crates/meetme_gcal/src/auth.rs
use base64::{engine::general_purpose::STANDARD as base64_engine, Engine as _};
use google_calendar3::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    yup_oauth2::{
        parse_service_account_key, read_service_account_key, ServiceAccountAuthenticator,
        ServiceAccountKey,
    },
    CalendarHub,
};
use meetme_config::GcalConfig;
use std::{error::Error, path::Path};
use tracing::debug;

// Type aliases for clarity
type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = CalendarHub<Connector>;

/// Reads the service account key, preferring inline base64 credentials over `key_path`.
pub async fn load_service_account_key(
    config: &GcalConfig,
) -> Result<ServiceAccountKey, Box<dyn Error + Send + Sync>> {
    if let Some(encoded) = config
        .credentials_base64
        .as_deref()
        .filter(|c| !c.trim().is_empty())
    {
        debug!("Using inline base64 service account credentials");
        let decoded = base64_engine.decode(encoded.trim())?;
        return Ok(parse_service_account_key(decoded)?);
    }

    let key_path = config
        .key_path
        .as_deref()
        .ok_or("Missing key_path or credentials_base64 in GcalConfig")?;
    debug!("Reading service account key from {}", key_path);
    Ok(read_service_account_key(Path::new(key_path)).await?)
}

pub async fn create_calendar_hub(
    config: &GcalConfig,
) -> Result<HubType, Box<dyn Error + Send + Sync>> {
    let sa_key = load_service_account_key(config).await?;

    let auth = ServiceAccountAuthenticator::builder(sa_key).build().await?;

    let https = HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_or_http()
        .enable_http1()
        .build();

    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(https);

    Ok(CalendarHub::new(client, auth))
}
