//! Scheduling link management and slug resolution.

use meetme_common::{DynLinkStore, NewSchedulingLink, SchedulingLink};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::error::SchedulingError;

/// Longest bookable meeting: one day.
pub const MAX_DURATION_MINUTES: i64 = 24 * 60;

static SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").expect("valid slug regex"));

/// Lowercases, trims and turns whitespace runs into single dashes.
///
/// `"  Intro  Call "` becomes `"intro-call"`.
pub fn normalize_slug(raw: &str) -> String {
    raw.split_whitespace()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}

/// Normalizes and checks a link before it is stored.
pub fn validate_new_link(link: NewSchedulingLink) -> Result<NewSchedulingLink, SchedulingError> {
    let title = link.title.trim().to_string();
    if title.is_empty() {
        return Err(SchedulingError::ValidationError(
            "title is required".to_string(),
        ));
    }

    let slug = normalize_slug(&link.slug);
    if slug.is_empty() {
        return Err(SchedulingError::ValidationError(
            "slug is required".to_string(),
        ));
    }
    if !is_valid_slug(&slug) {
        return Err(SchedulingError::ValidationError(format!(
            "slug '{}' may only contain lowercase letters, digits and dashes",
            slug
        )));
    }

    if link.duration_minutes <= 0 || link.duration_minutes > MAX_DURATION_MINUTES {
        return Err(SchedulingError::ValidationError(format!(
            "durationMinutes must be between 1 and {}",
            MAX_DURATION_MINUTES
        )));
    }

    Ok(NewSchedulingLink {
        title,
        description: link.description.trim().to_string(),
        duration_minutes: link.duration_minutes,
        slug,
    })
}

/// Looks up and manages scheduling links in a [`LinkStore`](meetme_common::LinkStore).
#[derive(Clone)]
pub struct LinkResolver {
    store: DynLinkStore,
}

impl LinkResolver {
    pub fn new(store: DynLinkStore) -> Self {
        Self { store }
    }

    /// The link for `slug`. Unknown slugs are a terminal `NotFound`.
    pub async fn resolve_by_slug(&self, slug: &str) -> Result<SchedulingLink, SchedulingError> {
        let slug = normalize_slug(slug);
        debug!("Resolving scheduling link '{}'", slug);
        self.store
            .get_by_slug(&slug)
            .await?
            .ok_or_else(|| SchedulingError::NotFound(format!("scheduling link '{}'", slug)))
    }

    pub async fn list(&self) -> Result<Vec<SchedulingLink>, SchedulingError> {
        Ok(self.store.list().await?)
    }

    pub async fn create(&self, link: NewSchedulingLink) -> Result<SchedulingLink, SchedulingError> {
        let link = validate_new_link(link)?;
        let created = self.store.create(link).await?;
        info!("Created scheduling link '{}' ({})", created.slug, created.id);
        Ok(created)
    }

    pub async fn delete(&self, id: &str) -> Result<(), SchedulingError> {
        if self.store.delete_by_id(id).await? {
            info!("Deleted scheduling link {}", id);
            Ok(())
        } else {
            Err(SchedulingError::NotFound(format!("scheduling link with id '{}'", id)))
        }
    }
}
