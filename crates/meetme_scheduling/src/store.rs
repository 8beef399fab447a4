//! In-memory [`LinkStore`], used when no database is configured and in tests.

use chrono::Utc;
use meetme_common::{BoxFuture, LinkStore, LinkStoreError, NewSchedulingLink, SchedulingLink};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct InMemoryLinkStore {
    links: RwLock<Vec<SchedulingLink>>,
}

impl InMemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `links`.
    pub fn with_links(links: Vec<SchedulingLink>) -> Self {
        Self {
            links: RwLock::new(links),
        }
    }
}

impl LinkStore for InMemoryLinkStore {
    fn list(&self) -> BoxFuture<'_, Vec<SchedulingLink>, LinkStoreError> {
        Box::pin(async move { Ok(self.links.read().await.clone()) })
    }

    fn get_by_slug<'a>(
        &'a self,
        slug: &'a str,
    ) -> BoxFuture<'a, Option<SchedulingLink>, LinkStoreError> {
        Box::pin(async move {
            Ok(self
                .links
                .read()
                .await
                .iter()
                .find(|link| link.slug == slug)
                .cloned())
        })
    }

    fn create(&self, link: NewSchedulingLink) -> BoxFuture<'_, SchedulingLink, LinkStoreError> {
        Box::pin(async move {
            let mut links = self.links.write().await;
            if links.iter().any(|existing| existing.slug == link.slug) {
                return Err(LinkStoreError::DuplicateSlug(link.slug));
            }
            let created = SchedulingLink {
                id: Uuid::new_v4().to_string(),
                title: link.title,
                description: link.description,
                duration_minutes: link.duration_minutes,
                slug: link.slug,
                created_at: Utc::now(),
            };
            links.push(created.clone());
            Ok(created)
        })
    }

    fn delete_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, bool, LinkStoreError> {
        Box::pin(async move {
            let mut links = self.links.write().await;
            let before = links.len();
            links.retain(|link| link.id != id);
            Ok(links.len() != before)
        })
    }
}
