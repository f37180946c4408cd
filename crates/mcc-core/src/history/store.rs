//! The user-visible log of completed tasks.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::model::{HistoryFilter, HistoryItem};
use super::repository::HistoryRepository;

/// Durable, newest-first log of completed tasks.
///
/// The store exclusively owns the collection. Ordering is authoritative by
/// insertion (`append` puts the item at the front), not by timestamp
/// comparison. Every mutation rewrites the full collection through the
/// injected repository; persistence failures are logged and absorbed so the
/// in-memory collection stays usable.
pub struct HistoryStore {
    items: RwLock<Vec<HistoryItem>>,
    repository: Arc<dyn HistoryRepository>,
}

impl HistoryStore {
    /// Creates a store by loading the persisted collection once.
    ///
    /// Absent, empty, or unparseable stored data degrades silently to an
    /// empty collection; startup never fails on bad history data.
    pub async fn load(repository: Arc<dyn HistoryRepository>) -> Self {
        let items = match repository.load().await {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!("Failed to load history, starting empty: {}", err);
                Vec::new()
            }
        };

        Self {
            items: RwLock::new(items),
            repository,
        }
    }

    /// Inserts an item at the front of the collection.
    ///
    /// No de-duplication by content; uniqueness is by id only.
    pub async fn append(&self, item: HistoryItem) {
        let mut items = self.items.write().await;
        items.insert(0, item);
        self.persist(&items).await;
    }

    /// Removes the item with the given id. Silent no-op when absent.
    pub async fn delete(&self, id: &str) {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            tracing::debug!("delete({}) matched no history item", id);
            return;
        }
        self.persist(&items).await;
    }

    /// Returns a filtered copy of the collection, newest first.
    ///
    /// `filter` restricts by kind; `search` is a case-insensitive substring
    /// match on the title. Both may combine. The underlying collection is
    /// not mutated.
    pub async fn list(&self, filter: HistoryFilter, search: Option<&str>) -> Vec<HistoryItem> {
        let needle = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let items = self.items.read().await;
        items
            .iter()
            .filter(|item| filter.matches(item))
            .filter(|item| match &needle {
                Some(needle) => item.title.to_lowercase().contains(needle),
                None => true,
            })
            .cloned()
            .collect()
    }

    /// Number of stored items.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    async fn persist(&self, items: &[HistoryItem]) {
        if let Err(err) = self.repository.save(items).await {
            tracing::warn!("Failed to persist history: {}", err);
        }
    }
}
