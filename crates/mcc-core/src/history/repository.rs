//! History repository trait.
//!
//! Defines the interface for history persistence operations.

use async_trait::async_trait;

use super::model::HistoryItem;
use crate::error::Result;

/// An abstract repository for the durable history collection.
///
/// The collection occupies a single named slot: it is loaded as a whole once
/// at startup and rewritten as a whole after every mutation. Implementations
/// decide the storage mechanism (e.g. a TOML file, a database table, an
/// in-memory map for tests).
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Loads the full ordered collection.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<HistoryItem>)`: the stored collection (empty if the slot
    ///   does not exist yet)
    /// - `Err(_)`: the slot exists but could not be read or parsed
    async fn load(&self) -> Result<Vec<HistoryItem>>;

    /// Replaces the stored collection with the given one.
    async fn save(&self, items: &[HistoryItem]) -> Result<()>;
}
