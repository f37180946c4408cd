//! TOML-backed implementation of the history repository.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use mcc_core::error::Result;
use mcc_core::history::{HistoryItem, HistoryRepository};

use crate::paths::{MccPaths, PathError};
use crate::toml_slot::TomlSlot;

/// On-disk shape of the history slot.
#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    items: Vec<HistoryItem>,
}

/// Persists the full history collection in a single TOML file.
///
/// The whole collection is rewritten on every save; ordering in the file is
/// the store's insertion order and is preserved verbatim on load.
pub struct TomlHistoryRepository {
    slot: TomlSlot<HistoryFile>,
}

impl TomlHistoryRepository {
    /// Creates a repository at the default location
    /// (`~/.config/mcc/history.toml`).
    pub fn new() -> std::result::Result<Self, PathError> {
        Ok(Self::at_path(MccPaths::history_file()?))
    }

    /// Creates a repository at an explicit path (used by tests).
    pub fn at_path(path: PathBuf) -> Self {
        Self {
            slot: TomlSlot::new(path),
        }
    }
}

#[async_trait]
impl HistoryRepository for TomlHistoryRepository {
    async fn load(&self) -> Result<Vec<HistoryItem>> {
        let file = self.slot.read()?.unwrap_or_default();
        tracing::debug!(
            "Loaded {} history items from {}",
            file.items.len(),
            self.slot.path().display()
        );
        Ok(file.items)
    }

    async fn save(&self, items: &[HistoryItem]) -> Result<()> {
        let file = HistoryFile {
            items: items.to_vec(),
        };
        self.slot.replace(&file)?;
        tracing::debug!(
            "Saved {} history items to {}",
            items.len(),
            self.slot.path().display()
        );
        Ok(())
    }
}
