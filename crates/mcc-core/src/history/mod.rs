//! History domain: model, repository trait, and the store.

pub mod model;
pub mod repository;
pub mod store;

pub use model::{HistoryFilter, HistoryItem, HistoryKind};
pub use repository::HistoryRepository;
pub use store::HistoryStore;
