//! Persistence for MCC: path management, the atomic TOML slot, and the
//! TOML-backed history repository.

pub mod paths;
pub mod toml_history_repository;
pub mod toml_slot;

pub use paths::MccPaths;
pub use toml_history_repository::TomlHistoryRepository;
pub use toml_slot::TomlSlot;
