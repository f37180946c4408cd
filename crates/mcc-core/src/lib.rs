//! Core domain types for the Marketing Command Center.
//!
//! This crate holds everything that does not perform I/O: the shared error
//! type, the invocation outcome model, the monotonic activity snapshot, and
//! the history store with its repository seam.

pub mod activity;
pub mod error;
pub mod history;
pub mod invocation;

// Re-export common error type
pub use error::MccError;
