#![forbid(unsafe_code)]

//! Core domain model and business logic for IsoLog, a personal workout log.
//!
//! This crate provides:
//! - Domain types (workout records, categories, units)
//! - Record builder for raw form input
//! - History view (search, sort, per-set expansion)
//! - Persistence (key/value storage, workout store, sessions)
//! - CSV export

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod storage;
pub mod builder;
pub mod view;
pub mod store;
pub mod session;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result, ValidationError};
pub use types::*;
pub use config::Config;
pub use builder::{fill_slots, resize, WorkoutForm, MAX_SET_COUNT};
pub use view::{ViewEntry, ViewQuery};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::WorkoutStore;
pub use session::{Session, SessionStore};
pub use export::export_csv;
