//! In-memory entity store mirrored to local key-value storage.
//!
//! # Responsibility
//! - Own the article and staff collections plus the session gate.
//! - Route every mutation through session checks and persistence.
//!
//! # Invariants
//! - Record ids are unique within each collection for the store lifetime.
//! - New records are prepended; existing order is never rearranged.
//! - Rejected operations change neither memory nor storage.

mod entity_store;
mod ids;
pub mod seed;

pub use entity_store::{
    Created, EntityStore, ImportSummary, RemoveOutcome, StoreError, StoreStats, UpdateOutcome,
    ARTICLES_KEY, STAFF_KEY, USER_KEY,
};
