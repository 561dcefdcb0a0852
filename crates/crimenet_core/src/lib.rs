//! Data layer for the Crime Network content desk.
//! This crate is the single source of truth for store invariants.

pub mod config;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod prompt;
pub mod route;
pub mod search;
pub mod session;
pub mod store;
pub mod transfer;

pub use config::CoreConfig;
pub use kv::{
    KeyValueStore, MemoryKeyValueStore, PersistentBridge, SqliteKeyValueStore, StorageError,
    StorageResult,
};
pub use logging::{init_logging, logging_status, LogLevel, LoggingError};
pub use model::article::{Article, ArticlePatch, CATEGORIES};
pub use model::session::SessionUser;
pub use model::staff::{StaffPatch, StaffProfile};
pub use model::{Record, RecordKind, ValidationError};
pub use prompt::{ConfirmPrompt, FixedAnswer};
pub use route::{Route, RouteError};
pub use search::filter::{filter_articles, ArticleQuery, CategoryFilter, ALL_CATEGORIES};
pub use session::gate::{
    AuthorizationError, Credentials, GatedAction, InvalidCredentialsError, SessionGate,
    SessionState,
};
pub use store::{
    Created, EntityStore, ImportSummary, RemoveOutcome, StoreError, StoreStats, UpdateOutcome,
    ARTICLES_KEY, STAFF_KEY, USER_KEY,
};
pub use transfer::{export_all, parse_import, ExportDocument, ImportDocument, ImportError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
