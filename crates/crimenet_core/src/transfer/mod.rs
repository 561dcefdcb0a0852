//! Whole-store backup and restore.
//!
//! # Responsibility
//! - Serialize both collections into one export document.
//! - Parse and validate import documents before anything is replaced.
//!
//! # Invariants
//! - A rejected import changes nothing.
//! - A collection missing from an import document is left untouched.

mod export;
mod import;

pub use export::{export_all, export_all_at, write_export, ExportDocument, EXPORT_FILE_NAME};
pub use import::{parse_import, read_import_file, ImportDocument, ImportError};
