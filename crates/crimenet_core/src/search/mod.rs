//! Article browsing filters.
//!
//! # Responsibility
//! - Derive the visible subset of articles from a category and free text.
//!
//! # Invariants
//! - Filtering is pure: results are borrowed, never stored.
//! - Result order is the source collection order.

pub mod filter;
