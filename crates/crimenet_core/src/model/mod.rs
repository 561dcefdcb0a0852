//! Domain model for articles, staff profiles and the signed-in user.
//!
//! # Responsibility
//! - Define the persisted/exported record shapes.
//! - Define patch types that can never touch a record id.
//! - Validate records entering the store from outside (import, updates).
//!
//! # Invariants
//! - A record id is assigned once and never rewritten by a patch.
//! - Articles and staff profiles never reference each other.

use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod article;
pub mod session;
pub mod staff;

/// Which collection a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Article,
    Staff,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Staff => "staff",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared behavior of records held by the entity store.
///
/// Lets the store run one create/update/remove implementation over both
/// collections.
pub trait Record: Clone {
    /// Partial update shape for this record.
    type Patch;

    const KIND: RecordKind;

    fn id(&self) -> &str;

    /// Overwrites every field carried by `patch`, leaving the rest intact.
    fn apply_patch(&mut self, patch: Self::Patch);

    fn validate(&self) -> Result<(), ValidationError>;
}

/// Record shape violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyId { kind: RecordKind },
    InvalidDate { id: String, value: String },
    DuplicateId { kind: RecordKind, id: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId { kind } => write!(f, "{kind} id must not be empty"),
            Self::InvalidDate { id, value } => {
                write!(f, "article `{id}` has invalid date `{value}`; expected YYYY-MM-DD")
            }
            Self::DuplicateId { kind, id } => write!(f, "duplicate {kind} id `{id}`"),
        }
    }
}

impl Error for ValidationError {}

/// Validates every record and checks that ids are unique within `records`.
pub fn validate_collection<R: Record>(records: &[R]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        record.validate()?;
        if !seen.insert(record.id()) {
            return Err(ValidationError::DuplicateId {
                kind: R::KIND,
                id: record.id().to_string(),
            });
        }
    }
    Ok(())
}

/// Picks `value` unless it is missing or blank.
///
/// Creation treats an empty field the same as an absent one.
pub(crate) fn non_empty_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}
