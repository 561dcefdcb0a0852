//! Import document parsing and validation.

use crate::model::article::Article;
use crate::model::staff::StaffProfile;
use crate::model::{validate_collection, Record, RecordKind, ValidationError};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

/// Validated contents of an import document.
///
/// `None` means the field was absent (or `null`) and the matching collection
/// must be kept as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportDocument {
    pub articles: Option<Vec<Article>>,
    pub staff: Option<Vec<StaffProfile>>,
}

impl ImportDocument {
    /// Whether applying this document would replace nothing.
    pub fn is_empty(&self) -> bool {
        self.articles.is_none() && self.staff.is_none()
    }
}

/// Import document rejected; nothing was applied.
#[derive(Debug)]
pub enum ImportError {
    Read { path: PathBuf, source: io::Error },
    InvalidJson(serde_json::Error),
    NotAnObject,
    InvalidShape {
        kind: RecordKind,
        source: serde_json::Error,
    },
    InvalidRecord(ValidationError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Failed to import: ")?;
        match self {
            Self::Read { path, source } => {
                write!(f, "cannot read `{}`: {source}", path.display())
            }
            Self::InvalidJson(_) => f.write_str("invalid file"),
            Self::NotAnObject => f.write_str("document must be a JSON object"),
            Self::InvalidShape { kind, source } => {
                write!(f, "malformed {kind} entries: {source}")
            }
            Self::InvalidRecord(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::InvalidJson(err) => Some(err),
            Self::InvalidShape { source, .. } => Some(source),
            Self::InvalidRecord(err) => Some(err),
            Self::NotAnObject => None,
        }
    }
}

impl From<ValidationError> for ImportError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidRecord(value)
    }
}

/// Parses and validates an import document.
///
/// Unknown top-level fields (such as `exportedAt`) are ignored.
pub fn parse_import(contents: &str) -> Result<ImportDocument, ImportError> {
    let value: Value = serde_json::from_str(contents).map_err(ImportError::InvalidJson)?;
    let Value::Object(mut fields) = value else {
        return Err(ImportError::NotAnObject);
    };

    Ok(ImportDocument {
        articles: take_collection::<Article>(&mut fields, "articles")?,
        staff: take_collection::<StaffProfile>(&mut fields, "staff")?,
    })
}

/// Reads `path` and parses it with [`parse_import`].
pub fn read_import_file(path: &Path) -> Result<ImportDocument, ImportError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_import(&contents)
}

fn take_collection<R>(
    fields: &mut Map<String, Value>,
    field: &str,
) -> Result<Option<Vec<R>>, ImportError>
where
    R: Record + DeserializeOwned,
{
    let raw = match fields.remove(field) {
        None | Some(Value::Null) => return Ok(None),
        Some(raw) => raw,
    };

    let records: Vec<R> = serde_json::from_value(raw).map_err(|source| {
        ImportError::InvalidShape {
            kind: R::KIND,
            source,
        }
    })?;

    validate_collection(&records)?;
    Ok(Some(records))
}

#[cfg(test)]
mod tests {
    use super::{parse_import, ImportError};
    use crate::model::{RecordKind, ValidationError};

    #[test]
    fn absent_and_null_fields_mean_keep() {
        let document = parse_import(r#"{"articles": null, "exportedAt": "x"}"#).unwrap();
        assert!(document.is_empty());
    }

    #[test]
    fn rejects_non_json_with_user_message() {
        let err = parse_import("not json at all").unwrap_err();
        assert!(matches!(err, ImportError::InvalidJson(_)));
        assert_eq!(err.to_string(), "Failed to import: invalid file");
    }

    #[test]
    fn rejects_top_level_arrays() {
        let err = parse_import("[]").unwrap_err();
        assert!(matches!(err, ImportError::NotAnObject));
    }

    #[test]
    fn rejects_entries_missing_required_fields() {
        let err = parse_import(r#"{"staff": [{"id": "s1", "name": "No role"}]}"#).unwrap_err();
        assert!(matches!(
            err,
            ImportError::InvalidShape {
                kind: RecordKind::Staff,
                ..
            }
        ));
    }

    #[test]
    fn rejects_duplicate_ids_within_a_collection() {
        let entry = r#"{"id":"a","title":"t","category":"c","excerpt":"","content":"","date":"2024-01-01"}"#;
        let err = parse_import(&format!(r#"{{"articles": [{entry}, {entry}]}}"#)).unwrap_err();
        assert!(matches!(
            err,
            ImportError::InvalidRecord(ValidationError::DuplicateId { ref id, .. }) if id == "a"
        ));
    }

    #[test]
    fn rejects_invalid_article_dates() {
        let err = parse_import(
            r#"{"articles":[{"id":"a","title":"t","category":"c","excerpt":"","content":"","date":"yesterday"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ImportError::InvalidRecord(_)));
    }
}
