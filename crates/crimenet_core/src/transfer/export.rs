//! Export document construction and file output.

use crate::model::article::Article;
use crate::model::staff::StaffProfile;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// File name used for downloaded/written exports.
pub const EXPORT_FILE_NAME: &str = "crimenetwork-export.json";

/// Full snapshot of both collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub articles: Vec<Article>,
    pub staff: Vec<StaffProfile>,
    /// ISO 8601 UTC timestamp with millisecond precision.
    #[serde(rename = "exportedAt")]
    pub exported_at: String,
}

impl ExportDocument {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Snapshots `articles` and `staff`, stamped with the current time.
pub fn export_all(articles: &[Article], staff: &[StaffProfile]) -> ExportDocument {
    export_all_at(articles, staff, Utc::now())
}

/// Snapshots `articles` and `staff`, stamped with `at`.
pub fn export_all_at(
    articles: &[Article],
    staff: &[StaffProfile],
    at: DateTime<Utc>,
) -> ExportDocument {
    ExportDocument {
        articles: articles.to_vec(),
        staff: staff.to_vec(),
        exported_at: at.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

/// Writes `document` to `<dir>/crimenetwork-export.json`.
///
/// The file is written to a temporary sibling and renamed into place, so a
/// reader never sees a half-written export.
pub fn write_export(dir: &Path, document: &ExportDocument) -> io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let json = document.to_json_pretty().map_err(io::Error::other)?;
    let target = dir.join(EXPORT_FILE_NAME);

    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(json.as_bytes())?;
    staged.flush()?;
    staged.persist(&target).map_err(|err| err.error)?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::{export_all_at, write_export, EXPORT_FILE_NAME};
    use crate::store::seed::{seed_articles, seed_staff};
    use chrono::{TimeZone, Utc};

    #[test]
    fn exported_at_uses_millisecond_zulu_format() {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let document = export_all_at(&seed_articles(), &seed_staff(), at);
        assert_eq!(document.exported_at, "2026-01-02T03:04:05.000Z");

        let json: serde_json::Value =
            serde_json::from_str(&document.to_json_pretty().unwrap()).unwrap();
        assert!(json.get("exportedAt").is_some());
        assert_eq!(json["articles"].as_array().unwrap().len(), 3);
        assert_eq!(json["staff"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn write_export_places_file_under_fixed_name() {
        let dir = tempfile::tempdir().unwrap();
        let document = export_all_at(&seed_articles(), &[], Utc::now());
        let path = write_export(dir.path(), &document).unwrap();

        assert_eq!(path, dir.path().join(EXPORT_FILE_NAME));
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("\"exportedAt\""));
    }
}
