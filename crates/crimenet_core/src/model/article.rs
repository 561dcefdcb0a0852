//! Article record and its patch type.

use super::{non_empty_or, Record, RecordKind, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used by `Article::date`.
pub const ARTICLE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Fixed editorial categories, in menu order.
pub const CATEGORIES: &[&str] = &[
    "Security Breaches",
    "Real Life Crimes",
    "Real Life Gangs",
    "Investigations",
    "Threat Intelligence",
];

pub const DEFAULT_ARTICLE_TITLE: &str = "Untitled Article";

/// A published piece of writing. `content` is markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    /// One of [`CATEGORIES`] or free text.
    pub category: String,
    pub excerpt: String,
    pub content: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
}

/// Field-wise partial update for an [`Article`].
///
/// Has no `id` field, so no patch can re-key a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticlePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl ArticlePatch {
    /// Patch that only sets the title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.excerpt.is_none()
            && self.content.is_none()
            && self.date.is_none()
    }
}

impl Article {
    /// Builds a new article from creation input.
    ///
    /// Missing or empty fields take the creation defaults; `date` defaults to
    /// `today`.
    pub fn from_patch(id: String, patch: ArticlePatch, today: NaiveDate) -> Self {
        Self {
            id,
            title: non_empty_or(patch.title, DEFAULT_ARTICLE_TITLE),
            category: non_empty_or(patch.category, CATEGORIES[0]),
            excerpt: patch.excerpt.unwrap_or_default(),
            content: patch.content.unwrap_or_default(),
            date: non_empty_or(
                patch.date,
                &today.format(ARTICLE_DATE_FORMAT).to_string(),
            ),
        }
    }

    /// Parsed publication date, when well-formed.
    pub fn published_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, ARTICLE_DATE_FORMAT).ok()
    }
}

impl Record for Article {
    type Patch = ArticlePatch;

    const KIND: RecordKind = RecordKind::Article;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: ArticlePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(excerpt) = patch.excerpt {
            self.excerpt = excerpt;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId {
                kind: RecordKind::Article,
            });
        }
        if self.published_on().is_none() {
            return Err(ValidationError::InvalidDate {
                id: self.id.clone(),
                value: self.date.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Article, ArticlePatch, CATEGORIES, DEFAULT_ARTICLE_TITLE};
    use crate::model::{Record, ValidationError};
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date")
    }

    #[test]
    fn from_patch_fills_creation_defaults() {
        let article = Article::from_patch("art-1".to_string(), ArticlePatch::default(), today());
        assert_eq!(article.title, DEFAULT_ARTICLE_TITLE);
        assert_eq!(article.category, CATEGORIES[0]);
        assert!(article.excerpt.is_empty());
        assert!(article.content.is_empty());
        assert_eq!(article.date, "2026-03-14");
    }

    #[test]
    fn from_patch_treats_empty_title_as_unset() {
        let article =
            Article::from_patch("art-1".to_string(), ArticlePatch::titled(""), today());
        assert_eq!(article.title, DEFAULT_ARTICLE_TITLE);
    }

    #[test]
    fn apply_patch_overwrites_only_present_fields() {
        let mut article = Article::from_patch(
            "art-1".to_string(),
            ArticlePatch {
                excerpt: Some("short".to_string()),
                ..ArticlePatch::default()
            },
            today(),
        );
        article.apply_patch(ArticlePatch::titled("Renamed"));

        assert_eq!(article.id, "art-1");
        assert_eq!(article.title, "Renamed");
        assert_eq!(article.excerpt, "short");
    }

    #[test]
    fn validate_rejects_malformed_date() {
        let mut article = Article::from_patch("art-1".to_string(), ArticlePatch::default(), today());
        article.date = "14/03/2026".to_string();
        let err = article.validate().expect_err("date must be ISO");
        assert!(matches!(err, ValidationError::InvalidDate { .. }));
    }

    #[test]
    fn patch_deserializes_from_partial_json() {
        let patch: ArticlePatch =
            serde_json::from_str(r#"{"title":"Only title"}"#).expect("partial patch parses");
        assert_eq!(patch, ArticlePatch::titled("Only title"));
        assert!(!patch.is_empty());
    }
}
