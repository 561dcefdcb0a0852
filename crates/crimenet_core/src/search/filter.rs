//! Category and free-text filtering over articles.

use crate::model::article::{Article, CATEGORIES};

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

/// Category selector for article browsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact, case-sensitive match against `Article::category`.
    Exact(String),
}

impl CategoryFilter {
    /// Maps the `"All"` sentinel to [`CategoryFilter::All`].
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Exact(value.to_string())
        }
    }

    pub fn matches(&self, article: &Article) -> bool {
        match self {
            Self::All => true,
            Self::Exact(category) => article.category == *category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// Combined category + text query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    pub category: CategoryFilter,
    /// Raw user input; trimmed and lowercased at match time.
    pub text: String,
}

impl ArticleQuery {
    pub fn new(category: impl Into<CategoryFilter>, text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            text: text.into(),
        }
    }

    /// Returns whether `article` passes both filters.
    pub fn matches(&self, article: &Article) -> bool {
        self.category.matches(article) && text_matches(article, &normalize_text(&self.text))
    }

    /// Applies this query to `articles`, preserving order.
    pub fn apply<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        let needle = normalize_text(&self.text);
        articles
            .iter()
            .filter(|article| self.category.matches(article) && text_matches(article, &needle))
            .collect()
    }
}

/// Filters `all` by category and case-insensitive substring query.
///
/// `category == "All"` passes every article; an empty (after trim) query
/// passes every article. Otherwise the query must occur in the title, the
/// excerpt or the content.
pub fn filter_articles<'a>(all: &'a [Article], category: &str, query: &str) -> Vec<&'a Article> {
    ArticleQuery::new(category, query).apply(all)
}

/// Category options offered to browsing UIs: the sentinel, then the fixed set.
pub fn category_options() -> Vec<&'static str> {
    std::iter::once(ALL_CATEGORIES)
        .chain(CATEGORIES.iter().copied())
        .collect()
}

fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

fn text_matches(article: &Article, needle: &str) -> bool {
    needle.is_empty()
        || [&article.title, &article.excerpt, &article.content]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}
