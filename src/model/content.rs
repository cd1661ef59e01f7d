//! Content rows as seen by the resolver.
//!
//! The resolver knows nothing about content schemas beyond a mandatory
//! canonical slug and an optional per-language slug map.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A row from a content table (properties, sectors, testimonials, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: String,

    /// Language-agnostic canonical slug. Always populated.
    pub slug: String,

    #[serde(default)]
    pub title: String,

    /// Translated slugs keyed by language code.
    #[serde(default)]
    pub slugs: BTreeMap<String, String>,

    /// Translated titles keyed by language code.
    #[serde(default)]
    pub titles: BTreeMap<String, String>,
}

impl ContentRecord {
    pub fn translated_slug(&self, language: &str) -> Option<&str> {
        self.slugs.get(language).map(String::as_str)
    }

    /// Title in the requested language, or the canonical title.
    pub fn localized_title(&self, language: &str) -> &str {
        self.titles.get(language).unwrap_or(&self.title)
    }
}

/// Key of a persisted unique page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum PageRef {
    PageType(String),
    CustomRoute(String),
}

impl fmt::Display for PageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageRef::PageType(code) => write!(f, "page_type:{}", code),
            PageRef::CustomRoute(id) => write!(f, "custom_route:{}", id),
        }
    }
}

/// A persisted unique page (home, contact, custom static page).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub titles: BTreeMap<String, String>,
}

impl PageRecord {
    pub fn localized_title(&self, language: &str) -> &str {
        self.titles.get(language).unwrap_or(&self.title)
    }
}
