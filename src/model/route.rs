//! Route definitions.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a route definition comes from.
///
/// Ordering matters: system routes sort before custom routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Shared platform catalog.
    System,
    /// Tenant-owned override.
    Custom,
}

impl Default for SourceKind {
    fn default() -> Self {
        SourceKind::System
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::System => f.write_str("system"),
            SourceKind::Custom => f.write_str("custom"),
        }
    }
}

/// How deep below its prefix a route may address content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum NavigationLevel {
    /// `/prefix` only.
    Directory = 0,
    /// `/prefix/{slug}`.
    Single = 1,
    /// `/prefix/{category}` and `/prefix/{category}/{slug}`.
    Categorized = 2,
}

impl NavigationLevel {
    /// Maximum number of path segments accepted after the prefix.
    pub fn max_segments(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for NavigationLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(NavigationLevel::Directory),
            1 => Ok(NavigationLevel::Single),
            2 => Ok(NavigationLevel::Categorized),
            other => Err(format!("navigation level must be 0, 1 or 2, got {}", other)),
        }
    }
}

impl From<NavigationLevel> for u8 {
    fn from(level: NavigationLevel) -> Self {
        level as u8
    }
}

/// Which kind of page a request targets beneath a route prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Directory,
    Category,
    Single,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Directory => f.write_str("directory"),
            TargetKind::Category => f.write_str("category"),
            TargetKind::Single => f.write_str("single"),
        }
    }
}

/// Page-type codes a route serves at each depth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutePages {
    pub directory: Option<String>,
    pub category: Option<String>,
    pub single: Option<String>,
}

impl RoutePages {
    /// Page-type code for a target, if the route serves it.
    pub fn for_target(&self, target: TargetKind) -> Option<&str> {
        match target {
            TargetKind::Directory => self.directory.as_deref(),
            TargetKind::Category => self.category.as_deref(),
            TargetKind::Single => self.single.as_deref(),
        }
    }

    /// Iterate over every (target, code) pair the route serves.
    pub fn iter(&self) -> impl Iterator<Item = (TargetKind, &str)> {
        [
            (TargetKind::Directory, self.directory.as_deref()),
            (TargetKind::Category, self.category.as_deref()),
            (TargetKind::Single, self.single.as_deref()),
        ]
        .into_iter()
        .filter_map(|(target, code)| code.map(|c| (target, c)))
    }
}

/// A route prefix with its localized aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDefinition {
    /// Canonical first path segment (empty for the site root).
    pub prefix: String,

    pub navigation_level: NavigationLevel,

    /// Localized first segment, keyed by language code.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    #[serde(default)]
    pub parent_prefix: Option<String>,

    #[serde(default)]
    pub source: SourceKind,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Page types served beneath this prefix.
    #[serde(default)]
    pub pages: RoutePages,

    /// Identifier of the tenant-owned custom route row.
    #[serde(default)]
    pub custom_route_id: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl RouteDefinition {
    /// Localized alias for a language, if one is configured.
    pub fn alias_for(&self, language: &str) -> Option<&str> {
        self.aliases.get(language).map(String::as_str)
    }

    /// Page type reported when the route is classified: the directory page,
    /// or the deepest page served if the route has no directory page.
    pub fn base_page_type(&self) -> Option<&str> {
        self.pages
            .directory
            .as_deref()
            .or(self.pages.single.as_deref())
            .or(self.pages.category.as_deref())
    }

    /// Whether this is the site root route.
    pub fn is_root(&self) -> bool {
        self.prefix.is_empty()
    }
}
