//! Tenant route configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::route::RouteDefinition;

/// Route-relevant configuration owned by one tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantSite {
    pub id: String,

    pub default_language: String,

    /// Enabled languages. The default language is always considered enabled.
    #[serde(default)]
    pub languages: Vec<String>,

    /// Alias overrides for system routes: prefix → (language → alias).
    #[serde(default)]
    pub route_aliases: BTreeMap<String, BTreeMap<String, String>>,

    #[serde(default)]
    pub custom_routes: Vec<RouteDefinition>,
}

impl TenantSite {
    /// Match a path segment against the enabled languages.
    ///
    /// Returns the configured spelling of the language.
    pub fn enabled_language(&self, segment: &str) -> Option<&str> {
        std::iter::once(&self.default_language)
            .chain(self.languages.iter())
            .find(|lang| lang.eq_ignore_ascii_case(segment))
            .map(String::as_str)
    }

    pub fn is_default_language(&self, language: &str) -> bool {
        self.default_language == language
    }
}
