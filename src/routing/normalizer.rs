//! Language prefix detection and path cleanup.
//!
//! # Responsibilities
//! - Detect a leading `/<lang>/` segment against the tenant's enabled languages
//! - Fall back to the tenant default language
//! - Produce a clean path: single leading slash, no empty or trailing segments
//!
//! # Design Decisions
//! - Empty input is the site root
//! - Query strings and fragments are dropped here; callers pass query
//!   parameters separately
//! - Segment comparison stays case-sensitive; only the language prefix is matched
//!   case-insensitively

use serde::Serialize;

use crate::model::TenantSite;

/// Result of path normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedPath {
    pub language: String,
    pub clean_path: String,
    /// Whether the language came from the path rather than the tenant default.
    pub explicit_language: bool,
}

impl NormalizedPath {
    /// Non-empty segments of the clean path.
    pub fn segments(&self) -> Vec<&str> {
        self.clean_path.split('/').filter(|s| !s.is_empty()).collect()
    }
}

/// Split off the language prefix of a raw request path.
pub fn normalize_path(raw: &str, site: &TenantSite) -> NormalizedPath {
    let path = raw.split(['?', '#']).next().unwrap_or_default();
    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let detected = segments
        .first()
        .and_then(|first| site.enabled_language(first))
        .map(str::to_string);

    let explicit_language = detected.is_some();
    if explicit_language {
        segments.remove(0);
    }

    NormalizedPath {
        language: detected.unwrap_or_else(|| site.default_language.clone()),
        clean_path: format!("/{}", segments.join("/")),
        explicit_language,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn site() -> TenantSite {
        TenantSite {
            id: "acme".into(),
            default_language: "es".into(),
            languages: vec!["es".into(), "en".into()],
            route_aliases: BTreeMap::new(),
            custom_routes: Vec::new(),
        }
    }

    #[test]
    fn test_language_prefix_stripped() {
        let n = normalize_path("/en/locations/santo-domingo", &site());
        assert_eq!(n.language, "en");
        assert_eq!(n.clean_path, "/locations/santo-domingo");
        assert!(n.explicit_language);
        assert_eq!(n.segments(), vec!["locations", "santo-domingo"]);
    }

    #[test]
    fn test_default_language_when_absent() {
        let n = normalize_path("/propiedades", &site());
        assert_eq!(n.language, "es");
        assert_eq!(n.clean_path, "/propiedades");
        assert!(!n.explicit_language);
    }

    #[test]
    fn test_disabled_language_is_a_segment() {
        let n = normalize_path("/fr/propiedades", &site());
        assert_eq!(n.language, "es");
        assert_eq!(n.clean_path, "/fr/propiedades");
    }

    #[test]
    fn test_empty_and_messy_paths() {
        assert_eq!(normalize_path("", &site()).clean_path, "/");
        assert_eq!(normalize_path("/", &site()).clean_path, "/");
        assert_eq!(normalize_path("/en", &site()).clean_path, "/");
        assert_eq!(normalize_path("/en/", &site()).language, "en");
        assert_eq!(
            normalize_path("//propiedades///villa/?page=2#top", &site()).clean_path,
            "/propiedades/villa"
        );
        assert!(normalize_path("/", &site()).segments().is_empty());
    }
}
