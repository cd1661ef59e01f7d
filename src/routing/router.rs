//! Route classification.
//!
//! # Responsibilities
//! - Run the ordered match passes over a tenant's route table
//! - Return the matched route or an explicit `RouteNotFound`
//! - Refuse to pick between conflicting definitions
//!
//! # Design Decisions
//! - Immutable inputs (thread-safe without locks)
//! - O(n) scan per pass (acceptable for typical route counts)
//! - Aliases before prefixes so a tenant can localize a path without breaking
//!   default-language routing; system before custom so tenant configuration
//!   cannot shadow platform routes

use std::sync::Arc;

use crate::error::{ResolveError, ResolveResult};
use crate::model::{NavigationLevel, RouteDefinition, SourceKind};
use crate::routing::matcher::{AliasMatcher, MatchKind, PrefixMatcher, SegmentMatcher};
use crate::routing::table::RouteTable;

/// Classifier output.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
    pub prefix: String,
    pub navigation_level: NavigationLevel,
    /// Base page type of the route (its directory page when it has one).
    pub page_type_code: String,
    pub source: SourceKind,
    pub matched_by: MatchKind,
    pub route: Arc<RouteDefinition>,
}

/// Classify the first segment of a clean path.
///
/// `segment` is empty for the site root.
pub fn classify(table: &RouteTable, segment: &str, language: &str) -> ResolveResult<RouteMatch> {
    let alias = AliasMatcher::new(language);
    let passes: [(SourceKind, &dyn SegmentMatcher); 4] = [
        (SourceKind::System, &alias),
        (SourceKind::System, &PrefixMatcher),
        (SourceKind::Custom, &alias),
        (SourceKind::Custom, &PrefixMatcher),
    ];

    for (source, matcher) in passes {
        let Some(route) = table
            .routes(source)
            .iter()
            .find(|route| matcher.matches(route, segment))
        else {
            continue;
        };

        if let Some(conflict) = table.conflict_for(source, segment, matcher.language()) {
            return Err(ResolveError::AmbiguousRoute {
                segment: segment.to_string(),
                language: conflict.language.clone(),
                prefixes: conflict.prefixes.clone(),
            });
        }

        let page_type_code = route.base_page_type().ok_or_else(|| {
            ResolveError::InvalidCatalog(format!("route {:?} serves no page type", route.prefix))
        })?;

        tracing::debug!(
            segment = %segment,
            prefix = %route.prefix,
            source = %source,
            matched_by = ?matcher.kind(),
            "Route classified"
        );

        return Ok(RouteMatch {
            prefix: route.prefix.clone(),
            navigation_level: route.navigation_level,
            page_type_code: page_type_code.to_string(),
            source,
            matched_by: matcher.kind(),
            route: route.clone(),
        });
    }

    Err(ResolveError::route_not_found(format!("/{}", segment)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RoutePages, TenantSite};
    use std::collections::BTreeMap;

    fn route(prefix: &str, aliases: &[(&str, &str)], source: SourceKind) -> RouteDefinition {
        RouteDefinition {
            prefix: prefix.into(),
            navigation_level: NavigationLevel::Single,
            aliases: aliases
                .iter()
                .map(|(l, a)| (l.to_string(), a.to_string()))
                .collect(),
            parent_prefix: None,
            source,
            enabled: true,
            pages: RoutePages {
                directory: Some(format!("{}_listado", prefix)),
                category: None,
                single: Some(format!("{}_single", prefix)),
            },
            custom_route_id: (source == SourceKind::Custom).then(|| format!("cr-{}", prefix)),
        }
    }

    fn table(custom_routes: Vec<RouteDefinition>) -> RouteTable {
        let site = TenantSite {
            id: "acme".into(),
            default_language: "es".into(),
            languages: vec!["en".into()],
            route_aliases: BTreeMap::new(),
            custom_routes,
        };
        RouteTable::build(
            vec![
                route("", &[], SourceKind::System),
                route("propiedades", &[("en", "properties")], SourceKind::System),
                route("blog", &[], SourceKind::System),
            ],
            &site,
        )
    }

    #[test]
    fn test_alias_match_in_language() {
        let m = classify(&table(vec![]), "properties", "en").unwrap();
        assert_eq!(m.prefix, "propiedades");
        assert_eq!(m.matched_by, MatchKind::Alias);
        assert_eq!(m.page_type_code, "propiedades_listado");
        assert_eq!(m.source, SourceKind::System);
    }

    #[test]
    fn test_alias_only_in_its_language() {
        let err = classify(&table(vec![]), "properties", "es").unwrap_err();
        assert!(matches!(err, ResolveError::RouteNotFound { .. }));
    }

    #[test]
    fn test_canonical_prefix_in_any_language() {
        let m = classify(&table(vec![]), "propiedades", "en").unwrap();
        assert_eq!(m.matched_by, MatchKind::Prefix);
    }

    #[test]
    fn test_root_segment() {
        let m = classify(&table(vec![]), "", "es").unwrap();
        assert_eq!(m.prefix, "");
    }

    #[test]
    fn test_system_alias_outranks_custom_prefix() {
        // A tenant custom route whose prefix equals a system alias never wins.
        let custom = route("properties", &[], SourceKind::Custom);
        let m = classify(&table(vec![custom]), "properties", "en").unwrap();
        assert_eq!(m.source, SourceKind::System);
        assert_eq!(m.prefix, "propiedades");

        // In a language without that alias the custom route is reachable.
        let custom = route("properties", &[], SourceKind::Custom);
        let m = classify(&table(vec![custom]), "properties", "es").unwrap();
        assert_eq!(m.source, SourceKind::Custom);
    }

    #[test]
    fn test_custom_alias_before_custom_prefix() {
        let about = route("nosotros", &[("en", "about")], SourceKind::Custom);
        let m = classify(&table(vec![about]), "about", "en").unwrap();
        assert_eq!(m.prefix, "nosotros");
        assert_eq!(m.matched_by, MatchKind::Alias);
    }

    #[test]
    fn test_conflicting_custom_routes_are_ambiguous() {
        let a = route("galeria", &[], SourceKind::Custom);
        let b = route("galeria", &[], SourceKind::Custom);
        let err = classify(&table(vec![a, b]), "galeria", "es").unwrap_err();
        assert!(matches!(err, ResolveError::AmbiguousRoute { .. }));

        // Unrelated segments keep resolving.
        assert!(classify(&table(vec![]), "blog", "es").is_ok());
    }

    #[test]
    fn test_unknown_segment() {
        let err = classify(&table(vec![]), "foobar-does-not-exist", "es").unwrap_err();
        assert_eq!(err.code(), "route_not_found");
    }
}
