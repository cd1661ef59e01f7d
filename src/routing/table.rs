//! Per-tenant effective route table.
//!
//! # Responsibilities
//! - Apply tenant alias overrides to system routes
//! - Drop disabled routes and custom routes shadowed by a system prefix
//! - Detect segments claimed by two enabled routes of the same source
//!
//! # Design Decisions
//! - System routes always precede custom routes
//! - A custom route sharing a system prefix is dropped whole, aliases included
//! - Conflicts are recorded, not resolved: a request hitting a conflicting
//!   segment fails with `AmbiguousRoute`, other segments keep working

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::model::{RouteDefinition, SourceKind, TenantSite};

/// A segment claimed by more than one route of the same source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteConflict {
    pub source: SourceKind,
    pub segment: String,
    /// `None` for a canonical prefix clash, `Some(lang)` for an alias clash.
    pub language: Option<String>,
    pub prefixes: Vec<String>,
}

/// A custom route hidden by a system route with the same prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShadowedRoute {
    pub prefix: String,
    pub custom_route_id: Option<String>,
}

/// Immutable compiled route table for one tenant.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    system: Vec<Arc<RouteDefinition>>,
    custom: Vec<Arc<RouteDefinition>>,
    conflicts: Vec<RouteConflict>,
    shadowed: Vec<ShadowedRoute>,
}

impl RouteTable {
    /// Compile the effective table from system routes and tenant configuration.
    pub fn build(system_routes: Vec<RouteDefinition>, site: &TenantSite) -> Self {
        let system: Vec<Arc<RouteDefinition>> = system_routes
            .into_iter()
            .filter(|route| route.enabled)
            .map(|mut route| {
                route.source = SourceKind::System;
                if let Some(overrides) = site.route_aliases.get(&route.prefix) {
                    for (language, alias) in overrides {
                        route.aliases.insert(language.clone(), alias.clone());
                    }
                }
                Arc::new(route)
            })
            .collect();

        let mut shadowed = Vec::new();
        let custom: Vec<Arc<RouteDefinition>> = site
            .custom_routes
            .iter()
            .filter(|route| route.enabled)
            .filter(|route| {
                let hidden = system.iter().any(|s| s.prefix == route.prefix);
                if hidden {
                    tracing::warn!(
                        tenant = %site.id,
                        prefix = %route.prefix,
                        custom_route_id = ?route.custom_route_id,
                        "Custom route shadowed by system route"
                    );
                    shadowed.push(ShadowedRoute {
                        prefix: route.prefix.clone(),
                        custom_route_id: route.custom_route_id.clone(),
                    });
                }
                !hidden
            })
            .cloned()
            .map(|mut route| {
                route.source = SourceKind::Custom;
                Arc::new(route)
            })
            .collect();

        let mut conflicts = detect_conflicts(SourceKind::System, &system);
        conflicts.extend(detect_conflicts(SourceKind::Custom, &custom));

        for conflict in &conflicts {
            tracing::error!(
                tenant = %site.id,
                source = %conflict.source,
                segment = %conflict.segment,
                language = ?conflict.language,
                prefixes = ?conflict.prefixes,
                "Ambiguous route definitions"
            );
        }

        Self {
            system,
            custom,
            conflicts,
            shadowed,
        }
    }

    /// Enabled routes of one source, in definition order.
    pub fn routes(&self, source: SourceKind) -> &[Arc<RouteDefinition>] {
        match source {
            SourceKind::System => &self.system,
            SourceKind::Custom => &self.custom,
        }
    }

    /// All enabled routes, system first.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<RouteDefinition>> {
        self.system.iter().chain(self.custom.iter())
    }

    /// Conflict recorded for a segment, if any.
    pub fn conflict_for(
        &self,
        source: SourceKind,
        segment: &str,
        language: Option<&str>,
    ) -> Option<&RouteConflict> {
        self.conflicts.iter().find(|c| {
            c.source == source && c.segment == segment && c.language.as_deref() == language
        })
    }

    pub fn conflicts(&self) -> &[RouteConflict] {
        &self.conflicts
    }

    pub fn shadowed(&self) -> &[ShadowedRoute] {
        &self.shadowed
    }

    pub fn len(&self) -> usize {
        self.system.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn detect_conflicts(source: SourceKind, routes: &[Arc<RouteDefinition>]) -> Vec<RouteConflict> {
    // (segment, language) → prefixes claiming it
    let mut claims: BTreeMap<(String, Option<String>), Vec<String>> = BTreeMap::new();

    for route in routes {
        claims
            .entry((route.prefix.clone(), None))
            .or_default()
            .push(route.prefix.clone());

        for (language, alias) in &route.aliases {
            claims
                .entry((alias.clone(), Some(language.clone())))
                .or_default()
                .push(route.prefix.clone());
        }
    }

    claims
        .into_iter()
        .filter(|(_, prefixes)| prefixes.len() > 1)
        .map(|((segment, language), prefixes)| RouteConflict {
            source,
            segment,
            language,
            prefixes,
        })
        .collect()
}
