//! Component composition for one resolved page.
//!
//! # Responsibilities
//! - Select active tenant-wide and page-scoped instances
//! - Merge catalog, template and instance configuration
//! - Order the result with global header first and global footer last
//! - Skip and report invalid instances
//!
//! # Design Decisions
//! - Sentinel orders sit outside the `i32` range of stored orders, so no page
//!   component can sort before the header or after the footer
//! - Ties break on stored order, then instance id; output is deterministic

use serde::Serialize;
use thiserror::Error;

use crate::components::catalog::ComponentCatalog;
use crate::components::merge::layered;
use crate::model::{
    CatalogRef, ComponentConfig, ComponentInstance, ComponentInstanceRow, ComposedComponent,
    Scope, ScopeConflict, Slot,
};
use crate::observability::metrics;

/// Effective order of global header components.
pub const HEADER_ORDER: i64 = i32::MIN as i64 - 1;

/// Effective order of global footer components.
pub const FOOTER_ORDER: i64 = i32::MAX as i64 + 1;

/// An instance that cannot be rendered. The rest of the page is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationConflict {
    #[error(transparent)]
    BothScopes(#[from] ScopeConflict),

    #[error("component instance {instance_id} ({component}) has no scope and is not a global component")]
    UnscopedComponent {
        instance_id: String,
        component: CatalogRef,
    },

    #[error("component instance {instance_id} references unknown catalog component {component}")]
    UnknownComponent {
        instance_id: String,
        component: CatalogRef,
    },
}

impl ConfigurationConflict {
    /// Metric label.
    pub fn reason(&self) -> &'static str {
        match self {
            ConfigurationConflict::BothScopes(_) => "both_scopes",
            ConfigurationConflict::UnscopedComponent { .. } => "unscoped_component",
            ConfigurationConflict::UnknownComponent { .. } => "unknown_component",
        }
    }

    pub fn instance_id(&self) -> &str {
        match self {
            ConfigurationConflict::BothScopes(conflict) => &conflict.instance_id,
            ConfigurationConflict::UnscopedComponent { instance_id, .. }
            | ConfigurationConflict::UnknownComponent { instance_id, .. } => instance_id,
        }
    }
}

/// Ordered components plus the instances that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Composition {
    pub components: Vec<ComposedComponent>,
    #[serde(skip)]
    pub conflicts: Vec<ConfigurationConflict>,
}

struct Candidate {
    effective_order: i64,
    order: i32,
    component: ComposedComponent,
}

pub struct ComponentComposer<'a> {
    catalog: &'a ComponentCatalog,
    tenant_id: &'a str,
}

impl<'a> ComponentComposer<'a> {
    pub fn new(catalog: &'a ComponentCatalog, tenant_id: &'a str) -> Self {
        Self { catalog, tenant_id }
    }

    /// Compose the component list for a resolved page type and, for pages
    /// served by a tenant custom route, that route's own instances.
    pub fn compose(
        &self,
        rows: &[ComponentInstanceRow],
        page_type_code: &str,
        custom_route_id: Option<&str>,
    ) -> Composition {
        let mut candidates = Vec::new();
        let mut conflicts = Vec::new();

        for row in rows.iter().filter(|row| row.active) {
            match self.candidate(row, page_type_code, custom_route_id) {
                Ok(Some(candidate)) => candidates.push(candidate),
                Ok(None) => {}
                Err(conflict) => {
                    tracing::warn!(
                        tenant = %self.tenant_id,
                        instance_id = %conflict.instance_id(),
                        reason = conflict.reason(),
                        error = %conflict,
                        "Skipping component instance"
                    );
                    metrics::record_config_conflict(conflict.reason());
                    conflicts.push(conflict);
                }
            }
        }

        candidates.sort_by(|a, b| {
            (a.effective_order, a.order, &a.component.id)
                .cmp(&(b.effective_order, b.order, &b.component.id))
        });

        Composition {
            components: candidates.into_iter().map(|c| c.component).collect(),
            conflicts,
        }
    }

    fn candidate(
        &self,
        row: &ComponentInstanceRow,
        page_type_code: &str,
        custom_route_id: Option<&str>,
    ) -> Result<Option<Candidate>, ConfigurationConflict> {
        let instance = ComponentInstance::try_from(row.clone())?;

        let applies = match &instance.scope {
            Scope::Tenant => true,
            Scope::PageType(code) => code == page_type_code,
            Scope::CustomRoute(id) => custom_route_id == Some(id.as_str()),
        };
        if !applies {
            return Ok(None);
        }

        let entry = self.catalog.entry(&instance.component).ok_or_else(|| {
            ConfigurationConflict::UnknownComponent {
                instance_id: instance.id.clone(),
                component: instance.component.clone(),
            }
        })?;

        if instance.scope == Scope::Tenant && !entry.global {
            return Err(ConfigurationConflict::UnscopedComponent {
                instance_id: instance.id,
                component: instance.component,
            });
        }

        let empty = ComponentConfig::default();
        let template = self
            .catalog
            .binding_for(&instance.component, &instance.scope)
            .map(|binding| &binding.default_data)
            .unwrap_or(&empty);
        let merged_config = layered(&[&entry.schema.defaults, template, &instance.config]);

        let effective_order = match (&instance.scope, entry.slot) {
            (Scope::Tenant, Slot::Header) => HEADER_ORDER,
            (Scope::Tenant, Slot::Footer) => FOOTER_ORDER,
            _ => i64::from(instance.order),
        };

        Ok(Some(Candidate {
            effective_order,
            order: instance.order,
            component: ComposedComponent {
                id: instance.id,
                kind: instance.component.kind,
                variant: instance.component.variant,
                order: effective_order,
                scope: instance.scope,
                merged_config,
            },
        }))
    }
}
