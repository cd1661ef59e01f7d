//! Indexed component catalog and template bindings.

use std::collections::HashMap;

use crate::error::{ResolveError, ResolveResult};
use crate::model::{CatalogRef, ComponentCatalogEntry, ComponentTemplateBinding, Scope};

#[derive(Debug, Clone, Default)]
pub struct ComponentCatalog {
    entries: HashMap<CatalogRef, ComponentCatalogEntry>,
    bindings: Vec<ComponentTemplateBinding>,
}

impl ComponentCatalog {
    /// Index catalog entries. A type/variant pair defined twice is rejected.
    pub fn build(
        entries: Vec<ComponentCatalogEntry>,
        bindings: Vec<ComponentTemplateBinding>,
    ) -> ResolveResult<Self> {
        let mut indexed = HashMap::with_capacity(entries.len());
        for entry in entries {
            let key = entry.component.clone();
            if indexed.insert(key.clone(), entry).is_some() {
                return Err(ResolveError::InvalidCatalog(format!(
                    "component {} defined twice",
                    key
                )));
            }
        }

        Ok(Self {
            entries: indexed,
            bindings,
        })
    }

    pub fn entry(&self, component: &CatalogRef) -> Option<&ComponentCatalogEntry> {
        self.entries.get(component)
    }

    /// Template binding that supplies defaults for a component in a scope.
    pub fn binding_for(
        &self,
        component: &CatalogRef,
        scope: &Scope,
    ) -> Option<&ComponentTemplateBinding> {
        self.bindings
            .iter()
            .find(|binding| &binding.component == component && binding.applies_to(scope))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
