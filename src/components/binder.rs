//! Dynamic data binding.

use std::collections::BTreeMap;

use crate::model::{ComposedComponent, DataBinding, ResolvedPage};

/// Inject the resolved routing context into every `dynamic_data` block.
///
/// Pure: performs no lookups and leaves static components untouched.
pub fn bind_dynamic_data(
    components: &mut [ComposedComponent],
    page: &ResolvedPage,
    query: &BTreeMap<String, String>,
) {
    let binding = DataBinding {
        page_type_code: page.page_type_code.clone(),
        language: page.language.clone(),
        slug: page.slug.clone(),
        entity_id: page.entity_id.clone(),
        category_slug: page.category_slug.clone(),
        query: query.clone(),
    };

    for component in components.iter_mut() {
        if let Some(dynamic) = component.merged_config.dynamic_data.as_mut() {
            dynamic.binding = Some(binding.clone());
        }
    }
}
