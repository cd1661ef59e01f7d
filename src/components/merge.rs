//! Layered configuration merge.
//!
//! Objects merge recursively by key; any other value (scalar, array, null) in
//! a higher layer replaces the lower one. Keys present in only one layer are
//! always kept.

use serde_json::{Map, Value};

use crate::model::{ComponentConfig, DynamicData};

/// Merge `overlay` into `base`, overlay winning per key.
pub fn deep_merge(base: &mut Map<String, Value>, overlay: &Map<String, Value>) {
    for (key, value) in overlay {
        match (base.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                deep_merge(existing, incoming);
            }
            _ => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}

fn merge_dynamic(base: &mut Option<DynamicData>, overlay: &Option<DynamicData>) {
    let Some(overlay) = overlay else {
        return;
    };
    match base {
        Some(existing) => {
            if overlay.data_type.is_some() {
                existing.data_type = overlay.data_type.clone();
            }
            deep_merge(&mut existing.params, &overlay.params);
            deep_merge(&mut existing.extra, &overlay.extra);
            if overlay.binding.is_some() {
                existing.binding = overlay.binding.clone();
            }
        }
        None => *base = Some(overlay.clone()),
    }
}

/// Merge one configuration layer into another, section by section.
pub fn merge_config(base: &mut ComponentConfig, overlay: &ComponentConfig) {
    deep_merge(&mut base.static_data, &overlay.static_data);
    merge_dynamic(&mut base.dynamic_data, &overlay.dynamic_data);
    deep_merge(&mut base.styles, &overlay.styles);
    base.toggles
        .extend(overlay.toggles.iter().map(|(k, v)| (k.clone(), *v)));
}

/// Catalog defaults, then template defaults, then the instance override.
pub fn layered(layers: &[&ComponentConfig]) -> ComponentConfig {
    let mut merged = ComponentConfig::default();
    for layer in layers {
        merge_config(&mut merged, layer);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(value: Value) -> ComponentConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_deep_merge_nested_objects() {
        let mut base = json!({ "title": "Hola", "cta": { "text": "Ver", "url": "/a" } })
            .as_object()
            .cloned()
            .unwrap();
        let overlay = json!({ "cta": { "url": "/b" }, "subtitle": "Mundo" })
            .as_object()
            .cloned()
            .unwrap();

        deep_merge(&mut base, &overlay);
        assert_eq!(
            Value::Object(base),
            json!({ "title": "Hola", "subtitle": "Mundo", "cta": { "text": "Ver", "url": "/b" } })
        );
    }

    #[test]
    fn test_arrays_replace() {
        let mut base = json!({ "items": [1, 2, 3] }).as_object().cloned().unwrap();
        let overlay = json!({ "items": [4] }).as_object().cloned().unwrap();
        deep_merge(&mut base, &overlay);
        assert_eq!(base["items"], json!([4]));
    }

    #[test]
    fn test_three_layers_keep_every_key() {
        let catalog = config(json!({
            "static_data": { "title": "Default", "layout": "grid" },
            "styles": { "color": "blue" },
            "toggles": { "show_cta": true }
        }));
        let template = config(json!({
            "static_data": { "title": "Template" },
            "toggles": { "show_map": false }
        }));
        let instance = config(json!({
            "static_data": { "title": "Instance" },
            "styles": { "padding": 4 },
            "dynamic_data": { "dataType": "sectores", "params": { "limit": 6 } }
        }));

        let merged = layered(&[&catalog, &template, &instance]);
        assert_eq!(merged.static_data["title"], json!("Instance"));
        assert_eq!(merged.static_data["layout"], json!("grid"));
        assert_eq!(merged.styles["color"], json!("blue"));
        assert_eq!(merged.styles["padding"], json!(4));
        assert_eq!(merged.toggles.get("show_cta"), Some(&true));
        assert_eq!(merged.toggles.get("show_map"), Some(&false));
        assert_eq!(
            merged.dynamic_data.unwrap().data_type.as_deref(),
            Some("sectores")
        );
    }

    #[test]
    fn test_dynamic_params_merge() {
        let catalog = config(json!({
            "dynamic_data": { "dataType": "propiedades", "params": { "limit": 6, "order": "recent" } }
        }));
        let instance = config(json!({ "dynamic_data": { "params": { "limit": 12 } } }));

        let merged = layered(&[&catalog, &instance]);
        let dynamic = merged.dynamic_data.unwrap();
        assert_eq!(dynamic.data_type.as_deref(), Some("propiedades"));
        assert_eq!(dynamic.params["limit"], json!(12));
        assert_eq!(dynamic.params["order"], json!("recent"));
    }

    #[test]
    fn test_dynamic_extra_keys_survive_merge() {
        let catalog = config(json!({
            "dynamic_data": {
                "dataType": "propiedades",
                "limit": 6,
                "filters": { "tipo": "casa", "zona": "norte" }
            }
        }));
        let instance = config(json!({
            "dynamic_data": { "limit": 12, "filters": { "zona": "sur" } }
        }));

        let merged = layered(&[&catalog, &instance]);
        let out = serde_json::to_value(merged.dynamic_data.unwrap()).unwrap();
        assert_eq!(
            out,
            json!({
                "dataType": "propiedades",
                "limit": 12,
                "filters": { "tipo": "casa", "zona": "sur" }
            })
        );
    }
}
