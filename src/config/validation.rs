//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (routes reference existing page types,
//!   bindings reference existing catalog components)
//! - Validate value ranges and addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: config → Result<(), Vec<ValidationError>>
//! - Duplicate prefixes/aliases and bad instance scopes are NOT rejected here;
//!   the resolver reports them per request (`AmbiguousRoute`,
//!   `ConfigurationConflict`) so one tenant's mistake cannot block a reload

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ResolverConfig;
use crate::page::registry::HandlerRegistry;
use crate::store::SiteData;

/// A single semantic problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate the service configuration.
pub fn validate_config(config: &ResolverConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("invalid socket address {:?}", config.listener.bind_address),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("invalid socket address {:?}", config.observability.metrics_address),
        ));
    }

    if config.admin.enabled
        && (config.admin.api_key.is_empty() || config.admin.api_key == "CHANGE_ME_IN_PRODUCTION")
    {
        errors.push(ValidationError::new("admin.api_key", "must be set when admin is enabled"));
    }

    if config.data.watch && config.data.seed_path.is_none() {
        errors.push(ValidationError::new("data.watch", "requires data.seed_path"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a site data document.
pub fn validate_site_data(data: &SiteData) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let registry = match HandlerRegistry::build(&data.page_types) {
        Ok(registry) => Some(registry),
        Err(e) => {
            errors.push(ValidationError::new("page_types", e.to_string()));
            None
        }
    };

    if let Some(registry) = &registry {
        for route in &data.routes {
            if let Err(e) = registry.check_route(route) {
                errors.push(ValidationError::new("routes", e.to_string()));
            }
        }
    }

    // Catalog ref -> whether the variant accepts dynamic_data.
    let mut components = HashMap::new();
    for entry in &data.components {
        if components.insert(&entry.component, entry.schema.dynamic).is_some() {
            errors.push(ValidationError::new(
                "components",
                format!("duplicate catalog entry {}", entry.component),
            ));
        }
        if entry.schema.defaults.dynamic_data.is_some() && !entry.schema.dynamic {
            errors.push(ValidationError::new(
                "components",
                format!("static variant {} declares dynamic_data defaults", entry.component),
            ));
        }
    }

    let mut bindings = HashSet::new();
    for (i, binding) in data.templates.iter().enumerate() {
        let field = format!("templates[{}]", i);
        match components.get(&binding.component).copied() {
            None => errors.push(ValidationError::new(
                &field,
                format!("unknown catalog component {}", binding.component),
            )),
            Some(false) if binding.default_data.dynamic_data.is_some() => {
                errors.push(ValidationError::new(
                    &field,
                    format!("dynamic_data set on static variant {}", binding.component),
                ));
            }
            Some(_) => {}
        }
        let target = (
            &binding.component,
            binding.is_global,
            binding.page_type_code.as_deref(),
            binding.custom_route_id.as_deref(),
        );
        if !bindings.insert(target) {
            errors.push(ValidationError::new(
                &field,
                format!("duplicate template binding for {}", binding.component),
            ));
        }
        let targets = [
            binding.is_global,
            binding.page_type_code.is_some(),
            binding.custom_route_id.is_some(),
        ];
        if targets.iter().filter(|set| **set).count() != 1 {
            errors.push(ValidationError::new(
                &field,
                "exactly one of is_global, page_type_code, custom_route_id must be set",
            ));
        }
    }

    let mut tenant_ids = HashSet::new();
    for tenant in &data.tenants {
        let field = format!("tenants.{}", tenant.id);

        if tenant.id.is_empty() {
            errors.push(ValidationError::new("tenants", "tenant id is empty"));
        }
        if !tenant_ids.insert(tenant.id.as_str()) {
            errors.push(ValidationError::new(&field, "duplicate tenant id"));
        }
        if tenant.default_language.is_empty() {
            errors.push(ValidationError::new(&field, "default_language is empty"));
        }

        for route in &tenant.custom_routes {
            if route.custom_route_id.is_none() {
                errors.push(ValidationError::new(
                    &field,
                    format!("custom route {:?} has no custom_route_id", route.prefix),
                ));
            }
            if route.prefix.is_empty() {
                errors.push(ValidationError::new(&field, "custom route prefix is empty"));
            }
            if let Some(registry) = &registry {
                if let Err(e) = registry.check_route(route) {
                    errors.push(ValidationError::new(&field, e.to_string()));
                }
            }
        }

        for (table, rows) in &tenant.content {
            if rows.iter().any(|row| row.slug.is_empty()) {
                errors.push(ValidationError::new(
                    &field,
                    format!("content table {} has a row without canonical slug", table),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
