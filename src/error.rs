//! Resolution error taxonomy.

use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by `Resolver::resolve`.
///
/// The not-found variants and `AmbiguousRoute` are domain outcomes; `Store`
/// is an infrastructure failure of a collaborator.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("tenant {0} not found")]
    TenantNotFound(String),

    /// No prefix or alias matched, or the segment count does not fit the route.
    #[error("no route matches {path}")]
    RouteNotFound { path: String },

    /// The page kind exists but its content row does not.
    #[error("no {table} entry matches slug {slug:?}")]
    EntityNotFound { table: String, slug: String },

    /// Two enabled route definitions claim the same segment.
    #[error("ambiguous route for segment {segment:?} (language {language:?}): {prefixes:?}")]
    AmbiguousRoute {
        segment: String,
        language: Option<String>,
        prefixes: Vec<String>,
    },

    /// Catalog data that cannot drive resolution (missing handler, mismatched target).
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ResolveError {
    /// Stable machine-readable code, used in API bodies and metric labels.
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::TenantNotFound(_) => "tenant_not_found",
            ResolveError::RouteNotFound { .. } => "route_not_found",
            ResolveError::EntityNotFound { .. } => "entity_not_found",
            ResolveError::AmbiguousRoute { .. } => "ambiguous_route",
            ResolveError::InvalidCatalog(_) => "invalid_catalog",
            ResolveError::Store(_) => "store_unavailable",
        }
    }

    pub fn route_not_found(path: impl Into<String>) -> Self {
        ResolveError::RouteNotFound { path: path.into() }
    }
}

/// Result type for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let route = ResolveError::route_not_found("/foo");
        let entity = ResolveError::EntityNotFound {
            table: "propiedades".into(),
            slug: "x".into(),
        };
        assert_eq!(route.code(), "route_not_found");
        assert_eq!(entity.code(), "entity_not_found");
        assert_eq!(route.to_string(), "no route matches /foo");
        assert!(entity.to_string().contains("propiedades"));
    }
}
