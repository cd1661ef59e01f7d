//! Statically registered page handlers.
//!
//! # Responsibilities
//! - Map every page-type code to its data strategy once, at load time
//! - Reject page types whose handler cannot serve their navigation level
//! - Verify every route only names page types that can serve its targets
//!
//! # Design Decisions
//! - No handler is discovered at request time; a missing handler is a load error
//! - Checks are shared by site data validation and snapshot compilation

use std::collections::HashMap;

use thiserror::Error;

use crate::model::{HandlerSpec, NavigationLevel, PageTypeDescriptor, RouteDefinition, TargetKind};

/// Data strategy for one page type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageHandler {
    /// Load a persisted page row.
    UniquePage,
    /// Virtual listing; the renderer fetches rows itself.
    Listing { table: Option<String> },
    /// Virtual listing filtered by a category row.
    CategoryListing { category_table: String },
    /// Virtual page for one content row.
    SingleEntity {
        table: String,
        category_table: Option<String>,
        language_fallback: bool,
    },
}

impl PageHandler {
    /// Whether a handler can serve a target beneath a route prefix.
    pub fn serves(&self, target: TargetKind) -> bool {
        matches!(
            (self, target),
            (PageHandler::UniquePage, TargetKind::Directory)
                | (PageHandler::Listing { .. }, TargetKind::Directory)
                | (PageHandler::CategoryListing { .. }, TargetKind::Category)
                | (PageHandler::SingleEntity { .. }, TargetKind::Single)
        )
    }

    fn from_descriptor(descriptor: &PageTypeDescriptor) -> Result<Self, RegistryError> {
        let invalid = |reason: &str| RegistryError::InvalidHandler {
            code: descriptor.code.clone(),
            reason: reason.to_string(),
        };
        let level = descriptor.navigation_level;

        match &descriptor.handler {
            HandlerSpec::Unique => {
                if level != NavigationLevel::Directory {
                    return Err(invalid("unique pages must be navigation level 0"));
                }
                Ok(PageHandler::UniquePage)
            }
            HandlerSpec::Listing { table } => {
                if level != NavigationLevel::Directory {
                    return Err(invalid("listings must be navigation level 0"));
                }
                if table.as_deref() == Some("") {
                    return Err(invalid("listing table is empty"));
                }
                Ok(PageHandler::Listing {
                    table: table.clone(),
                })
            }
            HandlerSpec::Category { category_table } => {
                if level == NavigationLevel::Directory {
                    return Err(invalid("category pages sit below a directory"));
                }
                if category_table.is_empty() {
                    return Err(invalid("category table is empty"));
                }
                Ok(PageHandler::CategoryListing {
                    category_table: category_table.clone(),
                })
            }
            HandlerSpec::Single {
                table,
                category_table,
                language_fallback,
            } => {
                if level == NavigationLevel::Directory {
                    return Err(invalid("single pages sit below a directory"));
                }
                if table.is_empty() || category_table.as_deref() == Some("") {
                    return Err(invalid("content table is empty"));
                }
                Ok(PageHandler::SingleEntity {
                    table: table.clone(),
                    category_table: category_table.clone(),
                    language_fallback: *language_fallback,
                })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate page type {0}")]
    DuplicatePageType(String),

    #[error("page type {code}: {reason}")]
    InvalidHandler { code: String, reason: String },

    #[error("route {prefix:?} serves no page type")]
    EmptyRoute { prefix: String },

    #[error("route {prefix:?}: unknown page type {code}")]
    UnknownPageType { prefix: String, code: String },

    #[error("route {prefix:?}: page type {code} cannot serve a {target} target")]
    TargetMismatch {
        prefix: String,
        code: String,
        target: TargetKind,
    },

    #[error("route {prefix:?}: navigation level {level} is too shallow for a {target} target")]
    LevelTooShallow {
        prefix: String,
        level: u8,
        target: TargetKind,
    },

    #[error("the root route must be navigation level 0")]
    DeepRoot,
}

/// A page type with its compiled handler.
#[derive(Debug, Clone)]
pub struct RegisteredPage {
    pub descriptor: PageTypeDescriptor,
    pub handler: PageHandler,
}

/// Page-type code → handler map.
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    pages: HashMap<String, RegisteredPage>,
}

impl HandlerRegistry {
    /// Compile every page type; fails on the first invalid one.
    pub fn build(page_types: &[PageTypeDescriptor]) -> Result<Self, RegistryError> {
        let mut pages = HashMap::with_capacity(page_types.len());

        for descriptor in page_types {
            let handler = PageHandler::from_descriptor(descriptor)?;
            let registered = RegisteredPage {
                descriptor: descriptor.clone(),
                handler,
            };
            if pages.insert(descriptor.code.clone(), registered).is_some() {
                return Err(RegistryError::DuplicatePageType(descriptor.code.clone()));
            }
        }

        Ok(Self { pages })
    }

    pub fn get(&self, code: &str) -> Option<&RegisteredPage> {
        self.pages.get(code)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Verify that a route only names page types able to serve its targets.
    pub fn check_route(&self, route: &RouteDefinition) -> Result<(), RegistryError> {
        if route.pages.iter().next().is_none() {
            return Err(RegistryError::EmptyRoute {
                prefix: route.prefix.clone(),
            });
        }
        if route.is_root() && route.navigation_level != NavigationLevel::Directory {
            return Err(RegistryError::DeepRoot);
        }

        for (target, code) in route.pages.iter() {
            let registered = self.get(code).ok_or_else(|| RegistryError::UnknownPageType {
                prefix: route.prefix.clone(),
                code: code.to_string(),
            })?;

            if !registered.handler.serves(target) {
                return Err(RegistryError::TargetMismatch {
                    prefix: route.prefix.clone(),
                    code: code.to_string(),
                    target,
                });
            }

            let required = match target {
                TargetKind::Directory => NavigationLevel::Directory,
                TargetKind::Single => NavigationLevel::Single,
                TargetKind::Category => NavigationLevel::Categorized,
            };
            if route.navigation_level.max_segments() < required.max_segments() {
                return Err(RegistryError::LevelTooShallow {
                    prefix: route.prefix.clone(),
                    level: route.navigation_level.into(),
                    target,
                });
            }
        }

        Ok(())
    }
}
