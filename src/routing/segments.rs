//! Segment resolution beneath a matched prefix.
//!
//! | level | remaining segments | target                     |
//! |-------|--------------------|----------------------------|
//! | any   | 0                  | directory                  |
//! | 1     | 1                  | single (slug)              |
//! | 2     | 1                  | category (category slug)   |
//! | 2     | 2                  | single (category, slug)    |
//!
//! Every other combination is `RouteNotFound`; there are no partial matches.

use serde::Serialize;

use crate::error::{ResolveError, ResolveResult};
use crate::model::{NavigationLevel, TargetKind};
use crate::routing::router::RouteMatch;

/// What a request addresses beneath its route prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageTarget {
    Directory,
    Category {
        category_slug: String,
    },
    Single {
        slug: String,
        category_slug: Option<String>,
    },
}

impl PageTarget {
    pub fn kind(&self) -> TargetKind {
        match self {
            PageTarget::Directory => TargetKind::Directory,
            PageTarget::Category { .. } => TargetKind::Category,
            PageTarget::Single { .. } => TargetKind::Single,
        }
    }
}

/// Target plus the page type the route serves for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentResolution {
    pub target: PageTarget,
    pub page_type_code: String,
}

/// Decide the target from the remaining segments after the prefix.
pub fn resolve_segments(route: &RouteMatch, remaining: &[&str]) -> ResolveResult<SegmentResolution> {
    let not_found = || {
        let mut path = format!("/{}", route.prefix);
        for segment in remaining {
            path.push('/');
            path.push_str(segment);
        }
        ResolveError::route_not_found(path)
    };

    let target = match (route.navigation_level, remaining) {
        (_, []) => PageTarget::Directory,
        (NavigationLevel::Single, [slug]) => PageTarget::Single {
            slug: slug.to_string(),
            category_slug: None,
        },
        (NavigationLevel::Categorized, [category]) => PageTarget::Category {
            category_slug: category.to_string(),
        },
        (NavigationLevel::Categorized, [category, slug]) => PageTarget::Single {
            slug: slug.to_string(),
            category_slug: Some(category.to_string()),
        },
        _ => return Err(not_found()),
    };

    let page_type_code = route
        .route
        .pages
        .for_target(target.kind())
        .ok_or_else(not_found)?
        .to_string();

    Ok(SegmentResolution {
        target,
        page_type_code,
    })
}
