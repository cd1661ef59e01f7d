//! Segment matching logic.
//!
//! # Responsibilities
//! - Match a localized alias in the detected language
//! - Match a canonical route prefix
//!
//! # Design Decisions
//! - Exact, case-sensitive comparison
//! - The empty segment only matches the root route's empty prefix
//! - No regex to guarantee O(n) matching

use std::fmt::Debug;

use serde::Serialize;

use crate::model::RouteDefinition;

/// How a segment was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Alias,
    Prefix,
}

/// Trait for matching a first path segment against a route.
pub trait SegmentMatcher: Send + Sync + Debug {
    /// Returns true if the segment selects this route.
    fn matches(&self, route: &RouteDefinition, segment: &str) -> bool;

    fn kind(&self) -> MatchKind;

    /// Language an alias match was checked in, if any.
    fn language(&self) -> Option<&str> {
        None
    }
}

/// Matches the route's alias in one language.
#[derive(Debug, Clone)]
pub struct AliasMatcher {
    language: String,
}

impl AliasMatcher {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }
}

impl SegmentMatcher for AliasMatcher {
    fn matches(&self, route: &RouteDefinition, segment: &str) -> bool {
        !segment.is_empty() && route.alias_for(&self.language) == Some(segment)
    }

    fn kind(&self) -> MatchKind {
        MatchKind::Alias
    }

    fn language(&self) -> Option<&str> {
        Some(&self.language)
    }
}

/// Matches the route's canonical prefix.
#[derive(Debug, Clone, Default)]
pub struct PrefixMatcher;

impl SegmentMatcher for PrefixMatcher {
    fn matches(&self, route: &RouteDefinition, segment: &str) -> bool {
        route.prefix == segment
    }

    fn kind(&self) -> MatchKind {
        MatchKind::Prefix
    }
}
