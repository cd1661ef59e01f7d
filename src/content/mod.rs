//! Content lookup subsystem.
//!
//! # Data Flow
//! ```text
//! (table, slug, language)
//!     → locator.rs
//!         (a) canonical slug
//!         (b) translated slug in the requested language (non-default only)
//!         (c) translated slug in the default language (when allowed)
//!     → LocatedEntity or EntityNotFound
//! ```
//!
//! # Design Decisions
//! - Canonical slugs are mandatory and stable, translations are optional, so a
//!   row lacking a translation still resolves through its canonical slug
//! - Category slugs resolve independently of the entity

pub mod locator;

pub use locator::{EntityLocator, LocatedEntity, SlugMatch};
