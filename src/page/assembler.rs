//! Page assembly.
//!
//! # Responsibilities
//! - Run the page type's registered handler
//! - Load persisted unique pages, synthesize virtual ones
//! - Surface missing content as `EntityNotFound`, never as a fallback page
//!
//! # Design Decisions
//! - Descriptors are rebuilt on every request; nothing here is cached
//! - Category slugs always allow default-language fallback

use crate::content::EntityLocator;
use crate::error::{ResolveError, ResolveResult};
use crate::model::{PageRef, ResolvedPage, SourceKind, TenantSite};
use crate::page::registry::{HandlerRegistry, PageHandler};
use crate::routing::{PageTarget, RouteMatch, SegmentResolution};
use crate::store::ContentStore;

/// Table name reported when a persisted unique page is missing.
pub const PAGES_TABLE: &str = "pages";

pub struct PageAssembler<'a> {
    content: &'a dyn ContentStore,
    registry: &'a HandlerRegistry,
    site: &'a TenantSite,
}

impl<'a> PageAssembler<'a> {
    pub fn new(
        content: &'a dyn ContentStore,
        registry: &'a HandlerRegistry,
        site: &'a TenantSite,
    ) -> Self {
        Self {
            content,
            registry,
            site,
        }
    }

    pub async fn assemble(
        &self,
        route: &RouteMatch,
        resolution: &SegmentResolution,
        language: &str,
    ) -> ResolveResult<ResolvedPage> {
        let registered = self.registry.get(&resolution.page_type_code).ok_or_else(|| {
            ResolveError::InvalidCatalog(format!(
                "no handler registered for page type {}",
                resolution.page_type_code
            ))
        })?;

        let custom_route_id = match route.source {
            SourceKind::Custom => route.route.custom_route_id.clone(),
            SourceKind::System => None,
        };

        let mut page = ResolvedPage {
            page_type_code: resolution.page_type_code.clone(),
            title: registered.descriptor.display_name().to_string(),
            slug: route.prefix.clone(),
            language: language.to_string(),
            entity_id: None,
            category_slug: None,
            is_virtual: true,
            custom_route_id,
            page_id: None,
        };

        let locator = EntityLocator::new(self.content, &self.site.id, &self.site.default_language);

        match (&registered.handler, &resolution.target) {
            (PageHandler::UniquePage, PageTarget::Directory) => {
                let page_ref = match &page.custom_route_id {
                    Some(id) => PageRef::CustomRoute(id.clone()),
                    None => PageRef::PageType(resolution.page_type_code.clone()),
                };
                let record = self
                    .content
                    .unique_page(&self.site.id, &page_ref)
                    .await?
                    .ok_or_else(|| ResolveError::EntityNotFound {
                        table: PAGES_TABLE.to_string(),
                        slug: page_ref.to_string(),
                    })?;

                page.title = record.localized_title(language).to_string();
                if !record.slug.is_empty() {
                    page.slug = record.slug;
                }
                page.page_id = Some(record.id);
                page.is_virtual = false;
            }

            (PageHandler::Listing { .. }, PageTarget::Directory) => {}

            (PageHandler::CategoryListing { category_table }, PageTarget::Category { category_slug }) => {
                let category = locator
                    .locate(category_table, category_slug, language, true)
                    .await?;
                page.title = category.title;
                page.slug = category.slug.clone();
                page.entity_id = Some(category.id);
                page.category_slug = Some(category.slug);
            }

            (
                PageHandler::SingleEntity {
                    table,
                    category_table,
                    language_fallback,
                },
                PageTarget::Single {
                    slug,
                    category_slug,
                },
            ) => {
                page.category_slug = match (category_table, category_slug) {
                    (Some(category_table), Some(category_slug)) => Some(
                        locator
                            .locate(category_table, category_slug, language, true)
                            .await?
                            .slug,
                    ),
                    (None, Some(category_slug)) => Some(category_slug.clone()),
                    (_, None) => None,
                };

                let entity = locator
                    .locate(table, slug, language, *language_fallback)
                    .await?;
                page.title = entity.title;
                page.slug = entity.slug;
                page.entity_id = Some(entity.id);
            }

            (handler, target) => {
                return Err(ResolveError::InvalidCatalog(format!(
                    "page type {} ({:?}) cannot serve a {} target",
                    resolution.page_type_code,
                    handler,
                    target.kind()
                )));
            }
        }

        tracing::debug!(
            tenant = %self.site.id,
            page_type = %page.page_type_code,
            slug = %page.slug,
            is_virtual = page.is_virtual,
            "Page assembled"
        );

        Ok(page)
    }
}
