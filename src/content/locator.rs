//! Slug lookup with translation fallback.

use serde::Serialize;

use crate::error::{ResolveError, ResolveResult};
use crate::model::ContentRecord;
use crate::store::ContentStore;

/// Which lookup step found the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlugMatch {
    Canonical,
    Translated,
    DefaultLanguage,
}

/// A matched content row, reduced to its canonical identifying fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocatedEntity {
    pub id: String,
    /// Canonical slug, regardless of which slug matched.
    pub slug: String,
    /// Title in the requested language when available.
    pub title: String,
    pub matched_by: SlugMatch,
}

impl LocatedEntity {
    fn from_record(record: ContentRecord, language: &str, matched_by: SlugMatch) -> Self {
        let title = record.localized_title(language).to_string();
        Self {
            id: record.id,
            slug: record.slug,
            title,
            matched_by,
        }
    }
}

/// Request-scoped locator for one tenant.
pub struct EntityLocator<'a> {
    content: &'a dyn ContentStore,
    tenant_id: &'a str,
    default_language: &'a str,
}

impl<'a> EntityLocator<'a> {
    pub fn new(content: &'a dyn ContentStore, tenant_id: &'a str, default_language: &'a str) -> Self {
        Self {
            content,
            tenant_id,
            default_language,
        }
    }

    /// Find the row of `table` addressed by `slug` in `language`.
    ///
    /// `fallback` enables step (c), the default-language translated slug.
    pub async fn locate(
        &self,
        table: &str,
        slug: &str,
        language: &str,
        fallback: bool,
    ) -> ResolveResult<LocatedEntity> {
        if let Some(record) = self.content.find_by_slug(self.tenant_id, table, slug).await? {
            return Ok(LocatedEntity::from_record(record, language, SlugMatch::Canonical));
        }

        if language != self.default_language {
            if let Some(record) = self
                .content
                .find_by_translated_slug(self.tenant_id, table, language, slug)
                .await?
            {
                return Ok(LocatedEntity::from_record(record, language, SlugMatch::Translated));
            }
        }

        if fallback {
            if let Some(record) = self
                .content
                .find_by_translated_slug(self.tenant_id, table, self.default_language, slug)
                .await?
            {
                tracing::debug!(
                    tenant = %self.tenant_id,
                    table = %table,
                    slug = %slug,
                    language = %language,
                    "Slug matched through default-language fallback"
                );
                return Ok(LocatedEntity::from_record(
                    record,
                    language,
                    SlugMatch::DefaultLanguage,
                ));
            }
        }

        Err(ResolveError::EntityNotFound {
            table: table.to_string(),
            slug: slug.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, SiteData};

    fn store() -> MemoryStore {
        let data: SiteData = toml::from_str(
            r#"
            [[tenants]]
            id = "acme"
            default_language = "es"
            languages = ["en", "fr"]

            [[tenants.content.propiedades]]
            id = "prop-1"
            slug = "villa-del-mar"
            title = "Villa del Mar"
            slugs = { es = "villa-junto-al-mar", en = "seaside-villa" }
            titles = { en = "Seaside Villa" }

            [[tenants.content.propiedades]]
            id = "prop-2"
            slug = "casa-colonial"
            title = "Casa Colonial"
            "#,
        )
        .unwrap();
        MemoryStore::new(data)
    }

    #[tokio::test]
    async fn test_canonical_slug_any_language() {
        let store = store();
        let locator = EntityLocator::new(&store, "acme", "es");

        let found = locator.locate("propiedades", "villa-del-mar", "en", true).await.unwrap();
        assert_eq!(found.id, "prop-1");
        assert_eq!(found.matched_by, SlugMatch::Canonical);
        assert_eq!(found.title, "Seaside Villa");
    }

    #[tokio::test]
    async fn test_translated_slug() {
        let store = store();
        let locator = EntityLocator::new(&store, "acme", "es");

        let found = locator.locate("propiedades", "seaside-villa", "en", true).await.unwrap();
        assert_eq!(found.slug, "villa-del-mar");
        assert_eq!(found.matched_by, SlugMatch::Translated);
    }

    #[tokio::test]
    async fn test_missing_translation_falls_back() {
        let store = store();
        let locator = EntityLocator::new(&store, "acme", "es");

        // prop-2 has no French slug; its canonical slug still works.
        let found = locator.locate("propiedades", "casa-colonial", "fr", true).await.unwrap();
        assert_eq!(found.id, "prop-2");

        // Spanish translated slug requested from the French site.
        let found = locator
            .locate("propiedades", "villa-junto-al-mar", "fr", true)
            .await
            .unwrap();
        assert_eq!(found.matched_by, SlugMatch::DefaultLanguage);
        assert_eq!(found.title, "Villa del Mar");
    }

    #[tokio::test]
    async fn test_fallback_disabled() {
        let store = store();
        let locator = EntityLocator::new(&store, "acme", "es");

        let err = locator
            .locate("propiedades", "villa-junto-al-mar", "fr", false)
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::EntityNotFound { .. }));
    }

    #[tokio::test]
    async fn test_translated_slug_not_matched_in_other_language() {
        let store = store();
        let locator = EntityLocator::new(&store, "acme", "es");

        let err = locator.locate("propiedades", "seaside-villa", "fr", true).await.unwrap_err();
        assert_eq!(err.code(), "entity_not_found");
    }
}
