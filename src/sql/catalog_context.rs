use std::sync::Arc;

use crate::{Catalog, CatalogError, CatalogManager, TableProvider};

/// Name resolution view of a [`CatalogManager`] for the planner.
///
/// A missing catalog qualifier means the current catalog.
pub struct CatalogContext<'a> {
    manager: &'a dyn CatalogManager,
}

impl<'a> CatalogContext<'a> {
    pub fn new(manager: &'a dyn CatalogManager) -> Self {
        Self { manager }
    }

    pub fn resolve_catalog(&self, catalog: Option<&str>) -> Result<Arc<Catalog>, CatalogError> {
        match catalog {
            Some(name) => self
                .manager
                .get_catalog(name)
                .ok_or_else(|| CatalogError::NotFound(name.to_string())),
            None => Ok(self.manager.current_catalog()),
        }
    }

    pub fn table_provider(
        &self,
        catalog: Option<&str>,
        provider: &str,
    ) -> Result<Arc<dyn TableProvider>, CatalogError> {
        let catalog = self.resolve_catalog(catalog)?;

        catalog
            .table_provider(provider)
            .ok_or_else(|| CatalogError::TableProviderNotFound {
                catalog: catalog.name().to_string(),
                provider: provider.to_string(),
            })
    }
}
