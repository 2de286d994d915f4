use std::{collections::HashMap, sync::Arc};

use tracing::warn;

use crate::{
    Catalog, CatalogError, TableProvider,
    catalog::{DEFAULT_CATALOG, manager::CatalogManager},
    common::name::fold,
};

/// A [`CatalogManager`] with one fixed, empty `default` catalog.
///
/// Name resolution behaves like any other manager, so planner code needs no
/// special case, but creating, dropping and registering are all refused with
/// [`CatalogError::Unsupported`]. Nothing changes after construction, which
/// makes it safe to share between threads without locking.
#[derive(Debug)]
pub struct EmptyCatalogManager {
    catalog: Arc<Catalog>,
}

impl EmptyCatalogManager {
    pub fn new() -> Self {
        Self {
            catalog: Arc::new(Catalog::empty(DEFAULT_CATALOG)),
        }
    }

    fn is_default(&self, name: &str) -> bool {
        fold(name) == fold(self.catalog.name())
    }

    fn unsupported(capability: &str) -> CatalogError {
        warn!(capability, "refused catalog mutation on read-only manager");
        CatalogError::Unsupported(format!(
            "ReadOnlyCatalogManager does not support {capability}"
        ))
    }
}

impl Default for EmptyCatalogManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogManager for EmptyCatalogManager {
    fn use_catalog(&self, name: &str) -> Result<(), CatalogError> {
        if self.is_default(name) {
            Ok(())
        } else {
            Err(CatalogError::NotFound(name.to_string()))
        }
    }

    fn current_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    fn get_catalog(&self, name: &str) -> Option<Arc<Catalog>> {
        self.is_default(name).then(|| Arc::clone(&self.catalog))
    }

    fn create_catalog(
        &self,
        _name: &str,
        _catalog_type: &str,
        _properties: &HashMap<String, String>,
    ) -> Result<(), CatalogError> {
        Err(Self::unsupported("catalog creation"))
    }

    fn drop_catalog(&self, _name: &str) -> Result<(), CatalogError> {
        Err(Self::unsupported("removing a catalog"))
    }

    fn register_table_provider(
        &self,
        _catalog_name: &str,
        _provider: Arc<dyn TableProvider>,
    ) -> Result<(), CatalogError> {
        Err(Self::unsupported("registering a table provider"))
    }

    fn catalog_names(&self) -> Vec<String> {
        vec![self.catalog.name().to_string()]
    }
}
