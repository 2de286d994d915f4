use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::{
    Catalog, CatalogError, TableProvider,
    catalog::{DEFAULT_CATALOG, factory::CatalogFactories, manager::CatalogManager},
    common::name::fold,
};

#[derive(Debug)]
struct ManagerState {
    /// Catalogs keyed by folded name.
    catalogs: HashMap<String, Arc<Catalog>>,

    /// Always an entry of `catalogs`: dropping it is refused.
    current: Arc<Catalog>,
}

impl ManagerState {
    fn with_catalog(catalog: Catalog) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            catalogs: HashMap::from([(fold(catalog.name()), Arc::clone(&catalog))]),
            current: catalog,
        }
    }
}

/// Read-write catalog registry kept in process memory.
///
/// A single lock guards both the catalog map and the current-catalog
/// selector, so a reader never sees a selector pointing at a catalog that
/// is being dropped.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use scuttle_catalog::{CatalogManager, InMemoryCatalogManager};
///
/// let manager = InMemoryCatalogManager::new();
/// manager.create_catalog("prod", "memory", &HashMap::new()).unwrap();
/// manager.use_catalog("PROD").unwrap();
/// assert_eq!(manager.current_catalog().name(), "prod");
/// ```
#[derive(Debug)]
pub struct InMemoryCatalogManager {
    state: RwLock<ManagerState>,
    factories: CatalogFactories,
}

impl InMemoryCatalogManager {
    /// Creates a manager holding an empty `default` catalog of type `memory`.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(ManagerState::with_catalog(Catalog::empty(DEFAULT_CATALOG))),
            factories: CatalogFactories::default(),
        }
    }

    /// Replaces the factories used by `create_catalog`.
    pub fn with_factories(mut self, factories: CatalogFactories) -> Self {
        self.factories = factories;
        self
    }

    /// Replaces the starting catalog. It becomes the only catalog and the
    /// current one.
    pub fn with_initial_catalog(self, catalog: Catalog) -> Self {
        *self.state.write() = ManagerState::with_catalog(catalog);
        self
    }

    pub fn factories(&self) -> &CatalogFactories {
        &self.factories
    }
}

impl Default for InMemoryCatalogManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogManager for InMemoryCatalogManager {
    fn use_catalog(&self, name: &str) -> Result<(), CatalogError> {
        let mut state = self.state.write();

        let catalog = state
            .catalogs
            .get(&fold(name))
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))?;

        info!(catalog = catalog.name(), "switched current catalog");
        state.current = catalog;
        Ok(())
    }

    fn current_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.state.read().current)
    }

    fn get_catalog(&self, name: &str) -> Option<Arc<Catalog>> {
        self.state.read().catalogs.get(&fold(name)).cloned()
    }

    fn create_catalog(
        &self,
        name: &str,
        catalog_type: &str,
        properties: &HashMap<String, String>,
    ) -> Result<(), CatalogError> {
        if name.trim().is_empty() {
            return Err(CatalogError::configuration(
                name,
                "catalog name must not be empty",
            ));
        }

        let key = fold(name);
        let mut state = self.state.write();

        if state.catalogs.contains_key(&key) {
            return Err(CatalogError::AlreadyExists(name.to_string()));
        }

        // Build before touching the map so a rejected configuration
        // leaves the registry as it was.
        let catalog = self.factories.create(name, catalog_type, properties)?;
        state.catalogs.insert(key, Arc::new(catalog));

        info!(catalog = name, catalog_type, "created catalog");
        Ok(())
    }

    fn drop_catalog(&self, name: &str) -> Result<(), CatalogError> {
        let key = fold(name);
        let mut state = self.state.write();

        if !state.catalogs.contains_key(&key) {
            return Err(CatalogError::NotFound(name.to_string()));
        }

        if fold(state.current.name()) == key {
            return Err(CatalogError::CatalogInUse(state.current.name().to_string()));
        }

        state.catalogs.remove(&key);

        info!(catalog = name, "dropped catalog");
        Ok(())
    }

    fn register_table_provider(
        &self,
        catalog_name: &str,
        provider: Arc<dyn TableProvider>,
    ) -> Result<(), CatalogError> {
        let state = self.state.write();

        let catalog = state
            .catalogs
            .get(&fold(catalog_name))
            .ok_or_else(|| CatalogError::NotFound(catalog_name.to_string()))?;

        let provider_name = provider.name().to_string();
        let replaced = catalog.register(&provider_name, provider).is_some();

        debug!(
            catalog = catalog.name(),
            provider = provider_name.as_str(),
            replaced,
            "registered table provider"
        );
        Ok(())
    }

    fn catalog_names(&self) -> Vec<String> {
        let state = self.state.read();

        let mut names: Vec<_> = state
            .catalogs
            .values()
            .map(|catalog| catalog.name().to_string())
            .collect();
        names.sort_by_key(|name| fold(name));
        names
    }
}
