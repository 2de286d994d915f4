use std::{collections::HashMap, sync::Arc};

use crate::{Catalog, CatalogError, TableProvider};

/// Registry of catalogs plus the session's current catalog.
///
/// The planner resolves unqualified table names through
/// [`CatalogManager::current_catalog`] and qualified ones through
/// [`CatalogManager::get_catalog`]. DDL statements go through the mutators.
///
/// Implementations:
/// - [`InMemoryCatalogManager`](super::in_memory::InMemoryCatalogManager):
///   full read-write registry.
/// - [`EmptyCatalogManager`](super::empty::EmptyCatalogManager): a single
///   fixed `default` catalog that refuses every mutation.
pub trait CatalogManager: Send + Sync {
    /// Makes `name` the current catalog.
    ///
    /// Fails with [`CatalogError::NotFound`] and leaves the current catalog
    /// untouched if no such catalog exists.
    fn use_catalog(&self, name: &str) -> Result<(), CatalogError>;

    /// Returns the catalog used for unqualified table references.
    fn current_catalog(&self) -> Arc<Catalog>;

    /// Looks up a catalog by name, ignoring case.
    fn get_catalog(&self, name: &str) -> Option<Arc<Catalog>>;

    /// Creates a catalog of the given type.
    fn create_catalog(
        &self,
        name: &str,
        catalog_type: &str,
        properties: &HashMap<String, String>,
    ) -> Result<(), CatalogError>;

    /// Removes a catalog from the registry.
    ///
    /// The catalog's providers are not closed.
    fn drop_catalog(&self, name: &str) -> Result<(), CatalogError>;

    /// Adds `provider` to catalog `catalog_name` under the provider's own
    /// name, replacing a provider already registered under that name.
    fn register_table_provider(
        &self,
        catalog_name: &str,
        provider: Arc<dyn TableProvider>,
    ) -> Result<(), CatalogError>;

    /// Names of all catalogs, sorted ignoring case.
    fn catalog_names(&self) -> Vec<String>;
}
