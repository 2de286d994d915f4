use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use parking_lot::RwLock;

use crate::common::name::fold;

pub use provider::{MemoryTableProvider, TableProvider};

pub mod empty;
pub mod factory;
pub mod in_memory;
pub mod manager;
pub mod provider;

/// Name of the catalog every manager starts with.
pub const DEFAULT_CATALOG: &str = "default";

/// Type discriminator of catalogs that live entirely in memory.
pub const MEMORY_CATALOG_TYPE: &str = "memory";

#[derive(Debug, Clone)]
struct ProviderEntry {
    /// Name as it was registered, before case folding.
    name: String,
    provider: Arc<dyn TableProvider>,
}

/// A named namespace of table providers.
///
/// The name, type and properties are fixed at construction. The provider
/// map can only change through the [`manager::CatalogManager`] that owns
/// the catalog; everyone else gets read access.
#[derive(Debug)]
pub struct Catalog {
    name: String,
    catalog_type: String,
    properties: BTreeMap<String, String>,
    providers: RwLock<HashMap<String, ProviderEntry>>,
}

impl Catalog {
    /// Creates a catalog of type `memory` holding the given providers.
    ///
    /// The providers are copied into the catalog, so later changes to the
    /// caller's collection do not leak in. Names differing only in case
    /// collapse into one entry, the last one winning.
    pub fn new<I, S>(name: impl Into<String>, providers: I) -> Self
    where
        I: IntoIterator<Item = (S, Arc<dyn TableProvider>)>,
        S: Into<String>,
    {
        let providers = providers
            .into_iter()
            .map(|(provider_name, provider)| {
                let name: String = provider_name.into();
                (fold(&name), ProviderEntry { name, provider })
            })
            .collect();

        Self {
            name: name.into(),
            catalog_type: MEMORY_CATALOG_TYPE.to_string(),
            properties: BTreeMap::new(),
            providers: RwLock::new(providers),
        }
    }

    /// Creates a catalog with no providers.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::<(String, Arc<dyn TableProvider>)>::new())
    }

    pub fn with_type(mut self, catalog_type: impl Into<String>) -> Self {
        self.catalog_type = catalog_type.into();
        self
    }

    pub fn with_properties<I, K, V>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.properties = properties
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type discriminator this catalog was created with.
    pub fn catalog_type(&self) -> &str {
        &self.catalog_type
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Looks up a provider, ignoring case.
    pub fn table_provider(&self, name: &str) -> Option<Arc<dyn TableProvider>> {
        self.providers
            .read()
            .get(&fold(name))
            .map(|entry| Arc::clone(&entry.provider))
    }

    /// All providers, ordered by their registered name.
    pub fn table_providers(&self) -> Vec<(String, Arc<dyn TableProvider>)> {
        let mut providers: Vec<_> = self
            .providers
            .read()
            .values()
            .map(|entry| (entry.name.clone(), Arc::clone(&entry.provider)))
            .collect();
        providers.sort_by_key(|(name, _)| fold(name));
        providers
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.table_providers()
            .into_iter()
            .map(|(name, _)| name)
            .collect()
    }

    /// Adds or replaces a provider, returning the one it replaced.
    pub(crate) fn register(
        &self,
        name: &str,
        provider: Arc<dyn TableProvider>,
    ) -> Option<Arc<dyn TableProvider>> {
        let entry = ProviderEntry {
            name: name.to_string(),
            provider,
        };

        self.providers
            .write()
            .insert(fold(name), entry)
            .map(|previous| previous.provider)
    }
}
