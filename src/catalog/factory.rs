use std::{collections::HashMap, fmt, sync::Arc};

use crate::{
    Catalog, CatalogError,
    catalog::MEMORY_CATALOG_TYPE,
    common::name::fold,
};

/// Builds catalogs of one type.
///
/// `CREATE CATALOG ... TYPE <type>` picks the factory registered for
/// `<type>`; the factory validates the properties and builds the catalog.
pub trait CatalogFactory: fmt::Debug + Send + Sync {
    /// The type discriminator this factory answers to.
    fn catalog_type(&self) -> &str;

    /// Validates `properties` and builds a catalog named `name`.
    ///
    /// Must not have side effects: a failed creation leaves nothing behind.
    fn create(
        &self,
        name: &str,
        properties: &HashMap<String, String>,
    ) -> Result<Catalog, CatalogError>;
}

/// Factory for catalogs that keep their providers in memory.
///
/// Accepts any property as long as its key is not blank.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryCatalogFactory;

impl CatalogFactory for MemoryCatalogFactory {
    fn catalog_type(&self) -> &str {
        MEMORY_CATALOG_TYPE
    }

    fn create(
        &self,
        name: &str,
        properties: &HashMap<String, String>,
    ) -> Result<Catalog, CatalogError> {
        if properties.keys().any(|key| key.trim().is_empty()) {
            return Err(CatalogError::configuration(
                name,
                "property keys must not be empty",
            ));
        }

        Ok(Catalog::empty(name)
            .with_type(MEMORY_CATALOG_TYPE)
            .with_properties(properties.clone()))
    }
}

/// Registry of catalog factories, keyed case-insensitively by type.
#[derive(Debug, Clone)]
pub struct CatalogFactories {
    factories: HashMap<String, Arc<dyn CatalogFactory>>,
}

impl CatalogFactories {
    /// A registry with no factories at all.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Adds a factory, replacing any factory of the same type.
    pub fn register(&mut self, factory: Arc<dyn CatalogFactory>) {
        self.factories.insert(fold(factory.catalog_type()), factory);
    }

    pub fn with_factory(mut self, factory: Arc<dyn CatalogFactory>) -> Self {
        self.register(factory);
        self
    }

    pub fn get(&self, catalog_type: &str) -> Option<&Arc<dyn CatalogFactory>> {
        self.factories.get(&fold(catalog_type))
    }

    /// Builds a catalog of `catalog_type` with the matching factory.
    pub fn create(
        &self,
        name: &str,
        catalog_type: &str,
        properties: &HashMap<String, String>,
    ) -> Result<Catalog, CatalogError> {
        let factory = self.get(catalog_type).ok_or_else(|| {
            CatalogError::configuration(name, format!("unknown catalog type '{catalog_type}'"))
        })?;

        factory.create(name, properties)
    }

    /// Registered types, sorted.
    pub fn types(&self) -> Vec<String> {
        let mut types: Vec<_> = self
            .factories
            .values()
            .map(|factory| factory.catalog_type().to_string())
            .collect();
        types.sort();
        types
    }
}

impl Default for CatalogFactories {
    fn default() -> Self {
        Self::empty().with_factory(Arc::new(MemoryCatalogFactory))
    }
}
