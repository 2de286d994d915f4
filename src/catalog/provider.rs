use std::{collections::BTreeSet, fmt};

use parking_lot::RwLock;

/// A connector to a data source, registered under a name inside a catalog.
///
/// The catalog layer only stores and hands out providers. It never closes
/// them; whoever loaded a provider keeps ownership of its lifecycle.
pub trait TableProvider: fmt::Debug + Send + Sync {
    /// Returns the name the provider is registered under.
    fn name(&self) -> &str;

    /// Returns the tables this provider currently exposes.
    fn table_names(&self) -> Vec<String>;
}

/// A table provider backed by an in-process set of table names.
///
/// Useful for tests and for the interactive shell, where no external
/// connector is available.
#[derive(Debug)]
pub struct MemoryTableProvider {
    name: String,
    tables: RwLock<BTreeSet<String>>,
}

impl MemoryTableProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: RwLock::new(BTreeSet::new()),
        }
    }

    /// Builder-style variant of [`MemoryTableProvider::add_table`].
    pub fn with_table(self, table: impl Into<String>) -> Self {
        self.add_table(table);
        self
    }

    /// Adds a table name. Returns `false` if it was already present.
    pub fn add_table(&self, table: impl Into<String>) -> bool {
        self.tables.write().insert(table.into())
    }
}

impl TableProvider for MemoryTableProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn table_names(&self) -> Vec<String> {
        self.tables.read().iter().cloned().collect()
    }
}
