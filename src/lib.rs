//! Catalog management for the Scuttle SQL engine.
//!
//! A [`CatalogManager`] owns a set of named [`Catalog`]s, each holding named
//! [`TableProvider`]s, and tracks which catalog is current. The planner
//! resolves table references through it and DDL statements
//! (`USE CATALOG`, `CREATE CATALOG`, `DROP CATALOG`) mutate it.

pub(crate) mod catalog;
pub(crate) mod common;
pub(crate) mod session;
pub(crate) mod sql;

pub use catalog::{
    Catalog, DEFAULT_CATALOG, MEMORY_CATALOG_TYPE, MemoryTableProvider, TableProvider,
    empty::EmptyCatalogManager,
    factory::{CatalogFactories, CatalogFactory, MemoryCatalogFactory},
    in_memory::InMemoryCatalogManager,
    manager::CatalogManager,
};
pub use common::error::CatalogError;
pub use session::{QueryResponse, Session};
pub use sql::catalog_context::CatalogContext;
