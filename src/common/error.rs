use miette::Diagnostic;
use thiserror::Error;

/// Errors raised by catalog management.
///
/// Every variant names the catalog (or capability) involved so the message
/// can be shown to the user as-is.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Catalog not found: {0}")]
    #[diagnostic(
        code(scuttle::catalog::not_found),
        help("run SHOW CATALOGS to list the available catalogs")
    )]
    NotFound(String),

    #[error("Table provider not found: {catalog}.{provider}")]
    #[diagnostic(code(scuttle::catalog::provider_not_found))]
    TableProviderNotFound { catalog: String, provider: String },

    #[error("Catalog already exists: {0}")]
    #[diagnostic(
        code(scuttle::catalog::already_exists),
        help("use CREATE CATALOG IF NOT EXISTS to ignore existing catalogs")
    )]
    AlreadyExists(String),

    #[error("Invalid configuration for catalog {catalog}: {message}")]
    #[diagnostic(code(scuttle::catalog::configuration))]
    Configuration { catalog: String, message: String },

    #[error("{0}")]
    #[diagnostic(code(scuttle::catalog::unsupported))]
    Unsupported(String),

    #[error("Unable to drop active catalog: {0}")]
    #[diagnostic(
        code(scuttle::catalog::in_use),
        help("switch to another catalog with USE CATALOG first")
    )]
    CatalogInUse(String),
}

impl CatalogError {
    pub(crate) fn configuration(catalog: &str, message: impl Into<String>) -> Self {
        Self::Configuration {
            catalog: catalog.to_string(),
            message: message.into(),
        }
    }
}
