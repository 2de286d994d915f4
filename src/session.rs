use std::sync::Arc;

use miette::Result;
use tracing::debug;

use crate::{
    CatalogError, CatalogManager,
    sql::{
        catalog_context::CatalogContext,
        parser::{CreateCatalogStatement, SqlParser, Statement},
    },
};

/// Result of executing a catalog statement.
///
/// Catalog statements produce a single text column: a status line for DDL,
/// or one row per name for the `SHOW` statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse {
    /// Header of the result column.
    pub column: String,

    /// The rows returned by the statement.
    pub rows: Vec<String>,
}

impl QueryResponse {
    fn status(message: String) -> Self {
        Self {
            column: String::from("status"),
            rows: vec![message],
        }
    }

    fn listing(column: &str, rows: Vec<String>) -> Self {
        Self {
            column: column.to_string(),
            rows,
        }
    }
}

/// Executes catalog statements against a [`CatalogManager`].
///
/// The statement goes through:
/// 1. **Lexing** - Tokenize the statement text
/// 2. **Parsing** - Build a [`Statement`]
/// 3. **Execution** - Call the matching manager operation
pub struct Session {
    manager: Arc<dyn CatalogManager>,
}

impl Session {
    pub fn new(manager: Arc<dyn CatalogManager>) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &Arc<dyn CatalogManager> {
        &self.manager
    }

    /// Name resolution view for planning queries in this session.
    pub fn catalog_context(&self) -> CatalogContext<'_> {
        CatalogContext::new(self.manager.as_ref())
    }

    /// Parses and executes one statement.
    pub fn execute(&self, query: &str) -> Result<QueryResponse> {
        let statement = SqlParser::new(query).parse()?;

        debug!(?statement, "executing catalog statement");

        let response = match statement {
            Statement::UseCatalog { name } => {
                self.manager.use_catalog(&name)?;
                let current = self.manager.current_catalog();
                QueryResponse::status(format!("Using catalog {}", current.name()))
            }
            Statement::CreateCatalog(create) => self.create_catalog(create)?,
            Statement::DropCatalog { name, if_exists } => {
                match self.manager.drop_catalog(&name) {
                    Ok(()) => QueryResponse::status(format!("Dropped catalog {name}")),
                    Err(CatalogError::NotFound(_)) if if_exists => {
                        QueryResponse::status(format!("Catalog {name} does not exist, skipped"))
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            Statement::ShowCatalogs => {
                QueryResponse::listing("catalog", self.manager.catalog_names())
            }
            Statement::ShowCurrentCatalog => QueryResponse::listing(
                "catalog",
                vec![self.manager.current_catalog().name().to_string()],
            ),
            Statement::ShowTables { catalog } => {
                let catalog = self.catalog_context().resolve_catalog(catalog.as_deref())?;

                let tables = catalog
                    .table_providers()
                    .into_iter()
                    .flat_map(|(name, provider)| {
                        provider
                            .table_names()
                            .into_iter()
                            .map(move |table| format!("{name}.{table}"))
                    })
                    .collect();

                QueryResponse::listing("table", tables)
            }
        };

        Ok(response)
    }

    fn create_catalog(&self, create: CreateCatalogStatement) -> Result<QueryResponse> {
        let CreateCatalogStatement {
            name,
            if_not_exists,
            catalog_type,
            properties,
        } = create;

        match self
            .manager
            .create_catalog(&name, &catalog_type, &properties)
        {
            Ok(()) => Ok(QueryResponse::status(format!("Created catalog {name}"))),
            Err(CatalogError::AlreadyExists(_)) if if_not_exists => Ok(QueryResponse::status(
                format!("Catalog {name} already exists, skipped"),
            )),
            Err(err) => Err(err.into()),
        }
    }
}
