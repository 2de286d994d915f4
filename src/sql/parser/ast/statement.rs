use std::{borrow::Cow, collections::HashMap};

/// A catalog statement (top-level AST node).
#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'a> {
    /// `USE CATALOG <name>`
    UseCatalog { name: Cow<'a, str> },
    CreateCatalog(CreateCatalogStatement<'a>),
    /// `DROP CATALOG [IF EXISTS] <name>`
    DropCatalog { name: Cow<'a, str>, if_exists: bool },
    ShowCatalogs,
    ShowCurrentCatalog,
    /// `SHOW TABLES [FROM <catalog>]`
    ShowTables { catalog: Option<Cow<'a, str>> },
}

/// `CREATE CATALOG [IF NOT EXISTS] <name> TYPE <type> [WITH (...)]`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCatalogStatement<'a> {
    pub name: Cow<'a, str>,
    pub if_not_exists: bool,
    pub catalog_type: Cow<'a, str>,
    pub properties: HashMap<String, String>,
}
