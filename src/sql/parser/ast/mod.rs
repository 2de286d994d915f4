pub(crate) mod statement;

pub use statement::{CreateCatalogStatement, Statement};
