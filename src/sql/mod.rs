pub(crate) mod catalog_context;
pub(crate) mod lexer;
pub(crate) mod parser;
