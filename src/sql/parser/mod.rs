use std::{borrow::Cow, collections::HashMap, iter::Peekable};

use miette::{Result, miette};

use crate::sql::lexer::{Lexer, Token};

pub(crate) use ast::*;
pub(crate) use keyword::Keyword;

pub(crate) mod ast;
pub(crate) mod keyword;

/// Parser for catalog statements.
///
/// Uses recursive descent over a peekable token stream.
pub struct SqlParser<'src> {
    /// Token stream from the lexer
    lexer: Peekable<Lexer<'src>>,
}

impl<'src> SqlParser<'src> {
    /// Creates a new parser for the given statement text.
    pub fn new(query: &'src str) -> Self {
        Self {
            lexer: Lexer::new(query).peekable(),
        }
    }

    /// Parses exactly one statement, optionally terminated by `;`.
    pub fn parse(&mut self) -> Result<Statement<'src>> {
        let token = self.peek_token()?.clone();

        let statement = match token {
            Token::Keyword(keyword) => match keyword {
                Keyword::Use => self.parse_use_statement()?,
                Keyword::Create => self.parse_create_statement()?,
                Keyword::Drop => self.parse_drop_statement()?,
                Keyword::Show => self.parse_show_statement()?,
                _ => return Err(miette!("Unsupported keyword: {}", keyword)),
            },
            _ => return Err(miette!("Unexpected token: {:?}", token)),
        };

        self.consume_if(Token::SemiColon);

        if let Some(token) = self.lexer.next().transpose()? {
            return Err(miette!("Unexpected trailing token: {:?}", token));
        }

        Ok(statement)
    }

    fn parse_use_statement(&mut self) -> Result<Statement<'src>> {
        self.expect_keyword(Keyword::Use)?;
        self.expect_keyword(Keyword::Catalog)?;

        let name = self.expect_identifier()?;

        Ok(Statement::UseCatalog { name })
    }

    fn parse_create_statement(&mut self) -> Result<Statement<'src>> {
        self.expect_keyword(Keyword::Create)?;
        self.expect_keyword(Keyword::Catalog)?;

        let if_not_exists = if self.consume_if(Token::Keyword(Keyword::If)) {
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            true
        } else {
            false
        };

        let name = self.expect_identifier()?;

        self.expect_keyword(Keyword::Type)?;
        let catalog_type = match self.next_token()? {
            Token::Identifier(t) | Token::String(t) => t,
            t => return Err(miette!("Expected a catalog type, found {:?}", t)),
        };

        let properties = if self.consume_if(Token::Keyword(Keyword::With)) {
            self.parse_properties()?
        } else {
            HashMap::new()
        };

        Ok(Statement::CreateCatalog(CreateCatalogStatement {
            name,
            if_not_exists,
            catalog_type,
            properties,
        }))
    }

    // Parses "('key' = 'value', ...)"
    fn parse_properties(&mut self) -> Result<HashMap<String, String>> {
        self.expect_token(Token::LeftParen)?;

        let mut properties = HashMap::new();

        if self.consume_if(Token::RightParen) {
            return Ok(properties);
        }

        // Every comma must be followed by another property.
        loop {
            let key = match self.next_token()? {
                Token::String(key) => key.into_owned(),
                t => return Err(miette!("Expected a quoted property name, found {:?}", t)),
            };

            self.expect_token(Token::Equal)?;

            let value = match self.next_token()? {
                Token::String(value) | Token::Identifier(value) => value.into_owned(),
                Token::Number(value) => value.to_string(),
                t => return Err(miette!("Expected a property value, found {:?}", t)),
            };

            if properties.insert(key.clone(), value).is_some() {
                return Err(miette!("Duplicate property '{}'", key));
            }

            if !self.consume_if(Token::Comma) {
                break;
            }
        }

        self.expect_token(Token::RightParen)?;

        Ok(properties)
    }

    fn parse_drop_statement(&mut self) -> Result<Statement<'src>> {
        self.expect_keyword(Keyword::Drop)?;
        self.expect_keyword(Keyword::Catalog)?;

        let if_exists = if self.consume_if(Token::Keyword(Keyword::If)) {
            self.expect_keyword(Keyword::Exists)?;
            true
        } else {
            false
        };

        let name = self.expect_identifier()?;

        Ok(Statement::DropCatalog { name, if_exists })
    }

    fn parse_show_statement(&mut self) -> Result<Statement<'src>> {
        self.expect_keyword(Keyword::Show)?;

        match self.next_token()? {
            Token::Keyword(Keyword::Catalogs) => Ok(Statement::ShowCatalogs),
            Token::Keyword(Keyword::Current) => {
                self.expect_keyword(Keyword::Catalog)?;
                Ok(Statement::ShowCurrentCatalog)
            }
            Token::Keyword(Keyword::Tables) => {
                let catalog = if self.consume_if(Token::Keyword(Keyword::From)) {
                    Some(self.expect_identifier()?)
                } else {
                    None
                };
                Ok(Statement::ShowTables { catalog })
            }
            t => Err(miette!(
                "Expected CATALOGS, CURRENT CATALOG or TABLES after SHOW, found {:?}",
                t
            )),
        }
    }

    fn next_token(&mut self) -> Result<Token<'src>> {
        self.lexer
            .next()
            .transpose()?
            .ok_or_else(|| miette!("Unexpected end of input"))
    }

    fn expect_token(&mut self, expected: Token<'src>) -> Result<()> {
        let token = self.next_token()?;
        if token == expected {
            Ok(())
        } else {
            Err(miette!("Expected {:?}, found {:?}", expected, token))
        }
    }

    fn peek_token(&mut self) -> Result<&Token<'src>> {
        // Surface the lexer's own diagnostic instead of a generic one.
        if matches!(self.lexer.peek(), Some(Err(_)))
            && let Some(Err(err)) = self.lexer.next()
        {
            return Err(err);
        }

        match self.lexer.peek() {
            Some(Ok(token)) => Ok(token),
            _ => Err(miette!("Unexpected end of input")),
        }
    }

    fn peek_is(&mut self, expected: Token) -> bool {
        matches!(self.lexer.peek(), Some(Ok(token)) if *token == expected)
    }

    fn consume_if(&mut self, expected: Token) -> bool {
        if self.peek_is(expected) {
            self.lexer.next();
            true
        } else {
            false
        }
    }

    fn expect_identifier(&mut self) -> Result<Cow<'src, str>> {
        match self.next_token()? {
            Token::Identifier(ident) => Ok(ident),
            got => Err(miette!("Expected IDENTIFIER, but found {:?}", got)),
        }
    }

    fn expect_keyword(&mut self, expected: Keyword) -> Result<()> {
        match self.next_token()? {
            Token::Keyword(kw) if kw == expected => Ok(()),
            other => Err(miette!("Expected {}, found {:?}", expected, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to parse a statement that is expected to be valid
    fn parse(query: &str) -> Statement<'_> {
        let mut parser = SqlParser::new(query);
        parser.parse().expect("Failed to parse statement")
    }

    fn parse_err(query: &str) -> String {
        let mut parser = SqlParser::new(query);
        parser.parse().unwrap_err().to_string()
    }

    #[test]
    fn test_parse_use_catalog() {
        assert_eq!(
            parse("USE CATALOG prod"),
            Statement::UseCatalog {
                name: Cow::from("prod")
            }
        );
        assert_eq!(
            parse("use catalog \"Prod Lake\";"),
            Statement::UseCatalog {
                name: Cow::from("Prod Lake")
            }
        );
    }

    #[test]
    fn test_parse_create_catalog() {
        match parse("CREATE CATALOG prod TYPE memory WITH ('owner' = 'ops', 'shards' = 4)") {
            Statement::CreateCatalog(CreateCatalogStatement {
                name,
                if_not_exists,
                catalog_type,
                properties,
            }) => {
                assert_eq!(name, Cow::from("prod"));
                assert!(!if_not_exists);
                assert_eq!(catalog_type, Cow::from("memory"));
                assert_eq!(
                    properties,
                    HashMap::from([
                        ("owner".to_string(), "ops".to_string()),
                        ("shards".to_string(), "4".to_string()),
                    ])
                );
            }
            _ => panic!("Expected CREATE CATALOG statement"),
        }
    }

    #[test]
    fn test_parse_create_catalog_if_not_exists() {
        match parse("CREATE CATALOG IF NOT EXISTS lake TYPE 'memory';") {
            Statement::CreateCatalog(create) => {
                assert!(create.if_not_exists);
                assert_eq!(create.catalog_type, Cow::from("memory"));
                assert!(create.properties.is_empty());
            }
            _ => panic!("Expected CREATE CATALOG statement"),
        }
    }

    #[test]
    fn test_parse_create_catalog_empty_properties() {
        match parse("CREATE CATALOG lake TYPE memory WITH ()") {
            Statement::CreateCatalog(create) => assert!(create.properties.is_empty()),
            _ => panic!("Expected CREATE CATALOG statement"),
        }
    }

    #[test]
    fn test_parse_drop_catalog() {
        assert_eq!(
            parse("DROP CATALOG prod"),
            Statement::DropCatalog {
                name: Cow::from("prod"),
                if_exists: false
            }
        );
        assert_eq!(
            parse("drop catalog if exists prod"),
            Statement::DropCatalog {
                name: Cow::from("prod"),
                if_exists: true
            }
        );
    }

    #[test]
    fn test_parse_show() {
        assert_eq!(parse("SHOW CATALOGS"), Statement::ShowCatalogs);
        assert_eq!(parse("show current catalog;"), Statement::ShowCurrentCatalog);
        assert_eq!(parse("SHOW TABLES"), Statement::ShowTables { catalog: None });
        assert_eq!(
            parse("SHOW TABLES FROM prod"),
            Statement::ShowTables {
                catalog: Some(Cow::from("prod"))
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_err("").contains("end of input"));
        assert!(parse_err("USE prod").contains("Expected CATALOG"));
        assert!(parse_err("CREATE CATALOG prod").contains("end of input"));
        assert!(parse_err("USE CATALOG prod extra").contains("trailing"));
        assert!(parse_err("SHOW EVERYTHING").contains("after SHOW"));
        assert!(parse_err("DROP CATALOG IF EXISTS").contains("end of input"));
    }

    #[test]
    fn test_parse_trailing_comma_in_properties() {
        let err = parse_err("CREATE CATALOG p TYPE memory WITH ('a' = '1',)");

        assert!(err.contains("Expected a quoted property name"));
        assert!(parse_err("CREATE CATALOG p TYPE memory WITH (,)").contains("property name"));
    }

    #[test]
    fn test_parse_duplicate_property() {
        let err = parse_err("CREATE CATALOG p TYPE memory WITH ('a' = '1', 'a' = '2')");

        assert!(err.contains("Duplicate property 'a'"));
    }

    #[test]
    fn test_parse_lexer_error_surfaces() {
        let err = parse_err("USE CATALOG 'unterminated");

        assert!(err.contains("Unterminated"));
    }
}
