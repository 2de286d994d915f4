use std::{borrow::Cow, str::FromStr};

use miette::{LabeledSpan, Result, miette};

use crate::sql::parser::Keyword;

#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    Keyword(Keyword),
    /// A bare word, or a double-quoted name with `""` unescaped.
    Identifier(Cow<'a, str>),
    /// A single-quoted literal with `''` unescaped.
    String(Cow<'a, str>),
    Number(&'a str),

    Comma,
    SemiColon,
    Equal,

    LeftParen,
    RightParen,
}

pub(crate) struct Lexer<'a> {
    pub whole: &'a str,
    pub rest: &'a str,
    pub position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            whole: input,
            rest: input,
            position: 0,
        }
    }

    fn advance(&mut self, len: usize) -> &'a str {
        let consumed = &self.rest[..len];
        self.position += len;
        self.rest = &self.rest[len..];
        consumed
    }

    fn skip_whitespace(&mut self) {
        let non_whitespace_pos = self
            .rest
            .char_indices()
            .find(|(_, ch)| !ch.is_whitespace())
            .map(|(pos, _)| pos)
            .unwrap_or(self.rest.len());

        self.advance(non_whitespace_pos);
    }

    fn consume_word(&mut self) -> &'a str {
        let word_end = self
            .rest
            .find(|c: char| !c.is_alphanumeric() && c != '_')
            .unwrap_or(self.rest.len());

        self.advance(word_end)
    }

    fn consume_number(&mut self) -> &'a str {
        let number_end = self
            .rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(self.rest.len());

        self.advance(number_end)
    }

    /// Consumes a quoted run, treating a doubled quote as an escaped one.
    fn consume_quoted(&mut self, quote: char) -> Result<Cow<'a, str>> {
        let start = self.position;
        let body = &self.rest[quote.len_utf8()..];

        let mut escaped = false;
        let mut chars = body.char_indices().peekable();
        while let Some((idx, ch)) = chars.next() {
            if ch != quote {
                continue;
            }

            if chars.peek().is_some_and(|(_, next)| *next == quote) {
                chars.next();
                escaped = true;
                continue;
            }

            let raw = &body[..idx];
            self.advance(quote.len_utf8() * 2 + idx);

            let doubled = format!("{quote}{quote}");
            return Ok(if escaped {
                Cow::Owned(raw.replace(&doubled, &quote.to_string()))
            } else {
                Cow::Borrowed(raw)
            });
        }

        Err(miette!(
            labels = vec![LabeledSpan::at(start..self.whole.len(), "opened here")],
            "Unterminated quoted text starting at position {}",
            start
        ))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();

        let char = self.rest.chars().next()?;

        let token = match char {
            ',' => {
                self.advance(1);
                Ok(Token::Comma)
            }
            ';' => {
                self.advance(1);
                Ok(Token::SemiColon)
            }
            '=' => {
                self.advance(1);
                Ok(Token::Equal)
            }
            '(' => {
                self.advance(1);
                Ok(Token::LeftParen)
            }
            ')' => {
                self.advance(1);
                Ok(Token::RightParen)
            }
            '\'' => self.consume_quoted('\'').map(Token::String),
            '"' => self.consume_quoted('"').map(Token::Identifier),
            _ if char.is_ascii_digit() => Ok(Token::Number(self.consume_number())),
            _ if char.is_alphabetic() || char == '_' => {
                let word = self.consume_word();

                match Keyword::from_str(word) {
                    Ok(keyword) => Ok(Token::Keyword(keyword)),
                    Err(_) => Ok(Token::Identifier(Cow::Borrowed(word))),
                }
            }
            _ => {
                let position = self.position;
                // Skip the character so iteration can make progress.
                self.advance(char.len_utf8());
                Err(miette!(
                    labels = vec![LabeledSpan::at_offset(position, "here")],
                    "Unexpected character '{}' at position {}",
                    char,
                    position
                ))
            }
        };

        Some(token)
    }
}
