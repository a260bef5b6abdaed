//! Path expression parser.
//!
//! Accepts the expression forms the template compiler produces:
//!
//! - `/` and `//` separators
//! - `*`, `.` and key steps (`foo`, `"foo bar"`)
//! - `[ idx == N ]`, `[ value == N ]` and `[ value eq 'S' ]` filters

use super::ast::{Axis, DPath, Filter, Selector, Step};
use super::error::DpathError;

/// Parser for path expression strings.
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given expression.
    pub fn new(expression: &'a str) -> Self {
        Self {
            input: expression,
            position: 0,
        }
    }

    /// Parses the expression into a `DPath`.
    pub fn parse(expression: &str) -> Result<DPath, DpathError> {
        let mut parser = Parser::new(expression);
        parser.parse_path()
    }

    fn parse_path(&mut self) -> Result<DPath, DpathError> {
        let mut steps = Vec::new();

        self.skip_whitespace();
        if self.peek() != Some('/') {
            return Err(DpathError::InvalidSyntax {
                message: "Path must start with '/'".to_string(),
            });
        }

        while !self.is_eof() {
            self.expect('/')?;
            let axis = if self.peek() == Some('/') {
                self.next();
                Axis::DescendantOrSelf
            } else {
                Axis::Child
            };

            // A lone `/` addresses the root.
            if self.is_eof() && steps.is_empty() && axis == Axis::Child {
                break;
            }

            let selector = self.parse_selector()?;
            let filter = if self.peek() == Some('[') {
                Some(self.parse_filter()?)
            } else {
                None
            };
            steps.push(Step {
                axis,
                selector,
                filter,
            });

            match self.peek() {
                None | Some('/') => {}
                Some(ch) => {
                    return Err(DpathError::UnexpectedToken {
                        position: self.position,
                        found: ch.to_string(),
                        expected: "'/' or end of path".to_string(),
                    })
                }
            }
        }

        Ok(DPath::new(steps))
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.next();
            } else {
                break;
            }
        }
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Expects a specific character and advances, or returns an error.
    fn expect(&mut self, expected: char) -> Result<(), DpathError> {
        let pos = self.position;
        match self.next() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(DpathError::UnexpectedToken {
                position: pos,
                found: ch.to_string(),
                expected: format!("'{}'", expected),
            }),
            None => Err(DpathError::UnexpectedEnd {
                expected: format!("'{}'", expected),
            }),
        }
    }

    /// Expects a keyword such as `==` or `eq`.
    fn expect_word(&mut self, word: &str) -> Result<(), DpathError> {
        if self.input[self.position..].starts_with(word) {
            self.position += word.len();
            Ok(())
        } else if self.is_eof() {
            Err(DpathError::UnexpectedEnd {
                expected: format!("'{}'", word),
            })
        } else {
            Err(DpathError::UnexpectedToken {
                position: self.position,
                found: self.peek().map(String::from).unwrap_or_default(),
                expected: format!("'{}'", word),
            })
        }
    }

    fn parse_selector(&mut self) -> Result<Selector, DpathError> {
        match self.peek() {
            Some('*') => {
                self.next();
                Ok(Selector::AnyChild)
            }
            Some('.') => {
                self.next();
                Ok(Selector::Current)
            }
            Some('"') => Ok(Selector::Key(self.parse_quoted()?)),
            Some(_) => Ok(Selector::Key(self.parse_identifier()?)),
            None => Err(DpathError::UnexpectedEnd {
                expected: "path step".to_string(),
            }),
        }
    }

    /// Parses an identifier (key name).
    fn parse_identifier(&mut self) -> Result<String, DpathError> {
        let start = self.position;
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' || ch == '-' {
                self.next();
            } else {
                break;
            }
        }
        if start == self.position {
            Err(DpathError::InvalidSyntax {
                message: format!("Expected key at position {}", start),
            })
        } else {
            Ok(self.input[start..self.position].to_string())
        }
    }

    /// Parses a single- or double-quoted string with backslash escapes.
    fn parse_quoted(&mut self) -> Result<String, DpathError> {
        let quote = match self.next() {
            Some(ch @ ('\'' | '"')) => ch,
            Some(ch) => {
                return Err(DpathError::UnexpectedToken {
                    position: self.position - ch.len_utf8(),
                    found: ch.to_string(),
                    expected: "quoted string".to_string(),
                })
            }
            None => {
                return Err(DpathError::UnexpectedEnd {
                    expected: "quoted string".to_string(),
                })
            }
        };

        let mut value = String::new();
        loop {
            match self.next() {
                Some(ch) if ch == quote => break,
                Some('\\') => match self.next() {
                    Some(escaped) => value.push(escaped),
                    None => {
                        return Err(DpathError::UnexpectedEnd {
                            expected: "escaped character".to_string(),
                        })
                    }
                },
                Some(ch) => value.push(ch),
                None => {
                    return Err(DpathError::UnexpectedEnd {
                        expected: format!("closing quote {}", quote),
                    })
                }
            }
        }
        Ok(value)
    }

    /// Parses `[ idx == N ]`, `[ value == N ]` or `[ value eq 'S' ]`.
    fn parse_filter(&mut self) -> Result<Filter, DpathError> {
        self.expect('[')?;
        self.skip_whitespace();

        let subject = self.parse_identifier()?;
        self.skip_whitespace();

        let filter = match subject.as_str() {
            "idx" => {
                self.expect_word("==")?;
                self.skip_whitespace();
                let number = self.parse_number_string()?;
                let idx = number
                    .parse::<usize>()
                    .map_err(|_| DpathError::InvalidSyntax {
                        message: format!("Invalid index: {}", number),
                    })?;
                Filter::Index(idx)
            }
            "value" if self.peek() == Some('=') => {
                self.expect_word("==")?;
                self.skip_whitespace();
                let number = self.parse_number_string()?;
                let value = number
                    .parse::<f64>()
                    .map_err(|_| DpathError::InvalidSyntax {
                        message: format!("Invalid number: {}", number),
                    })?;
                Filter::NumberEq(value)
            }
            "value" => {
                self.expect_word("eq")?;
                self.skip_whitespace();
                Filter::TextEq(self.parse_quoted()?)
            }
            other => {
                return Err(DpathError::InvalidSyntax {
                    message: format!("Unknown filter subject '{}'", other),
                })
            }
        };

        self.skip_whitespace();
        self.expect(']')?;
        Ok(filter)
    }

    /// Parses a numeric literal as a string.
    fn parse_number_string(&mut self) -> Result<String, DpathError> {
        let start = self.position;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.' | 'e' | 'E') {
                self.next();
            } else {
                break;
            }
        }
        if start == self.position {
            Err(DpathError::InvalidSyntax {
                message: "Expected number".to_string(),
            })
        } else {
            Ok(self.input[start..self.position].to_string())
        }
    }
}
