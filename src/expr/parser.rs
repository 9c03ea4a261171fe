//! Recursive descent parser for SPDX license expressions.
//!
//! Grammar (left-recursion eliminated, both operators left-associative):
//!
//! ```text
//! expr     := or_expr
//! or_expr  := and_expr ( "OR" and_expr )*
//! and_expr := with_expr ( "AND" with_expr )*
//! with_expr:= primary ( "WITH" IDENT )?
//! primary  := "(" expr ")" | IDENT [ "+" ]
//! ```

use crate::expr::error::SyntaxError;
use crate::expr::lexer::{tokenize, Token, TokenKind};
use crate::expr::{Expr, LicenseId};

/// Returns `true` for user-defined license references, which bypass catalog
/// validation: `LicenseRef-…` or `DocumentRef-…:LicenseRef-…`.
fn is_license_ref(id: &str) -> bool {
    id.starts_with("LicenseRef-")
        || (id.starts_with("DocumentRef-") && id.contains(":LicenseRef-"))
}

/// Parse `text` into an expression tree without validating identifiers.
pub(crate) fn parse_expression(text: &str) -> Result<Expr, SyntaxError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(SyntaxError::new(0, "", "empty expression"));
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        end: text.len(),
    };
    let expr = parser.parse_or()?;

    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(SyntaxError::new(
            token.pos,
            token.kind.lexeme(),
            format!("unexpected token `{}` after expression", token.kind.lexeme()),
        )),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Byte length of the input, reported as the position of end-of-input
    /// errors.
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eof_error(&self, message: &str) -> SyntaxError {
        SyntaxError::new(self.end, "", message)
    }

    /// Parse an OR-level expression (lowest precedence).
    fn parse_or(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.parse_and()?;
        while matches!(self.peek(), Some(t) if t.kind == TokenKind::Or) {
            self.consume();
            let right = self.parse_and()?;
            expr = expr.or(right);
        }
        Ok(expr)
    }

    /// Parse an AND-level expression (binds tighter than OR).
    fn parse_and(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.parse_with()?;
        while matches!(self.peek(), Some(t) if t.kind == TokenKind::And) {
            self.consume();
            let right = self.parse_with()?;
            expr = expr.and(right);
        }
        Ok(expr)
    }

    /// Parse a primary with an optional `WITH <exception>` suffix.
    ///
    /// `WITH` takes a single license identifier as its left operand; a
    /// parenthesised group or a license reference there is a syntax error.
    fn parse_with(&mut self) -> Result<Expr, SyntaxError> {
        let expr = self.parse_primary()?;

        let with_pos = match self.peek() {
            Some(t) if t.kind == TokenKind::With => t.pos,
            _ => return Ok(expr),
        };

        let Expr::License(license) = expr else {
            return Err(SyntaxError::new(
                with_pos,
                "WITH",
                "`WITH` must follow a single license identifier",
            ));
        };
        self.consume();

        match self.consume() {
            Some(Token {
                kind: TokenKind::Ident(exception),
                ..
            }) => Ok(license.with_exception(exception)),
            Some(token) => Err(SyntaxError::new(
                token.pos,
                token.kind.lexeme(),
                "expected exception identifier after `WITH`",
            )),
            None => Err(self.eof_error("expected exception identifier after `WITH`")),
        }
    }

    /// Parse a parenthesised sub-expression or a single identifier with an
    /// optional adjacent `+`.
    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        let token = match self.consume() {
            Some(token) => token,
            None => return Err(self.eof_error("unexpected end of input")),
        };

        match token.kind {
            TokenKind::LParen => {
                let expr = self.parse_or()?;
                match self.consume() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => Ok(expr),
                    Some(token) => Err(SyntaxError::new(
                        token.pos,
                        token.kind.lexeme(),
                        "expected `)`",
                    )),
                    None => Err(self.eof_error("expected `)`")),
                }
            }
            TokenKind::Ident(id) => self.finish_ident(id, token.pos),
            kind => Err(SyntaxError::new(
                token.pos,
                kind.lexeme(),
                format!("unexpected token `{}`", kind.lexeme()),
            )),
        }
    }

    fn finish_ident(&mut self, id: String, pos: usize) -> Result<Expr, SyntaxError> {
        let mut or_later = false;
        if let Some(plus) = self.peek().filter(|t| t.kind == TokenKind::Plus) {
            if plus.pos != pos + id.len() {
                return Err(SyntaxError::new(
                    plus.pos,
                    "+",
                    "`+` must immediately follow a license identifier",
                ));
            }
            if is_license_ref(&id) {
                return Err(SyntaxError::new(
                    plus.pos,
                    "+",
                    "`+` is not allowed on a license reference",
                ));
            }
            self.consume();
            or_later = true;
        }

        if is_license_ref(&id) {
            return Ok(Expr::Ref(id));
        }
        if id.contains(':') {
            // `:` only occurs in document references.
            return Err(SyntaxError::new(
                pos,
                id.as_str(),
                format!("malformed document reference `{id}`"),
            ));
        }
        Ok(Expr::License(LicenseId { id, or_later }))
    }
}
