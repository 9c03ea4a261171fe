//! Tokenizer for SPDX license expressions.

use crate::expr::error::SyntaxError;

/// A single token with its byte offset in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) pos: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// License, license-ref, or exception identifier.
    Ident(String),
    Plus,
    LParen,
    RParen,
    And,
    Or,
    With,
}

impl TokenKind {
    /// The token as it appeared in the input, for error messages.
    pub(crate) fn lexeme(&self) -> &str {
        match self {
            TokenKind::Ident(id) => id,
            TokenKind::Plus => "+",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::With => "WITH",
        }
    }
}

/// Characters allowed inside an identifier. `:` only occurs in
/// `DocumentRef-…:LicenseRef-…` references but is accepted anywhere in an
/// identifier; the parser decides what the identifier means.
fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == ':'
}

/// Split `text` into tokens, discarding whitespace.
///
/// `AND`, `OR`, and `WITH` are keywords only in exactly that casing; any
/// other casing is an ordinary identifier.
pub(crate) fn tokenize(text: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(pos, c)) = chars.peek() {
        if c == ' ' || c == '\t' {
            chars.next();
            continue;
        }

        let kind = match c {
            '(' => {
                chars.next();
                TokenKind::LParen
            }
            ')' => {
                chars.next();
                TokenKind::RParen
            }
            '+' => {
                chars.next();
                TokenKind::Plus
            }
            c if is_ident_char(c) => {
                let mut ident = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if !is_ident_char(c) {
                        break;
                    }
                    ident.push(c);
                    chars.next();
                }
                match ident.as_str() {
                    "AND" => TokenKind::And,
                    "OR" => TokenKind::Or,
                    "WITH" => TokenKind::With,
                    _ => TokenKind::Ident(ident),
                }
            }
            c => {
                return Err(SyntaxError::new(
                    pos,
                    c.to_string(),
                    format!("unexpected character `{c}`"),
                ));
            }
        };

        tokens.push(Token { kind, pos });
    }

    Ok(tokens)
}
