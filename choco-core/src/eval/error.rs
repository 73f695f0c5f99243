use crate::{lexer::prelude::Token, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxErrorType {
    /// `if cond` not followed by `{`
    ExpectedBraceAfterCondition,
    /// `for name` not followed by `in`
    ExpectedIn,
    /// `for name in start` not followed by `..`
    ExpectedRange,
    /// `for name in start..end` not followed by `{`
    ExpectedBraceAfterRange,
    /// A token no statement can start with, e.g. a stray `}`.
    UnexpectedToken {
        token: Token,
    },
}

/// A malformed construct. Reporting one abandons the statement it was
/// found in, the rest of the program still runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub error: SyntaxErrorType,
    pub location: SrcSpan,
}

impl SyntaxError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            SyntaxErrorType::ExpectedBraceAfterCondition => ("Expected '{' after if condition", vec![]),
            SyntaxErrorType::ExpectedIn => ("Expected 'in' in for loop", vec![]),
            SyntaxErrorType::ExpectedRange => ("Expected '..' in for loop", vec![]),
            SyntaxErrorType::ExpectedBraceAfterRange => ("Expected '{' after for range", vec![]),
            SyntaxErrorType::UnexpectedToken { token } => {
                let found = match token {
                    Token::Number(_) => "a Number".to_string(),
                    Token::Str(_) => "a String".to_string(),
                    Token::Ident(_) => "an Identifier".to_string(),
                    Token::Eof => "the end of the file".to_string(),
                    _ if token.is_reserved_word() => format!("the keyword `{}`", token.as_literal()),
                    _ => format!("`{}`", token.as_literal())
                };

                ("Unexpected token", vec![format!("Found {found}, which cannot start a statement.")])
            },
        }
    }
}
