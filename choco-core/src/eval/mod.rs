pub mod error;
pub mod operators;
mod statement;
mod expression;

pub mod prelude {
    pub use super::{
        error::*,
        operators::*,
        Evaluator,
        interpret,
        interpret_from_stream,
    };
}

#[cfg(test)]
mod tests;

use std::{io::{BufReader, ErrorKind, Write}, ops::Range, path::PathBuf, rc::Rc};

use utf8_chars::BufReadCharsExt;

use crate::{
    environment::prelude::{Environment, FunctionTable, Value},
    lexer::prelude::{tokenize, Spanned, Token},
    utils::prelude::{Error, ErrorEmitter, ErrorEmitterIO, SrcSpan},
};
use self::error::{SyntaxError, SyntaxErrorType};

pub(crate) type EvalResult<T> = std::io::Result<T>;

static EOF: Token = Token::Eof;

/// Runs a program straight off its token buffer. Blocks are never turned
/// into a tree: their token ranges are found by counting braces and the
/// cursor is moved back into them whenever they need to run.
pub struct Evaluator<W: Write> {
    tokens: Vec<Spanned>,
    current: usize,
    src: String,

    env: Environment,
    functions: FunctionTable,
    // Some while a `return` is unwinding to the nearest call
    return_value: Option<Value>,

    out: W,
    errors: ErrorEmitter,
}

impl<W: Write> Evaluator<W> {
    pub fn new(out: W, errors: ErrorEmitter) -> Self {
        Self {
            tokens: vec![],
            current: 0,
            src: String::new(),

            env: Environment::new(),
            functions: FunctionTable::new(),
            return_value: None,

            out,
            errors,
        }
    }

    /// Lexes `src`, appends it to the program seen so far and executes it.
    /// Variables and functions from earlier runs stay visible.
    pub fn run(&mut self, src: &str) -> Result<(), Error> {
        let offset = self.src.len() as u32;
        self.src.push_str(src);
        self.src.push('\n');

        if matches!(self.tokens.last(), Some(Spanned { token: Token::Eof, .. })) {
            let _ = self.tokens.pop();
        }

        let start = self.tokens.len();
        self.tokens.extend(tokenize(src).into_iter().map(|mut spanned| {
            spanned.location = spanned.location.shifted(offset);
            spanned
        }));

        self.current = start;
        self.return_value = None;

        self.execute()
            .and_then(|_| self.out.flush())
            .map_err(|err| Error::Output { err: err.kind() })
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn error_count(&self) -> usize {
        self.errors.count()
    }

    fn execute(&mut self) -> EvalResult<()> {
        // a top-level `return` stops the whole program
        while !self.is_at_end() && self.return_value.is_none() {
            self.statement()?;
        }

        Ok(())
    }

    /// Runs the statements in `block` in the current scope. Leaves the
    /// cursor wherever the last statement left it.
    fn execute_block(&mut self, block: Range<usize>) -> EvalResult<()> {
        self.current = block.start;

        while self.current < block.end && !self.is_at_end() && self.return_value.is_none() {
            self.statement()?;
        }

        Ok(())
    }

    /// Index of the `}` closing the block whose contents start at `start`,
    /// or of `Eof` when the braces never balance.
    fn find_block_end(&self, start: usize) -> usize {
        let mut depth = 1;

        for idx in start..self.tokens.len() {
            match self.tokens[idx].token {
                Token::LBrace => depth += 1,
                Token::RBrace => {
                    depth -= 1;
                    if depth == 0 {
                        return idx;
                    }
                },
                _ => {}
            }
        }

        self.tokens.len().saturating_sub(1)
    }

    fn token_at(&self, idx: usize) -> &Token {
        self.tokens.get(idx).map_or(&EOF, |spanned| &spanned.token)
    }

    fn peek(&self) -> &Token {
        self.token_at(self.current)
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        self.current += 1;

        token
    }

    fn matches(&mut self, token: &Token) -> bool {
        if self.peek() == token {
            self.current += 1;
            true
        } else {
            false
        }
    }

    fn is_at_end(&self) -> bool {
        *self.peek() == Token::Eof
    }

    fn location(&self) -> SrcSpan {
        match self.tokens.get(self.current).or(self.tokens.last()) {
            Some(spanned) => spanned.location,
            None => SrcSpan::default(),
        }
    }

    fn error(&self, error: SyntaxErrorType) {
        self.errors.emit(&self.src, SyntaxError {
            error,
            location: self.location(),
        });
    }
}

/// Runs a complete program from a string.
pub fn interpret<W: Write>(src: &str, out: W, errors: ErrorEmitter) -> Result<W, Error> {
    let mut evaluator = Evaluator::new(out, errors);
    evaluator.run(src)?;

    Ok(evaluator.into_output())
}

/// Reads the program at `path` as UTF-8 and runs it, reporting syntax
/// errors through `errors`.
pub fn interpret_from_stream<W: Write>(
    path: PathBuf,
    out: W,
    errors: Rc<dyn ErrorEmitterIO>,
) -> Result<W, Error> {
    let file = std::fs::File::open(&path)
        .map_err(|err| Error::StdIo { path: path.clone(), err: err.kind() })?;

    let mut reader = BufReader::new(file);
    let src = reader.chars()
        .collect::<Result<String, _>>()
        .map_err(|err| match err.kind() {
            ErrorKind::InvalidData => Error::Encoding { path: path.clone() },
            kind => Error::StdIo { path: path.clone(), err: kind },
        })?;

    interpret(&src, out, ErrorEmitter::new(path, errors))
}
