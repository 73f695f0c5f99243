use std::io::Write;

use crate::{
    environment::prelude::{Function, Value},
    lexer::prelude::Token,
};
use super::{error::SyntaxErrorType, EvalResult, Evaluator};

/// Name carried by a token in binding position. Anything other than an
/// identifier binds under its literal text.
fn name_of(token: Token) -> String {
    match token {
        Token::Ident(name) => name,
        other => other.as_literal(),
    }
}

impl<W: Write> Evaluator<W> {
    pub(super) fn statement(&mut self) -> EvalResult<()> {
        if self.return_value.is_some() {
            return Ok(());
        }

        match self.peek().clone() {
            Token::Let => {
                self.advance();
                self.let_statement()
            },
            Token::Fn => {
                self.advance();
                self.function_declaration();
                Ok(())
            },
            Token::Puts => {
                self.advance();
                self.puts_statement()
            },
            Token::If => {
                self.advance();
                self.if_statement()
            },
            Token::While => {
                self.advance();
                self.while_statement()
            },
            Token::For => {
                self.advance();
                self.for_statement()
            },
            Token::Return => {
                self.advance();
                self.return_statement()
            },
            Token::Ident(_) if *self.token_at(self.current + 1) == Token::Assign => {
                self.assignment()
            },
            _ => self.expression_statement(),
        }
    }

    fn let_statement(&mut self) -> EvalResult<()> {
        let name = name_of(self.advance());
        self.matches(&Token::Assign);

        let value = self.expression()?;
        self.env.set(&name, value);

        self.matches(&Token::Semicolon);
        Ok(())
    }

    fn assignment(&mut self) -> EvalResult<()> {
        let name = name_of(self.advance());
        self.advance(); // `=`

        let value = self.expression()?;
        self.env.set(&name, value);

        self.matches(&Token::Semicolon);
        Ok(())
    }

    /// Registers the function and skips its body without running it.
    fn function_declaration(&mut self) {
        let name = name_of(self.advance());
        self.matches(&Token::LParen);

        let mut params = vec![];
        while !self.matches(&Token::RParen) {
            if self.is_at_end() {
                break;
            }

            params.push(name_of(self.advance()));

            if !self.matches(&Token::Comma) {
                self.matches(&Token::RParen);
                break;
            }
        }

        self.matches(&Token::LBrace);

        let start = self.current;
        let end = self.find_block_end(start);

        self.functions.declare(name, Function { params, body: start..end });
        self.current = end + 1;
    }

    fn puts_statement(&mut self) -> EvalResult<()> {
        let value = self.expression()?;
        writeln!(self.out, "{value}")?;

        self.matches(&Token::Semicolon);
        Ok(())
    }

    fn if_statement(&mut self) -> EvalResult<()> {
        let condition = self.expression()?;

        if !self.matches(&Token::LBrace) {
            self.error(SyntaxErrorType::ExpectedBraceAfterCondition);
            return Ok(());
        }

        let then_start = self.current;
        let then_end = self.find_block_end(then_start);

        let else_block = if *self.token_at(then_end + 1) == Token::Else {
            self.current = then_end + 2;

            if *self.peek() == Token::If {
                // `else if`: the nested if statement is the whole else block
                let start = self.current;
                Some(start..self.find_if_end(start) + 1)
            } else {
                self.matches(&Token::LBrace);
                let start = self.current;
                Some(start..self.find_block_end(start))
            }
        } else {
            None
        };

        let after = match &else_block {
            Some(block) if *self.token_at(block.start) == Token::If => block.end,
            Some(block) => block.end + 1,
            None => then_end + 1,
        };

        if condition.is_truthy() {
            self.execute_block(then_start..then_end)?;
        } else if let Some(block) = else_block {
            self.execute_block(block)?;
        }

        self.current = after;
        Ok(())
    }

    /// Index of the last `}` of the if statement starting at `start`,
    /// following any `else` and `else if` clauses.
    fn find_if_end(&self, start: usize) -> usize {
        let mut idx = start;

        loop {
            while !matches!(self.token_at(idx), Token::LBrace | Token::Eof) {
                idx += 1;
            }

            let end = self.find_block_end(idx + 1);

            if *self.token_at(end + 1) != Token::Else {
                return end;
            }

            idx = end + 2;
        }
    }

    fn while_statement(&mut self) -> EvalResult<()> {
        let condition_start = self.current;

        let mut condition = self.expression()?;
        self.matches(&Token::LBrace);

        let body_start = self.current;
        let body_end = self.find_block_end(body_start);

        // a literal `true` is the only thing that keeps the loop going
        while condition.is_true() {
            self.execute_block(body_start..body_end)?;

            if self.return_value.is_some() {
                break;
            }

            self.current = condition_start;
            condition = self.expression()?;
        }

        self.current = body_end + 1;
        Ok(())
    }

    fn for_statement(&mut self) -> EvalResult<()> {
        let name = name_of(self.advance());

        if !self.matches(&Token::In) {
            self.error(SyntaxErrorType::ExpectedIn);
            return Ok(());
        }

        let from = self.expression()?;

        if !self.matches(&Token::DotDot) {
            self.error(SyntaxErrorType::ExpectedRange);
            return Ok(());
        }

        let to = self.expression()?;

        if !self.matches(&Token::LBrace) {
            self.error(SyntaxErrorType::ExpectedBraceAfterRange);
            return Ok(());
        }

        let body_start = self.current;
        let body_end = self.find_block_end(body_start);

        if let (Value::Number { value: from }, Value::Number { value: to }) = (from, to) {
            for i in (from as i64)..(to as i64) {
                if self.return_value.is_some() {
                    break;
                }

                self.env.set(&name, Value::number(i as f64));
                self.execute_block(body_start..body_end)?;
            }
        }

        self.current = body_end + 1;
        Ok(())
    }

    fn return_statement(&mut self) -> EvalResult<()> {
        let value = self.expression()?;
        self.return_value = Some(value);

        self.matches(&Token::Semicolon);
        Ok(())
    }

    fn expression_statement(&mut self) -> EvalResult<()> {
        let start = self.current;

        let _ = self.expression()?;
        self.matches(&Token::Semicolon);

        if self.current == start {
            // nothing could be parsed here, skip the token so the program keeps moving
            let token = self.peek().clone();
            self.error(SyntaxErrorType::UnexpectedToken { token });
            self.current += 1;
        }

        Ok(())
    }
}
