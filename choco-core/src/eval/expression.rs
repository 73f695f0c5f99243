use std::io::Write;

use crate::{
    environment::prelude::{Value, FALSE, NIL, TRUE},
    lexer::prelude::Token,
};
use super::{
    operators::{eval_additive, eval_comparison, eval_index, eval_logical, eval_multiplicative, eval_prefix},
    EvalResult,
    Evaluator,
};

impl<W: Write> Evaluator<W> {
    pub(super) fn expression(&mut self) -> EvalResult<Value> {
        self.logical_or()
    }

    fn logical_or(&mut self) -> EvalResult<Value> {
        let mut left = self.logical_and()?;

        while self.matches(&Token::Or) {
            let right = self.logical_and()?;
            left = eval_logical(&Token::Or, &left, &right);
        }

        Ok(left)
    }

    fn logical_and(&mut self) -> EvalResult<Value> {
        let mut left = self.comparison()?;

        while self.matches(&Token::And) {
            let right = self.comparison()?;
            left = eval_logical(&Token::And, &left, &right);
        }

        Ok(left)
    }

    fn comparison(&mut self) -> EvalResult<Value> {
        let mut left = self.additive()?;

        while self.peek().is_comparison() {
            let operator = self.advance();
            let right = self.additive()?;
            left = eval_comparison(&operator, &left, &right);
        }

        Ok(left)
    }

    fn additive(&mut self) -> EvalResult<Value> {
        let mut left = self.multiplicative()?;

        while matches!(self.peek(), Token::Plus | Token::Minus) {
            let operator = self.advance();
            let right = self.multiplicative()?;
            left = eval_additive(&operator, left, &right);
        }

        Ok(left)
    }

    fn multiplicative(&mut self) -> EvalResult<Value> {
        let mut left = self.unary()?;

        while matches!(self.peek(), Token::Star | Token::Slash | Token::Percent) {
            let operator = self.advance();
            let right = self.unary()?;
            left = eval_multiplicative(&operator, left, &right);
        }

        Ok(left)
    }

    fn unary(&mut self) -> EvalResult<Value> {
        if matches!(self.peek(), Token::Bang | Token::Minus) {
            let operator = self.advance();
            let value = self.unary()?;

            return Ok(eval_prefix(&operator, value));
        }

        self.postfix()
    }

    /// Calls and indexing, any number of them in any order.
    fn postfix(&mut self) -> EvalResult<Value> {
        let mut value = self.primary()?;

        loop {
            if self.matches(&Token::LParen) {
                let args = self.arguments(&Token::RParen)?;

                value = match value {
                    Value::String { value: name } if self.functions.contains(&name) => {
                        self.call_function(&name, args)?
                    },
                    // not callable, the arguments are thrown away
                    other => other,
                };
            } else if self.matches(&Token::LSBracket) {
                let index = self.expression()?;
                self.matches(&Token::RSBracket);

                value = eval_index(value, &index);
            } else {
                break;
            }
        }

        Ok(value)
    }

    /// Comma separated expressions up to `close`, which is consumed.
    fn arguments(&mut self, close: &Token) -> EvalResult<Vec<Value>> {
        let mut values = vec![];

        while !self.matches(close) {
            if self.is_at_end() {
                break;
            }

            values.push(self.expression()?);

            if !self.matches(&Token::Comma) {
                self.matches(close);
                break;
            }
        }

        Ok(values)
    }

    fn call_function(&mut self, name: &str, args: Vec<Value>) -> EvalResult<Value> {
        let function = match self.functions.get(name) {
            Some(function) => function.clone(),
            None => return Ok(NIL),
        };

        self.env.push_scope();

        // extra arguments are dropped, missing ones leave the parameter unbound
        for (param, arg) in function.params.iter().zip(args) {
            self.env.declare(param, arg);
        }

        let saved = self.current;
        let result = self.execute_block(function.body);
        let value = self.return_value.take().unwrap_or_default();

        self.env.pop_scope();
        self.current = saved;

        result.map(|_| value)
    }

    fn primary(&mut self) -> EvalResult<Value> {
        let value = match self.peek().clone() {
            Token::Number(value) => Value::number(value),
            Token::Str(text) => Value::string(self.interpolate(&text)),
            Token::True => TRUE,
            Token::False => FALSE,
            Token::Ident(name) => {
                if self.functions.contains(&name) {
                    Value::string(name)
                } else {
                    self.env.get(&name)
                }
            },
            Token::LSBracket => {
                self.advance();
                return Ok(Value::array(self.arguments(&Token::RSBracket)?));
            },
            Token::LParen => {
                self.advance();
                let value = self.expression()?;
                self.matches(&Token::RParen);

                return Ok(value);
            },
            // nothing to consume, the caller decides what to do with that
            _ => return Ok(NIL),
        };

        self.advance();
        Ok(value)
    }

    /// Replaces every `#{name}` with the current value of `name`. Names are
    /// taken verbatim up to the first `}`, no expressions and no nesting.
    fn interpolate(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find("#{") {
            let after = &rest[start + 2..];

            let end = match after.find('}') {
                Some(end) => end,
                None => break,
            };

            result.push_str(&rest[..start]);
            result.push_str(&self.env.get(&after[..end]).to_string());
            rest = &after[end + 1..];
        }

        result.push_str(rest);
        result
    }
}
