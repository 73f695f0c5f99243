//! Operator semantics. Every function here is total: an operand pair the
//! operator is not defined for yields a fixed fallback instead of an error.

use crate::{
    environment::prelude::{Value, FALSE},
    lexer::prelude::Token,
};

/// `&&` and `||`. Both operands are already evaluated, there is no short circuit.
pub fn eval_logical(operator: &Token, left: &Value, right: &Value) -> Value {
    let (left, right) = (left.as_logical(), right.as_logical());

    match operator {
        Token::And => Value::boolean(left && right),
        _ => Value::boolean(left || right),
    }
}

/// Only same-kind operands compare. Numbers support all six operators,
/// booleans and strings only equality, anything else is false.
pub fn eval_comparison(operator: &Token, left: &Value, right: &Value) -> Value {
    let result = match (left, right) {
        (
            Value::Number { value: left },
            Value::Number { value: right }
        ) => match operator {
            Token::Equal => left == right,
            Token::NotEqual => left != right,
            Token::LessThan => left < right,
            Token::GreaterThan => left > right,
            Token::LessThanOrEqual => left <= right,
            Token::GreaterThanOrEqual => left >= right,
            _ => false,
        },
        (
            Value::Boolean { value: left },
            Value::Boolean { value: right }
        ) => equality(operator, left, right),
        (
            Value::String { value: left },
            Value::String { value: right }
        ) => equality(operator, left, right),
        _ => false,
    };

    Value::boolean(result)
}

fn equality<T: PartialEq + ?Sized>(operator: &Token, left: &T, right: &T) -> bool {
    match operator {
        Token::Equal => left == right,
        Token::NotEqual => left != right,
        _ => false,
    }
}

/// `+` and `-`. Unsupported pairs leave the left operand as it was.
pub fn eval_additive(operator: &Token, left: Value, right: &Value) -> Value {
    match (left, right) {
        (
            Value::Number { value: left },
            Value::Number { value: right }
        ) => match operator {
            Token::Plus => Value::number(left + right),
            _ => Value::number(left - right),
        },
        (
            Value::String { value: mut left },
            Value::String { value: right }
        ) if *operator == Token::Plus => {
            left.push_str(right);
            Value::String { value: left }
        },
        (left, _) => left,
    }
}

/// `*`, `/` and `%` on numbers. Dividing by zero is skipped.
pub fn eval_multiplicative(operator: &Token, left: Value, right: &Value) -> Value {
    match (left, right) {
        (
            Value::Number { value: left },
            Value::Number { value: right }
        ) => match operator {
            Token::Star => Value::number(left * right),
            Token::Slash if *right != 0.0 => Value::number(left / right),
            // f64 `%` has fmod semantics: the sign follows the dividend
            Token::Percent if *right != 0.0 => Value::number(left % right),
            _ => Value::number(left),
        },
        (left, _) => left,
    }
}

pub fn eval_prefix(operator: &Token, value: Value) -> Value {
    match operator {
        Token::Bang => match value {
            Value::Boolean { value } => Value::boolean(!value),
            _ => FALSE,
        },
        Token::Minus => match value {
            Value::Number { value } => Value::number(-value),
            other => other,
        },
        _ => value,
    }
}

/// Indexes an array by a number truncated toward zero. Anything else,
/// including an index out of range, gives back the indexed value itself.
pub fn eval_index(value: Value, index: &Value) -> Value {
    if let (Value::Array { elements }, Value::Number { value: index }) = (&value, index) {
        let idx = *index as i64;

        if idx >= 0 && (idx as usize) < elements.len() {
            return elements[idx as usize].clone();
        }
    }

    value
}
