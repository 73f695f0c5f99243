use std::fmt::Display;

pub const TRUE: Value = Value::Boolean { value: true };
pub const FALSE: Value = Value::Boolean { value: false };
pub const NIL: Value = Value::Nil;

/// Runtime value. Arrays own their elements, so cloning a value copies
/// the whole array and no two bindings ever share contents.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Number {
        value: f64,
    },
    String {
        value: String,
    },
    Boolean {
        value: bool
    },
    Array {
        elements: Vec<Value>,
    },
    #[default]
    Nil,
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number { value } => write!(f, "{}", format_number(*value)),
            Value::String { value } => write!(f, "{value}"),
            Value::Boolean { value } => write!(f, "{value}"),
            Value::Array { elements } => {
                let rendered = elements.iter()
                    .map(|element| element.to_string())
                    .collect::<Vec<String>>()
                    .join(", ");

                write!(f, "[{rendered}]")
            },
            Value::Nil => write!(f, "nil"),
        }
    }
}

/// Integral values print without a fraction, everything else with six
/// decimals and the trailing zeros cut off.
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        // -0 prints as 0
        return format!("{}", value + 0.0);
    }

    let fixed = format!("{value:.6}");

    if !fixed.contains('.') {
        return fixed;
    }

    fixed.trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

impl Value {
    pub fn number(value: f64) -> Self {
        Value::Number { value }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Value::String { value: value.into() }
    }

    pub fn boolean(value: bool) -> Self {
        Value::Boolean { value }
    }

    pub fn array(elements: Vec<Value>) -> Self {
        Value::Array { elements }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Number { .. } => ValueType::Number,
            Self::String { .. } => ValueType::String,
            Self::Boolean { .. } => ValueType::Boolean,
            Self::Array { .. } => ValueType::Array,
            Self::Nil => ValueType::Nil,
        }
    }

    /// Condition of an `if`. Arrays and nil are falsy whatever they hold.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Boolean { value } => *value,
            Self::Number { value } => *value != 0.0,
            Self::String { value } => !value.is_empty(),
            Self::Array { .. } | Self::Nil => false,
        }
    }

    /// Operand of `&&` and `||`. Only booleans and numbers can be true.
    pub fn as_logical(&self) -> bool {
        match self {
            Self::Boolean { value } => *value,
            Self::Number { value } => *value != 0.0,
            _ => false,
        }
    }

    /// Condition of a `while`: nothing but a literal `true` keeps it going.
    pub fn is_true(&self) -> bool {
        *self == TRUE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Number,
    String,
    Boolean,
    Array,
    Nil,
}
