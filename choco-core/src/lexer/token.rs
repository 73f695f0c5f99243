#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    Number(f64),
    // raw text, `#{name}` placeholders are kept for the evaluator
    Str(String),

    // Keywords
    Let,
    Fn,
    If,
    Else,
    While,
    For,
    In,
    Return,
    Puts,
    True,
    False,

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Comparison
    Assign,
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,

    // Logic
    And,
    Or,
    Bang,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LSBracket,
    RSBracket,
    Comma,
    Semicolon,
    Colon,
    Arrow,
    Dot,
    DotDot,

    Eof,
}

impl Token {
    pub fn is_reserved_word(&self) -> bool {
        matches!(
            self,
            Token::Let
                | Token::Fn
                | Token::If
                | Token::Else
                | Token::While
                | Token::For
                | Token::In
                | Token::Return
                | Token::Puts
                | Token::True
                | Token::False
        )
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Token::Equal
                | Token::NotEqual
                | Token::LessThan
                | Token::GreaterThan
                | Token::LessThanOrEqual
                | Token::GreaterThanOrEqual
        )
    }

    pub fn as_literal(&self) -> String {
        match self {
            Token::Ident(value) => value.clone(),
            Token::Number(value) => format!("{}", value),
            Token::Str(value) => format!("\"{}\"", value),

            Token::Let => "let".to_string(),
            Token::Fn => "fn".to_string(),
            Token::If => "if".to_string(),
            Token::Else => "else".to_string(),
            Token::While => "while".to_string(),
            Token::For => "for".to_string(),
            Token::In => "in".to_string(),
            Token::Return => "return".to_string(),
            Token::Puts => "puts".to_string(),
            Token::True => "true".to_string(),
            Token::False => "false".to_string(),

            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Percent => "%".to_string(),

            Token::Assign => "=".to_string(),
            Token::Equal => "==".to_string(),
            Token::NotEqual => "!=".to_string(),
            Token::LessThan => "<".to_string(),
            Token::GreaterThan => ">".to_string(),
            Token::LessThanOrEqual => "<=".to_string(),
            Token::GreaterThanOrEqual => ">=".to_string(),

            Token::And => "&&".to_string(),
            Token::Or => "||".to_string(),
            Token::Bang => "!".to_string(),

            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::LBrace => "{".to_string(),
            Token::RBrace => "}".to_string(),
            Token::LSBracket => "[".to_string(),
            Token::RSBracket => "]".to_string(),
            Token::Comma => ",".to_string(),
            Token::Semicolon => ";".to_string(),
            Token::Colon => ":".to_string(),
            Token::Arrow => "->".to_string(),
            Token::Dot => ".".to_string(),
            Token::DotDot => "..".to_string(),

            Token::Eof => "\0".to_string(),
        }
    }
}
