use super::token::Token;
use std::fmt::Display;
use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
	pub token: Token,
	pub location: SrcSpan,
	pub line: u32,
}

pub fn str_to_keyword(word: &str) -> Option<Token> {
	Some(match word {
		"let" => Token::Let,
		"fn" => Token::Fn,
		"if" => Token::If,
		"else" => Token::Else,
		"while" => Token::While,
		"for" => Token::For,
		"in" => Token::In,
		"return" => Token::Return,
		"puts" => Token::Puts,
		"true" => Token::True,
		"false" => Token::False,

		_ => return None
	})
}

/// Lexes a whole source string, the result always ends with a single `Eof`.
pub fn tokenize(src: &str) -> Vec<Spanned> {
	Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c))).collect()
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	line: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	input: T,
	finished: bool,
}

impl<T: Iterator<Item = (u32, char)>> Display for Lexer<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f,
			"Lexer {{\n\tposition: {},\n\tline: {},\n\tch: {:?}, next_ch: {:?}\n}}",
			self.position, self.line, self.ch, self.next_ch
		)
	}
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
		let mut lexer = Self {
			position: 0,
			next_position: 0,
			line: 1,
			ch: None,
			next_ch: None,
			input,
			finished: false,
		};

		lexer.next_char();
		lexer.next_char();

		lexer
	}

	pub fn next_token(&mut self) -> Spanned {
		loop {
			let ch = match self.ch {
				Some(ch) => ch,
				None => {
					return Spanned {
						token: Token::Eof,
						location: SrcSpan::from(self.position, self.position),
						line: self.line,
					}
				}
			};

			match ch {
				'/' if self.next_ch == Some('/') => self.skip_comment(),
				'/' => return self.eat_one_char(Token::Slash),
				'+' => return self.eat_one_char(Token::Plus),
				'*' => return self.eat_one_char(Token::Star),
				'%' => return self.eat_one_char(Token::Percent),
				'(' => return self.eat_one_char(Token::LParen),
				')' => return self.eat_one_char(Token::RParen),
				'{' => return self.eat_one_char(Token::LBrace),
				'}' => return self.eat_one_char(Token::RBrace),
				'[' => return self.eat_one_char(Token::LSBracket),
				']' => return self.eat_one_char(Token::RSBracket),
				',' => return self.eat_one_char(Token::Comma),
				';' => return self.eat_one_char(Token::Semicolon),
				':' => return self.eat_one_char(Token::Colon),
				'.' => return self.eat_either('.', Token::DotDot, Token::Dot),
				'-' => return self.eat_either('>', Token::Arrow, Token::Minus),
				'=' => return self.eat_either('=', Token::Equal, Token::Assign),
				'!' => return self.eat_either('=', Token::NotEqual, Token::Bang),
				'<' => return self.eat_either('=', Token::LessThanOrEqual, Token::LessThan),
				'>' => return self.eat_either('=', Token::GreaterThanOrEqual, Token::GreaterThan),
				'&' if self.next_ch == Some('&') => return self.eat_two_chars(Token::And),
				'|' if self.next_ch == Some('|') => return self.eat_two_chars(Token::Or),
				'"' => return self.lex_string(),
				'0'..='9' => return self.lex_number(),
				c if c.is_ascii_alphabetic() || c == '_' => return self.lex_ident(),
				// whitespace and anything unrecognized (a lone `&` or `|`) produce nothing
				_ => {
					self.next_char();
				}
			}
		}
	}

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		let next = match self.input.next() {
			Some((pos, ch)) => {
				self.position = self.next_position;
				self.next_position = pos;

				Some(ch)
			},
			None => {
				self.position = self.next_position;
				self.next_position += self.next_ch.map_or(0, |c| c.len_utf8() as u32);

				None
			}
		};

		if ch == Some('\n') {
			self.line += 1;
		}

		self.ch = self.next_ch;
		self.next_ch = next;

		ch
	}

	fn spanned(&self, token: Token, start: u32, line: u32) -> Spanned {
		Spanned {
			token,
			location: SrcSpan::from(start, self.position),
			line,
		}
	}

	fn eat_one_char(&mut self, token: Token) -> Spanned {
		let (start, line) = (self.position, self.line);
		self.next_char();

		self.spanned(token, start, line)
	}

	fn eat_two_chars(&mut self, token: Token) -> Spanned {
		let (start, line) = (self.position, self.line);
		self.next_char();
		self.next_char();

		self.spanned(token, start, line)
	}

	fn eat_either(&mut self, second: char, pair: Token, single: Token) -> Spanned {
		if self.next_ch == Some(second) {
			self.eat_two_chars(pair)
		} else {
			self.eat_one_char(single)
		}
	}

	fn lex_ident(&mut self) -> Spanned {
		let (start, line) = (self.position, self.line);
		let mut ident = String::new();

		while let Some(ch) = self.ch {
			if !(ch.is_ascii_alphanumeric() || ch == '_') {
				break;
			}
			self.next_char();
			ident.push(ch);
		}

		let token = str_to_keyword(&ident).unwrap_or(Token::Ident(ident));

		self.spanned(token, start, line)
	}

	fn lex_number(&mut self) -> Spanned {
		let (start, line) = (self.position, self.line);
		let mut value = String::new();
		let mut has_period = false;

		loop {
			match self.ch {
				Some(ch) if ch.is_ascii_digit() => {
					self.next_char();
					value.push(ch);
				},
				// `1..5` is a range, `1.` followed by anything but a digit is not a fraction
				Some('.') if !has_period && matches!(self.next_ch, Some(c) if c.is_ascii_digit()) => {
					has_period = true;
					self.next_char();
					value.push('.');
				},
				_ => break
			}
		}

		let number = value.parse::<f64>().unwrap_or_default();

		self.spanned(Token::Number(number), start, line)
	}

	fn lex_string(&mut self) -> Spanned {
		let (start, line) = (self.position, self.line);
		let mut value = String::new();

		self.next_char(); // opening quote

		while let Some(ch) = self.ch {
			if ch == '"' {
				break;
			}

			self.next_char();

			if ch != '\\' {
				value.push(ch);
				continue;
			}

			match self.next_char() {
				Some('n') => value.push('\n'),
				Some('t') => value.push('\t'),
				Some(escaped) => value.push(escaped),
				None => value.push('\\'),
			}
		}

		self.next_char(); // closing quote

		self.spanned(Token::Str(value), start, line)
	}

	fn skip_comment(&mut self) {
		while !matches!(self.ch, Some('\n') | None) {
			self.next_char();
		}
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = Spanned;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		let spanned = self.next_token();

		if spanned.token == Token::Eof {
			self.finished = true;
		}

		Some(spanned)
	}
}
