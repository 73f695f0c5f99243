use std::io::Write;

use choco_core::lexer::prelude::{tokenize, Token};

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		match input.trim_end_matches(['\n', '\r']) {
			"" => {},
			".exit" => return Ok(()),
			line => {
				for spanned in tokenize(line) {
					if spanned.token == Token::Eof {
						break;
					}

					println!("[{}] {:?} `{}`", spanned.location, spanned.token, spanned.token.as_literal());
				}
			}
		}
	}
}
