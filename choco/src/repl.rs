use std::{io::Write, path::PathBuf, rc::Rc};

use choco_core::{eval::prelude::Evaluator, utils::prelude::ErrorEmitter};

use crate::cli::{print_error, ConsoleErrorEmitter};

const PROMPT: &str = ">> ";

/// Every line runs against the same evaluator, so variables and functions
/// declared on earlier lines stay available.
pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();
	let errors = ErrorEmitter::new(PathBuf::from("<repl>"), Rc::new(ConsoleErrorEmitter));
	let mut evaluator = Evaluator::new(std::io::stdout(), errors);

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
				if let Err(err) = evaluator.run(line) {
					print_error(&err);
				}
			}
		}
	}
}
