mod cli;
mod repl;
mod rlpl;

use std::{path::PathBuf, rc::Rc, time::Instant};

use clap::Parser;
use cli::{print_error, print_finished, print_interrupted, print_running, ConsoleErrorEmitter};
use choco_core::eval::prelude::interpret_from_stream;

#[derive(Parser)]
#[command(name = "choco", version, about = "Interpreter for the choco scripting language")]
enum Command {
    /// Runs a program
    Run {
        /// Path of source file
        path: PathBuf,
        /// Print status lines on stderr
        #[arg(short, long, default_value_t = false)]
        verbose: bool,
    },
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Eval Print Loop
    Repl,
}

fn main() {
    let command = match Command::try_parse() {
        Ok(command) => command,
        Err(err) => {
            let _ = err.print();
            // --help and --version are not failures
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    let _ = ctrlc::set_handler(|| {
        print_interrupted();
        std::process::exit(130);
    });

    let code = match command {
        Command::Run { path, verbose } => run(path, verbose),
        Command::Rlpl => exit_code(rlpl::start()),
        Command::Repl => exit_code(repl::start()),
    };

    std::process::exit(code);
}

fn run(path: PathBuf, verbose: bool) -> i32 {
    if verbose {
        print_running(&path.display().to_string());
    }

    let start = Instant::now();

    match interpret_from_stream(path, std::io::stdout(), Rc::new(ConsoleErrorEmitter)) {
        Ok(_) => {
            if verbose {
                print_finished(start.elapsed());
            }

            0
        },
        Err(err) => {
            print_error(&err);

            1
        }
    }
}

fn exit_code(result: std::io::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");

            1
        }
    }
}
