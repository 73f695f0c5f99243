use std::{
    io::{IsTerminal, Write},
    time::Duration,
};
use choco_core::utils::prelude::{Error, ErrorEmitterIO};
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

pub(crate) fn print_running(text: &str) {
    print_colourful_prefix("Running", Color::Green, text)
}

pub(crate) fn print_finished(duration: Duration) {
    print_colourful_prefix("Finished", Color::Green, &format!("in {}", seconds(duration)))
}

pub(crate) fn print_interrupted() {
    print_colourful_prefix("Interrupted", Color::Yellow, "by Ctrl-C")
}

pub fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_millis() as f32 / 1000.)
}

pub fn print_colourful_prefix(prefix: &str, color: Color, text: &str) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();
    buffer
        .set_color(
            ColorSpec::new()
                .set_intense(true)
                .set_bold(true)
                .set_fg(Some(color)),
        )
        .expect("print_colourful_prefix");
    write!(buffer, "{prefix: >11}").expect("print_colourful_prefix");
    buffer
        .set_color(&ColorSpec::new())
        .expect("print_colourful_prefix");
    writeln!(buffer, " {text}").expect("print_colourful_prefix");
    buffer_writer.print(&buffer).expect("print_colourful_prefix");
}

/// Pretty prints an error with its source snippet on stderr.
pub fn print_error(error: &Error) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();
    error.pretty(&mut buffer);
    buffer_writer
        .print(&buffer)
        .expect("Writing error to stderr");
}

pub fn stderr_buffer_writer() -> BufferWriter {
    BufferWriter::stderr(color_choice())
}

fn colour_forced() -> bool {
    std::env::var("FORCE_COLOR").is_ok_and(|force| !force.is_empty())
}

fn color_choice() -> ColorChoice {
    if colour_forced() {
        ColorChoice::Always
    } else if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConsoleErrorEmitter;

impl ErrorEmitterIO for ConsoleErrorEmitter {
    fn emit_error(&self, error: Error) {
        print_error(&error);
    }
}
