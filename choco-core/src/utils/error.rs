use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::eval::prelude::SyntaxError;
use super::diagnostic::{Diagnostic, Label, Location};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("syntax error")]
    Syntax {
        path: PathBuf,
        src: String,
        error: SyntaxError
    },
    #[error("could not open file {}", path.display())]
    StdIo {
        path: PathBuf,
        err: std::io::ErrorKind
    },
    #[error("file {} is not valid UTF-8", path.display())]
    Encoding {
        path: PathBuf
    },
    #[error("could not write program output")]
    Output {
        err: std::io::ErrorKind
    }
}

impl Error {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        self.to_diagnostic().write(buf);
        writeln!(buf).expect("write new line diagnostic");
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Error::Syntax { path, src, error } => {
                let (label, extra) = error.details();

                Diagnostic {
                    title: "Syntax error".into(),
                    text: extra.join("\n"),
                        location: Some(Location {
                        src,
                        path: path.clone(),
                        label: Label {
                            text: Some(label.to_string()),
                            span: error.location,
                        },
                    }),
                }
            },
            Error::StdIo { path, err } => Diagnostic {
                title: format!("Could not open file {}", path.display()),
                text: format!("{err}"),
                location: None,
            },
            Error::Encoding { path } => Diagnostic {
                title: format!("File {} is not valid UTF-8", path.display()),
                text: String::new(),
                location: None,
            },
            Error::Output { err } => Diagnostic {
                title: "Could not write program output".into(),
                text: format!("{err}"),
                location: None,
            }
        }
    }
}
