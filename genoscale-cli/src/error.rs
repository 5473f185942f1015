//! Error handling for the GenoScale CLI

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("No chromosome sizes file given")]
    MissingSizes,

    #[error("Parsing error in {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Cannot interpret {text:?} in assembly {assembly}")]
    InvalidInterval { text: String, assembly: String },

    #[error("Position {position} is outside assembly {assembly}")]
    OutOfGenome { position: f64, assembly: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn parse<S: Into<String>>(file: S, message: S) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn invalid_interval<S: Into<String>>(text: S, assembly: S) -> Self {
        Self::InvalidInterval {
            text: text.into(),
            assembly: assembly.into(),
        }
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        Self::config(format!("TOML serialization error: {}", err))
    }
}

pub type CliResult<T> = Result<T, CliError>;

pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Gzipped sizes files must end in .gz",
                path.display()
            ));
        }

        CliError::MissingSizes => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Pass --sizes <file> with a <name><TAB><size> table\n\
                 • Or set `sizes` under [general] in genoscale.toml",
            );
        }

        CliError::InvalidInterval { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Use chr, chr:pos, chr:start-end or chr:start-chr:end\n\
                 • Positions are one-based and may contain commas\n\
                 • Run 'genoscale info' to list the known chromosomes",
            );
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your genoscale.toml configuration file\n\
                 • Use 'genoscale config --example' to generate a sample configuration",
            );
        }

        _ => {}
    }

    message
}

pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}
