use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::fmt;

/// Output representation requested for the converted document
#[derive(ValueEnum, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Html,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::Json => "json",
        };
        f.write_str(s)
    }
}

/// Verbosity of the diagnostics written to stderr
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Convert a document and print a JSON envelope describing the result
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Path to the document to convert
    pub file_path: String,

    /// Output format of the converted content
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Diagnostics level for stderr logging. RUST_LOG takes precedence when set.
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,
}

impl Cli {
    pub fn request(&self) -> ConversionRequest {
        ConversionRequest {
            file_path: self.file_path.clone(),
            format: self.format,
        }
    }
}

/// One conversion to perform, built once per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub file_path: String,
    pub format: OutputFormat,
}

impl ConversionRequest {
    pub fn new(file_path: impl Into<String>, format: OutputFormat) -> Self {
        Self {
            file_path: file_path.into(),
            format,
        }
    }
}

/// Install the stderr logger. Stdout is reserved for the result envelope.
pub fn init_logging(level: LogLevel) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level.filter());
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    builder.target(env_logger::Target::Stderr);
    builder.init();
}
