use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, SetupError>;

/// Error type covering the different failure cases that can occur while the
/// tool loads its settings, parses the setup spreadsheet, talks to the
/// database, or sends credential emails.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Wrapper for IO failures such as reading the configuration or
    /// spreadsheet files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the structured configuration document fails to parse.
    #[error("configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Raised when a legacy settings line does not hold exactly one
    /// `KEY=value` pair, or a setting value has the wrong shape.
    #[error("malformed configuration: {0}")]
    MalformedConfig(String),

    /// Raised when a required settings key is absent.
    #[error("missing configuration key '{0}'")]
    MissingConfigKey(String),

    /// Errors bubbled up from the workbook reader implementation.
    #[error("workbook read error: {0}")]
    Workbook(#[from] calamine::Error),

    /// Errors bubbled up from the delimited-text reader implementation.
    #[error("delimited file read error: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when the spreadsheet filename suffix is not recognised.
    #[error("unsupported spreadsheet format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the spreadsheet lacks a sheet the template requires.
    #[error("spreadsheet is missing sheet '{0}'")]
    MissingSheet(String),

    /// Raised when a sheet lacks a column the template requires.
    #[error("sheet '{sheet}' is missing column '{column}'")]
    MissingColumn { sheet: String, column: String },

    /// Raised when a labelled row is absent from a field/value sheet.
    #[error("sheet '{sheet}' has no '{field}' row")]
    MissingField { sheet: String, field: String },

    /// Errors surfaced from the database driver: failed handshake,
    /// authentication, or statement execution.
    #[error("database error: {0}")]
    Database(#[from] oracle::Error),

    /// Raised when a sender or recipient address fails to parse.
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// Raised when a credential message cannot be assembled.
    #[error("email build error: {0}")]
    Mail(#[from] lettre::error::Error),

    /// Errors surfaced from the SMTP transport: failed handshake,
    /// authentication, or submission.
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Raised after a notification run in which some sends failed.
    #[error("{failed} of {total} credential emails were not delivered")]
    Delivery { failed: usize, total: usize },

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
