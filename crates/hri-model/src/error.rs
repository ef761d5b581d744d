use thiserror::Error;

/// Errors raised while turning an uploaded file into a [`crate::Table`].
///
/// Everything downstream of loading degrades instead of failing; these are
/// the only hard errors the pipeline surfaces to the user.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: {extension:?} (expected .csv, .xlsx or .xls)")]
    UnsupportedExtension { extension: String },
    #[error("could not decode file contents with any supported text encoding")]
    Encoding,
    #[error("unparseable tabular structure: {0}")]
    Parse(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while reading or writing a saved mapping configuration.
///
/// A missing configuration file is not an error; loading reports it as
/// "no previous settings" instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed mapping configuration: {0}")]
    Malformed(#[from] serde_json::Error),
}
