//! Error types for postlist

use thiserror::Error;

/// Result type alias for postlist operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while serving the listing
#[derive(Error, Debug)]
pub enum Error {
    /// Store unreachable or credentials rejected.
    ///
    /// This is the only error recovered per request: the handler
    /// renders a short error page instead of running any queries.
    #[error("Connection error: {0}")]
    Connection(String),

    /// MySQL driver error during query execution
    #[error("MySQL error: {0}")]
    MySql(#[from] mysql_async::Error),

    /// A fetched row did not match the expected column shape
    #[error("Failed to decode row: {0}")]
    RowDecode(String),

    /// Template rendering error
    #[error("Render error: {0}")]
    Render(String),

    /// Configuration load or validation error
    #[error("Config error: {0}")]
    Config(String),
}
