use thiserror::Error;

/// weekgrid error types
#[derive(Error, Debug)]
pub enum WeekgridError {
    /// Malformed or incomplete feed document
    #[error("feed error: {0}")]
    Feed(String),

    /// XML reader failure
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for weekgrid
pub type Result<T> = std::result::Result<T, WeekgridError>;
