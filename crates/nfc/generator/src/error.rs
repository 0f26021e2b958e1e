//! Error types for generator selection

/// Result type for generator selection
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when a generator cannot be resolved
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Numeric identifier outside the generator table
    #[error("Invalid generator id: {0}")]
    InvalidGeneratorId(u8),

    /// Name matching no generator
    #[error("Unknown generator: {0}")]
    UnknownGenerator(String),
}
