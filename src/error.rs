use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the particle store, the collision engine and the driver.
///
/// Every variant is a precondition violation detected at the call that caused it.
/// Nothing is retried; the driver stops at the first error it sees.
#[derive(Debug, Error)]
pub enum Error {
    /// A position or velocity vector does not have exactly two components.
    #[error("invalid dimension: {what} has {len} components, expected 2")]
    InvalidDimension { what: &'static str, len: usize },

    /// Particle index outside the collection.
    #[error("particle index {index} out of range for {len} particles")]
    IndexOutOfRange { index: usize, len: usize },

    /// Time step is not a finite positive number.
    #[error("invalid time step: dt = {0} (must be finite and > 0)")]
    InvalidTimeStep(f64),

    /// Box extent is empty or inverted on an axis.
    #[error("invalid bounds on {axis} axis: min = {min}, max = {max}")]
    InvalidBounds { axis: char, min: f64, max: f64 },

    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Configuration file could not be parsed.
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Propagated I/O errors (reading configuration files).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
