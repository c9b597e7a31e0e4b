use thiserror::Error;

/// Errors raised by the raster core.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RasterError {
    /// The grid cannot be built from the requested cell size and extent.
    #[error("invalid grid configuration: {0}")]
    Configuration(String),

    /// The sum field was queried before `finalize_sum` ran on the current batch.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    #[error("grid shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

/// A single point could not be mapped into the projected system.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("cannot project point ({latitude}, {longitude}): {reason}")]
pub struct ProjectionError {
    pub latitude: f64,
    pub longitude: f64,
    pub reason: &'static str,
}

/// Errors while decoding an IGC flight log.
#[derive(Debug, Error)]
pub enum IgcError {
    #[error("I/O error while reading track: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed B record on line {line}: {reason}")]
    MalformedFix { line: usize, reason: &'static str },
}

/// Errors from the file encoders.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("bitmap drawing failed: {0}")]
    Draw(String),

    #[error("pixel buffer of {len} bytes does not match a {width}x{height} image")]
    BufferSize { len: usize, width: u32, height: u32 },
}
