use thiserror::Error;

/// Everything that can go wrong while converting or viewing a sketch.
///
/// Codec failures abort the whole conversion; no partial output file is
/// ever written.
#[derive(Debug, Error)]
pub enum SketchError {
    #[error("not a P5 PGM file (bad magic bytes)")]
    InvalidHeader,

    #[error("invalid image dimension: {0}")]
    InvalidDimension(String),

    #[error("unsupported file extension: {0} (expected .pgm or .sk)")]
    UnsupportedExtension(String),

    #[error("malformed sketch stream: {0}")]
    MalformedStream(String),

    #[error("pixel data ended early: expected {expected} bytes, found {found}")]
    TruncatedImage { expected: usize, found: usize },

    #[error("display error: {0}")]
    Display(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
