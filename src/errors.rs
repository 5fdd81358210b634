//! Errors

/// Errors reported by the rasterizer and its fillers
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("No pixel buffer attached to the rasterizer")]
    MissingBuffer,

    #[error("Paint mismatch: filler expects {expected} paint, got {found}")]
    PaintMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("Invalid state: cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    #[error("Invalid polygon: {0}")]
    InvalidPolygon(String),

    #[error("Invalid buffer: {0}")]
    InvalidBuffer(String),

    #[error("Transform is not invertible")]
    NonInvertibleTransform,

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
