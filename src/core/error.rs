use thiserror::Error;

/// Configuration errors raised while building effects for a chapter.
///
/// Runtime failures (missing canvas, blocked audio) are environmental and are
/// logged by the web layer instead of surfacing here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("target interaction count must be at least 1")]
    ZeroTarget,
    #[error("buffer capacity must be at least 1")]
    ZeroCapacity,
    #[error("field palette has no colours")]
    EmptyPalette,
    #[error("phase threshold {0} is outside [0, 1] or out of order")]
    InvalidThreshold(f32),
    #[error("no chapter numbered {0}")]
    UnknownChapter(u32),
}

pub type CoreResult<T> = Result<T, CoreError>;
