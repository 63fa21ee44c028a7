//! Single-page document rendering.
//!
//! # Responsibility
//! - Define the `DocumentRenderer` capability consumed by the cat service.
//! - Ship a PDF implementation that writes ordered text lines onto one page.
//!
//! # Invariants
//! - Output buffers are owned by a single render call.
//! - I/O failures are surfaced as `RenderError`, never swallowed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod content;
pub mod pdf;

pub use pdf::{PageLayout, PdfRenderer, PDF_MEDIA_TYPE};

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug)]
pub enum RenderError {
    Io(std::io::Error),
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "document write failed: {err}"),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Renders ordered text lines onto a single page and serializes the result.
pub trait DocumentRenderer {
    /// Lines are drawn top to bottom in slice order.
    fn render_lines(&self, lines: &[String]) -> RenderResult<Vec<u8>>;
}
