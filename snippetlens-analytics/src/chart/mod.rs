//! Chart rendering
//!
//! Turns grouped statistics into PNG images, base64-encoded for embedding.
//! Output is fully deterministic: identical input renders to identical bytes.

pub mod pie;
pub mod renderer;
pub mod surface;

pub use pie::{pie_wedges, PieWedge, PALETTE};
pub use renderer::DistributionChartRenderer;
pub use surface::DrawingSurface;

use ab_glyph::FontRef;
use thiserror::Error;

/// Text shown when there is nothing to chart
pub const EMPTY_CHART_MESSAGE: &str = "No data available";

/// Title drawn above the language pie chart
pub const LANGUAGE_PIE_TITLE: &str = "Programming Language Distribution";

static FONT_DATA: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Rendering failures; these are surfaced to callers, never swallowed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("invalid chart input: {0}")]
    InvalidInput(String),

    #[error("font could not be loaded: {0}")]
    Font(String),

    #[error("image encoding failed: {0}")]
    Encode(String),
}

/// The embedded label font
pub fn load_font() -> Result<FontRef<'static>, RenderError> {
    FontRef::try_from_slice(FONT_DATA).map_err(|e| RenderError::Font(e.to_string()))
}
