//! Distribution chart renderer

use super::pie::{draw_pie, pie_wedges};
use super::surface::{DrawingSurface, TextAlign, TEXT_COLOR};
use super::{load_font, RenderError, EMPTY_CHART_MESSAGE, LANGUAGE_PIE_TITLE};
use ab_glyph::FontRef;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use snippetlens_core::{
    performance::measure_sync, ChartArtifact, ChartKind, LanguageDistribution,
};
use tracing::debug;

const PIE_WIDTH: u32 = 1000;
const PIE_HEIGHT: u32 = 800;
const EMPTY_WIDTH: u32 = 1000;
const EMPTY_HEIGHT: u32 = 600;

const TITLE_SIZE: f32 = 32.0;
const LABEL_SIZE: f32 = 22.0;
const PERCENT_SIZE: f32 = 20.0;
const MESSAGE_SIZE: f32 = 28.0;

/// Renders language distributions as PNG pie charts
#[derive(Clone)]
pub struct DistributionChartRenderer {
    font: FontRef<'static>,
}

impl DistributionChartRenderer {
    pub fn new() -> Result<Self, RenderError> {
        Ok(Self { font: load_font()? })
    }

    /// Render the language pie chart as a base64 PNG artifact
    pub fn render_language_pie(
        &self,
        distribution: &LanguageDistribution,
    ) -> Result<ChartArtifact, RenderError> {
        let png = measure_sync("render_language_pie", || {
            self.render_language_pie_png(distribution)
        })?;
        Ok(ChartArtifact::new(ChartKind::LanguagePie, STANDARD.encode(png)))
    }

    /// Render the language pie chart as raw PNG bytes.
    ///
    /// An empty distribution renders the "No data available" placeholder.
    pub fn render_language_pie_png(
        &self,
        distribution: &LanguageDistribution,
    ) -> Result<Vec<u8>, RenderError> {
        if distribution.is_empty() {
            debug!("Empty distribution, rendering placeholder chart");
            return self.render_message(EMPTY_CHART_MESSAGE);
        }

        let wedges = pie_wedges(distribution)?;
        debug!("Rendering language pie with {} wedges", wedges.len());

        let mut surface = DrawingSurface::new(PIE_WIDTH, PIE_HEIGHT, self.font.clone());

        let cx = f64::from(PIE_WIDTH) / 2.0;
        let cy = 430.0;
        let radius = 280.0;
        draw_pie(&mut surface, &wedges, cx, cy, radius, LABEL_SIZE, PERCENT_SIZE);

        surface.draw_text(
            LANGUAGE_PIE_TITLE,
            cx as f32,
            40.0,
            TITLE_SIZE,
            TextAlign::Center,
            TEXT_COLOR,
        );

        surface.into_png()
    }

    /// A blank chart carrying only a centred message
    fn render_message(&self, message: &str) -> Result<Vec<u8>, RenderError> {
        let mut surface = DrawingSurface::new(EMPTY_WIDTH, EMPTY_HEIGHT, self.font.clone());
        surface.draw_text(
            message,
            EMPTY_WIDTH as f32 / 2.0,
            EMPTY_HEIGHT as f32 / 2.0,
            MESSAGE_SIZE,
            TextAlign::Center,
            TEXT_COLOR,
        );
        surface.into_png()
    }
}
