//! Pie chart geometry

use super::surface::{DrawingSurface, TextAlign, TEXT_COLOR};
use super::RenderError;
use image::Rgba;
use snippetlens_core::LanguageDistribution;

/// Wedge colors, assigned in distribution order and cycled past the end
pub const PALETTE: [Rgba<u8>; 7] = [
    Rgba([0xFF, 0x6B, 0x6B, 0xFF]), // #FF6B6B
    Rgba([0x4E, 0xCD, 0xC4, 0xFF]), // #4ECDC4
    Rgba([0x45, 0xB7, 0xD1, 0xFF]), // #45B7D1
    Rgba([0x96, 0xCE, 0xB4, 0xFF]), // #96CEB4
    Rgba([0xFE, 0xCA, 0x57, 0xFF]), // #FECA57
    Rgba([0xFF, 0x9F, 0xF3, 0xFF]), // #FF9FF3
    Rgba([0x54, 0xA0, 0xFF, 0xFF]), // #54A0FF
];

/// Angle of the first wedge's leading edge, degrees counter-clockwise
/// from the positive x axis
pub const START_ANGLE_DEG: f64 = 90.0;

/// Label for the group of snippets without a language
pub const UNKNOWN_LANGUAGE_LABEL: &str = "Unknown";

const LABEL_RADIUS_FACTOR: f64 = 1.1;
const PERCENT_RADIUS_FACTOR: f64 = 0.6;

/// One slice of the pie
#[derive(Debug, Clone, PartialEq)]
pub struct PieWedge {
    pub label: String,
    pub count: u64,
    /// Share of the total, 0-100
    pub percentage: f64,
    /// `percentage` with one decimal place and a percent sign
    pub percentage_label: String,
    pub color: Rgba<u8>,
    /// Leading edge, degrees counter-clockwise from the positive x axis
    pub start_deg: f64,
    /// Trailing edge; always greater than `start_deg`
    pub end_deg: f64,
}

impl PieWedge {
    pub fn mid_deg(&self) -> f64 {
        (self.start_deg + self.end_deg) / 2.0
    }
}

/// Lay out one wedge per distribution entry, in distribution order.
///
/// Fails on an empty distribution or a zero count; callers render the
/// empty-state chart for empty input before getting here.
pub fn pie_wedges(distribution: &LanguageDistribution) -> Result<Vec<PieWedge>, RenderError> {
    if distribution.is_empty() {
        return Err(RenderError::InvalidInput(
            "cannot lay out a pie chart with no wedges".to_string(),
        ));
    }
    if let Some(zero) = distribution.iter().find(|entry| entry.count == 0) {
        return Err(RenderError::InvalidInput(format!(
            "language {:?} has a zero count",
            zero.language
        )));
    }

    let total = distribution.total() as f64;
    let mut cumulative = 0u64;

    Ok(distribution
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let start_fraction = cumulative as f64 / total;
            cumulative += entry.count;
            let end_fraction = cumulative as f64 / total;
            let percentage = 100.0 * entry.count as f64 / total;

            PieWedge {
                label: entry
                    .language
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_LANGUAGE_LABEL.to_string()),
                count: entry.count,
                percentage,
                percentage_label: format!("{:.1}%", percentage),
                color: PALETTE[i % PALETTE.len()],
                start_deg: START_ANGLE_DEG + 360.0 * start_fraction,
                end_deg: START_ANGLE_DEG + 360.0 * end_fraction,
            }
        })
        .collect())
}

/// Fill the disc centred on (`cx`, `cy`) with the wedges and draw their
/// labels
pub fn draw_pie(
    surface: &mut DrawingSurface,
    wedges: &[PieWedge],
    cx: f64,
    cy: f64,
    radius: f64,
    label_size: f32,
    percent_size: f32,
) {
    let Some(last) = wedges.last() else {
        return;
    };

    let x_min = (cx - radius).floor().max(0.0) as u32;
    let x_max = (cx + radius).ceil().min(surface.width() as f64) as u32;
    let y_min = (cy - radius).floor().max(0.0) as u32;
    let y_max = (cy + radius).ceil().min(surface.height() as f64) as u32;
    let radius_sq = radius * radius;

    for y in y_min..y_max {
        for x in x_min..x_max {
            let dx = x as f64 + 0.5 - cx;
            // Image rows grow downwards, angles grow counter-clockwise
            let dy = cy - (y as f64 + 0.5);
            if dx * dx + dy * dy > radius_sq {
                continue;
            }

            let offset = (dy.atan2(dx).to_degrees() - START_ANGLE_DEG).rem_euclid(360.0);
            let angle = START_ANGLE_DEG + offset;
            let wedge = wedges.iter().find(|w| angle < w.end_deg).unwrap_or(last);
            surface.put_pixel(x, y, wedge.color);
        }
    }

    for wedge in wedges {
        let mid = wedge.mid_deg().to_radians();
        let (sin, cos) = mid.sin_cos();

        let label_x = cx + LABEL_RADIUS_FACTOR * radius * cos;
        let label_y = cy - LABEL_RADIUS_FACTOR * radius * sin;
        let align = if cos < 0.0 {
            TextAlign::Right
        } else {
            TextAlign::Left
        };
        surface.draw_text(
            &wedge.label,
            label_x as f32,
            label_y as f32,
            label_size,
            align,
            TEXT_COLOR,
        );

        let percent_x = cx + PERCENT_RADIUS_FACTOR * radius * cos;
        let percent_y = cy - PERCENT_RADIUS_FACTOR * radius * sin;
        surface.draw_text(
            &wedge.percentage_label,
            percent_x as f32,
            percent_y as f32,
            percent_size,
            TextAlign::Center,
            TEXT_COLOR,
        );
    }
}
