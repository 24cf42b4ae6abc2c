//! Everything drawn on top of the filtered frame.
//!
//! The compositor only ever reads the session. In preview mode the frame
//! becomes a side-by-side original/filtered comparison and the legend is
//! suppressed; in normal mode the legend is drawn expanded or minimized.
//! The status label is drawn in both modes.

pub mod draw;
pub mod glyph;
pub mod legend;
pub mod preview;
pub mod status;

use crate::FilterSession;
use derivative::Derivative;
use derive_setters::Setters;
use image::{Rgba, RgbaImage, imageops::FilterType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendMode {
    Expanded,
    Minimized,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayMode {
    Preview {
        message: String,
        border_intensity: f32,
    },
    Normal {
        legend: LegendMode,
    },
}

/// What a render is going to draw, decided from session state alone.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayPlan {
    pub status: String,
    pub mode: OverlayMode,
}

#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct OverlayConfig {
    /// Menu border, divider and readout border color
    #[derivative(Default(value = "Rgba([255, 255, 0, 255])"))]
    pub accent_color: Rgba<u8>,

    /// Weight of the dark menu fill over the frame
    #[derivative(Default(value = "0.85"))]
    pub panel_opacity: f32,

    /// Sampling filter for the half-width preview halves
    #[derivative(Default(value = "FilterType::Triangle"))]
    pub resize_filter: FilterType,

    #[derivative(Default(value = "true"))]
    pub show_status: bool,
}

#[derive(Debug, Clone, Default)]
pub struct OverlayCompositor {
    config: OverlayConfig,
}

impl OverlayCompositor {
    pub fn new(config: OverlayConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn plan(&self, session: &FilterSession) -> OverlayPlan {
        let preview = session.preview();

        let mode = match preview.message() {
            Some(message) => OverlayMode::Preview {
                message: message.to_string(),
                border_intensity: preview.fade(),
            },
            None => OverlayMode::Normal {
                legend: if session.legend_visible() {
                    LegendMode::Expanded
                } else {
                    LegendMode::Minimized
                },
            },
        };

        OverlayPlan {
            status: session.status_text(),
            mode,
        }
    }

    /// Compose the displayed frame. Neither input is modified.
    pub fn render(
        &self,
        original: &RgbaImage,
        filtered: &RgbaImage,
        session: &FilterSession,
    ) -> RgbaImage {
        let plan = self.plan(session);

        let mut canvas = match &plan.mode {
            OverlayMode::Preview {
                message,
                border_intensity,
            } => preview::side_by_side(
                original,
                filtered,
                message,
                *border_intensity,
                &self.config,
            ),
            OverlayMode::Normal { .. } => filtered.clone(),
        };

        if self.config.show_status {
            status::draw_status(&mut canvas, &plan.status);
        }

        match plan.mode {
            OverlayMode::Normal {
                legend: LegendMode::Expanded,
            } => legend::draw_expanded(&mut canvas, &self.config),
            OverlayMode::Normal {
                legend: LegendMode::Minimized,
            } => legend::draw_minimized(&mut canvas, &self.config),
            OverlayMode::Preview { .. } => {}
        }

        canvas
    }
}
