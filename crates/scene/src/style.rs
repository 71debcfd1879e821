//! Visual style for scene elements.

use vellum_core::Color;

/// Fill/stroke/opacity style shared by every shape node.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    /// Fill color; `None` leaves the interior unpainted.
    pub fill: Option<Color>,
    /// Stroke color; `None` leaves the outline unpainted.
    pub stroke: Option<Color>,
    pub stroke_width: f32,
    /// Element opacity in [0, 1], multiplied into both paints.
    pub opacity: f32,
    /// Dash pattern (on/off lengths); `None` strokes solid.
    pub line_dash: Option<Vec<f32>>,
    /// Font size for text nodes.
    pub font_size: f32,
    pub font_family: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: Some(Color::BLACK),
            stroke_width: 2.0,
            opacity: 1.0,
            line_dash: None,
            font_size: 12.0,
            font_family: "sans-serif".into(),
        }
    }
}

impl Style {
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            ..Self::default()
        }
    }

    pub fn stroked(color: Color, width: f32) -> Self {
        Self {
            stroke: Some(color),
            stroke_width: width,
            ..Self::default()
        }
    }

    /// Half the stroke width when a stroke is set; what bounds grow by.
    pub fn stroke_padding(&self) -> f32 {
        if self.stroke.is_some() && self.stroke_width > 0.0 {
            self.stroke_width * 0.5
        } else {
            0.0
        }
    }
}

/// A partial style update. Fields left `None` are untouched; replacing the
/// whole record goes through `Element::set_style`.
#[derive(Clone, Debug, Default)]
pub struct StylePatch {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: Option<f32>,
    pub opacity: Option<f32>,
    pub line_dash: Option<Vec<f32>>,
    pub font_size: Option<f32>,
    pub font_family: Option<String>,
}

impl StylePatch {
    pub fn apply_to(self, style: &mut Style) {
        if let Some(fill) = self.fill {
            style.fill = Some(fill);
        }
        if let Some(stroke) = self.stroke {
            style.stroke = Some(stroke);
        }
        if let Some(width) = self.stroke_width {
            style.stroke_width = width;
        }
        if let Some(opacity) = self.opacity {
            style.opacity = opacity.clamp(0.0, 1.0);
        }
        if let Some(dash) = self.line_dash {
            style.line_dash = Some(dash);
        }
        if let Some(size) = self.font_size {
            style.font_size = size;
        }
        if let Some(family) = self.font_family {
            style.font_family = family;
        }
    }
}
