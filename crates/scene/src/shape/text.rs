use glam::Vec2;
use vellum_core::{Point, Rect};

use crate::style::Style;

/// How text is positioned horizontally relative to its anchor point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A run of text anchored at a baseline point.
///
/// No font stack is loaded for layout, so metrics use a fixed average
/// advance of 0.6 em per character. This keeps bounds and hit-testing
/// deterministic across backends at the cost of exactness for
/// proportional fonts.
#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    pub x: f32,
    pub y: f32,
    pub content: String,
    pub align: TextAlign,
}

/// Average glyph advance as a fraction of the font size.
const AVG_ADVANCE: f32 = 0.6;

impl Text {
    pub fn new(x: f32, y: f32, content: impl Into<String>) -> Self {
        Self {
            x,
            y,
            content: content.into(),
            align: TextAlign::Left,
        }
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Estimated advance width for the run at the style's font size.
    pub fn measure(&self, style: &Style) -> f32 {
        AVG_ADVANCE * style.font_size * self.content.chars().count() as f32
    }

    /// The anchor sits on the baseline; the box extends one font size up.
    pub fn bounding_rect(&self, style: &Style) -> Rect {
        let width = self.measure(style);
        let left = match self.align {
            TextAlign::Left => self.x,
            TextAlign::Center => self.x - width * 0.5,
            TextAlign::Right => self.x - width,
        };
        Rect::from_origin_size(
            Vec2::new(left, self.y - style.font_size),
            Vec2::new(width, style.font_size),
        )
    }

    pub fn contains(&self, p: Point, style: &Style) -> bool {
        if self.content.is_empty() {
            return false;
        }
        self.bounding_rect(style).contains_point(p.to_vec2())
    }
}
