//! Theme configuration.
//!
//! A theme is opaque pass-through configuration for the embedding chart
//! layer: a cycling series palette plus default colors. Themes load from
//! JSON (colors as CSS-style strings) or are built in code.

use serde::Deserialize;
use vellum_core::{parse_color, Color};

/// JSON shape of a theme file.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeConfig {
    #[serde(default)]
    pub palette: Vec<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    palette: Vec<Color>,
    background: Color,
    text_color: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // The stock series palette.
        let palette = [
            "#5470c6", "#91cc75", "#fac858", "#ee6666", "#73c0de", "#3ba272", "#fc8452",
            "#9a60b4", "#ea7ccc",
        ]
        .iter()
        .filter_map(|s| parse_color(s))
        .collect();
        Self {
            palette,
            background: Color::TRANSPARENT,
            text_color: Color::BLACK,
        }
    }
}

impl Theme {
    /// An empty palette falls back to the stock one, so `color_at` always
    /// has a color to cycle through.
    pub fn new(palette: Vec<Color>, background: Color, text_color: Color) -> Self {
        let palette = if palette.is_empty() {
            Self::default().palette
        } else {
            palette
        };
        Self {
            palette,
            background,
            text_color,
        }
    }

    /// Builds a theme from its JSON config; unparsable colors fall back to
    /// the defaults rather than failing the load.
    pub fn from_config(config: ThemeConfig) -> Self {
        let defaults = Self::default();
        let palette: Vec<Color> = config
            .palette
            .iter()
            .filter_map(|s| parse_color(s))
            .collect();
        Self {
            palette: if palette.is_empty() {
                defaults.palette
            } else {
                palette
            },
            background: config
                .background
                .as_deref()
                .and_then(parse_color)
                .unwrap_or(defaults.background),
            text_color: config
                .text_color
                .as_deref()
                .and_then(parse_color)
                .unwrap_or(defaults.text_color),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::from_config(serde_json::from_str(json)?))
    }

    /// Series color for index `i`, wrapping around the palette.
    pub fn color_at(&self, i: usize) -> Color {
        self.palette[i % self.palette.len()]
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }
}
