//! Color parsing and blending.
//!
//! Parses color strings in the formats chart configs actually use
//! (hex, `rgb()`/`rgba()`, `hsl()`/`hsla()`, a small named set) and blends
//! in linear space via `palette`.

use palette::{FromColor, Hsla, LinSrgba, Mix, Srgba};

/// An sRGB color with straight (non-premultiplied) alpha.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color(pub Srgba<f32>);

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self(Srgba::new(r, g, b, a))
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    pub fn red(&self) -> f32 {
        self.0.red
    }

    pub fn green(&self) -> f32 {
        self.0.green
    }

    pub fn blue(&self) -> f32 {
        self.0.blue
    }

    pub fn alpha(&self) -> f32 {
        self.0.alpha
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self(Srgba::new(self.0.red, self.0.green, self.0.blue, alpha))
    }

    /// Multiplies the existing alpha, for element-level opacity.
    pub fn scale_alpha(self, factor: f32) -> Self {
        self.with_alpha((self.0.alpha * factor).clamp(0.0, 1.0))
    }

    /// Linear-space interpolation between two colors, `t` in [0, 1].
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let a: LinSrgba<f32> = self.0.into_linear();
        let b: LinSrgba<f32> = other.0.into_linear();
        Self(Srgba::from_linear(a.mix(b, t.clamp(0.0, 1.0))))
    }

    /// Quantized 8-bit channels, straight alpha.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q: Srgba<u8> = self.0.into_format();
        [q.red, q.green, q.blue, q.alpha]
    }
}

/// Parse a color string.
///
/// Supports:
/// - Hex: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` (with or without `#`)
/// - `rgb(r, g, b)` / `rgba(r, g, b, a)` with 0-255 or percentage components
/// - `hsl(h, s%, l%)` / `hsla(h, s%, l%, a)`
/// - Named colors: black, white, red, green, blue, yellow, cyan, magenta,
///   gray/grey, transparent
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();

    if value.eq_ignore_ascii_case("transparent") {
        return Some(Color::TRANSPARENT);
    }

    if let Some(color) = parse_hex_color(value) {
        return Some(color);
    }

    if value.starts_with("rgb") {
        return parse_rgb_color(value);
    }

    if value.starts_with("hsl") {
        return parse_hsl_color(value);
    }

    match value.to_lowercase().as_str() {
        "black" => Some(Color::BLACK),
        "white" => Some(Color::WHITE),
        "red" => Some(Color::rgb(1.0, 0.0, 0.0)),
        "green" => Some(Color::rgb(0.0, 0.5, 0.0)),
        "blue" => Some(Color::rgb(0.0, 0.0, 1.0)),
        "yellow" => Some(Color::rgb(1.0, 1.0, 0.0)),
        "cyan" => Some(Color::rgb(0.0, 1.0, 1.0)),
        "magenta" => Some(Color::rgb(1.0, 0.0, 1.0)),
        "gray" | "grey" => Some(Color::rgb(0.5, 0.5, 0.5)),
        _ => None,
    }
}

fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = if let Some(stripped) = value.strip_prefix('#') {
        stripped
    } else if value.chars().all(|c| c.is_ascii_hexdigit()) && !value.is_empty() {
        value
    } else {
        return None;
    };

    let channel = |s: &str| -> Option<f32> {
        Some(u8::from_str_radix(s, 16).ok()? as f32 / 255.0)
    };
    let nibble = |s: &str| -> Option<f32> {
        Some(u8::from_str_radix(&s.repeat(2), 16).ok()? as f32 / 255.0)
    };

    match hex.len() {
        3 => Some(Color::rgb(
            nibble(&hex[0..1])?,
            nibble(&hex[1..2])?,
            nibble(&hex[2..3])?,
        )),
        4 => Some(Color::rgba(
            nibble(&hex[0..1])?,
            nibble(&hex[1..2])?,
            nibble(&hex[2..3])?,
            nibble(&hex[3..4])?,
        )),
        6 => Some(Color::rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        8 => Some(Color::rgba(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            channel(&hex[6..8])?,
        )),
        _ => None,
    }
}

fn parse_rgb_color(value: &str) -> Option<Color> {
    let components = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))?
        .strip_suffix(')')?;

    let parts: Vec<&str> = components.split(',').collect();
    if parts.len() < 3 {
        return None;
    }

    let r = parse_rgb_component(parts[0])?;
    let g = parse_rgb_component(parts[1])?;
    let b = parse_rgb_component(parts[2])?;
    let a = if parts.len() > 3 {
        parts[3].trim().parse::<f32>().ok()?
    } else {
        1.0
    };

    Some(Color::rgba(r, g, b, a.clamp(0.0, 1.0)))
}

fn parse_hsl_color(value: &str) -> Option<Color> {
    let content = value
        .strip_prefix("hsla(")
        .or_else(|| value.strip_prefix("hsl("))?
        .strip_suffix(')')?;

    let parts: Vec<&str> = content.split(',').collect();
    if parts.len() < 3 {
        return None;
    }

    let h = parts[0].trim().parse::<f32>().ok()?;
    let s = parse_percentage(parts[1])?;
    let l = parse_percentage(parts[2])?;
    let a = if parts.len() > 3 {
        parts[3].trim().parse::<f32>().ok()?
    } else {
        1.0
    };

    let hsla = Hsla::new(h, s.clamp(0.0, 1.0), l.clamp(0.0, 1.0), a.clamp(0.0, 1.0));
    Some(Color(Srgba::from_color(hsla)))
}

/// Parses a value that may carry a `%` suffix into the 0-1 range.
fn parse_percentage(value: &str) -> Option<f32> {
    let value = value.trim();
    let numeric = value.strip_suffix('%').unwrap_or(value);
    numeric.parse::<f32>().ok().map(|v| v / 100.0)
}

/// A single RGB component: 0-255 number or percentage.
fn parse_rgb_component(value: &str) -> Option<f32> {
    let value = value.trim();
    if let Some(stripped) = value.strip_suffix('%') {
        stripped.parse::<f32>().ok().map(|v| v / 100.0)
    } else {
        value.parse::<u8>().ok().map(|v| v as f32 / 255.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_parse_hex_formats() {
        let red = parse_color("#ff0000").unwrap();
        assert_eq!(red, Color::rgb(1.0, 0.0, 0.0));

        let short = parse_color("#f00").unwrap();
        assert_eq!(short, red);

        let with_alpha = parse_color("#ff000080").unwrap();
        assert!(close(with_alpha.alpha(), 128.0 / 255.0));

        let no_hash = parse_color("00ff00").unwrap();
        assert_eq!(no_hash, Color::rgb(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_parse_rgb_and_rgba() {
        let c = parse_color("rgb(255, 0, 0)").unwrap();
        assert_eq!(c, Color::rgb(1.0, 0.0, 0.0));

        let c = parse_color("rgba(0, 0, 255, 0.5)").unwrap();
        assert!(close(c.alpha(), 0.5));

        let c = parse_color("rgb(100%, 0%, 0%)").unwrap();
        assert_eq!(c, Color::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_parse_hsl() {
        let c = parse_color("hsl(0, 100%, 50%)").unwrap();
        assert!(close(c.red(), 1.0));
        assert!(close(c.green(), 0.0));

        let c = parse_color("hsla(240, 100%, 50%, 0.25)").unwrap();
        assert!(close(c.blue(), 1.0));
        assert!(close(c.alpha(), 0.25));
    }

    #[test]
    fn test_parse_named_and_transparent() {
        assert_eq!(parse_color("black").unwrap(), Color::BLACK);
        assert_eq!(parse_color(" WHITE ").unwrap(), Color::WHITE);
        assert!(close(parse_color("transparent").unwrap().alpha(), 0.0));
        assert!(parse_color("not-a-color").is_none());
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Color::BLACK;
        let b = Color::WHITE;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        let mid = a.lerp(b, 0.5);
        assert!(mid.red() > 0.0 && mid.red() < 1.0);
    }

    #[test]
    fn test_to_rgba8() {
        assert_eq!(Color::rgb(1.0, 0.0, 0.0).to_rgba8(), [255, 0, 0, 255]);
    }
}
