//! Dashboard colour tokens
//!
//! Static palette shared by every chart the dashboard renders.

/// A colour scale keyed by shade (100 = lightest, 900 = darkest)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScale(&'static [(u16, &'static str)]);

impl ColorScale {
    /// Hex colour for a shade, if the scale defines it
    pub fn shade(&self, level: u16) -> Option<&'static str> {
        self.0
            .iter()
            .find(|(shade, _)| *shade == level)
            .map(|(_, hex)| *hex)
    }

    /// The scale's middle shade, else its first; black for an empty scale
    pub fn main(&self) -> &'static str {
        self.shade(500)
            .or_else(|| self.0.first().map(|(_, hex)| *hex))
            .unwrap_or("#000000")
    }
}

pub const GREY: ColorScale = ColorScale(&[
    (100, "#f0f0f3"),
    (200, "#e1e2e7"),
    (300, "#d1d3da"),
    (400, "#c2c5ce"),
    (500, "#b3b6c2"),
    (600, "#8f929b"),
    (700, "#6b6d74"),
    (800, "#48494e"),
    (900, "#242427"),
]);

// blue
pub const PRIMARY: ColorScale = ColorScale(&[
    (100, "#dbeafe"),
    (200, "#bfdbfe"),
    (300, "#93c5fd"),
    (400, "#60a5fa"),
    (500, "#3b82f6"),
    (600, "#2563eb"),
    (700, "#1d4ed8"),
    (800, "#1e40af"),
    (900, "#1e3a8a"),
]);

// green
pub const SECONDARY: ColorScale = ColorScale(&[
    (100, "#dcfce7"),
    (200, "#bbf7d0"),
    (300, "#86efac"),
    (400, "#4ade80"),
    (500, "#22c55e"),
    (600, "#16a34a"),
    (700, "#15803d"),
    (800, "#166534"),
    (900, "#14532d"),
]);

// purple
pub const TERTIARY: ColorScale = ColorScale(&[(500, "#8884d8")]);

/// Page background colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background {
    pub light: &'static str,
    pub main: &'static str,
}

pub const BACKGROUND: Background = Background {
    light: "#2d2d34",
    main: "#1f2026",
};

/// Font stack used by every text element
pub const FONT_FAMILY: &str = "Inter,sans-serif";

/// Base font size in px
pub const FONT_SIZE: u32 = 12;
