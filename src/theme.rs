//! Design tokens.
//!
//! The palette, spacing scale and type scale are built once and shared
//! read-only through [`THEME`]. Renderers take a `&Theme` rather than
//! reaching for globals, so tests can build their own.

use std::fmt;

use lazy_static::lazy_static;
use serde::Serialize;
use thiserror::Error;

lazy_static! {
    /// The theme used by the application.
    pub static ref THEME: Theme = Theme::standard();
}

#[derive(Debug, Error, PartialEq)]
#[error("invalid color {0:?}, expected #rrggbb")]
pub struct InvalidColor(pub String);

/// An opaque sRGB color.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Parses `#rrggbb`.
    pub fn from_hex(hex: &str) -> Result<Self, InvalidColor> {
        let invalid = || InvalidColor(hex.to_owned());

        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());

        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Relative luminance, per WCAG 2.
    pub fn luminance(self) -> f64 {
        fn linear(c: u8) -> f64 {
            let c = f64::from(c) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    /// WCAG contrast ratio between two colors, from 1 to 21.
    pub fn contrast(self, other: Color) -> f64 {
        let (a, b) = (self.luminance(), other.luminance());
        let (light, dark) = if a > b { (a, b) } else { (b, a) };

        (light + 0.05) / (dark + 0.05)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Palette {
    pub primary: Color,
    pub accent: Color,
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub muted_text: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

/// Spacing steps in points.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Spacing {
    pub xs: f32,
    pub sm: f32,
    pub md: f32,
    pub lg: f32,
    pub xl: f32,
}

/// Font sizes in points. Body text never goes below
/// [`MIN_BODY_SIZE`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypeScale {
    pub caption: f32,
    pub body: f32,
    pub subtitle: f32,
    pub title: f32,
    pub heading: f32,
}

pub const MIN_BODY_SIZE: f32 = 18.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Theme {
    pub palette: Palette,
    pub spacing: Spacing,
    pub type_scale: TypeScale,

    /// Corner radius for cards and modals.
    pub radius: f32,

    /// Smallest tappable size, in points.
    pub min_touch_target: f32,
}

impl Theme {
    pub fn standard() -> Self {
        Theme {
            palette: Palette {
                primary: Color::rgb(0x8b, 0x1e, 0x3f),
                accent: Color::rgb(0xd9, 0x77, 0x06),
                background: Color::rgb(0xff, 0xfb, 0xf5),
                surface: Color::rgb(0xff, 0xff, 0xff),
                text: Color::rgb(0x1f, 0x29, 0x37),
                muted_text: Color::rgb(0x4b, 0x55, 0x63),
                success: Color::rgb(0x15, 0x80, 0x3d),
                warning: Color::rgb(0xb4, 0x53, 0x09),
                error: Color::rgb(0xb9, 0x1c, 0x1c),
            },
            spacing: Spacing {
                xs: 4.0,
                sm: 8.0,
                md: 16.0,
                lg: 24.0,
                xl: 32.0,
            },
            type_scale: TypeScale {
                caption: 16.0,
                body: MIN_BODY_SIZE,
                subtitle: 20.0,
                title: 24.0,
                heading: 30.0,
            },
            radius: 16.0,
            min_touch_target: 48.0,
        }
    }
}
