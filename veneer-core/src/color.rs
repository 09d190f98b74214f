//! An 8-bit RGBA color with a `#rrggbb[aa]` hex serde representation.
//!
//! Skin documents declare colors as hex strings; this module owns the
//! codec in both directions.

use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An 8-bit-per-channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 = fully opaque.
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::from_rgb8(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::from_rgb8(255, 255, 255);
    /// Fully transparent.
    pub const TRANSPARENT: Rgba = Rgba::from_rgba8(0, 0, 0, 0);

    /// Create an opaque color from red, green and blue channels.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from red, green, blue and alpha channels.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Format this color as a `#rrggbb` or `#rrggbbaa` hex string.
    ///
    /// The alpha component is omitted when the color is fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Parse a color from a `#rrggbb` or `#rrggbbaa` hex string.
    /// The leading `#` is optional.
    pub fn parse_hex(hex: &str) -> Result<Self, String> {
        let hex = hex.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| "invalid hex color".to_string())
        };
        if hex.len() == 6 {
            Ok(Rgba::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
        } else if hex.len() == 8 {
            Ok(Rgba::from_rgba8(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            ))
        } else {
            Err("hex color must be 6 or 8 characters".to_string())
        }
    }
}

impl Display for Rgba {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Rgba {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        Rgba::parse_hex(&hex).map_err(DeError::custom)
    }
}
