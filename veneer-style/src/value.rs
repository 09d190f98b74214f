//! # Style Values
//!
//! The property bag carried by every style descriptor.
//!
//! A [PropertyBag] maps well-known string keys (see [keys]) to typed
//! [StyleValue]s. Insertion order is preserved so that a descriptor
//! serializes and logs in the order its author wrote it.

use indexmap::IndexMap;
use veneer_core::color::Rgba;
use veneer_core::geometry::Insets;

/// Well-known property keys used by the built-in styles and painters.
///
/// Skins are free to define additional keys; custom painters read them
/// through [PropertyBag::get].
pub mod keys {
    /// Background fill color ([StyleValue::Color](super::StyleValue::Color)).
    pub const BACKGROUND: &str = "background";
    /// Foreground/text color.
    pub const FOREGROUND: &str = "foreground";
    /// Border line color.
    pub const BORDER_COLOR: &str = "border_color";
    /// Corner rounding radius in pixels ([StyleValue::Float](super::StyleValue::Float)).
    pub const ROUND: &str = "round";
    /// Widget margins ([StyleValue::Insets](super::StyleValue::Insets)).
    pub const MARGIN: &str = "margin";
    /// Widget opacity in `0.0..=1.0`.
    pub const OPACITY: &str = "opacity";
    /// Border line width in pixels.
    pub const BORDER_WIDTH: &str = "border_width";
}

/// A typed style property value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// A color value.
    Color(Rgba),
    /// A float value (radii, opacities).
    Float(f32),
    /// A signed integer value.
    Int(i32),
    /// An unsigned integer value.
    UInt(u32),
    /// A bool value.
    Bool(bool),
    /// A string value.
    Str(String),
    /// A margin 4-tuple.
    Insets(Insets),
}

impl StyleValue {
    /// Get the color value, if this is a color.
    pub fn as_color(&self) -> Option<Rgba> {
        match self {
            StyleValue::Color(color) => Some(*color),
            _ => None,
        }
    }

    /// Get the float value, if this is a float.
    pub fn as_float(&self) -> Option<f32> {
        match self {
            StyleValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the int value, if this is an int.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            StyleValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the unsigned int value, if this is an unsigned int.
    pub fn as_uint(&self) -> Option<u32> {
        match self {
            StyleValue::UInt(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the bool value, if this is a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StyleValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Get the insets value, if this is an insets 4-tuple.
    pub fn as_insets(&self) -> Option<Insets> {
        match self {
            StyleValue::Insets(insets) => Some(*insets),
            _ => None,
        }
    }
}

/// An ordered map of style properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag {
    map: IndexMap<String, StyleValue>,
}

impl PropertyBag {
    /// Create a new empty property bag.
    pub fn new() -> Self {
        Self {
            map: IndexMap::with_capacity(8),
        }
    }

    /// Create a property bag from key-value pairs.
    pub fn from_values(values: impl IntoIterator<Item = (String, StyleValue)>) -> Self {
        Self {
            map: IndexMap::from_iter(values),
        }
    }

    /// Set a property value by key.
    pub fn set(&mut self, key: impl ToString, value: StyleValue) {
        self.map.insert(key.to_string(), value);
    }

    /// Set a color property by key.
    pub fn set_color(&mut self, key: impl ToString, color: Rgba) {
        self.set(key, StyleValue::Color(color));
    }

    /// Set a float property by key.
    pub fn set_float(&mut self, key: impl ToString, value: f32) {
        self.set(key, StyleValue::Float(value));
    }

    /// Set an insets property by key.
    pub fn set_insets(&mut self, key: impl ToString, insets: Insets) {
        self.set(key, StyleValue::Insets(insets));
    }

    /// Get a property value by key.
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.map.get(key)
    }

    /// Get a color property by key.
    pub fn get_color(&self, key: &str) -> Option<Rgba> {
        self.get(key).and_then(StyleValue::as_color)
    }

    /// Get a float property by key.
    pub fn get_float(&self, key: &str) -> Option<f32> {
        self.get(key).and_then(StyleValue::as_float)
    }

    /// Get a bool property by key.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(StyleValue::as_bool)
    }

    /// Get a string property by key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(StyleValue::as_str)
    }

    /// Get an insets property by key.
    pub fn get_insets(&self, key: &str) -> Option<Insets> {
        self.get(key).and_then(StyleValue::as_insets)
    }

    /// Check if a property exists.
    pub fn has(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Number of properties in the bag.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over properties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge another bag into this one; values from `other` win on
    /// key collisions.
    pub fn merge(&mut self, other: &PropertyBag) {
        for (key, value) in &other.map {
            self.map.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_access_rejects_wrong_type() {
        let mut bag = PropertyBag::new();
        bag.set_float(keys::ROUND, 4.0);
        assert_eq!(bag.get_float(keys::ROUND), Some(4.0));
        assert_eq!(bag.get_color(keys::ROUND), None);
    }

    #[test]
    fn merge_prefers_other() {
        let mut base = PropertyBag::new();
        base.set_float(keys::ROUND, 2.0);
        base.set_color(keys::BACKGROUND, Rgba::WHITE);

        let mut overlay = PropertyBag::new();
        overlay.set_float(keys::ROUND, 6.0);

        base.merge(&overlay);
        assert_eq!(base.get_float(keys::ROUND), Some(6.0));
        assert_eq!(base.get_color(keys::BACKGROUND), Some(Rgba::WHITE));
    }
}
