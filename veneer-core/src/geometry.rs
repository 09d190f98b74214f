//! Margin/border geometry for widget decoration.

use serde::{Deserialize, Serialize};

/// Margins around a widget, in device-independent pixels.
///
/// Serializes as a `[top, right, bottom, left]` 4-tuple, the form skin
/// documents use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct Insets {
    /// Top margin.
    pub top: i32,
    /// Right margin.
    pub right: i32,
    /// Bottom margin.
    pub bottom: i32,
    /// Left margin.
    pub left: i32,
}

impl Insets {
    /// Create insets from all four sides.
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create uniform insets with the same value on every side.
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Mirror these insets horizontally (swap left and right).
    ///
    /// Used when re-resolving mirrored styles after a text direction
    /// change.
    pub const fn mirrored(self) -> Self {
        Self::new(self.top, self.left, self.bottom, self.right)
    }
}

impl From<[i32; 4]> for Insets {
    fn from([top, right, bottom, left]: [i32; 4]) -> Self {
        Self::new(top, right, bottom, left)
    }
}

impl From<Insets> for [i32; 4] {
    fn from(insets: Insets) -> Self {
        [insets.top, insets.right, insets.bottom, insets.left]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirroring_swaps_horizontal_sides() {
        let insets = Insets::new(1, 2, 3, 4);
        assert_eq!(insets.mirrored(), Insets::new(1, 4, 3, 2));
    }
}
