//! # Component Types
//!
//! The closed set of widget kinds the look-and-feel core supports.
//!
//! A [ComponentType] tag is attached to every live widget by the host
//! toolkit and is the join key for the two pluggable registries in veneer:
//! the style registry (which style descriptor decorates this kind of
//! widget) and the settings processor registry (which processor saves and
//! restores this kind of widget). Matching is always exact: there is no
//! subtype fallback, so a widget kind without a registered processor is
//! simply unsupported rather than inheriting behavior.
//!
//! The string names returned by [ComponentType::as_str] are stable: they
//! appear in skin documents and in persisted settings keys.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of widget kinds supported by the look-and-feel core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ComponentType {
    /// A push button.
    Button,
    /// A generic container panel.
    Panel,
    /// A static text label.
    Label,
    /// A two/three-state checkbox.
    CheckBox,
    /// A horizontal or vertical slider.
    Slider,
    /// A single-line text field.
    TextField,
    /// A data table.
    Table,
    /// A hierarchical tree view.
    Tree,
    /// A tabbed pane.
    TabbedPane,
    /// A top-level or popup menu.
    Menu,
    /// A single menu item.
    MenuItem,
    /// A hover tooltip.
    ToolTip,
    /// A scrollbar.
    ScrollBar,
    /// A progress bar.
    ProgressBar,
    /// A numeric spinner.
    Spinner,
    /// A dropdown combo box.
    ComboBox,
}

impl ComponentType {
    /// All supported component types, in declaration order.
    pub const ALL: [ComponentType; 16] = [
        ComponentType::Button,
        ComponentType::Panel,
        ComponentType::Label,
        ComponentType::CheckBox,
        ComponentType::Slider,
        ComponentType::TextField,
        ComponentType::Table,
        ComponentType::Tree,
        ComponentType::TabbedPane,
        ComponentType::Menu,
        ComponentType::MenuItem,
        ComponentType::ToolTip,
        ComponentType::ScrollBar,
        ComponentType::ProgressBar,
        ComponentType::Spinner,
        ComponentType::ComboBox,
    ];

    /// Get the stable string name of this component type.
    ///
    /// These names are part of the skin document format and the settings
    /// key scheme and must not change between releases.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Button => "button",
            ComponentType::Panel => "panel",
            ComponentType::Label => "label",
            ComponentType::CheckBox => "checkbox",
            ComponentType::Slider => "slider",
            ComponentType::TextField => "textfield",
            ComponentType::Table => "table",
            ComponentType::Tree => "tree",
            ComponentType::TabbedPane => "tabbedpane",
            ComponentType::Menu => "menu",
            ComponentType::MenuItem => "menuitem",
            ComponentType::ToolTip => "tooltip",
            ComponentType::ScrollBar => "scrollbar",
            ComponentType::ProgressBar => "progressbar",
            ComponentType::Spinner => "spinner",
            ComponentType::ComboBox => "combobox",
        }
    }
}

impl FromStr for ComponentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentType::ALL
            .iter()
            .find(|ct| ct.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown component type '{}'", s))
    }
}

impl TryFrom<String> for ComponentType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ComponentType> for String {
    fn from(value: ComponentType) -> Self {
        value.as_str().to_string()
    }
}

impl Display for ComponentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_names_round_trip() {
        for ct in ComponentType::ALL {
            assert_eq!(ct.as_str().parse::<ComponentType>(), Ok(ct));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!("glasspane".parse::<ComponentType>().is_err());
    }
}
