#![warn(missing_docs)]

//! A pluggable look-and-feel core for desktop GUI toolkits.
//!
//! `veneer` provides the two subsystems every themed widget toolkit needs
//! but none wants to reimplement:
//!
//! - a **skin resolution engine** that maps a live widget instance to a
//!   concrete painter/decoration, with per-widget overrides, style
//!   inheritance and runtime skin swapping ([`style`]), and
//! - a **component settings pipeline** that persists and restores widget
//!   state through per-component-type processors backed by a grouped
//!   key-value store ([`settings`]).
//!
//! The toolkit side is abstracted behind the
//! [`WidgetHandle`](core::widget::WidgetHandle) capability trait; `veneer`
//! never draws or owns widgets itself.

pub use veneer_core as core;
pub use veneer_settings as settings;
pub use veneer_style as style;

/// A "prelude" for embedders of the veneer look-and-feel core.
///
/// Importing this module brings into scope the types needed to register
/// styles, load a skin and wire up settings persistence.
///
/// ```rust
/// use veneer::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::component::ComponentType;
    pub use crate::core::geometry::Insets;
    pub use crate::core::widget::{TextDirection, WidgetHandle, WidgetKey};
    pub use crate::core::Rgba;

    pub use crate::style::descriptor::StyleDescriptor;
    pub use crate::style::manager::StyleManager;
    pub use crate::style::painter::{Painter, PainterRegistry};
    pub use crate::style::registry::StyleRegistry;
    pub use crate::style::skin::{document::DocumentSkin, Skin, StaticSkin};
    pub use crate::style::value::{PropertyBag, StyleValue};

    pub use crate::settings::processor::{SettingsManager, SettingsProcessor};
    pub use crate::settings::state::ReadState;
    pub use crate::settings::store::SettingsStore;
}
