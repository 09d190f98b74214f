//! # Widget Boundary
//!
//! The capability interface between the look-and-feel core and the host
//! GUI toolkit.
//!
//! Veneer never owns widgets. The host toolkit wraps each live widget in
//! an object implementing [WidgetHandle] and registers it with the style
//! manager and, optionally, the settings manager. Everything the core
//! needs to know about a widget (its kind, its explicit style override)
//! and everything it does to a widget (install a border, request a
//! repaint) goes through this trait.
//!
//! Widget lifetime is explicit: the toolkit calls
//! `StyleManager::uninstall_style` / `SettingsManager::unbind` from its
//! dispose callback, keyed by the widget's [WidgetKey]. There are no weak
//! references anywhere in the core.

use std::any::Any;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::component::ComponentType;
use crate::geometry::Insets;

static NEXT_WIDGET_KEY: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of one live widget instance.
///
/// Keys are allocated once per widget via [WidgetKey::next] and never
/// reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetKey(u64);

impl WidgetKey {
    /// Allocate a fresh, process-unique widget key.
    pub fn next() -> Self {
        Self(NEXT_WIDGET_KEY.fetch_add(1, Ordering::Relaxed))
    }
}

impl Display for WidgetKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "widget#{}", self.0)
    }
}

/// Horizontal text direction of the UI.
///
/// Styles marked as mirrored are re-resolved when the direction changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextDirection {
    /// Left-to-right layouts.
    #[default]
    Ltr,
    /// Right-to-left layouts.
    Rtl,
}

/// The capability interface a host toolkit implements per live widget.
///
/// The inbound half (`key`, `component_type`, `style_id_override`) tells
/// the core what it is decorating; the outbound half (`set_border`,
/// `set_opacity`, `request_repaint`, `request_layout`) applies the
/// resolved decoration. [`as_any`](WidgetHandle::as_any) lets
/// component-type-specific code (settings processors, custom painters)
/// downcast to the concrete wrapper when it needs widget state the
/// capability surface does not carry.
pub trait WidgetHandle: Send + Sync {
    /// The process-unique identity of this widget instance.
    fn key(&self) -> WidgetKey;

    /// The kind of widget this handle wraps.
    fn component_type(&self) -> ComponentType;

    /// An explicit style id set directly on this instance, if any.
    ///
    /// Takes precedence over the active skin's type-level mapping.
    fn style_id_override(&self) -> Option<String> {
        None
    }

    /// Install the resolved border/margin decoration on the widget.
    fn set_border(&self, insets: Insets);

    /// Install the resolved opacity on the widget.
    fn set_opacity(&self, opacity: f32);

    /// Ask the toolkit to repaint this widget.
    fn request_repaint(&self);

    /// Ask the toolkit to re-run a layout pass for this widget.
    fn request_layout(&self);

    /// Get a reference to the concrete handle for downcasting.
    fn as_any(&self) -> &dyn Any;
}
