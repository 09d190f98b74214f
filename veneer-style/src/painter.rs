//! # Painters
//!
//! A [Painter] is the stateful decoration object bound 1:1 to a live
//! widget: it holds the visual parameters resolved from the widget's
//! style descriptor and performs drawing when the toolkit asks.
//!
//! Painters are created by the [StyleManager](crate::manager::StyleManager)
//! through an explicit [PainterRegistry] mapping painter id strings to
//! factory closures, not a reflective class lookup. A painter is
//! dropped when its widget is uninstalled or re-skinned; it never
//! outlives the widget binding.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use veneer_core::color::Rgba;
use veneer_core::geometry::Insets;
use veneer_core::widget::WidgetHandle;

use crate::descriptor::StyleDescriptor;
use crate::value::{keys, PropertyBag};

/// Painter id of the built-in [DefaultPainter].
pub const DEFAULT_PAINTER_ID: &str = "default";

/// Per-widget-instance decoration object.
///
/// Implementations hold the resolved visual parameters for exactly one
/// widget. The style manager owns the painter for the lifetime of the
/// widget binding.
pub trait Painter: Send + Sync {
    /// The style id this painter was resolved from.
    fn style_id(&self) -> &str;

    /// The resolved style properties this painter draws with.
    fn properties(&self) -> &PropertyBag;

    /// Corner rounding radius, in pixels.
    fn corner_radius(&self) -> f32 {
        self.properties().get_float(keys::ROUND).unwrap_or(0.0)
    }

    /// Resolved background color, if the style defines one.
    fn background(&self) -> Option<Rgba> {
        self.properties().get_color(keys::BACKGROUND)
    }

    /// Resolved widget margins.
    fn margin(&self) -> Insets {
        self.properties()
            .get_insets(keys::MARGIN)
            .unwrap_or_default()
    }

    /// Draw the widget's decoration.
    ///
    /// The host toolkit calls this from its paint cycle with the widget
    /// the painter is bound to.
    fn paint(&self, widget: &dyn WidgetHandle);

    /// Get a reference to the concrete painter for downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// The built-in painter used when a style names no painter or names one
/// the registry does not know.
///
/// It carries the resolved properties so the toolkit can still query
/// radii, colors and margins, but its [paint](Painter::paint) is a no-op:
/// actual pixel work belongs to toolkit-specific painters registered by
/// the embedder.
#[derive(Debug)]
pub struct DefaultPainter {
    style_id: String,
    properties: PropertyBag,
}

impl DefaultPainter {
    /// Create a default painter from a resolved style descriptor.
    pub fn new(descriptor: &StyleDescriptor) -> Self {
        Self {
            style_id: descriptor.style_id().to_string(),
            properties: descriptor.properties().clone(),
        }
    }
}

impl Painter for DefaultPainter {
    fn style_id(&self) -> &str {
        &self.style_id
    }

    fn properties(&self) -> &PropertyBag {
        &self.properties
    }

    fn paint(&self, _widget: &dyn WidgetHandle) {}

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Factory closure producing a painter from a resolved descriptor.
pub type PainterFactory = Arc<dyn Fn(&StyleDescriptor) -> Box<dyn Painter> + Send + Sync>;

/// Explicit registry mapping painter id strings to factory closures.
///
/// Populated at startup by the embedder; later registrations for the same
/// id replace earlier ones.
#[derive(Clone, Default)]
pub struct PainterRegistry {
    factories: HashMap<String, PainterFactory>,
}

impl PainterRegistry {
    /// Create a new empty painter registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in [DefaultPainter] registered
    /// under [DEFAULT_PAINTER_ID].
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(DEFAULT_PAINTER_ID, |descriptor| {
            Box::new(DefaultPainter::new(descriptor))
        });
        registry
    }

    /// Register a painter factory under an id. Last registration wins.
    pub fn register(
        &mut self,
        id: impl ToString,
        factory: impl Fn(&StyleDescriptor) -> Box<dyn Painter> + Send + Sync + 'static,
    ) {
        let id = id.to_string();
        if self.factories.insert(id.clone(), Arc::new(factory)).is_some() {
            log::debug!("painter factory '{}' replaced", id);
        }
    }

    /// Create a painter for a resolved descriptor.
    ///
    /// Falls back to [DefaultPainter] when the descriptor names no
    /// painter or names an unregistered one; an unknown painter id is
    /// logged but never fatal.
    pub fn create(&self, descriptor: &StyleDescriptor) -> Box<dyn Painter> {
        match descriptor.painter_id() {
            Some(id) => match self.factories.get(id) {
                Some(factory) => factory(descriptor),
                None => {
                    log::warn!(
                        "style '{}' for component '{}' names unknown painter '{}', using default",
                        descriptor.style_id(),
                        descriptor.component(),
                        id
                    );
                    Box::new(DefaultPainter::new(descriptor))
                },
            },
            None => Box::new(DefaultPainter::new(descriptor)),
        }
    }

    /// Check if a painter id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }
}
