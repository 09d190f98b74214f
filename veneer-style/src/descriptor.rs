//! # Style Descriptors
//!
//! A [StyleDescriptor] is the resolved style data for one
//! (component type, style id) pair: a property bag, an optional painter
//! reference, and an optional parent style id for inheritance.
//!
//! Inheritance is flattened at skin load time through
//! [StyleDescriptor::merged_over]: a child's explicit properties always
//! win over inherited ones, per key, so partial overrides mix inherited
//! and explicit values. Descriptors handed out by a loaded skin never
//! carry an unresolved parent reference.

use veneer_core::color::Rgba;
use veneer_core::component::ComponentType;
use veneer_core::geometry::Insets;

use crate::value::{PropertyBag, StyleValue};

/// Resolved style data for one component type + style id.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDescriptor {
    component: ComponentType,
    style_id: String,
    parent: Option<String>,
    painter_id: Option<String>,
    mirrored: bool,
    properties: PropertyBag,
}

impl StyleDescriptor {
    /// Create a new empty descriptor for a component type and style id.
    pub fn new(component: ComponentType, style_id: impl ToString) -> Self {
        Self {
            component,
            style_id: style_id.to_string(),
            parent: None,
            painter_id: None,
            mirrored: false,
            properties: PropertyBag::new(),
        }
    }

    /// Set the parent style id this descriptor inherits from.
    pub fn with_parent(mut self, parent: impl ToString) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    /// Set the painter factory id used to decorate widgets with this style.
    pub fn with_painter(mut self, painter_id: impl ToString) -> Self {
        self.painter_id = Some(painter_id.to_string());
        self
    }

    /// Mark this style as direction-sensitive (re-resolved on RTL/LTR
    /// changes).
    pub fn with_mirrored(mut self, mirrored: bool) -> Self {
        self.mirrored = mirrored;
        self
    }

    /// Add a property to the descriptor.
    pub fn with_property(mut self, key: impl ToString, value: StyleValue) -> Self {
        self.properties.set(key, value);
        self
    }

    /// Add a color property to the descriptor.
    pub fn with_color(self, key: impl ToString, color: Rgba) -> Self {
        self.with_property(key, StyleValue::Color(color))
    }

    /// Add a float property to the descriptor.
    pub fn with_float(self, key: impl ToString, value: f32) -> Self {
        self.with_property(key, StyleValue::Float(value))
    }

    /// Add an insets property to the descriptor.
    pub fn with_insets(self, key: impl ToString, insets: Insets) -> Self {
        self.with_property(key, StyleValue::Insets(insets))
    }

    /// The component type this style applies to.
    pub fn component(&self) -> ComponentType {
        self.component
    }

    /// The style id, unique per component type within one skin.
    pub fn style_id(&self) -> &str {
        &self.style_id
    }

    /// The unresolved parent style id, if any.
    ///
    /// Always `None` on descriptors handed out by a loaded skin; parents
    /// are flattened at load time.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// The painter factory id, if this style names one.
    pub fn painter_id(&self) -> Option<&str> {
        self.painter_id.as_deref()
    }

    /// Whether this style is direction-sensitive.
    pub fn mirrored(&self) -> bool {
        self.mirrored
    }

    /// The style's property bag.
    pub fn properties(&self) -> &PropertyBag {
        &self.properties
    }

    /// Mutable access to the property bag.
    pub fn properties_mut(&mut self) -> &mut PropertyBag {
        &mut self.properties
    }

    /// Flatten this descriptor over an already-flattened parent.
    ///
    /// The result starts from the parent's properties and overlays this
    /// descriptor's explicit values key by key. The painter id and the
    /// mirrored flag are inherited only when this descriptor does not set
    /// them. The parent reference is cleared on the result.
    pub fn merged_over(&self, parent: &StyleDescriptor) -> StyleDescriptor {
        let mut properties = parent.properties.clone();
        properties.merge(&self.properties);
        StyleDescriptor {
            component: self.component,
            style_id: self.style_id.clone(),
            parent: None,
            painter_id: self
                .painter_id
                .clone()
                .or_else(|| parent.painter_id.clone()),
            mirrored: self.mirrored || parent.mirrored,
            properties,
        }
    }
}
