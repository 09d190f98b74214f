//! # Style Registry
//!
//! The process-wide table of registered style descriptors and the
//! built-in default style every component type can always fall back to.
//!
//! The registry is the last tier of the resolution chain: when neither a
//! widget's explicit override nor the active skin's type-level mapping
//! yields a style, the manager installs the registry default for the
//! widget's component type. [StyleRegistry::with_builtin_defaults] seeds
//! one neutral default per component type so that the chain can never
//! come up empty.

use std::collections::HashMap;

use veneer_core::color::Rgba;
use veneer_core::component::ComponentType;
use veneer_core::geometry::Insets;

use crate::descriptor::StyleDescriptor;
use crate::error::{StyleError, StyleResult};
use crate::painter;
use crate::value::keys;

/// Registry of style descriptors keyed by (component type, style id),
/// with a designated default style per component type.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    styles: HashMap<(ComponentType, String), StyleDescriptor>,
    defaults: HashMap<ComponentType, String>,
}

impl StyleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-seeded with a neutral built-in default style
    /// for every supported component type.
    pub fn with_builtin_defaults() -> Self {
        let mut registry = Self::new();
        for component in ComponentType::ALL {
            let descriptor = StyleDescriptor::new(component, "default")
                .with_painter(painter::DEFAULT_PAINTER_ID)
                .with_color(keys::BACKGROUND, Rgba::from_rgb8(238, 238, 238))
                .with_color(keys::FOREGROUND, Rgba::BLACK)
                .with_color(keys::BORDER_COLOR, Rgba::from_rgb8(200, 200, 200))
                .with_float(keys::ROUND, 0.0)
                .with_insets(keys::MARGIN, Insets::uniform(2));
            registry
                .styles
                .insert((component, "default".to_string()), descriptor);
            registry.defaults.insert(component, "default".to_string());
        }
        registry
    }

    /// Register a style descriptor.
    ///
    /// Fails with [StyleError::DuplicateStyle] if the (component type,
    /// style id) pair is already registered; use
    /// [register_override](Self::register_override) to replace
    /// intentionally.
    pub fn register(&mut self, descriptor: StyleDescriptor) -> StyleResult<()> {
        let key = (descriptor.component(), descriptor.style_id().to_string());
        if self.styles.contains_key(&key) {
            return Err(StyleError::duplicate(key.0, key.1));
        }
        self.styles.insert(key, descriptor);
        Ok(())
    }

    /// Register a style descriptor, replacing any existing registration
    /// for the same (component type, style id) pair.
    pub fn register_override(&mut self, descriptor: StyleDescriptor) {
        let key = (descriptor.component(), descriptor.style_id().to_string());
        if self.styles.insert(key.clone(), descriptor).is_some() {
            log::debug!(
                "style '{}' for component '{}' replaced by override registration",
                key.1,
                key.0
            );
        }
    }

    /// Resolve a registered style descriptor.
    ///
    /// A miss is non-fatal by design: callers fall back to
    /// [default_for](Self::default_for).
    pub fn resolve(&self, component: ComponentType, style_id: &str) -> Option<&StyleDescriptor> {
        self.styles.get(&(component, style_id.to_string()))
    }

    /// Designate the default style for a component type.
    ///
    /// The style must already be registered.
    pub fn set_default(&mut self, component: ComponentType, style_id: &str) -> StyleResult<()> {
        if self.resolve(component, style_id).is_none() {
            return Err(StyleError::unknown(component, style_id));
        }
        self.defaults.insert(component, style_id.to_string());
        Ok(())
    }

    /// Get the built-in default style descriptor for a component type.
    pub fn default_for(&self, component: ComponentType) -> Option<&StyleDescriptor> {
        let style_id = self.defaults.get(&component)?;
        self.styles.get(&(component, style_id.clone()))
    }

    /// Number of registered styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether the registry holds no styles.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
