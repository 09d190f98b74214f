//! # Skins
//!
//! A [Skin] is a complete, swappable visual theme bundle: for every
//! supported component type it can produce the style descriptor that
//! decorates widgets of that type, plus named alternative styles widgets
//! may select explicitly.
//!
//! The style manager holds exactly one active skin at a time; swapping
//! skins re-resolves every tracked widget without recreating any of them.
//! Two implementations ship with the crate:
//!
//! - [StaticSkin]: built programmatically, descriptor by descriptor
//! - [document::DocumentSkin]: loaded eagerly from a TOML skin document,
//!   with parent-chain flattening and cycle detection at load time

use std::collections::HashMap;

use veneer_core::component::ComponentType;
use veneer_core::widget::WidgetHandle;

use crate::descriptor::StyleDescriptor;
use crate::error::{StyleError, StyleResult};

/// Skins loadable from a TOML document.
pub mod document;

/// A complete, swappable visual theme bundle.
pub trait Skin: Send + Sync {
    /// Stable identifier of this skin.
    fn id(&self) -> &str;

    /// Human-readable display name.
    fn name(&self) -> &str;

    /// Platforms this skin supports. Empty means all platforms.
    fn supported_platforms(&self) -> &[String];

    /// Look up a named style for a component type.
    ///
    /// Descriptors returned here are fully flattened; they never carry an
    /// unresolved parent reference.
    fn style(&self, component: ComponentType, style_id: &str) -> Option<StyleDescriptor>;

    /// Produce the style descriptor for a live widget of the given type.
    ///
    /// The default implementation returns the skin's type-level default
    /// style. Skins may specialize per instance (the widget handle is
    /// available for inspection), but per-widget explicit overrides are
    /// the resolver's job, not the skin's.
    fn style_for(
        &self,
        _widget: &dyn WidgetHandle,
        component: ComponentType,
    ) -> Option<StyleDescriptor> {
        self.default_style_id(component)
            .and_then(|id| self.style(component, &id))
    }

    /// The skin's type-level default style id for a component type.
    fn default_style_id(&self, component: ComponentType) -> Option<String>;
}

/// A skin assembled programmatically from style descriptors.
///
/// The first style registered for a component type becomes that type's
/// default unless [with_default](StaticSkin::with_default) designates
/// another.
pub struct StaticSkin {
    id: String,
    name: String,
    platforms: Vec<String>,
    styles: HashMap<(ComponentType, String), StyleDescriptor>,
    defaults: HashMap<ComponentType, String>,
}

impl StaticSkin {
    /// Create a new empty skin with an id and display name.
    pub fn new(id: impl ToString, name: impl ToString) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            platforms: Vec::new(),
            styles: HashMap::new(),
            defaults: HashMap::new(),
        }
    }

    /// Restrict the skin to the given platforms.
    pub fn with_platforms(mut self, platforms: impl IntoIterator<Item = String>) -> Self {
        self.platforms = platforms.into_iter().collect();
        self
    }

    /// Add a style descriptor to the skin.
    ///
    /// Style ids are unique per component type within one skin; a
    /// duplicate is a configuration error.
    pub fn with_style(mut self, descriptor: StyleDescriptor) -> StyleResult<Self> {
        let key = (descriptor.component(), descriptor.style_id().to_string());
        if self.styles.contains_key(&key) {
            return Err(StyleError::duplicate(key.0, key.1));
        }
        self.defaults.entry(key.0).or_insert_with(|| key.1.clone());
        self.styles.insert(key, descriptor);
        Ok(self)
    }

    /// Designate the default style for a component type.
    pub fn with_default(mut self, component: ComponentType, style_id: &str) -> StyleResult<Self> {
        if !self
            .styles
            .contains_key(&(component, style_id.to_string()))
        {
            return Err(StyleError::unknown(component, style_id));
        }
        self.defaults.insert(component, style_id.to_string());
        Ok(self)
    }
}

impl Skin for StaticSkin {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn supported_platforms(&self) -> &[String] {
        &self.platforms
    }

    fn style(&self, component: ComponentType, style_id: &str) -> Option<StyleDescriptor> {
        self.styles
            .get(&(component, style_id.to_string()))
            .cloned()
    }

    fn default_style_id(&self, component: ComponentType) -> Option<String> {
        self.defaults.get(&component).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::keys;

    #[test]
    fn first_style_becomes_type_default() {
        let skin = StaticSkin::new("test", "Test")
            .with_style(
                StyleDescriptor::new(ComponentType::Button, "flat").with_float(keys::ROUND, 4.0),
            )
            .unwrap()
            .with_style(StyleDescriptor::new(ComponentType::Button, "round"))
            .unwrap();

        assert_eq!(
            skin.default_style_id(ComponentType::Button),
            Some("flat".to_string())
        );
    }

    #[test]
    fn duplicate_style_in_skin_is_rejected() {
        let result = StaticSkin::new("test", "Test")
            .with_style(StyleDescriptor::new(ComponentType::Button, "flat"))
            .unwrap()
            .with_style(StyleDescriptor::new(ComponentType::Button, "flat"));
        assert!(matches!(result, Err(StyleError::DuplicateStyle { .. })));
    }

    #[test]
    fn explicit_default_overrides_first_registered() {
        let skin = StaticSkin::new("test", "Test")
            .with_style(StyleDescriptor::new(ComponentType::Button, "flat"))
            .unwrap()
            .with_style(StyleDescriptor::new(ComponentType::Button, "round"))
            .unwrap()
            .with_default(ComponentType::Button, "round")
            .unwrap();
        assert_eq!(
            skin.default_style_id(ComponentType::Button),
            Some("round".to_string())
        );
    }
}
