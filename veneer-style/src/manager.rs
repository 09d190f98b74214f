//! # Style Manager
//!
//! The runtime engine that binds live widgets to painters and keeps the
//! bindings current across skin swaps and invalidations.
//!
//! ## Overview
//!
//! For every widget handed to [StyleManager::install_style] the manager
//! resolves a style descriptor through the tie-break chain (widget
//! override looked up in the active skin and then among directly
//! registered styles, then the skin's type mapping, then the registry
//! default),
//! creates a painter from the painter registry, applies the descriptor's
//! border/opacity properties to the widget and records the binding. A
//! binding moves through `Uninstalled -> Resolving -> Installed` and
//! re-enters `Resolving` whenever the active skin is replaced, the text
//! direction changes for a mirrored style, or the binding is explicitly
//! invalidated.
//!
//! ## Failure policy
//!
//! Resolution misses are recoverable: a missing override or a skin
//! without a mapping for the component type logs a warning and falls
//! through the chain. During a skin swap a per-widget failure falls back
//! to the registry default without aborting the rest of the batch. Only
//! a registry with no default for the component type produces a hard
//! [StyleError::Resolution], which cannot happen with a registry seeded
//! via [StyleRegistry::with_builtin_defaults].
//!
//! ## Threading
//!
//! The manager assumes widget-bound calls arrive on the UI event thread.
//! The active skin, the registry and the binding table sit behind
//! `RwLock`s so that concurrent reads (style queries for different
//! widgets) are cheap while mutations (skin swap, registration) are
//! serialized.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use veneer_core::widget::{TextDirection, WidgetHandle, WidgetKey};

use crate::descriptor::StyleDescriptor;
use crate::error::{StyleError, StyleResult};
use crate::painter::{Painter, PainterRegistry};
use crate::registry::StyleRegistry;
use crate::skin::Skin;
use crate::value::keys;

/// Lifecycle state of one widget's style binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    /// The widget is not tracked by the manager.
    Uninstalled,
    /// A resolution is in progress for the widget.
    Resolving,
    /// A painter is installed and current.
    Installed,
}

struct StyleBinding {
    widget: Arc<dyn WidgetHandle>,
    state: BindingState,
    style_id: String,
    mirrored: bool,
    painter: Box<dyn Painter>,
}

/// The process-wide style resolution engine.
///
/// Exactly one skin is active at a time; a replaced skin is discarded,
/// not layered. The manager is created at application startup with the
/// registries populated and is the single owner of the active skin.
pub struct StyleManager {
    registry: RwLock<StyleRegistry>,
    painters: PainterRegistry,
    skin: RwLock<Box<dyn Skin>>,
    bindings: RwLock<HashMap<WidgetKey, StyleBinding>>,
    direction: RwLock<TextDirection>,
}

impl StyleManager {
    /// Create a style manager with a style registry, a painter registry
    /// and the initially active skin.
    pub fn new(registry: StyleRegistry, painters: PainterRegistry, skin: Box<dyn Skin>) -> Self {
        Self {
            registry: RwLock::new(registry),
            painters,
            skin: RwLock::new(skin),
            bindings: RwLock::new(HashMap::new()),
            direction: RwLock::new(TextDirection::default()),
        }
    }

    /// Register an additional style descriptor at runtime.
    ///
    /// Registered styles are selectable through a widget's explicit style
    /// id override even when the active skin does not define the id.
    pub fn register_style(&self, descriptor: StyleDescriptor) -> StyleResult<()> {
        match self.registry.write() {
            Ok(mut registry) => registry.register(descriptor),
            Err(_) => {
                log::error!("style registry lock poisoned, registration dropped");
                Ok(())
            },
        }
    }

    /// Resolve the active style descriptor and install a painter for a
    /// widget.
    ///
    /// Re-installing an already tracked widget detaches its previous
    /// painter first. Side effect: the widget gets a layout pass and a
    /// repaint request.
    pub fn install_style(&self, widget: Arc<dyn WidgetHandle>) -> StyleResult<()> {
        let key = widget.key();
        let descriptor = self.resolve_descriptor(widget.as_ref())?;

        if let Ok(mut bindings) = self.bindings.write() {
            // Previous painter must be detached before the new one is
            // installed; removal drops it here.
            bindings.remove(&key);

            self.apply_to_widget(&descriptor, widget.as_ref());
            let binding = StyleBinding {
                state: BindingState::Installed,
                style_id: descriptor.style_id().to_string(),
                mirrored: descriptor.mirrored(),
                painter: self.painters.create(&descriptor),
                widget,
            };
            bindings.insert(key, binding);
        }
        Ok(())
    }

    /// Release a widget's painter and stop tracking it.
    ///
    /// Safe to call for widgets that were never installed (idempotent).
    pub fn uninstall_style(&self, key: WidgetKey) {
        if let Ok(mut bindings) = self.bindings.write() {
            if let Some(binding) = bindings.remove(&key) {
                binding.widget.request_repaint();
            }
        }
    }

    /// Replace the active skin and re-resolve every tracked widget.
    ///
    /// This is a global operation: a widget whose style cannot be
    /// resolved under the new skin falls back to the registry's built-in
    /// default for its component type (logged), never aborting the rest
    /// of the batch. Skin *load* failures happen before this call; a
    /// skin that failed to load is never passed in, so the previous skin
    /// stays active in that case.
    pub fn set_skin(&self, skin: Box<dyn Skin>) {
        if let Ok(mut active) = self.skin.write() {
            log::info!("replacing skin '{}' with '{}'", active.id(), skin.id());
            *active = skin;
        }
        if let Ok(mut bindings) = self.bindings.write() {
            for binding in bindings.values_mut() {
                self.reresolve(binding);
            }
        }
    }

    /// Re-resolve the style of one tracked widget.
    pub fn invalidate(&self, key: WidgetKey) {
        if let Ok(mut bindings) = self.bindings.write() {
            if let Some(binding) = bindings.get_mut(&key) {
                self.reresolve(binding);
            }
        }
    }

    /// Re-resolve the styles of all tracked widgets.
    pub fn invalidate_all(&self) {
        if let Ok(mut bindings) = self.bindings.write() {
            for binding in bindings.values_mut() {
                self.reresolve(binding);
            }
        }
    }

    /// Change the UI text direction.
    ///
    /// Only widgets bound to mirrored styles are re-resolved; everything
    /// else keeps its painter.
    pub fn set_text_direction(&self, direction: TextDirection) {
        let changed = match self.direction.write() {
            Ok(mut current) if *current != direction => {
                *current = direction;
                true
            },
            _ => false,
        };
        if !changed {
            return;
        }
        if let Ok(mut bindings) = self.bindings.write() {
            for binding in bindings.values_mut().filter(|b| b.mirrored) {
                self.reresolve(binding);
            }
        }
    }

    /// The id of the currently active skin.
    pub fn active_skin_id(&self) -> String {
        self.skin
            .read()
            .map(|skin| skin.id().to_string())
            .unwrap_or_default()
    }

    /// The binding state of a widget.
    pub fn binding_state(&self, key: WidgetKey) -> BindingState {
        self.bindings
            .read()
            .ok()
            .and_then(|bindings| bindings.get(&key).map(|b| b.state))
            .unwrap_or(BindingState::Uninstalled)
    }

    /// The style id currently installed on a widget.
    pub fn installed_style_id(&self, key: WidgetKey) -> Option<String> {
        self.bindings
            .read()
            .ok()
            .and_then(|bindings| bindings.get(&key).map(|b| b.style_id.clone()))
    }

    /// Number of widgets currently tracked.
    pub fn tracked_count(&self) -> usize {
        self.bindings.read().map(|b| b.len()).unwrap_or(0)
    }

    /// Run a closure against the painter installed on a widget.
    ///
    /// Returns [None] if the widget is not tracked. The painter stays
    /// owned by the manager; toolkits call this from their paint cycle.
    pub fn with_painter<R>(&self, key: WidgetKey, f: impl FnOnce(&dyn Painter) -> R) -> Option<R> {
        let bindings = self.bindings.read().ok()?;
        bindings.get(&key).map(|b| f(b.painter.as_ref()))
    }

    /// Resolve a widget's style descriptor through the tie-break chain:
    /// widget override (active skin first, then directly registered
    /// styles), skin type mapping, registry default.
    fn resolve_descriptor(&self, widget: &dyn WidgetHandle) -> StyleResult<StyleDescriptor> {
        let component = widget.component_type();

        if let Some(style_id) = widget.style_id_override() {
            if let Ok(skin) = self.skin.read() {
                if let Some(descriptor) = skin.style(component, &style_id) {
                    return Ok(descriptor);
                }
            }
            if let Ok(registry) = self.registry.read() {
                if let Some(descriptor) = registry.resolve(component, &style_id) {
                    return Ok(descriptor.clone());
                }
            }
            log::warn!(
                "{} overrides style '{}' but neither the active skin nor the \
                 registry defines it for '{}'",
                widget.key(),
                style_id,
                component
            );
        }

        if let Ok(skin) = self.skin.read() {
            if let Some(descriptor) = skin.style_for(widget, component) {
                return Ok(descriptor);
            }
            log::warn!(
                "skin '{}' has no style for component '{}', using built-in default",
                skin.id(),
                component
            );
        }

        if let Ok(registry) = self.registry.read() {
            if let Some(descriptor) = registry.default_for(component) {
                return Ok(descriptor.clone());
            }
        }
        Err(StyleError::Resolution { component })
    }

    /// Re-resolve one binding in place, replacing its painter.
    ///
    /// A resolution failure keeps the previous painter installed.
    fn reresolve(&self, binding: &mut StyleBinding) {
        binding.state = BindingState::Resolving;
        match self.resolve_descriptor(binding.widget.as_ref()) {
            Ok(descriptor) => {
                self.apply_to_widget(&descriptor, binding.widget.as_ref());
                binding.style_id = descriptor.style_id().to_string();
                binding.mirrored = descriptor.mirrored();
                binding.painter = self.painters.create(&descriptor);
            },
            Err(e) => {
                log::error!(
                    "style re-resolution failed for {}: {}, keeping previous painter",
                    binding.widget.key(),
                    e
                );
            },
        }
        binding.state = BindingState::Installed;
    }

    /// Push a descriptor's border/opacity onto the widget and request a
    /// layout pass plus a repaint.
    fn apply_to_widget(&self, descriptor: &StyleDescriptor, widget: &dyn WidgetHandle) {
        if let Some(margin) = descriptor.properties().get_insets(keys::MARGIN) {
            let rtl = matches!(self.direction.read().as_deref(), Ok(TextDirection::Rtl));
            let margin = if descriptor.mirrored() && rtl {
                margin.mirrored()
            } else {
                margin
            };
            widget.set_border(margin);
        }
        if let Some(opacity) = descriptor.properties().get_float(keys::OPACITY) {
            widget.set_opacity(opacity.clamp(0.0, 1.0));
        }
        widget.request_layout();
        widget.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::DEFAULT_PAINTER_ID;
    use crate::skin::document::DocumentSkin;
    use crate::skin::StaticSkin;
    use std::any::Any;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use veneer_core::component::ComponentType;
    use veneer_core::geometry::Insets;

    struct MockWidget {
        key: WidgetKey,
        component: ComponentType,
        override_id: Option<String>,
        border: Mutex<Option<Insets>>,
        repaints: AtomicUsize,
        layouts: AtomicUsize,
    }

    impl MockWidget {
        fn new(component: ComponentType) -> Arc<Self> {
            Arc::new(Self {
                key: WidgetKey::next(),
                component,
                override_id: None,
                border: Mutex::new(None),
                repaints: AtomicUsize::new(0),
                layouts: AtomicUsize::new(0),
            })
        }

        fn with_override(component: ComponentType, style_id: &str) -> Arc<Self> {
            Arc::new(Self {
                key: WidgetKey::next(),
                component,
                override_id: Some(style_id.to_string()),
                border: Mutex::new(None),
                repaints: AtomicUsize::new(0),
                layouts: AtomicUsize::new(0),
            })
        }
    }

    impl WidgetHandle for MockWidget {
        fn key(&self) -> WidgetKey {
            self.key
        }
        fn component_type(&self) -> ComponentType {
            self.component
        }
        fn style_id_override(&self) -> Option<String> {
            self.override_id.clone()
        }
        fn set_border(&self, insets: Insets) {
            *self.border.lock().unwrap() = Some(insets);
        }
        fn set_opacity(&self, _opacity: f32) {}
        fn request_repaint(&self) {
            self.repaints.fetch_add(1, Ordering::SeqCst);
        }
        fn request_layout(&self) {
            self.layouts.fetch_add(1, Ordering::SeqCst);
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    /// Painter carrying a creation sequence number, to observe painter
    /// replacement across reinstalls.
    struct SeqPainter {
        seq: usize,
        style_id: String,
        properties: crate::value::PropertyBag,
    }

    impl Painter for SeqPainter {
        fn style_id(&self) -> &str {
            &self.style_id
        }
        fn properties(&self) -> &crate::value::PropertyBag {
            &self.properties
        }
        fn paint(&self, _widget: &dyn WidgetHandle) {}
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn seq_painter_registry() -> PainterRegistry {
        static SEQ: AtomicUsize = AtomicUsize::new(0);
        let mut painters = PainterRegistry::with_builtins();
        let factory = |descriptor: &StyleDescriptor| -> Box<dyn Painter> {
            Box::new(SeqPainter {
                seq: SEQ.fetch_add(1, Ordering::SeqCst),
                style_id: descriptor.style_id().to_string(),
                properties: descriptor.properties().clone(),
            })
        };
        painters.register(DEFAULT_PAINTER_ID, factory);
        painters.register("flat", factory);
        painters
    }

    fn skin_a() -> Box<dyn Skin> {
        Box::new(
            StaticSkin::new("skin-a", "Skin A")
                .with_style(
                    StyleDescriptor::new(ComponentType::Button, "flat")
                        .with_painter("flat")
                        .with_float(keys::ROUND, 4.0)
                        .with_insets(keys::MARGIN, Insets::uniform(3)),
                )
                .unwrap()
                .with_style(
                    StyleDescriptor::new(ComponentType::Button, "accent")
                        .with_painter("flat")
                        .with_float(keys::ROUND, 9.0),
                )
                .unwrap(),
        )
    }

    /// Skin B defines no button styles at all.
    fn skin_b() -> Box<dyn Skin> {
        Box::new(
            StaticSkin::new("skin-b", "Skin B")
                .with_style(StyleDescriptor::new(ComponentType::Panel, "plain"))
                .unwrap(),
        )
    }

    fn manager_with(skin: Box<dyn Skin>) -> StyleManager {
        StyleManager::new(
            StyleRegistry::with_builtin_defaults(),
            seq_painter_registry(),
            skin,
        )
    }

    #[test]
    fn install_resolves_skin_style_and_applies_decoration() {
        let manager = manager_with(skin_a());
        let widget = MockWidget::new(ComponentType::Button);
        manager.install_style(widget.clone()).unwrap();

        assert_eq!(manager.binding_state(widget.key()), BindingState::Installed);
        assert_eq!(
            manager.installed_style_id(widget.key()),
            Some("flat".to_string())
        );
        let round = manager
            .with_painter(widget.key(), |p| p.corner_radius())
            .unwrap();
        assert_eq!(round, 4.0);
        assert_eq!(*widget.border.lock().unwrap(), Some(Insets::uniform(3)));
        assert!(widget.layouts.load(Ordering::SeqCst) >= 1);
        assert!(widget.repaints.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn reinstall_yields_a_fresh_painter() {
        let manager = manager_with(skin_a());
        let widget = MockWidget::new(ComponentType::Button);
        manager.install_style(widget.clone()).unwrap();
        let first = manager
            .with_painter(widget.key(), |p| {
                p.as_any().downcast_ref::<SeqPainter>().unwrap().seq
            })
            .unwrap();

        manager.uninstall_style(widget.key());
        assert_eq!(
            manager.binding_state(widget.key()),
            BindingState::Uninstalled
        );

        manager.install_style(widget.clone()).unwrap();
        let second = manager
            .with_painter(widget.key(), |p| {
                p.as_any().downcast_ref::<SeqPainter>().unwrap().seq
            })
            .unwrap();
        assert_ne!(first, second, "reinstall must not reuse a stale painter");
    }

    #[test]
    fn uninstall_is_idempotent() {
        let manager = manager_with(skin_a());
        let widget = MockWidget::new(ComponentType::Button);
        manager.install_style(widget.clone()).unwrap();
        manager.uninstall_style(widget.key());
        manager.uninstall_style(widget.key());
        assert_eq!(manager.tracked_count(), 0);
    }

    #[test]
    fn explicit_override_beats_type_default() {
        let manager = manager_with(skin_a());
        let widget = MockWidget::with_override(ComponentType::Button, "accent");
        manager.install_style(widget.clone()).unwrap();
        assert_eq!(
            manager.installed_style_id(widget.key()),
            Some("accent".to_string())
        );
        let round = manager
            .with_painter(widget.key(), |p| p.corner_radius())
            .unwrap();
        assert_eq!(round, 9.0);
    }

    #[test]
    fn override_resolves_registered_style_missing_from_skin() {
        let manager = manager_with(skin_a());
        manager
            .register_style(
                StyleDescriptor::new(ComponentType::Button, "custom")
                    .with_painter("flat")
                    .with_float(keys::ROUND, 7.0),
            )
            .unwrap();

        // Skin A does not define "custom"; the registered style is still
        // selectable via the widget's explicit override.
        let widget = MockWidget::with_override(ComponentType::Button, "custom");
        manager.install_style(widget.clone()).unwrap();
        assert_eq!(
            manager.installed_style_id(widget.key()),
            Some("custom".to_string())
        );
        assert_eq!(
            manager.with_painter(widget.key(), |p| p.corner_radius()),
            Some(7.0)
        );
    }

    #[test]
    fn missing_override_falls_back_to_type_default() {
        let manager = manager_with(skin_a());
        let widget = MockWidget::with_override(ComponentType::Button, "no-such-style");
        manager.install_style(widget.clone()).unwrap();
        assert_eq!(
            manager.installed_style_id(widget.key()),
            Some("flat".to_string())
        );
    }

    #[test]
    fn skin_swap_falls_back_to_builtin_default_per_widget() {
        let manager = manager_with(skin_a());
        let widget = MockWidget::new(ComponentType::Button);
        manager.install_style(widget.clone()).unwrap();
        assert_eq!(
            manager.with_painter(widget.key(), |p| p.corner_radius()),
            Some(4.0)
        );
        let before = manager
            .with_painter(widget.key(), |p| {
                p.as_any().downcast_ref::<SeqPainter>().unwrap().seq
            })
            .unwrap();

        // Skin B has no button style: the widget falls back to the
        // registry default instead of keeping skin A's style.
        manager.set_skin(skin_b());
        assert_eq!(manager.active_skin_id(), "skin-b");
        assert_eq!(
            manager.installed_style_id(widget.key()),
            Some("default".to_string())
        );
        assert_eq!(
            manager.with_painter(widget.key(), |p| p.corner_radius()),
            Some(0.0)
        );
        let after = manager
            .with_painter(widget.key(), |p| {
                p.as_any().downcast_ref::<SeqPainter>().unwrap().seq
            })
            .unwrap();
        assert_ne!(before, after, "painter must be replaced on skin swap");
    }

    #[test]
    fn failed_skin_load_leaves_active_skin_untouched() {
        let manager = manager_with(skin_a());
        let widget = MockWidget::new(ComponentType::Button);
        manager.install_style(widget.clone()).unwrap();

        let broken = r#"
            [skin]
            id = "broken"
            name = "Broken"

            [[styles]]
            component = "button"
            id = "a"
            parent = "a"
        "#;
        let result = DocumentSkin::from_toml(broken);
        assert!(result.is_err());
        // The broken skin never reaches set_skin; everything is intact.
        assert_eq!(manager.active_skin_id(), "skin-a");
        assert_eq!(
            manager.with_painter(widget.key(), |p| p.corner_radius()),
            Some(4.0)
        );
    }

    #[test]
    fn text_direction_change_reresolves_mirrored_styles_only() {
        let skin = StaticSkin::new("rtl", "Rtl")
            .with_style(
                StyleDescriptor::new(ComponentType::Button, "mirrored")
                    .with_mirrored(true)
                    .with_insets(keys::MARGIN, Insets::new(1, 2, 3, 4)),
            )
            .unwrap()
            .with_style(
                StyleDescriptor::new(ComponentType::Panel, "plain")
                    .with_insets(keys::MARGIN, Insets::new(1, 2, 3, 4)),
            )
            .unwrap();
        let manager = manager_with(Box::new(skin));

        let button = MockWidget::new(ComponentType::Button);
        let panel = MockWidget::new(ComponentType::Panel);
        manager.install_style(button.clone()).unwrap();
        manager.install_style(panel.clone()).unwrap();

        manager.set_text_direction(TextDirection::Rtl);
        assert_eq!(
            *button.border.lock().unwrap(),
            Some(Insets::new(1, 4, 3, 2)),
            "mirrored style swaps horizontal margins under RTL"
        );
        assert_eq!(
            *panel.border.lock().unwrap(),
            Some(Insets::new(1, 2, 3, 4)),
            "non-mirrored style is untouched"
        );
    }

    #[test]
    fn invalidate_reinstalls_single_widget() {
        let manager = manager_with(skin_a());
        let widget = MockWidget::new(ComponentType::Button);
        manager.install_style(widget.clone()).unwrap();
        let before = manager
            .with_painter(widget.key(), |p| {
                p.as_any().downcast_ref::<SeqPainter>().unwrap().seq
            })
            .unwrap();
        manager.invalidate(widget.key());
        let after = manager
            .with_painter(widget.key(), |p| {
                p.as_any().downcast_ref::<SeqPainter>().unwrap().seq
            })
            .unwrap();
        assert_ne!(before, after);
        assert_eq!(manager.binding_state(widget.key()), BindingState::Installed);
    }
}
