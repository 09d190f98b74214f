//! # Settings Processors
//!
//! The widget-facing layer of settings persistence.
//!
//! ## Overview
//!
//! A [SettingsProcessor] knows how to turn one component type's live
//! state into a persisted [Value] and back. Processors are registered
//! with the [SettingsManager] per [ComponentType]; widgets are then bound
//! to a `(group, key)` address together with a default supplier. From
//! that point the manager drives the round trip:
//!
//! - [SettingsManager::restore_widget] loads the persisted value (or the
//!   supplied default) and hands it to the processor to apply
//! - [SettingsManager::value_changed] snapshots the widget through the
//!   processor and writes the value through to the store
//!
//! Binding a widget whose component type has no registered processor is
//! not an error: the binding is inert and both operations are no-ops.
//! The processor for a binding is resolved once, at bind time; replacing
//! a processor later affects new bindings only.
//!
//! ## Failure policy
//!
//! Save and restore never propagate persistence errors to interaction
//! handlers. Write failures are logged and the group stays dirty for a
//! later retry. When a group is in the [Failed](ReadState::Failed) state,
//! defaults are returned but deliberately not written back, so a
//! transient read problem cannot clobber the data on disk.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use veneer_core::component::ComponentType;
use veneer_core::widget::{WidgetHandle, WidgetKey};

use crate::state::{GroupState, ReadState};
use crate::store::{SettingsStore, Value};

/// Supplies the default value for a bound setting when nothing is
/// persisted yet.
pub type DefaultSupplier = Arc<dyn Fn() -> Value + Send + Sync>;

/// Converts one component type's live state to and from persisted values.
pub trait SettingsProcessor: Send + Sync {
    /// The component type this processor handles.
    fn component_type(&self) -> ComponentType;

    /// Capture the widget's persistable state.
    ///
    /// Returning `None` skips the save, for widgets whose current state
    /// is not worth persisting.
    fn snapshot(&self, widget: &dyn WidgetHandle) -> Option<Value>;

    /// Apply a persisted (or default) value to the widget.
    fn restore(&self, widget: &dyn WidgetHandle, value: &Value);
}

struct SettingsBinding {
    widget: Arc<dyn WidgetHandle>,
    group: String,
    key: String,
    default_supplier: DefaultSupplier,
    processor: Option<Arc<dyn SettingsProcessor>>,
}

/// Binds live widgets to persisted settings through per-component-type
/// processors.
pub struct SettingsManager {
    store: Arc<SettingsStore>,
    processors: RwLock<HashMap<ComponentType, Arc<dyn SettingsProcessor>>>,
    bindings: RwLock<HashMap<WidgetKey, SettingsBinding>>,
}

impl SettingsManager {
    /// Create a manager on top of a store.
    pub fn new(store: Arc<SettingsStore>) -> Self {
        Self {
            store,
            processors: RwLock::new(HashMap::new()),
            bindings: RwLock::new(HashMap::new()),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<SettingsStore> {
        &self.store
    }

    /// Register a processor for its component type.
    ///
    /// Re-registering a type replaces the previous processor for new
    /// bindings; existing bindings keep the processor they were bound
    /// with.
    pub fn register_processor(&self, processor: Arc<dyn SettingsProcessor>) {
        let component = processor.component_type();
        if let Ok(mut processors) = self.processors.write() {
            if processors.insert(component, processor).is_some() {
                log::debug!("replaced settings processor for '{}'", component);
            }
        }
    }

    /// Bind a widget to a `(group, key)` address.
    ///
    /// The processor is resolved from the widget's component type at bind
    /// time. Without a matching processor the binding is inert. Binding
    /// the same widget again replaces its previous binding.
    pub fn bind(
        &self,
        widget: Arc<dyn WidgetHandle>,
        group: impl Into<String>,
        key: impl Into<String>,
        default_supplier: DefaultSupplier,
    ) {
        let component = widget.component_type();
        let processor = self
            .processors
            .read()
            .ok()
            .and_then(|p| p.get(&component).cloned());
        if processor.is_none() {
            log::debug!(
                "no settings processor for '{}', binding for {} is inert",
                component,
                widget.key()
            );
        }
        let binding = SettingsBinding {
            group: group.into(),
            key: key.into(),
            widget: widget.clone(),
            default_supplier,
            processor,
        };
        if let Ok(mut bindings) = self.bindings.write() {
            bindings.insert(widget.key(), binding);
        }
    }

    /// Remove a widget's binding. Idempotent.
    pub fn unbind(&self, key: WidgetKey) {
        if let Ok(mut bindings) = self.bindings.write() {
            bindings.remove(&key);
        }
    }

    /// Whether a widget currently has a binding.
    pub fn is_bound(&self, key: WidgetKey) -> bool {
        self.bindings
            .read()
            .map(|b| b.contains_key(&key))
            .unwrap_or(false)
    }

    /// Snapshot a bound widget's state and write it through to the store.
    ///
    /// Call this from the widget's change notification. A no-op for
    /// unbound widgets, inert bindings, and snapshots that return `None`.
    pub fn value_changed(&self, key: WidgetKey) {
        let bindings = match self.bindings.read() {
            Ok(bindings) => bindings,
            Err(_) => return,
        };
        let Some(binding) = bindings.get(&key) else {
            return;
        };
        let Some(processor) = &binding.processor else {
            return;
        };
        if let Some(value) = processor.snapshot(binding.widget.as_ref()) {
            self.save(&binding.group, &binding.key, value);
        }
    }

    /// Load a bound widget's persisted value (or default) and apply it.
    ///
    /// A no-op for unbound widgets and inert bindings.
    pub fn restore_widget(&self, key: WidgetKey) {
        let bindings = match self.bindings.read() {
            Ok(bindings) => bindings,
            Err(_) => return,
        };
        let Some(binding) = bindings.get(&key) else {
            return;
        };
        let Some(processor) = &binding.processor else {
            return;
        };
        let value = self.load(&binding.group, &binding.key, &binding.default_supplier);
        processor.restore(binding.widget.as_ref(), &value);
    }

    /// Write a value through to the store.
    ///
    /// The group is flushed synchronously on the calling thread. Embedders
    /// that must keep file I/O off the interaction thread can instead set
    /// values on the store directly and drive
    /// [flush_all](Self::flush_all) from a worker. Flush failures are
    /// logged; the group stays dirty for a retry.
    pub fn save(&self, group: &str, key: &str, value: Value) {
        self.store.set(group, key, value);
        if let Err(e) = self.store.flush(group) {
            log::warn!("settings value '{}.{}' not persisted: {}", group, key, e);
        }
    }

    /// Read a value, falling back to the supplied default.
    ///
    /// A missing value in a healthy group persists the default so later
    /// sessions see it. A group in the [Failed](ReadState::Failed) state
    /// gets the default without persisting it.
    pub fn load(&self, group: &str, key: &str, default_supplier: &DefaultSupplier) -> Value {
        if let Some(value) = self.store.get(group, key) {
            return value;
        }
        let default = default_supplier();
        if self.store.group_state(group).read_state == ReadState::Failed {
            log::debug!(
                "group '{}' failed to load, returning default for '{}' without persisting",
                group,
                key
            );
        } else {
            self.save(group, key, default.clone());
        }
        default
    }

    /// The load outcome of a group.
    pub fn group_state(&self, group: &str) -> GroupState {
        self.store.group_state(group)
    }

    /// Flush every dirty group.
    pub fn flush_all(&self) {
        self.store.flush_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::tempdir;
    use veneer_core::geometry::Insets;

    struct SpinnerWidget {
        key: WidgetKey,
        value: Mutex<i64>,
    }

    impl SpinnerWidget {
        fn new(value: i64) -> Arc<Self> {
            Arc::new(Self {
                key: WidgetKey::next(),
                value: Mutex::new(value),
            })
        }

        fn value(&self) -> i64 {
            *self.value.lock().unwrap()
        }
    }

    impl WidgetHandle for SpinnerWidget {
        fn key(&self) -> WidgetKey {
            self.key
        }

        fn component_type(&self) -> ComponentType {
            ComponentType::Spinner
        }

        fn set_border(&self, _insets: Insets) {}

        fn set_opacity(&self, _opacity: f32) {}

        fn request_repaint(&self) {}

        fn request_layout(&self) {}

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct SpinnerProcessor;

    impl SettingsProcessor for SpinnerProcessor {
        fn component_type(&self) -> ComponentType {
            ComponentType::Spinner
        }

        fn snapshot(&self, widget: &dyn WidgetHandle) -> Option<Value> {
            let spinner = widget.as_any().downcast_ref::<SpinnerWidget>()?;
            Some(Value::Integer(spinner.value()))
        }

        fn restore(&self, widget: &dyn WidgetHandle, value: &Value) {
            if let (Some(spinner), Some(value)) = (
                widget.as_any().downcast_ref::<SpinnerWidget>(),
                value.as_integer(),
            ) {
                *spinner.value.lock().unwrap() = value;
            }
        }
    }

    fn default_of(value: i64) -> DefaultSupplier {
        Arc::new(move || Value::Integer(value))
    }

    fn manager(dir: &std::path::Path) -> SettingsManager {
        let manager = SettingsManager::new(Arc::new(SettingsStore::new(dir)));
        manager.register_processor(Arc::new(SpinnerProcessor));
        manager
    }

    #[test]
    fn value_changed_writes_through() {
        let dir = tempdir().unwrap();
        let manager = manager(dir.path());
        let spinner = SpinnerWidget::new(42);
        manager.bind(spinner.clone(), "editor", "font_size", default_of(12));

        manager.value_changed(spinner.key());

        assert_eq!(
            manager.store().get("editor", "font_size"),
            Some(Value::Integer(42))
        );
        // Write-through: a fresh store sees it on disk.
        let reread = SettingsStore::new(dir.path());
        assert_eq!(reread.get("editor", "font_size"), Some(Value::Integer(42)));
    }

    #[test]
    fn restore_applies_persisted_value() {
        let dir = tempdir().unwrap();
        {
            let store = SettingsStore::new(dir.path());
            store.set("editor", "font_size", Value::Integer(18));
            store.flush("editor").unwrap();
        }
        let manager = manager(dir.path());
        let spinner = SpinnerWidget::new(0);
        manager.bind(spinner.clone(), "editor", "font_size", default_of(12));

        manager.restore_widget(spinner.key());
        assert_eq!(spinner.value(), 18);
    }

    #[test]
    fn restore_of_fresh_group_applies_and_persists_default() {
        let dir = tempdir().unwrap();
        let manager = manager(dir.path());
        let spinner = SpinnerWidget::new(0);
        manager.bind(spinner.clone(), "editor", "font_size", default_of(12));

        manager.restore_widget(spinner.key());
        assert_eq!(spinner.value(), 12);
        let reread = SettingsStore::new(dir.path());
        assert_eq!(reread.get("editor", "font_size"), Some(Value::Integer(12)));
    }

    #[test]
    fn failed_group_default_is_not_persisted() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(dir.path().join("editor.toml"), "garbage").unwrap();

        let manager = manager(dir.path());
        let spinner = SpinnerWidget::new(0);
        manager.bind(spinner.clone(), "editor", "font_size", default_of(12));

        manager.restore_widget(spinner.key());
        assert_eq!(spinner.value(), 12);
        assert_eq!(
            manager.group_state("editor").read_state,
            ReadState::Failed
        );
        // The corrupt file was left alone.
        assert_eq!(
            fs::read_to_string(dir.path().join("editor.toml")).unwrap(),
            "garbage"
        );
    }

    #[test]
    fn binding_without_processor_is_inert() {
        struct ButtonWidget(WidgetKey);
        impl WidgetHandle for ButtonWidget {
            fn key(&self) -> WidgetKey {
                self.0
            }
            fn component_type(&self) -> ComponentType {
                ComponentType::Button
            }
            fn set_border(&self, _insets: Insets) {}
            fn set_opacity(&self, _opacity: f32) {}
            fn request_repaint(&self) {}
            fn request_layout(&self) {}
            fn as_any(&self) -> &dyn Any {
                self
            }
        }

        let dir = tempdir().unwrap();
        let manager = manager(dir.path());
        let button = Arc::new(ButtonWidget(WidgetKey::next()));
        manager.bind(button.clone(), "editor", "state", default_of(0));
        assert!(manager.is_bound(button.key()));

        manager.value_changed(button.key());
        manager.restore_widget(button.key());
        assert_eq!(manager.store().get("editor", "state"), None);
    }

    #[test]
    fn reregistering_replaces_processor_for_new_bindings() {
        struct DoublingProcessor;
        impl SettingsProcessor for DoublingProcessor {
            fn component_type(&self) -> ComponentType {
                ComponentType::Spinner
            }
            fn snapshot(&self, widget: &dyn WidgetHandle) -> Option<Value> {
                let spinner = widget.as_any().downcast_ref::<SpinnerWidget>()?;
                Some(Value::Integer(spinner.value() * 2))
            }
            fn restore(&self, _widget: &dyn WidgetHandle, _value: &Value) {}
        }

        let dir = tempdir().unwrap();
        let manager = manager(dir.path());
        let old = SpinnerWidget::new(5);
        manager.bind(old.clone(), "editor", "old", default_of(0));

        manager.register_processor(Arc::new(DoublingProcessor));
        let new = SpinnerWidget::new(5);
        manager.bind(new.clone(), "editor", "new", default_of(0));

        manager.value_changed(old.key());
        manager.value_changed(new.key());
        // The old binding kept the processor it was bound with.
        assert_eq!(
            manager.store().get("editor", "old"),
            Some(Value::Integer(5))
        );
        assert_eq!(
            manager.store().get("editor", "new"),
            Some(Value::Integer(10))
        );
    }

    #[test]
    fn unbind_is_idempotent() {
        let dir = tempdir().unwrap();
        let manager = manager(dir.path());
        let spinner = SpinnerWidget::new(1);
        manager.bind(spinner.clone(), "editor", "font_size", default_of(12));

        manager.unbind(spinner.key());
        assert!(!manager.is_bound(spinner.key()));
        manager.unbind(spinner.key());

        manager.value_changed(spinner.key());
        assert_eq!(manager.store().get("editor", "font_size"), None);
    }
}
