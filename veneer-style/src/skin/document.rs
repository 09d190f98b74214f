//! # Document-Backed Skins
//!
//! Skins declared in a TOML document, loaded eagerly and atomically.
//!
//! The whole document is parsed, validated and flattened inside
//! [DocumentSkin::from_toml]: parent style chains are resolved (cycles and
//! missing parents are descriptive load errors, never infinite loops) and
//! every property value is converted to a typed [StyleValue]. A malformed
//! document fails the entire load; no partially-applied skin ever reaches
//! the style manager, so the previously active skin stays installed when
//! a load fails.
//!
//! ## Document format
//!
//! ```toml
//! [skin]
//! id = "flat-dark"
//! name = "Flat Dark"
//! platforms = ["linux", "windows"]
//!
//! [[styles]]
//! component = "button"
//! id = "flat"
//! painter = "flat"
//! default = true
//!
//! [styles.properties]
//! background = "#202020"
//! round = 4.0
//! margin = [2, 4, 2, 4]
//!
//! [[styles]]
//! component = "button"
//! id = "accent"
//! parent = "flat"
//!
//! [styles.properties]
//! background = "#4060ff"
//! ```
//!
//! Property values map to [StyleValue] by shape: `#rrggbb[aa]` strings are
//! colors, other strings are plain strings, integers/floats/bools map
//! directly, and `[t, r, b, l]` integer arrays are margins.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use veneer_core::color::Rgba;
use veneer_core::component::ComponentType;
use veneer_core::geometry::Insets;

use crate::descriptor::StyleDescriptor;
use crate::error::{StyleError, StyleResult};
use crate::skin::Skin;
use crate::value::StyleValue;

/// The raw deserialized form of a skin document.
#[derive(Debug, Deserialize)]
pub struct SkinDocument {
    /// Skin metadata.
    pub skin: SkinMeta,
    /// Declared styles.
    #[serde(default)]
    pub styles: Vec<StyleEntry>,
}

/// Metadata header of a skin document.
#[derive(Debug, Deserialize)]
pub struct SkinMeta {
    /// Stable skin identifier.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// Supported platforms; empty means all.
    #[serde(default)]
    pub platforms: Vec<String>,
}

/// One declared style in a skin document.
#[derive(Debug, Deserialize)]
pub struct StyleEntry {
    /// Component type name (see `ComponentType::as_str`).
    pub component: ComponentType,
    /// Style id, unique per component type within the document.
    pub id: String,
    /// Parent style id to inherit from, within the same component type.
    #[serde(default)]
    pub parent: Option<String>,
    /// Painter factory id.
    #[serde(default)]
    pub painter: Option<String>,
    /// Whether the style is direction-sensitive.
    #[serde(default)]
    pub mirrored: bool,
    /// Whether this is the component type's default style.
    #[serde(default)]
    pub default: bool,
    /// Property bag, converted to typed values at load time.
    #[serde(default)]
    pub properties: toml::Table,
}

/// A skin loaded from a TOML document.
///
/// All inheritance is flattened at construction; lookups are plain map
/// reads.
#[derive(Debug)]
pub struct DocumentSkin {
    id: String,
    name: String,
    platforms: Vec<String>,
    styles: HashMap<(ComponentType, String), StyleDescriptor>,
    defaults: HashMap<ComponentType, String>,
}

impl DocumentSkin {
    /// Load a skin from TOML text.
    ///
    /// Fails atomically: any parse, conversion or inheritance error
    /// rejects the whole document.
    pub fn from_toml(content: &str) -> StyleResult<Self> {
        let document: SkinDocument =
            toml::from_str(content).map_err(|e| StyleError::parse(e.to_string()))?;
        Self::from_document(document)
    }

    /// Load a skin document from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> StyleResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StyleError::SkinFileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        let skin = Self::from_toml(&content)?;
        log::info!("loaded skin '{}' from {:?}", skin.id, path);
        Ok(skin)
    }

    /// Build a skin from an already-parsed document tree.
    pub fn from_document(document: SkinDocument) -> StyleResult<Self> {
        // Raw descriptors first; duplicates are load errors.
        let mut raw: HashMap<(ComponentType, String), StyleDescriptor> = HashMap::new();
        let mut defaults: HashMap<ComponentType, String> = HashMap::new();
        let mut declaration_order: Vec<(ComponentType, String)> = Vec::new();

        for entry in document.styles {
            let key = (entry.component, entry.id.clone());
            if raw.contains_key(&key) {
                return Err(StyleError::duplicate(entry.component, entry.id));
            }
            if entry.default {
                if let Some(previous) = defaults.insert(entry.component, entry.id.clone()) {
                    return Err(StyleError::parse(format!(
                        "component '{}' declares two default styles: '{}' and '{}'",
                        entry.component, previous, entry.id
                    )));
                }
            }
            declaration_order.push(key.clone());
            raw.insert(key, descriptor_from_entry(entry)?);
        }

        // First declared style of a type is the default unless flagged.
        for (component, style_id) in &declaration_order {
            defaults
                .entry(*component)
                .or_insert_with(|| style_id.clone());
        }

        // Flatten parent chains, memoized, with cycle detection.
        let mut flattened: HashMap<(ComponentType, String), StyleDescriptor> = HashMap::new();
        for key in &declaration_order {
            let mut chain = Vec::new();
            flatten(key, &raw, &mut flattened, &mut chain)?;
        }

        Ok(Self {
            id: document.skin.id,
            name: document.skin.name,
            platforms: document.skin.platforms,
            styles: flattened,
            defaults,
        })
    }
}

impl Skin for DocumentSkin {
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

fn descriptor_from_entry(entry: StyleEntry) -> StyleResult<StyleDescriptor> {
    let mut descriptor = StyleDescriptor::new(entry.component, &entry.id);
    if let Some(parent) = entry.parent {
        descriptor = descriptor.with_parent(parent);
    }
    if let Some(painter) = entry.painter {
        descriptor = descriptor.with_painter(painter);
    }
    descriptor = descriptor.with_mirrored(entry.mirrored);
    for (key, value) in entry.properties {
        let converted = convert_value(&value).map_err(|details| {
            StyleError::parse(format!(
                "style '{}' for component '{}', property '{}': {}",
                entry.id, entry.component, key, details
            ))
        })?;
        descriptor = descriptor.with_property(key, converted);
    }
    Ok(descriptor)
}

/// Convert one TOML property value to a typed style value.
///
/// `#rrggbb[aa]` strings are colors, `[t, r, b, l]` integer arrays are
/// margins; everything else maps by TOML type.
fn convert_value(value: &toml::Value) -> Result<StyleValue, String> {
    match value {
        toml::Value::String(s) if s.starts_with('#') => Rgba::parse_hex(s).map(StyleValue::Color),
        toml::Value::String(s) => Ok(StyleValue::Str(s.clone())),
        toml::Value::Integer(i) => i32::try_from(*i)
            .map(StyleValue::Int)
            .map_err(|_| format!("integer {} out of range", i)),
        toml::Value::Float(f) => Ok(StyleValue::Float(*f as f32)),
        toml::Value::Boolean(b) => Ok(StyleValue::Bool(*b)),
        toml::Value::Array(items) => {
            let sides: Vec<i32> = items
                .iter()
                .map(|item| {
                    item.as_integer()
                        .and_then(|i| i32::try_from(i).ok())
                        .ok_or_else(|| "margin entries must be integers".to_string())
                })
                .collect::<Result<_, _>>()?;
            match <[i32; 4]>::try_from(sides) {
                Ok(tuple) => Ok(StyleValue::Insets(Insets::from(tuple))),
                Err(_) => Err("margin arrays must have exactly 4 entries".to_string()),
            }
        },
        other => Err(format!("unsupported property type '{}'", other.type_str())),
    }
}

/// Flatten a style over its parent chain, memoizing results in `done`.
///
/// `chain` carries the ids visited along the current walk; revisiting one
/// is a cycle.
fn flatten(
    key: &(ComponentType, String),
    raw: &HashMap<(ComponentType, String), StyleDescriptor>,
    done: &mut HashMap<(ComponentType, String), StyleDescriptor>,
    chain: &mut Vec<String>,
) -> StyleResult<StyleDescriptor> {
    if let Some(resolved) = done.get(key) {
        return Ok(resolved.clone());
    }
    if chain.contains(&key.1) {
        chain.push(key.1.clone());
        return Err(StyleError::cyclic(key.0, chain));
    }

    let descriptor = raw
        .get(key)
        .cloned()
        .ok_or_else(|| StyleError::unknown(key.0, key.1.clone()))?;

    let resolved = match descriptor.parent() {
        None => descriptor.clone(),
        Some(parent_id) => {
            let parent_key = (key.0, parent_id.to_string());
            if !raw.contains_key(&parent_key) {
                return Err(StyleError::missing_parent(key.0, &key.1, parent_id));
            }
            chain.push(key.1.clone());
            let parent = flatten(&parent_key, raw, done, chain)?;
            chain.pop();
            descriptor.merged_over(&parent)
        },
    };

    done.insert(key.clone(), resolved.clone());
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::keys;

    const FLAT_SKIN: &str = r##"
        [skin]
        id = "flat"
        name = "Flat"

        [[styles]]
        component = "button"
        id = "base"
        painter = "flat"
        default = true

        [styles.properties]
        background = "#202020"
        round = 4.0
        margin = [2, 4, 2, 4]

        [[styles]]
        component = "button"
        id = "accent"
        parent = "base"

        [styles.properties]
        background = "#4060ff"
    "##;

    #[test]
    fn loads_and_flattens_inheritance() {
        let skin = DocumentSkin::from_toml(FLAT_SKIN).unwrap();
        assert_eq!(skin.id(), "flat");

        let accent = skin.style(ComponentType::Button, "accent").unwrap();
        assert_eq!(accent.parent(), None, "parents are flattened at load");
        assert_eq!(accent.painter_id(), Some("flat"), "painter inherited");
        assert_eq!(accent.properties().get_float(keys::ROUND), Some(4.0));
        assert_eq!(
            accent.properties().get_color(keys::BACKGROUND),
            Some(Rgba::parse_hex("#4060ff").unwrap())
        );
        assert_eq!(
            accent.properties().get_insets(keys::MARGIN),
            Some(Insets::new(2, 4, 2, 4))
        );
    }

    #[test]
    fn default_flag_designates_type_default() {
        let skin = DocumentSkin::from_toml(FLAT_SKIN).unwrap();
        assert_eq!(
            skin.default_style_id(ComponentType::Button),
            Some("base".to_string())
        );
    }

    #[test]
    fn cyclic_parent_chain_is_a_load_error() {
        let doc = r#"
            [skin]
            id = "bad"
            name = "Bad"

            [[styles]]
            component = "button"
            id = "a"
            parent = "b"

            [[styles]]
            component = "button"
            id = "b"
            parent = "a"
        "#;
        let err = DocumentSkin::from_toml(doc).unwrap_err();
        assert!(matches!(err, StyleError::CyclicParent { .. }), "{err}");
    }

    #[test]
    fn self_parent_is_a_cycle() {
        let doc = r#"
            [skin]
            id = "bad"
            name = "Bad"

            [[styles]]
            component = "button"
            id = "a"
            parent = "a"
        "#;
        let err = DocumentSkin::from_toml(doc).unwrap_err();
        assert!(matches!(err, StyleError::CyclicParent { .. }));
    }

    #[test]
    fn missing_parent_is_a_load_error() {
        let doc = r#"
            [skin]
            id = "bad"
            name = "Bad"

            [[styles]]
            component = "button"
            id = "a"
            parent = "ghost"
        "#;
        let err = DocumentSkin::from_toml(doc).unwrap_err();
        assert!(matches!(err, StyleError::MissingParent { .. }));
    }

    #[test]
    fn duplicate_style_id_is_a_load_error() {
        let doc = r#"
            [skin]
            id = "bad"
            name = "Bad"

            [[styles]]
            component = "button"
            id = "a"

            [[styles]]
            component = "button"
            id = "a"
        "#;
        let err = DocumentSkin::from_toml(doc).unwrap_err();
        assert!(matches!(err, StyleError::DuplicateStyle { .. }));
    }

    #[test]
    fn malformed_color_is_a_load_error() {
        let doc = r##"
            [skin]
            id = "bad"
            name = "Bad"

            [[styles]]
            component = "button"
            id = "a"

            [styles.properties]
            background = "#zzz"
        "##;
        let err = DocumentSkin::from_toml(doc).unwrap_err();
        assert!(matches!(err, StyleError::SkinParse { .. }));
    }

    #[test]
    fn unknown_component_name_is_a_load_error() {
        let doc = r#"
            [skin]
            id = "bad"
            name = "Bad"

            [[styles]]
            component = "glasspane"
            id = "a"
        "#;
        assert!(DocumentSkin::from_toml(doc).is_err());
    }

    #[test]
    fn deep_chain_flattens_through_all_levels() {
        let doc = r##"
            [skin]
            id = "deep"
            name = "Deep"

            [[styles]]
            component = "panel"
            id = "root"

            [styles.properties]
            round = 1.0
            background = "#111111"

            [[styles]]
            component = "panel"
            id = "mid"
            parent = "root"

            [styles.properties]
            round = 2.0

            [[styles]]
            component = "panel"
            id = "leaf"
            parent = "mid"

            [styles.properties]
            foreground = "#eeeeee"
        "##;
        let skin = DocumentSkin::from_toml(doc).unwrap();
        let leaf = skin.style(ComponentType::Panel, "leaf").unwrap();
        assert_eq!(leaf.properties().get_float(keys::ROUND), Some(2.0));
        assert_eq!(
            leaf.properties().get_color(keys::BACKGROUND),
            Some(Rgba::parse_hex("#111111").unwrap())
        );
        assert_eq!(
            leaf.properties().get_color(keys::FOREGROUND),
            Some(Rgba::parse_hex("#eeeeee").unwrap())
        );
    }
}
