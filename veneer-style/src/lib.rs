#![warn(missing_docs)]

//! # Veneer Style System
//!
//! The skin resolution and widget decoration engine of the veneer
//! look-and-feel core.
//!
//! ## Overview
//!
//! The style system consists of several key components:
//!
//! - **[StyleDescriptor](descriptor::StyleDescriptor)**: resolved style
//!   data for one component type + style id, with optional parent
//!   inheritance
//! - **[StyleRegistry](registry::StyleRegistry)**: the built-in default
//!   styles every component type can always fall back to
//! - **[Skin](skin::Skin)**: a complete, swappable visual theme bundle,
//!   either programmatic ([StaticSkin](skin::StaticSkin)) or loaded from
//!   a TOML document ([DocumentSkin](skin::document::DocumentSkin))
//! - **[Painter](painter::Painter)**: the per-widget-instance decoration
//!   object, created from an explicit factory registry
//! - **[StyleManager](manager::StyleManager)**: the runtime engine that
//!   binds live widgets to painters and re-resolves them on skin change
//!
//! ## Resolution order
//!
//! For a tracked widget the manager resolves its style descriptor in a
//! fixed tie-break order:
//!
//! 1. the explicit style id set on the widget instance, looked up in the
//!    active skin and then among directly registered styles,
//! 2. the active skin's type-level mapping for the widget's
//!    [ComponentType](veneer_core::component::ComponentType),
//! 3. the style registry's built-in default for that component type.
//!
//! A style is never silently absent: with a registry seeded through
//! [StyleRegistry::with_builtin_defaults](registry::StyleRegistry::with_builtin_defaults)
//! step 3 always succeeds.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use veneer_style::manager::StyleManager;
//! use veneer_style::painter::PainterRegistry;
//! use veneer_style::registry::StyleRegistry;
//! use veneer_style::skin::document::DocumentSkin;
//!
//! let skin = DocumentSkin::from_file("skins/flat.toml").unwrap();
//! let manager = StyleManager::new(
//!     StyleRegistry::with_builtin_defaults(),
//!     PainterRegistry::with_builtins(),
//!     Box::new(skin),
//! );
//! ```

/// Contains the [descriptor::StyleDescriptor] struct.
pub mod descriptor;
/// Contains the [error::StyleError] type.
pub mod error;
/// Contains the [manager::StyleManager] runtime engine.
pub mod manager;
/// Contains the [painter::Painter] trait and factory registry.
pub mod painter;
/// Contains the [registry::StyleRegistry] struct.
pub mod registry;
/// Contains the [skin::Skin] trait and skin implementations.
pub mod skin;
/// Contains the [value::StyleValue] property bag types.
pub mod value;
