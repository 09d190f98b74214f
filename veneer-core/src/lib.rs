#![warn(missing_docs)]

//! # Veneer Core Primitives
//!
//! Shared primitives for the veneer look-and-feel core. This crate defines
//! the vocabulary both the style subsystem and the settings subsystem speak:
//! the closed set of supported widget kinds, the capability interface a host
//! toolkit implements per widget, and the small geometry/color value types
//! that flow through style descriptors.
//!
//! ## Overview
//!
//! - **[ComponentType](component::ComponentType)**: the closed enum of
//!   widget kinds, used as the join key between a live widget and its
//!   style descriptor or settings processor
//! - **[WidgetHandle](widget::WidgetHandle)**: the capability trait through
//!   which the core talks back to the host toolkit
//! - **[WidgetKey](widget::WidgetKey)**: opaque per-instance identity
//! - **[Rgba](color::Rgba)** and **[Insets](geometry::Insets)**: style
//!   value types with hex / 4-tuple serde representations
//!
//! This crate deliberately has no opinion about drawing: it only carries
//! tags, identities and plain values across the widget boundary.

/// Contains the [component::ComponentType] enum.
pub mod component;
/// Contains the [color::Rgba] color type and its hex serde codec.
pub mod color;
/// Contains the [geometry::Insets] margin type.
pub mod geometry;
/// Contains the [widget::WidgetHandle] capability trait.
pub mod widget;

pub use color::Rgba;
pub use component::ComponentType;
pub use geometry::Insets;
pub use widget::{TextDirection, WidgetHandle, WidgetKey};
