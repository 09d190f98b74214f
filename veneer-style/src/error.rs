//! # Style Error Types
//!
//! Error types for the style subsystem. Configuration-time problems
//! (duplicate registrations, broken skin documents) are hard errors;
//! resolution misses at runtime are absorbed by the manager's fallback
//! chain and never reach the embedding application as errors.

use std::path::PathBuf;

use thiserror::Error;
use veneer_core::component::ComponentType;

/// Errors that can occur in the style subsystem.
#[derive(Error, Debug)]
pub enum StyleError {
    /// A (component type, style id) pair was registered twice without the
    /// override flag.
    #[error("Style '{style_id}' is already registered for component '{component}'")]
    DuplicateStyle {
        /// The component type of the colliding registration.
        component: ComponentType,
        /// The colliding style id.
        style_id: String,
    },

    /// A style id was referenced that is not registered for the component.
    #[error("Style '{style_id}' is not registered for component '{component}'")]
    UnknownStyle {
        /// The component type the lookup was scoped to.
        component: ComponentType,
        /// The missing style id.
        style_id: String,
    },

    /// No style could be resolved anywhere in the fallback chain.
    #[error("No style resolvable for component '{component}' (no built-in default registered)")]
    Resolution {
        /// The component type that could not be resolved.
        component: ComponentType,
    },

    /// The skin document file was not found.
    #[error("Skin file not found: {path:?}")]
    SkinFileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The skin document failed to parse.
    #[error("Failed to parse skin document: {details}")]
    SkinParse {
        /// Details about the parse error.
        details: String,
    },

    /// A style in a skin document names a parent that does not exist.
    #[error("Style '{style_id}' for component '{component}' names unknown parent '{parent}'")]
    MissingParent {
        /// The component type the style belongs to.
        component: ComponentType,
        /// The style with the broken parent reference.
        style_id: String,
        /// The missing parent style id.
        parent: String,
    },

    /// A parent-style chain in a skin document forms a cycle.
    #[error("Cyclic parent chain for component '{component}': {chain}")]
    CyclicParent {
        /// The component type the cycle was found in.
        component: ComponentType,
        /// The chain of style ids forming the cycle, `a -> b -> a`.
        chain: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for style operations.
pub type StyleResult<T> = Result<T, StyleError>;

impl StyleError {
    /// Create a duplicate style error.
    pub fn duplicate(component: ComponentType, style_id: impl Into<String>) -> Self {
        Self::DuplicateStyle {
            component,
            style_id: style_id.into(),
        }
    }

    /// Create an unknown style error.
    pub fn unknown(component: ComponentType, style_id: impl Into<String>) -> Self {
        Self::UnknownStyle {
            component,
            style_id: style_id.into(),
        }
    }

    /// Create a skin parse error.
    pub fn parse(details: impl Into<String>) -> Self {
        Self::SkinParse {
            details: details.into(),
        }
    }

    /// Create a missing parent error.
    pub fn missing_parent(
        component: ComponentType,
        style_id: impl Into<String>,
        parent: impl Into<String>,
    ) -> Self {
        Self::MissingParent {
            component,
            style_id: style_id.into(),
            parent: parent.into(),
        }
    }

    /// Create a cyclic parent error from the chain of visited style ids.
    pub fn cyclic(component: ComponentType, chain: &[String]) -> Self {
        Self::CyclicParent {
            component,
            chain: chain.join(" -> "),
        }
    }
}
