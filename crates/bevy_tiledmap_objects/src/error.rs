//! Error types for object group operations and configuration loading.

use bevy::color::HexColorError;
use thiserror::Error;

use crate::ids::InstanceId;
use crate::layer::LayerKind;

/// Precondition failures of [`ObjectGroup`](crate::ObjectGroup) operations.
///
/// These describe caller mistakes. The panicking operations report them as the panic
/// message; the `try_*` variants return them instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectGroupError {
    /// An index was outside the valid range.
    #[error("Index {index} is out of range for an object group of {len} objects")]
    IndexOutOfRange { index: usize, len: usize },
    /// The object is not owned by this group.
    #[error("Object {0:?} is not in this object group")]
    ObjectNotFound(InstanceId),
    /// The destination of a move lies inside the moved range, or the range exceeds the group.
    #[error("Cannot move {count} objects from {from} to {to} in a group of {len} objects")]
    InvalidMove {
        from: usize,
        to: usize,
        count: usize,
        len: usize,
    },
    /// Merging requires another object layer.
    #[error("Cannot merge an object group with a {0:?} layer")]
    IncompatibleLayer(LayerKind),
}

/// Errors raised while turning an [`ObjectGroupConfig`](crate::ObjectGroupConfig) into a group.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config JSON could not be parsed.
    #[error("Failed to parse object group config: {0}")]
    Json(#[from] serde_json::Error),
    /// The color string is not a valid hex color.
    #[error("Invalid layer color '{value}': {source}")]
    InvalidColor {
        value: String,
        #[source]
        source: HexColorError,
    },
}
