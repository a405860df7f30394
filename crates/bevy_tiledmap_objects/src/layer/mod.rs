//! Layer kinds and the object layer.

pub mod draw_order;
pub mod object_group;
pub(crate) mod sort;

pub use draw_order::{DrawOrder, draw_order_from_string, draw_order_to_string};
pub use object_group::ObjectGroup;
pub use sort::compare_names;

/// Layer type of a map layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Tile layer
    Tiles,
    /// Object layer
    Objects,
    /// Image layer
    Image,
    /// Group layer - hierarchical container for other layers
    Group,
}

/// Common surface of map layers, used when combining layers of possibly different kinds.
pub trait Layer {
    /// What kind of layer this is.
    fn kind(&self) -> LayerKind;

    /// Layer name as shown in the editor.
    fn name(&self) -> &str;

    /// Downcast to an object layer.
    fn as_object_group(&self) -> Option<&ObjectGroup> {
        None
    }
}
