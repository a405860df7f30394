//! # bevy_tiledmap_edit
//!
//! Editing-side model for Tiled maps in Bevy.
//!
//! This is a meta-crate over the `bevy_tiledmap_*` editing crates, re-exporting them
//! behind a single dependency and prelude.
//!
//! ## Quick Start
//!
//! ```rust
//! use bevy::prelude::*;
//! use bevy_tiledmap_edit::prelude::*;
//!
//! let mut layer = ObjectGroup::new("decor", 0, 0, 16, 16);
//! layer.add_object(MapObject::new("lamp", Vec2::new(8.0, 8.0), Vec2::splat(16.0)));
//! layer.offset_objects(Vec2::new(32.0, 0.0), Rect::new(0.0, 0.0, 256.0, 256.0), true, true);
//! assert_eq!(layer.objects()[0].position(), Vec2::new(40.0, 8.0));
//! ```
//!
//! ## Crates
//!
//! - [`objects`]: object layers - ownership, name ordering, offset, merge, clone, draw order

// Re-export sub-crates for advanced usage
pub use bevy_tiledmap_objects as objects;

/// Unified prelude for bevy_tiledmap_edit
///
/// # Example
///
/// ```rust
/// use bevy_tiledmap_edit::prelude::*;
///
/// assert_eq!(draw_order_from_string("index"), DrawOrder::Index);
/// ```
pub mod prelude {
    pub use crate::objects::prelude::*;
}
