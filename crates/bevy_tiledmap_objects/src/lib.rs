//! # `bevy_tiledmap_objects`
//!
//! Object layer model for `bevy_tiled` editors and tools. An [`ObjectGroup`] owns an
//! ordered list of [`MapObject`]s and keeps each object's back-reference to its group in
//! sync as objects move in and out.
//!
//! **This crate does NOT load or save maps, and does NOT render anything** - it is the
//! in-memory layer model that loaders and editors build on.
//!
//! ## What It Provides
//!
//! 1. **Ownership**: append, insert, remove by identity or index, range moves
//! 2. **Name ordering**: inserting re-sorts the layer by case-insensitive object name
//! 3. **Bulk edits**: offsetting objects inside a region, with optional wrap-around
//! 4. **Layer operations**: deep clone, merging two object layers
//! 5. **Tileset references**: listing and remapping tilesets used by tile objects
//! 6. **Draw order**: the `draworder` attribute and its string codec
//!
//! ## Object IDs
//!
//! Object IDs are handed out by the owning map through an [`ObjectIdProvider`]. Groups
//! without a provider leave new objects at [`ObjectId::UNASSIGNED`].
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use bevy::prelude::*;
//! use bevy_tiledmap_objects::prelude::*;
//!
//! let ids = Arc::new(NextObjectId::default());
//! let mut group = ObjectGroup::new("spawns", 0, 0, 20, 15).with_id_provider(ids);
//!
//! group.insert_object(0, MapObject::new("player", Vec2::new(32.0, 48.0), Vec2::splat(16.0)));
//! group.insert_object(1, MapObject::new("Chest", Vec2::new(64.0, 48.0), Vec2::splat(16.0)));
//!
//! let names: Vec<&str> = group.objects().iter().map(MapObject::name).collect();
//! assert_eq!(names, ["Chest", "player"]);
//! assert_eq!(group.objects()[1].id(), ObjectId(1));
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod layer;
pub mod object;
pub mod tileset;

pub mod prelude {
    //! Common imports for `bevy_tiledmap_objects` users.

    pub use crate::config::ObjectGroupConfig;
    pub use crate::error::{ConfigError, ObjectGroupError};
    pub use crate::ids::{InstanceId, NextObjectId, ObjectGroupId, ObjectId, ObjectIdProvider};
    pub use crate::layer::{
        DrawOrder, Layer, LayerKind, ObjectGroup, compare_names, draw_order_from_string,
        draw_order_to_string,
    };
    pub use crate::object::MapObject;
    pub use crate::tileset::{SharedTileset, TileRef, Tileset};
}

// Re-export the main types at crate root for convenience
pub use config::ObjectGroupConfig;
pub use layer::{DrawOrder, Layer, LayerKind, ObjectGroup};
pub use object::MapObject;
