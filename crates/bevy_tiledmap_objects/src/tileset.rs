//! Shared tileset handles and tile references held by tile objects.

use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// Minimal tileset description needed by object layers.
///
/// Object groups never look inside a tileset beyond "which tiles exist", so only
/// the name and tile count are kept here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tileset {
    /// Display name of the tileset
    pub name: String,
    /// Number of tiles; valid local tile IDs are `0..tile_count`
    pub tile_count: u32,
}

impl Tileset {
    /// Create a tileset description.
    pub fn new(name: impl Into<String>, tile_count: u32) -> Self {
        Self {
            name: name.into(),
            tile_count,
        }
    }
}

/// Reference-counted tileset handle.
///
/// Equality and hashing are by pointer identity: two handles are equal only when they
/// point at the same tileset allocation, regardless of its contents.
#[derive(Debug, Clone)]
pub struct SharedTileset(Arc<Tileset>);

impl SharedTileset {
    /// Wrap a tileset in a new shared handle.
    pub fn new(tileset: Tileset) -> Self {
        Self(Arc::new(tileset))
    }

    /// Reference to the tile with the given local ID, if this tileset has one.
    pub fn tile_at(&self, tile_id: u32) -> Option<TileRef> {
        (tile_id < self.0.tile_count).then(|| TileRef {
            tileset: self.clone(),
            tile_id,
        })
    }

    /// Whether both handles point at the same tileset.
    #[inline]
    pub fn ptr_eq(&self, other: &SharedTileset) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SharedTileset {
    type Target = Tileset;

    fn deref(&self) -> &Tileset {
        &self.0
    }
}

impl PartialEq for SharedTileset {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for SharedTileset {}

impl Hash for SharedTileset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state);
    }
}

/// A tile cell carried by a tile object: which tileset, which tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRef {
    /// Tileset the tile belongs to
    pub tileset: SharedTileset,
    /// Local tile ID (0-based, NOT a GID)
    pub tile_id: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_not_contents() {
        let a = SharedTileset::new(Tileset::new("terrain", 4));
        let b = SharedTileset::new(Tileset::new("terrain", 4));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_tile_at_bounds() {
        let tileset = SharedTileset::new(Tileset::new("props", 2));
        assert_eq!(tileset.tile_at(1).map(|tile| tile.tile_id), Some(1));
        assert!(tileset.tile_at(2).is_none());
    }
}
