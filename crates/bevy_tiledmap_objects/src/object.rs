//! Map objects: the named, positioned items stored in object groups.

use bevy::prelude::*;

use crate::ids::{InstanceId, ObjectGroupId, ObjectId};
use crate::tileset::TileRef;

/// A single object on an object layer.
///
/// Position is the top-left corner in map pixel coordinates (Tiled's convention, y grows
/// downward). Objects are owned by at most one [`ObjectGroup`](crate::ObjectGroup) at a
/// time; the group records itself in [`object_group`](Self::object_group) while it owns
/// the object.
#[derive(Debug)]
pub struct MapObject {
    instance: InstanceId,
    id: ObjectId,
    name: String,
    position: Vec2,
    size: Vec2,
    cell: Option<TileRef>,
    object_group: Option<ObjectGroupId>,
}

impl MapObject {
    /// Create an unassigned object with the given name and geometry.
    pub fn new(name: impl Into<String>, position: Vec2, size: Vec2) -> Self {
        Self {
            instance: InstanceId::next(),
            id: ObjectId::UNASSIGNED,
            name: name.into(),
            position,
            size,
            cell: None,
            object_group: None,
        }
    }

    /// Builder-style tile assignment.
    pub fn with_cell(mut self, cell: TileRef) -> Self {
        self.cell = Some(cell);
        self
    }

    /// Builder-style ID assignment, for objects restored with a known ID.
    pub fn with_id(mut self, id: ObjectId) -> Self {
        self.id = id;
        self
    }

    #[inline]
    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn set_id(&mut self, id: ObjectId) {
        self.id = id;
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    /// Bounding rectangle spanning `position .. position + size`.
    pub fn bounds(&self) -> Rect {
        Rect::from_corners(self.position, self.position + self.size)
    }

    /// Tile displayed by this object, if it is a tile object.
    #[inline]
    pub fn cell(&self) -> Option<&TileRef> {
        self.cell.as_ref()
    }

    pub fn set_cell(&mut self, cell: Option<TileRef>) {
        self.cell = cell;
    }

    /// The object group currently owning this object.
    #[inline]
    pub fn object_group(&self) -> Option<ObjectGroupId> {
        self.object_group
    }

    pub(crate) fn set_object_group(&mut self, group: Option<ObjectGroupId>) {
        self.object_group = group;
    }

    /// Identity comparison: true only for the very same object instance.
    #[inline]
    pub fn equals(&self, other: &MapObject) -> bool {
        self.instance == other.instance
    }
}

impl Clone for MapObject {
    /// Copies ID, name, geometry and tile. The clone is a distinct instance and is not
    /// owned by any object group.
    fn clone(&self) -> Self {
        Self {
            instance: InstanceId::next(),
            id: self.id,
            name: self.name.clone(),
            position: self.position,
            size: self.size,
            cell: self.cell.clone(),
            object_group: None,
        }
    }
}
