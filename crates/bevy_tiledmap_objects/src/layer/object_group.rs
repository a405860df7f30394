//! Object layer: an owned, ordered list of map objects.

use std::fmt;
use std::sync::Arc;

use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::error::ObjectGroupError;
use crate::ids::{InstanceId, ObjectGroupId, ObjectIdProvider};
use crate::layer::draw_order::DrawOrder;
use crate::layer::sort::sort_by_name;
use crate::layer::{Layer, LayerKind};
use crate::object::MapObject;
use crate::tileset::SharedTileset;

/// An object layer.
///
/// Owns its objects: adding an object moves it into the group, removing hands it back to
/// the caller, and dropping the group drops every object it still holds. While owned, each
/// object's [`MapObject::object_group`] points at this group's [`id`](Self::id).
///
/// Objects are stored in insertion order. [`insert_object`](Self::insert_object) re-sorts
/// the whole group by case-insensitive name; [`add_object`](Self::add_object) appends
/// without sorting.
///
/// Not internally synchronized. Share behind a lock if several threads need to mutate it.
pub struct ObjectGroup {
    id: ObjectGroupId,
    name: String,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    opacity: f32,
    visible: bool,
    color: Option<Color>,
    draw_order: DrawOrder,
    objects: Vec<MapObject>,
    id_provider: Option<Arc<dyn ObjectIdProvider>>,
}

impl ObjectGroup {
    /// Create an empty object layer with top-down draw order.
    pub fn new(name: impl Into<String>, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            id: ObjectGroupId::next(),
            name: name.into(),
            x,
            y,
            width,
            height,
            opacity: 1.0,
            visible: true,
            color: None,
            draw_order: DrawOrder::TopDown,
            objects: Vec::new(),
            id_provider: None,
        }
    }

    /// Builder-style identity provider, normally the owning map.
    pub fn with_id_provider(mut self, provider: Arc<dyn ObjectIdProvider>) -> Self {
        self.id_provider = Some(provider);
        self
    }

    /// Attach to (or detach from) the map that assigns object IDs.
    ///
    /// Without a provider, objects keep whatever ID they arrive with.
    pub fn set_id_provider(&mut self, provider: Option<Arc<dyn ObjectIdProvider>>) {
        self.id_provider = provider;
    }

    pub fn has_id_provider(&self) -> bool {
        self.id_provider.is_some()
    }

    /// Identity of this group, as recorded on the objects it owns.
    #[inline]
    pub fn id(&self) -> ObjectGroupId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Layer offset in tiles.
    #[inline]
    pub fn position(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn set_position(&mut self, position: IVec2) {
        self.x = position.x;
        self.y = position.y;
    }

    /// Layer size in tiles.
    #[inline]
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    pub fn set_size(&mut self, size: IVec2) {
        self.width = size.x;
        self.height = size.y;
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Color used to draw this layer's objects; `None` uses the editor default.
    #[inline]
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    #[inline]
    pub fn draw_order(&self) -> DrawOrder {
        self.draw_order
    }

    pub fn set_draw_order(&mut self, draw_order: DrawOrder) {
        self.draw_order = draw_order;
    }

    // ===== OBJECT ACCESS =====

    /// Objects in their current order.
    #[inline]
    pub fn objects(&self) -> &[MapObject] {
        &self.objects
    }

    #[inline]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn object_at(&self, index: usize) -> Option<&MapObject> {
        self.objects.get(index)
    }

    /// Mutable access to one object. The object stays owned by this group.
    pub fn object_at_mut(&mut self, index: usize) -> Option<&mut MapObject> {
        self.objects.get_mut(index)
    }

    /// Position of the object instance in this group.
    pub fn index_of(&self, instance: InstanceId) -> Option<usize> {
        self.objects
            .iter()
            .position(|object| object.instance() == instance)
    }

    /// Whether the group holds no objects.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    // ===== MUTATION =====

    /// Take ownership of `object`: record the back-reference and assign an ID if needed.
    fn adopt(&self, object: &mut MapObject) {
        object.set_object_group(Some(self.id));
        if object.id().is_assigned() {
            return;
        }
        if let Some(provider) = &self.id_provider {
            object.set_id(provider.take_next_object_id());
        }
    }

    /// Append `object` at the end without re-sorting.
    pub fn add_object(&mut self, mut object: MapObject) {
        self.adopt(&mut object);
        self.objects.push(object);
    }

    /// Insert `object` at `index`, then re-sort the whole group by name.
    ///
    /// # Panics
    ///
    /// Panics if `index > self.object_count()`.
    pub fn insert_object(&mut self, index: usize, mut object: MapObject) {
        let len = self.objects.len();
        if index > len {
            panic!("{}", ObjectGroupError::IndexOutOfRange { index, len });
        }

        self.adopt(&mut object);
        self.objects.insert(index, object);
        sort_by_name(&mut self.objects);
        debug!(
            "Inserted object into '{}' and re-sorted {} objects by name",
            self.name,
            self.objects.len()
        );
    }

    /// Remove the given object instance, returning its former index and the object.
    pub fn try_remove_object(
        &mut self,
        instance: InstanceId,
    ) -> Result<(usize, MapObject), ObjectGroupError> {
        let index = self
            .index_of(instance)
            .ok_or(ObjectGroupError::ObjectNotFound(instance))?;
        let mut object = self.objects.remove(index);
        object.set_object_group(None);
        Ok((index, object))
    }

    /// Remove the given object instance, returning its former index and the object.
    ///
    /// # Panics
    ///
    /// Panics if the object is not in this group.
    pub fn remove_object(&mut self, instance: InstanceId) -> (usize, MapObject) {
        self.try_remove_object(instance)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Remove and return the object at `index`.
    pub fn try_remove_object_at(&mut self, index: usize) -> Result<MapObject, ObjectGroupError> {
        let len = self.objects.len();
        if index >= len {
            return Err(ObjectGroupError::IndexOutOfRange { index, len });
        }
        let mut object = self.objects.remove(index);
        object.set_object_group(None);
        Ok(object)
    }

    /// Remove and return the object at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove_object_at(&mut self, index: usize) -> MapObject {
        self.try_remove_object_at(index)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Move `count` objects starting at `from` so they start at `to`.
    ///
    /// `to` is an index into the list before the move, so it must not fall strictly inside
    /// the moved range. Moving to `from` or `from + count`, or moving nothing, is a no-op.
    pub fn try_move_objects(
        &mut self,
        from: usize,
        to: usize,
        count: usize,
    ) -> Result<(), ObjectGroupError> {
        let len = self.objects.len();
        let invalid = ObjectGroupError::InvalidMove {
            from,
            to,
            count,
            len,
        };

        let Some(end) = from.checked_add(count) else {
            return Err(invalid);
        };
        if to > from && to < end {
            return Err(invalid);
        }
        if to == from || to == end || count == 0 {
            return Ok(());
        }
        if end > len || to > len {
            return Err(invalid);
        }

        let moving: Vec<MapObject> = self.objects.drain(from..end).collect();
        let to = if to > from { to - count } else { to };
        let tail = self.objects.split_off(to);
        self.objects.extend(moving);
        self.objects.extend(tail);
        Ok(())
    }

    /// Move `count` objects starting at `from` so they start at `to`.
    ///
    /// # Panics
    ///
    /// Panics if `to` lies inside the moved range or the range exceeds the group.
    pub fn move_objects(&mut self, from: usize, to: usize, count: usize) {
        if let Err(err) = self.try_move_objects(from, to, count) {
            panic!("{err}");
        }
    }

    // ===== GEOMETRY =====

    /// Union of all object bounds. Zero-sized bounds (point objects) don't contribute.
    ///
    /// Returns an all-zero rectangle when nothing contributes.
    pub fn objects_bounding_rect(&self) -> Rect {
        self.objects
            .iter()
            .map(MapObject::bounds)
            .filter(|bounds| bounds.width() != 0.0 || bounds.height() != 0.0)
            .reduce(|acc, bounds| acc.union(bounds))
            .unwrap_or_default()
    }

    /// Translate objects whose center lies within `bounds` by `offset`.
    ///
    /// With `wrap_x` / `wrap_y`, the new center is wrapped back into `bounds` along that
    /// axis. Objects outside `bounds` are left alone, and a `bounds` with zero width or
    /// height contains no objects at all.
    pub fn offset_objects(&mut self, offset: Vec2, bounds: Rect, wrap_x: bool, wrap_y: bool) {
        let width = bounds.width();
        let height = bounds.height();
        // A degenerate region contains nothing.
        if width == 0.0 || height == 0.0 {
            return;
        }

        for object in &mut self.objects {
            let center = object.bounds().center();
            if !bounds.contains(center) {
                continue;
            }

            let mut new_center = center + offset;
            if wrap_x {
                new_center.x = bounds.min.x + (new_center.x - bounds.min.x).rem_euclid(width);
            }
            if wrap_y {
                new_center.y = bounds.min.y + (new_center.y - bounds.min.y).rem_euclid(height);
            }

            object.set_position(object.position() + (new_center - center));
        }
    }

    // ===== TILESET REFERENCES =====

    /// Tilesets referenced by tile objects in this group.
    pub fn used_tilesets(&self) -> HashSet<SharedTileset> {
        self.objects
            .iter()
            .filter_map(MapObject::cell)
            .map(|cell| cell.tileset.clone())
            .collect()
    }

    /// Whether any tile object in this group uses `tileset`.
    pub fn references_tileset(&self, tileset: &SharedTileset) -> bool {
        self.objects
            .iter()
            .filter_map(MapObject::cell)
            .any(|cell| cell.tileset.ptr_eq(tileset))
    }

    /// Point every tile object using `old` at the tile with the same ID in `new`.
    ///
    /// Objects whose tile does not exist in `new` lose their tile.
    pub fn replace_references_to_tileset(&mut self, old: &SharedTileset, new: &SharedTileset) {
        for object in &mut self.objects {
            let Some(cell) = object.cell() else {
                continue;
            };
            if !cell.tileset.ptr_eq(old) {
                continue;
            }

            let tile_id = cell.tile_id;
            let replacement = new.tile_at(tile_id);
            if replacement.is_none() {
                warn!(
                    "Tileset '{}' has no tile {}, clearing tile of object '{}'",
                    new.name,
                    tile_id,
                    object.name()
                );
            }
            object.set_cell(replacement);
        }
    }

    // ===== MERGING =====

    /// Whether `other` can be merged into a copy of this group.
    pub fn can_merge_with(&self, other: &dyn Layer) -> bool {
        other.kind() == LayerKind::Objects && other.as_object_group().is_some()
    }

    /// A copy of this group followed by copies of every object in `other`, in `other`'s order.
    pub fn try_merged_with(&self, other: &dyn Layer) -> Result<ObjectGroup, ObjectGroupError> {
        let Some(other_group) = other
            .as_object_group()
            .filter(|_| other.kind() == LayerKind::Objects)
        else {
            return Err(ObjectGroupError::IncompatibleLayer(other.kind()));
        };

        let mut merged = self.clone();
        for object in &other_group.objects {
            merged.add_object(object.clone());
        }
        debug!(
            "Merged '{}' into copy of '{}' ({} objects)",
            other_group.name,
            self.name,
            merged.objects.len()
        );
        Ok(merged)
    }

    /// A copy of this group followed by copies of every object in `other`, in `other`'s order.
    ///
    /// # Panics
    ///
    /// Panics unless [`can_merge_with`](Self::can_merge_with) holds.
    pub fn merged_with(&self, other: &dyn Layer) -> ObjectGroup {
        self.try_merged_with(other)
            .unwrap_or_else(|err| panic!("{err}"))
    }
}

impl Default for ObjectGroup {
    fn default() -> Self {
        Self::new(String::new(), 0, 0, 0, 0)
    }
}

impl Clone for ObjectGroup {
    /// Deep copy: every object is cloned and appended in order (no re-sort). The copy is a
    /// new group identity and is not attached to an identity provider.
    fn clone(&self) -> Self {
        let mut clone = ObjectGroup::new(self.name.clone(), self.x, self.y, self.width, self.height);
        clone.opacity = self.opacity;
        clone.visible = self.visible;
        for object in &self.objects {
            clone.add_object(object.clone());
        }
        clone.color = self.color;
        clone.draw_order = self.draw_order;
        clone
    }
}

impl Layer for ObjectGroup {
    fn kind(&self) -> LayerKind {
        LayerKind::Objects
    }

    fn name(&self) -> &str {
        ObjectGroup::name(self)
    }

    fn as_object_group(&self) -> Option<&ObjectGroup> {
        Some(self)
    }
}

impl fmt::Debug for ObjectGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectGroup")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("position", &self.position())
            .field("size", &self.size())
            .field("draw_order", &self.draw_order)
            .field("color", &self.color)
            .field("objects", &self.objects)
            .field("has_id_provider", &self.id_provider.is_some())
            .finish_non_exhaustive()
    }
}
