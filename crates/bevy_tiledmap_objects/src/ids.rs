//! Object identity: map-assigned numeric IDs and per-instance identity tokens.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// Tiled's numeric object ID.
///
/// Zero means "not assigned yet". The owning map hands out IDs the first time an
/// object lands in one of its object groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// Sentinel for objects that have not been given an ID.
    pub const UNASSIGNED: ObjectId = ObjectId(0);

    #[inline]
    pub fn is_assigned(self) -> bool {
        self != Self::UNASSIGNED
    }
}

/// Identity of one live `MapObject` value.
///
/// Two objects are "the same object" only when their instance IDs match. Cloning an
/// object produces a new instance ID even though the `ObjectId` is copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Identity of an object group, used as the back-reference stored on its objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectGroupId(u64);

impl ObjectGroupId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Source of fresh object IDs, normally the map that owns the object groups.
///
/// Object groups call [`take_next_object_id`](Self::take_next_object_id) at most once
/// per object, and only when the object still carries [`ObjectId::UNASSIGNED`].
pub trait ObjectIdProvider: Send + Sync {
    /// Hand out the next unused object ID.
    fn take_next_object_id(&self) -> ObjectId;
}

/// Counter-backed [`ObjectIdProvider`], equivalent to Tiled's `nextobjectid` map attribute.
#[derive(Debug)]
pub struct NextObjectId(AtomicU32);

impl NextObjectId {
    /// Start handing out IDs at `first`.
    pub fn starting_at(first: u32) -> Self {
        Self(AtomicU32::new(first))
    }

    /// The ID the next call will return.
    pub fn peek(&self) -> ObjectId {
        ObjectId(self.0.load(Ordering::Relaxed))
    }
}

impl Default for NextObjectId {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl ObjectIdProvider for NextObjectId {
    fn take_next_object_id(&self) -> ObjectId {
        ObjectId(self.0.fetch_add(1, Ordering::Relaxed))
    }
}
