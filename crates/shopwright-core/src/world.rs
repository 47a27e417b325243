//! The world store: owns every spawned scene object for one session.
//!
//! Objects are stored in a slotmap, so an [`ObjectId`] held by other
//! components (the population queue, the access controller) stays
//! non-owning: after a despawn the id simply stops resolving, which is how
//! stale handles are detected instead of dereferenced.

use crate::access::{DoorState, ToggleSwitch};
use crate::id::{FixtureKindId, ObjectId};
use crate::stock::Stock;
use serde::{Serialize, Deserialize};
use slotmap::SlotMap;

/// Where an object sits in the structure. Render metadata only; the core
/// never interprets coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: (f32, f32, f32),
    pub yaw_degrees: f32,
}

impl Placement {
    pub fn new(position: (f32, f32, f32), yaw_degrees: f32) -> Self {
        Self {
            position,
            yaw_degrees,
        }
    }

    pub fn origin() -> Self {
        Self::new((0.0, 0.0, 0.0), 0.0)
    }
}

/// One spawned object: a fixture instance plus its optional capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub fixture: FixtureKindId,
    pub placement: Placement,
    /// Present on display furniture that can hold items.
    pub stock: Option<Stock>,
    /// Present on access points (doors).
    pub door: Option<DoorState>,
    /// Present on binary toggle devices.
    pub switch: Option<ToggleSwitch>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, fixture: FixtureKindId, placement: Placement) -> Self {
        Self {
            name: name.into(),
            fixture,
            placement,
            stock: None,
            door: None,
            switch: None,
        }
    }

    pub fn with_stock(mut self, capacity: u32) -> Self {
        self.stock = Some(Stock::new(capacity));
        self
    }

    pub fn with_door(mut self) -> Self {
        self.door = Some(DoorState::new_unlocked());
        self
    }

    pub fn with_switch(mut self, switch: ToggleSwitch) -> Self {
        self.switch = Some(switch);
        self
    }
}

/// Owns all spawned scene objects. The scene graph side of the session.
#[derive(Debug, Default)]
pub struct WorldStore {
    objects: SlotMap<ObjectId, SceneObject>,
}

impl WorldStore {
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
        }
    }

    /// Insert an object, returning its handle.
    pub fn spawn(&mut self, object: SceneObject) -> ObjectId {
        self.objects.insert(object)
    }

    /// Remove an object. Returns it if the id still resolved.
    pub fn despawn(&mut self, id: ObjectId) -> Option<SceneObject> {
        self.objects.remove(id)
    }

    /// Resolve a handle. `None` means the object was despawned (or never
    /// existed) -- the stale-target check.
    pub fn resolve(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    pub fn resolve_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Mutable access to an object's stock, if it resolves and is stockable.
    pub fn stock_mut(&mut self, id: ObjectId) -> Option<&mut Stock> {
        self.objects.get_mut(id).and_then(|o| o.stock.as_mut())
    }

    /// Read access to an object's door state, if it resolves and is a door.
    pub fn door(&self, id: ObjectId) -> Option<&DoorState> {
        self.objects.get(id).and_then(|o| o.door.as_ref())
    }

    pub(crate) fn door_mut(&mut self, id: ObjectId) -> Option<&mut DoorState> {
        self.objects.get_mut(id).and_then(|o| o.door.as_mut())
    }

    /// Read access to an object's toggle switch, if it resolves and is one.
    pub fn switch(&self, id: ObjectId) -> Option<&ToggleSwitch> {
        self.objects.get(id).and_then(|o| o.switch.as_ref())
    }

    pub(crate) fn switch_mut(&mut self, id: ObjectId) -> Option<&mut ToggleSwitch> {
        self.objects.get_mut(id).and_then(|o| o.switch.as_mut())
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cabinet() -> SceneObject {
        SceneObject::new("DisplayCabinet", FixtureKindId(0), Placement::origin()).with_stock(40)
    }

    #[test]
    fn spawn_and_resolve() {
        let mut world = WorldStore::new();
        let id = world.spawn(cabinet());
        assert!(world.contains(id));
        assert_eq!(world.resolve(id).unwrap().name, "DisplayCabinet");
        assert_eq!(world.object_count(), 1);
    }

    #[test]
    fn despawned_id_stops_resolving() {
        let mut world = WorldStore::new();
        let id = world.spawn(cabinet());
        assert!(world.despawn(id).is_some());
        assert!(!world.contains(id));
        assert!(world.resolve(id).is_none());
        assert!(world.stock_mut(id).is_none());
    }

    #[test]
    fn despawn_twice_is_none() {
        let mut world = WorldStore::new();
        let id = world.spawn(cabinet());
        assert!(world.despawn(id).is_some());
        assert!(world.despawn(id).is_none());
    }

    #[test]
    fn capability_accessors() {
        let mut world = WorldStore::new();
        let plain = world.spawn(SceneObject::new(
            "Vase",
            FixtureKindId(9),
            Placement::origin(),
        ));
        assert!(world.stock_mut(plain).is_none());
        assert!(world.door(plain).is_none());
        assert!(world.switch(plain).is_none());

        let stocked = world.spawn(cabinet());
        assert!(world.stock_mut(stocked).is_some());
    }
}
