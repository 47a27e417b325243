//! Shared test helpers for integration tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these
//! helpers are available to unit tests and to downstream crates' test
//! suites via the `test-utils` feature.

use crate::access::{ToggleState, ToggleSwitch};
use crate::id::{FixtureKindId, ItemKindId, ObjectId};
use crate::registry::{FixtureSpec, Registry, RegistryBuilder};
use crate::session::Session;
use crate::world::{Placement, SceneObject};

// ===========================================================================
// Item kinds
// ===========================================================================

pub fn packaged_jar() -> ItemKindId {
    ItemKindId(0)
}
pub fn loose_bud() -> ItemKindId {
    ItemKindId(1)
}

// ===========================================================================
// Fixture kinds
// ===========================================================================

pub fn display_cabinet() -> FixtureKindId {
    FixtureKindId(0)
}
pub fn wall_shelf() -> FixtureKindId {
    FixtureKindId(1)
}
pub fn sliding_door() -> FixtureKindId {
    FixtureKindId(2)
}
pub fn lock_switch() -> FixtureKindId {
    FixtureKindId(3)
}
pub fn vase() -> FixtureKindId {
    FixtureKindId(4)
}

/// A registry matching the kind constructors above.
pub fn make_registry() -> Registry {
    let mut builder = RegistryBuilder::new();
    builder.register_item("packaged_jar");
    builder.register_item("loose_bud");
    builder.register_fixture("display_cabinet", FixtureSpec::stockable(40));
    builder.register_fixture("wall_shelf", FixtureSpec::stockable(24));
    builder.register_fixture("sliding_door", FixtureSpec::door());
    builder.register_fixture("lock_switch", FixtureSpec::switch());
    builder.register_fixture("vase", FixtureSpec::decoration());
    builder.freeze()
}

/// A fresh session over [`make_registry`].
pub fn make_session() -> Session {
    Session::new(make_registry())
}

// ===========================================================================
// Object spawners
// ===========================================================================

pub fn spawn_cabinet(session: &mut Session, capacity: u32) -> ObjectId {
    session.spawn_object(
        SceneObject::new("DisplayCabinet", display_cabinet(), Placement::origin())
            .with_stock(capacity),
    )
}

pub fn spawn_shelf(session: &mut Session, capacity: u32) -> ObjectId {
    session.spawn_object(
        SceneObject::new("WallShelf", wall_shelf(), Placement::origin()).with_stock(capacity),
    )
}

pub fn spawn_door(session: &mut Session) -> ObjectId {
    session.spawn_object(
        SceneObject::new("SlidingDoor", sliding_door(), Placement::origin()).with_door(),
    )
}

pub fn spawn_switch(session: &mut Session, initial: ToggleState) -> ObjectId {
    session.spawn_object(
        SceneObject::new("LockSwitch", lock_switch(), Placement::origin())
            .with_switch(ToggleSwitch::new(initial)),
    )
}

pub fn spawn_decoration(session: &mut Session) -> ObjectId {
    session.spawn_object(SceneObject::new("Vase", vase(), Placement::origin()))
}
