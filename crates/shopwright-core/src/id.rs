use serde::{Serialize, Deserialize};
use slotmap::new_key_type;

new_key_type! {
    /// Identifies a spawned scene object in the world store.
    ///
    /// Generational: once the object is despawned the id never resolves
    /// again, so a held id doubles as a stale-handle check.
    pub struct ObjectId;
}

/// Identifies an item kind in the registry. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemKindId(pub u32);

/// Identifies a fixture kind (display cabinet, door, switch, ...) in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixtureKindId(pub u32);

/// Handle to an event hub subscription. Returned by subscribe, consumed by
/// unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);
