//! Immutable registry of item and fixture kinds, frozen at startup.
//!
//! Two-phase lifecycle: register everything on a [`RegistryBuilder`], then
//! `freeze()` into a [`Registry`] that only answers lookups. Placement code
//! resolves plan names against the frozen registry before any object is
//! spawned.

use crate::id::{FixtureKindId, ItemKindId};
use std::collections::HashMap;

/// An item kind definition.
#[derive(Debug, Clone)]
pub struct ItemKindDef {
    pub name: String,
}

/// Capabilities a fixture kind grants its instances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixtureSpec {
    /// Stockable fixtures hold this many items.
    pub stock_capacity: Option<u32>,
    pub is_door: bool,
    pub is_switch: bool,
}

impl FixtureSpec {
    pub fn decoration() -> Self {
        Self::default()
    }

    pub fn stockable(capacity: u32) -> Self {
        Self {
            stock_capacity: Some(capacity),
            ..Self::default()
        }
    }

    pub fn door() -> Self {
        Self {
            is_door: true,
            ..Self::default()
        }
    }

    pub fn switch() -> Self {
        Self {
            is_switch: true,
            ..Self::default()
        }
    }
}

/// A fixture kind definition.
#[derive(Debug, Clone)]
pub struct FixtureKindDef {
    pub name: String,
    pub spec: FixtureSpec,
}

/// Builder for constructing an immutable [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    items: Vec<ItemKindDef>,
    item_name_to_id: HashMap<String, ItemKindId>,
    fixtures: Vec<FixtureKindDef>,
    fixture_name_to_id: HashMap<String, FixtureKindId>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item kind. Returns its id.
    pub fn register_item(&mut self, name: &str) -> ItemKindId {
        let id = ItemKindId(self.items.len() as u32);
        self.items.push(ItemKindDef {
            name: name.to_string(),
        });
        self.item_name_to_id.insert(name.to_string(), id);
        id
    }

    /// Register a fixture kind. Returns its id.
    pub fn register_fixture(&mut self, name: &str, spec: FixtureSpec) -> FixtureKindId {
        let id = FixtureKindId(self.fixtures.len() as u32);
        self.fixtures.push(FixtureKindDef {
            name: name.to_string(),
            spec,
        });
        self.fixture_name_to_id.insert(name.to_string(), id);
        id
    }

    /// Freeze into an immutable registry.
    pub fn freeze(self) -> Registry {
        Registry {
            items: self.items,
            item_name_to_id: self.item_name_to_id,
            fixtures: self.fixtures,
            fixture_name_to_id: self.fixture_name_to_id,
        }
    }
}

/// Frozen kind registry. Lookup only.
#[derive(Debug, Default)]
pub struct Registry {
    items: Vec<ItemKindDef>,
    item_name_to_id: HashMap<String, ItemKindId>,
    fixtures: Vec<FixtureKindDef>,
    fixture_name_to_id: HashMap<String, FixtureKindId>,
}

impl Registry {
    pub fn item_id(&self, name: &str) -> Option<ItemKindId> {
        self.item_name_to_id.get(name).copied()
    }

    pub fn item_def(&self, id: ItemKindId) -> Option<&ItemKindDef> {
        self.items.get(id.0 as usize)
    }

    pub fn fixture_id(&self, name: &str) -> Option<FixtureKindId> {
        self.fixture_name_to_id.get(name).copied()
    }

    pub fn fixture_def(&self, id: FixtureKindId) -> Option<&FixtureKindDef> {
        self.fixtures.get(id.0 as usize)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn fixture_count(&self) -> usize {
        self.fixtures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup() {
        let mut builder = RegistryBuilder::new();
        let jar = builder.register_item("packaged_jar");
        let cabinet = builder.register_fixture("display_cabinet", FixtureSpec::stockable(40));
        let registry = builder.freeze();

        assert_eq!(registry.item_id("packaged_jar"), Some(jar));
        assert_eq!(registry.fixture_id("display_cabinet"), Some(cabinet));
        assert_eq!(registry.item_def(jar).unwrap().name, "packaged_jar");
        assert_eq!(
            registry.fixture_def(cabinet).unwrap().spec.stock_capacity,
            Some(40)
        );
    }

    #[test]
    fn unknown_names_return_none() {
        let registry = RegistryBuilder::new().freeze();
        assert!(registry.item_id("nothing").is_none());
        assert!(registry.fixture_id("nothing").is_none());
    }

    #[test]
    fn fixture_spec_constructors() {
        assert_eq!(FixtureSpec::stockable(20).stock_capacity, Some(20));
        assert!(FixtureSpec::door().is_door);
        assert!(FixtureSpec::switch().is_switch);
        let plain = FixtureSpec::decoration();
        assert!(plain.stock_capacity.is_none());
        assert!(!plain.is_door && !plain.is_switch);
    }

    #[test]
    fn ids_are_dense_and_ordered() {
        let mut builder = RegistryBuilder::new();
        let a = builder.register_item("a");
        let b = builder.register_item("b");
        assert_eq!(a, ItemKindId(0));
        assert_eq!(b, ItemKindId(1));
        let registry = builder.freeze();
        assert_eq!(registry.item_count(), 2);
    }
}
