//! The session: owns the world store, event hub, populator, and frozen
//! registry for one logical game session, and exposes the host-facing
//! entry points.
//!
//! The host drives everything through these methods one call at a time:
//! object spawns during assembly, the world-readiness signal, switch
//! interactions, and door-opened notifications. Nothing here blocks or
//! re-enters.

use crate::access::{AccessController, AccessError, ToggleState};
use crate::event::{Event, EventHub};
use crate::id::{ItemKindId, ObjectId};
use crate::populate::{PopulationReport, Populator};
use crate::registry::Registry;
use crate::spawn::SpawnOutcome;
use crate::world::{SceneObject, WorldStore};

/// One logical game session.
#[derive(Debug)]
pub struct Session {
    world: WorldStore,
    hub: EventHub,
    populator: Populator,
    registry: Registry,
    world_ready: bool,
}

impl Session {
    pub fn new(registry: Registry) -> Self {
        Self {
            world: WorldStore::new(),
            hub: EventHub::new(),
            populator: Populator::new(),
            registry,
            world_ready: false,
        }
    }

    pub fn world(&self) -> &WorldStore {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut WorldStore {
        &mut self.world
    }

    pub fn hub(&self) -> &EventHub {
        &self.hub
    }

    pub fn hub_mut(&mut self) -> &mut EventHub {
        &mut self.hub
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn populator(&self) -> &Populator {
        &self.populator
    }

    /// Insert an object into the world and announce it.
    pub fn spawn_object(&mut self, object: SceneObject) -> ObjectId {
        let id = self.world.spawn(object);
        self.hub
            .dispatch(Event::ObjectSpawned { object: id }, &mut self.world);
        id
    }

    /// Remove an object. Returns whether the id still resolved.
    pub fn despawn_object(&mut self, id: ObjectId) -> bool {
        if self.world.despawn(id).is_none() {
            return false;
        }
        self.hub
            .dispatch(Event::ObjectDespawned { object: id }, &mut self.world);
        true
    }

    /// Queue a stocking fill for a placement outcome (§ population
    /// pipeline). Never suspends: appends now or arms the ticket.
    pub fn enqueue_stock(&self, outcome: SpawnOutcome, item: ItemKindId, quantity: u32) {
        self.populator.enqueue(outcome, item, quantity);
    }

    /// The host's world-readiness signal. Drains the population queue in
    /// one pass and reports per-entry outcomes. Safe to call again: the
    /// drain is sealed after its first pass and later calls return an
    /// empty report.
    pub fn notify_world_ready(&mut self) -> PopulationReport {
        if self.world_ready {
            log::debug!("world-ready signal repeated; population already drained");
        }
        self.world_ready = true;

        let report = self.populator.drain(&mut self.world);
        for record in &report.records {
            let event = match record.outcome {
                Ok(added) => Event::StockFilled {
                    target: record.target,
                    item: record.item,
                    quantity: added,
                },
                Err(failure) => Event::FillRejected {
                    target: record.target,
                    failure,
                },
            };
            self.hub.dispatch(event, &mut self.world);
        }
        report
    }

    /// Host input path: the user flipped a physical switch. Updates the
    /// device state and notifies subscribers synchronously.
    pub fn flip_toggle(&mut self, switch: ObjectId) -> Result<ToggleState, AccessError> {
        let state = self
            .world
            .switch_mut(switch)
            .ok_or(AccessError::MissingToggle)?
            .flip();
        self.hub.dispatch(
            Event::ToggleFlipped {
                switch,
                is_on: state.is_on(),
            },
            &mut self.world,
        );
        Ok(state)
    }

    /// Host notification path: some agent passed through a door.
    pub fn door_opened(&mut self, door: ObjectId) {
        if self.world.door(door).is_none() {
            log::warn!("opened notification for {door:?}, which is not an access point");
            return;
        }
        self.hub
            .dispatch(Event::DoorOpened { door }, &mut self.world);
    }

    /// Wire a switch to a set of doors on this session's hub.
    pub fn bind_access_control(
        &mut self,
        switch: Option<ObjectId>,
        doors: &[ObjectId],
    ) -> Result<AccessController, AccessError> {
        AccessController::bind(&mut self.world, &mut self.hub, switch, doors)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
