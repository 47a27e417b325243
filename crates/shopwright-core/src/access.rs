//! Access control: one physical toggle switch driving the lock state of a
//! set of doors.
//!
//! The two per-door permission fields always move together. They are
//! private and only settable through [`DoorState::apply_lock`], so no
//! caller can produce a door that is closed to players yet openable by
//! NPCs.

use crate::event::{Event, EventHub, EventKind};
use crate::id::{ObjectId, SubscriptionId};
use crate::world::WorldStore;
use serde::{Serialize, Deserialize};
use std::cell::RefCell;
use std::rc::Rc;

// ---------------------------------------------------------------------------
// Toggle switch
// ---------------------------------------------------------------------------

/// State of a binary toggle device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleState {
    On,
    Off,
}

impl ToggleState {
    pub fn is_on(self) -> bool {
        matches!(self, ToggleState::On)
    }

    pub fn flipped(self) -> ToggleState {
        match self {
            ToggleState::On => ToggleState::Off,
            ToggleState::Off => ToggleState::On,
        }
    }
}

/// The switch capability of a scene object. State changes are routed
/// through the session so observers hear about them; the interaction
/// labels are a cosmetic side-channel the core stores but never reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleSwitch {
    state: ToggleState,
    labels: Option<(String, String)>,
}

impl ToggleSwitch {
    pub fn new(initial: ToggleState) -> Self {
        Self {
            state: initial,
            labels: None,
        }
    }

    pub fn state(&self) -> ToggleState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state.is_on()
    }

    pub(crate) fn flip(&mut self) -> ToggleState {
        self.state = self.state.flipped();
        self.state
    }

    /// Set the interaction prompts shown for the on and off actions.
    pub fn set_interaction_labels(&mut self, on_action: &str, off_action: &str) {
        self.labels = Some((on_action.to_string(), off_action.to_string()));
    }

    pub fn interaction_labels(&self) -> Option<(&str, &str)> {
        self.labels
            .as_ref()
            .map(|(on, off)| (on.as_str(), off.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Door state
// ---------------------------------------------------------------------------

/// Player-facing door permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorAccess {
    Open,
    Closed,
}

/// The door capability of a scene object: one access point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorState {
    player_access: DoorAccess,
    npc_openable: bool,
}

impl DoorState {
    /// Doors start unlocked; the controller applies the bound state.
    pub fn new_unlocked() -> Self {
        Self {
            player_access: DoorAccess::Open,
            npc_openable: true,
        }
    }

    /// Set both permission fields as a unit.
    pub fn apply_lock(&mut self, locked: bool) {
        if locked {
            self.player_access = DoorAccess::Closed;
            self.npc_openable = false;
        } else {
            self.player_access = DoorAccess::Open;
            self.npc_openable = true;
        }
    }

    pub fn player_access(&self) -> DoorAccess {
        self.player_access
    }

    pub fn npc_openable(&self) -> bool {
        self.npc_openable
    }

    pub fn is_locked(&self) -> bool {
        self.player_access == DoorAccess::Closed
    }
}

// ---------------------------------------------------------------------------
// Access controller
// ---------------------------------------------------------------------------

/// Binding failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// The given toggle id is absent, despawned, or not a switch.
    #[error("toggle device is missing or has no switch capability")]
    MissingToggle,
}

struct ControllerState {
    switch: ObjectId,
    doors: Vec<ObjectId>,
    locked: bool,
}

impl ControllerState {
    /// Total broadcast: every bound door gets the same paired state.
    fn broadcast(&self, world: &mut WorldStore) {
        for &door in &self.doors {
            if let Some(state) = world.door_mut(door) {
                state.apply_lock(self.locked);
            }
        }
    }
}

/// Binds one toggle switch to zero-or-more doors for the rest of the
/// session. `locked` is derived: the doors are locked exactly when the
/// switch is off, recomputed and broadcast synchronously on every flip.
pub struct AccessController {
    state: Rc<RefCell<ControllerState>>,
    toggle_sub: SubscriptionId,
    opened_sub: SubscriptionId,
}

impl AccessController {
    /// Wire a switch to a set of doors.
    ///
    /// The initial lock state is derived from the switch state at bind
    /// time and applied before any event fires. A missing switch is
    /// rejected with no subscription created. Door ids that do not
    /// resolve to access points are dropped with a warning; binding zero
    /// doors succeeds and simply has nothing to broadcast to.
    pub fn bind(
        world: &mut WorldStore,
        hub: &mut EventHub,
        switch: Option<ObjectId>,
        doors: &[ObjectId],
    ) -> Result<AccessController, AccessError> {
        let switch = switch.ok_or(AccessError::MissingToggle)?;
        let is_on = world
            .switch(switch)
            .map(|s| s.is_on())
            .ok_or(AccessError::MissingToggle)?;

        let mut bound = Vec::with_capacity(doors.len());
        for &door in doors {
            if world.door(door).is_some() {
                bound.push(door);
            } else {
                log::warn!("{door:?} is not an access point; left unbound");
            }
        }
        if bound.is_empty() {
            log::warn!("access control bound with no doors");
        }

        let state = Rc::new(RefCell::new(ControllerState {
            switch,
            doors: bound,
            locked: !is_on,
        }));

        // Initial state reaches every door before any event is observed.
        state.borrow().broadcast(world);

        let reactor = Rc::clone(&state);
        let toggle_sub = hub.subscribe_filtered(
            EventKind::ToggleFlipped,
            Some(Box::new(move |event| {
                matches!(event, Event::ToggleFlipped { switch: s, .. } if *s == switch)
            })),
            Box::new(move |event, world| {
                let Event::ToggleFlipped { is_on, .. } = event else {
                    return vec![];
                };
                let mut state = reactor.borrow_mut();
                state.locked = !*is_on;
                state.broadcast(world);
                log::info!(
                    "doors {} by switch {:?}",
                    if state.locked { "locked" } else { "unlocked" },
                    state.switch
                );
                vec![Event::LockChanged {
                    switch: state.switch,
                    locked: state.locked,
                }]
            }),
        );

        // Observability only: opened doors are logged, never re-locked.
        let observer = Rc::clone(&state);
        let opened_sub = hub.subscribe(
            EventKind::DoorOpened,
            Box::new(move |event, _| {
                if let Event::DoorOpened { door } = event {
                    let state = observer.borrow();
                    if state.doors.contains(door) {
                        log::debug!(
                            "{door:?} opened while {}",
                            if state.locked { "locked" } else { "unlocked" }
                        );
                    }
                }
                vec![]
            }),
        );

        log::info!(
            "access control bound: switch {switch:?}, {} door(s), initially {}",
            state.borrow().doors.len(),
            if state.borrow().locked {
                "locked"
            } else {
                "unlocked"
            }
        );

        Ok(AccessController {
            state,
            toggle_sub,
            opened_sub,
        })
    }

    /// Current derived lock state.
    pub fn locked(&self) -> bool {
        self.state.borrow().locked
    }

    /// The bound switch.
    pub fn switch(&self) -> ObjectId {
        self.state.borrow().switch
    }

    /// The bound doors.
    pub fn doors(&self) -> Vec<ObjectId> {
        self.state.borrow().doors.clone()
    }

    /// The controller's hub subscriptions.
    pub fn subscriptions(&self) -> [SubscriptionId; 2] {
        [self.toggle_sub, self.opened_sub]
    }
}

impl std::fmt::Debug for AccessController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("AccessController")
            .field("switch", &state.switch)
            .field("doors", &state.doors)
            .field("locked", &state.locked)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
