//! The structure-builder boundary.
//!
//! Everything that actually manufactures scene content sits behind
//! [`StructureBuilder`]: the fitout driver describes WHAT to place and the
//! builder decides HOW, returning object handles. Networked placements may
//! return a deferred outcome whose handle arrives later through the
//! ticket's resolver; the driver never waits on one.
//!
//! [`LocalBuilder`] is the in-process reference implementation used by the
//! headless example and the test suites. It spawns objects straight into
//! the session's world store; networked placements are parked and
//! completed by [`LocalBuilder::pump`], so tests control completion timing.

use shopwright_core::access::{ToggleState, ToggleSwitch};
use shopwright_core::id::{FixtureKindId, ObjectId};
use shopwright_core::session::Session;
use shopwright_core::spawn::{SpawnOutcome, SpawnTicket, TicketResolver};
use shopwright_core::world::{Placement, SceneObject};
use shopwright_data::PaletteData;

use crate::plan::ShellPlan;

/// A placement the builder could not perform. Recoverable: the driver
/// degrades the single placement and carries on.
#[derive(Debug, Clone, thiserror::Error)]
#[error("placement failed: {0}")]
pub struct BuildError(pub String);

/// Shell construction request: the plan parameters plus resolved palette.
#[derive(Debug)]
pub struct ShellRequest<'a> {
    pub name: &'a str,
    pub fixture: FixtureKindId,
    pub shell: &'a ShellPlan,
    pub palette: Option<&'a PaletteData>,
    pub placement: Placement,
}

/// Interior fixture placement request.
#[derive(Debug)]
pub struct FixtureRequest<'a> {
    pub fixture: FixtureKindId,
    pub name: &'a str,
    pub placement: Placement,
    pub networked: bool,
}

/// Lock switch placement request.
#[derive(Debug)]
pub struct SwitchRequest<'a> {
    pub fixture: FixtureKindId,
    pub name: &'a str,
    pub placement: Placement,
    pub initial: ToggleState,
    pub lock_label: &'a str,
    pub unlock_label: &'a str,
}

/// Sign placement request. Text is cosmetic and rendered by the builder.
#[derive(Debug)]
pub struct SignRequest<'a> {
    pub fixture: FixtureKindId,
    pub name: &'a str,
    pub text: Option<&'a str>,
    pub placement: Placement,
}

/// The opaque boundary to the host engine's construction toolkit.
pub trait StructureBuilder {
    /// Create the structure root for a shop shell.
    fn build_shell(
        &mut self,
        session: &mut Session,
        request: &ShellRequest<'_>,
    ) -> Result<ObjectId, BuildError>;

    /// Place an interior fixture. Networked placements may defer.
    fn place_fixture(
        &mut self,
        session: &mut Session,
        root: ObjectId,
        request: &FixtureRequest<'_>,
    ) -> Result<SpawnOutcome, BuildError>;

    /// Place the lock switch. Always yields a usable handle: binding
    /// requires the device to exist.
    fn place_switch(
        &mut self,
        session: &mut Session,
        root: ObjectId,
        request: &SwitchRequest<'_>,
    ) -> Result<ObjectId, BuildError>;

    /// Place a decorative sign.
    fn place_sign(
        &mut self,
        session: &mut Session,
        root: ObjectId,
        request: &SignRequest<'_>,
    ) -> Result<ObjectId, BuildError>;
}

// ---------------------------------------------------------------------------
// LocalBuilder
// ---------------------------------------------------------------------------

/// In-process reference builder. No geometry, no networking: objects are
/// spawned directly into the world store, and "networked" placements are
/// simply parked until [`LocalBuilder::pump`] delivers their completions.
#[derive(Default)]
pub struct LocalBuilder {
    /// Parked networked placements, completed in order by `pump`.
    parked: Vec<(TicketResolver, SceneObject)>,
    /// Sign texts rendered so far, for inspection.
    signs: Vec<(String, Option<String>)>,
}

impl LocalBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Networked placements waiting for completion.
    pub fn parked_count(&self) -> usize {
        self.parked.len()
    }

    /// Deliver every parked completion, in placement order. Returns how
    /// many were delivered.
    pub fn pump(&mut self, session: &mut Session) -> usize {
        let parked = std::mem::take(&mut self.parked);
        let count = parked.len();
        for (resolver, object) in parked {
            let id = session.spawn_object(object);
            resolver.complete(id);
        }
        count
    }

    /// Drop every parked completion without delivering it, simulating
    /// networked spawns that never finish.
    pub fn abandon_parked(&mut self) -> usize {
        let count = self.parked.len();
        self.parked.clear();
        count
    }

    /// Sign texts rendered so far.
    pub fn signs(&self) -> &[(String, Option<String>)] {
        &self.signs
    }

    fn instantiate(
        session: &Session,
        fixture: FixtureKindId,
        name: &str,
        placement: Placement,
    ) -> Result<SceneObject, BuildError> {
        let def = session
            .registry()
            .fixture_def(fixture)
            .ok_or_else(|| BuildError(format!("unregistered fixture kind {fixture:?}")))?;

        let mut object = SceneObject::new(name, fixture, placement);
        if let Some(capacity) = def.spec.stock_capacity {
            object = object.with_stock(capacity);
        }
        if def.spec.is_door {
            object = object.with_door();
        }
        Ok(object)
    }
}

impl StructureBuilder for LocalBuilder {
    fn build_shell(
        &mut self,
        session: &mut Session,
        request: &ShellRequest<'_>,
    ) -> Result<ObjectId, BuildError> {
        let object = Self::instantiate(session, request.fixture, request.name, request.placement)?;
        log::debug!(
            "shell '{}': {}x{}x{}m, palette {}",
            request.name,
            request.shell.size.0,
            request.shell.size.1,
            request.shell.size.2,
            if request.palette.is_some() {
                "resolved"
            } else {
                "default"
            }
        );
        Ok(session.spawn_object(object))
    }

    fn place_fixture(
        &mut self,
        session: &mut Session,
        _root: ObjectId,
        request: &FixtureRequest<'_>,
    ) -> Result<SpawnOutcome, BuildError> {
        let object = Self::instantiate(session, request.fixture, request.name, request.placement)?;
        if request.networked {
            let (ticket, resolver) = SpawnTicket::new();
            self.parked.push((resolver, object));
            Ok(SpawnOutcome::Deferred(ticket))
        } else {
            Ok(SpawnOutcome::Ready(session.spawn_object(object)))
        }
    }

    fn place_switch(
        &mut self,
        session: &mut Session,
        _root: ObjectId,
        request: &SwitchRequest<'_>,
    ) -> Result<ObjectId, BuildError> {
        let mut switch = ToggleSwitch::new(request.initial);
        switch.set_interaction_labels(request.lock_label, request.unlock_label);
        let object = Self::instantiate(session, request.fixture, request.name, request.placement)?
            .with_switch(switch);
        Ok(session.spawn_object(object))
    }

    fn place_sign(
        &mut self,
        session: &mut Session,
        _root: ObjectId,
        request: &SignRequest<'_>,
    ) -> Result<ObjectId, BuildError> {
        let object = Self::instantiate(session, request.fixture, request.name, request.placement)?;
        self.signs
            .push((request.name.to_string(), request.text.map(str::to_string)));
        Ok(session.spawn_object(object))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
