//! Integration test: fitout degradation paths.
//!
//! Exercises build_fitout against builders that misbehave in ways the
//! local builder never does: doors that arrive deferred, placements that
//! fail outright. Single placements degrade; the shop still stands.

use shopwright_core::id::ObjectId;
use shopwright_core::registry::{FixtureSpec, Registry, RegistryBuilder};
use shopwright_core::session::Session;
use shopwright_core::spawn::SpawnOutcome;
use shopwright_fitout::builder::{
    BuildError, FixtureRequest, LocalBuilder, ShellRequest, SignRequest, StructureBuilder,
    SwitchRequest,
};
use shopwright_fitout::error::FitoutError;
use shopwright_fitout::fitout::build_fitout;
use shopwright_fitout::plan::FitoutPlan;

fn test_registry() -> Registry {
    let mut builder = RegistryBuilder::new();
    builder.register_item("packaged_jar");
    builder.register_fixture("building_shell", FixtureSpec::decoration());
    builder.register_fixture("display_cabinet", FixtureSpec::stockable(40));
    builder.register_fixture("sliding_door", FixtureSpec::door());
    builder.register_fixture("lock_switch", FixtureSpec::switch());
    builder.freeze()
}

fn parse_plan(input: &str) -> FitoutPlan {
    ron::from_str(input).expect("plan should parse")
}

const KIOSK_PLAN: &str = r#"(
    name: "Kiosk",
    shell: (size: (4.0, 4.0, 3.0), south_door: true),
    position: (0.0, 0.0, 0.0),
    doors: [
        (fixture: "sliding_door", label: Some("FrontDoor"), position: (2.0, 0.0, 0.0)),
    ],
    switch: Some((
        fixture: "lock_switch",
        position: (1.0, 0.8, 1.0),
        lock_label: "Lock",
        unlock_label: "Unlock",
    )),
    fixtures: [
        (
            fixture: "display_cabinet",
            label: Some("Counter"),
            position: (2.0, 0.0, 3.0),
            stock: Some((item: "packaged_jar", quantity: 10)),
        ),
    ],
)"#;

// ---------------------------------------------------------------------------
// A builder whose doors always arrive deferred
// ---------------------------------------------------------------------------

struct DeferredDoorBuilder {
    inner: LocalBuilder,
}

impl StructureBuilder for DeferredDoorBuilder {
    fn build_shell(
        &mut self,
        session: &mut Session,
        request: &ShellRequest<'_>,
    ) -> Result<ObjectId, BuildError> {
        self.inner.build_shell(session, request)
    }

    fn place_fixture(
        &mut self,
        session: &mut Session,
        root: ObjectId,
        request: &FixtureRequest<'_>,
    ) -> Result<SpawnOutcome, BuildError> {
        let is_door = session
            .registry()
            .fixture_def(request.fixture)
            .is_some_and(|def| def.spec.is_door);
        if is_door {
            let forced = FixtureRequest {
                networked: true,
                ..*request
            };
            return self.inner.place_fixture(session, root, &forced);
        }
        self.inner.place_fixture(session, root, request)
    }

    fn place_switch(
        &mut self,
        session: &mut Session,
        root: ObjectId,
        request: &SwitchRequest<'_>,
    ) -> Result<ObjectId, BuildError> {
        self.inner.place_switch(session, root, request)
    }

    fn place_sign(
        &mut self,
        session: &mut Session,
        root: ObjectId,
        request: &SignRequest<'_>,
    ) -> Result<ObjectId, BuildError> {
        self.inner.place_sign(session, root, request)
    }
}

#[test]
fn deferred_door_leaves_a_zero_door_binding() {
    let mut session = Session::new(test_registry());
    let mut builder = DeferredDoorBuilder {
        inner: LocalBuilder::new(),
    };
    let plan = parse_plan(KIOSK_PLAN);

    let fitout = build_fitout(&mut session, &mut builder, &plan, None).unwrap();

    // The door never yielded a handle, so nothing could be bound -- but
    // the binding itself still succeeds, as the degenerate zero-door case.
    assert!(fitout.doors.is_empty());
    let controller = fitout.controller.as_ref().expect("bind succeeds");
    assert!(!controller.locked());
    assert!(controller.doors().is_empty());

    // Flipping still tracks state with nothing to broadcast to.
    let switch = fitout.switch.unwrap();
    session.flip_toggle(switch).unwrap();
    assert!(controller.locked());
}

// ---------------------------------------------------------------------------
// A builder that fails one labeled placement
// ---------------------------------------------------------------------------

struct FailingBuilder {
    inner: LocalBuilder,
    fail_label: &'static str,
}

impl StructureBuilder for FailingBuilder {
    fn build_shell(
        &mut self,
        session: &mut Session,
        request: &ShellRequest<'_>,
    ) -> Result<ObjectId, BuildError> {
        self.inner.build_shell(session, request)
    }

    fn place_fixture(
        &mut self,
        session: &mut Session,
        root: ObjectId,
        request: &FixtureRequest<'_>,
    ) -> Result<SpawnOutcome, BuildError> {
        if request.name == self.fail_label {
            return Err(BuildError(format!("no prefab for '{}'", request.name)));
        }
        self.inner.place_fixture(session, root, request)
    }

    fn place_switch(
        &mut self,
        session: &mut Session,
        root: ObjectId,
        request: &SwitchRequest<'_>,
    ) -> Result<ObjectId, BuildError> {
        self.inner.place_switch(session, root, request)
    }

    fn place_sign(
        &mut self,
        session: &mut Session,
        root: ObjectId,
        request: &SignRequest<'_>,
    ) -> Result<ObjectId, BuildError> {
        self.inner.place_sign(session, root, request)
    }
}

#[test]
fn failed_placement_degrades_only_itself() {
    let mut session = Session::new(test_registry());
    let mut builder = FailingBuilder {
        inner: LocalBuilder::new(),
        fail_label: "Counter",
    };
    let plan = parse_plan(KIOSK_PLAN);

    let fitout = build_fitout(&mut session, &mut builder, &plan, None).unwrap();

    // The cabinet is gone but the door and switch stand and are bound.
    assert!(fitout.fixtures.is_empty());
    assert_eq!(fitout.doors.len(), 1);
    assert!(fitout.controller.is_some());

    // Nothing was queued for the failed placement.
    let report = session.notify_world_ready();
    assert!(report.is_empty());
}

// ---------------------------------------------------------------------------
// Name resolution failures happen before anything spawns
// ---------------------------------------------------------------------------

#[test]
fn unknown_fixture_fails_before_spawning() {
    let mut session = Session::new(test_registry());
    let mut builder = LocalBuilder::new();
    let plan = parse_plan(
        r#"(
            name: "Kiosk",
            shell: (size: (4.0, 4.0, 3.0)),
            position: (0.0, 0.0, 0.0),
            fixtures: [
                (fixture: "hologram_case", position: (1.0, 0.0, 1.0)),
            ],
        )"#,
    );

    let err = build_fitout(&mut session, &mut builder, &plan, None).unwrap_err();
    assert!(matches!(err, FitoutError::FixtureNotFound { name } if name == "hologram_case"));
    assert_eq!(session.world().object_count(), 0);
}

#[test]
fn unknown_stock_item_fails_before_spawning() {
    let mut session = Session::new(test_registry());
    let mut builder = LocalBuilder::new();
    let plan = parse_plan(
        r#"(
            name: "Kiosk",
            shell: (size: (4.0, 4.0, 3.0)),
            position: (0.0, 0.0, 0.0),
            fixtures: [
                (
                    fixture: "display_cabinet",
                    position: (1.0, 0.0, 1.0),
                    stock: Some((item: "mystery_meat", quantity: 5)),
                ),
            ],
        )"#,
    );

    let err = build_fitout(&mut session, &mut builder, &plan, None).unwrap_err();
    assert!(matches!(err, FitoutError::ItemNotFound { name } if name == "mystery_meat"));
    assert_eq!(session.world().object_count(), 0);
}

#[test]
fn switchless_plan_builds_unbound() {
    let mut session = Session::new(test_registry());
    let mut builder = LocalBuilder::new();
    let plan = parse_plan(
        r#"(
            name: "Kiosk",
            shell: (size: (4.0, 4.0, 3.0)),
            position: (0.0, 0.0, 0.0),
            doors: [
                (fixture: "sliding_door", position: (2.0, 0.0, 0.0)),
            ],
        )"#,
    );

    let fitout = build_fitout(&mut session, &mut builder, &plan, None).unwrap();
    assert_eq!(fitout.doors.len(), 1);
    assert!(fitout.switch.is_none());
    assert!(fitout.controller.is_none());

    // The unbound door keeps its spawn-time state.
    let door = fitout.doors[0];
    assert!(!session.world().door(door).unwrap().is_locked());
}
