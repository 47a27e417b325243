//! The fitout driver: turns a resolved plan into a standing shop.
//!
//! Name resolution happens first, against the frozen registry, so a bad
//! plan fails before anything is spawned. After that, single placement
//! failures degrade that placement (the original shop keeps its doors even
//! when a cabinet refuses to spawn); only a failed shell aborts the build.

use shopwright_core::access::{AccessController, ToggleState};
use shopwright_core::id::{FixtureKindId, ItemKindId, ObjectId};
use shopwright_core::session::Session;
use shopwright_core::spawn::SpawnOutcome;
use shopwright_core::world::Placement;
use shopwright_data::PaletteData;

use crate::builder::{
    FixtureRequest, ShellRequest, SignRequest, StructureBuilder, SwitchRequest,
};
use crate::error::FitoutError;
use crate::plan::{DoorPlan, FitoutPlan, FixturePlacementPlan, SignPlan, SwitchPlan};

/// Metadata about one planned fixture, for renderers and inspection.
#[derive(Debug, Clone)]
pub struct FixtureMeta {
    pub label: String,
    pub fixture: FixtureKindId,
    /// Resolved handle; `None` while a networked placement is in flight.
    pub object: Option<ObjectId>,
    pub networked: bool,
}

/// A standing shop: the handles the session needs to operate it.
#[derive(Debug)]
pub struct Fitout {
    pub root: ObjectId,
    pub doors: Vec<ObjectId>,
    pub switch: Option<ObjectId>,
    /// `None` when the plan had no switch or binding degraded.
    pub controller: Option<AccessController>,
    pub fixtures: Vec<FixtureMeta>,
    /// Networked placements still unresolved when the build returned.
    pub deferred_placements: usize,
}

// ---------------------------------------------------------------------------
// Name resolution
// ---------------------------------------------------------------------------

struct ResolvedNames {
    shell: FixtureKindId,
    signs: Vec<FixtureKindId>,
    doors: Vec<(FixtureKindId, Option<FixtureKindId>)>,
    switch: Option<FixtureKindId>,
    placements: Vec<(FixtureKindId, Option<(ItemKindId, u32)>)>,
}

fn fixture_id(session: &Session, name: &str) -> Result<FixtureKindId, FitoutError> {
    session
        .registry()
        .fixture_id(name)
        .ok_or_else(|| FitoutError::FixtureNotFound {
            name: name.to_string(),
        })
}

fn item_id(session: &Session, name: &str) -> Result<ItemKindId, FitoutError> {
    session
        .registry()
        .item_id(name)
        .ok_or_else(|| FitoutError::ItemNotFound {
            name: name.to_string(),
        })
}

fn resolve_names(session: &Session, plan: &FitoutPlan) -> Result<ResolvedNames, FitoutError> {
    let shell = fixture_id(session, &plan.shell.fixture)?;

    let signs = plan
        .signage
        .iter()
        .map(|sign| fixture_id(session, &sign.fixture))
        .collect::<Result<Vec<_>, _>>()?;

    let doors = plan
        .doors
        .iter()
        .map(|door| {
            let kind = fixture_id(session, &door.fixture)?;
            let header = door
                .header_fixture
                .as_deref()
                .map(|name| fixture_id(session, name))
                .transpose()?;
            Ok((kind, header))
        })
        .collect::<Result<Vec<_>, FitoutError>>()?;

    let switch = plan
        .switch
        .as_ref()
        .map(|switch| fixture_id(session, &switch.fixture))
        .transpose()?;

    let placements = plan
        .fixtures
        .iter()
        .map(|placement| {
            let kind = fixture_id(session, &placement.fixture)?;
            let stock = placement
                .stock
                .as_ref()
                .map(|stock| Ok::<_, FitoutError>((item_id(session, &stock.item)?, stock.quantity)))
                .transpose()?;
            Ok((kind, stock))
        })
        .collect::<Result<Vec<_>, FitoutError>>()?;

    Ok(ResolvedNames {
        shell,
        signs,
        doors,
        switch,
        placements,
    })
}

// ---------------------------------------------------------------------------
// Build
// ---------------------------------------------------------------------------

fn placement_of(position: (f32, f32, f32), yaw_degrees: f32) -> Placement {
    Placement::new(position, yaw_degrees)
}

/// Drive the builder through a plan and wire the resulting shop.
pub fn build_fitout(
    session: &mut Session,
    builder: &mut dyn StructureBuilder,
    plan: &FitoutPlan,
    catalog_palette: Option<&PaletteData>,
) -> Result<Fitout, FitoutError> {
    let resolved = resolve_names(session, plan)?;
    let palette = plan.palette.as_ref().or(catalog_palette);

    // Shell first; nothing to attach to without it.
    let root = builder
        .build_shell(
            session,
            &ShellRequest {
                name: &plan.name,
                fixture: resolved.shell,
                shell: &plan.shell,
                palette,
                placement: placement_of(plan.position, plan.yaw_degrees),
            },
        )
        .map_err(|e| FitoutError::ShellBuild {
            detail: e.to_string(),
        })?;

    place_signage(session, builder, root, &plan.signage, &resolved.signs);
    let doors = place_doors(session, builder, root, &plan.doors, &resolved.doors);
    let (fixtures, deferred_placements) =
        place_fixtures(session, builder, root, &plan.fixtures, &resolved.placements);
    let switch = place_switch(session, builder, root, plan.switch.as_ref(), resolved.switch);

    let controller = match switch {
        Some(id) => match session.bind_access_control(Some(id), &doors) {
            Ok(controller) => Some(controller),
            Err(e) => {
                log::warn!("'{}': access control not bound: {e}", plan.name);
                None
            }
        },
        None => {
            log::warn!("'{}': no lock switch; doors left unbound", plan.name);
            None
        }
    };

    log::info!(
        "'{}' built: {} doors, {} fixtures ({} deferred), switch {}",
        plan.name,
        doors.len(),
        fixtures.len(),
        deferred_placements,
        if switch.is_some() { "placed" } else { "absent" },
    );

    Ok(Fitout {
        root,
        doors,
        switch,
        controller,
        fixtures,
        deferred_placements,
    })
}

fn place_signage(
    session: &mut Session,
    builder: &mut dyn StructureBuilder,
    root: ObjectId,
    plans: &[SignPlan],
    kinds: &[FixtureKindId],
) {
    for (sign, &fixture) in plans.iter().zip(kinds) {
        let request = SignRequest {
            fixture,
            name: &sign.label,
            text: sign.text.as_deref(),
            placement: placement_of(sign.position, sign.yaw_degrees),
        };
        if let Err(e) = builder.place_sign(session, root, &request) {
            log::warn!("sign '{}' skipped: {e}", sign.label);
        }
    }
}

fn place_doors(
    session: &mut Session,
    builder: &mut dyn StructureBuilder,
    root: ObjectId,
    plans: &[DoorPlan],
    kinds: &[(FixtureKindId, Option<FixtureKindId>)],
) -> Vec<ObjectId> {
    let mut doors = Vec::with_capacity(plans.len());
    for (door, &(fixture, header_fixture)) in plans.iter().zip(kinds) {
        let label = door.label.as_deref().unwrap_or(&door.fixture);
        let request = FixtureRequest {
            fixture,
            name: label,
            placement: placement_of(door.position, door.yaw_degrees),
            networked: false,
        };
        match builder.place_fixture(session, root, &request) {
            Ok(SpawnOutcome::Ready(id)) => doors.push(id),
            Ok(SpawnOutcome::Deferred(_)) => {
                log::warn!("door '{label}' arrived deferred; it cannot be bound");
            }
            Err(e) => log::warn!("door '{label}' skipped: {e}"),
        }

        if let (Some(text), Some(header)) = (door.header_text.as_deref(), header_fixture) {
            let header_name = format!("{label}_Header");
            let request = SignRequest {
                fixture: header,
                name: &header_name,
                text: Some(text),
                placement: placement_of(door.position, door.yaw_degrees),
            };
            if let Err(e) = builder.place_sign(session, root, &request) {
                log::warn!("door header for '{label}' skipped: {e}");
            }
        }
    }
    doors
}

fn place_fixtures(
    session: &mut Session,
    builder: &mut dyn StructureBuilder,
    root: ObjectId,
    plans: &[FixturePlacementPlan],
    kinds: &[(FixtureKindId, Option<(ItemKindId, u32)>)],
) -> (Vec<FixtureMeta>, usize) {
    let mut metas = Vec::with_capacity(plans.len());
    let mut deferred = 0usize;

    for (placement, &(fixture, stock)) in plans.iter().zip(kinds) {
        let label = placement.label.as_deref().unwrap_or(&placement.fixture);
        let request = FixtureRequest {
            fixture,
            name: label,
            placement: placement_of(placement.position, placement.yaw_degrees),
            networked: placement.networked,
        };
        let outcome = match builder.place_fixture(session, root, &request) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("fixture '{label}' skipped: {e}");
                continue;
            }
        };

        let object = match &outcome {
            SpawnOutcome::Ready(id) => Some(*id),
            SpawnOutcome::Deferred(_) => {
                deferred += 1;
                None
            }
        };

        // Stockable placements join the deferred population queue the
        // moment their spawn succeeds -- now, or at ticket completion.
        if let Some((item, quantity)) = stock {
            session.enqueue_stock(outcome, item, quantity);
        }

        metas.push(FixtureMeta {
            label: label.to_string(),
            fixture,
            object,
            networked: placement.networked,
        });
    }

    (metas, deferred)
}

fn place_switch(
    session: &mut Session,
    builder: &mut dyn StructureBuilder,
    root: ObjectId,
    plan: Option<&SwitchPlan>,
    kind: Option<FixtureKindId>,
) -> Option<ObjectId> {
    let (plan, fixture) = plan.zip(kind)?;
    let label = plan.label.as_deref().unwrap_or(&plan.fixture);
    let request = SwitchRequest {
        fixture,
        name: label,
        placement: placement_of(plan.position, plan.yaw_degrees),
        initial: if plan.starts_on {
            ToggleState::On
        } else {
            ToggleState::Off
        },
        lock_label: &plan.lock_label,
        unlock_label: &plan.unlock_label,
    };
    match builder.place_switch(session, root, &request) {
        Ok(id) => Some(id),
        Err(e) => {
            log::warn!("switch '{label}' skipped: {e}");
            None
        }
    }
}
