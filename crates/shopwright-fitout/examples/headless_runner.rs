//! Headless runner: opens every shop in the gallery, delivers networked
//! spawns, raises world readiness, and exercises the door lock cycle.
//!
//! Run with: `cargo run --package shopwright-fitout --example headless_runner`

use std::path::Path;

use shopwright_fitout::builder::LocalBuilder;
use shopwright_fitout::manager::FitoutManager;

fn main() {
    env_logger::init();

    let layouts_dir = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/layouts"));
    let mut mgr = FitoutManager::new(layouts_dir).expect("failed to load manifest");

    println!("=== {} ===\n{}\n", mgr.title(), mgr.description());
    println!("Shops: {}\n", mgr.shops().len());

    let entries = mgr.shops().to_vec();
    for entry in entries {
        println!("--- {} ---", entry.title);
        println!("    {}", entry.summary);

        let mut builder = LocalBuilder::new();
        mgr.open(&entry.id, &mut builder)
            .unwrap_or_else(|e| panic!("failed to open shop '{}': {e}", entry.id));

        {
            let shop = mgr.active_mut().unwrap();
            println!(
                "    Built '{}': {} objects, {} fixtures planned, {} networked in flight",
                shop.plan.name,
                shop.session.world().object_count(),
                shop.fitout.fixtures.len(),
                shop.fitout.deferred_placements,
            );

            let delivered = builder.pump(&mut shop.session);
            println!("    Delivered {delivered} networked spawn completions");
        }

        let report = mgr.world_ready().expect("shop should be open");
        println!(
            "    Population drain: {} filled, {} failed, {} units placed",
            report.success_count(),
            report.failure_count(),
            report.units_placed(),
        );

        let shop = mgr.active_mut().unwrap();
        let doors = shop.fitout.doors.clone();
        if let Some(switch) = shop.fitout.switch {
            // Lock, peek at a door, unlock.
            shop.session.flip_toggle(switch).expect("switch exists");
            let locked = shop
                .fitout
                .controller
                .as_ref()
                .map(|c| c.locked())
                .unwrap_or(false);
            println!("    Flipped switch: doors locked = {locked}");

            if let Some(&door) = doors.first() {
                let state = shop.session.world().door(door).unwrap();
                println!(
                    "    {:?}: player access {:?}, NPC openable {}",
                    door,
                    state.player_access(),
                    state.npc_openable(),
                );
                shop.session.door_opened(door);
            }

            shop.session.flip_toggle(switch).expect("switch exists");
            println!(
                "    Flipped back: doors locked = {}",
                shop.fitout
                    .controller
                    .as_ref()
                    .map(|c| c.locked())
                    .unwrap_or(false),
            );
        }

        mgr.close();
        println!();
    }

    println!("All shops exercised.");
}
