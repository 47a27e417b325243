//! Shopwright Core -- the session engine for shop-fitting game structures.
//!
//! This crate provides the world object store, deferred stocking pipeline,
//! event hub, access controller, and frozen kind registry that the fitout
//! layer drives when assembling and operating a shop.
//!
//! # Session Lifecycle
//!
//! A session moves through three externally-driven stages:
//!
//! 1. **Assembly** -- the fitout layer places objects through the structure
//!    builder. Stockable placements are queued on the [`populate::Populator`]
//!    as they succeed; networked placements queue later, through a one-shot
//!    [`spawn::SpawnTicket`] continuation, when the host delivers the
//!    finished handle.
//! 2. **World readiness** -- the host raises its ready signal exactly once;
//!    [`session::Session::notify_world_ready`] drains the queue in a single
//!    pass and returns a [`populate::PopulationReport`]. The drain seals
//!    the queue, so a repeated signal is harmless and completions arriving
//!    afterwards are dropped for good.
//! 3. **Operation** -- the host routes switch interactions and door-opened
//!    notifications through the session; the [`access::AccessController`]
//!    keeps every bound door's paired permission fields in lockstep with
//!    the toggle.
//!
//! # Key Types
//!
//! - [`session::Session`] -- owns the world, hub, populator, and registry;
//!   the host-facing entry points.
//! - [`world::WorldStore`] -- slotmap-backed object store; despawned
//!   handles stop resolving instead of dangling.
//! - [`spawn::SpawnOutcome`] -- ready handle or deferred one-shot ticket.
//! - [`populate::Populator`] -- the deferred stocking queue and its drain.
//! - [`access::AccessController`] -- toggle-to-doors lock state machine.
//! - [`event::EventHub`] -- typed events, synchronous dispatch, explicit
//!   unsubscribe.
//! - [`registry::Registry`] -- immutable item/fixture kinds, frozen at
//!   startup.

pub mod access;
pub mod event;
pub mod id;
pub mod populate;
pub mod registry;
pub mod session;
pub mod spawn;
pub mod stock;
pub mod world;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
