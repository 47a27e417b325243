//! Fitout driver for shopwright.
//!
//! Loads declarative shop plans, drives a [`builder::StructureBuilder`]
//! through them, queues deferred stocking on the core session, and wires
//! the lock switch to the doors.
//!
//! # Usage
//!
//! ```rust,ignore
//! use shopwright_fitout::builder::LocalBuilder;
//! use shopwright_fitout::manager::FitoutManager;
//!
//! let mut builder = LocalBuilder::new();
//! let mut mgr = FitoutManager::new("layouts/".as_ref())?;
//! mgr.open("green_lab", &mut builder)?;
//! builder.pump(&mut mgr.active_mut().unwrap().session);
//! let report = mgr.world_ready()?;
//! ```

pub mod builder;
pub mod error;
pub mod fitout;
pub mod manager;
pub mod plan;

pub use builder::{LocalBuilder, StructureBuilder};
pub use error::FitoutError;
pub use fitout::{Fitout, FixtureMeta, build_fitout};
pub use manager::{ActiveShop, FitoutManager, FitoutManifest, ShopEntry};
pub use plan::{FitoutPlan, load_plan};
