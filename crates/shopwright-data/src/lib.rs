//! Catalog loading for shopwright: RON data files describing item kinds,
//! fixture kinds, and shell palettes, resolved into the core's frozen
//! registry.

pub mod loader;
pub mod schema;

pub use loader::{Catalogs, DataLoadError, load_catalogs};
pub use schema::{FixtureData, FixtureRole, ItemData, PaletteData, Surface};
