//! Manages the shop gallery: loads the manifest, opens/closes shops, and
//! relays the host's world-readiness signal to the active session.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use shopwright_core::populate::PopulationReport;
use shopwright_core::session::Session;
use shopwright_data::{PaletteData, load_catalogs};

use crate::builder::StructureBuilder;
use crate::error::FitoutError;
use crate::fitout::{Fitout, build_fitout};
use crate::plan::{FitoutPlan, load_plan};

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

/// Top-level manifest listing available shop layouts.
#[derive(Debug, Clone, Deserialize)]
pub struct FitoutManifest {
    pub title: String,
    pub description: String,
    pub shops: Vec<ShopEntry>,
}

/// An entry pointing at a shop layout directory.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopEntry {
    pub id: String,
    pub title: String,
    pub summary: String,
    /// Relative path from the layouts directory to the shop directory.
    pub path: String,
}

/// Load the manifest from a `manifest.ron` file.
pub fn load_manifest(layouts_dir: &Path) -> Result<FitoutManifest, FitoutError> {
    let path = layouts_dir.join("manifest.ron");
    let content = std::fs::read_to_string(&path)?;
    ron::from_str(&content).map_err(|e| FitoutError::Parse {
        file: path,
        detail: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Manager
// ---------------------------------------------------------------------------

/// A fully opened shop: its own session plus the standing fitout.
#[derive(Debug)]
pub struct ActiveShop {
    pub session: Session,
    pub fitout: Fitout,
    pub plan: FitoutPlan,
    pub palette: Option<PaletteData>,
}

/// Loads the manifest, opens and closes shops, and relays host signals.
/// One shop is open at a time; each open builds a fresh session.
pub struct FitoutManager {
    layouts_dir: PathBuf,
    manifest: FitoutManifest,
    active: Option<ActiveShop>,
}

impl FitoutManager {
    /// Create a manager by loading the manifest from `layouts_dir`.
    pub fn new(layouts_dir: &Path) -> Result<Self, FitoutError> {
        let manifest = load_manifest(layouts_dir)?;
        Ok(Self {
            layouts_dir: layouts_dir.to_path_buf(),
            manifest,
            active: None,
        })
    }

    pub fn title(&self) -> &str {
        &self.manifest.title
    }

    pub fn description(&self) -> &str {
        &self.manifest.description
    }

    /// All shop entries from the manifest.
    pub fn shops(&self) -> &[ShopEntry] {
        &self.manifest.shops
    }

    /// Open a shop by manifest id, building it with the given builder.
    /// Any previously open shop is closed first.
    pub fn open(
        &mut self,
        shop_id: &str,
        builder: &mut dyn StructureBuilder,
    ) -> Result<(), FitoutError> {
        let entry = self
            .manifest
            .shops
            .iter()
            .find(|s| s.id == shop_id)
            .ok_or_else(|| FitoutError::ShopNotFound {
                id: shop_id.to_string(),
            })?;

        let shop_dir = self.layouts_dir.join(&entry.path);
        let catalogs = load_catalogs(&shop_dir).map_err(|source| FitoutError::CatalogLoad {
            dir: shop_dir.clone(),
            source,
        })?;
        let plan = load_plan(&shop_dir.join("shop.ron"))?;

        self.close();

        let mut session = Session::new(catalogs.registry);
        let fitout = build_fitout(&mut session, builder, &plan, catalogs.palette.as_ref())?;

        self.active = Some(ActiveShop {
            session,
            fitout,
            plan,
            palette: catalogs.palette,
        });
        Ok(())
    }

    /// Close the open shop, tearing down its session and world.
    pub fn close(&mut self) {
        if let Some(shop) = self.active.take() {
            log::info!("closed '{}'", shop.plan.name);
        }
    }

    pub fn active(&self) -> Option<&ActiveShop> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut ActiveShop> {
        self.active.as_mut()
    }

    /// Relay the host's world-readiness signal to the open shop's session.
    pub fn world_ready(&mut self) -> Result<PopulationReport, FitoutError> {
        let shop = self.active.as_mut().ok_or(FitoutError::NoActiveShop)?;
        Ok(shop.session.notify_world_ready())
    }
}
