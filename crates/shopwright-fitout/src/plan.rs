//! Serde structs for fitout plan files (`shop.ron`).
//!
//! A plan is pure placement data: the shell parameters, where each
//! fixture sits, which placements are networked, what gets stocked, and
//! how the lock switch is labeled. Names reference the catalog files in
//! the same directory and are resolved before anything is built.

use serde::Deserialize;
use shopwright_data::PaletteData;
use std::path::Path;

use crate::error::FitoutError;

/// A complete shop plan.
#[derive(Debug, Clone, Deserialize)]
pub struct FitoutPlan {
    pub name: String,
    pub shell: ShellPlan,
    /// Overrides the catalog palette when present.
    #[serde(default)]
    pub palette: Option<PaletteData>,
    pub position: (f32, f32, f32),
    #[serde(default)]
    pub yaw_degrees: f32,
    #[serde(default)]
    pub signage: Vec<SignPlan>,
    #[serde(default)]
    pub doors: Vec<DoorPlan>,
    #[serde(default)]
    pub switch: Option<SwitchPlan>,
    #[serde(default)]
    pub fixtures: Vec<FixturePlacementPlan>,
}

/// Structural shell parameters, passed through to the builder verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct ShellPlan {
    /// Catalog fixture kind for the structure root.
    #[serde(default = "default_shell_fixture")]
    pub fixture: String,
    /// Width, depth, height in meters.
    pub size: (f32, f32, f32),
    #[serde(default)]
    pub south_door: bool,
    #[serde(default)]
    pub east_window: bool,
    #[serde(default)]
    pub west_window: bool,
    /// Roof trim bands, bottom-up: height plus the palette surface to use.
    #[serde(default)]
    pub trims: Vec<TrimPlan>,
    #[serde(default)]
    pub corner_pillar_width: Option<f32>,
    #[serde(default)]
    pub foundation: Option<FoundationPlan>,
    #[serde(default)]
    pub light_intensity: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrimPlan {
    pub height: f32,
    /// Which palette surface tints the band ("trim", "accent", ...).
    pub surface: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FoundationPlan {
    pub height: f32,
    #[serde(default)]
    pub expand: (f32, f32),
}

/// A decorative sign: exterior cross, neon open sign, ...
#[derive(Debug, Clone, Deserialize)]
pub struct SignPlan {
    pub fixture: String,
    pub label: String,
    #[serde(default)]
    pub text: Option<String>,
    pub position: (f32, f32, f32),
    #[serde(default)]
    pub yaw_degrees: f32,
}

/// An entry door placement.
#[derive(Debug, Clone, Deserialize)]
pub struct DoorPlan {
    pub fixture: String,
    #[serde(default)]
    pub label: Option<String>,
    pub position: (f32, f32, f32),
    #[serde(default)]
    pub yaw_degrees: f32,
    /// Text rendered above the door ("OPEN 24/7").
    #[serde(default)]
    pub header_text: Option<String>,
    /// Fixture kind used for the header sign, when header_text is set.
    #[serde(default)]
    pub header_fixture: Option<String>,
}

/// The lock switch placement and its interaction labels.
#[derive(Debug, Clone, Deserialize)]
pub struct SwitchPlan {
    pub fixture: String,
    #[serde(default)]
    pub label: Option<String>,
    pub position: (f32, f32, f32),
    #[serde(default)]
    pub yaw_degrees: f32,
    /// Whether the switch (and therefore the doors) starts in the on/unlocked state.
    #[serde(default = "default_true")]
    pub starts_on: bool,
    pub lock_label: String,
    pub unlock_label: String,
}

fn default_true() -> bool {
    true
}

fn default_shell_fixture() -> String {
    "building_shell".to_string()
}

/// An interior fixture placement.
#[derive(Debug, Clone, Deserialize)]
pub struct FixturePlacementPlan {
    pub fixture: String,
    #[serde(default)]
    pub label: Option<String>,
    pub position: (f32, f32, f32),
    #[serde(default)]
    pub yaw_degrees: f32,
    /// Networked placements complete asynchronously.
    #[serde(default)]
    pub networked: bool,
    /// Stockable fixtures are queued for deferred population with this.
    #[serde(default)]
    pub stock: Option<StockPlan>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StockPlan {
    pub item: String,
    pub quantity: u32,
}

/// Load a `shop.ron` plan file.
pub fn load_plan(path: &Path) -> Result<FitoutPlan, FitoutError> {
    let content = std::fs::read_to_string(path)?;
    ron::from_str(&content).map_err(|e| FitoutError::Parse {
        file: path.to_path_buf(),
        detail: e.to_string(),
    })
}
