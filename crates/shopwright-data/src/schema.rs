//! Serde data file structs for shop content definitions.
//!
//! These structs define the on-disk format for item kinds, fixture kinds,
//! and palettes. They are deserialized from RON data files and then
//! resolved into core registry types by the loader.

use serde::Deserialize;

// ===========================================================================
// Items
// ===========================================================================

/// An item kind definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemData {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

// ===========================================================================
// Fixtures
// ===========================================================================

/// What a fixture kind can do, in data form.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureRole {
    /// Pure decoration; no capabilities.
    Decoration,
    /// Holds items, up to the given capacity.
    Stockable(u32),
    /// An access point.
    Door,
    /// A binary toggle device.
    Switch,
}

/// A fixture kind definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureData {
    pub name: String,
    pub role: FixtureRole,
}

// ===========================================================================
// Palette
// ===========================================================================

/// A material reference plus tint. Opaque to the core; the builder passes
/// it through to the host renderer.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Surface {
    pub material: String,
    pub color: (f32, f32, f32),
}

/// Visual palette for a shop shell. Pure data; never interpreted here.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PaletteData {
    pub floor: Surface,
    pub wall: Surface,
    pub ceiling: Surface,
    pub trim: Surface,
    pub pillar: Surface,
    pub accent: Surface,
    pub light_color: (f32, f32, f32),
    pub light_intensity: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_fixture_roles() {
        let input = r#"[
            (name: "display_cabinet", role: stockable(40)),
            (name: "sliding_door", role: door),
            (name: "lock_switch", role: switch),
            (name: "vase", role: decoration),
        ]"#;
        let fixtures: Vec<FixtureData> = ron::from_str(input).unwrap();
        assert_eq!(fixtures.len(), 4);
        assert!(matches!(fixtures[0].role, FixtureRole::Stockable(40)));
        assert!(matches!(fixtures[1].role, FixtureRole::Door));
        assert!(matches!(fixtures[2].role, FixtureRole::Switch));
        assert!(matches!(fixtures[3].role, FixtureRole::Decoration));
    }

    #[test]
    fn deserialize_palette() {
        let input = r#"(
            floor: (material: "concrete_light_grey", color: (0.75, 0.75, 0.75)),
            wall: (material: "granite_dull_salmon", color: (0.94, 0.94, 0.94)),
            ceiling: (material: "concrete_light_grey", color: (0.94, 0.94, 0.94)),
            trim: (material: "brick_wall_red", color: (0.29, 0.48, 0.29)),
            pillar: (material: "brick_wall_red", color: (0.6, 0.3, 0.2)),
            accent: (material: "concrete_dark_green", color: (0.29, 0.48, 0.29)),
            light_color: (1.0, 0.98, 0.95),
            light_intensity: 1.2,
        )"#;
        let palette: PaletteData = ron::from_str(input).unwrap();
        assert_eq!(palette.light_intensity, 1.2);
        assert_eq!(palette.trim.material, "brick_wall_red");
    }

    #[test]
    fn item_display_name_is_optional() {
        let input = r#"[(name: "packaged_jar"), (name: "loose_bud", display_name: Some("Loose Bud"))]"#;
        let items: Vec<ItemData> = ron::from_str(input).unwrap();
        assert!(items[0].display_name.is_none());
        assert_eq!(items[1].display_name.as_deref(), Some("Loose Bud"));
    }
}
