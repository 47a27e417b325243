//! Resolution pipeline: reads catalog files and builds the frozen registry.
//!
//! A catalog directory holds `items.ron`, `fixtures.ron`, and
//! `palette.ron`. Items and fixtures are required; the palette is optional
//! (a shop plan may carry its own).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use shopwright_core::registry::{FixtureSpec, Registry, RegistryBuilder};

use crate::schema::{FixtureData, FixtureRole, ItemData, PaletteData};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required catalog file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: &'static str, dir: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A duplicate name was found.
    #[error("duplicate name '{name}' in {file}")]
    DuplicateName { file: PathBuf, name: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Loading
// ===========================================================================

/// Everything a catalog directory defines.
#[derive(Debug)]
pub struct Catalogs {
    pub registry: Registry,
    pub palette: Option<PaletteData>,
}

fn read_ron<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let content = std::fs::read_to_string(path)?;
    ron::from_str(&content).map_err(|e| DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: e.to_string(),
    })
}

fn read_required<T: DeserializeOwned>(
    dir: &Path,
    file: &'static str,
) -> Result<T, DataLoadError> {
    let path = dir.join(file);
    if !path.exists() {
        return Err(DataLoadError::MissingRequired {
            file,
            dir: dir.to_path_buf(),
        });
    }
    read_ron(&path)
}

/// Load `items.ron` and `fixtures.ron` (required) plus `palette.ron`
/// (optional) from a catalog directory, and freeze the registry.
pub fn load_catalogs(dir: &Path) -> Result<Catalogs, DataLoadError> {
    let items: Vec<ItemData> = read_required(dir, "items.ron")?;
    let fixtures: Vec<FixtureData> = read_required(dir, "fixtures.ron")?;

    let mut builder = RegistryBuilder::new();
    let mut seen = HashSet::new();

    for item in &items {
        if !seen.insert(item.name.clone()) {
            return Err(DataLoadError::DuplicateName {
                file: dir.join("items.ron"),
                name: item.name.clone(),
            });
        }
        builder.register_item(&item.name);
    }

    seen.clear();
    for fixture in &fixtures {
        if !seen.insert(fixture.name.clone()) {
            return Err(DataLoadError::DuplicateName {
                file: dir.join("fixtures.ron"),
                name: fixture.name.clone(),
            });
        }
        let spec = match fixture.role {
            FixtureRole::Decoration => FixtureSpec::decoration(),
            FixtureRole::Stockable(capacity) => FixtureSpec::stockable(capacity),
            FixtureRole::Door => FixtureSpec::door(),
            FixtureRole::Switch => FixtureSpec::switch(),
        };
        builder.register_fixture(&fixture.name, spec);
    }

    let palette_path = dir.join("palette.ron");
    let palette = if palette_path.exists() {
        Some(read_ron(&palette_path)?)
    } else {
        None
    };

    let registry = builder.freeze();
    log::debug!(
        "loaded catalogs from {}: {} items, {} fixtures",
        dir.display(),
        registry.item_count(),
        registry.fixture_count()
    );

    Ok(Catalogs { registry, palette })
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn write_catalogs(dir: &Path, items: &str, fixtures: &str) {
        std::fs::write(dir.join("items.ron"), items).unwrap();
        std::fs::write(dir.join("fixtures.ron"), fixtures).unwrap();
    }

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "shopwright-data-{tag}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn load_minimal_catalogs() {
        let dir = temp_dir("minimal");
        write_catalogs(
            &dir,
            r#"[(name: "packaged_jar")]"#,
            r#"[
                (name: "display_cabinet", role: stockable(40)),
                (name: "sliding_door", role: door),
            ]"#,
        );

        let catalogs = load_catalogs(&dir).unwrap();
        assert_eq!(catalogs.registry.item_count(), 1);
        assert_eq!(catalogs.registry.fixture_count(), 2);
        assert!(catalogs.palette.is_none());

        let cabinet = catalogs.registry.fixture_id("display_cabinet").unwrap();
        assert_eq!(
            catalogs
                .registry
                .fixture_def(cabinet)
                .unwrap()
                .spec
                .stock_capacity,
            Some(40)
        );
        let door = catalogs.registry.fixture_id("sliding_door").unwrap();
        assert!(catalogs.registry.fixture_def(door).unwrap().spec.is_door);
    }

    #[test]
    fn missing_required_file_is_reported() {
        let dir = temp_dir("missing");
        std::fs::write(dir.join("items.ron"), r#"[(name: "packaged_jar")]"#).unwrap();

        let err = load_catalogs(&dir).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::MissingRequired {
                file: "fixtures.ron",
                ..
            }
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let dir = temp_dir("duplicate");
        write_catalogs(
            &dir,
            r#"[(name: "packaged_jar"), (name: "packaged_jar")]"#,
            r#"[]"#,
        );

        let err = load_catalogs(&dir).unwrap_err();
        assert!(matches!(err, DataLoadError::DuplicateName { name, .. } if name == "packaged_jar"));
    }

    #[test]
    fn parse_errors_carry_the_file() {
        let dir = temp_dir("parse");
        write_catalogs(&dir, "not ron at all", r#"[]"#);

        let err = load_catalogs(&dir).unwrap_err();
        match err {
            DataLoadError::Parse { file, .. } => {
                assert!(file.ends_with("items.ron"));
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn palette_is_loaded_when_present() {
        let dir = temp_dir("palette");
        write_catalogs(&dir, r#"[]"#, r#"[]"#);
        std::fs::write(
            dir.join("palette.ron"),
            r#"(
                floor: (material: "concrete", color: (0.7, 0.7, 0.7)),
                wall: (material: "granite", color: (0.9, 0.9, 0.9)),
                ceiling: (material: "concrete", color: (0.9, 0.9, 0.9)),
                trim: (material: "brick", color: (0.3, 0.5, 0.3)),
                pillar: (material: "brick", color: (0.6, 0.3, 0.2)),
                accent: (material: "concrete_green", color: (0.3, 0.5, 0.3)),
                light_color: (1.0, 0.98, 0.95),
                light_intensity: 1.2,
            )"#,
        )
        .unwrap();

        let catalogs = load_catalogs(&dir).unwrap();
        let palette = catalogs.palette.unwrap();
        assert_eq!(palette.floor.material, "concrete");
    }
}
