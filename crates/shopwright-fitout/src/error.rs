use std::path::PathBuf;

/// Errors that can occur while loading or building a fitout.
#[derive(Debug, thiserror::Error)]
pub enum FitoutError {
    /// No shop is currently open.
    #[error("no shop is currently open")]
    NoActiveShop,

    /// The requested shop was not found in the manifest.
    #[error("shop '{id}' not found in manifest")]
    ShopNotFound { id: String },

    /// A fixture name in the plan does not match the fixture catalog.
    #[error("fixture '{name}' not found in catalogs")]
    FixtureNotFound { name: String },

    /// An item name in the plan does not match the item catalog.
    #[error("item '{name}' not found in catalogs")]
    ItemNotFound { name: String },

    /// Failed to load catalogs from the shop directory.
    #[error("catalog load error in {dir}: {source}")]
    CatalogLoad {
        dir: PathBuf,
        source: shopwright_data::DataLoadError,
    },

    /// Failed to parse a plan or manifest file.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The builder could not produce the structure shell.
    #[error("shell construction failed: {detail}")]
    ShellBuild { detail: String },
}
