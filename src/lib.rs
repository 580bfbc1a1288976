pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::toml_config::TomlConfig;
pub use crate::core::{
    fetcher::ArticFetcher,
    reconciler::{BulkSelectOutcome, SelectionReconciler},
    shell::{Command, Shell},
};
pub use domain::model::{Artwork, ArtworkPage, PageWindow};
pub use domain::selection::SelectionSet;
pub use utils::error::{Result, TableError};
