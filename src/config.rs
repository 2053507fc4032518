//! Catalog configuration.
//!
//! Every field has a default, so an empty JSON object is a complete config.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::error::{LoadError, LoadResult};
use crate::data::loader::Inference;

/// What the catalog does when a dataset file is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Log an error and hand back `None`.
    #[default]
    ReturnAbsent,
    /// Return [`LoadError::NotFound`] to the caller.
    Propagate,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Directory every dataset filename is resolved against.
    pub base_dir: PathBuf,
    /// Scam records table.
    pub scams_file: String,
    /// Network name → JSON filename.
    pub networks: BTreeMap<String, String>,
    pub on_missing: MissingPolicy,
    pub csv_inference: Inference,
}

impl CatalogConfig {
    pub const DEFAULT_BASE_DIR: &'static str = "socialshield/datasets";
    pub const DEFAULT_SCAMS_FILE: &'static str = "scams.csv";

    /// Defaults with a different base directory.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        CatalogConfig {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    /// Read a JSON config file.
    pub fn from_json_file(path: &Path) -> LoadResult<Self> {
        let file = File::open(path).map_err(|e| LoadError::from_io(path, e))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| LoadError::Format {
            path: path.to_path_buf(),
            line: Some(e.line() as u64),
            column: Some(e.column() as u64),
            reason: format!("invalid catalog config: {e}"),
        })
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let networks = [
            ("BiNetwork50", "BiNetwork50.json"),
            ("UniNetwork150", "UniNetwork150.json"),
        ]
        .into_iter()
        .map(|(name, file)| (name.to_string(), file.to_string()))
        .collect();

        CatalogConfig {
            base_dir: PathBuf::from(Self::DEFAULT_BASE_DIR),
            scams_file: Self::DEFAULT_SCAMS_FILE.to_string(),
            networks,
            on_missing: MissingPolicy::default(),
            csv_inference: Inference::default(),
        }
    }
}
