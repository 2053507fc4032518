//! Caller-facing catalog: dataset names → files → readers.

use std::path::{Path, PathBuf};

use log::{error, info};

use crate::config::{CatalogConfig, MissingPolicy};
use crate::data::error::{LoadError, LoadResult};
use crate::data::loader::{CsvReader, DatasetReader, JsonReader};
use crate::data::model::{Dataset, DatasetKind, NodeGraph, Table};

/// Named datasets under one base directory.
///
/// The catalog is read-only after construction. Every `load_*` call hits the
/// filesystem again; nothing is cached.
///
/// A missing file is handled according to [`MissingPolicy`]: by default it is
/// logged and the call yields `Ok(None)`. Parse failures always come back as
/// `Err`.
#[derive(Debug, Clone)]
pub struct DatasetCatalog {
    config: CatalogConfig,
    csv: CsvReader,
    json: JsonReader,
}

impl DatasetCatalog {
    /// Default dataset layout rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self::from_config(CatalogConfig::with_base_dir(base_dir))
    }

    pub fn from_config(config: CatalogConfig) -> Self {
        DatasetCatalog {
            csv: CsvReader::with_inference(config.csv_inference),
            json: JsonReader::new(),
            config,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn base_dir(&self) -> &Path {
        &self.config.base_dir
    }

    /// Registered network names, sorted.
    pub fn network_names(&self) -> impl Iterator<Item = &str> {
        self.config.networks.keys().map(String::as_str)
    }

    /// `base_dir/filename`.
    pub fn resolve(&self, filename: &str) -> PathBuf {
        self.config.base_dir.join(filename)
    }

    /// Load the scam records table from the configured file.
    pub fn load_scams(&self) -> LoadResult<Option<Table>> {
        self.load_scams_from(&self.config.scams_file)
    }

    /// Load the scam records table from `filename` under the base directory.
    pub fn load_scams_from(&self, filename: &str) -> LoadResult<Option<Table>> {
        let dataset = self.load_entry("Scam", filename, DatasetKind::Table)?;
        dataset.map(into_table).transpose()
    }

    /// Load a registered network by name.
    pub fn load_network(&self, name: &str) -> LoadResult<Option<NodeGraph>> {
        let filename = self
            .config
            .networks
            .get(name)
            .ok_or_else(|| LoadError::UnknownDataset {
                name: name.to_string(),
            })?;
        self.load_network_from(name, filename)
    }

    /// Load a network from an explicit filename; `name` is only used for
    /// log messages.
    pub fn load_network_from(&self, name: &str, filename: &str) -> LoadResult<Option<NodeGraph>> {
        let dataset = self.load_entry(name, filename, DatasetKind::NodeGraph)?;
        dataset.map(into_graph).transpose()
    }

    fn reader(&self, kind: DatasetKind) -> &dyn DatasetReader {
        match kind {
            DatasetKind::Table => &self.csv,
            DatasetKind::NodeGraph => &self.json,
        }
    }

    fn load_entry(
        &self,
        label: &str,
        filename: &str,
        kind: DatasetKind,
    ) -> LoadResult<Option<Dataset>> {
        let path = self.resolve(filename);
        match self.reader(kind).load(&path) {
            Ok(dataset) => {
                info!("{label} data loaded successfully from {}", path.display());
                Ok(Some(dataset))
            }
            Err(err) if err.is_not_found() => {
                error!("{filename} not found at {}", path.display());
                match self.config.on_missing {
                    MissingPolicy::ReturnAbsent => Ok(None),
                    MissingPolicy::Propagate => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }
}

fn into_table(dataset: Dataset) -> LoadResult<Table> {
    let found = dataset.kind();
    dataset.into_table().ok_or(LoadError::WrongKind {
        expected: DatasetKind::Table,
        found,
    })
}

fn into_graph(dataset: Dataset) -> LoadResult<NodeGraph> {
    let found = dataset.kind();
    dataset.into_graph().ok_or(LoadError::WrongKind {
        expected: DatasetKind::NodeGraph,
        found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn catalog_with_files() -> (tempfile::TempDir, DatasetCatalog) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("scams.csv"), "id,label\n1,phishing\n").unwrap();
        fs::write(dir.path().join("BiNetwork50.json"), r#"{"1": {"friends": ["2"]}}"#).unwrap();
        let catalog = DatasetCatalog::new(dir.path());
        (dir, catalog)
    }

    #[test]
    fn resolves_against_base_dir() {
        let catalog = DatasetCatalog::new("/srv/data");
        assert_eq!(catalog.resolve("scams.csv"), PathBuf::from("/srv/data/scams.csv"));
        assert_eq!(
            catalog.network_names().collect::<Vec<_>>(),
            vec!["BiNetwork50", "UniNetwork150"]
        );
    }

    #[test]
    fn loads_default_scams_and_network() {
        let (_dir, catalog) = catalog_with_files();
        let scams = catalog.load_scams().unwrap().expect("scams present");
        assert_eq!(scams.len(), 1);

        let net = catalog.load_network("BiNetwork50").unwrap().expect("network present");
        assert!(net.contains("1"));
    }

    #[test]
    fn missing_file_is_absent_by_default() {
        let (_dir, catalog) = catalog_with_files();
        assert!(catalog.load_network("UniNetwork150").unwrap().is_none());
        assert!(catalog.load_scams_from("other.csv").unwrap().is_none());
    }

    #[test]
    fn missing_file_propagates_when_configured() {
        let (dir, _) = catalog_with_files();
        let catalog = DatasetCatalog::from_config(CatalogConfig {
            on_missing: MissingPolicy::Propagate,
            ..CatalogConfig::with_base_dir(dir.path())
        });
        let err = catalog.load_network("UniNetwork150").unwrap_err();
        match err {
            LoadError::NotFound { path } => assert_eq!(path, dir.path().join("UniNetwork150.json")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn unknown_network_name_is_an_error() {
        let (_dir, catalog) = catalog_with_files();
        assert!(matches!(
            catalog.load_network("TriNetwork"),
            Err(LoadError::UnknownDataset { .. })
        ));
    }

    #[test]
    fn kind_mismatch_is_reported() {
        let table = Dataset::from(NodeGraph::default());
        assert!(matches!(
            into_table(table),
            Err(LoadError::WrongKind {
                expected: DatasetKind::Table,
                found: DatasetKind::NodeGraph
            })
        ));
    }
}
