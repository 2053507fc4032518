//! Loaders for the SocialShield datasets: CSV scam records and JSON social
//! network graphs, behind one [`DatasetReader`] interface.
//!
//! ```no_run
//! use socialshield::DatasetCatalog;
//!
//! let catalog = DatasetCatalog::new("socialshield/datasets");
//! if let Some(scams) = catalog.load_scams()? {
//!     println!("{} scam records", scams.len());
//! }
//! # Ok::<(), socialshield::LoadError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod data;

pub use catalog::DatasetCatalog;
pub use config::{CatalogConfig, MissingPolicy};
pub use data::error::{LoadError, LoadResult};
pub use data::loader::{load_file, CsvReader, DatasetReader, Inference, JsonReader};
pub use data::model::{CellValue, Dataset, DatasetKind, NodeGraph, Record, Table};
