/// Data layer: dataset types, readers, and errors.
///
/// Architecture:
/// ```text
///  .csv            .json
///    │                │
///    ▼                ▼
///  ┌───────────┐  ┌────────────┐
///  │ CsvReader │  │ JsonReader │   DatasetReader::load(path)
///  └───────────┘  └────────────┘
///    │                │
///    ▼                ▼
///  ┌───────┐      ┌───────────┐
///  │ Table │      │ NodeGraph │   both wrapped as Dataset
///  └───────┘      └───────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
