use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::error::{LoadError, LoadResult};
use super::model::{CellValue, Dataset, DatasetKind, NodeGraph, Record, Table};

// ---------------------------------------------------------------------------
// Reader capability
// ---------------------------------------------------------------------------

/// Something that turns a file on disk into a [`Dataset`].
///
/// Readers hold configuration only, never data: each `load` opens, reads and
/// closes the file on its own, so repeated calls on an unchanged file return
/// equal datasets. A new on-disk format is supported by adding another
/// implementation.
pub trait DatasetReader {
    /// Shape of the datasets this reader produces.
    fn kind(&self) -> DatasetKind;

    /// Load `path`.
    ///
    /// Fails with [`LoadError::NotFound`] when `path` is not an existing
    /// regular file and with [`LoadError::Format`] when the content cannot be
    /// parsed.
    fn load(&self, path: &Path) -> LoadResult<Dataset>;
}

/// Load a dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row followed by one record per line → [`Table`]
/// * `.json` – a single top-level object keyed by node id → [`NodeGraph`]
pub fn load_file(path: &Path) -> LoadResult<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => CsvReader::new().load(path),
        "json" => JsonReader::new().load(path),
        other => Err(LoadError::format(
            path,
            format!("unsupported file extension: .{other}"),
        )),
    }
}

/// Open `path` for reading, refusing anything that is not a regular file.
///
/// The handle is dropped by the caller's scope on every exit path.
fn open_file(path: &Path) -> LoadResult<File> {
    let file = File::open(path).map_err(|e| LoadError::from_io(path, e))?;
    let meta = file.metadata().map_err(|e| LoadError::from_io(path, e))?;
    if !meta.is_file() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(file)
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// How CSV cells are typed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Inference {
    /// Every present cell stays [`CellValue::Text`].
    #[default]
    None,
    /// Per-cell scalar guessing, see [`Inference::cell`].
    Scalars,
}

impl Inference {
    /// Type one raw cell.
    ///
    /// With `Scalars` the rules are tried in order: empty → `Null`, `i64` →
    /// `Integer`, `f64` → `Float`, literal `true`/`false` → `Bool`, anything
    /// else → `Text`. The result depends on the cell alone.
    pub fn cell(self, s: &str) -> CellValue {
        match self {
            Inference::None => CellValue::Text(s.to_string()),
            Inference::Scalars => guess_cell_type(s),
        }
    }
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::Text(s.to_string())
}

/// CSV layout: header row with column names, then one record per line.
///
/// Parsing is relaxed: a short row is padded with `Null`, surplus fields on a
/// long row are dropped with a warning. Blank lines are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvReader {
    inference: Inference,
}

impl CsvReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inference(inference: Inference) -> Self {
        CsvReader { inference }
    }

    pub fn inference(&self) -> Inference {
        self.inference
    }

    /// Typed variant of [`DatasetReader::load`].
    pub fn read_table(&self, path: &Path) -> LoadResult<Table> {
        let file = open_file(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(BufReader::new(file));

        let raw_headers = reader.headers().map_err(|e| csv_error(path, e))?;
        if raw_headers.is_empty() {
            return Err(LoadError::format(path, "missing header row"));
        }
        let columns: Arc<[String]> = dedupe_headers(raw_headers.iter()).into();
        let width = columns.len();

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result.map_err(|e| csv_error(path, e))?;

            if row.len() > width {
                warn!(
                    "{}: line {} has {} fields, header has {width}; extra fields dropped",
                    path.display(),
                    row.position().map(|p| p.line()).unwrap_or(0),
                    row.len(),
                );
            }

            let mut values: Vec<CellValue> = row
                .iter()
                .take(width)
                .map(|field| self.inference.cell(field))
                .collect();
            values.resize(width, CellValue::Null);

            records.push(Record::new(columns.clone(), values));
        }

        debug!(
            "read {} records × {width} columns from {}",
            records.len(),
            path.display()
        );
        Ok(Table::new(columns, records))
    }
}

impl DatasetReader for CsvReader {
    fn kind(&self) -> DatasetKind {
        DatasetKind::Table
    }

    fn load(&self, path: &Path) -> LoadResult<Dataset> {
        self.read_table(path).map(Dataset::from)
    }
}

/// Make header names unique so each record is a proper mapping.
///
/// Repeats get a numeric suffix: `a, a, a` → `a, a.1, a.2`.
fn dedupe_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for name in raw {
        let mut candidate = name.to_string();
        let mut n = 0;
        while seen.contains(&candidate) {
            n += 1;
            candidate = format!("{name}.{n}");
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

fn csv_error(path: &Path, err: csv::Error) -> LoadError {
    let line = err.position().map(|p| p.line());
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => LoadError::from_io(path, source),
        _ => LoadError::Format {
            path: path.to_path_buf(),
            line,
            column: None,
            reason,
        },
    }
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Expected JSON schema (node id → attributes, attributes nest freely):
///
/// ```json
/// {
///   "81": { "friends": ["12", "45"], "age": 34 },
///   "12": { "friends": ["81"] }
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReader;

impl JsonReader {
    pub fn new() -> Self {
        JsonReader
    }

    /// Typed variant of [`DatasetReader::load`].
    pub fn read_graph(&self, path: &Path) -> LoadResult<NodeGraph> {
        let file = open_file(path)?;
        let root: JsonValue =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| json_error(path, e))?;

        let nodes = match root {
            JsonValue::Object(map) => map,
            other => {
                return Err(LoadError::format(
                    path,
                    format!("expected a top-level object, found {}", json_type_name(&other)),
                ))
            }
        };

        debug!("read {} nodes from {}", nodes.len(), path.display());
        Ok(NodeGraph::from_map(nodes))
    }
}

impl DatasetReader for JsonReader {
    fn kind(&self) -> DatasetKind {
        DatasetKind::NodeGraph
    }

    fn load(&self, path: &Path) -> LoadResult<Dataset> {
        self.read_graph(path).map(Dataset::from)
    }
}

fn json_error(path: &Path, err: serde_json::Error) -> LoadError {
    if err.is_io() {
        return LoadError::from_io(path, io::Error::from(err));
    }
    let (line, column) = (err.line(), err.column());
    // serde_json appends " at line L column C" itself; keep only the reason.
    let message = err.to_string();
    let reason = match message.rsplit_once(" at line ") {
        Some((reason, _)) if line > 0 => reason.to_string(),
        _ => message,
    };
    LoadError::Format {
        path: path.to_path_buf(),
        line: (line > 0).then_some(line as u64),
        column: (line > 0).then_some(column as u64),
        reason,
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
