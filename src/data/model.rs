use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde_json::{Map, Value as JsonValue};

// ---------------------------------------------------------------------------
// CellValue – a single cell in a CSV column
// ---------------------------------------------------------------------------

/// A scalar CSV cell.
///
/// Without inference every present cell is `Text`; `Null` marks a cell the
/// row did not have at all.
///
/// Equality, ordering and hashing all compare floats by bit pattern
/// (`f64::total_cmp`), so `NaN == NaN` and `0.0 != -0.0`.
#[derive(Debug, Clone)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl CellValue {
    /// Sort position of the variant: nulls first, text last.
    fn rank(&self) -> u8 {
        match self {
            CellValue::Null => 0,
            CellValue::Bool(_) => 1,
            CellValue::Integer(_) => 2,
            CellValue::Float(_) => 3,
            CellValue::Text(_) => 4,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Integer(a), CellValue::Integer(b)) => a.cmp(b),
            (CellValue::Float(a), CellValue::Float(b)) => a.total_cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            // total_cmp is Equal exactly when the bits match
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => f.write_str("<null>"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of a Table
// ---------------------------------------------------------------------------

/// One CSV row, keyed by the table's header.
///
/// The header is shared between all records of a table, so every record has
/// exactly the same key set.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    columns: Arc<[String]>,
    values: Vec<CellValue>,
}

impl Record {
    /// `values` must have one entry per column; the loader pads/truncates
    /// before calling this.
    pub(crate) fn new(columns: Arc<[String]>, values: Vec<CellValue>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Record { columns, values }
    }

    /// Value of `column`, or `None` if the table has no such column.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn values(&self) -> &[CellValue] {
        &self.values
    }
}

// ---------------------------------------------------------------------------
// Table – the result of loading a CSV file
// ---------------------------------------------------------------------------

/// Ordered records sharing one header.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Arc<[String]>,
    records: Vec<Record>,
}

impl Table {
    pub(crate) fn new(columns: Arc<[String]>, records: Vec<Record>) -> Self {
        Table { columns, records }
    }

    /// Header-derived column names, in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// First `n` records (fewer if the table is shorter).
    pub fn head(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }

    /// All values of `name` in row order, or `None` for an unknown column.
    pub fn column(&self, name: &str) -> Option<Vec<&CellValue>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.records.iter().map(|r| &r.values[idx]).collect())
    }

    /// Sorted set of distinct values in `name`.
    pub fn unique_values(&self, name: &str) -> Option<BTreeSet<CellValue>> {
        self.column(name)
            .map(|vals| vals.into_iter().cloned().collect())
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// NodeGraph – the result of loading a network JSON file
// ---------------------------------------------------------------------------

/// Node id → node attributes. Adjacency lives inside the attributes
/// (e.g. a `"friends"` array); there is no separate edge list.
///
/// Node ids keep the order they have in the document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeGraph {
    nodes: Map<String, JsonValue>,
}

impl NodeGraph {
    pub fn from_map(nodes: Map<String, JsonValue>) -> Self {
        NodeGraph { nodes }
    }

    pub fn node(&self, id: &str) -> Option<&JsonValue> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.nodes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// First `n` nodes in document order.
    pub fn head(&self, n: usize) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.nodes().take(n)
    }

    pub fn as_map(&self) -> &Map<String, JsonValue> {
        &self.nodes
    }

    pub fn into_map(self) -> Map<String, JsonValue> {
        self.nodes
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Dataset – whatever a reader returns
// ---------------------------------------------------------------------------

/// Shape of a dataset, and thereby which reader handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Table,
    NodeGraph,
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetKind::Table => write!(f, "table"),
            DatasetKind::NodeGraph => write!(f, "node graph"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    Table(Table),
    NodeGraph(NodeGraph),
}

impl Dataset {
    pub fn kind(&self) -> DatasetKind {
        match self {
            Dataset::Table(_) => DatasetKind::Table,
            Dataset::NodeGraph(_) => DatasetKind::NodeGraph,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Dataset::Table(t) => Some(t),
            Dataset::NodeGraph(_) => None,
        }
    }

    pub fn as_graph(&self) -> Option<&NodeGraph> {
        match self {
            Dataset::NodeGraph(g) => Some(g),
            Dataset::Table(_) => None,
        }
    }

    pub fn into_table(self) -> Option<Table> {
        match self {
            Dataset::Table(t) => Some(t),
            Dataset::NodeGraph(_) => None,
        }
    }

    pub fn into_graph(self) -> Option<NodeGraph> {
        match self {
            Dataset::NodeGraph(g) => Some(g),
            Dataset::Table(_) => None,
        }
    }
}

impl From<Table> for Dataset {
    fn from(t: Table) -> Self {
        Dataset::Table(t)
    }
}

impl From<NodeGraph> for Dataset {
    fn from(g: NodeGraph) -> Self {
        Dataset::NodeGraph(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn table() -> Table {
        let columns: Arc<[String]> = vec!["id".to_string(), "label".to_string()].into();
        let rows = [("1", "phishing"), ("2", "lottery"), ("3", "phishing")];
        let records = rows
            .iter()
            .map(|(id, label)| Record::new(columns.clone(), vec![(*id).into(), (*label).into()]))
            .collect();
        Table::new(columns, records)
    }

    #[test]
    fn record_lookup_by_column() {
        let t = table();
        let first = t.get(0).unwrap();
        assert_eq!(first.get("label"), Some(&CellValue::from("phishing")));
        assert_eq!(first.get("missing"), None);
        assert_eq!(first.keys().collect::<Vec<_>>(), vec!["id", "label"]);
    }

    #[test]
    fn head_is_clamped_to_length() {
        let t = table();
        assert_eq!(t.head(2).len(), 2);
        assert_eq!(t.head(10).len(), 3);
        assert!(t.head(0).is_empty());
    }

    #[test]
    fn unique_values_are_sorted_and_deduplicated() {
        let t = table();
        let labels: Vec<String> = t
            .unique_values("label")
            .unwrap()
            .into_iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(labels, vec!["lottery", "phishing"]);
        assert!(t.unique_values("nope").is_none());
    }

    #[test]
    fn cell_ordering_groups_by_variant() {
        let mut cells = vec![
            CellValue::Text("a".into()),
            CellValue::Float(1.5),
            CellValue::Null,
            CellValue::Integer(3),
            CellValue::Bool(true),
        ];
        cells.sort();
        assert_eq!(
            cells,
            vec![
                CellValue::Null,
                CellValue::Bool(true),
                CellValue::Integer(3),
                CellValue::Float(1.5),
                CellValue::Text("a".into()),
            ]
        );
    }

    #[test]
    fn float_cells_compare_by_bits() {
        let nan = CellValue::Float(f64::NAN);
        assert_eq!(nan, nan.clone());
        assert_ne!(CellValue::Float(0.0), CellValue::Float(-0.0));

        let set: HashSet<CellValue> = [
            CellValue::Float(f64::NAN),
            CellValue::Float(f64::NAN),
            CellValue::Float(0.0),
            CellValue::Float(-0.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn text_and_null_accessors() {
        assert_eq!(CellValue::from("sms").as_str(), Some("sms"));
        assert_eq!(CellValue::Integer(4).as_str(), None);
        assert!(CellValue::Null.is_null());
        assert!(!CellValue::from("").is_null());
    }

    #[test]
    fn graph_keeps_document_order() {
        let value = json!({"81": {"friends": ["12"]}, "12": {}, "45": {}});
        let JsonValue::Object(map) = value else {
            unreachable!()
        };
        let g = NodeGraph::from_map(map);
        assert_eq!(g.node_ids().collect::<Vec<_>>(), vec!["81", "12", "45"]);
        assert_eq!(g.head(1).count(), 1);
        assert!(g.contains("45"));
        assert_eq!(g.node("81"), Some(&json!({"friends": ["12"]})));
    }

    #[test]
    fn dataset_accessors_match_kind() {
        let ds = Dataset::from(table());
        assert_eq!(ds.kind(), DatasetKind::Table);
        assert!(ds.as_graph().is_none());
        assert_eq!(ds.into_table().map(|t| t.len()), Some(3));
    }
}
