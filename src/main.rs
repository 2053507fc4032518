use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use socialshield::{CatalogConfig, DatasetCatalog, NodeGraph, Record, Table};

/// Node looked up in the `UniNetwork150` walk-through.
const SAMPLE_NODE: &str = "81";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = parse_args()?;
    let catalog = DatasetCatalog::from_config(config);

    if let Some(scams) = catalog.load_scams().context("loading scam records")? {
        show_table(&scams);
    }

    for name in catalog.network_names() {
        let Some(graph) = catalog
            .load_network(name)
            .with_context(|| format!("loading network {name}"))?
        else {
            continue;
        };
        show_graph(name, &graph)?;

        if name == "UniNetwork150" {
            show_node(&graph, SAMPLE_NODE)?;
        }
    }

    Ok(())
}

/// `socialshield [BASE_DIR] [--config FILE]`
fn parse_args() -> Result<CatalogConfig> {
    let mut base_dir: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let file = args.next().context("--config needs a file argument")?;
                config_path = Some(PathBuf::from(file));
            }
            flag if flag.starts_with("--") => bail!("unknown flag: {flag}"),
            dir if base_dir.is_none() => base_dir = Some(PathBuf::from(dir)),
            extra => bail!("unexpected argument: {extra}"),
        }
    }

    let mut config = match &config_path {
        Some(path) => CatalogConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => CatalogConfig::default(),
    };
    if let Some(dir) = base_dir {
        config.base_dir = dir;
    }
    Ok(config)
}

fn format_record(record: &Record) -> String {
    record
        .iter()
        .map(|(col, val)| format!("{col}={val}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn show_table(table: &Table) {
    println!("Scam records: {} rows, columns {:?}", table.len(), table.columns());
    for (i, record) in table.head(5).iter().enumerate() {
        println!("  [{i}] {}", format_record(record));
    }

    if !table.is_empty() {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos() as usize)
            .unwrap_or_default();
        let idx = seed % table.len();
        if let Some(record) = table.get(idx) {
            println!("Random row [{idx}]: {}\n", format_record(record));
        }
    }
}

fn show_graph(name: &str, graph: &NodeGraph) -> Result<()> {
    println!("{name}: {} nodes", graph.len());
    for (id, attrs) in graph.head(5) {
        println!("Node {id}:");
        println!("{}", serde_json::to_string_pretty(attrs)?);
    }
    println!();
    Ok(())
}

fn show_node(graph: &NodeGraph, id: &str) -> Result<()> {
    let Some(attrs) = graph.node(id).and_then(|v| v.as_object()) else {
        return Ok(());
    };
    println!("Node: {id}");
    for (key, value) in attrs {
        println!("{key} :");
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}
