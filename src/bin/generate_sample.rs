use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{json, Map, Value as JsonValue};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `0..n`.
    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n.max(1)
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }
}

const SCAM_TYPES: &[&str] = &["phishing", "lottery", "romance", "tech_support", "investment"];
const CHANNELS: &[&str] = &["email", "sms", "phone", "social_media"];
const FIRST_NAMES: &[&str] = &["Ana", "Ben", "Chen", "Dara", "Eli", "Fatima", "Gus", "Hana"];

fn write_scams(dir: &Path, rng: &mut SimpleRng, rows: usize) -> Result<()> {
    let path = dir.join("scams.csv");
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["id", "type", "channel", "target_age", "loss_usd", "reported"])?;

    for id in 0..rows {
        let loss = (rng.next_f64() * 5000.0 * 100.0).round() / 100.0;
        writer.write_record([
            id.to_string(),
            rng.pick(SCAM_TYPES).to_string(),
            rng.pick(CHANNELS).to_string(),
            (18 + rng.below(70)).to_string(),
            format!("{loss:.2}"),
            (rng.next_f64() < 0.3).to_string(),
        ])?;
    }
    writer.flush()?;
    println!("Wrote {rows} scam records to {}", path.display());
    Ok(())
}

fn node_attrs(rng: &mut SimpleRng, links_key: &str, links: &BTreeSet<usize>) -> JsonValue {
    let mut attrs = json!({
        "name": rng.pick(FIRST_NAMES),
        "age": 18 + rng.below(70),
        "scam_exposure": {
            "contacted": rng.below(10),
            "victim": rng.next_f64() < 0.15,
        },
    });
    attrs[links_key] = links.iter().map(|n| n.to_string()).collect::<Vec<_>>().into();
    attrs
}

/// Undirected: every friendship is listed on both endpoints.
fn bidirectional_network(
    rng: &mut SimpleRng,
    nodes: usize,
    edges: usize,
) -> Map<String, JsonValue> {
    let mut adjacency = vec![BTreeSet::new(); nodes];
    for _ in 0..edges {
        let (a, b) = (rng.below(nodes), rng.below(nodes));
        if a != b {
            adjacency[a].insert(b);
            adjacency[b].insert(a);
        }
    }
    adjacency
        .iter()
        .enumerate()
        .map(|(id, friends)| (id.to_string(), node_attrs(rng, "friends", friends)))
        .collect()
}

/// Directed: `follows` lists outgoing edges only.
fn unidirectional_network(
    rng: &mut SimpleRng,
    nodes: usize,
    edges: usize,
) -> Map<String, JsonValue> {
    let mut adjacency = vec![BTreeSet::new(); nodes];
    for _ in 0..edges {
        let (a, b) = (rng.below(nodes), rng.below(nodes));
        if a != b {
            adjacency[a].insert(b);
        }
    }
    adjacency
        .iter()
        .enumerate()
        .map(|(id, follows)| (id.to_string(), node_attrs(rng, "follows", follows)))
        .collect()
}

fn write_json(path: &Path, nodes: Map<String, JsonValue>) -> Result<()> {
    let count = nodes.len();
    let text = serde_json::to_string_pretty(&JsonValue::Object(nodes))?;
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote {count} nodes to {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("socialshield/datasets"));
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = SimpleRng::new(42);

    write_scams(&dir, &mut rng, 200)?;
    let bi = bidirectional_network(&mut rng, 50, 120);
    write_json(&dir.join("BiNetwork50.json"), bi)?;
    let uni = unidirectional_network(&mut rng, 150, 450);
    write_json(&dir.join("UniNetwork150.json"), uni)?;
    Ok(())
}
