use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::store::GraphStore;

const DEFAULT_SAMPLE: &str = include_str!("../../assets/sample_graph.json");

#[derive(Clone, Debug, Deserialize)]
pub struct SampleNode {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub connections: Vec<String>,
}

pub fn parse_sample(raw: &str) -> Result<Vec<SampleNode>> {
    serde_json::from_str(raw).context("sample graph is not a JSON array of node records")
}

pub fn default_sample() -> Result<Vec<SampleNode>> {
    parse_sample(DEFAULT_SAMPLE).context("embedded sample graph is invalid")
}

pub fn read_sample(path: &Path) -> Result<Vec<SampleNode>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read sample graph {}", path.display()))?;
    parse_sample(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

/// Seeds every node first, then every connection.
pub fn seed_store(store: &mut GraphStore, records: &[SampleNode]) {
    for record in records {
        if let Err(error) = store.add_node(
            record.id.as_str(),
            record.label.as_str(),
            None,
            record.url.clone(),
        ) {
            tracing::warn!(%error, "skipping sample node");
        }
    }

    let pairs = records
        .iter()
        .flat_map(|record| {
            record
                .connections
                .iter()
                .map(move |target| (record.id.as_str(), target.as_str()))
        })
        .collect::<Vec<_>>();
    let added = store.add_edges(pairs.iter().copied());
    if added < pairs.len() {
        tracing::debug!(
            skipped = pairs.len() - added,
            "ignored unknown or repeated sample connections"
        );
    }

    tracing::info!(
        nodes = store.len(),
        edges = store.edges().len(),
        "seeded sample graph"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sample_parses_and_seeds() {
        let records = default_sample().expect("embedded sample is valid");
        let mut store = GraphStore::with_seed(3);
        seed_store(&mut store, &records);

        assert_eq!(store.len(), records.len());
        assert!(!store.edges().is_empty());
    }

    #[test]
    fn test_seed_skips_unknown_and_repeated_connections() {
        let records = parse_sample(
            r#"[
                {"id": "a", "label": "A", "url": "https://example.org/a", "connections": ["b", "ghost"]},
                {"id": "b", "label": "B", "connections": ["a"]},
                {"id": "c", "label": "C"}
            ]"#,
        )
        .expect("valid json");
        let mut store = GraphStore::with_seed(3);
        seed_store(&mut store, &records);

        assert_eq!(store.len(), 3);
        assert_eq!(store.edges().len(), 1);
        assert!(store.has_edge("b", "a"));
        assert_eq!(
            store.node("a").and_then(|node| node.url.as_deref()),
            Some("https://example.org/a")
        );
        assert_eq!(store.node("c").map(|node| node.connectivity), Some(0.0));
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(parse_sample(r#"{"id": "a"}"#).is_err());
    }
}
