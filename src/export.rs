//! Graph Exporter — produces a visualisation payload capped at 500 nodes,
//! prioritising suspicious accounts.

use crate::config::DetectionConfig;
use crate::graph::Graph;
use crate::types::{AccountFinding, GraphEdge, GraphExport, GraphNode};
use rand::seq::SliceRandom;
use std::collections::{HashMap, HashSet};

pub fn export_graph(graph: &Graph, findings: &[AccountFinding], config: &DetectionConfig) -> GraphExport {
    let suspicious_scores: HashMap<&str, u8> = findings.iter().map(|f| (f.account_id.as_str(), f.suspicion_score)).collect();

    let all_vertices: Vec<_> = graph.vertices().collect();

    let selected: HashSet<u32> = if all_vertices.len() <= config.export_node_cap {
        all_vertices.into_iter().collect()
    } else {
        let mut selected: HashSet<u32> = all_vertices
            .iter()
            .copied()
            .filter(|&v| suspicious_scores.contains_key(graph.account_id(v)))
            .collect();

        let mut clean: Vec<u32> = all_vertices
            .into_iter()
            .filter(|v| !selected.contains(v))
            .collect();
        clean.shuffle(&mut rand::thread_rng());

        let remaining = config.export_node_cap.saturating_sub(selected.len());
        selected.extend(clean.into_iter().take(remaining));
        selected
    };

    let capped = graph.vertex_count() > config.export_node_cap;

    let mut nodes: Vec<GraphNode> = selected
        .iter()
        .map(|&v| {
            let id = graph.account_id(v).to_string();
            let suspicion_score = suspicious_scores.get(id.as_str()).copied();
            GraphNode {
                suspicious: suspicion_score.is_some(),
                suspicion_score,
                id,
            }
        })
        .collect();
    nodes.sort_by(|a, b| a.id.cmp(&b.id));

    let mut edges = Vec::new();
    for &from in &selected {
        for to in graph.successors(from) {
            if !selected.contains(&to) {
                continue;
            }
            let edge = graph.edge(from, to).expect("adjacency agrees with edge table");
            edges.push(GraphEdge {
                source: graph.account_id(from).to_string(),
                target: graph.account_id(to).to_string(),
                weight: edge.weight,
                count: edge.count,
            });
        }
    }
    edges.sort_by(|a, b| a.source.cmp(&b.source).then_with(|| a.target.cmp(&b.target)));

    GraphExport {
        nodes,
        edges,
        capped,
        cap_limit: config.export_node_cap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use crate::record::NormalizedRecord;
    use chrono::Utc;

    fn rec(id: &str, from: &str, to: &str) -> NormalizedRecord {
        NormalizedRecord {
            transaction_id: id.to_string(),
            sender: from.to_string(),
            receiver: to.to_string(),
            amount: 10.0,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn exports_full_graph_under_cap() {
        let records = vec![rec("T1", "A", "B")];
        let graph = build_graph(&records);
        let config = DetectionConfig::default();
        let export = export_graph(&graph, &[], &config);
        assert!(!export.capped);
        assert_eq!(export.nodes.len(), 2);
        assert_eq!(export.edges.len(), 1);
    }

    #[test]
    fn caps_large_graph_and_keeps_all_suspicious_accounts() {
        let mut records = Vec::new();
        for i in 0..3000 {
            records.push(rec(&format!("T{i}"), &format!("A{i}"), &format!("B{i}")));
        }
        let graph = build_graph(&records);
        let findings = vec![AccountFinding {
            account_id: "A0".to_string(),
            suspicion_score: 90,
            detected_patterns: vec![],
            ring_id: "RING_001".to_string(),
            all_ring_ids: vec!["RING_001".to_string()],
        }];
        let config = DetectionConfig::default();
        let export = export_graph(&graph, &findings, &config);
        assert!(export.capped);
        assert_eq!(export.nodes.len(), config.export_node_cap);
        assert!(export.nodes.iter().any(|n| n.id == "A0" && n.suspicious));
    }
}
