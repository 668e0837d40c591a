//! Smurfing Detector — fan-in and fan-out hub structures, confirmed by
//! temporal clustering within a 72-hour window.

use crate::config::DetectionConfig;
use crate::graph::{Graph, VertexId};
use crate::types::{
    DraftRing, PatternType, TAG_FAN_IN_HUB, TAG_FAN_IN_HUB_TEMPORAL, TAG_FAN_IN_LEAF,
    TAG_FAN_IN_LEAF_TEMPORAL, TAG_FAN_OUT_HUB, TAG_FAN_OUT_HUB_TEMPORAL, TAG_FAN_OUT_LEAF,
    TAG_FAN_OUT_LEAF_TEMPORAL,
};
use std::time::Instant;

pub struct SmurfingDetectorResult {
    pub fan_in_rings: Vec<DraftRing>,
    pub fan_out_rings: Vec<DraftRing>,
}

pub fn detect_smurfing(graph: &Graph, config: &DetectionConfig, deadline: Instant) -> SmurfingDetectorResult {
    let fan_in_rings = scan_hubs(graph, config, deadline, Direction::FanIn);
    let fan_out_rings = scan_hubs(graph, config, deadline, Direction::FanOut);
    SmurfingDetectorResult {
        fan_in_rings,
        fan_out_rings,
    }
}

#[derive(Clone, Copy)]
enum Direction {
    FanIn,
    FanOut,
}

fn scan_hubs(
    graph: &Graph,
    config: &DetectionConfig,
    deadline: Instant,
    direction: Direction,
) -> Vec<DraftRing> {
    let mut rings = Vec::new();

    for hub in graph.vertices() {
        if Instant::now() >= deadline {
            break;
        }

        let peers: Vec<VertexId> = match direction {
            Direction::FanIn => graph.predecessors(hub).collect(),
            Direction::FanOut => graph.successors(hub).collect(),
        };

        if peers.len() < config.smurfing_min_fan {
            continue;
        }

        let mut first_ts = None;
        let mut last_ts = None;
        for &peer in &peers {
            let edge = match direction {
                Direction::FanIn => graph.edge(peer, hub),
                Direction::FanOut => graph.edge(hub, peer),
            }
            .expect("adjacency and edge table agree");
            first_ts = Some(first_ts.map_or(edge.first_ts, |t: chrono::DateTime<chrono::Utc>| t.min(edge.first_ts)));
            last_ts = Some(last_ts.map_or(edge.last_ts, |t: chrono::DateTime<chrono::Utc>| t.max(edge.last_ts)));
        }
        let span = last_ts.unwrap() - first_ts.unwrap();
        let temporal_confirmed = span.to_std().unwrap_or(std::time::Duration::MAX) <= config.smurfing_temporal_window;

        let (pattern_type, hub_tag, leaf_tag, risk_score) = match (direction, temporal_confirmed) {
            (Direction::FanIn, true) => (PatternType::SmurfingFanIn, TAG_FAN_IN_HUB_TEMPORAL, TAG_FAN_IN_LEAF_TEMPORAL, 90),
            (Direction::FanIn, false) => (PatternType::SmurfingFanIn, TAG_FAN_IN_HUB, TAG_FAN_IN_LEAF, 85),
            (Direction::FanOut, true) => (PatternType::SmurfingFanOut, TAG_FAN_OUT_HUB_TEMPORAL, TAG_FAN_OUT_LEAF_TEMPORAL, 90),
            (Direction::FanOut, false) => (PatternType::SmurfingFanOut, TAG_FAN_OUT_HUB, TAG_FAN_OUT_LEAF, 85),
        };

        let hub_id = graph.account_id(hub).to_string();
        let mut members = vec![hub_id.clone()];
        let mut member_tags = vec![(hub_id, hub_tag)];
        let mut peer_ids: Vec<String> = peers.iter().map(|&p| graph.account_id(p).to_string()).collect();
        peer_ids.sort();
        for peer_id in peer_ids {
            member_tags.push((peer_id.clone(), leaf_tag));
            members.push(peer_id);
        }

        rings.push(DraftRing {
            discovery_index: 0,
            pattern_type,
            members,
            risk_score,
            temporal_confirmed,
            member_tags,
        });
    }

    rings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use crate::record::NormalizedRecord;
    use chrono::{Duration, TimeZone, Utc};

    fn fan_in_records(span_hours: i64) -> Vec<NormalizedRecord> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..10)
            .map(|i| NormalizedRecord {
                transaction_id: format!("T{i}"),
                sender: format!("S{i}"),
                receiver: "H".to_string(),
                amount: 500.0,
                timestamp: base + Duration::hours(i * span_hours / 10),
            })
            .collect()
    }

    #[test]
    fn detects_temporal_fan_in() {
        let graph = build_graph(&fan_in_records(24));
        let config = DetectionConfig::default();
        let result = detect_smurfing(&graph, &config, Instant::now() + std::time::Duration::from_secs(5));
        assert_eq!(result.fan_in_rings.len(), 1);
        let ring = &result.fan_in_rings[0];
        assert!(ring.temporal_confirmed);
        assert_eq!(ring.risk_score, 90);
        assert_eq!(ring.members.len(), 11);
    }

    #[test]
    fn detects_nontemporal_fan_in_over_30_days() {
        let graph = build_graph(&fan_in_records(24 * 30));
        let config = DetectionConfig::default();
        let result = detect_smurfing(&graph, &config, Instant::now() + std::time::Duration::from_secs(5));
        assert_eq!(result.fan_in_rings.len(), 1);
        assert!(!result.fan_in_rings[0].temporal_confirmed);
        assert_eq!(result.fan_in_rings[0].risk_score, 85);
    }

    #[test]
    fn ignores_fan_below_threshold() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let records: Vec<NormalizedRecord> = (0..5)
            .map(|i| NormalizedRecord {
                transaction_id: format!("T{i}"),
                sender: format!("S{i}"),
                receiver: "H".to_string(),
                amount: 500.0,
                timestamp: base,
            })
            .collect();
        let graph = build_graph(&records);
        let config = DetectionConfig::default();
        let result = detect_smurfing(&graph, &config, Instant::now() + std::time::Duration::from_secs(5));
        assert!(result.fan_in_rings.is_empty());
    }
}
