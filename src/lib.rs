//! # Muling Ring Detector
//!
//! A structural financial-crime detection engine. Given a batch of
//! directed, timestamped money-transfer records, it builds a transaction
//! graph and surfaces three families of structural fraud pattern
//! indicative of money muling:
//!
//! - short directed cycles (length 3-5),
//! - temporal smurfing clusters (fan-in / fan-out hubs), and
//! - layered shell-account chains.
//!
//! For every flagged account it emits a heuristic 0-100 suspicion score and
//! the ring(s) it belongs to. CSV parsing, the HTTP upload boundary, and
//! the visualisation renderer are external collaborators — this crate only
//! produces the data they consume.
//!
//! ## Pipeline
//!
//! Record Normaliser -> Graph Builder -> Detector Orchestrator (Cycle,
//! Smurfing, Shell, run concurrently) -> Ring Deduplicator -> Account
//! Scorer -> Graph Exporter.

pub mod config;
pub mod cycle;
pub mod dedup;
pub mod error;
pub mod export;
pub mod graph;
pub mod orchestrator;
pub mod record;
pub mod scorer;
pub mod shell;
pub mod smurfing;
pub mod types;

pub use config::DetectionConfig;
pub use error::{DetectionError, Result};
pub use record::RawRecord;
pub use types::{AccountFinding, AnalysisReport, GraphExport, Ring, Summary};

use std::sync::Arc;
use std::time::Instant;
use tracing::info_span;

/// Runs the full detection pipeline over a raw batch of transaction
/// records using default limits and budgets.
pub fn analyze_batch(raw_records: &[RawRecord]) -> Result<AnalysisReport> {
    analyze_batch_with_config(raw_records, &DetectionConfig::default())
}

/// Runs the full detection pipeline with an explicit [`DetectionConfig`].
pub fn analyze_batch_with_config(
    raw_records: &[RawRecord],
    config: &DetectionConfig,
) -> Result<AnalysisReport> {
    let started_at = Instant::now();
    let _span = info_span!("analyze_batch", records = raw_records.len()).entered();

    let normalized = record::normalize_records(raw_records)?;
    let graph = Arc::new(graph::build_graph(&normalized));
    let total_accounts_analyzed = graph.vertex_count();

    let orchestrator_result = orchestrator::run_detectors(Arc::clone(&graph), config);
    let fraud_rings: Vec<Ring> = orchestrator_result
        .rings
        .iter()
        .map(|d| d.ring.clone())
        .collect();

    for ring in &fraud_rings {
        if ring.members.len() < 3 {
            return Err(DetectionError::InvariantViolation(format!(
                "ring {} has fewer than 3 members",
                ring.ring_id
            )));
        }
    }

    let suspicious_accounts = scorer::score_accounts(&orchestrator_result.rings);
    let graph_data = export::export_graph(&graph, &suspicious_accounts, config);

    let summary = Summary {
        total_accounts_analyzed,
        suspicious_accounts_flagged: suspicious_accounts.len(),
        fraud_rings_detected: fraud_rings.len(),
        processing_time_seconds: started_at.elapsed().as_secs_f64(),
        shell_detection_skipped: orchestrator_result.shell_detection_skipped,
    };

    Ok(AnalysisReport {
        suspicious_accounts,
        fraud_rings,
        summary,
        graph_data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, from: &str, to: &str, amount: f64, ts: &str) -> RawRecord {
        RawRecord {
            transaction_id: id.to_string(),
            sender_id: from.to_string(),
            receiver_id: to.to_string(),
            amount,
            timestamp: ts.to_string(),
        }
    }

    #[test]
    fn end_to_end_tight_three_cycle() {
        let raw = vec![
            record("T1", "A", "B", 100.0, "2024-01-01T00:00:00Z"),
            record("T2", "B", "C", 100.0, "2024-01-01T01:00:00Z"),
            record("T3", "C", "A", 100.0, "2024-01-01T02:00:00Z"),
        ];
        let report = analyze_batch(&raw).unwrap();

        assert_eq!(report.fraud_rings.len(), 1);
        assert_eq!(report.fraud_rings[0].risk_score, 95);
        assert_eq!(report.summary.fraud_rings_detected, 1);
        assert_eq!(report.summary.suspicious_accounts_flagged, 3);
        assert!(report
            .suspicious_accounts
            .iter()
            .all(|f| f.suspicion_score == 95));
    }

    #[test]
    fn malformed_batch_is_rejected() {
        let raw = vec![record("T1", "A", "B", 10.0, "garbage-timestamp")];
        let result = analyze_batch(&raw);
        assert!(matches!(result, Err(DetectionError::MalformedInput(_))));
    }

    #[test]
    fn large_graph_skips_shell_detection() {
        let mut raw = Vec::new();
        for i in 0..2500 {
            raw.push(record(
                &format!("T{i}"),
                &format!("A{i}"),
                &format!("B{i}"),
                10.0,
                "2024-01-01T00:00:00Z",
            ));
        }
        let report = analyze_batch(&raw).unwrap();
        assert!(report.summary.shell_detection_skipped);
        assert_eq!(report.summary.suspicious_accounts_flagged, 0);
        assert_eq!(report.summary.fraud_rings_detected, 0);
        assert!(report.graph_data.capped);
        assert_eq!(report.graph_data.nodes.len(), 500);
    }
}
