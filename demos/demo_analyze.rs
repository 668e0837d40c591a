//! Muling ring detection example
//!
//! This example demonstrates running the full detection pipeline over an
//! in-memory batch: a tight three-cycle layered against a temporal
//! fan-in cluster sharing one account with the cycle.

use muling_ring_detector::{analyze_batch, RawRecord};

fn record(id: &str, from: &str, to: &str, amount: f64, ts: &str) -> RawRecord {
    RawRecord {
        transaction_id: id.to_string(),
        sender_id: from.to_string(),
        receiver_id: to.to_string(),
        amount,
        timestamp: ts.to_string(),
    }
}

fn main() {
    println!("=== Muling Ring Detector ===\n");

    let mut batch = vec![
        // A tight three-cycle: A -> B -> C -> A.
        record("T1", "A", "B", 5000.0, "2024-03-01T08:00:00Z"),
        record("T2", "B", "C", 5000.0, "2024-03-01T09:00:00Z"),
        record("T3", "C", "A", 5000.0, "2024-03-01T10:00:00Z"),
    ];

    // A temporal fan-in cluster converging on account A, inside 24 hours.
    for i in 0..10 {
        batch.push(record(
            &format!("S{i}"),
            &format!("SENDER{i}"),
            "A",
            750.0,
            "2024-03-01T12:00:00Z",
        ));
    }

    let report = analyze_batch(&batch).expect("batch is well-formed");

    println!("1. Fraud rings detected: {}", report.summary.fraud_rings_detected);
    for ring in &report.fraud_rings {
        println!(
            "   {} [{}] risk={} temporal={} members={:?}",
            ring.ring_id,
            ring.pattern_type.as_str(),
            ring.risk_score,
            ring.temporal_confirmed,
            ring.members
        );
    }

    println!("\n2. Suspicious accounts: {}", report.summary.suspicious_accounts_flagged);
    for finding in &report.suspicious_accounts {
        println!(
            "   {} score={} primary_ring={} patterns={:?}",
            finding.account_id, finding.suspicion_score, finding.ring_id, finding.detected_patterns
        );
    }

    println!("\n3. Summary");
    println!("   accounts analyzed: {}", report.summary.total_accounts_analyzed);
    println!(
        "   shell detection skipped: {}",
        report.summary.shell_detection_skipped
    );
    println!(
        "   processing time: {:.4}s",
        report.summary.processing_time_seconds
    );

    println!("\n4. Graph export");
    println!(
        "   nodes={} edges={} capped={}",
        report.graph_data.nodes.len(),
        report.graph_data.edges.len(),
        report.graph_data.capped
    );

    let json = serde_json::to_string_pretty(&report).expect("report serializes");
    println!("\n5. JSON response shape (truncated)\n{}", &json[..json.len().min(400)]);
}
