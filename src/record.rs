//! Record Normaliser — validates, parses, and deduplicates raw transaction
//! records before they reach the graph builder.

use crate::error::DetectionError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A raw transaction record as it arrives from the CSV ingestion
/// collaborator, prior to validation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawRecord {
    pub transaction_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub amount: f64,
    pub timestamp: String,
}

/// A validated, parsed record ready for graph construction.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub transaction_id: String,
    pub sender: String,
    pub receiver: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

/// Parses, validates, and deduplicates a batch of raw records.
///
/// Duplicate `transaction_id`s are silently deduplicated (first occurrence
/// wins) rather than failing the batch — see `DESIGN.md` for the rationale.
/// A record with an unparseable timestamp or a missing identifier is
/// malformed input and fails the whole batch. Self-loops and non-positive
/// amounts are *not* filtered here: they still carry two account
/// identifiers that must join the account set, so rejecting them as edges
/// is the graph builder's job (see `graph::build_graph`), which registers
/// both endpoints before deciding whether the record forms an edge.
pub fn normalize_records(raw: &[RawRecord]) -> Result<Vec<NormalizedRecord>, DetectionError> {
    let mut seen_ids = HashSet::with_capacity(raw.len());
    let mut out = Vec::with_capacity(raw.len());

    for rec in raw {
        if rec.transaction_id.trim().is_empty() {
            return Err(DetectionError::MalformedInput(
                "record missing transaction_id".to_string(),
            ));
        }
        if rec.sender_id.trim().is_empty() || rec.receiver_id.trim().is_empty() {
            return Err(DetectionError::MalformedInput(format!(
                "record {} missing sender or receiver",
                rec.transaction_id
            )));
        }

        if !seen_ids.insert(rec.transaction_id.clone()) {
            continue;
        }

        let timestamp = parse_timestamp(&rec.timestamp).ok_or_else(|| {
            DetectionError::MalformedInput(format!(
                "record {} has an unparseable timestamp: {}",
                rec.transaction_id, rec.timestamp
            ))
        })?;

        out.push(NormalizedRecord {
            transaction_id: rec.transaction_id.clone(),
            sender: rec.sender_id.clone(),
            receiver: rec.receiver_id.clone(),
            amount: rec.amount,
            timestamp,
        });
    }

    Ok(out)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    raw.parse::<DateTime<Utc>>().ok()
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
    fn drops_duplicate_transaction_ids() {
        let raw = vec![
            record("T1", "A", "B", 100.0, "2024-01-01T00:00:00Z"),
            record("T1", "A", "B", 100.0, "2024-01-01T00:00:00Z"),
        ];
        let out = normalize_records(&raw).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn passes_self_loops_and_nonpositive_amounts_through_for_the_graph_builder() {
        // Rejecting these as edges happens downstream in `graph::build_graph`,
        // which still needs both identifiers to register a degree-zero
        // account — so the normaliser must not drop them outright.
        let raw = vec![
            record("T1", "A", "A", 100.0, "2024-01-01T00:00:00Z"),
            record("T2", "C", "D", 0.0, "2024-01-01T00:00:00Z"),
            record("T3", "E", "F", -5.0, "2024-01-01T00:00:00Z"),
            record("T4", "A", "B", 50.0, "2024-01-01T00:00:00Z"),
        ];
        let out = normalize_records(&raw).unwrap();
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn rejects_unparseable_timestamp() {
        let raw = vec![record("T1", "A", "B", 10.0, "not-a-date")];
        assert!(normalize_records(&raw).is_err());
    }

    #[test]
    fn rejects_missing_identifiers() {
        let raw = vec![record("T1", "", "B", 10.0, "2024-01-01T00:00:00Z")];
        assert!(normalize_records(&raw).is_err());
    }
}
