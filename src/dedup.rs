//! Ring Deduplicator — collapses rings with identical member sets across
//! detectors, preferring the highest-scoring pattern, then renumbers the
//! survivors contiguously in discovery order.

use crate::types::{DraftRing, Ring};
use std::collections::BTreeSet;

/// A surviving ring paired with the per-member fine-grained tags its
/// winning detector assigned — the account scorer needs the tags, but
/// they are not part of the public [`Ring`] shape.
pub struct DedupedRing {
    pub ring: Ring,
    pub member_tags: Vec<(String, &'static str)>,
}

/// Deduplicates and renumbers a list of draft rings already concatenated
/// in fixed cross-detector discovery order (Cycle, Smurfing-fan-in,
/// Smurfing-fan-out, Shell), each tagged with its position in that order.
pub fn deduplicate_rings(mut drafts: Vec<DraftRing>) -> Vec<DedupedRing> {
    for (i, draft) in drafts.iter_mut().enumerate() {
        draft.discovery_index = i;
    }

    let mut survivors: Vec<DraftRing> = Vec::with_capacity(drafts.len());

    'next: for draft in drafts {
        let key: BTreeSet<&str> = draft.members.iter().map(|s| s.as_str()).collect();

        for existing in survivors.iter_mut() {
            let existing_key: BTreeSet<&str> = existing.members.iter().map(|s| s.as_str()).collect();
            if existing_key == key {
                if draft.risk_score > existing.risk_score {
                    let kept_index = existing.discovery_index.min(draft.discovery_index);
                    *existing = draft;
                    existing.discovery_index = kept_index;
                }
                continue 'next;
            }
        }

        survivors.push(draft);
    }

    survivors.sort_by_key(|r| r.discovery_index);

    survivors
        .into_iter()
        .enumerate()
        .map(|(i, draft)| DedupedRing {
            ring: Ring {
                ring_id: format!("RING_{:03}", i + 1),
                pattern_type: draft.pattern_type,
                members: draft.members,
                risk_score: draft.risk_score,
                temporal_confirmed: draft.temporal_confirmed,
            },
            member_tags: draft.member_tags,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PatternType;

    fn draft(members: &[&str], risk_score: u8) -> DraftRing {
        DraftRing {
            discovery_index: 0,
            pattern_type: PatternType::CycleLength3,
            members: members.iter().map(|s| s.to_string()).collect(),
            risk_score,
            temporal_confirmed: false,
            member_tags: members.iter().map(|s| (s.to_string(), "cycle_length_3")).collect(),
        }
    }

    #[test]
    fn collapses_identical_member_sets_keeping_higher_score() {
        let drafts = vec![draft(&["A", "B", "C"], 75), draft(&["C", "B", "A"], 95)];
        let rings = deduplicate_rings(drafts);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].ring.risk_score, 95);
        assert_eq!(rings[0].ring.ring_id, "RING_001");
    }

    #[test]
    fn renumbers_contiguously_after_dedup() {
        let drafts = vec![draft(&["A", "B", "C"], 95), draft(&["A", "B", "C"], 75), draft(&["D", "E", "F"], 90)];
        let rings = deduplicate_rings(drafts);
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0].ring.ring_id, "RING_001");
        assert_eq!(rings[1].ring.ring_id, "RING_002");
    }

    #[test]
    fn keeps_first_discovery_index_when_the_later_draft_wins_on_score() {
        // "A, B, C" is discovered first (low score), "D, E, F" discovered
        // next, then a higher-scoring "A, B, C" collides with the first
        // ring. The merged ring must keep the *first* discovery position
        // (ahead of "D, E, F"), not the later winning draft's position —
        // otherwise RING_001/RING_002 would swap.
        let drafts = vec![
            draft(&["A", "B", "C"], 75),
            draft(&["D", "E", "F"], 90),
            draft(&["A", "B", "C"], 95),
        ];
        let rings = deduplicate_rings(drafts);
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0].ring.members, vec!["A", "B", "C"]);
        assert_eq!(rings[0].ring.risk_score, 95);
        assert_eq!(rings[0].ring.ring_id, "RING_001");
        assert_eq!(rings[1].ring.members, vec!["D", "E", "F"]);
        assert_eq!(rings[1].ring.ring_id, "RING_002");
    }
}
