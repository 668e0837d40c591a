//! Account Scorer — aggregates per-account pattern memberships into a
//! single 0-100 suspicion score with a multi-pattern bonus.

use crate::dedup::DedupedRing;
use crate::types::{tag_base_score, AccountFinding, PatternCategory};
use std::collections::{BTreeMap, HashSet};

struct Contribution {
    ring_id: String,
    tag: &'static str,
    base: u8,
    category: PatternCategory,
}

/// Scores every account that belongs to at least one surviving ring.
///
/// Final list is sorted by `suspicion_score` descending, then `account_id`
/// ascending.
pub fn score_accounts(rings: &[DedupedRing]) -> Vec<AccountFinding> {
    let mut per_account: BTreeMap<String, Vec<Contribution>> = BTreeMap::new();

    for deduped in rings {
        for (member, tag) in &deduped.member_tags {
            per_account
                .entry(member.clone())
                .or_default()
                .push(Contribution {
                    ring_id: deduped.ring.ring_id.clone(),
                    tag,
                    base: tag_base_score(tag),
                    category: deduped.ring.pattern_type.category(),
                });
        }
    }

    let mut findings: Vec<AccountFinding> = per_account
        .into_iter()
        .map(|(account_id, contributions)| build_finding(account_id, contributions))
        .collect();

    findings.sort_by(|a, b| {
        b.suspicion_score
            .cmp(&a.suspicion_score)
            .then_with(|| a.account_id.cmp(&b.account_id))
    });

    findings
}

fn build_finding(account_id: String, contributions: Vec<Contribution>) -> AccountFinding {
    let max_base = contributions.iter().map(|c| c.base).max().unwrap_or(0);

    let categories: HashSet<PatternCategory> = contributions.iter().map(|c| c.category).collect();
    let bonus = (categories.len().saturating_sub(1) as u8 * 5).min(10);
    let suspicion_score = max_base.saturating_add(bonus).min(100);

    let mut seen_tags = HashSet::new();
    let mut tagged: Vec<(&'static str, u8, usize)> = Vec::new();
    for (idx, c) in contributions.iter().enumerate() {
        if seen_tags.insert(c.tag) {
            tagged.push((c.tag, c.base, idx));
        }
    }
    tagged.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.2.cmp(&b.2)));
    let detected_patterns = tagged.into_iter().map(|(tag, _, _)| tag.to_string()).collect();

    let mut primary: Option<&Contribution> = None;
    for c in &contributions {
        if c.base != max_base {
            continue;
        }
        primary = match primary {
            None => Some(c),
            Some(best) if ring_number(&c.ring_id) < ring_number(&best.ring_id) => Some(c),
            Some(best) => Some(best),
        };
    }
    let ring_id = primary.expect("at least one contribution at max_base").ring_id.clone();

    let mut all_ring_ids: Vec<String> = contributions.into_iter().map(|c| c.ring_id).collect();
    all_ring_ids.sort_by_key(|id| ring_number(id));
    all_ring_ids.dedup();

    AccountFinding {
        account_id,
        suspicion_score,
        detected_patterns,
        ring_id,
        all_ring_ids,
    }
}

fn ring_number(ring_id: &str) -> u32 {
    ring_id
        .rsplit('_')
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or(u32::MAX)
}
