//! Graph Builder — folds normalised records into a directed, weighted graph.
//!
//! Accounts are mapped to compact integer vertex indices assigned in sorted
//! identifier order, replacing an external graph-library dependency with an
//! explicit adjacency structure: this keeps `VertexId` ordering identical to
//! the fixed total order the cycle detector's canonical-start rule and the
//! deterministic start-node enumeration both rely on.

use crate::record::NormalizedRecord;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub type VertexId = u32;

/// Aggregated attributes of a directed edge A -> B.
#[derive(Debug, Clone)]
pub struct Edge {
    pub weight: f64,
    pub count: usize,
    pub first_ts: DateTime<Utc>,
    pub last_ts: DateTime<Utc>,
    pub txn_ids: BTreeSet<String>,
}

impl Edge {
    fn from_first(record: &NormalizedRecord) -> Self {
        let mut txn_ids = BTreeSet::new();
        txn_ids.insert(record.transaction_id.clone());
        Self {
            weight: record.amount,
            count: 1,
            first_ts: record.timestamp,
            last_ts: record.timestamp,
            txn_ids,
        }
    }

    fn fold(&mut self, record: &NormalizedRecord) {
        if self.txn_ids.insert(record.transaction_id.clone()) {
            self.weight += record.amount;
            self.count += 1;
            self.first_ts = self.first_ts.min(record.timestamp);
            self.last_ts = self.last_ts.max(record.timestamp);
        }
    }
}

/// A directed, weighted multigraph collapsed to at most one edge per
/// ordered account pair. Read-only once built: every detector holds a
/// shared reference and no synchronization is needed.
#[derive(Debug, Clone)]
pub struct Graph {
    account_ids: Vec<String>,
    index_of: HashMap<String, VertexId>,
    /// Outgoing edges keyed by target vertex, in target-index order —
    /// iteration order is therefore deterministic.
    out_adj: Vec<BTreeMap<VertexId, Edge>>,
    /// Predecessor vertex indices, in index order.
    in_adj: Vec<BTreeSet<VertexId>>,
}

impl Graph {
    pub fn vertex_count(&self) -> usize {
        self.account_ids.len()
    }

    pub fn account_id(&self, v: VertexId) -> &str {
        &self.account_ids[v as usize]
    }

    pub fn vertex_of(&self, account_id: &str) -> Option<VertexId> {
        self.index_of.get(account_id).copied()
    }

    /// Vertices in ascending identifier order — the fixed total order used
    /// by the cycle detector's canonical-start rule.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> {
        0..self.account_ids.len() as VertexId
    }

    pub fn out_degree(&self, v: VertexId) -> usize {
        self.out_adj[v as usize].len()
    }

    pub fn in_degree(&self, v: VertexId) -> usize {
        self.in_adj[v as usize].len()
    }

    pub fn successors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.out_adj[v as usize].keys().copied()
    }

    pub fn predecessors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.in_adj[v as usize].iter().copied()
    }

    pub fn edge(&self, from: VertexId, to: VertexId) -> Option<&Edge> {
        self.out_adj[from as usize].get(&to)
    }
}

/// Builds a [`Graph`] from a normalised record stream.
///
/// Both endpoints of every record join the account set before self-loops,
/// NaN amounts, and non-positive amounts are rejected as edges, so an
/// account whose only appearance in the batch is such a record still shows
/// up with degree zero rather than vanishing from the account set.
///
/// Deterministic: equal input multisets produce equal graphs regardless of
/// record order, since aggregate fields are order-independent and
/// `first_ts`/`last_ts` are folded via min/max.
pub fn build_graph(records: &[NormalizedRecord]) -> Graph {
    let mut accounts: BTreeSet<String> = BTreeSet::new();
    let mut accum: BTreeMap<(String, String), Vec<&NormalizedRecord>> = BTreeMap::new();

    for record in records {
        // Endpoints join the account set regardless of whether this record
        // goes on to form an edge, so a degree-zero account is reachable
        // through a record rejected below.
        accounts.insert(record.sender.clone());
        accounts.insert(record.receiver.clone());

        if record.sender == record.receiver || record.amount.is_nan() || record.amount <= 0.0 {
            continue;
        }
        accum
            .entry((record.sender.clone(), record.receiver.clone()))
            .or_default()
            .push(record);
    }

    let account_ids: Vec<String> = accounts.into_iter().collect();
    let index_of: HashMap<String, VertexId> = account_ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.clone(), i as VertexId))
        .collect();

    let n = account_ids.len();
    let mut out_adj: Vec<BTreeMap<VertexId, Edge>> = vec![BTreeMap::new(); n];
    let mut in_adj: Vec<BTreeSet<VertexId>> = vec![BTreeSet::new(); n];

    for ((sender, receiver), recs) in accum {
        let from = index_of[&sender];
        let to = index_of[&receiver];
        let mut iter = recs.into_iter();
        let mut edge = Edge::from_first(iter.next().expect("non-empty group"));
        for rec in iter {
            edge.fold(rec);
        }
        out_adj[from as usize].insert(to, edge);
        in_adj[to as usize].insert(from);
    }

    Graph {
        account_ids,
        index_of,
        out_adj,
        in_adj,
    }
}
