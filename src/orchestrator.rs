//! Detector Orchestrator — launches the three detectors concurrently, each
//! under its own time budget, and reconciles their results deterministically.
//!
//! Each detector runs on an independent OS thread against a shared
//! read-only graph; the graph is never mutated after construction, so no
//! locking is required. The handler thread joins all three before
//! reconciling — a detector that hits its deadline or cap returns
//! whatever it has accumulated so far rather than blocking the others.

use crate::config::DetectionConfig;
use crate::cycle::detect_cycles;
use crate::dedup::{deduplicate_rings, DedupedRing};
use crate::graph::Graph;
use crate::shell::detect_shell_chains;
use crate::smurfing::detect_smurfing;
use crate::types::DraftRing;
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{info, warn};

pub struct OrchestratorResult {
    pub rings: Vec<DedupedRing>,
    pub shell_detection_skipped: bool,
}

/// Runs Cycle, Smurfing, and Shell detection concurrently and reconciles
/// the results in the fixed cross-detector order: Cycle, Smurfing-fan-in,
/// Smurfing-fan-out, Shell. This order is what makes `ring_id` assignment
/// deterministic for a given input regardless of which detector thread
/// happens to finish first.
pub fn run_detectors(graph: Arc<Graph>, config: &DetectionConfig) -> OrchestratorResult {
    let cycle_deadline = Instant::now() + config.cycle_deadline;
    let smurfing_deadline = Instant::now() + config.smurfing_deadline;
    let shell_deadline = Instant::now() + config.shell_deadline;

    let cycle_graph = Arc::clone(&graph);
    let cycle_config = config.clone();
    let cycle_handle = thread::spawn(move || detect_cycles(&cycle_graph, &cycle_config, cycle_deadline));

    let smurfing_graph = Arc::clone(&graph);
    let smurfing_config = config.clone();
    let smurfing_handle =
        thread::spawn(move || detect_smurfing(&smurfing_graph, &smurfing_config, smurfing_deadline));

    let shell_graph = Arc::clone(&graph);
    let shell_config = config.clone();
    let shell_handle = thread::spawn(move || detect_shell_chains(&shell_graph, &shell_config, shell_deadline));

    let cycle_result = cycle_handle.join().expect("cycle detector thread panicked");
    let smurfing_result = smurfing_handle.join().expect("smurfing detector thread panicked");
    let shell_result = shell_handle.join().expect("shell detector thread panicked");

    if cycle_result.cap_reached {
        warn!("cycle detector reached its ring cap; results are partial");
    }
    if shell_result.skipped {
        info!(accounts = graph.vertex_count(), "shell detection skipped above account ceiling");
    }

    let mut drafts: Vec<DraftRing> = Vec::new();
    drafts.extend(cycle_result.rings);
    drafts.extend(smurfing_result.fan_in_rings);
    drafts.extend(smurfing_result.fan_out_rings);
    drafts.extend(shell_result.rings);

    let rings = deduplicate_rings(drafts);

    OrchestratorResult {
        rings,
        shell_detection_skipped: shell_result.skipped,
    }
}
