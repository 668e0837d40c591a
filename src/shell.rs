//! Shell Detector — layered shell chains originating at zero-in-degree
//! accounts, skipped outright on graphs above the account ceiling.

use crate::config::DetectionConfig;
use crate::graph::{Graph, VertexId};
use crate::types::{DraftRing, PatternType, TAG_SHELL};
use std::collections::HashSet;
use std::time::Instant;

const MIN_HOPS: usize = 3;
const MAX_HOPS: usize = 4;

pub struct ShellDetectorResult {
    pub rings: Vec<DraftRing>,
    pub skipped: bool,
}

pub fn detect_shell_chains(graph: &Graph, config: &DetectionConfig, deadline: Instant) -> ShellDetectorResult {
    if graph.vertex_count() > config.shell_max_accounts {
        return ShellDetectorResult {
            rings: Vec::new(),
            skipped: true,
        };
    }

    let origins: Vec<VertexId> = graph
        .vertices()
        .filter(|&v| graph.in_degree(v) == 0 && graph.out_degree(v) > 0)
        .collect();

    let mut rings = Vec::new();

    'origins: for origin in origins {
        if Instant::now() >= deadline {
            break;
        }

        let mut path = vec![origin];
        let mut visited: HashSet<VertexId> = HashSet::new();
        visited.insert(origin);

        walk(graph, config, deadline, &mut path, &mut visited, &mut rings);

        if rings.len() >= config.shell_max_chains {
            break 'origins;
        }
    }

    rings.truncate(config.shell_max_chains);

    ShellDetectorResult {
        rings,
        skipped: false,
    }
}

fn walk(
    graph: &Graph,
    config: &DetectionConfig,
    deadline: Instant,
    path: &mut Vec<VertexId>,
    visited: &mut HashSet<VertexId>,
    rings: &mut Vec<DraftRing>,
) {
    if Instant::now() >= deadline || rings.len() >= config.shell_max_chains {
        return;
    }

    let hops = path.len() - 1;
    if hops == MIN_HOPS || hops == MAX_HOPS {
        rings.push(make_ring(graph, path));
        if rings.len() >= config.shell_max_chains {
            return;
        }
    }
    if hops >= MAX_HOPS {
        return;
    }

    let current = *path.last().unwrap();
    // Only an origin (hops == 0) or a single-predecessor interior vertex
    // may be extended further; a vertex with more than one predecessor
    // breaks the layering and terminates this branch.
    if hops > 0 && graph.in_degree(current) != 1 {
        return;
    }

    let mut next_vertices: Vec<VertexId> = graph.successors(current).collect();
    next_vertices.sort();
    for next in next_vertices {
        if visited.contains(&next) {
            continue;
        }
        visited.insert(next);
        path.push(next);
        walk(graph, config, deadline, path, visited, rings);
        path.pop();
        visited.remove(&next);

        if rings.len() >= config.shell_max_chains {
            return;
        }
    }
}

fn make_ring(graph: &Graph, path: &[VertexId]) -> DraftRing {
    let mut monotonic = true;
    let mut prev_ts = None;
    for window in path.windows(2) {
        let edge = graph
            .edge(window[0], window[1])
            .expect("path edges exist in the graph");
        if let Some(prev) = prev_ts {
            if edge.first_ts < prev {
                monotonic = false;
            }
        }
        prev_ts = Some(edge.first_ts);
    }

    let risk_score = if monotonic { 80 } else { 75 };
    let members: Vec<String> = path.iter().map(|&v| graph.account_id(v).to_string()).collect();
    let member_tags = members.iter().map(|m| (m.clone(), TAG_SHELL)).collect();

    DraftRing {
        discovery_index: 0,
        pattern_type: PatternType::LayeredShellNetwork,
        members,
        risk_score,
        temporal_confirmed: monotonic,
        member_tags,
    }
}
