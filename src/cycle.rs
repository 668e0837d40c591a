//! Cycle Detector — enumerates simple directed cycles of length 3 to 5.
//!
//! Uses the canonical-start rule rather than full Johnson's algorithm: a
//! cycle is only recorded when its start vertex is the minimum of the
//! cycle's vertex set under the graph's fixed identifier order, which
//! eliminates the k rotations of the same directed cycle without a
//! post-hoc deduplication pass.

use crate::config::DetectionConfig;
use crate::graph::{Graph, VertexId};
use crate::types::{DraftRing, PatternType, TAG_CYCLE_3, TAG_CYCLE_4, TAG_CYCLE_5};
use std::time::Instant;

const MIN_CYCLE_LEN: usize = 3;
const MAX_CYCLE_LEN: usize = 5;

/// Result of a cycle detector run: the rings found plus whether the
/// detector exited early due to its ring cap.
pub struct CycleDetectorResult {
    pub rings: Vec<DraftRing>,
    pub cap_reached: bool,
}

pub fn detect_cycles(graph: &Graph, config: &DetectionConfig, deadline: Instant) -> CycleDetectorResult {
    let start_nodes = select_start_nodes(graph, config.cycle_max_start_nodes);

    let mut rings = Vec::new();
    let mut cap_reached = false;

    'start: for &start in &start_nodes {
        if Instant::now() >= deadline {
            break;
        }

        let mut path = vec![start];
        let mut on_path = vec![false; graph.vertex_count()];
        on_path[start as usize] = true;

        let mut stack: Vec<DfsFrame> = vec![DfsFrame::new(graph, start)];

        while let Some(frame) = stack.last_mut() {
            if Instant::now() >= deadline {
                break 'start;
            }

            match frame.next_neighbor() {
                Some(next) => {
                    if next == start {
                        if path.len() >= MIN_CYCLE_LEN {
                            rings.push(make_ring(graph, &path));
                            if rings.len() >= config.cycle_max_rings {
                                cap_reached = true;
                                break 'start;
                            }
                        }
                        continue;
                    }

                    if next <= start || on_path[next as usize] {
                        continue;
                    }

                    if path.len() + 1 > MAX_CYCLE_LEN {
                        continue;
                    }

                    path.push(next);
                    on_path[next as usize] = true;
                    stack.push(DfsFrame::new(graph, next));
                }
                None => {
                    let closed = path.pop().expect("path non-empty while a frame remains");
                    on_path[closed as usize] = false;
                    stack.pop();
                }
            }
        }
    }

    CycleDetectorResult { rings, cap_reached }
}

struct DfsFrame {
    neighbors: Vec<VertexId>,
    cursor: usize,
}

impl DfsFrame {
    fn new(graph: &Graph, v: VertexId) -> Self {
        Self {
            neighbors: graph.successors(v).collect(),
            cursor: 0,
        }
    }

    fn next_neighbor(&mut self) -> Option<VertexId> {
        let n = self.neighbors.get(self.cursor).copied();
        self.cursor += 1;
        n
    }
}

/// Start nodes ordered by total degree descending, ties broken by
/// identifier order (i.e. ascending vertex index), capped to `max`.
fn select_start_nodes(graph: &Graph, max: usize) -> Vec<VertexId> {
    let mut candidates: Vec<VertexId> = graph.vertices().collect();
    candidates.sort_by(|&a, &b| {
        let deg_a = graph.out_degree(a) + graph.in_degree(a);
        let deg_b = graph.out_degree(b) + graph.in_degree(b);
        deg_b.cmp(&deg_a).then(a.cmp(&b))
    });
    candidates.truncate(max);
    candidates
}

fn make_ring(graph: &Graph, path: &[VertexId]) -> DraftRing {
    let pattern_type = match path.len() {
        3 => PatternType::CycleLength3,
        4 => PatternType::CycleLength4,
        5 => PatternType::CycleLength5,
        other => unreachable!("cycle length {other} outside 3..=5"),
    };
    let tag = match pattern_type {
        PatternType::CycleLength3 => TAG_CYCLE_3,
        PatternType::CycleLength4 => TAG_CYCLE_4,
        PatternType::CycleLength5 => TAG_CYCLE_5,
        _ => unreachable!(),
    };
    let risk_score = match pattern_type {
        PatternType::CycleLength3 => 95,
        PatternType::CycleLength4 => 92,
        PatternType::CycleLength5 => 90,
        _ => unreachable!(),
    };

    let members: Vec<String> = path.iter().map(|&v| graph.account_id(v).to_string()).collect();
    let member_tags = members.iter().map(|m| (m.clone(), tag)).collect();

    DraftRing {
        discovery_index: 0,
        pattern_type,
        members,
        risk_score,
        temporal_confirmed: false,
        member_tags,
    }
}
