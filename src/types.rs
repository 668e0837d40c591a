//! Domain types shared across the detection pipeline: rings, account
//! findings, the run summary, and the graph export payload.

use serde::{Deserialize, Serialize};

/// Fine-grained pattern tags attached to individual accounts.
///
/// Distinct from [`PatternType`], which labels a whole ring. A ring's
/// members can carry different tags within the same ring (a fan-in hub
/// versus its leaves).
pub const TAG_CYCLE_3: &str = "cycle_length_3";
pub const TAG_CYCLE_4: &str = "cycle_length_4";
pub const TAG_CYCLE_5: &str = "cycle_length_5";
pub const TAG_FAN_IN_HUB_TEMPORAL: &str = "fan_in_hub_temporal";
pub const TAG_FAN_IN_HUB: &str = "fan_in_hub";
pub const TAG_FAN_IN_LEAF_TEMPORAL: &str = "fan_in_leaf_temporal";
pub const TAG_FAN_IN_LEAF: &str = "fan_in_leaf";
pub const TAG_FAN_OUT_HUB_TEMPORAL: &str = "fan_out_hub_temporal";
pub const TAG_FAN_OUT_HUB: &str = "fan_out_hub";
pub const TAG_FAN_OUT_LEAF_TEMPORAL: &str = "fan_out_leaf_temporal";
pub const TAG_FAN_OUT_LEAF: &str = "fan_out_leaf";
pub const TAG_SHELL: &str = "layered_shell_network";

/// Base contribution of a fine-grained pattern tag to an account's
/// suspicion score, per the pattern-tag vocabulary table.
pub fn tag_base_score(tag: &str) -> u8 {
    match tag {
        TAG_CYCLE_3 => 95,
        TAG_CYCLE_4 => 90,
        TAG_CYCLE_5 => 85,
        TAG_FAN_IN_HUB_TEMPORAL | TAG_FAN_OUT_HUB_TEMPORAL => 95,
        TAG_FAN_IN_HUB | TAG_FAN_OUT_HUB => 85,
        TAG_FAN_IN_LEAF_TEMPORAL | TAG_FAN_OUT_LEAF_TEMPORAL => 80,
        TAG_FAN_IN_LEAF | TAG_FAN_OUT_LEAF => 70,
        TAG_SHELL => 75,
        _ => 0,
    }
}

/// The pattern type a ring as a whole was detected under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternType {
    CycleLength3,
    CycleLength4,
    CycleLength5,
    SmurfingFanIn,
    SmurfingFanOut,
    LayeredShellNetwork,
}

impl PatternType {
    /// The coarse category used by the account scorer's multi-pattern
    /// bonus: cycles of any length collapse into a single category.
    pub fn category(self) -> PatternCategory {
        match self {
            PatternType::CycleLength3 | PatternType::CycleLength4 | PatternType::CycleLength5 => {
                PatternCategory::Cycle
            }
            PatternType::SmurfingFanIn => PatternCategory::SmurfingFanIn,
            PatternType::SmurfingFanOut => PatternCategory::SmurfingFanOut,
            PatternType::LayeredShellNetwork => PatternCategory::Shell,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PatternType::CycleLength3 => "cycle_length_3",
            PatternType::CycleLength4 => "cycle_length_4",
            PatternType::CycleLength5 => "cycle_length_5",
            PatternType::SmurfingFanIn => "smurfing_fan_in",
            PatternType::SmurfingFanOut => "smurfing_fan_out",
            PatternType::LayeredShellNetwork => "layered_shell_network",
        }
    }
}

/// The four coarse categories counted by the account scorer's
/// multi-pattern bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternCategory {
    Cycle,
    SmurfingFanIn,
    SmurfingFanOut,
    Shell,
}

/// A structurally suspicious account set surviving deduplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ring {
    pub ring_id: String,
    pub pattern_type: PatternType,
    pub members: Vec<String>,
    pub risk_score: u8,
    pub temporal_confirmed: bool,
}

/// A ring before final renumbering, still carrying its discovery index so
/// the deduplicator can break ties by earliest discovery.
#[derive(Debug, Clone)]
pub(crate) struct DraftRing {
    pub discovery_index: usize,
    pub pattern_type: PatternType,
    pub members: Vec<String>,
    pub risk_score: u8,
    pub temporal_confirmed: bool,
    /// Per-member fine-grained tag, e.g. a fan-in hub vs. its leaves.
    pub member_tags: Vec<(String, &'static str)>,
}

/// Per-account aggregated finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountFinding {
    pub account_id: String,
    pub suspicion_score: u8,
    pub detected_patterns: Vec<String>,
    pub ring_id: String,
    pub all_ring_ids: Vec<String>,
}

/// Run-level summary returned alongside findings and rings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub total_accounts_analyzed: usize,
    pub suspicious_accounts_flagged: usize,
    pub fraud_rings_detected: usize,
    pub processing_time_seconds: f64,
    pub shell_detection_skipped: bool,
}

/// A node in the bounded visualisation export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub suspicious: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspicion_score: Option<u8>,
}

/// An edge in the bounded visualisation export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub weight: f64,
    pub count: usize,
}

/// The bounded graph payload handed to the visualisation collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub capped: bool,
    pub cap_limit: usize,
}

/// Top-level response returned by a full pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub suspicious_accounts: Vec<AccountFinding>,
    pub fraud_rings: Vec<Ring>,
    pub summary: Summary,
    pub graph_data: GraphExport,
}
