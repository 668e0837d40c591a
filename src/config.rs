//! Tunable limits and budgets for the detection pipeline.
//!
//! Centralises every cap and deadline used by the detectors in one place
//! instead of scattering thresholds through the detector modules.

use std::time::Duration;

/// Centralised caps, thresholds, and per-detector deadlines.
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// Maximum start nodes considered by the cycle detector.
    pub cycle_max_start_nodes: usize,
    /// Maximum rings the cycle detector may emit before it stops early.
    pub cycle_max_rings: usize,
    /// Wall-clock budget for the cycle detector.
    pub cycle_deadline: Duration,

    /// Minimum predecessor/successor count to consider a hub candidate.
    pub smurfing_min_fan: usize,
    /// Temporal clustering window for smurfing confirmation.
    pub smurfing_temporal_window: Duration,
    /// Wall-clock budget for the smurfing detector.
    pub smurfing_deadline: Duration,

    /// Above this account count the shell detector is skipped entirely.
    pub shell_max_accounts: usize,
    /// Maximum shell chains emitted before the detector stops early.
    pub shell_max_chains: usize,
    /// Wall-clock budget for the shell detector.
    pub shell_deadline: Duration,

    /// Node cap for the visualisation export payload.
    pub export_node_cap: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            cycle_max_start_nodes: 300,
            cycle_max_rings: 500,
            cycle_deadline: Duration::from_secs(12),

            smurfing_min_fan: 10,
            smurfing_temporal_window: Duration::from_secs(72 * 3600),
            smurfing_deadline: Duration::from_secs(10),

            shell_max_accounts: 2000,
            shell_max_chains: 200,
            shell_deadline: Duration::from_secs(10),

            export_node_cap: 500,
        }
    }
}
