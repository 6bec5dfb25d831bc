//! Estimation and planning results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ResourceConflict, ScheduledStep};
use crate::scheduler::ScheduleKpi;

/// Feasibility verdict for a template against an order.
///
/// Infeasibility is data, not an error: `feasible = false` comes with a
/// shortfall entry in `risks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalPathResult {
    /// Work hours including the safety buffer.
    pub total_estimated_hours: f64,
    pub estimated_delivery_date: DateTime<Utc>,
    /// Names of steps running well over their nominal duration.
    pub bottleneck_steps: Vec<String>,
    /// Safety margin included in `total_estimated_hours`.
    pub buffer_hours: f64,
    /// Whether the estimated delivery meets the target date.
    pub feasible: bool,
    pub risks: Vec<String>,
}

/// Full production plan: the quick verdict plus the timed parallel schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedCriticalPathResult {
    #[serde(flatten)]
    pub summary: CriticalPathResult,
    pub parallel_schedule: Vec<ScheduledStep>,
    pub resource_conflicts: Vec<ResourceConflict>,
    pub optimization_suggestions: Vec<String>,
    /// Step IDs of the longest dependency chain, entry to exit.
    pub critical_path_steps: Vec<String>,
    pub kpi: ScheduleKpi,
}

impl AdvancedCriticalPathResult {
    /// Conflict descriptions, one line per overbooked pair.
    pub fn conflict_messages(&self) -> Vec<String> {
        self.resource_conflicts.iter().map(ToString::to_string).collect()
    }
}
