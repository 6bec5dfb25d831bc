//! Schedule (scheduler output) model.
//!
//! A routing schedule is the timed placement of every step of a template,
//! plus the department overbookings detected while placing them.
//!
//! # Time Representation
//! Each scheduled step carries absolute timestamps and its offset (hours)
//! from the schedule start. Offsets are what the scheduler compares;
//! timestamps are for display and persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Department;

/// A step placed on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledStep {
    pub step_id: String,
    pub step_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub assigned_department: Department,
    /// Group index within the wave the step was started in.
    pub parallel_lane: usize,
    /// Start offset from the schedule start (hours).
    pub start_offset_hours: f64,
    /// Scheduled duration (hours).
    pub duration_hours: f64,
}

impl ScheduledStep {
    /// End offset from the schedule start (hours).
    #[inline]
    pub fn end_offset_hours(&self) -> f64 {
        self.start_offset_hours + self.duration_hours
    }

    /// Whether two scheduled windows overlap.
    ///
    /// Windows are half-open: a step ending exactly when another starts
    /// does not overlap it.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_offset_hours < other.end_offset_hours()
            && other.start_offset_hours < self.end_offset_hours()
    }

    /// Overlap length with another step (hours), 0 when disjoint.
    pub fn overlap_hours(&self, other: &Self) -> f64 {
        let start = self.start_offset_hours.max(other.start_offset_hours);
        let end = self.end_offset_hours().min(other.end_offset_hours());
        (end - start).max(0.0)
    }
}

/// Two steps of the same department scheduled over overlapping windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConflict {
    pub department: Department,
    /// Step that was already on the timeline.
    pub first_step: String,
    /// Step whose placement caused the overlap.
    pub second_step: String,
    pub overlap_hours: f64,
}

impl fmt::Display for ResourceConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} department overbooked: '{}' and '{}' overlap by {:.1}h",
            self.department, self.first_step, self.second_step, self.overlap_hours
        )
    }
}

/// Complete output of one scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingSchedule {
    /// Steps in the order they were started.
    pub steps: Vec<ScheduledStep>,
    /// Department overbookings found along the way.
    pub conflicts: Vec<ResourceConflict>,
}

impl RoutingSchedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scheduled step.
    pub fn add_step(&mut self, step: ScheduledStep) {
        self.steps.push(step);
    }

    /// Adds a conflict.
    pub fn add_conflict(&mut self, conflict: ResourceConflict) {
        self.conflicts.push(conflict);
    }

    /// Whether no department was overbooked.
    pub fn is_conflict_free(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Makespan: latest end offset (hours).
    pub fn makespan_hours(&self) -> f64 {
        self.steps
            .iter()
            .map(ScheduledStep::end_offset_hours)
            .fold(0.0, f64::max)
    }

    /// Latest end timestamp, if any step was scheduled.
    pub fn completion_time(&self) -> Option<DateTime<Utc>> {
        self.steps.iter().map(|s| s.end_time).max()
    }

    /// Finds the placement of a step.
    pub fn step(&self, step_id: &str) -> Option<&ScheduledStep> {
        self.steps.iter().find(|s| s.step_id == step_id)
    }

    /// All placements in a department.
    pub fn steps_in_department(&self, department: Department) -> Vec<&ScheduledStep> {
        self.steps
            .iter()
            .filter(|s| s.assigned_department == department)
            .collect()
    }

    /// Departments with at least one conflict, deduplicated, in first-seen order.
    pub fn overbooked_departments(&self) -> Vec<Department> {
        let mut departments = Vec::new();
        for c in &self.conflicts {
            if !departments.contains(&c.department) {
                departments.push(c.department);
            }
        }
        departments
    }

    /// Number of scheduled steps.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}
