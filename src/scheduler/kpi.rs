//! Schedule quality metrics (KPIs).
//!
//! Computes production-plan indicators from a completed routing schedule.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Latest end offset (hours) |
//! | Total Work | Sum of scheduled step durations (hours) |
//! | Parallel Efficiency | Total work / makespan (1.0 = fully sequential) |
//! | Department Busy Hours | Sum of step durations per department |
//! | Department Utilization | Busy hours / makespan (may exceed 1.0 when overbooked) |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Department, RoutingSchedule};

/// Routing schedule performance indicators.
///
/// All time values are in hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Makespan: latest completion offset.
    pub makespan_hours: f64,
    /// Sum of scheduled step durations.
    pub total_work_hours: f64,
    /// Work hours per makespan hour. Above 1.0 means steps overlapped.
    pub parallel_efficiency: f64,
    /// Busy hours per department.
    pub busy_hours_by_department: BTreeMap<Department, f64>,
    /// Busy hours / makespan per department.
    pub utilization_by_department: BTreeMap<Department, f64>,
    /// Number of department overbookings.
    pub conflict_count: usize,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule.
    pub fn calculate(schedule: &RoutingSchedule) -> Self {
        let makespan = schedule.makespan_hours();
        let mut total_work = 0.0;
        let mut busy: BTreeMap<Department, f64> = BTreeMap::new();

        for step in &schedule.steps {
            total_work += step.duration_hours;
            *busy.entry(step.assigned_department).or_insert(0.0) += step.duration_hours;
        }

        let (parallel_efficiency, utilization) = if makespan > 0.0 {
            (
                total_work / makespan,
                busy.iter().map(|(&d, &h)| (d, h / makespan)).collect(),
            )
        } else {
            (0.0, BTreeMap::new())
        };

        Self {
            makespan_hours: makespan,
            total_work_hours: total_work,
            parallel_efficiency,
            busy_hours_by_department: busy,
            utilization_by_department: utilization,
            conflict_count: schedule.conflicts.len(),
        }
    }

    /// The most loaded department, if any step was scheduled.
    pub fn busiest_department(&self) -> Option<Department> {
        self.busy_hours_by_department
            .iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(&d, _)| d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResourceConflict, ScheduledStep};
    use chrono::{TimeZone, Utc};

    fn placed(id: &str, dept: Department, start: f64, duration: f64) -> ScheduledStep {
        let origin = Utc.with_ymd_and_hms(2026, 10, 1, 8, 0, 0).unwrap();
        ScheduledStep {
            step_id: id.to_string(),
            step_name: id.to_string(),
            start_time: origin,
            end_time: origin,
            assigned_department: dept,
            parallel_lane: 0,
            start_offset_hours: start,
            duration_hours: duration,
        }
    }

    #[test]
    fn test_kpi_basic() {
        let mut s = RoutingSchedule::new();
        s.add_step(placed("a", Department::Cutting, 0.0, 4.0));
        s.add_step(placed("b", Department::Printing, 0.0, 2.0));
        s.add_step(placed("c", Department::Printing, 4.0, 4.0));

        let kpi = ScheduleKpi::calculate(&s);
        assert!((kpi.makespan_hours - 8.0).abs() < 1e-10);
        assert!((kpi.total_work_hours - 10.0).abs() < 1e-10);
        assert!((kpi.parallel_efficiency - 1.25).abs() < 1e-10);
        assert!((kpi.busy_hours_by_department[&Department::Printing] - 6.0).abs() < 1e-10);
        assert!((kpi.utilization_by_department[&Department::Cutting] - 0.5).abs() < 1e-10);
        assert_eq!(kpi.busiest_department(), Some(Department::Printing));
    }

    #[test]
    fn test_kpi_counts_conflicts() {
        let mut s = RoutingSchedule::new();
        s.add_step(placed("a", Department::Sewing, 0.0, 2.0));
        s.add_step(placed("b", Department::Sewing, 0.0, 2.0));
        s.add_conflict(ResourceConflict {
            department: Department::Sewing,
            first_step: "a".into(),
            second_step: "b".into(),
            overlap_hours: 2.0,
        });

        let kpi = ScheduleKpi::calculate(&s);
        assert_eq!(kpi.conflict_count, 1);
        assert!((kpi.utilization_by_department[&Department::Sewing] - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = ScheduleKpi::calculate(&RoutingSchedule::new());
        assert_eq!(kpi.makespan_hours, 0.0);
        assert_eq!(kpi.parallel_efficiency, 0.0);
        assert!(kpi.utilization_by_department.is_empty());
        assert_eq!(kpi.busiest_department(), None);
    }
}
