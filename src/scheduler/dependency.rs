//! Dependency-driven parallel list scheduler.
//!
//! # Algorithm
//!
//! Event-driven greedy list scheduling over the step DAG:
//!
//! 1. Build forward adjacency (step → dependents) and an unmet-dependency
//!    count per step.
//! 2. At the current time, collect the ready steps: not started, and their
//!    dependencies satisfied per their join type (AND: all completed;
//!    OR: at least one completed).
//! 3. Partition the ready steps into lanes: parallel-eligible steps of
//!    different departments share a lane, every other step gets its own.
//! 4. Start every ready step now with
//!    `duration = max(nominal_hours, quantity / capacity_per_hour)`, and
//!    record a conflict for each already-placed step of the same department
//!    whose window overlaps.
//! 5. Advance the clock to the earliest end among running steps and
//!    complete everything ending by then.
//!
//! If nothing is ready and nothing is running while steps remain, the
//! graph cannot progress (a cycle or an unresolved dependency) and the run
//! is aborted rather than returning a partial schedule.
//!
//! Departments have no concurrency limit here: overbooking is reported
//! after the fact, not prevented.
//!
//! # Complexity
//! O(n² + n·e) for n steps and e dependency edges; templates hold tens of steps.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::{RoutingError, RoutingResult};
use crate::models::{
    JoinType, ResourceConflict, RoutingSchedule, RoutingStep, RoutingTemplate, ScheduledStep,
};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum StepState {
    Pending,
    Running { end_hours: f64 },
    Completed,
}

/// Parallel scheduler honoring step dependencies and join types.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use u_routing::models::{Department, PrintMethod, RoutingStep, RoutingTemplate};
/// use u_routing::scheduler::DependencyScheduler;
///
/// let template = RoutingTemplate::new("t", "Tees", PrintMethod::Dtg)
///     .with_step(RoutingStep::new("print", "Print", Department::Printing)
///         .with_nominal_hours(2.0)
///         .with_capacity(10.0))
///     .with_step(RoutingStep::new("pack", "Pack", Department::Packaging)
///         .with_nominal_hours(1.0)
///         .with_capacity(100.0)
///         .with_dependency("print"));
///
/// let start = Utc.with_ymd_and_hms(2026, 10, 1, 8, 0, 0).unwrap();
/// let schedule = DependencyScheduler::new().schedule(&template, 50, start).unwrap();
/// assert_eq!(schedule.step_count(), 2);
/// assert_eq!(schedule.makespan_hours(), 6.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DependencyScheduler;

impl DependencyScheduler {
    /// Creates a scheduler.
    pub fn new() -> Self {
        Self
    }

    /// Schedules every step of `template` for `quantity` units from `start`.
    ///
    /// # Errors
    /// - [`RoutingError::InvalidQuantity`] if `quantity` is zero.
    /// - [`RoutingError::SchedulingConflict`] if the dependency graph
    ///   cannot make progress.
    /// - [`RoutingError::HorizonExceeded`] if a step would end beyond the
    ///   representable calendar.
    pub fn schedule(
        &self,
        template: &RoutingTemplate,
        quantity: u32,
        start: DateTime<Utc>,
    ) -> RoutingResult<RoutingSchedule> {
        if quantity == 0 {
            return Err(RoutingError::InvalidQuantity);
        }

        let steps = &template.steps;
        let n = steps.len();

        let mut index: HashMap<&str, usize> = HashMap::with_capacity(n);
        for (i, step) in steps.iter().enumerate() {
            index.entry(step.id.as_str()).or_insert(i);
        }

        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (j, step) in steps.iter().enumerate() {
            for dep in &step.dependencies {
                if let Some(&i) = index.get(dep.as_str()) {
                    dependents[i].push(j);
                }
            }
        }
        let mut unmet: Vec<usize> = steps.iter().map(|s| s.dependencies.len()).collect();

        let mut state = vec![StepState::Pending; n];
        let mut running: Vec<usize> = Vec::new();
        let mut completed = 0;
        let mut current_hours = 0.0_f64;
        let mut wave = 0_usize;
        let mut schedule = RoutingSchedule::new();

        while completed < n {
            let ready: Vec<usize> = (0..n)
                .filter(|&i| state[i] == StepState::Pending && is_ready(&steps[i], unmet[i]))
                .collect();

            if ready.is_empty() && running.is_empty() {
                let blocked_steps: Vec<String> = (0..n)
                    .filter(|&i| state[i] == StepState::Pending)
                    .map(|i| steps[i].id.clone())
                    .collect();
                warn!(
                    template_id = %template.id,
                    blocked = ?blocked_steps,
                    "scheduling cannot progress"
                );
                return Err(RoutingError::SchedulingConflict {
                    template_id: template.id.clone(),
                    blocked_steps,
                });
            }

            if !ready.is_empty() {
                let lanes = partition_lanes(steps, &ready);
                debug!(
                    template_id = %template.id,
                    wave,
                    at_hours = current_hours,
                    started = ready.len(),
                    lanes = lanes.len(),
                    "starting wave"
                );

                for (lane, group) in lanes.iter().enumerate() {
                    for &i in group {
                        let step = &steps[i];
                        let duration = step.duration_for(quantity);
                        let placed = ScheduledStep {
                            step_id: step.id.clone(),
                            step_name: step.name.clone(),
                            start_time: at_offset(start, current_hours)?,
                            end_time: at_offset(start, current_hours + duration)?,
                            assigned_department: step.department,
                            parallel_lane: lane,
                            start_offset_hours: current_hours,
                            duration_hours: duration,
                        };

                        let conflicts = department_conflicts(&schedule, &placed);
                        for conflict in conflicts {
                            debug!(%conflict, "department overbooked");
                            schedule.add_conflict(conflict);
                        }

                        state[i] = StepState::Running {
                            end_hours: placed.end_offset_hours(),
                        };
                        running.push(i);
                        schedule.add_step(placed);
                    }
                }
                wave += 1;
            }

            // Advance to the next completion
            current_hours = running
                .iter()
                .filter_map(|&i| match state[i] {
                    StepState::Running { end_hours } => Some(end_hours),
                    _ => None,
                })
                .fold(f64::INFINITY, f64::min);

            let mut still_running = Vec::with_capacity(running.len());
            for i in running.drain(..) {
                match state[i] {
                    StepState::Running { end_hours } if end_hours <= current_hours => {
                        state[i] = StepState::Completed;
                        completed += 1;
                        for &j in &dependents[i] {
                            unmet[j] -= 1;
                        }
                    }
                    _ => still_running.push(i),
                }
            }
            running = still_running;
        }

        debug!(
            template_id = %template.id,
            steps = schedule.step_count(),
            makespan_hours = schedule.makespan_hours(),
            conflicts = schedule.conflicts.len(),
            "schedule complete"
        );
        Ok(schedule)
    }
}

/// Whether a pending step's dependencies are satisfied.
fn is_ready(step: &RoutingStep, unmet: usize) -> bool {
    let total = step.dependencies.len();
    match step.join_type {
        JoinType::And => unmet == 0,
        JoinType::Or => total == 0 || unmet < total,
    }
}

/// Groups ready steps (template order) into lanes.
///
/// A parallel-eligible step joins the first shared lane that has no step
/// of its department; other steps always open a lane of their own.
fn partition_lanes(steps: &[RoutingStep], ready: &[usize]) -> Vec<Vec<usize>> {
    let mut lanes: Vec<(bool, Vec<usize>)> = Vec::new();
    for &i in ready {
        let step = &steps[i];
        if step.can_run_parallel {
            let shared = lanes.iter_mut().find(|(shared, members)| {
                *shared
                    && members
                        .iter()
                        .all(|&m| steps[m].department != step.department)
            });
            match shared {
                Some((_, members)) => members.push(i),
                None => lanes.push((true, vec![i])),
            }
        } else {
            lanes.push((false, vec![i]));
        }
    }
    lanes.into_iter().map(|(_, members)| members).collect()
}

/// Conflicts between `placed` and already scheduled steps of its department.
fn department_conflicts(schedule: &RoutingSchedule, placed: &ScheduledStep) -> Vec<ResourceConflict> {
    schedule
        .steps_in_department(placed.assigned_department)
        .into_iter()
        .filter(|other| other.overlaps(placed))
        .map(|other| ResourceConflict {
            department: placed.assigned_department,
            first_step: other.step_id.clone(),
            second_step: placed.step_id.clone(),
            overlap_hours: other.overlap_hours(placed),
        })
        .collect()
}

/// `start + hours`, or [`RoutingError::HorizonExceeded`] past chrono's range.
fn at_offset(start: DateTime<Utc>, hours: f64) -> RoutingResult<DateTime<Utc>> {
    let millis = (hours * MILLIS_PER_HOUR).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return Err(RoutingError::HorizonExceeded { hours });
    }
    Duration::try_milliseconds(millis as i64)
        .and_then(|offset| start.checked_add_signed(offset))
        .ok_or(RoutingError::HorizonExceeded { hours })
}
