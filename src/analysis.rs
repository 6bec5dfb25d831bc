//! Critical-path and bottleneck analysis.
//!
//! Consumes a timed schedule and extracts:
//! - the critical path: the dependency chain with the largest total
//!   scheduled duration, from an entry step to a step nothing waited on;
//! - bottlenecks: steps whose scheduled duration exceeds
//!   `schedule_bottleneck_ratio × nominal_hours`;
//! - optimization suggestions for overbooked departments and
//!   parallel-eligible steps that ended up running alone.
//!
//! [`RoutePlanner`] ties the scheduler and the analyzer together into an
//! [`AdvancedCriticalPathResult`].
//!
//! # Algorithm
//! Longest path in a DAG: Kahn topological order, then one relaxation pass
//! over the order. O(steps + edges). OR-join steps relax only over the
//! dependency that released them, so the path never outgrows the makespan.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 24.2 (DAG shortest paths)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use tracing::info;

use crate::config::EngineConfig;
use crate::error::{RoutingError, RoutingResult};
use crate::estimator::DeliveryProjection;
use crate::models::{
    AdvancedCriticalPathResult, CriticalPathResult, JoinType, RoutingSchedule, RoutingTemplate,
    ScheduledStep,
};
use crate::scheduler::{DependencyScheduler, ScheduleKpi};

/// Slack for comparing millisecond-rounded offsets.
const RELEASE_TOLERANCE_HOURS: f64 = 1e-9;

/// Outcome of analysing one schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathAnalysis {
    /// Step IDs of the longest chain, entry to exit.
    pub critical_path_steps: Vec<String>,
    /// Summed scheduled duration along the chain.
    pub critical_path_hours: f64,
    /// Names of steps running well over their nominal duration.
    pub bottleneck_steps: Vec<String>,
}

/// Critical-path and bottleneck analyzer.
#[derive(Debug, Clone, Default)]
pub struct CriticalPathAnalyzer {
    config: EngineConfig,
}

impl CriticalPathAnalyzer {
    /// Creates an analyzer with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Extracts the critical path and bottlenecks of `schedule`.
    ///
    /// # Errors
    /// - [`RoutingError::IncompleteSchedule`] if a template step has no placement.
    /// - [`RoutingError::SchedulingConflict`] if the template graph has a cycle.
    pub fn analyze(
        &self,
        template: &RoutingTemplate,
        schedule: &RoutingSchedule,
    ) -> RoutingResult<PathAnalysis> {
        let steps = &template.steps;
        let mut placements = Vec::with_capacity(steps.len());
        let mut bottleneck_steps = Vec::new();
        for step in steps {
            let placed = schedule
                .step(&step.id)
                .ok_or_else(|| RoutingError::IncompleteSchedule {
                    step_id: step.id.clone(),
                })?;
            if placed.duration_hours > self.config.schedule_bottleneck_ratio * step.nominal_hours {
                bottleneck_steps.push(step.name.clone());
            }
            placements.push(placed);
        }

        let graph = StepGraph::build(template);
        let order = graph.topological_order().ok_or_else(|| {
            RoutingError::SchedulingConflict {
                template_id: template.id.clone(),
                blocked_steps: steps.iter().map(|s| s.id.clone()).collect(),
            }
        })?;

        // dist[i]: longest chain ending at i, including i
        let mut dist = vec![0.0_f64; steps.len()];
        let mut via: Vec<Option<usize>> = vec![None; steps.len()];
        // Whether a step's completion gated some later step
        let mut drives = vec![false; steps.len()];
        for &i in &order {
            let mut best: Option<(usize, f64)> = None;
            let drivers =
                driving_predecessors(steps[i].join_type, &graph.predecessors[i], &placements, i);
            for p in drivers {
                drives[p] = true;
                if best.map_or(true, |(_, d)| dist[p] > d) {
                    best = Some((p, dist[p]));
                }
            }
            dist[i] = placements[i].duration_hours + best.map_or(0.0, |(_, d)| d);
            via[i] = best.map(|(p, _)| p);
        }

        let mut end: Option<usize> = None;
        for i in 0..steps.len() {
            if !drives[i] && end.map_or(true, |e| dist[i] > dist[e]) {
                end = Some(i);
            }
        }

        let mut critical_path_steps = Vec::new();
        let mut cursor = end;
        while let Some(i) = cursor {
            critical_path_steps.push(steps[i].id.clone());
            cursor = via[i];
        }
        critical_path_steps.reverse();

        Ok(PathAnalysis {
            critical_path_hours: end.map_or(0.0, |e| dist[e]),
            critical_path_steps,
            bottleneck_steps,
        })
    }

    /// Advisory text for the planner.
    ///
    /// Suggests more capacity when departments were overbooked, and lists
    /// parallel-eligible steps that overlapped no other step.
    pub fn optimization_suggestions(
        &self,
        template: &RoutingTemplate,
        schedule: &RoutingSchedule,
    ) -> Vec<String> {
        let mut suggestions = Vec::new();

        let overbooked = schedule.overbooked_departments();
        if !overbooked.is_empty() {
            let names: Vec<String> = overbooked.iter().map(ToString::to_string).collect();
            suggestions.push(format!(
                "Add capacity to overbooked departments: {}",
                names.join(", ")
            ));
        }

        let ran_alone: Vec<&str> = template
            .steps
            .iter()
            .filter(|s| s.can_run_parallel)
            .filter_map(|s| schedule.step(&s.id).map(|placed| (s, placed)))
            .filter(|(_, placed)| {
                !schedule
                    .steps
                    .iter()
                    .any(|other| other.step_id != placed.step_id && other.overlaps(placed))
            })
            .map(|(s, _)| s.name.as_str())
            .collect();
        if !ran_alone.is_empty() {
            suggestions.push(format!(
                "Additional parallelization possible for: {}",
                ran_alone.join(", ")
            ));
        }

        suggestions
    }
}

/// Full production planner: scheduler, analyzer and delivery projection.
///
/// Unlike [`BasicEstimator`](crate::estimator::BasicEstimator), the delivery
/// date is projected from the parallel schedule's makespan, with the same
/// buffer and workday rules.
#[derive(Debug, Clone, Default)]
pub struct RoutePlanner {
    scheduler: DependencyScheduler,
    analyzer: CriticalPathAnalyzer,
    config: EngineConfig,
}

impl RoutePlanner {
    /// Creates a planner with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            scheduler: DependencyScheduler::new(),
            analyzer: CriticalPathAnalyzer::new(config.clone()),
            config,
        }
    }

    /// Schedules and analyses `template` for `quantity` units from `start`.
    ///
    /// # Errors
    /// Propagates [`RoutingError::InvalidQuantity`],
    /// [`RoutingError::SchedulingConflict`] and
    /// [`RoutingError::HorizonExceeded`] from the scheduler and the
    /// delivery projection.
    pub fn plan(
        &self,
        template: &RoutingTemplate,
        quantity: u32,
        start: DateTime<Utc>,
        target: DateTime<Utc>,
    ) -> RoutingResult<AdvancedCriticalPathResult> {
        let schedule = self.scheduler.schedule(template, quantity, start)?;
        let analysis = self.analyzer.analyze(template, &schedule)?;
        let optimization_suggestions = self.analyzer.optimization_suggestions(template, &schedule);

        let projection =
            DeliveryProjection::new(&self.config, schedule.makespan_hours(), start, target)?;
        let risks = projection.risks(&self.config, template, quantity);
        let kpi = ScheduleKpi::calculate(&schedule);

        info!(
            template_id = %template.id,
            quantity,
            makespan_hours = kpi.makespan_hours,
            critical_path_hours = analysis.critical_path_hours,
            conflicts = schedule.conflicts.len(),
            busiest = ?kpi.busiest_department(),
            feasible = projection.feasible,
            "production plan built"
        );

        Ok(AdvancedCriticalPathResult {
            summary: CriticalPathResult {
                total_estimated_hours: projection.total_hours,
                estimated_delivery_date: projection.delivery_date,
                bottleneck_steps: analysis.bottleneck_steps,
                buffer_hours: projection.buffer_hours,
                feasible: projection.feasible,
                risks,
            },
            parallel_schedule: schedule.steps,
            resource_conflicts: schedule.conflicts,
            optimization_suggestions,
            critical_path_steps: analysis.critical_path_steps,
            kpi,
        })
    }
}

/// Predecessors whose chains can drive step `i`.
///
/// An AND step waits for all of them. An OR step only waits for the
/// dependency that released it: the latest one finished by its start,
/// first in dependency order on ties.
fn driving_predecessors(
    join_type: JoinType,
    predecessors: &[usize],
    placements: &[&ScheduledStep],
    i: usize,
) -> Vec<usize> {
    match join_type {
        JoinType::And => predecessors.to_vec(),
        JoinType::Or => {
            let start = placements[i].start_offset_hours;
            let mut release: Option<usize> = None;
            for &p in predecessors {
                let end = placements[p].end_offset_hours();
                if end > start + RELEASE_TOLERANCE_HOURS {
                    continue;
                }
                if release.map_or(true, |r| end > placements[r].end_offset_hours()) {
                    release = Some(p);
                }
            }
            release.into_iter().collect()
        }
    }
}

/// Index-based view of a template's dependency edges.
struct StepGraph {
    predecessors: Vec<Vec<usize>>,
    successors: Vec<Vec<usize>>,
}

impl StepGraph {
    fn build(template: &RoutingTemplate) -> Self {
        let n = template.steps.len();
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(n);
        for (i, step) in template.steps.iter().enumerate() {
            index.entry(step.id.as_str()).or_insert(i);
        }

        let mut predecessors = vec![Vec::new(); n];
        let mut successors = vec![Vec::new(); n];
        for (j, step) in template.steps.iter().enumerate() {
            for dep in &step.dependencies {
                if let Some(&i) = index.get(dep.as_str()) {
                    predecessors[j].push(i);
                    successors[i].push(j);
                }
            }
        }
        Self {
            predecessors,
            successors,
        }
    }

    /// Kahn's algorithm, seeded in template order. `None` on a cycle.
    fn topological_order(&self) -> Option<Vec<usize>> {
        let n = self.predecessors.len();
        let mut in_degree: Vec<usize> = self.predecessors.iter().map(Vec::len).collect();
        let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(n);

        while let Some(i) = queue.pop_front() {
            order.push(i);
            for &j in &self.successors[i] {
                in_degree[j] -= 1;
                if in_degree[j] == 0 {
                    queue.push_back(j);
                }
            }
        }

        (order.len() == n).then_some(order)
    }
}
