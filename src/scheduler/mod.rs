//! Dependency scheduler and schedule KPIs.
//!
//! # Algorithm
//!
//! `DependencyScheduler` runs an event-driven greedy simulation over a
//! routing template's step DAG: every step whose dependencies are met
//! starts immediately, parallel-eligible steps of different departments
//! share a lane, and same-department overlaps are reported as conflicts.
//!
//! # KPI
//!
//! `ScheduleKpi` summarises a schedule: makespan, total work, parallel
//! efficiency and per-department load.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Kolisch (1996), "Serial and parallel resource-constrained project scheduling methods revisited"

mod dependency;
mod kpi;

pub use dependency::DependencyScheduler;
pub use kpi::ScheduleKpi;
