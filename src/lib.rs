//! Production routing engine for apparel manufacturing.
//!
//! Turns a catalog of routing templates (directed step graphs with
//! per-step throughput) plus an order's quantity and due date into a
//! feasibility verdict, a critical path, a parallel execution schedule and
//! human-readable advisory insights.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `RoutingTemplate`, `RoutingStep`,
//!   `OrderContext`, `RoutingSchedule`, `CriticalPathResult`
//! - **`validation`**: Template integrity checks (DAG cycles, dependency refs, capacities)
//! - **`catalog`**: Validated, copy-on-write template registry
//! - **`estimator`**: Sequential duration and feasibility estimate
//! - **`scheduler`**: Dependency-driven parallel scheduler and schedule KPIs
//! - **`analysis`**: Critical path, bottlenecks and the full production plan
//! - **`advisor`**: Recommendation heuristics ("Ashley")
//! - **`config`**, **`error`**, **`logging`**: Engine constants, error type, tracing setup
//!
//! # Flow
//!
//! ```text
//! OrderContext -> TemplateCatalog::templates_for -> Advisor (BasicEstimator)
//!              -> RoutePlanner (DependencyScheduler + CriticalPathAnalyzer)
//! ```
//!
//! Every catalog write passes through [`validation::validate_template`].
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22 and 24

pub mod advisor;
pub mod analysis;
pub mod catalog;
pub mod config;
pub mod error;
pub mod estimator;
pub mod logging;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use advisor::{Advisor, Recommendation};
pub use analysis::{CriticalPathAnalyzer, PathAnalysis, RoutePlanner};
pub use catalog::TemplateCatalog;
pub use config::EngineConfig;
pub use error::{RoutingError, RoutingResult};
pub use estimator::BasicEstimator;
pub use scheduler::{DependencyScheduler, ScheduleKpi};
