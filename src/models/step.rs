//! Routing step model.
//!
//! A routing step is the smallest unit of production work inside a
//! routing template. It belongs to one department, has a nominal duration
//! at a reference quantity and a throughput capacity, and may depend on
//! other steps of the same template.
//!
//! # Duration Model
//!
//! The effective duration for an order of `Q` units is
//! `max(nominal_hours, Q / capacity_per_hour)`: small runs are bounded by
//! set-up and handling time, large runs by throughput.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Work area a step is performed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    Cutting,
    Printing,
    Sewing,
    QualityControl,
    Finishing,
    Design,
    Packaging,
}

impl Department {
    /// All departments in a stable order.
    pub const ALL: [Department; 7] = [
        Department::Cutting,
        Department::Printing,
        Department::Sewing,
        Department::QualityControl,
        Department::Finishing,
        Department::Design,
        Department::Packaging,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Department::Cutting => "cutting",
            Department::Printing => "printing",
            Department::Sewing => "sewing",
            Department::QualityControl => "quality-control",
            Department::Finishing => "finishing",
            Department::Design => "design",
            Department::Packaging => "packaging",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a step's dependencies combine before it may start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JoinType {
    /// Wait for every dependency to complete.
    #[default]
    And,
    /// Proceed once any one dependency completes.
    Or,
}

/// One unit of production work within a routing template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingStep {
    /// Step identifier, unique within its template.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Baseline duration (hours) at a reference quantity.
    pub nominal_hours: f64,
    /// Skill tags. Informational only; the scheduler does not enforce them.
    #[serde(default)]
    pub required_skills: Vec<String>,
    /// IDs of steps in the same template that must complete first.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Department performing the step.
    pub department: Department,
    /// Throughput in units per hour. Must be positive.
    pub capacity_per_hour: f64,
    /// Whether the step may run concurrently with parallel-eligible
    /// steps of other departments.
    #[serde(default)]
    pub can_run_parallel: bool,
    /// Dependency join semantics.
    #[serde(default)]
    pub join_type: JoinType,
}

impl RoutingStep {
    /// Creates a step with no dependencies, a capacity of one unit per hour
    /// and AND-join semantics.
    pub fn new(id: impl Into<String>, name: impl Into<String>, department: Department) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            nominal_hours: 0.0,
            required_skills: Vec::new(),
            dependencies: Vec::new(),
            department,
            capacity_per_hour: 1.0,
            can_run_parallel: false,
            join_type: JoinType::And,
        }
    }

    /// Sets the nominal duration (hours).
    pub fn with_nominal_hours(mut self, hours: f64) -> Self {
        self.nominal_hours = hours;
        self
    }

    /// Sets the throughput (units per hour).
    pub fn with_capacity(mut self, capacity_per_hour: f64) -> Self {
        self.capacity_per_hour = capacity_per_hour;
        self
    }

    /// Adds a dependency on another step.
    pub fn with_dependency(mut self, step_id: impl Into<String>) -> Self {
        self.dependencies.push(step_id.into());
        self
    }

    /// Adds a required skill tag.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.required_skills.push(skill.into());
        self
    }

    /// Marks the step as parallel-eligible.
    pub fn parallel(mut self) -> Self {
        self.can_run_parallel = true;
        self
    }

    /// Sets the join type.
    pub fn with_join(mut self, join_type: JoinType) -> Self {
        self.join_type = join_type;
        self
    }

    /// Effective duration (hours) for `quantity` units.
    ///
    /// Never less than `nominal_hours`.
    pub fn duration_for(&self, quantity: u32) -> f64 {
        let throughput_hours = f64::from(quantity) / self.capacity_per_hour;
        self.nominal_hours.max(throughput_hours)
    }

    /// Whether the step has no dependencies.
    pub fn is_entry(&self) -> bool {
        self.dependencies.is_empty()
    }
}
