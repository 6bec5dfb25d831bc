//! Routing template validation.
//!
//! Checks the structural integrity of a template before it enters or
//! replaces an entry in the catalog. Detects:
//! - Empty templates and templates without an entry step
//! - Duplicate step IDs
//! - Dependencies on steps that do not exist in the template
//! - Non-positive capacities and negative nominal durations
//! - Inverted quantity bounds
//! - Circular dependencies (DAG validation)
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.3 (DFS edge classification)

use crate::error::{RoutingError, RoutingResult};
use crate::models::RoutingTemplate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Dependency graph contains a cycle.
    CyclicDependency,
    /// A step depends on a step ID not present in the template.
    UnknownDependency,
    /// A step's capacity is zero, negative or not a number.
    NonPositiveCapacity,
    /// A step's nominal duration is negative or not a number.
    NegativeNominalHours,
    /// Two steps share the same ID.
    DuplicateStepId,
    /// The template has no steps.
    EmptyTemplate,
    /// Every step has at least one dependency, so nothing can start.
    NoEntryStep,
    /// `min_quantity` is greater than `max_quantity`.
    InvalidQuantityBounds,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a routing template.
///
/// Checks:
/// 1. The template has at least one step
/// 2. No duplicate step IDs
/// 3. Every capacity is positive and every nominal duration non-negative
/// 4. Every dependency resolves to a step in the same template
/// 5. At least one step has no dependencies
/// 6. Quantity bounds are ordered
/// 7. No circular dependencies
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_template(template: &RoutingTemplate) -> ValidationResult {
    let mut errors = Vec::new();

    if template.steps.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyTemplate,
            format!("Template '{}' has no steps", template.id),
        ));
    }

    let mut step_ids = HashSet::new();
    for step in &template.steps {
        if !step_ids.insert(step.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateStepId,
                format!("Duplicate step ID: {}", step.id),
            ));
        }

        if !(step.capacity_per_hour.is_finite() && step.capacity_per_hour > 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveCapacity,
                format!(
                    "Step '{}' has non-positive capacity {}",
                    step.id, step.capacity_per_hour
                ),
            ));
        }

        if !(step.nominal_hours.is_finite() && step.nominal_hours >= 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeNominalHours,
                format!(
                    "Step '{}' has invalid nominal hours {}",
                    step.id, step.nominal_hours
                ),
            ));
        }
    }

    for step in &template.steps {
        for dep in &step.dependencies {
            if !step_ids.contains(dep.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownDependency,
                    format!("Step '{}' depends on unknown step '{}'", step.id, dep),
                ));
            }
        }
    }

    if !template.steps.is_empty() && template.entry_steps().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoEntryStep,
            format!("Template '{}' has no step without dependencies", template.id),
        ));
    }

    if let (Some(min), Some(max)) = (template.min_quantity, template.max_quantity) {
        if min > max {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidQuantityBounds,
                format!("Template '{}' has min quantity {min} above max {max}", template.id),
            ));
        }
    }

    if let Some(cycle) = find_cycle(template) {
        errors.push(ValidationError::new(
            ValidationErrorKind::CyclicDependency,
            format!("Circular dependency detected: {}", cycle.join(" -> ")),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a template and wraps failures in [`RoutingError::Validation`].
pub fn ensure_valid(template: &RoutingTemplate) -> RoutingResult<()> {
    validate_template(template).map_err(|errors| RoutingError::Validation {
        template_id: template.id.clone(),
        errors,
    })
}

/// Whether the template's dependency graph contains a cycle.
pub fn has_cycle(template: &RoutingTemplate) -> bool {
    find_cycle(template).is_some()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Grey,
    Black,
}

/// Finds one dependency cycle, returned as the step IDs along it with the
/// first ID repeated at the end.
///
/// # Algorithm
/// DFS over `step → dependency` edges with grey/black colouring. Reaching a
/// grey node (still on the recursion stack) is a back edge, i.e. a cycle.
/// Unknown dependencies are skipped; they are reported separately.
fn find_cycle(template: &RoutingTemplate) -> Option<Vec<String>> {
    let deps: HashMap<&str, Vec<&str>> = template
        .steps
        .iter()
        .map(|s| {
            (
                s.id.as_str(),
                s.dependencies.iter().map(String::as_str).collect(),
            )
        })
        .collect();

    let mut color: HashMap<&str, Color> = deps.keys().map(|&id| (id, Color::White)).collect();
    let mut path: Vec<&str> = Vec::new();

    for step in &template.steps {
        if color.get(step.id.as_str()) == Some(&Color::White) {
            if let Some(cycle) = visit(step.id.as_str(), &deps, &mut color, &mut path) {
                return Some(cycle);
            }
        }
    }

    None
}

fn visit<'a>(
    node: &'a str,
    deps: &HashMap<&'a str, Vec<&'a str>>,
    color: &mut HashMap<&'a str, Color>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    color.insert(node, Color::Grey);
    path.push(node);

    if let Some(next_nodes) = deps.get(node) {
        for &next in next_nodes {
            match color.get(next) {
                Some(Color::Grey) => {
                    // Back edge
                    let start = path.iter().position(|&n| n == next).unwrap_or(0);
                    let mut cycle: Vec<String> =
                        path[start..].iter().map(|n| n.to_string()).collect();
                    cycle.push(next.to_string());
                    return Some(cycle);
                }
                Some(Color::White) => {
                    if let Some(cycle) = visit(next, deps, color, path) {
                        return Some(cycle);
                    }
                }
                Some(Color::Black) | None => {}
            }
        }
    }

    path.pop();
    color.insert(node, Color::Black);
    None
}
