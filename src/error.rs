//! Engine error type.
//!
//! Hard failures only. Soft findings (advisory warnings, risks,
//! `feasible = false`, an empty template match) are returned as data.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised by the routing engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    /// A template failed validation; the catalog was left unchanged.
    #[error("template '{template_id}' rejected: {}", join_messages(.errors))]
    Validation {
        template_id: String,
        errors: Vec<ValidationError>,
    },

    #[error("template '{id}' already exists")]
    DuplicateTemplate { id: String },

    #[error("template '{id}' not found")]
    TemplateNotFound { id: String },

    #[error("invalid order: {0}")]
    InvalidOrder(String),

    #[error("quantity must be greater than zero")]
    InvalidQuantity,

    /// The scheduler ran out of ready steps with work still pending.
    #[error(
        "scheduling of template '{template_id}' cannot progress; blocked steps: {}",
        .blocked_steps.join(", ")
    )]
    SchedulingConflict {
        template_id: String,
        blocked_steps: Vec<String>,
    },

    #[error("schedule has no placement for step '{step_id}'")]
    IncompleteSchedule { step_id: String },

    /// A duration or projected date falls outside the representable calendar.
    #[error("{hours}h cannot be placed on the calendar")]
    HorizonExceeded { hours: f64 },

    #[error("configuration error: {0}")]
    Config(String),
}

impl RoutingError {
    /// Validation problems carried by this error, empty for other variants.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            RoutingError::Validation { errors, .. } => errors,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for RoutingError {
    fn from(err: serde_json::Error) -> Self {
        RoutingError::Config(err.to_string())
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias for engine operations.
pub type RoutingResult<T> = Result<T, RoutingError>;
