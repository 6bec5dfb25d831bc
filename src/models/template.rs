//! Routing template model.
//!
//! A routing template is one production path for a print method: a
//! directed acyclic graph of [`RoutingStep`]s plus the order
//! characteristics (product types, quantity bounds) it applies to.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::RoutingStep;

/// Print method a template implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrintMethod {
    ScreenPrint,
    Dtg,
    Dtf,
    Sublimation,
    Embroidery,
    HeatTransfer,
}

impl fmt::Display for PrintMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PrintMethod::ScreenPrint => "screen print",
            PrintMethod::Dtg => "DTG",
            PrintMethod::Dtf => "DTF",
            PrintMethod::Sublimation => "sublimation",
            PrintMethod::Embroidery => "embroidery",
            PrintMethod::HeatTransfer => "heat transfer",
        };
        f.write_str(label)
    }
}

/// Production complexity of a template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplexityTier {
    Low,
    #[default]
    Medium,
    High,
}

/// Advisory tier attached to a template.
///
/// The recommendation layer prefers `Optimal`, then `Suitable`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationTier {
    Optimal,
    #[default]
    Suitable,
    Caution,
    NotRecommended,
}

/// A named DAG of production steps for one print method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingTemplate {
    /// Unique template identifier (the order's route template key).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Print method.
    pub method: PrintMethod,
    /// Product types this route applies to (compared case-insensitively).
    #[serde(default)]
    pub applicable_product_types: Vec<String>,
    /// Steps forming the dependency DAG, in template order.
    #[serde(default)]
    pub steps: Vec<RoutingStep>,
    /// Smallest order quantity this route admits.
    #[serde(default)]
    pub min_quantity: Option<u32>,
    /// Largest order quantity this route admits.
    #[serde(default)]
    pub max_quantity: Option<u32>,
    #[serde(default)]
    pub complexity_tier: ComplexityTier,
    /// Static risk notes seeded into every estimate.
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub recommendation_tier: RecommendationTier,
}

impl RoutingTemplate {
    /// Creates an empty template.
    pub fn new(id: impl Into<String>, name: impl Into<String>, method: PrintMethod) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            method,
            applicable_product_types: Vec::new(),
            steps: Vec::new(),
            min_quantity: None,
            max_quantity: None,
            complexity_tier: ComplexityTier::default(),
            risk_factors: Vec::new(),
            recommendation_tier: RecommendationTier::default(),
        }
    }

    /// Adds an applicable product type.
    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.applicable_product_types.push(product_type.into());
        self
    }

    /// Appends a step.
    pub fn with_step(mut self, step: RoutingStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Sets the quantity bounds. `None` leaves a side open.
    pub fn with_quantity_bounds(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_quantity = min;
        self.max_quantity = max;
        self
    }

    pub fn with_complexity(mut self, tier: ComplexityTier) -> Self {
        self.complexity_tier = tier;
        self
    }

    /// Adds a static risk factor.
    pub fn with_risk(mut self, risk: impl Into<String>) -> Self {
        self.risk_factors.push(risk.into());
        self
    }

    pub fn with_tier(mut self, tier: RecommendationTier) -> Self {
        self.recommendation_tier = tier;
        self
    }

    /// Whether the quantity bounds (if any) admit `quantity`.
    pub fn admits_quantity(&self, quantity: u32) -> bool {
        self.min_quantity.map_or(true, |min| quantity >= min)
            && self.max_quantity.map_or(true, |max| quantity <= max)
    }

    /// Whether this template lists `product_type` as applicable.
    pub fn applies_to(&self, product_type: &str) -> bool {
        let wanted = product_type.trim();
        self.applicable_product_types
            .iter()
            .any(|p| p.trim().eq_ignore_ascii_case(wanted))
    }

    /// Steps with no dependencies.
    pub fn entry_steps(&self) -> Vec<&RoutingStep> {
        self.steps.iter().filter(|s| s.is_entry()).collect()
    }

    /// Number of steps.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Department;

    fn diamond() -> RoutingTemplate {
        RoutingTemplate::new("dtg-basic", "DTG basic", PrintMethod::Dtg)
            .with_product_type("T-Shirt")
            .with_step(RoutingStep::new("a", "Prep", Department::Design).with_nominal_hours(1.0))
            .with_step(
                RoutingStep::new("b", "Pretreat", Department::Printing)
                    .with_nominal_hours(2.0)
                    .with_dependency("a"),
            )
            .with_step(
                RoutingStep::new("c", "Cut tags", Department::Cutting)
                    .with_nominal_hours(1.5)
                    .with_dependency("a"),
            )
            .with_step(
                RoutingStep::new("d", "Pack", Department::Packaging)
                    .with_nominal_hours(0.5)
                    .with_dependency("b")
                    .with_dependency("c"),
            )
    }

    #[test]
    fn test_quantity_bounds() {
        let t = diamond().with_quantity_bounds(Some(12), Some(500));
        assert!(!t.admits_quantity(11));
        assert!(t.admits_quantity(12));
        assert!(t.admits_quantity(500));
        assert!(!t.admits_quantity(501));

        let open = diamond();
        assert!(open.admits_quantity(1));
        assert!(open.admits_quantity(u32::MAX));
    }

    #[test]
    fn test_applies_to_case_insensitive() {
        let t = diamond();
        assert!(t.applies_to("t-shirt"));
        assert!(t.applies_to(" T-SHIRT "));
        assert!(!t.applies_to("Hoodie"));
    }

    #[test]
    fn test_graph_helpers() {
        let t = diamond();
        let entries: Vec<&str> = t.entry_steps().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(entries, vec!["a"]);
        assert_eq!(t.step_count(), 4);
    }

    #[test]
    fn test_template_serde_roundtrip_defaults() {
        let json = r#"{"id":"x","name":"X","method":"SUBLIMATION"}"#;
        let t: RoutingTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(t.method, PrintMethod::Sublimation);
        assert_eq!(t.recommendation_tier, RecommendationTier::Suitable);
        assert!(t.steps.is_empty());
    }
}
