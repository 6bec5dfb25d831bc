//! Recommendation heuristics ("Ashley").
//!
//! Picks a routing template for an order, runs the sequential estimator on
//! it and turns the numbers plus static shop-floor rules into insight and
//! warning strings for the advisory UI.
//!
//! # Selection
//!
//! Among the catalog matches, the first template (catalog order) of the
//! best available tier wins: `Optimal`, then `Suitable`, then `Caution`
//! (with a warning). `NotRecommended` templates are never picked.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::catalog::TemplateCatalog;
use crate::config::EngineConfig;
use crate::error::RoutingResult;
use crate::estimator::BasicEstimator;
use crate::models::{
    CriticalPathResult, OrderContext, PrintMethod, RecommendationTier, RoutingTemplate,
};

/// Tiers eligible for selection, best first.
const SELECTABLE_TIERS: [RecommendationTier; 3] = [
    RecommendationTier::Optimal,
    RecommendationTier::Suitable,
    RecommendationTier::Caution,
];

/// Advisory outcome for one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Chosen template, `None` when nothing suitable matched.
    pub template: Option<RoutingTemplate>,
    /// Quick sequential estimate of the chosen template.
    pub estimate: Option<CriticalPathResult>,
    pub insights: Vec<String>,
    pub warnings: Vec<String>,
}

impl Recommendation {
    fn unrouted(warning: String) -> Self {
        Self {
            template: None,
            estimate: None,
            insights: Vec::new(),
            warnings: vec![warning],
        }
    }

    /// ID of the chosen template, the key persisted on the order record.
    pub fn template_id(&self) -> Option<&str> {
        self.template.as_ref().map(|t| t.id.as_str())
    }

    /// Whether a feasible template was found.
    pub fn is_feasible(&self) -> bool {
        self.estimate.as_ref().is_some_and(|e| e.feasible)
    }
}

/// Rule-based routing advisor.
#[derive(Debug, Clone)]
pub struct Advisor {
    catalog: Arc<TemplateCatalog>,
    estimator: BasicEstimator,
}

impl Advisor {
    /// Creates an advisor reading from `catalog`.
    pub fn new(catalog: Arc<TemplateCatalog>, config: EngineConfig) -> Self {
        Self {
            catalog,
            estimator: BasicEstimator::new(config),
        }
    }

    /// Recommends a template for `context`, estimating from `now`.
    ///
    /// # Errors
    /// [`RoutingError::InvalidOrder`](crate::error::RoutingError::InvalidOrder)
    /// if the context has a zero quantity or a blank product type. A missing
    /// match is not an error.
    pub fn recommend(
        &self,
        context: &OrderContext,
        now: DateTime<Utc>,
    ) -> RoutingResult<Recommendation> {
        context.validate()?;

        let candidates = self.catalog.templates_for(context);
        if candidates.is_empty() {
            info!(
                method = %context.method,
                product_type = %context.product_type,
                quantity = context.quantity,
                "no routing template matched"
            );
            return Ok(Recommendation::unrouted(format!(
                "No suitable routing templates found for {} x {} ({})",
                context.quantity, context.product_type, context.method
            )));
        }

        let Some((template, tier)) = select(candidates) else {
            info!(method = %context.method, "only not-recommended templates matched");
            return Ok(Recommendation::unrouted(format!(
                "No suitable routing templates found: every {} route for {} is marked not recommended",
                context.method, context.product_type
            )));
        };

        let estimate = self.estimator.estimate(
            &template,
            context.quantity,
            context.target_delivery_date,
            now,
        )?;
        let config = self.estimator.config();

        let mut insights = vec![format!(
            "Recommended route: {} ({:.1}h estimated, including {:.1}h buffer)",
            template.name, estimate.total_estimated_hours, estimate.buffer_hours
        )];
        let mut warnings = Vec::new();

        if tier == RecommendationTier::Caution {
            warnings.push(format!(
                "'{}' is marked caution; review its risk factors before committing",
                template.name
            ));
        }
        if !estimate.feasible {
            warnings.push(format!(
                "Estimated delivery {} misses the target {}; consider expediting or splitting the order into batches",
                estimate.estimated_delivery_date.format("%Y-%m-%d"),
                context.target_delivery_date.format("%Y-%m-%d")
            ));
        }
        if context.quantity > config.batch_threshold {
            insights.push(format!(
                "{} units: batch processing keeps departments evenly loaded",
                context.quantity
            ));
        }
        if context.method == PrintMethod::Sublimation && is_t_shirt(&context.product_type) {
            warnings.push(
                "Sublimation on T-Shirts needs polyester or poly-blend blanks; confirm fabric compatibility"
                    .to_string(),
            );
        }
        if !estimate.bottleneck_steps.is_empty() {
            insights.push(format!(
                "Bottleneck steps: {}",
                estimate.bottleneck_steps.join(", ")
            ));
        }
        if context.priority_flag {
            insights.push(
                "Priority order: reserve department slots ahead of the standard queue".to_string(),
            );
        }

        info!(
            template_id = %template.id,
            tier = ?tier,
            feasible = estimate.feasible,
            insights = insights.len(),
            warnings = warnings.len(),
            "routing recommended"
        );

        Ok(Recommendation {
            template: Some(template),
            estimate: Some(estimate),
            insights,
            warnings,
        })
    }

    /// [`recommend`](Self::recommend) estimating from the current time.
    pub fn recommend_now(&self, context: &OrderContext) -> RoutingResult<Recommendation> {
        self.recommend(context, Utc::now())
    }
}

/// First template of the best selectable tier.
fn select(candidates: Vec<RoutingTemplate>) -> Option<(RoutingTemplate, RecommendationTier)> {
    let tier = SELECTABLE_TIERS
        .into_iter()
        .find(|tier| candidates.iter().any(|t| t.recommendation_tier == *tier))?;
    candidates
        .into_iter()
        .find(|t| t.recommendation_tier == tier)
        .map(|t| (t, tier))
}

fn is_t_shirt(product_type: &str) -> bool {
    let normalized: String = product_type
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    normalized.eq_ignore_ascii_case("tshirt")
}
