//! Basic (sequential) estimator.
//!
//! Quick feasibility check used for filtering and advisory text. Ignores
//! parallelism entirely: every step's duration is summed as if the steps
//! ran back to back, which makes the result a conservative upper bound.
//!
//! # Algorithm
//!
//! 1. For each step, `duration = max(nominal_hours, quantity / capacity_per_hour)`.
//! 2. Sum the durations and add the buffer (`buffer_ratio`, 20% by default).
//! 3. Convert to working days (`ceil(total / workday_hours)`) and add them
//!    to `now` to get the estimated delivery date.
//! 4. `feasible = estimated_delivery <= target`.
//!
//! A step is a bottleneck when its duration exceeds
//! `estimate_bottleneck_ratio × nominal_hours`.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::{RoutingError, RoutingResult};
use crate::models::{CriticalPathResult, RoutingTemplate};

const SECONDS_PER_DAY: i64 = 86_400;

/// Sequential duration and feasibility estimator.
#[derive(Debug, Clone, Default)]
pub struct BasicEstimator {
    config: EngineConfig,
}

impl BasicEstimator {
    /// Creates an estimator with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Estimates `template` for `quantity` units against `target`, counting
    /// from `now`.
    ///
    /// Pure: identical inputs give identical results.
    ///
    /// # Errors
    /// - [`RoutingError::InvalidQuantity`] if `quantity` is zero.
    /// - [`RoutingError::HorizonExceeded`] if the delivery date falls
    ///   beyond the representable calendar.
    pub fn estimate(
        &self,
        template: &RoutingTemplate,
        quantity: u32,
        target: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> RoutingResult<CriticalPathResult> {
        if quantity == 0 {
            return Err(RoutingError::InvalidQuantity);
        }

        let mut work_hours = 0.0;
        let mut bottleneck_steps = Vec::new();
        for step in &template.steps {
            let duration = step.duration_for(quantity);
            work_hours += duration;
            if duration > self.config.estimate_bottleneck_ratio * step.nominal_hours {
                bottleneck_steps.push(step.name.clone());
            }
        }

        let projection = DeliveryProjection::new(&self.config, work_hours, now, target)?;
        let risks = projection.risks(&self.config, template, quantity);

        debug!(
            template_id = %template.id,
            quantity,
            work_hours,
            working_days = projection.working_days,
            feasible = projection.feasible,
            "sequential estimate"
        );
        if !projection.feasible {
            warn!(
                template_id = %template.id,
                shortfall_days = projection.shortfall_days,
                "estimated delivery misses target"
            );
        }

        Ok(CriticalPathResult {
            total_estimated_hours: projection.total_hours,
            estimated_delivery_date: projection.delivery_date,
            bottleneck_steps,
            buffer_hours: projection.buffer_hours,
            feasible: projection.feasible,
            risks,
        })
    }

    /// [`estimate`](Self::estimate) counting from the current time.
    pub fn estimate_from_now(
        &self,
        template: &RoutingTemplate,
        quantity: u32,
        target: DateTime<Utc>,
    ) -> RoutingResult<CriticalPathResult> {
        self.estimate(template, quantity, target, Utc::now())
    }
}

/// Buffered hours turned into a calendar delivery date.
///
/// Shared by the sequential estimator and the scheduled planner so both
/// apply the same buffer, workday and shortfall rules.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DeliveryProjection {
    pub total_hours: f64,
    pub buffer_hours: f64,
    pub working_days: i64,
    pub delivery_date: DateTime<Utc>,
    pub feasible: bool,
    /// Whole days past the target; 0 when feasible.
    pub shortfall_days: i64,
}

impl DeliveryProjection {
    pub fn new(
        config: &EngineConfig,
        work_hours: f64,
        now: DateTime<Utc>,
        target: DateTime<Utc>,
    ) -> RoutingResult<Self> {
        let buffer_hours = work_hours * config.buffer_ratio;
        let total_hours = work_hours + buffer_hours;
        let days = (total_hours / config.workday_hours).ceil();
        if !days.is_finite() || days >= i64::MAX as f64 {
            return Err(RoutingError::HorizonExceeded { hours: total_hours });
        }
        let working_days = days as i64;
        let delivery_date = Duration::try_days(working_days)
            .and_then(|offset| now.checked_add_signed(offset))
            .ok_or(RoutingError::HorizonExceeded { hours: total_hours })?;
        let feasible = delivery_date <= target;
        let shortfall_days = if feasible {
            0
        } else {
            let late_seconds = (delivery_date - target).num_seconds();
            ((late_seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY).max(1)
        };

        Ok(Self {
            total_hours,
            buffer_hours,
            working_days,
            delivery_date,
            feasible,
            shortfall_days,
        })
    }

    /// Template risk factors plus volume and shortfall findings.
    pub fn risks(&self, config: &EngineConfig, template: &RoutingTemplate, quantity: u32) -> Vec<String> {
        let mut risks = template.risk_factors.clone();
        if quantity > config.high_volume_threshold {
            risks.push(format!("High volume of {quantity} units may strain capacity"));
        }
        if !self.feasible {
            risks.push(format!(
                "Estimated delivery misses the target date by {} day(s)",
                self.shortfall_days
            ));
        }
        risks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Department, PrintMethod, RoutingStep};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 1, 8, 0, 0).unwrap()
    }

    /// Six strictly sequential steps.
    fn sequential_template() -> RoutingTemplate {
        let specs = [
            ("cut", "Cutting", Department::Cutting, 4.0, 50.0),
            ("print", "Printing", Department::Printing, 6.0, 4.0),
            ("cure", "Curing", Department::Finishing, 8.0, 25.0),
            ("sew", "Sewing", Department::Sewing, 12.0, 8.0),
            ("qc", "Inspection", Department::QualityControl, 3.0, 30.0),
            ("pack", "Packing", Department::Packaging, 2.0, 40.0),
        ];
        let mut template = RoutingTemplate::new("seq", "Sequential", PrintMethod::ScreenPrint)
            .with_risk("Ink supplier lead time");
        let mut previous: Option<&str> = None;
        for (id, name, dept, nominal, capacity) in specs {
            let mut step = RoutingStep::new(id, name, dept)
                .with_nominal_hours(nominal)
                .with_capacity(capacity);
            if let Some(prev) = previous {
                step = step.with_dependency(prev);
            }
            template = template.with_step(step);
            previous = Some(id);
        }
        template
    }

    #[test]
    fn test_sequential_estimate() {
        let estimator = BasicEstimator::default();
        let target = now() + Duration::days(30);
        let result = estimator
            .estimate(&sequential_template(), 200, target, now())
            .unwrap();

        // 4 + 50 + 8 + 25 + 6.67 + 5 = 98.67h, +20% = 118.4h
        assert!((result.total_estimated_hours - 118.4).abs() < 1e-6);
        assert!((result.buffer_hours - 19.733_333).abs() < 1e-4);
        assert_eq!(result.estimated_delivery_date, now() + Duration::days(15));
        assert!(result.feasible);
        assert_eq!(
            result.bottleneck_steps,
            vec!["Printing", "Sewing", "Inspection", "Packing"]
        );
        assert_eq!(result.risks, vec!["Ink supplier lead time"]);
    }

    #[test]
    fn test_infeasible_reports_shortfall() {
        let estimator = BasicEstimator::default();
        let target = now() + Duration::days(10);
        let result = estimator
            .estimate(&sequential_template(), 200, target, now())
            .unwrap();

        assert!(!result.feasible);
        assert!(result
            .risks
            .iter()
            .any(|r| r.contains("misses the target date by 5 day(s)")));
    }

    #[test]
    fn test_partial_day_shortfall_rounds_up() {
        let estimator = BasicEstimator::default();
        let target = now() + Duration::days(14) + Duration::hours(20);
        let result = estimator
            .estimate(&sequential_template(), 200, target, now())
            .unwrap();
        assert!(!result.feasible);
        assert!(result.risks.iter().any(|r| r.contains("by 1 day(s)")));
    }

    #[test]
    fn test_high_volume_risk() {
        let estimator = BasicEstimator::default();
        let target = now() + Duration::days(365);
        let result = estimator
            .estimate(&sequential_template(), 501, target, now())
            .unwrap();
        assert!(result.risks.iter().any(|r| r.contains("High volume")));

        let result = estimator
            .estimate(&sequential_template(), 500, target, now())
            .unwrap();
        assert!(!result.risks.iter().any(|r| r.contains("High volume")));
    }

    #[test]
    fn test_estimate_is_idempotent() {
        let estimator = BasicEstimator::default();
        let template = sequential_template();
        let target = now() + Duration::days(12);
        let a = estimator.estimate(&template, 321, target, now()).unwrap();
        let b = estimator.estimate(&template, 321, target, now()).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let estimator = BasicEstimator::default();
        let err = estimator
            .estimate(&sequential_template(), 0, now(), now())
            .unwrap_err();
        assert_eq!(err, RoutingError::InvalidQuantity);
    }

    #[test]
    fn test_unrepresentable_delivery_is_an_error() {
        let template = RoutingTemplate::new("slow", "Slow", PrintMethod::Dtf).with_step(
            RoutingStep::new("press", "Press", Department::Finishing)
                .with_nominal_hours(1.0)
                .with_capacity(0.001),
        );
        let err = BasicEstimator::default()
            .estimate(&template, u32::MAX, now(), now())
            .unwrap_err();
        assert!(matches!(err, RoutingError::HorizonExceeded { .. }));

        let template = RoutingTemplate::new("long", "Long", PrintMethod::Dtf).with_step(
            RoutingStep::new("age", "Age", Department::Finishing)
                .with_nominal_hours(1e300)
                .with_capacity(1.0),
        );
        let err = BasicEstimator::default()
            .estimate(&template, 1, now(), now())
            .unwrap_err();
        assert!(matches!(err, RoutingError::HorizonExceeded { .. }));
    }

    #[test]
    fn test_custom_config() {
        let config = EngineConfig::default()
            .with_buffer_ratio(0.0)
            .with_workday_hours(10.0);
        let estimator = BasicEstimator::new(config);
        let result = estimator
            .estimate(&sequential_template(), 200, now() + Duration::days(30), now())
            .unwrap();
        assert!(result.buffer_hours.abs() < 1e-10);
        // 98.67h over 10h days = 10 days
        assert_eq!(result.estimated_delivery_date, now() + Duration::days(10));
    }
}
