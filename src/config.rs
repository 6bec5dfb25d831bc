//! Engine configuration.
//!
//! Thresholds and calendar constants used by the estimator, the analyzer
//! and the advisor. Defaults reproduce the shop-floor rules the engine was
//! tuned with; deployments can override them from JSON.
//!
//! ```
//! use u_routing::config::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{ "workday_hours": 10.0 }"#).unwrap();
//! assert_eq!(config.workday_hours, 10.0);
//! assert_eq!(config.buffer_ratio, 0.2);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{RoutingError, RoutingResult};

/// Tunable engine constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Safety margin added on top of estimated work hours (0.2 = 20%).
    pub buffer_ratio: f64,
    /// Working hours per calendar day used to turn hours into days.
    pub workday_hours: f64,
    /// Estimator flags a step when its duration exceeds this multiple of nominal.
    pub estimate_bottleneck_ratio: f64,
    /// Analyzer flags a step when its scheduled duration exceeds this multiple of nominal.
    pub schedule_bottleneck_ratio: f64,
    /// Orders above this quantity carry a high-volume risk.
    pub high_volume_threshold: u32,
    /// Orders above this quantity get a batch-processing insight.
    pub batch_threshold: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            buffer_ratio: 0.2,
            workday_hours: 8.0,
            estimate_bottleneck_ratio: 1.2,
            schedule_bottleneck_ratio: 1.3,
            high_volume_threshold: 500,
            batch_threshold: 200,
        }
    }
}

impl EngineConfig {
    /// Parses a JSON document. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> RoutingResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> RoutingResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| RoutingError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    /// Sets the buffer ratio.
    pub fn with_buffer_ratio(mut self, ratio: f64) -> Self {
        self.buffer_ratio = ratio;
        self
    }

    /// Sets the working hours per day.
    pub fn with_workday_hours(mut self, hours: f64) -> Self {
        self.workday_hours = hours;
        self
    }

    /// Sets both bottleneck ratios.
    pub fn with_bottleneck_ratios(mut self, estimate: f64, schedule: f64) -> Self {
        self.estimate_bottleneck_ratio = estimate;
        self.schedule_bottleneck_ratio = schedule;
        self
    }

    /// Sets the volume thresholds.
    pub fn with_volume_thresholds(mut self, high_volume: u32, batch: u32) -> Self {
        self.high_volume_threshold = high_volume;
        self.batch_threshold = batch;
        self
    }

    /// Checks that every constant is usable.
    pub fn validate(&self) -> RoutingResult<()> {
        if !(self.buffer_ratio.is_finite() && self.buffer_ratio >= 0.0) {
            return Err(RoutingError::Config(format!(
                "buffer_ratio must be a non-negative number, got {}",
                self.buffer_ratio
            )));
        }
        let positive = [
            ("workday_hours", self.workday_hours),
            ("estimate_bottleneck_ratio", self.estimate_bottleneck_ratio),
            ("schedule_bottleneck_ratio", self.schedule_bottleneck_ratio),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(RoutingError::Config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = EngineConfig::default();
        assert_eq!(c.buffer_ratio, 0.2);
        assert_eq!(c.workday_hours, 8.0);
        assert_eq!(c.estimate_bottleneck_ratio, 1.2);
        assert_eq!(c.schedule_bottleneck_ratio, 1.3);
        assert_eq!(c.high_volume_threshold, 500);
        assert_eq!(c.batch_threshold, 200);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let c = EngineConfig::from_json_str(r#"{"buffer_ratio": 0.1, "batch_threshold": 50}"#)
            .unwrap();
        assert_eq!(c.buffer_ratio, 0.1);
        assert_eq!(c.batch_threshold, 50);
        assert_eq!(c.workday_hours, 8.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = EngineConfig::from_json_str(r#"{"workday_hours": 0}"#).unwrap_err();
        assert!(matches!(err, RoutingError::Config(msg) if msg.contains("workday_hours")));

        let err = EngineConfig::default().with_buffer_ratio(-0.5).validate();
        assert!(err.is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = EngineConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, RoutingError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_path("/nonexistent/u-routing.json").unwrap_err();
        assert!(matches!(err, RoutingError::Config(msg) if msg.contains("u-routing.json")));
    }
}
