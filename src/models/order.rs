//! Order context: the order characteristics a route is chosen for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PrintMethod;
use crate::error::{RoutingError, RoutingResult};

/// Input describing the order to be routed.
///
/// Transient: built per request by the order-intake workflow and never
/// stored by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderContext {
    /// Product type, e.g. "T-Shirt" or "Hoodie".
    pub product_type: String,
    /// Requested print method.
    pub method: PrintMethod,
    /// Units ordered. Must be positive.
    pub quantity: u32,
    /// Date the client expects delivery.
    pub target_delivery_date: DateTime<Utc>,
    pub brand_id: Option<String>,
    /// Rush/priority order.
    #[serde(default)]
    pub priority_flag: bool,
}

impl OrderContext {
    /// Creates an order context.
    pub fn new(
        product_type: impl Into<String>,
        method: PrintMethod,
        quantity: u32,
        target_delivery_date: DateTime<Utc>,
    ) -> Self {
        Self {
            product_type: product_type.into(),
            method,
            quantity,
            target_delivery_date,
            brand_id: None,
            priority_flag: false,
        }
    }

    /// Sets the brand.
    pub fn with_brand(mut self, brand_id: impl Into<String>) -> Self {
        self.brand_id = Some(brand_id.into());
        self
    }

    /// Marks the order as a priority order.
    pub fn with_priority(mut self) -> Self {
        self.priority_flag = true;
        self
    }

    /// Rejects contexts the engine cannot route.
    ///
    /// Quantity must be positive and the product type non-blank.
    pub fn validate(&self) -> RoutingResult<()> {
        if self.quantity == 0 {
            return Err(RoutingError::InvalidOrder(
                "order quantity must be greater than zero".to_string(),
            ));
        }
        if self.product_type.trim().is_empty() {
            return Err(RoutingError::InvalidOrder(
                "order product type must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
