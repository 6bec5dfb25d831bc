//! Routing domain models.
//!
//! Provides the data types the engine reasons about: routing templates and
//! their steps, the order context a route is picked for, and the schedule
//! and estimate results handed back to callers.
//!
//! # Domain Mappings
//!
//! | u-routing | Shop floor |
//! |-----------|------------|
//! | RoutingTemplate | Production route for one print method |
//! | RoutingStep | Operation (cut, print, sew, pack, ...) |
//! | Department | Work area performing the operation |
//! | RoutingSchedule | Timed production plan for one order |

mod order;
mod result;
mod schedule;
mod step;
mod template;

pub use order::OrderContext;
pub use result::{AdvancedCriticalPathResult, CriticalPathResult};
pub use schedule::{ResourceConflict, RoutingSchedule, ScheduledStep};
pub use step::{Department, JoinType, RoutingStep};
pub use template::{ComplexityTier, PrintMethod, RecommendationTier, RoutingTemplate};
