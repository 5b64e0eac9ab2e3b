pub mod parameters;
pub mod review;
pub mod urgency;

pub use parameters::{ParameterResolver, ResolvedParameters};
pub use review::{ReviewError, ReviewService};
pub use urgency::{classify, dashboard_items, due_items, DashboardItem, DueSummary, ReviewUrgency};
