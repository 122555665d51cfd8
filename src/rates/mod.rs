//! Day-count and rate conversion primitives

mod conversion;
mod days;
mod percent;

pub use conversion::{project_maturity_value, total_return, YieldMetrics, DAYS_PER_MONTH, DAYS_PER_YEAR};
pub use days::{day_span, MIN_DAY_SPAN};
pub use percent::{format_percentage, parse_percentage, parse_rate_fraction};
