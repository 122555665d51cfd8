//! Compound projection simulator for what-if scenarios

mod state;
mod engine;
mod cashflows;
mod irr;

pub use state::ProjectionState;
pub use engine::{
    DurationUnit, ProjectionConfig, ProjectionEngine, ProjectionInput, RateKind, CONTRIBUTION_INTERVAL_DAYS,
};
pub use cashflows::{PeriodRow, ProjectionResult, ProjectionSummary};
pub use irr::{calculate_xirr, DatedCashflow};
