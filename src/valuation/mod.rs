//! Maturity valuation: estimate shape and the local engine

mod engine;
mod estimate;

pub use engine::{Valuation, ValuationEngine, ValuationRule};
pub use estimate::{
    MaturityDate, MaturityEstimate, Provenance, RateFigure, DISPLAY_DATE_FORMAT, NOT_APPLICABLE_LABEL,
    NO_MATURITY_LABEL,
};
