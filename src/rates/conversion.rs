//! Conversions between a holding-period return and the standard rate quotations
//!
//! All rates here are decimal fractions (0.438 for 43.8%).
//!
//! Forward: (amount, maturity value, days) -> TEM, TNA, TAE, TIR
//! Reverse: (amount, days, TNA) -> maturity value, simple proration

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

pub const DAYS_PER_YEAR: f64 = 365.0;
pub const DAYS_PER_MONTH: f64 = 30.0;

/// The four rate quotations derived from a single holding-period return
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldMetrics {
    /// TEM: (1 + r)^(30/days) - 1
    pub monthly_effective: f64,
    /// TNA: r * 365/days
    pub annual_nominal: f64,
    /// TAE: (1 + TEM)^12 - 1
    pub annual_effective: f64,
    /// TIR, equal to TAE under the single in/out cashflow assumption
    pub internal_rate_of_return: f64,
}

/// Total holding-period return (maturity_value - amount) / amount
pub fn total_return(amount: f64, maturity_value: f64) -> Result<f64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(EngineError::invalid_input("invested amount must be positive to derive rates"));
    }
    if !maturity_value.is_finite() || maturity_value < 0.0 {
        return Err(EngineError::invalid_input("maturity value must be a finite, non-negative number"));
    }
    Ok((maturity_value - amount) / amount)
}

impl YieldMetrics {
    /// Derive all four quotations from a known accrual over `days`
    pub fn from_accrual(amount: f64, maturity_value: f64, days: u32) -> Result<Self> {
        let total = total_return(amount, maturity_value)?;
        Ok(Self::from_total_return(total, days))
    }

    /// Derive the quotations from a total return; `days` is clamped to at least one
    pub fn from_total_return(total_return: f64, days: u32) -> Self {
        let days = f64::from(days.max(1));

        let monthly_effective = (1.0 + total_return).powf(DAYS_PER_MONTH / days) - 1.0;
        let annual_nominal = total_return * (DAYS_PER_YEAR / days);
        let annual_effective = (1.0 + monthly_effective).powi(12) - 1.0;

        Self {
            monthly_effective,
            annual_nominal,
            annual_effective,
            internal_rate_of_return: annual_effective,
        }
    }
}

/// Maturity value from a known annual nominal rate, prorated without compounding
///
/// `amount * (1 + tna * days / 365)`
pub fn project_maturity_value(amount: f64, days: u32, annual_nominal_rate: f64) -> f64 {
    amount * (1.0 + annual_nominal_rate * f64::from(days) / DAYS_PER_YEAR)
}
