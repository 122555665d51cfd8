//! Projection output structures

use serde::{Deserialize, Serialize};

/// One 30-day period of a projection (the last period may be shorter)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRow {
    /// Period number (1-indexed)
    pub period: u32,
    /// Last simulated day in the period
    pub end_day: u32,
    pub opening_capital: f64,
    pub interest: f64,
    pub contribution: f64,
    pub closing_capital: f64,
}

/// Outcome of a compound projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Simulated day count
    pub days: u32,

    pub final_capital: f64,

    /// final capital - total invested
    pub total_interest: f64,

    /// Sum of periodic contributions actually added
    pub total_contributions: f64,

    pub contribution_count: u32,

    /// principal + contributions
    pub total_invested: f64,

    /// interest / total invested * 100
    pub effective_return_pct: f64,

    /// Annualized money-weighted return of the cashflow schedule (decimal)
    pub money_weighted_return: Option<f64>,

    /// Per-period ledger, filled only when detailed output is requested
    pub periods: Vec<PeriodRow>,
}

impl ProjectionResult {
    pub fn add_period(&mut self, row: PeriodRow) {
        self.periods.push(row);
    }

    /// Summary lines for display
    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary {
            days: self.days,
            final_capital: self.final_capital,
            total_interest: self.total_interest,
            total_invested: self.total_invested,
            effective_return_pct: self.effective_return_pct,
        }
    }
}

/// Compact view of a projection result
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionSummary {
    pub days: u32,
    pub final_capital: f64,
    pub total_interest: f64,
    pub total_invested: f64,
    pub effective_return_pct: f64,
}
