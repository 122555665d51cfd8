//! Day-stepped compound projection with periodic contributions

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::cashflows::{PeriodRow, ProjectionResult};
use super::irr::{calculate_xirr, DatedCashflow};
use super::state::ProjectionState;
use crate::error::{EngineError, Result};
use crate::rates::{DAYS_PER_MONTH, DAYS_PER_YEAR};

/// Days between periodic contributions
pub const CONTRIBUTION_INTERVAL_DAYS: u32 = 30;

/// How the supplied rate is quoted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RateKind {
    /// TNA, converted as rate / 365
    NominalAnnual,
    /// TEM, converted as (1 + rate)^(1/30) - 1
    MonthlyEffective,
    /// TEA, converted as (1 + rate)^(1/365) - 1
    AnnualEffective,
}

impl RateKind {
    /// Equivalent daily rate for a decimal `rate`
    pub fn daily_rate(&self, rate: f64) -> f64 {
        match self {
            RateKind::NominalAnnual => rate / DAYS_PER_YEAR,
            RateKind::MonthlyEffective => (1.0 + rate).powf(1.0 / DAYS_PER_MONTH) - 1.0,
            RateKind::AnnualEffective => (1.0 + rate).powf(1.0 / DAYS_PER_YEAR) - 1.0,
        }
    }
}

/// Unit of the projection horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DurationUnit {
    Days,
    /// 30 days each
    Months,
    /// 365 days each
    Years,
}

impl DurationUnit {
    pub fn days_per_unit(&self) -> u32 {
        match self {
            DurationUnit::Days => 1,
            DurationUnit::Months => 30,
            DurationUnit::Years => 365,
        }
    }
}

/// Hypothetical parameters for a what-if projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    pub principal: f64,

    /// Rate in percentage points (42.0 for 42%)
    pub rate: f64,

    pub rate_kind: RateKind,

    pub duration: i64,

    pub duration_unit: DurationUnit,

    /// Added every 30 simulated days
    #[serde(default)]
    pub contribution: f64,
}

impl ProjectionInput {
    pub fn new(principal: f64, rate: f64, rate_kind: RateKind, duration: i64, duration_unit: DurationUnit) -> Self {
        Self {
            principal,
            rate,
            rate_kind,
            duration,
            duration_unit,
            contribution: 0.0,
        }
    }

    pub fn with_contribution(mut self, contribution: f64) -> Self {
        self.contribution = contribution;
        self
    }

    /// Horizon in simulated days; `None` when the duration is not positive
    pub fn total_days(&self) -> Option<u32> {
        if self.duration <= 0 {
            return None;
        }
        let days = self.duration.checked_mul(i64::from(self.duration_unit.days_per_unit()))?;
        u32::try_from(days).ok()
    }

    /// Check preconditions and return (days, daily rate)
    fn prepare(&self) -> Result<(u32, f64)> {
        let days = self.total_days().ok_or(EngineError::InvalidDuration)?;

        if !self.principal.is_finite() || self.principal < 0.0 {
            return Err(EngineError::invalid_input("principal must be a finite, non-negative number"));
        }
        if !self.contribution.is_finite() || self.contribution < 0.0 {
            return Err(EngineError::invalid_input("contribution must be a finite, non-negative number"));
        }
        if !self.rate.is_finite() {
            return Err(EngineError::invalid_input("rate must be a finite number"));
        }

        let rate = self.rate / 100.0;
        if self.rate_kind != RateKind::NominalAnnual && rate <= -1.0 {
            return Err(EngineError::invalid_input("effective rate must be greater than -100%"));
        }

        Ok((days, self.rate_kind.daily_rate(rate)))
    }
}

/// Configuration for a projection run
#[derive(Debug, Clone, Default)]
pub struct ProjectionConfig {
    /// Whether to record the per-period ledger
    pub detailed_output: bool,
}

/// Compound projection simulator
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Run a projection
    ///
    /// Capital compounds once per simulated day. Every 30th day the
    /// contribution is added after that day's interest, except on the final
    /// day, where a deposit would not accrue.
    pub fn project(&self, input: &ProjectionInput) -> Result<ProjectionResult> {
        let (total_days, daily_rate) = input.prepare().map_err(|e| {
            warn!("Projection rejected: {}", e);
            e
        })?;

        let mut state = ProjectionState::from_principal(input.principal);
        let mut flows: Vec<DatedCashflow> = vec![(0, -input.principal)];
        let mut periods = Vec::new();

        for day in 1..=total_days {
            state.advance_day(daily_rate);

            let period_end = day % CONTRIBUTION_INTERVAL_DAYS == 0;
            if period_end && day < total_days && input.contribution > 0.0 {
                state.contribute(input.contribution);
                flows.push((day, -input.contribution));
            }

            if self.config.detailed_output && (period_end || day == total_days) {
                periods.push(PeriodRow {
                    period: (day - 1) / CONTRIBUTION_INTERVAL_DAYS + 1,
                    end_day: day,
                    opening_capital: state.period_opening,
                    interest: state.period_interest(),
                    contribution: state.period_contribution,
                    closing_capital: state.capital,
                });
            }

            if period_end {
                state.close_period();
            }
        }

        let final_capital = state.capital;
        let total_invested = input.principal + state.contributions;
        let total_interest = final_capital - total_invested;
        let effective_return_pct = if total_invested > 0.0 {
            total_interest / total_invested * 100.0
        } else {
            0.0
        };

        flows.push((total_days, final_capital));

        let mut result = ProjectionResult {
            days: total_days,
            final_capital,
            total_interest,
            total_contributions: state.contributions,
            contribution_count: state.contribution_count,
            total_invested,
            effective_return_pct,
            money_weighted_return: calculate_xirr(&flows),
            periods: Vec::new(),
        };
        for row in periods {
            result.add_period(row);
        }

        debug!(
            "Projected {:.2} over {} days: final {:.2}, interest {:.2}, {} contributions",
            input.principal, total_days, final_capital, total_interest, state.contribution_count
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_thirty_days_nominal_annual() {
        let input = ProjectionInput::new(1_000_000.0, 42.0, RateKind::NominalAnnual, 30, DurationUnit::Days);
        let result = ProjectionEngine::default().project(&input).unwrap();

        let expected = 1_000_000.0 * (1.0 + 0.42 / 365.0_f64).powi(30);
        assert_abs_diff_eq!(result.final_capital, expected, epsilon = 0.01);
        assert_relative_eq!(result.total_interest, result.final_capital - 1_000_000.0, max_relative = 1e-12);
        assert_relative_eq!(result.effective_return_pct, result.total_interest / 1_000_000.0 * 100.0, max_relative = 1e-12);
        assert_eq!(result.total_contributions, 0.0);
        assert_eq!(result.total_invested, 1_000_000.0);
    }

    #[test]
    fn test_contribution_not_added_on_final_day() {
        let input = ProjectionInput::new(100_000.0, 40.0, RateKind::NominalAnnual, 60, DurationUnit::Days)
            .with_contribution(10_000.0);
        let result = ProjectionEngine::default().project(&input).unwrap();

        assert_eq!(result.contribution_count, 1);
        assert_eq!(result.total_contributions, 10_000.0);
        assert_eq!(result.total_invested, 110_000.0);

        let daily = 0.40 / 365.0;
        let expected = (100_000.0 * (1.0_f64 + daily).powi(30) + 10_000.0) * (1.0_f64 + daily).powi(30);
        assert_relative_eq!(result.final_capital, expected, max_relative = 1e-10);
    }

    #[test]
    fn test_contribution_added_mid_stream() {
        // Day 60 is before the final day 61
        let input = ProjectionInput::new(100_000.0, 40.0, RateKind::NominalAnnual, 61, DurationUnit::Days)
            .with_contribution(10_000.0);
        let result = ProjectionEngine::default().project(&input).unwrap();
        assert_eq!(result.contribution_count, 2);
        assert_eq!(result.total_invested, 120_000.0);
    }

    #[test]
    fn test_monthly_effective_rate_compounds_to_tem() {
        let input = ProjectionInput::new(1_000.0, 3.0, RateKind::MonthlyEffective, 1, DurationUnit::Months);
        let result = ProjectionEngine::default().project(&input).unwrap();
        assert_eq!(result.days, 30);
        assert_relative_eq!(result.final_capital, 1_030.0, max_relative = 1e-10);
    }

    #[test]
    fn test_annual_effective_rate_compounds_to_tea() {
        let input = ProjectionInput::new(1_000.0, 50.0, RateKind::AnnualEffective, 1, DurationUnit::Years);
        let result = ProjectionEngine::default().project(&input).unwrap();
        assert_eq!(result.days, 365);
        assert_relative_eq!(result.final_capital, 1_500.0, max_relative = 1e-10);
        assert_relative_eq!(result.money_weighted_return.unwrap(), 0.5, max_relative = 1e-8);
    }

    #[test]
    fn test_zero_or_negative_duration_has_no_result() {
        let engine = ProjectionEngine::default();
        for duration in [0, -3] {
            let input = ProjectionInput::new(1_000.0, 40.0, RateKind::NominalAnnual, duration, DurationUnit::Months);
            assert!(matches!(engine.project(&input), Err(EngineError::InvalidDuration)));
        }
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let engine = ProjectionEngine::default();
        let base = ProjectionInput::new(1_000.0, 40.0, RateKind::NominalAnnual, 30, DurationUnit::Days);

        let mut input = base.clone();
        input.rate = f64::NAN;
        assert!(engine.project(&input).is_err());

        let mut input = base.clone();
        input.principal = -1.0;
        assert!(engine.project(&input).is_err());

        let mut input = base.clone();
        input.rate_kind = RateKind::MonthlyEffective;
        input.rate = -150.0;
        assert!(engine.project(&input).is_err());
    }

    #[test]
    fn test_zero_rate_keeps_capital() {
        let input = ProjectionInput::new(5_000.0, 0.0, RateKind::NominalAnnual, 3, DurationUnit::Months)
            .with_contribution(500.0);
        let result = ProjectionEngine::default().project(&input).unwrap();
        assert_eq!(result.contribution_count, 2);
        assert_eq!(result.final_capital, 6_000.0);
        assert_eq!(result.total_interest, 0.0);
        assert_eq!(result.effective_return_pct, 0.0);
    }

    #[test]
    fn test_zero_principal_and_no_contribution() {
        let input = ProjectionInput::new(0.0, 40.0, RateKind::NominalAnnual, 30, DurationUnit::Days);
        let result = ProjectionEngine::default().project(&input).unwrap();
        assert_eq!(result.final_capital, 0.0);
        assert_eq!(result.effective_return_pct, 0.0);
    }

    #[test]
    fn test_detailed_periods_reconcile() {
        let engine = ProjectionEngine::new(ProjectionConfig { detailed_output: true });
        let input = ProjectionInput::new(100_000.0, 45.0, RateKind::NominalAnnual, 75, DurationUnit::Days)
            .with_contribution(5_000.0);
        let result = engine.project(&input).unwrap();

        assert_eq!(result.periods.len(), 3);
        assert_eq!(result.periods[0].end_day, 30);
        assert_eq!(result.periods[1].end_day, 60);
        assert_eq!(result.periods[2].end_day, 75);
        assert_eq!(result.periods[2].period, 3);
        assert_eq!(result.periods[2].contribution, 0.0);

        for row in &result.periods {
            assert_relative_eq!(
                row.closing_capital,
                row.opening_capital + row.interest + row.contribution,
                max_relative = 1e-12
            );
        }
        for pair in result.periods.windows(2) {
            assert_eq!(pair[0].closing_capital, pair[1].opening_capital);
        }
        assert_eq!(result.periods.last().unwrap().closing_capital, result.final_capital);

        let interest: f64 = result.periods.iter().map(|r| r.interest).sum();
        assert_relative_eq!(interest, result.total_interest, max_relative = 1e-9);
    }

    #[test]
    fn test_periods_empty_without_detail() {
        let input = ProjectionInput::new(1_000.0, 40.0, RateKind::NominalAnnual, 90, DurationUnit::Days);
        assert!(ProjectionEngine::default().project(&input).unwrap().periods.is_empty());
    }
}
