//! Scenario runner for what-if projections
//!
//! Holds a base projection input and re-runs it with rate or contribution
//! overrides. Scenarios are independent, so sweeps run in parallel; results
//! come back in the order the overrides were given.

use rayon::prelude::*;

use crate::error::Result;
use crate::portfolio::InvestmentRecord;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionInput, ProjectionResult};

/// Pre-configured runner for batches of projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(base_input);
/// for result in runner.run_rate_sweep(&[35.0, 40.0, 45.0]) {
///     println!("{:.2}", result?.final_capital);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base: ProjectionInput,
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    pub fn new(base: ProjectionInput) -> Self {
        Self::with_config(base, ProjectionConfig::default())
    }

    pub fn with_config(base: ProjectionInput, config: ProjectionConfig) -> Self {
        Self {
            base,
            engine: ProjectionEngine::new(config),
        }
    }

    /// Runner seeded from a stored investment (None without TNA or maturity)
    pub fn from_record(record: &InvestmentRecord) -> Option<Self> {
        record.projection_seed().map(Self::new)
    }

    pub fn base(&self) -> &ProjectionInput {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut ProjectionInput {
        &mut self.base
    }

    /// Project the base input as-is
    pub fn run(&self) -> Result<ProjectionResult> {
        self.engine.project(&self.base)
    }

    /// One projection per rate (percent), everything else from the base
    pub fn run_rate_sweep(&self, rates: &[f64]) -> Vec<Result<ProjectionResult>> {
        rates
            .par_iter()
            .map(|&rate| {
                let input = ProjectionInput { rate, ..self.base.clone() };
                self.engine.project(&input)
            })
            .collect()
    }

    /// One projection per periodic contribution, everything else from the base
    pub fn run_contribution_sweep(&self, contributions: &[f64]) -> Vec<Result<ProjectionResult>> {
        contributions
            .par_iter()
            .map(|&contribution| {
                let input = ProjectionInput { contribution, ..self.base.clone() };
                self.engine.project(&input)
            })
            .collect()
    }

    /// Project arbitrary inputs with this runner's configuration
    pub fn run_scenarios(&self, inputs: &[ProjectionInput]) -> Vec<Result<ProjectionResult>> {
        inputs.par_iter().map(|input| self.engine.project(input)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::projection::{DurationUnit, RateKind};

    fn base_input() -> ProjectionInput {
        ProjectionInput::new(500_000.0, 40.0, RateKind::NominalAnnual, 6, DurationUnit::Months)
    }

    #[test]
    fn test_rate_sweep_preserves_order() {
        let runner = ScenarioRunner::new(base_input());
        let rates = [30.0, 50.0, 40.0];
        let results: Vec<_> = runner
            .run_rate_sweep(&rates)
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(results.len(), 3);
        assert!(results[1].final_capital > results[2].final_capital);
        assert!(results[2].final_capital > results[0].final_capital);
        assert_eq!(results[2].final_capital, runner.run().unwrap().final_capital);
    }

    #[test]
    fn test_contribution_sweep() {
        let runner = ScenarioRunner::new(base_input());
        let results = runner.run_contribution_sweep(&[0.0, 10_000.0]);

        let none = results[0].as_ref().unwrap();
        let monthly = results[1].as_ref().unwrap();
        assert_eq!(none.contribution_count, 0);
        // 180 days: contributions on days 30..150
        assert_eq!(monthly.contribution_count, 5);
        assert_eq!(monthly.total_invested, 550_000.0);
    }

    #[test]
    fn test_invalid_scenario_does_not_abort_batch() {
        let runner = ScenarioRunner::with_config(base_input(), ProjectionConfig { detailed_output: true });
        let mut bad = base_input();
        bad.duration = 0;

        let results = runner.run_scenarios(&[base_input(), bad]);
        assert_eq!(results[0].as_ref().unwrap().periods.len(), 6);
        assert!(matches!(results[1], Err(EngineError::InvalidDuration)));
    }
}
