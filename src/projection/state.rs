//! Running state of a compound projection

/// Capital and running totals at a point in the simulation
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Simulated day (1-indexed once the loop starts)
    pub day: u32,

    /// Current capital
    pub capital: f64,

    /// Sum of periodic contributions added so far
    pub contributions: f64,

    /// Number of contributions added so far
    pub contribution_count: u32,

    /// Capital at the start of the current 30-day period
    pub period_opening: f64,

    /// Contribution added in the current period
    pub period_contribution: f64,
}

impl ProjectionState {
    /// Initialize from the starting principal
    pub fn from_principal(principal: f64) -> Self {
        Self {
            day: 0,
            capital: principal,
            contributions: 0.0,
            contribution_count: 0,
            period_opening: principal,
            period_contribution: 0.0,
        }
    }

    /// Advance one day, compounding at `daily_rate`
    pub fn advance_day(&mut self, daily_rate: f64) {
        self.day += 1;
        self.capital *= 1.0 + daily_rate;
    }

    /// Add a periodic contribution at the end of the current day
    pub fn contribute(&mut self, amount: f64) {
        self.capital += amount;
        self.contributions += amount;
        self.contribution_count += 1;
        self.period_contribution += amount;
    }

    /// Interest earned so far in the current period
    pub fn period_interest(&self) -> f64 {
        self.capital - self.period_opening - self.period_contribution
    }

    /// Start a new period from the current capital
    pub fn close_period(&mut self) {
        self.period_opening = self.capital;
        self.period_contribution = 0.0;
    }
}
