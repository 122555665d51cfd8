//! Dashboard and report metrics over a user's records

use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use super::records::{InvestmentRecord, WithdrawalRecord};

/// Look-ahead window for upcoming maturities
pub const UPCOMING_WINDOW_DAYS: u64 = 30;

/// Aggregate figures for one portfolio
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    /// Sum of invested amounts
    pub total_capital: f64,
    pub total_withdrawals: f64,
    /// total capital - total withdrawals
    pub net_capital: f64,
    /// Sum of (maturity value - amount) over positions with a maturity value
    pub estimated_gain: f64,
    /// Amount-weighted TAE in percentage points
    pub weighted_tae: f64,
    pub upcoming_maturities: Vec<UpcomingMaturity>,
    pub distribution: Vec<CategoryShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingMaturity {
    pub id: String,
    pub ticker: String,
    pub category: String,
    pub maturity: NaiveDate,
    pub amount: f64,
    pub maturity_value: Option<f64>,
}

/// Capital held in one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    /// Fraction of total capital (0..=1)
    pub share: f64,
}

impl PortfolioSummary {
    pub fn compute(investments: &[InvestmentRecord], withdrawals: &[WithdrawalRecord], today: NaiveDate) -> Self {
        let total_capital: f64 = investments.iter().map(|inv| inv.amount).sum();
        let total_withdrawals: f64 = withdrawals.iter().map(|w| w.amount).sum();

        let estimated_gain = investments
            .iter()
            .filter_map(|inv| inv.maturity_value.map(|mv| mv - inv.amount))
            .sum();

        let weighted_tae = if total_capital > 0.0 {
            let weighted: f64 = investments
                .iter()
                .filter(|inv| inv.amount != 0.0)
                .filter_map(|inv| inv.tae_percent().map(|tae| tae * inv.amount))
                .sum();
            weighted / total_capital
        } else {
            0.0
        };

        Self {
            total_capital,
            total_withdrawals,
            net_capital: total_capital - total_withdrawals,
            estimated_gain,
            weighted_tae,
            upcoming_maturities: upcoming_maturities(investments, today),
            distribution: distribution(investments, total_capital),
        }
    }
}

/// Positions maturing within `[today, today + 30 days]`, soonest first
pub fn upcoming_maturities(investments: &[InvestmentRecord], today: NaiveDate) -> Vec<UpcomingMaturity> {
    let horizon = today.checked_add_days(Days::new(UPCOMING_WINDOW_DAYS)).unwrap_or(NaiveDate::MAX);

    let mut upcoming: Vec<UpcomingMaturity> = investments
        .iter()
        .filter_map(|inv| {
            let maturity = inv.maturity()?;
            (today..=horizon).contains(&maturity).then(|| UpcomingMaturity {
                id: inv.id.clone(),
                ticker: inv.ticker.clone(),
                category: inv.category.clone(),
                maturity,
                amount: inv.amount,
                maturity_value: inv.maturity_value,
            })
        })
        .collect();

    upcoming.sort_by_key(|u| u.maturity);
    upcoming
}

/// Capital per category label, largest first
pub fn distribution(investments: &[InvestmentRecord], total_capital: f64) -> Vec<CategoryShare> {
    let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
    for inv in investments {
        *by_category.entry(inv.category.as_str()).or_insert(0.0) += inv.amount;
    }

    let mut shares: Vec<CategoryShare> = by_category
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            category: category.to_string(),
            amount,
            share: if total_capital > 0.0 { amount / total_capital } else { 0.0 },
        })
        .collect();

    shares.sort_by(|a, b| b.amount.total_cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
    shares
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Investment,
    Withdrawal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementFilter {
    #[default]
    All,
    Investments,
    Withdrawals,
}

impl MovementFilter {
    fn accepts(&self, kind: MovementKind) -> bool {
        match self {
            MovementFilter::All => true,
            MovementFilter::Investments => kind == MovementKind::Investment,
            MovementFilter::Withdrawals => kind == MovementKind::Withdrawal,
        }
    }
}

/// One line of the movements timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movement {
    pub id: String,
    pub date: NaiveDate,
    pub kind: MovementKind,
    pub amount: f64,
    pub title: String,
    pub subtitle: String,
}

impl Movement {
    fn from_investment(inv: &InvestmentRecord) -> Self {
        let title = if inv.ticker.is_empty() {
            inv.category.clone()
        } else {
            format!("{} - {}", inv.category, inv.ticker)
        };
        let subtitle = match (inv.broker.is_empty(), inv.tae.as_deref()) {
            (false, Some(tae)) => format!("{} • TAE: {}", inv.broker, tae),
            (false, None) => inv.broker.clone(),
            (true, Some(tae)) => format!("TAE: {}", tae),
            (true, None) => "Inversión registrada".to_string(),
        };

        Self {
            id: inv.id.clone(),
            date: inv.date,
            kind: MovementKind::Investment,
            amount: inv.amount,
            title,
            subtitle,
        }
    }

    fn from_withdrawal(w: &WithdrawalRecord) -> Self {
        Self {
            id: w.id.clone(),
            date: w.date,
            kind: MovementKind::Withdrawal,
            amount: w.amount,
            title: "Retiro de fondos".to_string(),
            subtitle: w
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "Sin descripción".to_string()),
        }
    }
}

/// Investments and withdrawals merged, newest first
pub fn movements(
    investments: &[InvestmentRecord],
    withdrawals: &[WithdrawalRecord],
    filter: MovementFilter,
) -> Vec<Movement> {
    let mut timeline: Vec<Movement> = investments
        .iter()
        .map(Movement::from_investment)
        .chain(withdrawals.iter().map(Movement::from_withdrawal))
        .filter(|m| filter.accepts(m.kind))
        .collect();

    // Stable sort keeps insertion order within a day
    timeline.sort_by(|a, b| b.date.cmp(&a.date));
    timeline
}
