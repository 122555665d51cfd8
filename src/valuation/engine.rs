//! Deterministic maturity valuation per instrument category

use chrono::Days;
use log::{debug, warn};

use super::estimate::{MaturityDate, MaturityEstimate, Provenance, RateFigure};
use crate::config::{EngineConfig, NoteFallback};
use crate::instrument::{resolve_ticker_maturity, InstrumentCategory, ValidatedQuote};
use crate::rates::{day_span, project_maturity_value, YieldMetrics};

/// How the maturity value of a dated position was obtained
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValuationRule {
    /// Nominals redeem 1:1 at maturity
    ParRedemption,
    /// Simple proration at this TNA (decimal fraction)
    Accrual { annual_nominal_rate: f64 },
    /// No gain: maturity value equals the invested amount
    Flat,
}

/// Intermediate valuation before rates and explanation are attached
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Valuation {
    pub maturity_date: MaturityDate,
    pub maturity_value: f64,
    pub rule: ValuationRule,
    /// Days from purchase to maturity, present only for dated positions
    pub days: Option<u32>,
}

/// Local valuation engine
///
/// Every branch is a pure function of the validated quote and the configured
/// policy, so repeated calls with the same input give identical output.
#[derive(Debug, Clone, Default)]
pub struct ValuationEngine {
    config: EngineConfig,
}

impl ValuationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Produce the full estimate for a quote
    pub fn estimate(&self, quote: &ValidatedQuote) -> MaturityEstimate {
        let valuation = self.value(quote);
        let nominal_quantity = quote.nominal_quantity();

        let mut estimate = MaturityEstimate {
            maturity_date: valuation.maturity_date,
            maturity_value: valuation.maturity_value,
            nominal_quantity,
            tem: RateFigure::NOT_APPLICABLE,
            tna: RateFigure::NOT_APPLICABLE,
            tae: RateFigure::NOT_APPLICABLE,
            tir: RateFigure::NOT_APPLICABLE,
            explanation: String::new(),
            provenance: Provenance::LocalEngine,
        };

        // Rates come from (amount, value, days) whichever rule set the value
        let metrics = match valuation.days {
            Some(days) if quote.amount() > 0.0 => {
                match YieldMetrics::from_accrual(quote.amount(), valuation.maturity_value, days) {
                    Ok(metrics) => Some(metrics),
                    Err(e) => {
                        warn!("Rates not derivable for {}: {}", quote.ticker(), e);
                        None
                    }
                }
            }
            _ => None,
        };

        if let Some(metrics) = &metrics {
            estimate = estimate.with_metrics(metrics);
        }

        estimate.explanation = explain(quote, &valuation, nominal_quantity, metrics.is_some());

        debug!(
            "Valued {} {} ({:?}): maturity {} value {:.2}",
            quote.category(),
            quote.ticker(),
            valuation.rule,
            valuation.maturity_date,
            valuation.maturity_value
        );

        estimate
    }

    /// Decide maturity date and value for the quote's category
    pub fn value(&self, quote: &ValidatedQuote) -> Valuation {
        let amount = quote.amount();

        match quote.category() {
            InstrumentCategory::ShortTermNote | InstrumentCategory::Bond => {
                let Some(maturity) = resolve_ticker_maturity(quote.ticker()) else {
                    return Valuation {
                        maturity_date: MaturityDate::Unresolved,
                        maturity_value: amount,
                        rule: ValuationRule::Flat,
                        days: None,
                    };
                };

                let days = day_span(quote.purchase_date(), maturity);
                let rule = match (quote.market_tna_fraction(), self.config.note_fallback) {
                    (Some(rate), _) => ValuationRule::Accrual { annual_nominal_rate: rate },
                    (None, NoteFallback::Par) => ValuationRule::ParRedemption,
                    (None, NoteFallback::AssumedRate) => ValuationRule::Accrual {
                        annual_nominal_rate: self.config.default_note_tna / 100.0,
                    },
                };

                let maturity_value = match rule {
                    ValuationRule::ParRedemption => quote.nominal_quantity().unwrap_or(amount),
                    ValuationRule::Accrual { annual_nominal_rate } => {
                        project_maturity_value(amount, days, annual_nominal_rate)
                    }
                    ValuationRule::Flat => amount,
                };

                Valuation {
                    maturity_date: MaturityDate::On(maturity),
                    maturity_value,
                    rule,
                    days: Some(days),
                }
            }

            InstrumentCategory::FixedDeposit | InstrumentCategory::CollateralizedLoan => {
                let tenor = self.tenor_days(quote);
                let Some(maturity) = quote.purchase_date().checked_add_days(Days::new(u64::from(tenor))) else {
                    return Valuation {
                        maturity_date: MaturityDate::Unresolved,
                        maturity_value: amount,
                        rule: ValuationRule::Flat,
                        days: None,
                    };
                };

                let days = day_span(quote.purchase_date(), maturity);
                let annual_nominal_rate = quote
                    .market_tna_fraction()
                    .unwrap_or_else(|| self.default_tna(quote.category()) / 100.0);

                Valuation {
                    maturity_date: MaturityDate::On(maturity),
                    maturity_value: project_maturity_value(amount, days, annual_nominal_rate),
                    rule: ValuationRule::Accrual { annual_nominal_rate },
                    days: Some(days),
                }
            }

            InstrumentCategory::Other => Valuation {
                maturity_date: MaturityDate::NoMaturity,
                maturity_value: amount,
                rule: ValuationRule::Flat,
                days: None,
            },
        }
    }

    /// Fixed tenor for date-based categories
    pub fn tenor_days(&self, quote: &ValidatedQuote) -> u32 {
        match quote.category() {
            InstrumentCategory::FixedDeposit => {
                if quote.ticker().eq_ignore_ascii_case(&self.config.inflation_indexed_ticker) {
                    self.config.inflation_indexed_tenor_days
                } else {
                    self.config.standard_tenor_days
                }
            }
            InstrumentCategory::CollateralizedLoan => self.config.overnight_tenor_days,
            InstrumentCategory::ShortTermNote | InstrumentCategory::Bond | InstrumentCategory::Other => {
                self.config.standard_tenor_days
            }
        }
    }

    fn default_tna(&self, category: InstrumentCategory) -> f64 {
        match category {
            InstrumentCategory::CollateralizedLoan => self.config.collateralized_loan_tna,
            InstrumentCategory::FixedDeposit => self.config.fixed_deposit_tna,
            InstrumentCategory::ShortTermNote | InstrumentCategory::Bond | InstrumentCategory::Other => {
                self.config.default_note_tna
            }
        }
    }
}

/// Spanish summary of the valuation for the user
fn explain(quote: &ValidatedQuote, valuation: &Valuation, nominals: Option<f64>, has_rates: bool) -> String {
    match (valuation.maturity_date, valuation.days) {
        (MaturityDate::On(_), Some(days)) if has_rates => {
            let gain = valuation.maturity_value - quote.amount();
            let total_pct = gain / quote.amount() * 100.0;
            format!(
                "Compraste {:.2} nominales de {} a ${} cada 100 VN. En {} días (vto. {}) recibirás ${:.2}, \
                 ganando ${:.2} ({:.2}% total). Cálculo local.",
                nominals.unwrap_or(0.0),
                quote.ticker(),
                quote.price(),
                days,
                valuation.maturity_date,
                valuation.maturity_value,
                gain,
                total_pct,
            )
        }
        (MaturityDate::On(_), _) => {
            let reason = if quote.amount() > 0.0 {
                "Métricas no disponibles para el valor calculado."
            } else {
                "Métricas no disponibles sin monto invertido."
            };
            format!(
                "Inversión de ${} en {} ({}). Vencimiento {}. {}",
                quote.amount(),
                quote.ticker(),
                quote.category().label(),
                valuation.maturity_date,
                reason,
            )
        }
        _ => format!(
            "Inversión de ${} en {} ({}). Sin vencimiento definido. Métricas calculadas localmente.",
            quote.amount(),
            quote.ticker(),
            quote.category().label(),
        ),
    }
}
