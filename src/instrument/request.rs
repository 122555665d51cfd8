//! Quote requests and their validation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::InstrumentCategory;
use crate::error::{EngineError, Result};

/// Raw inputs describing a position to value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentQuoteRequest {
    pub category: InstrumentCategory,

    pub ticker: String,

    /// Purchase price per 100 face-value units
    pub price: f64,

    /// Invested amount in pesos
    pub amount: f64,

    pub purchase_date: NaiveDate,

    /// Market TNA in percentage points (43.8 for 43.8%)
    pub market_tna: Option<f64>,
}

impl InstrumentQuoteRequest {
    pub fn new(
        category: InstrumentCategory,
        ticker: impl Into<String>,
        price: f64,
        amount: f64,
        purchase_date: NaiveDate,
    ) -> Self {
        Self {
            category,
            ticker: ticker.into(),
            price,
            amount,
            purchase_date,
            market_tna: None,
        }
    }

    pub fn with_market_tna(mut self, tna: f64) -> Self {
        self.market_tna = Some(tna);
        self
    }

    /// Check every precondition the valuation formulas depend on
    pub fn validate(self) -> Result<ValidatedQuote> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(EngineError::invalid_input(format!(
                "amount must be a finite, non-negative number (got {})",
                self.amount
            )));
        }

        if !self.price.is_finite() || self.price < 0.0 {
            return Err(EngineError::invalid_input(format!(
                "price must be a finite, non-negative number (got {})",
                self.price
            )));
        }

        if self.price == 0.0 && self.amount > 0.0 {
            return Err(EngineError::invalid_input("price must be greater than zero when an amount is invested"));
        }

        if let Some(tna) = self.market_tna {
            if !tna.is_finite() || tna < 0.0 {
                return Err(EngineError::invalid_input(format!(
                    "market TNA must be a finite, non-negative percentage (got {})",
                    tna
                )));
            }
        }

        Ok(ValidatedQuote { request: self })
    }
}

/// A request whose inputs are known to be safe for every valuation formula
///
/// Only obtainable through [`InstrumentQuoteRequest::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedQuote {
    request: InstrumentQuoteRequest,
}

impl ValidatedQuote {
    pub fn request(&self) -> &InstrumentQuoteRequest {
        &self.request
    }

    pub fn category(&self) -> InstrumentCategory {
        self.request.category
    }

    pub fn ticker(&self) -> &str {
        &self.request.ticker
    }

    pub fn price(&self) -> f64 {
        self.request.price
    }

    pub fn amount(&self) -> f64 {
        self.request.amount
    }

    pub fn purchase_date(&self) -> NaiveDate {
        self.request.purchase_date
    }

    /// Market TNA as a decimal fraction
    pub fn market_tna_fraction(&self) -> Option<f64> {
        self.request.market_tna.map(|pct| pct / 100.0)
    }

    /// Face-value units purchased: amount / price * 100
    ///
    /// `None` only when nothing was invested at a zero price.
    pub fn nominal_quantity(&self) -> Option<f64> {
        if self.request.price > 0.0 {
            Some(self.request.amount / self.request.price * 100.0)
        } else {
            None
        }
    }

    pub fn into_inner(self) -> InstrumentQuoteRequest {
        self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn request(price: f64, amount: f64) -> InstrumentQuoteRequest {
        InstrumentQuoteRequest::new(
            InstrumentCategory::ShortTermNote,
            "S30A6",
            price,
            amount,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_nominal_quantity() {
        let quote = request(108.10, 1_000_000.0).validate().unwrap();
        assert_relative_eq!(quote.nominal_quantity().unwrap(), 925_069.380_203_515_4, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_price_with_amount_rejected() {
        let err = request(0.0, 1_000.0).validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn test_zero_price_and_zero_amount_has_no_nominals() {
        let quote = request(0.0, 0.0).validate().unwrap();
        assert_eq!(quote.nominal_quantity(), None);
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        assert!(request(f64::NAN, 1_000.0).validate().is_err());
        assert!(request(100.0, f64::INFINITY).validate().is_err());
        assert!(request(-1.0, 1_000.0).validate().is_err());
        assert!(request(100.0, -1.0).validate().is_err());
        assert!(request(100.0, 1_000.0).with_market_tna(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_negative_market_tna_rejected() {
        let err = request(100.0, 1_000_000.0).with_market_tna(-10.0).validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
        assert!(request(100.0, 1_000.0).with_market_tna(0.0).validate().is_ok());
    }

    #[test]
    fn test_market_tna_fraction() {
        let quote = request(100.0, 1_000.0).with_market_tna(43.8).validate().unwrap();
        assert_relative_eq!(quote.market_tna_fraction().unwrap(), 0.438, max_relative = 1e-12);
    }
}
