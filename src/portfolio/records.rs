//! Persisted investment and withdrawal records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::instrument::ValidatedQuote;
use crate::projection::{DurationUnit, ProjectionInput, RateKind};
use crate::rates::{day_span, parse_percentage};
use crate::valuation::{MaturityDate, MaturityEstimate};

/// A position as stored for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRecord {
    /// Assigned by the store on save
    #[serde(default)]
    pub id: String,

    pub date: NaiveDate,

    pub amount: f64,

    #[serde(default)]
    pub ticker: String,

    #[serde(default)]
    pub broker: String,

    /// Category label as shown in the app ("Lecaps", "Plazo Fijo", ...)
    #[serde(rename = "type")]
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nominals: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tna: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tae: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tir: Option<String>,

    /// "DD/MM/YYYY", "Sin vencimiento" or "N/A"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl InvestmentRecord {
    /// Build the stored shape of an accepted estimate
    ///
    /// Rejects estimates carrying non-finite numbers so they are never persisted.
    pub fn from_estimate(
        quote: &ValidatedQuote,
        broker: impl Into<String>,
        estimate: &MaturityEstimate,
    ) -> Result<Self> {
        if !estimate.is_finite() {
            return Err(EngineError::invalid_input(format!(
                "estimate for {} contains non-finite values",
                quote.ticker()
            )));
        }
        let request = quote.request();

        Ok(Self {
            id: String::new(),
            date: request.purchase_date,
            amount: request.amount,
            ticker: request.ticker.clone(),
            broker: broker.into(),
            category: request.category.label().to_string(),
            price: Some(request.price),
            nominals: estimate.nominal_quantity,
            tem: Some(estimate.tem.to_string()),
            tna: Some(estimate.tna.to_string()),
            tae: Some(estimate.tae.to_string()),
            tir: Some(estimate.tir.to_string()),
            maturity_date: Some(estimate.maturity_date.to_string()),
            maturity_value: Some(estimate.maturity_value),
            explanation: Some(estimate.explanation.clone()),
        })
    }

    /// Maturity as a calendar date, when the stored text holds one
    pub fn maturity(&self) -> Option<NaiveDate> {
        self.maturity_date.as_deref().map(MaturityDate::parse)?.date()
    }

    /// TNA in percentage points, when the stored text parses
    pub fn tna_percent(&self) -> Option<f64> {
        self.tna.as_deref().and_then(parse_percentage)
    }

    /// TAE in percentage points, when the stored text parses
    pub fn tae_percent(&self) -> Option<f64> {
        self.tae.as_deref().and_then(parse_percentage)
    }

    /// Projection input re-running this position at its TNA until maturity
    pub fn projection_seed(&self) -> Option<ProjectionInput> {
        let tna = self.tna_percent()?;
        let maturity = self.maturity()?;
        let days = day_span(self.date, maturity);

        Some(ProjectionInput::new(
            self.amount,
            tna,
            RateKind::NominalAnnual,
            i64::from(days),
            DurationUnit::Days,
        ))
    }
}

/// Funds taken out of the portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRecord {
    #[serde(default)]
    pub id: String,

    pub date: NaiveDate,

    pub amount: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl WithdrawalRecord {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self {
            id: String::new(),
            date,
            amount,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
