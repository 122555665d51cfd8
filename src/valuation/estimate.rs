//! Maturity estimate output shape

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::rates::{format_percentage, parse_rate_fraction, YieldMetrics};

pub const NO_MATURITY_LABEL: &str = "Sin vencimiento";
pub const NOT_APPLICABLE_LABEL: &str = "N/A";

/// Display format for dates on estimates and records
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Maturity of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaturityDate {
    On(NaiveDate),
    /// Dated category whose maturity could not be determined ("N/A")
    Unresolved,
    /// Category that never matures ("Sin vencimiento")
    NoMaturity,
}

impl MaturityDate {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            MaturityDate::On(date) => Some(*date),
            MaturityDate::Unresolved | MaturityDate::NoMaturity => None,
        }
    }

    /// Parse "DD/MM/YYYY" (or ISO "YYYY-MM-DD"); sentinels and unparseable text map to a no-maturity variant
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.eq_ignore_ascii_case(NO_MATURITY_LABEL) {
            return MaturityDate::NoMaturity;
        }
        NaiveDate::parse_from_str(text, DISPLAY_DATE_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
            .map(MaturityDate::On)
            .unwrap_or(MaturityDate::Unresolved)
    }
}

impl fmt::Display for MaturityDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaturityDate::On(date) => write!(f, "{}", date.format(DISPLAY_DATE_FORMAT)),
            MaturityDate::Unresolved => f.write_str(NOT_APPLICABLE_LABEL),
            MaturityDate::NoMaturity => f.write_str(NO_MATURITY_LABEL),
        }
    }
}

impl Serialize for MaturityDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MaturityDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(MaturityDate::parse(&text))
    }
}

/// A rate quotation that may be "not applicable"
///
/// Holds a decimal fraction; displays and serializes as "X.XX%" or "N/A".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RateFigure(Option<f64>);

impl RateFigure {
    pub const NOT_APPLICABLE: RateFigure = RateFigure(None);

    pub fn from_fraction(fraction: f64) -> Self {
        if fraction.is_finite() {
            RateFigure(Some(fraction))
        } else {
            RateFigure(None)
        }
    }

    /// Parse "43.80%" or "43,80"; anything else is not applicable
    pub fn parse(text: &str) -> Self {
        RateFigure(parse_rate_fraction(text))
    }

    pub fn fraction(&self) -> Option<f64> {
        self.0
    }

    pub fn is_applicable(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Display for RateFigure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(fraction) => f.write_str(&format_percentage(fraction)),
            None => f.write_str(NOT_APPLICABLE_LABEL),
        }
    }
}

impl Serialize for RateFigure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RateFigure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(RateFigure::parse(&text))
    }
}

/// Which path produced an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    RemoteEstimator,
    LocalEngine,
}

/// Projected maturity, value and yields for one position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaturityEstimate {
    pub maturity_date: MaturityDate,
    pub maturity_value: f64,
    #[serde(rename = "nominals")]
    pub nominal_quantity: Option<f64>,
    pub tem: RateFigure,
    pub tna: RateFigure,
    pub tae: RateFigure,
    pub tir: RateFigure,
    pub explanation: String,
    #[serde(rename = "source")]
    pub provenance: Provenance,
}

impl MaturityEstimate {
    /// Fill all four rate figures from derived metrics
    pub fn with_metrics(mut self, metrics: &YieldMetrics) -> Self {
        self.tem = RateFigure::from_fraction(metrics.monthly_effective);
        self.tna = RateFigure::from_fraction(metrics.annual_nominal);
        self.tae = RateFigure::from_fraction(metrics.annual_effective);
        self.tir = RateFigure::from_fraction(metrics.internal_rate_of_return);
        self
    }

    /// Gain projected over the invested amount
    pub fn projected_gain(&self, amount: f64) -> f64 {
        self.maturity_value - amount
    }

    /// True when every numeric field can be persisted
    pub fn is_finite(&self) -> bool {
        self.maturity_value.is_finite() && self.nominal_quantity.map_or(true, f64::is_finite)
    }
}
