//! Engine configuration
//!
//! The default rates below are calibration policy rather than market
//! conventions. They can be overridden from a JSON file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EngineError, Result};

/// Assumed TNA (%) for short-term notes and bonds priced without a market rate
pub const DEFAULT_NOTE_TNA: f64 = 40.0;

/// Assumed TNA (%) for fixed-term deposits
pub const DEFAULT_FIXED_DEPOSIT_TNA: f64 = 37.0;

/// Assumed TNA (%) for overnight collateralized loans
pub const DEFAULT_COLLATERALIZED_LOAN_TNA: f64 = 35.0;

pub const DEFAULT_GENAI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// How a dated note or bond is valued when no market TNA is supplied
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteFallback {
    /// Nominals redeem 1:1 at maturity
    Par,
    /// Prorate the invested amount at `default_note_tna`
    AssumedRate,
}

/// Settings for the optional remote estimator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorSettings {
    pub enabled: bool,
    pub model: String,
    pub endpoint: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "gemini-2.0-flash".to_string(),
            endpoint: DEFAULT_GENAI_ENDPOINT.to_string(),
            api_key_env: "GOOGLE_GENAI_API_KEY".to_string(),
        }
    }
}

impl EstimatorSettings {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

/// Valuation policy and estimator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub note_fallback: NoteFallback,

    /// Percentages, e.g. 40.0 for 40%
    pub default_note_tna: f64,
    pub fixed_deposit_tna: f64,
    pub collateralized_loan_tna: f64,

    pub standard_tenor_days: u32,
    pub inflation_indexed_tenor_days: u32,
    pub overnight_tenor_days: u32,

    /// Ticker designating the inflation-indexed deposit variant
    pub inflation_indexed_ticker: String,

    pub estimator: EstimatorSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            note_fallback: NoteFallback::Par,
            default_note_tna: DEFAULT_NOTE_TNA,
            fixed_deposit_tna: DEFAULT_FIXED_DEPOSIT_TNA,
            collateralized_loan_tna: DEFAULT_COLLATERALIZED_LOAN_TNA,
            standard_tenor_days: 30,
            inflation_indexed_tenor_days: 90,
            overnight_tenor_days: 1,
            inflation_indexed_ticker: "PF-UVA".to_string(),
            estimator: EstimatorSettings::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file; missing fields take their defaults
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject rates and tenors that would poison every downstream figure
    pub fn validate(&self) -> Result<()> {
        for (name, rate) in [
            ("default_note_tna", self.default_note_tna),
            ("fixed_deposit_tna", self.fixed_deposit_tna),
            ("collateralized_loan_tna", self.collateralized_loan_tna),
        ] {
            if !rate.is_finite() || rate < 0.0 {
                return Err(EngineError::Config(format!("{} must be a finite, non-negative percentage", name)));
            }
        }

        for (name, days) in [
            ("standard_tenor_days", self.standard_tenor_days),
            ("inflation_indexed_tenor_days", self.inflation_indexed_tenor_days),
            ("overnight_tenor_days", self.overnight_tenor_days),
        ] {
            if days == 0 {
                return Err(EngineError::Config(format!("{} must be at least 1", name)));
            }
        }

        Ok(())
    }
}
