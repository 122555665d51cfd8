//! Instrument categories and their valuation families

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Category of an instrument, selecting its valuation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstrumentCategory {
    /// Short-term peso-denominated capitalizing note (Lecap)
    ShortTermNote,
    /// Bond or corporate obligation
    Bond,
    /// Bank fixed-term deposit (plazo fijo)
    FixedDeposit,
    /// Exchange-traded collateralized loan (caución)
    CollateralizedLoan,
    /// Equities, funds, crypto: no maturity
    Other,
}

impl InstrumentCategory {
    pub const ALL: [InstrumentCategory; 5] = [
        InstrumentCategory::ShortTermNote,
        InstrumentCategory::Bond,
        InstrumentCategory::FixedDeposit,
        InstrumentCategory::CollateralizedLoan,
        InstrumentCategory::Other,
    ];

    /// Canonical machine name
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentCategory::ShortTermNote => "short-term-note",
            InstrumentCategory::Bond => "bond",
            InstrumentCategory::FixedDeposit => "fixed-deposit",
            InstrumentCategory::CollateralizedLoan => "collateralized-loan",
            InstrumentCategory::Other => "other",
        }
    }

    /// Label shown to users and stored on investment records
    pub fn label(&self) -> &'static str {
        match self {
            InstrumentCategory::ShortTermNote => "Lecaps",
            InstrumentCategory::Bond => "Bonos",
            InstrumentCategory::FixedDeposit => "Plazo Fijo",
            InstrumentCategory::CollateralizedLoan => "Cauciones Bursátiles",
            InstrumentCategory::Other => "Otros",
        }
    }

    /// Whether the maturity date is encoded in the ticker
    pub fn is_ticker_dated(&self) -> bool {
        matches!(self, InstrumentCategory::ShortTermNote | InstrumentCategory::Bond)
    }

    /// Whether the maturity date is the purchase date plus a fixed tenor
    pub fn is_tenor_dated(&self) -> bool {
        matches!(self, InstrumentCategory::FixedDeposit | InstrumentCategory::CollateralizedLoan)
    }
}

impl fmt::Display for InstrumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstrumentCategory {
    type Err = EngineError;

    /// Accepts canonical names as well as the labels used by the app
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let category = match normalized.as_str() {
            "short-term-note" | "lecap" | "lecaps" => InstrumentCategory::ShortTermNote,
            "bond" | "bonos" | "bonos / ons" | "ons" => InstrumentCategory::Bond,
            "fixed-deposit" | "plazo fijo" => InstrumentCategory::FixedDeposit,
            "collateralized-loan" | "caucion" | "caución" | "cauciones" | "cauciones bursátiles"
            | "cauciones bursatiles" => InstrumentCategory::CollateralizedLoan,
            "other" | "otros" | "acciones" | "acciones / cedears" | "cedears" | "fci" | "cripto" => {
                InstrumentCategory::Other
            }
            _ => return Err(EngineError::invalid_input(format!("Unknown instrument category: {}", s))),
        };
        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_app_labels() {
        assert_eq!("Lecaps".parse::<InstrumentCategory>().unwrap(), InstrumentCategory::ShortTermNote);
        assert_eq!("Bonos".parse::<InstrumentCategory>().unwrap(), InstrumentCategory::Bond);
        assert_eq!("Plazo Fijo".parse::<InstrumentCategory>().unwrap(), InstrumentCategory::FixedDeposit);
        assert_eq!(
            "Cauciones Bursátiles".parse::<InstrumentCategory>().unwrap(),
            InstrumentCategory::CollateralizedLoan
        );
        assert_eq!("FCI".parse::<InstrumentCategory>().unwrap(), InstrumentCategory::Other);
    }

    #[test]
    fn test_canonical_names_round_trip() {
        for category in InstrumentCategory::ALL {
            assert_eq!(category.as_str().parse::<InstrumentCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        assert!("Futuros".parse::<InstrumentCategory>().is_err());
    }
}
