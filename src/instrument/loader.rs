//! Load quote requests from CSV
//!
//! Expected header: `category,ticker,price,amount,date,tna`

use chrono::NaiveDate;
use csv::Reader;
use std::path::Path;

use super::{InstrumentCategory, InstrumentQuoteRequest};
use crate::error::{EngineError, Result};
use crate::rates::parse_percentage;

/// Raw CSV row; `tna` may be empty and accepts "," as decimal separator
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    category: String,
    ticker: String,
    price: f64,
    amount: f64,
    date: String,
    #[serde(default)]
    tna: Option<String>,
}

impl CsvRow {
    fn to_request(self) -> Result<InstrumentQuoteRequest> {
        let category: InstrumentCategory = self.category.parse()?;

        let purchase_date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|e| EngineError::invalid_input(format!("Invalid date {:?}: {}", self.date, e)))?;

        let market_tna = match self.tna.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                parse_percentage(raw)
                    .filter(|tna| *tna >= 0.0)
                    .ok_or_else(|| EngineError::invalid_input(format!("Invalid TNA: {}", raw)))?,
            ),
        };

        Ok(InstrumentQuoteRequest {
            category,
            ticker: self.ticker.trim().to_string(),
            price: self.price,
            amount: self.amount,
            purchase_date,
            market_tna,
        })
    }
}

/// One parsed line: the 1-based data row number and its outcome
pub type LoadedRow = (usize, Result<InstrumentQuoteRequest>);

/// Load requests from any reader, keeping per-row failures instead of aborting
pub fn load_requests_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<LoadedRow>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut rows = Vec::new();

    for (index, result) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let parsed = match result {
            Ok(row) => row.to_request(),
            Err(e) => Err(EngineError::from(e)),
        };
        rows.push((index + 1, parsed));
    }

    Ok(rows)
}

/// Load requests from a CSV file
pub fn load_requests<P: AsRef<Path>>(path: P) -> Result<Vec<LoadedRow>> {
    let file = std::fs::File::open(path)?;
    load_requests_from_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
category,ticker,price,amount,date,tna
Lecaps,S30A6,108.10,1000000,2026-01-01,\"43,80\"
Plazo Fijo,PF-UVA,100,500000,2026-02-10,
bond,AL30,0,1000,2026-02-10,
Futuros,XX,1,1,2026-01-01,
";

    #[test]
    fn test_load_requests_keeps_row_errors() {
        let rows = load_requests_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 4);

        let (line, first) = &rows[0];
        let first = first.as_ref().unwrap();
        assert_eq!(*line, 1);
        assert_eq!(first.category, InstrumentCategory::ShortTermNote);
        assert_eq!(first.ticker, "S30A6");
        assert_eq!(first.market_tna, Some(43.8));
        assert_eq!(first.purchase_date, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());

        let second = rows[1].1.as_ref().unwrap();
        assert_eq!(second.category, InstrumentCategory::FixedDeposit);
        assert_eq!(second.market_tna, None);

        // Parses, but fails validation later
        let third = rows[2].1.as_ref().unwrap().clone();
        assert!(third.validate().is_err());

        assert!(rows[3].1.is_err());
    }

    #[test]
    fn test_bad_date_is_row_error() {
        let csv = "category,ticker,price,amount,date,tna\nLecaps,S30A6,100,1000,01/01/2026,\n";
        let rows = load_requests_from_reader(csv.as_bytes()).unwrap();
        assert!(matches!(rows[0].1, Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn test_negative_tna_is_row_error() {
        let csv = "category,ticker,price,amount,date,tna\nPlazo Fijo,PF-30,100,1000,2026-01-01,\"-10,5\"\n";
        let rows = load_requests_from_reader(csv.as_bytes()).unwrap();
        assert!(matches!(rows[0].1, Err(EngineError::InvalidInput(_))));
    }
}
