//! Validation of remote estimator responses

use serde_json::{Map, Value};

use super::EstimatorError;
use crate::valuation::{MaturityDate, MaturityEstimate, Provenance, RateFigure};

/// Keys without which a response is not treated as an estimate
const REQUIRED_KEYS: [&str; 6] = ["maturityDate", "maturityValue", "tem", "tna", "tae", "tir"];

const DEFAULT_EXPLANATION: &str = "Cálculo realizado por el estimador remoto.";

/// Remove markdown code fences the model may wrap its answer in
pub fn strip_code_fence(text: &str) -> String {
    text.replace("```json", "").replace("```JSON", "").replace("```", "").trim().to_string()
}

/// `Number(x) || 0`: numbers and numeric strings pass, everything else is zero
fn coerce_number(value: Option<&Value>) -> f64 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Bool(true)) => Some(1.0),
        _ => None,
    };
    number.filter(|n| n.is_finite()).unwrap_or(0.0)
}

fn coerce_rate(value: Option<&Value>) -> RateFigure {
    match value {
        Some(Value::String(s)) => RateFigure::parse(s),
        Some(Value::Number(n)) => n.as_f64().map(|pct| RateFigure::from_fraction(pct / 100.0)).unwrap_or_default(),
        _ => RateFigure::NOT_APPLICABLE,
    }
}

fn coerce_text<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str).map(str::trim).filter(|s| !s.is_empty())
}

/// Interpret the model's text as a maturity estimate
pub fn parse_estimate(text: &str) -> Result<MaturityEstimate, EstimatorError> {
    let cleaned = strip_code_fence(text);
    if cleaned.is_empty() {
        return Err(EstimatorError::EmptyResponse);
    }

    let value: Value =
        serde_json::from_str(&cleaned).map_err(|e| EstimatorError::malformed(format!("invalid JSON: {}", e)))?;

    let Value::Object(object) = value else {
        return Err(EstimatorError::malformed("response is not a JSON object"));
    };

    if let Some(missing) = REQUIRED_KEYS
        .iter()
        .find(|key| object.get(**key).map_or(true, Value::is_null))
    {
        return Err(EstimatorError::malformed(format!("missing field {}", missing)));
    }

    let maturity_date = coerce_text(&object, "maturityDate")
        .map(MaturityDate::parse)
        .unwrap_or(MaturityDate::Unresolved);

    Ok(MaturityEstimate {
        maturity_date,
        maturity_value: coerce_number(object.get("maturityValue")),
        nominal_quantity: Some(coerce_number(object.get("nominals"))),
        tem: coerce_rate(object.get("tem")),
        tna: coerce_rate(object.get("tna")),
        tae: coerce_rate(object.get("tae")),
        tir: coerce_rate(object.get("tir")),
        explanation: coerce_text(&object, "explanation").unwrap_or(DEFAULT_EXPLANATION).to_string(),
        provenance: Provenance::RemoteEstimator,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const VALID: &str = r#"{
        "maturityDate": "30/04/2026",
        "maturityValue": 1142838.36,
        "nominals": 925069.38,
        "tem": "3.42%",
        "tir": "49.75%",
        "tna": "43,80%",
        "tae": "49.75%",
        "explanation": "Cálculo remoto"
    }"#;

    #[test]
    fn test_parse_valid_response() {
        let est = parse_estimate(VALID).unwrap();
        assert_eq!(est.maturity_date, MaturityDate::On(NaiveDate::from_ymd_opt(2026, 4, 30).unwrap()));
        assert_eq!(est.maturity_value, 1142838.36);
        assert_eq!(est.nominal_quantity, Some(925069.38));
        assert_eq!(est.tna.to_string(), "43.80%");
        assert_eq!(est.explanation, "Cálculo remoto");
        assert_eq!(est.provenance, Provenance::RemoteEstimator);
    }

    #[test]
    fn test_parse_fenced_response() {
        let fenced = format!("```json\n{}\n```", VALID);
        assert_eq!(parse_estimate(&fenced).unwrap(), parse_estimate(VALID).unwrap());
    }

    #[test]
    fn test_coerces_missing_and_non_numeric_fields() {
        let est = parse_estimate(
            r#"{"maturityDate": "Sin vencimiento", "maturityValue": "abc",
                "tem": "N/A", "tna": "N/A", "tae": "N/A", "tir": "N/A"}"#,
        )
        .unwrap();
        assert_eq!(est.maturity_date, MaturityDate::NoMaturity);
        assert_eq!(est.maturity_value, 0.0);
        assert_eq!(est.nominal_quantity, Some(0.0));
        assert_eq!(est.tem, RateFigure::NOT_APPLICABLE);
        assert_eq!(est.explanation, DEFAULT_EXPLANATION);
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let est = parse_estimate(
            r#"{"maturityDate": "N/A", "maturityValue": " 1500.5 ", "nominals": 12,
                "tem": "1%", "tna": "12%", "tae": "12.68%", "tir": "12.68%"}"#,
        )
        .unwrap();
        assert_eq!(est.maturity_value, 1500.5);
        assert_eq!(est.nominal_quantity, Some(12.0));
        assert_eq!(est.maturity_date, MaturityDate::Unresolved);
    }

    #[test]
    fn test_rejects_truncated_json() {
        let truncated = &VALID[..VALID.len() / 2];
        assert!(matches!(parse_estimate(truncated), Err(EstimatorError::MalformedResponse(_))));
    }

    #[test]
    fn test_rejects_non_objects_and_missing_keys() {
        assert!(parse_estimate("[1, 2, 3]").is_err());
        assert!(parse_estimate("\"hola\"").is_err());
        assert!(parse_estimate(r#"{"error": "quota exceeded"}"#).is_err());
        assert!(matches!(parse_estimate("```json\n```"), Err(EstimatorError::EmptyResponse)));
    }

    #[test]
    fn test_rejects_response_without_rates() {
        let partial = r#"{"maturityDate": "30/04/2026", "maturityValue": 1}"#;
        assert!(matches!(parse_estimate(partial), Err(EstimatorError::MalformedResponse(_))));

        let null_rate = VALID.replace(r#""tae": "49.75%""#, r#""tae": null"#);
        assert!(matches!(parse_estimate(&null_rate), Err(EstimatorError::MalformedResponse(_))));
    }
}
