//! Percentage parsing and display

/// Parse a user- or model-supplied percentage such as "43.80", "43,80%" or " 5 % "
///
/// Returns the value in percentage points (43.8), or `None` when the text is
/// not a finite number.
pub fn parse_percentage(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .trim_end_matches('%')
        .trim()
        .chars()
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a percentage and convert it to a decimal fraction (43.80 -> 0.438)
pub fn parse_rate_fraction(text: &str) -> Option<f64> {
    parse_percentage(text).map(|pct| pct / 100.0)
}

/// Format a decimal fraction as a two-decimal percentage (0.438 -> "43.80%")
pub fn format_percentage(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_dot_and_comma() {
        assert_eq!(parse_percentage("43.80"), Some(43.8));
        assert_eq!(parse_percentage("43,80"), Some(43.8));
        assert_eq!(parse_percentage("43,80%"), Some(43.8));
        assert_eq!(parse_percentage(" 5 % "), Some(5.0));
        assert_eq!(parse_percentage("-2.5%"), Some(-2.5));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_percentage(""), None);
        assert_eq!(parse_percentage("%"), None);
        assert_eq!(parse_percentage("N/A"), None);
        assert_eq!(parse_percentage("NaN"), None);
        assert_eq!(parse_percentage("inf"), None);
        assert_eq!(parse_percentage("12.3.4"), None);
    }

    #[test]
    fn test_fraction_conversion() {
        assert_relative_eq!(parse_rate_fraction("43.80").unwrap(), 0.438, max_relative = 1e-12);
    }

    #[test]
    fn test_format() {
        assert_eq!(format_percentage(0.438), "43.80%");
        assert_eq!(format_percentage(0.0), "0.00%");
        assert_eq!(format_percentage(-0.025), "-2.50%");
    }
}
