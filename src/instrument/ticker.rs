//! Maturity dates encoded in Argentine short-term note tickers
//!
//! Tickers follow `S{DD}{M}{Y}`: S30N6 matures 30/11/2026.

use chrono::{Days, NaiveDate};

/// Base year added to the trailing year digit
pub const TICKER_BASE_YEAR: i32 = 2020;

/// Month letter alphabet: E=Jan ... D=Dec
fn month_from_letter(letter: u8) -> Option<u32> {
    let month = match letter {
        b'E' => 1,
        b'F' => 2,
        b'M' => 3,
        b'A' => 4,
        b'Y' => 5,
        b'J' => 6,
        b'L' => 7,
        b'G' => 8,
        b'S' => 9,
        b'O' => 10,
        b'N' => 11,
        b'D' => 12,
        _ => return None,
    };
    Some(month)
}

/// Decode the maturity date implied by a ticker
///
/// Returns `None` for tickers that do not follow the convention; that is not
/// an error, the instrument simply has no implied maturity. A day past the end
/// of its month rolls into the following month (S31A6 -> 01/05/2026).
pub fn resolve_ticker_maturity(ticker: &str) -> Option<NaiveDate> {
    let bytes = ticker.as_bytes();
    if bytes.len() != 5 || bytes[0] != b'S' {
        return None;
    }

    let (d1, d2, letter, y) = (bytes[1], bytes[2], bytes[3], bytes[4]);
    if !d1.is_ascii_digit() || !d2.is_ascii_digit() || !y.is_ascii_digit() {
        return None;
    }

    let day = u64::from((d1 - b'0') * 10 + (d2 - b'0'));
    if !(1..=31).contains(&day) {
        return None;
    }

    let month = month_from_letter(letter)?;
    let year = TICKER_BASE_YEAR + i32::from(y - b'0');

    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(day - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_known_tickers() {
        assert_eq!(resolve_ticker_maturity("S30N6"), Some(ymd(2026, 11, 30)));
        assert_eq!(resolve_ticker_maturity("S31G6"), Some(ymd(2026, 8, 31)));
        assert_eq!(resolve_ticker_maturity("S16M6"), Some(ymd(2026, 3, 16)));
        assert_eq!(resolve_ticker_maturity("S30A6"), Some(ymd(2026, 4, 30)));
        assert_eq!(resolve_ticker_maturity("S29Y6"), Some(ymd(2026, 5, 29)));
    }

    #[test]
    fn test_every_month_letter() {
        let letters = ["E", "F", "M", "A", "Y", "J", "L", "G", "S", "O", "N", "D"];
        for (i, letter) in letters.iter().enumerate() {
            let ticker = format!("S15{}7", letter);
            assert_eq!(resolve_ticker_maturity(&ticker), Some(ymd(2027, i as u32 + 1, 15)), "{}", ticker);
        }
    }

    #[test]
    fn test_year_digit_zero() {
        assert_eq!(resolve_ticker_maturity("S01E0"), Some(ymd(2020, 1, 1)));
    }

    #[test]
    fn test_non_matching_tickers() {
        for ticker in ["AL30", "GD30", "PF-30", "PF-UVA", "BTC", "", "S30N", "S30N66", "s30N6", "S3XN6", "S30Q6", "S30N6 ", "X30N6"] {
            assert_eq!(resolve_ticker_maturity(ticker), None, "{:?}", ticker);
        }
    }

    #[test]
    fn test_day_out_of_range() {
        assert_eq!(resolve_ticker_maturity("S00N6"), None);
        assert_eq!(resolve_ticker_maturity("S32N6"), None);
    }

    #[test]
    fn test_day_overflow_rolls_forward() {
        // April has 30 days
        assert_eq!(resolve_ticker_maturity("S31A6"), Some(ymd(2026, 5, 1)));
        assert_eq!(resolve_ticker_maturity("S30F6"), Some(ymd(2026, 3, 2)));
    }

    #[test]
    fn test_multibyte_input_does_not_panic() {
        assert_eq!(resolve_ticker_maturity("Sñ0N"), None);
        assert_eq!(resolve_ticker_maturity("S30Ñ"), None);
    }
}
