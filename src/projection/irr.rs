//! Money-weighted return of dated cashflows
//!
//! Used to annualize projections that mix a principal with periodic contributions.

use crate::rates::DAYS_PER_YEAR;

/// A cashflow on a simulated day (negative = paid in, positive = received)
pub type DatedCashflow = (u32, f64);

/// Annualized internal rate of return of dated cashflows (XIRR, 365-day year)
/// using the Newton-Raphson method with a bisection fallback.
///
/// # Returns
/// * `Option<f64>` - Annual rate as a decimal (0.05 for 5%), or None if no solution found
pub fn calculate_xirr(cashflows: &[DatedCashflow]) -> Option<f64> {
    if cashflows.is_empty() {
        return None;
    }

    if cashflows.iter().all(|&(_, cf)| cf.abs() < 1e-10) {
        return Some(0.0);
    }

    // A root needs at least one sign change
    let has_positive = cashflows.iter().any(|&(_, cf)| cf > 1e-10);
    let has_negative = cashflows.iter().any(|&(_, cf)| cf < -1e-10);
    if !has_positive || !has_negative {
        return None;
    }

    let mut rate = 0.10;
    let tolerance = 1e-12;
    let max_iterations = 200;

    for _ in 0..max_iterations {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if dnpv.abs() < 1e-20 || !dnpv.is_finite() {
            return calculate_xirr_bisection(cashflows);
        }

        let new_rate = (rate - npv / dnpv).clamp(-0.99, 1_000.0);

        if (new_rate - rate).abs() < tolerance {
            return Some(new_rate);
        }

        rate = new_rate;
    }

    calculate_xirr_bisection(cashflows)
}

fn year_fraction(day: u32) -> f64 {
    f64::from(day) / DAYS_PER_YEAR
}

/// NPV and its derivative with respect to the annual rate
fn npv_and_derivative(cashflows: &[DatedCashflow], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for &(day, cf) in cashflows {
        let t = year_fraction(day);
        let discount = (1.0 + rate).powf(t);
        npv += cf / discount;
        if t > 0.0 {
            dnpv -= t * cf / ((1.0 + rate).powf(t + 1.0));
        }
    }

    (npv, dnpv)
}

fn npv_at_rate(cashflows: &[DatedCashflow], rate: f64) -> f64 {
    cashflows
        .iter()
        .map(|&(day, cf)| cf / (1.0 + rate).powf(year_fraction(day)))
        .sum()
}

fn calculate_xirr_bisection(cashflows: &[DatedCashflow]) -> Option<f64> {
    let mut low = -0.99_f64;
    let mut high = 1_000.0_f64;
    let tolerance = 1e-12;
    let max_iterations = 500;

    if npv_at_rate(cashflows, low) * npv_at_rate(cashflows, high) > 0.0 {
        return None;
    }

    for _ in 0..max_iterations {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cashflows, mid);

        if npv_mid.abs() < tolerance || (high - low) / 2.0 < tolerance {
            return Some(mid);
        }

        if npv_mid * npv_at_rate(cashflows, low) < 0.0 {
            high = mid;
        } else {
            low = mid;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_year_cashflow() {
        let irr = calculate_xirr(&[(0, -1000.0), (365, 1100.0)]).unwrap();
        assert_relative_eq!(irr, 0.10, max_relative = 1e-9);
    }

    #[test]
    fn test_short_holding_annualizes() {
        // 3% over 30 days
        let irr = calculate_xirr(&[(0, -100.0), (30, 103.0)]).unwrap();
        assert_relative_eq!(irr, 1.03_f64.powf(365.0 / 30.0) - 1.0, max_relative = 1e-8);
    }

    #[test]
    fn test_no_sign_change() {
        assert!(calculate_xirr(&[(0, -100.0), (30, -5.0)]).is_none());
        assert!(calculate_xirr(&[]).is_none());
        assert_eq!(calculate_xirr(&[(0, 0.0), (10, 0.0)]), Some(0.0));
    }

    #[test]
    fn test_contributions_schedule() {
        // Two deposits, one payout
        let flows = [(0, -1000.0), (30, -1000.0), (60, 2050.0)];
        let irr = calculate_xirr(&flows).unwrap();
        assert!(irr > 0.0);
        assert!(npv_at_rate(&flows, irr).abs() < 1e-6);
    }
}
