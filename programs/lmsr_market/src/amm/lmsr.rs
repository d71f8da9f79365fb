//! LMSR cost engine
//!
//! Pure math, no accounts. All externally visible quantities are `u64`
//! collateral base units (6 decimals); `b_scaled` and share amounts share
//! that scale, so the exponent ratios `q / b` are scale-free. Internally
//! the engine computes in `f64` via the log-sum-exp identity and converts
//! back with a single rounding rule: **floor**, so sub-unit remainders stay
//! with the pool rather than the trader.

use anchor_lang::prelude::*;

use crate::state::Side;

/// Errors raised by the cost engine
#[error_code]
pub enum CostError {
    #[msg("Cost function input outside the stable computation envelope")]
    Overflow,
    #[msg("Math error (overflow/underflow)")]
    MathError,
}

/// `exp(25_000)` is far beyond the `f64` range. Any `q / b` ratio above
/// this would overflow the exponential, so the engine bails out early and
/// the caller must reject the trade.
pub const MAX_EXP_INPUT: f64 = 25_000.0;

/// Fee denominator: fees are quoted in basis points
pub const BPS_DENOMINATOR: u128 = 10_000;

/// `ln(e^x + e^y)` computed stably: factor out the larger exponent so the
/// remaining `exp` argument is always <= 0.
fn log_sum_exp(x: f64, y: f64) -> f64 {
    let m = x.max(y);
    let n = x.min(y);
    m + (n - m).exp().ln_1p()
}

/// LMSR cost `C(q) = b * ln(e^(q_yes / b) + e^(q_no / b))`, in base units.
///
/// Fails with [`CostError::Overflow`] when either exponent ratio exceeds
/// [`MAX_EXP_INPUT`] or the result is not finite.
pub fn lmsr_cost(b_scaled: u64, yes_shares: u64, no_shares: u64) -> Result<f64> {
    let b = b_scaled as f64;
    let r_yes = yes_shares as f64 / b;
    let r_no = no_shares as f64 / b;

    if r_yes > MAX_EXP_INPUT || r_no > MAX_EXP_INPUT {
        return Err(CostError::Overflow.into());
    }

    let cost = b * log_sum_exp(r_yes, r_no);
    if cost.is_finite() {
        Ok(cost)
    } else {
        Err(CostError::Overflow.into())
    }
}

/// Cost to buy `delta` shares on one side: `C(after) - C(before)`, floored
/// to whole base units.
///
/// Strictly increasing in `delta` and in the chosen side's outstanding
/// shares (the curve is convex, so buying into a lopsided book costs more
/// per marginal share).
pub fn lmsr_buy_cost(
    b_scaled: u64,
    yes_shares: u64,
    no_shares: u64,
    side: Side,
    delta: u64,
) -> Result<u64> {
    let (yes_after, no_after) = match side {
        Side::Yes => (
            yes_shares.checked_add(delta).ok_or(CostError::MathError)?,
            no_shares,
        ),
        Side::No => (
            yes_shares,
            no_shares.checked_add(delta).ok_or(CostError::MathError)?,
        ),
    };

    let before = lmsr_cost(b_scaled, yes_shares, no_shares)?;
    let after = lmsr_cost(b_scaled, yes_after, no_after)?;

    floor_to_units((after - before).max(0.0))
}

/// Marginal price of one side: `e^(q_side / b) / (e^(q_yes / b) + e^(q_no / b))`.
///
/// Always in `(0, 1)`; the two sides' prices sum to 1. Computed as
/// `exp(r_side - log_sum_exp(r_yes, r_no))` so neither exponential is ever
/// evaluated on a large positive argument.
pub fn lmsr_marginal_price(
    b_scaled: u64,
    yes_shares: u64,
    no_shares: u64,
    side: Side,
) -> Result<f64> {
    let b = b_scaled as f64;
    let r_yes = yes_shares as f64 / b;
    let r_no = no_shares as f64 / b;

    if r_yes > MAX_EXP_INPUT || r_no > MAX_EXP_INPUT {
        return Err(CostError::Overflow.into());
    }

    let r_side = match side {
        Side::Yes => r_yes,
        Side::No => r_no,
    };
    Ok((r_side - log_sum_exp(r_yes, r_no)).exp())
}

/// Fee on a gross cost, in basis points, floored
pub fn fee_amount(gross_cost: u64, fee_bps: u16) -> Result<u64> {
    let fee = (gross_cost as u128)
        .checked_mul(fee_bps as u128)
        .ok_or(CostError::MathError)?
        / BPS_DENOMINATOR;
    u64::try_from(fee).map_err(|_| CostError::MathError.into())
}

fn floor_to_units(value: f64) -> Result<u64> {
    if !value.is_finite() || value < 0.0 || value >= u64::MAX as f64 {
        return Err(CostError::MathError.into());
    }
    Ok(value.floor() as u64)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// 1 whole collateral unit = 10^6 base units
    const UNIT: u64 = 1_000_000;

    #[test]
    fn test_balanced_book_cost_is_b_ln2() {
        // C(0, 0) = b * ln(2)
        let cost = lmsr_cost(10 * UNIT, 0, 0).unwrap();
        let expected = 10.0 * UNIT as f64 * std::f64::consts::LN_2;
        assert!((cost - expected).abs() < 1.0);
    }

    #[test]
    fn test_first_buy_worked_example() {
        // b = 10, buy 100 YES from an empty book:
        // cost = 10*ln(e^10 + 1) - 10*ln(2) = 93.068982... units
        let gross = lmsr_buy_cost(10 * UNIT, 0, 0, Side::Yes, 100 * UNIT).unwrap();
        assert_eq!(gross, 93_068_982);

        // 1% fee on gross, floored; vault receives the rest
        let fee = fee_amount(gross, 100).unwrap();
        assert_eq!(fee, 930_689);
        assert_eq!(gross - fee, 92_138_293);
    }

    #[test]
    fn test_buy_cost_monotonic_in_delta() {
        let b = 50 * UNIT;
        let mut last = 0u64;
        for shares in [1, 5, 20, 75, 200, 500] {
            let cost = lmsr_buy_cost(b, 30 * UNIT, 40 * UNIT, Side::Yes, shares * UNIT).unwrap();
            assert!(cost > last, "cost must rise with delta: {} !> {}", cost, last);
            last = cost;
        }
    }

    #[test]
    fn test_buy_cost_monotonic_in_accumulated_shares() {
        // Buying into a more lopsided book costs more per marginal share
        let b = 20 * UNIT;
        let delta = 10 * UNIT;
        let balanced = lmsr_buy_cost(b, 0, 0, Side::Yes, delta).unwrap();
        let lopsided = lmsr_buy_cost(b, 60 * UNIT, 0, Side::Yes, delta).unwrap();
        assert!(lopsided > balanced);
    }

    #[test]
    fn test_split_buy_never_costs_more() {
        // C is path independent in exact arithmetic, so two half buys equal
        // one full buy up to flooring: each floor forgives < 1 base unit.
        let b = 25 * UNIT;
        let full = lmsr_buy_cost(b, 10 * UNIT, 5 * UNIT, Side::Yes, 40 * UNIT).unwrap();
        let first = lmsr_buy_cost(b, 10 * UNIT, 5 * UNIT, Side::Yes, 20 * UNIT).unwrap();
        let second = lmsr_buy_cost(b, 30 * UNIT, 5 * UNIT, Side::Yes, 20 * UNIT).unwrap();
        let split = first + second;
        assert!(split <= full);
        assert!(full - split <= 2);
    }

    #[test]
    fn test_marginal_prices_sum_to_one() {
        let b = 10 * UNIT;
        let yes = lmsr_marginal_price(b, 70 * UNIT, 30 * UNIT, Side::Yes).unwrap();
        let no = lmsr_marginal_price(b, 70 * UNIT, 30 * UNIT, Side::No).unwrap();
        assert!(yes > 0.0 && yes < 1.0);
        assert!(no > 0.0 && no < 1.0);
        assert!((yes + no - 1.0).abs() < 1e-12);
        // The heavier side is the pricier one
        assert!(yes > no);
    }

    #[test]
    fn test_balanced_book_prices_at_half() {
        let price = lmsr_marginal_price(10 * UNIT, 0, 0, Side::Yes).unwrap();
        assert!((price - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_overflow_guard() {
        // q / b above 25_000 must be rejected, not computed
        let err = lmsr_cost(1_000, 26_000_000, 0).unwrap_err();
        assert_eq!(err, CostError::Overflow.into());

        let err = lmsr_buy_cost(1_000, 0, 0, Side::Yes, 26_000_000).unwrap_err();
        assert_eq!(err, CostError::Overflow.into());
    }

    #[test]
    fn test_zero_delta_costs_nothing() {
        let cost = lmsr_buy_cost(10 * UNIT, 5 * UNIT, 5 * UNIT, Side::Yes, 0).unwrap();
        assert_eq!(cost, 0);
    }

    #[test]
    fn test_fee_amount_bounds() {
        assert_eq!(fee_amount(1_000_000, 0).unwrap(), 0);
        assert_eq!(fee_amount(1_000_000, 100).unwrap(), 10_000);
        assert_eq!(fee_amount(1_000_000, 10_000).unwrap(), 1_000_000);
        // Floors, never rounds up
        assert_eq!(fee_amount(999, 100).unwrap(), 9);
    }

    #[test]
    fn test_deep_market_approaches_flat_pricing() {
        // As b grows the price curve flattens toward 0.5 per share
        let delta = 100 * UNIT;
        let shallow = lmsr_buy_cost(10 * UNIT, 0, 0, Side::Yes, delta).unwrap();
        let deep = lmsr_buy_cost(10_000 * UNIT, 0, 0, Side::Yes, delta).unwrap();
        assert!(deep < shallow);
        // 100 shares against b = 10_000 should cost barely above 50 units
        assert!(deep >= 50 * UNIT && deep < 51 * UNIT);
    }
}
