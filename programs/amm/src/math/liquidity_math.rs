//! Conversions between liquidity units and token amounts on the
//! constant-liquidity curve segment, plus the next-sqrt-price steps used by
//! the swap engine. All intermediates are widened to U256; narrowing back is
//! checked and fails hard on overflow. Rounding direction is stated per
//! function and always favors the pool.

use anchor_lang::prelude::*;
use ethnum::U256;

use crate::constants::Q64;
use crate::error::AmmError;

fn to_u64(v: U256) -> Result<u64> {
    if v > U256::from(u64::MAX) {
        return Err(AmmError::ArithmeticOverflow.into());
    }
    Ok(v.as_u64())
}

fn to_u128(v: U256) -> Result<u128> {
    if v > U256::from(u128::MAX) {
        return Err(AmmError::ArithmeticOverflow.into());
    }
    Ok(v.as_u128())
}

fn div_ceil(numerator: U256, denominator: U256) -> Result<U256> {
    if denominator == U256::ZERO {
        return Err(AmmError::DivisionByZero.into());
    }
    let quotient = numerator / denominator;
    if numerator % denominator != U256::ZERO {
        Ok(quotient + U256::ONE)
    } else {
        Ok(quotient)
    }
}

/// Token A owed for `liquidity` between two sqrt prices:
/// `L * 2^64 * (upper - lower) / (lower * upper)`.
/// Round up when the caller pays, down when the pool pays.
pub fn amount_a_for_liquidity(
    sqrt_price_a_x64: u128,
    sqrt_price_b_x64: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u64> {
    let (lower, upper) = ordered(sqrt_price_a_x64, sqrt_price_b_x64);
    if lower == upper || liquidity == 0 {
        return Ok(0);
    }
    require!(lower > 0, AmmError::DivisionByZero);

    let numerator = (U256::from(liquidity) << 64u32)
        .checked_mul(U256::from(upper - lower))
        .ok_or(AmmError::ArithmeticOverflow)?;
    let denominator = U256::from(lower) * U256::from(upper);

    let amount = if round_up {
        div_ceil(numerator, denominator)?
    } else {
        numerator / denominator
    };
    to_u64(amount)
}

/// Token B owed for `liquidity` between two sqrt prices:
/// `L * (upper - lower) / 2^64`.
pub fn amount_b_for_liquidity(
    sqrt_price_a_x64: u128,
    sqrt_price_b_x64: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u64> {
    let (lower, upper) = ordered(sqrt_price_a_x64, sqrt_price_b_x64);
    if lower == upper || liquidity == 0 {
        return Ok(0);
    }

    let product = U256::from(liquidity) * U256::from(upper - lower);
    let amount = if round_up {
        div_ceil(product, U256::from(Q64))?
    } else {
        product >> 64
    };
    to_u64(amount)
}

/// Liquidity granted for depositing `amount` of token A over a price range,
/// rounded down so a deposit never mints excess liquidity.
pub fn liquidity_for_amount_a(
    sqrt_price_a_x64: u128,
    sqrt_price_b_x64: u128,
    amount: u64,
) -> Result<u128> {
    let (lower, upper) = ordered(sqrt_price_a_x64, sqrt_price_b_x64);
    require!(lower < upper, AmmError::DivisionByZero);

    let intermediate = (U256::from(lower) * U256::from(upper)) >> 64;
    let liquidity = U256::from(amount) * intermediate / U256::from(upper - lower);
    to_u128(liquidity)
}

/// Liquidity granted for depositing `amount` of token B, rounded down.
pub fn liquidity_for_amount_b(
    sqrt_price_a_x64: u128,
    sqrt_price_b_x64: u128,
    amount: u64,
) -> Result<u128> {
    let (lower, upper) = ordered(sqrt_price_a_x64, sqrt_price_b_x64);
    require!(lower < upper, AmmError::DivisionByZero);

    let liquidity = (U256::from(amount) << 64) / U256::from(upper - lower);
    to_u128(liquidity)
}

/// Price after `amount` of token A enters at constant liquidity
/// (`Δ(1/√P) = Δa/L`, price falls). Rounded up so the price moves no further
/// than the input strictly pays for.
pub fn next_sqrt_price_from_amount_a_in(
    sqrt_price_x64: u128,
    liquidity: u128,
    amount: u64,
) -> Result<u128> {
    if amount == 0 {
        return Ok(sqrt_price_x64);
    }
    require!(liquidity > 0, AmmError::DivisionByZero);

    let numerator = U256::from(liquidity) << 64u32;
    let product = U256::from(amount) * U256::from(sqrt_price_x64);
    let denominator = numerator + product;

    let next = match numerator.checked_mul(U256::from(sqrt_price_x64)) {
        Some(wide) => div_ceil(wide, denominator)?,
        // The precise numerator overflows even U256; the algebraically
        // equivalent form stays in range at the cost of one rounding step.
        None => div_ceil(numerator, numerator / U256::from(sqrt_price_x64) + U256::from(amount))?,
    };
    to_u128(next)
}

/// Price after `amount` of token B enters at constant liquidity
/// (`Δ(√P) = Δb/L`, price rises). Rounded down.
pub fn next_sqrt_price_from_amount_b_in(
    sqrt_price_x64: u128,
    liquidity: u128,
    amount: u64,
) -> Result<u128> {
    require!(liquidity > 0, AmmError::DivisionByZero);

    let quotient = to_u128((U256::from(amount) << 64) / U256::from(liquidity))?;
    sqrt_price_x64
        .checked_add(quotient)
        .ok_or(AmmError::ArithmeticOverflow.into())
}

/// Price after `amount` of token A leaves at constant liquidity
/// (price rises). Rounded up.
pub fn next_sqrt_price_from_amount_a_out(
    sqrt_price_x64: u128,
    liquidity: u128,
    amount: u64,
) -> Result<u128> {
    if amount == 0 {
        return Ok(sqrt_price_x64);
    }

    let numerator = U256::from(liquidity) << 64u32;
    let product = U256::from(amount) * U256::from(sqrt_price_x64);
    require!(product < numerator, AmmError::InsufficientLiquidity);

    let wide = numerator
        .checked_mul(U256::from(sqrt_price_x64))
        .ok_or(AmmError::ArithmeticOverflow)?;
    to_u128(div_ceil(wide, numerator - product)?)
}

/// Price after `amount` of token B leaves at constant liquidity
/// (price falls). The step is rounded up so the pool never pays out more
/// than the price move covers.
pub fn next_sqrt_price_from_amount_b_out(
    sqrt_price_x64: u128,
    liquidity: u128,
    amount: u64,
) -> Result<u128> {
    require!(liquidity > 0, AmmError::DivisionByZero);

    let quotient = to_u128(div_ceil(U256::from(amount) << 64, U256::from(liquidity))?)?;
    require!(quotient < sqrt_price_x64, AmmError::InsufficientLiquidity);
    Ok(sqrt_price_x64 - quotient)
}

fn ordered(a: u128, b: u128) -> (u128, u128) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_X64: u128 = Q64;
    const TWO_X64: u128 = 2 << 64;

    #[test]
    fn amount_deltas_on_clean_ranges() {
        // L * (2 - 1) / (1 * 2) = 500 of token A
        assert_eq!(
            amount_a_for_liquidity(ONE_X64, TWO_X64, 1000, false).unwrap(),
            500
        );
        // L * (2 - 1) = 1000 of token B
        assert_eq!(
            amount_b_for_liquidity(ONE_X64, TWO_X64, 1000, false).unwrap(),
            1000
        );
        // Argument order must not matter
        assert_eq!(
            amount_a_for_liquidity(TWO_X64, ONE_X64, 1000, false).unwrap(),
            500
        );
    }

    #[test]
    fn zero_width_or_zero_liquidity_is_zero() {
        assert_eq!(
            amount_a_for_liquidity(ONE_X64, ONE_X64, 1000, true).unwrap(),
            0
        );
        assert_eq!(amount_b_for_liquidity(ONE_X64, TWO_X64, 0, true).unwrap(), 0);
    }

    #[test]
    fn rounding_direction() {
        // 1000 * (2^64 + 1 - 2^64) / 2^64 is a hair above zero
        let up = amount_b_for_liquidity(ONE_X64, ONE_X64 + 1, 1000, true).unwrap();
        let down = amount_b_for_liquidity(ONE_X64, ONE_X64 + 1, 1000, false).unwrap();
        assert_eq!(up, 1);
        assert_eq!(down, 0);
    }

    #[test]
    fn liquidity_inverts_amounts() {
        assert_eq!(
            liquidity_for_amount_a(ONE_X64, TWO_X64, 500).unwrap(),
            1000
        );
        assert_eq!(
            liquidity_for_amount_b(ONE_X64, TWO_X64, 1000).unwrap(),
            1000
        );
    }

    #[test]
    fn next_price_steps() {
        // B in: price rises by amount/L
        assert_eq!(
            next_sqrt_price_from_amount_b_in(ONE_X64, 1000, 500).unwrap(),
            ONE_X64 + ONE_X64 / 2
        );
        // A in from price 2 with L=1000, amount 500: back to exactly 1
        assert_eq!(
            next_sqrt_price_from_amount_a_in(TWO_X64, 1000, 500).unwrap(),
            ONE_X64
        );
        // Zero input leaves the price alone
        assert_eq!(
            next_sqrt_price_from_amount_a_in(TWO_X64, 1000, 0).unwrap(),
            TWO_X64
        );
    }

    #[test]
    fn exact_output_steps() {
        // B out: price falls by ceil(amount/L)
        assert_eq!(
            next_sqrt_price_from_amount_b_out(TWO_X64, 1000, 500).unwrap(),
            TWO_X64 - ONE_X64 / 2
        );
        // A out of a pool that cannot cover it
        assert!(next_sqrt_price_from_amount_a_out(ONE_X64, 10, u64::MAX).is_err());
        // B out larger than the price can fall
        assert!(next_sqrt_price_from_amount_b_out(ONE_X64, 1, u64::MAX).is_err());
    }

    #[test]
    fn in_and_out_steps_are_consistent() {
        // Moving the price down with A in, then asking how much B that
        // releases, must match amount_b over the same segment.
        let start = TWO_X64;
        let liquidity = 1_000_000u128;
        let end = next_sqrt_price_from_amount_a_in(start, liquidity, 12_345).unwrap();
        let b_released = amount_b_for_liquidity(end, start, liquidity, false).unwrap();
        assert!(b_released > 0);
        let back = next_sqrt_price_from_amount_b_out(start, liquidity, b_released).unwrap();
        assert!(back >= end);
    }

    #[test]
    fn overflow_is_detected_not_wrapped() {
        assert!(
            amount_a_for_liquidity(1, u128::MAX, u128::MAX, false).is_err()
        );
        assert!(next_sqrt_price_from_amount_b_in(u128::MAX, 1, u64::MAX).is_err());
    }

    #[test]
    fn narrowing_overflow_rejected() {
        // Amount would exceed u64::MAX
        assert!(
            amount_b_for_liquidity(ONE_X64, u64::MAX as u128 * Q64, 1u128 << 70, false).is_err()
        );
    }
}
