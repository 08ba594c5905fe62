//! Liquidity deltas for the deposit/withdraw entrypoints.
//!
//! Callers state token amounts; the delta granted or surrendered is the
//! largest liquidity both amounts can back at the current price over the
//! whole usable range, and the amounts actually moved are recomputed from
//! that delta. Deposits round up (the depositor pays the dust), withdrawals
//! round down (the pool keeps it), which is what makes an add/remove
//! round trip conserve pool state.

use anchor_lang::prelude::*;

use crate::constants::{MAX_SQRT_PRICE_X64, MIN_SQRT_PRICE_X64};
use crate::error::AmmError;
use crate::math::liquidity_math;

/// A liquidity delta together with the token amounts that move for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityAmounts {
    pub liquidity: u128,
    pub amount_a: u64,
    pub amount_b: u64,
}

/// Largest liquidity backed by both amounts at the current price, floor.
pub fn liquidity_from_amounts(
    sqrt_price_x64: u128,
    amount_a: u64,
    amount_b: u64,
) -> Result<u128> {
    // At a range edge one token is not needed and does not constrain the delta.
    let from_a = if sqrt_price_x64 < MAX_SQRT_PRICE_X64 {
        liquidity_math::liquidity_for_amount_a(sqrt_price_x64, MAX_SQRT_PRICE_X64, amount_a)?
    } else {
        u128::MAX
    };
    let from_b = if sqrt_price_x64 > MIN_SQRT_PRICE_X64 {
        liquidity_math::liquidity_for_amount_b(MIN_SQRT_PRICE_X64, sqrt_price_x64, amount_b)?
    } else {
        u128::MAX
    };
    Ok(from_a.min(from_b))
}

/// Token amounts corresponding to a liquidity delta at the current price.
pub fn amounts_for_liquidity(
    sqrt_price_x64: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<(u64, u64)> {
    let amount_a = liquidity_math::amount_a_for_liquidity(
        sqrt_price_x64,
        MAX_SQRT_PRICE_X64,
        liquidity,
        round_up,
    )?;
    let amount_b = liquidity_math::amount_b_for_liquidity(
        MIN_SQRT_PRICE_X64,
        sqrt_price_x64,
        liquidity,
        round_up,
    )?;
    Ok((amount_a, amount_b))
}

/// Resolve a deposit request into the granted delta and the amounts owed.
pub fn deposit(sqrt_price_x64: u128, amount_a: u64, amount_b: u64) -> Result<LiquidityAmounts> {
    require!(amount_a > 0 && amount_b > 0, AmmError::ZeroAmount);

    let liquidity = liquidity_from_amounts(sqrt_price_x64, amount_a, amount_b)?;
    require!(liquidity > 0, AmmError::ZeroLiquidity);

    let (need_a, need_b) = amounts_for_liquidity(sqrt_price_x64, liquidity, true)?;
    // Rounding can nominally ask one unit past the stated amounts; never
    // charge beyond what the caller offered.
    Ok(LiquidityAmounts {
        liquidity,
        amount_a: need_a.min(amount_a),
        amount_b: need_b.min(amount_b),
    })
}

/// Resolve a withdrawal request into the surrendered delta and the payouts.
pub fn withdraw(sqrt_price_x64: u128, amount_a: u64, amount_b: u64) -> Result<LiquidityAmounts> {
    require!(amount_a > 0 && amount_b > 0, AmmError::ZeroAmount);

    let liquidity = liquidity_from_amounts(sqrt_price_x64, amount_a, amount_b)?;
    require!(liquidity > 0, AmmError::ZeroLiquidity);

    let (out_a, out_b) = amounts_for_liquidity(sqrt_price_x64, liquidity, false)?;
    Ok(LiquidityAmounts {
        liquidity,
        amount_a: out_a,
        amount_b: out_b,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::Q64;

    #[test]
    fn balanced_deposit_at_unit_price() {
        let grant = deposit(Q64, 1_000_000, 1_000_000).unwrap();
        assert_eq!(grant.liquidity, 1_000_000);
        assert_eq!(grant.amount_a, 1_000_000);
        assert_eq!(grant.amount_b, 1_000_000);
    }

    #[test]
    fn zero_amounts_rejected() {
        assert!(deposit(Q64, 0, 1_000).is_err());
        assert!(deposit(Q64, 1_000, 0).is_err());
        assert!(withdraw(Q64, 0, 0).is_err());
    }

    #[test]
    fn dust_that_rounds_to_no_liquidity_is_rejected() {
        // Near the top of the range a token-B sliver backs almost nothing
        assert!(deposit(MAX_SQRT_PRICE_X64 - 1, 1, 1).is_err());
    }

    #[test]
    fn unbalanced_amounts_bind_on_the_scarcer_side() {
        let grant = deposit(Q64, 10, 1_000_000).unwrap();
        // Token A is the constraint; token B owed shrinks to match it
        assert!(grant.liquidity <= 10);
        assert!(grant.amount_b <= 11);
    }

    #[test]
    fn withdraw_pays_out_no_more_than_deposit_took_in() {
        let price = Q64 * 3 / 2;
        let grant = deposit(price, 500_000, 700_000).unwrap();
        let claim = withdraw(price, 500_000, 700_000).unwrap();
        assert_eq!(claim.liquidity, grant.liquidity);
        assert!(claim.amount_a <= grant.amount_a);
        assert!(claim.amount_b <= grant.amount_b);
        // Floor/ceil differ by at most one unit per side
        assert!(grant.amount_a - claim.amount_a <= 1);
        assert!(grant.amount_b - claim.amount_b <= 1);
    }

    #[test]
    fn round_trip_restores_pool_liquidity() {
        let mut pool_liquidity: u128 = 777;
        let grant = deposit(Q64, 123_456, 123_456).unwrap();
        pool_liquidity += grant.liquidity;
        let claim = withdraw(Q64, 123_456, 123_456).unwrap();
        assert!(claim.liquidity <= pool_liquidity);
        pool_liquidity -= claim.liquidity;
        assert_eq!(pool_liquidity, 777);
    }
}
