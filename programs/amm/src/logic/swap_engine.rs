//! Pure swap execution against a constant-liquidity pool.
//!
//! The engine walks the price along the curve one tick-spacing segment at a
//! time: each iteration targets the nearest spacing boundary in the swap
//! direction, consumes input up to that boundary, and crosses it if the
//! remaining input reaches it. Liquidity is uniform across the whole tick
//! range in this model, so a crossing only moves `current_tick`; the step
//! count is still bounded so a crafted input cannot force unbounded work.

use anchor_lang::prelude::*;

use crate::constants::{MAX_SWAP_STEPS, MAX_TICK, MIN_TICK};
use crate::error::AmmError;
use crate::math::fee_math::{self, FeeSplit};
use crate::math::{liquidity_math, tick_math, SafeMath};
use crate::state::{ObservationState, Pool};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapResult {
    pub next_sqrt_price_x64: u128,
    pub next_tick: i32,
    pub amount_out: u64,
    pub ticks_crossed: u32,
}

/// What a committed swap did, for the caller's transfers and events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapOutcome {
    pub amount_out: u64,
    pub fees: FeeSplit,
    pub ticks_crossed: u32,
}

/// Full swap state transition against a pool: fee split, curve walk,
/// slippage bound, fee accrual, price/tick update, and the oracle side
/// effect. Nothing is written until every check has passed, so a failure
/// leaves both accounts exactly as they were.
#[allow(clippy::too_many_arguments)]
pub fn execute_swap(
    pool: &mut Pool,
    observation: &mut ObservationState,
    fee_rate: u32,
    protocol_fee_rate: u32,
    amount_in: u64,
    minimum_amount_out: u64,
    a_to_b: bool,
    now: i64,
) -> Result<SwapOutcome> {
    require!(amount_in > 0, AmmError::ZeroAmount);
    require!(pool.liquidity > 0, AmmError::InsufficientLiquidity);

    let fees = fee_math::split_fee(amount_in, fee_rate, protocol_fee_rate, pool.liquidity)?;
    let net_in = amount_in - fees.total;

    let result = compute_swap(
        pool.sqrt_price_x64,
        pool.current_tick,
        pool.liquidity,
        pool.tick_spacing,
        net_in,
        a_to_b,
    )?;
    require!(
        result.amount_out >= minimum_amount_out,
        AmmError::SlippageExceeded
    );

    // The pre-swap tick is what accrues to the oracle.
    observation.observe(pool.current_tick, now)?;

    if a_to_b {
        pool.protocol_fees_owed_a = pool.protocol_fees_owed_a.safe_add(fees.protocol)?;
        if fees.lp > 0 {
            pool.fee_growth_global_a_x64 = pool
                .fee_growth_global_a_x64
                .safe_add(fee_math::fee_growth_delta(fees.lp, pool.liquidity)?)?;
        }
    } else {
        pool.protocol_fees_owed_b = pool.protocol_fees_owed_b.safe_add(fees.protocol)?;
        if fees.lp > 0 {
            pool.fee_growth_global_b_x64 = pool
                .fee_growth_global_b_x64
                .safe_add(fee_math::fee_growth_delta(fees.lp, pool.liquidity)?)?;
        }
    }
    pool.sqrt_price_x64 = result.next_sqrt_price_x64;
    pool.current_tick = result.next_tick;

    Ok(SwapOutcome {
        amount_out: result.amount_out,
        fees,
        ticks_crossed: result.ticks_crossed,
    })
}

/// Advance the price by `amount_in` (already net of fees) and compute the
/// output owed for the move. Fails rather than leaving the supported price
/// range or exceeding the crossing ceiling.
pub fn compute_swap(
    sqrt_price_x64: u128,
    current_tick: i32,
    liquidity: u128,
    tick_spacing: u16,
    amount_in: u64,
    a_to_b: bool,
) -> Result<SwapResult> {
    require!(liquidity > 0, AmmError::InsufficientLiquidity);

    let spacing = tick_spacing as i32;
    let mut sqrt_price = sqrt_price_x64;
    let mut tick = current_tick;
    let mut remaining = amount_in;
    let mut amount_out: u64 = 0;
    let mut ticks_crossed: u32 = 0;
    let mut steps: u32 = 0;

    while remaining > 0 {
        steps += 1;
        require!(steps <= MAX_SWAP_STEPS, AmmError::TooManyTicksCrossed);

        let (boundary_tick, boundary_sqrt) = if a_to_b {
            next_boundary_down(tick, spacing, sqrt_price)?
        } else {
            next_boundary_up(tick, spacing, sqrt_price)?
        };

        // Input needed to push the price all the way to the boundary,
        // rounded up so reaching it is never undercharged.
        let input_to_boundary = if a_to_b {
            liquidity_math::amount_a_for_liquidity(boundary_sqrt, sqrt_price, liquidity, true)?
        } else {
            liquidity_math::amount_b_for_liquidity(sqrt_price, boundary_sqrt, liquidity, true)?
        };

        if remaining >= input_to_boundary {
            let out = segment_output(boundary_sqrt, sqrt_price, liquidity, a_to_b)?;
            amount_out = amount_out
                .checked_add(out)
                .ok_or(AmmError::ArithmeticOverflow)?;
            remaining -= input_to_boundary;
            sqrt_price = boundary_sqrt;
            tick = boundary_tick;
            ticks_crossed += 1;

            if remaining > 0 {
                // No liquidity exists beyond the extreme ticks.
                require!(
                    tick > MIN_TICK && tick < MAX_TICK,
                    AmmError::PriceOutOfBounds
                );
            }
        } else {
            let next_sqrt = if a_to_b {
                liquidity_math::next_sqrt_price_from_amount_a_in(sqrt_price, liquidity, remaining)?
            } else {
                liquidity_math::next_sqrt_price_from_amount_b_in(sqrt_price, liquidity, remaining)?
            };
            let out = segment_output(next_sqrt, sqrt_price, liquidity, a_to_b)?;
            amount_out = amount_out
                .checked_add(out)
                .ok_or(AmmError::ArithmeticOverflow)?;
            sqrt_price = next_sqrt;
            tick = tick_math::tick_at_sqrt_price(next_sqrt)?;
            remaining = 0;
        }
    }

    Ok(SwapResult {
        next_sqrt_price_x64: sqrt_price,
        next_tick: tick,
        amount_out,
        ticks_crossed,
    })
}

/// Output owed for a completed segment, rounded down (the pool keeps dust).
fn segment_output(
    sqrt_end: u128,
    sqrt_start: u128,
    liquidity: u128,
    a_to_b: bool,
) -> Result<u64> {
    if a_to_b {
        liquidity_math::amount_b_for_liquidity(sqrt_end, sqrt_start, liquidity, false)
    } else {
        liquidity_math::amount_a_for_liquidity(sqrt_start, sqrt_end, liquidity, false)
    }
}

/// Nearest spacing boundary strictly below the current price.
fn next_boundary_down(tick: i32, spacing: i32, sqrt_price: u128) -> Result<(i32, u128)> {
    let mut target = (tick.div_euclid(spacing) * spacing).max(MIN_TICK);
    let mut target_sqrt = tick_math::sqrt_price_at_tick(target)?;
    if target_sqrt >= sqrt_price {
        // Price sits exactly on this boundary; aim one spacing further.
        require!(target > MIN_TICK, AmmError::PriceOutOfBounds);
        target = (target - spacing).max(MIN_TICK);
        target_sqrt = tick_math::sqrt_price_at_tick(target)?;
    }
    Ok((target, target_sqrt))
}

/// Nearest spacing boundary strictly above the current price.
fn next_boundary_up(tick: i32, spacing: i32, sqrt_price: u128) -> Result<(i32, u128)> {
    let mut target = ((tick.div_euclid(spacing) + 1) * spacing).min(MAX_TICK);
    let mut target_sqrt = tick_math::sqrt_price_at_tick(target)?;
    if target_sqrt <= sqrt_price {
        require!(target < MAX_TICK, AmmError::PriceOutOfBounds);
        target = (target + spacing).min(MAX_TICK);
        target_sqrt = tick_math::sqrt_price_at_tick(target)?;
    }
    Ok((target, target_sqrt))
}
