//! Position fee settlement against the pool's global accumulators.

use anchor_lang::prelude::*;
use ethnum::U256;

use crate::error::AmmError;
use crate::math::SafeMath;
use crate::state::Position;

/// Fold the fee growth since the position's last checkpoint into its owed
/// balances and move the checkpoint forward. Runs before every liquidity
/// change so the owed amounts always reflect the liquidity that earned them.
pub fn settle_position_fees(
    position: &mut Position,
    fee_growth_global_a_x64: u128,
    fee_growth_global_b_x64: u128,
) -> Result<()> {
    let owed_a = owed_since_checkpoint(
        position.liquidity,
        position.fee_growth_checkpoint_a_x64,
        fee_growth_global_a_x64,
    )?;
    let owed_b = owed_since_checkpoint(
        position.liquidity,
        position.fee_growth_checkpoint_b_x64,
        fee_growth_global_b_x64,
    )?;

    position.tokens_owed_a = position.tokens_owed_a.safe_add(owed_a)?;
    position.tokens_owed_b = position.tokens_owed_b.safe_add(owed_b)?;
    position.fee_growth_checkpoint_a_x64 = fee_growth_global_a_x64;
    position.fee_growth_checkpoint_b_x64 = fee_growth_global_b_x64;
    Ok(())
}

fn owed_since_checkpoint(liquidity: u128, checkpoint_x64: u128, global_x64: u128) -> Result<u64> {
    if liquidity == 0 {
        return Ok(0);
    }
    // Accumulators are monotone; a checkpoint ahead of the global value
    // means corrupted state and must not be papered over.
    let delta = global_x64
        .checked_sub(checkpoint_x64)
        .ok_or(AmmError::ArithmeticOverflow)?;
    let owed = (U256::from(liquidity) * U256::from(delta)) >> 64u32;
    if owed > U256::from(u64::MAX) {
        return Err(AmmError::ArithmeticOverflow.into());
    }
    Ok(owed.as_u64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::Q64;

    fn position_with(liquidity: u128) -> Position {
        Position {
            liquidity,
            ..Default::default()
        }
    }

    #[test]
    fn owed_scales_with_liquidity_and_growth() {
        let mut position = position_with(1000);
        settle_position_fees(&mut position, 5 * Q64, 2 * Q64).unwrap();
        assert_eq!(position.tokens_owed_a, 5000);
        assert_eq!(position.tokens_owed_b, 2000);
        assert_eq!(position.fee_growth_checkpoint_a_x64, 5 * Q64);
        assert_eq!(position.fee_growth_checkpoint_b_x64, 2 * Q64);
    }

    #[test]
    fn settling_twice_at_the_same_growth_adds_nothing() {
        let mut position = position_with(1000);
        settle_position_fees(&mut position, 5 * Q64, 0).unwrap();
        settle_position_fees(&mut position, 5 * Q64, 0).unwrap();
        assert_eq!(position.tokens_owed_a, 5000);
    }

    #[test]
    fn zero_liquidity_accrues_nothing_but_advances_checkpoint() {
        let mut position = position_with(0);
        settle_position_fees(&mut position, 9 * Q64, 9 * Q64).unwrap();
        assert_eq!(position.tokens_owed_a, 0);
        assert_eq!(position.tokens_owed_b, 0);
        assert_eq!(position.fee_growth_checkpoint_a_x64, 9 * Q64);
    }

    #[test]
    fn regressed_accumulator_is_rejected() {
        let mut position = position_with(1000);
        position.fee_growth_checkpoint_a_x64 = 10 * Q64;
        assert!(settle_position_fees(&mut position, 9 * Q64, 0).is_err());
    }

    #[test]
    fn sub_unit_growth_truncates_down() {
        let mut position = position_with(3);
        // One third of a token per unit of liquidity
        settle_position_fees(&mut position, Q64 / 3, 0).unwrap();
        assert_eq!(position.tokens_owed_a, 0);
    }
}
