//! Trading-fee computation: the ppm fee on the input amount, its
//! protocol/LP split, and the per-unit-liquidity growth increment.

use anchor_lang::prelude::*;

use crate::constants::{FEE_RATE_DENOMINATOR, PROTOCOL_FEE_RATE_DENOMINATOR};
use crate::error::AmmError;

/// Outcome of splitting one swap's trading fee. The protocol cut is taken
/// first; liquidity providers receive the exact remainder, so the split is
/// deterministic and conserves the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSplit {
    pub total: u64,
    pub protocol: u64,
    pub lp: u64,
}

/// Compute the fee on `amount_in` and split it. With zero active liquidity
/// there is no LP to credit and the whole fee routes to the protocol.
pub fn split_fee(
    amount_in: u64,
    fee_rate: u32,
    protocol_fee_rate: u32,
    liquidity: u128,
) -> Result<FeeSplit> {
    let total = (amount_in as u128)
        .checked_mul(fee_rate as u128)
        .ok_or(AmmError::ArithmeticOverflow)?
        / FEE_RATE_DENOMINATOR;
    // fee_rate <= FEE_RATE_MAX keeps this within u64
    let total = u64::try_from(total).map_err(|_| AmmError::ArithmeticOverflow)?;

    if liquidity == 0 {
        return Ok(FeeSplit {
            total,
            protocol: total,
            lp: 0,
        });
    }

    let protocol = ((total as u128) * (protocol_fee_rate as u128)
        / PROTOCOL_FEE_RATE_DENOMINATOR) as u64;
    Ok(FeeSplit {
        total,
        protocol,
        lp: total - protocol,
    })
}

/// Fee growth per unit of liquidity in Q64.64: `fee * 2^64 / liquidity`.
/// Callers must route the fee to the protocol instead when liquidity is zero.
pub fn fee_growth_delta(fee: u64, liquidity: u128) -> Result<u128> {
    require!(liquidity > 0, AmmError::DivisionByZero);
    Ok(((fee as u128) << 64) / liquidity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FEE_RATE_MAX, PROTOCOL_FEE_RATE_MAX, Q64};

    #[test]
    fn split_is_deterministic_and_conserving() {
        // 3000 ppm on 1_000_000 in, 2000/10000 of it to the protocol
        let split = split_fee(1_000_000, 3000, 2000, 1).unwrap();
        assert_eq!(split.total, 3000);
        assert_eq!(split.protocol, 600);
        assert_eq!(split.lp, 2400);
        assert_eq!(split.protocol + split.lp, split.total);
    }

    #[test]
    fn truncation_favors_lp_remainder() {
        // total = 10, protocol share 3333/10000 floors to 3
        let split = split_fee(10_000, 1000, 3333, 1).unwrap();
        assert_eq!(split.total, 10);
        assert_eq!(split.protocol, 3);
        assert_eq!(split.lp, 7);
    }

    #[test]
    fn max_rates() {
        let split = split_fee(1_000_000, FEE_RATE_MAX, PROTOCOL_FEE_RATE_MAX, 1).unwrap();
        assert_eq!(split.total, 10_000);
        assert_eq!(split.protocol, 10_000);
        assert_eq!(split.lp, 0);
    }

    #[test]
    fn zero_liquidity_routes_everything_to_protocol() {
        let split = split_fee(1_000_000, 3000, 0, 0).unwrap();
        assert_eq!(split.total, 3000);
        assert_eq!(split.protocol, 3000);
        assert_eq!(split.lp, 0);
    }

    #[test]
    fn growth_delta_scales_inversely_with_liquidity() {
        assert_eq!(fee_growth_delta(5, 1).unwrap(), 5 * Q64);
        assert_eq!(fee_growth_delta(1000, 2000).unwrap(), Q64 / 2);
        assert!(fee_growth_delta(1, 0).is_err());
    }
}
