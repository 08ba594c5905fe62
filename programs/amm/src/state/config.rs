//! Global per-deployment configuration.

use anchor_lang::prelude::*;

use crate::constants::{FEE_RATE_MAX, PROTOCOL_FEE_RATE_MAX};
use crate::error::AmmError;

/// Deployment-wide parameters. Created exactly once at the canonical
/// `["amm_config"]` address; every pool references it.
#[account]
#[derive(Default)]
pub struct AmmConfig {
    pub bump: u8,
    /// Only key allowed to run parameter updates and protocol fee collection
    pub authority: Pubkey,
    /// Owner of the token accounts protocol fees are paid out to
    pub protocol_fee_destination: Pubkey,
    /// Trading fee in parts per million of the input amount
    pub fee_rate: u32,
    /// Protocol share of the trading fee, in parts per ten thousand
    pub protocol_fee_rate: u32,
    pub create_pool_enabled: bool,
    pub swap_enabled: bool,
}

impl AmmConfig {
    pub const SIZE: usize = 8 + // discriminator
        1 +  // bump
        32 + // authority
        32 + // protocol_fee_destination
        4 +  // fee_rate
        4 +  // protocol_fee_rate
        1 +  // create_pool_enabled
        1; // swap_enabled

    /// Shared validation for creation and updates. A zero trading fee is as
    /// invalid as an excessive one.
    pub fn validate_rates(fee_rate: u32, protocol_fee_rate: u32) -> Result<()> {
        require!(
            fee_rate > 0 && fee_rate <= FEE_RATE_MAX,
            AmmError::InvalidFeeRate
        );
        require!(
            protocol_fee_rate <= PROTOCOL_FEE_RATE_MAX,
            AmmError::InvalidProtocolFeeRate
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_whole_valid_range() {
        assert!(AmmConfig::validate_rates(1, 0).is_ok());
        assert!(AmmConfig::validate_rates(3000, 2000).is_ok());
        assert!(AmmConfig::validate_rates(FEE_RATE_MAX, PROTOCOL_FEE_RATE_MAX).is_ok());
    }

    #[test]
    fn rejects_one_past_the_ceiling() {
        assert!(AmmConfig::validate_rates(FEE_RATE_MAX + 1, 0).is_err());
        assert!(AmmConfig::validate_rates(3000, PROTOCOL_FEE_RATE_MAX + 1).is_err());
    }

    #[test]
    fn rejects_zero_fee_rate() {
        assert!(AmmConfig::validate_rates(0, 0).is_err());
    }
}
