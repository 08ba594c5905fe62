//! Per-owner liquidity claim with fee checkpoints.

use anchor_lang::prelude::*;

/// Exactly one position per `(pool, owner)`, located at
/// `["position", pool, owner]`. Fees accrued since the last checkpoint are
/// settled into `tokens_owed_*` before any liquidity change.
#[account]
#[derive(Default)]
pub struct Position {
    pub bump: u8,
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub liquidity: u128,
    /// Global fee growth at the last settlement, Q64.64
    pub fee_growth_checkpoint_a_x64: u128,
    pub fee_growth_checkpoint_b_x64: u128,
    /// Settled fees awaiting collection
    pub tokens_owed_a: u64,
    pub tokens_owed_b: u64,
}

impl Position {
    pub const SIZE: usize = 8 + // discriminator
        1 +  // bump
        32 + // pool
        32 + // owner
        16 + // liquidity
        16 + // fee_growth_checkpoint_a_x64
        16 + // fee_growth_checkpoint_b_x64
        8 +  // tokens_owed_a
        8; // tokens_owed_b
}
