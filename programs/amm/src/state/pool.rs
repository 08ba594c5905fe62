//! Per-trading-pair custodial state.

use anchor_lang::prelude::*;

/// One pool per `(config, token_mint_a, token_mint_b)` with
/// `token_mint_a < token_mint_b`. Vault funds can only move under the
/// `pool_authority` PDA signature, never under a human key.
#[account]
#[derive(Default)]
pub struct Pool {
    pub bump: u8,
    /// Bump of the `["pool_authority", pool]` PDA controlling both vaults
    pub auth_bump: u8,
    pub config: Pubkey,
    pub token_mint_a: Pubkey,
    pub token_mint_b: Pubkey,
    pub token_vault_a: Pubkey,
    pub token_vault_b: Pubkey,
    /// Current sqrt price, Q64.64
    pub sqrt_price_x64: u128,
    /// Tick corresponding to the current sqrt price (floor)
    pub current_tick: i32,
    pub tick_spacing: u16,
    /// Active liquidity shared by the whole-pool and position paths
    pub liquidity: u128,
    /// Cumulative fees per unit of liquidity, Q64.64
    pub fee_growth_global_a_x64: u128,
    pub fee_growth_global_b_x64: u128,
    /// Uncollected protocol fees, accrued in the swap's input token
    pub protocol_fees_owed_a: u64,
    pub protocol_fees_owed_b: u64,
}

impl Pool {
    pub const SIZE: usize = 8 + // discriminator
        1 +      // bump
        1 +      // auth_bump
        32 * 5 + // config, mints, vaults
        16 +     // sqrt_price_x64
        4 +      // current_tick
        2 +      // tick_spacing
        16 +     // liquidity
        16 +     // fee_growth_global_a_x64
        16 +     // fee_growth_global_b_x64
        8 +      // protocol_fees_owed_a
        8; // protocol_fees_owed_b
}
