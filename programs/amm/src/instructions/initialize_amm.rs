//! One-time creation of the deployment-wide configuration record.

use anchor_lang::prelude::*;

use crate::constants::AMM_CONFIG_SEED;
use crate::error::AmmError;
use crate::state::AmmConfig;

#[derive(Accounts)]
pub struct InitializeAmm<'info> {
    /// Canonical config record. `init_if_needed` plus the freshness check in
    /// the handler turns a second initialization into `AlreadyInitialized`
    /// instead of a raw allocation failure.
    #[account(
        init_if_needed,
        payer = authority,
        space = AmmConfig::SIZE,
        seeds = [AMM_CONFIG_SEED],
        bump
    )]
    pub amm_config: Account<'info, AmmConfig>,

    #[account(mut)]
    pub authority: Signer<'info>,

    /// CHECK: recorded as the owner protocol fee payouts must go to;
    /// never read or written here
    pub protocol_fee_destination: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn initialize_amm(
    ctx: Context<InitializeAmm>,
    fee_rate: u32,
    protocol_fee_rate: u32,
) -> Result<()> {
    AmmConfig::validate_rates(fee_rate, protocol_fee_rate)?;

    let config = &mut ctx.accounts.amm_config;
    require!(
        config.authority == Pubkey::default(),
        AmmError::AlreadyInitialized
    );

    config.bump = ctx.bumps.amm_config;
    config.authority = ctx.accounts.authority.key();
    config.protocol_fee_destination = ctx.accounts.protocol_fee_destination.key();
    config.fee_rate = fee_rate;
    config.protocol_fee_rate = protocol_fee_rate;
    config.create_pool_enabled = true;
    config.swap_enabled = true;

    msg!(
        "AMM initialized: fee_rate={} ppm, protocol_fee_rate={}/10000",
        fee_rate,
        protocol_fee_rate
    );
    Ok(())
}
