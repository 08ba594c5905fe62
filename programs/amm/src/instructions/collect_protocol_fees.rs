//! Authority-gated collection of accrued protocol fees. Proceeds can only
//! land in token accounts owned by the configured fee destination.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{AMM_CONFIG_SEED, POOL_AUTHORITY_SEED};
use crate::error::AmmError;
use crate::events::ProtocolFeesCollected;
use crate::state::{AmmConfig, Pool};
use crate::transfers::transfer_from_vault;

#[derive(Accounts)]
pub struct CollectProtocolFees<'info> {
    #[account(seeds = [AMM_CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, AmmConfig>,

    pub authority: Signer<'info>,

    #[account(mut, has_one = config)]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        constraint = token_vault_a.key() == pool.token_vault_a @ AmmError::InvalidVault
    )]
    pub token_vault_a: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = token_vault_b.key() == pool.token_vault_b @ AmmError::InvalidVault
    )]
    pub token_vault_b: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = recipient_a.owner == config.protocol_fee_destination @ AmmError::Unauthorized,
        constraint = recipient_a.mint == pool.token_mint_a @ AmmError::InvalidVault
    )]
    pub recipient_a: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = recipient_b.owner == config.protocol_fee_destination @ AmmError::Unauthorized,
        constraint = recipient_b.mint == pool.token_mint_b @ AmmError::InvalidVault
    )]
    pub recipient_b: Account<'info, TokenAccount>,

    /// CHECK: data-less PDA that signs vault transfers
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool.key().as_ref()],
        bump = pool.auth_bump
    )]
    pub pool_authority: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn collect_protocol_fees(
    ctx: Context<CollectProtocolFees>,
    amount_a_requested: u64,
    amount_b_requested: u64,
) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.authority.key(),
        ctx.accounts.config.authority,
        AmmError::Unauthorized
    );

    let pool = &mut ctx.accounts.pool;
    let amount_a = amount_a_requested.min(pool.protocol_fees_owed_a);
    let amount_b = amount_b_requested.min(pool.protocol_fees_owed_b);
    require!(amount_a > 0 || amount_b > 0, AmmError::NoFeesToCollect);

    pool.protocol_fees_owed_a -= amount_a;
    pool.protocol_fees_owed_b -= amount_b;

    let pool_key = pool.key();
    let auth_bump = [pool.auth_bump];
    let auth_seeds: &[&[u8]] = &[POOL_AUTHORITY_SEED, pool_key.as_ref(), &auth_bump];

    transfer_from_vault(
        &ctx.accounts.token_vault_a,
        &ctx.accounts.recipient_a,
        &ctx.accounts.pool_authority,
        &ctx.accounts.token_program,
        &[auth_seeds],
        amount_a,
    )?;
    transfer_from_vault(
        &ctx.accounts.token_vault_b,
        &ctx.accounts.recipient_b,
        &ctx.accounts.pool_authority,
        &ctx.accounts.token_program,
        &[auth_seeds],
        amount_b,
    )?;

    let clock = Clock::get()?;
    emit!(ProtocolFeesCollected {
        pool: pool_key,
        collector: ctx.accounts.authority.key(),
        amount_a,
        amount_b,
        timestamp: clock.unix_timestamp,
    });
    msg!("Protocol fees collected: ({}, {})", amount_a, amount_b);
    Ok(())
}
