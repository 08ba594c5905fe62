//! Collect a position's settled fees out of the pool vaults.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::POOL_AUTHORITY_SEED;
use crate::error::AmmError;
use crate::events::PositionFeesCollected;
use crate::logic::position_fees;
use crate::state::{Pool, Position};
use crate::transfers::transfer_from_vault;

#[derive(Accounts)]
pub struct CollectPositionFees<'info> {
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        has_one = pool @ AmmError::PositionNotFound,
        has_one = owner @ AmmError::Unauthorized
    )]
    pub position: Account<'info, Position>,

    pub owner: Signer<'info>,

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
        constraint = owner_token_account_a.mint == pool.token_mint_a @ AmmError::InvalidVault
    )]
    pub owner_token_account_a: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = owner_token_account_b.mint == pool.token_mint_b @ AmmError::InvalidVault
    )]
    pub owner_token_account_b: Account<'info, TokenAccount>,

    /// CHECK: data-less PDA that signs vault transfers
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool.key().as_ref()],
        bump = pool.auth_bump
    )]
    pub pool_authority: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn collect_position_fees(ctx: Context<CollectPositionFees>) -> Result<()> {
    {
        let pool = &ctx.accounts.pool;
        position_fees::settle_position_fees(
            &mut ctx.accounts.position,
            pool.fee_growth_global_a_x64,
            pool.fee_growth_global_b_x64,
        )?;
    }

    let position = &mut ctx.accounts.position;
    let amount_a = position.tokens_owed_a;
    let amount_b = position.tokens_owed_b;
    require!(amount_a > 0 || amount_b > 0, AmmError::NoFeesToCollect);
    position.tokens_owed_a = 0;
    position.tokens_owed_b = 0;

    let pool_key = ctx.accounts.pool.key();
    let auth_bump = [ctx.accounts.pool.auth_bump];
    let auth_seeds: &[&[u8]] = &[POOL_AUTHORITY_SEED, pool_key.as_ref(), &auth_bump];

    transfer_from_vault(
        &ctx.accounts.token_vault_a,
        &ctx.accounts.owner_token_account_a,
        &ctx.accounts.pool_authority,
        &ctx.accounts.token_program,
        &[auth_seeds],
        amount_a,
    )?;
    transfer_from_vault(
        &ctx.accounts.token_vault_b,
        &ctx.accounts.owner_token_account_b,
        &ctx.accounts.pool_authority,
        &ctx.accounts.token_program,
        &[auth_seeds],
        amount_b,
    )?;

    let clock = Clock::get()?;
    emit!(PositionFeesCollected {
        pool: pool_key,
        position: ctx.accounts.position.key(),
        amount_a,
        amount_b,
        timestamp: clock.unix_timestamp,
    });
    msg!("Position fees collected: ({}, {})", amount_a, amount_b);
    Ok(())
}
