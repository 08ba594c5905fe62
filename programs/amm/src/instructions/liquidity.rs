//! Whole-pool liquidity provisioning: amounts in both tokens at the current
//! price, no owner-indexed record. Shares the pool's aggregate liquidity and
//! vaults with the position path.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::POOL_AUTHORITY_SEED;
use crate::error::AmmError;
use crate::events::{LiquidityAdded, LiquidityRemoved};
use crate::logic::liquidity_ops;
use crate::math::SafeMath;
use crate::state::Pool;
use crate::transfers::{transfer_from_user, transfer_from_vault};

#[derive(Accounts)]
pub struct ModifyLiquidity<'info> {
    #[account(mut)]
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
        constraint = user_token_account_a.mint == pool.token_mint_a @ AmmError::InvalidVault
    )]
    pub user_token_account_a: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_token_account_b.mint == pool.token_mint_b @ AmmError::InvalidVault
    )]
    pub user_token_account_b: Account<'info, TokenAccount>,

    /// CHECK: data-less PDA that signs vault transfers
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool.key().as_ref()],
        bump = pool.auth_bump
    )]
    pub pool_authority: UncheckedAccount<'info>,

    pub user: Signer<'info>,
    pub token_program: Program<'info, Token>,
}

pub fn add_liquidity(ctx: Context<ModifyLiquidity>, amount_a: u64, amount_b: u64) -> Result<()> {
    let grant = liquidity_ops::deposit(ctx.accounts.pool.sqrt_price_x64, amount_a, amount_b)?;

    transfer_from_user(
        &ctx.accounts.user_token_account_a,
        &ctx.accounts.token_vault_a,
        &ctx.accounts.user,
        &ctx.accounts.token_program,
        grant.amount_a,
    )?;
    transfer_from_user(
        &ctx.accounts.user_token_account_b,
        &ctx.accounts.token_vault_b,
        &ctx.accounts.user,
        &ctx.accounts.token_program,
        grant.amount_b,
    )?;

    let pool = &mut ctx.accounts.pool;
    pool.liquidity = pool.liquidity.safe_add(grant.liquidity)?;

    let clock = Clock::get()?;
    emit!(LiquidityAdded {
        pool: pool.key(),
        user: ctx.accounts.user.key(),
        liquidity_delta: grant.liquidity,
        amount_a: grant.amount_a,
        amount_b: grant.amount_b,
        timestamp: clock.unix_timestamp,
    });
    msg!(
        "Liquidity added: delta={}, amounts=({}, {})",
        grant.liquidity,
        grant.amount_a,
        grant.amount_b
    );
    Ok(())
}

pub fn remove_liquidity(ctx: Context<ModifyLiquidity>, amount_a: u64, amount_b: u64) -> Result<()> {
    let claim = liquidity_ops::withdraw(ctx.accounts.pool.sqrt_price_x64, amount_a, amount_b)?;

    let pool = &mut ctx.accounts.pool;
    pool.liquidity = pool
        .liquidity
        .checked_sub(claim.liquidity)
        .ok_or(AmmError::InsufficientLiquidity)?;

    let pool_key = pool.key();
    let auth_bump = [pool.auth_bump];
    let auth_seeds: &[&[u8]] = &[POOL_AUTHORITY_SEED, pool_key.as_ref(), &auth_bump];

    transfer_from_vault(
        &ctx.accounts.token_vault_a,
        &ctx.accounts.user_token_account_a,
        &ctx.accounts.pool_authority,
        &ctx.accounts.token_program,
        &[auth_seeds],
        claim.amount_a,
    )?;
    transfer_from_vault(
        &ctx.accounts.token_vault_b,
        &ctx.accounts.user_token_account_b,
        &ctx.accounts.pool_authority,
        &ctx.accounts.token_program,
        &[auth_seeds],
        claim.amount_b,
    )?;

    let clock = Clock::get()?;
    emit!(LiquidityRemoved {
        pool: pool_key,
        user: ctx.accounts.user.key(),
        liquidity_delta: claim.liquidity,
        amount_a: claim.amount_a,
        amount_b: claim.amount_b,
        timestamp: clock.unix_timestamp,
    });
    msg!(
        "Liquidity removed: delta={}, amounts=({}, {})",
        claim.liquidity,
        claim.amount_a,
        claim.amount_b
    );
    Ok(())
}
