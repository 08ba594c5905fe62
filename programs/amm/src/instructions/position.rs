//! Owner-indexed liquidity positions: open plus increase/decrease with fee
//! settlement ahead of every liquidity change.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{POOL_AUTHORITY_SEED, POSITION_SEED};
use crate::error::AmmError;
use crate::events::{PositionLiquidityDecreased, PositionLiquidityIncreased, PositionOpened};
use crate::logic::{liquidity_ops, position_fees};
use crate::math::SafeMath;
use crate::state::{Pool, Position};
use crate::transfers::{transfer_from_user, transfer_from_vault};

#[derive(Accounts)]
pub struct OpenPosition<'info> {
    pub pool: Account<'info, Pool>,

    /// One per `(pool, owner)`. `init_if_needed` plus the freshness check in
    /// the handler reports a duplicate as `PositionAlreadyExists`.
    #[account(
        init_if_needed,
        payer = owner,
        space = Position::SIZE,
        seeds = [POSITION_SEED, pool.key().as_ref(), owner.key().as_ref()],
        bump
    )]
    pub position: Account<'info, Position>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ModifyPositionLiquidity<'info> {
    #[account(mut)]
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

    pub token_program: Program<'info, Token>,
}

pub fn open_position(ctx: Context<OpenPosition>) -> Result<()> {
    let pool = &ctx.accounts.pool;
    let position = &mut ctx.accounts.position;
    require!(
        position.owner == Pubkey::default(),
        AmmError::PositionAlreadyExists
    );

    position.bump = ctx.bumps.position;
    position.pool = pool.key();
    position.owner = ctx.accounts.owner.key();
    position.liquidity = 0;
    position.fee_growth_checkpoint_a_x64 = pool.fee_growth_global_a_x64;
    position.fee_growth_checkpoint_b_x64 = pool.fee_growth_global_b_x64;
    position.tokens_owed_a = 0;
    position.tokens_owed_b = 0;

    let clock = Clock::get()?;
    emit!(PositionOpened {
        pool: pool.key(),
        position: position.key(),
        owner: position.owner,
        timestamp: clock.unix_timestamp,
    });
    msg!("Position opened for {} on {}", position.owner, position.pool);
    Ok(())
}

pub fn increase_position_liquidity(
    ctx: Context<ModifyPositionLiquidity>,
    amount_a: u64,
    amount_b: u64,
) -> Result<()> {
    let grant = liquidity_ops::deposit(ctx.accounts.pool.sqrt_price_x64, amount_a, amount_b)?;

    // Fees earned by the current liquidity settle before the checkpoint moves.
    {
        let pool = &ctx.accounts.pool;
        position_fees::settle_position_fees(
            &mut ctx.accounts.position,
            pool.fee_growth_global_a_x64,
            pool.fee_growth_global_b_x64,
        )?;
    }

    transfer_from_user(
        &ctx.accounts.user_token_account_a,
        &ctx.accounts.token_vault_a,
        &ctx.accounts.owner,
        &ctx.accounts.token_program,
        grant.amount_a,
    )?;
    transfer_from_user(
        &ctx.accounts.user_token_account_b,
        &ctx.accounts.token_vault_b,
        &ctx.accounts.owner,
        &ctx.accounts.token_program,
        grant.amount_b,
    )?;

    let position = &mut ctx.accounts.position;
    position.liquidity = position.liquidity.safe_add(grant.liquidity)?;
    let pool = &mut ctx.accounts.pool;
    pool.liquidity = pool.liquidity.safe_add(grant.liquidity)?;

    let clock = Clock::get()?;
    emit!(PositionLiquidityIncreased {
        pool: pool.key(),
        position: ctx.accounts.position.key(),
        liquidity_delta: grant.liquidity,
        amount_a: grant.amount_a,
        amount_b: grant.amount_b,
        timestamp: clock.unix_timestamp,
    });
    Ok(())
}

pub fn decrease_position_liquidity(
    ctx: Context<ModifyPositionLiquidity>,
    amount_a: u64,
    amount_b: u64,
) -> Result<()> {
    let claim = liquidity_ops::withdraw(ctx.accounts.pool.sqrt_price_x64, amount_a, amount_b)?;

    {
        let pool = &ctx.accounts.pool;
        position_fees::settle_position_fees(
            &mut ctx.accounts.position,
            pool.fee_growth_global_a_x64,
            pool.fee_growth_global_b_x64,
        )?;
    }

    let position = &mut ctx.accounts.position;
    position.liquidity = position
        .liquidity
        .checked_sub(claim.liquidity)
        .ok_or(AmmError::InsufficientLiquidity)?;
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
    emit!(PositionLiquidityDecreased {
        pool: pool_key,
        position: ctx.accounts.position.key(),
        liquidity_delta: claim.liquidity,
        amount_a: claim.amount_a,
        amount_b: claim.amount_b,
        timestamp: clock.unix_timestamp,
    });
    Ok(())
}
