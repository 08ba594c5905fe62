//! Pool creation: allocates the pool record, both vaults, and the
//! observation account in one atomic instruction.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{
    AMM_CONFIG_SEED, MAX_SQRT_PRICE_X64, MIN_SQRT_PRICE_X64, OBSERVATION_SEED, POOL_AUTHORITY_SEED,
    POOL_SEED, VAULT_A_SEED, VAULT_B_SEED,
};
use crate::error::AmmError;
use crate::events::PoolCreated;
use crate::math::tick_math;
use crate::state::{AmmConfig, ObservationState, Pool};

#[derive(Accounts)]
pub struct CreatePool<'info> {
    #[account(
        seeds = [AMM_CONFIG_SEED],
        bump = amm_config.bump,
        constraint = amm_config.create_pool_enabled @ AmmError::CreatePoolDisabled
    )]
    pub amm_config: Account<'info, AmmConfig>,

    /// Pool identity is `(config, mint_a, mint_b)` in canonical order, so a
    /// reversed pair derives a different address; the handler still rejects
    /// reversed input outright.
    #[account(
        init,
        payer = creator,
        space = Pool::SIZE,
        seeds = [
            POOL_SEED,
            amm_config.key().as_ref(),
            token_mint_a.key().as_ref(),
            token_mint_b.key().as_ref()
        ],
        bump
    )]
    pub pool: Account<'info, Pool>,

    pub token_mint_a: Account<'info, Mint>,
    pub token_mint_b: Account<'info, Mint>,

    #[account(
        init,
        payer = creator,
        token::mint = token_mint_a,
        token::authority = pool_authority,
        seeds = [VAULT_A_SEED, pool.key().as_ref()],
        bump
    )]
    pub token_vault_a: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = creator,
        token::mint = token_mint_b,
        token::authority = pool_authority,
        seeds = [VAULT_B_SEED, pool.key().as_ref()],
        bump
    )]
    pub token_vault_b: Account<'info, TokenAccount>,

    /// CHECK: data-less PDA that signs vault transfers
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool.key().as_ref()],
        bump
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = creator,
        space = ObservationState::SIZE,
        seeds = [OBSERVATION_SEED, pool.key().as_ref()],
        bump
    )]
    pub observation_state: Account<'info, ObservationState>,

    #[account(mut)]
    pub creator: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn create_pool(
    ctx: Context<CreatePool>,
    initial_sqrt_price_x64: u128,
    tick_spacing: u16,
) -> Result<()> {
    require!(
        ctx.accounts.token_mint_a.key() < ctx.accounts.token_mint_b.key(),
        AmmError::InvalidTokenOrder
    );
    require!(
        (MIN_SQRT_PRICE_X64..=MAX_SQRT_PRICE_X64).contains(&initial_sqrt_price_x64),
        AmmError::InvalidSqrtPrice
    );
    require!(tick_spacing > 0, AmmError::InvalidTickSpacing);

    let current_tick = tick_math::tick_at_sqrt_price(initial_sqrt_price_x64)?;
    let clock = Clock::get()?;

    let pool = &mut ctx.accounts.pool;
    pool.bump = ctx.bumps.pool;
    pool.auth_bump = ctx.bumps.pool_authority;
    pool.config = ctx.accounts.amm_config.key();
    pool.token_mint_a = ctx.accounts.token_mint_a.key();
    pool.token_mint_b = ctx.accounts.token_mint_b.key();
    pool.token_vault_a = ctx.accounts.token_vault_a.key();
    pool.token_vault_b = ctx.accounts.token_vault_b.key();
    pool.sqrt_price_x64 = initial_sqrt_price_x64;
    pool.current_tick = current_tick;
    pool.tick_spacing = tick_spacing;
    pool.liquidity = 0;
    pool.fee_growth_global_a_x64 = 0;
    pool.fee_growth_global_b_x64 = 0;
    pool.protocol_fees_owed_a = 0;
    pool.protocol_fees_owed_b = 0;

    let observation = &mut ctx.accounts.observation_state;
    observation.bump = ctx.bumps.observation_state;
    observation.pool = pool.key();
    observation.last_updated_timestamp = clock.unix_timestamp;
    observation.tick_cumulative = 0;

    emit!(PoolCreated {
        pool: pool.key(),
        token_mint_a: pool.token_mint_a,
        token_mint_b: pool.token_mint_b,
        sqrt_price_x64: initial_sqrt_price_x64,
        tick: current_tick,
        tick_spacing,
        creator: ctx.accounts.creator.key(),
        timestamp: clock.unix_timestamp,
    });
    msg!(
        "Pool created: sqrt_price={}, tick={}, tick_spacing={}",
        initial_sqrt_price_x64,
        current_tick,
        tick_spacing
    );
    Ok(())
}
