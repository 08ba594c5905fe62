//! Swap instruction: account validation and token movement around the
//! state transition in `logic::swap_engine`.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{AMM_CONFIG_SEED, OBSERVATION_SEED, POOL_AUTHORITY_SEED};
use crate::error::AmmError;
use crate::events::SwapExecuted;
use crate::logic::swap_engine;
use crate::state::{AmmConfig, ObservationState, Pool};
use crate::transfers::{transfer_from_user, transfer_from_vault};

#[derive(Accounts)]
pub struct Swap<'info> {
    #[account(
        seeds = [AMM_CONFIG_SEED],
        bump = config.bump,
        constraint = config.swap_enabled @ AmmError::SwapDisabled
    )]
    pub config: Account<'info, AmmConfig>,

    #[account(mut, has_one = config)]
    pub pool: Account<'info, Pool>,

    #[account(mut)]
    pub user_token_account_in: Account<'info, TokenAccount>,

    #[account(mut)]
    pub user_token_account_out: Account<'info, TokenAccount>,

    /// Must be the pool vault on the input side for the stated direction;
    /// checked in the handler against `a_to_b`.
    #[account(mut)]
    pub token_vault_in: Account<'info, TokenAccount>,

    #[account(mut)]
    pub token_vault_out: Account<'info, TokenAccount>,

    /// CHECK: data-less PDA that signs vault transfers
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool.key().as_ref()],
        bump = pool.auth_bump
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [OBSERVATION_SEED, pool.key().as_ref()],
        bump = observation_state.bump
    )]
    pub observation_state: Account<'info, ObservationState>,

    pub user: Signer<'info>,
    pub token_program: Program<'info, Token>,
}

pub fn swap(
    ctx: Context<Swap>,
    amount_in: u64,
    minimum_amount_out: u64,
    a_to_b: bool,
) -> Result<()> {
    let pool = &ctx.accounts.pool;
    let (vault_in_key, vault_out_key) = if a_to_b {
        (pool.token_vault_a, pool.token_vault_b)
    } else {
        (pool.token_vault_b, pool.token_vault_a)
    };
    require_keys_eq!(
        ctx.accounts.token_vault_in.key(),
        vault_in_key,
        AmmError::InvalidVault
    );
    require_keys_eq!(
        ctx.accounts.token_vault_out.key(),
        vault_out_key,
        AmmError::InvalidVault
    );

    let clock = Clock::get()?;
    let config = &ctx.accounts.config;
    let outcome = swap_engine::execute_swap(
        &mut ctx.accounts.pool,
        &mut ctx.accounts.observation_state,
        config.fee_rate,
        config.protocol_fee_rate,
        amount_in,
        minimum_amount_out,
        a_to_b,
        clock.unix_timestamp,
    )?;

    let pool_key = ctx.accounts.pool.key();
    let auth_bump = [ctx.accounts.pool.auth_bump];
    let auth_seeds: &[&[u8]] = &[POOL_AUTHORITY_SEED, pool_key.as_ref(), &auth_bump];

    transfer_from_user(
        &ctx.accounts.user_token_account_in,
        &ctx.accounts.token_vault_in,
        &ctx.accounts.user,
        &ctx.accounts.token_program,
        amount_in,
    )?;
    transfer_from_vault(
        &ctx.accounts.token_vault_out,
        &ctx.accounts.user_token_account_out,
        &ctx.accounts.pool_authority,
        &ctx.accounts.token_program,
        &[auth_seeds],
        outcome.amount_out,
    )?;

    let pool = &ctx.accounts.pool;
    emit!(SwapExecuted {
        pool: pool_key,
        user: ctx.accounts.user.key(),
        a_to_b,
        amount_in,
        amount_out: outcome.amount_out,
        fee_amount: outcome.fees.total,
        protocol_fee_amount: outcome.fees.protocol,
        sqrt_price_after_x64: pool.sqrt_price_x64,
        tick_after: pool.current_tick,
        timestamp: clock.unix_timestamp,
    });
    msg!(
        "Swap: {} in, {} out, fee {}, crossed {} ticks",
        amount_in,
        outcome.amount_out,
        outcome.fees.total,
        outcome.ticks_crossed
    );
    Ok(())
}
