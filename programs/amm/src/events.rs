//! Structured events emitted by every mutating instruction.

use anchor_lang::prelude::*;

#[event]
pub struct ConfigUpdated {
    pub config: Pubkey,
    pub authority: Pubkey,
    pub fee_rate: u32,
    pub protocol_fee_rate: u32,
    pub create_pool_enabled: bool,
    pub swap_enabled: bool,
}

#[event]
pub struct PoolCreated {
    pub pool: Pubkey,
    pub token_mint_a: Pubkey,
    pub token_mint_b: Pubkey,
    pub sqrt_price_x64: u128,
    pub tick: i32,
    pub tick_spacing: u16,
    pub creator: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct LiquidityAdded {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub liquidity_delta: u128,
    pub amount_a: u64,
    pub amount_b: u64,
    pub timestamp: i64,
}

#[event]
pub struct LiquidityRemoved {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub liquidity_delta: u128,
    pub amount_a: u64,
    pub amount_b: u64,
    pub timestamp: i64,
}

#[event]
pub struct SwapExecuted {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub a_to_b: bool,
    pub amount_in: u64,
    pub amount_out: u64,
    pub fee_amount: u64,
    pub protocol_fee_amount: u64,
    pub sqrt_price_after_x64: u128,
    pub tick_after: i32,
    pub timestamp: i64,
}

#[event]
pub struct PositionOpened {
    pub pool: Pubkey,
    pub position: Pubkey,
    pub owner: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PositionLiquidityIncreased {
    pub pool: Pubkey,
    pub position: Pubkey,
    pub liquidity_delta: u128,
    pub amount_a: u64,
    pub amount_b: u64,
    pub timestamp: i64,
}

#[event]
pub struct PositionLiquidityDecreased {
    pub pool: Pubkey,
    pub position: Pubkey,
    pub liquidity_delta: u128,
    pub amount_a: u64,
    pub amount_b: u64,
    pub timestamp: i64,
}

#[event]
pub struct PositionFeesCollected {
    pub pool: Pubkey,
    pub position: Pubkey,
    pub amount_a: u64,
    pub amount_b: u64,
    pub timestamp: i64,
}

#[event]
pub struct ProtocolFeesCollected {
    pub pool: Pubkey,
    pub collector: Pubkey,
    pub amount_a: u64,
    pub amount_b: u64,
    pub timestamp: i64,
}
