#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod logic;
pub mod math;
pub mod state;
pub mod transfers;

use instructions::*;

#[cfg(test)]
mod tests;

declare_id!("67mL18AtvAruV8HurhwQ12G6F3oyAVYtaUGa97VS74rC");

#[program]
pub mod riptide_amm {
    use super::*;

    pub fn initialize_amm(
        ctx: Context<InitializeAmm>,
        fee_rate: u32,
        protocol_fee_rate: u32,
    ) -> Result<()> {
        instructions::initialize_amm(ctx, fee_rate, protocol_fee_rate)
    }

    pub fn update_amm_config(
        ctx: Context<UpdateAmmConfig>,
        new_fee_rate: Option<u32>,
        new_protocol_fee_rate: Option<u32>,
        create_pool_enabled: Option<bool>,
        swap_enabled: Option<bool>,
    ) -> Result<()> {
        instructions::update_amm_config(
            ctx,
            new_fee_rate,
            new_protocol_fee_rate,
            create_pool_enabled,
            swap_enabled,
        )
    }

    pub fn create_pool(
        ctx: Context<CreatePool>,
        initial_sqrt_price_x64: u128,
        tick_spacing: u16,
    ) -> Result<()> {
        instructions::create_pool(ctx, initial_sqrt_price_x64, tick_spacing)
    }

    pub fn add_liquidity(
        ctx: Context<ModifyLiquidity>,
        amount_a: u64,
        amount_b: u64,
    ) -> Result<()> {
        instructions::add_liquidity(ctx, amount_a, amount_b)
    }

    pub fn remove_liquidity(
        ctx: Context<ModifyLiquidity>,
        amount_a: u64,
        amount_b: u64,
    ) -> Result<()> {
        instructions::remove_liquidity(ctx, amount_a, amount_b)
    }

    pub fn swap(
        ctx: Context<Swap>,
        amount_in: u64,
        minimum_amount_out: u64,
        a_to_b: bool,
    ) -> Result<()> {
        instructions::swap(ctx, amount_in, minimum_amount_out, a_to_b)
    }

    pub fn open_position(ctx: Context<OpenPosition>) -> Result<()> {
        instructions::open_position(ctx)
    }

    pub fn increase_position_liquidity(
        ctx: Context<ModifyPositionLiquidity>,
        amount_a: u64,
        amount_b: u64,
    ) -> Result<()> {
        instructions::increase_position_liquidity(ctx, amount_a, amount_b)
    }

    pub fn decrease_position_liquidity(
        ctx: Context<ModifyPositionLiquidity>,
        amount_a: u64,
        amount_b: u64,
    ) -> Result<()> {
        instructions::decrease_position_liquidity(ctx, amount_a, amount_b)
    }

    pub fn collect_position_fees(ctx: Context<CollectPositionFees>) -> Result<()> {
        instructions::collect_position_fees(ctx)
    }

    pub fn collect_protocol_fees(
        ctx: Context<CollectProtocolFees>,
        amount_a_requested: u64,
        amount_b_requested: u64,
    ) -> Result<()> {
        instructions::collect_protocol_fees(ctx, amount_a_requested, amount_b_requested)
    }
}
