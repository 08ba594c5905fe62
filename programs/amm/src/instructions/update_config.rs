//! Authority-gated parameter updates on the config record.

use anchor_lang::prelude::*;

use crate::constants::AMM_CONFIG_SEED;
use crate::error::AmmError;
use crate::events::ConfigUpdated;
use crate::state::AmmConfig;

#[derive(Accounts)]
pub struct UpdateAmmConfig<'info> {
    #[account(
        mut,
        seeds = [AMM_CONFIG_SEED],
        bump = amm_config.bump,
        has_one = authority @ AmmError::Unauthorized
    )]
    pub amm_config: Account<'info, AmmConfig>,

    pub authority: Signer<'info>,
}

pub fn update_amm_config(
    ctx: Context<UpdateAmmConfig>,
    new_fee_rate: Option<u32>,
    new_protocol_fee_rate: Option<u32>,
    create_pool_enabled: Option<bool>,
    swap_enabled: Option<bool>,
) -> Result<()> {
    let config = &mut ctx.accounts.amm_config;

    if let Some(fee_rate) = new_fee_rate {
        AmmConfig::validate_rates(fee_rate, config.protocol_fee_rate)?;
        config.fee_rate = fee_rate;
    }
    if let Some(protocol_fee_rate) = new_protocol_fee_rate {
        AmmConfig::validate_rates(config.fee_rate, protocol_fee_rate)?;
        config.protocol_fee_rate = protocol_fee_rate;
    }
    if let Some(enabled) = create_pool_enabled {
        config.create_pool_enabled = enabled;
    }
    if let Some(enabled) = swap_enabled {
        config.swap_enabled = enabled;
    }

    emit!(ConfigUpdated {
        config: config.key(),
        authority: ctx.accounts.authority.key(),
        fee_rate: config.fee_rate,
        protocol_fee_rate: config.protocol_fee_rate,
        create_pool_enabled: config.create_pool_enabled,
        swap_enabled: config.swap_enabled,
    });
    Ok(())
}
