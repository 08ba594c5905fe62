//! Program-wide constants: PDA seed tags, tick/price bounds, fee caps.

/// Seed tags for deterministic account derivation
pub const AMM_CONFIG_SEED: &[u8] = b"amm_config";
pub const POOL_SEED: &[u8] = b"pool";
pub const POOL_AUTHORITY_SEED: &[u8] = b"pool_authority";
pub const VAULT_A_SEED: &[u8] = b"vault_a";
pub const VAULT_B_SEED: &[u8] = b"vault_b";
pub const OBSERVATION_SEED: &[u8] = b"observation";
pub const POSITION_SEED: &[u8] = b"position";

/// Tick bounds chosen so every sqrt price fits in a u128 Q64.64
pub const MIN_TICK: i32 = -443636;
pub const MAX_TICK: i32 = 443636;

/// sqrt(1.0001^MIN_TICK) and sqrt(1.0001^MAX_TICK) in Q64.64
pub const MIN_SQRT_PRICE_X64: u128 = 4295128740;
pub const MAX_SQRT_PRICE_X64: u128 = 79226673515401279992447579055;

/// 1.0 in Q64.64
pub const Q64: u128 = 1u128 << 64;

/// Trading fee is expressed in parts per million of the input amount.
/// FEE_RATE_MAX caps it at 1%.
pub const FEE_RATE_DENOMINATOR: u128 = 1_000_000;
pub const FEE_RATE_MAX: u32 = 10_000;

/// Protocol share of the trading fee, in parts per ten thousand.
pub const PROTOCOL_FEE_RATE_DENOMINATOR: u128 = 10_000;
pub const PROTOCOL_FEE_RATE_MAX: u32 = 10_000;

/// Hard ceiling on tick-boundary crossings within a single swap.
pub const MAX_SWAP_STEPS: u32 = 64;
