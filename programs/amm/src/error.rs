//! Error definitions

use anchor_lang::prelude::*;

#[error_code]
pub enum AmmError {
    // Config errors
    #[msg("Fee rate must be non-zero and at most FEE_RATE_MAX")]
    InvalidFeeRate,

    #[msg("Protocol fee rate exceeds PROTOCOL_FEE_RATE_MAX")]
    InvalidProtocolFeeRate,

    #[msg("Config is already initialized")]
    AlreadyInitialized,

    #[msg("Pool creation is disabled")]
    CreatePoolDisabled,

    #[msg("Swaps are disabled")]
    SwapDisabled,

    // Pool errors
    #[msg("Token mints must be supplied in canonical ascending order")]
    InvalidTokenOrder,

    #[msg("Initial sqrt price outside the supported range")]
    InvalidSqrtPrice,

    #[msg("Tick spacing must be positive")]
    InvalidTickSpacing,

    #[msg("Vault does not match the pool for this swap direction")]
    InvalidVault,

    // Liquidity errors
    #[msg("Amount must be non-zero")]
    ZeroAmount,

    #[msg("Deposited amounts round to zero liquidity")]
    ZeroLiquidity,

    #[msg("Insufficient liquidity")]
    InsufficientLiquidity,

    // Swap errors
    #[msg("Output amount below the caller's minimum")]
    SlippageExceeded,

    #[msg("Swap crossed more tick boundaries than allowed")]
    TooManyTicksCrossed,

    // Position errors
    #[msg("A position already exists for this pool and owner")]
    PositionAlreadyExists,

    #[msg("Position does not belong to this pool")]
    PositionNotFound,

    #[msg("No fees available to collect")]
    NoFeesToCollect,

    // Authority errors
    #[msg("Signer is not the configured authority")]
    Unauthorized,

    // Math errors
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,

    #[msg("Division by zero")]
    DivisionByZero,

    #[msg("Tick out of bounds")]
    TickOutOfBounds,

    #[msg("Price out of bounds")]
    PriceOutOfBounds,
}
