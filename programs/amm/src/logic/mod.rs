pub mod liquidity_ops;
pub mod position_fees;
pub mod swap_engine;
