pub mod collect_fees;
pub mod collect_protocol_fees;
pub mod create_pool;
pub mod initialize_amm;
pub mod liquidity;
pub mod position;
pub mod swap;
pub mod update_config;

pub use collect_fees::*;
pub use collect_protocol_fees::*;
pub use create_pool::*;
pub use initialize_amm::*;
pub use liquidity::*;
pub use position::*;
pub use swap::*;
pub use update_config::*;
