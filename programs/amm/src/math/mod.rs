pub mod fee_math;
pub mod liquidity_math;
pub mod safe_math;
pub mod tick_math;

pub use safe_math::SafeMath;
