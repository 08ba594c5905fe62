//! Running price/time accumulator consumed by external oracles.

use anchor_lang::prelude::*;

use crate::error::AmmError;

/// One per pool, created with it. `tick_cumulative` integrates the pool's
/// tick over elapsed wall-clock time; downstream TWAP consumers difference
/// two readings. Overflow aborts the instruction, never wraps.
#[account]
#[derive(Default)]
pub struct ObservationState {
    pub bump: u8,
    pub pool: Pubkey,
    pub last_updated_timestamp: i64,
    pub tick_cumulative: i64,
}

impl ObservationState {
    pub const SIZE: usize = 8 + // discriminator
        1 +  // bump
        32 + // pool
        8 +  // last_updated_timestamp
        8; // tick_cumulative

    /// Accrue `tick * elapsed` for the interval since the last update.
    /// Called with the pre-swap tick before any price mutation. A clock
    /// reading at or before the stored timestamp accrues nothing.
    pub fn observe(&mut self, tick: i32, now: i64) -> Result<()> {
        let elapsed = now - self.last_updated_timestamp;
        if elapsed > 0 {
            let delta = (tick as i64)
                .checked_mul(elapsed)
                .ok_or(AmmError::ArithmeticOverflow)?;
            self.tick_cumulative = self
                .tick_cumulative
                .checked_add(delta)
                .ok_or(AmmError::ArithmeticOverflow)?;
            self.last_updated_timestamp = now;
        }
        Ok(())
    }
}
