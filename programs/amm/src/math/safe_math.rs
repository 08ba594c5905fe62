//! Checked arithmetic returning program errors instead of wrapping.
//! Every ledger-affecting quantity goes through these or through the
//! explicit `checked_*` calls in the wider-precision math.

use anchor_lang::prelude::*;

use crate::error::AmmError;

pub trait SafeMath<T> {
    fn safe_add(self, v: T) -> Result<T>;
    fn safe_sub(self, v: T) -> Result<T>;
    fn safe_mul(self, v: T) -> Result<T>;
    fn safe_div(self, v: T) -> Result<T>;
}

macro_rules! impl_safe_math {
    ($type:ty) => {
        impl SafeMath<$type> for $type {
            fn safe_add(self, v: $type) -> Result<$type> {
                self.checked_add(v).ok_or(AmmError::ArithmeticOverflow.into())
            }

            fn safe_sub(self, v: $type) -> Result<$type> {
                self.checked_sub(v).ok_or(AmmError::ArithmeticOverflow.into())
            }

            fn safe_mul(self, v: $type) -> Result<$type> {
                self.checked_mul(v).ok_or(AmmError::ArithmeticOverflow.into())
            }

            fn safe_div(self, v: $type) -> Result<$type> {
                if v == 0 {
                    return Err(AmmError::DivisionByZero.into());
                }
                self.checked_div(v).ok_or(AmmError::ArithmeticOverflow.into())
            }
        }
    };
}

impl_safe_math!(u32);
impl_safe_math!(u64);
impl_safe_math!(u128);
impl_safe_math!(i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_overflow_fails() {
        assert!(u64::MAX.safe_add(1).is_err());
        assert_eq!(1u64.safe_add(2).unwrap(), 3);
    }

    #[test]
    fn sub_underflow_fails() {
        assert!(0u128.safe_sub(1).is_err());
        assert_eq!(5u128.safe_sub(2).unwrap(), 3);
    }

    #[test]
    fn mul_overflow_fails() {
        assert!(u128::MAX.safe_mul(2).is_err());
    }

    #[test]
    fn div_by_zero_fails() {
        assert!(100u64.safe_div(0).is_err());
        assert_eq!(100u64.safe_div(4).unwrap(), 25);
    }
}
