//! Pins for the fixed-width account layouts. A size change here is a wire
//! format break for every deployed caller.

use static_assertions::const_assert_eq;

use crate::state::{AmmConfig, ObservationState, Pool, Position};

const_assert_eq!(AmmConfig::SIZE, 83);
const_assert_eq!(Pool::SIZE, 256);
const_assert_eq!(Position::SIZE, 137);
const_assert_eq!(ObservationState::SIZE, 57);
