//! Cyclic bit rotation of direction bitmasks
//!
//! A configuration is an `N`-bit mask where bit `i` marks a pipe stub towards
//! neighbor slot `i`. Turning a tile by one step clockwise moves every stub
//! to the next slot, which is a cyclic left shift within the low `N` bits.

use crate::io::error::{PuzzleError, Result};
use num_traits::PrimInt;

/// Direction bitmask of a single tile
pub type Configuration = u8;

fn bit_width<T: PrimInt>() -> usize {
    T::zero().count_zeros() as usize
}

fn slot_mask<T: PrimInt>(slots: usize) -> T {
    if slots >= bit_width::<T>() {
        !T::zero()
    } else {
        (T::one() << slots) - T::one()
    }
}

/// Rotate a configuration by `steps` slots within an `slots`-bit mask
///
/// `steps` is reduced modulo `slots`, so negative turns can be expressed as
/// `slots - k`. Bits above `slots` are discarded, and a `slots` wider than
/// `T` is clamped to the width of `T`.
pub fn rotate<T: PrimInt>(configuration: T, steps: usize, slots: usize) -> T {
    let slots = slots.min(bit_width::<T>());
    let mask = slot_mask::<T>(slots);
    if slots == 0 {
        return configuration & mask;
    }
    let steps = steps % slots;
    let configuration = configuration & mask;
    if steps == 0 {
        return configuration;
    }
    ((configuration << steps) | (configuration >> (slots - steps))) & mask
}

/// Smallest number of clockwise steps turning `initial` into `target`
///
/// # Errors
///
/// Returns `PuzzleError::NoRotation` when `target` is not in the rotation
/// orbit of `initial`
pub fn required_rotations(
    initial: Configuration,
    target: Configuration,
    slots: usize,
) -> Result<usize> {
    (0..slots.max(1))
        .find(|&steps| rotate(initial, steps, slots) == target)
        .ok_or(PuzzleError::NoRotation {
            initial,
            target,
            slots,
        })
}

/// Test whether the configuration has a stub in slot `slot`
pub fn is_connection<T: PrimInt>(configuration: T, slot: usize) -> bool {
    slot < bit_width::<T>() && (configuration >> slot) & T::one() == T::one()
}

/// Number of pipe stubs in the configuration
pub fn connection_count<T: PrimInt>(configuration: T) -> u32 {
    configuration.count_ones()
}

/// All `slots` rotations of a configuration, duplicates included
pub fn orbit(configuration: Configuration, slots: usize) -> Vec<Configuration> {
    (0..slots.max(1))
        .map(|steps| rotate(configuration, steps, slots))
        .collect()
}

/// Shortest way to apply a clockwise rotation on a physical board
///
/// Turning `k` steps clockwise equals turning `slots - k` steps the other way,
/// so an actuator only ever needs at most half a revolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPlan {
    /// Number of single-step turns to apply
    pub clicks: usize,
    /// Whether the turns go counter-clockwise
    pub counter_clockwise: bool,
}

impl RotationPlan {
    /// Plan the turns for `rotations` clockwise steps
    pub const fn for_rotations(rotations: usize, slots: usize) -> Self {
        let rotations = if slots == 0 { 0 } else { rotations % slots };
        let reverse = slots - rotations;
        if rotations != 0 && reverse < rotations {
            Self {
                clicks: reverse,
                counter_clockwise: true,
            }
        } else {
            Self {
                clicks: rotations,
                counter_clockwise: false,
            }
        }
    }
}
