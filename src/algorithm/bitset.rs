use crate::math::rotation::{Configuration, orbit};
use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over every configuration of an `N`-slot tile
///
/// Position `c` is set while configuration `c` is still possible, so a tile's
/// domain costs `2^N` bits regardless of how many rotations remain. Symmetric
/// tiles whose rotations coincide collapse to a single position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigurationSet {
    bits: BitVec,
}

impl ConfigurationSet {
    /// Create a set with no configurations present
    pub fn new(slots: usize) -> Self {
        Self {
            bits: bitvec![0; 1 << slots.min(8)],
        }
    }

    /// Create the set of all rotations of `configuration`
    pub fn orbit(configuration: Configuration, slots: usize) -> Self {
        let mut set = Self::new(slots);
        for rotated in orbit(configuration, slots) {
            set.insert(rotated);
        }
        set
    }

    /// Create a set holding exactly one configuration
    pub fn single(configuration: Configuration, slots: usize) -> Self {
        let mut set = Self::new(slots);
        set.insert(configuration);
        set
    }

    /// Insert a configuration, ignoring values wider than the set
    pub fn insert(&mut self, configuration: Configuration) {
        let index = usize::from(configuration);
        if index < self.bits.len() {
            self.bits.set(index, true);
        }
    }

    /// Remove a configuration
    pub fn remove(&mut self, configuration: Configuration) {
        let index = usize::from(configuration);
        if index < self.bits.len() {
            self.bits.set(index, false);
        }
    }

    /// Test configuration membership
    pub fn contains(&self, configuration: Configuration) -> bool {
        self.bits.get(usize::from(configuration)).as_deref() == Some(&true)
    }

    /// Test if no configurations are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count configurations in the set
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// The remaining configuration when exactly one is left
    pub fn only(&self) -> Option<Configuration> {
        if self.len() == 1 {
            self.iter().next()
        } else {
            None
        }
    }

    /// Iterate configurations in ascending order
    pub fn iter(&self) -> impl Iterator<Item = Configuration> + '_ {
        self.bits
            .iter_ones()
            .filter_map(|index| Configuration::try_from(index).ok())
    }

    /// Extract all configurations as a vector
    pub fn to_vec(&self) -> Vec<Configuration> {
        self.iter().collect()
    }

    /// Test whether every configuration is contained in `other`
    pub fn is_subset(&self, other: &Self) -> bool {
        self.iter().all(|configuration| other.contains(configuration))
    }
}

impl fmt::Display for ConfigurationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (position, configuration) in self.iter().enumerate() {
            if position > 0 {
                write!(f, " ")?;
            }
            write!(f, "{configuration:02x}")?;
        }
        write!(f, "}}")
    }
}
