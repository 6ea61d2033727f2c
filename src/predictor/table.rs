//! A fixed-size table of saturating counters.

use crate::predictor::counter::{SaturatingCounter, SaturatingCounterConfig};
use crate::predictor::BuildError;

/// A table of [`SaturatingCounter`] addressed by a masked index.
///
/// The table length is fixed at construction and must be a power of two: the
/// index mask is derived once from the length, and every access applies it,
/// so all indexing is defined by the low bits of whatever the caller derives.
pub struct CounterTable {
    /// Saturating counter configuration
    cfg: SaturatingCounterConfig,

    /// Table of counters
    data: Vec<SaturatingCounter>,

    /// Number of entries
    size: usize,
}

impl CounterTable {
    pub fn new(
        size: usize,
        cfg: SaturatingCounterConfig,
    ) -> Result<Self, BuildError> {
        if size == 0 || !size.is_power_of_two() {
            return Err(BuildError::InvalidTableSize(size));
        }
        Ok(Self {
            cfg,
            data: vec![cfg.build(); size],
            size,
        })
    }

    /// Returns the number of entries in the table.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns a mask corresponding to the number of entries in the table.
    pub fn index_mask(&self) -> usize {
        self.size - 1
    }

    /// Returns the total number of storage bits the table models.
    pub fn storage_bits(&self) -> usize {
        self.cfg.storage_bits() * self.size
    }

    /// Returns a reference to an entry in the table.
    pub fn get(&self, idx: usize) -> &SaturatingCounter {
        &self.data[idx & self.index_mask()]
    }

    /// Returns a mutable reference to an entry in the table.
    pub fn get_mut(&mut self, idx: usize) -> &mut SaturatingCounter {
        let index = idx & self.index_mask();
        &mut self.data[index]
    }

    /// Reset every counter in the table to its initial value.
    pub fn reset(&mut self) {
        for ctr in self.data.iter_mut() {
            ctr.reset();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::branch::Outcome;

    #[test]
    fn rejects_degenerate_sizes() {
        let cfg = SaturatingCounterConfig::two_bit();
        assert_eq!(
            CounterTable::new(0, cfg).err(),
            Some(BuildError::InvalidTableSize(0))
        );
        assert_eq!(
            CounterTable::new(48, cfg).err(),
            Some(BuildError::InvalidTableSize(48))
        );
    }

    #[test]
    fn mask_covers_the_table() {
        let cfg = SaturatingCounterConfig::two_bit();
        let tbl = CounterTable::new(32, cfg).unwrap();
        assert_eq!(tbl.size(), 32);
        assert_eq!(tbl.index_mask(), 31);
        assert_eq!(tbl.storage_bits(), 64);
    }

    #[test]
    fn accesses_alias_modulo_size() {
        let cfg = SaturatingCounterConfig::two_bit();
        let mut tbl = CounterTable::new(32, cfg).unwrap();
        tbl.get_mut(0x10).update(Outcome::T);
        tbl.get_mut(0x30).update(Outcome::T);
        // 0x10 and 0x30 share the low five bits, so they share a counter
        assert_eq!(tbl.get(0x10).value(), 2);
        assert_eq!(tbl.get(0x10).predict(), Outcome::T);
    }

    #[test]
    fn reset_restores_fresh_state() {
        let cfg = SaturatingCounterConfig::two_bit();
        let mut tbl = CounterTable::new(8, cfg).unwrap();
        tbl.get_mut(3).update(Outcome::T);
        tbl.reset();
        assert_eq!(tbl.get(3).value(), 0);
    }
}
