//! Shift registers for tracking branch outcome history.

use bitvec::prelude::*;

use crate::branch::Outcome;
use crate::predictor::BuildError;

/// A shift register recording recently observed branch outcomes.
///
/// Bit 0 holds the most recent outcome (1 = taken). The register has a fixed
/// length in bits: outcomes older than `len` are discarded off the top.
#[derive(Clone, Debug)]
pub struct HistoryRegister {
    data: BitVec<usize, Lsb0>,
    len: usize,
}

// NOTE: This *reverses* all of the bits and presents them in a format
// where the leftmost bit is the most-significant (index n) and the rightmost
// bit is the least-significant (index 0).
impl std::fmt::Display for HistoryRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let x: String = self.data.as_bitslice().iter().by_vals()
            .map(|b| if b { '1' } else { '0' })
            .rev()
            .collect();
        write!(f, "{}", x)
    }
}

impl HistoryRegister {
    /// Create a register with the specified length in bits.
    /// All bits in the register are initialized to zero.
    pub fn new(len: usize) -> Self {
        assert!(len > 0 && len <= usize::BITS as usize);
        Self {
            data: bitvec![usize, Lsb0; 0; len],
            len,
        }
    }

    pub fn len(&self) -> usize { self.len }

    /// Record an outcome as the new most-recent bit.
    /// The oldest tracked outcome falls off the top of the register.
    pub fn shift_in(&mut self, outcome: Outcome) {
        self.data.shift_right(1);
        self.data.set(0, outcome.into());
    }

    /// Return the register contents as an unsigned value.
    /// The most recent outcome lands in the low bit.
    pub fn value(&self) -> usize {
        self.data.load::<usize>()
    }

    /// Zero all bits in the register.
    pub fn clear(&mut self) {
        self.data.fill(false);
    }
}

/// A table of per-address history registers.
///
/// Each slot follows the outcome history of the branches that alias to it;
/// the table length must be a power of two so that a mask selects the slot.
#[derive(Clone, Debug)]
pub struct LocalHistoryTable {
    data: Vec<HistoryRegister>,
    size: usize,
}

impl LocalHistoryTable {
    /// Create a table of `size` registers, each `bits` wide.
    pub fn new(size: usize, bits: usize) -> Result<Self, BuildError> {
        if size == 0 || !size.is_power_of_two() {
            return Err(BuildError::InvalidTableSize(size));
        }
        Ok(Self {
            data: vec![HistoryRegister::new(bits); size],
            size,
        })
    }

    /// Returns the number of registers in the table.
    pub fn size(&self) -> usize { self.size }

    /// Returns a mask corresponding to the number of registers in the table.
    pub fn index_mask(&self) -> usize { self.size - 1 }

    /// Returns a reference to the register for `idx`.
    pub fn get(&self, idx: usize) -> &HistoryRegister {
        &self.data[idx & self.index_mask()]
    }

    /// Returns a mutable reference to the register for `idx`.
    pub fn get_mut(&mut self, idx: usize) -> &mut HistoryRegister {
        let index = idx & self.index_mask();
        &mut self.data[index]
    }

    /// Zero every register in the table.
    pub fn clear(&mut self) {
        for reg in self.data.iter_mut() {
            reg.clear();
        }
    }
}
