use std::ops::Range;
use crate::address::BitLayout;

/// A trait for the mapping and replacement behaviour of a bank. Used to parameterise a CacheBank
///
/// The policy decides three things: how an address becomes a tag and an index, which slots a tag
/// is allowed to live in, and which of those slots is evicted once they are all valid. The bank
/// itself handles filling empty slots and detecting hits
pub trait ReplacementPolicy {
    /// Splits an address into `(tag, index)` using the bank's layout
    fn split(&self, layout: &BitLayout, address: u32) -> (u32, usize);

    /// The slots which may hold a block with the given index, in scan order
    ///
    /// # Arguments
    ///
    /// * `index`: The index produced by `split`
    /// * `capacity`: The number of slots in the bank
    ///
    /// returns: Range<usize>
    fn candidate_slots(&self, index: usize, capacity: usize) -> Range<usize>;

    /// Used by the bank to get the slot to overwrite when every candidate slot is valid and none of
    /// them match
    ///
    /// Implementations should assume the returned slot has been replaced when this returns
    fn get_victim(&mut self, candidates: Range<usize>) -> usize;
}

#[derive(Debug, Default)]
/// Direct mapping. Every index has exactly one slot, so the victim is always that slot and there
/// is no state to keep
///
/// As the bank is monomorphised, the compiler can optimise the candidate scan down to a single
/// comparison
pub struct DirectMapped;

impl ReplacementPolicy for DirectMapped {
    fn split(&self, layout: &BitLayout, address: u32) -> (u32, usize) {
        layout.split_direct(address)
    }

    fn candidate_slots(&self, index: usize, _capacity: usize) -> Range<usize> {
        index..index + 1
    }

    fn get_victim(&mut self, candidates: Range<usize>) -> usize {
        candidates.start
    }
}

/// First in, first out replacement for a fully associative bank
///
/// The cursor is only consulted once the bank is full. Slots fill in ascending order while the
/// bank warms up, so slot 0 is the oldest block when the first eviction happens and the cursor
/// starts there. Hits never move it
#[derive(Debug, Default)]
pub struct Fifo {
    cursor: usize,
}

impl Fifo {
    pub fn new() -> Self {
        Self::default()
    }

    /// The slot that will be evicted next
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl ReplacementPolicy for Fifo {
    fn split(&self, layout: &BitLayout, address: u32) -> (u32, usize) {
        layout.split_associative(address)
    }

    fn candidate_slots(&self, _index: usize, capacity: usize) -> Range<usize> {
        0..capacity
    }

    fn get_victim(&mut self, candidates: Range<usize>) -> usize {
        let victim = candidates.start + self.cursor;
        self.cursor = (self.cursor + 1) % candidates.len();
        victim
    }
}
