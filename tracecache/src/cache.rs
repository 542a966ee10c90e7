use crate::address::BitLayout;
use crate::config::Mapping;
use crate::error::SimError;
use crate::replacement_policies::{DirectMapped, Fifo, ReplacementPolicy};

/// A generic trait for cache banks
///
/// Technically not required as the banks are statically dispatched through GenericBank rather than
/// dyn CacheTrait, but it keeps the enum and the generic bank in step
pub trait CacheTrait {
    /// Converts an address into a tag and an index using this bank's layout and mapping
    ///
    /// For a fully associative bank the index is always 0
    ///
    /// returns: (u32, usize)
    fn address_to_tag_and_index(&self, address: u32) -> (u32, usize);

    /// Looks up a block, installing it on a miss. Returns true on a hit and false otherwise
    ///
    /// On a miss the block is placed in the first empty candidate slot, or in the slot chosen by
    /// the replacement policy if there is none
    ///
    /// # Arguments
    ///
    /// * `tag`: The tag of the block
    /// * `index`: The index of the block, ignored by fully associative banks
    ///
    /// returns: bool
    fn lookup_or_install(&mut self, tag: u32, index: usize) -> bool;

    /// Decodes the address and performs `lookup_or_install` on it
    fn read_and_update_line(&mut self, address: u32) -> bool {
        let (tag, index) = self.address_to_tag_and_index(address);
        self.lookup_or_install(tag, index)
    }

    /// Gets the bit layout used by this bank
    fn layout(&self) -> &BitLayout;

    /// Gets the number of block slots
    fn capacity(&self) -> usize;

    /// Gets the number of slots which have never been filled. Useful for analysing cache
    /// performance or debugging
    fn get_uninitialised_line_count(&self) -> usize;
}

/// One block slot of a bank
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BlockSlot {
    pub tag: u32,
    pub valid: bool,
}

/// A bank of block slots, parameterised by a replacement policy
///
/// There is one implementation for both mappings. Direct mapping is a policy whose candidate set
/// is a single slot, full associativity is a policy whose candidate set is every slot, and the
/// lookup below is the same scan for both
pub struct CacheBank<R: ReplacementPolicy> {
    layout: BitLayout,
    slots: Vec<BlockSlot>,
    replacement_policy: R,
}

impl<R: ReplacementPolicy> CacheBank<R> {
    pub fn new(block_count: u32, policy: R) -> Result<Self, SimError> {
        let layout = BitLayout::new(block_count)?;
        Ok(Self {
            layout,
            slots: vec![BlockSlot::default(); block_count as usize],
            replacement_policy: policy,
        })
    }

    /// The slots in index order
    pub fn slots(&self) -> &[BlockSlot] {
        &self.slots
    }

    pub fn policy(&self) -> &R {
        &self.replacement_policy
    }
}

impl<R: ReplacementPolicy> CacheTrait for CacheBank<R> {
    fn address_to_tag_and_index(&self, address: u32) -> (u32, usize) {
        self.replacement_policy.split(&self.layout, address)
    }

    // Cache hit is true, cache miss is false
    fn lookup_or_install(&mut self, tag: u32, index: usize) -> bool {
        let candidates = self.replacement_policy.candidate_slots(index, self.slots.len());
        for slot in &mut self.slots[candidates.clone()] {
            if !slot.valid {
                // Fill before evicting
                slot.tag = tag;
                slot.valid = true;
                return false;
            }
            if slot.tag == tag {
                return true;
            }
        }
        // Every candidate is valid and none match
        let victim = self.replacement_policy.get_victim(candidates);
        self.slots[victim].tag = tag;
        false
    }

    fn layout(&self) -> &BitLayout {
        &self.layout
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn get_uninitialised_line_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.valid).count()
    }
}

/// Enum for both kinds of bank provided by the library
///
/// Trait objects would be less boilerplate, but every record in the trace goes through a bank, and
/// branching explicitly lets the compiler see the concrete types and inline the policy
pub enum GenericBank {
    DirectMapped(CacheBank<DirectMapped>),
    FullyAssociative(CacheBank<Fifo>),
}

impl GenericBank {
    /// Creates a bank with the given number of blocks for a mapping
    pub fn new(mapping: Mapping, block_count: u32) -> Result<Self, SimError> {
        Ok(match mapping {
            Mapping::DirectMapped => GenericBank::from(CacheBank::new(block_count, DirectMapped)?),
            Mapping::FullyAssociative => GenericBank::from(CacheBank::new(block_count, Fifo::new())?),
        })
    }

    pub fn mapping(&self) -> Mapping {
        match self {
            GenericBank::DirectMapped(_) => Mapping::DirectMapped,
            GenericBank::FullyAssociative(_) => Mapping::FullyAssociative,
        }
    }
}

impl From<CacheBank<DirectMapped>> for GenericBank {
    fn from(value: CacheBank<DirectMapped>) -> Self {
        Self::DirectMapped(value)
    }
}

impl From<CacheBank<Fifo>> for GenericBank {
    fn from(value: CacheBank<Fifo>) -> Self {
        Self::FullyAssociative(value)
    }
}

impl CacheTrait for GenericBank {
    fn address_to_tag_and_index(&self, address: u32) -> (u32, usize) {
        match self {
            GenericBank::DirectMapped(b) => b.address_to_tag_and_index(address),
            GenericBank::FullyAssociative(b) => b.address_to_tag_and_index(address),
        }
    }

    fn lookup_or_install(&mut self, tag: u32, index: usize) -> bool {
        match self {
            GenericBank::DirectMapped(b) => b.lookup_or_install(tag, index),
            GenericBank::FullyAssociative(b) => b.lookup_or_install(tag, index),
        }
    }

    fn layout(&self) -> &BitLayout {
        match self {
            GenericBank::DirectMapped(b) => b.layout(),
            GenericBank::FullyAssociative(b) => b.layout(),
        }
    }

    fn capacity(&self) -> usize {
        match self {
            GenericBank::DirectMapped(b) => b.capacity(),
            GenericBank::FullyAssociative(b) => b.capacity(),
        }
    }

    fn get_uninitialised_line_count(&self) -> usize {
        match self {
            GenericBank::DirectMapped(b) => b.get_uninitialised_line_count(),
            GenericBank::FullyAssociative(b) => b.get_uninitialised_line_count(),
        }
    }
}
