use crate::error::SimError;

/// Block size in bytes. Fixed for every bank
pub const BLOCK_SIZE: u32 = 64;

/// Number of low address bits selecting a byte within a block
pub const OFFSET_BITS: u32 = BLOCK_SIZE.trailing_zeros();

/// Width of a trace address
pub const ADDRESS_BITS: u32 = u32::BITS;

/// How a 32-bit address is split into tag, index and offset for one bank
///
/// Derived once from the block count of the bank. The three masks partition the address, so
/// `offset_mask | index_mask | tag_mask == u32::MAX` and no two of them overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitLayout {
    pub offset_bits: u32,
    pub index_bits: u32,
    pub tag_bits: u32,
    pub offset_mask: u32,
    pub index_mask: u32,
    pub tag_mask: u32,
}

impl BitLayout {
    /// Computes the layout for a bank with `block_count` blocks
    ///
    /// # Arguments
    ///
    /// * `block_count`: The number of blocks in the bank, must be a non-zero power of two
    ///
    /// returns: Result<BitLayout, SimError>
    ///
    /// # Examples
    ///
    /// ```
    /// use tracecache::address::BitLayout;
    /// let layout = BitLayout::new(2).unwrap();
    /// assert_eq!((layout.offset_bits, layout.index_bits, layout.tag_bits), (6, 1, 25));
    /// assert_eq!(layout.index_mask, 0x40);
    /// ```
    pub fn new(block_count: u32) -> Result<Self, SimError> {
        if !block_count.is_power_of_two() {
            return Err(SimError::configuration(format!(
                "a bank needs a non-zero power of two number of blocks, got {block_count}"
            )));
        }
        let index_bits = block_count.trailing_zeros();
        if OFFSET_BITS + index_bits > ADDRESS_BITS {
            return Err(SimError::configuration(format!(
                "{block_count} blocks of {BLOCK_SIZE} bytes don't fit a {ADDRESS_BITS}-bit address space"
            )));
        }
        let tag_bits = ADDRESS_BITS - OFFSET_BITS - index_bits;
        let offset_mask = low_bits(OFFSET_BITS);
        let index_mask = low_bits(index_bits) << OFFSET_BITS;
        Ok(Self {
            offset_bits: OFFSET_BITS,
            index_bits,
            tag_bits,
            offset_mask,
            index_mask,
            tag_mask: !(offset_mask | index_mask),
        })
    }

    /// Splits an address for a direct-mapped bank, returning `(tag, index)`
    ///
    /// # Examples
    ///
    /// ```
    /// use tracecache::address::BitLayout;
    /// let layout = BitLayout::new(4).unwrap();
    /// assert_eq!(layout.split_direct(0x1C0), (1, 3));
    /// ```
    pub fn split_direct(&self, address: u32) -> (u32, usize) {
        let index = (address & self.index_mask) >> self.offset_bits;
        // Shifting a u32 by 32 overflows, which happens when the bank covers the whole address space
        let tag = address.checked_shr(self.offset_bits + self.index_bits).unwrap_or(0);
        (tag, index as usize)
    }

    /// Splits an address for a fully associative bank. There is only one set, so everything above
    /// the offset is tag and the index is always 0
    pub fn split_associative(&self, address: u32) -> (u32, usize) {
        (address >> self.offset_bits, 0)
    }
}

fn low_bits(bits: u32) -> u32 {
    match bits {
        0 => 0,
        b if b >= u32::BITS => u32::MAX,
        b => (1 << b) - 1,
    }
}
