//! A block-structured bitmap faceted index.
//!
//! A [`Cauldron`] assigns every item a dense [`Index`]. Named boolean properties
//! ([`Facet`]s, grouped into [`Aspect`]s) are tracked as [`BitSet`]s over those
//! indexes, and queries are plain set algebra over the bitmaps. Counting
//! variants (`and_count`, `or_count`, ...) answer "how many" without
//! materializing the combined set.

mod error;
pub use error::{AlreadyExists, Error, Result};

mod bit_block;
pub use bit_block::BitBlock;

mod free_stack;
pub use free_stack::IndexAllocator;

mod bit_set;
pub use bit_set::BitSet;

pub mod combinators;
pub use combinators::BinWordOp;

pub mod iterators;
use iterators::IndexIter;

mod cauldron;
pub use cauldron::{Cauldron, CauldronConfig};

mod aspect;
pub use aspect::Aspect;

mod facet;
pub use facet::Facet;


/////////////////////////////////////////////
pub type Word = u64;
pub type Index = usize; // BIT index within a set, or an item's position in a cauldron

pub const WORD_BITS: usize = Word::BITS as usize;
pub const BLOCK_WORDS: usize = 16;
pub const BLOCK_BITS: usize = WORD_BITS * BLOCK_WORDS;

#[derive(Debug, Copy, Clone)]
struct WordBitAddr {
    idx_of_word: usize, // WORD index not BIT index
    idx_in_word: u32,   // invariant: in 0..WORD_BITS
}

#[derive(Debug, Copy, Clone)]
struct BlockBitAddr {
    idx_of_block: usize, // BLOCK index not BIT index
    idx_in_block: usize, // invariant: in 0..BLOCK_BITS
}
///////////////////////////////////////////////////////////////////////
impl WordBitAddr {
    fn from_bit_idx(bit_idx: usize) -> Self {
        Self { idx_of_word: bit_idx / WORD_BITS, idx_in_word: (bit_idx % WORD_BITS) as u32 }
    }
    /// Bits are numbered from the most significant end of each word.
    const fn word_mask(&self) -> Word {
        1 << (WORD_BITS as u32 - 1 - self.idx_in_word)
    }
    fn to_bit_idx(self) -> usize {
        self.idx_of_word * WORD_BITS + self.idx_in_word as usize
    }
}
impl BlockBitAddr {
    fn from_bit_idx(bit_idx: Index) -> Self {
        Self { idx_of_block: bit_idx / BLOCK_BITS, idx_in_block: bit_idx % BLOCK_BITS }
    }
}

/// Mask selecting the first `bit_count` bits of a word, e.g. 3 => 0b111000...0
#[inline]
const fn leading_mask(bit_count: usize) -> Word {
    if bit_count == 0 {
        0
    } else {
        Word::MAX << (WORD_BITS - bit_count)
    }
}

fn index_count_to_block_count(index_count: usize) -> usize {
    index_count.div_ceil(BLOCK_BITS)
}

/// Active length of block `idx_of_block` in a set of `size` bits.
fn active_len_of_block(size: usize, idx_of_block: usize) -> usize {
    size.saturating_sub(idx_of_block * BLOCK_BITS).min(BLOCK_BITS)
}
