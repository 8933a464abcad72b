use super::{BitBlock, Word};

pub mod bin_ops;

///////////////////////////////

/// A bitwise binary operator, applied word by word to blocks and sets.
pub trait BinWordOp: Copy {
    fn combine_words(self, a: Word, b: Word) -> Word;
    ////////
    /// NONE operands are blocks past the end of their set, which read as zero.
    /// NONE result means the combined block is certainly zero.
    fn combine_blocks(self, a: Option<&BitBlock>, b: Option<&BitBlock>) -> Option<BitBlock> {
        match (a, b) {
            (None, None) => None,
            (a, b) => Some(z(a).combined(self, z(b))),
        }
    }
    /// Population count of `combine_blocks(a, b)`, without building the block.
    fn count_blocks(self, a: Option<&BitBlock>, b: Option<&BitBlock>) -> usize {
        match (a, b) {
            (None, None) => 0,
            (a, b) => z(a).combined_count(self, z(b)),
        }
    }
}

#[inline]
fn z(block: Option<&BitBlock>) -> &BitBlock {
    block.unwrap_or(&BitBlock::EMPTY)
}
