use crate::combinators::bin_ops::{And, Diff, Or, Xor};
use crate::{
    active_len_of_block, index_count_to_block_count, BinWordOp, BitBlock, BlockBitAddr, Index,
    IndexIter,
};
use core::fmt::Debug;
use core::iter::FromIterator;
use tracing::trace;

/// A growable bitmap over `[0, size)`, stored as `ceil(size / BLOCK_BITS)` blocks.
///
/// `size` only ever grows. Setting or unsetting a bit past the end grows the
/// set to cover it; reading past the end yields `false`.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct BitSet {
    // invariants:
    // blocks.len() == index_count_to_block_count(size)
    // every bit at or past `size` is zero
    blocks: Vec<BitBlock>,
    size: usize,
}

impl Debug for BitSet {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_set().entries(self.iter_indexes()).finish()
    }
}

impl BitSet {
    pub fn new() -> Self {
        Self::default()
    }
    /// Creates an all-zero set over `[0, size)`.
    pub fn with_size(size: usize) -> Self {
        Self { blocks: vec![BitBlock::EMPTY; index_count_to_block_count(size)], size }
    }
    /// Creates an all-one set over `[0, size)`.
    pub fn filled(size: usize) -> Self {
        let mut me = Self::with_size(size);
        me.fill();
        me
    }

    /// Returns the number of indexes this set is defined over.
    pub fn size(&self) -> usize {
        self.size
    }
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
    pub fn as_blocks(&self) -> &[BitBlock] {
        &self.blocks
    }

    /// Grows the set with zero bits until `size() >= index_count`.
    pub fn ensure_capacity(&mut self, index_count: usize) {
        if index_count <= self.size {
            return;
        }
        let block_count = index_count_to_block_count(index_count);
        if self.blocks.len() < block_count {
            trace!(from = self.blocks.len(), to = block_count, "growing bit set");
            self.blocks.resize(block_count, BitBlock::EMPTY);
        }
        self.size = index_count;
    }

    fn index_count_for(index: Index) -> usize {
        match index.checked_add(1) {
            Some(index_count) => index_count,
            None => panic!("bit index {index} leaves no room to grow the set"),
        }
    }

    pub fn get_bit(&self, index: Index) -> bool {
        let bba = BlockBitAddr::from_bit_idx(index);
        index < self.size
            && self.blocks.get(bba.idx_of_block).is_some_and(|b| b.contains_bit(bba.idx_in_block))
    }
    /// Adds the given index to the set. Returns whether it was absent before i.e. the set has changed.
    ///
    /// # Panics
    /// If `index == usize::MAX`, as the set could not grow to cover it.
    pub fn set_bit(&mut self, index: Index) -> bool {
        self.ensure_capacity(Self::index_count_for(index));
        let bba = BlockBitAddr::from_bit_idx(index);
        self.blocks[bba.idx_of_block].insert_bit(bba.idx_in_block)
    }
    /// Removes the given index from the set. Returns whether it was present before i.e. the set has changed.
    ///
    /// # Panics
    /// Under the same condition as [`BitSet::set_bit`].
    pub fn unset_bit(&mut self, index: Index) -> bool {
        self.ensure_capacity(Self::index_count_for(index));
        let bba = BlockBitAddr::from_bit_idx(index);
        self.blocks[bba.idx_of_block].remove_bit(bba.idx_in_block)
    }

    /// Combines block by block with `other`. The result is defined over the larger
    /// of the two domains; the shorter operand reads as zero past its end.
    pub fn combined<O: BinWordOp>(&self, op: O, other: &Self) -> Self {
        let block_count = self.blocks.len().max(other.blocks.len());
        let blocks = (0..block_count)
            .map(|idx_of_block| {
                op.combine_blocks(self.blocks.get(idx_of_block), other.blocks.get(idx_of_block))
                    .unwrap_or(BitBlock::EMPTY)
            })
            .collect();
        Self { blocks, size: self.size.max(other.size) }
    }
    /// Equivalent to `self.combined(op, other).count()` without building the set.
    pub fn combined_count<O: BinWordOp>(&self, op: O, other: &Self) -> usize {
        let block_count = self.blocks.len().max(other.blocks.len());
        (0..block_count)
            .map(|idx_of_block| {
                op.count_blocks(self.blocks.get(idx_of_block), other.blocks.get(idx_of_block))
            })
            .sum()
    }
    pub fn and(&self, other: &Self) -> Self {
        self.combined(And, other)
    }
    pub fn or(&self, other: &Self) -> Self {
        self.combined(Or, other)
    }
    pub fn xor(&self, other: &Self) -> Self {
        self.combined(Xor, other)
    }
    /// Indexes in `self` but not in `other`.
    pub fn and_not(&self, other: &Self) -> Self {
        self.combined(Diff, other)
    }
    pub fn and_count(&self, other: &Self) -> usize {
        self.combined_count(And, other)
    }
    pub fn or_count(&self, other: &Self) -> usize {
        self.combined_count(Or, other)
    }
    pub fn xor_count(&self, other: &Self) -> usize {
        self.combined_count(Xor, other)
    }
    pub fn and_not_count(&self, other: &Self) -> usize {
        self.combined_count(Diff, other)
    }

    /// Complement over this set's own domain `[0, size())`.
    pub fn not(&self) -> Self {
        let blocks = self
            .blocks
            .iter()
            .enumerate()
            .map(|(idx_of_block, block)| {
                block.not_within(active_len_of_block(self.size, idx_of_block))
            })
            .collect();
        Self { blocks, size: self.size }
    }
    pub fn not_count(&self) -> usize {
        self.size - self.count()
    }

    pub fn count(&self) -> usize {
        self.blocks
            .iter()
            .enumerate()
            .map(|(idx_of_block, block)| {
                block.count_within(active_len_of_block(self.size, idx_of_block))
            })
            .sum()
    }
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(BitBlock::is_empty)
    }

    /// Sets every bit in `[0, size())`.
    pub fn fill(&mut self) {
        let size = self.size;
        for (idx_of_block, block) in self.blocks.iter_mut().enumerate() {
            block.fill_within(active_len_of_block(size, idx_of_block));
        }
    }
    /// Leaves the size unchanged. Afterwards, contains no indexes.
    pub fn clear(&mut self) {
        for block in self.blocks.iter_mut() {
            *block = BitBlock::EMPTY;
        }
    }

    pub fn iter_indexes(&self) -> IndexIter<'_> {
        IndexIter::new(&self.blocks)
    }
}

impl<'a> IntoIterator for &'a BitSet {
    type Item = Index;
    type IntoIter = IndexIter<'a>;
    fn into_iter(self) -> IndexIter<'a> {
        self.iter_indexes()
    }
}

impl FromIterator<Index> for BitSet {
    fn from_iter<I: IntoIterator<Item = Index>>(into_iter: I) -> Self {
        let mut me = Self::default();
        for index in into_iter {
            me.set_bit(index);
        }
        me
    }
}
