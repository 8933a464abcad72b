use crate::combinators::bin_ops::{And, Or};
use crate::{
    leading_mask, BinWordOp, Error, IndexIter, Result, Word, WordBitAddr, BLOCK_BITS, BLOCK_WORDS,
};
use core::fmt::Debug;

/// A fixed run of [`BLOCK_BITS`] bits packed into [`BLOCK_WORDS`] words.
///
/// Bit `i` lives in word `i / 64` at bit `63 - i % 64`, i.e. most significant
/// bit first. Operations taking an `active_len` only consider bits
/// `[0, active_len)`; everything at or past `active_len` reads as zero.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct BitBlock {
    words: [Word; BLOCK_WORDS],
}

impl Debug for BitBlock {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_set().entries(self.iter_set_bits()).finish()
    }
}

impl BitBlock {
    pub const EMPTY: Self = Self { words: [0; BLOCK_WORDS] };
    pub const FULL: Self = Self { words: [Word::MAX; BLOCK_WORDS] };

    pub const fn from_words(words: [Word; BLOCK_WORDS]) -> Self {
        Self { words }
    }
    pub fn as_words(&self) -> &[Word; BLOCK_WORDS] {
        &self.words
    }

    fn check_bit(bit_idx: usize) -> Result<WordBitAddr> {
        if bit_idx < BLOCK_BITS {
            Ok(WordBitAddr::from_bit_idx(bit_idx))
        } else {
            Err(Error::IndexOutOfRange { index: bit_idx, len: BLOCK_BITS })
        }
    }
    fn check_active_len(active_len: usize) -> Result<WordBitAddr> {
        if active_len <= BLOCK_BITS {
            // idx_of_word may be BLOCK_WORDS when active_len == BLOCK_BITS
            Ok(WordBitAddr::from_bit_idx(active_len))
        } else {
            Err(Error::IndexOutOfRange { index: active_len, len: BLOCK_BITS })
        }
    }

    pub fn get(&self, bit_idx: usize) -> Result<bool> {
        let wba = Self::check_bit(bit_idx)?;
        Ok(self.words[wba.idx_of_word] & wba.word_mask() != 0)
    }
    pub fn set(&mut self, bit_idx: usize) -> Result<()> {
        let wba = Self::check_bit(bit_idx)?;
        self.words[wba.idx_of_word] |= wba.word_mask();
        Ok(())
    }
    pub fn unset(&mut self, bit_idx: usize) -> Result<()> {
        let wba = Self::check_bit(bit_idx)?;
        self.words[wba.idx_of_word] &= !wba.word_mask();
        Ok(())
    }
    // unchecked forms for callers that already routed `bit_idx` into 0..BLOCK_BITS
    pub(crate) fn contains_bit(&self, bit_idx: usize) -> bool {
        let wba = WordBitAddr::from_bit_idx(bit_idx);
        self.words[wba.idx_of_word] & wba.word_mask() != 0
    }
    /// Returns whether the bit was previously unset i.e. the block has changed.
    pub(crate) fn insert_bit(&mut self, bit_idx: usize) -> bool {
        let wba = WordBitAddr::from_bit_idx(bit_idx);
        let word = &mut self.words[wba.idx_of_word];
        let was_unset = *word & wba.word_mask() == 0;
        *word |= wba.word_mask();
        was_unset
    }
    /// Returns whether the bit was previously set i.e. the block has changed.
    pub(crate) fn remove_bit(&mut self, bit_idx: usize) -> bool {
        let wba = WordBitAddr::from_bit_idx(bit_idx);
        let word = &mut self.words[wba.idx_of_word];
        let was_set = *word & wba.word_mask() != 0;
        *word &= !wba.word_mask();
        was_set
    }

    /// Combines word by word with `rhs`.
    pub fn combined<O: BinWordOp>(&self, op: O, rhs: &Self) -> Self {
        let mut words = [0; BLOCK_WORDS];
        for ((dest, a), b) in words.iter_mut().zip(&self.words).zip(&rhs.words) {
            *dest = op.combine_words(*a, *b);
        }
        Self { words }
    }
    /// Equivalent to `self.combined(op, rhs).count_all()` without building the block.
    pub fn combined_count<O: BinWordOp>(&self, op: O, rhs: &Self) -> usize {
        self.words
            .iter()
            .zip(&rhs.words)
            .map(|(a, b)| op.combine_words(*a, *b).count_ones() as usize)
            .sum()
    }
    pub fn and(&self, rhs: &Self) -> Self {
        self.combined(And, rhs)
    }
    pub fn or(&self, rhs: &Self) -> Self {
        self.combined(Or, rhs)
    }
    pub fn and_count(&self, rhs: &Self) -> usize {
        self.combined_count(And, rhs)
    }
    pub fn or_count(&self, rhs: &Self) -> usize {
        self.combined_count(Or, rhs)
    }

    /// Complement of bits `[0, active_len)`; bits from `active_len` on are zero.
    pub fn not(&self, active_len: usize) -> Result<Self> {
        let end = Self::check_active_len(active_len)?;
        Ok(self.not_until(end))
    }
    /// Like [`BitBlock::not`] for an `active_len` already known to be in range.
    pub(crate) fn not_within(&self, active_len: usize) -> Self {
        debug_assert!(active_len <= BLOCK_BITS);
        self.not_until(WordBitAddr::from_bit_idx(active_len))
    }
    fn not_until(&self, end: WordBitAddr) -> Self {
        let mut words = [0; BLOCK_WORDS];
        for (dest, src) in words[..end.idx_of_word].iter_mut().zip(&self.words) {
            *dest = !*src;
        }
        if let Some(dest) = words.get_mut(end.idx_of_word) {
            *dest = !self.words[end.idx_of_word] & leading_mask(end.idx_in_word as usize);
        }
        Self { words }
    }
    pub fn not_all(&self) -> Self {
        let mut words = self.words;
        for word in words.iter_mut() {
            *word = !*word;
        }
        Self { words }
    }

    /// Population count of bits `[0, active_len)`.
    pub fn count(&self, active_len: usize) -> Result<usize> {
        let end = Self::check_active_len(active_len)?;
        Ok(self.count_until(end))
    }
    pub(crate) fn count_within(&self, active_len: usize) -> usize {
        debug_assert!(active_len <= BLOCK_BITS);
        self.count_until(WordBitAddr::from_bit_idx(active_len))
    }
    fn count_until(&self, end: WordBitAddr) -> usize {
        let whole: usize =
            self.words[..end.idx_of_word].iter().map(|w| w.count_ones() as usize).sum();
        let partial = self
            .words
            .get(end.idx_of_word)
            .map(|w| (w & leading_mask(end.idx_in_word as usize)).count_ones() as usize)
            .unwrap_or(0);
        whole + partial
    }
    pub fn count_all(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Sets bits `[0, active_len)` and zeroes the remainder.
    pub fn fill(&mut self, active_len: usize) -> Result<()> {
        let end = Self::check_active_len(active_len)?;
        self.fill_until(end);
        Ok(())
    }
    pub(crate) fn fill_within(&mut self, active_len: usize) {
        debug_assert!(active_len <= BLOCK_BITS);
        self.fill_until(WordBitAddr::from_bit_idx(active_len))
    }
    fn fill_until(&mut self, end: WordBitAddr) {
        for (idx_of_word, word) in self.words.iter_mut().enumerate() {
            *word = match idx_of_word.cmp(&end.idx_of_word) {
                core::cmp::Ordering::Less => Word::MAX,
                core::cmp::Ordering::Equal => leading_mask(end.idx_in_word as usize),
                core::cmp::Ordering::Greater => 0,
            };
        }
    }
    /// Zeroes the block. `active_len` is bounds checked like [`BitBlock::fill`].
    pub fn clear(&mut self, active_len: usize) -> Result<()> {
        Self::check_active_len(active_len)?;
        self.words = [0; BLOCK_WORDS];
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Positions of set bits, ascending.
    pub fn iter_set_bits(&self) -> IndexIter<'_> {
        IndexIter::new(core::slice::from_ref(self))
    }
}
