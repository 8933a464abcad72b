use super::*;

/// Walks the words of a run of blocks in bit order.
#[derive(Debug, Clone)]
pub struct WordIter<'a> {
    blocks: &'a [BitBlock],
    idx_of_next_word: usize,
}

/// Yields the index of every set bit, ascending.
#[derive(Debug, Clone)]
pub struct IndexIter<'a> {
    pub(crate) wi: WordIter<'a>,
    pub(crate) cached: Word,
}

impl<'a> WordIter<'a> {
    pub fn new(blocks: &'a [BitBlock]) -> Self {
        Self { blocks, idx_of_next_word: 0 }
    }
}

impl Iterator for WordIter<'_> {
    type Item = Word;
    fn next(&mut self) -> Option<Word> {
        let block = self.blocks.get(self.idx_of_next_word / BLOCK_WORDS)?;
        let next = block.as_words()[self.idx_of_next_word % BLOCK_WORDS];
        self.idx_of_next_word += 1;
        Some(next)
    }
}

impl<'a> IndexIter<'a> {
    pub fn new(blocks: &'a [BitBlock]) -> Self {
        Self { wi: WordIter::new(blocks), cached: 0 }
    }
}
impl Iterator for IndexIter<'_> {
    type Item = Index;
    fn next(&mut self) -> Option<Index> {
        while self.cached == 0 {
            self.cached = self.wi.next()?;
        }
        // self.cached is NONZERO; its highest set bit is the lowest index
        let idx_in_word = self.cached.leading_zeros();
        let wba = WordBitAddr { idx_in_word, idx_of_word: self.wi.idx_of_next_word - 1 };
        self.cached &= !wba.word_mask();
        Some(wba.to_bit_idx())
    }
}
