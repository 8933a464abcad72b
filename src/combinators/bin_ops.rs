use crate::{BinWordOp, BitBlock, Word};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Or;
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Xor;
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct And;
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Diff; // first not latter

//////////

impl BinWordOp for Or {
    #[inline]
    fn combine_words(self, a: Word, b: Word) -> Word {
        a | b
    }
}
impl BinWordOp for Xor {
    #[inline]
    fn combine_words(self, a: Word, b: Word) -> Word {
        a ^ b
    }
}
impl BinWordOp for And {
    #[inline]
    fn combine_words(self, a: Word, b: Word) -> Word {
        a & b
    }
    fn combine_blocks(self, a: Option<&BitBlock>, b: Option<&BitBlock>) -> Option<BitBlock> {
        if let [Some(a), Some(b)] = [a, b] {
            Some(a.combined(self, b))
        } else {
            None
        }
    }
    fn count_blocks(self, a: Option<&BitBlock>, b: Option<&BitBlock>) -> usize {
        if let [Some(a), Some(b)] = [a, b] {
            a.combined_count(self, b)
        } else {
            0
        }
    }
}
impl BinWordOp for Diff {
    #[inline]
    fn combine_words(self, a: Word, b: Word) -> Word {
        a & !b
    }
    fn combine_blocks(self, a: Option<&BitBlock>, b: Option<&BitBlock>) -> Option<BitBlock> {
        match (a, b) {
            (Some(a), Some(b)) => Some(a.combined(self, b)),
            (Some(a), None) => Some(*a),
            (None, _) => None,
        }
    }
    fn count_blocks(self, a: Option<&BitBlock>, b: Option<&BitBlock>) -> usize {
        match (a, b) {
            (Some(a), Some(b)) => a.combined_count(self, b),
            (Some(a), None) => a.count_all(),
            (None, _) => 0,
        }
    }
}
