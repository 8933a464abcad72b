use crate::{BitSet, Cauldron, Error, Index, Result};
use parking_lot::RwLock;
use std::sync::{Arc, Weak};

/// A named boolean property of items: bit `i` is set iff the item at index `i`
/// has the property.
///
/// Item based accessors resolve the item through the owning cauldron. Index
/// based accessors reject indexes the cauldron never handed out with
/// [`Error::IndexOutOfRange`].
///
/// Algebra against another facet or a raw [`BitSet`] returns a new set; the
/// `*_count` forms return only its population count.
#[derive(Debug)]
pub struct Facet {
    name: String,
    display_name: String,
    aspect: String,
    cauldron: Weak<Cauldron>,
    bits: RwLock<BitSet>,
}

impl Facet {
    pub(crate) fn new(
        name: &str,
        display_name: &str,
        aspect: &str,
        cauldron: Weak<Cauldron>,
        capacity: usize,
    ) -> Self {
        Self {
            name: name.to_owned(),
            display_name: display_name.to_owned(),
            aspect: aspect.to_owned(),
            cauldron,
            bits: RwLock::new(BitSet::with_size(capacity)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
    pub fn aspect_name(&self) -> &str {
        &self.aspect
    }

    fn cauldron(&self) -> Result<Arc<Cauldron>> {
        self.cauldron.upgrade().ok_or(Error::CauldronDropped)
    }
    /// The domain facet-level `not` is taken over.
    fn domain_size(&self) -> usize {
        self.cauldron.upgrade().map_or(0, |c| c.capacity())
    }

    pub fn get_by_index(&self, index: Index) -> Result<bool> {
        self.cauldron()?.registry.read().check_in_range(index)?;
        Ok(self.bits.read().get_bit(index))
    }
    pub fn get_by_item(&self, item: &str) -> Result<bool> {
        let index = self.cauldron()?.index_for(item)?;
        Ok(self.bits.read().get_bit(index))
    }

    /// Fails with [`Error::IndexNotFound`] if no live item holds `index`.
    pub fn set_by_index(&self, index: Index) -> Result<()> {
        let cauldron = self.cauldron()?;
        // held across the write so a concurrent removal cannot slip in between
        let registry = cauldron.registry.read();
        registry.check_in_range(index)?;
        registry.item_at(index)?;
        self.bits.write().set_bit(index);
        Ok(())
    }
    pub fn set_by_item(&self, item: &str) -> Result<()> {
        let cauldron = self.cauldron()?;
        let registry = cauldron.registry.read();
        let index = registry.index_of(item)?;
        self.bits.write().set_bit(index);
        Ok(())
    }
    pub fn unset_by_index(&self, index: Index) -> Result<()> {
        let cauldron = self.cauldron()?;
        let registry = cauldron.registry.read();
        registry.check_in_range(index)?;
        self.bits.write().unset_bit(index);
        Ok(())
    }
    pub fn unset_by_item(&self, item: &str) -> Result<()> {
        let cauldron = self.cauldron()?;
        let registry = cauldron.registry.read();
        let index = registry.index_of(item)?;
        self.bits.write().unset_bit(index);
        Ok(())
    }
    /// Removal fan-out from the cauldron. Never grows the set.
    pub(crate) fn clear_index(&self, index: Index) -> bool {
        let mut bits = self.bits.write();
        bits.get_bit(index) && bits.unset_bit(index)
    }

    pub fn count(&self) -> usize {
        self.bits.read().count()
    }
    /// A copy of the underlying set.
    pub fn snapshot(&self) -> BitSet {
        self.bits.read().clone()
    }
    /// Indexes holding this property, ascending.
    pub fn indexes(&self) -> Vec<Index> {
        self.bits.read().iter_indexes().collect()
    }
    /// Items holding this property, in index order.
    pub fn items(&self) -> Result<Vec<String>> {
        let cauldron = self.cauldron()?;
        let registry = cauldron.registry.read();
        let bits = self.bits.read();
        bits.iter_indexes().map(|index| registry.item_at(index).map(str::to_owned)).collect()
    }

    /// Runs `f` with both facets' sets read-locked. Locks are taken in address
    /// order so two threads combining the same pair cannot deadlock.
    fn with_both<R>(&self, other: &Facet, f: impl FnOnce(&BitSet, &BitSet) -> R) -> R {
        if core::ptr::eq(self, other) {
            let bits = self.bits.read();
            return f(&*bits, &*bits);
        }
        if (self as *const Facet) < (other as *const Facet) {
            let a = self.bits.read();
            let b = other.bits.read();
            f(&*a, &*b)
        } else {
            let b = other.bits.read();
            let a = self.bits.read();
            f(&*a, &*b)
        }
    }

    pub fn and(&self, other: &Facet) -> BitSet {
        self.with_both(other, BitSet::and)
    }
    pub fn or(&self, other: &Facet) -> BitSet {
        self.with_both(other, BitSet::or)
    }
    /// Indexes in this facet but not in `other`.
    pub fn and_not(&self, other: &Facet) -> BitSet {
        self.with_both(other, BitSet::and_not)
    }
    pub fn and_count(&self, other: &Facet) -> usize {
        self.with_both(other, BitSet::and_count)
    }
    pub fn or_count(&self, other: &Facet) -> usize {
        self.with_both(other, BitSet::or_count)
    }
    pub fn and_not_count(&self, other: &Facet) -> usize {
        self.with_both(other, BitSet::and_not_count)
    }

    pub fn and_set(&self, set: &BitSet) -> BitSet {
        self.bits.read().and(set)
    }
    pub fn or_set(&self, set: &BitSet) -> BitSet {
        self.bits.read().or(set)
    }
    pub fn and_not_set(&self, set: &BitSet) -> BitSet {
        self.bits.read().and_not(set)
    }
    pub fn and_count_set(&self, set: &BitSet) -> usize {
        self.bits.read().and_count(set)
    }
    pub fn or_count_set(&self, set: &BitSet) -> usize {
        self.bits.read().or_count(set)
    }
    pub fn and_not_count_set(&self, set: &BitSet) -> usize {
        self.bits.read().and_not_count(set)
    }

    /// Complement over the cauldron's current capacity. Freed indexes below the
    /// capacity come out set; intersect with [`Cauldron::all_set`] to keep only
    /// live items.
    pub fn not(&self) -> BitSet {
        let domain_size = self.domain_size();
        let bits = self.bits.read();
        if bits.size() >= domain_size {
            return bits.not();
        }
        let mut widened = bits.clone();
        drop(bits);
        widened.ensure_capacity(domain_size);
        widened.not()
    }
    pub fn not_count(&self) -> usize {
        let domain_size = self.domain_size();
        let bits = self.bits.read();
        bits.size().max(domain_size) - bits.count()
    }
    /// `not` of `set` taken over the same domain as [`Facet::not`].
    pub fn not_set(&self, set: &BitSet) -> BitSet {
        let mut widened = set.clone();
        widened.ensure_capacity(self.domain_size());
        widened.not()
    }
    pub fn not_count_set(&self, set: &BitSet) -> usize {
        set.size().max(self.domain_size()) - set.count()
    }
}
