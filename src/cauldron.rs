//! The item registry: item <-> index mapping, index recycling and the aspects
//! whose facets index those items.

use crate::{AlreadyExists, Aspect, BitSet, Error, Index, IndexAllocator, Result};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Weak};
use tracing::debug;

/// Tuning knobs for a [`Cauldron`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CauldronConfig {
    /// Number of items to reserve map space for up front. Does not affect
    /// [`Cauldron::capacity`], which only counts indexes actually handed out.
    pub reserve_items: usize,
}

impl CauldronConfig {
    pub fn with_reserve_items(mut self, reserve_items: usize) -> Self {
        self.reserve_items = reserve_items;
        self
    }
}

/// State guarded by the cauldron's registry lock.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    indexes: HashMap<String, Index>,
    // index -> item; len() is the capacity. `None` marks a freed index.
    items: Vec<Option<String>>,
    aspects: BTreeMap<String, Arc<Aspect>>,
}

impl Registry {
    pub(crate) fn index_of(&self, item: &str) -> Result<Index> {
        self.indexes.get(item).copied().ok_or_else(|| Error::ItemNotFound(item.to_owned()))
    }
    pub(crate) fn item_at(&self, index: Index) -> Result<&str> {
        match self.items.get(index) {
            Some(Some(item)) => Ok(item),
            _ => Err(Error::IndexNotFound(index)),
        }
    }
    pub(crate) fn capacity(&self) -> usize {
        self.items.len()
    }
    /// Fails if `index` was never handed out by this cauldron.
    pub(crate) fn check_in_range(&self, index: Index) -> Result<()> {
        if index < self.capacity() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange { index, len: self.capacity() })
        }
    }
}

/// Owns the universe of items and every [`Aspect`] indexed over them.
///
/// Each live item holds a dense [`Index`]. Removing an item frees its index
/// for reuse and clears it from every facet, so a removed item never remains
/// visible in a query.
///
/// Aspects and facets refer back to their cauldron through a weak handle, so a
/// cauldron is always created behind an [`Arc`].
#[derive(Debug)]
pub struct Cauldron {
    this: Weak<Cauldron>,
    pub(crate) registry: RwLock<Registry>,
    free: IndexAllocator,
}

impl Cauldron {
    pub fn new() -> Arc<Self> {
        Self::with_config(CauldronConfig::default())
    }
    pub fn with_config(config: CauldronConfig) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            this: this.clone(),
            registry: RwLock::new(Registry {
                indexes: HashMap::with_capacity(config.reserve_items),
                items: Vec::with_capacity(config.reserve_items),
                aspects: BTreeMap::new(),
            }),
            free: IndexAllocator::new(),
        })
    }

    /// Returns the index of `item`, assigning one if the item is new.
    ///
    /// A recycled index is preferred over growing the capacity. Upserting a
    /// live item is a no-op returning its existing index.
    pub fn upsert(&self, item: &str) -> Index {
        if let Ok(index) = self.registry.read().index_of(item) {
            return index;
        }
        let mut registry = self.registry.write();
        if let Ok(index) = registry.index_of(item) {
            // lost a race with another upsert of the same item
            return index;
        }
        let index = match self.free.pop() {
            Some(index) => {
                debug!(item, index, "upserted item into recycled index");
                registry.items[index] = Some(item.to_owned());
                index
            }
            None => {
                let index = registry.items.len();
                debug!(item, index, "upserted item into new index");
                registry.items.push(Some(item.to_owned()));
                index
            }
        };
        registry.indexes.insert(item.to_owned(), index);
        index
    }

    /// Removes `item`, clearing its bit in every facet. Returns `false` if the
    /// item was not live.
    pub fn try_remove(&self, item: &str) -> bool {
        let (index, aspects) = {
            let mut registry = self.registry.write();
            let Some(index) = registry.indexes.remove(item) else {
                return false;
            };
            registry.items[index] = None;
            (index, registry.aspects.values().cloned().collect::<Vec<_>>())
        };
        // registry lock released: facets are locked one at a time
        let mut cleared = 0usize;
        for aspect in &aspects {
            for facet in aspect.facets() {
                if facet.clear_index(index) {
                    cleared += 1;
                }
            }
        }
        // only reusable once no facet still holds the old bit
        self.free.push(index);
        debug!(item, index, cleared, "removed item");
        true
    }

    pub fn index_for(&self, item: &str) -> Result<Index> {
        self.registry.read().index_of(item)
    }
    pub fn item_for(&self, index: Index) -> Result<String> {
        self.registry.read().item_at(index).map(str::to_owned)
    }
    pub fn contains(&self, item: &str) -> bool {
        self.registry.read().indexes.contains_key(item)
    }
    /// Live items, in index order.
    pub fn items(&self) -> Vec<String> {
        self.registry.read().items.iter().flatten().cloned().collect()
    }

    /// Highest index ever handed out, plus one. Never decreases.
    pub fn capacity(&self) -> usize {
        self.registry.read().capacity()
    }
    /// Number of live items.
    pub fn count(&self) -> usize {
        self.registry.read().indexes.len()
    }

    pub fn new_aspect(&self, name: &str) -> Result<Arc<Aspect>, AlreadyExists<Arc<Aspect>>> {
        self.new_aspect_with_display_name(name, name)
    }
    /// Creates an aspect, or hands back the existing one inside the error if
    /// `name` is taken.
    pub fn new_aspect_with_display_name(
        &self,
        name: &str,
        display_name: &str,
    ) -> Result<Arc<Aspect>, AlreadyExists<Arc<Aspect>>> {
        let mut registry = self.registry.write();
        if let Some(existing) = registry.aspects.get(name) {
            return Err(AlreadyExists { name: name.to_owned(), existing: existing.clone() });
        }
        let aspect = Arc::new(Aspect::new(name, display_name, self.this.clone()));
        registry.aspects.insert(name.to_owned(), aspect.clone());
        debug!(aspect = name, "created aspect");
        Ok(aspect)
    }
    pub fn aspect_or_insert(&self, name: &str) -> Arc<Aspect> {
        self.new_aspect(name).unwrap_or_else(AlreadyExists::into_existing)
    }
    pub fn aspect(&self, name: &str) -> Result<Arc<Aspect>> {
        self.registry
            .read()
            .aspects
            .get(name)
            .cloned()
            .ok_or_else(|| Error::AspectNotFound(name.to_owned()))
    }
    /// All aspects, ordered by name. Empty if none were created.
    pub fn aspects(&self) -> Vec<Arc<Aspect>> {
        self.registry.read().aspects.values().cloned().collect()
    }

    /// An all-zero set over the current capacity.
    pub fn empty_set(&self) -> BitSet {
        BitSet::with_size(self.capacity())
    }
    /// A set over the current capacity holding exactly the live indexes.
    pub fn all_set(&self) -> BitSet {
        let registry = self.registry.read();
        let mut set = BitSet::with_size(registry.capacity());
        for (index, item) in registry.items.iter().enumerate() {
            if item.is_some() {
                set.set_bit(index);
            }
        }
        set
    }
}
