use crate::{AlreadyExists, Cauldron, Error, Facet, Result};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};
use tracing::debug;

/// A named group of [`Facet`]s, e.g. "Location" holding "Melbourne", "Sydney".
///
/// Created through [`Cauldron::new_aspect`]; facet names are unique within one aspect.
#[derive(Debug)]
pub struct Aspect {
    name: String,
    display_name: String,
    cauldron: Weak<Cauldron>,
    facets: RwLock<BTreeMap<String, Arc<Facet>>>,
}

impl Aspect {
    pub(crate) fn new(name: &str, display_name: &str, cauldron: Weak<Cauldron>) -> Self {
        Self {
            name: name.to_owned(),
            display_name: display_name.to_owned(),
            cauldron,
            facets: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn new_facet(&self, name: &str) -> Result<Arc<Facet>, AlreadyExists<Arc<Facet>>> {
        self.new_facet_with_display_name(name, name)
    }
    /// Creates a facet whose bitmap covers the cauldron's current capacity, or
    /// hands back the existing one inside the error if `name` is taken.
    pub fn new_facet_with_display_name(
        &self,
        name: &str,
        display_name: &str,
    ) -> Result<Arc<Facet>, AlreadyExists<Arc<Facet>>> {
        let capacity = self.cauldron.upgrade().map_or(0, |c| c.capacity());
        let mut facets = self.facets.write();
        if let Some(existing) = facets.get(name) {
            return Err(AlreadyExists { name: name.to_owned(), existing: existing.clone() });
        }
        let facet = Arc::new(Facet::new(
            name,
            display_name,
            &self.name,
            self.cauldron.clone(),
            capacity,
        ));
        facets.insert(name.to_owned(), facet.clone());
        debug!(aspect = %self.name, facet = name, capacity, "created facet");
        Ok(facet)
    }
    pub fn facet_or_insert(&self, name: &str) -> Arc<Facet> {
        self.new_facet(name).unwrap_or_else(AlreadyExists::into_existing)
    }

    pub fn facet(&self, name: &str) -> Result<Arc<Facet>> {
        self.facets.read().get(name).cloned().ok_or_else(|| Error::FacetNotFound {
            aspect: self.name.clone(),
            facet: name.to_owned(),
        })
    }
    /// All facets, ordered by name. Empty if none were created.
    pub fn facets(&self) -> Vec<Arc<Facet>> {
        self.facets.read().values().cloned().collect()
    }
    pub fn contains(&self, name: &str) -> bool {
        self.facets.read().contains_key(name)
    }
}
