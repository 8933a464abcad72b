use crate::Index;
use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors returned by blocks, sets and the cauldron registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A bit position or active length past the end of its domain.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The item is not live in the cauldron.
    #[error("item not found: {0}")]
    ItemNotFound(String),

    /// No live item holds this index.
    #[error("no item at index {0}")]
    IndexNotFound(Index),

    #[error("aspect not found: {0}")]
    AspectNotFound(String),

    #[error("facet not found: {aspect}/{facet}")]
    FacetNotFound { aspect: String, facet: String },

    /// Value-less form of [`AlreadyExists`].
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// An aspect or facet was used after its cauldron was dropped.
    #[error("cauldron has been dropped")]
    CauldronDropped,
}

/// Returned when creating an aspect or facet under a name that is taken.
///
/// The value already registered under that name travels with the error, so
/// callers that want get-or-create semantics can recover it with
/// [`AlreadyExists::into_existing`].
#[derive(Debug, Clone, Error)]
#[error("{name} already exists")]
pub struct AlreadyExists<T> {
    pub name: String,
    pub existing: T,
}

impl<T> AlreadyExists<T> {
    pub fn into_existing(self) -> T {
        self.existing
    }
}

impl<T> From<AlreadyExists<T>> for Error {
    fn from(e: AlreadyExists<T>) -> Self {
        Self::AlreadyExists(e.name)
    }
}
