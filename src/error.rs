//! Crate-wide error type.
//!
//! Dictionary misses are not represented here: per the store contract
//! (`crate::store`), an unknown term resolves to id `0`, which callers are
//! expected to treat as a wildcard (in patterns) or "skip" (in seed lists).
//! Only hard failures — a store that cannot be opened, or an iterator that
//! faults mid-stream — become an [`Error`].

pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("store could not be opened")]
    NotFound(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("store iterator faulted mid-stream")]
    StoreFault(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// `ids_to_string_triple` requires all three components to resolve;
    /// unlike a search pattern, there is no wildcard role for id `0` here.
    #[error("id {0} has no dictionary entry")]
    UnresolvedId(crate::ids::RawId),
}
