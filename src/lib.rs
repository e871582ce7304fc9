//! Read-only query layer over an HDT-style RDF store: triple patterns, joins
//! and bounded k-hop neighborhood expansion.
//!
//! Loading and decoding the on-disk HDT container itself is out of scope
//! (see [`store`]'s module doc) — this crate queries a [`store::Store`]
//! that already exists.

pub mod document;
pub mod error;
pub mod hop;
pub mod ids;
pub mod join;
pub mod matrix;
pub mod prefix;
pub mod search;
pub mod store;
pub mod types;

pub use document::HdtDocument;
pub use error::{Error, Result};
pub use hop::HopConfig;
pub use ids::{ContinuousId, NativeId, RawId, Role};
pub use matrix::{HopMatrix, PredicateEdges};
pub use store::{Binding, MemStore, Store, TripleId};

#[cfg(test)]
pub(crate) mod test_support {
    /// Shared `env_logger` init for test modules that want `log::debug!`
    /// output under `cargo test -- --nocapture`; safe to call more than
    /// once per process.
    pub fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }
}
