//! Documentation module
//!
//! This module owns everything that touches the per-type mdoc XML files:
//! loading and caching them, looking up member nodes, merging generated
//! prose and external fragments into them, and writing them back.
//!
//! It is split into:
//! 1. `document`: member lookup inside one type's documentation
//! 2. `store`: load-once cache and bulk write-back
//! 3. `external`: optional source of imported documentation fragments
//! 4. `merge`: the two merge passes run for every bound type

pub mod document;
pub mod external;
pub mod merge;
pub mod store;

pub use document::{DocumentTree, MemberDocs};
pub use external::{DirectoryDocProvider, ExternalDocProvider};
pub use merge::{MergeEngine, MergeOptions, TypeReport};
pub use store::DocStore;
