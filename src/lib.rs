//! docfixer
//!
//! Fills in the parts of generated API documentation that the binding
//! generator cannot write itself: event and delegate prose for bound types
//! and, optionally, notification docs imported from an external source.

pub mod config;
pub mod constants;
pub mod coordinator;
pub mod docs;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod xml_tree;
#[cfg(test)]
pub mod test_utils;
