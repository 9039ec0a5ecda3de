//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `attacks.rs` - attack queries and the square-attacked predicate
//! - `consistency.rs` - cross-view invariants over a position corpus
//! - `proptest.rs` - property-based tests

mod consistency;
