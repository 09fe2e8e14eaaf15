//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `edge_cases.rs` - Validation boundaries and diff corner cases
//! - `proptest.rs` - Property-based tests (FEN round-trip, diff laws)
