//! Testing utilities and fixtures for sundry.
//!
//! - **Fixtures**: sample documents shared by integration tests
//! - **Assertions**: document comparison with a readable diff, and
//!   `assert_ok!` / `assert_err!` macros
//!
//! # Example Usage
//!
//! ```rust
//! use sundry_test_utils::{assertions::assert_doc_eq, fixtures};
//!
//! let doc = fixtures::filter_sample();
//! assert_doc_eq(&doc, &fixtures::filter_sample());
//! ```

pub mod assertions;
pub mod fixtures;

pub use assertions::assert_doc_eq;
