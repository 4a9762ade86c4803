//! Path addressing, deep merge and glob filtering for structured documents.
//!
//! This crate operates on [`Document`] trees, the in-memory shape of
//! deserialized JSON/YAML:
//! - [`Path`]: slash-delimited addresses with RFC 6901 style escaping
//! - [`get`] / [`Resolver`]: walking a document, with an optional hook
//! - [`set`], [`delete`]: replacing and removing subtrees
//! - [`merge`]: deep merge with configurable list semantics
//! - [`filter_glob`]: select/remove filtering with `*` wildcards
//! - [`Value`]: a forgiving façade with typed accessors
//!
//! # Example
//!
//! ```
//! use sundry_structured::{doc, filter_glob, get, merge, path, set, MergeOptions, Path};
//!
//! let mut d = doc!({"app": {"name": "api", "ports": [80]}});
//! set(&mut d, &Path::parse("/app/env/MODE"), doc!("prod")).unwrap();
//! merge(&mut d, &path!("app"), [doc!({"ports": [443]})], &MergeOptions::default()).unwrap();
//!
//! assert_eq!(get(&d, &path!("app", "ports", 1)).unwrap().as_i64(), Some(443));
//!
//! let public = filter_glob(d, &[path!("app")], &[path!("app", "env")]).unwrap();
//! assert_eq!(public, doc!({"app": {"name": "api", "ports": [80, 443]}}));
//! ```

pub mod document;
pub mod error;
pub mod filter;
pub mod merge;
pub mod mutate;
pub mod object;
pub mod path;
pub mod resolve;
pub mod value;

pub use document::{Document, Map};
pub use error::{ErrorKind, Result, StructuredError};
pub use filter::{filter_glob, FilterKind, FilterTree};
pub use merge::{fold_sources, merge, merge_copy, ArrayMergeMode, MergeOptions};
pub use mutate::{delete, set, set_even_if_nil};
pub use object::{lookup_field, object_to_map, Field, FieldTag, Structured};
pub use path::{Path, PathFormat, DEFAULT_SEPARATOR, WILDCARD};
pub use resolve::{exists, get, get_mut, Hook, Resolver, Visit};
pub use value::Value;

#[doc(hidden)]
pub use serde_json as __serde_json;
