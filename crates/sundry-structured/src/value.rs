//! Forgiving façade over the document functions.
//!
//! A [`Value`] pairs a document with the error of the operation that
//! produced it, so calls can be chained and checked once at the end. Typed
//! accessors never fail: on a type mismatch, a missing value or a carried
//! error they return the supplied default, or the type's zero value.

use crate::document::{Document, Map};
use crate::error::{Result, StructuredError};
use crate::filter::filter_glob;
use crate::merge::{merge, MergeOptions};
use crate::mutate::{delete, set, set_even_if_nil};
use crate::object::object_to_map;
use crate::resolve::get;
use crate::Path;

/// A document plus the error, if any, that produced it.
///
/// ```
/// use sundry_structured::{doc, Value};
///
/// let v = Value::new(doc!({"server": {"port": 8080, "tls": true}}));
/// assert_eq!(v.get("/server/port").int(), 8080);
/// assert_eq!(v.get("/server/host").string_or("localhost"), "localhost");
/// assert!(v.get("/server/host").is_error());
/// assert!(!v.get("/server/tls").is_error());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Value {
    doc: Document,
    err: Option<StructuredError>,
}

impl Value {
    pub fn new(doc: impl Into<Document>) -> Self {
        Self {
            doc: doc.into(),
            err: None,
        }
    }

    pub fn from_error(err: StructuredError) -> Self {
        Self {
            doc: Document::Null,
            err: Some(err),
        }
    }

    pub fn is_error(&self) -> bool {
        self.err.is_some()
    }

    pub fn error(&self) -> Option<&StructuredError> {
        self.err.as_ref()
    }

    /// The value is present and no error is carried.
    pub fn exists(&self) -> bool {
        self.err.is_none() && !self.doc.is_null()
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    pub fn into_result(self) -> Result<Document> {
        match self.err {
            Some(err) => Err(err),
            None => Ok(self.doc),
        }
    }

    /// The sub-value at `path`; a failed lookup yields an error value.
    pub fn get(&self, path: impl Into<Path>) -> Value {
        if self.is_error() {
            return self.clone();
        }
        match get(&self.doc, &path.into()) {
            Ok(found) => Value::new(found.into_owned()),
            Err(err) => Value::from_error(err),
        }
    }

    /// See [`crate::set`].
    pub fn set(self, path: impl Into<Path>, data: impl Into<Document>) -> Value {
        let path = path.into();
        self.apply(|doc| set(doc, &path, data.into()))
    }

    /// See [`crate::set_even_if_nil`].
    pub fn set_even_if_nil(self, path: impl Into<Path>, data: impl Into<Document>) -> Value {
        let path = path.into();
        self.apply(|doc| set_even_if_nil(doc, &path, data.into()))
    }

    /// See [`crate::delete`]; whether something was removed is not reported.
    pub fn delete(self, path: impl Into<Path>) -> Value {
        let path = path.into();
        self.apply(|doc| delete(doc, &path).map(|_| ()))
    }

    /// See [`crate::merge`].
    pub fn merge<I>(self, path: impl Into<Path>, sources: I, opts: &MergeOptions) -> Value
    where
        I: IntoIterator<Item = Document>,
    {
        let path = path.into();
        self.apply(|doc| merge(doc, &path, sources, opts))
    }

    /// Glob filter the document; nothing left yields a `Null` value.
    pub fn query(&self, select: &[Path], remove: &[Path]) -> Value {
        if self.is_error() {
            return self.clone();
        }
        Value::new(filter_glob(self.doc.clone(), select, remove).unwrap_or_default())
    }

    fn apply<F>(mut self, op: F) -> Value
    where
        F: FnOnce(&mut Document) -> Result<()>,
    {
        if self.is_error() {
            return self;
        }
        if let Err(err) = op(&mut self.doc) {
            self.err = Some(err);
        }
        self
    }

    fn ok(&self) -> Option<&Document> {
        if self.is_error() {
            None
        } else {
            Some(&self.doc)
        }
    }

    pub fn string(&self) -> String {
        self.string_or("")
    }

    pub fn string_or(&self, default: &str) -> String {
        self.ok()
            .and_then(Document::as_str)
            .unwrap_or(default)
            .to_string()
    }

    pub fn int(&self) -> i64 {
        self.int_or(0)
    }

    /// Integral floats count as integers.
    pub fn int_or(&self, default: i64) -> i64 {
        self.ok().and_then(Document::as_i64).unwrap_or(default)
    }

    pub fn float(&self) -> f64 {
        self.float_or(0.0)
    }

    pub fn float_or(&self, default: f64) -> f64 {
        self.ok().and_then(Document::as_f64).unwrap_or(default)
    }

    pub fn bool(&self) -> bool {
        self.bool_or(false)
    }

    pub fn bool_or(&self, default: bool) -> bool {
        self.ok().and_then(Document::as_bool).unwrap_or(default)
    }

    pub fn map(&self) -> Map {
        self.map_or(Map::new())
    }

    pub fn map_or(&self, default: Map) -> Map {
        match self.ok() {
            Some(Document::Map(m)) => m.clone(),
            Some(Document::Object(obj)) => object_to_map(obj.as_ref()),
            _ => default,
        }
    }

    pub fn list(&self) -> Vec<Document> {
        self.list_or(Vec::new())
    }

    pub fn list_or(&self, default: Vec<Document>) -> Vec<Document> {
        self.ok()
            .and_then(Document::as_list)
            .cloned()
            .unwrap_or(default)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::new(doc)
    }
}

impl From<Result<Document>> for Value {
    fn from(result: Result<Document>) -> Self {
        match result {
            Ok(doc) => Value::new(doc),
            Err(err) => Value::from_error(err),
        }
    }
}
