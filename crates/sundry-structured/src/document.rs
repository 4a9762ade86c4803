//! The dynamic document model.
//!
//! A [`Document`] is what deserialized JSON/YAML looks like once it is in
//! memory: maps with string keys, lists, and scalar leaves. Native structs
//! can be embedded as [`Document::Object`] and are seen through their
//! [`Structured`] field list.

use crate::object::{object_to_map, Structured};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Map node of a document.
pub type Map = BTreeMap<String, Document>;

/// A node in a document tree.
#[derive(Clone, Default)]
pub enum Document {
    /// Absent value. Also the removal sentinel for [`crate::set`].
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Document>),
    Map(Map),
    /// Opaque reference to a native value.
    Object(Arc<dyn Structured>),
}

impl Document {
    /// Create an empty map node.
    pub fn map() -> Self {
        Document::Map(Map::new())
    }

    /// Create an empty list node.
    pub fn list() -> Self {
        Document::List(Vec::new())
    }

    /// Short name of the node type, for error messages and logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Document::Null => "null",
            Document::Bool(_) => "bool",
            Document::Int(_) => "int",
            Document::Float(_) => "float",
            Document::String(_) => "string",
            Document::List(_) => "list",
            Document::Map(_) => "map",
            Document::Object(_) => "object",
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Document::Null)
    }

    /// Whether the node can be descended into.
    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Document::List(_) | Document::Map(_) | Document::Object(_)
        )
    }

    /// Null, false, zero, or an empty string/list/map.
    pub fn is_empty_value(&self) -> bool {
        match self {
            Document::Null => true,
            Document::Bool(b) => !*b,
            Document::Int(i) => *i == 0,
            Document::Float(f) => *f == 0.0,
            Document::String(s) => s.is_empty(),
            Document::List(l) => l.is_empty(),
            Document::Map(m) => m.is_empty(),
            Document::Object(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Document::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Document::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer value; floats with no fractional part are accepted.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Document::Int(i) => Some(*i),
            Document::Float(f)
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 =>
            {
                Some(*f as i64)
            }
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Document::Float(f) => Some(*f),
            Document::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<Document>> {
        match self {
            Document::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Document>> {
        match self {
            Document::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Document::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Document::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Arc<dyn Structured>> {
        match self {
            Document::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Replace an `Object` node by its map view; other nodes are unchanged.
    ///
    /// Only the top level is converted; nested objects stay opaque.
    pub fn materialize(self) -> Document {
        match self {
            Document::Object(obj) => Document::Map(object_to_map(obj.as_ref())),
            other => other,
        }
    }

    /// Take the value out, leaving `Null` behind.
    #[inline]
    pub fn take(&mut self) -> Document {
        std::mem::take(self)
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Document::Null, Document::Null) => true,
            (Document::Bool(a), Document::Bool(b)) => a == b,
            (Document::Int(a), Document::Int(b)) => a == b,
            (Document::Float(a), Document::Float(b)) => a == b,
            (Document::String(a), Document::String(b)) => a == b,
            (Document::List(a), Document::List(b)) => a == b,
            (Document::Map(a), Document::Map(b)) => a == b,
            (Document::Object(a), Document::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Document::Null => f.write_str("Null"),
            Document::Bool(b) => write!(f, "Bool({b})"),
            Document::Int(i) => write!(f, "Int({i})"),
            Document::Float(x) => write!(f, "Float({x})"),
            Document::String(s) => write!(f, "String({s:?})"),
            Document::List(l) => f.debug_list().entries(l).finish(),
            Document::Map(m) => f.debug_map().entries(m).finish(),
            Document::Object(o) => write!(f, "Object({o:?})"),
        }
    }
}

/// Compact JSON rendering.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::Value::from(self))
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Document::Null => serializer.serialize_unit(),
            Document::Bool(b) => serializer.serialize_bool(*b),
            Document::Int(i) => serializer.serialize_i64(*i),
            Document::Float(x) => serializer.serialize_f64(*x),
            Document::String(s) => serializer.serialize_str(s),
            Document::List(l) => {
                let mut seq = serializer.serialize_seq(Some(l.len()))?;
                for item in l {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Document::Map(m) => serialize_map(m, serializer),
            Document::Object(o) => serialize_map(&object_to_map(o.as_ref()), serializer),
        }
    }
}

fn serialize_map<S: Serializer>(map: &Map, serializer: S) -> Result<S::Ok, S::Error> {
    let mut out = serializer.serialize_map(Some(map.len()))?;
    for (k, v) in map {
        out.serialize_entry(k, v)?;
    }
    out.end()
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Document::from)
    }
}

impl From<serde_json::Value> for Document {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as J;
        match value {
            J::Null => Document::Null,
            J::Bool(b) => Document::Bool(b),
            J::Number(n) => match n.as_i64() {
                Some(i) => Document::Int(i),
                None => Document::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            J::String(s) => Document::String(s),
            J::Array(a) => Document::List(a.into_iter().map(Document::from).collect()),
            J::Object(o) => Document::Map(o.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

impl From<&Document> for serde_json::Value {
    fn from(doc: &Document) -> Self {
        use serde_json::Value as J;
        match doc {
            Document::Null => J::Null,
            Document::Bool(b) => J::Bool(*b),
            Document::Int(i) => J::from(*i),
            Document::Float(x) => serde_json::Number::from_f64(*x).map_or(J::Null, J::Number),
            Document::String(s) => J::String(s.clone()),
            Document::List(l) => J::Array(l.iter().map(J::from).collect()),
            Document::Map(m) => J::Object(m.iter().map(|(k, v)| (k.clone(), v.into())).collect()),
            Document::Object(o) => J::Object(
                object_to_map(o.as_ref())
                    .iter()
                    .map(|(k, v)| (k.clone(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl From<Document> for serde_json::Value {
    fn from(doc: Document) -> Self {
        serde_json::Value::from(&doc)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Document {
                fn from(v: $t) -> Self {
                    Document::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Document {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => Document::Int(i),
            Err(_) => Document::Float(v as f64),
        }
    }
}

impl From<usize> for Document {
    fn from(v: usize) -> Self {
        Document::from(v as u64)
    }
}

impl From<f64> for Document {
    fn from(v: f64) -> Self {
        Document::Float(v)
    }
}

impl From<f32> for Document {
    fn from(v: f32) -> Self {
        Document::Float(f64::from(v))
    }
}

impl From<bool> for Document {
    fn from(v: bool) -> Self {
        Document::Bool(v)
    }
}

impl From<&str> for Document {
    fn from(v: &str) -> Self {
        Document::String(v.to_string())
    }
}

impl From<String> for Document {
    fn from(v: String) -> Self {
        Document::String(v)
    }
}

impl From<Vec<Document>> for Document {
    fn from(v: Vec<Document>) -> Self {
        Document::List(v)
    }
}

impl From<Map> for Document {
    fn from(v: Map) -> Self {
        Document::Map(v)
    }
}

impl From<Arc<dyn Structured>> for Document {
    fn from(v: Arc<dyn Structured>) -> Self {
        Document::Object(v)
    }
}

impl<T: Into<Document>> From<Option<T>> for Document {
    fn from(v: Option<T>) -> Self {
        v.map_or(Document::Null, Into::into)
    }
}

impl FromIterator<Document> for Document {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Document::List(iter.into_iter().collect())
    }
}

/// Build a [`Document`] using `serde_json::json!` syntax.
///
/// ```
/// use sundry_structured::doc;
///
/// let d = doc!({"a": [1, 2, {"b": null}]});
/// assert!(d.as_map().is_some());
/// ```
#[macro_export]
macro_rules! doc {
    ($($json:tt)+) => {
        $crate::Document::from($crate::__serde_json::json!($($json)+))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(doc!(3), Document::Int(3));
        assert_eq!(doc!(1.5), Document::Float(1.5));
        assert_eq!(doc!(u64::MAX), Document::Float(u64::MAX as f64));
    }

    #[test]
    fn test_int_and_float_are_distinct() {
        assert_ne!(Document::Int(1), Document::Float(1.0));
        assert_eq!(Document::Float(2.0).as_i64(), Some(2));
        assert_eq!(Document::Float(2.5).as_i64(), None);
    }

    #[test]
    fn test_json_round_trip_through_serde() {
        let d = doc!({"a": [1, "two", true, null], "b": {"c": 2.5}});
        let text = serde_json::to_string(&d).unwrap();
        let back: Document = serde_json::from_str(&text).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn test_display_is_compact_json() {
        let d = doc!({"b": 1, "a": [true]});
        assert_eq!(d.to_string(), r#"{"a":[true],"b":1}"#);
    }

    #[test]
    fn test_empty_values() {
        for d in [doc!(null), doc!(false), doc!(0), doc!(""), doc!([]), doc!({})] {
            assert!(d.is_empty_value(), "{d:?} should be empty");
        }
        assert!(!doc!(" ").is_empty_value());
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Document::from(None::<i64>), Document::Null);
        assert_eq!(Document::from(Some("x")), doc!("x"));
    }
}
