//! Native structs inside a document.
//!
//! A caller's type opts in by implementing [`Structured`], listing its fields
//! together with an optional name annotation in the familiar
//! `"name,omitempty"` / `",squash"` form. The resolver looks fields up by
//! their Rust name or by the annotated name; squashed members have their own
//! fields promoted into the parent's namespace.

use crate::document::{Document, Map};
use std::fmt;
use std::sync::Arc;

/// A native value that exposes its fields to the document engine.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use sundry_structured::{get, path, Document, Field, Structured};
///
/// #[derive(Debug)]
/// struct Server {
///     host: String,
///     port: i64,
/// }
///
/// impl Structured for Server {
///     fn fields(&self) -> Vec<Field> {
///         vec![
///             Field::new("host", self.host.as_str()),
///             Field::new("port", self.port).tag("listenPort,omitempty"),
///         ]
///     }
/// }
///
/// let doc = Document::from(Arc::new(Server { host: "db".into(), port: 5432 }));
/// assert_eq!(get(&doc, &path!("listenPort")).unwrap().as_i64(), Some(5432));
/// ```
pub trait Structured: fmt::Debug + Send + Sync {
    /// The fields of this value, in declaration order.
    fn fields(&self) -> Vec<Field>;
}

/// One field of a [`Structured`] value.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub tag: FieldTag,
    pub value: Document,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<Document>) -> Self {
        Self {
            name: name.into(),
            tag: FieldTag::default(),
            value: value.into(),
        }
    }

    /// Attach a name annotation, e.g. `"name,omitempty"` or `",squash"`.
    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = FieldTag::parse(tag);
        self
    }

    /// The key this field is exposed under.
    pub fn key(&self) -> &str {
        self.tag.name.as_deref().unwrap_or(&self.name)
    }

    fn matches(&self, key: &str) -> bool {
        self.name == key || self.tag.name.as_deref() == Some(key)
    }
}

/// Parsed field annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTag {
    /// Alternate key; `None` keeps the field name.
    pub name: Option<String>,
    pub omit_empty: bool,
    /// Promote the member's own fields into the parent.
    pub squash: bool,
    /// Hidden from lookup and serialization (`"-"`).
    pub skip: bool,
}

impl FieldTag {
    /// Parse `"name,opt1,opt2"`. Unknown options are ignored.
    pub fn parse(tag: &str) -> Self {
        let mut parts = tag.split(',');
        let name = parts.next().unwrap_or_default().trim();

        if name == "-" {
            return Self {
                skip: true,
                ..Self::default()
            };
        }

        let mut out = Self {
            name: (!name.is_empty()).then(|| name.to_string()),
            ..Self::default()
        };
        for opt in parts {
            match opt.trim() {
                "omitempty" => out.omit_empty = true,
                "squash" | "inline" => out.squash = true,
                _ => {}
            }
        }
        out
    }
}

/// Look up `key` among the fields of `obj`.
///
/// Direct fields win over promoted ones; squashed members are searched in
/// declaration order, recursively.
pub fn lookup_field(obj: &dyn Structured, key: &str) -> Option<Document> {
    let fields = obj.fields();

    if let Some(field) = fields
        .iter()
        .find(|f| !f.tag.skip && !f.tag.squash && f.matches(key))
    {
        return Some(field.value.clone());
    }

    fields
        .into_iter()
        .filter(|f| !f.tag.skip && f.tag.squash)
        .find_map(|f| match f.value {
            Document::Object(inner) => lookup_field(inner.as_ref(), key),
            Document::Map(mut map) => map.remove(key),
            _ => None,
        })
}

/// Map view of `obj`, keyed by effective field names.
///
/// Omitempty fields holding an empty value are dropped. Squashed members
/// contribute their entries unless the parent already defines the key.
pub fn object_to_map(obj: &dyn Structured) -> Map {
    let mut out = Map::new();
    let mut promoted: Vec<Map> = Vec::new();

    for field in obj.fields() {
        if field.tag.skip {
            continue;
        }
        if field.tag.squash {
            match field.value {
                Document::Object(inner) => promoted.push(object_to_map(inner.as_ref())),
                Document::Map(map) => promoted.push(map),
                _ => {}
            }
            continue;
        }
        if field.tag.omit_empty && field.value.is_empty_value() {
            continue;
        }
        let key = field.key().to_string();
        out.insert(key, field.value);
    }

    for map in promoted {
        for (k, v) in map {
            out.entry(k).or_insert(v);
        }
    }
    out
}

impl<T: Structured + 'static> From<Arc<T>> for Document {
    fn from(value: Arc<T>) -> Self {
        Document::Object(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    #[derive(Debug)]
    struct Meta {
        name: String,
        labels: Map,
    }

    impl Structured for Meta {
        fn fields(&self) -> Vec<Field> {
            vec![
                Field::new("Name", self.name.as_str()).tag("name"),
                Field::new("Labels", self.labels.clone()).tag("labels,omitempty"),
            ]
        }
    }

    #[derive(Debug)]
    struct Pod {
        meta: Arc<Meta>,
        image: String,
        secret: String,
    }

    impl Structured for Pod {
        fn fields(&self) -> Vec<Field> {
            vec![
                Field::new("Meta", self.meta.clone()).tag(",squash"),
                Field::new("Image", self.image.as_str()).tag("image,omitempty"),
                Field::new("Secret", self.secret.as_str()).tag("-"),
            ]
        }
    }

    fn pod() -> Pod {
        Pod {
            meta: Arc::new(Meta {
                name: "web".into(),
                labels: Map::new(),
            }),
            image: "nginx".into(),
            secret: "hunter2".into(),
        }
    }

    #[test]
    fn test_tag_parse() {
        let tag = FieldTag::parse("name,omitempty");
        assert_eq!(tag.name.as_deref(), Some("name"));
        assert!(tag.omit_empty);
        assert!(!tag.squash);

        let tag = FieldTag::parse(",inline");
        assert_eq!(tag.name, None);
        assert!(tag.squash);

        assert!(FieldTag::parse("-").skip);
        assert_eq!(FieldTag::parse(""), FieldTag::default());
    }

    #[test]
    fn test_lookup_by_field_name_and_tag() {
        let p = pod();
        assert_eq!(lookup_field(&p, "Image"), Some(doc!("nginx")));
        assert_eq!(lookup_field(&p, "image"), Some(doc!("nginx")));
    }

    #[test]
    fn test_lookup_promotes_squashed_fields() {
        let p = pod();
        assert_eq!(lookup_field(&p, "name"), Some(doc!("web")));
        assert_eq!(lookup_field(&p, "Meta"), None);
    }

    #[test]
    fn test_skipped_field_is_hidden() {
        let p = pod();
        assert_eq!(lookup_field(&p, "Secret"), None);
        assert!(!object_to_map(&p).contains_key("Secret"));
    }

    #[test]
    fn test_object_to_map_applies_tags() {
        let map = object_to_map(&pod());
        assert_eq!(
            Document::Map(map),
            doc!({"name": "web", "image": "nginx"})
        );
    }
}
