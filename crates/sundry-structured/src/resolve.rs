//! Walking a document along a [`Path`].
//!
//! Maps are entered by key, lists by base-10 index (negative indices count
//! from the end), objects by field name or annotated name. A hook can be
//! installed to inspect or substitute every node on the way down, including
//! the root and the final node.

use crate::document::Document;
use crate::error::{Result, StructuredError};
use crate::object::lookup_field;
use crate::Path;
use std::borrow::Cow;
use tracing::trace;

/// What a resolver hook wants to happen at the current node.
#[derive(Debug, Clone, PartialEq)]
pub enum Visit {
    /// Keep the node and continue descending.
    Continue,
    /// Use the given value in place of the node, then continue.
    Replace(Document),
    /// Stop here and return the current node.
    Stop,
    /// Stop here and return the given value instead.
    StopWith(Document),
}

/// Hook signature: current node, path walked so far, full requested path.
pub type Hook<'h> = Box<dyn FnMut(&Document, &[String], &Path) -> Visit + 'h>;

/// Configurable path walker.
///
/// # Example
///
/// ```
/// use sundry_structured::{doc, path, Resolver, Visit};
///
/// let d = doc!({"a": {"b": 1}});
/// // pretend every scalar lives in a box of its own
/// let got = Resolver::new(&path!("a", "b", "value"))
///     .with_hook(|node, _, _| {
///         if node.is_container() { Visit::Continue } else { Visit::Stop }
///     })
///     .resolve(&d)
///     .unwrap();
/// assert_eq!(got.into_owned(), doc!(1));
/// ```
pub struct Resolver<'p, 'h> {
    path: &'p Path,
    create: bool,
    hook: Option<Hook<'h>>,
    stop: usize,
}

impl<'p, 'h> Resolver<'p, 'h> {
    pub fn new(path: &'p Path) -> Self {
        Self {
            path,
            create: false,
            hook: None,
            stop: path.len(),
        }
    }

    /// Stop after `depth` segments while still reporting errors against
    /// the full path. Used to reach the parent of a leaf.
    pub(crate) fn up_to(mut self, depth: usize) -> Self {
        self.stop = depth.min(self.path.len());
        self
    }

    /// Create missing map nodes in [`Resolver::resolve_mut`].
    pub fn create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    pub fn with_hook<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&Document, &[String], &Path) -> Visit + 'h,
    {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Resolve without modifying `root`.
    ///
    /// Nodes reached purely through maps and lists are borrowed; values
    /// read from objects or produced by the hook are owned.
    pub fn resolve<'a>(&mut self, root: &'a Document) -> Result<Cow<'a, Document>> {
        let path = self.path;
        let segments = &path.segments()[..self.stop];
        let mut cur: Cow<'a, Document> = Cow::Borrowed(root);
        let mut depth = 0;

        loop {
            if let Some(hook) = self.hook.as_mut() {
                match hook(&*cur, &segments[..depth], path) {
                    Visit::Continue => {}
                    Visit::Replace(doc) => cur = Cow::Owned(doc),
                    Visit::Stop => return Ok(cur),
                    Visit::StopWith(doc) => return Ok(Cow::Owned(doc)),
                }
            }
            if depth == segments.len() {
                return Ok(cur);
            }
            cur = descend(cur, depth, path)?;
            depth += 1;
        }
    }

    /// Resolve to a mutable node.
    ///
    /// With `create` set, missing keys are inserted and `Null` nodes on the
    /// way are turned into maps. Lists are never grown. Hook replacements
    /// are written into the document.
    pub fn resolve_mut<'a>(&mut self, root: &'a mut Document) -> Result<&'a mut Document> {
        let path = self.path;
        let segments = &path.segments()[..self.stop];
        let mut cur = root;
        let mut depth = 0;

        loop {
            if let Some(hook) = self.hook.as_mut() {
                match hook(cur, &segments[..depth], path) {
                    Visit::Continue => {}
                    Visit::Replace(doc) => *cur = doc,
                    Visit::Stop => return Ok(cur),
                    Visit::StopWith(doc) => {
                        *cur = doc;
                        return Ok(cur);
                    }
                }
            }
            if depth == segments.len() {
                return Ok(cur);
            }
            cur = descend_mut(cur, depth, path, self.create)?;
            depth += 1;
        }
    }
}

/// Resolve `path` in `doc`.
///
/// ```
/// use sundry_structured::{doc, get, path};
///
/// let d = doc!({"items": [{"id": 1}, {"id": 2}]});
/// assert_eq!(get(&d, &path!("items", -1, "id")).unwrap().as_i64(), Some(2));
/// assert!(get(&d, &path!("items", 5)).unwrap_err().is_not_exist());
/// ```
pub fn get<'a>(doc: &'a Document, path: &Path) -> Result<Cow<'a, Document>> {
    Resolver::new(path).resolve(doc)
}

/// Resolve `path` to a mutable node without creating anything.
pub fn get_mut<'a>(doc: &'a mut Document, path: &Path) -> Result<&'a mut Document> {
    Resolver::new(path).resolve_mut(doc)
}

/// Whether `path` resolves in `doc`.
pub fn exists(doc: &Document, path: &Path) -> bool {
    get(doc, path).is_ok()
}

/// Interpret `segment` as an index into a list of `len` elements.
///
/// Returns `Ok(None)` when the index is well formed but out of range.
pub(crate) fn list_index(
    segment: &str,
    len: usize,
    depth: usize,
    path: &Path,
) -> Result<Option<usize>> {
    let raw: i64 = segment.parse().map_err(|_| {
        StructuredError::invalid(
            path.prefix(depth + 1),
            path,
            format!("malformed list index {segment:?}"),
        )
    })?;

    let idx = if raw < 0 {
        (len as i64).checked_add(raw)
    } else {
        Some(raw)
    };
    Ok(idx
        .and_then(|i| usize::try_from(i).ok())
        .filter(|&i| i < len))
}

fn not_exist(depth: usize, path: &Path) -> StructuredError {
    StructuredError::not_exist(path.prefix(depth + 1), path)
}

fn not_traversable(node: &Document, depth: usize, path: &Path) -> StructuredError {
    StructuredError::invalid(
        path.prefix(depth + 1),
        path,
        format!("cannot descend into {} value", node.kind_name()),
    )
}

fn descend<'a>(cur: Cow<'a, Document>, depth: usize, path: &Path) -> Result<Cow<'a, Document>> {
    let seg = path.segments()[depth].as_str();
    match cur {
        Cow::Borrowed(node) => match node {
            Document::Map(m) => m
                .get(seg)
                .map(Cow::Borrowed)
                .ok_or_else(|| not_exist(depth, path)),
            Document::List(l) => list_index(seg, l.len(), depth, path)?
                .map(|i| Cow::Borrowed(&l[i]))
                .ok_or_else(|| not_exist(depth, path)),
            Document::Object(o) => lookup_field(o.as_ref(), seg)
                .map(Cow::Owned)
                .ok_or_else(|| not_exist(depth, path)),
            Document::Null => Err(not_exist(depth, path)),
            other => Err(not_traversable(other, depth, path)),
        },
        Cow::Owned(node) => match node {
            Document::Map(mut m) => m
                .remove(seg)
                .map(Cow::Owned)
                .ok_or_else(|| not_exist(depth, path)),
            Document::List(mut l) => list_index(seg, l.len(), depth, path)?
                .map(|i| Cow::Owned(l.swap_remove(i)))
                .ok_or_else(|| not_exist(depth, path)),
            Document::Object(o) => lookup_field(o.as_ref(), seg)
                .map(Cow::Owned)
                .ok_or_else(|| not_exist(depth, path)),
            Document::Null => Err(not_exist(depth, path)),
            other => Err(not_traversable(&other, depth, path)),
        },
    }
}

fn descend_mut<'a>(
    cur: &'a mut Document,
    depth: usize,
    path: &Path,
    create: bool,
) -> Result<&'a mut Document> {
    let seg = path.segments()[depth].as_str();

    if create && cur.is_null() {
        trace!(path = %path.prefix(depth), "vivifying map node");
        *cur = Document::map();
    }

    match cur {
        Document::Map(m) => {
            if create {
                Ok(m.entry(seg.to_string()).or_insert(Document::Null))
            } else {
                m.get_mut(seg).ok_or_else(|| not_exist(depth, path))
            }
        }
        Document::List(l) => match list_index(seg, l.len(), depth, path)? {
            Some(i) => Ok(&mut l[i]),
            None if create => Err(StructuredError::invalid(
                path.prefix(depth + 1),
                path,
                format!("list index {seg} out of range (len {})", l.len()),
            )),
            None => Err(not_exist(depth, path)),
        },
        Document::Object(_) => Err(StructuredError::invalid(
            path.prefix(depth + 1),
            path,
            "cannot mutate through an object value",
        )),
        Document::Null => Err(not_exist(depth, path)),
        other => Err(not_traversable(other, depth, path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{doc, path, ErrorKind};

    fn sample() -> Document {
        doc!({
            "a": {"b": {"c": "deep"}},
            "list": [10, 20, 30],
            "scalar": 5,
            "nothing": null
        })
    }

    #[test]
    fn test_get_nested_key() {
        let d = sample();
        let got = get(&d, &path!("a", "b", "c")).unwrap();
        assert!(matches!(got, Cow::Borrowed(_)));
        assert_eq!(got.as_str(), Some("deep"));
    }

    #[test]
    fn test_get_root() {
        let d = sample();
        assert_eq!(*get(&d, &Path::root()).unwrap(), d);
    }

    #[test]
    fn test_list_indices() {
        let d = sample();
        assert_eq!(get(&d, &path!("list", 0)).unwrap().as_i64(), Some(10));
        assert_eq!(get(&d, &path!("list", -1)).unwrap().as_i64(), Some(30));
        assert_eq!(get(&d, &path!("list", -3)).unwrap().as_i64(), Some(10));
        assert!(get(&d, &path!("list", -4)).unwrap_err().is_not_exist());
        assert!(get(&d, &path!("list", 3)).unwrap_err().is_not_exist());
    }

    #[test]
    fn test_malformed_index_is_invalid() {
        let d = sample();
        let err = get(&d, &path!("list", "x")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invalid);
        assert_eq!(err.sub_path(), Some(&path!("list", "x")));
    }

    #[test]
    fn test_missing_key_reports_sub_path() {
        let d = sample();
        let err = get(&d, &path!("a", "x", "y")).unwrap_err();
        assert!(err.is_not_exist());
        assert_eq!(err.sub_path(), Some(&path!("a", "x")));
        assert_eq!(err.path(), Some(&path!("a", "x", "y")));
    }

    #[test]
    fn test_scalar_mid_path_is_invalid() {
        let d = sample();
        assert!(get(&d, &path!("scalar", "x")).unwrap_err().is_invalid());
        assert!(get(&d, &path!("nothing", "x")).unwrap_err().is_not_exist());
    }

    #[test]
    fn test_hook_sees_every_node() {
        let d = sample();
        let mut seen = Vec::new();
        Resolver::new(&path!("a", "b", "c"))
            .with_hook(|_, so_far, full| {
                assert_eq!(full, &path!("a", "b", "c"));
                seen.push(so_far.join("/"));
                Visit::Continue
            })
            .resolve(&d)
            .unwrap();
        assert_eq!(seen, vec!["", "a", "a/b", "a/b/c"]);
    }

    #[test]
    fn test_hook_short_circuits() {
        let d = sample();
        let got = Resolver::new(&path!("a", "missing", "deeper"))
            .with_hook(|_, so_far, _| {
                if so_far.len() == 1 {
                    Visit::StopWith(doc!("synthesized"))
                } else {
                    Visit::Continue
                }
            })
            .resolve(&d)
            .unwrap();
        assert_eq!(got.into_owned(), doc!("synthesized"));
    }

    #[test]
    fn test_hook_replacement_is_descended() {
        let d = sample();
        let got = Resolver::new(&path!("scalar", "x"))
            .with_hook(|node, so_far, _| match node {
                Document::Int(i) if so_far.len() == 1 => Visit::Replace(doc!({"x": *i * 2})),
                _ => Visit::Continue,
            })
            .resolve(&d)
            .unwrap();
        assert_eq!(got.as_i64(), Some(10));
    }

    #[test]
    fn test_resolve_mut_vivifies() {
        let mut d = Document::Null;
        let node = Resolver::new(&path!("x", "y"))
            .create(true)
            .resolve_mut(&mut d)
            .unwrap();
        *node = doc!(1);
        assert_eq!(d, doc!({"x": {"y": 1}}));
    }

    #[test]
    fn test_resolve_mut_without_create_fails() {
        let mut d = sample();
        assert!(get_mut(&mut d, &path!("a", "zzz")).unwrap_err().is_not_exist());
    }

    #[test]
    fn test_resolve_mut_never_grows_lists() {
        let mut d = sample();
        let err = Resolver::new(&path!("list", 7))
            .create(true)
            .resolve_mut(&mut d)
            .unwrap_err();
        assert!(err.is_invalid());
    }

    #[test]
    fn test_resolve_mut_hook_replacement_is_persisted() {
        let mut d = sample();
        Resolver::new(&path!("scalar"))
            .with_hook(|node, so_far, _| {
                if so_far.len() == 1 && !node.is_container() {
                    Visit::StopWith(doc!("patched"))
                } else {
                    Visit::Continue
                }
            })
            .resolve_mut(&mut d)
            .unwrap();
        assert_eq!(get(&d, &path!("scalar")).unwrap().as_str(), Some("patched"));
    }
}
