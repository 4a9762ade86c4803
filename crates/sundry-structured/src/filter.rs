//! Glob-style select/remove filtering.
//!
//! Select and remove paths are compiled into a prefix tree whose nodes say
//! whether the subtree at that position is kept ([`FilterKind::Select`]),
//! dropped ([`FilterKind::Remove`]) or still undecided ([`FilterKind::Void`]).
//! A `*` segment matches any map key or list index.
//!
//! Tree construction:
//! - missing ancestors of a select path are `Void`, those of a remove path
//!   are `Select`, so a removal never hides the rest of its branch;
//! - a wildcard is also applied to the literal siblings that already exist,
//!   but only upgrades them from `Void` to `Select`, never overrides them;
//! - a literal created next to an existing wildcard starts as a copy of it.
//!
//! Rules applied during the walk:
//! - a `Remove` node drops its whole subtree, whatever lies below it;
//! - below a `Select` node everything is kept unless removed deeper down;
//! - under a `Void` node only children matched by the tree are kept;
//! - a map or list whose children were all filtered away is dropped too.

use crate::document::{Document, Map};
use crate::object::object_to_map;
use crate::path::{Path, WILDCARD};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Decision attached to a filter tree node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// No decision yet; look further down.
    #[default]
    Void,
    Select,
    Remove,
}

#[derive(Debug, Clone, Default)]
struct FilterNode {
    kind: FilterKind,
    children: BTreeMap<String, FilterNode>,
}

impl FilterNode {
    /// Insert the rest of a path below this node.
    ///
    /// `weak` is set while a wildcard is copied into pre-existing literal
    /// siblings: existing nodes then keep their kind unless a select
    /// upgrades a `Void`.
    fn insert(&mut self, segments: &[String], kind: FilterKind, weak: bool) {
        if self.kind == FilterKind::Remove {
            // an ancestor already drops everything below
            return;
        }
        let Some((seg, rest)) = segments.split_first() else {
            self.decide(kind, weak);
            return;
        };

        if seg == WILDCARD {
            for (key, sibling) in self.children.iter_mut() {
                if key != WILDCARD {
                    sibling.insert(rest, kind, true);
                }
            }
        }

        let weak = if self.children.contains_key(seg) {
            weak
        } else {
            let seed = if seg == WILDCARD {
                None
            } else {
                self.children.get(WILDCARD).cloned()
            };
            self.children
                .insert(seg.clone(), FilterNode::spawn(seed, rest.is_empty(), kind));
            false
        };
        if let Some(child) = self.children.get_mut(seg) {
            child.insert(rest, kind, weak);
        }
    }

    /// A node created while inserting a path of `kind`.
    fn spawn(seed: Option<FilterNode>, terminal: bool, kind: FilterKind) -> Self {
        let mut node = seed.unwrap_or_default();
        if !terminal && kind == FilterKind::Remove && node.kind == FilterKind::Void {
            node.kind = FilterKind::Select;
        }
        node
    }

    fn decide(&mut self, kind: FilterKind, weak: bool) {
        match kind {
            FilterKind::Remove if !weak => {
                self.kind = FilterKind::Remove;
                self.children.clear();
            }
            FilterKind::Select if self.kind == FilterKind::Void => {
                self.kind = FilterKind::Select;
            }
            _ => {}
        }
    }

    /// Child governing `key`: the literal one if present, else the wildcard.
    fn child(&self, key: &str) -> Option<&FilterNode> {
        self.children
            .get(key)
            .or_else(|| self.children.get(WILDCARD))
    }
}

/// Compiled select/remove paths.
///
/// # Example
///
/// ```
/// use sundry_structured::{doc, FilterTree, Path};
///
/// let tree = FilterTree::build(&[Path::parse("/a")], &[Path::parse("/a/secret")]);
/// let out = tree.apply(doc!({"a": {"x": 1, "secret": 2}, "b": 3}));
/// assert_eq!(out, Some(doc!({"a": {"x": 1}})));
/// ```
#[derive(Debug, Clone)]
pub struct FilterTree {
    root: FilterNode,
}

impl FilterTree {
    /// Compile the tree.
    ///
    /// With no select paths everything is selected, so remove paths alone
    /// carve exclusions out of the full document. An empty path addresses
    /// the root; removing the root removes everything.
    pub fn build(select: &[Path], remove: &[Path]) -> Self {
        let mut root = FilterNode::default();
        if select.is_empty() {
            root.kind = FilterKind::Select;
        }
        for path in select {
            root.insert(path.segments(), FilterKind::Select, false);
        }
        for path in remove {
            root.insert(path.segments(), FilterKind::Remove, false);
        }

        debug!(
            select = select.len(),
            remove = remove.len(),
            root = ?root.kind,
            "built filter tree"
        );
        Self { root }
    }

    /// Kind of the node stored for `path`, matching segments literally
    /// (a `*` in `path` only finds the wildcard node).
    pub fn kind_at(&self, path: &Path) -> Option<FilterKind> {
        let mut node = &self.root;
        for seg in path.iter() {
            node = node.children.get(seg)?;
        }
        Some(node.kind)
    }

    /// Filter `doc`, returning `None` when nothing is left.
    ///
    /// Subtrees that need no filtering are moved into the result as is.
    pub fn apply(&self, doc: Document) -> Option<Document> {
        walk(doc, &self.root, false)
    }
}

/// Build a [`FilterTree`] and apply it to `doc`.
pub fn filter_glob(doc: Document, select: &[Path], remove: &[Path]) -> Option<Document> {
    FilterTree::build(select, remove).apply(doc)
}

fn walk(doc: Document, node: &FilterNode, inherited: bool) -> Option<Document> {
    if node.kind == FilterKind::Remove {
        return None;
    }

    let select_all = inherited || node.kind == FilterKind::Select;
    if node.children.is_empty() {
        return select_all.then_some(doc);
    }

    match doc {
        Document::Map(map) => {
            let mut out = Map::new();
            for (key, value) in map {
                match descend(value, node.child(&key), select_all) {
                    Some(kept) => {
                        out.insert(key, kept);
                    }
                    None => trace!(key = %key, "filtered out"),
                }
            }
            (!out.is_empty()).then_some(Document::Map(out))
        }
        Document::List(list) => {
            let mut out = Vec::with_capacity(list.len());
            for (idx, value) in list.into_iter().enumerate() {
                if let Some(kept) = descend(value, node.child(&idx.to_string()), select_all) {
                    out.push(kept);
                }
            }
            (!out.is_empty()).then_some(Document::List(out))
        }
        Document::Object(obj) => walk(Document::Map(object_to_map(obj.as_ref())), node, inherited),
        scalar => select_all.then_some(scalar),
    }
}

fn descend(doc: Document, node: Option<&FilterNode>, select_all: bool) -> Option<Document> {
    match node {
        Some(node) => walk(doc, node, select_all),
        None => select_all.then_some(doc),
    }
}
