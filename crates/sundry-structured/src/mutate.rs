//! Replacing and removing subtrees.

use crate::document::Document;
use crate::error::{Result, StructuredError};
use crate::resolve::{list_index, Resolver};
use crate::Path;
use tracing::trace;

/// Set the node at `path` to `data`, creating missing maps on the way.
///
/// A `Null` value removes the node instead: the key is dropped from its
/// parent map, or the element is removed from its parent list and later
/// elements shift down. Writing to (or removing) a list index that is out
/// of range is `Invalid`.
///
/// ```
/// use sundry_structured::{doc, path, set, Document};
///
/// let mut d = Document::Null;
/// set(&mut d, &path!("one", "two"), doc!({"a": "va"})).unwrap();
/// assert_eq!(d, doc!({"one": {"two": {"a": "va"}}}));
///
/// set(&mut d, &path!("one", "two"), Document::Null).unwrap();
/// assert_eq!(d, doc!({"one": {}}));
/// ```
pub fn set(target: &mut Document, path: &Path, data: Document) -> Result<()> {
    set_inner(target, path, data, false)
}

/// Like [`set`], but an explicit `Null` is stored rather than treated as a
/// removal.
pub fn set_even_if_nil(target: &mut Document, path: &Path, data: Document) -> Result<()> {
    set_inner(target, path, data, true)
}

fn set_inner(target: &mut Document, path: &Path, data: Document, keep_nil: bool) -> Result<()> {
    let Some(key) = path.last() else {
        *target = data;
        return Ok(());
    };
    let depth = path.len() - 1;
    let remove = data.is_null() && !keep_nil;

    let parent = Resolver::new(path)
        .create(true)
        .up_to(depth)
        .resolve_mut(target)?;
    if parent.is_null() {
        *parent = Document::map();
    }

    match parent {
        Document::Map(m) => {
            if remove {
                m.remove(key);
            } else {
                m.insert(key.to_string(), data);
            }
            Ok(())
        }
        Document::List(l) => match list_index(key, l.len(), depth, path)? {
            Some(i) => {
                if remove {
                    l.remove(i);
                } else {
                    l[i] = data;
                }
                Ok(())
            }
            None => Err(StructuredError::invalid(
                path.clone(),
                path,
                format!("list index {key} out of range (len {})", l.len()),
            )),
        },
        other => Err(StructuredError::invalid(
            path.clone(),
            path,
            format!("cannot set a child of {} value", other.kind_name()),
        )),
    }
}

/// Remove the node at `path`.
///
/// Returns whether anything was removed. A path that does not exist is a
/// no-op and nothing is created along the way; a malformed index or a
/// scalar in the middle of the path is still reported as `Invalid`.
///
/// ```
/// use sundry_structured::{delete, doc, path};
///
/// let mut d = doc!({"a": "va", "b": "vb"});
/// assert!(delete(&mut d, &path!("b")).unwrap());
/// assert!(!delete(&mut d, &path!("b")).unwrap());
/// assert_eq!(d, doc!({"a": "va"}));
/// ```
pub fn delete(target: &mut Document, path: &Path) -> Result<bool> {
    let Some(key) = path.last() else {
        let had = !target.is_null();
        *target = Document::Null;
        return Ok(had);
    };
    let depth = path.len() - 1;

    let parent = match Resolver::new(path).up_to(depth).resolve_mut(target) {
        Ok(parent) => parent,
        Err(err) if err.is_not_exist() => return Ok(false),
        Err(err) => return Err(err),
    };

    let removed = match parent {
        Document::Map(m) => m.remove(key).is_some(),
        Document::List(l) => match list_index(key, l.len(), depth, path)? {
            Some(i) => {
                l.remove(i);
                true
            }
            None => false,
        },
        Document::Null => false,
        other => {
            return Err(StructuredError::invalid(
                path.clone(),
                path,
                format!("cannot delete a child of {} value", other.kind_name()),
            ))
        }
    };

    trace!(path = %path, removed, "delete");
    Ok(removed)
}
