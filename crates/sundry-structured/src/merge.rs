//! Deep merge of documents.
//!
//! Maps are merged key by key, lists according to [`ArrayMergeMode`], and
//! anything else is replaced by the source. A `Null` inside a source map
//! deletes the key from the target.

use crate::document::Document;
use crate::error::{Result, StructuredError};
use crate::resolve::Resolver;
use crate::Path;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use sundry_util::collections::{dedup_stable, push_unique};
use tracing::debug;

/// How two lists are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayMergeMode {
    /// Concatenate, keeping duplicates.
    #[default]
    Append,
    /// Append only the source elements not already present.
    Squash,
    /// Like `Squash`, and also drop duplicates already in the target.
    Dedupe,
    /// The source list replaces the target list.
    Replace,
}

impl ArrayMergeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrayMergeMode::Append => "append",
            ArrayMergeMode::Squash => "squash",
            ArrayMergeMode::Dedupe => "dedupe",
            ArrayMergeMode::Replace => "replace",
        }
    }
}

impl fmt::Display for ArrayMergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArrayMergeMode {
    type Err = StructuredError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "append" => Ok(ArrayMergeMode::Append),
            "squash" => Ok(ArrayMergeMode::Squash),
            "dedupe" => Ok(ArrayMergeMode::Dedupe),
            "replace" => Ok(ArrayMergeMode::Replace),
            other => Err(StructuredError::invalid_config(format!(
                "unknown array merge mode {other:?}"
            ))),
        }
    }
}

/// Merge configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    pub array_mode: ArrayMergeMode,
}

impl MergeOptions {
    pub fn with_array_mode(array_mode: ArrayMergeMode) -> Self {
        Self { array_mode }
    }
}

/// Fold several sources into one; later sources win on conflicts.
///
/// `Null` sources are skipped. `Null` values inside maps are kept so they
/// still delete keys when the result is merged into a target.
pub fn fold_sources<I>(sources: I, opts: &MergeOptions) -> Document
where
    I: IntoIterator<Item = Document>,
{
    let mut acc = Document::Null;
    for source in sources {
        if source.is_null() {
            continue;
        }
        merge_value(&mut acc, source, opts.array_mode, true);
    }
    acc
}

/// Merge `sources` into the node at `path`, in place.
///
/// Missing maps on the way to `path` are created. With no non-null
/// sources the target is left untouched.
///
/// ```
/// use sundry_structured::{doc, merge, path, ArrayMergeMode, MergeOptions};
///
/// let mut target = doc!({"spec": {"ports": [80], "name": "web"}});
/// merge(
///     &mut target,
///     &path!("spec"),
///     [doc!({"ports": [443], "name": null})],
///     &MergeOptions::with_array_mode(ArrayMergeMode::Append),
/// )
/// .unwrap();
/// assert_eq!(target, doc!({"spec": {"ports": [80, 443]}}));
/// ```
pub fn merge<I>(target: &mut Document, path: &Path, sources: I, opts: &MergeOptions) -> Result<()>
where
    I: IntoIterator<Item = Document>,
{
    let source = fold_sources(sources, opts);
    if source.is_null() {
        return Ok(());
    }

    debug!(path = %path, array_mode = %opts.array_mode, "merging into document");
    let node = Resolver::new(path).create(true).resolve_mut(target)?;
    merge_value(node, source, opts.array_mode, false);
    Ok(())
}

/// Copy-on-write variant of [`merge`]: neither `target` nor `sources` are
/// modified and the merged document is returned.
pub fn merge_copy(
    target: &Document,
    path: &Path,
    sources: &[Document],
    opts: &MergeOptions,
) -> Result<Document> {
    let mut out = target.clone();
    merge(&mut out, path, sources.iter().cloned(), opts)?;
    Ok(out)
}

/// Recursive merge step.
///
/// `retain_nil` keeps `Null` map values instead of deleting the key; it is
/// set while folding sources together.
fn merge_value(target: &mut Document, source: Document, mode: ArrayMergeMode, retain_nil: bool) {
    match (target, source) {
        (Document::Map(t), Document::Map(s)) => {
            for (key, value) in s {
                if value.is_null() && !retain_nil {
                    t.remove(&key);
                    continue;
                }
                let slot = t.entry(key).or_insert(Document::Null);
                merge_value(slot, value, mode, retain_nil);
            }
        }
        (Document::List(t), Document::List(s)) => merge_lists(t, s, mode),
        (t, Document::Map(s)) => {
            // null or mismatched target: rebuild as a map so nested nulls apply
            *t = Document::map();
            merge_value(t, Document::Map(s), mode, retain_nil);
        }
        (t, s) => *t = s,
    }
}

fn merge_lists(target: &mut Vec<Document>, source: Vec<Document>, mode: ArrayMergeMode) {
    match mode {
        ArrayMergeMode::Append => target.extend(source),
        ArrayMergeMode::Squash => {
            for item in source {
                push_unique(target, item);
            }
        }
        ArrayMergeMode::Dedupe => {
            let mut combined = dedup_stable(std::mem::take(target));
            for item in source {
                push_unique(&mut combined, item);
            }
            *target = combined;
        }
        ArrayMergeMode::Replace => *target = source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{doc, path};

    fn merged(target: Document, source: Document, mode: ArrayMergeMode) -> Document {
        merge_copy(
            &target,
            &Path::root(),
            &[source],
            &MergeOptions::with_array_mode(mode),
        )
        .unwrap()
    }

    #[test]
    fn test_array_modes() {
        let t = doc!(["a", "b"]);
        let s = doc!(["b", "c"]);
        assert_eq!(
            merged(t.clone(), s.clone(), ArrayMergeMode::Append),
            doc!(["a", "b", "b", "c"])
        );
        assert_eq!(
            merged(t.clone(), s.clone(), ArrayMergeMode::Squash),
            doc!(["a", "b", "c"])
        );
        assert_eq!(
            merged(t.clone(), s.clone(), ArrayMergeMode::Dedupe),
            doc!(["a", "b", "c"])
        );
        assert_eq!(merged(t, s, ArrayMergeMode::Replace), doc!(["b", "c"]));
    }

    #[test]
    fn test_squash_keeps_existing_duplicates_dedupe_drops_them() {
        let t = doc!(["a", "a", "b"]);
        let s = doc!(["b", "c", "c"]);
        assert_eq!(
            merged(t.clone(), s.clone(), ArrayMergeMode::Squash),
            doc!(["a", "a", "b", "c"])
        );
        assert_eq!(
            merged(t, s, ArrayMergeMode::Dedupe),
            doc!(["a", "b", "c"])
        );
    }

    #[test]
    fn test_maps_union_recursively() {
        let t = doc!({"a": {"x": 1, "y": 2}, "keep": true});
        let s = doc!({"a": {"y": 3, "z": 4}, "new": "n"});
        assert_eq!(
            merged(t, s, ArrayMergeMode::Append),
            doc!({"a": {"x": 1, "y": 3, "z": 4}, "keep": true, "new": "n"})
        );
    }

    #[test]
    fn test_null_in_source_deletes_key() {
        let t = doc!({"a": 1, "b": 2});
        let s = doc!({"a": null});
        assert_eq!(merged(t, s, ArrayMergeMode::Append), doc!({"b": 2}));
    }

    #[test]
    fn test_type_mismatch_source_wins() {
        let t = doc!({"a": [1, 2], "b": {"c": 1}});
        let s = doc!({"a": "scalar", "b": [1]});
        assert_eq!(
            merged(t, s, ArrayMergeMode::Append),
            doc!({"a": "scalar", "b": [1]})
        );
    }

    #[test]
    fn test_map_replacing_scalar_drops_nested_nulls() {
        let t = doc!({"a": "s", "b": [1]});
        let s = doc!({"a": {"x": null, "y": 1}, "b": {"z": null}});
        assert_eq!(
            merged(t, s, ArrayMergeMode::Append),
            doc!({"a": {"y": 1}, "b": {}})
        );
    }

    #[test]
    fn test_fold_keeps_nested_nulls_when_replacing() {
        let folded = fold_sources(
            [doc!({"a": "s"}), doc!({"a": {"x": null}})],
            &MergeOptions::default(),
        );
        assert_eq!(folded, doc!({"a": {"x": null}}));
    }

    #[test]
    fn test_fold_later_sources_win() {
        let folded = fold_sources(
            [doc!({"a": 1, "l": [1]}), Document::Null, doc!({"a": 2, "l": [2], "gone": null})],
            &MergeOptions::default(),
        );
        assert_eq!(folded, doc!({"a": 2, "l": [1, 2], "gone": null}));
    }

    #[test]
    fn test_null_survives_folding_and_deletes() {
        let mut t = doc!({"gone": "x", "kept": "y"});
        merge(
            &mut t,
            &Path::root(),
            [doc!({"other": 1}), doc!({"gone": null})],
            &MergeOptions::default(),
        )
        .unwrap();
        assert_eq!(t, doc!({"kept": "y", "other": 1}));
    }

    #[test]
    fn test_merge_at_path_vivifies() {
        let mut t = Document::Null;
        merge(
            &mut t,
            &path!("a", "b"),
            [doc!({"c": 1, "d": null})],
            &MergeOptions::default(),
        )
        .unwrap();
        assert_eq!(t, doc!({"a": {"b": {"c": 1}}}));
    }

    #[test]
    fn test_merge_copy_leaves_inputs_untouched() {
        let t = doc!({"a": [1]});
        let sources = vec![doc!({"a": [2]})];
        let out = merge_copy(&t, &Path::root(), &sources, &MergeOptions::default()).unwrap();
        assert_eq!(out, doc!({"a": [1, 2]}));
        assert_eq!(t, doc!({"a": [1]}));
        assert_eq!(sources, vec![doc!({"a": [2]})]);
    }

    #[test]
    fn test_no_sources_is_noop() {
        let mut t = doc!({"a": 1});
        merge(&mut t, &path!("x", "y"), Vec::new(), &MergeOptions::default()).unwrap();
        assert_eq!(t, doc!({"a": 1}));
    }

    #[test]
    fn test_merge_through_scalar_fails() {
        let mut t = doc!({"a": 1});
        let err = merge(
            &mut t,
            &path!("a", "b"),
            [doc!({"c": 1})],
            &MergeOptions::default(),
        )
        .unwrap_err();
        assert!(err.is_invalid());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Dedupe".parse::<ArrayMergeMode>().unwrap(), ArrayMergeMode::Dedupe);
        assert!("merge".parse::<ArrayMergeMode>().unwrap_err().is_invalid());
        let opts: MergeOptions = serde_json::from_str(r#"{"array_mode": "replace"}"#).unwrap();
        assert_eq!(opts.array_mode, ArrayMergeMode::Replace);
        let opts: MergeOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts.array_mode, ArrayMergeMode::Append);
    }
}
