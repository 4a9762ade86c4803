//! Error types for document operations.

use crate::Path;
use thiserror::Error;

/// Result type alias for document operations.
pub type Result<T> = std::result::Result<T, StructuredError>;

/// Coarse classification of a [`StructuredError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A key, index or segment is absent.
    NotExist,
    /// Malformed input or a non-traversable node in the way.
    Invalid,
}

/// Errors that can occur while resolving or mutating a document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StructuredError {
    /// The path does not exist in the document.
    #[error("path {sub_path} does not exist (resolving {path})")]
    NotExist {
        /// Prefix of `path` up to and including the missing segment.
        sub_path: Path,
        /// The full path that was requested.
        path: Path,
    },

    /// The path cannot be followed through the document.
    #[error("invalid path {sub_path} (resolving {path}): {reason}")]
    Invalid {
        /// Prefix of `path` up to and including the offending segment.
        sub_path: Path,
        /// The full path that was requested.
        path: Path,
        /// What went wrong.
        reason: String,
    },

    /// Invalid configuration value, e.g. an unknown array merge mode.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StructuredError {
    /// Create a not-exist error.
    #[inline]
    pub fn not_exist(sub_path: Path, path: &Path) -> Self {
        StructuredError::NotExist {
            sub_path,
            path: path.clone(),
        }
    }

    /// Create an invalid-path error.
    #[inline]
    pub fn invalid(sub_path: Path, path: &Path, reason: impl Into<String>) -> Self {
        StructuredError::Invalid {
            sub_path,
            path: path.clone(),
            reason: reason.into(),
        }
    }

    /// Create an invalid-configuration error.
    #[inline]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        StructuredError::InvalidConfig(message.into())
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StructuredError::NotExist { .. } => ErrorKind::NotExist,
            StructuredError::Invalid { .. } | StructuredError::InvalidConfig(_) => {
                ErrorKind::Invalid
            }
        }
    }

    pub fn is_not_exist(&self) -> bool {
        self.kind() == ErrorKind::NotExist
    }

    pub fn is_invalid(&self) -> bool {
        self.kind() == ErrorKind::Invalid
    }

    /// The prefix of the requested path at which resolution failed.
    pub fn sub_path(&self) -> Option<&Path> {
        match self {
            StructuredError::NotExist { sub_path, .. }
            | StructuredError::Invalid { sub_path, .. } => Some(sub_path),
            StructuredError::InvalidConfig(_) => None,
        }
    }

    /// The full path that was requested.
    pub fn path(&self) -> Option<&Path> {
        match self {
            StructuredError::NotExist { path, .. } | StructuredError::Invalid { path, .. } => {
                Some(path)
            }
            StructuredError::InvalidConfig(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;

    #[test]
    fn not_exist_formats_both_paths() {
        let err = StructuredError::not_exist(path!("a", "b"), &path!("a", "b", "c"));
        assert_eq!(err.to_string(), "path /a/b does not exist (resolving /a/b/c)");
        assert!(err.is_not_exist());
        assert!(!err.is_invalid());
    }

    #[test]
    fn invalid_carries_reason_and_context() {
        let err = StructuredError::invalid(path!("list", "x"), &path!("list", "x"), "bad index");
        assert_eq!(err.kind(), ErrorKind::Invalid);
        assert_eq!(err.sub_path(), Some(&path!("list", "x")));
        assert!(err.to_string().ends_with("bad index"));
    }

    #[test]
    fn invalid_config_has_no_path() {
        let err = StructuredError::invalid_config("unknown mode");
        assert!(err.is_invalid());
        assert_eq!(err.path(), None);
        assert_eq!(err.to_string(), "invalid configuration: unknown mode");
    }
}
