//! Custom assertion helpers for document tests.

use sundry_structured::Document;

/// Render a document as pretty JSON (keys sorted).
pub fn pretty(doc: &Document) -> String {
    let value = serde_json::Value::from(doc);
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| format!("{doc:?}"))
}

/// Assert that two documents are equal, with a line diff on failure.
///
/// # Example
///
/// ```rust
/// use sundry_structured::doc;
/// use sundry_test_utils::assertions::assert_doc_eq;
///
/// assert_doc_eq(&doc!({"a": [1, 2]}), &doc!({"a": [1, 2]}));
/// ```
pub fn assert_doc_eq(actual: &Document, expected: &Document) {
    if actual == expected {
        return;
    }
    let diff = diff_lines(&pretty(expected), &pretty(actual));
    panic!("Documents are not equal.\nDiff (-expected +actual):\n{diff}");
}

fn diff_lines(expected: &str, actual: &str) -> String {
    let diff = similar::TextDiff::from_lines(expected, actual);
    let mut output = String::new();

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            similar::ChangeTag::Delete => "-",
            similar::ChangeTag::Insert => "+",
            similar::ChangeTag::Equal => " ",
        };
        output.push_str(&format!("{}{}", sign, change));
    }
    output
}

/// Assert that a result is Ok and extract the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Assert that a result is Err and extract the error.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => e,
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(value) => panic!("{}: {:?}", $msg, value),
            Err(e) => e,
        }
    };
}
