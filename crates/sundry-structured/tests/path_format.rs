//! Textual path format: parsing, formatting and escaping.

use sundry_structured::{get, path, Path, PathFormat};
use sundry_test_utils::assert_ok;

#[test]
fn parse_format_parse_is_stable() {
    let inputs = [
        "/a/b/c",
        "/metadata/annotations/example.com~1owner",
        "/weird~0key/~0~1/0",
        "/list/-1",
        "/",
    ];
    for input in inputs {
        let p = Path::parse(input);
        let formatted = p.to_string();
        assert_eq!(formatted, input);
        assert_eq!(Path::parse(&formatted), p);
    }
}

#[test]
fn escaped_segment_addresses_key_with_slash() {
    let d = sundry_test_utils::fixtures::deployment();
    let owner = Path::parse("/metadata/annotations/example.com~1owner");
    assert_eq!(owner.last(), Some("example.com/owner"));
    assert_eq!(assert_ok!(get(&d, &owner)).as_str(), Some("team-a"));
}

#[test]
fn custom_separator_round_trip() {
    let dotted = PathFormat::with_separator('.');
    let p = path!("spec", "a.b", "c/d", "~");
    let text = dotted.format(&p);
    assert_eq!(text, ".spec.a~1b.c/d.~0");
    assert_eq!(dotted.parse(&text), p);
    assert_eq!(dotted.parse("spec.a~1b.c/d.~0"), p);
}

#[test]
fn format_config_deserializes() {
    let format: PathFormat = serde_json::from_str(r#"{"separator": ":"}"#).unwrap();
    assert_eq!(format.parse("a:b"), path!("a", "b"));
    let default: PathFormat = serde_json::from_str("{}").unwrap();
    assert_eq!(default, PathFormat::default());
}
