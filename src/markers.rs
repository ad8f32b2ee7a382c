//! Marker vocabulary for merged output
//!
//! Defines the comment lines that record where each fragment starts and
//! ends, and how elided include directives are preserved.

/// Display name for fragments given inline on the command line
pub const INLINE_FRAGMENT_NAME: &str = "<inline>";

/// Prefix of a local (double-quoted) include directive
pub const LOCAL_INCLUDE_PREFIX: &str = "#include \"";

/// Comment prefix of a provenance start marker
pub const BEGIN_MARKER: &str = "// [begin] ";

/// Comment prefix of a provenance end marker
pub const END_MARKER: &str = "// [end] ";

/// Comment prefix that replaces an elided include
pub const ELIDED_MARKER: &str = "// [elided] ";

pub fn begin_marker(name: &str) -> String {
    format!("{}{}", BEGIN_MARKER, name)
}

pub fn end_marker(name: &str) -> String {
    format!("{}{}", END_MARKER, name)
}

/// Comment out an elided line, keeping its original bytes
pub fn elided_marker(line: &[u8]) -> Vec<u8> {
    let mut marked = ELIDED_MARKER.as_bytes().to_vec();
    marked.extend_from_slice(line);
    marked
}

/// Extract the quoted name from a trimmed local include line
///
/// `#include "foo.h"` -> `Some("foo.h")`. Angle-bracket includes, lines
/// with trailing text after the closing quote and names that are not UTF-8
/// do not match.
pub fn local_include_name(trimmed: &[u8]) -> Option<&str> {
    let rest = trimmed.strip_prefix(LOCAL_INCLUDE_PREFIX.as_bytes())?;
    let name = rest.strip_suffix(b"\"")?;
    if name.is_empty() {
        None
    } else {
        std::str::from_utf8(name).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_include_name() {
        assert_eq!(local_include_name(b"#include \"foo.h\""), Some("foo.h"));
        assert_eq!(
            local_include_name(b"#include \"sub/bar.h\""),
            Some("sub/bar.h")
        );
        assert_eq!(local_include_name(b"#include <stdio.h>"), None);
        assert_eq!(local_include_name(b"#include \"foo.h\" // why"), None);
        assert_eq!(local_include_name(b"#include \"\""), None);
        assert_eq!(local_include_name(b"#include \""), None);
        assert_eq!(local_include_name(b"# include \"foo.h\""), None);
        assert_eq!(local_include_name(b"#include \"\xA9.h\""), None);
    }

    #[test]
    fn test_markers() {
        assert_eq!(begin_marker("a.h"), "// [begin] a.h");
        assert_eq!(end_marker("a.h"), "// [end] a.h");
        assert_eq!(
            elided_marker(b"#include \"b.h\""),
            b"// [elided] #include \"b.h\"".to_vec()
        );
    }
}
