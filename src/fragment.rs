//! Fragment loading
//!
//! Turns positional command-line tokens into fragments: either inline
//! literals (`"int x;"`) or the contents of a file on disk.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::AmalgamateError;
use crate::markers::INLINE_FRAGMENT_NAME;

/// Set of local include names eligible for elision
pub type RemovalSet = BTreeSet<String>;

/// One unit of input text contributed to a merge
///
/// Content is kept as raw bytes: C sources in legacy encodings pass
/// through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Name used in provenance markers
    pub name: String,
    /// Raw bytes as loaded
    pub content: Vec<u8>,
    /// Whether local includes inside this fragment may be elided
    pub strips_includes: bool,
}

impl Fragment {
    /// Create a file-backed fragment named after the path's base name
    pub fn from_file(path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Self {
        Fragment {
            name: base_name(path.as_ref()),
            content: content.into(),
            strips_includes: true,
        }
    }

    /// Create an inline literal fragment
    pub fn inline(content: impl Into<Vec<u8>>) -> Self {
        Fragment {
            name: INLINE_FRAGMENT_NAME.to_string(),
            content: content.into(),
            strips_includes: false,
        }
    }

    /// True when the fragment has nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.content.trim_ascii().is_empty()
    }
}

/// A positional token, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Interior of a `"..."` token
    Literal(&'a str),
    Path(&'a str),
}

impl<'a> Token<'a> {
    pub fn classify(raw: &'a str) -> Self {
        match inline_literal(raw) {
            Some(inner) => Token::Literal(inner),
            None => Token::Path(raw),
        }
    }
}

/// Interior text of a token wrapped in a matching pair of double quotes
fn inline_literal(raw: &str) -> Option<&str> {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        Some(&raw[1..raw.len() - 1])
    } else {
        None
    }
}

/// Base name of a path, falling back to the whole path when it has none
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
        .unwrap_or_else(|| path.display().to_string())
}

/// Load a positional token into a fragment
///
/// File-backed tokens add their base name to `removal` even when the file
/// turns out to be blank. Blank fragments are dropped (`Ok(None)`).
pub fn load_token(
    raw: &str,
    removal: &mut RemovalSet,
) -> Result<Option<Fragment>, AmalgamateError> {
    let fragment = match Token::classify(raw) {
        Token::Literal(text) => Fragment::inline(text),
        Token::Path(path) => {
            let path = PathBuf::from(path);
            let content = fs::read(&path).map_err(|source| AmalgamateError::Read {
                path: path.clone(),
                source,
            })?;
            let fragment = Fragment::from_file(path, content);
            removal.insert(fragment.name.clone());
            fragment
        }
    };

    if fragment.is_blank() {
        debug!(name = %fragment.name, "Dropping blank fragment");
        return Ok(None);
    }

    debug!(
        name = %fragment.name,
        bytes = fragment.content.len(),
        strips_includes = fragment.strips_includes,
        "Loaded fragment"
    );
    Ok(Some(fragment))
}
