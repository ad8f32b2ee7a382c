//! Fragment merge logic
//!
//! Concatenates an ordered fragment list into one buffer, wrapping each
//! fragment in provenance markers and commenting out local includes whose
//! target has been folded into the same artifact.

use crate::error::AmalgamateError;
use crate::fragment::{Fragment, RemovalSet};
use crate::markers::{begin_marker, elided_marker, end_marker, local_include_name};

/// Counters collected while merging
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeStats {
    /// Number of fragments that made it into the buffer
    pub fragments: usize,
    /// Number of content lines copied verbatim
    pub lines_copied: usize,
    /// Number of include directives replaced by an elision marker
    pub includes_elided: usize,
}

/// Output of one merge run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedBuffer {
    /// Merged bytes, outer whitespace trimmed
    pub text: Vec<u8>,
    pub stats: MergeStats,
}

/// Merge fragments in order using each fragment's own include flag
///
/// Pure: the same fragments and removal set always give byte-identical
/// output. Blank fragments contribute nothing, not even markers.
pub fn merge(fragments: &[Fragment], removal: &RemovalSet) -> MergedBuffer {
    let mut out = Vec::new();
    let mut stats = MergeStats::default();

    for fragment in fragments {
        append_fragment(
            &mut out,
            &mut stats,
            &fragment.name,
            &fragment.content,
            fragment.strips_includes,
            removal,
        );
    }

    MergedBuffer {
        text: out.trim_ascii().to_vec(),
        stats,
    }
}

/// Merge fragments with an explicit, index-aligned include flag sequence
///
/// `flags[i]` replaces `fragments[i].strips_includes`.
pub fn merge_with_flags(
    fragments: &[Fragment],
    flags: &[bool],
    removal: &RemovalSet,
) -> Result<MergedBuffer, AmalgamateError> {
    if fragments.len() != flags.len() {
        return Err(AmalgamateError::FlagMismatch {
            fragments: fragments.len(),
            flags: flags.len(),
        });
    }

    let mut out = Vec::new();
    let mut stats = MergeStats::default();

    for (fragment, strips) in fragments.iter().zip(flags) {
        append_fragment(
            &mut out,
            &mut stats,
            &fragment.name,
            &fragment.content,
            *strips,
            removal,
        );
    }

    Ok(MergedBuffer {
        text: out.trim_ascii().to_vec(),
        stats,
    })
}

fn append_fragment(
    out: &mut Vec<u8>,
    stats: &mut MergeStats,
    name: &str,
    content: &[u8],
    strips_includes: bool,
    removal: &RemovalSet,
) {
    let content = content.trim_ascii();
    if content.is_empty() {
        return;
    }

    out.extend_from_slice(begin_marker(name).as_bytes());
    out.push(b'\n');

    for line in content.split(|b| *b == b'\n') {
        if strips_includes && is_elided(line, removal) {
            out.extend_from_slice(&elided_marker(line));
            stats.includes_elided += 1;
        } else {
            out.extend_from_slice(line);
            stats.lines_copied += 1;
        }
        out.push(b'\n');
    }

    out.extend_from_slice(end_marker(name).as_bytes());
    out.extend_from_slice(b"\n\n");
    stats.fragments += 1;
}

/// Check whether a line is a local include of a name in the removal set
fn is_elided(line: &[u8], removal: &RemovalSet) -> bool {
    local_include_name(line.trim_ascii())
        .map(|name| removal.contains(name))
        .unwrap_or(false)
}
