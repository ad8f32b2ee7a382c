//! Run a merge plan to completion
//!
//! Merges the header group (with folded sources in header-only mode) and
//! the source group, then writes each non-empty artifact to its
//! destination. The two writes are independent: a failure on the second
//! leaves the first in place.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::error::AmalgamateError;
use crate::fragment::Fragment;
use crate::merge::{merge, MergeStats, MergedBuffer};
use crate::output::write_output;
use crate::plan::MergePlan;

/// Which artifact a write produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Header,
    Source,
}

/// One artifact that was written
#[derive(Debug, Clone)]
pub struct WrittenArtifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub bytes: usize,
    pub stats: MergeStats,
}

/// Result of running a plan
#[derive(Debug, Default)]
pub struct RunSummary {
    pub artifacts: Vec<WrittenArtifact>,
}

impl RunSummary {
    pub fn artifact(&self, kind: ArtifactKind) -> Option<&WrittenArtifact> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }
}

/// Merge and write every artifact the plan asks for
pub fn amalgamate(plan: &MergePlan) -> Result<RunSummary, AmalgamateError> {
    let mut summary = RunSummary::default();

    let headers = plan.header_fragments();
    if let Some(path) = destination(&headers, plan.header_output.as_deref()) {
        let artifact = emit(ArtifactKind::Header, &headers, plan, path)?;
        summary.artifacts.push(artifact);
    }

    if plan.writes_sources() {
        if let Some(path) = destination(&plan.sources, plan.source_output.as_deref()) {
            let artifact = emit(ArtifactKind::Source, &plan.sources, plan, path)?;
            summary.artifacts.push(artifact);
        }
    }

    Ok(summary)
}

fn destination<'a>(fragments: &[Fragment], path: Option<&'a Path>) -> Option<&'a Path> {
    if fragments.is_empty() {
        None
    } else {
        path
    }
}

#[instrument(skip_all, fields(kind = ?kind, path = %path.display()))]
fn emit(
    kind: ArtifactKind,
    fragments: &[Fragment],
    plan: &MergePlan,
    path: &Path,
) -> Result<WrittenArtifact, AmalgamateError> {
    let MergedBuffer { text, stats } = merge(fragments, &plan.removal);
    write_output(path, &text)?;

    debug!(
        fragments = stats.fragments,
        lines_copied = stats.lines_copied,
        includes_elided = stats.includes_elided,
        "Merged artifact"
    );

    Ok(WrittenArtifact {
        kind,
        path: path.to_path_buf(),
        bytes: text.len(),
        stats,
    })
}
