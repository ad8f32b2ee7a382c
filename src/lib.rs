//! C Source Amalgamation Library
//!
//! This library merges an ordered list of C header and source fragments
//! into a single header artifact and, optionally, a single source artifact.
//!
//! # Overview
//!
//! Each fragment is either the contents of a file or a literal string given
//! on the command line. Merging:
//!
//! 1. Wraps every fragment in `// [begin] <name>` / `// [end] <name>` markers
//! 2. Comments out `#include "name"` lines whose target was itself folded in
//!    (or explicitly listed with `--additionally`)
//! 3. Leaves everything else, including `#include <...>`, untouched
//!
//! In header-only mode the source fragments are appended to the header
//! group and only one artifact is produced.
//!
//! This is not a preprocessor: macros, conditional compilation and include
//! graphs are never interpreted.
//!
//! # Usage
//!
//! ```ignore
//! use c_amalgamate::{amalgamate, MergePlan};
//!
//! let plan = MergePlan::from_tokens(&[
//!     "--headers", "include/api.h", "include/util.h",
//!     "--sources", "src/api.c",
//!     "--header-output", "dist/lib.h",
//!     "--source-output", "dist/lib.c",
//! ])?;
//! let summary = amalgamate(&plan)?;
//! ```

pub mod amalgamate;
pub mod error;
pub mod fragment;
pub mod markers;
pub mod merge;
pub mod output;
pub mod plan;

// Re-export main types for convenience
pub use crate::amalgamate::{amalgamate, ArtifactKind, RunSummary, WrittenArtifact};
pub use crate::error::AmalgamateError;
pub use crate::fragment::{load_token, Fragment, RemovalSet};
pub use crate::merge::{merge, merge_with_flags, MergeStats, MergedBuffer};
pub use crate::output::write_output;
pub use crate::plan::{parse_tokens, Flag, MergePlan, ParsedTokens, USAGE};
