//! Merge plan construction
//!
//! Interprets the merge token stream (`--headers a.h b.h --sources a.c
//! --header-output out.h ...`), loads the fragments it names and validates
//! that every non-empty group has somewhere to go.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::AmalgamateError;
use crate::fragment::{load_token, Fragment, RemovalSet};

/// Usage text printed alongside usage errors
pub const USAGE: &str = "\
Usage: c-amalgamate [-v]... [--log-format <text|json>] <TOKENS>...

Tokens:
  --headers, -h              Following files/literals form the header group (default)
  --sources, -s              Following files/literals form the source group
  --additionally, -A         Following names are also elided when included
  --header-output, -hO <PATH>
                             Destination of the merged header
  --source-output, -sO <PATH>
                             Destination of the merged source
  --header-only, -H          Fold sources into the header; no source is written

A token wrapped in double quotes (\"int x;\") is inline text; any other
token is a file path.";

/// Recognised flag tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Headers,
    Sources,
    Additionally,
    HeaderOutput,
    SourceOutput,
    HeaderOnly,
}

impl Flag {
    /// Match a token against the long and short spellings
    pub fn parse(token: &str) -> Option<Flag> {
        match token {
            "--headers" | "-h" => Some(Flag::Headers),
            "--sources" | "-s" => Some(Flag::Sources),
            "--additionally" | "-A" => Some(Flag::Additionally),
            "--header-output" | "-hO" => Some(Flag::HeaderOutput),
            "--source-output" | "-sO" => Some(Flag::SourceOutput),
            "--header-only" | "-H" => Some(Flag::HeaderOnly),
            _ => None,
        }
    }

    pub fn long(self) -> &'static str {
        match self {
            Flag::Headers => "--headers",
            Flag::Sources => "--sources",
            Flag::Additionally => "--additionally",
            Flag::HeaderOutput => "--header-output",
            Flag::SourceOutput => "--source-output",
            Flag::HeaderOnly => "--header-only",
        }
    }
}

/// Which group positional tokens currently feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Headers,
    Sources,
    Additionally,
}

/// Token stream sorted into groups, nothing loaded yet
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedTokens {
    pub headers: Vec<String>,
    pub sources: Vec<String>,
    pub additionally: Vec<String>,
    pub header_output: Option<PathBuf>,
    pub source_output: Option<PathBuf>,
    pub header_only: bool,
}

/// Sort the raw token stream into groups
///
/// Only detects usage errors; no files are touched.
pub fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<ParsedTokens, AmalgamateError> {
    if tokens.is_empty() {
        return Err(AmalgamateError::NoArguments);
    }

    let mut parsed = ParsedTokens::default();
    let mut mode = Mode::Headers;
    let mut iter = tokens.iter().map(|t| t.as_ref());

    while let Some(token) = iter.next() {
        match Flag::parse(token) {
            Some(Flag::Headers) => mode = Mode::Headers,
            Some(Flag::Sources) => mode = Mode::Sources,
            Some(Flag::Additionally) => mode = Mode::Additionally,
            Some(Flag::HeaderOnly) => parsed.header_only = true,
            Some(flag @ Flag::HeaderOutput) => {
                parsed.header_output = Some(flag_value(flag, iter.next())?);
            }
            Some(flag @ Flag::SourceOutput) => {
                parsed.source_output = Some(flag_value(flag, iter.next())?);
            }
            None => match mode {
                Mode::Headers => parsed.headers.push(token.to_string()),
                Mode::Sources => parsed.sources.push(token.to_string()),
                Mode::Additionally => parsed.additionally.push(token.to_string()),
            },
        }
    }

    Ok(parsed)
}

/// Destination following an output flag; another flag is not a value
fn flag_value(flag: Flag, value: Option<&str>) -> Result<PathBuf, AmalgamateError> {
    match value {
        Some(v) if !v.is_empty() && Flag::parse(v).is_none() => Ok(PathBuf::from(v)),
        _ => Err(AmalgamateError::MissingValue { flag: flag.long() }),
    }
}

/// A validated plan, ready to merge
#[derive(Debug, Clone)]
pub struct MergePlan {
    pub headers: Vec<Fragment>,
    pub sources: Vec<Fragment>,
    pub removal: RemovalSet,
    pub header_only: bool,
    pub header_output: Option<PathBuf>,
    pub source_output: Option<PathBuf>,
}

impl MergePlan {
    /// Parse, load and validate a merge token stream
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self, AmalgamateError> {
        let parsed = parse_tokens(tokens)?;
        let plan = Self::load(parsed)?;
        plan.validate()?;
        Ok(plan)
    }

    /// Load every fragment a parsed token stream names
    pub fn load(parsed: ParsedTokens) -> Result<Self, AmalgamateError> {
        let mut removal = RemovalSet::new();
        let headers = load_group(&parsed.headers, &mut removal)?;
        let sources = load_group(&parsed.sources, &mut removal)?;

        for name in parsed.additionally {
            debug!(name = %name, "Adding extra elision name");
            removal.insert(name);
        }

        Ok(MergePlan {
            headers,
            sources,
            removal,
            header_only: parsed.header_only,
            header_output: parsed.header_output,
            source_output: parsed.source_output,
        })
    }

    /// Check that there is something to merge and somewhere to put it
    pub fn validate(&self) -> Result<(), AmalgamateError> {
        if self.headers.is_empty() && self.sources.is_empty() {
            return Err(AmalgamateError::NoFragments);
        }

        if self.header_only {
            if self.header_output.is_none() {
                return Err(AmalgamateError::MissingDestination {
                    group: "Header",
                    flag: Flag::HeaderOutput.long(),
                });
            }
            if self.source_output.is_some() {
                warn!("--header-only is set; ignoring --source-output");
            }
            return Ok(());
        }

        if !self.headers.is_empty() && self.header_output.is_none() {
            return Err(AmalgamateError::MissingDestination {
                group: "Header",
                flag: Flag::HeaderOutput.long(),
            });
        }
        if !self.sources.is_empty() && self.source_output.is_none() {
            return Err(AmalgamateError::MissingDestination {
                group: "Source",
                flag: Flag::SourceOutput.long(),
            });
        }

        Ok(())
    }

    /// Fragments of the header artifact
    ///
    /// In header-only mode the source group is appended after the headers.
    pub fn header_fragments(&self) -> Vec<Fragment> {
        let mut fragments = self.headers.clone();
        if self.header_only {
            fragments.extend(self.sources.iter().cloned());
        }
        fragments
    }

    /// Whether a separate source artifact is produced
    pub fn writes_sources(&self) -> bool {
        !self.header_only && !self.sources.is_empty()
    }
}

fn load_group(
    tokens: &[String],
    removal: &mut RemovalSet,
) -> Result<Vec<Fragment>, AmalgamateError> {
    let mut fragments = Vec::new();
    for token in tokens {
        if let Some(fragment) = load_token(token, removal)? {
            fragments.push(fragment);
        }
    }
    Ok(fragments)
}
