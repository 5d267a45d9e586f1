//! Error taxonomy for the cleaning pipeline.
//!
//! Three failure classes exist, with distinct recovery contracts:
//!
//! - [`ParseError`] — malformed input text. Not recoverable; aborts the
//!   whole request and carries a source location.
//! - [`PassError`] — a rewrite rule found its precondition violated after
//!   it had already committed to firing (for example a statement splice
//!   whose anchor is not in a statement list). Always a defect in the
//!   rule's guard, never user error, and never silently swallowed.
//! - [`FormatError`] — the optional final pretty-print step rejected its
//!   input. Recoverable: callers fall back to the plain rendered output.

use crate::span::{LineColumn, Span};
use serde::Serialize;
use thiserror::Error;

/// Syntax error produced by the scanner or parser.
#[derive(Clone, Debug, Error, Serialize)]
#[error("{file_name}:{location}: {message}")]
pub struct ParseError {
    pub file_name: String,
    pub message: String,
    pub span: Span,
    pub location: LineColumn,
}

/// Internal defect detected by a rewrite rule mid-flight.
///
/// Rules are required to check their full precondition up front and no-op
/// when it is unmet; reaching this error means a guard was wrong.
#[derive(Clone, Debug, Error, Serialize)]
#[error("internal pass error in `{rule}`: {message}")]
pub struct PassError {
    pub rule: &'static str,
    pub message: String,
}

impl PassError {
    pub fn new(rule: &'static str, message: impl Into<String>) -> PassError {
        PassError {
            rule,
            message: message.into(),
        }
    }
}

/// Failure of the standalone pretty-print entry point.
#[derive(Clone, Debug, Error)]
#[error("cannot format: {0}")]
pub struct FormatError(#[from] pub ParseError);

/// Union error surfaced by the one-shot [`clean`](crate::clean) pipeline.
#[derive(Clone, Debug, Error)]
pub enum CleanError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Pass(#[from] PassError),

    /// Re-parsing our own intermediate render failed. This is a renderer
    /// defect, not an input problem, so it is reported separately from
    /// `Parse`.
    #[error("intermediate render did not re-parse: {0}")]
    Reparse(ParseError),
}
