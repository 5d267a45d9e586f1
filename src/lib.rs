//! `jsclean` — a source-to-source normalizer for JavaScript-like code.
//!
//! The pipeline is two rewrite stages over an arena-allocated AST, with a
//! render/re-parse boundary between them:
//!
//! ```text
//! text -> parse -> Stage A -> render -> parse -> Stage B -> render -> text
//! ```
//!
//! Stage A folds closed literal expressions, eliminates dead branches,
//! canonicalizes literal spellings, normalizes member access and block
//! shapes, and elevates statement-position ternaries. Stage B splits
//! multi-declarator declarations, flattens comma-operator chains, and
//! applies two targeted obfuscation-idiom rewrites (string reversal via
//! split/reverse/join, `alert` to `console.log`).
//!
//! Everything rewrites are allowed to do preserves program behavior; a rule
//! whose precondition is unmet does nothing rather than guess. The output
//! is canonical: running [`clean`] on its own output is the identity.
//!
//! [`clean`] is the one-shot entry point; [`parse`], [`fold_and_normalize`],
//! [`flatten`] and [`render`] expose the individual pipeline steps.

pub mod diagnostics;
pub mod emitter;
pub mod eval;
pub mod parser;
pub mod scanner;
pub mod span;
pub mod transforms;
pub mod walker;

pub use diagnostics::{CleanError, FormatError, ParseError, PassError};
pub use emitter::EmitOptions;

use emitter::Printer;
use parser::arena::NodeArena;
use parser::ast::NodeIndex;
use parser::ParserState;
use transforms::{stage_a_rules, stage_b_rules};
use walker::TreeWalker;

/// A parsed script: the node arena plus its `SourceFile` root.
pub struct ParsedFile {
    pub arena: NodeArena,
    pub root: NodeIndex,
}

/// Parse `source` into an arena-backed tree.
///
/// `file_name` only labels diagnostics; stdin callers pass a placeholder.
pub fn parse(source: &str, file_name: &str) -> Result<ParsedFile, ParseError> {
    let mut parser = ParserState::new(source, file_name)?;
    let root = parser.parse_source_file()?;
    Ok(ParsedFile {
        arena: parser.into_arena(),
        root,
    })
}

/// Stage A: literal folding and dead branches, literal canonicalization,
/// member-access normalization, block normalization, conditional elevation.
pub fn fold_and_normalize(file: &mut ParsedFile) -> Result<(), PassError> {
    let rewrites = TreeWalker::new(stage_a_rules()).run(&mut file.arena, file.root)?;
    tracing::info!(rewrites, "fold/normalize stage complete");
    Ok(())
}

/// Stage B: declaration split, sequence flattening, idiom rewrites. Runs
/// over a fresh parse of the Stage A render.
pub fn flatten(file: &mut ParsedFile) -> Result<(), PassError> {
    let rewrites = TreeWalker::new(stage_b_rules()).run(&mut file.arena, file.root)?;
    tracing::info!(rewrites, "flatten stage complete");
    Ok(())
}

/// Render a tree back to canonical source text. Deterministic for fixed
/// options.
pub fn render(file: &ParsedFile, options: &EmitOptions) -> String {
    Printer::new(&file.arena, options).print_source_file(file.root)
}

/// Reformat source text without rewriting it: parse and re-emit with the
/// given style. Callers treat failure as recoverable and keep their input.
pub fn pretty_print(source: &str, options: &EmitOptions) -> Result<String, FormatError> {
    let file = parse(source, "<pretty-print>")?;
    Ok(render(&file, options))
}

/// The whole pipeline, text to text.
///
/// The Stage A result is rendered and re-parsed before Stage B so the
/// second stage sees exactly the tree its output text would produce. A
/// re-parse failure is a renderer defect and surfaces as
/// [`CleanError::Reparse`], never as an input error.
pub fn clean(source: &str, file_name: &str) -> Result<String, CleanError> {
    let options = EmitOptions::default();

    let mut file = parse(source, file_name)?;
    fold_and_normalize(&mut file)?;
    let intermediate = render(&file, &options);

    let mut file = parse(&intermediate, file_name).map_err(CleanError::Reparse)?;
    flatten(&mut file)?;
    Ok(render(&file, &options))
}
