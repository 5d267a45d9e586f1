//! Rewrite passes.
//!
//! The pipeline runs two walks. Stage A folds literal expressions, prunes
//! dead branches, canonicalizes literal spellings, normalizes member access
//! and block shapes, and elevates statement-position ternaries. Stage B runs
//! over a re-parse of the Stage A render and flattens declarations and
//! comma-operator chains, plus two targeted obfuscation-idiom rewrites.
//!
//! Registration order is dispatch order at a node, so within each stage the
//! order below is load-bearing: branch pruning must win over block
//! normalization at an if statement, and idiom folding runs before the
//! alert rewrite at a call.

pub mod blocks;
pub mod canonicalize;
pub mod conditional;
pub mod flatten;
pub mod fold;
pub mod member_access;

use crate::walker::RewriteRule;

pub use blocks::BlockNormalizer;
pub use canonicalize::LiteralCanonicalizer;
pub use conditional::ConditionalElevation;
pub use flatten::{
    AlertRewrite, DeclarationSplit, NestedSequenceFlattener, StatementSequenceFlattener,
    StringReverseIdiom,
};
pub use fold::LiteralFolder;
pub use member_access::MemberAccessNormalizer;

/// Stage A rule set, in registration order.
pub fn stage_a_rules() -> Vec<Box<dyn RewriteRule>> {
    vec![
        Box::new(LiteralFolder),
        Box::new(LiteralCanonicalizer),
        Box::new(MemberAccessNormalizer),
        Box::new(BlockNormalizer),
        Box::new(ConditionalElevation),
    ]
}

/// Stage B rule set, in registration order.
pub fn stage_b_rules() -> Vec<Box<dyn RewriteRule>> {
    vec![
        Box::new(DeclarationSplit),
        Box::new(StatementSequenceFlattener),
        Box::new(NestedSequenceFlattener),
        Box::new(StringReverseIdiom),
        Box::new(AlertRewrite),
    ]
}
