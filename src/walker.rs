//! Rewrite traversal engine.
//!
//! Walks the tree depth-first in pre-order and dispatches registered
//! [`RewriteRule`]s by node kind. In-place node replacement needs no
//! bookkeeping because arena indices are stable; statement-list edits
//! unwind to the frame owning the target list, are applied there, and the
//! walk resumes at the edit position. Inserted and replacement statements
//! are therefore visited, and siblings before the edit are never revisited.
//!
//! Rules must be guarded so their own output does not re-trigger them; the
//! walker otherwise assumes nothing about a rule beyond its declared kinds.

use crate::diagnostics::PassError;
use crate::parser::arena::NodeArena;
use crate::parser::ast::{NodeIndex, NodeKind};
use rustc_hash::{FxHashMap, FxHashSet};

/// Outcome of one rule application.
pub enum RuleAction {
    /// The rule did not apply (or applied without structural consequence).
    Keep,
    /// The rule replaced the current node in place. Dispatch restarts on
    /// the replacement, skipping rules that already fired on this slot.
    Revisit,
    /// Replace the current node in its owning statement list with the given
    /// statements. An empty vector removes it. The current node must occupy
    /// a statement-list slot, or the edit escapes the root as a [`PassError`].
    ReplaceWithMany(Vec<NodeIndex>),
    /// Insert statements immediately before `anchor` in the statement list
    /// that owns it. `anchor` must be the current node or an ancestor found
    /// via [`WalkPath::nearest_list_statement`].
    SpliceBefore {
        anchor: NodeIndex,
        statements: Vec<NodeIndex>,
    },
}

/// A single rewrite pass, dispatched on the node kinds it declares.
pub trait RewriteRule {
    fn name(&self) -> &'static str;

    /// Node kinds this rule wants to see.
    fn kinds(&self) -> &'static [NodeKind];

    fn apply(
        &self,
        arena: &mut NodeArena,
        node: NodeIndex,
        path: &WalkPath,
    ) -> Result<RuleAction, PassError>;
}

/// Ancestor chain from the root down to the parent of the current node.
#[derive(Default)]
pub struct WalkPath {
    frames: Vec<NodeIndex>,
}

impl WalkPath {
    fn push(&mut self, node: NodeIndex) {
        self.frames.push(node);
    }

    fn pop(&mut self) {
        self.frames.pop();
    }

    pub fn parent(&self) -> Option<NodeIndex> {
        self.frames.last().copied()
    }

    /// The ancestor chain, root first, ending at the current node's parent.
    pub fn ancestors(&self) -> &[NodeIndex] {
        &self.frames
    }

    /// Innermost ancestor (or `current` itself) that occupies a slot of a
    /// `SourceFile` or `Block` statement list. This is the splice anchor
    /// for rewrites that hoist expressions to statement position.
    pub fn nearest_list_statement(
        &self,
        arena: &NodeArena,
        current: NodeIndex,
    ) -> Option<NodeIndex> {
        let mut candidate = current;
        for &ancestor in self.frames.iter().rev() {
            if let Some(list) = arena.statement_list(ancestor) {
                if list.nodes.contains(&candidate) {
                    return Some(candidate);
                }
            }
            candidate = ancestor;
        }
        None
    }
}

// A statement-list edit travelling up the walk until it reaches the frame
// whose list contains the anchor.
enum Control {
    Continue,
    Edit {
        anchor: NodeIndex,
        replace_anchor: bool,
        statements: Vec<NodeIndex>,
    },
}

/// Pre-order walker over a fixed rule set.
pub struct TreeWalker {
    rules: Vec<Box<dyn RewriteRule>>,
    by_kind: FxHashMap<NodeKind, Vec<usize>>,
}

impl TreeWalker {
    /// Registration order is dispatch order within a kind.
    pub fn new(rules: Vec<Box<dyn RewriteRule>>) -> TreeWalker {
        let mut by_kind: FxHashMap<NodeKind, Vec<usize>> = FxHashMap::default();
        for (id, rule) in rules.iter().enumerate() {
            for &kind in rule.kinds() {
                by_kind.entry(kind).or_default().push(id);
            }
        }
        TreeWalker { rules, by_kind }
    }

    /// Run every rule over the tree rooted at `root`, returning the number
    /// of applied rewrites.
    pub fn run(&self, arena: &mut NodeArena, root: NodeIndex) -> Result<usize, PassError> {
        let mut path = WalkPath::default();
        let mut rewrites = 0;
        match self.walk_node(arena, root, &mut path, &mut rewrites)? {
            Control::Continue => Ok(rewrites),
            Control::Edit { anchor, .. } => Err(PassError::new(
                "walker",
                format!(
                    "statement-list edit escaped the tree root (anchor {:?} occupies no statement list)",
                    anchor
                ),
            )),
        }
    }

    fn walk_node(
        &self,
        arena: &mut NodeArena,
        node: NodeIndex,
        path: &mut WalkPath,
        rewrites: &mut usize,
    ) -> Result<Control, PassError> {
        // Dispatch. `fired` is per slot: a Revisit restarts the rule list
        // for the replacement's kind but never re-invokes a rule that
        // already rewrote this slot.
        let mut fired: FxHashSet<usize> = FxHashSet::default();
        'dispatch: loop {
            let rule_ids = match self.by_kind.get(&arena.kind(node)) {
                Some(ids) => ids.clone(),
                None => break,
            };
            for id in rule_ids {
                if fired.contains(&id) {
                    continue;
                }
                let rule = &self.rules[id];
                match rule.apply(arena, node, path)? {
                    RuleAction::Keep => {}
                    RuleAction::Revisit => {
                        tracing::debug!(rule = rule.name(), node = node.0, "rewrote in place");
                        *rewrites += 1;
                        fired.insert(id);
                        continue 'dispatch;
                    }
                    RuleAction::ReplaceWithMany(statements) => {
                        *rewrites += 1;
                        tracing::debug!(
                            rule = rule.name(),
                            node = node.0,
                            count = statements.len(),
                            "replacing statement"
                        );
                        return Ok(Control::Edit {
                            anchor: node,
                            replace_anchor: true,
                            statements,
                        });
                    }
                    RuleAction::SpliceBefore { anchor, statements } => {
                        *rewrites += 1;
                        tracing::debug!(
                            rule = rule.name(),
                            node = node.0,
                            anchor = anchor.0,
                            count = statements.len(),
                            "splicing before statement"
                        );
                        return Ok(Control::Edit {
                            anchor,
                            replace_anchor: false,
                            statements,
                        });
                    }
                }
            }
            break;
        }

        // Descend. Statement lists get edit handling; everything else
        // re-reads its child indices each step so in-place replacement
        // composes with the walk.
        if arena.kind(node).has_statement_list() {
            return self.walk_statement_list(arena, node, path, rewrites);
        }

        let mut i = 0;
        loop {
            let children = arena.children(node);
            let Some(&child) = children.get(i) else {
                break;
            };
            path.push(node);
            let control = self.walk_node(arena, child, path, rewrites);
            path.pop();
            match control? {
                Control::Continue => i += 1,
                // No statement list here; keep unwinding.
                edit @ Control::Edit { .. } => return Ok(edit),
            }
        }
        Ok(Control::Continue)
    }

    fn walk_statement_list(
        &self,
        arena: &mut NodeArena,
        owner: NodeIndex,
        path: &mut WalkPath,
        rewrites: &mut usize,
    ) -> Result<Control, PassError> {
        let mut i = 0;
        loop {
            // Re-read the list every iteration; edits below may have
            // reshaped it.
            let Some(stmt) = arena
                .statement_list(owner)
                .and_then(|list| list.nodes.get(i).copied())
            else {
                break;
            };
            path.push(owner);
            let control = self.walk_node(arena, stmt, path, rewrites);
            path.pop();
            match control? {
                Control::Continue => i += 1,
                Control::Edit {
                    anchor,
                    replace_anchor,
                    statements,
                } => {
                    let position = arena
                        .statement_list(owner)
                        .and_then(|list| list.nodes.iter().position(|&n| n == anchor));
                    let Some(j) = position else {
                        // Anchor lives in an outer list.
                        return Ok(Control::Edit {
                            anchor,
                            replace_anchor,
                            statements,
                        });
                    };
                    let Some(list) = arena.statement_list_mut(owner) else {
                        return Err(PassError::new("walker", "statement list owner changed kind"));
                    };
                    if replace_anchor {
                        list.nodes.splice(j..=j, statements);
                    } else {
                        list.nodes.splice(j..j, statements);
                    }
                    // Resume at the edit position: replacements and
                    // insertions get walked, earlier siblings do not.
                    i = j;
                }
            }
        }
        Ok(Control::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::{EmitOptions, Printer};
    use crate::parser::ast::Node;
    use crate::parser::ParserState;

    fn parse(source: &str) -> (NodeArena, NodeIndex) {
        let mut parser = ParserState::new(source, "test.js").expect("scanner init");
        let root = parser.parse_source_file().expect("parse failed");
        (parser.into_arena(), root)
    }

    fn render(arena: &NodeArena, root: NodeIndex) -> String {
        Printer::new(arena, &EmitOptions::default()).print_source_file(root)
    }

    /// Renames `foo` to `bar`, guarded by the identifier text.
    struct Rename;

    impl RewriteRule for Rename {
        fn name(&self) -> &'static str {
            "rename"
        }

        fn kinds(&self) -> &'static [NodeKind] {
            &[NodeKind::Identifier]
        }

        fn apply(
            &self,
            arena: &mut NodeArena,
            node: NodeIndex,
            _path: &WalkPath,
        ) -> Result<RuleAction, PassError> {
            if arena.identifier_text(node) == Some("foo") {
                arena.replace(node, Node::Identifier { text: "bar".into() });
                return Ok(RuleAction::Revisit);
            }
            Ok(RuleAction::Keep)
        }
    }

    /// Splits a statement-level sequence into one statement per element.
    struct SplitSequence;

    impl RewriteRule for SplitSequence {
        fn name(&self) -> &'static str {
            "split-sequence"
        }

        fn kinds(&self) -> &'static [NodeKind] {
            &[NodeKind::ExpressionStatement]
        }

        fn apply(
            &self,
            arena: &mut NodeArena,
            node: NodeIndex,
            _path: &WalkPath,
        ) -> Result<RuleAction, PassError> {
            let Node::ExpressionStatement { expression } = *arena.get(node) else {
                return Ok(RuleAction::Keep);
            };
            let Node::SequenceExpression { expressions } = arena.get(expression).clone() else {
                return Ok(RuleAction::Keep);
            };
            let statements = expressions
                .nodes
                .iter()
                .map(|&expr| arena.alloc_expression_statement(expr))
                .collect();
            Ok(RuleAction::ReplaceWithMany(statements))
        }
    }

    /// Returns a list edit from expression position; must be a PassError.
    struct BadAnchor;

    impl RewriteRule for BadAnchor {
        fn name(&self) -> &'static str {
            "bad-anchor"
        }

        fn kinds(&self) -> &'static [NodeKind] {
            &[NodeKind::Identifier]
        }

        fn apply(
            &self,
            arena: &mut NodeArena,
            node: NodeIndex,
            _path: &WalkPath,
        ) -> Result<RuleAction, PassError> {
            let _ = arena;
            Ok(RuleAction::SpliceBefore {
                anchor: node,
                statements: Vec::new(),
            })
        }
    }

    #[test]
    fn in_place_replacement_is_visited_everywhere() {
        let (mut arena, root) = parse("foo(foo, x); var foo = foo;");
        let walker = TreeWalker::new(vec![Box::new(Rename)]);
        walker.run(&mut arena, root).unwrap();
        assert_eq!(render(&arena, root), "bar(bar, x);\nvar bar = bar;\n");
    }

    #[test]
    fn replacement_statements_are_walked() {
        // The sequence splits into three statements and the rename rule
        // still sees the inserted ones.
        let (mut arena, root) = parse("a(), foo(), b();");
        let walker = TreeWalker::new(vec![Box::new(SplitSequence), Box::new(Rename)]);
        walker.run(&mut arena, root).unwrap();
        assert_eq!(render(&arena, root), "a();\nbar();\nb();\n");
    }

    #[test]
    fn edits_apply_inside_nested_blocks() {
        let (mut arena, root) = parse("if (x) { a(), b(); c(); }");
        let walker = TreeWalker::new(vec![Box::new(SplitSequence)]);
        walker.run(&mut arena, root).unwrap();
        assert_eq!(
            render(&arena, root),
            "if (x) {\n    a();\n    b();\n    c();\n}\n"
        );
    }

    #[test]
    fn nearest_list_statement_finds_the_owning_slot() {
        struct Probe;
        impl RewriteRule for Probe {
            fn name(&self) -> &'static str {
                "probe"
            }
            fn kinds(&self) -> &'static [NodeKind] {
                &[NodeKind::CallExpression]
            }
            fn apply(
                &self,
                arena: &mut NodeArena,
                node: NodeIndex,
                path: &WalkPath,
            ) -> Result<RuleAction, PassError> {
                let anchor = path.nearest_list_statement(arena, node);
                assert!(anchor.is_some());
                assert_eq!(arena.kind(anchor.unwrap()), NodeKind::ExpressionStatement);
                Ok(RuleAction::Keep)
            }
        }
        let (mut arena, root) = parse("x = f(g());");
        let walker = TreeWalker::new(vec![Box::new(Probe)]);
        walker.run(&mut arena, root).unwrap();
    }

    #[test]
    fn edit_from_expression_position_is_a_pass_error() {
        let (mut arena, root) = parse("x = foo + 1;");
        let walker = TreeWalker::new(vec![Box::new(BadAnchor)]);
        let err = walker.run(&mut arena, root).unwrap_err();
        assert!(err.to_string().contains("bad") || err.to_string().contains("anchor"));
    }
}
