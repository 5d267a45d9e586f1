//! Node arena for AST storage.
//!
//! Nodes are stored contiguously and referenced by index. Indices are
//! stable: replacing a node swaps the content at its index, so every parent
//! reference stays valid. Nodes replaced out of the tree stay in the arena
//! but become unreachable; they are dropped with the arena at the end of
//! the request.

use super::ast::{Node, NodeIndex, NodeKind, NodeList};
use crate::eval::{format_number, quote_string};
use crate::span::Span;
use serde::Serialize;

/// Arena-based storage for AST nodes, with a parallel span table.
#[derive(Debug, Default, Serialize)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
    spans: Vec<Span>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena {
            nodes: Vec::new(),
            spans: Vec::new(),
        }
    }

    /// Add a node and return its index. Synthesized nodes get an empty span.
    pub fn add(&mut self, node: Node) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        self.spans.push(Span::default());
        NodeIndex(index)
    }

    pub fn get(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.0 as usize]
    }

    pub fn get_mut(&mut self, index: NodeIndex) -> &mut Node {
        &mut self.nodes[index.0 as usize]
    }

    pub fn kind(&self, index: NodeIndex) -> NodeKind {
        self.get(index).kind()
    }

    /// Replace the node at `index` in place, returning the old node.
    pub fn replace(&mut self, index: NodeIndex, new_node: Node) -> Node {
        std::mem::replace(self.get_mut(index), new_node)
    }

    pub fn span(&self, index: NodeIndex) -> Span {
        self.spans[index.0 as usize]
    }

    pub fn set_span(&mut self, index: NodeIndex, span: Span) {
        self.spans[index.0 as usize] = span;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =========================================================================
    // Statement lists
    // =========================================================================

    /// The spliceable statement list of a `SourceFile` or `Block`.
    pub fn statement_list(&self, owner: NodeIndex) -> Option<&NodeList> {
        match self.get(owner) {
            Node::SourceFile { statements } | Node::Block { statements } => Some(statements),
            _ => None,
        }
    }

    pub fn statement_list_mut(&mut self, owner: NodeIndex) -> Option<&mut NodeList> {
        match self.get_mut(owner) {
            Node::SourceFile { statements } | Node::Block { statements } => Some(statements),
            _ => None,
        }
    }

    // =========================================================================
    // Child enumeration (canonical field order)
    // =========================================================================

    /// All child indices of a node, in canonical field order.
    pub fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut children = Vec::new();
        let add = |children: &mut Vec<NodeIndex>, idx: NodeIndex| children.push(idx);
        let add_opt = |children: &mut Vec<NodeIndex>, idx: &Option<NodeIndex>| {
            if let Some(idx) = idx {
                children.push(*idx);
            }
        };
        let add_list = |children: &mut Vec<NodeIndex>, list: &NodeList| {
            children.extend(list.nodes.iter().copied());
        };

        match self.get(index) {
            Node::SourceFile { statements } | Node::Block { statements } => {
                add_list(&mut children, statements);
            }
            Node::ArrayLiteralExpression { elements } => add_list(&mut children, elements),
            Node::ObjectLiteralExpression { properties } => add_list(&mut children, properties),
            Node::PropertyAssignment { name, initializer } => {
                add(&mut children, *name);
                add(&mut children, *initializer);
            }
            Node::BinaryExpression { left, right, .. } => {
                add(&mut children, *left);
                add(&mut children, *right);
            }
            Node::PrefixUnaryExpression { operand, .. }
            | Node::PostfixUnaryExpression { operand, .. } => add(&mut children, *operand),
            Node::ConditionalExpression {
                condition,
                when_true,
                when_false,
            } => {
                add(&mut children, *condition);
                add(&mut children, *when_true);
                add(&mut children, *when_false);
            }
            Node::SequenceExpression { expressions } => add_list(&mut children, expressions),
            Node::CallExpression {
                expression,
                arguments,
            } => {
                add(&mut children, *expression);
                add_list(&mut children, arguments);
            }
            Node::NewExpression {
                expression,
                arguments,
            } => {
                add(&mut children, *expression);
                if let Some(arguments) = arguments {
                    add_list(&mut children, arguments);
                }
            }
            Node::PropertyAccessExpression { expression, name } => {
                add(&mut children, *expression);
                add(&mut children, *name);
            }
            Node::ElementAccessExpression {
                expression,
                argument_expression,
            } => {
                add(&mut children, *expression);
                add(&mut children, *argument_expression);
            }
            Node::FunctionExpression {
                name,
                parameters,
                body,
            } => {
                add_opt(&mut children, name);
                add_list(&mut children, parameters);
                add(&mut children, *body);
            }
            Node::FunctionDeclaration {
                name,
                parameters,
                body,
            } => {
                add(&mut children, *name);
                add_list(&mut children, parameters);
                add(&mut children, *body);
            }
            Node::VariableStatement { declarations, .. } => add_list(&mut children, declarations),
            Node::VariableDeclaration { name, initializer } => {
                add(&mut children, *name);
                add_opt(&mut children, initializer);
            }
            Node::ExpressionStatement { expression } | Node::ThrowStatement { expression } => {
                add(&mut children, *expression);
            }
            Node::IfStatement {
                expression,
                then_statement,
                else_statement,
            } => {
                add(&mut children, *expression);
                add(&mut children, *then_statement);
                add_opt(&mut children, else_statement);
            }
            Node::WhileStatement {
                expression,
                statement,
            } => {
                add(&mut children, *expression);
                add(&mut children, *statement);
            }
            Node::DoStatement {
                statement,
                expression,
            } => {
                add(&mut children, *statement);
                add(&mut children, *expression);
            }
            Node::ForStatement {
                initializer,
                condition,
                incrementor,
                statement,
            } => {
                add_opt(&mut children, initializer);
                add_opt(&mut children, condition);
                add_opt(&mut children, incrementor);
                add(&mut children, *statement);
            }
            Node::ForInStatement {
                initializer,
                expression,
                statement,
            } => {
                add(&mut children, *initializer);
                add(&mut children, *expression);
                add(&mut children, *statement);
            }
            Node::ReturnStatement { expression } => add_opt(&mut children, expression),
            Node::Identifier { .. }
            | Node::NumericLiteral { .. }
            | Node::StringLiteral { .. }
            | Node::BooleanLiteral { .. }
            | Node::NullLiteral
            | Node::ThisExpression
            | Node::BreakStatement
            | Node::ContinueStatement
            | Node::EmptyStatement => {}
        }

        children
    }

    // =========================================================================
    // Node factories (used by rewrite rules for synthesized nodes)
    // =========================================================================

    pub fn alloc_identifier(&mut self, text: impl Into<String>) -> NodeIndex {
        self.add(Node::Identifier { text: text.into() })
    }

    /// Numeric literal with canonical decimal spelling.
    pub fn alloc_number(&mut self, value: f64) -> NodeIndex {
        self.add(Node::NumericLiteral {
            value,
            text: format_number(value),
        })
    }

    /// String literal with canonical single-quoted spelling.
    pub fn alloc_string(&mut self, value: impl Into<String>) -> NodeIndex {
        let value = value.into();
        let text = quote_string(&value, '\'');
        self.add(Node::StringLiteral { value, text })
    }

    pub fn alloc_boolean(&mut self, value: bool) -> NodeIndex {
        self.add(Node::BooleanLiteral { value })
    }

    pub fn alloc_expression_statement(&mut self, expression: NodeIndex) -> NodeIndex {
        self.add(Node::ExpressionStatement { expression })
    }

    pub fn alloc_block(&mut self, statements: Vec<NodeIndex>) -> NodeIndex {
        self.add(Node::Block {
            statements: NodeList::new(statements),
        })
    }

    pub fn alloc_property_access(&mut self, expression: NodeIndex, name: &str) -> NodeIndex {
        let name = self.alloc_identifier(name);
        self.add(Node::PropertyAccessExpression { expression, name })
    }

    // =========================================================================
    // Common accessors
    // =========================================================================

    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        match self.get(index) {
            Node::Identifier { text } => Some(text),
            _ => None,
        }
    }

    pub fn string_value(&self, index: NodeIndex) -> Option<&str> {
        match self.get(index) {
            Node::StringLiteral { value, .. } => Some(value),
            _ => None,
        }
    }
}
