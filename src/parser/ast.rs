//! AST node definitions.
//!
//! `Node` is a closed tagged union over the supported syntax kinds; children
//! are referenced by [`NodeIndex`] into the arena. Parenthesization is not
//! represented — the emitter restores parentheses from operator precedence —
//! so two differently-parenthesized spellings of the same expression parse
//! to identical trees.

use crate::scanner::SyntaxKind;
use serde::Serialize;

/// Index of a node inside its [`NodeArena`](super::arena::NodeArena).
///
/// Indices are stable for the lifetime of the arena: in-place replacement
/// swaps the node stored at an index and never moves other nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct NodeIndex(pub u32);

/// Ordered list of child nodes.
#[derive(Clone, Debug, Default, Serialize)]
pub struct NodeList {
    pub nodes: Vec<NodeIndex>,
}

impl NodeList {
    pub fn new(nodes: Vec<NodeIndex>) -> NodeList {
        NodeList { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Discriminant of [`Node`], used as the dispatch key in the walker's
/// rule registration table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    SourceFile,
    Identifier,
    NumericLiteral,
    StringLiteral,
    BooleanLiteral,
    NullLiteral,
    ThisExpression,
    ArrayLiteralExpression,
    ObjectLiteralExpression,
    PropertyAssignment,
    BinaryExpression,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    ConditionalExpression,
    SequenceExpression,
    CallExpression,
    NewExpression,
    PropertyAccessExpression,
    ElementAccessExpression,
    FunctionExpression,
    FunctionDeclaration,
    VariableStatement,
    VariableDeclaration,
    ExpressionStatement,
    Block,
    IfStatement,
    WhileStatement,
    DoStatement,
    ForStatement,
    ForInStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    ThrowStatement,
    EmptyStatement,
}

/// A syntax tree node. One parent slot owns each child index; a subtree
/// needed in two places must be deep-copied.
#[derive(Clone, Debug, Serialize)]
pub enum Node {
    SourceFile {
        statements: NodeList,
    },
    Identifier {
        text: String,
    },
    /// `text` keeps the original spelling (`0x10`, `1e3`, …); the
    /// canonicalizer replaces non-canonical spellings with fresh literals.
    NumericLiteral {
        value: f64,
        text: String,
    },
    /// `text` keeps the raw quoted source including the quotes.
    StringLiteral {
        value: String,
        text: String,
    },
    BooleanLiteral {
        value: bool,
    },
    NullLiteral,
    ThisExpression,
    ArrayLiteralExpression {
        elements: NodeList,
    },
    ObjectLiteralExpression {
        properties: NodeList,
    },
    PropertyAssignment {
        name: NodeIndex,
        initializer: NodeIndex,
    },
    /// Covers arithmetic, relational, logical, bitwise and assignment
    /// operators; the operator token discriminates.
    BinaryExpression {
        left: NodeIndex,
        operator: SyntaxKind,
        right: NodeIndex,
    },
    PrefixUnaryExpression {
        operator: SyntaxKind,
        operand: NodeIndex,
    },
    PostfixUnaryExpression {
        operator: SyntaxKind,
        operand: NodeIndex,
    },
    ConditionalExpression {
        condition: NodeIndex,
        when_true: NodeIndex,
        when_false: NodeIndex,
    },
    /// Comma-operator chain, kept flat: `a, b, c` has three elements.
    SequenceExpression {
        expressions: NodeList,
    },
    CallExpression {
        expression: NodeIndex,
        arguments: NodeList,
    },
    NewExpression {
        expression: NodeIndex,
        /// `None` when the source had no argument list (`new X`).
        arguments: Option<NodeList>,
    },
    PropertyAccessExpression {
        expression: NodeIndex,
        name: NodeIndex,
    },
    ElementAccessExpression {
        expression: NodeIndex,
        argument_expression: NodeIndex,
    },
    FunctionExpression {
        name: Option<NodeIndex>,
        parameters: NodeList,
        body: NodeIndex,
    },
    FunctionDeclaration {
        name: NodeIndex,
        parameters: NodeList,
        body: NodeIndex,
    },
    VariableStatement {
        keyword: SyntaxKind,
        declarations: NodeList,
    },
    VariableDeclaration {
        name: NodeIndex,
        initializer: Option<NodeIndex>,
    },
    ExpressionStatement {
        expression: NodeIndex,
    },
    Block {
        statements: NodeList,
    },
    IfStatement {
        expression: NodeIndex,
        then_statement: NodeIndex,
        else_statement: Option<NodeIndex>,
    },
    WhileStatement {
        expression: NodeIndex,
        statement: NodeIndex,
    },
    DoStatement {
        statement: NodeIndex,
        expression: NodeIndex,
    },
    ForStatement {
        initializer: Option<NodeIndex>,
        condition: Option<NodeIndex>,
        incrementor: Option<NodeIndex>,
        statement: NodeIndex,
    },
    ForInStatement {
        initializer: NodeIndex,
        expression: NodeIndex,
        statement: NodeIndex,
    },
    ReturnStatement {
        expression: Option<NodeIndex>,
    },
    BreakStatement,
    ContinueStatement,
    ThrowStatement {
        expression: NodeIndex,
    },
    EmptyStatement,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::SourceFile { .. } => NodeKind::SourceFile,
            Node::Identifier { .. } => NodeKind::Identifier,
            Node::NumericLiteral { .. } => NodeKind::NumericLiteral,
            Node::StringLiteral { .. } => NodeKind::StringLiteral,
            Node::BooleanLiteral { .. } => NodeKind::BooleanLiteral,
            Node::NullLiteral => NodeKind::NullLiteral,
            Node::ThisExpression => NodeKind::ThisExpression,
            Node::ArrayLiteralExpression { .. } => NodeKind::ArrayLiteralExpression,
            Node::ObjectLiteralExpression { .. } => NodeKind::ObjectLiteralExpression,
            Node::PropertyAssignment { .. } => NodeKind::PropertyAssignment,
            Node::BinaryExpression { .. } => NodeKind::BinaryExpression,
            Node::PrefixUnaryExpression { .. } => NodeKind::PrefixUnaryExpression,
            Node::PostfixUnaryExpression { .. } => NodeKind::PostfixUnaryExpression,
            Node::ConditionalExpression { .. } => NodeKind::ConditionalExpression,
            Node::SequenceExpression { .. } => NodeKind::SequenceExpression,
            Node::CallExpression { .. } => NodeKind::CallExpression,
            Node::NewExpression { .. } => NodeKind::NewExpression,
            Node::PropertyAccessExpression { .. } => NodeKind::PropertyAccessExpression,
            Node::ElementAccessExpression { .. } => NodeKind::ElementAccessExpression,
            Node::FunctionExpression { .. } => NodeKind::FunctionExpression,
            Node::FunctionDeclaration { .. } => NodeKind::FunctionDeclaration,
            Node::VariableStatement { .. } => NodeKind::VariableStatement,
            Node::VariableDeclaration { .. } => NodeKind::VariableDeclaration,
            Node::ExpressionStatement { .. } => NodeKind::ExpressionStatement,
            Node::Block { .. } => NodeKind::Block,
            Node::IfStatement { .. } => NodeKind::IfStatement,
            Node::WhileStatement { .. } => NodeKind::WhileStatement,
            Node::DoStatement { .. } => NodeKind::DoStatement,
            Node::ForStatement { .. } => NodeKind::ForStatement,
            Node::ForInStatement { .. } => NodeKind::ForInStatement,
            Node::ReturnStatement { .. } => NodeKind::ReturnStatement,
            Node::BreakStatement => NodeKind::BreakStatement,
            Node::ContinueStatement => NodeKind::ContinueStatement,
            Node::ThrowStatement { .. } => NodeKind::ThrowStatement,
            Node::EmptyStatement => NodeKind::EmptyStatement,
        }
    }
}

impl NodeKind {
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            NodeKind::NumericLiteral
                | NodeKind::StringLiteral
                | NodeKind::BooleanLiteral
                | NodeKind::NullLiteral
        )
    }

    pub fn is_statement(self) -> bool {
        matches!(
            self,
            NodeKind::VariableStatement
                | NodeKind::ExpressionStatement
                | NodeKind::Block
                | NodeKind::IfStatement
                | NodeKind::WhileStatement
                | NodeKind::DoStatement
                | NodeKind::ForStatement
                | NodeKind::ForInStatement
                | NodeKind::ReturnStatement
                | NodeKind::BreakStatement
                | NodeKind::ContinueStatement
                | NodeKind::ThrowStatement
                | NodeKind::EmptyStatement
                | NodeKind::FunctionDeclaration
        )
    }

    /// Kinds whose statement children form a spliceable list.
    pub fn has_statement_list(self) -> bool {
        matches!(self, NodeKind::SourceFile | NodeKind::Block)
    }
}
