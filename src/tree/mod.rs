// jackc - A single-pass compiler translating Jack classes into Hack VM code
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Concrete parse tree recorded while compiling.
//!
//! The tree is a diagnostic by-product of parsing: it is never read back by
//! the code generator. Nodes live in an index arena. A cursor points at the
//! innermost open production; opening a production moves the cursor down,
//! closing it moves the cursor back to the parent.

use crate::lexer::Token;
use std::fmt;

/// Index of a node in the tree arena.
pub type NodeId = usize;

/// Non-terminal productions that appear as tree nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Production {
    Class,
    ClassVarDec,
    SubroutineDec,
    ParameterList,
    SubroutineBody,
    VarDec,
    Statements,
    LetStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ReturnStatement,
    Expression,
    Term,
    ExpressionList,
}

impl Production {
    /// The tag name used in the XML rendering.
    pub fn tag(&self) -> &'static str {
        match self {
            Production::Class => "class",
            Production::ClassVarDec => "classVarDec",
            Production::SubroutineDec => "subroutineDec",
            Production::ParameterList => "parameterList",
            Production::SubroutineBody => "subroutineBody",
            Production::VarDec => "varDec",
            Production::Statements => "statements",
            Production::LetStatement => "letStatement",
            Production::IfStatement => "ifStatement",
            Production::WhileStatement => "whileStatement",
            Production::DoStatement => "doStatement",
            Production::ReturnStatement => "returnStatement",
            Production::Expression => "expression",
            Production::Term => "term",
            Production::ExpressionList => "expressionList",
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A production with its children in source order.
    Branch {
        production: Production,
        children: Vec<NodeId>,
    },
    /// A single consumed token.
    Leaf(Token),
}

#[derive(Debug, Clone)]
struct Entry {
    node: Node,
    parent: Option<NodeId>,
}

/// Parse tree under construction.
#[derive(Debug, Clone, Default)]
pub struct ParseTree {
    nodes: Vec<Entry>,
    cursor: Option<NodeId>,
}

impl ParseTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The root node, once the first production was opened.
    pub fn root(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id).map(|e| &e.node)
    }

    /// The parent of a node; `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|e| e.parent)
    }

    /// The children of a node; empty for leaves.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.node(id) {
            Some(Node::Branch { children, .. }) => children,
            _ => &[],
        }
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Open a production below the cursor and move the cursor into it.
    pub fn open(&mut self, production: Production) {
        let id = self.push(Node::Branch {
            production,
            children: Vec::new(),
        });
        self.cursor = Some(id);
    }

    /// Close the innermost open production.
    pub fn close(&mut self) {
        self.cursor = self.cursor.and_then(|id| self.parent(id));
    }

    /// Append a token as a child of the innermost open production.
    pub fn leaf(&mut self, token: Token) {
        self.push(Node::Leaf(token));
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len();
        let parent = self.cursor;
        self.nodes.push(Entry { node, parent });
        if let Some(Entry {
            node: Node::Branch { children, .. },
            ..
        }) = parent.and_then(|p| self.nodes.get_mut(p))
        {
            children.push(id);
        }
        id
    }

    /// Render the tree as indented XML, two spaces per depth.
    pub fn to_xml(&self) -> String {
        let mut output = String::new();
        if let Some(root) = self.root() {
            self.render_node(root, 0, &mut output);
        }
        output
    }

    fn render_node(&self, id: NodeId, depth: usize, output: &mut String) {
        let indent = "  ".repeat(depth);
        match self.node(id) {
            Some(Node::Leaf(token)) => {
                output.push_str(&indent);
                output.push_str(&token.to_xml());
                output.push('\n');
            }
            Some(Node::Branch {
                production,
                children,
            }) => {
                output.push_str(&format!("{}<{}>\n", indent, production.tag()));
                for &child in children {
                    self.render_node(child, depth + 1, output);
                }
                output.push_str(&format!("{}</{}>\n", indent, production.tag()));
            }
            None => {}
        }
    }
}
