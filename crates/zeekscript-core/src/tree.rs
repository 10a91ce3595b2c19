// zeekscript - Zeek script parsing and formatting
//
// Copyright (c) 2025 zeekscript contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The concrete syntax tree.
//!
//! Nodes live in an arena owned by [`Tree`] and are addressed by [`NodeId`].
//! Every node keeps two views of its children:
//!
//! - the raw child sequence, in source order, including newlines and
//!   comments ("extras")
//! - the AST child list, which skips extras so that positional access such
//!   as "the expression after `[`" works regardless of comments
//!
//! Extras are additionally attached to neighbouring AST nodes as
//! `prev_cst_siblings` / `next_cst_siblings`, which is how the formatter
//! reaches them.

use std::fmt;

use crate::lex::{Point, Span};

/// Index of a node in its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Grammar symbols. Names follow the tree-sitter Zeek grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    SourceFile,
    Decl,
    ModuleDecl,
    ExportDecl,
    GlobalDecl,
    OptionDecl,
    ConstDecl,
    RedefDecl,
    RedefEnumDecl,
    RedefRecordDecl,
    TypeDecl,
    FuncDecl,
    FuncHdr,
    Func,
    Hook,
    Event,
    FuncParams,
    FuncBody,
    FormalArgs,
    FormalArg,
    CaptureList,
    Capture,
    BeginLambda,
    Type,
    TypeSpec,
    EnumBody,
    EnumBodyElem,
    AttrList,
    Attr,
    Initializer,
    InitClass,
    Init,
    StmtList,
    Stmt,
    CaseList,
    CaseTypeList,
    EventHdr,
    Expr,
    ExprList,
    IndexSlice,
    Interval,
    PreprocDirective,
    Id,
    Constant,
    Pattern,
    File,
    Nl,
    MinorComment,
    ZeekygenHeadComment,
    ZeekygenNextComment,
    ZeekygenPrevComment,
    Error,
    NullNode,
    /// An anonymous token (keyword, operator, punctuation). Its type is
    /// its text.
    Token,
}

impl Symbol {
    /// The grammar name of the symbol. Anonymous tokens have none.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::SourceFile => "source_file",
            Self::Decl => "decl",
            Self::ModuleDecl => "module_decl",
            Self::ExportDecl => "export_decl",
            Self::GlobalDecl => "global_decl",
            Self::OptionDecl => "option_decl",
            Self::ConstDecl => "const_decl",
            Self::RedefDecl => "redef_decl",
            Self::RedefEnumDecl => "redef_enum_decl",
            Self::RedefRecordDecl => "redef_record_decl",
            Self::TypeDecl => "type_decl",
            Self::FuncDecl => "func_decl",
            Self::FuncHdr => "func_hdr",
            Self::Func => "func",
            Self::Hook => "hook",
            Self::Event => "event",
            Self::FuncParams => "func_params",
            Self::FuncBody => "func_body",
            Self::FormalArgs => "formal_args",
            Self::FormalArg => "formal_arg",
            Self::CaptureList => "capture_list",
            Self::Capture => "capture",
            Self::BeginLambda => "begin_lambda",
            Self::Type => "type",
            Self::TypeSpec => "type_spec",
            Self::EnumBody => "enum_body",
            Self::EnumBodyElem => "enum_body_elem",
            Self::AttrList => "attr_list",
            Self::Attr => "attr",
            Self::Initializer => "initializer",
            Self::InitClass => "init_class",
            Self::Init => "init",
            Self::StmtList => "stmt_list",
            Self::Stmt => "stmt",
            Self::CaseList => "case_list",
            Self::CaseTypeList => "case_type_list",
            Self::EventHdr => "event_hdr",
            Self::Expr => "expr",
            Self::ExprList => "expr_list",
            Self::IndexSlice => "index_slice",
            Self::Interval => "interval",
            Self::PreprocDirective => "preproc_directive",
            Self::Id => "id",
            Self::Constant => "constant",
            Self::Pattern => "pattern",
            Self::File => "file",
            Self::Nl => "nl",
            Self::MinorComment => "minor_comment",
            Self::ZeekygenHeadComment => "zeekygen_head_comment",
            Self::ZeekygenNextComment => "zeekygen_next_comment",
            Self::ZeekygenPrevComment => "zeekygen_prev_comment",
            Self::Error => "ERROR",
            Self::NullNode => "nullnode",
            Self::Token => return None,
        };
        Some(name)
    }

    /// Newlines and comments.
    #[inline]
    pub fn is_extra(self) -> bool {
        matches!(
            self,
            Self::Nl
                | Self::MinorComment
                | Self::ZeekygenHeadComment
                | Self::ZeekygenNextComment
                | Self::ZeekygenPrevComment
        )
    }

    #[inline]
    pub fn is_comment(self) -> bool {
        self.is_extra() && self != Self::Nl
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("<token>"))
    }
}

/// A node of the concrete syntax tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub symbol: Symbol,
    pub span: Span,
    /// False for extras (newlines and comments).
    pub is_ast: bool,
    /// This node is an `ERROR` or contains one.
    pub has_error: bool,
    pub parent: Option<NodeId>,
    /// AST children.
    pub children: Vec<NodeId>,
    /// Neighbours in the parent's AST child list.
    pub prev_sibling: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
    /// Neighbours in the parent's raw child sequence.
    pub prev_cst_sibling: Option<NodeId>,
    pub next_cst_sibling: Option<NodeId>,
    /// Extras preceding this AST node.
    pub prev_cst_siblings: Vec<NodeId>,
    /// Extras following this AST node.
    pub next_cst_siblings: Vec<NodeId>,
    pub is_cst_prev_node: bool,
    pub is_cst_next_node: bool,
    pub(crate) raw_children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(symbol: Symbol, span: Span) -> Self {
        Self {
            symbol,
            span,
            is_ast: !symbol.is_extra(),
            has_error: symbol == Symbol::Error,
            parent: None,
            children: Vec::new(),
            prev_sibling: None,
            next_sibling: None,
            prev_cst_sibling: None,
            next_cst_sibling: None,
            prev_cst_siblings: Vec::new(),
            next_cst_siblings: Vec::new(),
            is_cst_prev_node: false,
            is_cst_next_node: false,
            raw_children: Vec::new(),
        }
    }

    #[inline]
    pub fn is_named(&self) -> bool {
        self.symbol != Symbol::Token
    }

    /// All children in source order, extras included.
    #[inline]
    pub fn cst_children(&self) -> &[NodeId] {
        &self.raw_children
    }

    #[inline]
    pub fn is_nl(&self) -> bool {
        self.symbol == Symbol::Nl
    }

    #[inline]
    pub fn is_comment(&self) -> bool {
        self.symbol.is_comment()
    }

    #[inline]
    pub fn is_minor_comment(&self) -> bool {
        self.symbol == Symbol::MinorComment
    }

    #[inline]
    pub fn is_zeekygen_prev_comment(&self) -> bool {
        self.symbol == Symbol::ZeekygenPrevComment
    }

    #[inline]
    pub fn start_point(&self) -> Point {
        self.span.start
    }

    #[inline]
    pub fn end_point(&self) -> Point {
        self.span.end
    }
}

/// A concrete syntax tree: a node arena plus its root.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    /// Wraps a freshly built arena and runs the linking and patching passes.
    pub(crate) fn from_arena(nodes: Vec<Node>, root: NodeId) -> Self {
        let mut tree = Self { nodes, root };
        tree.link(root);
        tree.patch();
        tree
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The source text a node covers.
    pub fn text<'s>(&self, id: NodeId, source: &'s str) -> &'s str {
        let span = self.node(id).span;
        source.get(span.start_byte..span.end_byte).unwrap_or("")
    }

    /// The node's type: the symbol name for named nodes, the token text
    /// otherwise.
    pub fn type_name<'s>(&self, id: NodeId, source: &'s str) -> &'s str {
        match self.node(id).symbol.name() {
            Some(name) => name,
            None => self.text(id, source),
        }
    }

    /// The token text of an anonymous node, `None` for named nodes.
    pub fn token<'s>(&self, id: NodeId, source: &'s str) -> Option<&'s str> {
        if self.node(id).is_named() {
            None
        } else {
            Some(self.text(id, source))
        }
    }

    /// Walks backwards over raw siblings until `pred` holds.
    pub fn find_prev_cst_sibling<F>(&self, id: NodeId, pred: F) -> Option<NodeId>
    where
        F: Fn(&Node) -> bool,
    {
        let mut cur = self.node(id).prev_cst_sibling;
        while let Some(prev) = cur {
            if pred(self.node(prev)) {
                return Some(prev);
            }
            cur = self.node(prev).prev_cst_sibling;
        }
        None
    }

    /// Checks whether any node in the tree is an error node.
    #[inline]
    pub fn has_error(&self) -> bool {
        self.node(self.root).has_error
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Establishes parent and sibling links, the AST child lists and the
    /// assignment of extras to AST nodes.
    fn link(&mut self, root: NodeId) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let mut raw = std::mem::take(&mut self.node_mut(id).raw_children);
            let mut ast: Vec<NodeId> = Vec::new();

            for (i, &child) in raw.iter().enumerate() {
                let prev = if i > 0 { Some(raw[i - 1]) } else { None };
                let next = raw.get(i + 1).copied();
                let c = self.node_mut(child);
                c.parent = Some(id);
                c.prev_cst_sibling = prev;
                c.next_cst_sibling = next;
                if c.is_ast {
                    ast.push(child);
                }
            }

            // A node holding only extras gets a placeholder AST child so the
            // extras still have an owner.
            if !raw.is_empty() && ast.is_empty() {
                let end = self.node(id).span;
                let mut null = Node::new(Symbol::NullNode, Span::empty(end.end_byte, end.end));
                null.parent = Some(id);
                let null_id = self.push(null);
                raw.push(null_id);
                ast.push(null_id);
            }

            for pair in ast.windows(2) {
                self.node_mut(pair[0]).next_sibling = Some(pair[1]);
                self.node_mut(pair[1]).prev_sibling = Some(pair[0]);
            }

            self.cut_extras(&raw, ast.len());

            let node = self.node_mut(id);
            node.children = ast;
            node.raw_children = raw;

            stack.extend(self.node(id).children.iter().rev().copied());
        }

        self.propagate_errors(root);
    }

    /// Error flags are computed bottom-up, in reverse preorder. A skipped
    /// token sits among the extras of the AST node next to it, so that node
    /// counts as containing it.
    fn propagate_errors(&mut self, root: NodeId) {
        let order: Vec<NodeId> = crate::traverse::Traverse::from_node(self, root, false)
            .map(|(id, _)| id)
            .collect();
        for &id in order.iter().rev() {
            let node = self.node(id);
            let is_error = |&c: &NodeId| self.node(c).symbol == Symbol::Error;
            let has_error = node.symbol == Symbol::Error
                || node.children.iter().any(|&c| self.node(c).has_error)
                || node.prev_cst_siblings.iter().any(is_error)
                || node.next_cst_siblings.iter().any(is_error);
            self.node_mut(id).has_error = has_error;
        }
    }

    /// Distributes the extras among a node's raw children onto the AST
    /// children around them.
    ///
    /// After an AST node only `##<` comments, a minor comment directly
    /// following it, and a newline directly following a comment stay with
    /// it. Anything else starts the leading extras of the next AST node.
    /// Once no AST node follows, the rest trails the last one.
    fn cut_extras(&mut self, raw: &[NodeId], num_ast: usize) {
        let mut ast_node: Option<NodeId> = None;
        let mut remaining = num_ast;
        let mut prevs: Vec<NodeId> = Vec::new();
        let mut last_child: Option<NodeId> = None;

        for &child in raw {
            let (is_ast, is_prev_comment, is_minor, is_nl) = {
                let c = self.node(child);
                (c.is_ast, c.is_zeekygen_prev_comment(), c.is_minor_comment(), c.is_nl())
            };
            let last_is_ast = last_child.is_some_and(|l| self.node(l).is_ast);
            let last_is_comment = last_child.is_some_and(|l| self.node(l).is_comment());

            match ast_node {
                Some(owner) if remaining == 0 => self.attach_next(owner, child),
                _ if is_ast => {
                    remaining -= 1;
                    self.node_mut(child).prev_cst_siblings = std::mem::take(&mut prevs);
                    ast_node = Some(child);
                }
                None => {
                    prevs.push(child);
                    self.node_mut(child).is_cst_prev_node = true;
                }
                Some(owner) if is_prev_comment => self.attach_next(owner, child),
                Some(owner) if is_minor && last_is_ast => self.attach_next(owner, child),
                Some(owner) if is_nl && last_is_comment => self.attach_next(owner, child),
                Some(_) => {
                    ast_node = None;
                    prevs = vec![child];
                    self.node_mut(child).is_cst_prev_node = true;
                }
            }
            last_child = Some(child);
        }
    }

    fn attach_next(&mut self, owner: NodeId, child: NodeId) {
        self.node_mut(owner).next_cst_siblings.push(child);
        self.node_mut(child).is_cst_next_node = true;
    }

    /// Moves trailing extras of a node down onto its last child, recursively,
    /// so a comment after `;` trails the `;` token rather than the whole
    /// statement. Error nodes keep their extras since they are rendered as
    /// opaque text.
    fn patch(&mut self) {
        let order: Vec<NodeId> = crate::traverse::Traverse::new(self, false)
            .map(|(id, _)| id)
            .collect();

        for id in order {
            let node = self.node(id);
            if node.next_cst_siblings.is_empty()
                || node.children.is_empty()
                || node.symbol == Symbol::Error
            {
                continue;
            }
            let Some(&last) = node.children.last() else {
                continue;
            };
            let moved = std::mem::take(&mut self.node_mut(id).next_cst_siblings);
            self.node_mut(id).next_cst_sibling = None;

            if let (Some(&tail), Some(&first)) =
                (self.node(last).next_cst_siblings.last(), moved.first())
            {
                self.node_mut(tail).next_cst_sibling = Some(first);
                self.node_mut(first).prev_cst_sibling = Some(tail);
            }
            self.node_mut(last).next_cst_siblings.extend(moved);
        }
    }
}
