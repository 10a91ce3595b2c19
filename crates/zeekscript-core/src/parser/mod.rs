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

//! Error-tolerant recursive-descent parser for Zeek scripts.
//!
//! The parser builds the concrete syntax tree directly. Productions open a
//! frame on a stack, consume tokens into it and close it into an arena
//! node. Binary and postfix operators re-parent the operand they follow via
//! [`Parser::wrap_last`], which keeps the tree shape left-associative
//! without recursion per operator.
//!
//! Newlines and comments never reach the grammar. Whenever a significant
//! token is consumed, the extras lexed before it are placed into the
//! deepest open frame that already contains the previous significant
//! token, i.e. the lowest node enclosing both neighbours.
//!
//! Declarations, statements and record fields are parsed under a
//! checkpoint. If one fails, the builder rewinds and the tokens up to the
//! next synchronization point become an `ERROR` node, then parsing
//! continues.

mod decl;
mod expr;
mod stmt;
mod types;

use tracing::debug;

use crate::error::ZeekError;
use crate::lex::{CommentKind, Point, Span, Token, TokenKind};
use crate::limits::ParseLimits;
use crate::tree::{Node, NodeId, Symbol, Tree};

/// Why a production could not be completed.
#[derive(Debug)]
pub(crate) enum ParseFailure {
    /// The input does not match; recoverable.
    Syntax,
    /// A resource limit was hit; aborts the whole parse.
    Limit(ZeekError),
}

pub(crate) type PResult<T> = Result<T, ParseFailure>;

/// Where error recovery stops skipping tokens.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Sync {
    /// Stop before a `}` that closes the enclosing block.
    stop_at_close: bool,
    /// Stop before a token that starts a new declaration.
    stop_at_decl: bool,
}

impl Sync {
    pub(crate) const TOP_LEVEL: Sync = Sync {
        stop_at_close: false,
        stop_at_decl: true,
    };
    pub(crate) const EXPORT: Sync = Sync {
        stop_at_close: true,
        stop_at_decl: true,
    };
    pub(crate) const BLOCK: Sync = Sync {
        stop_at_close: true,
        stop_at_decl: false,
    };
}

struct Frame {
    symbol: Symbol,
    children: Vec<NodeId>,
    /// Index of the first significant token this frame may contain.
    open_at: usize,
}

/// Builder state to return to when a production fails.
struct Checkpoint {
    arena_len: usize,
    frame_lens: Vec<usize>,
    pos: usize,
    skipped_len: usize,
}

/// Statements retried with a single token left out, per parse.
const MAX_TOKEN_SKIPS: usize = 256;

pub(crate) struct Parser<'s> {
    src: &'s str,
    tokens: Vec<Token>,
    /// Indices into `tokens` of the non-extra tokens.
    sig: Vec<usize>,
    /// Next significant token, as an index into `sig`.
    pos: usize,
    arena: Vec<Node>,
    stack: Vec<Frame>,
    limits: ParseLimits,
    depth: usize,
    /// Furthest position in `sig` reached by the innermost production under
    /// recovery; the token there is the one that failed it.
    furthest: usize,
    /// Tokens taken out of `sig` by error recovery, as (position, token
    /// index) in removal order.
    skipped: Vec<(usize, usize)>,
    skips_left: usize,
}

/// Parses `source` into a concrete syntax tree.
///
/// Syntax errors never fail the parse; they become `ERROR` nodes, see
/// [`Tree::has_error`].
///
/// # Errors
///
/// Returns a security error when the input exceeds `limits`.
pub fn parse_tree(source: &str, limits: &ParseLimits) -> Result<Tree, ZeekError> {
    if source.len() > limits.max_file_size {
        return Err(ZeekError::security(
            format!(
                "source size {} exceeds limit of {} bytes",
                source.len(),
                limits.max_file_size
            ),
            0,
        ));
    }

    let tokens = crate::lex::tokenize(source);
    let mut parser = Parser::new(source, tokens, limits.clone());
    parser.parse_source_file()?;
    let tree = parser.finish();
    debug!(nodes = tree.len(), has_error = tree.has_error(), "built syntax tree");
    Ok(tree)
}

impl<'s> Parser<'s> {
    fn new(src: &'s str, tokens: Vec<Token>, limits: ParseLimits) -> Self {
        let sig = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.kind.is_extra())
            .map(|(i, _)| i)
            .collect();
        Self {
            src,
            tokens,
            sig,
            pos: 0,
            arena: Vec::new(),
            stack: vec![Frame {
                symbol: Symbol::SourceFile,
                children: Vec::new(),
                open_at: 0,
            }],
            limits,
            depth: 0,
            furthest: 0,
            skipped: Vec::new(),
            skips_left: MAX_TOKEN_SKIPS,
        }
    }

    fn parse_source_file(&mut self) -> Result<(), ZeekError> {
        while !self.at_eof() {
            let result = self.recover(Symbol::Decl, Sync::TOP_LEVEL, |p| {
                if p.at_decl_start() {
                    p.parse_decl()
                } else {
                    p.parse_stmt()
                }
            });
            match result {
                // The body of a broken declaration: only its opening brace
                // is an error, the statements inside parse on their own.
                Ok(true) if self.at("{") => {
                    self.open(Symbol::Decl);
                    self.open(Symbol::Error);
                    self.bump(Symbol::Token);
                    self.close();
                    self.close();
                }
                Err(ParseFailure::Limit(err)) => return Err(err),
                _ => {}
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Tree {
        let tail_start = self.sig.last().map_or(0, |&i| i + 1);
        for i in tail_start..self.tokens.len() {
            let id = self.push_leaf(i);
            self.stack[0].children.push(id);
        }

        let mut end = Point::default();
        end.advance(self.src);
        let mut root = Node::new(Symbol::SourceFile, Span::new(0, self.src.len(), Point::default(), end));
        if let Some(frame) = self.stack.first_mut() {
            root.raw_children = std::mem::take(&mut frame.children);
        }
        let root_id = NodeId(self.arena.len() as u32);
        self.arena.push(root);
        Tree::from_arena(self.arena, root_id)
    }

    // ===== Token access =====

    #[inline]
    fn token(&self, n: usize) -> Option<Token> {
        self.sig.get(self.pos + n).map(|&i| self.tokens[i])
    }

    #[inline]
    fn at_eof(&self) -> bool {
        self.pos >= self.sig.len()
    }

    /// Text of the n-th upcoming significant token, empty at end of input.
    #[inline]
    fn peek_text(&self, n: usize) -> &'s str {
        let src = self.src;
        self.token(n).map_or("", |t| t.text(src))
    }

    #[inline]
    fn peek_kind(&self, n: usize) -> Option<TokenKind> {
        self.token(n).map(|t| t.kind)
    }

    /// Checks for a keyword or punctuation token with the given text.
    fn at_nth(&self, n: usize, text: &str) -> bool {
        matches!(self.peek_kind(n), Some(TokenKind::Keyword | TokenKind::Punct)) && self.peek_text(n) == text
    }

    #[inline]
    fn at(&self, text: &str) -> bool {
        self.at_nth(0, text)
    }

    #[inline]
    fn at_kind(&self, kind: TokenKind) -> bool {
        self.peek_kind(0) == Some(kind)
    }

    fn at_any(&self, texts: &[&str]) -> bool {
        texts.iter().any(|t| self.at(t))
    }

    /// Index of the token closing the bracket at offset `n`, relative to
    /// the current position.
    fn matching_close(&self, n: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut i = n;
        while let Some(tok) = self.token(i) {
            if tok.kind == TokenKind::Punct {
                match tok.text(self.src) {
                    "(" | "[" | "{" => depth += 1,
                    ")" | "]" | "}" => {
                        depth = depth.saturating_sub(1);
                        if depth == 0 {
                            return Some(i);
                        }
                    }
                    _ => {}
                }
            }
            i += 1;
        }
        None
    }

    // ===== Tree building =====

    fn push_leaf(&mut self, token_index: usize) -> NodeId {
        let tok = self.tokens[token_index];
        if self.skipped.iter().any(|&(_, i)| i == token_index) {
            let mut node = Node::new(Symbol::Error, tok.span);
            node.is_ast = false;
            return self.push_node(node);
        }
        let symbol = match tok.kind {
            TokenKind::Newline => Symbol::Nl,
            TokenKind::Comment(CommentKind::Minor) => Symbol::MinorComment,
            TokenKind::Comment(CommentKind::ZeekygenHead) => Symbol::ZeekygenHeadComment,
            TokenKind::Comment(CommentKind::ZeekygenNext) => Symbol::ZeekygenNextComment,
            TokenKind::Comment(CommentKind::ZeekygenPrev) => Symbol::ZeekygenPrevComment,
            TokenKind::Ident => Symbol::Id,
            TokenKind::Constant(_) => Symbol::Constant,
            TokenKind::Pattern => Symbol::Pattern,
            TokenKind::DirectiveArg => Symbol::File,
            _ => Symbol::Token,
        };
        self.push_node(Node::new(symbol, tok.span))
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.arena.len() as u32);
        self.arena.push(node);
        id
    }

    /// Places the extras preceding the current token into the deepest frame
    /// that already holds the previous significant token.
    fn flush_extras(&mut self) {
        let Some(&cur) = self.sig.get(self.pos) else {
            return;
        };
        let start = if self.pos == 0 { 0 } else { self.sig[self.pos - 1] + 1 };
        if start >= cur {
            return;
        }
        let target = self
            .stack
            .iter()
            .rposition(|f| f.open_at < self.pos)
            .unwrap_or(0);
        for i in start..cur {
            let id = self.push_leaf(i);
            self.stack[target].children.push(id);
        }
    }

    /// Consumes the current token as a leaf of the given symbol.
    fn bump(&mut self, symbol: Symbol) {
        let Some(&index) = self.sig.get(self.pos) else {
            return;
        };
        self.flush_extras();
        let span = self.tokens[index].span;
        let id = self.push_node(Node::new(symbol, span));
        if let Some(frame) = self.stack.last_mut() {
            frame.children.push(id);
        }
        self.pos += 1;
        self.furthest = self.furthest.max(self.pos);
    }

    /// Consumes a keyword or punctuation token with the given text.
    fn expect(&mut self, text: &str) -> PResult<()> {
        if self.at(text) {
            self.bump(Symbol::Token);
            Ok(())
        } else {
            Err(ParseFailure::Syntax)
        }
    }

    /// Consumes an identifier.
    fn expect_id(&mut self) -> PResult<()> {
        if self.at_kind(TokenKind::Ident) {
            self.bump(Symbol::Id);
            Ok(())
        } else {
            Err(ParseFailure::Syntax)
        }
    }

    fn open(&mut self, symbol: Symbol) {
        self.stack.push(Frame {
            symbol,
            children: Vec::new(),
            open_at: self.pos,
        });
    }

    /// Closes the innermost frame into a node. Empty frames vanish.
    fn close(&mut self) -> Option<NodeId> {
        if self.stack.len() <= 1 {
            return None;
        }
        let frame = self.stack.pop()?;
        let first = *frame.children.first()?;
        let last = *frame.children.last()?;
        let span = self.arena[first.index()]
            .span
            .merge(self.arena[last.index()].span);
        let mut node = Node::new(frame.symbol, span);
        node.raw_children = frame.children;
        let id = self.push_node(node);
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(id);
        }
        Some(id)
    }

    /// Opens a frame that adopts the last child of the current frame, for
    /// operators that follow their first operand.
    fn wrap_last(&mut self, symbol: Symbol) {
        let child = self.stack.last_mut().and_then(|f| f.children.pop());
        self.stack.push(Frame {
            symbol,
            children: child.into_iter().collect(),
            open_at: self.pos.saturating_sub(1),
        });
    }

    /// Guards recursion depth. Pair every successful call with `leave`.
    fn enter(&mut self) -> PResult<()> {
        self.depth += 1;
        if self.depth > self.limits.max_nesting_depth {
            self.depth -= 1;
            let line = self.token(0).map_or(0, |t| t.span.start.row);
            return Err(ParseFailure::Limit(ZeekError::security(
                format!("nesting depth exceeds limit of {}", self.limits.max_nesting_depth),
                line,
            )));
        }
        Ok(())
    }

    #[inline]
    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // ===== Error recovery =====

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            arena_len: self.arena.len(),
            frame_lens: self.stack.iter().map(|f| f.children.len()).collect(),
            pos: self.pos,
            skipped_len: self.skipped.len(),
        }
    }

    fn rewind(&mut self, cp: &Checkpoint) {
        self.arena.truncate(cp.arena_len);
        self.stack.truncate(cp.frame_lens.len());
        for (frame, &len) in self.stack.iter_mut().zip(&cp.frame_lens) {
            frame.children.truncate(len);
        }
        while self.skipped.len() > cp.skipped_len {
            if let Some((at, index)) = self.skipped.pop() {
                self.sig.insert(at, index);
            }
        }
        self.pos = cp.pos;
    }

    /// Runs `production`. On a syntax error, a statement is first retried
    /// without the token that failed it, which then becomes an `ERROR`
    /// extra. Otherwise the tokens through the failing one, up to the next
    /// synchronization point, become `wrapper > ERROR`.
    ///
    /// Returns whether the production ended up as an `ERROR` node.
    fn recover<F>(&mut self, wrapper: Symbol, sync: Sync, production: F) -> PResult<bool>
    where
        F: Fn(&mut Self) -> PResult<()>,
    {
        let outer_furthest = self.furthest;
        let result = self.attempt(wrapper, sync, &production);
        self.furthest = self.furthest.max(outer_furthest);
        result
    }

    fn attempt<F>(&mut self, wrapper: Symbol, sync: Sync, production: &F) -> PResult<bool>
    where
        F: Fn(&mut Self) -> PResult<()>,
    {
        let cp = self.checkpoint();
        self.furthest = self.pos;
        match production(self) {
            Err(ParseFailure::Syntax) => {}
            other => return other.map(|()| false),
        }
        // Tokens skipped inside the attempt come back on rewind, so the
        // failing token is tracked by index rather than position.
        let failed_token = self.sig.get(self.furthest).copied();
        let leading = self.leading_production(cp.frame_lens.len());
        self.rewind(&cp);
        let failed_at = failed_token
            .and_then(|index| self.sig.binary_search(&index).ok())
            .unwrap_or(self.sig.len());

        if let Some(tok) = self.token(0) {
            debug!(
                line = tok.span.start.row,
                column = tok.span.start.column,
                "recovering from syntax error"
            );
        }

        if wrapper == Symbol::Stmt && failed_at > cp.pos && self.skip_token(failed_at) {
            match production(self) {
                Err(ParseFailure::Syntax) => self.rewind(&cp),
                other => return other.map(|()| false),
            }
        }

        self.open(wrapper);
        self.open(Symbol::Error);
        let kept = self.restore_production(leading);
        self.skip_to_sync(sync, failed_at, kept);
        self.close();
        self.close();
        Ok(true)
    }

    /// Takes the significant token at `at` out of the input, unless it is a
    /// brace or the skip allowance is used up.
    fn skip_token(&mut self, at: usize) -> bool {
        let Some(&index) = self.sig.get(at) else {
            return false;
        };
        if self.skips_left == 0 || matches!(self.tokens[index].text(self.src), "{" | "}") {
            return false;
        }
        self.skips_left -= 1;
        self.sig.remove(at);
        self.skipped.push((at, index));
        true
    }

    /// The first complete sub-production of a failed attempt, found in the
    /// outermost of its frames that holds any AST node. Bare tokens do not
    /// count. Returns the nodes of that subtree in arena order.
    fn leading_production(&self, base: usize) -> Option<Vec<Node>> {
        let first = self.stack.get(base..)?.iter().find_map(|f| {
            f.children
                .iter()
                .copied()
                .find(|&c| self.arena[c.index()].is_ast)
        })?;
        if self.arena[first.index()].raw_children.is_empty() {
            return None;
        }

        let mut ids = Vec::new();
        let mut stack = vec![first];
        while let Some(id) = stack.pop() {
            ids.push(id);
            stack.extend(self.arena[id.index()].raw_children.iter().copied());
        }
        ids.sort_unstable();

        let nodes = ids
            .iter()
            .map(|id| {
                let mut node = self.arena[id.index()].clone();
                for child in &mut node.raw_children {
                    let offset = ids.binary_search(child).unwrap_or_default();
                    *child = NodeId(offset as u32);
                }
                node
            })
            .collect();
        Some(nodes)
    }

    /// Re-adds a subtree saved by `leading_production` to the current frame
    /// and moves past its tokens.
    fn restore_production(&mut self, nodes: Option<Vec<Node>>) -> bool {
        let Some(nodes) = nodes else {
            return false;
        };
        let Some(end) = nodes.last().map(|n| n.span.end_byte) else {
            return false;
        };
        self.flush_extras();
        let base = self.arena.len() as u32;
        let mut root = None;
        for mut node in nodes {
            for child in &mut node.raw_children {
                *child = NodeId(child.0 + base);
            }
            root = Some(self.push_node(node));
        }
        if let (Some(root), Some(frame)) = (root, self.stack.last_mut()) {
            frame.children.push(root);
        }
        let tokens = &self.tokens;
        self.pos = self.sig.partition_point(|&i| tokens[i].span.end_byte <= end);
        true
    }

    /// Consumes the tokens of a failed production: at least one, through the
    /// token at `failed_at`, then on to a `;` at brace depth zero or a `}`
    /// that returns to depth zero. Stops early before a `}` closing the
    /// enclosing block or a declaration start, as `sync` asks, and before a
    /// `{` that follows the failing token.
    fn skip_to_sync(&mut self, sync: Sync, failed_at: usize, consumed: bool) {
        let mut depth = 0usize;
        let mut consumed = consumed;

        while let Some(tok) = self.token(0) {
            let text = self.peek_text(0);
            let is_punct = tok.kind == TokenKind::Punct;

            if consumed && depth == 0 {
                if sync.stop_at_close && is_punct && text == "}" {
                    break;
                }
                if sync.stop_at_decl && self.at_decl_start() {
                    break;
                }
                if self.pos > failed_at && is_punct && text == "{" {
                    break;
                }
            }

            let symbol = match tok.kind {
                TokenKind::Ident => Symbol::Id,
                TokenKind::Constant(_) => Symbol::Constant,
                TokenKind::Pattern => Symbol::Pattern,
                TokenKind::DirectiveArg => Symbol::File,
                _ => Symbol::Token,
            };
            self.bump(symbol);
            consumed = true;

            if is_punct {
                match text {
                    "{" => depth += 1,
                    "}" => {
                        if depth <= 1 {
                            break;
                        }
                        depth -= 1;
                    }
                    ";" if depth == 0 => break,
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(src: &str) -> Tree {
        parse_tree(src, &ParseLimits::default()).unwrap()
    }

    /// Renders the AST as nested `type` names for compact assertions.
    fn sexp(src: &str) -> String {
        let t = tree(src);
        fn render(t: &Tree, id: NodeId, src: &str, out: &mut String) {
            let node = t.node(id);
            if node.children.is_empty() {
                out.push_str(t.type_name(id, src));
                return;
            }
            out.push('(');
            out.push_str(t.type_name(id, src));
            for &c in &node.children {
                out.push(' ');
                render(t, c, src, out);
            }
            out.push(')');
        }
        let mut out = String::new();
        render(&t, t.root(), src, &mut out);
        out
    }

    // ==================== Builder ====================

    #[test]
    fn test_empty_source() {
        let t = tree("");
        let root = t.node(t.root());
        assert_eq!(root.symbol, Symbol::SourceFile);
        assert!(root.children.is_empty());
        assert!(!t.has_error());
    }

    #[test]
    fn test_comment_only_source_gets_nullnode() {
        let t = tree("# just a comment\n");
        let root = t.node(t.root());
        assert_eq!(root.children.len(), 1);
        let null = t.node(root.children[0]);
        assert_eq!(null.symbol, Symbol::NullNode);
        assert_eq!(null.prev_cst_siblings.len(), 2);
    }

    #[test]
    fn test_extras_go_to_lowest_enclosing_node() {
        let src = "event e()\n\t{\n\tx = 1;\n\t}\n";
        let t = tree(src);
        // The newline after `{` sits in func_body, between `{` and stmt_list.
        let body = crate::traverse::Traverse::new(&t, false)
            .map(|(id, _)| id)
            .find(|&id| t.node(id).symbol == Symbol::FuncBody)
            .unwrap();
        let raw: Vec<_> = t
            .node(body)
            .cst_children()
            .iter()
            .map(|&c| t.type_name(c, src))
            .collect();
        assert_eq!(raw, vec!["{", "nl", "stmt_list", "nl", "}"]);
    }

    #[test]
    fn test_binary_left_associative() {
        assert_eq!(
            sexp("a + b + c;"),
            "(source_file (stmt (expr (expr (expr id) + (expr id)) + (expr id)) ;))"
        );
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            sexp("a || b && c;"),
            "(source_file (stmt (expr (expr id) || (expr (expr id) && (expr id))) ;))"
        );
        assert_eq!(
            sexp("x = 1 + 2 * 3;"),
            "(source_file (stmt (expr (expr id) = (expr (expr constant) + (expr (expr constant) * (expr constant)))) ;))"
        );
    }

    // ==================== Recovery ====================

    #[test]
    fn test_recovery_at_top_level() {
        let t = tree("global = ;\nglobal y = 2;\n");
        assert!(t.has_error());
        let root = t.node(t.root());
        assert_eq!(root.children.len(), 2);
        let first = t.node(root.children[0]);
        assert_eq!(first.symbol, Symbol::Decl);
        assert_eq!(t.node(first.children[0]).symbol, Symbol::Error);
        let second = t.node(root.children[1]);
        assert!(!second.has_error);
    }

    #[test]
    fn test_recovery_stops_before_declaration() {
        let src = "xxx  function foo() { }";
        let t = tree(src);
        let root = t.node(t.root());
        assert_eq!(root.children.len(), 2);
        let err = t.node(root.children[0]).children[0];
        assert_eq!(t.text(err, src), "xxx");
        assert!(!t.node(root.children[1]).has_error);
    }

    #[test]
    fn test_recovery_skips_single_token() {
        let src = "event zeek_init() { foo)(); print 1; }";
        let t = tree(src);
        assert!(t.has_error());
        let errors: Vec<_> = crate::traverse::Traverse::new(&t, true)
            .map(|(id, _)| id)
            .filter(|&id| t.node(id).symbol == Symbol::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(t.text(errors[0], src), ")");
        assert!(!t.node(errors[0]).is_ast);
        assert_eq!(t.text(t.node(errors[0]).parent.unwrap(), src), "foo)()");
    }

    #[test]
    fn test_recovery_inside_block() {
        let src = "event zeek_init() { foo bar baz; print 1; }";
        let t = tree(src);
        let errors: Vec<_> = crate::traverse::Traverse::new(&t, true)
            .map(|(id, _)| id)
            .filter(|&id| t.node(id).symbol == Symbol::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        let err = t.node(errors[0]);
        assert_eq!(t.text(errors[0], src), "foo bar baz;");
        assert_eq!(t.node(err.parent.unwrap()).symbol, Symbol::Stmt);
        // The expression that did parse is kept as a subtree.
        assert_eq!(t.node(err.children[0]).symbol, Symbol::Expr);
        assert_eq!(t.node(err.children[1]).symbol, Symbol::Id);
    }

    #[test]
    fn test_recovery_leaves_body_of_broken_function() {
        let src = "function foo) { print 1; }";
        let t = tree(src);
        let root = t.node(t.root());
        let items: Vec<_> = root.children.iter().map(|&d| t.node(d)).collect();
        assert_eq!(items.len(), 4);
        assert_eq!(t.text(items[0].children[0], src), "function foo)");
        assert_eq!(t.text(items[1].children[0], src), "{");
        assert_eq!(items[2].symbol, Symbol::Stmt);
        assert!(!items[2].has_error);
        assert_eq!(t.text(items[3].children[0], src), "}");
        assert_eq!(t.node(items[3].children[0]).symbol, Symbol::Error);
    }

    #[test]
    fn test_recovery_in_record_body() {
        let src = "type foo: record {\n\ta: count;\n\tb count;\n\tc: count;\n};\n";
        let t = tree(src);
        let err = crate::traverse::Traverse::new(&t, false)
            .map(|(id, _)| id)
            .find(|&id| t.node(id).symbol == Symbol::Error)
            .unwrap();
        assert_eq!(t.text(err, src), "b count;");
        assert_eq!(t.node(t.node(err).parent.unwrap()).symbol, Symbol::TypeSpec);
    }

    #[test]
    fn test_unterminated_tail() {
        let src = "function foo( )  { if (";
        let t = tree(src);
        let root = t.node(t.root());
        assert_eq!(root.children.len(), 1);
        let err = t.node(root.children[0]).children[0];
        assert_eq!(t.node(err).symbol, Symbol::Error);
        assert_eq!(t.text(err, src), src);
        let hdr = t.node(err).children[0];
        assert_eq!(t.node(hdr).symbol, Symbol::FuncHdr);
        assert_eq!(t.text(hdr, src), "function foo( )");
    }

    #[test]
    fn test_nesting_limit() {
        let src = format!("x = {}1{};", "(".repeat(40), ")".repeat(40));
        let limits = ParseLimits {
            max_nesting_depth: 16,
            ..ParseLimits::default()
        };
        let err = parse_tree(&src, &limits).unwrap_err();
        assert_eq!(err.kind, crate::ZeekErrorKind::Security);
    }

    #[test]
    fn test_binary_chain_counts_toward_nesting_limit() {
        let src = format!("global x = 1{};", " + 1".repeat(100_000));
        let err = parse_tree(&src, &ParseLimits::default()).unwrap_err();
        assert_eq!(err.kind, crate::ZeekErrorKind::Security);

        let src = format!("global x = 1{};", " + 1".repeat(50));
        assert!(!parse_tree(&src, &ParseLimits::default()).unwrap().has_error());
    }

    #[test]
    fn test_postfix_chain_counts_toward_nesting_limit() {
        let src = format!("x = r{};", "$f".repeat(1_000));
        let err = parse_tree(&src, &ParseLimits::default()).unwrap_err();
        assert_eq!(err.kind, crate::ZeekErrorKind::Security);
    }

    #[test]
    fn test_length_then_division() {
        let t = tree("event zeek_init() { local n = |s| / 2; }");
        assert!(!t.has_error());
    }

    #[test]
    fn test_file_size_limit() {
        let limits = ParseLimits {
            max_file_size: 4,
            ..ParseLimits::default()
        };
        assert!(parse_tree("global x = 1;", &limits).is_err());
    }
}
