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

//! Per-symbol formatting of a parsed script.
//!
//! [`Formatter`] walks the tree top-down. The routine for a node is picked
//! by its symbol; it consumes the node's AST children in order through the
//! cursor in [`Ctx`], writes the spacing and newlines between them, and
//! passes layout hints on to the [`OutputStream`]. The CST extras attached
//! to a child (comments and newlines) are formatted right around it.

mod comment;
mod decl;
mod expr;
mod stmt;

use std::io::{self, Write};

use zeekscript_core::{Node, NodeId, Symbol, Tree};

use crate::config::FormatConfig;
use crate::hint::Hints;
use crate::output::OutputStream;

/// Formatting state of the node currently being written.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Ctx {
    id: NodeId,
    indent: usize,
    hints: Hints,
    /// Next AST child to format.
    cidx: usize,
}

pub(crate) struct Formatter<'a, W: Write> {
    src: &'a str,
    tree: &'a Tree,
    out: OutputStream<W>,
    /// Output column of every `##<` comment written so far.
    prev_comment_cols: Vec<Option<usize>>,
}

impl<'a, W: Write> Formatter<'a, W> {
    pub(crate) fn new(src: &'a str, tree: &'a Tree, out: W, config: FormatConfig) -> Self {
        Self {
            src,
            tree,
            out: OutputStream::new(out, config),
            prev_comment_cols: vec![None; tree.len()],
        }
    }

    /// Formats the whole tree and hands back the writer.
    pub(crate) fn run(mut self) -> io::Result<W> {
        self.format_node(self.tree.root(), 0, Hints::NONE)?;
        self.out.finish()
    }

    fn format_node(&mut self, id: NodeId, indent: usize, hints: Hints) -> io::Result<()> {
        let mut cx = Ctx {
            id,
            indent,
            hints,
            cidx: 0,
        };
        let cx = &mut cx;

        match self.node(id).symbol {
            Symbol::Token => self.format_default(cx),
            Symbol::NullNode => Ok(()),
            Symbol::Decl => self.format_decl(cx),
            Symbol::PreprocDirective => self.format_preproc_directive(cx),
            Symbol::ModuleDecl => self.format_module_decl(cx),
            Symbol::ExportDecl => self.format_export_decl(cx),
            Symbol::GlobalDecl | Symbol::OptionDecl | Symbol::ConstDecl | Symbol::RedefDecl => {
                self.format_global_decl(cx)
            }
            Symbol::Initializer => self.format_initializer(cx),
            Symbol::Init => self.format_init(cx),
            Symbol::RedefEnumDecl => self.format_redef_enum_decl(cx),
            Symbol::RedefRecordDecl => self.format_redef_record_decl(cx),
            Symbol::TypeDecl => self.format_type_decl(cx),
            Symbol::Type => self.format_type(cx),
            Symbol::TypeSpec => self.format_type_spec(cx),
            Symbol::EnumBody => self.format_enum_body(cx),
            Symbol::FuncDecl => self.format_func_decl(cx),
            Symbol::Func | Symbol::Hook | Symbol::Event => self.format_func_hdr_variant(cx),
            Symbol::FuncParams => self.format_func_params(cx),
            Symbol::FuncBody => self.format_func_body(cx),
            Symbol::FormalArgs => self.format_formal_args(cx),
            Symbol::FormalArg => self.format_formal_arg(cx),
            Symbol::CaptureList => self.format_capture_list(cx),
            Symbol::Capture | Symbol::AttrList | Symbol::Interval => {
                self.format_space_separated(cx)
            }
            Symbol::Attr => self.format_attr(cx),
            Symbol::Stmt => self.format_stmt(cx),
            Symbol::ExprList => self.format_expr_list(cx),
            Symbol::CaseList => self.format_case_list(cx),
            Symbol::CaseTypeList => self.format_case_type_list(cx),
            Symbol::EventHdr => self.format_event_hdr(cx),
            Symbol::Expr => self.format_expr(cx),
            Symbol::Nl => self.format_nl(cx),
            Symbol::MinorComment => {
                cx.hints |= Hints::ZERO_WIDTH;
                self.format_minor_comment(cx)
            }
            Symbol::ZeekygenHeadComment | Symbol::ZeekygenNextComment => {
                cx.hints |= Hints::ZERO_WIDTH;
                self.format_zeekygen_comment(cx)
            }
            Symbol::ZeekygenPrevComment => {
                cx.hints |= Hints::ZERO_WIDTH;
                self.format_zeekygen_prev_comment(cx)
            }
            Symbol::Error => self.format_error(cx),
            _ => self.format_default(cx),
        }
    }

    // ===== Generic layouts =====

    fn format_default(&mut self, cx: &mut Ctx) -> io::Result<()> {
        if self.node(cx.id).children.is_empty() {
            self.token(cx)
        } else {
            self.children(cx, None)
        }
    }

    fn format_space_separated(&mut self, cx: &mut Ctx) -> io::Result<()> {
        if self.node(cx.id).children.is_empty() {
            self.token(cx)
        } else {
            self.children(cx, Some(" "))
        }
    }

    /// Space-separated children, then a newline.
    fn format_line(&mut self, cx: &mut Ctx) -> io::Result<()> {
        if self.node(cx.id).children.is_empty() {
            return self.token(cx);
        }
        self.children(cx, Some(" "))?;
        self.nl(cx)
    }

    /// Unparseable input is reproduced as is and never broken up. A single
    /// skipped token stands apart from its neighbours. When the error starts
    /// with a production that did parse, that part is formatted normally.
    fn format_error(&mut self, cx: &mut Ctx) -> io::Result<()> {
        cx.hints |= Hints::NO_LB_BEFORE | Hints::NO_LB_AFTER;
        let node = self.node(cx.id);
        if !node.is_ast {
            self.sp(cx)?;
            self.token(cx)?;
            return self.sp(cx);
        }

        let leading = node
            .children
            .first()
            .copied()
            .filter(|&c| !self.node(c).children.is_empty());
        let Some(leading) = leading else {
            return self.token(cx);
        };
        // Extras around the leading production are part of the raw text.
        self.format_node(leading, cx.indent, Hints::NO_LB_AFTER)?;
        let rest = self
            .src
            .get(self.node(leading).span.end_byte..node.span.end_byte)
            .unwrap_or("");
        self.write(cx, rest)
    }

    // ===== Child access =====

    #[inline]
    fn node(&self, id: NodeId) -> &'a Node {
        self.tree.node(id)
    }

    /// The AST child `offset` positions past the cursor.
    fn child_at(&self, cx: &Ctx, offset: usize) -> Option<NodeId> {
        self.node(cx.id).children.get(cx.cidx + offset).copied()
    }

    #[inline]
    fn has_child(&self, cx: &Ctx) -> bool {
        self.child_at(cx, 0).is_some()
    }

    /// Symbol of a named child; `None` for tokens and past the end.
    fn child_symbol(&self, cx: &Ctx, offset: usize) -> Option<Symbol> {
        self.child_at(cx, offset)
            .map(|id| self.node(id))
            .filter(|n| n.is_named())
            .map(|n| n.symbol)
    }

    #[inline]
    fn child_is(&self, cx: &Ctx, symbol: Symbol) -> bool {
        self.child_symbol(cx, 0) == Some(symbol)
    }

    /// Text of an anonymous child; `None` for named nodes and past the end.
    fn child_token(&self, cx: &Ctx, offset: usize) -> Option<&'a str> {
        self.child_at(cx, offset)
            .and_then(|id| self.tree.token(id, self.src))
    }

    /// Whether the next child's own first child is the given token, e.g. a
    /// statement that is a `{ ... }` block.
    fn child_starts_with(&self, cx: &Ctx, token: &str) -> bool {
        self.child_at(cx, 0)
            .and_then(|id| self.node(id).children.first().copied())
            .and_then(|first| self.tree.token(first, self.src))
            == Some(token)
    }

    // ===== Child formatting =====

    #[inline]
    fn child(&mut self, cx: &mut Ctx) -> io::Result<()> {
        self.child_with(cx, false, Hints::NONE)
    }

    #[inline]
    fn child_hinted(&mut self, cx: &mut Ctx, hints: Hints) -> io::Result<()> {
        self.child_with(cx, false, hints)
    }

    #[inline]
    fn child_indented(&mut self, cx: &mut Ctx) -> io::Result<()> {
        self.child_with(cx, true, Hints::NONE)
    }

    /// Formats the next AST child together with its surrounding extras.
    /// Hints apply to the AST node only.
    fn child_with(&mut self, cx: &mut Ctx, indent: bool, hints: Hints) -> io::Result<()> {
        let Some(id) = self.child_at(cx, 0) else {
            return Ok(());
        };
        cx.cidx += 1;

        let indent = cx.indent + usize::from(indent);
        let node = self.node(id);
        for &extra in &node.prev_cst_siblings {
            self.format_node(extra, indent, Hints::NONE)?;
        }
        self.format_node(id, indent, hints)?;
        for &extra in &node.next_cst_siblings {
            self.format_node(extra, indent, Hints::NONE)?;
        }
        Ok(())
    }

    /// Formats `num` children with no line break allowed between them.
    fn child_range(
        &mut self,
        cx: &mut Ctx,
        num: usize,
        hints: Hints,
        first_hints: Hints,
    ) -> io::Result<()> {
        for i in 0..num {
            let mut h = hints;
            if i == 0 {
                h |= first_hints;
            }
            if i + 1 < num {
                h |= Hints::NO_LB_AFTER;
            }
            self.child_hinted(cx, h)?;
        }
        Ok(())
    }

    /// Formats all remaining children, optionally separated. The node's own
    /// hints carry over to the first child.
    fn children(&mut self, cx: &mut Ctx, sep: Option<&str>) -> io::Result<()> {
        if self.has_child(cx) {
            let hints = cx.hints;
            self.child_hinted(cx, hints)?;
        }
        while self.has_child(cx) {
            if let Some(sep) = sep {
                self.write(cx, sep)?;
            }
            self.child(cx)?;
        }
        Ok(())
    }

    // ===== Writing =====

    /// Writes `data`, indenting first when at the start of a line. Leading
    /// whitespace right after an indent is dropped.
    fn write(&mut self, cx: &Ctx, data: &str) -> io::Result<()> {
        let mut data = data;
        if !data.starts_with('\n') && self.write_indent(cx)? {
            data = data.trim_start();
        }
        self.out.write(data, cx.hints)
    }

    fn write_indent(&mut self, cx: &Ctx) -> io::Result<bool> {
        if self.out.column() != 0 {
            return Ok(false);
        }
        self.out.write_tab_indent(cx.indent, cx.hints)?;
        self.out.write_space_align(cx.hints)?;
        Ok(true)
    }

    /// Writes the node's own source text.
    fn token(&mut self, cx: &Ctx) -> io::Result<()> {
        let text = self.tree.text(cx.id, self.src);
        self.write(cx, text)
    }

    #[inline]
    fn sp(&mut self, cx: &Ctx) -> io::Result<()> {
        self.write(cx, " ")
    }

    fn sp_n(&mut self, cx: &Ctx, num: usize) -> io::Result<()> {
        self.write(cx, &" ".repeat(num))
    }

    #[inline]
    fn nl(&mut self, cx: &Ctx) -> io::Result<()> {
        self.nl_with(cx, false, false)
    }

    /// Ends the current line. At the start of a line this does nothing
    /// unless forced, so consecutive requests collapse into one. Either way
    /// `is_midline` decides whether the next line gets space-aligned.
    fn nl_with(&mut self, cx: &Ctx, force: bool, is_midline: bool) -> io::Result<()> {
        if self.out.column() == 0 && !force {
            self.out.set_space_align(is_midline);
            return Ok(());
        }
        self.write(cx, "\n")?;
        self.out.set_space_align(is_midline);
        Ok(())
    }
}
