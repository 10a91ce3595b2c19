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

//! Declarations, types and function headers.

use std::io::{self, Write};

use zeekscript_core::Symbol;

use super::{Ctx, Formatter};
use crate::hint::Hints;

impl<W: Write> Formatter<'_, W> {
    pub(super) fn format_decl(&mut self, cx: &mut Ctx) -> io::Result<()> {
        if self.child_is(cx, Symbol::Error) {
            self.child(cx)?;
            return if self.error_continues_line(cx) {
                self.sp(cx)
            } else {
                self.nl(cx)
            };
        }
        self.format_default(cx)
    }

    /// An unparseable declaration stays on a line with whatever follows it
    /// in the source, unless it ends a statement or a block.
    fn error_continues_line(&self, cx: &Ctx) -> bool {
        let node = self.node(cx.id);
        if self.tree.text(cx.id, self.src).ends_with(['{', '}', ';']) {
            return false;
        }
        node.next_sibling
            .is_some_and(|next| self.node(next).span.start.row == node.span.end.row)
    }

    /// Directives are written flush left and never wrapped.
    pub(super) fn format_preproc_directive(&mut self, cx: &mut Ctx) -> io::Result<()> {
        self.out.set_tab_indent(false);
        self.out.set_linebreaks(false);
        let result = self.format_line(cx);
        self.out.set_tab_indent(true);
        self.out.set_linebreaks(true);
        result
    }

    pub(super) fn format_module_decl(&mut self, cx: &mut Ctx) -> io::Result<()> {
        self.child(cx)?; // 'module'
        self.sp(cx)?;
        self.child_range(cx, 2, Hints::NONE, Hints::NONE)?; // <id> ';'
        self.nl(cx)
    }

    pub(super) fn format_export_decl(&mut self, cx: &mut Ctx) -> io::Result<()> {
        self.child(cx)?; // 'export'
        self.sp(cx)?;
        self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // '{'
        self.nl(cx)?;
        while self.child_is(cx, Symbol::Decl) {
            self.child_indented(cx)?;
        }
        self.child(cx)?; // '}'
        self.nl(cx)
    }

    /// `[: <type>] [<initializer>] [<attr_list>]`
    pub(super) fn format_typed_initializer(&mut self, cx: &mut Ctx) -> io::Result<()> {
        if self.child_token(cx, 0) == Some(":") {
            self.child_hinted(cx, Hints::NO_LB_AFTER)?;
            self.sp(cx)?;
            self.child(cx)?; // <type>
        }
        if self.child_is(cx, Symbol::Initializer) {
            self.sp(cx)?;
            self.child(cx)?;
        }
        self.opt_attr_list(cx)
    }

    /// Space and attribute list, if one comes next.
    pub(super) fn opt_attr_list(&mut self, cx: &mut Ctx) -> io::Result<()> {
        if self.child_is(cx, Symbol::AttrList) {
            self.sp(cx)?;
            self.child(cx)?;
        }
        Ok(())
    }

    /// `global`, `option`, `const` and plain `redef` declarations.
    pub(super) fn format_global_decl(&mut self, cx: &mut Ctx) -> io::Result<()> {
        self.child(cx)?; // keyword
        self.sp(cx)?;
        self.child(cx)?; // <id>
        self.format_typed_initializer(cx)?;
        self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // ';'
        self.nl(cx)
    }

    pub(super) fn format_initializer(&mut self, cx: &mut Ctx) -> io::Result<()> {
        if self.child_is(cx, Symbol::InitClass) {
            self.child(cx)?; // '=', '+=', '-='
            self.sp(cx)?;
        }
        self.child(cx) // <init>
    }

    /// A braced initializer list gets one element per line.
    pub(super) fn format_init(&mut self, cx: &mut Ctx) -> io::Result<()> {
        if self.child_token(cx, 0) != Some("{") {
            return self.child(cx);
        }

        self.child_hinted(cx, Hints::NO_LB_BEFORE)?;
        if self.child_is(cx, Symbol::Expr) {
            self.nl(cx)?;
            while self.child_is(cx, Symbol::Expr) {
                self.child_indented(cx)?;
                if self.child_token(cx, 0) == Some(",") {
                    self.child_hinted(cx, Hints::NO_LB_BEFORE)?;
                }
                self.nl(cx)?;
            }
        } else {
            self.sp(cx)?;
        }
        self.child(cx) // '}'
    }

    pub(super) fn format_redef_enum_decl(&mut self, cx: &mut Ctx) -> io::Result<()> {
        // 'redef' 'enum' <id> '+=' '{'
        for _ in 0..4 {
            self.child(cx)?;
            self.sp(cx)?;
        }
        self.child(cx)?;
        self.nl(cx)?;
        self.child_indented(cx)?; // <enum_body>
        self.child_range(cx, 2, Hints::NONE, Hints::NONE)?; // '}' ';'
        self.nl(cx)
    }

    pub(super) fn format_redef_record_decl(&mut self, cx: &mut Ctx) -> io::Result<()> {
        // 'redef' 'record' <id> '+=' '{'
        for _ in 0..4 {
            self.child(cx)?;
            self.sp(cx)?;
        }
        self.child(cx)?;
        self.nl(cx)?;
        self.record_members(cx)?;
        self.child(cx)?; // '}'
        self.opt_attr_list(cx)?;
        self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // ';'
        self.nl(cx)
    }

    /// Record fields and the directives between them, one level in.
    fn record_members(&mut self, cx: &mut Ctx) -> io::Result<()> {
        while self.child_is(cx, Symbol::TypeSpec) || self.child_is(cx, Symbol::PreprocDirective) {
            self.child_indented(cx)?;
        }
        Ok(())
    }

    pub(super) fn format_type_decl(&mut self, cx: &mut Ctx) -> io::Result<()> {
        self.child(cx)?; // 'type'
        self.sp(cx)?;
        self.child_range(cx, 2, Hints::NONE, Hints::NONE)?; // <id> ':'
        self.sp(cx)?;
        self.child(cx)?; // <type>
        self.opt_attr_list(cx)?;
        self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // ';'
        self.nl(cx)
    }

    pub(super) fn format_type(&mut self, cx: &mut Ctx) -> io::Result<()> {
        match self.child_token(cx, 0) {
            Some("set") => {
                self.child(cx)?;
                self.type_list(cx)
            }
            Some("table") => {
                self.child(cx)?;
                self.type_list(cx)?;
                self.sp(cx)?;
                self.child(cx)?; // 'of'
                self.sp(cx)?;
                self.child(cx) // <type>
            }
            Some("record") => {
                self.child(cx)?;
                self.sp(cx)?;
                self.child(cx)?; // '{'
                if self.child_is(cx, Symbol::TypeSpec)
                    || self.child_is(cx, Symbol::PreprocDirective)
                {
                    self.nl(cx)?;
                    self.record_members(cx)?;
                } else {
                    self.sp(cx)?;
                }
                self.child(cx) // '}'
            }
            Some("enum") => {
                self.child(cx)?;
                self.sp(cx)?;
                self.child(cx)?; // '{'
                if self.child_is(cx, Symbol::EnumBody) {
                    self.nl(cx)?;
                    self.child_indented(cx)?;
                } else {
                    self.sp(cx)?;
                }
                self.child(cx) // '}'
            }
            Some("function") => self.child_range(cx, 2, Hints::NONE, Hints::NONE),
            Some("event" | "hook") => {
                self.child(cx)?;
                self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // '('
                if self.child_is(cx, Symbol::FormalArgs) {
                    self.child(cx)?;
                }
                self.child_hinted(cx, Hints::NO_LB_BEFORE) // ')'
            }
            // vector of T, opaque of T, base types, named types
            _ => self.format_space_separated(cx),
        }
    }

    /// `[ <type>, ... ]`
    fn type_list(&mut self, cx: &mut Ctx) -> io::Result<()> {
        self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // '['
        while self.child_is(cx, Symbol::Type) {
            self.child(cx)?;
            if self.child_token(cx, 0) == Some(",") {
                self.child_hinted(cx, Hints::NO_LB_BEFORE)?;
                self.sp(cx)?;
            }
        }
        self.child_hinted(cx, Hints::NO_LB_BEFORE) // ']'
    }

    pub(super) fn format_type_spec(&mut self, cx: &mut Ctx) -> io::Result<()> {
        if self.child_is(cx, Symbol::Error) {
            self.child(cx)?;
            return self.nl(cx);
        }
        self.child_hinted(cx, Hints::NO_LB_AFTER)?; // <id>
        self.child_hinted(cx, Hints::NO_LB_AFTER)?; // ':'
        self.sp(cx)?;
        self.child(cx)?; // <type>
        self.opt_attr_list(cx)?;
        self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // ';'
        self.nl(cx)
    }

    pub(super) fn format_enum_body(&mut self, cx: &mut Ctx) -> io::Result<()> {
        while self.has_child(cx) {
            self.child(cx)?; // <enum_body_elem>
            if self.has_child(cx) {
                self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // ','
            }
            self.nl(cx)?;
        }
        Ok(())
    }

    /// Header, then the body on the next line. Braces and body statements
    /// share one indentation level below the header.
    pub(super) fn format_func_decl(&mut self, cx: &mut Ctx) -> io::Result<()> {
        self.child(cx)?; // <func_hdr>
        if self.child_is(cx, Symbol::PreprocDirective) {
            self.nl(cx)?;
            while self.child_is(cx, Symbol::PreprocDirective) {
                self.child(cx)?;
                self.nl(cx)?;
            }
        }
        self.nl(cx)?;
        self.child_indented(cx)?; // <func_body>
        self.nl(cx)
    }

    pub(super) fn format_func_hdr_variant(&mut self, cx: &mut Ctx) -> io::Result<()> {
        if self.child_token(cx, 0) == Some("redef") {
            self.child(cx)?;
            self.sp(cx)?;
        }
        self.child(cx)?; // 'function', 'event' or 'hook'
        self.sp(cx)?;
        self.child(cx)?; // <id>
        self.child(cx)?; // <func_params>
        self.opt_attr_list(cx)
    }

    pub(super) fn format_func_params(&mut self, cx: &mut Ctx) -> io::Result<()> {
        self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // '('
        if self.child_is(cx, Symbol::FormalArgs) {
            self.child(cx)?;
        }
        self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // ')'
        if self.child_token(cx, 0) == Some(":") {
            self.child_hinted(cx, Hints::NO_LB_AFTER)?;
            self.sp(cx)?;
            self.child(cx)?; // <type>
        }
        Ok(())
    }

    /// A declaration indents its body braces and all, so only lambda
    /// bodies indent their statements past the braces.
    pub(super) fn format_func_body(&mut self, cx: &mut Ctx) -> io::Result<()> {
        self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // '{'
        if self.child_is(cx, Symbol::StmtList) {
            self.nl(cx)?;
            let in_decl = self
                .node(cx.id)
                .parent
                .is_some_and(|p| self.node(p).symbol == Symbol::FuncDecl);
            if in_decl {
                self.child(cx)?;
            } else {
                self.child_indented(cx)?;
            }
        } else {
            self.sp(cx)?;
        }
        self.child(cx) // '}'
    }

    pub(super) fn format_formal_args(&mut self, cx: &mut Ctx) -> io::Result<()> {
        while self.child_is(cx, Symbol::FormalArg) {
            self.child(cx)?;
            if self.has_child(cx) {
                self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // ',' or ';'
                if self.has_child(cx) {
                    self.sp(cx)?;
                }
            }
        }
        Ok(())
    }

    pub(super) fn format_formal_arg(&mut self, cx: &mut Ctx) -> io::Result<()> {
        self.child_hinted(cx, Hints::NO_LB_AFTER)?; // <id>
        self.child_hinted(cx, Hints::NO_LB_AFTER)?; // ':'
        self.sp(cx)?;
        self.child(cx)?; // <type>
        self.opt_attr_list(cx)
    }

    /// `[a, copy b] ` ahead of lambda parameters or a `when` condition.
    pub(super) fn format_capture_list(&mut self, cx: &mut Ctx) -> io::Result<()> {
        self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // '['
        while self.child_is(cx, Symbol::Capture) {
            self.child(cx)?;
            if self.child_token(cx, 0) == Some(",") {
                self.child_hinted(cx, Hints::NO_LB_BEFORE)?;
                self.sp(cx)?;
            }
        }
        self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // ']'
        self.sp(cx)
    }

    /// `&attr` or `&attr=value`, kept on one line.
    pub(super) fn format_attr(&mut self, cx: &mut Ctx) -> io::Result<()> {
        if self.child_token(cx, 1) == Some("=") {
            self.child_range(cx, 3, Hints::NONE, Hints::NONE)
        } else {
            self.child(cx)
        }
    }
}
