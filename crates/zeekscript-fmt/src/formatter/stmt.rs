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

//! Statements, case lists and event headers.
//!
//! Statements are not split into separate symbols, so the layout is picked
//! from the leading token. A controlled statement that is a `{ ... }` block
//! opens on the line of its controlling statement; any other controlled
//! statement goes on its own line, one level in.

use std::io::{self, Write};

use zeekscript_core::Symbol;

use super::{Ctx, Formatter};
use crate::hint::Hints;

impl<W: Write> Formatter<'_, W> {
    pub(super) fn format_stmt(&mut self, cx: &mut Ctx) -> io::Result<()> {
        if self.child_is(cx, Symbol::Error) {
            self.child(cx)?;
            return self.nl(cx);
        }
        if self.child_is(cx, Symbol::Expr) {
            self.child_range(cx, 2, Hints::NONE, Hints::NONE)?; // <expr> ';'
            return self.nl(cx);
        }
        if self.child_is(cx, Symbol::PreprocDirective) {
            self.child(cx)?;
            return self.nl(cx);
        }

        match self.child_token(cx, 0) {
            Some("{") => {
                self.block(cx)?;
                // A block under if/for/while/when is ended by its parent.
                let controlled = self
                    .node(cx.id)
                    .parent
                    .is_some_and(|p| self.node(p).symbol == Symbol::Stmt);
                if !controlled {
                    self.nl(cx)?;
                }
                Ok(())
            }
            Some("print" | "event") => {
                self.child(cx)?;
                self.sp(cx)?;
                self.child_range(cx, 2, Hints::NONE, Hints::NONE)?; // <expr_list>/<event_hdr> ';'
                self.nl(cx)
            }
            Some("if") => self.if_stmt(cx),
            Some("switch") => {
                self.child(cx)?;
                self.sp(cx)?;
                self.child(cx)?; // <expr>
                self.sp(cx)?;
                self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // '{'
                if self.child_is(cx, Symbol::CaseList) {
                    self.nl(cx)?;
                    self.child_indented(cx)?;
                } else {
                    self.sp(cx)?;
                }
                self.child(cx)?; // '}'
                self.nl(cx)
            }
            Some("for") => self.for_stmt(cx),
            Some("while") => {
                self.child(cx)?;
                self.sp(cx)?;
                self.paren_cond(cx)?;
                self.controlled_block(cx)
            }
            Some("next" | "break" | "fallthrough") => {
                self.child_range(cx, 2, Hints::NONE, Hints::NONE)?;
                self.nl(cx)
            }
            Some("return") => {
                self.child(cx)?;
                if self.child_token(cx, 0) == Some("when") {
                    self.sp(cx)?;
                    return self.when_stmt(cx);
                }
                if self.child_is(cx, Symbol::Expr) {
                    self.sp(cx)?;
                    self.child(cx)?;
                }
                self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // ';'
                self.nl(cx)
            }
            Some("add" | "delete") => {
                self.child(cx)?;
                self.sp(cx)?;
                self.child_range(cx, 2, Hints::NONE, Hints::NONE)?; // <expr> ';'
                self.nl(cx)
            }
            Some("local" | "const") => {
                self.child(cx)?;
                self.sp(cx)?;
                self.child(cx)?; // <id>
                self.format_typed_initializer(cx)?;
                self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // ';'
                self.nl(cx)
            }
            Some("when") => self.when_stmt(cx),
            Some(";") => {
                self.child(cx)?;
                self.nl(cx)
            }
            _ => self.format_default(cx),
        }
    }

    /// `{ <stmt_list> }`, or `{ }` when empty.
    fn block(&mut self, cx: &mut Ctx) -> io::Result<()> {
        self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // '{'
        if self.child_is(cx, Symbol::StmtList) {
            self.nl(cx)?;
            self.child_indented(cx)?;
        } else {
            self.sp(cx)?;
        }
        self.child(cx) // '}'
    }

    /// `( <expr> )` of if, while and when.
    fn paren_cond(&mut self, cx: &mut Ctx) -> io::Result<()> {
        self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // '('
        self.sp(cx)?;
        self.child(cx)?; // <expr>
        self.sp(cx)?;
        self.child_hinted(cx, Hints::NO_LB_BEFORE) // ')'
    }

    /// Separator before a controlled statement and the statement itself.
    /// Returns whether it was a block.
    fn controlled(&mut self, cx: &mut Ctx) -> io::Result<bool> {
        let curly = self.child_starts_with(cx, "{");
        if curly {
            self.sp(cx)?;
            self.child(cx)?;
        } else {
            self.nl(cx)?;
            self.child_indented(cx)?;
        }
        Ok(curly)
    }

    /// A controlled statement that nothing follows.
    fn controlled_block(&mut self, cx: &mut Ctx) -> io::Result<()> {
        if self.controlled(cx)? {
            self.nl(cx)?;
        }
        Ok(())
    }

    fn if_stmt(&mut self, cx: &mut Ctx) -> io::Result<()> {
        self.child(cx)?; // 'if'
        self.sp(cx)?;
        self.paren_cond(cx)?;
        let curly = self.controlled(cx)?;

        if self.child_token(cx, 0) != Some("else") {
            if curly {
                self.nl(cx)?;
            }
            return Ok(());
        }

        if curly {
            self.sp(cx)?;
        }
        self.child(cx)?; // 'else'

        // `else if` stays on one line, so cascades do not drift right.
        if self.child_starts_with(cx, "if") {
            self.sp(cx)?;
            self.child(cx)
        } else {
            self.controlled_block(cx)
        }
    }

    fn for_stmt(&mut self, cx: &mut Ctx) -> io::Result<()> {
        self.child(cx)?; // 'for'
        self.sp(cx)?;
        self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // '('
        self.sp(cx)?;

        if self.child_token(cx, 0) == Some("[") {
            self.child_hinted(cx, Hints::NO_LB_BEFORE)?;
            while self.has_child(cx) && self.child_token(cx, 0) != Some("]") {
                self.child(cx)?; // <id>
                if self.child_token(cx, 0) == Some(",") {
                    self.child_hinted(cx, Hints::NO_LB_BEFORE)?;
                    self.sp(cx)?;
                }
            }
            self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // ']'
        } else {
            self.child(cx)?; // <id>
        }

        while self.child_token(cx, 0) == Some(",") {
            self.child_hinted(cx, Hints::NO_LB_BEFORE)?;
            self.sp(cx)?;
            self.child(cx)?; // <id>
        }

        self.sp(cx)?;
        self.child(cx)?; // 'in'
        self.sp(cx)?;
        self.child(cx)?; // <expr>
        self.sp(cx)?;
        self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // ')'
        self.controlled_block(cx)
    }

    /// `when [captures] ( <expr> ) <stmt> [timeout <expr> { ... }]`
    fn when_stmt(&mut self, cx: &mut Ctx) -> io::Result<()> {
        self.child(cx)?; // 'when'
        self.sp(cx)?;
        if self.child_is(cx, Symbol::CaptureList) {
            // The capture list brings its own trailing space.
            self.child(cx)?;
        }
        self.paren_cond(cx)?;
        let curly = self.controlled(cx)?;

        if self.child_token(cx, 0) == Some("timeout") {
            if curly {
                self.sp(cx)?;
            }
            self.child(cx)?; // 'timeout'
            self.sp(cx)?;
            self.child(cx)?; // <expr>
            self.sp(cx)?;
            self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // '{'
            self.nl(cx)?;
            if self.child_is(cx, Symbol::StmtList) {
                self.child_indented(cx)?;
            }
            self.child(cx)?; // '}'
            self.nl(cx)
        } else if curly {
            self.nl(cx)
        } else {
            Ok(())
        }
    }

    pub(super) fn format_expr_list(&mut self, cx: &mut Ctx) -> io::Result<()> {
        while self.child_is(cx, Symbol::Expr) {
            self.child(cx)?;
            if self.has_child(cx) {
                self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // ','
                if self.has_child(cx) {
                    self.sp(cx)?;
                }
            }
        }
        Ok(())
    }

    pub(super) fn format_case_list(&mut self, cx: &mut Ctx) -> io::Result<()> {
        while self.has_child(cx) {
            if self.child_token(cx, 0) == Some("case") {
                self.child(cx)?;
                self.sp(cx)?;
                self.child_range(cx, 2, Hints::NONE, Hints::NONE)?; // <expr_list>/<case_type_list> ':'
            } else {
                self.child_range(cx, 2, Hints::NONE, Hints::NONE)?; // 'default' ':'
            }
            self.nl(cx)?;
            if self.child_is(cx, Symbol::StmtList) {
                self.child_indented(cx)?;
            }
        }
        Ok(())
    }

    pub(super) fn format_case_type_list(&mut self, cx: &mut Ctx) -> io::Result<()> {
        while self.child_token(cx, 0) == Some("type") {
            self.child(cx)?;
            self.sp(cx)?;
            self.child(cx)?; // <type>
            if self.child_token(cx, 0) == Some("as") {
                self.sp(cx)?;
                self.child(cx)?;
                self.sp(cx)?;
                self.child(cx)?; // <id>
            }
            if self.child_token(cx, 0) == Some(",") {
                self.child_hinted(cx, Hints::NO_LB_BEFORE)?;
                self.sp(cx)?;
            }
        }
        Ok(())
    }

    pub(super) fn format_event_hdr(&mut self, cx: &mut Ctx) -> io::Result<()> {
        self.child(cx)?; // <id>
        self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // '('
        if self.child_is(cx, Symbol::ExprList) {
            self.child(cx)?;
        }
        self.child_hinted(cx, Hints::NO_LB_BEFORE) // ')'
    }
}
