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

//! Expression spacing.
//!
//! Expressions are not split into separate symbols either; the layout is
//! picked from the shape of the first three children. Anything not
//! recognised is space-separated.

use std::io::{self, Write};

use zeekscript_core::{NodeId, Symbol};

use super::{Ctx, Formatter};
use crate::hint::Hints;

/// Tight prefix operators.
const UNSPACED_PREFIX: &[&str] = &["|", "++", "--", "~", "-", "+"];

impl<W: Write> Formatter<'_, W> {
    pub(super) fn format_expr(&mut self, cx: &mut Ctx) -> io::Result<()> {
        let [cn1, cn2] = [0, 1].map(|n| self.child_symbol(cx, n));
        let [ct1, ct2, ct3] = [0, 1, 2].map(|n| self.child_token(cx, n));
        let first_is_expr = cn1 == Some(Symbol::Expr);

        if first_is_expr && ct2 == Some("[") {
            self.child(cx)?;
            self.child_hinted(cx, Hints::NO_LB_BEFORE | Hints::NO_LB_AFTER)?; // '['
            self.child(cx)?; // <expr_list>
            self.child_hinted(cx, Hints::NO_LB_BEFORE) // ']'
        } else if first_is_expr && ct2 == Some("$") {
            self.child(cx)?;
            self.child_hinted(cx, Hints::NO_LB_BEFORE | Hints::NO_LB_AFTER)?;
            self.rest(cx)
        } else if first_is_expr && cn2 == Some(Symbol::IndexSlice) {
            self.rest(cx)
        } else if ct1 == Some("!") {
            self.child_hinted(cx, Hints::NO_LB_AFTER)?;
            self.sp(cx)?;
            self.child(cx)
        } else if ct1.is_some_and(|t| UNSPACED_PREFIX.contains(&t)) {
            self.child_hinted(cx, Hints::NO_LB_AFTER)?;
            self.rest(cx)
        } else if first_is_expr && ct2 == Some("!") && ct3 == Some("in") {
            self.child(cx)?;
            self.sp(cx)?;
            self.child_hinted(cx, Hints::NO_LB_AFTER)?; // '!'
            self.child(cx)?; // 'in'
            self.sp(cx)?;
            self.child(cx)
        } else if ct1 == Some("[") {
            self.child_hinted(cx, Hints::NO_LB_BEFORE)?;
            if self.child_is(cx, Symbol::ExprList) {
                self.child(cx)?;
            } else {
                self.sp(cx)?;
            }
            self.child_hinted(cx, Hints::NO_LB_BEFORE) // ']'
        } else if ct1 == Some("$") && ct3 == Some("=") {
            // $<id>=<expr>
            self.child_range(cx, 4, Hints::NONE, Hints::GOOD_AFTER_LB)
        } else if ct1 == Some("$") {
            // $<id>[captures](params) = { ... }
            self.child_range(cx, 2, Hints::NONE, Hints::GOOD_AFTER_LB)?;
            self.sp(cx)?;
            self.child_hinted(cx, Hints::NO_LB_BEFORE | Hints::NO_LB_AFTER)?; // <begin_lambda>
            self.sp(cx)?;
            self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // '='
            self.sp(cx)?;
            self.child(cx) // <func_body>
        } else if ct1 == Some("(") {
            self.child_hinted(cx, Hints::NO_LB_BEFORE)?;
            self.sp(cx)?;
            self.child_hinted(cx, Hints::NO_LB_AFTER)?; // <expr>
            self.sp(cx)?;
            self.child(cx) // ')'
        } else if ct1 == Some("copy") {
            self.child(cx)?;
            self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // '('
            self.child_range(cx, 2, Hints::NONE, Hints::NONE) // <expr> ')'
        } else if ct2 == Some("?$") {
            self.child_range(cx, 3, Hints::NONE, Hints::NONE)
        } else if ct1 == Some("function") {
            self.child_range(cx, 2, Hints::NONE, Hints::NONE)?; // 'function' <begin_lambda>
            self.sp(cx)?;
            self.child(cx) // <func_body>
        } else if ct2 == Some("(") {
            // Calls and constructors such as table(...)
            self.child(cx)?;
            self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // '('
            if self.child_is(cx, Symbol::ExprList) {
                self.child(cx)?;
            }
            self.child_hinted(cx, Hints::NO_LB_BEFORE)?; // ')'
            self.opt_attr_list(cx)
        } else if let Some(pred) = self.binary_chain_kind(cx.id) {
            // Top-level chains of && / || or + prefer breaking before the
            // operator, so each operand starts a continuation line.
            let hints = if self.is_expr_chain_of(cx.id, pred) {
                Hints::GOOD_AFTER_LB
            } else {
                Hints::NONE
            };
            self.child(cx)?;
            self.sp(cx)?;
            self.child_hinted(cx, hints)?; // operator
            self.sp(cx)?;
            self.child(cx)
        } else {
            self.format_space_separated(cx)
        }
    }

    fn rest(&mut self, cx: &mut Ctx) -> io::Result<()> {
        while self.has_child(cx) {
            self.child(cx)?;
        }
        Ok(())
    }

    /// Binary operator expression with the given operator token.
    fn is_binary_op(&self, id: NodeId, ops: &[&str]) -> bool {
        let node = self.node(id);
        node.symbol == Symbol::Expr
            && node.children.len() == 3
            && self
                .tree
                .token(node.children[1], self.src)
                .is_some_and(|t| ops.contains(&t))
    }

    fn is_binary_boolean(&self, id: NodeId) -> bool {
        self.is_binary_op(id, &["||", "&&"])
    }

    fn is_binary_addition(&self, id: NodeId) -> bool {
        self.is_binary_op(id, &["+"])
    }

    fn binary_chain_kind(&self, id: NodeId) -> Option<fn(&Self, NodeId) -> bool> {
        if self.is_binary_boolean(id) {
            Some(Self::is_binary_boolean)
        } else if self.is_binary_addition(id) {
            Some(Self::is_binary_addition)
        } else {
            None
        }
    }

    /// Whether `pred` holds for every expression from `id` up to the first
    /// enclosing non-expression.
    fn is_expr_chain_of(&self, id: NodeId, pred: fn(&Self, NodeId) -> bool) -> bool {
        let mut cur = Some(id);
        while let Some(node) = cur {
            if self.node(node).symbol != Symbol::Expr || !pred(self, node) {
                break;
            }
            cur = self.node(node).parent;
        }
        cur.is_some_and(|node| self.node(node).symbol != Symbol::Expr)
    }
}
