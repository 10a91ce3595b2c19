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

//! Expressions.
//!
//! Binary operators use precedence climbing over the levels below, from
//! loosest to tightest binding. Assignment and the ternary operator sit
//! above them; prefix operators and postfix forms (indexing, calls, field
//! access, `as` and `is`) bind tighter than any binary operator.

use super::{PResult, ParseFailure, Parser};
use crate::lex::{is_interval_unit, ConstKind, TokenKind};
use crate::tree::Symbol;

/// Tightest binary precedence level.
const MAX_LEVEL: u8 = 8;

impl Parser<'_> {
    pub(super) fn parse_expr(&mut self) -> PResult<()> {
        self.enter()?;
        let result = self.parse_assign();
        self.leave();
        result
    }

    pub(super) fn parse_expr_list(&mut self) -> PResult<()> {
        self.open(Symbol::ExprList);
        self.parse_expr()?;
        while self.at(",") {
            self.bump(Symbol::Token);
            if self.at_any(&[")", "]", "}"]) {
                break;
            }
            self.parse_expr()?;
        }
        self.close();
        Ok(())
    }

    fn parse_assign(&mut self) -> PResult<()> {
        self.parse_ternary()?;
        if self.at_any(&["=", "+=", "-="]) {
            self.wrap_last(Symbol::Expr);
            self.bump(Symbol::Token);
            self.parse_expr()?;
            self.close();
        }
        Ok(())
    }

    fn parse_ternary(&mut self) -> PResult<()> {
        self.parse_binary(0)?;
        if self.at("?") {
            self.wrap_last(Symbol::Expr);
            self.bump(Symbol::Token);
            self.parse_expr()?;
            self.expect(":")?;
            self.parse_expr()?;
            self.close();
        }
        Ok(())
    }

    /// Precedence level and token count of the binary operator at the
    /// current position.
    fn binary_op(&self) -> Option<(u8, usize)> {
        if !matches!(self.peek_kind(0), Some(TokenKind::Punct | TokenKind::Keyword)) {
            return None;
        }
        let level = match self.peek_text(0) {
            "||" => 0,
            "&&" => 1,
            "==" | "!=" | "<" | "<=" | ">" | ">=" => 2,
            "in" => 3,
            "!" if self.at_nth(1, "in") => return Some((3, 2)),
            "|" => 4,
            "^" => 5,
            "&" => 6,
            "+" | "-" => 7,
            "*" | "/" | "%" => 8,
            _ => return None,
        };
        Some((level, 1))
    }

    fn parse_binary(&mut self, min_level: u8) -> PResult<()> {
        let depth = self.depth;
        let result = self.parse_binary_chain(min_level);
        self.depth = depth;
        result
    }

    /// Each operator of a left-associative chain nests the tree one level
    /// deeper, so each one counts against the nesting limit.
    fn parse_binary_chain(&mut self, min_level: u8) -> PResult<()> {
        self.parse_unary()?;
        while let Some((level, width)) = self.binary_op() {
            if level < min_level {
                break;
            }
            self.enter()?;
            self.wrap_last(Symbol::Expr);
            for _ in 0..width {
                self.bump(Symbol::Token);
            }
            if level == MAX_LEVEL {
                self.parse_unary()?;
            } else {
                self.parse_binary(level + 1)?;
            }
            self.close();
        }
        Ok(())
    }

    fn parse_unary(&mut self) -> PResult<()> {
        if self.at_any(&["!", "~", "-", "+", "++", "--"]) {
            self.enter()?;
            self.open(Symbol::Expr);
            self.bump(Symbol::Token);
            let result = self.parse_unary();
            self.leave();
            result?;
            self.close();
            return Ok(());
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> PResult<()> {
        let depth = self.depth;
        let result = self.parse_postfix_chain();
        self.depth = depth;
        result
    }

    fn parse_postfix_chain(&mut self) -> PResult<()> {
        self.parse_primary()?;
        loop {
            if self.at_any(&["[", "(", "$", "?$", "as", "is"]) {
                self.enter()?;
            }
            if self.at("[") {
                self.wrap_last(Symbol::Expr);
                if self.is_slice_ahead() {
                    self.open(Symbol::IndexSlice);
                    self.bump(Symbol::Token);
                    if !self.at(":") {
                        self.parse_expr()?;
                    }
                    self.expect(":")?;
                    if !self.at("]") {
                        self.parse_expr()?;
                    }
                    self.expect("]")?;
                    self.close();
                } else {
                    self.bump(Symbol::Token);
                    self.parse_expr_list()?;
                    self.expect("]")?;
                }
                self.close();
            } else if self.at("(") {
                self.wrap_last(Symbol::Expr);
                self.bump(Symbol::Token);
                if !self.at(")") {
                    self.parse_expr_list()?;
                }
                self.expect(")")?;
                self.close();
            } else if self.at("$") || self.at("?$") {
                self.wrap_last(Symbol::Expr);
                self.bump(Symbol::Token);
                self.expect_field()?;
                self.close();
            } else if self.at("as") || self.at("is") {
                self.wrap_last(Symbol::Expr);
                self.bump(Symbol::Token);
                self.parse_type()?;
                self.close();
            } else {
                break;
            }
        }
        Ok(())
    }

    /// Record field names may collide with keywords.
    fn expect_field(&mut self) -> PResult<()> {
        if matches!(self.peek_kind(0), Some(TokenKind::Ident | TokenKind::Keyword)) {
            self.bump(Symbol::Id);
            Ok(())
        } else {
            Err(ParseFailure::Syntax)
        }
    }

    /// Whether the `[` at the current position opens a slice, i.e. holds a
    /// `:` at its own depth that no `?` claims.
    fn is_slice_ahead(&self) -> bool {
        let mut depth = 0usize;
        let mut pending_ternaries = 0usize;
        let mut i = 0;
        while let Some(tok) = self.token(i) {
            if tok.kind == TokenKind::Punct {
                match tok.text(self.src) {
                    "(" | "[" | "{" => depth += 1,
                    ")" | "]" | "}" => {
                        depth = depth.saturating_sub(1);
                        if depth == 0 {
                            return false;
                        }
                    }
                    "?" if depth == 1 => pending_ternaries += 1,
                    ":" if depth == 1 => {
                        if pending_ternaries == 0 {
                            return true;
                        }
                        pending_ternaries -= 1;
                    }
                    _ => {}
                }
            }
            i += 1;
        }
        false
    }

    fn parse_primary(&mut self) -> PResult<()> {
        let Some(tok) = self.token(0) else {
            return Err(ParseFailure::Syntax);
        };

        match tok.kind {
            TokenKind::Ident => {
                self.open(Symbol::Expr);
                self.bump(Symbol::Id);
            }
            TokenKind::Constant(kind) => {
                self.open(Symbol::Expr);
                let is_interval = kind == ConstKind::Number
                    && self.peek_kind(1) == Some(TokenKind::Ident)
                    && is_interval_unit(self.peek_text(1));
                if is_interval {
                    self.open(Symbol::Interval);
                    self.bump(Symbol::Constant);
                    self.bump(Symbol::Token);
                    self.close();
                } else {
                    self.bump(Symbol::Constant);
                }
            }
            TokenKind::Pattern => {
                self.open(Symbol::Expr);
                self.bump(Symbol::Pattern);
            }
            TokenKind::Directive if self.at_expr_directive() => {
                self.open(Symbol::Expr);
                self.bump(Symbol::Constant);
            }
            TokenKind::Punct => self.parse_punct_primary()?,
            TokenKind::Keyword => self.parse_keyword_primary()?,
            _ => return Err(ParseFailure::Syntax),
        }

        self.close();
        Ok(())
    }

    /// Opens the `expr` frame itself; the caller closes it.
    fn parse_punct_primary(&mut self) -> PResult<()> {
        match self.peek_text(0) {
            "(" => {
                self.open(Symbol::Expr);
                self.bump(Symbol::Token);
                self.parse_expr()?;
                self.expect(")")?;
            }
            "[" => {
                self.open(Symbol::Expr);
                self.bump(Symbol::Token);
                if !self.at("]") {
                    self.parse_expr_list()?;
                }
                self.expect("]")?;
            }
            "|" => {
                self.open(Symbol::Expr);
                self.bump(Symbol::Token);
                self.enter()?;
                let result = self.parse_binary(5);
                self.leave();
                result?;
                self.expect("|")?;
            }
            "$" => {
                self.open(Symbol::Expr);
                self.bump(Symbol::Token);
                self.expect_field()?;
                if self.at("=") {
                    self.bump(Symbol::Token);
                    self.parse_expr()?;
                } else {
                    self.parse_begin_lambda()?;
                    self.expect("=")?;
                    self.parse_func_body()?;
                }
            }
            _ => return Err(ParseFailure::Syntax),
        }
        Ok(())
    }

    /// Opens the `expr` frame itself; the caller closes it.
    fn parse_keyword_primary(&mut self) -> PResult<()> {
        match self.peek_text(0) {
            "copy" => {
                self.open(Symbol::Expr);
                self.bump(Symbol::Token);
                self.expect("(")?;
                self.parse_expr()?;
                self.expect(")")?;
            }
            "function" => {
                self.open(Symbol::Expr);
                self.bump(Symbol::Token);
                self.parse_begin_lambda()?;
                self.parse_func_body()?;
            }
            "schedule" => {
                self.open(Symbol::Expr);
                self.bump(Symbol::Token);
                self.parse_expr()?;
                self.expect("{")?;
                self.parse_event_hdr()?;
                self.expect("}")?;
            }
            "hook" => {
                self.open(Symbol::Expr);
                self.bump(Symbol::Token);
                self.parse_postfix()?;
            }
            "table" | "set" | "vector" | "record" if self.at_nth(1, "(") => {
                self.open(Symbol::Expr);
                self.bump(Symbol::Token);
                self.bump(Symbol::Token);
                if !self.at(")") {
                    self.parse_expr_list()?;
                }
                self.expect(")")?;
                self.parse_opt_attr_list()?;
            }
            _ => return Err(ParseFailure::Syntax),
        }
        Ok(())
    }

    /// `[captures] (params): type` ahead of a lambda body.
    fn parse_begin_lambda(&mut self) -> PResult<()> {
        self.open(Symbol::BeginLambda);
        if self.at("[") {
            self.parse_capture_list()?;
        }
        self.parse_func_params()?;
        self.close();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::limits::ParseLimits;
    use crate::parser::parse_tree;
    use crate::traverse::Traverse;
    use crate::tree::{Symbol, Tree};

    fn parse(src: &str) -> Tree {
        parse_tree(src, &ParseLimits::default()).unwrap()
    }

    fn has(t: &Tree, symbol: Symbol) -> bool {
        Traverse::new(t, false).any(|(id, _)| t.node(id).symbol == symbol)
    }

    // ==================== Primaries ====================

    #[test]
    fn test_interval_constant() {
        let t = parse("x = 5 min;");
        assert!(!t.has_error());
        assert!(has(&t, Symbol::Interval));
    }

    #[test]
    fn test_number_followed_by_plain_ident_is_not_interval() {
        let t = parse("x = 5 foo;");
        assert!(t.has_error());
    }

    #[test]
    fn test_record_constructor_and_lambda_field() {
        let t = parse("r = [$a=1, $b=\"x\", $f(n: count) = { return n; }];");
        assert!(!t.has_error());
        assert!(has(&t, Symbol::BeginLambda));
    }

    #[test]
    fn test_lambda_with_captures() {
        let t = parse("f = function[copy a, b](x: count): count { return x + a; };");
        assert!(!t.has_error());
        assert!(has(&t, Symbol::CaptureList));
    }

    #[test]
    fn test_constructors_with_attributes() {
        let t = parse("t = table([1] = \"a\") &default=\"\";\ns = set(1, 2);\nv = vector();");
        assert!(!t.has_error());
        assert!(has(&t, Symbol::AttrList));
    }

    #[test]
    fn test_schedule_and_hook() {
        let t = parse("schedule 5 sec { foo(1) };\nhook bar(2);\n");
        assert!(!t.has_error());
    }

    #[test]
    fn test_cardinality() {
        let t = parse("n = |s| + 1;");
        assert!(!t.has_error());
    }

    // ==================== Postfix ====================

    #[test]
    fn test_index_vs_slice() {
        let t = parse("a = s[1:3];");
        assert!(has(&t, Symbol::IndexSlice));
        let t = parse("a = s[x ? 1 : 2];");
        assert!(!has(&t, Symbol::IndexSlice));
        assert!(!t.has_error());
        let t = parse("a = s[:2];");
        assert!(has(&t, Symbol::IndexSlice));
    }

    #[test]
    fn test_field_access_chain() {
        let t = parse("if ( c?$http && c$http$method == \"GET\" ) print c$id$orig_h;");
        assert!(!t.has_error());
    }

    #[test]
    fn test_as_and_is() {
        let t = parse("if ( x is count ) y = x as count;");
        assert!(!t.has_error());
    }

    #[test]
    fn test_not_in() {
        let t = parse("if ( 1 !in s ) print 1;");
        assert!(!t.has_error());
    }

    #[test]
    fn test_unary_chain() {
        let t = parse("x = - -1; ++y; z = !f(x);");
        assert!(!t.has_error());
    }
}
