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

//! Statements.

use super::{PResult, Parser, Sync};
use crate::lex::TokenKind;
use crate::tree::Symbol;

impl Parser<'_> {
    pub(super) fn parse_stmt(&mut self) -> PResult<()> {
        self.enter()?;
        let result = self.parse_stmt_inner();
        self.leave();
        result
    }

    fn parse_stmt_inner(&mut self) -> PResult<()> {
        self.open(Symbol::Stmt);

        if self.at_kind(TokenKind::Directive) && !self.at_expr_directive() {
            self.parse_preproc_directive()?;
            self.close();
            return Ok(());
        }

        let word = match self.peek_kind(0) {
            Some(TokenKind::Keyword | TokenKind::Punct) => self.peek_text(0),
            _ => "",
        };

        match word {
            "{" => {
                self.bump(Symbol::Token);
                if !self.at("}") {
                    self.parse_stmt_list(&[])?;
                }
                self.expect("}")?;
            }
            "print" => {
                self.bump(Symbol::Token);
                self.parse_expr_list()?;
                self.expect(";")?;
            }
            "event" => {
                self.bump(Symbol::Token);
                self.parse_event_hdr()?;
                self.expect(";")?;
            }
            "if" => {
                self.bump(Symbol::Token);
                self.parse_paren_expr()?;
                self.parse_stmt()?;
                if self.at("else") {
                    self.bump(Symbol::Token);
                    self.parse_stmt()?;
                }
            }
            "switch" => {
                self.bump(Symbol::Token);
                self.parse_expr()?;
                self.expect("{")?;
                if !self.at("}") {
                    self.parse_case_list()?;
                }
                self.expect("}")?;
            }
            "for" => self.parse_for()?,
            "while" => {
                self.bump(Symbol::Token);
                self.parse_paren_expr()?;
                self.parse_stmt()?;
            }
            "next" | "break" | "fallthrough" => {
                self.bump(Symbol::Token);
                self.expect(";")?;
            }
            "return" => {
                self.bump(Symbol::Token);
                if self.at("when") {
                    self.parse_when()?;
                } else {
                    if !self.at(";") {
                        self.parse_expr()?;
                    }
                    self.expect(";")?;
                }
            }
            "add" | "delete" => {
                self.bump(Symbol::Token);
                self.parse_expr()?;
                self.expect(";")?;
            }
            "local" | "const" => {
                self.bump(Symbol::Token);
                self.expect_id()?;
                self.parse_typed_initializer()?;
                self.expect(";")?;
            }
            "when" => self.parse_when()?,
            ";" => self.bump(Symbol::Token),
            _ => {
                self.parse_expr()?;
                self.expect(";")?;
            }
        }

        self.close();
        Ok(())
    }

    fn parse_paren_expr(&mut self) -> PResult<()> {
        self.expect("(")?;
        self.parse_expr()?;
        self.expect(")")
    }

    /// Statements up to the closing brace, or up to one of `stop` for the
    /// bodies of switch cases.
    pub(super) fn parse_stmt_list(&mut self, stop: &[&str]) -> PResult<()> {
        self.open(Symbol::StmtList);
        while !self.at("}") && !self.at_eof() && !self.at_any(stop) {
            self.recover(Symbol::Stmt, Sync::BLOCK, |p| p.parse_stmt())?;
        }
        self.close();
        Ok(())
    }

    fn parse_case_list(&mut self) -> PResult<()> {
        const CASE_STOP: &[&str] = &["case", "default"];

        self.open(Symbol::CaseList);
        while self.at_any(CASE_STOP) {
            if self.at("case") {
                self.bump(Symbol::Token);
                if self.at("type") {
                    self.parse_case_type_list()?;
                } else {
                    self.parse_expr_list()?;
                }
            } else {
                self.bump(Symbol::Token);
            }
            self.expect(":")?;

            if !self.at("}") && !self.at_eof() && !self.at_any(CASE_STOP) {
                self.parse_stmt_list(CASE_STOP)?;
            }
        }
        self.close();
        Ok(())
    }

    fn parse_case_type_list(&mut self) -> PResult<()> {
        self.open(Symbol::CaseTypeList);
        loop {
            self.expect("type")?;
            self.parse_type()?;
            if self.at("as") {
                self.bump(Symbol::Token);
                self.expect_id()?;
            }
            if self.at(",") {
                self.bump(Symbol::Token);
            } else {
                break;
            }
        }
        self.close();
        Ok(())
    }

    /// `for ( [k1, k2], v in expr ) stmt` and the simpler forms.
    fn parse_for(&mut self) -> PResult<()> {
        self.expect("for")?;
        self.expect("(")?;
        if self.at("[") {
            self.bump(Symbol::Token);
            self.expect_id()?;
            while self.at(",") {
                self.bump(Symbol::Token);
                self.expect_id()?;
            }
            self.expect("]")?;
        } else {
            self.expect_id()?;
        }
        while self.at(",") {
            self.bump(Symbol::Token);
            self.expect_id()?;
        }
        self.expect("in")?;
        self.parse_expr()?;
        self.expect(")")?;
        self.parse_stmt()
    }

    fn parse_when(&mut self) -> PResult<()> {
        self.expect("when")?;
        if self.at("[") {
            self.parse_capture_list()?;
        }
        self.parse_paren_expr()?;
        self.parse_stmt()?;
        if self.at("timeout") {
            self.bump(Symbol::Token);
            self.parse_expr()?;
            self.expect("{")?;
            if !self.at("}") {
                self.parse_stmt_list(&[])?;
            }
            self.expect("}")?;
        }
        Ok(())
    }

    pub(super) fn parse_capture_list(&mut self) -> PResult<()> {
        self.open(Symbol::CaptureList);
        self.expect("[")?;
        loop {
            self.open(Symbol::Capture);
            if self.at("copy") {
                self.bump(Symbol::Token);
            }
            self.expect_id()?;
            self.close();
            if self.at(",") {
                self.bump(Symbol::Token);
            } else {
                break;
            }
        }
        self.expect("]")?;
        self.close();
        Ok(())
    }

    /// `name(args)` after `event` and inside `schedule`.
    pub(super) fn parse_event_hdr(&mut self) -> PResult<()> {
        self.open(Symbol::EventHdr);
        self.expect_id()?;
        self.expect("(")?;
        if !self.at(")") {
            self.parse_expr_list()?;
        }
        self.expect(")")?;
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

    fn count(t: &Tree, symbol: Symbol) -> usize {
        Traverse::new(t, false)
            .filter(|&(id, _)| t.node(id).symbol == symbol)
            .count()
    }

    // ==================== Statement forms ====================

    #[test]
    fn test_all_statement_forms_parse_cleanly() {
        let src = r#"event zeek_init()
	{
	print "a", 1;
	event foo(1, 2);
	if ( x ) y = 1; else if ( z ) y = 2; else { y = 3; }
	for ( i in s ) next;
	for ( [a, b], v in t ) break;
	while ( T ) { fallthrough; }
	add s[1];
	delete t[2];
	local x: count = 3 &redef;
	const y = 4;
	when [x] ( x > 1 ) { print x; } timeout 5 sec { print "late"; }
	;
	return;
	}
"#;
        let t = parse(src);
        assert!(!t.has_error());
        assert_eq!(count(&t, Symbol::CaptureList), 1);
        assert_eq!(count(&t, Symbol::EventHdr), 1);
    }

    #[test]
    fn test_switch_cases() {
        let src = "switch ( x ) { case 1, 2: print 1; break; case type count as c: print c; default: break; }";
        let t = parse(src);
        assert!(!t.has_error());
        assert_eq!(count(&t, Symbol::CaseList), 1);
        assert_eq!(count(&t, Symbol::CaseTypeList), 1);
        assert_eq!(count(&t, Symbol::StmtList), 3);
    }

    #[test]
    fn test_empty_case_body() {
        let t = parse("switch x { case 1: case 2: print 2; }");
        assert!(!t.has_error());
        assert_eq!(count(&t, Symbol::StmtList), 1);
    }

    #[test]
    fn test_return_when() {
        let t = parse("function f(): bool { return when ( g() ) { return T; } }");
        assert!(!t.has_error());
    }

    #[test]
    fn test_event_statement_at_top_level() {
        let t = parse("event foo(1);\n");
        assert!(!t.has_error());
        let root = t.node(t.root());
        assert_eq!(t.node(root.children[0]).symbol, Symbol::Stmt);
    }
}
