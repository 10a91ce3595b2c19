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

//! Declarations, function headers and preprocessor directives.

use super::{PResult, ParseFailure, Parser, Sync};
use crate::lex::{ConstKind, TokenKind};
use crate::tree::Symbol;

impl Parser<'_> {
    /// Whether the current token starts a declaration rather than a
    /// statement.
    pub(super) fn at_decl_start(&self) -> bool {
        match self.peek_kind(0) {
            Some(TokenKind::Directive) => !self.at_expr_directive(),
            Some(TokenKind::Keyword) => match self.peek_text(0) {
                "module" | "export" | "global" | "option" | "const" | "redef" | "type"
                | "function" => true,
                "event" | "hook" => !self.is_invocation_ahead(),
                _ => false,
            },
            _ => false,
        }
    }

    /// `event foo(...);` and `hook foo(...);` are statements, not handlers.
    fn is_invocation_ahead(&self) -> bool {
        self.peek_kind(1) == Some(TokenKind::Ident)
            && self.at_nth(2, "(")
            && self
                .matching_close(2)
                .is_some_and(|close| self.at_nth(close + 1, ";"))
    }

    pub(super) fn parse_decl(&mut self) -> PResult<()> {
        self.open(Symbol::Decl);

        if self.at_kind(TokenKind::Directive) {
            self.parse_preproc_directive()?;
            self.close();
            return Ok(());
        }

        match self.peek_text(0) {
            "module" => {
                self.open(Symbol::ModuleDecl);
                self.bump(Symbol::Token);
                self.expect_id()?;
                self.expect(";")?;
                self.close();
            }
            "export" => self.parse_export_decl()?,
            "global" => self.parse_global_like(Symbol::GlobalDecl)?,
            "option" => self.parse_global_like(Symbol::OptionDecl)?,
            "const" => self.parse_global_like(Symbol::ConstDecl)?,
            "redef" => match self.peek_text(1) {
                "enum" => self.parse_redef_enum_decl()?,
                "record" => self.parse_redef_record_decl()?,
                "event" | "function" | "hook" => self.parse_func_decl()?,
                _ => self.parse_global_like(Symbol::RedefDecl)?,
            },
            "type" => {
                self.open(Symbol::TypeDecl);
                self.bump(Symbol::Token);
                self.expect_id()?;
                self.expect(":")?;
                self.parse_type()?;
                self.parse_opt_attr_list()?;
                self.expect(";")?;
                self.close();
            }
            "function" | "event" | "hook" => self.parse_func_decl()?,
            _ => return Err(ParseFailure::Syntax),
        }

        self.close();
        Ok(())
    }

    fn parse_export_decl(&mut self) -> PResult<()> {
        self.open(Symbol::ExportDecl);
        self.expect("export")?;
        self.expect("{")?;
        while !self.at("}") && !self.at_eof() {
            self.recover(Symbol::Decl, Sync::EXPORT, |p| p.parse_decl())?;
        }
        self.expect("}")?;
        self.close();
        Ok(())
    }

    /// `global`, `option`, `const` and simple `redef` declarations:
    /// keyword, name, then an optional type, initializer and attributes.
    fn parse_global_like(&mut self, symbol: Symbol) -> PResult<()> {
        self.open(symbol);
        self.bump(Symbol::Token);
        self.expect_id()?;
        self.parse_typed_initializer()?;
        self.expect(";")?;
        self.close();
        Ok(())
    }

    /// `[: <type>] [<initializer>] [<attr_list>]`, shared by declarations
    /// and `local` statements.
    pub(super) fn parse_typed_initializer(&mut self) -> PResult<()> {
        if self.at(":") {
            self.bump(Symbol::Token);
            self.parse_type()?;
        }
        if self.at_any(&["=", "+=", "-="]) {
            self.parse_initializer()?;
        }
        self.parse_opt_attr_list()
    }

    fn parse_initializer(&mut self) -> PResult<()> {
        self.open(Symbol::Initializer);

        self.open(Symbol::InitClass);
        self.bump(Symbol::Token);
        self.close();

        self.open(Symbol::Init);
        if self.at("{") {
            self.bump(Symbol::Token);
            while !self.at("}") {
                self.parse_expr()?;
                if self.at(",") {
                    self.bump(Symbol::Token);
                } else {
                    break;
                }
            }
            self.expect("}")?;
        } else {
            self.parse_expr()?;
        }
        self.close();

        self.close();
        Ok(())
    }

    pub(super) fn parse_opt_attr_list(&mut self) -> PResult<()> {
        if !self.at_kind(TokenKind::Attr) {
            return Ok(());
        }
        self.open(Symbol::AttrList);
        while self.at_kind(TokenKind::Attr) {
            self.open(Symbol::Attr);
            self.bump(Symbol::Token);
            if self.at("=") {
                self.bump(Symbol::Token);
                self.parse_expr()?;
            }
            self.close();
        }
        self.close();
        Ok(())
    }

    fn parse_redef_enum_decl(&mut self) -> PResult<()> {
        self.open(Symbol::RedefEnumDecl);
        self.expect("redef")?;
        self.expect("enum")?;
        self.expect_id()?;
        self.expect("+=")?;
        self.expect("{")?;
        self.parse_enum_body()?;
        self.expect("}")?;
        self.expect(";")?;
        self.close();
        Ok(())
    }

    fn parse_redef_record_decl(&mut self) -> PResult<()> {
        self.open(Symbol::RedefRecordDecl);
        self.expect("redef")?;
        self.expect("record")?;
        self.expect_id()?;
        self.expect("+=")?;
        self.expect("{")?;
        self.parse_record_members()?;
        self.expect("}")?;
        self.parse_opt_attr_list()?;
        self.expect(";")?;
        self.close();
        Ok(())
    }

    fn parse_func_decl(&mut self) -> PResult<()> {
        self.open(Symbol::FuncDecl);

        self.open(Symbol::FuncHdr);
        let keyword = if self.at("redef") {
            self.peek_text(1)
        } else {
            self.peek_text(0)
        };
        let variant = match keyword {
            "function" => Symbol::Func,
            "event" => Symbol::Event,
            "hook" => Symbol::Hook,
            _ => return Err(ParseFailure::Syntax),
        };
        self.open(variant);
        if self.at("redef") {
            self.bump(Symbol::Token);
        }
        self.bump(Symbol::Token);
        self.expect_id()?;
        self.parse_func_params()?;
        self.parse_opt_attr_list()?;
        self.close();
        self.close();

        while self.at_kind(TokenKind::Directive) {
            self.parse_preproc_directive()?;
        }

        self.parse_func_body()?;
        self.close();
        Ok(())
    }

    pub(super) fn parse_func_params(&mut self) -> PResult<()> {
        self.open(Symbol::FuncParams);
        self.expect("(")?;
        if !self.at(")") {
            self.parse_formal_args()?;
        }
        self.expect(")")?;
        if self.at(":") {
            self.bump(Symbol::Token);
            self.parse_type()?;
        }
        self.close();
        Ok(())
    }

    pub(super) fn parse_formal_args(&mut self) -> PResult<()> {
        self.open(Symbol::FormalArgs);
        loop {
            self.open(Symbol::FormalArg);
            self.expect_id()?;
            self.expect(":")?;
            self.parse_type()?;
            self.parse_opt_attr_list()?;
            self.close();

            if self.at(",") || self.at(";") {
                self.bump(Symbol::Token);
                if self.at(")") {
                    break;
                }
            } else {
                break;
            }
        }
        self.close();
        Ok(())
    }

    pub(super) fn parse_func_body(&mut self) -> PResult<()> {
        self.open(Symbol::FuncBody);
        self.expect("{")?;
        if !self.at("}") {
            self.parse_stmt_list(&[])?;
        }
        self.expect("}")?;
        self.close();
        Ok(())
    }

    /// `@DIR` and `@FILENAME` expand to strings and act as expressions.
    pub(super) fn at_expr_directive(&self) -> bool {
        self.at_kind(TokenKind::Directive) && matches!(self.peek_text(0), "@DIR" | "@FILENAME")
    }

    pub(super) fn parse_preproc_directive(&mut self) -> PResult<()> {
        self.open(Symbol::PreprocDirective);
        let name = self.peek_text(0);
        let row = self.token(0).map_or(0, |t| t.span.start.row);
        self.bump(Symbol::Token);

        match name {
            "@if" => {
                self.expect("(")?;
                self.parse_expr()?;
                self.expect(")")?;
            }
            "@ifdef" | "@ifndef" => {
                self.expect("(")?;
                self.expect_id()?;
                self.expect(")")?;
            }
            "@prefixes" => {
                if self.at_any(&["=", "+="]) {
                    self.bump(Symbol::Token);
                }
                if self.at_kind(TokenKind::DirectiveArg) {
                    self.bump(Symbol::File);
                }
            }
            "@deprecated" => {
                let same_line = self.token(0).is_some_and(|t| t.span.start.row == row);
                if same_line && self.at_kind(TokenKind::Constant(ConstKind::String)) {
                    self.bump(Symbol::Constant);
                }
            }
            _ => {
                if self.at_kind(TokenKind::DirectiveArg) {
                    self.bump(Symbol::File);
                }
            }
        }

        self.close();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::lex::tokenize;
    use crate::limits::ParseLimits;
    use crate::parser::Parser;

    fn parser(src: &str) -> Parser<'_> {
        Parser::new(src, tokenize(src), ParseLimits::default())
    }

    #[test]
    fn test_decl_start_keywords() {
        for src in ["module Foo;", "global x;", "type t: count;", "redef x = 1;", "@load foo"] {
            assert!(parser(src).at_decl_start(), "{src}");
        }
        for src in ["print 1;", "local x = 1;", "x = 2;", "@DIR"] {
            assert!(!parser(src).at_decl_start(), "{src}");
        }
    }

    #[test]
    fn test_event_handler_vs_event_statement() {
        assert!(parser("event foo(a: count) { }").at_decl_start());
        assert!(!parser("event foo(1, 2);").at_decl_start());
        assert!(!parser("hook foo(1);").at_decl_start());
    }
}
