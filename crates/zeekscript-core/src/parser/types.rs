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

//! Types, record fields and enum bodies.

use super::{PResult, ParseFailure, Parser, Sync};
use crate::lex::TokenKind;
use crate::tree::Symbol;

impl Parser<'_> {
    pub(super) fn parse_type(&mut self) -> PResult<()> {
        self.enter()?;
        let result = self.parse_type_inner();
        self.leave();
        result
    }

    fn parse_type_inner(&mut self) -> PResult<()> {
        self.open(Symbol::Type);

        match self.peek_kind(0) {
            Some(TokenKind::Ident) => self.bump(Symbol::Id),
            Some(TokenKind::Keyword) => match self.peek_text(0) {
                "set" => {
                    self.bump(Symbol::Token);
                    self.parse_type_list()?;
                }
                "table" => {
                    self.bump(Symbol::Token);
                    self.parse_type_list()?;
                    self.expect("of")?;
                    self.parse_type()?;
                }
                "record" => {
                    self.bump(Symbol::Token);
                    self.expect("{")?;
                    self.parse_record_members()?;
                    self.expect("}")?;
                }
                "enum" => {
                    self.bump(Symbol::Token);
                    self.expect("{")?;
                    if !self.at("}") {
                        self.parse_enum_body()?;
                    }
                    self.expect("}")?;
                }
                "function" => {
                    self.bump(Symbol::Token);
                    self.parse_func_params()?;
                }
                "event" | "hook" => {
                    self.bump(Symbol::Token);
                    self.expect("(")?;
                    if !self.at(")") {
                        self.parse_formal_args()?;
                    }
                    self.expect(")")?;
                }
                "vector" => {
                    self.bump(Symbol::Token);
                    self.expect("of")?;
                    self.parse_type()?;
                }
                "file" if self.at_nth(1, "of") => {
                    self.bump(Symbol::Token);
                    self.bump(Symbol::Token);
                    self.parse_type()?;
                }
                "opaque" => {
                    self.bump(Symbol::Token);
                    self.expect("of")?;
                    self.expect_id()?;
                }
                "any" | "addr" | "bool" | "count" | "double" | "int" | "interval" | "pattern"
                | "port" | "string" | "subnet" | "time" | "file" => self.bump(Symbol::Token),
                _ => return Err(ParseFailure::Syntax),
            },
            _ => return Err(ParseFailure::Syntax),
        }

        self.close();
        Ok(())
    }

    /// `[ <type>, ... ]` after `set` and `table`.
    fn parse_type_list(&mut self) -> PResult<()> {
        self.expect("[")?;
        loop {
            self.parse_type()?;
            if self.at(",") {
                self.bump(Symbol::Token);
            } else {
                break;
            }
        }
        self.expect("]")
    }

    /// Fields of a record body, each recovered on its own, with
    /// interspersed preprocessor directives.
    pub(super) fn parse_record_members(&mut self) -> PResult<()> {
        while !self.at("}") && !self.at_eof() {
            if self.at_kind(TokenKind::Directive) {
                self.parse_preproc_directive()?;
            } else {
                self.recover(Symbol::TypeSpec, Sync::BLOCK, |p| p.parse_type_spec())?;
            }
        }
        Ok(())
    }

    fn parse_type_spec(&mut self) -> PResult<()> {
        self.open(Symbol::TypeSpec);
        self.expect_id()?;
        self.expect(":")?;
        self.parse_type()?;
        self.parse_opt_attr_list()?;
        self.expect(";")?;
        self.close();
        Ok(())
    }

    pub(super) fn parse_enum_body(&mut self) -> PResult<()> {
        self.open(Symbol::EnumBody);
        loop {
            self.open(Symbol::EnumBodyElem);
            self.expect_id()?;
            if self.at("=") {
                self.bump(Symbol::Token);
                self.parse_expr()?;
            }
            self.close();

            if self.at(",") {
                self.bump(Symbol::Token);
                if self.at("}") {
                    break;
                }
            } else {
                break;
            }
        }
        self.close();
        Ok(())
    }
}
