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

//! Lexer, parser and concrete syntax tree for Zeek scripts.
//!
//! This crate turns Zeek script source into a [`Tree`] that keeps every
//! byte of the input: grammar productions form the AST, while newlines and
//! comments are attached to neighbouring AST nodes as CST extras. That is
//! what a formatter needs to reproduce comments and blank lines faithfully.
//!
//! Parsing never fails on bad syntax. Malformed declarations, statements
//! and record fields become `ERROR` nodes and parsing resumes after them;
//! [`Script::error`] reports the first one.
//!
//! # Example
//!
//! ```
//! use zeekscript_core::Script;
//!
//! let mut script = Script::from_source("event zeek_init() { print \"hi\"; }\n");
//! assert!(script.parse().unwrap());
//!
//! let mut out = Vec::new();
//! script.write_tree(&mut out, false).unwrap();
//! assert!(String::from_utf8(out).unwrap().starts_with("source_file (0.0,1.0)"));
//! ```

mod error;
pub mod lex;
mod limits;
mod parser;
mod script;
pub mod traverse;
pub mod tree;

pub use error::{ZeekError, ZeekErrorKind, ZeekResult};
pub use limits::ParseLimits;
pub use parser::parse_tree;
pub use script::{ParseErrorInfo, Script};
pub use traverse::{walk, Traverse, TreeStats, TreeVisitor};
pub use tree::{Node, NodeId, Symbol, Tree};
