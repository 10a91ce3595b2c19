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

//! Lexical analysis for Zeek scripts.
//!
//! - [`Point`] and [`Span`] for source positions
//! - [`Token`] and [`TokenKind`] for lexed tokens
//! - [`tokenize`] to turn source text into tokens

mod lexer;
mod span;
mod token;

pub use lexer::{tokenize, Lexer};
pub use span::{Point, Span};
pub use token::{is_attr_name, is_interval_unit, is_keyword, CommentKind, ConstKind, Token, TokenKind};
