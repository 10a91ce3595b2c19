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

//! Token definitions produced by the [`Lexer`](super::Lexer).

use super::span::Span;

/// Classification of a constant literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstKind {
    /// Integer, hex or floating-point number.
    Number,
    /// Port such as `80/tcp`.
    Port,
    /// IPv4 or bracketed IPv6 address.
    Addr,
    /// Address with a `/width` suffix.
    Subnet,
    /// Double-quoted string.
    String,
    /// `T` or `F`.
    Bool,
}

/// The four comment flavours Zeek distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommentKind {
    /// `##!` documents the enclosing script.
    ZeekygenHead,
    /// `##<` documents the item before it.
    ZeekygenPrev,
    /// `##` documents the item after it.
    ZeekygenNext,
    /// Plain `#`.
    Minor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// Identifier, possibly `::`-qualified.
    Ident,
    /// Reserved word: statements, declarations and base types.
    Keyword,
    Constant(ConstKind),
    /// Regular expression literal `/re/`, optionally with an `i` flag.
    Pattern,
    /// Attribute name such as `&redef`.
    Attr,
    /// Preprocessor directive keyword such as `@load`.
    Directive,
    /// Raw argument of a directive, e.g. the path after `@load`.
    DirectiveArg,
    /// Operator or punctuation.
    Punct,
    /// `\n` or `\r\n`.
    Newline,
    Comment(CommentKind),
    /// Anything the lexer could not classify.
    Unknown,
}

impl TokenKind {
    /// Newlines and comments may occur anywhere and never reach the grammar.
    #[inline]
    pub fn is_extra(self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Comment(_))
    }

    /// Whether a token of this kind can end an operand, in which case a
    /// following `/` divides instead of opening a pattern.
    #[inline]
    pub(crate) fn ends_operand(self, text: &str) -> bool {
        match self {
            TokenKind::Ident | TokenKind::Constant(_) | TokenKind::Pattern => true,
            TokenKind::Punct => text == ")" || text == "]",
            _ => false,
        }
    }
}

/// A lexed token: its kind and where it sits in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The token's text within `source`.
    #[inline]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source
            .get(self.span.start_byte..self.span.end_byte)
            .unwrap_or("")
    }
}

/// Zeek's reserved words.
pub fn is_keyword(word: &str) -> bool {
    matches!(
        word,
        "module"
            | "export"
            | "global"
            | "const"
            | "option"
            | "redef"
            | "type"
            | "record"
            | "enum"
            | "set"
            | "table"
            | "vector"
            | "of"
            | "function"
            | "event"
            | "hook"
            | "print"
            | "if"
            | "else"
            | "for"
            | "while"
            | "in"
            | "switch"
            | "case"
            | "default"
            | "break"
            | "next"
            | "fallthrough"
            | "return"
            | "add"
            | "delete"
            | "local"
            | "when"
            | "timeout"
            | "schedule"
            | "copy"
            | "as"
            | "is"
            | "any"
            | "addr"
            | "bool"
            | "count"
            | "double"
            | "int"
            | "interval"
            | "pattern"
            | "port"
            | "string"
            | "subnet"
            | "time"
            | "file"
            | "opaque"
    )
}

/// Units that turn a preceding number into an interval.
pub fn is_interval_unit(word: &str) -> bool {
    matches!(
        word,
        "usec"
            | "usecs"
            | "msec"
            | "msecs"
            | "sec"
            | "secs"
            | "min"
            | "mins"
            | "hr"
            | "hrs"
            | "day"
            | "days"
    )
}

/// Attribute names recognised after `&`.
pub fn is_attr_name(word: &str) -> bool {
    matches!(
        word,
        "redef"
            | "priority"
            | "log"
            | "optional"
            | "default"
            | "default_insert"
            | "add_func"
            | "delete_func"
            | "expire_func"
            | "read_expire"
            | "write_expire"
            | "create_expire"
            | "raw_output"
            | "error_handler"
            | "type_column"
            | "deprecated"
            | "on_change"
            | "broker_store"
            | "broker_allow_complex_type"
            | "backend"
            | "is_assigned"
            | "is_used"
            | "group"
            | "ordered"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::Point;

    #[test]
    fn test_extra_kinds() {
        assert!(TokenKind::Newline.is_extra());
        assert!(TokenKind::Comment(CommentKind::Minor).is_extra());
        assert!(!TokenKind::Ident.is_extra());
        assert!(!TokenKind::Unknown.is_extra());
    }

    #[test]
    fn test_ends_operand() {
        assert!(TokenKind::Ident.ends_operand("x"));
        assert!(TokenKind::Punct.ends_operand(")"));
        assert!(TokenKind::Punct.ends_operand("]"));
        assert!(!TokenKind::Punct.ends_operand("("));
        assert!(!TokenKind::Keyword.ends_operand("return"));
    }

    #[test]
    fn test_token_text() {
        let src = "global x;";
        let tok = Token::new(
            TokenKind::Ident,
            Span::new(7, 8, Point::new(0, 7), Point::new(0, 8)),
        );
        assert_eq!(tok.text(src), "x");
    }

    #[test]
    fn test_word_tables() {
        assert!(is_keyword("schedule"));
        assert!(!is_keyword("zeek_init"));
        assert!(is_interval_unit("mins"));
        assert!(!is_interval_unit("minute"));
        assert!(is_attr_name("default_insert"));
        assert!(!is_attr_name("bogus"));
    }
}
