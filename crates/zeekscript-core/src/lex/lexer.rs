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

//! The Zeek script lexer.
//!
//! Produces a flat token vector covering the whole input. Newlines and
//! comments are kept as tokens so the tree builder can attach them to the
//! concrete syntax tree; horizontal whitespace is dropped.

use memchr::memchr;
use tracing::debug;

use super::span::{Point, Span};
use super::token::{is_attr_name, is_keyword, CommentKind, ConstKind, Token, TokenKind};

const PUNCT2: &[&str] = &[
    "?$", "==", "!=", "<=", ">=", "&&", "||", "+=", "-=", "++", "--",
];
const PUNCT1: &[u8] = b"$&|^~!<>=+-*/%()[]{},;:?";

/// How the lexer treats text following a preprocessor directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirectiveMode {
    Off,
    /// Next word is a path (`@load`).
    Path,
    /// A path follows the next `=` or `+=` (`@prefixes`).
    AfterAssign,
    /// The rest of the line is one argument (`@pragma`).
    RestOfLine,
}

/// Tokenizes a complete source text.
///
/// # Examples
///
/// ```
/// use zeekscript_core::lex::{tokenize, TokenKind};
///
/// let tokens = tokenize("global x = 5;\n");
/// assert_eq!(tokens.len(), 6);
/// assert_eq!(tokens[0].kind, TokenKind::Keyword);
/// assert_eq!(tokens[5].kind, TokenKind::Newline);
/// ```
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

/// Single-pass lexer over a source string.
pub struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    point: Point,
    tokens: Vec<Token>,
    prev_operand: bool,
    /// Bracket depth at each `|` that opened a length expression.
    open_bars: Vec<usize>,
    /// Nesting of `(`, `[` and `{`.
    bracket_depth: usize,
    directive: DirectiveMode,
}

#[inline]
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

#[inline]
fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Length of a dotted-quad IPv4 address at the start of `bytes`.
fn match_ipv4(bytes: &[u8]) -> Option<usize> {
    let mut len = 0;
    for part in 0..4 {
        if part > 0 {
            if bytes.get(len) != Some(&b'.') {
                return None;
            }
            len += 1;
        }
        let digits = count_digits(&bytes[len..]);
        if digits == 0 || digits > 3 {
            return None;
        }
        len += digits;
    }
    Some(len)
}

/// Length of a `/width` suffix at the start of `bytes`, if any.
fn match_width(bytes: &[u8]) -> usize {
    if bytes.first() == Some(&b'/') {
        let digits = count_digits(&bytes[1..]);
        if digits > 0 {
            return digits + 1;
        }
    }
    0
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            point: Point::default(),
            tokens: Vec::new(),
            prev_operand: false,
            open_bars: Vec::new(),
            bracket_depth: 0,
            directive: DirectiveMode::Off,
        }
    }

    /// Runs the lexer to the end of input.
    pub fn tokenize(mut self) -> Vec<Token> {
        while self.pos < self.bytes.len() {
            self.next_token();
        }
        debug!(tokens = self.tokens.len(), "lexed source");
        self.tokens
    }

    #[inline]
    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    #[inline]
    fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    fn advance(&mut self, len: usize) -> Span {
        let start = self.pos;
        let start_point = self.point;
        let end = (start + len).min(self.bytes.len());
        if let Some(text) = self.src.get(start..end) {
            self.point.advance(text);
        }
        self.pos = end;
        Span::new(start, end, start_point, self.point)
    }

    fn push(&mut self, kind: TokenKind, len: usize) {
        let span = self.advance(len);
        if !kind.is_extra() {
            let text = self.src.get(span.start_byte..span.end_byte).unwrap_or("");
            self.prev_operand = if kind == TokenKind::Punct {
                self.track_punct(text)
            } else {
                kind.ends_operand(text)
            };
            if self.directive == DirectiveMode::AfterAssign
                && kind == TokenKind::Punct
                && (text == "=" || text == "+=")
            {
                self.directive = DirectiveMode::Path;
            }
        }
        if kind == TokenKind::Newline {
            self.directive = DirectiveMode::Off;
        }
        self.tokens.push(Token::new(kind, span));
    }

    /// Updates bracket and `|` nesting for a punctuation token and returns
    /// whether it ends an operand.
    ///
    /// A `|` opens a length expression where no operand precedes it and
    /// closes the innermost one opened at the same bracket depth. Any other
    /// `|` is bitwise or.
    fn track_punct(&mut self, text: &str) -> bool {
        match text {
            "(" | "[" | "{" => self.bracket_depth += 1,
            ")" | "]" | "}" => self.bracket_depth = self.bracket_depth.saturating_sub(1),
            "|" if !self.prev_operand => self.open_bars.push(self.bracket_depth),
            "|" if self.open_bars.last() == Some(&self.bracket_depth) => {
                self.open_bars.pop();
                return true;
            }
            _ => {}
        }
        TokenKind::Punct.ends_operand(text)
    }

    fn next_token(&mut self) {
        let b = self.bytes[self.pos];

        match b {
            b' ' | b'\t' | 0x0c => {
                self.advance(1);
            }
            b'\r' if self.peek(1) == Some(b'\n') => self.push(TokenKind::Newline, 2),
            b'\r' => {
                self.advance(1);
            }
            b'\n' => self.push(TokenKind::Newline, 1),
            b'#' => self.lex_comment(),
            _ if matches!(self.directive, DirectiveMode::Path | DirectiveMode::RestOfLine) => {
                self.lex_directive_arg()
            }
            b'"' => self.lex_string(),
            b'@' => self.lex_directive(),
            b'&' => self.lex_ampersand(),
            b'/' if !self.prev_operand => self.lex_pattern(),
            b'[' if !self.prev_operand => self.lex_bracket(),
            b'0'..=b'9' => self.lex_number(),
            b'.' if self.peek(1).is_some_and(|c| c.is_ascii_digit()) => self.lex_number(),
            _ if is_ident_start(b) => self.lex_word(),
            b':' if self.peek(1) == Some(b':') && self.peek(2).is_some_and(is_ident_start) => {
                self.lex_word()
            }
            _ => self.lex_punct(),
        }
    }

    fn line_end(&self) -> usize {
        let rest = self.rest();
        let mut end = memchr(b'\n', rest).unwrap_or(rest.len());
        if end > 0 && end < rest.len() && rest[end - 1] == b'\r' {
            end -= 1;
        }
        end
    }

    fn lex_comment(&mut self) {
        let rest = self.rest();
        let kind = if rest.starts_with(b"##!") {
            CommentKind::ZeekygenHead
        } else if rest.starts_with(b"##<") {
            CommentKind::ZeekygenPrev
        } else if rest.starts_with(b"##") {
            CommentKind::ZeekygenNext
        } else {
            CommentKind::Minor
        };
        let len = self.line_end();
        self.push(TokenKind::Comment(kind), len);
    }

    fn lex_directive_arg(&mut self) {
        let len = if self.directive == DirectiveMode::RestOfLine {
            let line = &self.rest()[..self.line_end()];
            line.len() - line.iter().rev().take_while(|b| b.is_ascii_whitespace()).count()
        } else {
            self.rest()
                .iter()
                .take_while(|b| !b.is_ascii_whitespace())
                .count()
        };
        self.directive = DirectiveMode::Off;
        self.push(TokenKind::DirectiveArg, len.max(1));
    }

    fn lex_string(&mut self) {
        let rest = self.rest();
        let mut i = 1;
        while i < rest.len() {
            match rest[i] {
                b'\\' => i += 2,
                b'"' => {
                    self.push(TokenKind::Constant(ConstKind::String), i + 1);
                    return;
                }
                b'\n' => break,
                _ => i += 1,
            }
        }
        let len = self.line_end();
        self.push(TokenKind::Unknown, len);
    }

    fn lex_pattern(&mut self) {
        let rest = self.rest();
        let mut i = 1;
        while i < rest.len() {
            match rest[i] {
                b'\\' => i += 2,
                b'/' => {
                    let mut len = i + 1;
                    if rest.get(len) == Some(&b'i') && !rest.get(len + 1).is_some_and(|&c| is_ident_char(c)) {
                        len += 1;
                    }
                    self.push(TokenKind::Pattern, len);
                    return;
                }
                b'\n' => break,
                _ => i += 1,
            }
        }
        let len = self.line_end();
        self.push(TokenKind::Unknown, len);
    }

    fn lex_directive(&mut self) {
        let name_len = self.rest()[1..]
            .iter()
            .take_while(|&&c| is_ident_char(c) || c == b'-')
            .count();
        if name_len == 0 {
            self.push(TokenKind::Unknown, 1);
            return;
        }
        let name = self.src.get(self.pos..self.pos + 1 + name_len).unwrap_or("");
        let mode = match name {
            "@load" | "@load-sigs" | "@load-plugin" | "@unload" => DirectiveMode::Path,
            "@prefixes" => DirectiveMode::AfterAssign,
            "@pragma" => DirectiveMode::RestOfLine,
            _ => DirectiveMode::Off,
        };
        self.push(TokenKind::Directive, 1 + name_len);
        self.directive = mode;
    }

    fn lex_ampersand(&mut self) {
        let word_len = self.rest()[1..]
            .iter()
            .take_while(|&&c| is_ident_char(c))
            .count();
        if word_len > 0 && self.peek(1).is_some_and(is_ident_start) {
            let word = self.src.get(self.pos + 1..self.pos + 1 + word_len).unwrap_or("");
            if is_attr_name(word) {
                self.push(TokenKind::Attr, 1 + word_len);
                return;
            }
        }
        self.lex_punct();
    }

    /// `[` opens either a bracketed IPv6 address or an index/constructor.
    fn lex_bracket(&mut self) {
        let rest = self.rest();
        let inner = rest[1..]
            .iter()
            .take_while(|&&c| c.is_ascii_hexdigit() || c == b':' || c == b'.')
            .count();
        let colons = rest[1..1 + inner].iter().filter(|&&c| c == b':').count();
        if inner > 0 && colons >= 2 && rest.get(1 + inner) == Some(&b']') {
            let len = inner + 2;
            let width = match_width(&rest[len..]);
            let kind = if width > 0 { ConstKind::Subnet } else { ConstKind::Addr };
            self.push(TokenKind::Constant(kind), len + width);
            return;
        }
        self.push(TokenKind::Punct, 1);
    }

    fn lex_number(&mut self) {
        let rest = self.rest();

        if let Some(len) = match_ipv4(rest) {
            let width = match_width(&rest[len..]);
            let kind = if width > 0 { ConstKind::Subnet } else { ConstKind::Addr };
            self.push(TokenKind::Constant(kind), len + width);
            return;
        }

        if (rest.starts_with(b"0x") || rest.starts_with(b"0X"))
            && rest.get(2).is_some_and(|c| c.is_ascii_hexdigit())
        {
            let hex = rest[2..].iter().take_while(|c| c.is_ascii_hexdigit()).count();
            self.push(TokenKind::Constant(ConstKind::Number), 2 + hex);
            return;
        }

        let mut len = count_digits(rest);
        let mut is_float = false;
        if rest.get(len) == Some(&b'.') {
            let frac = count_digits(&rest[len + 1..]);
            if len > 0 || frac > 0 {
                len += 1 + frac;
                is_float = true;
            }
        }
        if matches!(rest.get(len), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(rest.get(len + 1), Some(b'+' | b'-')));
            let exp = count_digits(&rest[(len + 1 + sign).min(rest.len())..]);
            if exp > 0 {
                len += 1 + sign + exp;
                is_float = true;
            }
        }

        if !is_float && rest.get(len) == Some(&b'/') {
            for proto in ["tcp", "udp", "icmp", "unknown"] {
                let end = len + 1 + proto.len();
                if rest.get(len + 1..end) == Some(proto.as_bytes())
                    && !rest.get(end).is_some_and(|&c| is_ident_char(c))
                {
                    self.push(TokenKind::Constant(ConstKind::Port), end);
                    return;
                }
            }
        }

        self.push(TokenKind::Constant(ConstKind::Number), len);
    }

    fn lex_word(&mut self) {
        let rest = self.rest();
        let mut len = 0;
        let mut qualified = false;
        if rest.starts_with(b"::") {
            len = 2;
            qualified = true;
        }
        len += rest[len..].iter().take_while(|&&c| is_ident_char(c)).count();
        while rest[len..].starts_with(b"::") && rest.get(len + 2).is_some_and(|&c| is_ident_start(c)) {
            qualified = true;
            len += 2;
            len += rest[len..].iter().take_while(|&&c| is_ident_char(c)).count();
        }

        let word = self.src.get(self.pos..self.pos + len).unwrap_or("");
        let kind = if qualified {
            TokenKind::Ident
        } else if word == "T" || word == "F" {
            TokenKind::Constant(ConstKind::Bool)
        } else if is_keyword(word) {
            TokenKind::Keyword
        } else {
            TokenKind::Ident
        };
        self.push(kind, len);
    }

    fn lex_punct(&mut self) {
        let rest = self.rest();
        if rest.len() >= 2 && PUNCT2.iter().any(|p| p.as_bytes() == &rest[..2]) {
            self.push(TokenKind::Punct, 2);
        } else if PUNCT1.contains(&rest[0]) {
            self.push(TokenKind::Punct, 1);
        } else {
            let len = self.src[self.pos..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.push(TokenKind::Unknown, len);
        }
    }
}
