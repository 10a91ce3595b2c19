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

//! The [`Script`] type: a Zeek script's source plus its syntax tree.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{ZeekError, ZeekResult};
use crate::limits::ParseLimits;
use crate::parser::parse_tree;
use crate::traverse::Traverse;
use crate::tree::{NodeId, Symbol, Tree};

/// Bytes of node payload shown per line by [`Script::write_tree`].
const TREE_PAYLOAD_BYTES: usize = 100;

/// Bytes of offending source quoted in parse error messages.
const ERROR_SNIPPET_BYTES: usize = 50;

/// Location and description of the first syntax error in a script.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseErrorInfo {
    /// The full source line the error starts on.
    pub line_text: String,
    /// 0-based line number.
    pub line: usize,
    /// 0-based column of the error's first character.
    pub column: usize,
    /// Human-readable description, e.g.
    /// `cannot parse line 2, col 1: "b count;"`.
    pub message: String,
}

/// A Zeek script.
///
/// Construct one from text, a reader or a path, then call
/// [`parse`](Script::parse) to build its tree.
#[derive(Debug, Clone)]
pub struct Script {
    source: String,
    limits: ParseLimits,
    tree: Option<Tree>,
}

impl Script {
    /// Creates a script from in-memory source text.
    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            limits: ParseLimits::default(),
            tree: None,
        }
    }

    /// Reads a script from any reader. Input must be valid UTF-8.
    pub fn from_reader<R: Read>(mut reader: R) -> ZeekResult<Self> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Ok(Self::from_source(source))
    }

    /// Reads a script from a file; `-` reads standard input.
    pub fn from_path(path: impl AsRef<Path>) -> ZeekResult<Self> {
        let path = path.as_ref();
        if path.as_os_str() == "-" {
            return Self::from_reader(io::stdin().lock());
        }
        let source = fs::read_to_string(path)
            .map_err(|e| ZeekError::io(format!("{}: {}", path.display(), e)))?;
        Ok(Self::from_source(source))
    }

    /// Replaces the resource limits used by [`parse`](Script::parse).
    pub fn with_limits(mut self, limits: ParseLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Parses the source into a syntax tree.
    ///
    /// Returns `Ok(true)` for a clean parse and `Ok(false)` when the tree
    /// contains error nodes; the tree is usable either way and
    /// [`error`](Script::error) describes the first problem.
    ///
    /// # Errors
    ///
    /// Fails only when the input exceeds the configured [`ParseLimits`].
    pub fn parse(&mut self) -> ZeekResult<bool> {
        let tree = parse_tree(&self.source, &self.limits)?;
        let clean = !tree.has_error();
        debug!(bytes = self.source.len(), clean, "parsed script");
        self.tree = Some(tree);
        Ok(clean)
    }

    /// The script's source text.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The syntax tree, once [`parse`](Script::parse) has run.
    #[inline]
    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    /// Whether the parsed tree contains error nodes.
    pub fn has_error(&self) -> bool {
        self.tree.as_ref().is_some_and(Tree::has_error)
    }

    /// Describes the first error node in preorder, if any.
    pub fn error(&self) -> Option<ParseErrorInfo> {
        let tree = self.tree.as_ref()?;
        if !tree.has_error() {
            return None;
        }
        // A single skipped token is an extra, not part of the AST.
        let (id, _) =
            Traverse::new(tree, true).find(|&(id, _)| tree.node(id).symbol == Symbol::Error)?;
        let node = tree.node(id);

        let bytes = tree.text(id, &self.source).as_bytes();
        let snippet = if bytes.len() > ERROR_SNIPPET_BYTES {
            format!("{}[...]", String::from_utf8_lossy(&bytes[..ERROR_SNIPPET_BYTES]))
        } else {
            String::from_utf8_lossy(bytes).into_owned()
        };

        let row = node.span.start.row;
        Some(ParseErrorInfo {
            line_text: self.source.split('\n').nth(row).unwrap_or("").to_string(),
            line: row,
            column: node.span.start.column,
            message: format!(
                "cannot parse line {}, col {}: \"{}\"",
                row, node.span.start.column, snippet
            ),
        })
    }

    /// Preorder traversal of the tree, `None` before parsing.
    pub fn traverse(&self, include_cst: bool) -> Option<Traverse<'_>> {
        self.tree.as_ref().map(|t| Traverse::new(t, include_cst))
    }

    /// Writes one line per node: indentation by nesting, a `v `/`^ `
    /// marker for leading/trailing extras, the node type, its span and,
    /// for named nodes, a quoted excerpt of its text.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing fails, or a syntax error if the
    /// script has not been parsed.
    pub fn write_tree<W: Write>(&self, out: &mut W, include_cst: bool) -> ZeekResult<()> {
        let tree = self
            .tree
            .as_ref()
            .ok_or_else(|| ZeekError::syntax("script has not been parsed", 0))?;
        for (id, nesting) in Traverse::new(tree, include_cst) {
            writeln!(out, "{}", self.node_line(tree, id, nesting))?;
        }
        Ok(())
    }

    fn node_line(&self, tree: &Tree, id: NodeId, nesting: usize) -> String {
        let node = tree.node(id);
        let marker = if node.is_ast {
            ""
        } else if node.is_cst_next_node {
            "^ "
        } else if node.is_cst_prev_node {
            "v "
        } else {
            ""
        };

        let mut line = format!(
            "{}{}{} {}",
            " ".repeat(4 * nesting),
            marker,
            tree.type_name(id, &self.source),
            node.span
        );
        if node.is_named() {
            let bytes = tree.text(id, &self.source).as_bytes();
            let payload = &bytes[..bytes.len().min(TREE_PAYLOAD_BYTES)];
            line.push(' ');
            line.push_str(&quote_ascii(payload));
        }
        line
    }
}

/// Quotes the ASCII bytes of `bytes`, dropping anything non-ASCII. Single
/// quotes unless the text holds only single quotes, control bytes escaped.
fn quote_ascii(bytes: &[u8]) -> String {
    let ascii: Vec<u8> = bytes.iter().copied().filter(u8::is_ascii).collect();
    let quote = if ascii.contains(&b'\'') && !ascii.contains(&b'"') {
        b'"'
    } else {
        b'\''
    };

    let mut out = String::with_capacity(ascii.len() + 2);
    out.push(quote as char);
    for &b in &ascii {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            _ if b == quote => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7e => out.push(b as char),
            _ => out.push_str(&format!("\\x{b:02x}")),
        }
    }
    out.push(quote as char);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_dump(src: &str, include_cst: bool) -> String {
        let mut script = Script::from_source(src);
        assert!(script.parse().unwrap());
        let mut out = Vec::new();
        script.write_tree(&mut out, include_cst).unwrap();
        String::from_utf8(out).unwrap()
    }

    // ==================== write_tree tests ====================

    #[test]
    fn test_write_ast() {
        let baseline = r"source_file (0.0,1.0) 'event zeek_init() { }\n'
    decl (0.0,0.21) 'event zeek_init() { }'
        func_decl (0.0,0.21) 'event zeek_init() { }'
            func_hdr (0.0,0.17) 'event zeek_init()'
                event (0.0,0.17) 'event zeek_init()'
                    event (0.0,0.5)
                    id (0.6,0.15) 'zeek_init'
                    func_params (0.15,0.17) '()'
                        ( (0.15,0.16)
                        ) (0.16,0.17)
            func_body (0.18,0.21) '{ }'
                { (0.18,0.19)
                } (0.20,0.21)
";
        assert_eq!(tree_dump("event zeek_init() { }\n", false), baseline);
    }

    #[test]
    fn test_write_cst() {
        let baseline = r"source_file (0.0,2.0) '# A comment.\nevent zeek_init() { }\n'
    v minor_comment (0.0,0.12) '# A comment.'
    v nl (0.12,1.0) '\n'
    decl (1.0,1.21) 'event zeek_init() { }'
        func_decl (1.0,1.21) 'event zeek_init() { }'
            func_hdr (1.0,1.17) 'event zeek_init()'
                event (1.0,1.17) 'event zeek_init()'
                    event (1.0,1.5)
                    id (1.6,1.15) 'zeek_init'
                    func_params (1.15,1.17) '()'
                        ( (1.15,1.16)
                        ) (1.16,1.17)
            func_body (1.18,1.21) '{ }'
                { (1.18,1.19)
                } (1.20,1.21)
                ^ nl (1.21,2.0) '\n'
";
        assert_eq!(tree_dump("# A comment.\nevent zeek_init() { }\n", true), baseline);
    }

    #[test]
    fn test_write_tree_requires_parse() {
        let script = Script::from_source("global x;");
        let mut out = Vec::new();
        assert!(script.write_tree(&mut out, false).is_err());
    }

    #[test]
    fn test_quote_ascii() {
        assert_eq!(quote_ascii(b"a\tb"), r"'a\tb'");
        assert_eq!(quote_ascii(b"it's"), r#""it's""#);
        assert_eq!(quote_ascii(b"'\""), r#"'\'"'"#);
        assert_eq!(quote_ascii("caf\u{e9}".as_bytes()), "'caf'");
        assert_eq!(quote_ascii(b"\x01"), r"'\x01'");
    }

    // ==================== Error reporting tests ====================

    #[test]
    fn test_error_in_record_field() {
        let mut script = Script::from_source("type foo: record {\n\ta: count;\n\tb count;\n};\n");
        assert!(!script.parse().unwrap());
        assert!(script.has_error());
        let info = script.error().unwrap();
        assert_eq!(info.line, 2);
        assert_eq!(info.line_text, "\tb count;");
        assert_eq!(info.message, "cannot parse line 2, col 1: \"b count;\"");
    }

    #[test]
    fn test_error_snippet_is_capped() {
        let src = format!("x {};", "y ".repeat(40));
        let mut script = Script::from_source(src);
        assert!(!script.parse().unwrap());
        let info = script.error().unwrap();
        assert!(info.message.ends_with("[...]\""));
        assert!(info.message.starts_with("cannot parse line 0, col 0: \"x y y"));
    }

    #[test]
    fn test_clean_script_has_no_error() {
        let mut script = Script::from_source("global x = 1;\n");
        assert!(script.parse().unwrap());
        assert!(script.error().is_none());
    }

    #[test]
    fn test_from_reader() {
        let script = Script::from_reader("print 1;".as_bytes()).unwrap();
        assert_eq!(script.source(), "print 1;");
        assert!(script.tree().is_none());
    }

    #[test]
    fn test_from_missing_path() {
        let err = Script::from_path("/nonexistent/dir/x.zeek").unwrap_err();
        assert_eq!(err.kind, crate::ZeekErrorKind::IO);
    }

    #[test]
    fn test_limits_enforced() {
        let limits = ParseLimits {
            max_file_size: 3,
            ..ParseLimits::default()
        };
        let mut script = Script::from_source("global x;").with_limits(limits);
        assert!(script.parse().is_err());
    }
}
