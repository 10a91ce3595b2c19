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


//! # zeekscript
//!
//! Parsing and formatting of Zeek scripts.
//!
//! ## Quick Start
//!
//! ```rust
//! use zeekscript::{format, parse};
//!
//! let source = "event zeek_init() { print  \"hi\" ; }";
//!
//! // Parse into a concrete syntax tree
//! let script = parse(source).expect("within parse limits");
//! assert!(!script.has_error());
//!
//! // Reformat
//! let formatted = format(source).expect("within parse limits");
//! assert_eq!(formatted, "event zeek_init()\n\t{\n\tprint \"hi\";\n\t}\n");
//! ```
//!
//! ## Modules
//!
//! - [`lex`]: tokens and source positions
//! - [`tree`]: the concrete syntax tree
//! - [`fmt`](mod@fmt): formatter configuration and output stream

pub use zeekscript_core::{
    parse_tree, walk, Node, NodeId, ParseErrorInfo, ParseLimits, Script, Symbol, Traverse, Tree,
    TreeStats, TreeVisitor, ZeekError, ZeekErrorKind, ZeekResult,
};

mod error_ext;
pub use error_ext::ZeekResultExt;

pub mod lex {
    //! Tokens and source positions
    pub use zeekscript_core::lex::{tokenize, CommentKind, ConstKind, Point, Span, Token, TokenKind};
}

pub mod tree {
    //! The concrete syntax tree
    pub use zeekscript_core::tree::{Node, NodeId, Symbol, Tree};
}

pub mod fmt {
    //! Formatting
    pub use zeekscript_fmt::{
        format, format_str, format_to, format_with_config, FormatConfig, FormatConfigBuilder,
        Hints, OutputStream,
    };
}

/// Parse source text into a [`Script`].
///
/// Syntax errors do not fail the parse; check [`Script::has_error`].
///
/// # Examples
///
/// ```rust
/// use zeekscript::parse;
///
/// let script = parse("global x = 1;").unwrap();
/// assert!(script.tree().is_some());
/// ```
#[inline]
pub fn parse(source: &str) -> ZeekResult<Script> {
    let mut script = Script::from_source(source);
    script.parse()?;
    Ok(script)
}

/// Format source text with the default configuration.
///
/// # Examples
///
/// ```rust
/// assert_eq!(zeekscript::format("global  x=1 ;").unwrap(), "global x = 1;\n");
/// ```
#[inline]
pub fn format(source: &str) -> ZeekResult<String> {
    zeekscript_fmt::format_str(source)
}

/// Check source text for syntax errors.
///
/// The first error is returned as a syntax error carrying its 0-based line,
/// column and source line.
///
/// # Examples
///
/// ```rust
/// assert!(zeekscript::validate("global x = 1;").is_ok());
///
/// let err = zeekscript::validate("global x = 1;\nglobal = ;").unwrap_err();
/// assert_eq!(err.line, 1);
/// ```
pub fn validate(source: &str) -> ZeekResult<()> {
    let script = parse(source)?;
    match script.error() {
        None => Ok(()),
        Some(info) => Err(ZeekError::syntax(info.message, info.line)
            .with_column(info.column)
            .with_context(info.line_text)),
    }
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_errors() {
        let script = parse("global = ;").unwrap();
        assert!(script.has_error());
    }

    #[test]
    fn test_validate_reports_position() {
        let err = validate("global x = 1;\n  global = ;\n").unwrap_err();
        assert_eq!(err.kind, ZeekErrorKind::Syntax);
        assert_eq!(err.line, 1);
        assert_eq!(err.column, Some(2));
        assert_eq!(err.context.as_deref(), Some("  global = ;"));
    }

    #[test]
    fn test_format_matches_fmt_crate() {
        let src = "if(a)print 1;";
        assert_eq!(format(src).unwrap(), fmt::format_str(src).unwrap());
    }

    #[test]
    fn test_parse_limits_apply() {
        let mut script = Script::from_source("global x = 1;").with_limits(ParseLimits {
            max_file_size: 4,
            ..ParseLimits::default()
        });
        let err = script.parse().unwrap_err();
        assert_eq!(err.kind, ZeekErrorKind::Security);
    }
}
