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

//! Zeek script formatting
//!
//! Reformats parsed Zeek scripts into the standard Zeek layout.
//!
//! # Overview
//!
//! The formatter walks a [`zeekscript_core::Tree`] and writes every node
//! through an [`OutputStream`]:
//!
//! - **Indentation**: one tab per nesting level; Whitesmiths-style
//!   function bodies, K&R-style blocks under `if`, `for`, `while` and
//!   `when`
//! - **Spacing**: normalized around keywords and operators, tight for field
//!   access, indexing, calls and unary operators, padded inside `( ... )`
//! - **Comments**: preserved; blank-line runs collapse to one; `##<`
//!   comments on consecutive lines share a column
//! - **Line wrapping**: lines beyond 80 columns break at hinted positions,
//!   continuation lines gain four spaces
//! - **Error tolerance**: unparseable regions are copied through verbatim
//!
//! Formatting is idempotent: formatting already formatted output changes
//! nothing.
//!
//! # Examples
//!
//! ```
//! use zeekscript_core::Script;
//! use zeekscript_fmt::{format, format_with_config, FormatConfig};
//!
//! # fn main() -> Result<(), zeekscript_core::ZeekError> {
//! let mut script = Script::from_source("event zeek_init() { print  \"hi\" ; }");
//! script.parse()?;
//!
//! let output = format(&script)?;
//! assert_eq!(output, "event zeek_init()\n\t{\n\tprint \"hi\";\n\t}\n");
//!
//! // Never wrap long lines
//! let config = FormatConfig::builder().linebreaks(false).build();
//! let output = format_with_config(&script, &config)?;
//! assert!(output.starts_with("event zeek_init()"));
//! # Ok(())
//! # }
//! ```

mod config;
mod formatter;
mod hint;
mod output;

pub use config::{FormatConfig, FormatConfigBuilder};
pub use hint::Hints;
pub use output::OutputStream;

use std::io::Write;

use tracing::debug;
use zeekscript_core::{Script, ZeekError, ZeekResult};

use crate::formatter::Formatter;

/// Format a parsed script with the default configuration.
///
/// # Errors
///
/// Returns a syntax error if the script has not been parsed.
///
/// # Examples
///
/// ```
/// use zeekscript_core::Script;
///
/// let mut script = Script::from_source("global  x=1 ;");
/// script.parse().unwrap();
/// assert_eq!(zeekscript_fmt::format(&script).unwrap(), "global x = 1;\n");
/// ```
pub fn format(script: &Script) -> ZeekResult<String> {
    format_with_config(script, &FormatConfig::default())
}

/// Format a parsed script with custom configuration.
///
/// Scripts with syntax errors format too; the erroneous regions are copied
/// through as they are.
///
/// # Errors
///
/// Returns a syntax error if the script has not been parsed.
pub fn format_with_config(script: &Script, config: &FormatConfig) -> ZeekResult<String> {
    let buf = format_to(script, Vec::with_capacity(script.source().len()), config)?;
    String::from_utf8(buf).map_err(|e| ZeekError::io(format!("formatter produced invalid UTF-8: {e}")))
}

/// Format a parsed script into a writer, returning the writer.
///
/// # Errors
///
/// Returns a syntax error if the script has not been parsed, or an I/O
/// error if writing fails.
pub fn format_to<W: Write>(script: &Script, out: W, config: &FormatConfig) -> ZeekResult<W> {
    let tree = script
        .tree()
        .ok_or_else(|| ZeekError::syntax("script has not been parsed", 0))?;

    debug!(
        nodes = tree.len(),
        has_error = tree.has_error(),
        max_line_len = config.max_line_len,
        "formatting script"
    );

    let out = Formatter::new(script.source(), tree, out, config.clone()).run()?;
    Ok(out)
}

/// Parse and format source text in one go.
///
/// # Errors
///
/// Returns a security error if the source exceeds the default parse limits.
///
/// # Examples
///
/// ```
/// let output = zeekscript_fmt::format_str("module  Foo ;").unwrap();
/// assert_eq!(output, "module Foo;\n");
/// ```
pub fn format_str(source: &str) -> ZeekResult<String> {
    let mut script = Script::from_source(source);
    script.parse()?;
    format(&script)
}
