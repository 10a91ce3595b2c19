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


//! Parse command - syntax tree output

use std::io::{self, BufWriter, Write};
use std::path::Path;

use colored::Colorize;
use tracing::warn;
use zeekscript_core::{walk, Script, TreeStats};

use super::read_file;
use crate::error::CliError;

/// Parse a script and print its syntax tree.
///
/// Prints one line per node, indented by nesting depth. With `concrete`,
/// newlines and comments are included, marked `v ` when they lead a node
/// and `^ ` when they trail one. With `stats`, a node count summary
/// follows the tree.
///
/// The tree is printed even when the script has syntax errors; the first
/// error is then reported on stderr and the command fails.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read, exceeds the parse limits, or
/// has syntax errors.
///
/// # Examples
///
/// ```no_run
/// use zeekscript_cli::commands::parse;
///
/// # fn main() -> Result<(), zeekscript_cli::error::CliError> {
/// // AST only
/// parse("local.zeek", false, false)?;
///
/// // Include comments and newlines
/// parse("local.zeek", true, false)?;
/// # Ok(())
/// # }
/// ```
pub fn parse(file: &str, concrete: bool, stats: bool) -> Result<(), CliError> {
    let source = read_file(Path::new(file))?;
    let mut script = Script::from_source(source);
    let clean = script.parse()?;

    let mut out = BufWriter::new(io::stdout().lock());
    script.write_tree(&mut out, concrete)?;

    if stats {
        if let Some(tree) = script.tree() {
            let mut counts = TreeStats::default();
            walk(tree, concrete, &mut counts).unwrap_or_else(|never| match never {});
            write_stats(&mut out, &counts).map_err(|e| CliError::io_error("-", e))?;
        }
    }
    out.flush().map_err(|e| CliError::io_error("-", e))?;

    if clean {
        return Ok(());
    }
    match script.error() {
        Some(err) => {
            warn!(file, line = err.line + 1, "{}", err.message);
            Err(CliError::parse(format!(
                "{file}:{}: {}\n    {}",
                err.line + 1,
                err.message,
                err.line_text.trim_end()
            )))
        }
        None => Err(CliError::parse(format!("{file}: syntax error"))),
    }
}

fn write_stats<W: Write>(out: &mut W, stats: &TreeStats) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "Statistics:".cyan())?;
    writeln!(out, "  {} {}", "Nodes:".bright_cyan(), stats.nodes)?;
    writeln!(out, "  {} {}", "Named:".bright_cyan(), stats.named)?;
    writeln!(out, "  {} {}", "Comments:".bright_cyan(), stats.comments)?;
    writeln!(out, "  {} {}", "Newlines:".bright_cyan(), stats.newlines)?;
    writeln!(out, "  {} {}", "Max nesting:".bright_cyan(), stats.max_nesting)?;
    let errors = if stats.errors > 0 {
        stats.errors.to_string().red().bold()
    } else {
        stats.errors.to_string().green()
    };
    writeln!(out, "  {} {}", "Errors:".bright_cyan(), errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_stats_lists_counts() {
        let mut script = Script::from_source("# c\nglobal x = 1;\n");
        script.parse().unwrap();
        let mut counts = TreeStats::default();
        walk(script.tree().unwrap(), true, &mut counts).unwrap();

        let mut buf = Vec::new();
        write_stats(&mut buf, &counts).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Comments:"));
        assert!(text.contains("Errors:"));
    }
}
