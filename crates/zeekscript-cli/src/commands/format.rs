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


//! Format command - Zeek script formatting

use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;
use tracing::{info, warn};
use zeekscript_core::{ParseLimits, Script};
use zeekscript_fmt::{format_with_config, FormatConfig};

use super::{collect_files, max_file_size, read_file, write_output};
use crate::batch::{BatchConfig, BatchProcessor, FormatOperation};
use crate::error::CliError;

/// Options of the `format` command.
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    /// Rewrite files in place instead of printing them
    pub inplace: bool,
    /// Descend into directories
    pub recursive: bool,
    /// Only report files whose formatting would change
    pub check: bool,
    /// Format files on the Rayon pool
    pub parallel: bool,
    /// Worker threads for parallel formatting; `None` uses Rayon's default
    pub jobs: Option<usize>,
    /// Report progress per file
    pub verbose: bool,
    /// Refuse to format scripts with syntax errors
    pub strict: bool,
    /// Formatter settings
    pub config: FormatConfig,
}

/// Result of formatting one script.
#[derive(Debug, Clone)]
pub struct FormatOutcome {
    /// The formatted script
    pub output: String,
    /// Whether the output differs from the input
    pub changed: bool,
    /// Parse problem, as `file:line: message` plus the source line
    pub warning: Option<String>,
}

/// Parse and format one script's source text.
///
/// Scripts with syntax errors are formatted anyway and the first error is
/// returned as a warning, unless `strict` is set.
///
/// # Errors
///
/// Returns `Err` if the source exceeds the parse limits, or if `strict` is
/// set and the script has syntax errors.
///
/// # Examples
///
/// ```
/// use zeekscript_cli::commands::format_source;
/// use zeekscript_fmt::FormatConfig;
///
/// # fn main() -> Result<(), zeekscript_cli::error::CliError> {
/// let outcome = format_source("x.zeek", "global  x=1 ;".to_string(), false, &FormatConfig::default())?;
/// assert_eq!(outcome.output, "global x = 1;\n");
/// assert!(outcome.changed);
/// # Ok(())
/// # }
/// ```
pub fn format_source(
    name: &str,
    source: String,
    strict: bool,
    config: &FormatConfig,
) -> Result<FormatOutcome, CliError> {
    let limits = ParseLimits {
        max_file_size: usize::try_from(max_file_size()).unwrap_or(usize::MAX),
        ..ParseLimits::default()
    };
    let mut script = Script::from_source(source).with_limits(limits);

    let mut warning = None;
    if !script.parse()? {
        if let Some(err) = script.error() {
            let line = err.line + 1;
            let text = format!("{name}:{line}: {}\n    {}", err.message, err.line_text.trim_end());
            if strict {
                return Err(CliError::parse(text));
            }
            warn!(file = name, line, "{}", err.message);
            warning = Some(text);
        }
    }

    let output = format_with_config(&script, config)?;
    let changed = output != script.source();
    Ok(FormatOutcome {
        output,
        changed,
        warning,
    })
}

/// Format Zeek scripts.
///
/// With no inputs, or the single input `-`, reads standard input. Other
/// inputs are files or, with `recursive`, directories. Formatted scripts go
/// to stdout unless `inplace` is set; `check` only reports files that would
/// change.
///
/// # Errors
///
/// Returns `Err` if any file fails to read, parse (in strict mode) or
/// write, or in check mode if any file would change.
///
/// # Examples
///
/// ```no_run
/// use zeekscript_cli::commands::{format, FormatOptions};
///
/// # fn main() -> Result<(), zeekscript_cli::error::CliError> {
/// // Rewrite every script under policy/ in parallel
/// let options = FormatOptions {
///     inplace: true,
///     recursive: true,
///     parallel: true,
///     ..Default::default()
/// };
/// format(&["policy".to_string()], &options)?;
/// # Ok(())
/// # }
/// ```
pub fn format(files: &[String], options: &FormatOptions) -> Result<(), CliError> {
    if files.is_empty() || (files.len() == 1 && files[0] == "-") {
        return format_stdin(options);
    }
    if files.iter().any(|f| f == "-") {
        return Err(CliError::invalid_input(
            "'-' cannot be combined with other inputs",
        ));
    }

    let paths = collect_files(files, options.recursive)?;
    let processor = BatchProcessor::new(BatchConfig {
        parallel_threshold: if options.parallel { 2 } else { usize::MAX },
        max_threads: options.jobs,
        verbose: options.verbose,
        ..BatchConfig::default()
    });
    let operation = FormatOperation {
        inplace: options.inplace && !options.check,
        strict: options.strict,
        config: options.config.clone(),
    };
    let results = processor.process(&paths, operation, options.verbose)?;

    if let [only] = results.results.as_slice() {
        if let Err(e) = &only.result {
            return Err(e.clone());
        }
    }

    let mut stdout = io::stdout().lock();
    let mut unformatted = 0;
    for file in &results.results {
        let outcome = match &file.result {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("{} {}: {}", "error:".red().bold(), file.path.display(), e);
                continue;
            }
        };
        report_warning(outcome);

        if options.check {
            if outcome.changed {
                unformatted += 1;
                eprintln!("would reformat {}", file.path.display());
            }
        } else if !options.inplace {
            stdout
                .write_all(outcome.output.as_bytes())
                .map_err(|e| CliError::io_error("-", e))?;
        }
    }

    info!(
        files = results.total_files(),
        failed = results.failure_count(),
        elapsed_ms = results.elapsed_ms as u64,
        "format finished"
    );

    if results.has_failures() {
        return Err(CliError::BatchFailed {
            failed: results.failure_count(),
            total: results.total_files(),
        });
    }
    if unformatted > 0 {
        return Err(CliError::NotFormatted { count: unformatted });
    }
    Ok(())
}

fn format_stdin(options: &FormatOptions) -> Result<(), CliError> {
    if options.inplace && !options.check {
        return Err(CliError::invalid_input(
            "cannot format standard input in place",
        ));
    }

    let source = read_file(Path::new("-"))?;
    let outcome = format_source("-", source, options.strict, &options.config)?;
    report_warning(&outcome);

    if options.check {
        if outcome.changed {
            return Err(CliError::NotFormatted { count: 1 });
        }
        return Ok(());
    }
    write_output(&outcome.output, None)
}

fn report_warning(outcome: &FormatOutcome) {
    if let Some(warning) = &outcome.warning {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
}
