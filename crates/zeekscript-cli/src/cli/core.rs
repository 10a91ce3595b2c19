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


//! Script commands: formatting and tree output.

use clap::{Args, Subcommand};
use zeekscript_fmt::FormatConfig;

use crate::commands::{self, FormatOptions};
use crate::error::CliError;

/// Arguments of `format`, shared with the `zeek-format` binary.
#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    /// Scripts or directories to format; `-` or nothing reads stdin
    #[arg(value_name = "FILES")]
    pub files: Vec<String>,

    /// Rewrite files in place
    #[arg(short, long)]
    pub inplace: bool,

    /// Format the *.zeek files of directories, recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Check only (exit 1 if any file would change)
    #[arg(long)]
    pub check: bool,

    /// Format files in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Number of worker threads with --parallel
    #[arg(short = 'j', long, value_name = "N", requires = "parallel")]
    pub jobs: Option<usize>,

    /// Report each file
    #[arg(short, long)]
    pub verbose: bool,

    /// Fail on scripts with syntax errors instead of formatting them
    #[arg(long)]
    pub strict: bool,

    /// Never break long lines
    #[arg(long)]
    pub no_linebreaks: bool,
}

impl FormatArgs {
    /// Run the format command.
    ///
    /// # Errors
    ///
    /// See [`commands::format`].
    pub fn execute(self) -> Result<(), CliError> {
        let options = FormatOptions {
            inplace: self.inplace,
            recursive: self.recursive,
            check: self.check,
            parallel: self.parallel,
            jobs: self.jobs,
            verbose: self.verbose,
            strict: self.strict,
            config: FormatConfig::builder().linebreaks(!self.no_linebreaks).build(),
        };
        commands::format(&self.files, &options)
    }
}

/// Script commands.
#[derive(Subcommand)]
pub enum CoreCommands {
    /// Format Zeek scripts
    ///
    /// Writes formatted scripts to stdout, or rewrites them with
    /// --inplace. Scripts with syntax errors are formatted too; their
    /// unparseable parts stay as they are.
    Format(FormatArgs),

    /// Print a script's syntax tree
    ///
    /// One line per node with its span and, for named nodes, its text.
    Parse {
        /// Input file path, `-` for stdin
        #[arg(value_name = "FILE")]
        file: String,

        /// Include comments and newlines
        #[arg(short, long)]
        concrete: bool,

        /// Print node counts after the tree
        #[arg(short, long)]
        stats: bool,
    },
}

impl CoreCommands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the command fails.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            CoreCommands::Format(args) => args.execute(),
            CoreCommands::Parse {
                file,
                concrete,
                stats,
            } => commands::parse(&file, concrete, stats),
        }
    }
}
