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


//! CLI command definitions and argument parsing.
//!
//! - [`core`]: script commands (format, parse)
//! - [`utility`]: utility commands (completion)

mod core;
mod utility;

use clap::{Parser, Subcommand};

pub use self::core::{CoreCommands, FormatArgs};
pub use self::utility::UtilityCommands;

use crate::error::CliError;

/// Zeek script parser and formatter
///
/// # Examples
///
/// ```bash
/// # Format a script to stdout
/// zeek-script format local.zeek
///
/// # Rewrite every script below a directory in parallel
/// zeek-script format -i -r -p policy/
///
/// # Show the concrete syntax tree
/// zeek-script parse -c local.zeek
/// ```
#[derive(Parser)]
#[command(name = "zeek-script")]
#[command(author, version, about = "Zeek script parser and formatter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
///
/// ```text
/// Commands
/// ├── Core (format, parse)
/// └── Utility (completion)
/// ```
#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Core(CoreCommands),

    #[command(flatten)]
    Utility(UtilityCommands),
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if file I/O fails, a script cannot be formatted, or a
    /// check finds unformatted scripts.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Core(cmd) => cmd.execute(),
            Commands::Utility(cmd) => cmd.execute(),
        }
    }
}
