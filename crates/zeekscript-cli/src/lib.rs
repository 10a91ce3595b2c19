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


//! Command-line tools for Zeek scripts.
//!
//! # Commands
//!
//! - **format**: format scripts to stdout or in place, with directory
//!   recursion, check mode and parallel batch processing
//! - **parse**: print a script's syntax tree
//! - **completion**: generate shell completion scripts
//!
//! The `zeek-format` binary is shorthand for `zeek-script format`.
//!
//! # Examples
//!
//! ```no_run
//! use zeekscript_cli::commands::{format, FormatOptions};
//!
//! # fn main() -> Result<(), zeekscript_cli::error::CliError> {
//! // Fail if any script under policy/ is not formatted
//! let options = FormatOptions {
//!     recursive: true,
//!     check: true,
//!     ..Default::default()
//! };
//! format(&["policy".to_string()], &options)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Environment
//!
//! - `ZEEKSCRIPT_LOG`: log filter, e.g. `debug` (default `warn`)
//! - `ZEEKSCRIPT_MAX_FILE_SIZE`: largest accepted input in bytes
//!   (default 1 GB)

pub mod batch;
pub mod cli;
pub mod commands;
pub mod error;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "ZEEKSCRIPT_LOG";

/// Install the stderr log subscriber.
///
/// The filter comes from `ZEEKSCRIPT_LOG` and defaults to `warn`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed, e.g. by a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
