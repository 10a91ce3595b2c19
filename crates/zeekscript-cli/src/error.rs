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


//! Structured error types for the zeekscript CLI.
//!
//! All commands return `Result<T, CliError>`; `main` prints the error as
//! `Error: ...` and exits with status 1.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use zeekscript_core::ZeekError;

/// Error type for CLI operations.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// Reading or writing a file (or stdin/stdout) failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path involved, `-` for the standard streams
        path: PathBuf,
        /// The underlying error message
        message: String,
    },

    /// The input file exceeds the configured size limit.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB)")]
    FileTooLarge {
        path: PathBuf,
        actual: u64,
        max: u64,
        max_mb: u64,
    },

    /// The script has syntax errors and strict mode is on, or parsing hit a
    /// resource limit.
    #[error("Parse error: {0}")]
    Parse(String),

    /// `format --check` found files that would change.
    #[error("{count} file(s) would be reformatted")]
    NotFormatted {
        /// Number of files whose formatting differs
        count: usize,
    },

    /// Some files in a multi-file run failed.
    #[error("{failed} of {total} file(s) failed")]
    BatchFailed { failed: usize, total: usize },

    /// Invalid arguments or paths.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with file path context.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use zeekscript_cli::error::CliError;
    /// use std::fs;
    ///
    /// let result = fs::read_to_string("file.zeek")
    ///     .map_err(|e| CliError::io_error("file.zeek", e));
    /// ```
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a file-too-large error.
    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
            max_mb: max / (1024 * 1024),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<ZeekError> for CliError {
    fn from(source: ZeekError) -> Self {
        Self::Parse(source.to_string())
    }
}
