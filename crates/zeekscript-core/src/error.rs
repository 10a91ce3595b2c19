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

//! Error types for Zeek script parsing.

use std::fmt;
use thiserror::Error;

/// The kind of error that occurred while reading or parsing a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZeekErrorKind {
    /// Source text that the grammar does not accept.
    Syntax,
    /// I/O error (file operations, stdin).
    IO,
    /// Security limit exceeded (file size, nesting depth).
    Security,
}

impl fmt::Display for ZeekErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "SyntaxError"),
            Self::IO => write!(f, "IOError"),
            Self::Security => write!(f, "SecurityError"),
        }
    }
}

/// An error that occurred while handling a Zeek script.
///
/// Line and column are 0-based, matching the row/column pairs that
/// [`Script::write_tree`](crate::Script::write_tree) prints.
#[derive(Debug, Clone, Error)]
#[error("{kind} at line {line}: {message}")]
pub struct ZeekError {
    /// The kind of error.
    pub kind: ZeekErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Line number (0-based).
    pub line: usize,
    /// Column number (0-based, optional).
    pub column: Option<usize>,
    /// The offending source line, when known.
    pub context: Option<String>,
}

impl ZeekError {
    /// Create a new error.
    pub fn new(kind: ZeekErrorKind, message: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
            column: None,
            context: None,
        }
    }

    /// Add column information.
    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    /// Add context information.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn syntax(message: impl Into<String>, line: usize) -> Self {
        Self::new(ZeekErrorKind::Syntax, message, line)
    }

    pub fn security(message: impl Into<String>, line: usize) -> Self {
        Self::new(ZeekErrorKind::Security, message, line)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ZeekErrorKind::IO, message, 0)
    }
}

impl From<std::io::Error> for ZeekError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

/// Result type for zeekscript operations.
pub type ZeekResult<T> = Result<T, ZeekError>;

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== ZeekErrorKind Display tests ====================

    #[test]
    fn test_error_kind_display_syntax() {
        assert_eq!(format!("{}", ZeekErrorKind::Syntax), "SyntaxError");
    }

    #[test]
    fn test_error_kind_display_io() {
        assert_eq!(format!("{}", ZeekErrorKind::IO), "IOError");
    }

    #[test]
    fn test_error_kind_display_security() {
        assert_eq!(format!("{}", ZeekErrorKind::Security), "SecurityError");
    }

    // ==================== ZeekError tests ====================

    #[test]
    fn test_error_display() {
        let err = ZeekError::syntax("cannot parse line 3, col 0: \"x\"", 3);
        assert_eq!(
            err.to_string(),
            "SyntaxError at line 3: cannot parse line 3, col 0: \"x\""
        );
    }

    #[test]
    fn test_error_builders() {
        let err = ZeekError::syntax("oops", 1)
            .with_column(4)
            .with_context("global x = ;");
        assert_eq!(err.column, Some(4));
        assert_eq!(err.context.as_deref(), Some("global x = ;"));
    }

    #[test]
    fn test_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: ZeekError = io.into();
        assert_eq!(err.kind, ZeekErrorKind::IO);
        assert!(err.message.contains("no such file"));
    }
}
