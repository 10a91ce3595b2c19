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


//! Error context helpers.
//!
//! Extension methods that annotate errors with context as they propagate.
//!
//! # Examples
//!
//! ```rust
//! use zeekscript::{parse, Script, ZeekError, ZeekResultExt};
//!
//! fn load(path: &str) -> Result<Script, ZeekError> {
//!     let source = std::fs::read_to_string(path)
//!         .with_context(|| format!("reading {}", path))?;
//!     parse(&source).context("while parsing site policy")
//! }
//! ```

use std::fmt;

use crate::ZeekError;

/// Extension trait adding context to results.
///
/// Context goes into [`ZeekError::context`]; the message, kind and
/// position stay untouched. Newer context is prepended: `"outer; inner"`.
pub trait ZeekResultExt<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T, ZeekError>
    where
        C: fmt::Display;

    /// Add lazily computed context to an error.
    fn with_context<C, F>(self, f: F) -> Result<T, ZeekError>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T> ZeekResultExt<T> for Result<T, ZeekError> {
    fn context<C>(self, context: C) -> Result<T, ZeekError>
    where
        C: fmt::Display,
    {
        self.map_err(|e| add_context_to_error(e, context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, ZeekError>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| add_context_to_error(e, f().to_string()))
    }
}

impl<T> ZeekResultExt<T> for Result<T, std::io::Error> {
    fn context<C>(self, context: C) -> Result<T, ZeekError>
    where
        C: fmt::Display,
    {
        self.map_err(|e| ZeekError::io(e.to_string()).with_context(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, ZeekError>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| ZeekError::io(e.to_string()).with_context(f().to_string()))
    }
}

fn add_context_to_error(mut error: ZeekError, new_context: String) -> ZeekError {
    if new_context.is_empty() {
        return error;
    }

    error.context = Some(match error.context {
        Some(existing) => format!("{}; {}", new_context, existing),
        None => new_context,
    });
    error
}
