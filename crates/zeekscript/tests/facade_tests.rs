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


//! Tests for the facade API and the error context helpers.

use std::io;

use zeekscript::{format, parse, validate, ZeekError, ZeekErrorKind, ZeekResultExt};

// ==================== Facade Tests ====================

#[test]
fn test_parse_and_format_agree() {
    let src = "module  Foo ;\nglobal  x=1 ;";
    let script = parse(src).unwrap();
    assert_eq!(
        zeekscript::fmt::format(&script).unwrap(),
        format(src).unwrap()
    );
}

#[test]
fn test_validate_clean_script() {
    assert!(validate("event zeek_init() { print 1; }").is_ok());
}

#[test]
fn test_validate_error_carries_source_line() {
    let err = validate("event zeek_init() {\n\tprint 1\n}\n").unwrap_err();
    assert_eq!(err.kind, ZeekErrorKind::Syntax);
    assert_eq!(err.line, 1);
    assert_eq!(err.context.as_deref(), Some("\tprint 1"));
    assert!(err.message.starts_with("cannot parse line 1"));
}

#[test]
fn test_format_custom_config() {
    let script = parse("global x = 1;").unwrap();
    let config = zeekscript::fmt::FormatConfig::builder().max_line_len(40).build();
    assert_eq!(
        zeekscript::fmt::format_with_config(&script, &config).unwrap(),
        "global x = 1;\n"
    );
}

// ==================== Context Tests ====================

#[test]
fn test_context_adds_context_to_error() {
    let result: Result<(), ZeekError> = Err(ZeekError::syntax("unexpected token", 10));
    let err = result.context("while parsing header").unwrap_err();

    assert_eq!(err.kind, ZeekErrorKind::Syntax);
    assert_eq!(err.message, "unexpected token");
    assert_eq!(err.line, 10);
    assert_eq!(err.context, Some("while parsing header".to_string()));
}

#[test]
fn test_context_does_not_affect_ok() {
    let result: Result<i32, ZeekError> = Ok(42);
    assert_eq!(result.context("never used").unwrap(), 42);
}

#[test]
fn test_context_chains_newest_first() {
    let result: Result<(), ZeekError> = Err(ZeekError::syntax("bad", 1));
    let err = result
        .context("inner")
        .with_context(|| "outer")
        .unwrap_err();
    assert_eq!(err.context.as_deref(), Some("outer; inner"));
}

#[test]
fn test_context_empty_string_ignored() {
    let result: Result<(), ZeekError> = Err(ZeekError::syntax("error", 1));
    let err = result.context("").unwrap_err();
    assert_eq!(err.context, None);
}

#[test]
fn test_context_preserves_error_fields() {
    let result: Result<(), ZeekError> = Err(ZeekError::syntax("mismatch", 15).with_column(20));
    let err = result.context("additional info").unwrap_err();
    assert_eq!(err.line, 15);
    assert_eq!(err.column, Some(20));
    assert_eq!(err.message, "mismatch");
}

#[test]
fn test_io_error_context() {
    let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
    let err = result.context("reading local.zeek").unwrap_err();
    assert_eq!(err.kind, ZeekErrorKind::IO);
    assert!(err.message.contains("gone"));
    assert_eq!(err.context.as_deref(), Some("reading local.zeek"));
}
