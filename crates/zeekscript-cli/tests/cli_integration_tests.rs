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


//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::NamedTempFile;

fn zeek_script() -> Command {
    Command::cargo_bin("zeek-script").expect("Failed to find zeek-script binary")
}

fn zeek_format() -> Command {
    Command::cargo_bin("zeek-format").expect("Failed to find zeek-format binary")
}

fn create_temp_file(content: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".zeek")
        .tempfile()
        .expect("Failed to create temp file");
    fs::write(file.path(), content).expect("Failed to write temp file");
    file
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    zeek_script()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Zeek script parser and formatter"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_output() {
    zeek_script()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("zeek-script"));
}

#[test]
fn test_no_subcommand_fails() {
    zeek_script().assert().failure();
}

// ===== Format Command Tests =====

#[test]
fn test_format_file_to_stdout() {
    let file = create_temp_file("global  x=1 ;\n");

    zeek_script()
        .arg("format")
        .arg(file.path())
        .assert()
        .success()
        .stdout("global x = 1;\n");

    // The file itself is untouched
    assert_eq!(fs::read_to_string(file.path()).unwrap(), "global  x=1 ;\n");
}

#[test]
fn test_format_stdin() {
    zeek_script()
        .arg("format")
        .write_stdin("event zeek_init() { print  \"hi\" ; }")
        .assert()
        .success()
        .stdout("event zeek_init()\n\t{\n\tprint \"hi\";\n\t}\n");
}

#[test]
fn test_format_stdin_dash() {
    zeek_script()
        .args(["format", "-"])
        .write_stdin("module  Foo ;")
        .assert()
        .success()
        .stdout("module Foo;\n");
}

#[test]
fn test_format_inplace() {
    let file = create_temp_file("const  c=5   &redef;");

    zeek_script()
        .args(["format", "--inplace"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("");

    assert_eq!(
        fs::read_to_string(file.path()).unwrap(),
        "const c = 5 &redef;\n"
    );
}

#[test]
fn test_format_inplace_stdin_rejected() {
    zeek_script()
        .args(["format", "-i"])
        .write_stdin("global x = 1;")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_format_check_unformatted() {
    let file = create_temp_file("global  x=1 ;\n");

    zeek_script()
        .args(["format", "--check"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("would reformat"))
        .stderr(predicate::str::contains("1 file(s) would be reformatted"));
}

#[test]
fn test_format_check_formatted() {
    let file = create_temp_file("global x = 1;\n");

    zeek_script()
        .args(["format", "--check"])
        .arg(file.path())
        .assert()
        .success();
}

#[test]
fn test_format_no_linebreaks() {
    let operands = ["a", "b", "c", "d"].map(|c| c.repeat(20));
    let file = create_temp_file(&format!("if ( {} ) print 1;\n", operands.join(" && ")));
    let one_line = format!("if ( {} )\n\tprint 1;\n", operands.join(" && "));

    let broken = zeek_script().arg("format").arg(file.path()).output().unwrap();
    assert!(broken.status.success());
    assert_ne!(String::from_utf8_lossy(&broken.stdout), one_line);

    zeek_script()
        .args(["format", "--no-linebreaks"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(one_line);
}

#[test]
fn test_format_syntax_error_warns() {
    let file = create_temp_file("global = ;\nglobal  y=2 ;\n");

    zeek_script()
        .arg("format")
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("warning:"))
        .stderr(predicate::str::contains(":1: "))
        .stdout(predicate::str::contains("global y = 2;"));
}

#[test]
fn test_format_syntax_error_strict() {
    let file = create_temp_file("global = ;\n");

    zeek_script()
        .args(["format", "--strict"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Parse error"));
}

#[test]
fn test_format_missing_file() {
    zeek_script()
        .args(["format", "/nonexistent/file.zeek"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("/nonexistent/file.zeek"));
}

#[test]
fn test_format_directory_requires_recursive() {
    let dir = tempfile::tempdir().unwrap();

    zeek_script()
        .arg("format")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--recursive"));
}

#[test]
fn test_format_recursive_parallel_inplace() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    let scripts = [
        dir.path().join("a.zeek"),
        dir.path().join("b.zeek"),
        dir.path().join("sub").join("c.zeek"),
    ];
    for path in &scripts {
        fs::write(path, "print  1 ;").unwrap();
    }
    fs::write(dir.path().join("README"), "print  1 ;").unwrap();

    zeek_script()
        .args(["format", "-i", "-r", "-p"])
        .arg(dir.path())
        .assert()
        .success();

    for path in &scripts {
        assert_eq!(fs::read_to_string(path).unwrap(), "print 1;\n");
    }
    assert_eq!(
        fs::read_to_string(dir.path().join("README")).unwrap(),
        "print  1 ;"
    );
}

#[test]
fn test_format_parallel_jobs() {
    let first = create_temp_file("global  a=1 ;");
    let second = create_temp_file("global  b=2 ;");

    zeek_script()
        .args(["format", "-p", "-j", "2"])
        .arg(first.path())
        .arg(second.path())
        .assert()
        .success()
        .stdout("global a = 1;\nglobal b = 2;\n");
}

#[test]
fn test_format_jobs_requires_parallel() {
    let file = create_temp_file("global  a=1 ;");

    zeek_script()
        .args(["format", "-j", "2"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--parallel"));
}

#[test]
fn test_format_multiple_files_in_order() {
    let first = create_temp_file("global  a=1 ;");
    let second = create_temp_file("global  b=2 ;");

    zeek_script()
        .arg("format")
        .arg(first.path())
        .arg(second.path())
        .assert()
        .success()
        .stdout("global a = 1;\nglobal b = 2;\n");
}

#[test]
fn test_format_file_too_large() {
    let file = create_temp_file("global x = 1;\n");

    zeek_script()
        .env("ZEEKSCRIPT_MAX_FILE_SIZE", "4")
        .arg("format")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large"));
}

// ===== zeek-format Tests =====

#[test]
fn test_zeek_format_binary() {
    let file = create_temp_file("module  Foo ;");

    zeek_format()
        .arg(file.path())
        .assert()
        .success()
        .stdout("module Foo;\n");
}

#[test]
fn test_zeek_format_check() {
    zeek_format()
        .arg("--check")
        .write_stdin("module  Foo ;")
        .assert()
        .failure();
}

// ===== Parse Command Tests =====

#[test]
fn test_parse_tree() {
    let file = create_temp_file("global x = 1;\n");

    zeek_script()
        .arg("parse")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("source_file (0.0,1.0)"))
        .stdout(predicate::str::contains("    decl (0.0,0.13)"))
        .stdout(predicate::str::contains("'x'"));
}

#[test]
fn test_parse_concrete_includes_comments() {
    let file = create_temp_file("# hello\nglobal x = 1;\n");

    zeek_script()
        .args(["parse", "--concrete"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("v minor_comment"));
}

#[test]
fn test_parse_stats() {
    let file = create_temp_file("global x = 1;\n");

    zeek_script()
        .args(["parse", "--stats"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Statistics:"));
}

#[test]
fn test_parse_syntax_error_fails() {
    let file = create_temp_file("global = ;\n");

    zeek_script()
        .arg("parse")
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("ERROR"))
        .stderr(predicate::str::contains("cannot parse line"));
}

// ===== Completion Tests =====

#[test]
fn test_completion_bash() {
    zeek_script()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zeek-script"));
}

#[test]
fn test_completion_install_instructions() {
    zeek_script()
        .args(["completion", "zsh", "--install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zsh"));
}

#[test]
fn test_completion_unsupported_shell() {
    zeek_script()
        .args(["completion", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported shell"));
}
