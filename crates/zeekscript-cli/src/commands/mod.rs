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


//! CLI command implementations

mod completion;
mod format;
mod parse;

pub use completion::{generate_completion_for_command, print_installation_instructions};
pub use format::{format, format_source, FormatOptions, FormatOutcome};
pub use parse::parse;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::CliError;

/// Default maximum input size (1 GB).
///
/// Override with the `ZEEKSCRIPT_MAX_FILE_SIZE` environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Extension of Zeek scripts collected from directories.
const SCRIPT_EXTENSION: &str = "zeek";

/// The maximum input size from `ZEEKSCRIPT_MAX_FILE_SIZE`, or the default.
pub fn max_file_size() -> u64 {
    std::env::var("ZEEKSCRIPT_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Read a script from disk, or from stdin for `-`, with size validation.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read, is not UTF-8, or exceeds
/// [`max_file_size`].
///
/// # Examples
///
/// ```no_run
/// use zeekscript_cli::commands::read_file;
/// use std::path::Path;
///
/// # fn main() -> Result<(), zeekscript_cli::error::CliError> {
/// let content = read_file(Path::new("local.zeek"))?;
/// assert!(!content.is_empty());
/// # Ok(())
/// # }
/// ```
pub fn read_file(path: &Path) -> Result<String, CliError> {
    let max = max_file_size();

    if path.as_os_str() == "-" {
        let mut content = String::new();
        io::stdin()
            .lock()
            .take(max.saturating_add(1))
            .read_to_string(&mut content)
            .map_err(|e| CliError::io_error(path, e))?;
        if content.len() as u64 > max {
            return Err(CliError::file_too_large(path, content.len() as u64, max));
        }
        return Ok(content);
    }

    // Check the size first so oversized files are never read
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;
    if metadata.len() > max {
        return Err(CliError::file_too_large(path, metadata.len(), max));
    }

    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// Write content to a file, or to stdout if no path is given.
///
/// # Errors
///
/// Returns `Err` if writing fails.
pub fn write_output(content: &str, path: Option<&Path>) -> Result<(), CliError> {
    match path {
        Some(p) => fs::write(p, content).map_err(|e| CliError::io_error(p, e)),
        None => io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| CliError::io_error("-", e)),
    }
}

/// Expand the command-line inputs into script paths.
///
/// Files are taken as given. Directories require `recursive` and yield
/// their `*.zeek` files in sorted order.
///
/// # Errors
///
/// Returns `Err` for a directory without `recursive`, or if a directory
/// cannot be walked.
pub fn collect_files(inputs: &[String], recursive: bool) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();

    for input in inputs {
        let path = PathBuf::from(input);
        if !path.is_dir() {
            files.push(path);
            continue;
        }
        if !recursive {
            return Err(CliError::invalid_input(format!(
                "'{input}' is a directory; use --recursive to format its scripts"
            )));
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(&path) {
            let entry = entry.map_err(|e| CliError::Io {
                path: path.clone(),
                message: e.to_string(),
            })?;
            let entry_path = entry.path();
            if entry.file_type().is_file()
                && entry_path.extension().is_some_and(|ext| ext == SCRIPT_EXTENSION)
            {
                found.push(entry_path.to_path_buf());
            }
        }
        found.sort();
        files.extend(found);
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_files_recursive() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.zeek"), "").unwrap();
        fs::write(dir.path().join("sub").join("a.zeek"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let input = dir.path().display().to_string();
        let files = collect_files(&[input], true).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("b.zeek"), dir.path().join("sub").join("a.zeek")]
        );
    }

    #[test]
    fn test_collect_files_directory_needs_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().display().to_string();
        let err = collect_files(&[input], false).unwrap_err();
        assert!(err.to_string().contains("--recursive"));
    }

    #[test]
    fn test_collect_files_passes_files_through() {
        let files = collect_files(&["missing.zeek".to_string()], false).unwrap();
        assert_eq!(files, vec![PathBuf::from("missing.zeek")]);
    }

    #[test]
    fn test_read_file_missing() {
        let err = read_file(Path::new("/nonexistent/dir/x.zeek")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
