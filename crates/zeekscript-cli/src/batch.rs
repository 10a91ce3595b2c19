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


//! Batch processing of many scripts with optional parallelism and progress
//! reporting.
//!
//! [`BatchProcessor`] runs a [`BatchOperation`] over a list of files, in
//! parallel with Rayon once the list reaches the configured threshold.
//! Every file is processed; failures are collected alongside successes in
//! input order.
//!
//! # Examples
//!
//! ```rust,no_run
//! use zeekscript_cli::batch::{BatchConfig, BatchProcessor, FormatOperation};
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let processor = BatchProcessor::new(BatchConfig::default());
//! let files = vec![PathBuf::from("a.zeek"), PathBuf::from("b.zeek")];
//!
//! let results = processor.process(&files, FormatOperation::default(), false)?;
//! println!(
//!     "{} formatted, {} failed",
//!     results.success_count(),
//!     results.failure_count()
//! );
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use colored::Colorize;
use rayon::prelude::*;
use tracing::debug;
use zeekscript_fmt::FormatConfig;

use crate::commands::{format_source, read_file, FormatOutcome};
use crate::error::CliError;

/// Configuration for batch processing.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Minimum number of files that triggers parallel processing.
    ///
    /// Smaller batches run serially. Default: 10
    pub parallel_threshold: usize,

    /// Maximum number of worker threads; `None` uses Rayon's default.
    pub max_threads: Option<usize>,

    /// Files between progress updates, 0 disables them. Default: 1
    pub progress_interval: usize,

    /// Report every file with its status.
    pub verbose: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 10,
            max_threads: None,
            progress_interval: 1,
            verbose: false,
        }
    }
}

/// Result of processing a single file.
#[derive(Debug, Clone)]
pub struct FileResult<T> {
    /// The file path that was processed
    pub path: PathBuf,
    /// The result of processing
    pub result: Result<T, CliError>,
}

impl<T> FileResult<T> {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Aggregated results of a batch run, in input order.
#[derive(Debug, Clone)]
pub struct BatchResults<T> {
    /// Individual results for each processed file
    pub results: Vec<FileResult<T>>,
    /// Total processing time in milliseconds
    pub elapsed_ms: u128,
}

impl<T> BatchResults<T> {
    pub fn new(results: Vec<FileResult<T>>, elapsed_ms: u128) -> Self {
        Self { results, elapsed_ms }
    }

    pub fn total_files(&self) -> usize {
        self.results.len()
    }

    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|r| r.is_success())
    }

    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| r.is_failure())
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileResult<T>> {
        self.results.iter().filter(|r| r.is_failure())
    }
}

/// An operation applied to each file of a batch.
///
/// Operations must be `Send + Sync` to run on the Rayon pool.
///
/// # Examples
///
/// ```rust
/// use zeekscript_cli::batch::BatchOperation;
/// use zeekscript_cli::error::CliError;
/// use std::path::Path;
///
/// struct CountLines;
///
/// impl BatchOperation for CountLines {
///     type Output = usize;
///
///     fn process_file(&self, path: &Path) -> Result<Self::Output, CliError> {
///         let content = std::fs::read_to_string(path)
///             .map_err(|e| CliError::io_error(path, e))?;
///         Ok(content.lines().count())
///     }
///
///     fn name(&self) -> &str {
///         "count-lines"
///     }
/// }
/// ```
pub trait BatchOperation: Send + Sync {
    /// The output type for successful processing
    type Output: Send;

    /// Process a single file.
    ///
    /// # Errors
    ///
    /// Returns the [`CliError`] describing why this file failed; other
    /// files of the batch are unaffected.
    fn process_file(&self, path: &Path) -> Result<Self::Output, CliError>;

    /// Name shown in progress reports.
    fn name(&self) -> &str;
}

/// Lock-free progress counters shared by the workers.
#[derive(Debug)]
struct ProgressTracker {
    total: usize,
    processed: AtomicUsize,
    succeeded: AtomicUsize,
    failed: AtomicUsize,
    interval: usize,
    verbose: bool,
    start_time: Instant,
}

impl ProgressTracker {
    fn new(total: usize, interval: usize, verbose: bool) -> Self {
        Self {
            total,
            processed: AtomicUsize::new(0),
            succeeded: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            interval,
            verbose,
            start_time: Instant::now(),
        }
    }

    fn record<T>(&self, path: &Path, result: &Result<T, CliError>) {
        let processed = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        match result {
            Ok(_) => {
                self.succeeded.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                if self.verbose {
                    eprintln!("{} {} - {}", "✗".red().bold(), path.display(), e);
                }
            }
        }

        if self.should_report(processed) {
            self.report_progress(path, result.is_ok());
        }
    }

    fn should_report(&self, processed: usize) -> bool {
        self.interval > 0 && (processed % self.interval == 0 || processed == self.total)
    }

    fn report_progress(&self, current_file: &Path, success: bool) {
        let processed = self.processed.load(Ordering::Relaxed);
        let succeeded = self.succeeded.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        let rate = processed as f64 / self.start_time.elapsed().as_secs_f64();

        if self.verbose {
            let status = if success {
                "✓".green().bold()
            } else {
                "✗".red().bold()
            };
            eprintln!(
                "{} [{}/{}] {} ({:.1} files/s)",
                status,
                processed,
                self.total,
                current_file.display(),
                rate
            );
        } else {
            eprintln!(
                "Progress: [{}/{}] {} succeeded, {} failed ({:.1} files/s)",
                processed, self.total, succeeded, failed, rate
            );
        }
    }

    /// Summary goes to stderr; stdout may carry formatted scripts.
    fn print_summary(&self, operation_name: &str) {
        let processed = self.processed.load(Ordering::Relaxed);
        let succeeded = self.succeeded.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        let elapsed = self.start_time.elapsed();

        eprintln!();
        eprintln!("{}", "═".repeat(60).bright_blue());
        eprintln!(
            "{} {}",
            "Batch Operation:".bright_blue().bold(),
            operation_name.bright_white()
        );
        eprintln!("{}", "═".repeat(60).bright_blue());
        eprintln!(
            "  {} {}",
            "Total files:".bright_cyan(),
            processed.to_string().bright_white()
        );
        eprintln!(
            "  {} {}",
            "Succeeded:".green().bold(),
            succeeded.to_string().bright_white()
        );
        eprintln!(
            "  {} {}",
            "Failed:".red().bold(),
            failed.to_string().bright_white()
        );
        eprintln!("  {} {:.2}s", "Elapsed:".bright_cyan(), elapsed.as_secs_f64());
        eprintln!("{}", "═".repeat(60).bright_blue());
    }
}

/// Runs batch operations serially or on the Rayon pool.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    config: BatchConfig,
}

impl BatchProcessor {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    pub fn default_config() -> Self {
        Self::new(BatchConfig::default())
    }

    /// Process `files` with `operation`, collecting every result.
    ///
    /// Runs in parallel when `files.len() >= config.parallel_threshold`.
    ///
    /// # Errors
    ///
    /// Per-file failures are part of the returned [`BatchResults`]; this
    /// function itself does not fail.
    pub fn process<O>(
        &self,
        files: &[PathBuf],
        operation: O,
        show_progress: bool,
    ) -> Result<BatchResults<O::Output>, CliError>
    where
        O: BatchOperation,
    {
        let start_time = Instant::now();

        if files.is_empty() {
            return Ok(BatchResults::new(vec![], 0));
        }

        if let Some(max_threads) = self.config.max_threads {
            // Fails harmlessly when the global pool already exists.
            rayon::ThreadPoolBuilder::new()
                .num_threads(max_threads)
                .build_global()
                .ok();
        }

        let parallel = files.len() >= self.config.parallel_threshold;
        debug!(
            operation = operation.name(),
            files = files.len(),
            parallel,
            "starting batch"
        );

        let tracker = show_progress.then(|| {
            ProgressTracker::new(files.len(), self.config.progress_interval, self.config.verbose)
        });
        let run = |path: &PathBuf| {
            let result = operation.process_file(path);
            if let Some(t) = &tracker {
                t.record(path, &result);
            }
            FileResult {
                path: path.clone(),
                result,
            }
        };

        let results: Vec<FileResult<O::Output>> = if parallel {
            files.par_iter().map(run).collect()
        } else {
            files.iter().map(run).collect()
        };

        if let Some(tracker) = tracker {
            tracker.print_summary(operation.name());
        }

        Ok(BatchResults::new(results, start_time.elapsed().as_millis()))
    }
}

// ============================================================================
// Standard Operations
// ============================================================================

/// Formats each file, optionally rewriting it in place.
#[derive(Debug, Clone, Default)]
pub struct FormatOperation {
    /// Rewrite files whose formatting changes
    pub inplace: bool,
    /// Fail on files with syntax errors instead of formatting them
    pub strict: bool,
    /// Formatter settings
    pub config: FormatConfig,
}

impl BatchOperation for FormatOperation {
    type Output = FormatOutcome;

    fn process_file(&self, path: &Path) -> Result<Self::Output, CliError> {
        let source = read_file(path)?;
        let outcome = format_source(&path.display().to_string(), source, self.strict, &self.config)?;

        if self.inplace && outcome.changed {
            std::fs::write(path, &outcome.output).map_err(|e| CliError::io_error(path, e))?;
            debug!(file = %path.display(), "rewrote file");
        }
        Ok(outcome)
    }

    fn name(&self) -> &str {
        "format"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    struct Succeed;

    impl BatchOperation for Succeed {
        type Output = usize;

        fn process_file(&self, path: &Path) -> Result<usize, CliError> {
            Ok(path.as_os_str().len())
        }

        fn name(&self) -> &str {
            "succeed"
        }
    }

    struct FailOdd;

    impl BatchOperation for FailOdd {
        type Output = ();

        fn process_file(&self, path: &Path) -> Result<(), CliError> {
            if path.as_os_str().len() % 2 == 1 {
                Err(CliError::invalid_input("odd"))
            } else {
                Ok(())
            }
        }

        fn name(&self) -> &str {
            "fail-odd"
        }
    }

    #[test]
    fn test_batch_config_default() {
        let config = BatchConfig::default();
        assert_eq!(config.parallel_threshold, 10);
        assert_eq!(config.max_threads, None);
        assert_eq!(config.progress_interval, 1);
        assert!(!config.verbose);
    }

    #[test]
    fn test_batch_results_statistics() {
        let results = BatchResults::new(
            vec![
                FileResult {
                    path: PathBuf::from("a.zeek"),
                    result: Ok(()),
                },
                FileResult {
                    path: PathBuf::from("b.zeek"),
                    result: Err(CliError::invalid_input("x")),
                },
                FileResult {
                    path: PathBuf::from("c.zeek"),
                    result: Ok(()),
                },
            ],
            10,
        );
        assert_eq!(results.total_files(), 3);
        assert_eq!(results.success_count(), 2);
        assert_eq!(results.failure_count(), 1);
        assert!(results.has_failures());
        assert!(!results.all_succeeded());
        assert_eq!(results.failures().next().unwrap().path, PathBuf::from("b.zeek"));
    }

    #[test]
    fn test_progress_tracker_should_report() {
        let tracker = ProgressTracker::new(10, 3, false);
        assert!(!tracker.should_report(1));
        assert!(tracker.should_report(3));
        assert!(tracker.should_report(10));

        let silent = ProgressTracker::new(10, 0, false);
        assert!(!silent.should_report(10));
    }

    #[test]
    fn test_batch_processor_empty() {
        let results = BatchProcessor::default_config()
            .process(&[], Succeed, false)
            .unwrap();
        assert_eq!(results.total_files(), 0);
    }

    #[test]
    fn test_batch_processor_serial_keeps_order() {
        let files: Vec<PathBuf> = ["a", "bb", "ccc"].iter().map(PathBuf::from).collect();
        let results = BatchProcessor::default_config()
            .process(&files, Succeed, false)
            .unwrap();
        let lens: Vec<usize> = results
            .results
            .iter()
            .map(|r| *r.result.as_ref().unwrap())
            .collect();
        assert_eq!(lens, vec![1, 2, 3]);
    }

    #[test]
    fn test_batch_processor_parallel_with_failures() {
        let files: Vec<PathBuf> = (0..20).map(|i| PathBuf::from("x".repeat(i + 1))).collect();
        let processor = BatchProcessor::new(BatchConfig {
            parallel_threshold: 2,
            ..Default::default()
        });
        let results = processor.process(&files, FailOdd, false).unwrap();
        assert_eq!(results.total_files(), 20);
        assert_eq!(results.failure_count(), 10);
        assert_eq!(results.results[0].path, files[0]);
        assert!(results.results[0].is_failure());
        assert!(results.results[1].is_success());
    }

    #[test]
    fn test_format_operation_inplace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.zeek");
        fs::write(&path, "global  x=1 ;").unwrap();

        let op = FormatOperation {
            inplace: true,
            ..Default::default()
        };
        let outcome = op.process_file(&path).unwrap();
        assert!(outcome.changed);
        assert_eq!(fs::read_to_string(&path).unwrap(), "global x = 1;\n");

        let again = op.process_file(&path).unwrap();
        assert!(!again.changed);
    }

    #[test]
    fn test_format_operation_strict_rejects_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.zeek");
        fs::write(&path, "global = ;\n").unwrap();

        let op = FormatOperation {
            strict: true,
            ..Default::default()
        };
        assert!(matches!(op.process_file(&path), Err(CliError::Parse(_))));

        let lenient = FormatOperation::default();
        let outcome = lenient.process_file(&path).unwrap();
        assert!(outcome.warning.is_some());
    }
}
