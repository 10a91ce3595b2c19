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

//! Formatting configuration.
//!
//! This module defines the knobs of the output stream's line layout.

/// Configuration for formatted output.
///
/// The defaults reproduce the standard Zeek script layout: tab indentation
/// counted as 8 columns, lines wrapped at 80 columns, and continuation
/// lines indented by 4 extra spaces.
///
/// # Examples
///
/// ```
/// use zeekscript_fmt::FormatConfig;
///
/// let config = FormatConfig::default();
/// assert_eq!(config.max_line_len, 80);
/// assert!(config.linebreaks);
///
/// // Never wrap long lines
/// let config = FormatConfig::new().with_linebreaks(false);
/// assert!(!config.linebreaks);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct FormatConfig {
    /// Column beyond which a line is considered for wrapping.
    ///
    /// Default: `80`
    pub max_line_len: usize,

    /// Minimum number of non-whitespace items a line needs before it is
    /// wrapped at all. Short lines with one long string stay intact.
    ///
    /// Default: `5`
    pub min_line_items: usize,

    /// Visible width of a tab when measuring wrapped lines.
    ///
    /// Default: `8`
    pub tab_size: usize,

    /// Spaces added after the tab indentation of a continuation line, and
    /// after a comment that interrupted a line.
    ///
    /// Default: `4`
    pub space_indent: usize,

    /// Whether long lines get wrapped.
    ///
    /// Default: `true`
    pub linebreaks: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            max_line_len: 80,
            min_line_items: 5,
            tab_size: 8,
            space_indent: 4,
            linebreaks: true,
        }
    }
}

impl FormatConfig {
    /// Create a new configuration with all default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder for constructing a `FormatConfig`.
    ///
    /// # Examples
    ///
    /// ```
    /// use zeekscript_fmt::FormatConfig;
    ///
    /// let config = FormatConfig::builder()
    ///     .max_line_len(100)
    ///     .space_indent(2)
    ///     .build();
    /// assert_eq!(config.max_line_len, 100);
    /// assert_eq!(config.space_indent, 2);
    /// ```
    pub fn builder() -> FormatConfigBuilder {
        FormatConfigBuilder::new()
    }

    /// Set the wrapping column.
    pub fn with_max_line_len(mut self, max_line_len: usize) -> Self {
        self.max_line_len = max_line_len;
        self
    }

    /// Set the minimum item count for wrapping.
    pub fn with_min_line_items(mut self, min_line_items: usize) -> Self {
        self.min_line_items = min_line_items;
        self
    }

    /// Set the visible tab width.
    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size;
        self
    }

    /// Set the continuation indent.
    pub fn with_space_indent(mut self, space_indent: usize) -> Self {
        self.space_indent = space_indent;
        self
    }

    /// Enable or disable line wrapping.
    pub fn with_linebreaks(mut self, linebreaks: bool) -> Self {
        self.linebreaks = linebreaks;
        self
    }
}

/// Builder for constructing a `FormatConfig` with a chainable API.
///
/// # Examples
///
/// ```
/// use zeekscript_fmt::FormatConfig;
///
/// let config = FormatConfig::builder()
///     .linebreaks(false)
///     .tab_size(4)
///     .build();
/// assert!(!config.linebreaks);
///
/// // Same as FormatConfig::default()
/// let config = FormatConfig::builder().build();
/// assert_eq!(config, FormatConfig::default());
/// ```
#[derive(Debug, Clone)]
pub struct FormatConfigBuilder {
    config: FormatConfig,
}

impl Default for FormatConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatConfigBuilder {
    /// Create a new builder with default configuration values.
    pub fn new() -> Self {
        Self {
            config: FormatConfig::default(),
        }
    }

    pub fn max_line_len(mut self, max_line_len: usize) -> Self {
        self.config.max_line_len = max_line_len;
        self
    }

    pub fn min_line_items(mut self, min_line_items: usize) -> Self {
        self.config.min_line_items = min_line_items;
        self
    }

    pub fn tab_size(mut self, tab_size: usize) -> Self {
        self.config.tab_size = tab_size;
        self
    }

    pub fn space_indent(mut self, space_indent: usize) -> Self {
        self.config.space_indent = space_indent;
        self
    }

    pub fn linebreaks(mut self, linebreaks: bool) -> Self {
        self.config.linebreaks = linebreaks;
        self
    }

    /// Build the final `FormatConfig`.
    pub fn build(self) -> FormatConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FormatConfig::default();
        assert_eq!(config.max_line_len, 80);
        assert_eq!(config.min_line_items, 5);
        assert_eq!(config.tab_size, 8);
        assert_eq!(config.space_indent, 4);
        assert!(config.linebreaks);
    }

    #[test]
    fn test_with_methods_chain() {
        let config = FormatConfig::new()
            .with_max_line_len(120)
            .with_min_line_items(3)
            .with_tab_size(4)
            .with_space_indent(2)
            .with_linebreaks(false);
        assert_eq!(config.max_line_len, 120);
        assert_eq!(config.min_line_items, 3);
        assert_eq!(config.tab_size, 4);
        assert_eq!(config.space_indent, 2);
        assert!(!config.linebreaks);
    }

    #[test]
    fn test_builder_matches_with_methods() {
        let built = FormatConfig::builder()
            .max_line_len(100)
            .min_line_items(2)
            .build();
        let chained = FormatConfig::new().with_max_line_len(100).with_min_line_items(2);
        assert_eq!(built, chained);
    }
}
