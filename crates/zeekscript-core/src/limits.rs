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

//! Resource limits for Zeek script parsing.

/// Configurable limits for parser security.
///
/// These bound the resources a single script may consume. Parsing and
/// formatting recurse once per nesting level, and every operator of a
/// binary chain such as `a + b + c` counts as a level, so the nesting limit
/// bounds their stack use.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseLimits {
    /// Maximum source size in bytes (default: 64MB).
    pub max_file_size: usize,
    /// Maximum syntactic nesting depth (default: 100).
    pub max_nesting_depth: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_file_size: 64 * 1024 * 1024, // 64MB
            max_nesting_depth: 100,
        }
    }
}

impl ParseLimits {
    /// Create limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_file_size: usize::MAX,
            max_nesting_depth: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_max_file_size() {
        let limits = ParseLimits::default();
        assert_eq!(limits.max_file_size, 64 * 1024 * 1024);
    }

    #[test]
    fn test_default_max_nesting_depth() {
        let limits = ParseLimits::default();
        assert_eq!(limits.max_nesting_depth, 100);
    }

    #[test]
    fn test_unlimited() {
        let limits = ParseLimits::unlimited();
        assert_eq!(limits.max_file_size, usize::MAX);
        assert_eq!(limits.max_nesting_depth, usize::MAX);
    }
}
