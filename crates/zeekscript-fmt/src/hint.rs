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

//! Line-breaking hints attached to output chunks.

use std::ops::{BitOr, BitOrAssign};

/// A set of layout hints. Formatters attach these to the chunks they write
/// so the [`OutputStream`](crate::OutputStream) knows where a long line may
/// be broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Hints(u8);

impl Hints {
    pub const NONE: Hints = Hints(0);
    /// A line break before this chunk is encouraged.
    pub const GOOD_AFTER_LB: Hints = Hints(1);
    /// Never break the line before this chunk.
    pub const NO_LB_BEFORE: Hints = Hints(1 << 1);
    /// Never break the line after this chunk.
    pub const NO_LB_AFTER: Hints = Hints(1 << 2);
    /// The chunk does not count toward the line length.
    pub const ZERO_WIDTH: Hints = Hints(1 << 3);

    #[inline]
    pub fn contains(self, other: Hints) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Hints {
    type Output = Hints;

    #[inline]
    fn bitor(self, rhs: Hints) -> Hints {
        Hints(self.0 | rhs.0)
    }
}

impl BitOrAssign for Hints {
    #[inline]
    fn bitor_assign(&mut self, rhs: Hints) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let h = Hints::NO_LB_BEFORE | Hints::NO_LB_AFTER;
        assert!(h.contains(Hints::NO_LB_BEFORE));
        assert!(h.contains(Hints::NO_LB_AFTER));
        assert!(!h.contains(Hints::ZERO_WIDTH));
        assert!(!h.contains(Hints::NONE));
    }

    #[test]
    fn test_bitor_assign() {
        let mut h = Hints::NONE;
        assert!(h.is_empty());
        h |= Hints::ZERO_WIDTH;
        assert!(h.contains(Hints::ZERO_WIDTH));
        assert!(!h.is_empty());
    }
}
