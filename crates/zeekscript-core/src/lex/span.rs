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

//! Source positions and byte spans.
//!
//! Rows and columns are 0-based and columns count bytes, so a [`Point`]
//! always agrees with the byte offsets of the same [`Span`].
//!
//! # Examples
//!
//! ```
//! use zeekscript_core::lex::{Point, Span};
//!
//! let span = Span::new(6, 15, Point::new(0, 6), Point::new(0, 15));
//! assert_eq!(span.len(), 9);
//! assert!(span.is_single_line());
//! assert_eq!(span.to_string(), "(0.6,0.15)");
//! ```

use std::fmt;

/// A row/column position in source code, both 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Row (line) number.
    pub row: usize,
    /// Byte column within the row.
    pub column: usize,
}

impl Point {
    /// Creates a new point.
    #[inline]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Advances the point over `text`, tracking newlines.
    pub fn advance(&mut self, text: &str) {
        let bytes = text.as_bytes();
        match memchr::memrchr(b'\n', bytes) {
            Some(last) => {
                self.row += memchr::memchr_iter(b'\n', bytes).count();
                self.column = bytes.len() - last - 1;
            }
            None => self.column += bytes.len(),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.row, self.column)
    }
}

/// A half-open byte range `[start_byte, end_byte)` together with its points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start_byte: usize,
    pub end_byte: usize,
    pub start: Point,
    pub end: Point,
}

impl Span {
    /// Creates a new span.
    #[inline]
    pub const fn new(start_byte: usize, end_byte: usize, start: Point, end: Point) -> Self {
        Self {
            start_byte,
            end_byte,
            start,
            end,
        }
    }

    /// Creates a zero-width span at the given byte offset and point.
    #[inline]
    pub const fn empty(byte: usize, point: Point) -> Self {
        Self::new(byte, byte, point, point)
    }

    /// Number of bytes covered.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end_byte - self.start_byte
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start_byte == self.end_byte
    }

    /// Checks if this span is on a single line.
    #[inline]
    pub const fn is_single_line(&self) -> bool {
        self.start.row == self.end.row
    }

    /// Combines two spans into one covering both.
    pub fn merge(self, other: Span) -> Span {
        let (start_byte, start) = if self.start_byte <= other.start_byte {
            (self.start_byte, self.start)
        } else {
            (other.start_byte, other.start)
        };
        let (end_byte, end) = if self.end_byte >= other.end_byte {
            (self.end_byte, self.end)
        } else {
            (other.end_byte, other.end)
        };
        Span::new(start_byte, end_byte, start, end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Point tests ====================

    #[test]
    fn test_point_default() {
        let p = Point::default();
        assert_eq!(p, Point::new(0, 0));
    }

    #[test]
    fn test_point_advance_same_line() {
        let mut p = Point::new(2, 4);
        p.advance("abc");
        assert_eq!(p, Point::new(2, 7));
    }

    #[test]
    fn test_point_advance_newlines() {
        let mut p = Point::new(0, 12);
        p.advance("\n");
        assert_eq!(p, Point::new(1, 0));

        let mut p = Point::new(3, 1);
        p.advance("ab\ncd\nefg");
        assert_eq!(p, Point::new(5, 3));
    }

    #[test]
    fn test_point_ordering() {
        assert!(Point::new(1, 9) < Point::new(2, 0));
        assert!(Point::new(1, 2) < Point::new(1, 3));
    }

    // ==================== Span tests ====================

    #[test]
    fn test_span_display() {
        let span = Span::new(0, 22, Point::new(0, 0), Point::new(1, 0));
        assert_eq!(span.to_string(), "(0.0,1.0)");
    }

    #[test]
    fn test_span_empty() {
        let span = Span::empty(7, Point::new(0, 7));
        assert!(span.is_empty());
        assert_eq!(span.len(), 0);
    }

    #[test]
    fn test_span_merge() {
        let a = Span::new(2, 5, Point::new(0, 2), Point::new(0, 5));
        let b = Span::new(9, 14, Point::new(1, 1), Point::new(1, 6));
        let merged = a.merge(b);
        assert_eq!(merged.start_byte, 2);
        assert_eq!(merged.end_byte, 14);
        assert!(!merged.is_single_line());
        assert_eq!(b.merge(a), merged);
    }
}
