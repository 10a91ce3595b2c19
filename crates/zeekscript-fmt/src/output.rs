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

//! An indenting, column-aware, line-buffered output stream that wraps long
//! lines and strips trailing whitespace.
//!
//! Formatters write chunks of text tagged with [`Hints`]. The stream
//! buffers a whole line of chunks and, once the line ends, decides where to
//! insert breaks: a break goes in front of a chunk that would push the line
//! past the configured width, unless the hints forbid breaking there.
//! Continuation lines repeat the current tab indentation plus a few spaces.

use std::io::{self, Write};

use crate::config::FormatConfig;
use crate::hint::Hints;

struct Chunk {
    data: String,
    hints: Hints,
}

/// Returns true for chunks made only of whitespace.
#[inline]
fn is_blank(data: &str) -> bool {
    data.trim().is_empty()
}

/// Line-buffering writer used by the formatter.
pub struct OutputStream<W: Write> {
    out: W,
    config: FormatConfig,
    /// Column the next byte goes into.
    col: usize,
    /// Tab indentation of the current line.
    tab_indent: usize,
    line: Vec<Chunk>,
    space_align: bool,
    use_tab_indent: bool,
    use_linebreaks: bool,
}

impl<W: Write> OutputStream<W> {
    pub fn new(out: W, config: FormatConfig) -> Self {
        Self {
            out,
            config,
            col: 0,
            tab_indent: 0,
            line: Vec::new(),
            space_align: false,
            use_tab_indent: true,
            use_linebreaks: true,
        }
    }

    /// Buffers `data`, flushing at every newline. Whitespace before a
    /// newline within `data` is dropped.
    pub fn write(&mut self, data: &str, hints: Hints) -> io::Result<()> {
        for piece in data.split_inclusive('\n') {
            let chunk = match piece.strip_suffix('\n') {
                Some(body) => {
                    let mut s = body.trim_end().to_string();
                    s.push('\n');
                    s
                }
                None => piece.to_string(),
            };
            let ends_line = chunk.ends_with('\n');
            self.col += chunk.len();
            self.line.push(Chunk { data: chunk, hints });
            if ends_line {
                self.flush_line()?;
            }
        }
        Ok(())
    }

    /// Writes `indent` tabs and remembers the indentation for wrapped
    /// continuation lines.
    pub fn write_tab_indent(&mut self, indent: usize, hints: Hints) -> io::Result<()> {
        if !self.use_tab_indent {
            self.tab_indent = 0;
            return Ok(());
        }
        self.tab_indent = indent;
        self.write(&"\t".repeat(indent), hints)
    }

    pub fn write_space_align(&mut self, hints: Hints) -> io::Result<()> {
        if self.space_align {
            let spaces = " ".repeat(self.config.space_indent);
            self.write(&spaces, hints)?;
        }
        Ok(())
    }

    #[inline]
    pub fn column(&self) -> usize {
        self.col
    }

    #[inline]
    pub fn set_space_align(&mut self, enable: bool) {
        self.space_align = enable;
    }

    #[inline]
    pub fn set_tab_indent(&mut self, enable: bool) {
        self.use_tab_indent = enable;
    }

    #[inline]
    pub fn set_linebreaks(&mut self, enable: bool) {
        self.use_linebreaks = enable;
    }

    /// Flushes any unterminated last line and returns the inner writer.
    pub fn finish(mut self) -> io::Result<W> {
        if !self.line.is_empty() {
            self.flush_line()?;
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_linebreak(&mut self) -> io::Result<usize> {
        self.out.write_all(b"\n")?;
        self.out.write_all("\t".repeat(self.tab_indent).as_bytes())?;
        self.out
            .write_all(" ".repeat(self.config.space_indent).as_bytes())?;
        Ok(self.tab_indent * self.config.tab_size + self.config.space_indent)
    }

    /// Writes out the buffered line, inserting breaks as needed.
    ///
    /// Whitespace chunks are held back until the next real chunk, so a break
    /// never leaves whitespace at a line end and the continuation never
    /// starts with it. Once a break was placed due to `GOOD_AFTER_LB`, only
    /// such hinted breaks are used for the rest of the line.
    fn flush_line(&mut self) -> io::Result<()> {
        let line = std::mem::take(&mut self.line);
        let line_len = std::mem::take(&mut self.col);
        let items = line.iter().filter(|c| !is_blank(&c.data)).count();
        let breaks = self.use_linebreaks && self.config.linebreaks;
        let max = self.config.max_line_len;

        let mut col_flushed = 0usize;
        let mut tbd_start = 0usize;
        let mut tbd_len: isize = 0;
        let mut using_break_hints = false;

        for (i, chunk) in line.iter().enumerate() {
            if !chunk.hints.contains(Hints::ZERO_WIDTH) {
                tbd_len += chunk.data.len() as isize;
            }
            if is_blank(&chunk.data) {
                continue;
            }

            if chunk.hints.contains(Hints::NO_LB_AFTER) {
                continue;
            }
            if line
                .get(i + 1)
                .is_some_and(|next| next.hints.contains(Hints::NO_LB_BEFORE))
            {
                continue;
            }
            if chunk.hints.contains(Hints::NO_LB_BEFORE)
                && line[tbd_start..i].iter().all(|c| is_blank(&c.data))
            {
                continue;
            }

            if breaks {
                let hinted = chunk.hints.contains(Hints::GOOD_AFTER_LB) && line_len > max;
                let overlong = !using_break_hints
                    && col_flushed as isize + tbd_len > max as isize
                    && items >= self.config.min_line_items;
                if hinted || overlong {
                    col_flushed = self.write_linebreak()?;
                    while tbd_start < i && is_blank(&line[tbd_start].data) {
                        tbd_start += 1;
                    }
                    if hinted {
                        using_break_hints = true;
                    }
                }
            }

            for c in &line[tbd_start..=i] {
                self.out.write_all(c.data.as_bytes())?;
                col_flushed += c.data.len();
            }
            tbd_start = i + 1;
            tbd_len = 0;
        }

        // Leftovers. Whitespace held back right before the newline is dropped.
        let rest = &line[tbd_start..];
        let (body, newline) = match rest.split_last() {
            Some((last, body)) if last.data.ends_with('\n') => (body, Some(last)),
            _ => (rest, None),
        };
        let keep = match newline {
            Some(_) => body
                .iter()
                .rposition(|c| !is_blank(&c.data))
                .map_or(0, |p| p + 1),
            None => body.len(),
        };
        for c in body[..keep].iter().chain(newline) {
            self.out.write_all(c.data.as_bytes())?;
        }
        Ok(())
    }
}
