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

//! Newlines and comments.

use std::io::{self, Write};

use super::{Ctx, Formatter};

impl<W: Write> Formatter<'_, W> {
    /// Collapses runs of blank lines to one and drops them at the start and
    /// end of a sequence. A single newline writes nothing; the surrounding
    /// formatters decide on line ends.
    pub(super) fn format_nl(&mut self, cx: &mut Ctx) -> io::Result<()> {
        let node = self.node(cx.id);
        let Some(next) = node.next_cst_sibling else {
            return Ok(());
        };
        if self.node(next).is_nl() || self.tree.token(next, self.src) == Some("}") {
            return Ok(());
        }

        let Some(prev) = node.prev_cst_sibling else {
            return Ok(());
        };
        if !self.node(prev).is_nl() {
            return Ok(());
        }

        let mut start = prev;
        while let Some(p) = self.node(start).prev_cst_sibling.filter(|&p| self.node(p).is_nl()) {
            start = p;
        }
        let before = self.node(start).prev_cst_sibling;
        if before.is_some_and(|b| self.tree.token(b, self.src) != Some("{")) {
            // Trailing extras come before the owner's own line end.
            if self.out.column() != 0 {
                self.nl(cx)?;
            }
            self.nl_with(cx, true, false)?;
        }
        Ok(())
    }

    /// `# ...`, separated by a space when it trails other content.
    pub(super) fn format_minor_comment(&mut self, cx: &mut Ctx) -> io::Result<()> {
        let trailing = self
            .node(cx.id)
            .prev_cst_sibling
            .is_some_and(|p| !self.node(p).is_nl());
        if trailing {
            self.sp(cx)?;
        } else if self.out.column() != 0 {
            self.nl(cx)?;
        }
        self.comment_text(cx)?;
        self.nl_with(cx, false, trailing)
    }

    /// `##!` and `##` comments sit on their own lines.
    pub(super) fn format_zeekygen_comment(&mut self, cx: &mut Ctx) -> io::Result<()> {
        if self.out.column() != 0 {
            self.nl(cx)?;
        }
        self.comment_text(cx)?;
        self.nl(cx)
    }

    /// `##<` comments trail the item they document. Consecutive ones are
    /// aligned to the column of the first.
    pub(super) fn format_zeekygen_prev_comment(&mut self, cx: &mut Ctx) -> io::Result<()> {
        self.write_indent(cx)?;

        let pnode = self.tree.find_prev_cst_sibling(cx.id, |n| !n.is_nl());
        let aligned_to = pnode
            .filter(|&p| self.node(p).is_zeekygen_prev_comment())
            .and_then(|p| self.prev_comment_cols[p.index()]);
        match aligned_to {
            Some(col) => self.sp_n(cx, col.saturating_sub(self.out.column()))?,
            None => self.sp(cx)?,
        }

        self.prev_comment_cols[cx.id.index()] = Some(self.out.column());
        self.comment_text(cx)?;

        let node = self.node(cx.id);
        let continues = node
            .next_cst_sibling
            .filter(|&n| self.node(n).is_nl())
            .and_then(|n| self.node(n).next_cst_sibling)
            .is_some_and(|n| self.node(n).is_zeekygen_prev_comment());
        if continues {
            self.nl(cx)?;
        }
        Ok(())
    }

    fn comment_text(&mut self, cx: &Ctx) -> io::Result<()> {
        let text = self.tree.text(cx.id, self.src).trim_end();
        self.write(cx, text)
    }
}
