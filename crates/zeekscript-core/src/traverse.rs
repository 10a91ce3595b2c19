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

//! Depth-first traversal of the concrete syntax tree.
//!
//! [`Traverse`] yields `(node, nesting)` pairs in preorder: the root has
//! nesting 0, its children 1, and so on. With `include_cst` set, each AST
//! node is surrounded by its leading and trailing extras at the same
//! nesting level.
//!
//! For analyses that prefer callbacks, implement [`TreeVisitor`] and hand
//! it to [`walk`].
//!
//! # Example
//!
//! ```
//! use zeekscript_core::{Script, traverse::{walk, TreeStats}};
//!
//! let mut script = Script::from_source("# hi\nglobal x = 1;\n");
//! script.parse().unwrap();
//! let tree = script.tree().unwrap();
//!
//! let mut stats = TreeStats::default();
//! walk(tree, true, &mut stats).unwrap();
//! assert_eq!(stats.comments, 1);
//! assert_eq!(stats.errors, 0);
//! ```

use std::collections::VecDeque;
use std::convert::Infallible;

use crate::tree::{NodeId, Symbol, Tree};

/// Preorder iterator over a [`Tree`].
pub struct Traverse<'t> {
    tree: &'t Tree,
    include_cst: bool,
    stack: Vec<(NodeId, usize)>,
    pending: VecDeque<(NodeId, usize)>,
}

impl<'t> Traverse<'t> {
    /// Traverses the whole tree from its root.
    pub fn new(tree: &'t Tree, include_cst: bool) -> Self {
        Self::from_node(tree, tree.root(), include_cst)
    }

    /// Traverses the subtree below `start`, which gets nesting 0.
    pub fn from_node(tree: &'t Tree, start: NodeId, include_cst: bool) -> Self {
        Self {
            tree,
            include_cst,
            stack: vec![(start, 0)],
            pending: VecDeque::new(),
        }
    }
}

impl Iterator for Traverse<'_> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(item) = self.pending.pop_front() {
            return Some(item);
        }

        let (id, nesting) = self.stack.pop()?;
        let node = self.tree.node(id);
        self.stack
            .extend(node.children.iter().rev().map(|&c| (c, nesting + 1)));

        if !self.include_cst {
            return Some((id, nesting));
        }

        self.pending
            .extend(node.prev_cst_siblings.iter().map(|&c| (c, nesting)));
        self.pending.push_back((id, nesting));
        self.pending
            .extend(node.next_cst_siblings.iter().map(|&c| (c, nesting)));
        self.pending.pop_front()
    }
}

/// Callback interface for tree walks.
pub trait TreeVisitor {
    /// Error type returned by the visitor.
    type Error;

    /// Called once per visited node, in traversal order.
    fn visit(&mut self, tree: &Tree, id: NodeId, nesting: usize) -> Result<(), Self::Error>;
}

/// Walks `tree` in preorder, calling `visitor` for every node.
///
/// # Errors
///
/// Stops at and returns the first error the visitor reports.
pub fn walk<V: TreeVisitor>(tree: &Tree, include_cst: bool, visitor: &mut V) -> Result<(), V::Error> {
    for (id, nesting) in Traverse::new(tree, include_cst) {
        visitor.visit(tree, id, nesting)?;
    }
    Ok(())
}

/// Node counts gathered over a walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Every visited node.
    pub nodes: usize,
    /// Named grammar nodes (excluding extras).
    pub named: usize,
    pub comments: usize,
    pub newlines: usize,
    /// `ERROR` nodes.
    pub errors: usize,
    pub max_nesting: usize,
}

impl TreeVisitor for TreeStats {
    type Error = Infallible;

    fn visit(&mut self, tree: &Tree, id: NodeId, nesting: usize) -> Result<(), Self::Error> {
        let node = tree.node(id);
        self.nodes += 1;
        self.max_nesting = self.max_nesting.max(nesting);
        match node.symbol {
            Symbol::Nl => self.newlines += 1,
            Symbol::Error => {
                self.errors += 1;
                self.named += 1;
            }
            sym if sym.is_comment() => self.comments += 1,
            Symbol::Token => {}
            _ => self.named += 1,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Script;

    fn parsed(src: &str) -> Script {
        let mut script = Script::from_source(src);
        script.parse().unwrap();
        script
    }

    #[test]
    fn test_preorder_nesting() {
        let script = parsed("global x = 1;");
        let tree = script.tree().unwrap();
        let items: Vec<_> = Traverse::new(tree, false)
            .map(|(id, n)| (tree.type_name(id, script.source()), n))
            .collect();
        assert_eq!(items[0], ("source_file", 0));
        assert_eq!(items[1], ("decl", 1));
        assert_eq!(items[2], ("global_decl", 2));
        assert_eq!(items[3], ("global", 3));
        assert_eq!(items[4], ("id", 3));
    }

    #[test]
    fn test_cst_extras_interleaved() {
        let script = parsed("# c\nglobal x = 1;\n");
        let tree = script.tree().unwrap();
        let with_cst = Traverse::new(tree, true).count();
        let without = Traverse::new(tree, false).count();
        // The comment and both newlines.
        assert_eq!(with_cst, without + 3);
    }

    #[test]
    fn test_subtree_traversal() {
        let script = parsed("global x = 1;");
        let tree = script.tree().unwrap();
        let decl = tree.node(tree.root()).children[0];
        let first = Traverse::from_node(tree, decl, false).next();
        assert_eq!(first, Some((decl, 0)));
    }

    #[test]
    fn test_stats_counts_errors() {
        let mut script = Script::from_source("global = ;\nglobal y = 2;\n");
        assert!(!script.parse().unwrap());
        let mut stats = TreeStats::default();
        walk(script.tree().unwrap(), true, &mut stats).unwrap();
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.newlines, 2);
    }
}
