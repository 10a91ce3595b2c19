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

//! Property-based tests for the lexer and parser.

use proptest::prelude::*;
use zeekscript_core::lex::tokenize;
use zeekscript_core::{ParseLimits, Script};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: tokens never overlap and only horizontal whitespace lies
    /// between them.
    #[test]
    fn prop_tokens_cover_input(src in "[ -~\t\n]{0,200}") {
        let tokens = tokenize(&src);
        let mut pos = 0;
        for tok in &tokens {
            prop_assert!(tok.span.start_byte >= pos, "overlap at {}", tok.span.start_byte);
            let gap = &src[pos..tok.span.start_byte];
            prop_assert!(gap.bytes().all(|b| matches!(b, b' ' | b'\t' | b'\x0c' | b'\r')), "gap {:?}", gap);
            prop_assert!(tok.span.end_byte > tok.span.start_byte);
            pos = tok.span.end_byte;
        }
        let tail = &src[pos..];
        prop_assert!(tail.bytes().all(|b| matches!(b, b' ' | b'\t' | b'\x0c' | b'\r')));
    }

    /// Property: parsing arbitrary input never fails outside resource
    /// limits, and the root spans the whole source.
    #[test]
    fn prop_parse_is_total(src in "[ -~\t\n]{0,200}") {
        let mut script = Script::from_source(src.clone());
        prop_assert!(script.parse().is_ok());
        let tree = script.tree().unwrap();
        let root = tree.node(tree.root());
        prop_assert_eq!(root.span.start_byte, 0);
        prop_assert_eq!(root.span.end_byte, src.len());
    }

    /// Property: every comment and newline of the input shows up exactly
    /// once in a CST traversal.
    #[test]
    fn prop_extras_preserved(lines in prop::collection::vec("(global x[0-9] = [0-9];|# [a-z ]{0,10}|)", 0..12)) {
        let src = lines.join("\n");
        let mut script = Script::from_source(src.clone());
        prop_assert!(script.parse().unwrap());
        let tree = script.tree().unwrap();
        let newlines = script
            .traverse(true)
            .unwrap()
            .filter(|&(id, _)| tree.node(id).is_nl())
            .count();
        prop_assert_eq!(newlines, src.matches('\n').count());
    }

    /// Property: deeply nested input hits the nesting limit instead of
    /// overflowing the stack.
    #[test]
    fn prop_nesting_limit(depth in 300_usize..600) {
        let src = format!("x = {}1{};", "(".repeat(depth), ")".repeat(depth));
        let mut script = Script::from_source(src).with_limits(ParseLimits::default());
        prop_assert!(script.parse().is_err());
    }
}
