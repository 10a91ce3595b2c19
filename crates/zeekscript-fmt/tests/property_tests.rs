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


//! Property-based tests for the formatter.

use proptest::prelude::*;
use zeekscript_fmt::format_str;

const SNIPPETS: &[&str] = &[
    "global x = 1;",
    "global  s : set[ count ]  ;",
    "const c = 5 &redef;",
    "print a,b;",
    "x=y+z;",
    "if (x) print 1;",
    "if (x) { print 1; } else { print 2; }",
    "event foo(1);",
    "# a comment",
    "## doc comment",
    "function f(a: count): count { return a + 1; }",
    "for (i in t) print i;",
    "local v: vector of count = vector(1, 2);",
];

fn script() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (prop::sample::select(SNIPPETS), prop::sample::select(&["\n", "\n\n", "\n\n\n"][..])),
        0..10,
    )
    .prop_map(|parts| {
        parts
            .into_iter()
            .map(|(snippet, sep)| format!("{snippet}{sep}"))
            .collect::<String>()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: formatting formatted output is a no-op.
    #[test]
    fn prop_format_idempotent(src in script()) {
        let once = format_str(&src).unwrap();
        let twice = format_str(&once).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Property: no output line ends in whitespace and non-empty output
    /// ends in exactly one newline.
    #[test]
    fn prop_no_trailing_whitespace(src in script()) {
        let output = format_str(&src).unwrap();
        for line in output.lines() {
            prop_assert_eq!(line, line.trim_end());
        }
        if !output.is_empty() {
            prop_assert!(output.ends_with('\n'));
            prop_assert!(!output.ends_with("\n\n"));
        }
    }

    /// Property: formatting arbitrary printable input never fails.
    #[test]
    fn prop_format_is_total(src in "[ -~\t\n]{0,200}") {
        prop_assert!(format_str(&src).is_ok());
    }
}
