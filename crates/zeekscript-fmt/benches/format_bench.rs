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


//! Formatter benchmarks.
//!
//! Measures parsing and formatting of generated scripts of growing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use zeekscript_core::Script;
use zeekscript_fmt::{format, format_str};

const SIZES: &[usize] = &[10, 100, 1_000];

/// One event handler per unit, with a little of everything.
fn generate_script(units: usize) -> String {
    let mut src = String::from("##! Generated benchmark script.\n\nmodule Bench;\n\n");
    for i in 0..units {
        src.push_str(&format!(
            "global counter_{i}: table[addr] of count &default=0;   # counter {i}\n\n\
             event handler_{i}(c: connection)\n{{\n\
             local h=c$id$orig_h;\n\
             if(h in counter_{i}&&counter_{i}[h]>{i}) {{ print fmt(\"%s %d\", h, counter_{i}[h]); }}\n\
             else ++counter_{i}[h];\n\
             for ( k in counter_{i} ) print k;\n\
             }}\n\n"
        ));
    }
    src
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");

    for &units in SIZES {
        let src = generate_script(units);
        let mut script = Script::from_source(src.clone());
        if script.parse().is_err() {
            continue;
        }

        group.throughput(Throughput::Bytes(src.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(units), &script, |b, script| {
            b.iter(|| format(black_box(script)))
        });
    }

    group.finish();
}

fn bench_parse_and_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_and_format");

    for &units in SIZES {
        let src = generate_script(units);
        group.throughput(Throughput::Bytes(src.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(units), &src, |b, src| {
            b.iter(|| format_str(black_box(src)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_format, bench_parse_and_format);
criterion_main!(benches);
