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

//! Integration tests for parsing whole scripts.

use zeekscript_core::{walk, Script, Symbol, Traverse, TreeStats};

fn parse(src: &str) -> Script {
    let mut script = Script::from_source(src);
    script.parse().expect("parse within limits");
    script
}

fn symbols(script: &Script) -> Vec<Symbol> {
    let tree = script.tree().unwrap();
    Traverse::new(tree, false)
        .map(|(id, _)| tree.node(id).symbol)
        .collect()
}

const SAMPLE: &str = r#"##! A module for testing.

@load base/frameworks/notice

module Test;

export {
	## The log ID.
	redef enum Log::ID += { LOG };

	type Info: record {
		ts: time &log;    ##< When it happened.
		uid: string &log; ##< Connection UID.
		hosts: set[addr] &default=set();
	};

	const ports: set[port] = { 80/tcp, 8080/tcp, } &redef;
	option enabled = T;
	global log_test: event(rec: Info);
}

redef record Info += {
	extra: count &optional;
};

function helper(a: count, b: count &default=1): count
	{
	return a + b;
	}

event zeek_init() &priority=5
	{
	Log::create_stream(LOG, [$columns=Info, $ev=log_test, $path="test"]);

	local t: table[string] of vector of count = table();
	for ( k, v in t )
		{
		if ( |v| > 0 && k in t )
			print fmt("%s %d", k, |v|);
		else if ( ! enabled )
			next;
		}

@if ( Version::at_least("5.0") )
	print "new";
@else
	print "old";
@endif
	}
"#;

// ==================== Full script tests ====================

#[test]
fn test_sample_parses_cleanly() {
    let script = parse(SAMPLE);
    assert!(!script.has_error(), "{:?}", script.error());
}

#[test]
fn test_sample_top_level_shape() {
    let script = parse(SAMPLE);
    let tree = script.tree().unwrap();
    let root = tree.node(tree.root());
    let kinds: Vec<_> = root
        .children
        .iter()
        .map(|&d| tree.node(tree.node(d).children[0]).symbol)
        .collect();
    assert_eq!(
        kinds,
        vec![
            Symbol::PreprocDirective,
            Symbol::ModuleDecl,
            Symbol::ExportDecl,
            Symbol::RedefRecordDecl,
            Symbol::FuncDecl,
            Symbol::FuncDecl,
        ]
    );
}

#[test]
fn test_sample_comments_are_all_attached() {
    let script = parse(SAMPLE);
    let mut stats = TreeStats::default();
    walk(script.tree().unwrap(), true, &mut stats).unwrap();
    assert_eq!(stats.comments, 4);
    assert_eq!(stats.errors, 0);
    assert_eq!(stats.newlines, SAMPLE.matches('\n').count());
}

#[test]
fn test_zeekygen_prev_comments_follow_their_field() {
    let script = parse("type r: record {\n\ta: count; ##< doc\n};\n");
    let tree = script.tree().unwrap();
    let comment = Traverse::new(tree, true)
        .map(|(id, _)| id)
        .find(|&id| tree.node(id).symbol == Symbol::ZeekygenPrevComment)
        .unwrap();
    assert!(tree.node(comment).is_cst_next_node);
    assert_eq!(tree.text(comment, script.source()), "##< doc");
}

#[test]
fn test_directives_inside_function_body() {
    let script = parse(SAMPLE);
    let count = symbols(&script)
        .into_iter()
        .filter(|&s| s == Symbol::PreprocDirective)
        .count();
    assert_eq!(count, 4);
}

// ==================== Error tests ====================

#[test]
fn test_errors_do_not_hide_following_code() {
    let script = parse("global a = ;\nglobal b = 2;\nevent e() { print b; }\n");
    assert!(script.has_error());
    let syms = symbols(&script);
    assert_eq!(syms.iter().filter(|&&s| s == Symbol::Error).count(), 1);
    assert!(syms.contains(&Symbol::FuncDecl));
}

#[test]
fn test_error_message_format() {
    let mut script = Script::from_source("event zeek_init() {\n\tprint 1\n}\n");
    assert!(!script.parse().unwrap());
    let info = script.error().unwrap();
    assert_eq!(info.line, 1);
    assert_eq!(info.line_text, "\tprint 1");
    assert_eq!(info.message, "cannot parse line 1, col 1: \"print 1\"");
}

#[test]
fn test_write_tree_marks_extras() {
    let script = parse("global x = 1; # trailing\n");
    let mut out = Vec::new();
    script.write_tree(&mut out, true).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("^ minor_comment"));
    assert!(text.contains("^ nl"));
}
