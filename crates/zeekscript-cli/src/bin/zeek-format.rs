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


//! zeek-format: shorthand for `zeek-script format`

use std::process::ExitCode;

use clap::Parser;
use zeekscript_cli::cli::FormatArgs;

/// Format Zeek scripts
#[derive(Parser)]
#[command(name = "zeek-format")]
#[command(author, version, about = "Format Zeek scripts", long_about = None)]
struct Cli {
    #[command(flatten)]
    args: FormatArgs,
}

fn main() -> ExitCode {
    zeekscript_cli::init_logging();
    let cli = Cli::parse();

    match cli.args.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
