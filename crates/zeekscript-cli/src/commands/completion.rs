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


//! Shell completion generation

use std::io;

use clap::Command;
use clap_complete::{generate, Generator};

/// Write a completion script for `cmd` to stdout.
///
/// # Examples
///
/// ```no_run
/// use clap::Command;
/// use clap_complete::shells::Bash;
/// use zeekscript_cli::commands::generate_completion_for_command;
///
/// let mut cmd = Command::new("zeek-script");
/// generate_completion_for_command(Bash, &mut cmd);
/// ```
pub fn generate_completion_for_command<G: Generator>(generator: G, cmd: &mut Command) {
    let name = cmd.get_name().to_string();
    generate(generator, cmd, name, &mut io::stdout());
}

/// Installation instructions for the completions of a shell.
///
/// Shell names are case-insensitive.
///
/// # Examples
///
/// ```
/// use zeekscript_cli::commands::print_installation_instructions;
///
/// let instructions = print_installation_instructions("bash");
/// assert!(instructions.contains("bash"));
///
/// assert_eq!(print_installation_instructions("unknown"), "Unsupported shell");
/// ```
pub fn print_installation_instructions(shell: &str) -> String {
    match shell.to_lowercase().as_str() {
        "bash" => {
            r#"# Bash completion installation:

# For current session only:
eval "$(zeek-script completion bash)"

# For persistent installation, add to your ~/.bashrc:
echo 'eval "$(zeek-script completion bash)"' >> ~/.bashrc
"#
        }
        "zsh" => {
            r#"# Zsh completion installation:

# For current session only:
eval "$(zeek-script completion zsh)"

# Or save to a completions directory in $fpath:
zeek-script completion zsh > ~/.zsh/completions/_zeek-script
"#
        }
        "fish" => {
            r#"# Fish completion installation:

zeek-script completion fish > ~/.config/fish/completions/zeek-script.fish
"#
        }
        "powershell" | "pwsh" => {
            r#"# PowerShell completion installation:

# Add this line to your profile ($PROFILE):
zeek-script completion powershell | Out-String | Invoke-Expression
"#
        }
        "elvish" => {
            r#"# Elvish completion installation:

# Add this line to your ~/.elvish/rc.elv:
eval (zeek-script completion elvish)
"#
        }
        _ => "Unsupported shell",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installation_instructions_known_shells() {
        for shell in ["bash", "zsh", "fish", "elvish"] {
            let instructions = print_installation_instructions(shell);
            assert!(instructions.contains(shell), "{shell}");
        }
        assert!(print_installation_instructions("pwsh").contains("PowerShell"));
    }

    #[test]
    fn test_installation_instructions_case_insensitive() {
        assert_eq!(
            print_installation_instructions("BASH"),
            print_installation_instructions("bash")
        );
    }
}
