//! Completions command implementation
//!
//! Handles the `bundle-ruler completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Write the completion script for `shell` to `out`
///
/// The command definition lives with the binary, so callers pass it in
/// (`Cli::command()` via `clap::CommandFactory`).
///
/// # Examples
///
/// ```bash
/// # Bash
/// bundle-ruler completions bash > /etc/bash_completion.d/bundle-ruler
///
/// # Zsh
/// bundle-ruler completions zsh > ~/.zfunc/_bundle-ruler
///
/// # Fish
/// bundle-ruler completions fish > ~/.config/fish/completions/bundle-ruler.fish
/// ```
pub fn cmd_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let bin_name = cmd.get_name().to_string();
    generate(shell, cmd, bin_name, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Arg;

    fn command() -> Command {
        Command::new("bundle-ruler")
            .arg(Arg::new("no-emoji").long("no-emoji").global(true))
            .subcommand(Command::new("analyze"))
            .subcommand(Command::new("compare"))
    }

    #[test]
    fn test_cmd_completions_generates_script_for_each_shell() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
            let mut out = Vec::new();
            cmd_completions(shell, &mut command(), &mut out);
            let script = String::from_utf8(out).unwrap();
            assert!(script.contains("bundle-ruler"), "{shell:?} script names the binary");
        }
    }
}
