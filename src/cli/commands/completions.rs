//! Shell completions generation.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::PomoError;

/// Generate the completion script for `shell`, or its install notes.
///
/// # Errors
///
/// Returns `PomoError::Parse` if the generated script is not UTF-8.
pub fn completions(shell: Shell, install: bool) -> Result<String, PomoError> {
    if install {
        return Ok(completion_install_instructions(shell));
    }

    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "pomoclock", &mut buf);
    String::from_utf8(buf).map_err(|e| PomoError::Parse(format!("UTF-8 error: {e}")))
}

/// Installation instructions for shell completions.
#[must_use]
pub fn completion_install_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => r"# Add to ~/.bashrc or ~/.bash_profile:
source <(pomoclock completions bash)

# Or save to a file:
pomoclock completions bash > /usr/local/etc/bash_completion.d/pomoclock
"
        .to_string(),

        Shell::Zsh => r"# Save to your fpath:
pomoclock completions zsh > ~/.zsh/completions/_pomoclock
# Then add to ~/.zshrc (before compinit):
fpath=(~/.zsh/completions $fpath)
autoload -Uz compinit && compinit
"
        .to_string(),

        Shell::Fish => r"# Save to fish completions directory:
pomoclock completions fish > ~/.config/fish/completions/pomoclock.fish
"
        .to_string(),

        Shell::PowerShell => r"# Add to your PowerShell profile ($PROFILE):
pomoclock completions powershell | Out-String | Invoke-Expression
"
        .to_string(),

        Shell::Elvish => r"# Save to elvish completions directory:
pomoclock completions elvish > ~/.elvish/lib/pomoclock.elv

# Then add to ~/.elvish/rc.elv:
use pomoclock
"
        .to_string(),

        _ => format!("pomoclock completions {shell} > <your completions directory>\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_bash_completions() {
        let script = completions(Shell::Bash, false).unwrap();
        assert!(script.contains("pomoclock"));
        assert!(script.contains("complete"));
        assert!(script.contains("history"));
    }

    #[test]
    fn test_generate_fish_completions() {
        let script = completions(Shell::Fish, false).unwrap();
        assert!(script.contains("pomoclock"));
    }

    #[test]
    fn test_install_flag_prints_instructions() {
        let text = completions(Shell::Zsh, true).unwrap();
        assert!(text.contains("_pomoclock"));
        assert!(!completion_install_instructions(Shell::Bash).is_empty());
    }
}
