use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "pomoclock")]
#[command(about = "A Pomodoro clock for the terminal")]
#[command(long_about = "pomoclock - a Pomodoro clock for the terminal

Alternates work periods with short breaks and, after a set of work periods,
a long break. Every completed work period is recorded and can be reviewed
per week.

QUICK START:
  pomoclock                       Run the clock (same as 'pomoclock tui')
  pomoclock history               Completed sessions for the last 8 weeks
  pomoclock config set work 50    Make work periods 50 minutes long

CLOCK KEYS:
  s / space  start (restarts the lap while running)
  x          stop (pause; a second stop resets)
  r          reset
  h          toggle weekly history
  o          settings
  q / Esc    quit

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable sounds and desktop notifications for this run
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the clock in the terminal
    ///
    /// This is the default when no command is given.
    Tui,

    /// Show completed work sessions per week
    ///
    /// Weeks start on Monday in the local timezone. Weeks without sessions
    /// are listed with a zero count.
    #[command(alias = "h")]
    History(HistoryArgs),

    /// List or clear individual completed sessions
    Sessions(SessionsArgs),

    /// Show or change configuration
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Example: pomoclock completions bash > ~/.bash_completion.d/pomoclock
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,

        /// Show installation instructions instead
        #[arg(long, short = 'i')]
        install: bool,
    },
}

#[derive(Args)]
pub struct HistoryArgs {
    /// Number of weeks to show, newest first
    #[arg(short, long, default_value_t = 8, value_parser = clap::value_parser!(u16).range(1..=520))]
    pub weeks: u16,
}

#[derive(Args)]
pub struct SessionsArgs {
    /// Maximum number of sessions to list, newest first
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,

    /// Delete every recorded session
    #[arg(long)]
    pub clear: bool,

    /// Confirm --clear
    #[arg(long, requires = "clear")]
    pub force: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Change a single setting and save it
    ///
    /// Keys: work, break, long-break, interval, count-backwards,
    /// tick-interval-ms, tick-sound, ring-sound, desktop, tick-sound-file,
    /// ring-sound-file, log-level, output
    ///
    /// Example: pomoclock config set long-break 20
    Set {
        /// Setting name
        key: String,
        /// New value
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_defaults_to_no_command() {
        let cli = Cli::try_parse_from(["pomoclock"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.output.is_none());
        assert!(!cli.quiet);
    }

    #[test]
    fn test_cli_tui_quiet() {
        let cli = Cli::try_parse_from(["pomoclock", "tui", "--quiet"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Tui)));
        assert!(cli.quiet);
    }

    #[test]
    fn test_cli_history_default_weeks() {
        let cli = Cli::try_parse_from(["pomoclock", "history"]).unwrap();
        match cli.command {
            Some(Commands::History(args)) => assert_eq!(args.weeks, 8),
            _ => panic!("expected history"),
        }
    }

    #[test]
    fn test_cli_history_alias_and_json() {
        let cli = Cli::try_parse_from(["pomoclock", "h", "-w", "3", "-o", "json"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
        match cli.command {
            Some(Commands::History(args)) => assert_eq!(args.weeks, 3),
            _ => panic!("expected history"),
        }
    }

    #[test]
    fn test_cli_history_rejects_zero_weeks() {
        assert!(Cli::try_parse_from(["pomoclock", "history", "--weeks", "0"]).is_err());
    }

    #[test]
    fn test_cli_sessions_force_requires_clear() {
        assert!(Cli::try_parse_from(["pomoclock", "sessions", "--force"]).is_err());

        let cli = Cli::try_parse_from(["pomoclock", "sessions", "--clear", "--force"]).unwrap();
        match cli.command {
            Some(Commands::Sessions(args)) => assert!(args.clear && args.force),
            _ => panic!("expected sessions"),
        }
    }

    #[test]
    fn test_cli_config_set() {
        let cli = Cli::try_parse_from(["pomoclock", "config", "set", "work", "50"]).unwrap();
        match cli.command {
            Some(Commands::Config(ConfigArgs {
                command: ConfigCommands::Set { key, value },
            })) => {
                assert_eq!(key, "work");
                assert_eq!(value, "50");
            }
            _ => panic!("expected config set"),
        }
    }

    #[test]
    fn test_cli_completions_shell() {
        let cli = Cli::try_parse_from(["pomoclock", "completions", "zsh"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Completions {
                shell: Shell::Zsh,
                install: false
            })
        ));
        assert!(Cli::try_parse_from(["pomoclock", "completions", "tcsh"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
