use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use pomoclock::cli::args::{Cli, Commands};
use pomoclock::cli::commands;
use pomoclock::config::{Config, Paths};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::new().context("cannot locate the pomoclock directory")?;
    let config = Config::load_from_path(&paths.config_file)?;

    pomoclock::logging::init(&paths, &config.general.log_level)
        .context("cannot open the log file")?;

    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            pomoclock::tui::run(config, &paths, cli.quiet)?;
            String::new()
        }
        Commands::History(args) => commands::history(&paths, args.weeks, format)?,
        Commands::Sessions(args) => commands::sessions(&paths, &args, format)?,
        Commands::Config(args) => commands::config(&paths, config, args.command, format)?,
        Commands::Completions { shell, install } => commands::completions(shell, install)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
