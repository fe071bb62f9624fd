//! Roster CLI - Command-line interface for the employee roster.

use clap::Parser;
use roster_cli::commands;
use roster_cli::repl;
use roster_cli::{Cli, Command, Config, Formatter, Session};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> roster_cli::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Some(Command::Profile(args)) => {
            commands::execute_profile(args, &mut config, &formatter)?;
        }
        command => {
            let profile = config.get_active_profile()?;
            let policy = profile.policy()?;
            let database = cli.database.unwrap_or_else(|| profile.database.clone());
            let mut session = Session::open(&database, policy)?;

            match command {
                None | Some(Command::Repl) => {
                    repl::run_repl(&mut session, &mut config, &formatter, color_enabled)?;
                }
                Some(command) => {
                    // A failed command leaves the roster unchanged.
                    let result = commands::execute(command, &session, &mut config, &formatter);
                    session.close()?;
                    result?;
                }
            }
        }
    }

    Ok(())
}
