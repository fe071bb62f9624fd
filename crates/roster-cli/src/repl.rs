//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::cli::{Cli, Command};
use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use std::path::PathBuf;

/// Run the interactive REPL over an open session.
///
/// The roster is saved when the loop ends; `save` saves on demand.
pub fn run_repl(
    session: &mut Session,
    config: &mut Config,
    formatter: &Formatter,
    color_enabled: bool,
) -> Result<()> {
    println!(
        "{}",
        formatter.info(&format!(
            "Roster REPL on {} - Type 'help' for commands, 'exit' to quit",
            session.database().display()
        ))
    );
    println!();

    let editor_config = EditorConfig::builder()
        .max_history_size(config.settings.history_size)
        .map_err(|e| CliError::Config(format!("Invalid history size: {}", e)))?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(|e| {
        CliError::Io(std::io::Error::other(format!(
            "Failed to initialize editor: {}",
            e
        )))
    })?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        let prompt = if session.is_dirty() {
            "roster*> "
        } else {
            "roster> "
        };

        match editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(ReplCommand::Save) => match session.save() {
                        Ok(true) => println!("{}", formatter.success("Roster saved")),
                        Ok(false) => println!("{}", formatter.info("Nothing to save")),
                        Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                    },
                    Ok(ReplCommand::Command(cli)) => {
                        let line_formatter = cli
                            .format
                            .map(|format| Formatter::new(format.into(), color_enabled));
                        let formatter = line_formatter.as_ref().unwrap_or(formatter);

                        if let Some(command) = cli.command {
                            if let Err(e) = commands::execute(command, session, config, formatter) {
                                eprintln!("{}", formatter.error(&e.to_string()));
                            }
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();
    session.save()?;

    Ok(())
}

/// REPL command type.
#[derive(Debug)]
enum ReplCommand {
    Exit,
    Help,
    Save,
    Command(Cli),
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let words = split_words(line)?;

    match words.first().map(String::as_str) {
        None => Err(CliError::InvalidInput("Empty command".to_string())),
        Some("exit" | "quit" | "q") => Ok(ReplCommand::Exit),
        Some("help" | "?") => Ok(ReplCommand::Help),
        Some("save") => Ok(ReplCommand::Save),
        Some(_) => {
            let cli = Cli::try_parse_from(std::iter::once("roster".to_string()).chain(words))
                .map_err(|e| CliError::InvalidInput(e.to_string()))?;
            if matches!(cli.command, Some(Command::Repl) | None) {
                return Err(CliError::InvalidInput(
                    "Already in interactive mode".to_string(),
                ));
            }
            Ok(ReplCommand::Command(cli))
        }
    }
}

/// Split a line into words, keeping single- or double-quoted text together.
fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(CliError::InvalidInput("Unterminated quote".to_string()));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

fn get_history_path() -> Result<PathBuf> {
    let home = Config::home()?;
    std::fs::create_dir_all(&home)?;
    Ok(home.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  employee add <name>                         - Register an employee");
    println!("  employee rename <id> <name>                 - Rename an employee");
    println!("  employee remove <id> [--cascade|--reject]   - Delete an employee");
    println!("  employee show <id> | employee list          - Show employees");
    println!("  link <sup> <inf> --department <d>           - Add a permanent relationship");
    println!("  assign <sup> <inf> -s <setting> [--starting <t>] (--ending <t> | --days <n>)");
    println!("                                              - Add a temporary relationship");
    println!("  unlink permanent <sup> <inf>                - Remove a permanent relationship");
    println!("  unlink temporary <sup> <inf> --starting <t> - Remove a temporary relationship");
    println!("  edges <id> [--role r] [--kind k]            - List relationships");
    println!("  hierarchy <id>                              - Superiors and inferiors");
    println!("  active <id> [--at <t>]                      - Active temporary relationships");
    println!("  report                                      - Every employee's hierarchy");
    println!("  demo                                        - Add the sample office");
    println!("  profile [list|show|switch|set|delete]       - Manage profiles");
    println!("  save                                        - Save the roster now");
    println!("  help, ?                                     - Show this help");
    println!("  exit, quit, q                               - Save and exit");
    println!();
    println!("  Times are 'now', RFC 3339 or YYYY-MM-DD. Append --format json to any command.");
}
