//! Interactive shell.
//!
//! A read-dispatch loop over the same clap command tree the one-shot CLI
//! uses, so the two surfaces cannot drift apart. The shell owns only line
//! splitting, the prompt, and a couple of built-ins (`help`, `exit`); all
//! command semantics live in `cli`.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output;
use crate::session::Session;
use crate::storage::Storage;

pub fn run(data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::load_or_default();
    let data_dir = config.resolve_data_dir(data_dir);

    println!(
        "backlog interactive shell. Type 'help' for commands, 'exit' to quit."
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_prompt(&data_dir);
        let Some(line) = lines.next() else {
            // EOF (ctrl-d or closed stdin)
            println!();
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let tokens = match split_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                let _ = output::emit_error("shell", &err, false);
                continue;
            }
        };
        let Some(command) = tokens.first().cloned() else {
            continue;
        };

        match command.as_str() {
            "exit" | "quit" | "q" => break,
            "help" | "h" | "?" => {
                print_help();
                continue;
            }
            _ => {}
        }

        dispatch(&data_dir, &command, tokens);
    }

    println!("Goodbye.");
    Ok(())
}

fn dispatch(data_dir: &Path, command: &str, tokens: Vec<String>) {
    let argv = std::iter::once("backlog".to_string()).chain(tokens);
    match Cli::try_parse_from(argv) {
        Ok(mut cli) => {
            cli.interactive = true;
            if cli.data_dir.is_none() {
                cli.data_dir = Some(data_dir.to_path_buf());
            }
            if let Err(err) = cli.run() {
                // Command failures never kill the session.
                let _ = output::emit_error(command, &err, false);
            }
        }
        Err(err) => {
            // clap renders its own usage and unknown-command messages.
            let _ = err.print();
        }
    }
}

fn print_prompt(data_dir: &Path) {
    let storage = Storage::new(data_dir.to_path_buf());
    let session = Session::load(&storage);
    let project = session.current().unwrap_or("no project");
    print!(
        "{}{}{} ",
        "backlog".green().bold(),
        format!("[{project}]").cyan(),
        ">".bold()
    );
    let _ = io::stdout().flush();
}

fn print_help() {
    println!(
        "\
Commands:
  projects                    List all projects
  create-project <name>       Create a new project and select it
  use <name>                  Switch to a project
  delete-project <name>       Delete a project and its data file
  items [filters]             List items (--priority --status --sprint --epic --assignee)
  add <title> [description]   Add an item (--priority --sprint --epic --assignee --points)
  update <id> [fields]        Update an item (--title --description --priority --status ...)
  show <id>                   Show item details
  delete <id>                 Delete an item
  status                      Show current selection and item counts
  export-csv [file]           Export the current project to CSV
  export-xlsx [file]          Export the current project to XLSX
  help                        Show this message
  exit                        Leave the shell

Append --help to any command for the full flag listing."
    );
}

/// Split a shell line into tokens. Single and double quotes group words;
/// backslash escapes the next character outside single quotes.
fn split_line(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match quote {
            Some(q) => {
                if ch == q {
                    quote = None;
                } else if ch == '\\' && q == '"' {
                    let next = chars
                        .next()
                        .ok_or_else(|| Error::Validation("dangling escape".to_string()))?;
                    current.push(next);
                } else {
                    current.push(ch);
                }
            }
            None => match ch {
                '\'' | '"' => {
                    quote = Some(ch);
                    in_token = true;
                }
                '\\' => {
                    let next = chars
                        .next()
                        .ok_or_else(|| Error::Validation("dangling escape".to_string()))?;
                    current.push(next);
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }

    if quote.is_some() {
        return Err(Error::Validation("unmatched quote in input".to_string()));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
