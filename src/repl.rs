//! Interactive REPL: each line is lexed and its tokens printed.

use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};
use scim_filter_lexer::config::{CliConfig, OutputFormat};
use scim_filter_lexer::render::with_prefix;
use tracing::debug;

use crate::print_lexed;

/// REPL commands start with a dot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Exit,
    Json,
    Table,
}

impl ReplCommand {
    pub fn parse(input: &str) -> Option<Self> {
        let cmd = input.trim().strip_prefix('.')?;
        match cmd.to_lowercase().as_str() {
            "help" | "h" | "?" => Some(ReplCommand::Help),
            "exit" | "quit" | "q" => Some(ReplCommand::Exit),
            "json" => Some(ReplCommand::Json),
            "table" => Some(ReplCommand::Table),
            _ => None,
        }
    }

    pub fn all_commands() -> &'static [(&'static str, &'static str)] {
        &[
            (".help", "Show this help message"),
            (".exit", "Exit the REPL"),
            (".json", "Print tokens as JSON"),
            (".table", "Print tokens as a table"),
        ]
    }
}

pub struct Repl {
    editor: DefaultEditor,
    config: CliConfig,
}

impl Repl {
    pub fn new(config: CliConfig) -> rustyline::Result<Self> {
        let editor_config = Config::builder()
            .history_ignore_dups(true)?
            .history_ignore_space(true)
            .max_history_size(config.max_history)?
            .auto_add_history(true)
            .build();

        let mut editor = DefaultEditor::with_config(editor_config)?;
        if let Some(path) = &config.history_file {
            if let Err(e) = editor.load_history(path) {
                debug!(error = %e, path = %path.display(), "no history loaded");
            }
        }

        Ok(Self { editor, config })
    }

    pub fn run(&mut self) -> rustyline::Result<()> {
        println!("SCIM filter lexer. Type .help for commands, .exit to quit.");

        loop {
            match self.editor.readline(&self.config.prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    if let Some(cmd) = ReplCommand::parse(trimmed) {
                        match cmd {
                            ReplCommand::Help => print_help(),
                            ReplCommand::Exit => break,
                            ReplCommand::Json => self.config.output = OutputFormat::Json,
                            ReplCommand::Table => self.config.output = OutputFormat::Table,
                        }
                        continue;
                    }

                    let input = with_prefix(trimmed, self.config.auto_prefix);
                    print_lexed(&input, self.config.output);
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err),
            }
        }

        if let Some(path) = &self.config.history_file {
            if let Err(e) = self.editor.save_history(path) {
                debug!(error = %e, path = %path.display(), "history not saved");
            }
        }
        Ok(())
    }
}

fn print_help() {
    println!("Enter a filter such as: userName eq \"bjensen\"");
    for (cmd, description) in ReplCommand::all_commands() {
        println!("  {cmd:<8} {description}");
    }
}
