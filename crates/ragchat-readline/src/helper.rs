use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use ragchat_core::overlay::UploadOption;
use strum::IntoEnumIterator;

pub const COMMANDS: &[(&str, &str)] = &[
    ("/history", "toggle the history drawer"),
    ("/search", "search history titles: /search <query>"),
    ("/upload", "open the upload sheet"),
    ("/select", "pick an upload option: /select pdf|text|memory"),
    ("/close", "close the open overlay"),
    ("/memories", "list memories"),
    ("/remember", "add a memory: /remember <title> | <content>"),
    ("/forget", "delete a memory: /forget <id>"),
    ("/settings", "show settings"),
    ("/dark", "dark mode: /dark on|off"),
    ("/notify", "notifications: /notify on|off"),
    ("/retry", "retry the last failed reply"),
    ("/new", "start a new chat"),
    ("/dump", "print the thread as JSON"),
    ("/help", "list commands"),
    ("/quit", "exit"),
];

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
pub struct CliHelper {
    commands: &'static [(&'static str, &'static str)],
}

impl CliHelper {
    pub fn new() -> Self {
        Self { commands: COMMANDS }
    }
}

/// Short word accepted by `/select` for `option`.
pub fn upload_keyword(option: UploadOption) -> &'static str {
    match option {
        UploadOption::Pdf => "pdf",
        UploadOption::TextInput => "text",
        UploadOption::Memory => "memory",
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if let Some(arg) = line.strip_prefix("/select ") {
            let needle = arg.trim_start().to_lowercase();
            let start = pos - arg.trim_start().len();
            let candidates = UploadOption::iter()
                .map(|option| upload_keyword(option).to_string())
                .filter(|keyword| keyword.starts_with(&needle))
                .map(|keyword| Pair {
                    display: keyword.clone(),
                    replacement: keyword,
                })
                .collect();
            return Ok((start, candidates));
        }

        if line.starts_with('/') && !line.contains(' ') {
            let candidates = self
                .commands
                .iter()
                .filter(|(cmd, _)| cmd.starts_with(line))
                .map(|(cmd, _)| Pair {
                    display: cmd.to_string(),
                    replacement: cmd.to_string(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if !line.starts_with('/') || line.contains(' ') {
            return None;
        }

        self.commands
            .iter()
            .find(|(cmd, _)| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|(cmd, _)| cmd[line.len()..].to_string())
    }
}

impl Validator for CliHelper {}
