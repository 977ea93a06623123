mod helper;

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Result, bail};
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use strum::IntoEnumIterator;
use tracing_subscriber::EnvFilter;

use helper::{COMMANDS, CliHelper, upload_keyword};
use ragchat_application::{ChatSession, MemoryUseCase, SessionEvent, SettingsUseCase};
use ragchat_core::config::AppConfig;
use ragchat_core::memory::MemoryProvider;
use ragchat_core::message::{Message, Origin};
use ragchat_core::navigation::{Navigator, Route};
use ragchat_core::overlay::{CloseReason, Overlay, UploadOption};
use ragchat_core::responder::PlaceholderResponder;
use ragchat_core::settings::SettingsRepository;
use ragchat_infrastructure::{
    InMemoryMemoryRepository, InMemorySettingsRepository, StaticHistoryProvider,
    TomlMemoryRepository, TomlSettingsRepository, load_config,
};

/// Prints route changes instead of switching screens.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn push(&self, route: Route) {
        println!("{}", format!("[navigate] {}", route.path()).bright_black());
    }

    fn back(&self) {
        println!("{}", "[navigate] back".bright_black());
    }
}

/// Screens and collaborators of one terminal run.
struct App {
    session: ChatSession,
    memories: MemoryUseCase,
    settings: SettingsUseCase,
    /// Messages of the thread already written to the terminal.
    printed: usize,
}

impl App {
    fn print_new_messages(&mut self) {
        let messages = self.session.messages();
        if self.printed > messages.len() {
            self.printed = 0;
        }
        for message in &messages[self.printed..] {
            print_message(message);
        }
        self.printed = messages.len();
    }

    async fn send(&mut self, text: &str) -> Result<()> {
        let now = Instant::now();
        self.session
            .handle(SessionEvent::DraftChanged(text.to_string()), now)?;
        if self.session.handle(SessionEvent::Send, now)?.is_some() {
            // Show the user turn before waiting on the responder
            self.print_new_messages();
            self.session.settle().await;
        }
        self.print_new_messages();
        Ok(())
    }

    /// Runs one slash command. Returns `false` when the REPL should exit.
    async fn command(&mut self, name: &str, arg: &str) -> Result<bool> {
        let now = Instant::now();

        match name {
            "/history" => {
                if self.session.overlay() != Overlay::History {
                    // Load before opening; an open drawer holds new snapshots back
                    self.session.refresh_history().await?;
                }
                self.session.toggle_history(now);
                if self.session.overlay() == Overlay::History {
                    println!("{}", "History".bright_magenta().bold());
                    for entry in self.session.history() {
                        println!("  {}  {}", entry.title, entry.date_label().bright_black());
                    }
                } else {
                    println!("{}", "(history closed)".bright_black());
                }
            }
            "/search" => {
                let hits = self.session.search_history(arg);
                if hits.is_empty() {
                    println!("{}", "No matching conversations".bright_black());
                }
                for entry in hits {
                    println!("  {}  {}", entry.title, entry.date_label().bright_black());
                }
            }
            "/upload" => {
                self.session.open_upload_menu(now);
                println!("{}", "Choose Upload Option".bright_magenta().bold());
                for option in UploadOption::iter() {
                    println!("  {:<8} {}", upload_keyword(option).bright_cyan(), option);
                }
            }
            "/select" => {
                let option = UploadOption::from_str(arg.trim())
                    .map_err(|_| anyhow::anyhow!("unknown upload option: {:?}", arg))?;
                let transition = self.session.select_upload(option, now);
                match transition.selection {
                    Some(selected) => println!("{}", format!("Selected {}", selected).green()),
                    None => println!("{}", "The upload sheet is not open".yellow()),
                }
            }
            "/close" => {
                let transition = self.session.close_overlay(CloseReason::Explicit, now);
                if !transition.changed() {
                    println!("{}", "Nothing to close".bright_black());
                }
            }
            "/memories" => {
                self.session.open_memories();
                self.memories.refresh().await?;
                println!("{}", "Memories".bright_magenta().bold());
                for memory in self.memories.memories() {
                    println!(
                        "  {} [{}] {}",
                        memory.id.bright_black(),
                        memory.icon,
                        memory.title.bold()
                    );
                    println!("      {}", memory.content);
                }
            }
            "/remember" => {
                let Some((title, content)) = arg.split_once('|') else {
                    bail!("usage: /remember <title> | <content>");
                };
                let mut editor = self.memories.new_memory();
                editor.set_title(title);
                editor.set_content(content);
                let memory = self.memories.save(&editor).await?;
                println!("{}", format!("Saved memory {}", memory.id).green());
            }
            "/forget" => {
                self.memories.refresh().await?;
                let editor = self.memories.edit_memory(arg.trim())?;
                self.memories.delete(&editor).await?;
                println!("{}", "Memory deleted".green());
            }
            "/settings" => {
                self.session.open_settings();
                let settings = self.settings.settings();
                println!("{}", "Settings".bright_magenta().bold());
                println!("  dark mode      {}", on_off(settings.dark_mode));
                println!("  notifications  {}", on_off(settings.notifications_enabled));
            }
            "/dark" => {
                let settings = self.settings.set_dark_mode(parse_toggle(arg)?).await?;
                println!("dark mode {}", on_off(settings.dark_mode));
            }
            "/notify" => {
                let settings = self.settings.set_notifications(parse_toggle(arg)?).await?;
                println!("notifications {}", on_off(settings.notifications_enabled));
            }
            "/retry" => {
                let Some(failed) = self
                    .session
                    .messages()
                    .iter()
                    .rev()
                    .map(|m| m.id)
                    .find(|id| self.session.can_retry(*id))
                else {
                    bail!("no failed reply to retry");
                };
                self.session.retry(failed)?;
                self.session.settle().await;
                self.print_new_messages();
            }
            "/new" => {
                self.session.new_chat(now);
                self.printed = 0;
                self.print_new_messages();
            }
            "/dump" => {
                println!("{}", serde_json::to_string_pretty(self.session.messages())?);
            }
            "/help" => print_help(),
            "/quit" | "/exit" => return Ok(false),
            other => bail!("unknown command {} (try /help)", other),
        }

        Ok(true)
    }
}

fn print_message(message: &Message) {
    match message.origin {
        Origin::User => println!("{}", format!("> {}", message.text).green()),
        Origin::Assistant if message.is_failed() => {
            println!("{}", message.text.red());
            println!("{}", "  (/retry to try again)".bright_black());
        }
        Origin::Assistant => {
            for line in message.text.lines() {
                println!("{}", line.bright_blue());
            }
        }
    }
}

fn print_help() {
    for (cmd, about) in COMMANDS {
        println!("  {:<10} {}", cmd.bright_cyan(), about);
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn parse_toggle(arg: &str) -> Result<bool> {
    match arg.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => bail!("expected on or off, got {:?}", other),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("RAGCHAT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `--config <path>` is the only flag.
fn config_path() -> Result<Option<PathBuf>> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        None => Ok(None),
        Some("--config") => match args.next() {
            Some(path) => Ok(Some(PathBuf::from(path))),
            None => bail!("--config needs a path"),
        },
        Some(other) => bail!("unexpected argument {:?} (usage: ragchat [--config <path>])", other),
    }
}

fn memory_provider(config: &AppConfig) -> Arc<dyn MemoryProvider> {
    match TomlMemoryRepository::new(&config.storage) {
        Ok(repo) => Arc::new(repo),
        Err(e) => {
            tracing::warn!("[main] memories will not be saved: {}", e);
            Arc::new(InMemoryMemoryRepository::with_samples())
        }
    }
}

fn settings_repository(config: &AppConfig) -> Arc<dyn SettingsRepository> {
    match TomlSettingsRepository::new(&config.storage) {
        Ok(repo) => Arc::new(repo),
        Err(e) => {
            tracing::warn!("[main] settings will not be saved: {}", e);
            Arc::new(InMemorySettingsRepository::default())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = load_config(config_path()?.as_deref())?;
    let navigator: Arc<dyn Navigator> = Arc::new(TerminalNavigator);

    let mut session = ChatSession::new(
        &config,
        Arc::new(PlaceholderResponder::new(config.chat.placeholder_reply.clone())),
        Arc::new(StaticHistoryProvider::with_samples()),
        Arc::clone(&navigator),
    );
    if let Err(e) = session.refresh_history().await {
        eprintln!("{}", format!("Could not load history: {}", e).red());
    }
    let mut settings = SettingsUseCase::new(settings_repository(&config));
    if let Err(e) = settings.load().await {
        eprintln!("{}", format!("Could not load settings: {}", e).red());
    }

    let mut app = App {
        session,
        memories: MemoryUseCase::new(memory_provider(&config), navigator),
        settings,
        printed: 0,
    };

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== RAG Chat ===".bright_magenta().bold());
    println!(
        "{}",
        "Type a message to chat, '/help' for commands, or '/quit' to exit.".bright_black()
    );
    println!();
    app.print_new_messages();

    // ===== Main REPL Loop =====
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let outcome = if trimmed.starts_with('/') {
                    let (name, arg) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
                    app.command(name, arg).await
                } else {
                    app.send(trimmed).await.map(|_| true)
                };

                match outcome {
                    Ok(true) => {}
                    Ok(false) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    app.session.unmount();
    Ok(())
}
