//! Line-oriented terminal front-end for the widget
//!
//! A plain line is typed into the source field and translated. Lines starting
//! with `:` are commands; see [`HELP`].

use crate::catalog::LanguageCatalog;
use crate::widget::{
    IconAction, IconBinding, IconOutcome, Side, TranslateOutcome, Widget, WidgetSnapshot,
};

pub const HELP: &str = "\
Type text to translate it. Commands:
  :swap              exchange languages and texts
  :from <language>   set the source language (code or name)
  :to <language>     set the target language (code or name)
  :copy from|to      copy a field to the clipboard
  :speak from|to     read a field aloud
  :clear             empty the source field
  :show              print the current state
  :langs             list available languages
  :help              show this help
  :quit              exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Text(String),
    Swap,
    From(String),
    To(String),
    Copy(Side),
    Speak(Side),
    Clear,
    Show,
    Langs,
    Help,
    Quit,
}

/// Parse one input line
pub fn parse_command(line: &str) -> Result<Command, String> {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix(':') else {
        return Ok(Command::Text(line.trim_end_matches(['\r', '\n']).to_string()));
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    let side = |arg: &str| {
        Side::parse(arg).ok_or_else(|| format!("Expected 'from' or 'to', got '{}'", arg))
    };
    let language = |arg: &str| {
        if arg.is_empty() {
            Err(format!(":{} needs a language", name))
        } else {
            Ok(arg.to_string())
        }
    };

    match name.as_str() {
        "swap" | "x" => Ok(Command::Swap),
        "from" => language(arg).map(Command::From),
        "to" => language(arg).map(Command::To),
        "copy" => side(arg).map(Command::Copy),
        "speak" | "say" => side(arg).map(Command::Speak),
        "clear" => Ok(Command::Clear),
        "show" => Ok(Command::Show),
        "langs" | "languages" => Ok(Command::Langs),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("Unknown command ':{}' (try :help)", other)),
    }
}

/// Output of one executed command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Reply {
    fn line(text: impl Into<String>) -> Self {
        Self {
            lines: vec![text.into()],
            quit: false,
        }
    }
}

/// Drives a widget from parsed commands
#[derive(Debug, Clone)]
pub struct Session {
    widget: Widget,
    catalog: LanguageCatalog,
}

impl Session {
    pub fn new(widget: Widget, catalog: LanguageCatalog) -> Self {
        Self { widget, catalog }
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub async fn execute(&self, command: Command) -> Reply {
        match command {
            Command::Text(text) => {
                self.widget.type_source(&text);
                match self.widget.translate_now().await {
                    TranslateOutcome::Skipped => Reply::default(),
                    _ => Reply::line(self.render_target()),
                }
            }
            Command::Swap => {
                self.widget.exchange();
                Reply::line(self.render())
            }
            Command::From(query) => self.select(Side::Source, &query),
            Command::To(query) => self.select(Side::Target, &query),
            Command::Copy(side) => self.icon(IconBinding::new(IconAction::Copy, side)),
            Command::Speak(side) => self.icon(IconBinding::new(IconAction::Speak, side)),
            Command::Clear => {
                self.widget.type_source("");
                Reply::default()
            }
            Command::Show => Reply::line(self.render()),
            Command::Langs => Reply {
                lines: self
                    .catalog
                    .iter()
                    .map(|(code, name)| format!("{:<8} {}", code, name))
                    .collect(),
                quit: false,
            },
            Command::Help => Reply::line(HELP),
            Command::Quit => Reply {
                lines: Vec::new(),
                quit: true,
            },
        }
    }

    fn select(&self, side: Side, query: &str) -> Reply {
        let Some(code) = self.catalog.resolve(query) else {
            return Reply::line(format!("Unknown language '{}' (try :langs)", query));
        };
        match self.widget.select_language(side, code) {
            Ok(()) => Reply::line(self.render_languages()),
            Err(e) => Reply::line(e.to_string()),
        }
    }

    fn icon(&self, binding: IconBinding) -> Reply {
        match self.widget.activate(binding) {
            Ok(IconOutcome::Ignored) => Reply::line("Nothing to do: both fields need text"),
            Ok(IconOutcome::Copied) => {
                Reply::line(format!("Copied '{}' text", binding.side.label()))
            }
            Ok(IconOutcome::Spoken) => Reply::default(),
            Ok(IconOutcome::Denied) => Reply::default(),
            Err(e) => Reply::line(e.to_string()),
        }
    }

    fn name(&self, code: &str) -> String {
        self.catalog.name(code).unwrap_or(code).to_string()
    }

    fn render_languages(&self) -> String {
        let snapshot = self.widget.snapshot();
        format!(
            "{} → {}",
            self.name(&snapshot.source_lang),
            self.name(&snapshot.target_lang)
        )
    }

    /// Target value, or the inline error / placeholder when there is none
    pub fn render_target(&self) -> String {
        render_target(&self.widget.snapshot())
    }

    pub fn render(&self) -> String {
        let snapshot = self.widget.snapshot();
        format!(
            "[{}] {}\n[{}] {}",
            self.name(&snapshot.source_lang),
            snapshot.source.value,
            self.name(&snapshot.target_lang),
            render_target(&snapshot)
        )
    }
}

fn render_target(snapshot: &WidgetSnapshot) -> String {
    if let Some(error) = &snapshot.error {
        return format!("⚠ {}", error);
    }
    if snapshot.target.value.is_empty() {
        format!("({})", snapshot.target.placeholder)
    } else {
        snapshot.target.value.clone()
    }
}
