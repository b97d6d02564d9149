use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use translator_widget::mt::{MachineTranslator, MockMode, MockTranslator, MyMemoryProvider};
use translator_widget::platform::{CommandSpeaker, SystemClipboard};
use translator_widget::terminal::{Session, parse_command};
use translator_widget::{
    Config, DEFAULT_SOURCE, DEFAULT_TARGET, IconAction, IconBinding, LanguageCatalog, Side,
    Widget, WidgetControls,
};

#[derive(Parser, Debug)]
#[command(
    name = "translator-widget",
    version,
    about = "Translate text with the MyMemory API, copy it or read it aloud"
)]
struct Cli {
    /// Text to translate. Omit to start the interactive widget
    text: Option<String>,

    /// Source language (code or name)
    #[arg(short, long, default_value = DEFAULT_SOURCE)]
    from: String,

    /// Target language (code or name)
    #[arg(short, long, default_value = DEFAULT_TARGET)]
    to: String,

    /// Copy the translation to the clipboard
    #[arg(long)]
    copy: bool,

    /// Read the translation aloud
    #[arg(long)]
    speak: bool,

    /// Use the mock translator instead of MyMemory
    #[arg(short, long)]
    mock: bool,

    /// Print the language catalog and exit
    #[arg(long)]
    list_languages: bool,

    /// Contact e-mail sent to MyMemory (overrides MYMEMORY_EMAIL)
    #[arg(long)]
    email: Option<String>,

    /// Request timeout in seconds (overrides TRANSLATOR_TIMEOUT_SECS)
    #[arg(long)]
    timeout: Option<u64>,

    /// Show debug logs
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let catalog = LanguageCatalog::builtin();
    if cli.list_languages {
        for (code, name) in catalog.iter() {
            println!("{:<8} {}", code, name);
        }
        return Ok(());
    }

    let mut config = Config::from_env()?;
    if let Some(email) = cli.email.clone() {
        config.email = Some(email);
    }
    if let Some(secs) = cli.timeout {
        if secs == 0 {
            return Err("--timeout must be greater than zero".into());
        }
        config.timeout = Duration::from_secs(secs);
    }
    debug!(
        endpoint = %config.endpoint,
        timeout = ?config.timeout,
        speech_program = %config.speech_program,
        "Configuration loaded"
    );

    let translator: Arc<dyn MachineTranslator> = if cli.mock {
        Arc::new(MockTranslator::new(MockMode::Suffix))
    } else {
        Arc::new(MyMemoryProvider::new(&config)?)
    };
    let speaker = Arc::new(CommandSpeaker::spawn(config.speech_program.clone()));
    let widget = Widget::new(
        WidgetControls::new(translator, Arc::new(SystemClipboard), speaker.clone())
            .with_catalog(catalog),
    );

    for (side, query) in [(Side::Source, &cli.from), (Side::Target, &cli.to)] {
        let code = catalog
            .resolve(query)
            .ok_or_else(|| format!("Unknown language '{}' (see --list-languages)", query))?;
        widget.select_language(side, code)?;
    }

    match cli.text.as_deref() {
        Some(text) => {
            one_shot(&widget, text, cli.copy, cli.speak).await?;
        }
        None => {
            info!(provider = widget.provider_name(), "Starting interactive widget");
            interactive(Session::new(widget, catalog)).await?;
        }
    }

    speaker.finish().await;
    Ok(())
}

async fn one_shot(
    widget: &Widget,
    text: &str,
    copy: bool,
    speak: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    widget.type_source(text);
    let Some(translated) = widget.translate_now().await.into_result()? else {
        return Err("Nothing to translate".into());
    };
    println!("{}", translated);

    if copy {
        widget.activate(IconBinding::new(IconAction::Copy, Side::Target))?;
    }
    if speak {
        widget.activate(IconBinding::new(IconAction::Speak, Side::Target))?;
    }
    Ok(())
}

async fn interactive(session: Session) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("{}", session.render());
    eprintln!("Type :help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(msg) => {
                eprintln!("{}", msg);
                continue;
            }
        };
        let reply = session.execute(command).await;
        for line in &reply.lines {
            println!("{}", line);
        }
        if reply.quit {
            break;
        }
    }
    Ok(())
}
