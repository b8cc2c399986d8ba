use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{
        self, Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use immo_chat::api::ProxyClient;
use immo_chat::app::App;
use immo_chat::handlers::handle_key_event;
use immo_chat::ui::ui;

const TICK: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "immo-chat")]
#[command(about = "Terminal chat client for the real-estate assistant")]
#[command(version)]
struct Args {
    /// Base URL of the chat proxy
    #[arg(long, env = "IMMO_SERVER", default_value = "http://127.0.0.1:3000")]
    server: String,

    /// Write logs to this file (the terminal is owned by the UI)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = std::fs::File::create(path)?;
        let default_level = if args.verbose { "debug" } else { "info" };
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
            )
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let client = ProxyClient::new(&args.server);
    info!(endpoint = client.endpoint(), "starting chat client");
    let mut app = App::new(Arc::new(client), args.server.clone());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    // Lets the terminal report Shift+Enter as distinct from Enter.
    let enhanced_keys = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced_keys {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    if enhanced_keys {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                handle_key_event(app, key);
            }
        }

        if app.should_quit {
            break;
        }

        app.wait_for_activity(TICK).await;
    }

    Ok(())
}
