use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use pitchcraft_gateway::{BlockingGateway, Gateway, GatewayConfig, OpenAiClient};
use pitchcraft_store::{create_store, BlockingRelay, StoreConfig};
use pitchcraft_tui::app::App;
use ratatui::prelude::*;
use tracing::{info, warn};

/// Timed social-media marketing simulation: pick a client, build a campaign,
/// generate a poster and caption, and get scored feedback.
#[derive(Debug, Parser)]
#[command(name = "pitchcraft", about = "Ten-minute social media marketing simulation")]
struct Cli {
    /// OpenAI-compatible API base URL.
    #[arg(long, env = "PITCHCRAFT_API_BASE")]
    api_base: Option<String>,

    /// API key for the generation service (also reads OPENAI_API_KEY).
    #[arg(long, env = "PITCHCRAFT_API_KEY")]
    api_key: Option<String>,

    /// Disable the generative backends; every call uses its offline fallback.
    #[arg(long)]
    offline: bool,

    /// Directory for relayed assets and the log file.
    #[arg(long, env = "PITCHCRAFT_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.data_dir.clone())?;

    let gateway = build_gateway(&cli);
    let relay = build_relay(&cli);

    run_tui(App::new(gateway, relay))
}

/// Log to a file so the alternate screen stays clean.
fn init_tracing(data_dir: Option<PathBuf>) -> Result<()> {
    let dir = data_dir.unwrap_or_else(default_data_dir);
    std::fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    let log_path = dir.join("pitchcraft.log");
    let file =
        File::create(&log_path).with_context(|| format!("open {}", log_path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Reproduce the LocalStore default data directory without reaching into
/// the store crate's internals.
fn default_data_dir() -> PathBuf {
    let base = if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg)
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local/share")
    } else {
        PathBuf::from(".")
    };
    base.join("pitchcraft")
}

fn build_gateway(cli: &Cli) -> BlockingGateway {
    if cli.offline {
        info!("offline mode: generative backends disabled");
        return BlockingGateway::new(Gateway::offline());
    }

    let mut config = GatewayConfig::from_env();
    if let Some(base) = &cli.api_base {
        config.api_base = base.clone();
    }
    if let Some(key) = &cli.api_key {
        config.api_key = Some(key.clone());
    }

    match config.api_key {
        Some(_) => {
            info!("generation backend: {}", config.api_base);
            let client = Arc::new(OpenAiClient::new(&config));
            BlockingGateway::new(Gateway::new(client.clone(), client))
        }
        None => {
            warn!("no API key configured; running with offline fallbacks");
            BlockingGateway::new(Gateway::offline())
        }
    }
}

fn build_relay(cli: &Cli) -> Option<BlockingRelay> {
    let mut config = StoreConfig::from_env();
    if let Some(dir) = &cli.data_dir {
        config.local_data_dir = Some(dir.to_string_lossy().to_string());
    }
    match create_store(&config) {
        Ok(store) => Some(BlockingRelay::new(store)),
        Err(e) => {
            warn!("object store unavailable, poster relay disabled: {e}");
            None
        }
    }
}

fn run_tui(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e}");
    }

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.tick();
        terminal.draw(|frame| app.render(frame))?;

        // A key press may have queued a generation; run it after the draw so
        // the busy indicator is on screen during the blocking call.
        if app.has_pending() {
            app.run_pending();
            continue;
        }

        // Poll with a timeout so the countdown keeps ticking between keys.
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    break;
                }
                if key.code == KeyCode::Char('q') && !app.is_input_mode() {
                    break;
                }
                app.handle_key(key);
            }
        }
    }
    Ok(())
}
