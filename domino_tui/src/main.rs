use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use app::{Action, App};
use clap::Parser;
use domino::Seat;
use domino_client::{ClientConfig, GameService, HttpGameService, Session, DEFAULT_SERVER_URL};
use ratatui::{
    crossterm::{
        event::{self, Event, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod app;
#[cfg(test)]
mod fixture;
mod ui;

/// How long to wait for a key press before redrawing.
const FRAME: Duration = Duration::from_millis(16);

#[derive(Parser)]
struct Args {
    /// Address of the game service
    #[arg(long, env = "DOMINO_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server_url: String,

    /// Milliseconds to wait before fetching the game again while others play
    #[arg(long, default_value_t = 1000)]
    poll_delay_ms: u64,

    /// Seconds after which a request to the game service is given up
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Start a game in this seat (A, B, C or D) right away, skipping the menu
    #[arg(long)]
    seat: Option<Seat>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,

    /// Write logs to this file. Without it nothing is logged, since the UI owns the terminal
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        initialize_logging(path, args.log_level)?;
    }

    let config = ClientConfig {
        server_url: args.server_url,
        request_timeout: Duration::from_secs(args.timeout_secs),
        poll_delay: Duration::from_millis(args.poll_delay_ms),
    };
    info!(server_url = %config.server_url, "Using game service");
    let service = HttpGameService::new(&config)?;
    let mut app = App::new(Session::new(service, &config));

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let result = Terminal::new(CrosstermBackend::new(stdout()))
        .map_err(anyhow::Error::from)
        .and_then(|mut terminal| {
            if let Some(seat) = args.seat {
                app.start(seat);
            }
            run(&mut terminal, &mut app)
        });
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    result
}

fn run<B: Backend, S: GameService>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> anyhow::Result<()> {
    while !app.should_quit() {
        app.tick();
        terminal.draw(|frame| ui::render(frame, app))?;
        if !event::poll(FRAME)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let Some(action) = Action::from_key(key.code) else {
                continue;
            };
            app.handle(action);
            if action.may_block() {
                discard_pending_events()?;
            }
        }
    }
    Ok(())
}

/// Drops the keys pressed while a request was outstanding.
fn discard_pending_events() -> anyhow::Result<()> {
    while event::poll(Duration::ZERO)? {
        event::read()?;
    }
    Ok(())
}

fn initialize_logging(path: &Path, level: LevelFilter) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Could not create log file '{}'", path.display()))?;
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();
    Ok(())
}
