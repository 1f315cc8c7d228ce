//! headlines: the latest news from a fixed list of sources, in the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌──────────┐ handle_key_event() ┌──────────┐  draw()  ┌──────────┐
//! │ input.rs │ ─────────────────► │  app.rs  │ ───────► │  ui.rs   │
//! └──────────┘                    │ (state)  │          │ (render) │
//!                                 └──────────┘          └──────────┘
//!                         FetchJob │      ▲ FetchDone
//!                                  ▼      │ (channel)
//!                                 ┌──────────┐  parse()  ┌──────────┐
//!                                 │ fetch.rs │ ────────► │ source/  │
//!                                 │ (tokio)  │           │  (HTTP)  │
//!                                 └──────────┘           └──────────┘
//! ```
//!
//! * **`source/`**: the fixed source [`Registry`](source::Registry), the
//!   `FeedParser` trait, and the HTTP implementation (RSS, falling back to
//!   Atom).
//! * **`app`**: owns all state and the two-phase fetch workflow.
//! * **`fetch`**: runs a fetch job on the tokio runtime and reports back.
//! * **`render`** / **`markup`**: build the HTML document for fetched
//!   entries, and turn it into styled terminal text.
//! * **`ui`** / **`input`** / **`status`**: drawing, key bindings, and the
//!   timed status line.
//! * **`config`** / **`error`**: settings file and error types.
//! * **`main`**: wires everything together: parse args, load config, set up
//!   logging and the terminal, and run the event loop.

mod app;
mod config;
mod error;
mod fetch;
mod input;
mod markup;
mod render;
mod source;
mod status;
mod ui;

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::Show,
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;
use config::Config;
use fetch::Fetcher;
use input::Action;
use source::{HttpFeedParser, Registry};

#[derive(Parser, Debug)]
#[command(name = "headlines", version, about = "Read the latest headlines from a fixed list of news feeds")]
struct Cli {
    /// Config file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Pause before each fetch, in milliseconds.
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Give up on a feed request after this many seconds.
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Write logs here.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the built-in news sources and exit.
    #[arg(long)]
    list_sources: bool,
}

// ---------------------------------------------------------------------------
// Terminal screen
// ---------------------------------------------------------------------------

/// The reader's full-screen session.
///
/// [`Screen::enter`] switches to raw mode on the alternate screen and
/// arranges for [`restore`] to run when the value drops or when any thread
/// panics, whichever comes first.
struct Screen {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl Screen {
    fn enter() -> Result<Self> {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore();
            previous(info);
        }));

        enable_raw_mode().context("enabling raw mode")?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        restore();
    }
}

/// Put the terminal back the way the shell left it.  Safe to call twice.
fn restore() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Send tracing output to `path`; the terminal belongs to the UI.
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    Ok(())
}

fn print_sources(registry: &Registry) {
    for entry in registry.entries() {
        println!("{:<16} {}", entry.name, entry.url);
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    let registry = Registry::builtin();

    if cli.list_sources {
        print_sources(&registry);
        return Ok(());
    }

    // -- configuration: file, then flags -------------------------------------
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(ms) = cli.delay_ms {
        config.fetch_delay_ms = ms;
    }
    if let Some(secs) = cli.timeout_secs {
        config.request_timeout_secs = secs;
    }
    if let Some(path) = cli.log_file {
        config.log_file = Some(path);
    }

    if let Some(path) = config.log_path() {
        init_logging(&path)?;
    }
    info!(?config, "starting");

    // -- fetch machinery -----------------------------------------------------
    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    let parser = Arc::new(HttpFeedParser::new(config.request_timeout())?);
    let (fetcher, rx) = Fetcher::new(runtime.handle().clone(), parser, config.fetch_delay());

    // -- terminal ---------------------------------------------------------
    let mut screen = Screen::enter()?;
    let mut app = App::new(registry);

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Apply any finished fetch and expire the status line.
    //   2. Render the UI.
    //   3. Poll for keyboard input (non-blocking, up to tick_rate).
    let tick_rate = Duration::from_millis(100);

    loop {
        // 1. Process fetch results
        while let Ok(done) = rx.try_recv() {
            info!(source = done.source, "fetch complete");
            app.complete_fetch(done.outcome);
        }
        app.tick(Instant::now());

        // 2. Render
        screen.terminal.draw(|f| ui::draw(&mut app, f))?;

        // 3. Handle input
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                match input::handle_key_event(&mut app, key) {
                    Action::Fetch => match app.request_fetch() {
                        Ok(job) => fetcher.dispatch(job),
                        Err(e) => warn!(error = %e, "fetch request rejected"),
                    },
                    Action::OpenLink(n) => {
                        if let Some(link) = app.link(n) {
                            if let Err(e) = open::that_detached(link) {
                                error!(link, error = %e, "could not open link");
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        if app.quit {
            break;
        }
    }

    // Restore the terminal before tearing down the runtime.
    drop(screen);
    runtime.shutdown_background();
    Ok(())
}
