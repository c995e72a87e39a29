use clap::{error::ErrorKind, CommandFactory, Parser};
use colortap::{
    app::{App, Control},
    app_dirs::AppDirs,
    config::{ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner},
    ui,
};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::{info, warn};

/// Redraw and animation cadence. The game clock runs on elapsed wall time,
/// not on this.
const TICK_RATE_MS: u64 = 100;

/// tap the tiles matching the target color before the clock runs out
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A reflex game for the terminal: a 4x4 grid of colored tiles, a target color that keeps changing, and thirty seconds to tap as many matching tiles as you can."
)]
pub struct Cli {
    /// seed for target colors and tile layouts, for reproducible games
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// hide color names on tiles for this run
    #[clap(long)]
    no_labels: bool,

    /// write logs here instead of the default state directory
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// log at debug level
    #[clap(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let mut settings = store.load();

    if let Some(log_path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        let filter = if cli.verbose {
            "debug"
        } else {
            settings.log_filter.as_str()
        };
        if let Err(e) = logging::init(filter, &log_path) {
            eprintln!("logging disabled: {e}");
        }
    }

    if cli.no_labels {
        settings.tile_labels = false;
    }
    info!(
        seed = ?cli.seed,
        labels = settings.tile_labels,
        config = %store.path().display(),
        "colortap starting"
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(settings, cli.seed);
    let result = start_tui(&mut terminal, &mut app, &store);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &impl ConfigStore,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let mut last = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        let event = runner.step();
        let now = Instant::now();
        app.advance(now - last);
        last = now;

        match event {
            GameEvent::Tick | GameEvent::Resize => {}
            GameEvent::Key(key) => {
                if app.handle_key(key) == Control::Quit {
                    break;
                }
            }
            GameEvent::Click { column, row } => {
                let size = terminal.size()?;
                app.handle_click(Rect::new(0, 0, size.width, size.height), column, row);
            }
        }

        if app.take_settings_changed() {
            if let Err(e) = store.save(&app.settings) {
                warn!(error = %e, "could not save settings");
            }
        }
    }

    info!("colortap exiting");
    Ok(())
}
