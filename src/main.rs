use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};
use typesprint::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    controller::Controller,
    logging,
    runtime::{CrosstermEventSource, EventSource, Runner, TypingEvent},
    session::{SessionConfig, MAX_SECS},
    timer::{ThreadTicker, TickSource},
    ui::{TerminalView, TypingScreen},
};

const POLL_INTERVAL_MS: u64 = 250;

/// one-minute typing speed test for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type the passage as fast and as accurately as you can. The clock starts on your first keystroke; results show words per minute, accuracy and errors."
)]
pub struct Cli {
    /// number of seconds to run test (1-60)
    #[clap(short = 's', long, value_parser = clap::value_parser!(u32).range(1..=MAX_SECS as i64))]
    number_of_secs: Option<u32>,

    /// seed for passage selection, for reproducible runs
    #[clap(long)]
    seed: Option<u64>,

    /// log filter for the log file, e.g. "debug" or "typesprint=trace"
    #[clap(long)]
    log_level: Option<String>,
}

impl Cli {
    /// Command line flags win over the config file.
    fn apply(&self, mut config: Config) -> Config {
        if let Some(secs) = self.number_of_secs {
            config.number_of_secs = secs;
        }
        if let Some(ref level) = self.log_level {
            config.log_level = level.clone();
        }
        config
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

pub struct App<T: TickSource> {
    controller: Controller<TerminalView, T, StdRng>,
}

impl<T: TickSource> App<T> {
    fn new(config: SessionConfig, ticker: T, rng: StdRng) -> Self {
        Self {
            controller: Controller::new(config, TerminalView::new(), ticker, rng),
        }
    }

    fn on_event(&mut self, event: TypingEvent) -> Flow {
        match event {
            TypingEvent::Key(key) => self.on_key(key),
            TypingEvent::Tick(id) => {
                self.controller.on_tick(id);
                Flow::Continue
            }
            TypingEvent::Resize => Flow::Continue,
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return Flow::Quit,
            // ctrl+c to quit
            KeyCode::Char('c') if ctrl => return Flow::Quit,
            KeyCode::Char('r') if ctrl => self.controller.reset_session(),
            KeyCode::Tab => self.controller.reset_session(),
            KeyCode::Backspace => self.controller.backspace(),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.controller.type_char(c)
            }
            _ => {}
        }
        Flow::Continue
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());

    if let Err(err) = logging::init(&config.log_level, &AppDirs::log_path()) {
        eprintln!("typesprint: logging disabled: {err}");
    }
    if !store.path().exists() {
        if let Err(err) = store.save(&Config::default()) {
            tracing::warn!(%err, "could not write default config");
        }
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = CrosstermEventSource::new();
    let ticker = ThreadTicker::new(events.sender());
    let mut app = App::new(SessionConfig::from(&config), ticker, cli.rng());
    let runner = Runner::new(events, Duration::from_millis(POLL_INTERVAL_MS));

    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: EventSource, T: TickSource>(
    terminal: &mut Terminal<B>,
    app: &mut App<T>,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        let Some(event) = runner.step() else {
            continue;
        };
        if app.on_event(event) == Flow::Quit {
            break;
        }
        terminal.draw(|f| ui(app, f))?;
    }

    Ok(())
}

fn ui<T: TickSource>(app: &App<T>, f: &mut Frame) {
    let screen = TypingScreen::new(app.controller.renderer(), app.controller.input());
    f.render_widget(screen, f.area());
}
