mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tracing::{error, info, warn};
use wordbox::{
    app_dirs::AppDirs,
    catalog::theme_label,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, DrillEvent, FixedTicker, Runner},
    ActionOutcome, Catalog, CatalogError, CommandSpeaker, DrillView, SessionController,
    SilentSpeaker, Speaker, ThemeSelection,
};

pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load vocabulary. Please restart.";

/// vocabulary spelling drill with themed word lists and pronunciation
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Drill vocabulary by spelling each word into letter slots. Words are grouped by theme, shuffled per session, pronounced aloud, and scored by first-try accuracy."
)]
pub struct Cli {
    /// word list to drill (JSON object keyed by theme); defaults to the built-in list
    #[clap(short = 'w', long)]
    words: Option<PathBuf>,

    /// theme to start with, or "all" for every theme
    #[clap(short = 't', long)]
    theme: Option<String>,

    /// do not pronounce words
    #[clap(long)]
    no_speech: bool,

    /// text-to-speech program used for pronunciation
    #[clap(long)]
    speech_program: Option<String>,

    /// log level written to the log file (RUST_LOG takes precedence)
    #[clap(long)]
    log_level: Option<String>,

    /// save the effective settings to the config file and exit
    #[clap(long)]
    write_config: bool,
}

impl Cli {
    /// Layer command line flags over the stored configuration
    fn apply(&self, mut config: Config) -> Config {
        if let Some(words) = &self.words {
            config.words_file = Some(words.clone());
        }
        if let Some(theme) = &self.theme {
            config.theme = Some(theme.clone());
        }
        if self.no_speech {
            config.speech = false;
        }
        if let Some(program) = &self.speech_program {
            config.speech_program = program.clone();
            config.speech_args.clear();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config
    }
}

pub type Controller = SessionController<DrillView, Box<dyn Speaker>>;

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Drilling,
    Unavailable(String),
}

pub struct App {
    pub controller: Option<Controller>,
    pub state: AppState,
    pub theme_options: Vec<ThemeSelection>,
    pub theme_index: usize,
}

impl App {
    pub fn new(
        catalog: Result<Catalog, CatalogError>,
        speaker: Box<dyn Speaker>,
        initial_theme: Option<&str>,
    ) -> Self {
        let catalog = match catalog {
            Ok(catalog) => catalog,
            Err(_) => {
                return Self {
                    controller: None,
                    state: AppState::Unavailable(LOAD_FAILURE_MESSAGE.to_string()),
                    theme_options: vec![ThemeSelection::Blank],
                    theme_index: 0,
                }
            }
        };

        let mut theme_options = vec![ThemeSelection::Blank, ThemeSelection::All];
        theme_options.extend(
            catalog
                .themes()
                .into_iter()
                .map(|t| ThemeSelection::Named(t.to_string())),
        );

        let mut app = Self {
            controller: Some(SessionController::new(
                catalog,
                DrillView::default(),
                speaker,
            )),
            state: AppState::Drilling,
            theme_options,
            theme_index: 0,
        };

        if let Some(name) = initial_theme {
            let wanted: ThemeSelection = name.parse().unwrap_or_default();
            match app.theme_options.iter().position(|t| *t == wanted) {
                Some(idx) => app.select_theme_index(idx),
                None => warn!(theme = name, "unknown theme, starting blank"),
            }
        }

        app
    }

    pub fn current_theme(&self) -> &ThemeSelection {
        &self.theme_options[self.theme_index]
    }

    pub fn theme_display(&self) -> String {
        match self.current_theme() {
            ThemeSelection::Blank => "-".to_string(),
            ThemeSelection::All => "All".to_string(),
            ThemeSelection::Named(theme) => theme_label(theme),
        }
    }

    pub fn view(&self) -> Option<&DrillView> {
        self.controller.as_ref().map(|c| c.presenter())
    }

    fn select_theme_index(&mut self, idx: usize) {
        self.theme_index = idx;
        let selection = self.theme_options[idx].clone();
        if let Some(controller) = self.controller.as_mut() {
            controller.select_theme(selection);
        }
    }

    fn next_theme(&mut self) {
        let idx = (self.theme_index + 1) % self.theme_options.len();
        self.select_theme_index(idx);
    }

    fn prev_theme(&mut self) {
        let len = self.theme_options.len();
        let idx = (self.theme_index + len - 1) % len;
        self.select_theme_index(idx);
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        if let Some(controller) = self.controller.as_mut() {
            controller.on_tick(elapsed);
        }
    }

    /// Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Char('c') if ctrl => return true,
            _ => {}
        }

        if self.state != AppState::Drilling {
            return false;
        }

        match key.code {
            KeyCode::Tab => self.next_theme(),
            KeyCode::BackTab => self.prev_theme(),
            _ => {
                let Some(controller) = self.controller.as_mut() else {
                    return false;
                };
                match key.code {
                    KeyCode::Char('r') if ctrl => {
                        controller.reveal_answer();
                    }
                    KeyCode::Char('s') if ctrl => controller.speak_current(),
                    KeyCode::Enter => {
                        if let ActionOutcome::Checked(outcome) = controller.activate_action() {
                            info!(?outcome, "answer submitted");
                        }
                    }
                    KeyCode::Backspace if controller.state().accepts_input() => {
                        let mut input = controller.state().input.clone();
                        input.pop();
                        controller.record_keystroke(&input);
                    }
                    KeyCode::Char(c) if !ctrl && controller.state().accepts_input() => {
                        let mut input = controller.state().input.clone();
                        input.push(c);
                        controller.record_keystroke(&input);
                    }
                    _ => {}
                }
            }
        }

        false
    }
}

fn load_catalog(config: &Config) -> Result<Catalog, CatalogError> {
    match &config.words_file {
        Some(path) => Catalog::from_path(path),
        None => Catalog::embedded(),
    }
}

fn build_speaker(config: &Config) -> Box<dyn Speaker> {
    if config.speech {
        Box::new(CommandSpeaker::new(
            config.speech_program.clone(),
            config.speech_args.clone(),
        ))
    } else {
        Box::new(SilentSpeaker)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let store = FileConfigStore::new();
    let config = cli.apply(store.load());

    if cli.write_config {
        store.save(&config)?;
        println!("wrote {}", store.path().display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        // logging is optional; the drill works without it
        let _ = logging::init(&config.log_level, &path);
    }
    info!(version = env!("CARGO_PKG_VERSION"), "wordbox starting");

    let catalog = load_catalog(&config);
    match &catalog {
        Ok(catalog) => info!(
            words = catalog.len(),
            themes = catalog.themes().len(),
            "vocabulary loaded"
        ),
        Err(err) => error!(%err, "failed to load vocabulary"),
    }
    let mut app = App::new(catalog, build_speaker(&config), config.theme.as_deref());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("wordbox exiting");
    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            DrillEvent::Tick(elapsed) => app.on_tick(elapsed),
            DrillEvent::Resize => {}
            DrillEvent::Key(key) => {
                if app.handle_key(key) {
                    break;
                }
            }
        }
    }

    Ok(())
}
