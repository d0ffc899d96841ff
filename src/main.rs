//! Terminal runtime and command-line entry point.
//!
//! Without a subcommand gourmet opens the full-screen UI. The runtime owns
//! everything with side effects: the terminal, the favorites store, the fetch
//! worker and the tokio runtime it spawns on. Key presses become library
//! [`Event`]s, [`handle_event`] mutates the state, and the returned
//! [`Action`]s are executed here.
//!
//! ```text
//! ┌──────────────── UI thread ────────────────┐      ┌── tokio pool ──┐
//! │ crossterm keys → Event → handle_event     │      │                │
//! │                    ↑          │ Actions   │spawn │  fetch task    │
//! │                    │          └──────────────────▶  (timeout)     │
//! │   mpsc::Receiver ◀─┴─────────────────────────────┤                │
//! │                                           │      └────────────────┘
//! │ favorites store, render → stdout          │
//! └───────────────────────────────────────────┘
//! ```
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n`/`Ctrl+p`: Move down/up
//! - `Ctrl+c`: Quit
//!
//! Normal mode:
//! - `j`/`Down`, `k`/`Up`: Move
//! - `/`: Edit the keyword (Results) or the filter (Favorites)
//! - `r`: Refresh
//! - `f`/`Space`: Toggle favorite (remove in Favorites)
//! - `Enter`: Open the coupon page
//! - `Tab`: Switch view
//! - `q`: Quit
//!
//! Search bar:
//! - Characters: Type
//! - `Enter`: Run the search or apply the filter
//! - `Esc`: Close the bar

#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, terminal, ExecutableCommand};
use gourmet::api::{HotPepperClient, ShopSource};
use gourmet::app::headless::{format_favorite_line, format_shop_line, search_pages, PageLimit};
use gourmet::app::AppState;
use gourmet::infrastructure::{load_api_key, open_url};
use gourmet::storage::{FavoritesStore, JsonStorage};
use gourmet::worker::{FetchWorker, WorkerResponse};
use gourmet::{handle_event, Action, Config, Event, GourmetError, InputMode, SearchFocus};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Duration;

/// How long to wait for a key before checking for fetch completions.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "gourmet")]
#[command(author, version, about = "Search HotPepper gourmet listings from the terminal")]
struct Cli {
    /// Configuration file [default: <config_dir>/gourmet/config.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// TOML file holding the API key
    #[arg(long, global = true)]
    api_key_file: Option<String>,

    /// Log filter, e.g. `debug` or `gourmet=trace`
    #[arg(long, global = true)]
    trace_level: Option<String>,

    /// Initial keyword for the interactive UI
    #[arg(short, long, default_value = "")]
    keyword: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print search results without opening the UI
    Search {
        /// Free-text keyword; empty lists everything
        #[arg(default_value = "")]
        keyword: String,

        /// Number of pages to load
        #[arg(
            long,
            default_value_t = 1,
            conflicts_with = "all",
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        pages: u64,

        /// Load pages until the results run out
        #[arg(long)]
        all: bool,
    },
    /// Manage stored favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorites, newest first
    List,
    /// Remove a favorite by shop id
    Remove {
        /// Shop id, e.g. J001234567
        id: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "gourmet exited with an error");
        gourmet::observability::shutdown_tracing();
        eprintln!("gourmet: {e}");
        std::process::exit(1);
    }

    gourmet::observability::shutdown_tracing();
}

fn run(cli: Cli) -> gourmet::Result<()> {
    let config_path = cli.config.unwrap_or_else(Config::default_path);
    let mut config = Config::load(&config_path)?;
    if cli.api_key_file.is_some() {
        config.api_key_file = cli.api_key_file;
    }
    if cli.trace_level.is_some() {
        config.trace_level = cli.trace_level;
    }

    gourmet::observability::init_tracing(&config);
    tracing::info!(config = %config_path.display(), "gourmet starting");

    let mut store = JsonStorage::new(config.favorites_path())?;

    match cli.command {
        Some(Commands::Favorites { action }) => run_favorites(&mut store, action),
        Some(Commands::Search { keyword, pages, all }) => {
            let limit = if all { PageLimit::All } else { PageLimit::Pages(usize::try_from(pages).unwrap_or(usize::MAX)) };
            let source = build_source(&config)?;
            let runtime = build_runtime()?;
            runtime.block_on(run_search(source.as_ref(), &store, &keyword, limit, config.request_timeout()))
        }
        None => {
            let source = build_source(&config)?;
            let runtime = build_runtime()?;
            let state = gourmet::initialize(&config, &cli.keyword);
            let (worker, responses) = FetchWorker::new(runtime.handle().clone(), source, config.request_timeout());

            let mut app = App {
                state,
                store,
                worker,
                responses,
                browser: config.browser.clone(),
                pending: VecDeque::new(),
                running: true,
                dirty: true,
            };
            app.run(config.search_on_start)
        }
    }
}

fn build_source(config: &Config) -> gourmet::Result<Arc<dyn ShopSource>> {
    let api_key = load_api_key(&config.api_key_path())?;
    let client = HotPepperClient::new(config.endpoint(), api_key)?;
    Ok(Arc::new(client))
}

fn build_runtime() -> gourmet::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("gourmet-fetch")
        .build()
        .map_err(|e| GourmetError::Worker(format!("failed to start runtime: {e}")))
}

async fn run_search(
    source: &dyn ShopSource,
    store: &JsonStorage,
    keyword: &str,
    limit: PageLimit,
    timeout: Duration,
) -> gourmet::Result<()> {
    let mut stdout = io::stdout().lock();
    let mut write_error = None;

    let run = search_pages(source, keyword, limit, timeout, |page| {
        for shop in page {
            if let Err(e) = writeln!(stdout, "{}", format_shop_line(shop, store.is_favorite(&shop.id))) {
                write_error.get_or_insert(e);
            }
        }
    })
    .await;

    if let Some(e) = write_error {
        return Err(e.into());
    }
    if let Some(error) = run.error {
        return Err(error.into());
    }
    if run.results.shops.is_empty() {
        writeln!(stdout, "{}", gourmet::app::pagination::NO_RESULTS_STATUS)?;
    }
    Ok(())
}

fn run_favorites(store: &mut JsonStorage, action: FavoritesAction) -> gourmet::Result<()> {
    let mut stdout = io::stdout().lock();
    match action {
        FavoritesAction::List => {
            for record in store.list() {
                writeln!(stdout, "{}", format_favorite_line(&record))?;
            }
        }
        FavoritesAction::Remove { id } => {
            let record = store.remove(&id)?;
            writeln!(stdout, "removed {} ({})", record.name, record.id)?;
        }
    }
    Ok(())
}

/// Puts the terminal into raw mode on an alternate screen and restores it
/// when dropped, including on panic.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(terminal::EnterAlternateScreen)?;
        stdout.execute(cursor::Hide)?;

        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_terminal();
            default_hook(info);
        }));

        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = terminal::disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = stdout.execute(terminal::LeaveAlternateScreen);
    let _ = stdout.execute(cursor::Show);
}

/// The interactive session.
struct App {
    state: AppState,
    store: JsonStorage,
    worker: FetchWorker,
    responses: Receiver<WorkerResponse>,
    browser: Option<String>,
    /// Events produced by actions, handled before the next key.
    pending: VecDeque<Event>,
    running: bool,
    dirty: bool,
}

impl App {
    fn run(&mut self, search_on_start: bool) -> gourmet::Result<()> {
        let _guard = TerminalGuard::enter()?;

        let (cols, rows) = terminal::size()?;
        self.dispatch(Event::Resize {
            rows: usize::from(rows),
            cols: usize::from(cols),
        });
        self.dispatch(Event::FavoritesLoaded(self.store.list()));
        if search_on_start {
            self.dispatch(Event::Refresh);
        }

        while self.running {
            if self.dirty {
                self.draw()?;
                self.dirty = false;
            }

            if event::poll(POLL_INTERVAL)? {
                match event::read()? {
                    TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        if let Some(event) = self.map_key_event(key) {
                            self.dispatch(event);
                        }
                    }
                    TermEvent::Resize(cols, rows) => self.dispatch(Event::Resize {
                        rows: usize::from(rows),
                        cols: usize::from(cols),
                    }),
                    _ => {}
                }
            }

            while let Ok(response) = self.responses.try_recv() {
                self.worker.complete(response.generation());
                self.dispatch(response.into());
            }
        }

        tracing::info!("gourmet exiting");
        Ok(())
    }

    fn draw(&self) -> io::Result<()> {
        let frame = gourmet::ui::render(&self.state, &self.store);
        let mut stdout = io::stdout().lock();
        stdout.write_all(frame.as_bytes())?;
        stdout.flush()
    }

    /// Handles `event` and everything its actions feed back.
    fn dispatch(&mut self, event: Event) {
        self.pending.push_back(event);

        while let Some(event) = self.pending.pop_front() {
            let (should_render, actions) = handle_event(&mut self.state, event);
            tracing::debug!(action_count = actions.len(), should_render, "event handled");

            self.dirty |= should_render;
            for action in actions {
                self.execute_action(action);
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) {
        match action {
            Action::StartFetch(request) => self.worker.spawn(request),
            Action::CancelFetch { generation } => {
                self.worker.cancel(generation);
            }
            Action::ToggleFavorite(shop) => {
                match self.store.toggle(&shop) {
                    Ok(now_favorite) => {
                        tracing::info!(shop_id = %shop.id, now_favorite, "favorite toggled");
                    }
                    Err(e) => self.report(&e),
                }
                self.refresh_favorites();
            }
            Action::RemoveFavorite { id } => {
                match self.store.remove(&id) {
                    Ok(record) => tracing::info!(shop_id = %record.id, "favorite removed"),
                    Err(e) => self.report(&e),
                }
                self.refresh_favorites();
            }
            Action::OpenCoupon { url } => {
                if let Err(e) = open_url(self.browser.as_deref(), &url) {
                    self.report(&e);
                }
            }
            Action::Quit => self.running = false,
        }
    }

    fn refresh_favorites(&mut self) {
        self.pending.push_back(Event::FavoritesLoaded(self.store.list()));
    }

    fn report(&mut self, error: &GourmetError) {
        tracing::warn!(error = %error, "action failed");
        self.pending.push_back(Event::Notice(error.to_string()));
    }

    /// Maps a key press to an application event for the current mode.
    fn map_key_event(&self, key: KeyEvent) -> Option<Event> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let typing = self.state.input_mode == InputMode::Search(SearchFocus::Typing);

        match key.code {
            KeyCode::Char('c') if ctrl => return Some(Event::Quit),
            KeyCode::Char('n') if ctrl => return Some(Event::KeyDown),
            KeyCode::Char('p') if ctrl => return Some(Event::KeyUp),
            KeyCode::Down => return Some(Event::KeyDown),
            KeyCode::Up => return Some(Event::KeyUp),
            KeyCode::Tab => return Some(Event::SwitchView),
            _ => {}
        }

        if typing {
            return match key.code {
                KeyCode::Enter => Some(Event::SubmitSearch),
                KeyCode::Esc => Some(Event::ExitSearch),
                KeyCode::Backspace => Some(Event::Backspace),
                KeyCode::Char(c) if !ctrl => Some(Event::Char(c)),
                _ => None,
            };
        }

        Some(match key.code {
            KeyCode::Char('j') => Event::KeyDown,
            KeyCode::Char('k') => Event::KeyUp,
            KeyCode::Char('/') => Event::SearchMode,
            KeyCode::Char('r') => Event::Refresh,
            KeyCode::Char('f' | ' ') => Event::ToggleFavorite,
            KeyCode::Char('q') => Event::Quit,
            KeyCode::Enter => Event::OpenCoupon,
            KeyCode::Esc => Event::ExitSearch,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn search_pages_must_be_positive() {
        assert!(Cli::try_parse_from(["gourmet", "search", "ramen", "--pages", "0"]).is_err());

        let cli = Cli::try_parse_from(["gourmet", "search", "ramen", "--pages", "3"]).unwrap();
        match cli.command {
            Some(Commands::Search { keyword, pages, all }) => {
                assert_eq!(keyword, "ramen");
                assert_eq!(pages, 3);
                assert!(!all);
            }
            _ => panic!("expected search command"),
        }
    }
}
