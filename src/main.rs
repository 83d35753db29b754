use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{error, info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use simplelog::{Config, LevelFilter, WriteLogger};

use pagebar::event_source::TerminalEventSource;
use pagebar::main_app::{App, run_app_with_event_source};
use pagebar::pager::PagerConfig;
use pagebar::panic_handler::initialize_panic_handler;
use pagebar::query_store::{PageStore, QueryStringStore};
use pagebar::settings::{load_settings, settings};
use pagebar::theme::{ThemeId, set_theme};

#[derive(Parser, Debug)]
#[command(name = "pagebar", version, about = "Interactive pagination strip demo")]
struct Cli {
    /// Total number of pages
    #[arg(long, default_value_t = 20)]
    total_pages: u32,

    /// Target number of visible page-number buttons
    #[arg(long)]
    button_count: Option<u32>,

    /// Page to start on (overrides the page stored in the query file)
    #[arg(long)]
    page: Option<u32>,

    /// Query-string key the current page is mirrored into
    #[arg(long)]
    page_query: Option<String>,

    /// File the query string is persisted to
    #[arg(long)]
    query_file: Option<PathBuf>,

    /// Log file path
    #[arg(long, default_value = "pagebar.log")]
    log_file: PathBuf,

    /// Color theme name
    #[arg(long)]
    theme: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    WriteLogger::init(
        LevelFilter::Debug,
        Config::default(),
        File::create(&cli.log_file)?,
    )?;
    info!("Starting pagebar");

    load_settings();
    let settings = settings();

    let theme_name = cli.theme.as_deref().unwrap_or(&settings.theme);
    match ThemeId::from_name(theme_name) {
        Some(theme) => set_theme(theme),
        None => warn!("Unknown theme {theme_name:?}, keeping default"),
    }

    let page_query = cli.page_query.or_else(|| {
        (!settings.page_query.is_empty()).then(|| settings.page_query.clone())
    });

    let store = QueryStringStore::load_or_ephemeral(cli.query_file.as_deref());

    // Deep-link restore: an explicit --page wins over the stored page.
    let initial_page = cli
        .page
        .or_else(|| page_query.as_deref().and_then(|key| store.get(key)))
        .unwrap_or(1);

    let config = PagerConfig {
        total_pages: cli.total_pages,
        button_count: cli.button_count.unwrap_or(settings.button_count),
        initial_page,
        page_query,
    };

    // Configuration errors surface before the terminal is put into raw mode.
    let mut app = App::with_store(config, Box::new(store))?;

    initialize_panic_handler();

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut event_source = TerminalEventSource;
    let res = run_app_with_event_source(&mut terminal, &mut app, &mut event_source);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Application error: {:?}", err);
        println!("{err:?}");
    }

    info!("Shutting down pagebar");
    Ok(())
}
