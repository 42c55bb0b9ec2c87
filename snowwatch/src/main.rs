//! snowwatch binary: configuration, logging, and the terminal lifecycle.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use snowwatch_core::{
    Action, AppState, Catalog, OpenWeatherClient, WeatherConfig, DEFAULT_API_BASE,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use snowwatch::{Runtime, Ui, TICK_INTERVAL};

/// Is it snowing? A terminal verdict for your city.
#[derive(Parser, Debug)]
#[command(name = "snowwatch")]
#[command(about = "Watch a city for snow and panic accordingly")]
struct Args {
    /// API key for the weather service
    #[arg(long, env = "OPENWEATHER_API_KEY")]
    api_key: String,

    /// Weather service base URL
    #[arg(long, env = "OPENWEATHER_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Start with this catalog city selected (case-insensitive name match)
    #[arg(long)]
    city: Option<String>,

    /// Re-fetch interval in seconds; 0 disables the periodic refresh
    #[arg(long, default_value = "300")]
    refresh: u64,

    /// HTTP request timeout in seconds
    #[arg(long, default_value = "10")]
    timeout: u64,

    /// Append tracing output to this file (RUST_LOG sets the filter)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    // Logging goes to a file or nowhere; stdout belongs to the TUI.
    if let Some(path) = &args.log_file {
        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("Error: could not open log file {}: {}", path.display(), e);
                process::exit(1);
            }
        };
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .init();
    }

    // Resolve configuration before touching the terminal so errors land on
    // a usable stderr.
    let catalog = Catalog::default();
    let start_city = match &args.city {
        Some(name) => match catalog.position_of(name) {
            Some(index) => index,
            None => {
                eprintln!("Error: unknown city '{}'. Known cities:", name);
                for known in catalog.names() {
                    eprintln!("  {}", known);
                }
                process::exit(1);
            }
        },
        None => 0,
    };

    let config = WeatherConfig {
        api_base: args.api_base,
        api_key: args.api_key,
        timeout: Duration::from_secs(args.timeout),
    };
    let client = match OpenWeatherClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: could not build HTTP client: {}", e);
            process::exit(1);
        }
    };

    info!(
        city = %catalog.cities()[start_city].name,
        refresh_secs = args.refresh,
        "starting snowwatch"
    );

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, catalog, client, start_city, args.refresh).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    catalog: Catalog,
    client: OpenWeatherClient,
    start_city: usize,
    refresh_secs: u64,
) -> io::Result<()> {
    let mut runtime = Runtime::new(AppState::new(catalog), client);

    // Animation tick
    runtime
        .timers()
        .interval("tick", TICK_INTERVAL, || Action::Tick);

    // Periodic re-fetch of the selected city
    if refresh_secs > 0 {
        runtime
            .timers()
            .interval("refresh", Duration::from_secs(refresh_secs), || {
                Action::WeatherFetch
            });
    }

    // Selects the startup city and issues its fetch in one dispatch.
    runtime.enqueue(Action::CitySelect(start_city));

    let mut ui = Ui::new();
    runtime.run(terminal, &mut ui).await
}
