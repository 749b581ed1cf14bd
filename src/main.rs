use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use memory_match::config::{AppConfig, LoggingConfig};
use memory_match::game::{Session, Theme};
use memory_match::ui::App;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};

/// Play the memory matching game in the terminal.
#[derive(Parser)]
#[command(name = "memory_match", about = "Find the matching pairs in as few moves as possible")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "memory_match.toml")]
    config: PathBuf,

    /// Token theme: fruits, monsters or animals
    #[arg(long)]
    theme: Option<Theme>,

    /// Number of pairs on the board (2-8)
    #[arg(long)]
    pairs: Option<usize>,

    /// Shuffle seed, for reproducible boards
    #[arg(long)]
    seed: Option<u64>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(theme) = cli.theme {
        app_config.game.theme = theme;
    }
    if let Some(pairs) = cli.pairs {
        app_config.game.pair_count = pairs;
    }
    if cli.seed.is_some() {
        app_config.game.seed = cli.seed;
    }
    app_config.validate().context("validating configuration")?;

    init_logging(&app_config.logging)?;

    let rng = match app_config.game.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let session = Session::new(app_config.game.session_settings(), rng);

    run(App::new(session)).context("running terminal UI")
}

/// Send log output to the configured file. Without one, logging stays off so
/// nothing is written over the UI.
fn init_logging(config: &LoggingConfig) -> Result<()> {
    let Some(path) = &config.file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.level))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(mut app: App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
