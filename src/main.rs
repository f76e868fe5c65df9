mod app;
mod config;
mod domain;
mod input;
mod logging;
mod notifications;
mod persistence;
mod report;
mod store;
mod ticker;
mod timer;
mod ui;

use anyhow::Result;
use app::AppState;
use clap::{Parser, Subcommand};
use config::AppConfig;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{Category, NewTask, Priority};
use persistence::{ensure_data_dir, init_local_data_dir, load_or_default, save_state, state_file};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use store::{Store, StoreState};

#[derive(Parser)]
#[command(name = "pomotask")]
#[command(about = "A terminal task list with a Pomodoro focus timer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .pomotask directory in the current directory
    Init,
    /// Print statistics and open tasks from the saved state
    Stats {
        /// Write the summary to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the data directory and state file in use
    Path,
    /// Add a task without opening the interface
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// low, medium or high
        #[arg(short, long, value_parser = parse_priority, default_value = "medium")]
        priority: Priority,
        /// work, personal, shopping, health or other
        #[arg(short, long, value_parser = parse_category, default_value = "work")]
        category: Category,
    },
}

fn parse_priority(tag: &str) -> Result<Priority, String> {
    Priority::from_tag(tag).ok_or_else(|| format!("unknown priority '{}'", tag))
}

fn parse_category(tag: &str) -> Result<Category, String> {
    Category::from_tag(tag).ok_or_else(|| format!("unknown category '{}'", tag))
}

fn task_title(raw: &str) -> Result<String> {
    let title = raw.trim();
    if title.is_empty() {
        anyhow::bail!("task title cannot be empty");
    }
    Ok(title.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let data_dir = init_local_data_dir()?;
            println!("Initialized pomotask directory: {}", data_dir.display());
            println!();
            println!("Pomotask will now keep tasks and statistics in this directory.");
            Ok(())
        }
        Some(Commands::Stats { output }) => {
            let config = AppConfig::load()?;
            let state = load_or_default(state_file()?, StoreState::with_settings(config.timer));
            match output {
                Some(path) => {
                    report::write_summary(&state, &path)?;
                    println!("Summary written: {}", path.display());
                }
                None => print!("{}", report::generate_summary(&state)),
            }
            Ok(())
        }
        Some(Commands::Path) => {
            println!("Data directory: {}", ensure_data_dir()?.display());
            println!("State file:     {}", state_file()?.display());
            Ok(())
        }
        Some(Commands::Add {
            title,
            description,
            priority,
            category,
        }) => {
            let title = task_title(&title)?;

            let config = AppConfig::load()?;
            let path = state_file()?;
            let state = load_or_default(&path, StoreState::with_settings(config.timer));
            let mut store = Store::new(state);
            store.add_task(NewTask {
                title: title.clone(),
                description: description.trim().to_string(),
                priority,
                category,
                completed: false,
            });
            save_state(&path, &store.snapshot())?;
            println!("Added: {}", title);
            Ok(())
        }
        None => run_tui(),
    }
}

fn run_tui() -> Result<()> {
    let data_dir = ensure_data_dir()?;
    let config = AppConfig::load()?;

    // Keep the guard alive until exit so buffered log lines are flushed
    let _log_guard = logging::init_file_logging(&data_dir, &config.log_filter)?;
    tracing::info!(dir = %data_dir.display(), "starting pomotask");

    let path = state_file()?;
    let state = load_or_default(&path, StoreState::with_settings(config.timer));
    let mut app = AppState::new(Store::new(state), config).with_state_path(path);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.timer.pause();
    app.save_if_needed();

    if let Err(err) = result {
        tracing::error!(error = %err, "exited with error");
        eprintln!("Error: {}", err);
    }
    tracing::info!("pomotask stopped");

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let tick_rate = ticker::tick_duration(app.config.tick_ms);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now());

        // Persist after every mutation
        app.save_if_needed();
    }
}
