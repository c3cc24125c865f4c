use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{fs::OpenOptions, io, sync::Mutex};
use taskdesk::{app::App, config::Config, ui, Store};
use tracing::error;
use tracing_subscriber::{prelude::*, EnvFilter};

fn init_logging(config: &Config) -> io::Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(log_file))
                .with_filter(env_filter),
        )
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    init_logging(&config)?;

    let store = Store::open(&config.db_path)?;

    if config.export {
        let tasks = store.tasks().list_all()?;
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        store.close()?;
        return Ok(());
    }

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store.tasks());
    let result = ui::run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!("Terminal loop failed: {err}");
        eprintln!("{:?}", err);
    }

    drop(app);
    store.close()?;
    Ok(())
}
