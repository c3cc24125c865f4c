use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "taskdesk")]
#[command(about = "Terminal task manager backed by SQLite")]
#[command(version)]
pub struct Config {
    /// SQLite database file (`:memory:` for a throwaway store)
    #[arg(long = "db", env = "TASKDESK_DB", default_value = "tasks.db")]
    pub db_path: PathBuf,

    /// Log file; the terminal belongs to the UI
    #[arg(long, env = "TASKDESK_LOG", default_value = "taskdesk.log")]
    pub log_file: PathBuf,

    /// Print every task as JSON and exit
    #[arg(long)]
    pub export: bool,
}
