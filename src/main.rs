mod calc;
mod cmd;
mod data;
mod ui;

use clap::{Parser, Subcommand};
use flexi_logger::{FileSpec, Logger};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lifegrid", about = "your life in months")]
struct Cli {
    /// Path to the data directory containing config.yaml (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    /// Write log output to this file; without it the interactive grid logs nothing
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config.yaml
    Init,
    /// Print months lived, months remaining and current age
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "info"
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut logger = Logger::try_with_env_or_str(log_level(&cli))?;
    if let Some(log_file) = &cli.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }
    let _logger = logger.start()?;

    // Resolve data_dir to an absolute path so file I/O works regardless of
    // future directory changes within the process.
    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    data::persistence::set_data_dir(data_dir.clone());

    // Auto-init when the data directory is missing or empty and the user did not
    // explicitly invoke the `init` subcommand.
    let is_init_command = matches!(cli.command, Some(Commands::Init));
    if !is_init_command && dir_needs_init(&data_dir) {
        eprintln!(
            "Data directory '{}' is missing or empty, running init...",
            data_dir.display()
        );
        cmd::init::run()?;
    }

    match cli.command {
        None => cmd::root::run(),
        Some(Commands::Init) => cmd::init::run(),
        Some(Commands::Show { json }) => cmd::show::run(json),
    }
}

/// Stderr is shared with the alternate screen, so the grid only logs to a file.
fn log_level(cli: &Cli) -> &'static str {
    match (&cli.log_file, &cli.command) {
        (Some(_), _) => DEFAULT_LOG_LEVEL,
        (None, None) => "off",
        (None, Some(_)) => "warn",
    }
}

/// Returns true when `dir` does not exist or exists but contains no files.
fn dir_needs_init(dir: &std::path::Path) -> bool {
    if !dir.exists() {
        return true;
    }
    dir.read_dir()
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_dir_needs_init_nonexistent() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("does_not_exist");
        assert!(dir_needs_init(&missing));
    }

    #[test]
    fn test_dir_needs_init_empty_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(dir_needs_init(tmp.path()));
    }

    #[test]
    fn test_dir_needs_init_nonempty_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.yaml"), "settings: {}").unwrap();
        assert!(!dir_needs_init(tmp.path()));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_show_json() {
        let cli = Cli::try_parse_from(["lifegrid", "--data-dir", "/tmp/x", "show", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Show { json: true })));
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/x"));
    }

    #[test]
    fn test_log_level_silent_for_tui_without_log_file() {
        let tui = Cli::try_parse_from(["lifegrid"]).unwrap();
        assert_eq!(log_level(&tui), "off");
        let show = Cli::try_parse_from(["lifegrid", "show"]).unwrap();
        assert_eq!(log_level(&show), "warn");
        let logged = Cli::try_parse_from(["lifegrid", "--log-file", "/tmp/l.log"]).unwrap();
        assert_eq!(log_level(&logged), DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_cli_defaults_to_tui() {
        let cli = Cli::try_parse_from(["lifegrid"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.log_file.is_none());
    }
}
