//! Terminal browser for the Kwani handout hierarchy.
//!
//! # Responsibility
//! - Resolve the backend (HTTP or fixture file) from flags and environment.
//! - Drive the core navigation controller from line commands.

mod command;
mod terminal;

use clap::Parser;
use command::{parse_command, Command, HELP};
use kwani_core::{
    default_log_level, init_logging, BackendConfig, HttpTableSource, MemoryTableSource,
    NavOutcome, NavResult, NavigationController, TableSource,
};
use std::io::{BufRead, Stdout};
use std::path::PathBuf;
use std::process::ExitCode;
use terminal::TerminalRenderer;

#[derive(Parser, Debug)]
#[command(name = "kwani", version, about = "Browse university handouts from the terminal")]
struct Cli {
    /// Backend base URL (overrides KWANI_BACKEND_URL)
    #[arg(long)]
    backend: Option<String>,

    /// Serve from a local JSON fixture instead of the backend
    #[arg(long, conflicts_with = "backend")]
    fixture: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long)]
    log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long)]
    log_level: Option<String>,
}

type Controller = NavigationController<Box<dyn TableSource>, TerminalRenderer<Stdout>>;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("kwani: {err}");
            return ExitCode::FAILURE;
        }
    }

    let source = match resolve_source(&cli) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("kwani: {err}");
            return ExitCode::FAILURE;
        }
    };

    let renderer = TerminalRenderer::new(std::io::stdout());
    let mut controller = NavigationController::new(source, renderer);
    controller.renderer_mut().message(HELP);
    report(&mut controller, |nav| nav.show_universities());

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("kwani: failed to read input: {err}");
                return ExitCode::FAILURE;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => controller.renderer_mut().message(HELP),
            Ok(Command::Back) => report(&mut controller, |nav| nav.go_back()),
            Ok(Command::Reload) => report(&mut controller, |nav| nav.show_universities()),
            Ok(Command::Open(index)) => {
                let Some(id) = controller.renderer().item_id(index).map(str::to_string) else {
                    controller
                        .renderer_mut()
                        .message(&format!("no item numbered {index}"));
                    continue;
                };
                report(&mut controller, |nav| nav.select(&id));
            }
            Err(err) => controller.renderer_mut().message(&err),
        }
    }

    ExitCode::SUCCESS
}

/// Runs one interaction; rejected transitions are printed, read failures
/// were already reported by the renderer.
fn report(
    controller: &mut Controller,
    action: impl FnOnce(&mut Controller) -> NavResult<NavOutcome>,
) {
    if let Err(err) = action(controller) {
        controller.renderer_mut().message(&err.to_string());
    }
}

fn resolve_source(cli: &Cli) -> Result<Box<dyn TableSource>, String> {
    if let Some(path) = cli.fixture.as_ref() {
        let source = MemoryTableSource::from_path(path).map_err(|err| err.to_string())?;
        return Ok(Box::new(source));
    }

    let env_config = BackendConfig::from_env().map_err(|err| err.to_string())?;
    let config = backend_config(cli, env_config)?;
    let source = HttpTableSource::new(&config).map_err(|err| err.to_string())?;
    Ok(Box::new(source))
}

/// Applies `--backend` on top of the environment-derived configuration.
fn backend_config(cli: &Cli, env_config: BackendConfig) -> Result<BackendConfig, String> {
    match cli.backend.as_deref() {
        Some(url) => env_config.with_base_url(url).map_err(|err| err.to_string()),
        None => Ok(env_config),
    }
}

#[cfg(test)]
mod tests {
    use super::{backend_config, Cli};
    use clap::Parser;
    use kwani_core::BackendConfig;
    use std::time::Duration;

    fn env_config() -> BackendConfig {
        let mut config = BackendConfig::default()
            .with_base_url("https://env.example")
            .unwrap();
        config.timeout = Duration::from_secs(5);
        config
    }

    #[test]
    fn backend_flag_overrides_environment_url() {
        let cli = Cli::try_parse_from(["kwani", "--backend", "http://localhost:8080/"]).unwrap();
        let config = backend_config(&cli, env_config()).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn environment_url_is_kept_without_flag() {
        let cli = Cli::try_parse_from(["kwani"]).unwrap();
        let config = backend_config(&cli, env_config()).unwrap();
        assert_eq!(config.base_url, "https://env.example");
    }

    #[test]
    fn invalid_backend_flag_is_rejected() {
        let cli = Cli::try_parse_from(["kwani", "--backend", "ftp://files"]).unwrap();
        assert!(backend_config(&cli, env_config()).is_err());
    }

    #[test]
    fn fixture_conflicts_with_backend() {
        let parsed =
            Cli::try_parse_from(["kwani", "--backend", "http://a", "--fixture", "data.json"]);
        assert!(parsed.is_err());
    }
}
