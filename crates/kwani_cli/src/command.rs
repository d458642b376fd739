//! Line commands accepted by the terminal browser.

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Open the n-th listed item (1-based).
    Open(usize),
    Back,
    /// Reload the university list (only valid at the root level).
    Reload,
    Help,
    Quit,
}

pub const HELP: &str = "commands: <number> open item | b back | r reload | h help | q quit";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "b" | "back" => Ok(Command::Back),
        "r" | "reload" => Ok(Command::Reload),
        "h" | "help" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        other => match other.parse::<usize>() {
            Ok(0) => Err("items are numbered from 1".to_string()),
            Ok(index) => Ok(Command::Open(index)),
            Err(_) => Err(format!("unknown command `{trimmed}`; {HELP}")),
        },
    }
}
