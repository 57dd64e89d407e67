//! Line-driven front end for the launcher core.
//!
//! Stands in for a graphical overlay: every stdin line is one input event and
//! the current list is printed after each one.
//!
//! # Usage
//!
//! ```text
//! spotlite [config=<path>] [key=value ...]
//! ```
//!
//! `config=` names a TOML config file (default
//! `~/.config/spotlite/config.toml` if it exists). Any other `key=value` pair
//! overrides the matching config key.
//!
//! # Input
//!
//! - plain text: the text box now holds this text
//! - `:down` / `:up`: move the selection
//! - `:select N`: hover row `N`
//! - `:enter`: activate the selected row
//! - `:click N`: activate row `N`
//! - `:esc`: escape (closes in Search mode, leaves Menu mode)
//! - `:back`: the back control in Menu mode
//! - `:reload`: re-read the desktop-entry catalogs
//!
//! The process exits when an action closes the session or stdin ends.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use spotlite::infrastructure::{paths, ShellLauncher};
use spotlite::providers::catalog::{APPLICATIONS, SETTINGS};
use spotlite::{handle_event, runtime, AppState, Config, Direction, Event, SpotliteError};

/// A parsed stdin line.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Event(Event),
    Reload,
    Invalid(String),
}

fn main() -> ExitCode {
    let config = match load_config(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("spotlite: {e}");
            return ExitCode::from(2);
        }
    };

    let _tracing = spotlite::observability::init_tracing(&config);

    let span = tracing::debug_span!("session");
    let _guard = span.entered();

    let mut state = spotlite::initialize(&config);
    let launcher = ShellLauncher::from_config(&config);

    match run(&mut state, &launcher, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "session aborted");
            eprintln!("spotlite: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Builds the config from `key=value` arguments.
fn load_config(args: impl Iterator<Item = String>) -> Result<Config, SpotliteError> {
    let mut overrides = BTreeMap::new();
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            return Err(SpotliteError::Config(format!(
                "expected key=value, got '{arg}'"
            )));
        };
        overrides.insert(key.trim().to_string(), value.trim().to_string());
    }

    let mut config = match overrides.get("config") {
        Some(path) => Config::load(paths::expand_tilde(path))?,
        None => match paths::default_config_path().filter(|path| path.is_file()) {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        },
    };

    config.apply_overrides(&overrides)?;
    config.validate()?;
    Ok(config)
}

fn run(state: &mut AppState, launcher: &ShellLauncher, config: &Config) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    render(state, &mut out)?;

    for line in stdin.lock().lines() {
        let line = line?;

        let events = match parse_input(&line) {
            Input::Event(event) => vec![event],
            Input::Reload => [SETTINGS, APPLICATIONS]
                .into_iter()
                .filter_map(|provider| spotlite::reload_catalog(config, provider))
                .collect(),
            Input::Invalid(message) => {
                writeln!(out, "? {message}")?;
                continue;
            }
        };

        let mut closed = false;
        for event in &events {
            let outcome = handle_event(state, event);
            tracing::debug!(notifications = ?outcome.notifications, "event handled");
            closed |= runtime::execute(&outcome.actions, launcher, config);
        }

        if closed || !state.is_open() {
            tracing::debug!("session ended by action");
            break;
        }

        render(state, &mut out)?;
    }

    Ok(())
}

fn parse_input(line: &str) -> Input {
    let Some(command) = line.strip_prefix(':') else {
        return Input::Event(Event::TextChanged(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let index = parts.next().map(str::parse::<usize>);

    match (name, index) {
        ("down", None) => Input::Event(Event::Navigate(Direction::Down)),
        ("up", None) => Input::Event(Event::Navigate(Direction::Up)),
        ("enter", None) => Input::Event(Event::Activate),
        ("esc", None) => Input::Event(Event::Escape),
        ("back", None) => Input::Event(Event::Back),
        ("reload", None) => Input::Reload,
        ("select", Some(Ok(index))) => Input::Event(Event::Select(index)),
        ("click", Some(Ok(index))) => Input::Event(Event::ActivateAt(index)),
        ("select" | "click", _) => Input::Invalid(format!(":{name} needs a row number")),
        _ => Input::Invalid(format!("unknown command :{command}")),
    }
}

fn render(state: &AppState, out: &mut impl Write) -> io::Result<()> {
    if state.mode().shows_text_input() {
        writeln!(out, "search> {}", state.query)?;
    } else {
        writeln!(
            out,
            "menu [{}] (:back to return)",
            state.nav.active_menu_provider().unwrap_or_default()
        )?;
    }

    for (index, row) in state.rows().iter().enumerate() {
        let marker = if row.selected { '>' } else { ' ' };
        if row.description.is_empty() {
            writeln!(out, "{marker} {index:>2}  {}", row.title)?;
        } else {
            writeln!(out, "{marker} {index:>2}  {}  ({})", row.title, row.description)?;
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_text_changes() {
        assert_eq!(
            parse_input("fire fox"),
            Input::Event(Event::TextChanged("fire fox".to_string()))
        );
        assert_eq!(parse_input(""), Input::Event(Event::TextChanged(String::new())));
    }

    #[test]
    fn commands_map_to_events() {
        assert_eq!(parse_input(":down"), Input::Event(Event::Navigate(Direction::Down)));
        assert_eq!(parse_input(":click 2"), Input::Event(Event::ActivateAt(2)));
        assert_eq!(parse_input(":select 0"), Input::Event(Event::Select(0)));
        assert_eq!(parse_input(":reload"), Input::Reload);
    }

    #[test]
    fn malformed_commands_are_reported() {
        assert!(matches!(parse_input(":click x"), Input::Invalid(_)));
        assert!(matches!(parse_input(":jump"), Input::Invalid(_)));
    }

    #[test]
    fn render_shows_query_then_back_hint() {
        let config = Config {
            application_dirs: vec!["/nonexistent".to_string()],
            settings_dirs: vec!["/nonexistent".to_string()],
            ..Config::default()
        };
        let mut state = spotlite::initialize(&config);
        handle_event(&mut state, &Event::TextChanged("font".to_string()));

        let mut out = Vec::new();
        render(&state, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("search> font\n"));
        assert!(text.contains(">  0  Font Demo"));

        handle_event(&mut state, &Event::Activate);
        let mut out = Vec::new();
        render(&state, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("menu [fonts] (:back to return)\n"));
    }

    #[test]
    fn arguments_must_be_pairs() {
        let args = vec!["max_app_results".to_string()];
        assert!(load_config(args.into_iter()).is_err());
    }

    #[test]
    fn overrides_are_validated() {
        let args = vec!["config=/nonexistent/spotlite.toml".to_string()];
        assert!(matches!(load_config(args.into_iter()), Err(SpotliteError::Io(_))));

        let args = vec!["max_app_results=0".to_string()];
        assert!(load_config(args.into_iter()).is_err());
    }
}
