use spotlite::domain::{ItemKind, MenuCommand, Result};
use spotlite::infrastructure::Launcher;
use spotlite::providers::{FontPreviewApp, FontSource};
use spotlite::{handle_event, initialize, runtime, Action, AppState, Config, Direction, Event, Mode};
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[derive(Default)]
struct RecordingLauncher {
    calls: RefCell<Vec<String>>,
}

impl Launcher for RecordingLauncher {
    fn launch(&self, command: &str) -> Result<()> {
        self.calls.borrow_mut().push(format!("launch {command}"));
        Ok(())
    }

    fn open_url(&self, url: &str) -> Result<()> {
        self.calls.borrow_mut().push(format!("open {url}"));
        Ok(())
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        self.calls.borrow_mut().push(format!("copy {text}"));
        Ok(())
    }
}

struct FixedFonts;

impl FontSource for FixedFonts {
    fn families(&self) -> Result<Vec<String>> {
        Ok(vec!["Cantarell".to_string(), "Inter".to_string()])
    }
}

struct Fixture {
    _apps: TempDir,
    _settings: TempDir,
    config: Config,
}

fn write_entry(dir: &Path, file: &str, body: &str) {
    fs::write(dir.join(file), format!("[Desktop Entry]\nType=Application\n{body}")).unwrap();
}

fn fixture() -> Fixture {
    let apps = TempDir::new().unwrap();
    let settings = TempDir::new().unwrap();

    write_entry(
        apps.path(),
        "firefox.desktop",
        "Name=Firefox\nComment=Web browser\nExec=firefox %u\nIcon=firefox\n",
    );
    write_entry(
        apps.path(),
        "disks.desktop",
        "Name=Disks\nComment=Manage drives\nExec=gnome-disks\n",
    );
    write_entry(apps.path(), "hidden.desktop", "Name=Fidget\nExec=fidget\nHidden=true\n");
    write_entry(
        apps.path(),
        "nodisplay.desktop",
        "Name=Finder Helper\nExec=helper\nNoDisplay=true\n",
    );
    write_entry(apps.path(), "broken.desktop", "Name=Fig\n");
    fs::write(apps.path().join("notes.txt"), "Name=Figment\nExec=figment\n").unwrap();

    write_entry(
        settings.path(),
        "gnome-display-panel.desktop",
        "Name=Displays\nComment=Resolution and scaling\n\
         Exec=gnome-control-center display\nNoDisplay=true\n",
    );
    write_entry(settings.path(), "gnome-sound.desktop", "Name=Display Sound\nExec=sound\n");

    let config = Config {
        application_dirs: vec![apps.path().display().to_string()],
        settings_dirs: vec![settings.path().display().to_string()],
        ..Config::default()
    };

    Fixture {
        _apps: apps,
        _settings: settings,
        config,
    }
}

fn session(fixture: &Fixture) -> AppState {
    let mut state = initialize(&fixture.config);
    state
        .registry
        .register(FontPreviewApp::info(), Box::new(FontPreviewApp::new(Box::new(FixedFonts))));
    state
}

fn type_text(state: &mut AppState, text: &str) {
    handle_event(state, &Event::TextChanged(text.to_string()));
}

fn titles(state: &AppState) -> Vec<String> {
    state.rows().into_iter().map(|row| row.title).collect()
}

#[test]
fn query_fi_ranks_firefox_then_fallback() {
    let fixture = fixture();
    let mut state = session(&fixture);

    type_text(&mut state, "fi");

    assert_eq!(titles(&state), vec!["Firefox", "Search fi"]);
    let rows = state.rows();
    assert_eq!(rows[0].icon.as_deref(), Some("firefox"));
    assert_eq!(rows[1].icon, None);
    let item = state.nav.search_item(0).unwrap();
    assert_eq!(item.score, 90);
    assert_eq!(
        item.kind,
        ItemKind::Launchable {
            command: "firefox %u".to_string()
        }
    );
}

#[test]
fn activating_firefox_launches_without_field_codes() {
    let fixture = fixture();
    let mut state = session(&fixture);
    let launcher = RecordingLauncher::default();

    type_text(&mut state, "fi");
    let outcome = handle_event(&mut state, &Event::Activate);

    assert!(runtime::execute(&outcome.actions, &launcher, &fixture.config));
    assert_eq!(*launcher.calls.borrow(), vec!["launch firefox"]);
    assert!(!state.is_open());
}

#[test]
fn activating_the_fallback_opens_a_web_search() {
    let fixture = fixture();
    let mut state = session(&fixture);
    let launcher = RecordingLauncher::default();

    type_text(&mut state, "fi");
    handle_event(&mut state, &Event::Navigate(Direction::Down));
    let outcome = handle_event(&mut state, &Event::Activate);

    assert_eq!(
        outcome.actions,
        vec![
            Action::RunFallback {
                query: "fi".to_string()
            },
            Action::Close
        ]
    );
    assert!(runtime::execute(&outcome.actions, &launcher, &fixture.config));
    assert_eq!(
        *launcher.calls.borrow(),
        vec!["open https://www.google.com/search?q=fi"]
    );
}

#[test]
fn settings_rank_before_apps_on_equal_scores() {
    let fixture = fixture();
    let mut state = session(&fixture);

    type_text(&mut state, "dis");

    assert_eq!(titles(&state), vec!["Displays", "Disks", "Search dis"]);
}

#[test]
fn font_demo_round_trip() {
    let fixture = fixture();
    let mut state = session(&fixture);
    let launcher = RecordingLauncher::default();

    type_text(&mut state, "font");
    assert_eq!(titles(&state), vec!["Font Demo", "Search font"]);

    handle_event(&mut state, &Event::Activate);
    assert_eq!(state.mode(), Mode::Menu);
    assert!(state.query.is_empty());

    let rows = state.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].description, "Inter");

    let outcome = handle_event(&mut state, &Event::ActivateAt(1));
    assert_eq!(
        outcome.actions,
        vec![Action::RunMenuCommand(MenuCommand::CopyToClipboard("Inter".to_string()))]
    );
    assert!(!runtime::execute(&outcome.actions, &launcher, &fixture.config));
    assert_eq!(*launcher.calls.borrow(), vec!["copy Inter"]);
    assert_eq!(state.mode(), Mode::Menu);

    handle_event(&mut state, &Event::Back);
    assert_eq!(state.mode(), Mode::Search);
    assert!(state.rows().is_empty());
    assert!(state.query.is_empty());
    assert!(state.is_open());
}

#[test]
fn short_queries_surface_mini_apps_only() {
    let fixture = fixture();
    let mut state = session(&fixture);

    type_text(&mut state, "q");

    assert_eq!(titles(&state), vec!["Font Demo", "Search q"]);
}

#[test]
fn reload_hands_over_a_new_catalog() {
    let fixture = fixture();
    let mut state = session(&fixture);

    type_text(&mut state, "term");
    assert_eq!(titles(&state), vec!["Search term"]);

    let apps_dir = Path::new(&fixture.config.application_dirs[0]);
    write_entry(apps_dir, "terminal.desktop", "Name=Terminal\nExec=gnome-terminal\n");

    let event = spotlite::reload_catalog(&fixture.config, "applications").unwrap();
    handle_event(&mut state, &event);

    assert_eq!(titles(&state), vec!["Terminal", "Search term"]);
}

#[test]
fn unreadable_catalog_degrades_to_other_providers() {
    let config = Config {
        application_dirs: vec!["/nonexistent/applications".to_string()],
        settings_dirs: vec!["/nonexistent/settings".to_string()],
        ..Config::default()
    };
    let mut state = initialize(&config);

    type_text(&mut state, "font");

    assert_eq!(titles(&state), vec!["Font Demo", "Search font"]);
}
