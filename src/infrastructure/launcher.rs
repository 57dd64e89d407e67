//! Side-effect collaborators: launching commands, opening URLs, clipboard.
//!
//! Everything here is fire-and-forget. Child processes are spawned and left to
//! run; a detached reaper thread waits on each one so finished children do not
//! linger as zombies, and its exit status is only logged.

use crate::domain::{Result, SpotliteError};
use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::thread;

/// Desktop-entry field codes that expand to nothing for a plain launch.
const DROPPED_FIELD_CODES: &[char] = &['f', 'F', 'u', 'U', 'i', 'k', 'd', 'D', 'n', 'N', 'v', 'm'];

/// Placeholder in the fallback URL template.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Executes the side effects requested by the navigation state machine.
pub trait Launcher {
    /// Starts `command` out of process. `command` is already expanded.
    ///
    /// # Errors
    ///
    /// Returns an error if the process could not be spawned.
    fn launch(&self, command: &str) -> Result<()>;

    /// Opens `url` with the desktop's default handler.
    ///
    /// # Errors
    ///
    /// Returns an error if the opener could not be spawned.
    fn open_url(&self, url: &str) -> Result<()>;

    /// Places `text` on the clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard helper could not be spawned or fed.
    fn copy_to_clipboard(&self, text: &str) -> Result<()>;
}

/// Expands desktop-entry field codes in an `Exec` value.
///
/// File and URL codes are removed, `%c` becomes `name`, `%%` becomes a literal
/// percent sign, and runs of whitespace left behind collapse to one space.
///
/// # Example
///
/// ```rust
/// use spotlite::infrastructure::expand_field_codes;
///
/// assert_eq!(expand_field_codes("firefox %u", "Firefox"), "firefox");
/// assert_eq!(expand_field_codes("app --class %c %F", "My App"), "app --class My App");
/// ```
#[must_use]
pub fn expand_field_codes(exec: &str, name: &str) -> String {
    let mut expanded = String::with_capacity(exec.len());
    let mut chars = exec.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            expanded.push(c);
            continue;
        }
        match chars.next() {
            Some('%') => expanded.push('%'),
            Some('c') => expanded.push_str(name),
            Some(code) if DROPPED_FIELD_CODES.contains(&code) => {}
            Some(other) => {
                expanded.push('%');
                expanded.push(other);
            }
            None => expanded.push('%'),
        }
    }

    expanded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Fills the fallback URL template with the percent-encoded query.
///
/// # Example
///
/// ```rust
/// use spotlite::infrastructure::fallback_url;
///
/// let url = fallback_url("https://www.google.com/search?q={query}", "rust & c++");
/// assert_eq!(url, "https://www.google.com/search?q=rust+%26+c%2B%2B");
/// ```
#[must_use]
pub fn fallback_url(template: &str, query: &str) -> String {
    template.replace(QUERY_PLACEHOLDER, &encode_query_component(query))
}

/// Waits for `child` on a background thread.
fn reap(mut child: Child, program: &str) {
    let program = program.to_string();
    let spawned = thread::Builder::new()
        .name("spotlite-reaper".to_string())
        .spawn(move || match child.wait() {
            Ok(status) => tracing::trace!(program = %program, %status, "child exited"),
            Err(e) => tracing::debug!(program = %program, error = %e, "wait on child failed"),
        });

    if let Err(e) = spawned {
        tracing::warn!(error = %e, "cannot spawn reaper thread, child left unreaped");
    }
}

fn encode_query_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(char::from(byte));
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// [`Launcher`] backed by a shell, a URL opener and a clipboard helper.
#[derive(Debug, Clone)]
pub struct ShellLauncher {
    shell: String,
    opener: String,
    clipboard_command: Vec<String>,
}

impl ShellLauncher {
    #[must_use]
    pub fn new(
        shell: impl Into<String>,
        opener: impl Into<String>,
        clipboard_command: Vec<String>,
    ) -> Self {
        Self {
            shell: shell.into(),
            opener: opener.into(),
            clipboard_command,
        }
    }

    #[must_use]
    pub fn from_config(config: &crate::Config) -> Self {
        Self::new(
            config.shell.clone(),
            config.opener.clone(),
            config.clipboard_command.clone(),
        )
    }
}

impl Launcher for ShellLauncher {
    fn launch(&self, command: &str) -> Result<()> {
        if command.trim().is_empty() {
            return Err(SpotliteError::Launch("empty command".to_string()));
        }

        tracing::debug!(shell = %self.shell, command = %command, "spawning command");
        let child = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SpotliteError::Launch(format!("{}: {e}", self.shell)))?;

        reap(child, &self.shell);
        Ok(())
    }

    fn open_url(&self, url: &str) -> Result<()> {
        tracing::debug!(opener = %self.opener, url = %url, "opening url");
        let child = Command::new(&self.opener)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SpotliteError::Launch(format!("{}: {e}", self.opener)))?;

        reap(child, &self.opener);
        Ok(())
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        let Some((program, args)) = self.clipboard_command.split_first() else {
            return Err(SpotliteError::Clipboard("no clipboard command configured".to_string()));
        };

        tracing::debug!(program = %program, bytes = text.len(), "copying to clipboard");
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SpotliteError::Clipboard(format!("{program}: {e}")))?;

        let Some(mut stdin) = child.stdin.take() else {
            reap(child, program);
            return Err(SpotliteError::Clipboard("clipboard helper has no stdin".to_string()));
        };
        let written = stdin.write_all(text.as_bytes());
        // EOF lets the helper finish.
        drop(stdin);
        reap(child, program);

        written.map_err(|e| SpotliteError::Clipboard(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_url_and_file_codes() {
        assert_eq!(expand_field_codes("firefox %u", "Firefox"), "firefox");
        assert_eq!(expand_field_codes("gimp %U", "GIMP"), "gimp");
        assert_eq!(expand_field_codes("eog %f --fullscreen", "Image Viewer"), "eog --fullscreen");
        assert_eq!(expand_field_codes("app %i %k %F", "App"), "app");
    }

    #[test]
    fn substitutes_name_and_literal_percent() {
        assert_eq!(expand_field_codes("xterm -T %c", "Terminal"), "xterm -T Terminal");
        assert_eq!(expand_field_codes("printf 100%%", "P"), "printf 100%");
    }

    #[test]
    fn keeps_unknown_codes_and_trailing_percent() {
        assert_eq!(expand_field_codes("tool %z 50%", "T"), "tool %z 50%");
    }

    #[test]
    fn encodes_query_for_url() {
        assert_eq!(
            fallback_url("https://duckduckgo.com/?q={query}", "a/b c"),
            "https://duckduckgo.com/?q=a%2Fb+c"
        );
        assert_eq!(fallback_url("https://x/?q={query}", "é"), "https://x/?q=%C3%A9");
    }

    #[test]
    fn empty_command_is_rejected() {
        let launcher = ShellLauncher::new("sh", "xdg-open", vec!["wl-copy".to_string()]);
        assert!(launcher.launch("   ").is_err());
    }

    /// Zombie children of this process, from `/proc/<pid>/stat`.
    #[cfg(target_os = "linux")]
    fn zombie_children() -> usize {
        let parent = std::process::id().to_string();
        let Ok(procs) = std::fs::read_dir("/proc") else {
            return 0;
        };

        procs
            .filter_map(std::result::Result::ok)
            .filter_map(|entry| std::fs::read_to_string(entry.path().join("stat")).ok())
            .filter(|stat| {
                // Fields after the parenthesised command name: state, ppid, ...
                let Some((_, rest)) = stat.rsplit_once(')') else {
                    return false;
                };
                let mut fields = rest.split_whitespace();
                fields.next() == Some("Z") && fields.next() == Some(parent.as_str())
            })
            .count()
    }

    #[cfg(target_os = "linux")]
    fn wait_for_no_zombies() -> usize {
        let mut zombies = zombie_children();
        for _ in 0..100 {
            if zombies == 0 {
                break;
            }
            thread::sleep(std::time::Duration::from_millis(20));
            zombies = zombie_children();
        }
        zombies
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn repeated_copies_leave_no_zombies() {
        let launcher = ShellLauncher::new("sh", "true", vec!["cat".to_string()]);
        for _ in 0..5 {
            launcher.copy_to_clipboard("Inter").unwrap();
        }
        assert_eq!(wait_for_no_zombies(), 0);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn launched_commands_are_reaped() {
        let launcher = ShellLauncher::new("sh", "true", vec!["cat".to_string()]);
        for _ in 0..3 {
            launcher.launch("exit 0").unwrap();
            launcher.open_url("https://example.com/").unwrap();
        }
        assert_eq!(wait_for_no_zombies(), 0);
    }

    #[test]
    fn missing_clipboard_command_is_an_error() {
        let launcher = ShellLauncher::new("sh", "xdg-open", Vec::new());
        assert!(matches!(
            launcher.copy_to_clipboard("x"),
            Err(SpotliteError::Clipboard(_))
        ));
    }
}
