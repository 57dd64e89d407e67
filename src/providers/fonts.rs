//! Font preview mini-app.
//!
//! Lists every installed font family as a menu entry showing a pangram in that
//! font. Activating an entry copies the family name to the clipboard.

use super::miniapp::{MiniApp, MiniAppInfo};
use crate::domain::{MenuCommand, MenuEntry, Result, SpotliteError, StyleHint};
use std::collections::BTreeSet;
use std::process::Command;

/// Text rendered in each previewed font.
pub const SAMPLE_TEXT: &str = "The quick brown fox jumps over the lazy dog";

/// Enumerates installed font families.
pub trait FontSource {
    /// # Errors
    ///
    /// Returns an error when the font list cannot be obtained.
    fn families(&self) -> Result<Vec<String>>;
}

/// Reads font families from fontconfig's `fc-list`.
#[derive(Debug, Clone, Default)]
pub struct FcListFontSource;

impl FontSource for FcListFontSource {
    fn families(&self) -> Result<Vec<String>> {
        let output = Command::new("fc-list").args([":", "family"]).output()?;
        if !output.status.success() {
            return Err(SpotliteError::Catalog(format!(
                "fc-list exited with {}",
                output.status
            )));
        }
        Ok(parse_fc_list(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parses `fc-list : family` output into sorted, unique family names.
///
/// Each line may list several comma-separated localized aliases; the first one
/// is the family name.
#[must_use]
pub fn parse_fc_list(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.split(',').next())
        .map(|family| family.trim().replace("\\-", "-"))
        .filter(|family| !family.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The "Font Demo" mini-app.
pub struct FontPreviewApp {
    source: Box<dyn FontSource>,
}

impl FontPreviewApp {
    #[must_use]
    pub fn new(source: Box<dyn FontSource>) -> Self {
        Self { source }
    }

    /// Registry descriptor for this mini-app.
    #[must_use]
    pub fn info() -> MiniAppInfo {
        MiniAppInfo::new("fonts", "Font Demo", "Preview system fonts")
    }
}

impl Default for FontPreviewApp {
    fn default() -> Self {
        Self::new(Box::new(FcListFontSource))
    }
}

impl MiniApp for FontPreviewApp {
    fn menu_entries(&self) -> Vec<MenuEntry> {
        let families = self.source.families().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "font enumeration failed");
            Vec::new()
        });

        families
            .into_iter()
            .map(|family| {
                let command = MenuCommand::CopyToClipboard(family.clone());
                MenuEntry::new(SAMPLE_TEXT, family.clone(), command)
                    .with_style(StyleHint::Font { family })
            })
            .collect()
    }
}
