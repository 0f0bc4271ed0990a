//! Terminal progress reporter.
//!
//! One status line per asset. A transition on the same asset (uploading →
//! uploaded) overwrites the previous line; a transition on a different asset
//! appends. The only state held is the last asset written.

use colored::Colorize;

use skiff_core::types::{Asset, AssetKey};
use skiff_sync::{AssetState, ProgressReporter};

/// Renders per-asset state transitions as colored status lines.
#[derive(Debug, Default)]
pub struct TerminalReporter {
    last: Option<AssetKey>,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the cursor to `key`. Returns true when the previous line
    /// belongs to the same asset and should be overwritten.
    fn advance(&mut self, key: &AssetKey) -> bool {
        if self.last.as_ref() == Some(key) {
            true
        } else {
            self.last = Some(key.clone());
            false
        }
    }
}

impl ProgressReporter for TerminalReporter {
    fn asset_state(&mut self, asset: &Asset, state: AssetState) {
        if self.advance(&asset.key) {
            erase_last_line();
        }
        println!("{}", render_line(asset, state));
    }
}

fn render_line(asset: &Asset, state: AssetState) -> String {
    let key = asset.key.to_string();
    match state {
        AssetState::Error => format!("{} {key}", "    ERROR ".bold().white().on_red()),
        AssetState::Skipped => format!("{} {}", "  SKIPPED ".bold().on_bright_black(), key.dimmed()),
        AssetState::Uploaded => format!("{} {key}", " UPLOADED ".bold().black().on_green()),
        AssetState::Uploading => format!("{} {key}", "WORKING.. ".bold().black().on_yellow()),
        AssetState::Ignored => format!("{} {}", "  IGNORED ".bold(), key.dimmed()),
    }
}

/// Move the cursor up one line and clear it.
fn erase_last_line() {
    print!("\x1b[1A\x1b[2K\r");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
