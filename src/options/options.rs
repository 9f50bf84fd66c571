/*
 * Copyright 2025 FileManager-Actions contributors
 *
 * This program is free software; you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation; either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program; if not, see <http://www.gnu.org/licenses/>.
 *
 * For more details see the file COPYING.
 */

use gio::prelude::*;
use std::time::Duration;

pub const RUNTIME_SCHEMA_ID: &str = "org.filemanager-actions.runtime";

pub const DEFAULT_TERMINAL_PATTERN: &str = "gnome-terminal -- sh -c COMMAND";
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(300);

pub trait ActionsOptionsRead {
    /// Command used to run Terminal and Embedded profiles. `COMMAND` is
    /// replaced by the quoted command line.
    fn terminal_pattern(&self) -> String;

    /// Upper bound for `show_if_true`, `show_if_registered` and the
    /// desktop detection probes.
    fn probe_timeout(&self) -> Duration;

    /// Desktop environment identifier overriding detection.
    fn desktop(&self) -> Option<String>;
}

/// Options stored in GSettings.
pub struct ActionsOptions(pub gio::Settings);

impl ActionsOptions {
    /// Returns `None` when the schema is not installed.
    pub fn new() -> Option<Self> {
        let schema = gio::SettingsSchemaSource::default()?.lookup(RUNTIME_SCHEMA_ID, true)?;
        Some(Self(gio::Settings::new_full(
            &schema,
            None::<&gio::SettingsBackend>,
            None,
        )))
    }
}

impl ActionsOptionsRead for ActionsOptions {
    fn terminal_pattern(&self) -> String {
        Some(self.0.string("terminal-pattern").to_string())
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TERMINAL_PATTERN.to_owned())
    }

    fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.0.uint("probe-timeout").into())
    }

    fn desktop(&self) -> Option<String> {
        Some(self.0.string("desktop").to_string()).filter(|d| !d.is_empty())
    }
}

/// Compiled-in options, used when no schema is installed.
#[derive(Clone, Debug)]
pub struct DefaultActionsOptions {
    pub terminal_pattern: String,
    pub probe_timeout: Duration,
    pub desktop: Option<String>,
}

impl Default for DefaultActionsOptions {
    fn default() -> Self {
        Self {
            terminal_pattern: DEFAULT_TERMINAL_PATTERN.to_owned(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            desktop: None,
        }
    }
}

impl ActionsOptionsRead for DefaultActionsOptions {
    fn terminal_pattern(&self) -> String {
        self.terminal_pattern.clone()
    }

    fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    fn desktop(&self) -> Option<String> {
        self.desktop.clone()
    }
}

pub fn load() -> Box<dyn ActionsOptionsRead> {
    match ActionsOptions::new() {
        Some(options) => Box::new(options),
        None => Box::new(DefaultActionsOptions::default()),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = DefaultActionsOptions::default();
        assert_eq!(options.terminal_pattern(), DEFAULT_TERMINAL_PATTERN);
        assert_eq!(options.probe_timeout(), Duration::from_millis(300));
        assert_eq!(options.desktop(), None);
    }

    #[test]
    fn test_load_never_fails() {
        let options = load();
        assert!(!options.terminal_pattern().is_empty());
    }
}
