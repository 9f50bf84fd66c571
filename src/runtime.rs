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

use crate::{
    candidacy::desktop,
    options::{self, ActionsOptionsRead, DefaultActionsOptions},
    types::DesktopEnvironment,
};
use std::cell::OnceCell;

/// Process-wide state consulted by the engines: options, the login name
/// and the desktop environment, which is detected at most once.
pub struct Runtime {
    options: Box<dyn ActionsOptionsRead>,
    user_name: String,
    desktop: OnceCell<DesktopEnvironment>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(Box::new(DefaultActionsOptions::default()))
    }
}

impl Runtime {
    pub fn new(options: Box<dyn ActionsOptionsRead>) -> Self {
        Self {
            options,
            user_name: glib::user_name().to_string_lossy().into_owned(),
            desktop: OnceCell::new(),
        }
    }

    /// Options from GSettings, or compiled defaults.
    pub fn from_settings() -> Self {
        Self::new(options::load())
    }

    pub fn with_desktop(self, desktop: DesktopEnvironment) -> Self {
        let _ = self.desktop.set(desktop);
        self
    }

    pub fn with_user_name(mut self, user_name: &str) -> Self {
        self.user_name = user_name.to_owned();
        self
    }

    pub fn options(&self) -> &dyn ActionsOptionsRead {
        self.options.as_ref()
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn desktop(&self) -> DesktopEnvironment {
        *self
            .desktop
            .get_or_init(|| desktop::detect(self.options.as_ref()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_desktop_override() {
        let runtime = Runtime::new(Box::new(DefaultActionsOptions {
            desktop: Some("XFCE".to_owned()),
            ..Default::default()
        }));
        assert_eq!(runtime.desktop(), DesktopEnvironment::Xfce);
    }

    #[test]
    fn test_preset_desktop_is_kept() {
        let runtime = Runtime::default().with_desktop(DesktopEnvironment::Kde);
        assert_eq!(runtime.desktop(), DesktopEnvironment::Kde);
        assert_eq!(runtime.desktop(), DesktopEnvironment::Kde);
    }

    #[test]
    fn test_user_name() {
        assert!(!Runtime::default().user_name().is_empty());
        assert_eq!(
            Runtime::default().with_user_name("alice").user_name(),
            "alice"
        );
    }
}
