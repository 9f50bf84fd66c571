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

/// Mimetype patterns which, on their own, match every file.
pub const ALL_MIMETYPES_TOKENS: [&str; 6] = ["*", "*/*", "*/all", "all", "all/*", "all/all"];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The match criteria carried by every action, menu and profile.
#[derive(Clone, Debug, PartialEq)]
pub struct Conditions {
    basenames: Vec<String>,
    matchcase: bool,
    mimetypes: Vec<String>,
    all_mimetypes: bool,
    schemes: Vec<String>,
    folders: Vec<String>,
    capabilities: Vec<String>,
    selection_count: String,
    only_show_in: Vec<String>,
    not_show_in: Vec<String>,
    try_exec: Option<String>,
    show_if_registered: Option<String>,
    show_if_true: Option<String>,
    show_if_running: Option<String>,
}

impl Default for Conditions {
    fn default() -> Self {
        Self {
            basenames: strings(&["*"]),
            matchcase: true,
            mimetypes: strings(&["*/*"]),
            all_mimetypes: true,
            schemes: strings(&["file"]),
            folders: strings(&["/"]),
            capabilities: Vec::new(),
            selection_count: ">0".to_owned(),
            only_show_in: Vec::new(),
            not_show_in: Vec::new(),
            try_exec: None,
            show_if_registered: None,
            show_if_true: None,
            show_if_running: None,
        }
    }
}

impl Conditions {
    /// Structural check: none of the four pattern lists may be empty.
    pub fn is_valid(&self) -> bool {
        !self.basenames.is_empty()
            && !self.mimetypes.is_empty()
            && !self.schemes.is_empty()
            && !self.folders.is_empty()
    }

    pub fn basenames(&self) -> &[String] {
        &self.basenames
    }

    pub fn set_basenames(&mut self, basenames: Vec<String>) {
        self.basenames = basenames;
    }

    pub fn matchcase(&self) -> bool {
        self.matchcase
    }

    pub fn set_matchcase(&mut self, matchcase: bool) {
        self.matchcase = matchcase;
    }

    pub fn mimetypes(&self) -> &[String] {
        &self.mimetypes
    }

    pub fn set_mimetypes(&mut self, mimetypes: Vec<String>) {
        self.mimetypes = mimetypes;
        self.check_mimetypes();
    }

    pub fn all_mimetypes(&self) -> bool {
        self.all_mimetypes
    }

    fn check_mimetypes(&mut self) {
        self.all_mimetypes = !self.mimetypes.is_empty()
            && self
                .mimetypes
                .iter()
                .all(|m| ALL_MIMETYPES_TOKENS.contains(&m.trim()));
    }

    pub fn schemes(&self) -> &[String] {
        &self.schemes
    }

    pub fn set_schemes(&mut self, schemes: Vec<String>) {
        self.schemes = schemes;
    }

    pub fn folders(&self) -> &[String] {
        &self.folders
    }

    pub fn set_folders(&mut self, folders: Vec<String>) {
        self.folders = folders;
    }

    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    pub fn set_capabilities(&mut self, capabilities: Vec<String>) {
        self.capabilities = capabilities;
    }

    pub fn selection_count(&self) -> &str {
        &self.selection_count
    }

    pub fn set_selection_count(&mut self, selection_count: &str) {
        self.selection_count = selection_count.to_owned();
    }

    pub fn only_show_in(&self) -> &[String] {
        &self.only_show_in
    }

    pub fn set_only_show_in(&mut self, desktops: Vec<String>) {
        self.only_show_in = desktops;
    }

    pub fn not_show_in(&self) -> &[String] {
        &self.not_show_in
    }

    pub fn set_not_show_in(&mut self, desktops: Vec<String>) {
        self.not_show_in = desktops;
    }

    pub fn try_exec(&self) -> Option<&str> {
        self.try_exec.as_deref()
    }

    pub fn set_try_exec(&mut self, path: Option<&str>) {
        self.try_exec = path.filter(|p| !p.is_empty()).map(str::to_owned);
    }

    pub fn show_if_registered(&self) -> Option<&str> {
        self.show_if_registered.as_deref()
    }

    pub fn set_show_if_registered(&mut self, name: Option<&str>) {
        self.show_if_registered = name.filter(|n| !n.is_empty()).map(str::to_owned);
    }

    pub fn show_if_true(&self) -> Option<&str> {
        self.show_if_true.as_deref()
    }

    pub fn set_show_if_true(&mut self, command: Option<&str>) {
        self.show_if_true = command.filter(|c| !c.is_empty()).map(str::to_owned);
    }

    pub fn show_if_running(&self) -> Option<&str> {
        self.show_if_running.as_deref()
    }

    pub fn set_show_if_running(&mut self, name: Option<&str>) {
        self.show_if_running = name.filter(|n| !n.is_empty()).map(str::to_owned);
    }
}
