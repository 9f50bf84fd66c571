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

use super::conditions::Conditions;
use crate::{
    migration::LegacyFlags,
    types::{ExecutionMode, ItemKind, Target},
};

/// The format version written by current releases. Actions loaded with a
/// lower version carry pre-v3 parameters and must be upgraded.
pub const CURRENT_ITEM_VERSION: u32 = 3;

/// Anything candidacy can be evaluated for.
pub trait Context {
    fn id(&self) -> &str;
    fn kind(&self) -> ItemKind;
    fn conditions(&self) -> &Conditions;

    /// Menu-building passes the object asked to appear in. Only actions
    /// restrict their targets.
    fn targets(&self) -> Option<&Targets> {
        None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Targets {
    pub selection: bool,
    pub location: bool,
    pub toolbar: bool,
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            selection: true,
            location: false,
            toolbar: false,
        }
    }
}

impl Targets {
    pub fn accepts(&self, target: Target) -> bool {
        match target {
            Target::Selection => self.selection,
            Target::Background | Target::Location => self.location,
            Target::Toolbar => self.toolbar,
            Target::Any => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    pub id: String,
    pub label: String,
    pub path: String,
    pub parameters: String,
    pub working_dir: String,
    pub execution_mode: ExecutionMode,
    pub conditions: Conditions,
    /// Set on profiles read from pre-v3 storage until they are upgraded.
    pub legacy: Option<LegacyFlags>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            id: "profile-main".to_owned(),
            label: String::new(),
            path: String::new(),
            parameters: String::new(),
            working_dir: "%d".to_owned(),
            execution_mode: ExecutionMode::Normal,
            conditions: Conditions::default(),
            legacy: None,
        }
    }
}

impl Profile {
    pub fn new(path: &str, parameters: &str) -> Self {
        Self {
            path: path.to_owned(),
            parameters: parameters.to_owned(),
            ..Default::default()
        }
    }

    /// The template expanded at execution time.
    pub fn command(&self) -> String {
        format!("{} {}", self.path, self.parameters)
    }
}

impl Context for Profile {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> ItemKind {
        ItemKind::Profile
    }

    fn conditions(&self) -> &Conditions {
        &self.conditions
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Action {
    pub id: String,
    pub label: String,
    pub iversion: u32,
    pub targets: Targets,
    pub conditions: Conditions,
    pub profiles: Vec<Profile>,
}

impl Default for Action {
    fn default() -> Self {
        Self {
            id: String::new(),
            label: String::new(),
            iversion: CURRENT_ITEM_VERSION,
            targets: Targets::default(),
            conditions: Conditions::default(),
            profiles: Vec::new(),
        }
    }
}

impl Action {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_owned(),
            label: label.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profiles.push(profile);
        self
    }
}

impl Context for Action {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> ItemKind {
        ItemKind::Action
    }

    fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    fn targets(&self) -> Option<&Targets> {
        Some(&self.targets)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Menu {
    pub id: String,
    pub label: String,
    pub conditions: Conditions,
}

impl Context for Menu {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> ItemKind {
        ItemKind::Menu
    }

    fn conditions(&self) -> &Conditions {
        &self.conditions
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_action_targets() {
        let mut action = Action::new("id", "Open");
        let targets = action.targets().unwrap();
        assert!(targets.accepts(Target::Selection));
        assert!(!targets.accepts(Target::Background));
        assert!(!targets.accepts(Target::Toolbar));
        assert!(targets.accepts(Target::Any));

        action.targets.location = true;
        assert!(action.targets.accepts(Target::Background));
        assert!(action.targets.accepts(Target::Location));
    }

    #[test]
    fn test_only_actions_have_targets() {
        assert!(Profile::default().targets().is_none());
        assert!(Menu::default().targets().is_none());
        assert_eq!(Menu::default().kind(), ItemKind::Menu);
    }

    #[test]
    fn test_profile_command() {
        let profile = Profile::new("/usr/bin/cat", "%f");
        assert_eq!(profile.command(), "/usr/bin/cat %f");
        assert_eq!(profile.working_dir, "%d");
    }
}
