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

/// The kind of menu-building pass a candidacy check is run for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Target {
    #[default]
    Selection,
    Background,
    Toolbar,
    Location,
    Any,
}

impl Target {
    /// Background, toolbar and location passes are run against the
    /// current folder rather than a multi-item selection.
    pub fn is_current_folder(self) -> bool {
        matches!(self, Self::Background | Self::Toolbar | Self::Location)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumString, strum::Display)]
pub enum Capability {
    Owner,
    Readable,
    Writable,
    Executable,
    Local,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
    strum::VariantArray,
)]
pub enum DesktopEnvironment {
    #[strum(serialize = "KDE")]
    Kde,
    #[strum(serialize = "GNOME")]
    Gnome,
    #[strum(serialize = "XFCE")]
    Xfce,
    Old,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::EnumString, strum::Display)]
pub enum ExecutionMode {
    #[default]
    Normal,
    Terminal,
    Embedded,
    DisplayOutput,
}

/// The kind of object a context is, used where behavior differs
/// between actions and the other contexts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Action,
    Menu,
    Profile,
}
