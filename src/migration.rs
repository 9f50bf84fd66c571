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

//! One-shot upgrade of actions stored before format version 3.

use crate::{
    context::{Action, CURRENT_ITEM_VERSION},
    debug::debug,
};

/// Flags of the pre-v3 format, replaced by conditions on upgrade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LegacyFlags {
    pub accept_multiple: bool,
    pub is_file: bool,
    pub is_dir: bool,
}

impl Default for LegacyFlags {
    fn default() -> Self {
        Self {
            accept_multiple: false,
            is_file: true,
            is_dir: false,
        }
    }
}

fn migrate_code(code: char) -> char {
    match code {
        'f' => 'b',
        'm' => 'B',
        'M' => 'F',
        'R' => 'U',
        'U' => 'n',
        other => other,
    }
}

/// Rewrites pre-v3 placeholders into the current dialect. Returns the new
/// string and whether anything changed.
pub fn migrate_parameters(parameters: &str) -> (String, bool) {
    let mut result = String::with_capacity(parameters.len());
    let mut rest = parameters;
    while let Some(position) = rest.find('%') {
        result.push_str(&rest[..position]);
        rest = &rest[position..];
        if let Some(tail) = rest.strip_prefix("%d/%f") {
            result.push_str("%f");
            rest = tail;
            continue;
        }
        let mut chars = rest[1..].chars();
        result.push('%');
        if let Some(code) = chars.next() {
            result.push(migrate_code(code));
        }
        rest = chars.as_str();
    }
    result.push_str(rest);

    let changed = result != parameters;
    (result, changed)
}

impl Action {
    /// Converts an action read with a format version below 3. Returns
    /// whether anything was done; current actions are left alone.
    pub fn upgrade_pre_v3(&mut self) -> bool {
        if self.iversion >= CURRENT_ITEM_VERSION {
            return false;
        }
        for profile in &mut self.profiles {
            let (path, path_changed) = migrate_parameters(&profile.path);
            let (parameters, parameters_changed) = migrate_parameters(&profile.parameters);
            if path_changed || parameters_changed {
                debug!(
                    'm',
                    "{}/{}: '{} {}' -> '{path} {parameters}'",
                    self.id,
                    profile.id,
                    profile.path,
                    profile.parameters
                );
            }
            profile.path = path;
            profile.parameters = parameters;

            if let Some(flags) = profile.legacy.take() {
                let conditions = &mut profile.conditions;
                conditions.set_selection_count(if flags.accept_multiple { ">0" } else { "=1" });
                match (flags.is_file, flags.is_dir) {
                    (false, true) => conditions.set_mimetypes(vec!["inode/directory".to_owned()]),
                    (true, false) if conditions.all_mimetypes() => {
                        conditions.set_mimetypes(vec!["all/allfiles".to_owned()])
                    }
                    _ => {}
                }
            }
        }
        debug!('m', "Action {} upgraded from version {}", self.id, self.iversion);
        self.iversion = CURRENT_ITEM_VERSION;
        true
    }
}
