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

//! Decides whether an action, menu or profile is shown for a selection.

mod capabilities;
pub mod desktop;
mod environment;
mod patterns;
pub mod selection_count;

pub use patterns::mimetype_matches;
pub use selection_count::SelectionCount;

use crate::{
    context::{Action, Context, Profile},
    debug::debug,
    runtime::Runtime,
    selection::SelectedItem,
    types::Target,
};

/// Runs every predicate of `context` against `selection`, stopping at the
/// first failure. The target is checked first, external probes last.
pub fn is_candidate<C, S>(context: &C, target: Target, selection: &[S], runtime: &Runtime) -> bool
where
    C: Context + ?Sized,
    S: SelectedItem,
{
    let conditions = context.conditions();
    if !conditions.is_valid() {
        debug!('c', "{:?} '{}' is not valid", context.kind(), context.id());
        return false;
    }

    let checks: [(&str, &dyn Fn() -> bool); 12] = [
        ("target", &|| environment::is_valid_target(context, target)),
        ("show-in", &|| environment::is_valid_show_in(conditions, runtime)),
        ("selection-count", &|| {
            selection_count::is_valid_selection_count(conditions.selection_count(), selection.len())
        }),
        ("basenames", &|| patterns::is_valid_basenames(conditions, selection)),
        ("mimetypes", &|| patterns::is_valid_mimetypes(conditions, selection)),
        ("schemes", &|| patterns::is_valid_schemes(conditions, selection)),
        ("folders", &|| patterns::is_valid_folders(conditions, target, selection)),
        ("capabilities", &|| {
            capabilities::is_valid_capabilities(conditions.capabilities(), selection, runtime)
        }),
        ("try-exec", &|| environment::is_valid_try_exec(conditions)),
        ("show-if-registered", &|| {
            environment::is_valid_show_if_registered(conditions, runtime)
        }),
        ("show-if-true", &|| environment::is_valid_show_if_true(conditions, runtime)),
        ("show-if-running", &|| environment::is_valid_show_if_running(conditions)),
    ];

    for (name, check) in checks {
        if !check() {
            debug!(
                'c',
                "{:?} '{}' is not a candidate for {target}: {name} check failed",
                context.kind(),
                context.id()
            );
            return false;
        }
    }
    true
}

impl Action {
    /// The profile to run: the action must be a candidate itself, then the
    /// first candidate profile wins.
    pub fn candidate_profile<S: SelectedItem>(
        &self,
        target: Target,
        selection: &[S],
        runtime: &Runtime,
    ) -> Option<&Profile> {
        if !is_candidate(self, target, selection, runtime) {
            return None;
        }
        self.profiles
            .iter()
            .find(|profile| is_candidate(*profile, target, selection, runtime))
    }
}
