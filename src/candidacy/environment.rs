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

//! Predicates depending on the running session rather than on the
//! selection.

use crate::{
    context::{Conditions, Context},
    debug::debug,
    probe::{self, ProbeError},
    runtime::Runtime,
    spawn::run_command_sync,
    types::Target,
};

pub(super) fn is_valid_target<C: Context + ?Sized>(context: &C, target: Target) -> bool {
    context
        .targets()
        .is_none_or(|targets| targets.accepts(target))
}

fn contains_desktop(desktops: &[String], desktop: &str) -> bool {
    desktops
        .iter()
        .any(|d| d.trim().eq_ignore_ascii_case(desktop))
}

/// `only_show_in` wins when both lists are set. The desktop is only
/// detected when one of them is.
pub(super) fn is_valid_show_in(conditions: &Conditions, runtime: &Runtime) -> bool {
    let only_show_in = conditions.only_show_in();
    let not_show_in = conditions.not_show_in();
    if !only_show_in.is_empty() {
        contains_desktop(only_show_in, runtime.desktop().as_ref())
    } else if !not_show_in.is_empty() {
        !contains_desktop(not_show_in, runtime.desktop().as_ref())
    } else {
        true
    }
}

pub(super) fn is_valid_try_exec(conditions: &Conditions) -> bool {
    conditions.try_exec().is_none_or(probe::is_executable)
}

pub(super) fn is_valid_show_if_registered(conditions: &Conditions, runtime: &Runtime) -> bool {
    let timeout = runtime.options().probe_timeout();
    is_registered_with(conditions, |name| probe::name_has_owner(name, timeout))
}

fn is_registered_with(
    conditions: &Conditions,
    has_owner: impl FnOnce(&str) -> Result<bool, ProbeError>,
) -> bool {
    conditions.show_if_registered().is_none_or(|name| {
        match has_owner(name) {
            Ok(has_owner) => has_owner,
            Err(error) => {
                debug!('p', "Cannot check {name} on the session bus: {error}");
                false
            }
        }
    })
}

pub(super) fn is_valid_show_if_true(conditions: &Conditions, runtime: &Runtime) -> bool {
    conditions.show_if_true().is_none_or(|command| {
        match run_command_sync(command, runtime.options().probe_timeout()) {
            Ok(output) => {
                debug!('p', "'{command}' printed {output:?}");
                output.trim() == "true"
            }
            Err(error) => {
                debug!('p', "'{command}': {error}");
                false
            }
        }
    })
}

pub(super) fn is_valid_show_if_running(conditions: &Conditions) -> bool {
    conditions
        .show_if_running()
        .is_none_or(|name| match probe::is_process_running(name) {
            Ok(running) => running,
            Err(error) => {
                debug!('p', "Cannot list processes: {error}");
                false
            }
        })
}
