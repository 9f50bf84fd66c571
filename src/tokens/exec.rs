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

use super::{Template, TokenSet};
use crate::{
    context::Profile,
    debug::debug,
    runtime::Runtime,
    spawn::{make_run_in_terminal_command, spawn_async_command},
    types::ExecutionMode,
};
use std::{ffi::OsStr, path::Path};

/// One process to start: the expanded command and the directory to start
/// it in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLine {
    pub command: String,
    pub working_dir: Option<String>,
}

impl TokenSet {
    /// The command lines [`execute`] starts for `profile`: one per selected
    /// item for singular templates, a single one otherwise.
    pub fn command_lines(&self, profile: &Profile) -> Vec<CommandLine> {
        let command = Template::parse(&profile.command());
        let working_dir = Template::parse(&profile.working_dir);

        let indexes = if command.is_singular() {
            0..self.count
        } else {
            0..1
        };
        indexes
            .map(|index| CommandLine {
                command: self.expand_template(&command, index, false),
                working_dir: Some(self.expand_template(&working_dir, index, true))
                    .filter(|dir| !dir.trim().is_empty()),
            })
            .collect()
    }
}

fn wrap_command(command: &str, profile: &Profile, runtime: &Runtime) -> String {
    match profile.execution_mode {
        ExecutionMode::Terminal | ExecutionMode::Embedded => {
            make_run_in_terminal_command(command, &runtime.options().terminal_pattern())
        }
        ExecutionMode::Normal | ExecutionMode::DisplayOutput => command.to_owned(),
    }
}

/// Starts every command line of `profile` without waiting for them.
/// Failures are reported on stderr and do not stop the remaining ones.
pub fn execute(token_set: &TokenSet, profile: &Profile, runtime: &Runtime) {
    for command_line in token_set.command_lines(profile) {
        let command = wrap_command(&command_line.command, profile, runtime);
        let working_dir = command_line
            .working_dir
            .as_deref()
            .map(Path::new)
            .filter(|dir| {
                let exists = dir.is_dir();
                if !exists {
                    debug!('e', "Ignoring missing working directory {}", dir.display());
                }
                exists
            });

        debug!('e', "Running {command:?} in {working_dir:?}");
        if let Err(error) = spawn_async_command(working_dir, OsStr::new(&command)) {
            eprintln!("{}", error.into_message());
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        options::DefaultActionsOptions,
        selection::{SelectedInfo, SelectedInfoBuilder},
        tokens::build_token_set,
    };
    use gio::prelude::*;
    use std::time::Duration;

    fn selection() -> Vec<SelectedInfo> {
        vec![
            SelectedInfoBuilder::new("file:///a/x.txt")
                .mimetype("text/plain")
                .build(),
            SelectedInfoBuilder::new("file:///a/y.txt")
                .mimetype("text/plain")
                .build(),
        ]
    }

    #[test]
    fn test_singular_command_lines() {
        let tokens = build_token_set(&selection());
        let commands = tokens.command_lines(&Profile::new("/usr/bin/cat", "%f"));
        assert_eq!(
            commands,
            vec![
                CommandLine {
                    command: "/usr/bin/cat '/a/x.txt'".to_owned(),
                    working_dir: Some("/a".to_owned()),
                },
                CommandLine {
                    command: "/usr/bin/cat '/a/y.txt'".to_owned(),
                    working_dir: Some("/a".to_owned()),
                },
            ]
        );
    }

    #[test]
    fn test_plural_command_lines() {
        let tokens = build_token_set(&selection());
        let commands = tokens.command_lines(&Profile::new("/usr/bin/cat", "%F"));
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].command, "/usr/bin/cat '/a/x.txt' '/a/y.txt'");
    }

    #[test]
    fn test_empty_working_dir() {
        let tokens = build_token_set(&selection());
        let mut profile = Profile::new("true", "");
        profile.working_dir = String::new();
        assert_eq!(tokens.command_lines(&profile)[0].working_dir, None);
    }

    #[test]
    fn test_terminal_wrapping() {
        let runtime = Runtime::new(Box::new(DefaultActionsOptions {
            terminal_pattern: "xterm -e sh -c COMMAND".to_owned(),
            ..Default::default()
        }));
        let mut profile = Profile::new("top", "");
        assert_eq!(wrap_command("top ", &profile, &runtime), "top ");
        profile.execution_mode = ExecutionMode::Terminal;
        assert_eq!(wrap_command("top", &profile, &runtime), "xterm -e sh -c 'top'");
    }

    #[test]
    fn test_execute_spawns_per_item() {
        let dir = tempfile::tempdir().unwrap();
        let selection: Vec<SelectedInfo> = ["one", "two"]
            .iter()
            .map(|name| {
                let uri = gio::File::for_path(dir.path().join(name)).uri();
                SelectedInfoBuilder::new(&uri).mimetype("text/plain").build()
            })
            .collect();

        let tokens = build_token_set(&selection);
        execute(&tokens, &Profile::new("touch", "%b.done"), &Runtime::default());

        let expected = [dir.path().join("one.done"), dir.path().join("two.done")];
        for _ in 0..100 {
            if expected.iter().all(|p| p.exists()) {
                break;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        assert!(expected.iter().all(|p| p.exists()));
    }
}
