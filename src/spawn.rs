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

use crate::{debug::debug, utils::ErrorMessage};
use gettextrs::gettext;
use std::{
    ffi::OsStr,
    fmt,
    path::Path,
    time::Duration,
};

pub const TERMINAL_COMMAND_KEYWORD: &str = "COMMAND";

#[derive(Debug)]
pub enum SpawnError {
    InvalidCommand(glib::Error),
    Subprocess(glib::Error),
    Timeout(Duration),
}

impl SpawnError {
    pub fn into_message(self) -> ErrorMessage {
        match self {
            Self::InvalidCommand(error) => {
                ErrorMessage::with_error(gettext("No valid command given."), &error)
            }
            Self::Subprocess(error) => {
                ErrorMessage::with_error(gettext("Unable to execute command."), &error)
            }
            Self::Timeout(timeout) => ErrorMessage::new(
                gettext("Unable to execute command."),
                Some(
                    gettext("No answer after {timeout} ms.")
                        .replace("{timeout}", &timeout.as_millis().to_string()),
                ),
            ),
        }
    }
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCommand(error) | Self::Subprocess(error) => write!(f, "{error}"),
            Self::Timeout(timeout) => write!(f, "timed out after {} ms", timeout.as_millis()),
        }
    }
}

/// Starts `command` and returns without waiting for it. The child is
/// reaped by GLib once it exits.
pub fn spawn_async_command(
    working_directory: Option<&Path>,
    command: &OsStr,
) -> Result<(), SpawnError> {
    let argv = glib::shell_parse_argv(command).map_err(SpawnError::InvalidCommand)?;
    let argv: Vec<&OsStr> = argv.iter().map(|arg| arg.as_os_str()).collect();

    let launcher = gio::SubprocessLauncher::new(gio::SubprocessFlags::NONE);
    if let Some(d) = working_directory {
        launcher.set_cwd(d);
    }

    let process = launcher.spawn(&argv).map_err(SpawnError::Subprocess)?;
    debug!('e', "Spawned pid {:?} for {:?}", process.identifier(), command);

    Ok(())
}

/// Wraps `command` so that it runs inside a terminal.
pub fn make_run_in_terminal_command(command: &str, terminal_pattern: &str) -> String {
    if terminal_pattern.contains(TERMINAL_COMMAND_KEYWORD) {
        let quoted = glib::shell_quote(command);
        terminal_pattern.replace(TERMINAL_COMMAND_KEYWORD, &quoted.to_string_lossy())
    } else {
        format!("{} {}", terminal_pattern.trim_end(), command)
    }
}

/// Runs `command_line` and returns what it printed on stdout. The child is
/// killed when it does not finish within `timeout`.
pub fn run_command_sync(command_line: &str, timeout: Duration) -> Result<String, SpawnError> {
    let argv = glib::shell_parse_argv(command_line).map_err(SpawnError::InvalidCommand)?;
    let argv: Vec<&OsStr> = argv.iter().map(|arg| arg.as_os_str()).collect();

    let process = gio::Subprocess::newv(
        &argv,
        gio::SubprocessFlags::STDOUT_PIPE | gio::SubprocessFlags::STDERR_SILENCE,
    )
    .map_err(SpawnError::Subprocess)?;

    let context = glib::MainContext::new();
    let result = context.block_on(glib::future_with_timeout(
        timeout,
        process.communicate_utf8_future(None),
    ));

    match result {
        Ok(Ok((stdout, _))) => Ok(stdout.map(String::from).unwrap_or_default()),
        Ok(Err(error)) => Err(SpawnError::Subprocess(error)),
        Err(_) => {
            process.force_exit();
            Err(SpawnError::Timeout(timeout))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_terminal_pattern_with_keyword() {
        assert_eq!(
            make_run_in_terminal_command("ls -l '/tmp'", "xterm -e sh -c COMMAND"),
            "xterm -e sh -c 'ls -l '\\''/tmp'\\'''"
        );
    }

    #[test]
    fn test_terminal_pattern_without_keyword() {
        assert_eq!(
            make_run_in_terminal_command("top", "xterm -e "),
            "xterm -e top"
        );
    }

    #[test]
    fn test_run_command_sync() {
        let output = run_command_sync("echo true", Duration::from_secs(5)).unwrap();
        assert_eq!(output.trim(), "true");
    }

    #[test]
    fn test_run_command_sync_timeout() {
        let result = run_command_sync("sleep 5", Duration::from_millis(100));
        assert!(matches!(result, Err(SpawnError::Timeout(_))));
    }

    #[test]
    fn test_run_command_sync_invalid() {
        assert!(matches!(
            run_command_sync("echo 'unterminated", Duration::from_secs(1)),
            Err(SpawnError::InvalidCommand(_))
        ));
        assert!(matches!(
            run_command_sync("/nonexistent/binary", Duration::from_secs(1)),
            Err(SpawnError::Subprocess(_))
        ));
    }

    #[test]
    fn test_spawn_async_command() {
        let dir = tempfile::tempdir().unwrap();
        spawn_async_command(Some(dir.path()), OsStr::new("touch spawned")).unwrap();

        let marker = dir.path().join("spawned");
        for _ in 0..100 {
            if marker.exists() {
                break;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        assert!(marker.exists());
    }

    fn zombie_children(name: &str) -> usize {
        let ppid = std::process::id().to_string();
        std::fs::read_dir("/proc")
            .unwrap()
            .filter_map(|entry| std::fs::read_to_string(entry.ok()?.path().join("stat")).ok())
            .filter(|stat| {
                let Some((head, tail)) = stat.rsplit_once(')') else {
                    return false;
                };
                let comm = head.split_once('(').map(|(_, c)| c).unwrap_or_default();
                let fields: Vec<&str> = tail.split_whitespace().collect();
                comm == name && fields.first() == Some(&"Z") && fields.get(1) == Some(&ppid.as_str())
            })
            .count()
    }

    #[test]
    fn test_spawned_children_are_reaped() {
        for _ in 0..5 {
            spawn_async_command(None, OsStr::new("true")).unwrap();
        }
        std::thread::sleep(Duration::from_millis(200));
        for _ in 0..100 {
            if zombie_children("true") == 0 {
                break;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        assert_eq!(zombie_children("true"), 0);
    }

    #[test]
    fn test_spawn_missing_program() {
        assert!(matches!(
            spawn_async_command(None, OsStr::new("/nonexistent/program")),
            Err(SpawnError::Subprocess(_))
        ));
    }

    #[test]
    fn test_spawn_error_message() {
        let message = SpawnError::Timeout(Duration::from_millis(300)).into_message();
        assert_eq!(message.message, "Unable to execute command.");
        assert_eq!(message.secondary_text.as_deref(), Some("No answer after 300 ms."));
    }
}
