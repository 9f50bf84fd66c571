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

//! Queries against the running system: the session bus, the process
//! table and the filesystem.

use crate::{debug::debug, utils::ErrorMessage};
use gettextrs::gettext;
use glib::prelude::*;
use std::{
    ffi::CString,
    fmt,
    os::unix::ffi::OsStrExt,
    path::Path,
    time::Duration,
};

const DBUS_NAME: &str = "org.freedesktop.DBus";
const DBUS_PATH: &str = "/org/freedesktop/DBus";
const DBUS_INTERFACE: &str = "org.freedesktop.DBus";

#[derive(Debug)]
pub enum ProbeError {
    Bus(glib::Error),
    UnexpectedReply(glib::Variant),
    ProcessList(std::io::Error),
}

impl ProbeError {
    pub fn into_message(self) -> ErrorMessage {
        match self {
            Self::Bus(error) => {
                ErrorMessage::with_error(gettext("Cannot reach the session bus."), &error)
            }
            Self::UnexpectedReply(reply) => ErrorMessage::new(
                gettext("Unexpected answer from the session bus."),
                Some(reply.print(true).to_string()),
            ),
            Self::ProcessList(error) => {
                ErrorMessage::with_error(gettext("Cannot list running processes."), &error)
            }
        }
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(error) => write!(f, "{error}"),
            Self::UnexpectedReply(reply) => write!(f, "unexpected reply {}", reply.print(true)),
            Self::ProcessList(error) => write!(f, "{error}"),
        }
    }
}

/// Asks the session bus whether `name` currently has an owner.
pub fn name_has_owner(name: &str, timeout: Duration) -> Result<bool, ProbeError> {
    let connection = gio::bus_get_sync(gio::BusType::Session, gio::Cancellable::NONE)
        .map_err(ProbeError::Bus)?;
    let reply = connection
        .call_sync(
            Some(DBUS_NAME),
            DBUS_PATH,
            DBUS_INTERFACE,
            "NameHasOwner",
            Some(&(name,).to_variant()),
            None,
            gio::DBusCallFlags::NONE,
            i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX),
            gio::Cancellable::NONE,
        )
        .map_err(ProbeError::Bus)?;
    let (has_owner,) = reply
        .get::<(bool,)>()
        .ok_or_else(|| ProbeError::UnexpectedReply(reply.clone()))?;
    debug!('p', "NameHasOwner({name}) = {has_owner}");
    Ok(has_owner)
}

fn basename(name: &str) -> &str {
    name.rsplit('/').find(|s| !s.is_empty()).unwrap_or(name)
}

fn process_names(pid_dir: &Path) -> Vec<String> {
    let mut names = Vec::new();
    if let Ok(comm) = std::fs::read_to_string(pid_dir.join("comm")) {
        names.push(comm.trim_end().to_owned());
    }
    if let Ok(cmdline) = std::fs::read(pid_dir.join("cmdline")) {
        if let Some(arg0) = cmdline.split(|b| *b == 0).next().filter(|a| !a.is_empty()) {
            names.push(basename(&String::from_utf8_lossy(arg0)).to_owned());
        }
    }
    names
}

/// Whether a process whose name matches the basename of `name` is running.
pub fn is_process_running(name: &str) -> Result<bool, ProbeError> {
    is_process_running_in(Path::new("/proc"), name)
}

fn is_process_running_in(proc_dir: &Path, name: &str) -> Result<bool, ProbeError> {
    let wanted = basename(name);
    for entry in std::fs::read_dir(proc_dir).map_err(ProbeError::ProcessList)? {
        let Ok(entry) = entry else {
            continue;
        };
        let is_pid = entry
            .file_name()
            .to_str()
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()));
        if !is_pid {
            continue;
        }
        if process_names(&entry.path()).iter().any(|n| n == wanted) {
            debug!('p', "Process {wanted} found as {:?}", entry.file_name());
            return Ok(true);
        }
    }
    Ok(false)
}

/// Whether `path` exists, is not a directory and may be executed by the
/// current user.
pub fn is_executable(path: &str) -> bool {
    let path = Path::new(path);
    if path.is_dir() {
        return false;
    }
    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    unsafe { libc::access(c_path.as_ptr(), libc::X_OK) == 0 }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn test_is_executable() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("script.sh");
        std::fs::write(&script, "#!/bin/sh\n").unwrap();
        let script = script.to_str().unwrap();
        assert!(!is_executable(script));

        std::fs::set_permissions(script, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert!(is_executable(script));

        assert!(!is_executable(dir.path().to_str().unwrap()));
        assert!(!is_executable("/nonexistent/program"));
        assert!(!is_executable("bad\0path"));
    }

    #[test]
    fn test_process_table() {
        let proc_dir = tempfile::tempdir().unwrap();
        let pid = proc_dir.path().join("42");
        std::fs::create_dir(&pid).unwrap();
        std::fs::write(pid.join("comm"), "gnome-shell\n").unwrap();
        std::fs::write(pid.join("cmdline"), b"/usr/bin/gnome-shell\0--wayland\0").unwrap();
        std::fs::create_dir(proc_dir.path().join("self")).unwrap();

        assert!(is_process_running_in(proc_dir.path(), "gnome-shell").unwrap());
        assert!(is_process_running_in(proc_dir.path(), "/usr/bin/gnome-shell").unwrap());
        assert!(!is_process_running_in(proc_dir.path(), "kwin").unwrap());
        assert!(is_process_running_in(&proc_dir.path().join("missing"), "kwin").is_err());
    }

    #[test]
    fn test_probe_error_message() {
        let error = ProbeError::ProcessList(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(error.to_string(), "denied");
        assert_eq!(
            error.into_message().to_string(),
            "Cannot list running processes.: denied"
        );
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("/usr/bin/nautilus"), "nautilus");
        assert_eq!(basename("nautilus"), "nautilus");
        assert_eq!(basename("/opt/app/"), "app");
    }
}
