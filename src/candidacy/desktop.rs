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
    debug::debug,
    options::ActionsOptionsRead,
    probe,
    spawn::run_command_sync,
    types::DesktopEnvironment,
};
use strum::VariantArray;

const GNOME_SESSION_MANAGER: &str = "org.gnome.SessionManager";
const XPROP_DT_SAVE_MODE: &str = "xprop -root _DT_SAVE_MODE";

/// Looks up a desktop identifier such as `GNOME` or `xfce`.
pub fn from_identifier(identifier: &str) -> Option<DesktopEnvironment> {
    let identifier = identifier.trim();
    DesktopEnvironment::VARIANTS
        .iter()
        .find(|de| de.as_ref().eq_ignore_ascii_case(identifier))
        .copied()
}

/// Classifies the running session. Probes are only called when the cheaper
/// checks before them did not decide.
pub fn classify(
    getenv: impl Fn(&str) -> Option<String>,
    gnome_session_manager: impl FnOnce() -> bool,
    dt_save_mode: impl FnOnce() -> Option<String>,
) -> DesktopEnvironment {
    if getenv("KDE_FULL_SESSION").is_some_and(|v| v == "true") {
        return DesktopEnvironment::Kde;
    }
    if getenv("GNOME_DESKTOP_SESSION_ID").is_some_and(|v| !v.is_empty()) {
        return DesktopEnvironment::Gnome;
    }
    if gnome_session_manager() {
        return DesktopEnvironment::Gnome;
    }
    if dt_save_mode().is_some_and(|output| output.to_ascii_lowercase().contains("xfce")) {
        return DesktopEnvironment::Xfce;
    }
    DesktopEnvironment::Old
}

pub fn detect(options: &dyn ActionsOptionsRead) -> DesktopEnvironment {
    if let Some(identifier) = options.desktop() {
        match from_identifier(&identifier) {
            Some(desktop) => {
                debug!('d', "Desktop set by option: {desktop}");
                return desktop;
            }
            None => eprintln!("Unknown desktop '{identifier}', detecting it instead"),
        }
    }

    let timeout = options.probe_timeout();
    let desktop = classify(
        |name| glib::getenv(name).map(|v| v.to_string_lossy().into_owned()),
        || match probe::name_has_owner(GNOME_SESSION_MANAGER, timeout) {
            Ok(has_owner) => has_owner,
            Err(error) => {
                debug!('d', "No session bus answer for {GNOME_SESSION_MANAGER}: {error}");
                false
            }
        },
        || match run_command_sync(XPROP_DT_SAVE_MODE, timeout) {
            Ok(output) => Some(output),
            Err(error) => {
                debug!('d', "{XPROP_DT_SAVE_MODE}: {error}");
                None
            }
        },
    );
    debug!('d', "Detected desktop: {desktop}");
    desktop
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::options::DefaultActionsOptions;

    fn env<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            vars.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_classify_order() {
        assert_eq!(
            classify(
                env(&[("KDE_FULL_SESSION", "true"), ("GNOME_DESKTOP_SESSION_ID", "x")]),
                || panic!("bus probed"),
                || panic!("xprop probed"),
            ),
            DesktopEnvironment::Kde
        );
        assert_eq!(
            classify(
                env(&[("KDE_FULL_SESSION", "1"), ("GNOME_DESKTOP_SESSION_ID", "this-is-deprecated")]),
                || panic!("bus probed"),
                || panic!("xprop probed"),
            ),
            DesktopEnvironment::Gnome
        );
        assert_eq!(
            classify(env(&[]), || true, || panic!("xprop probed")),
            DesktopEnvironment::Gnome
        );
        assert_eq!(
            classify(
                env(&[("GNOME_DESKTOP_SESSION_ID", "")]),
                || false,
                || Some("_DT_SAVE_MODE(STRING) = \"xfce4\"\n".to_owned())
            ),
            DesktopEnvironment::Xfce
        );
        assert_eq!(
            classify(env(&[]), || false, || None),
            DesktopEnvironment::Old
        );
    }

    #[test]
    fn test_from_identifier() {
        assert_eq!(from_identifier("GNOME"), Some(DesktopEnvironment::Gnome));
        assert_eq!(from_identifier(" xfce "), Some(DesktopEnvironment::Xfce));
        assert_eq!(from_identifier("old"), Some(DesktopEnvironment::Old));
        assert_eq!(from_identifier("LXDE"), None);
    }

    #[test]
    fn test_detect_with_option() {
        let options = DefaultActionsOptions {
            desktop: Some("KDE".to_owned()),
            ..Default::default()
        };
        assert_eq!(detect(&options), DesktopEnvironment::Kde);
    }
}
