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
    context::{Action, Conditions, Profile},
    runtime::Runtime,
    selection::SelectedItem,
    tokens::{execute, TokenSet},
    types::{ExecutionMode, Target},
};
use gettextrs::gettext;
use gio::{prelude::*, subclass::prelude::*};

/// What the command line asks for.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    pub command: String,
    pub parameters: String,
    pub basenames: Vec<String>,
    pub mimetypes: Vec<String>,
    pub schemes: Vec<String>,
    pub folders: Vec<String>,
    pub capabilities: Vec<String>,
    pub selection_count: Option<String>,
    pub target: Target,
    pub terminal: bool,
    pub dry_run: bool,
    pub force: bool,
}

impl RunOptions {
    fn conditions(&self) -> Conditions {
        let mut conditions = Conditions::default();
        if !self.basenames.is_empty() {
            conditions.set_basenames(self.basenames.clone());
        }
        if !self.mimetypes.is_empty() {
            conditions.set_mimetypes(self.mimetypes.clone());
        }
        if !self.schemes.is_empty() {
            conditions.set_schemes(self.schemes.clone());
        }
        if !self.folders.is_empty() {
            conditions.set_folders(self.folders.clone());
        }
        conditions.set_capabilities(self.capabilities.clone());
        if let Some(ref selection_count) = self.selection_count {
            conditions.set_selection_count(selection_count);
        }
        conditions
    }

    /// A one-profile action carrying the requested conditions.
    pub fn action(&self) -> Action {
        let mut profile = Profile::new(&self.command, &self.parameters);
        profile.conditions = self.conditions();
        if self.terminal {
            profile.execution_mode = ExecutionMode::Terminal;
        }

        let mut action = Action::new("command-line", &self.command);
        action.conditions = profile.conditions.clone();
        match self.target {
            Target::Selection | Target::Any => {}
            Target::Background | Target::Location => action.targets.location = true,
            Target::Toolbar => action.targets.toolbar = true,
        }
        action.with_profile(profile)
    }
}

/// Checks the action built from `options` and starts, or prints, its
/// command lines. Returns `false` when nothing is run.
pub fn run_action<S: SelectedItem>(options: &RunOptions, selection: &[S], runtime: &Runtime) -> bool {
    let action = options.action();
    let profile = if options.force {
        action.profiles.first()
    } else {
        action.candidate_profile(options.target, selection, runtime)
    };
    let Some(profile) = profile else {
        eprintln!("{}", gettext("The command does not apply to these files."));
        return false;
    };

    let tokens = TokenSet::new_from_selection(selection);
    if options.dry_run {
        for command_line in tokens.command_lines(profile) {
            println!("{}", command_line.command);
        }
    } else {
        execute(&tokens, profile, runtime);
    }
    true
}

mod imp {
    use super::*;
    use crate::{debug::set_debug_flags, selection::SelectedInfo};
    use std::{
        cell::{Cell, RefCell},
        ops::ControlFlow,
        str::FromStr,
    };

    #[derive(Default)]
    pub struct RunApplication {
        pub options: RefCell<RunOptions>,
        pub failed: Cell<bool>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for RunApplication {
        const NAME: &'static str = "FmaRunApplication";
        type Type = super::RunApplication;
        type ParentType = gio::Application;
    }

    impl ObjectImpl for RunApplication {
        fn constructed(&self) {
            self.parent_constructed();

            let app = self.obj();
            app.add_main_option(
                "debug",
                b'd'.into(),
                glib::OptionFlags::NONE,
                glib::OptionArg::String,
                &gettext("Specify debug flags to use"),
                Some("FLAGS"),
            );
            app.add_main_option(
                "command",
                b'c'.into(),
                glib::OptionFlags::NONE,
                glib::OptionArg::String,
                &gettext("Program to run"),
                Some("PATH"),
            );
            app.add_main_option(
                "parameters",
                b'p'.into(),
                glib::OptionFlags::NONE,
                glib::OptionArg::String,
                &gettext("Parameters template, with %-placeholders"),
                Some("TEMPLATE"),
            );
            for (name, short, description) in [
                ("basename", b'b', gettext("Basename pattern, may be negated with '!'")),
                ("mimetype", b'm', gettext("Mimetype pattern, may be negated with '!'")),
                ("scheme", b's', gettext("URI scheme, may be negated with '!'")),
                ("folder", b'f', gettext("Folder prefix or pattern, may be negated with '!'")),
                ("capability", b'\0', gettext("Required capability, may be negated with '!'")),
            ] {
                app.add_main_option(
                    name,
                    short.into(),
                    glib::OptionFlags::NONE,
                    glib::OptionArg::StringArray,
                    &description,
                    Some("PATTERN"),
                );
            }
            app.add_main_option(
                "selection-count",
                b'\0'.into(),
                glib::OptionFlags::NONE,
                glib::OptionArg::String,
                &gettext("Selection count constraint such as '>0' or '=1'"),
                Some("EXPR"),
            );
            app.add_main_option(
                "target",
                b't'.into(),
                glib::OptionFlags::NONE,
                glib::OptionArg::String,
                &gettext("Menu target: selection, background, toolbar, location or any"),
                Some("NAME"),
            );
            app.add_main_option(
                "terminal",
                b'\0'.into(),
                glib::OptionFlags::NONE,
                glib::OptionArg::None,
                &gettext("Run the command in a terminal"),
                None,
            );
            app.add_main_option(
                "dry-run",
                b'n'.into(),
                glib::OptionFlags::NONE,
                glib::OptionArg::None,
                &gettext("Print the command lines instead of running them"),
                None,
            );
            app.add_main_option(
                "force",
                b'\0'.into(),
                glib::OptionFlags::NONE,
                glib::OptionArg::None,
                &gettext("Run even when the conditions do not match"),
                None,
            );
        }
    }

    impl ApplicationImpl for RunApplication {
        fn activate(&self) {
            eprintln!("{}", gettext("No files given."));
            self.failed.set(true);
        }

        fn open(&self, files: &[gio::File], _hint: &str) {
            let selection: Vec<SelectedInfo> = files
                .iter()
                .filter_map(|file| match SelectedInfo::from_file(file) {
                    Ok(info) => Some(info),
                    Err(error) => {
                        eprintln!(
                            "{}",
                            gettext("Cannot read {file}: {error}")
                                .replace("{file}", &file.uri())
                                .replace("{error}", error.message())
                        );
                        None
                    }
                })
                .collect();

            let runtime = Runtime::from_settings();
            let ran = run_action(&self.options.borrow(), &selection, &runtime);
            self.failed.set(!ran);
        }

        fn handle_local_options(&self, options: &glib::VariantDict) -> ControlFlow<glib::ExitCode> {
            if let Some(debug_flags) = get_string_option(options, "debug") {
                set_debug_flags(&debug_flags);
            }

            let Some(command) = get_string_option(options, "command") else {
                eprintln!("{}", gettext("No command given, use --command."));
                return ControlFlow::Break(glib::ExitCode::FAILURE);
            };

            let target = match get_string_option(options, "target") {
                Some(name) => match Target::from_str(&name) {
                    Ok(target) => target,
                    Err(_) => {
                        eprintln!(
                            "{}",
                            gettext("Unknown target {target}.").replace("{target}", &name)
                        );
                        return ControlFlow::Break(glib::ExitCode::FAILURE);
                    }
                },
                None => Target::default(),
            };

            self.options.replace(RunOptions {
                command,
                parameters: get_string_option(options, "parameters").unwrap_or_default(),
                basenames: get_strv_option(options, "basename"),
                mimetypes: get_strv_option(options, "mimetype"),
                schemes: get_strv_option(options, "scheme"),
                folders: get_strv_option(options, "folder"),
                capabilities: get_strv_option(options, "capability"),
                selection_count: get_string_option(options, "selection-count"),
                target,
                terminal: options.contains("terminal"),
                dry_run: options.contains("dry-run"),
                force: options.contains("force"),
            });

            self.parent_handle_local_options(options)
        }
    }

    fn get_string_option(options: &glib::VariantDict, key: &str) -> Option<String> {
        options
            .lookup_value(key, Some(&String::static_variant_type()))
            .and_then(|v| v.get())
    }

    fn get_strv_option(options: &glib::VariantDict, key: &str) -> Vec<String> {
        options
            .lookup_value(key, Some(&Vec::<String>::static_variant_type()))
            .and_then(|v| v.get())
            .unwrap_or_default()
    }
}

glib::wrapper! {
    pub struct RunApplication(ObjectSubclass<imp::RunApplication>)
        @extends gio::Application,
        @implements gio::ActionMap, gio::ActionGroup;
}

impl RunApplication {
    pub fn new() -> Self {
        glib::Object::builder()
            .property("application-id", "org.filemanager-actions.run")
            .property(
                "flags",
                gio::ApplicationFlags::HANDLES_OPEN | gio::ApplicationFlags::NON_UNIQUE,
            )
            .build()
    }

    /// The status to exit with once [`ApplicationExtManual::run`] returned.
    pub fn exit_code(&self) -> glib::ExitCode {
        if self.imp().failed.get() {
            glib::ExitCode::FAILURE
        } else {
            glib::ExitCode::SUCCESS
        }
    }
}

impl Default for RunApplication {
    fn default() -> Self {
        Self::new()
    }
}
