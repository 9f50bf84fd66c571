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

//! The pattern-list predicates: basenames, mimetypes, schemes and folders.

use crate::{
    context::Conditions,
    filter::{fnmatch, matches_assertions, normalize},
    selection::SelectedItem,
    types::Target,
};
use std::collections::HashSet;

const ALL_FILES_MIMETYPE: &str = "all/allfiles";

fn is_single_wildcard(patterns: &[String], wildcard: &str) -> bool {
    matches!(patterns, [only] if only.trim() == wildcard)
}

fn is_wildcard(part: &str) -> bool {
    part == "*" || part == "all"
}

/// Matches one `group/subgroup` pattern against an item's mimetype.
pub fn mimetype_matches(pattern: &str, mimetype: &str, is_directory: bool) -> bool {
    if pattern.eq_ignore_ascii_case(ALL_FILES_MIMETYPE) {
        return !is_directory;
    }
    let (pattern_group, pattern_subgroup) = match pattern.split_once('/') {
        Some((group, subgroup)) => (group, Some(subgroup)),
        None => (pattern, None),
    };
    let (group, subgroup) = mimetype.split_once('/').unwrap_or((mimetype, ""));

    (is_wildcard(pattern_group) || pattern_group.eq_ignore_ascii_case(group))
        && pattern_subgroup
            .is_none_or(|sub| is_wildcard(sub) || sub.eq_ignore_ascii_case(subgroup))
}

pub(super) fn is_valid_basenames<S: SelectedItem>(conditions: &Conditions, selection: &[S]) -> bool {
    let basenames = conditions.basenames();
    if is_single_wildcard(basenames, "*") {
        return true;
    }
    let matchcase = conditions.matchcase();
    selection.iter().all(|item| {
        matches_assertions(basenames, |pattern| {
            fnmatch(pattern, item.basename(), matchcase)
        })
    })
}

pub(super) fn is_valid_mimetypes<S: SelectedItem>(conditions: &Conditions, selection: &[S]) -> bool {
    if conditions.all_mimetypes() {
        return true;
    }
    selection.iter().all(|item| match item.mimetype() {
        Some(mimetype) => matches_assertions(conditions.mimetypes(), |pattern| {
            mimetype_matches(pattern, mimetype, item.is_directory())
        }),
        None => {
            eprintln!("No mimetype for {}", item.uri());
            false
        }
    })
}

pub(super) fn is_valid_schemes<S: SelectedItem>(conditions: &Conditions, selection: &[S]) -> bool {
    let schemes = conditions.schemes();
    if is_single_wildcard(schemes, "*") {
        return true;
    }
    let mut seen = HashSet::new();
    selection
        .iter()
        .map(|item| item.scheme())
        .filter(|scheme| seen.insert(*scheme))
        .all(|scheme| {
            matches_assertions(schemes, |pattern| pattern == "*" || pattern == scheme)
        })
}

/// Background, toolbar and location passes test the current folder itself,
/// selection passes test the folder each item lives in.
pub(super) fn is_valid_folders<S: SelectedItem>(
    conditions: &Conditions,
    target: Target,
    selection: &[S],
) -> bool {
    let folders = conditions.folders();
    if is_single_wildcard(folders, "/") {
        return true;
    }
    let mut seen = HashSet::new();
    selection
        .iter()
        .map(|item| {
            if target.is_current_folder() {
                item.filename()
            } else {
                item.dirname()
            }
        })
        .filter(|folder| seen.insert(*folder))
        .all(|folder| {
            let folder = normalize(folder);
            matches_assertions(folders, |pattern| {
                let pattern = normalize(pattern);
                if pattern.contains('*') {
                    fnmatch(&pattern, &folder, true)
                } else {
                    folder.starts_with(&pattern)
                }
            })
        })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::selection::{SelectedInfo, SelectedInfoBuilder};
    use gio::prelude::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn file(uri: &str, mimetype: &str) -> SelectedInfo {
        SelectedInfoBuilder::new(uri).mimetype(mimetype).build()
    }

    #[test]
    fn test_mimetype_matches() {
        assert!(mimetype_matches("image/*", "image/png", false));
        assert!(mimetype_matches("image", "image/png", false));
        assert!(mimetype_matches("Image/PNG", "image/png", false));
        assert!(mimetype_matches("*/png", "image/png", false));
        assert!(mimetype_matches("all/all", "text/plain", false));
        assert!(!mimetype_matches("image/jpeg", "image/png", false));
        assert!(!mimetype_matches("text/*", "image/png", false));
        assert!(mimetype_matches("all/allfiles", "text/plain", false));
        assert!(!mimetype_matches("all/allfiles", "inode/directory", true));
    }

    #[test]
    fn test_basenames() {
        let selection = [file("file:///a/Report.PDF", "application/pdf")];
        let mut conditions = Conditions::default();
        conditions.set_basenames(list(&["*.pdf"]));
        assert!(!is_valid_basenames(&conditions, &selection));
        conditions.set_matchcase(false);
        assert!(is_valid_basenames(&conditions, &selection));
        conditions.set_basenames(list(&["!*.pdf"]));
        assert!(!is_valid_basenames(&conditions, &selection));
    }

    #[test]
    fn test_basenames_every_item() {
        let selection = [
            file("file:///a/x.txt", "text/plain"),
            file("file:///a/y.md", "text/markdown"),
        ];
        let mut conditions = Conditions::default();
        conditions.set_basenames(list(&["*.txt"]));
        assert!(!is_valid_basenames(&conditions, &selection));
        conditions.set_basenames(list(&["*.txt", "*.md"]));
        assert!(is_valid_basenames(&conditions, &selection));
    }

    #[test]
    fn test_mimetypes() {
        let selection = [
            file("file:///a/x.png", "image/png"),
            file("file:///a/y.jpg", "image/jpeg"),
        ];
        let mut conditions = Conditions::default();
        conditions.set_mimetypes(list(&["image/*", "!image/jpeg"]));
        assert!(!is_valid_mimetypes(&conditions, &selection));
        conditions.set_mimetypes(list(&["image/*"]));
        assert!(is_valid_mimetypes(&conditions, &selection));
    }

    #[test]
    fn test_unresolved_mimetype_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = gio::File::for_path(dir.path().join("missing.bin"));
        let selection = [SelectedInfoBuilder::new(&missing.uri()).build()];
        let mut conditions = Conditions::default();
        conditions.set_mimetypes(list(&["!image/*"]));
        assert!(!is_valid_mimetypes(&conditions, &selection));

        conditions.set_mimetypes(list(&["*/*"]));
        assert!(is_valid_mimetypes(&conditions, &selection));
    }

    #[test]
    fn test_schemes() {
        let selection = [
            file("sftp://host/a/x.txt", "text/plain"),
            file("sftp://host/a/y.txt", "text/plain"),
        ];
        let mut conditions = Conditions::default();
        assert!(!is_valid_schemes(&conditions, &selection));
        conditions.set_schemes(list(&["file", "sftp"]));
        assert!(is_valid_schemes(&conditions, &selection));
        conditions.set_schemes(list(&["*"]));
        assert!(is_valid_schemes(&conditions, &selection));
        conditions.set_schemes(list(&["!sftp"]));
        assert!(!is_valid_schemes(&conditions, &selection));
        conditions.set_schemes(list(&["s*"]));
        assert!(!is_valid_schemes(&conditions, &selection));
        conditions.set_schemes(list(&["sft?", "[fs]tp"]));
        assert!(!is_valid_schemes(&conditions, &selection));
    }

    #[test]
    fn test_folders() {
        let selection = [file("file:///home/user/docs/x.txt", "text/plain")];
        let mut conditions = Conditions::default();
        assert!(is_valid_folders(&conditions, Target::Selection, &selection));

        conditions.set_folders(list(&["/home/user"]));
        assert!(is_valid_folders(&conditions, Target::Selection, &selection));
        conditions.set_folders(list(&["/home/*/docs"]));
        assert!(is_valid_folders(&conditions, Target::Selection, &selection));
        conditions.set_folders(list(&["/tmp"]));
        assert!(!is_valid_folders(&conditions, Target::Selection, &selection));
        conditions.set_folders(list(&["/", "!/home/user/docs"]));
        assert!(!is_valid_folders(&conditions, Target::Selection, &selection));
    }

    #[test]
    fn test_folders_current_folder() {
        let current = [SelectedInfoBuilder::new("file:///home/user/docs")
            .mimetype("inode/directory")
            .directory(true)
            .build()];
        let mut conditions = Conditions::default();
        conditions.set_folders(list(&["/home/user/docs"]));
        assert!(is_valid_folders(&conditions, Target::Background, &current));
        assert!(!is_valid_folders(&conditions, Target::Selection, &current));
    }

    #[test]
    fn test_folders_normalized() {
        let selection = [file("file:///data/caf%C3%A9/x.txt", "text/plain")];
        let mut conditions = Conditions::default();
        conditions.set_folders(list(&["/data/cafe\u{0301}"]));
        assert!(is_valid_folders(&conditions, Target::Selection, &selection));
    }
}
