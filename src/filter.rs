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

use glib::translate::{from_glib_full, ToGlibPtr};
use glob::{MatchOptions, Pattern};

/// A match pattern, optionally prefixed with `!` to invert its effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Assertion<'a> {
    pub pattern: &'a str,
    pub positive: bool,
}

impl<'a> Assertion<'a> {
    pub fn parse(text: &'a str) -> Self {
        let text = text.trim();
        match text.strip_prefix('!') {
            Some(pattern) => Self {
                pattern: pattern.trim_start(),
                positive: false,
            },
            None => Self {
                pattern: text,
                positive: true,
            },
        }
    }
}

/// Combines a list of assertions against one value.
///
/// The value must satisfy at least one positive assertion (a list without
/// positive assertions is satisfied on that side) and must not match any
/// negative one. A negative match wins over an already found positive match.
pub fn matches_assertions<'a, I>(patterns: I, is_match: impl Fn(&str) -> bool) -> bool
where
    I: IntoIterator<Item = &'a String>,
{
    let mut has_positive = false;
    let mut matched = false;
    for assertion in patterns.into_iter().map(|p| Assertion::parse(p)) {
        if assertion.positive {
            has_positive = true;
            if !matched && is_match(assertion.pattern) {
                matched = true;
            }
        } else if is_match(assertion.pattern) {
            return false;
        }
    }
    matched || !has_positive
}

/// Shell-style wildcard match where only `*` and `?` are special, as with
/// `g_pattern_match_simple`. Brackets match literally and runs of `*`
/// collapse into one.
pub fn fnmatch(pattern: &str, string: &str, case_sens: bool) -> bool {
    let options = MatchOptions {
        case_sensitive: case_sens,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };
    let mut escaped = String::with_capacity(pattern.len());
    for ch in pattern.chars() {
        match ch {
            '[' | ']' => escaped.push_str(&Pattern::escape(ch.encode_utf8(&mut [0; 4]))),
            '*' if escaped.ends_with('*') => {}
            _ => escaped.push(ch),
        }
    }
    match Pattern::new(&escaped) {
        Ok(glob) => glob.matches_with(string, options),
        Err(_) if case_sens => pattern == string,
        Err(_) => pattern.to_lowercase() == string.to_lowercase(),
    }
}

/// Compatibility-decomposes and recomposes `text` the way GLib does with
/// `G_NORMALIZE_ALL`, so that visually equal paths compare equal.
pub fn normalize(text: &str) -> String {
    unsafe {
        let ptr =
            glib::ffi::g_utf8_normalize(text.to_glib_none().0, -1, glib::ffi::G_NORMALIZE_ALL);
        if ptr.is_null() {
            text.to_owned()
        } else {
            from_glib_full::<_, glib::GString>(ptr).into()
        }
    }
}
