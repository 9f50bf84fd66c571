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

//! Substitution of `%x` placeholders in command templates.

mod exec;
pub mod template;

pub use exec::{execute, CommandLine};
pub use template::{is_singular, Template};

use crate::{debug::debug, selection::SelectedItem};
use template::{Chunk, Field, Scalar};

fn shell_quote(value: &str) -> String {
    glib::shell_quote(value).to_string_lossy().into_owned()
}

/// Splits `name.ext` at its last dot. Names without a dot, or whose only
/// dot is the leading one, have no extension.
fn split_extension(basename: &str) -> (&str, &str) {
    match basename.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => (stem, extension),
        _ => (basename, ""),
    }
}

/// The per-item values of one field, plus their shell-quoted
/// space-separated concatenation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenList {
    pub values: Vec<String>,
    pub joined: String,
}

impl TokenList {
    fn new(values: Vec<String>) -> Self {
        let joined = values
            .iter()
            .map(|v| shell_quote(v))
            .collect::<Vec<_>>()
            .join(" ");
        Self { values, joined }
    }

    fn item(&self, index: usize) -> &str {
        self.values.get(index).map(String::as_str).unwrap_or_default()
    }
}

/// Every value a template may refer to, computed once per selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenSet {
    pub count: usize,
    pub uris: TokenList,
    pub filenames: TokenList,
    pub dirnames: TokenList,
    pub basenames: TokenList,
    pub basenames_without_extension: TokenList,
    pub extensions: TokenList,
    pub mimetypes: TokenList,
    pub hostname: Option<String>,
    pub username: Option<String>,
    pub port: Option<u16>,
    pub scheme: Option<String>,
}

fn collect<S, F>(selection: &[S], value: F) -> TokenList
where
    F: Fn(&S) -> String,
{
    TokenList::new(selection.iter().map(value).collect())
}

pub fn build_token_set<S: SelectedItem>(selection: &[S]) -> TokenSet {
    TokenSet::new_from_selection(selection)
}

impl TokenSet {
    pub fn new_from_selection<S: SelectedItem>(selection: &[S]) -> Self {
        let first = selection.first();
        let token_set = Self {
            count: selection.len(),
            uris: collect(selection, |item| item.uri().to_owned()),
            filenames: collect(selection, |item| item.filename().to_owned()),
            dirnames: collect(selection, |item| item.dirname().to_owned()),
            basenames: collect(selection, |item| item.basename().to_owned()),
            basenames_without_extension: collect(selection, |item| {
                split_extension(item.basename()).0.to_owned()
            }),
            extensions: collect(selection, |item| split_extension(item.basename()).1.to_owned()),
            mimetypes: collect(selection, |item| item.mimetype().unwrap_or_default().to_owned()),
            hostname: first.and_then(|item| item.hostname()).map(str::to_owned),
            username: first.and_then(|item| item.username()).map(str::to_owned),
            port: first.and_then(|item| item.port()).filter(|port| *port > 0),
            scheme: first.map(|item| item.scheme().to_owned()),
        };
        debug!('t', "Token set for {} items", token_set.count);
        token_set
    }

    fn list(&self, field: Field) -> &TokenList {
        match field {
            Field::Basename => &self.basenames,
            Field::Dirname => &self.dirnames,
            Field::Filename => &self.filenames,
            Field::Mimetype => &self.mimetypes,
            Field::Uri => &self.uris,
            Field::BasenameWithoutExtension => &self.basenames_without_extension,
            Field::Extension => &self.extensions,
        }
    }

    fn scalar(&self, scalar: Scalar) -> Option<String> {
        match scalar {
            Scalar::Count => Some(self.count.to_string()),
            Scalar::Hostname => self.hostname.clone(),
            Scalar::Username => self.username.clone(),
            Scalar::Port => self.port.map(|port| port.to_string()),
            Scalar::Scheme => self.scheme.clone(),
        }
    }

    /// Substitutes every placeholder of `template`. Singular placeholders
    /// take the item at `index`; plural ones take the whole list. Values
    /// are shell-quoted unless `utf8` asks for display text.
    pub fn expand(&self, template: &str, index: usize, utf8: bool) -> String {
        self.expand_template(&Template::parse(template), index, utf8)
    }

    pub(crate) fn expand_template(&self, template: &Template, index: usize, utf8: bool) -> String {
        let quote = |value: &str| {
            if utf8 {
                value.to_owned()
            } else {
                shell_quote(value)
            }
        };

        let mut result = String::new();
        for chunk in template.chunks() {
            match chunk {
                Chunk::Char(ch) => result.push(*ch),
                Chunk::Text(text) => result.push_str(text),
                Chunk::List {
                    field,
                    plural: false,
                } => result.push_str(&quote(self.list(*field).item(index))),
                Chunk::List {
                    field,
                    plural: true,
                } => {
                    let list = self.list(*field);
                    if utf8 {
                        result.push_str(&list.values.join(" "));
                    } else {
                        result.push_str(&list.joined);
                    }
                }
                Chunk::Scalar(scalar @ (Scalar::Count | Scalar::Port)) => {
                    if let Some(value) = self.scalar(*scalar) {
                        result.push_str(&value);
                    }
                }
                Chunk::Scalar(scalar) => {
                    if let Some(value) = self.scalar(*scalar).filter(|v| !v.is_empty()) {
                        result.push_str(&quote(&value));
                    }
                }
                Chunk::Mode { .. } | Chunk::Dropped => {}
            }
        }
        debug!('t', "Expanded item {index} to {result:?}");
        result
    }

    /// Expansion for labels and previews: first item, nothing quoted.
    pub fn display(&self, template: &str) -> String {
        self.expand(template, 0, true)
    }
}
