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

use gio::prelude::*;
use std::{cell::OnceCell, path::Path};

const SELECTED_INFO_ATTRIBUTES: &str = "standard::type,access::can-read,access::can-write,access::can-execute,owner::user";
const CONTENT_TYPE_ATTRIBUTES: &str = "standard::content-type,standard::fast-content-type";

/// One entry of a file-manager selection, as seen by the candidacy and
/// token engines.
pub trait SelectedItem {
    fn uri(&self) -> &str;
    fn scheme(&self) -> &str;
    fn hostname(&self) -> Option<&str>;
    fn username(&self) -> Option<&str>;
    fn port(&self) -> Option<u16>;

    /// Local pathname for `file` URIs, unescaped URI path otherwise.
    fn filename(&self) -> &str;
    fn dirname(&self) -> &str;
    fn basename(&self) -> &str;

    /// `None` when the mimetype cannot be determined.
    fn mimetype(&self) -> Option<&str>;

    fn is_directory(&self) -> bool;
    fn is_readable(&self) -> bool;
    fn is_writable(&self) -> bool;
    fn is_executable(&self) -> bool;
    fn owner(&self) -> Option<&str>;

    fn is_local(&self) -> bool {
        self.scheme() == "file"
    }
}

#[derive(Debug, Clone, Default)]
struct UriParts {
    scheme: String,
    hostname: Option<String>,
    username: Option<String>,
    port: Option<u16>,
    filename: String,
}

impl UriParts {
    fn parse(uri: &str) -> Self {
        let mut parts = match glib::Uri::parse(uri, glib::UriFlags::NONE) {
            Ok(parsed) => Self {
                scheme: parsed.scheme().to_string(),
                hostname: parsed.host().map(String::from).filter(|h| !h.is_empty()),
                username: parsed.user().map(String::from),
                port: u16::try_from(parsed.port()).ok().filter(|p| *p > 0),
                filename: parsed.path().to_string(),
            },
            Err(_) => Self {
                scheme: glib::uri_parse_scheme(uri)
                    .map(String::from)
                    .unwrap_or_default(),
                ..Default::default()
            },
        };
        if parts.scheme == "file" {
            if let Ok((path, _)) = glib::filename_from_uri(uri) {
                parts.filename = path.to_string_lossy().into_owned();
            }
        }
        parts
    }
}

fn split_filename(filename: &str) -> (String, String) {
    let path = Path::new(filename);
    let basename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_owned());
    let dirname = path
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| {
            if filename.starts_with('/') {
                "/".to_owned()
            } else {
                ".".to_owned()
            }
        });
    (dirname, basename)
}

fn resolve_mimetype(location: &gio::File) -> Option<String> {
    let info = location
        .query_info(
            CONTENT_TYPE_ATTRIBUTES,
            gio::FileQueryInfoFlags::NONE,
            gio::Cancellable::NONE,
        )
        .ok()?;
    let content_type = info
        .content_type()
        .or_else(|| info.attribute_string("standard::fast-content-type"))?;
    gio::content_type_get_mime_type(&content_type).map(String::from)
}

/// The concrete selected item, built either from a GIO location or from
/// attributes already known to the host file manager.
#[derive(Debug)]
pub struct SelectedInfo {
    uri: String,
    parts: UriParts,
    dirname: String,
    basename: String,
    location: Option<gio::File>,
    mimetype: OnceCell<Option<String>>,
    is_directory: bool,
    can_read: bool,
    can_write: bool,
    can_execute: bool,
    owner: Option<String>,
}

impl SelectedInfo {
    pub fn from_file(file: &gio::File) -> Result<Self, glib::Error> {
        let info = file.query_info(
            SELECTED_INFO_ATTRIBUTES,
            gio::FileQueryInfoFlags::NONE,
            gio::Cancellable::NONE,
        )?;
        let mut selected = SelectedInfoBuilder::new(&file.uri())
            .directory(info.file_type() == gio::FileType::Directory)
            .readable(info.boolean("access::can-read"))
            .writable(info.boolean("access::can-write"))
            .executable(info.boolean("access::can-execute"))
            .build();
        selected.owner = info.attribute_string("owner::user").map(String::from);
        selected.location = Some(file.clone());
        Ok(selected)
    }

    pub fn from_uri(uri: &str) -> Result<Self, glib::Error> {
        Self::from_file(&gio::File::for_uri(uri))
    }

    /// Builds a selection from URIs, skipping (with a warning) those whose
    /// attributes cannot be queried.
    pub fn list_from_uris<S: AsRef<str>>(uris: &[S]) -> Vec<Self> {
        uris.iter()
            .filter_map(|uri| match Self::from_uri(uri.as_ref()) {
                Ok(info) => Some(info),
                Err(error) => {
                    eprintln!("Cannot query {}: {}", uri.as_ref(), error.message());
                    None
                }
            })
            .collect()
    }
}

impl SelectedItem for SelectedInfo {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn scheme(&self) -> &str {
        &self.parts.scheme
    }

    fn hostname(&self) -> Option<&str> {
        self.parts.hostname.as_deref()
    }

    fn username(&self) -> Option<&str> {
        self.parts.username.as_deref()
    }

    fn port(&self) -> Option<u16> {
        self.parts.port
    }

    fn filename(&self) -> &str {
        &self.parts.filename
    }

    fn dirname(&self) -> &str {
        &self.dirname
    }

    fn basename(&self) -> &str {
        &self.basename
    }

    fn mimetype(&self) -> Option<&str> {
        self.mimetype
            .get_or_init(|| self.location.as_ref().and_then(resolve_mimetype))
            .as_deref()
    }

    fn is_directory(&self) -> bool {
        self.is_directory
    }

    fn is_readable(&self) -> bool {
        self.can_read
    }

    fn is_writable(&self) -> bool {
        self.can_write
    }

    fn is_executable(&self) -> bool {
        self.can_execute
    }

    fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }
}

/// Builds a [`SelectedInfo`] without any I/O. A mimetype which is not
/// given is resolved lazily through GIO on first use.
#[derive(Debug, Default)]
pub struct SelectedInfoBuilder {
    uri: String,
    mimetype: Option<String>,
    is_directory: bool,
    can_read: bool,
    can_write: bool,
    can_execute: bool,
    owner: Option<String>,
}

impl SelectedInfoBuilder {
    pub fn new(uri: &str) -> Self {
        Self {
            uri: uri.to_owned(),
            can_read: true,
            ..Default::default()
        }
    }

    pub fn mimetype(mut self, mimetype: &str) -> Self {
        self.mimetype = Some(mimetype.to_owned());
        self
    }

    pub fn directory(mut self, is_directory: bool) -> Self {
        self.is_directory = is_directory;
        self
    }

    pub fn readable(mut self, can_read: bool) -> Self {
        self.can_read = can_read;
        self
    }

    pub fn writable(mut self, can_write: bool) -> Self {
        self.can_write = can_write;
        self
    }

    pub fn executable(mut self, can_execute: bool) -> Self {
        self.can_execute = can_execute;
        self
    }

    pub fn owner(mut self, owner: &str) -> Self {
        self.owner = Some(owner.to_owned());
        self
    }

    pub fn build(self) -> SelectedInfo {
        let parts = UriParts::parse(&self.uri);
        let (dirname, basename) = split_filename(&parts.filename);
        let mimetype = OnceCell::new();
        let location = match self.mimetype {
            Some(mimetype_value) => {
                let _ = mimetype.set(Some(mimetype_value));
                None
            }
            None => Some(gio::File::for_uri(&self.uri)),
        };
        SelectedInfo {
            uri: self.uri,
            parts,
            dirname,
            basename,
            location,
            mimetype,
            is_directory: self.is_directory,
            can_read: self.can_read,
            can_write: self.can_write,
            can_execute: self.can_execute,
            owner: self.owner,
        }
    }
}
