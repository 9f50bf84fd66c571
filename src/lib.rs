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

pub mod application;
pub mod candidacy;
pub mod config;
pub mod context;
pub mod debug;
pub mod filter;
pub mod migration;
pub mod options;
pub mod probe;
pub mod runtime;
pub mod selection;
pub mod spawn;
pub mod tokens;
pub mod types;
pub mod utils;

pub use candidacy::is_candidate;
pub use context::{Action, Conditions, Context, Menu, Profile};
pub use runtime::Runtime;
pub use selection::{SelectedInfo, SelectedItem};
pub use tokens::{build_token_set, execute, is_singular, TokenSet};
pub use types::Target;
