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

use winnow::{
    Result as PResult,
    combinator::{alt, opt, preceded, repeat},
    prelude::*,
    stream::Accumulate,
    token::any,
};

/// A per-item value, substituted either for one item or joined for all.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Field {
    Basename,
    Dirname,
    Filename,
    Mimetype,
    Uri,
    BasenameWithoutExtension,
    Extension,
}

/// A value taken once for the whole selection.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Scalar {
    Count,
    Hostname,
    Username,
    Port,
    Scheme,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Chunk {
    Char(char),
    Text(String),
    List { field: Field, plural: bool },
    Scalar(Scalar),
    /// `%o` and `%O`: no output, only decide the iteration mode.
    Mode { plural: bool },
    Dropped,
}

impl Chunk {
    fn from_code(code: char) -> Self {
        let list = |field| Chunk::List {
            field,
            plural: code.is_ascii_uppercase(),
        };
        match code {
            '%' => Chunk::Char('%'),
            'b' | 'B' => list(Field::Basename),
            'd' | 'D' => list(Field::Dirname),
            'f' | 'F' => list(Field::Filename),
            'm' | 'M' => list(Field::Mimetype),
            'u' | 'U' => list(Field::Uri),
            'w' | 'W' => list(Field::BasenameWithoutExtension),
            'x' | 'X' => list(Field::Extension),
            'c' => Chunk::Scalar(Scalar::Count),
            'h' => Chunk::Scalar(Scalar::Hostname),
            'n' => Chunk::Scalar(Scalar::Username),
            'p' => Chunk::Scalar(Scalar::Port),
            's' => Chunk::Scalar(Scalar::Scheme),
            'o' => Chunk::Mode { plural: false },
            'O' => Chunk::Mode { plural: true },
            _ => Chunk::Dropped,
        }
    }
}

fn placeholder(input: &mut &str) -> PResult<Chunk> {
    preceded('%', opt(any))
        .map(|code: Option<char>| code.map_or(Chunk::Dropped, Chunk::from_code))
        .parse_next(input)
}

fn template(input: &mut &str) -> PResult<Template> {
    repeat(0.., alt((placeholder, any.map(Chunk::Char)))).parse_next(input)
}

#[derive(PartialEq, Eq, Debug, Default)]
pub struct Template(pub Vec<Chunk>);

impl Template {
    pub fn parse(template_string: &str) -> Self {
        template
            .parse(template_string)
            .unwrap_or_else(|_| Self(vec![Chunk::Text(template_string.to_owned())]))
    }

    /// The first placeholder deciding the iteration mode wins; a template
    /// without one runs once.
    pub fn is_singular(&self) -> bool {
        self.0
            .iter()
            .find_map(|chunk| match chunk {
                Chunk::List { plural, .. } | Chunk::Mode { plural } => Some(!plural),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.0
    }
}

impl Accumulate<Chunk> for Template {
    fn initial(capacity: Option<usize>) -> Self {
        Self(match capacity {
            Some(capacity) => Vec::with_capacity(capacity.min(100)),
            None => Vec::new(),
        })
    }

    fn accumulate(&mut self, chunk: Chunk) {
        match (self.0.last_mut(), chunk) {
            (_, Chunk::Dropped) => {}
            (Some(last @ &mut Chunk::Char(ch0)), Chunk::Char(ch)) => {
                let _ = std::mem::replace(last, Chunk::Text(format!("{ch0}{ch}")));
            }
            (Some(Chunk::Text(s0)), Chunk::Char(ch)) => s0.push(ch),
            (_, c) => self.0.push(c),
        }
    }
}

pub fn is_singular(template: &str) -> bool {
    Template::parse(template).is_singular()
}
