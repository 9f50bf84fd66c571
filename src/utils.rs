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

use std::fmt;

/// A failure ready to be shown to a user: a short message plus optional
/// details.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorMessage {
    pub message: String,
    pub secondary_text: Option<String>,
}

impl ErrorMessage {
    pub fn new(message: String, secondary_text: Option<String>) -> Self {
        Self {
            message,
            secondary_text,
        }
    }

    pub fn with_error(message: String, error: &dyn fmt::Display) -> Self {
        Self {
            message,
            secondary_text: Some(error.to_string()),
        }
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.secondary_text {
            Some(ref secondary_text) => write!(f, "{}: {}", self.message, secondary_text),
            None => write!(f, "{}", self.message),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_error_message_display() {
        let error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        assert_eq!(
            ErrorMessage::with_error("Unable to execute command.".to_owned(), &error).to_string(),
            "Unable to execute command.: no such file"
        );
        assert_eq!(
            ErrorMessage::new("No valid command given.".to_owned(), None).to_string(),
            "No valid command given."
        );
    }
}
