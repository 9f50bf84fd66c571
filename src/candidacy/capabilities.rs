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
    filter::Assertion, runtime::Runtime, selection::SelectedItem, types::Capability,
};
use std::str::FromStr;

fn has_capability<S: SelectedItem>(item: &S, capability: Capability, runtime: &Runtime) -> bool {
    match capability {
        Capability::Owner => item.owner() == Some(runtime.user_name()),
        Capability::Readable => item.is_readable(),
        Capability::Writable => item.is_writable(),
        Capability::Executable => item.is_executable(),
        Capability::Local => item.is_local(),
    }
}

/// Every item must satisfy every declared capability; there is no OR
/// between the entries of the list.
pub(super) fn is_valid_capabilities<S: SelectedItem>(
    capabilities: &[String],
    selection: &[S],
    runtime: &Runtime,
) -> bool {
    let assertions: Vec<Assertion> = capabilities
        .iter()
        .map(|c| Assertion::parse(c))
        .filter(|a| !a.pattern.is_empty())
        .collect();
    selection.iter().all(|item| {
        assertions.iter().all(|assertion| {
            match Capability::from_str(assertion.pattern) {
                Ok(capability) => has_capability(item, capability, runtime) == assertion.positive,
                Err(_) => {
                    eprintln!("Unknown capability '{}'", assertion.pattern);
                    false
                }
            }
        })
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::selection::{SelectedInfo, SelectedInfoBuilder};

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn item(writable: bool) -> SelectedInfo {
        SelectedInfoBuilder::new("file:///srv/data.csv")
            .mimetype("text/csv")
            .readable(true)
            .writable(writable)
            .owner("alice")
            .build()
    }

    #[test]
    fn test_all_items_all_capabilities() {
        let runtime = Runtime::default();
        let capabilities = list(&["Readable", "Writable"]);
        assert!(is_valid_capabilities(
            &capabilities,
            &[item(true), item(true)],
            &runtime
        ));
        assert!(!is_valid_capabilities(
            &capabilities,
            &[item(true), item(false)],
            &runtime
        ));
    }

    #[test]
    fn test_negated_capability() {
        let runtime = Runtime::default();
        assert!(is_valid_capabilities(&list(&["!Writable"]), &[item(false)], &runtime));
        assert!(!is_valid_capabilities(&list(&["!Local"]), &[item(false)], &runtime));
        assert!(is_valid_capabilities(&list(&["!Executable", "Local"]), &[item(true)], &runtime));
    }

    #[test]
    fn test_owner() {
        let selection = [item(true)];
        let alice = Runtime::default().with_user_name("alice");
        let bob = Runtime::default().with_user_name("bob");
        assert!(is_valid_capabilities(&list(&["Owner"]), &selection, &alice));
        assert!(!is_valid_capabilities(&list(&["Owner"]), &selection, &bob));
        assert!(is_valid_capabilities(&list(&["!Owner"]), &selection, &bob));
    }

    #[test]
    fn test_unknown_capability() {
        let runtime = Runtime::default();
        assert!(!is_valid_capabilities(&list(&["Shiny"]), &[item(true)], &runtime));
        assert!(is_valid_capabilities(&list(&[]), &[item(false)], &runtime));
    }
}
