//! Rendering of search outcomes into the text block returned to the caller.

use crate::core::search::{MatchLine, SearchError};

/// The single text block handed back over the protocol, with the flag that
/// tells the caller whether it describes a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedResult {
    pub text: String,
    pub is_error: bool,
}

/// Render a completed search. Pure string work, no I/O.
pub fn format_matches(keyword: &str, path: &str, matches: &[MatchLine]) -> FormattedResult {
    if matches.is_empty() {
        return FormattedResult {
            text: format!("No matches found for \"{}\" in {}", keyword, path),
            is_error: false,
        };
    }

    let body = matches
        .iter()
        .map(|m| format!("Line {}: {}", m.line_number, m.content))
        .collect::<Vec<_>>()
        .join("\n");

    FormattedResult {
        text: format!(
            "Found {} match(es) for \"{}\" in {}:\n\n{}",
            matches.len(),
            keyword,
            path,
            body
        ),
        is_error: false,
    }
}

/// Render a failed search.
pub fn format_error(err: &SearchError) -> FormattedResult {
    FormattedResult {
        text: format!("Error: {}", err),
        is_error: true,
    }
}
