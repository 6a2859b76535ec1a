//! Line-oriented keyword search over a single file.

use std::fs;
use std::io::ErrorKind;

use thiserror::Error;

/// Why a search could not be carried out. The whole operation fails with
/// exactly one of these; no partial results are ever returned.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("file not found: {path}")]
    NotFound { path: String },

    #[error("permission denied reading {path}")]
    PermissionDenied { path: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8 text")]
    Decode { path: String },
}

/// A single matching line: 1-based position in the file and the original
/// line with surrounding whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchLine {
    pub line_number: usize,
    pub content: String,
}

/// Search `path` for lines containing `keyword` as a substring.
///
/// The file is buffered whole and split on `'\n'`. A trailing newline
/// therefore produces a final empty segment that participates in line
/// numbering; the keyword is validated non-empty upstream, so that segment
/// can never itself match.
///
/// Matches come back in file order. When `case_sensitive` is false both the
/// keyword and each line are lower-cased before the substring test; the
/// reported content is always the original line, trimmed.
pub fn search(
    path: &str,
    keyword: &str,
    case_sensitive: bool,
) -> Result<Vec<MatchLine>, SearchError> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SearchError::NotFound {
            path: path.to_string(),
        },
        ErrorKind::PermissionDenied => SearchError::PermissionDenied {
            path: path.to_string(),
        },
        _ => SearchError::Io {
            path: path.to_string(),
            source: e,
        },
    })?;

    let text = String::from_utf8(bytes).map_err(|_| SearchError::Decode {
        path: path.to_string(),
    })?;

    let needle = if case_sensitive {
        keyword.to_string()
    } else {
        keyword.to_lowercase()
    };

    let mut matches = Vec::new();
    for (idx, line) in text.split('\n').enumerate() {
        let hit = if case_sensitive {
            line.contains(needle.as_str())
        } else {
            line.to_lowercase().contains(needle.as_str())
        };
        if hit {
            matches.push(MatchLine {
                line_number: idx + 1,
                content: line.trim().to_string(),
            });
        }
    }

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fixture(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_case_insensitive_matches() {
        let file = fixture(b"alpha\nBeta\nalpha beta\n");
        let path = file.path().to_str().unwrap();

        let matches = search(path, "beta", false).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].line_number, 2);
        assert_eq!(matches[0].content, "Beta");
        assert_eq!(matches[1].line_number, 3);
        assert_eq!(matches[1].content, "alpha beta");
    }

    #[test]
    fn test_case_sensitive_matches_exact_only() {
        let file = fixture(b"alpha\nBeta\nalpha beta\n");
        let path = file.path().to_str().unwrap();

        let matches = search(path, "beta", true).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line_number, 3);
        assert_eq!(matches[0].content, "alpha beta");
    }

    #[test]
    fn test_case_insensitive_covers_all_casings() {
        let file = fixture(b"error here\nError there\nERROR everywhere\nfine\n");
        let path = file.path().to_str().unwrap();

        let matches = search(path, "ERROR", false).unwrap();
        let lines: Vec<usize> = matches.iter().map(|m| m.line_number).collect();
        assert_eq!(lines, vec![1, 2, 3]);
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let file = fixture(b"alpha\nbeta\n");
        let path = file.path().to_str().unwrap();

        let matches = search(path, "gamma", false).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_content_is_trimmed_but_numbering_is_original() {
        let file = fixture(b"  padded match  \nother\n\tmatch too\n");
        let path = file.path().to_str().unwrap();

        let matches = search(path, "match", false).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].line_number, 1);
        assert_eq!(matches[0].content, "padded match");
        assert_eq!(matches[1].line_number, 3);
        assert_eq!(matches[1].content, "match too");
    }

    #[test]
    fn test_matches_in_ascending_line_order() {
        let file = fixture(b"x\ny x\nz\nx again\nx\n");
        let path = file.path().to_str().unwrap();

        let matches = search(path, "x", true).unwrap();
        let lines: Vec<usize> = matches.iter().map(|m| m.line_number).collect();
        assert_eq!(lines, vec![1, 2, 4, 5]);
        assert!(lines.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let file = fixture(b"one\ntwo\nthree two\n");
        let path = file.path().to_str().unwrap();

        let first = search(path, "two", false).unwrap();
        let second = search(path, "two", false).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_file_without_trailing_newline() {
        let file = fixture(b"first hit\nsecond hit");
        let path = file.path().to_str().unwrap();

        let matches = search(path, "hit", false).unwrap();
        let lines: Vec<usize> = matches.iter().map(|m| m.line_number).collect();
        assert_eq!(lines, vec![1, 2]);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = search("/no/such/file", "x", false).unwrap_err();
        assert!(matches!(err, SearchError::NotFound { .. }));
    }

    #[test]
    fn test_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_str().unwrap();

        let err = search(path, "x", false).unwrap_err();
        assert!(matches!(err, SearchError::Io { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_decode_error() {
        let file = fixture(&[0xff, 0xfe, b'\n', 0x80]);
        let path = file.path().to_str().unwrap();

        let err = search(path, "x", false).unwrap_err();
        assert!(matches!(err, SearchError::Decode { .. }));
    }
}
