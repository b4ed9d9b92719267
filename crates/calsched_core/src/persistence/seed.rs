//! Quote seed source reader.

use super::PersistenceError;
use std::path::Path;

/// Reads the quote seed file, one quote per line.
///
/// Returns `Ok(None)` when the file does not exist. Line endings (`\n` or
/// `\r\n`) are stripped; blank lines are kept so numbering stays aligned
/// with day-of-year.
pub fn read_quote_seed(path: &Path) -> Result<Option<Vec<String>>, PersistenceError> {
    if !path.is_file() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(content.lines().map(str::to_string).collect()))
}

#[cfg(test)]
mod tests {
    use super::read_quote_seed;

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let lines = read_quote_seed(&dir.path().join("absent.txt")).unwrap();
        assert!(lines.is_none());
    }

    #[test]
    fn crlf_and_blank_lines_keep_numbering() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.txt");
        std::fs::write(&path, "first\r\n\r\nthird\n").unwrap();
        let lines = read_quote_seed(&path).unwrap().unwrap();
        assert_eq!(lines, vec!["first", "", "third"]);
    }
}
