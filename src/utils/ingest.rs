//! Input ingestion: raw text and files into trimmed, non-blank lines

use crate::error::Result;
use memchr::memchr_iter;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Split raw text into trimmed lines, dropping blank ones
pub fn split_lines(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;

    for end in memchr_iter(b'\n', bytes).chain(std::iter::once(bytes.len())) {
        // Newline positions are always char boundaries
        let line = text[start..end].trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
        start = (end + 1).min(bytes.len());
    }

    lines
}

/// Read a UTF-8 text file into trimmed, non-blank lines
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let len = file.metadata()?.len();

    // Mapping an empty file fails on some platforms
    if len == 0 {
        log::warn!("{} is empty", path.display());
        return Ok(Vec::new());
    }

    // SAFETY: the map is read-only and dropped before returning
    let mmap = unsafe { Mmap::map(&file)? };
    let text = std::str::from_utf8(&mmap)?;
    let lines = split_lines(text);
    if lines.is_empty() {
        log::warn!("{} has no non-blank lines", path.display());
    }

    log::info!(
        "read {} non-blank lines ({} bytes) from {}",
        lines.len(),
        len,
        path.display()
    );

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_split_lines() {
        let lines = split_lines("first line\n\n  second  \r\nthird");
        assert_eq!(lines, vec!["first line", "second", "third"]);
    }

    #[test]
    fn test_split_lines_blank_input() {
        assert!(split_lines("").is_empty());
        assert!(split_lines("\n   \n\t\n").is_empty());
    }

    #[test]
    fn test_split_lines_trailing_newline() {
        assert_eq!(split_lines("only\n"), vec!["only"]);
    }

    #[test]
    fn test_read_lines() {
        let dir = std::env::temp_dir().join(format!("kwic_ingest_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("input.txt");
        fs::write(&path, "Once upon a time\n\nIt is my shift now\n").unwrap();

        let lines = read_lines(&path).unwrap();
        assert_eq!(lines, vec!["Once upon a time", "It is my shift now"]);

        let empty = dir.join("empty.txt");
        fs::write(&empty, "").unwrap();
        assert!(read_lines(&empty).unwrap().is_empty());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_read_lines_missing_file() {
        let missing = std::env::temp_dir().join("kwic_definitely_missing_input.txt");
        assert!(read_lines(&missing).is_err());
    }
}
