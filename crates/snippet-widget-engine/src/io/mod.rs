use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a fragment file: {0}")]
    NotAFile(PathBuf),
}

/// Read a stored fragment. A file that does not exist yet is an empty fragment.
pub fn read_fragment(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Ok(String::new());
    }
    if !path.is_file() {
        return Err(IoError::NotAFile(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Write a fragment, creating parent directories as needed
pub fn write_fragment(path: &Path, html: &str) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(path, html).map_err(IoError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_dir, create_test_file};

    #[test]
    fn test_read_fragment_success() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "snippet.html", "<!--basic--><p>x</p>");

        let content = read_fragment(&path).unwrap();
        assert_eq!(content, "<!--basic--><p>x</p>");
    }

    #[test]
    fn test_read_missing_fragment_is_empty() {
        let dir = create_test_dir();
        let content = read_fragment(&dir.path().join("missing.html")).unwrap();
        assert_eq!(content, "");
    }

    #[test]
    fn test_read_directory_fails() {
        let dir = create_test_dir();
        let result = read_fragment(dir.path());
        assert!(matches!(result, Err(IoError::NotAFile(_))));
    }

    #[test]
    fn test_write_fragment_creates_parent_directories() {
        let dir = create_test_dir();
        let path = dir.path().join("folder/subfolder/snippet.html");

        write_fragment(&path, "<p>nested</p>").unwrap();

        assert_eq!(read_fragment(&path).unwrap(), "<p>nested</p>");
        assert!(dir.path().join("folder/subfolder").is_dir());
    }

    #[test]
    fn test_write_fragment_overwrites_existing() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "snippet.html", "<p>old</p>");

        write_fragment(&path, "<p>new</p>").unwrap();

        assert_eq!(read_fragment(&path).unwrap(), "<p>new</p>");
    }
}
