//! Local file operations.
//!
//! Every read is a full read into memory and every write is atomic
//! (temp file + rename), so a failure mid-computation never leaves a
//! partially written target on disk.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};

/// Read a file fully, returning `None` when it does not exist.
///
/// A missing target file is a per-rule warning for callers, not an error;
/// any other IO failure (e.g. permissions) is fatal.
pub fn read_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::Io(e)),
    }
}

/// Write content atomically: write to a temp file next to the target,
/// then rename over it.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| Error::Other(format!("Invalid path: {}", path.display())))?;

    let filename = path
        .file_name()
        .ok_or_else(|| Error::Other(format!("Invalid path: {}", path.display())))?;

    let tmp_path = parent.join(format!("{}.tmp", filename.to_string_lossy()));

    fs::write(&tmp_path, content)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

/// Ensure a directory exists, creating intermediate directories as needed.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Copy a file to a destination, creating the destination's parent
/// directories first.
pub fn copy_file(src: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        ensure_dir(parent)?;
    }
    fs::copy(src, dest)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_read_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");

        write_atomic(&path, b"hello world").unwrap();
        let content = read_if_exists(&path).unwrap();
        assert_eq!(content.as_deref(), Some("hello world"));
    }

    #[test]
    fn test_read_missing_is_none() {
        let dir = tempdir().unwrap();
        let content = read_if_exists(&dir.path().join("absent.txt")).unwrap();
        assert!(content.is_none());
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.rs");

        write_atomic(&path, b"content").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().flatten().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path(), path);
    }

    #[test]
    fn test_copy_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("icon.ico");
        let dest = dir.path().join("res/deep/nested/icon.ico");

        fs::write(&src, b"icondata").unwrap();
        copy_file(&src, &dest).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"icondata");
    }
}
