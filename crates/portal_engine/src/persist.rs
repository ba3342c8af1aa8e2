use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("{0} already exists")]
    AlreadyExists(PathBuf),
    #[error("directory missing or not writable: {0}")]
    Directory(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure the directory that will hold `path` exists; create it if missing.
pub fn ensure_parent_dir(path: &Path) -> Result<PathBuf, PersistError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if dir.exists() {
        let meta = fs::metadata(&dir).map_err(|e| PersistError::Directory(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::Directory(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(&dir).map_err(|e| PersistError::Directory(e.to_string()))?;
    }
    Ok(dir)
}

/// Write `content` to `path` via a temp file in the same directory, then rename.
///
/// Without `overwrite`, an existing file is left untouched and `AlreadyExists` is returned,
/// including when the file appears while the temp file is being written.
pub fn write_atomically(path: &Path, content: &str, overwrite: bool) -> Result<(), PersistError> {
    if !overwrite && path.exists() {
        return Err(PersistError::AlreadyExists(path.to_path_buf()));
    }
    let dir = ensure_parent_dir(path)?;

    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    persist(tmp, path, overwrite)
}

fn persist(tmp: NamedTempFile, path: &Path, overwrite: bool) -> Result<(), PersistError> {
    let persisted = if overwrite {
        tmp.persist(path)
    } else {
        tmp.persist_noclobber(path)
    };
    persisted.map_err(|e| match e.error.kind() {
        io::ErrorKind::AlreadyExists => PersistError::AlreadyExists(path.to_path_buf()),
        _ => PersistError::Io(e.error),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_created_after_the_check_is_not_replaced() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("docportal.ron");

        let mut tmp = NamedTempFile::new_in(temp.path()).unwrap();
        tmp.write_all(b"generated").unwrap();
        fs::write(&target, "edited by hand").unwrap();

        let err = persist(tmp, &target, false).unwrap_err();
        assert!(matches!(err, PersistError::AlreadyExists(_)));
        assert_eq!(fs::read_to_string(&target).unwrap(), "edited by hand");
    }

    #[test]
    fn overwrite_replaces_existing_file() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("docportal.ron");
        fs::write(&target, "old").unwrap();

        let mut tmp = NamedTempFile::new_in(temp.path()).unwrap();
        tmp.write_all(b"new").unwrap();
        persist(tmp, &target, true).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }
}
