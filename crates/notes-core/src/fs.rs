//! Filesystem utilities for atomic operations.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Suffix carried by in-flight temp files.
pub const TEMP_SUFFIX: &str = "tmp";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Atomically rename a file, with fallback for platforms where rename fails if target exists.
///
/// On Windows, `fs::rename` can fail if the destination already exists. Only there, and
/// only while the temp file is still present, the destination is removed and the rename
/// retried. Elsewhere a failed rename leaves the destination untouched.
///
/// If the rename ultimately fails, the temp file is cleaned up.
///
/// # Errors
///
/// Returns an error if the rename fails, including after the fallback attempt.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    let initial_err = match fs::rename(temp_path, destination) {
        Ok(()) => return Ok(()),
        Err(err) => err,
    };

    if cfg!(windows) && temp_path.is_file() && destination.is_file() {
        let _ = fs::remove_file(destination);
        return fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        });
    }

    let _ = fs::remove_file(temp_path);
    Err(initial_err)
}

/// Write `data` to `destination` through a synced sibling temp file and a rename.
///
/// Readers either see the previous contents or the complete new contents,
/// never a partial write. The temp file is removed on any failure.
pub fn write_atomic(destination: &Path, data: &[u8]) -> io::Result<()> {
    let temp_path = temp_path_for(destination)?;

    let result = (|| {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()
    })();

    if let Err(err) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }

    rename_with_fallback(&temp_path, destination)
}

/// True if `path` looks like a temp file produced by `write_atomic`.
pub fn is_temp_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(TEMP_SUFFIX)
}

fn temp_path_for(destination: &Path) -> io::Result<PathBuf> {
    let parent = destination
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no parent"))?;
    let filename = destination
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Invalid filename"))?;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
        .as_nanos();
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

    Ok(parent.join(format!(
        ".{}.{}.{}.{}",
        filename,
        nanos,
        counter,
        TEMP_SUFFIX
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_rename_new_file() {
        let dir = tempdir().unwrap();
        let temp = dir.path().join("temp.txt");
        let dest = dir.path().join("dest.txt");

        File::create(&temp).unwrap().write_all(b"test").unwrap();

        rename_with_fallback(&temp, &dest).unwrap();

        assert!(!temp.exists());
        assert!(dest.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "test");
    }

    #[test]
    fn test_failed_rename_keeps_destination() {
        let dir = tempdir().unwrap();
        let temp = dir.path().join("vanished.tmp");
        let dest = dir.path().join("dest.txt");

        fs::write(&dest, b"live record").unwrap();

        assert!(rename_with_fallback(&temp, &dest).is_err());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "live record");
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("note.json");

        fs::write(&dest, b"old").unwrap();
        write_atomic(&dest, b"new").unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    }

    #[test]
    fn test_write_atomic_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("note.json");

        write_atomic(&dest, b"first").unwrap();
        write_atomic(&dest, b"second").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 1);
        assert_eq!(names[0], "note.json");
    }

    #[test]
    fn test_write_atomic_missing_parent_fails() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("missing").join("note.json");

        assert!(write_atomic(&dest, b"data").is_err());
        assert!(!dest.exists());
    }

    #[test]
    fn test_is_temp_file() {
        assert!(is_temp_file(Path::new(".a.json.1.0.tmp")));
        assert!(!is_temp_file(Path::new("a.json")));
    }
}
