//! Atomic file persistence primitives for cache storage
//!
//! Writers never expose partial content: bytes go to a freshly named
//! temporary file in the target's own directory and are renamed into place,
//! so a reader observes either the previous entry or the new one, even if
//! the writer is killed mid-write. Concurrent writers to the same path race
//! harmlessly; the last rename wins.
//!
//! Missing files are reported as `None` on every read path, never as errors.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use uuid::Uuid;

/// Permissions for cache files (owner read/write, group/other read)
pub const CACHE_PERM: u32 = 0o644;

/// Atomically write `bytes` to `path`, creating parent directories
///
/// On rename failure the temporary file is removed best-effort and the
/// original error is returned.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = temp_sibling(path);
    if let Err(err) = write_temp(&temp_path, bytes).and_then(|()| fs::rename(&temp_path, path)) {
        // Removal failure is not actionable here; the stray temp file is
        // invisible to readers.
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }
    Ok(())
}

/// Read a file's bytes; `None` when it does not exist
pub fn read(path: &Path) -> std::io::Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Last modification time of a file; `None` when it does not exist
pub fn modified(path: &Path) -> std::io::Result<Option<SystemTime>> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(Some(
            metadata.modified().unwrap_or_else(|_| SystemTime::now()),
        )),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Whether `path` exists and is a regular file; false on any stat error
pub fn is_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// Whether `root` accepts writes
///
/// Creates the directory if needed and round-trips a uniquely named probe
/// file; any failure means the location is read-only for this process.
pub fn dir_is_writable(root: &Path) -> bool {
    if fs::create_dir_all(root).is_err() {
        return false;
    }
    let probe = root.join(format!(".probe-{}.tmp", Uuid::new_v4().simple()));
    match fs::write(&probe, b"") {
        Ok(()) => {
            let _ = fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}

/// Temporary file name next to `target`
///
/// Same directory as the target so the rename is a same-filesystem,
/// single-syscall operation. The UUID suffix (16 random bytes, hex) avoids
/// collisions between concurrent writers.
fn temp_sibling(target: &Path) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()))
}

fn write_temp(temp_path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    fs::write(temp_path, bytes)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(temp_path, fs::Permissions::from_mode(CACHE_PERM))?;
    }
    Ok(())
}
