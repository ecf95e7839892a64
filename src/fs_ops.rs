//! Filesystem primitives used by the install steps
//!
//! Files are written to a sibling temp path and renamed into place, so
//! reinstalling over a running launcher replaces the inode instead of failing
//! with "text file busy".

use crate::error::{IoResultExt, Result};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Permission bits of the installed executable
pub const EXECUTABLE_MODE: u32 = 0o755;

fn temp_path_for(dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos();
    dest.with_file_name(format!(".{name}.tmp-{nonce}"))
}

fn rename_into_place(tmp: &Path, dest: &Path) -> Result<()> {
    if let Err(e) = fs::rename(tmp, dest) {
        let _ = fs::remove_file(tmp);
        return Err(e).fs_context("rename", dest);
    }
    Ok(())
}

/// Create `dir` and all missing parents; an existing directory is not an error
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).fs_context("create directory", dir)
}

/// Copy `src` to `dest`, keeping permissions and modification time
pub fn copy_preserving(src: &Path, dest: &Path) -> Result<()> {
    let metadata = fs::metadata(src).fs_context("read metadata of", src)?;
    let tmp = temp_path_for(dest);

    if let Err(e) = fs::copy(src, &tmp) {
        let _ = fs::remove_file(&tmp);
        return Err(e).fs_context("copy", src);
    }

    if let Ok(modified) = metadata.modified() {
        let stamped = fs::File::options()
            .write(true)
            .open(&tmp)
            .and_then(|f| f.set_modified(modified));
        if let Err(e) = stamped {
            log::debug!("Could not preserve mtime on {}: {}", dest.display(), e);
        }
    }

    rename_into_place(&tmp, dest)
}

/// Write `bytes` to `dest`, replacing any existing file
pub fn write_atomic(dest: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = temp_path_for(dest);
    fs::write(&tmp, bytes).fs_context("write", &tmp)?;
    rename_into_place(&tmp, dest)
}

/// Set the file mode to `EXECUTABLE_MODE`
pub fn make_executable(path: &Path) -> Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(EXECUTABLE_MODE))
        .fs_context("set permissions on", path)
}

/// Point `link` at `target`, removing whatever file or symlink is there first.
///
/// Dangling symlinks count as occupied.
pub fn replace_symlink(target: &Path, link: &Path) -> Result<()> {
    if fs::symlink_metadata(link).is_ok() {
        fs::remove_file(link).fs_context("remove", link)?;
    }
    std::os::unix::fs::symlink(target, link).fs_context("create symlink", link)
}
