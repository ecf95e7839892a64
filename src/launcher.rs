//! Starting the freshly installed launcher

use crate::error::{Result, SetupError};
use crate::process_guard::spawn_detached;
use std::path::Path;
use std::process::Command;

/// Start `executable` in its own process group so it outlives the wizard.
///
/// The working directory is set to the executable's directory. Returns the
/// child's PID.
pub fn launch_installed(executable: &Path) -> Result<u32> {
    if !executable.is_file() {
        return Err(SetupError::MissingSource(executable.to_path_buf()));
    }

    let mut cmd = Command::new(executable);
    if let Some(dir) = executable.parent() {
        cmd.current_dir(dir);
    }

    log::info!("Launching {}", executable.display());
    spawn_detached(&mut cmd).map_err(|e| SetupError::filesystem("launch", executable, e))
}
