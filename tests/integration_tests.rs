// Integration tests for theboys-setup
//
// These drive the compiled binary in headless mode against temporary
// directories and check exit codes, printed progress and saved configs.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Output};

use theboys_setup::config_file::InstallationConfig;

fn setup_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_theboys-setup"));
    cmd.env_remove("THEBOYS_SETUP_HOME").env("RUST_LOG", "warn");
    cmd
}

fn write_source(dir: &Path) -> std::path::PathBuf {
    let source = dir.join("theboys-launcher-linux-amd64");
    fs::write(&source, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(&source, fs::Permissions::from_mode(0o755)).unwrap();
    source
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_headless_install_succeeds() {
    let tmp = tempfile::tempdir().unwrap();
    let source = write_source(tmp.path());
    let home = tmp.path().join("home");
    let install_dir = tmp.path().join("customdir");

    let output = setup_bin()
        .arg("install")
        .arg("--source")
        .arg(&source)
        .arg("--install-dir")
        .arg(&install_dir)
        .arg("--home")
        .arg(&home)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("[100%]"));
    assert!(stdout.contains("Installation completed successfully!"));
    assert!(install_dir.join("theboys-launcher").is_file());
    assert!(home.join(".local/share/applications/theboys-launcher.desktop").is_file());
}

#[test]
fn test_headless_install_missing_source_exits_nonzero() {
    let tmp = tempfile::tempdir().unwrap();
    let install_dir = tmp.path().join("customdir");

    let output = setup_bin()
        .arg("install")
        .arg("--source")
        .arg(tmp.path().join("nope"))
        .arg("--install-dir")
        .arg(&install_dir)
        .arg("--home")
        .arg(tmp.path().join("home"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stdout_of(&output).contains("Executable not found"));
    assert!(!install_dir.exists());
}

#[test]
fn test_broken_icon_next_to_source_is_ignored() {
    let tmp = tempfile::tempdir().unwrap();
    let source = write_source(tmp.path());
    fs::write(tmp.path().join("icon.png"), b"not an image").unwrap();
    let home = tmp.path().join("home");

    let output = setup_bin()
        .arg("install")
        .arg("--source")
        .arg(&source)
        .arg("--install-dir")
        .arg(tmp.path().join("opt"))
        .arg("--home")
        .arg(&home)
        .output()
        .unwrap();

    assert!(output.status.success(), "stdout: {}", stdout_of(&output));
    assert!(stdout_of(&output).contains("No icon available, skipping icons"));
    assert!(!home.join(".local/share/icons/hicolor").exists());
}

#[test]
fn test_broken_icon_given_explicitly_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let source = write_source(tmp.path());
    let icon = tmp.path().join("custom.png");
    fs::write(&icon, b"not an image").unwrap();

    let output = setup_bin()
        .arg("install")
        .arg("--source")
        .arg(&source)
        .arg("--install-dir")
        .arg(tmp.path().join("opt"))
        .arg("--home")
        .arg(tmp.path().join("home"))
        .arg("--icon")
        .arg(&icon)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stdout_of(&output).contains("Failed to process icon"));
}

#[test]
fn test_home_from_environment() {
    let tmp = tempfile::tempdir().unwrap();
    let source = write_source(tmp.path());
    let home = tmp.path().join("envhome");

    let output = setup_bin()
        .env("THEBOYS_SETUP_HOME", &home)
        .arg("install")
        .arg("--source")
        .arg(&source)
        .arg("--install-dir")
        .arg(tmp.path().join("opt"))
        .arg("--no-desktop-entry")
        .arg("--no-symlink")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(home.join(".theboys-launcher/instances").is_dir());
    assert!(!home.join(".local/share/applications/theboys-launcher.desktop").exists());
    assert!(fs::symlink_metadata(home.join(".local/bin/theboys-launcher")).is_err());
}

#[test]
fn test_save_config_then_replay() {
    let tmp = tempfile::tempdir().unwrap();
    let source = write_source(tmp.path());
    let home = tmp.path().join("home");
    let saved = tmp.path().join("setup.json");

    let first = setup_bin()
        .arg("install")
        .arg("--source")
        .arg(&source)
        .arg("--install-dir")
        .arg(tmp.path().join("opt"))
        .arg("--home")
        .arg(&home)
        .arg("--no-symlink")
        .arg("--save-config")
        .arg(&saved)
        .output()
        .unwrap();
    assert!(first.status.success());

    let config = InstallationConfig::load_from_file(&saved).unwrap();
    assert!(!config.create_symlink);
    assert_eq!(config.home.as_deref(), Some(home.as_path()));

    let validate = setup_bin().arg("validate").arg(&saved).output().unwrap();
    assert!(validate.status.success());

    let replay = setup_bin()
        .arg("install")
        .arg("--config")
        .arg(&saved)
        .output()
        .unwrap();
    assert!(replay.status.success());
}

#[test]
fn test_validate_rejects_bad_config() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("bad.json");
    fs::write(&path, r#"{"install_dir": "relative/path"}"#).unwrap();

    let output = setup_bin().arg("validate").arg(&path).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("absolute path"));
}

#[test]
fn test_validate_rejects_malformed_json() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let output = setup_bin().arg("validate").arg(&path).output().unwrap();
    assert!(!output.status.success());
}
