//! TheBoys Setup - Main entry point
//!
//! Starts the terminal wizard, or runs headless for `install` and `validate`.

use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{debug, error, info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::stdout;
use std::path::{Path, PathBuf};

use theboys_setup::app::{App, AppState};
use theboys_setup::cli::{Cli, Commands};
use theboys_setup::config_file::InstallationConfig;
use theboys_setup::error::SetupError;
use theboys_setup::events::ProgressEvent;
use theboys_setup::installer::InstallSequencer;
use theboys_setup::layout::InstallLayout;
use theboys_setup::{launcher, sanity};

/// Log file used while the wizard owns the terminal
const WIZARD_LOG_FILE: &str = "theboys-setup.log";

/// Where log records are written
enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Initialize the logger with appropriate settings
fn init_logger(target: LogTarget) {
    use env_logger::{Builder, Target};
    use std::io::Write;

    let mut builder = Builder::from_default_env();
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .filter_level(log::LevelFilter::Info)
        .parse_default_env(); // Allows RUST_LOG env var to override

    if let LogTarget::File(path) = target {
        match std::fs::OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(e) => {
                // Records would draw over the wizard, so drop them instead
                eprintln!("Could not open log file {}: {}", path.display(), e);
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }

    builder.init();
}

/// Main application entry point
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();

    let log_target = if cli.command.is_none() {
        LogTarget::File(std::env::temp_dir().join(WIZARD_LOG_FILE))
    } else {
        LogTarget::Stderr
    };
    init_logger(log_target);
    info!("TheBoys Setup starting up");
    debug!("CLI arguments parsed: {:?}", cli);

    match cli.command {
        Some(Commands::Validate { config }) => {
            info!("Validating configuration file: {:?}", config);
            match InstallationConfig::load_from_file(&config) {
                Ok(config) => match config.validate() {
                    Ok(_) => {
                        info!("Configuration validation successful");
                        println!("✓ Configuration file is valid: {:?}", config);
                    }
                    Err(e) => {
                        error!("Configuration validation failed: {}", e);
                        eprintln!("✗ Configuration validation failed: {}", e);
                        std::process::exit(1);
                    }
                },
                Err(e) => {
                    error!("Failed to load configuration file: {}", e);
                    eprintln!("✗ Failed to load configuration file: {:#}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Install {
            source,
            install_dir,
            no_symlink,
            no_desktop_entry,
            icon,
            launch,
            config,
            save_config,
        }) => {
            let mut file_config = match config {
                Some(path) => {
                    info!("Loading configuration from: {:?}", path);
                    let loaded = InstallationConfig::load_from_file(&path)?;
                    loaded.validate()?;
                    loaded
                }
                None => InstallationConfig::new(),
            };

            // Flags given on the command line win over the file
            if source.is_some() {
                file_config.source_executable = source.map(absolute);
            }
            if let Some(dir) = install_dir {
                file_config.install_dir = absolute(dir);
            }
            if no_symlink {
                file_config.create_symlink = false;
            }
            if no_desktop_entry {
                file_config.create_desktop_entry = false;
            }
            if icon.is_some() {
                file_config.icon_source = icon.map(absolute);
            }
            if cli.home.is_some() {
                file_config.home = cli.home;
            }
            file_config.launch_after_install |= launch;

            run_headless(file_config, save_config.as_deref())?;
        }
        None => {
            info!("No command specified, launching wizard");
            let home = resolve_home(cli.home)?;
            run_wizard(cli.source, home)?;
        }
    }

    Ok(())
}

fn absolute(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}

/// `--home`/`THEBOYS_SETUP_HOME`, else the current user's home
fn resolve_home(home: Option<PathBuf>) -> Result<PathBuf, SetupError> {
    match home {
        Some(home) => Ok(home),
        None => Ok(InstallLayout::for_current_user()?.home().to_path_buf()),
    }
}

/// Source given on the command line, else one found in the working directory
fn locate_source(source: Option<PathBuf>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(source) = source {
        return Ok(absolute(source));
    }
    let cwd = std::env::current_dir()?;
    match sanity::discover_source(&cwd) {
        Some(found) => {
            info!("Found executable: {}", found.display());
            Ok(found)
        }
        None => {
            error!("No executable found in {}", cwd.display());
            eprintln!("✗ Could not find TheBoys Launcher executable.");
            eprintln!();
            eprintln!("Please run this installer with the executable path as an argument:");
            eprintln!("  theboys-setup /path/to/theboys-launcher");
            std::process::exit(1);
        }
    }
}

/// Run the wizard, then launch the installed executable if asked to
fn run_wizard(source: Option<PathBuf>, home: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let source = locate_source(source)?;
    let icon = sanity::discover_icon(&source);
    let preflight = sanity::run_preflight_checks();

    let mut state = AppState::new(source, home, icon);
    state.warnings = preflight.warnings();

    debug!("Initializing terminal for wizard");
    enable_raw_mode()
        .map_err(|e| SetupError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), EnterAlternateScreen)
        .map_err(|e| SetupError::terminal(format!("Failed to enter alternate screen: {}", e)))?;

    let backend = CrosstermBackend::new(stdout());
    let result = Terminal::new(backend)
        .map_err(|e| SetupError::terminal(format!("Failed to create terminal: {}", e)))
        .and_then(|mut terminal| App::new(state).run(&mut terminal));

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), LeaveAlternateScreen);

    let outcome = result?;
    if let (Some(config), true) = (outcome.installed, outcome.launch) {
        launch_and_report(&config.installed_executable());
    }
    Ok(())
}

/// Install without a terminal UI, printing the event stream to stdout
fn run_headless(
    file_config: InstallationConfig,
    save_config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let launch = file_config.launch_after_install;
    let fallback_source = match &file_config.source_executable {
        Some(_) => None,
        None => Some(locate_source(None)?),
    };
    let home = resolve_home(file_config.home.clone())?;

    let mut config = file_config.into_configuration(fallback_source, home)?;
    if config.icon_source.is_none() {
        config.icon_source = sanity::discover_icon(&config.source_executable);
    }

    if let Some(path) = save_config {
        let mut saved = InstallationConfig::from(&config);
        saved.launch_after_install = launch;
        saved.save_to_file(path)?;
        println!("✓ Configuration saved to {}", path.display());
    }

    sanity::run_preflight_checks();
    if let Err(e) = sanity::check_install_dir(&config.install_dir) {
        error!("{}", e);
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }

    let executable = config.installed_executable();
    let handle = InstallSequencer::new(config).spawn()?;

    let mut success = false;
    for event in handle {
        match event {
            ProgressEvent::Progress(percent) => println!("[{:>3}%]", percent),
            ProgressEvent::Log(line) => println!("{}", line),
            ProgressEvent::Completed { success: ok, .. } => success = ok,
        }
    }

    if !success {
        // The failure reason was already printed as the last log line
        std::process::exit(1);
    }

    if launch {
        launch_and_report(&executable);
    }
    Ok(())
}

/// Start the launcher; a failure is reported but does not change the exit code
fn launch_and_report(executable: &Path) {
    match launcher::launch_installed(executable) {
        Ok(pid) => {
            info!("Launcher started with PID {}", pid);
            println!("✓ Started {} (PID {})", executable.display(), pid);
        }
        Err(e) => {
            warn!("Failed to launch {}: {}", executable.display(), e);
            eprintln!("✗ Failed to launch {}: {}", executable.display(), e);
        }
    }
}
