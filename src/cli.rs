use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TheBoys Setup - installs TheBoys Launcher for the current user
#[derive(Parser, Debug)]
#[command(name = "theboys-setup")]
#[command(about = "Install TheBoys Launcher with a terminal wizard or headless")]
#[command(version)]
pub struct Cli {
    /// Executable to install when starting the wizard.
    ///
    /// Defaults to the first of theboys-launcher-linux-amd64,
    /// theboys-launcher-linux or theboys-launcher found in the current
    /// directory.
    pub source: Option<PathBuf>,

    /// Home directory that per-user files are installed under
    #[arg(long, global = true, env = "THEBOYS_SETUP_HOME")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install without the wizard, printing progress to stdout
    Install {
        /// Executable to install
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Target directory for the executable
        #[arg(short = 'd', long)]
        install_dir: Option<PathBuf>,

        /// Do not create ~/.local/bin/theboys-launcher
        #[arg(long)]
        no_symlink: bool,

        /// Do not write the application menu entry
        #[arg(long)]
        no_desktop_entry: bool,

        /// Icon to install into the hicolor theme (PNG or JPEG)
        #[arg(long)]
        icon: Option<PathBuf>,

        /// Start the launcher after a successful installation
        #[arg(long)]
        launch: bool,

        /// Path to configuration file to use; flags given here override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Save the effective configuration to file before installing
        #[arg(long)]
        save_config: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        config: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
