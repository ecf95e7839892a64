//! Installer module
//!
//! The install sequencer: a fixed, ordered list of filesystem steps executed
//! against one `Configuration`, reporting progress to a `ProgressSink`.
//!
//! # Invariants
//!
//! - Exactly one `Completed` event per run, always last
//! - `Progress` values are non-decreasing and come from `InstallStage::checkpoint`
//! - A missing source executable is detected before anything is written
//! - The first failing step aborts the run; nothing is rolled back

use crate::config::Configuration;
use crate::desktop_entry::DesktopEntry;
use crate::error::{Result, SetupError};
use crate::events::{ProgressEvent, ProgressSink};
use crate::fs_ops;
use crate::install_state::{InstallStage, InstallerContext};
use crate::layout::InstallLayout;
use crate::refresh::{self, RefreshStatus};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

/// Message carried by a successful run's `Completed` event
pub const SUCCESS_MESSAGE: &str = "Installation completed successfully!";

/// Capacity of the progress channel between worker and UI
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Cooperative cancellation flag, checked before each step that writes files
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

type StepFn = fn(&InstallSequencer, &dyn ProgressSink) -> Result<()>;

/// Executes the installation steps for one configuration
pub struct InstallSequencer {
    config: Configuration,
    layout: InstallLayout,
    cancel: CancelToken,
}

impl InstallSequencer {
    pub fn new(config: Configuration) -> Self {
        let layout = config.layout();
        Self {
            config,
            layout,
            cancel: CancelToken::new(),
        }
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Run every step on the calling thread.
    ///
    /// Returns whether the run succeeded; the same outcome is delivered to the
    /// sink as the terminal `Completed` event.
    pub fn run(&self, sink: &dyn ProgressSink) -> bool {
        log::info!(
            "Installing {} into {}",
            self.config.source_executable.display(),
            self.config.install_dir.display()
        );

        let mut ctx = InstallerContext::new();
        match self.execute(&mut ctx, sink) {
            Ok(()) => {
                log::info!("{}", SUCCESS_MESSAGE);
                sink.emit(ProgressEvent::Log(SUCCESS_MESSAGE.to_string()));
                sink.emit(ProgressEvent::Completed {
                    success: true,
                    message: SUCCESS_MESSAGE.to_string(),
                });
                true
            }
            Err(e) => {
                let _ = ctx.fail();
                log::error!(
                    "Installation failed during {}: {}",
                    ctx.failed_at().unwrap_or(InstallStage::NotStarted),
                    e
                );
                sink.emit(ProgressEvent::Log(format!("Installation failed: {}", e)));
                sink.emit(ProgressEvent::Completed {
                    success: false,
                    message: e.to_string(),
                });
                false
            }
        }
    }

    /// Run on a dedicated worker thread, streaming events over a bounded channel.
    ///
    /// The channel closes after the `Completed` event.
    pub fn spawn(self) -> Result<InstallHandle> {
        let (tx, rx) = mpsc::sync_channel(EVENT_CHANNEL_CAPACITY);
        let cancel = self.cancel_token();
        let worker = thread::Builder::new()
            .name("install-worker".to_string())
            .spawn(move || self.run(&tx))?;

        Ok(InstallHandle {
            events: rx,
            cancel,
            worker: Some(worker),
            finished: false,
        })
    }

    fn execute(&self, ctx: &mut InstallerContext, sink: &dyn ProgressSink) -> Result<()> {
        // Checked up front so a missing source leaves the target untouched
        if !self.config.source_executable.exists() {
            return Err(SetupError::MissingSource(
                self.config.source_executable.clone(),
            ));
        }

        let mutating: [StepFn; 6] = [
            Self::prepare_directory,
            Self::copy_executable,
            Self::write_desktop_entry,
            Self::provision_user_data,
            Self::install_icons,
            Self::link_command,
        ];
        for action in mutating {
            self.ensure_not_cancelled()?;
            self.step(ctx, sink, action)?;
        }

        // Everything is in place; a cancel from here on no longer changes the outcome
        self.step(ctx, sink, Self::refresh_caches)?;
        ctx.advance()?;
        sink.emit(ProgressEvent::Progress(ctx.progress_percent()));
        Ok(())
    }

    fn step(&self, ctx: &mut InstallerContext, sink: &dyn ProgressSink, action: StepFn) -> Result<()> {
        let stage = ctx.advance()?;
        log::debug!("Entering stage: {}", stage);
        action(self, sink)?;
        if let Some(percent) = ctx.finish_stage() {
            sink.emit(ProgressEvent::Progress(percent));
        }
        Ok(())
    }

    fn ensure_not_cancelled(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            log::warn!("Cancellation requested, stopping before next step");
            return Err(SetupError::Cancelled);
        }
        Ok(())
    }

    fn announce(sink: &dyn ProgressSink, stage: InstallStage) {
        sink.emit(ProgressEvent::Log(stage.description().to_string()));
    }

    fn prepare_directory(&self, sink: &dyn ProgressSink) -> Result<()> {
        Self::announce(sink, InstallStage::PreparingDirectory);
        fs_ops::ensure_dir(&self.config.install_dir)
    }

    fn copy_executable(&self, sink: &dyn ProgressSink) -> Result<()> {
        Self::announce(sink, InstallStage::CopyingExecutable);
        let source = &self.config.source_executable;
        let dest = self.config.installed_executable();

        if is_same_file(source, &dest) {
            log::info!("Source is already at {}, skipping copy", dest.display());
        } else {
            fs_ops::copy_preserving(source, &dest)?;
        }
        fs_ops::make_executable(&dest)?;
        log::info!("Installed executable at {}", dest.display());
        Ok(())
    }

    fn write_desktop_entry(&self, sink: &dyn ProgressSink) -> Result<()> {
        if !self.config.create_desktop_entry {
            log::info!("Desktop entry disabled, skipping");
            sink.emit(ProgressEvent::Log("Skipping desktop entry".to_string()));
            return Ok(());
        }
        Self::announce(sink, InstallStage::WritingDesktopEntry);

        let dir = self.layout.applications_dir();
        fs_ops::ensure_dir(&dir)?;
        let entry = DesktopEntry::for_executable(&self.config.installed_executable());
        let path = self.layout.desktop_entry_path();
        fs_ops::write_atomic(&path, entry.render().as_bytes())?;
        log::info!("Wrote desktop entry {}", path.display());
        Ok(())
    }

    fn provision_user_data(&self, sink: &dyn ProgressSink) -> Result<()> {
        Self::announce(sink, InstallStage::ProvisioningUserData);
        fs_ops::ensure_dir(&self.layout.data_root())?;
        for subdir in self.layout.data_subdirs() {
            fs_ops::ensure_dir(&subdir)?;
        }
        Ok(())
    }

    fn install_icons(&self, sink: &dyn ProgressSink) -> Result<()> {
        let Some(icon) = &self.config.icon_source else {
            log::info!("No icon asset available, skipping icon installation");
            sink.emit(ProgressEvent::Log(
                "No icon available, skipping icons".to_string(),
            ));
            return Ok(());
        };
        Self::announce(sink, InstallStage::InstallingIcons);
        let written = crate::icons::install_icons(&self.layout, icon)?;
        log::info!("Installed {} icon sizes", written.len());
        Ok(())
    }

    fn link_command(&self, sink: &dyn ProgressSink) -> Result<()> {
        if !self.config.create_symlink {
            return Ok(());
        }
        Self::announce(sink, InstallStage::LinkingCommand);
        fs_ops::ensure_dir(&self.layout.bin_dir())?;
        let link = self.layout.symlink_path();
        fs_ops::replace_symlink(&self.config.installed_executable(), &link)?;
        log::info!("Linked {}", link.display());
        Ok(())
    }

    fn refresh_caches(&self, sink: &dyn ProgressSink) -> Result<()> {
        Self::announce(sink, InstallStage::RefreshingCaches);
        for (tool, status) in refresh::refresh_caches(&self.layout) {
            match status {
                RefreshStatus::Refreshed => log::debug!("{} refreshed", tool),
                RefreshStatus::Skipped => log::debug!("{} skipped", tool),
                RefreshStatus::NotInstalled => {
                    sink.emit(ProgressEvent::Log(format!("{} not found, skipped", tool)))
                }
                RefreshStatus::Failed(reason) => {
                    sink.emit(ProgressEvent::Log(format!("{} failed: {}", tool, reason)))
                }
            }
        }
        Ok(())
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Receiving side of a spawned run
pub struct InstallHandle {
    events: Receiver<ProgressEvent>,
    cancel: CancelToken,
    worker: Option<JoinHandle<bool>>,
    finished: bool,
}

impl InstallHandle {
    /// Next pending event without blocking.
    ///
    /// Returns `None` when nothing is queued or the stream has closed.
    pub fn try_next(&mut self) -> Option<ProgressEvent> {
        if self.finished {
            return None;
        }
        match self.events.try_recv() {
            Ok(event) => Some(self.observe(event)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.finished = true;
                None
            }
        }
    }

    /// Request cancellation; takes effect before the next step that writes files
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether the terminal event has been received
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Wait for the worker thread and return its outcome
    pub fn join(mut self) -> bool {
        self.worker
            .take()
            .map(|w| w.join().unwrap_or(false))
            .unwrap_or(false)
    }

    fn observe(&mut self, event: ProgressEvent) -> ProgressEvent {
        if event.is_terminal() {
            self.finished = true;
        }
        event
    }
}

/// Blocking iteration over the stream, ending after `Completed`
impl Iterator for InstallHandle {
    type Item = ProgressEvent;

    fn next(&mut self) -> Option<ProgressEvent> {
        if self.finished {
            return None;
        }
        match self.events.recv() {
            Ok(event) => Some(self.observe(event)),
            Err(_) => {
                self.finished = true;
                None
            }
        }
    }
}
