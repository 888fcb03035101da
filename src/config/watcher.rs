//! Configuration file watcher for hot reload.
//!
//! # Design Decisions
//! - The parent directory is watched, not the file: editors that save by
//!   writing a temp file and renaming it over the original replace the inode
//!   a file watch would be bound to
//! - Events for other files in that directory are ignored
//! - A save usually fires several events; the file text is compared with the
//!   last text that produced an update and unchanged text is skipped
//! - Invalid files are reported and never forwarded

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::{parse_config, ConfigError};
use crate::config::schema::LogConfig;
use crate::global;

/// Watches one configuration file and forwards each new valid version.
pub struct ConfigWatcher {
    reloader: Reloader,
    update_tx: mpsc::UnboundedSender<LogConfig>,
}

impl ConfigWatcher {
    /// Create a watcher for `path`.
    ///
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<LogConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            reloader: Reloader::new(path),
            update_tx,
        };
        (watcher, update_rx)
    }

    /// Start watching on the notify backend's thread.
    ///
    /// The returned watcher must be kept alive for events to keep flowing.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self {
            mut reloader,
            update_tx,
        } = self;
        let dir = reloader.dir();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => match reloader.on_event(&event) {
                    Some(Ok(config)) => {
                        tracing::info!(
                            sink = config.sink.kind.as_deref().unwrap_or_default(),
                            "logging config changed"
                        );
                        let _ = update_tx.send(config);
                    }
                    Some(Err(e)) => {
                        tracing::error!(error = %e, "ignoring invalid logging config");
                    }
                    None => {}
                },
                Err(e) => tracing::error!(error = ?e, "config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::info!(dir = ?dir, "config watcher started");
        Ok(watcher)
    }
}

/// Turns file events into at most one update per distinct file content.
struct Reloader {
    path: PathBuf,
    file_name: Option<OsString>,
    last_applied: Option<String>,
}

impl Reloader {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            file_name: path.file_name().map(OsString::from),
            last_applied: None,
        }
    }

    fn dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn concerns_file(&self, event: &Event) -> bool {
        if !(event.kind.is_modify() || event.kind.is_create()) {
            return false;
        }
        // Poll backends may report without paths
        event.paths.is_empty()
            || event
                .paths
                .iter()
                .any(|p| p.file_name() == self.file_name.as_deref())
    }

    fn on_event(&mut self, event: &Event) -> Option<Result<LogConfig, ConfigError>> {
        if !self.concerns_file(event) {
            return None;
        }
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => return Some(Err(e.into())),
        };
        if self.last_applied.as_deref() == Some(text.as_str()) {
            tracing::trace!("config content unchanged, skipping reload");
            return None;
        }
        let parsed = parse_config(&text);
        if parsed.is_ok() {
            self.last_applied = Some(text);
        }
        Some(parsed)
    }
}

/// Apply every received configuration to the process-wide default.
///
/// Returns when the sending side is dropped.
pub async fn apply_updates(mut updates: mpsc::UnboundedReceiver<LogConfig>) {
    while let Some(config) = updates.recv().await {
        if let Err(e) = global::apply_config(&config) {
            tracing::error!(error = %e, "failed to apply logging config, keeping current one");
        }
    }
}
