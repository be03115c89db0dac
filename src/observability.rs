//! Observer hooks for pipeline progress, timing, and failures.
//!
//! The observer is a no-op-safe side channel: it never influences the
//! pipeline's results, and implementations must not panic on failure to
//! record an event.

use std::error::Error as StdError;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::types::FileType;

/// Severity classification used for observer callbacks and alert thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StepSeverity {
    /// Informational event.
    Info,
    /// Non-fatal interruption (cancellation, timeout).
    Warning,
    /// The upload could not be processed (malformed content).
    Error,
    /// Infrastructure failure (I/O, missing source).
    Critical,
}

/// Context about one pipeline invocation.
#[derive(Debug, Clone)]
pub struct StepContext {
    /// The source path being processed.
    pub path: PathBuf,
    /// Detected format.
    pub file_type: FileType,
}

/// Stats reported when an upload is processed successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStats {
    /// Post-capping row count.
    pub rows: usize,
    /// Post-capping column count.
    pub columns: usize,
    /// True when the payload was routed to separate-table storage.
    pub truncated: bool,
}

/// Observer interface for pipeline outcomes and per-step timing.
///
/// All methods default to no-ops; implementors record metrics, logs, or
/// trigger alerts.
pub trait StepObserver: Send + Sync {
    /// Called after each pipeline step (read, parse, cap, hash) with its
    /// elapsed wall time.
    fn on_step(&self, _ctx: &StepContext, _step: &str, _elapsed: Duration) {}

    /// Called when processing completes successfully.
    fn on_success(&self, _ctx: &StepContext, _stats: ProcessStats) {}

    /// Called when processing fails (captured or thrown).
    fn on_failure(&self, _ctx: &StepContext, _severity: StepSeverity, _error: &dyn StdError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &StepContext, severity: StepSeverity, error: &dyn StdError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn StepObserver>>,
}

impl CompositeObserver {
    /// Create a composite from a list of observers.
    pub fn new(observers: Vec<Arc<dyn StepObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl StepObserver for CompositeObserver {
    fn on_step(&self, ctx: &StepContext, step: &str, elapsed: Duration) {
        for o in &self.observers {
            o.on_step(ctx, step, elapsed);
        }
    }

    fn on_success(&self, ctx: &StepContext, stats: ProcessStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &StepContext, severity: StepSeverity, error: &dyn StdError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &StepContext, severity: StepSeverity, error: &dyn StdError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs pipeline events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl StepObserver for StdErrObserver {
    fn on_step(&self, ctx: &StepContext, step: &str, elapsed: Duration) {
        eprintln!(
            "[upload][step] format={:?} path={} step={} elapsed={:?}",
            ctx.file_type,
            ctx.path.display(),
            step,
            elapsed
        );
    }

    fn on_success(&self, ctx: &StepContext, stats: ProcessStats) {
        eprintln!(
            "[upload][ok] format={:?} path={} rows={} columns={} truncated={}",
            ctx.file_type,
            ctx.path.display(),
            stats.rows,
            stats.columns,
            stats.truncated
        );
    }

    fn on_failure(&self, ctx: &StepContext, severity: StepSeverity, error: &dyn StdError) {
        eprintln!(
            "[upload][{:?}] format={:?} path={} err={}",
            severity,
            ctx.file_type,
            ctx.path.display(),
            error
        );
    }

    fn on_alert(&self, ctx: &StepContext, severity: StepSeverity, error: &dyn StdError) {
        eprintln!(
            "[ALERT][upload][{:?}] format={:?} path={} err={}",
            severity,
            ctx.file_type,
            ctx.path.display(),
            error
        );
    }
}

/// Appends pipeline events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are
    /// ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl StepObserver for FileObserver {
    fn on_step(&self, ctx: &StepContext, step: &str, elapsed: Duration) {
        self.append_line(&format!(
            "{} step format={:?} path={} step={} elapsed_ms={}",
            unix_ts(),
            ctx.file_type,
            ctx.path.display(),
            step,
            elapsed.as_millis()
        ));
    }

    fn on_success(&self, ctx: &StepContext, stats: ProcessStats) {
        self.append_line(&format!(
            "{} ok format={:?} path={} rows={} columns={} truncated={}",
            unix_ts(),
            ctx.file_type,
            ctx.path.display(),
            stats.rows,
            stats.columns,
            stats.truncated
        ));
    }

    fn on_failure(&self, ctx: &StepContext, severity: StepSeverity, error: &dyn StdError) {
        self.append_line(&format!(
            "{} fail severity={:?} format={:?} path={} err={}",
            unix_ts(),
            severity,
            ctx.file_type,
            ctx.path.display(),
            error
        ));
    }

    fn on_alert(&self, ctx: &StepContext, severity: StepSeverity, error: &dyn StdError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} format={:?} path={} err={}",
            unix_ts(),
            severity,
            ctx.file_type,
            ctx.path.display(),
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
