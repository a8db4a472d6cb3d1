use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::checker::{self, CheckContext};
use crate::deps::{DependencyInstaller, DependencyState};
use crate::error::{Result, VeriscanError};
use crate::format;
use crate::hash;
use crate::record::{Diagnostic, FileRecord};
use crate::report::ScanReport;
use crate::scanner::{DirectoryScanner, FileScanner, IncludeFilter};

/// Leading bytes sampled for content sniffing.
const HEAD_SAMPLE: usize = 512;

/// Cooperative cancellation flag shared between the scan and whoever
/// wants to stop it (typically a ctrl-c handler).
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Everything that shapes one scan run.
pub struct ScanOptions {
    pub roots: Vec<PathBuf>,
    pub recursive: bool,
    /// Glob include patterns; empty means everything.
    pub patterns: Vec<String>,
    /// Worker thread count; `None` lets the pool size itself.
    pub workers: Option<usize>,
    /// Per-file wall-clock budget; `None` disables the watchdog.
    pub file_timeout: Option<Duration>,
    /// Whether the spreadsheet analyzer may invoke the installer.
    pub negotiate: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            recursive: true,
            patterns: Vec::new(),
            workers: None,
            file_timeout: Some(Duration::from_secs(30)),
            negotiate: false,
        }
    }
}

/// Drives the whole scan: discovery, the per-file pipelines, and the
/// final report assembly. Files never interact with each other, so the
/// batch is parallelized per file with no shared mutable state.
pub struct Orchestrator {
    options: ScanOptions,
    deps: Arc<DependencyState>,
    installer: Option<Arc<dyn DependencyInstaller>>,
    on_discovered: Option<Box<dyn Fn(u64) + Send + Sync>>,
    on_file: Option<Box<dyn Fn(&FileRecord) + Send + Sync>>,
}

impl Orchestrator {
    #[must_use]
    pub fn new(options: ScanOptions, deps: Arc<DependencyState>) -> Self {
        Self {
            options,
            deps,
            installer: None,
            on_discovered: None,
            on_file: None,
        }
    }

    #[must_use]
    pub fn with_installer(mut self, installer: Arc<dyn DependencyInstaller>) -> Self {
        self.installer = Some(installer);
        self
    }

    /// Callback invoked once with the number of discovered files.
    #[must_use]
    pub fn on_discovered(mut self, callback: impl Fn(u64) + Send + Sync + 'static) -> Self {
        self.on_discovered = Some(Box::new(callback));
        self
    }

    /// Callback invoked from worker threads as each record finishes.
    #[must_use]
    pub fn on_file(mut self, callback: impl Fn(&FileRecord) + Send + Sync + 'static) -> Self {
        self.on_file = Some(Box::new(callback));
        self
    }

    /// Runs the scan to completion.
    ///
    /// # Errors
    /// Returns an error for invalid include patterns, a pool that fails to
    /// start, or cancellation. A missing root is logged and skipped, and
    /// per-file faults land in the records, never here.
    pub fn run(&self, token: &CancelToken) -> Result<ScanReport> {
        let started_at = Utc::now();

        let filter = IncludeFilter::new(&self.options.patterns)?;
        let scanner = DirectoryScanner::new(filter, self.options.recursive);

        let mut paths: Vec<PathBuf> = Vec::new();
        for root in &self.options.roots {
            let root = match dunce::canonicalize(root) {
                Ok(root) => root,
                Err(e) => {
                    warn!(root = %root.display(), error = %e, "skipping unreadable root");
                    continue;
                }
            };
            paths.extend(scanner.scan(&root)?);
        }
        paths.sort();
        paths.dedup();
        info!(files = paths.len(), "discovered candidate files");
        if let Some(callback) = &self.on_discovered {
            callback(paths.len() as u64);
        }

        let pool = match self.options.workers {
            Some(workers) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .build()
                    .map_err(|e| VeriscanError::WorkerPool(e.to_string()))?,
            ),
            None => None,
        };

        let check_all = || {
            paths
                .par_iter()
                .filter_map(|path| {
                    if token.is_cancelled() {
                        return None;
                    }
                    let record = self.check_one(path);
                    if let Some(callback) = &self.on_file {
                        callback(&record);
                    }
                    Some(record)
                })
                .collect::<Vec<_>>()
        };
        let records = match &pool {
            Some(pool) => pool.install(check_all),
            None => check_all(),
        };

        if token.is_cancelled() {
            return Err(VeriscanError::Cancelled);
        }

        Ok(ScanReport::from_records(records, started_at, Utc::now()))
    }

    fn check_one(&self, path: &Path) -> FileRecord {
        debug!(path = %path.display(), "checking file");
        match self.options.file_timeout {
            Some(budget) => self.check_with_watchdog(path, budget),
            None => {
                let result = panic::catch_unwind(AssertUnwindSafe(|| {
                    process_file(
                        path,
                        &self.deps,
                        self.installer.as_deref(),
                        self.options.negotiate,
                    )
                }));
                result.unwrap_or_else(|payload| {
                    FileRecord::unexpected_fault(path, &panic_message(&payload))
                })
            }
        }
    }

    /// Runs the pipeline on a watchdog thread so one pathological file
    /// cannot stall the batch. On timeout the thread is abandoned; it
    /// holds no shared state, so nothing is left inconsistent.
    fn check_with_watchdog(&self, path: &Path, budget: Duration) -> FileRecord {
        let (tx, rx) = mpsc::channel();
        let owned = path.to_path_buf();
        let deps = Arc::clone(&self.deps);
        let installer = self.installer.clone();
        let negotiate = self.options.negotiate;

        let spawned = thread::Builder::new()
            .name("veriscan-check".to_string())
            .spawn(move || {
                let result = panic::catch_unwind(AssertUnwindSafe(|| {
                    process_file(&owned, &deps, installer.as_deref(), negotiate)
                }));
                let _ = tx.send(result);
            });
        if let Err(e) = spawned {
            return FileRecord::unexpected_fault(path, &format!("worker spawn failed: {e}"));
        }

        match rx.recv_timeout(budget) {
            Ok(Ok(record)) => record,
            Ok(Err(payload)) => FileRecord::unexpected_fault(path, &panic_message(&payload)),
            Err(mpsc::RecvTimeoutError::Timeout) => {
                warn!(path = %path.display(), budget_secs = budget.as_secs(), "per-file budget exceeded");
                FileRecord::timed_out(path, budget.as_secs())
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                FileRecord::unexpected_fault(path, "worker thread terminated")
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}

/// The full single-file pipeline: hash, classify, validate, grade.
fn process_file(
    path: &Path,
    deps: &DependencyState,
    installer: Option<&dyn DependencyInstaller>,
    negotiate: bool,
) -> FileRecord {
    let mut record = FileRecord::new(path);

    let hashed = match hash::hash_file(path) {
        Ok(hashed) => hashed,
        Err(VeriscanError::Access { source, .. }) => {
            return FileRecord::inaccessible(path, &source);
        }
        Err(e) => return FileRecord::unexpected_fault(path, &e.to_string()),
    };

    record.size = hashed.size;
    record.modified = hashed.modified;
    record.permissions = hashed.permissions;
    record.readonly = hashed.readonly;
    record.sha256 = Some(hashed.sha256);
    record.blake3 = Some(hashed.blake3);

    // Sniffing is best-effort; a read fault here just means the
    // extension alone decides.
    let head = hash::read_head(path, HEAD_SAMPLE).ok();
    record.format = format::classify(path, head.as_deref());

    if record.size == 0 && record.format != format::FormatTag::Unknown {
        record.diagnostics.push(Diagnostic::info("file is empty"));
    }

    let ctx = CheckContext {
        size: record.size,
        deps,
        installer,
        negotiate,
    };
    let outcome = checker::run_checker(record.format, path, &ctx);
    if let Some(tag) = outcome.reclassified {
        record.format = tag;
    }
    record.specific_checks = outcome.finding;
    record.diagnostics.extend(outcome.diagnostics);
    record.finalize();

    record
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
