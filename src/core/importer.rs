//! Concurrent import of transaction files
//!
//! This module provides the `ImportService`, which reads several delimited
//! files concurrently and inserts their records into a shared store.
//!
//! # Architecture
//!
//! ```text
//! ImportService::import
//!     ├── Semaphore (max_concurrent_files permits)
//!     ├── one tokio task per file
//!     │     └── LineReader → parse_record → Repository::try_add
//!     └── ImportCounters (atomics shared by all tasks)
//! ```
//!
//! # Failure Handling
//!
//! Malformed and duplicate records are data, not faults: they are counted and
//! logged, and the file carries on. A missing or unreadable file is logged and
//! skipped; the other files are unaffected. Only cancellation ends an import
//! without a summary.
//!
//! # Cancellation
//!
//! The token is checked before each file starts (including while waiting for a
//! permit) and before each line. Records already inserted stay in the store.

use crate::core::parser::parse_record;
use crate::core::traits::Repository;
use crate::io::line_reader::{LineReader, RawLine};
use crate::types::{ImportOutcome, LedgerError, LineOutcome, Transaction};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

/// Configuration for file imports
#[derive(Clone, Debug)]
pub struct ImportConfig {
    /// Maximum number of files read concurrently
    pub max_concurrent_files: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_concurrent_files: num_cpus::get(),
        }
    }
}

impl ImportConfig {
    /// Create a new ImportConfig; zero falls back to the default
    pub fn new(max_concurrent_files: usize) -> Self {
        let default = Self::default();

        let max_concurrent_files = if max_concurrent_files == 0 {
            warn!(
                "Invalid max_concurrent_files ({}), using default ({})",
                max_concurrent_files, default.max_concurrent_files
            );
            default.max_concurrent_files
        } else {
            max_concurrent_files
        };

        Self {
            max_concurrent_files,
        }
    }

    /// Runtime worker threads for this configuration
    ///
    /// File concurrency is enforced by a semaphore, so the thread count is
    /// capped at the number of CPUs whatever `max_concurrent_files` is.
    pub fn worker_threads(&self) -> usize {
        self.max_concurrent_files.min(num_cpus::get()).max(1)
    }
}

/// Outcome counters shared by all file tasks of one import
#[derive(Debug, Default)]
struct ImportCounters {
    imported: AtomicUsize,
    duplicate: AtomicUsize,
    malformed: AtomicUsize,
}

impl ImportCounters {
    fn record(&self, outcome: LineOutcome) {
        let counter = match outcome {
            LineOutcome::Imported => &self.imported,
            LineOutcome::Duplicate => &self.duplicate,
            LineOutcome::Malformed => &self.malformed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    // Only called after every task has been joined
    fn snapshot(&self) -> ImportOutcome {
        ImportOutcome::new(
            self.imported.load(Ordering::Relaxed),
            self.duplicate.load(Ordering::Relaxed),
            self.malformed.load(Ordering::Relaxed),
        )
    }
}

/// Imports delimited transaction files into a repository
#[derive(Debug, Clone, Default)]
pub struct ImportService {
    config: ImportConfig,
}

impl ImportService {
    /// Create a new ImportService with the given configuration
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    /// Import every file in `paths` into `store`
    ///
    /// Files are processed concurrently, at most
    /// `max_concurrent_files` at a time. Within a file, lines are processed in
    /// order, so the first occurrence of an id in a file wins over later ones.
    ///
    /// # Arguments
    ///
    /// * `paths` - Files to import; missing files are logged and skipped
    /// * `store` - Shared destination repository
    /// * `cancel` - Cooperative cancellation signal
    ///
    /// # Returns
    ///
    /// * `Ok(ImportOutcome)` - Counts of imported, duplicate and malformed lines
    /// * `Err(LedgerError::Cancelled)` - The token was cancelled; no summary is
    ///   available even though some records may already be in the store
    pub async fn import<R>(
        &self,
        paths: &[PathBuf],
        store: Arc<R>,
        cancel: &CancellationToken,
    ) -> Result<ImportOutcome, LedgerError>
    where
        R: Repository<Transaction> + 'static,
    {
        if paths.is_empty() {
            warn!("No files provided for import.");
            return Ok(ImportOutcome::default());
        }

        let counters = Arc::new(ImportCounters::default());
        let limiter = Arc::new(Semaphore::new(self.config.max_concurrent_files.max(1)));

        let tasks: Vec<_> = paths
            .iter()
            .cloned()
            .map(|path| {
                let store = Arc::clone(&store);
                let counters = Arc::clone(&counters);
                let limiter = Arc::clone(&limiter);
                let cancel = cancel.clone();

                tokio::spawn(async move {
                    let _permit = tokio::select! {
                        _ = cancel.cancelled() => return,
                        permit = limiter.acquire_owned() => match permit {
                            Ok(permit) => permit,
                            Err(_) => return,
                        },
                    };
                    import_file(&path, store.as_ref(), &counters, &cancel).await;
                })
            })
            .collect();

        for result in futures::future::join_all(tasks).await {
            if let Err(e) = result {
                error!("File import task failed: {}", e);
            }
        }

        if cancel.is_cancelled() {
            warn!("Import cancelled.");
            return Err(LedgerError::Cancelled);
        }

        let outcome = counters.snapshot();
        info!("Import finished. {}", outcome);
        Ok(outcome)
    }
}

/// Import a single file, returning its own tally
async fn import_file<R>(
    path: &Path,
    store: &R,
    counters: &ImportCounters,
    cancel: &CancellationToken,
) -> ImportOutcome
where
    R: Repository<Transaction>,
{
    let mut tally = ImportOutcome::default();

    if cancel.is_cancelled() {
        return tally;
    }

    let file = match tokio::fs::File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("{}", LedgerError::file_not_found(path));
            return tally;
        }
        Err(e) => {
            error!("Failed to open file '{}': {}", path.display(), e);
            return tally;
        }
    };

    info!("Importing file: {}", path.display());
    let mut reader = LineReader::new(BufReader::new(file));

    loop {
        if cancel.is_cancelled() {
            warn!("Import cancelled while reading: {}", path.display());
            return tally;
        }

        let line = match reader.next_line().await {
            None => break,
            Some(Ok(line)) => line,
            Some(Err(e)) if e.is_io_error() => {
                error!(
                    "Stopped reading '{}' after line {}: {}",
                    path.display(),
                    reader.lines_read(),
                    e
                );
                break;
            }
            Some(Err(e)) => {
                warn!("{} (file: {})", e, path.display());
                counters.record(LineOutcome::Malformed);
                tally.record(LineOutcome::Malformed);
                continue;
            }
        };

        if line.is_blank() {
            continue;
        }

        let outcome = apply_line(&line, path, store);
        counters.record(outcome);
        tally.record(outcome);
    }

    if tally.total() == 0 {
        warn!("File has no data lines: {}", path.display());
    } else {
        info!("Finished file {}: {}", path.display(), tally);
    }

    tally
}

/// Parse one line and try to insert the result
fn apply_line<R>(line: &RawLine, path: &Path, store: &R) -> LineOutcome
where
    R: Repository<Transaction>,
{
    let transaction = match parse_record(&line.fields, line.number) {
        Ok(transaction) => transaction,
        Err(e) => {
            warn!("{} (file: {})", e, path.display());
            return LineOutcome::Malformed;
        }
    };

    let id = transaction.id();
    if store.try_add(transaction) {
        debug!("Imported id {} from {} line {}", id, path.display(), line.number);
        LineOutcome::Imported
    } else {
        warn!(
            "Duplicate Id {} skipped (file: {}, line {}).",
            id,
            path.display(),
            line.number
        );
        LineOutcome::Duplicate
    }
}
