//! Interactive command dispatcher
//!
//! # Architecture
//!
//! ```text
//! input line ──► ReplLine (clap) ──► CommandLoop::execute
//!                                        ├── ImportService::import   (Ctrl-C cancels)
//!                                        ├── report::* / printer::*  (read-only, on a snapshot)
//!                                        ├── Repository::update / remove
//!                                        └── strategy::create_exporter
//! ```
//!
//! Command output goes to the supplied writer; diagnostics go to the logger.
//! The loop ends on `exit` or end of input.

use crate::app::printer::{print_monthly_stats, print_transactions, print_yearly_stats};
use crate::app::report::{self, MonthlyStats, YearlyStats};
use crate::cli::command::{
    join_words, ByTarget, Command, ListScope, RenameTarget, ReplLine, SetTarget, StatsPeriod,
};
use crate::cli::ExportFormat;
use crate::core::{ImportService, Repository, TransactionStore};
use crate::strategy::create_exporter;
use crate::types::{LedgerError, TransactionId};
use log::{error, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio_util::sync::CancellationToken;

const PROMPT: &str = "> ";

/// Whether the loop keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Reads commands line by line and applies them to a shared store
pub struct CommandLoop {
    store: Arc<TransactionStore>,
    importer: ImportService,
}

impl CommandLoop {
    pub fn new(store: Arc<TransactionStore>, importer: ImportService) -> Self {
        Self { store, importer }
    }

    pub fn store(&self) -> &Arc<TransactionStore> {
        &self.store
    }

    /// Run until `exit` or end of input
    ///
    /// # Errors
    ///
    /// Only failures to read `input` or write `out` end the loop with an
    /// error; command failures are reported to `out` and the loop continues.
    pub async fn run<I>(&self, input: I, out: &mut dyn Write) -> Result<(), LedgerError>
    where
        I: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();

        writeln!(out, "Budget ledger")?;
        writeln!(out, "Type 'help' to see available commands. Type 'exit' to quit.")?;
        writeln!(out)?;

        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out)?;
                break;
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if self.execute(line, &mut lines, out).await? == Flow::Exit {
                writeln!(out, "Goodbye!")?;
                break;
            }
        }
        Ok(())
    }

    /// Parse and apply a single command line
    ///
    /// `input` is only read when a command needs confirmation.
    pub async fn execute<I>(
        &self,
        line: &str,
        input: &mut Lines<I>,
        out: &mut dyn Write,
    ) -> Result<Flow, LedgerError>
    where
        I: AsyncBufRead + Unpin,
    {
        let command = match ReplLine::parse_line(line) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                write!(out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Import { files } => {
                let paths: Vec<PathBuf> = files.iter().map(PathBuf::from).collect();
                self.import_files(&paths, out).await?;
            }
            Command::List { scope } => {
                let snapshot = self.store.all();
                let selected = match scope {
                    ListScope::All => snapshot,
                    ListScope::Month { month } => report::in_month(&snapshot, month),
                };
                print_transactions(out, &selected)?;
            }
            Command::By {
                target: ByTarget::Category { name },
            } => {
                let selected = report::by_category(&self.store.all(), &join_words(&name));
                print_transactions(out, &selected)?;
            }
            Command::Over { amount } => {
                let selected = report::over_amount(&self.store.all(), amount);
                print_transactions(out, &selected)?;
            }
            Command::Search { text } => {
                let selected = report::search(&self.store.all(), &join_words(&text));
                print_transactions(out, &selected)?;
            }
            Command::Set {
                target: SetTarget::Category { id, name },
            } => {
                let result = self.set_category(id, &join_words(&name));
                write_status(out, result)?;
            }
            Command::Rename {
                target: RenameTarget::Category { old, new },
            } => self.rename_category(&old, &join_words(&new), out)?,
            Command::Remove { id } => {
                let result = self.remove(id);
                write_status(out, result)?;
            }
            Command::Stats {
                period: StatsPeriod::Month { month },
            } => match MonthlyStats::compute(&self.store.all(), month) {
                Some(stats) => print_monthly_stats(out, &stats)?,
                None => writeln!(out, "No transactions found for month {}.", month)?,
            },
            Command::Stats {
                period: StatsPeriod::Yearly { year },
            } => match YearlyStats::compute(&self.store.all(), year) {
                Some(stats) => print_yearly_stats(out, &stats)?,
                None => writeln!(out, "No transactions found for year {}.", year)?,
            },
            Command::Export {
                format,
                path,
                force,
            } => {
                let path = PathBuf::from(join_words(&path));
                if !force && path.exists() && !confirm_overwrite(&path, input, out).await? {
                    writeln!(out, "Export cancelled by user.")?;
                } else {
                    self.export(format, &path, out)?;
                }
            }
            Command::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    /// Import `paths`, cancelling on Ctrl-C, and print the summary
    pub async fn import_files(
        &self,
        paths: &[PathBuf],
        out: &mut dyn Write,
    ) -> Result<(), LedgerError> {
        let cancel = CancellationToken::new();
        let import = self.importer.import(paths, Arc::clone(&self.store), &cancel);
        tokio::pin!(import);

        let result = tokio::select! {
            result = &mut import => result,
            Ok(()) = tokio::signal::ctrl_c() => {
                cancel.cancel();
                import.await
            }
        };

        match result {
            Ok(outcome) => writeln!(out, "{}", outcome)?,
            Err(LedgerError::Cancelled) => writeln!(out, "Import cancelled.")?,
            Err(e) => {
                error!("Import failed: {}", e);
                writeln!(out, "Import failed: {}", e)?;
            }
        }
        Ok(())
    }

    /// Change the category of one transaction
    ///
    /// # Errors
    ///
    /// `LedgerError::TransactionNotFound` when no transaction has `id`.
    pub fn set_category(&self, id: TransactionId, name: &str) -> Result<(), LedgerError> {
        self.store
            .update(id, |transaction| transaction.set_category(name))
            .ok_or_else(|| LedgerError::transaction_not_found(id))?;
        info!("Set category of transaction {} to '{}'", id, name);
        Ok(())
    }

    /// Remove one transaction
    ///
    /// # Errors
    ///
    /// `LedgerError::TransactionNotFound` when no transaction has `id`.
    pub fn remove(&self, id: TransactionId) -> Result<(), LedgerError> {
        if !self.store.remove(id) {
            return Err(LedgerError::transaction_not_found(id));
        }
        info!("Removed transaction {}", id);
        Ok(())
    }

    fn rename_category(
        &self,
        old: &str,
        new: &str,
        out: &mut dyn Write,
    ) -> Result<(), LedgerError> {
        let old_lower = old.to_lowercase();
        let updated = self.store.update_each(|transaction| {
            if transaction.category().to_lowercase() == old_lower {
                transaction.set_category(new);
                true
            } else {
                false
            }
        });

        info!("Renamed category '{}' to '{}' on {} transactions", old, new, updated);
        writeln!(
            out,
            "Renamed category '{}' to '{}' on {} transaction(s).",
            old, new, updated
        )?;
        Ok(())
    }

    fn export(
        &self,
        format: ExportFormat,
        path: &Path,
        out: &mut dyn Write,
    ) -> Result<(), LedgerError> {
        let snapshot = self.store.all();

        let result = File::create(path)
            .map_err(LedgerError::from)
            .and_then(|file| {
                let mut writer = BufWriter::new(file);
                create_exporter(format).export(&snapshot, &mut writer)?;
                writer.flush()?;
                Ok(())
            });

        match result {
            Ok(()) => writeln!(out, "Export completed: {}", path.display())?,
            Err(e) => {
                error!("Export to '{}' failed: {}", path.display(), e);
                writeln!(out, "Export failed. See logs for details.")?;
            }
        }
        Ok(())
    }
}

/// Report a single-transaction change as `200 OK.` or `404 Not Found.`
fn write_status(out: &mut dyn Write, result: Result<(), LedgerError>) -> Result<(), LedgerError> {
    match result {
        Ok(()) => writeln!(out, "200 OK.")?,
        Err(LedgerError::TransactionNotFound { .. }) => writeln!(out, "404 Not Found.")?,
        Err(e) => return Err(e),
    }
    Ok(())
}

async fn confirm_overwrite<I>(
    path: &Path,
    input: &mut Lines<I>,
    out: &mut dyn Write,
) -> Result<bool, LedgerError>
where
    I: AsyncBufRead + Unpin,
{
    write!(out, "File '{}' exists. Overwrite? (y/n): ", path.display())?;
    out.flush()?;

    let answer = input.next_line().await?.unwrap_or_default();
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
