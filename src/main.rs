//! Budget Ledger CLI
//!
//! Interactive prompt for importing, querying and exporting personal
//! transactions.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- january.csv february.csv
//! cargo run -- --max-concurrent 4 --log-level debug data/*.csv
//! ```
//!
//! Files given on the command line are imported before the prompt starts.
//! Commands are read from stdin and their output is written to stdout; log
//! messages go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success (`exit` or end of input)
//! - 1: Error (runtime start-up failure, unreadable stdin, closed stdout)

use budget_ledger::cli::{self, CliArgs};
use budget_ledger::core::{ImportService, TransactionStore};
use budget_ledger::logging::init_logger;
use budget_ledger::{CommandLoop, LedgerError};
use std::process;
use std::sync::Arc;
use tokio::io::BufReader;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();
    init_logger(args.log_level.into());

    let config = args.to_import_config();
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.worker_threads())
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {}", e);
            process::exit(1);
        }
    };

    let repl = CommandLoop::new(Arc::new(TransactionStore::new()), ImportService::new(config));

    if let Err(e) = runtime.block_on(run(&args, &repl)) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(args: &CliArgs, repl: &CommandLoop) -> Result<(), LedgerError> {
    let mut stdout = std::io::stdout();

    if !args.files.is_empty() {
        repl.import_files(&args.files, &mut stdout).await?;
    }

    repl.run(BufReader::new(tokio::io::stdin()), &mut stdout)
        .await
}
