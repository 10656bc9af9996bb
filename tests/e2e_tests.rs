//! End-to-end integration tests
//!
//! These tests validate the complete import and export pipeline using
//! predefined CSV test fixtures. Each fixture test:
//! 1. Imports input.csv from a fixture directory into a fresh store
//! 2. Checks the import summary
//! 3. Exports the store as CSV
//! 4. Compares the export with expected.csv
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Happy path scenarios
//! - Malformed data and amount boundaries
//! - Duplicate ids within a file
//! - Blank lines and padded fields
//! - Quoting on export
//!
//! Each fixture is imported twice: once with a single permit and once with
//! several concurrent file permits. The remaining tests drive several files
//! at once and the command loop as a whole.

#[cfg(test)]
mod tests {
    use budget_ledger::cli::ExportFormat;
    use budget_ledger::strategy::create_exporter;
    use budget_ledger::{
        CommandLoop, ImportConfig, ImportOutcome, ImportService, Repository, TransactionStore,
    };
    use rstest::rstest;
    use std::fs;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use tempfile::{NamedTempFile, TempDir};
    use tokio_util::sync::CancellationToken;

    async fn import(
        paths: &[PathBuf],
        concurrency: usize,
    ) -> (Arc<TransactionStore>, ImportOutcome) {
        let store = Arc::new(TransactionStore::new());
        let service = ImportService::new(ImportConfig::new(concurrency));
        let outcome = service
            .import(paths, Arc::clone(&store), &CancellationToken::new())
            .await
            .unwrap_or_else(|e| panic!("Import failed: {}", e));
        (store, outcome)
    }

    fn export_csv(store: &TransactionStore) -> String {
        let mut output = Vec::new();
        create_exporter(ExportFormat::Csv)
            .export(&store.all(), &mut output)
            .unwrap_or_else(|e| panic!("Export failed: {}", e));
        String::from_utf8(output).expect("Export is not UTF-8")
    }

    fn normalize(content: &str) -> Vec<String> {
        content
            .lines()
            .map(|line| line.trim_end().to_string())
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Run a test fixture by importing input.csv and comparing the export with expected.csv
    ///
    /// # Arguments
    ///
    /// * `fixture_name` - Name of the fixture directory (e.g., "happy_path")
    /// * `concurrency` - Maximum number of files imported concurrently
    /// * `expected` - Expected import summary
    ///
    /// # Panics
    ///
    /// Panics if fixture files cannot be read or the export does not match.
    async fn run_test_fixture(fixture_name: &str, concurrency: usize, expected: ImportOutcome) {
        let fixture_dir = Path::new("tests/fixtures").join(fixture_name);
        let input_path = fixture_dir.join("input.csv");
        let expected_path = fixture_dir.join("expected.csv");

        assert!(input_path.exists(), "Input file not found: {}", input_path.display());
        assert!(
            expected_path.exists(),
            "Expected file not found: {}",
            expected_path.display()
        );

        let (store, outcome) = import(&[input_path], concurrency).await;
        assert_eq!(outcome, expected, "Import summary mismatch for fixture '{}'", fixture_name);
        assert_eq!(store.count(), expected.imported);

        let actual = export_csv(&store);
        let expected_output =
            fs::read_to_string(&expected_path).expect("Failed to read expected file");

        assert_eq!(
            normalize(&actual),
            normalize(&expected_output),
            "Output mismatch for fixture '{}'",
            fixture_name
        );
    }

    #[rstest]
    #[case("happy_path", ImportOutcome::new(3, 0, 0))]
    #[case("malformed_data", ImportOutcome::new(2, 0, 7))]
    #[case("duplicate_transactions", ImportOutcome::new(2, 2, 0))]
    #[case("blank_lines_and_whitespace", ImportOutcome::new(2, 0, 0))]
    #[case("export_quoting", ImportOutcome::new(2, 0, 0))]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_fixtures(
        #[case] fixture: &str,
        #[case] expected: ImportOutcome,
        #[values(1, 4)] concurrency: usize,
    ) {
        run_test_fixture(fixture, concurrency, expected).await;
    }

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes()).expect("Failed to write temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_many_files_account_for_every_line() {
        // Ten files, each with the ids 0..50 shifted by 25 per file, so
        // neighbouring files overlap by half.
        let files: Vec<NamedTempFile> = (0..10)
            .map(|file_index| {
                let mut content = String::from("Id,Timestamp,Payee,Amount,Currency,Category\n");
                for offset in 0..50 {
                    let id = file_index * 25 + offset;
                    content.push_str(&format!("{},2024-03-15,Payee {},-1.00,USD,\n", id, id));
                }
                content.push_str("garbage line\n");
                create_temp_csv(&content)
            })
            .collect();
        let paths: Vec<PathBuf> = files.iter().map(|f| f.path().to_path_buf()).collect();

        let (store, outcome) = import(&paths, 3).await;

        // Ids 0..275 are distinct
        assert_eq!(outcome.imported, 275);
        assert_eq!(outcome.duplicate, 500 - 275);
        assert_eq!(outcome.malformed, 10);
        assert_eq!(outcome.total(), 510);
        assert_eq!(store.count(), 275);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_missing_file_does_not_affect_others() {
        let good = create_temp_csv(
            "Id,Timestamp,Payee,Amount,Currency,Category\n1,2024-01-01,Shop,-3.00,USD,\n",
        );
        let paths = vec![
            PathBuf::from("tests/fixtures/does_not_exist.csv"),
            good.path().to_path_buf(),
        ];

        let (store, outcome) = import(&paths, 2).await;

        assert_eq!(outcome, ImportOutcome::new(1, 0, 0));
        assert!(store.try_get(1).is_some());
    }

    #[tokio::test]
    async fn test_crlf_line_endings() {
        let file = create_temp_csv(
            "Id,Timestamp,Payee,Amount,Currency,Category\r\n\
             1,2024-01-01,Shop,-3.00,USD,Food\r\n\
             \r\n\
             2,2024-01-02,Shop,-4.00,USD,Food\r\n",
        );

        let (store, outcome) = import(&[file.path().to_path_buf()], 1).await;

        assert_eq!(outcome, ImportOutcome::new(2, 0, 0));
        assert_eq!(store.try_get(2).unwrap().category(), "Food");
    }

    #[tokio::test]
    async fn test_command_loop_session() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let export_path = dir.path().join("ledger.json");
        let session = format!(
            "import tests/fixtures/happy_path/input.csv tests/fixtures/duplicate_transactions/input.csv\n\
             search coffee\n\
             over 0\n\
             set category 2 Treats\n\
             by category treat\n\
             stats month 2024-06\n\
             export json {}\n\
             exit\n\
             list all\n",
            export_path.display()
        );

        let repl = CommandLoop::new(
            Arc::new(TransactionStore::new()),
            ImportService::new(ImportConfig::new(2)),
        );
        let mut output = Vec::new();
        repl.run(session.as_bytes(), &mut output)
            .await
            .expect("Command loop failed");
        let output = String::from_utf8(output).unwrap();

        // Ids 1 and 2 appear in both files; whichever file wins, the other
        // contributes duplicates
        assert!(output.contains("Imported: 3, Duplicates: 4, Malformed: 0"));
        assert!(output.contains("200 OK."));
        assert!(output.contains("Stats for month 2024-06:"));
        assert!(output.contains("Export completed:"));
        assert!(output.trim_end().ends_with("Goodbye!"));

        let exported: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&export_path).unwrap()).unwrap();
        let rows = exported.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1]["Id"], 2);
        assert_eq!(rows[1]["Category"], "Treats");
    }
}
