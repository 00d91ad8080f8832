use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use duckboard_app::config::AppConfig;
use duckboard_app::ports::{MetadataError, MetadataProvider, QueryError, QueryGateway};
use duckboard_domain::ColumnarResult;

const DUCKDB_EXTENSION: &str = "duckdb";
const LIST_TABLES_SQL: &str = "SHOW TABLES";

/// Runs statements through the `duckdb` command line client in read-only mode.
///
/// Each call spawns one process; dropping the future (cancellation or timeout)
/// kills it.
pub struct DuckDbCliAdapter {
    bin: String,
    timeout_secs: u64,
}

impl DuckDbCliAdapter {
    pub fn new(bin: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            bin: bin.into(),
            timeout_secs,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.duckdb_bin.clone(), config.query_timeout_secs)
    }

    async fn execute_csv(
        &self,
        database_path: &str,
        sql: &str,
    ) -> Result<ColumnarResult, MetadataError> {
        validate_database_path(database_path)?;
        let start = Instant::now();

        let mut child = Command::new(&self.bin)
            .arg("-readonly")
            .arg("-csv")
            .arg("-c")
            .arg(sql)
            .arg(database_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| MetadataError::CommandNotFound(format!("{}: {e}", self.bin)))?;

        let mut stdout_handle = child.stdout.take();
        let mut stderr_handle = child.stderr.take();

        let result = timeout(Duration::from_secs(self.timeout_secs), async {
            let (stdout_result, stderr_result) = tokio::join!(
                async {
                    let mut buf = Vec::new();
                    if let Some(ref mut out) = stdout_handle {
                        out.read_to_end(&mut buf).await?;
                    }
                    Ok::<_, std::io::Error>(String::from_utf8_lossy(&buf).into_owned())
                },
                async {
                    let mut buf = Vec::new();
                    if let Some(ref mut err) = stderr_handle {
                        err.read_to_end(&mut buf).await?;
                    }
                    Ok::<_, std::io::Error>(String::from_utf8_lossy(&buf).into_owned())
                }
            );

            let stdout = stdout_result?;
            let stderr = stderr_result?;
            let status = child.wait().await?;

            Ok::<_, std::io::Error>((status, stdout, stderr))
        })
        .await
        .map_err(|_| MetadataError::Timeout)?
        .map_err(|e| MetadataError::QueryFailed(e.to_string()))?;

        let elapsed = start.elapsed().as_millis() as u64;
        let (status, stdout, stderr) = result;

        if !status.success() {
            let message = if stderr.trim().is_empty() {
                format!("duckdb exited with {status}")
            } else {
                stderr.trim().to_string()
            };
            return Err(MetadataError::QueryFailed(message));
        }

        debug!(path = %database_path, elapsed_ms = elapsed, "duckdb statement finished");
        parse_csv(&stdout, elapsed)
    }
}

/// Only existing files with the `.duckdb` extension are accepted.
fn validate_database_path(database_path: &str) -> Result<(), MetadataError> {
    let path = Path::new(database_path);
    let has_extension = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DUCKDB_EXTENSION));
    if !has_extension || !path.is_file() {
        return Err(MetadataError::InvalidPath(database_path.to_string()));
    }
    Ok(())
}

fn parse_csv(stdout: &str, elapsed_ms: u64) -> Result<ColumnarResult, MetadataError> {
    if stdout.trim().is_empty() {
        return Ok(ColumnarResult::new(Vec::new(), Vec::new(), elapsed_ms));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(stdout.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| MetadataError::ParseError(format!("CSV parse error: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| MetadataError::ParseError(format!("CSV parse error: {e}")))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(ColumnarResult::new(columns, rows, elapsed_ms))
}

/// `SHOW TABLES` answers with a single `name` column.
fn table_names(result: &ColumnarResult) -> Result<Vec<String>, MetadataError> {
    if result.columns.is_empty() {
        return Ok(Vec::new());
    }
    result
        .column("name")
        .map(|names| names.into_iter().map(str::to_string).collect())
        .ok_or_else(|| MetadataError::ParseError("SHOW TABLES returned no name column".to_string()))
}

#[async_trait]
impl QueryGateway for DuckDbCliAdapter {
    async fn execute(&self, database_path: &str, sql: &str) -> Result<ColumnarResult, QueryError> {
        self.execute_csv(database_path, sql)
            .await
            .map_err(|e| match e {
                MetadataError::QueryFailed(message) => QueryError::new(message),
                other => QueryError::new(other.to_string()),
            })
    }
}

#[async_trait]
impl MetadataProvider for DuckDbCliAdapter {
    async fn list_tables(&self, database_path: &str) -> Result<Vec<String>, MetadataError> {
        let result = self.execute_csv(database_path, LIST_TABLES_SQL).await?;
        table_names(&result)
    }
}
