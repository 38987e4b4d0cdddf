use colored::Colorize;
use futures_util::stream::{BoxStream, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::client::SyncroClient;
use crate::error::Result;
use crate::paginate::Record;

/// What an export wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub columns: usize,
    pub rows: usize,
    pub pages: usize,
    /// Records carrying keys that are not in the header row.
    pub drifted: usize,
    pub elapsed: Duration,
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} contacts, {} columns, {} pages in {}",
            self.rows,
            self.columns,
            self.pages,
            format_duration(self.elapsed)
        )
    }
}

pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_secs_f64() * 1000.0;

    if total_ms < 1000.0 {
        format!("{:.2} ms", total_ms)
    } else {
        format!("{:.2} s", total_ms / 1000.0)
    }
}

/// Render one JSON value as a CSV cell.
///
/// Strings are written as is, `null` as an empty cell, everything else as
/// compact JSON.
pub fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Lay `record` out under `headers`. Missing keys become empty cells; keys
/// not in `headers` are left out.
pub fn row(headers: &[String], record: &Record) -> Vec<String> {
    headers
        .iter()
        .map(|h| record.get(h).map(cell).unwrap_or_default())
        .collect()
}

fn has_extra_keys(headers: &[String], record: &Record) -> bool {
    record.keys().any(|k| !headers.contains(k))
}

fn progress_bar() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} {pos} contacts written") {
        pb.set_style(style);
    }
    pb.set_message("Exporting".cyan().to_string());
    pb
}

async fn write_pages<W: std::io::Write>(
    mut batches: BoxStream<'_, Result<Vec<Record>>>,
    headers: &[String],
    writer: &mut csv::Writer<W>,
    pb: &ProgressBar,
    summary: &mut ExportSummary,
) -> Result<()> {
    while let Some(batch) = batches.next().await {
        let batch = batch?;
        for record in &batch {
            if has_extra_keys(headers, record) {
                summary.drifted += 1;
            }
            writer.write_record(row(headers, record))?;
        }
        writer.flush()?;

        summary.pages += 1;
        summary.rows += batch.len();
        pb.set_position(summary.rows as u64);
    }
    Ok(())
}

/// Write every contact (optionally only those of `customer_id`) to `outfile` as CSV.
///
/// The header row comes from the first contact of a separate one-page
/// listing. The file is truncated first and every page is flushed as soon as
/// it is written; on failure whatever was already written stays on disk.
pub async fn export_contacts(
    client: &SyncroClient,
    outfile: &Path,
    customer_id: Option<&str>,
) -> Result<ExportSummary> {
    let started = Instant::now();
    let contacts = client.contacts();

    let headers = contacts.headers(customer_id).await?;
    log::debug!("CSV columns: {}", headers.join(","));

    match customer_id {
        None => log::info!("Downloading all contacts in Syncro"),
        Some(id) => log::info!("Downloading all contacts for customer {} in Syncro", id),
    }

    let mut writer = csv::Writer::from_path(outfile)?;
    writer.write_record(&headers)?;
    writer.flush()?;

    let pb = progress_bar();
    let mut summary = ExportSummary {
        columns: headers.len(),
        rows: 0,
        pages: 0,
        drifted: 0,
        elapsed: Duration::ZERO,
    };

    let batches = contacts.all(customer_id);
    if let Err(e) = write_pages(batches, &headers, &mut writer, &pb, &mut summary).await {
        pb.abandon();
        return Err(e);
    }

    pb.finish_and_clear();

    if summary.drifted > 0 {
        log::warn!(
            "{} contacts had fields not in the header row; those fields were not exported",
            summary.drifted
        );
    }

    summary.elapsed = started.elapsed();
    Ok(summary)
}
