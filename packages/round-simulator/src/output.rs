//! Output writers for per-round records.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::metrics::{CsvRoundRow, RoundMetrics};

pub struct OutputWriter {
    jsonl_writer: BufWriter<File>,
    csv_writer: csv::Writer<BufWriter<File>>,
    jsonl_path: PathBuf,
    csv_path: PathBuf,
}

impl OutputWriter {
    pub fn new(output_dir: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let dir = Path::new(output_dir);
        std::fs::create_dir_all(dir)?;

        let timestamp = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| "unknown".to_string())
            .replace(':', "-");

        let jsonl_path = dir.join(format!("rounds_{timestamp}.jsonl"));
        let jsonl_writer = BufWriter::new(create_truncated(&jsonl_path)?);

        let csv_path = dir.join(format!("rounds_{timestamp}_summary.csv"));
        let csv_writer = csv::Writer::from_writer(BufWriter::new(create_truncated(&csv_path)?));

        Ok(Self {
            jsonl_writer,
            csv_writer,
            jsonl_path,
            csv_path,
        })
    }

    pub fn write_round(
        &mut self,
        metrics: &RoundMetrics,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string(metrics)?;
        writeln!(self.jsonl_writer, "{json}")?;

        // The header row comes from the first serialized record.
        self.csv_writer.serialize(CsvRoundRow::from(metrics))?;
        Ok(())
    }

    /// Flush both files and return their paths.
    pub fn finish(mut self) -> Result<(PathBuf, PathBuf), Box<dyn std::error::Error>> {
        self.jsonl_writer.flush()?;
        self.csv_writer.flush()?;
        Ok((self.jsonl_path, self.csv_path))
    }
}

fn create_truncated(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
}
