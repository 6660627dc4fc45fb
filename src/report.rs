use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Envelope written by `--out`: the computed view plus provenance for the
/// source CSV it was derived from.
#[derive(Debug, Clone, Serialize)]
pub struct Report<T: Serialize> {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_path: String,
    pub source_sha256: String,
    pub record_count: usize,
    pub filtered_count: usize,
    pub view: T,
}

impl<T: Serialize> Report<T> {
    pub fn new(
        source: &Path,
        record_count: usize,
        filtered_count: usize,
        view: T,
    ) -> Result<Self> {
        Ok(Self {
            manifest_version: 1,
            generated_at: now_utc_string(),
            source_path: source.display().to_string(),
            source_sha256: sha256_file(source)?,
            record_count,
            filtered_count,
            view,
        })
    }
}

pub fn now_utc_string() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn write_report<T: Serialize>(path: &Path, report: &Report<T>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
    }

    let data = serde_json::to_vec_pretty(report)
        .with_context(|| format!("failed to serialize report: {}", path.display()))?;

    let mut file = File::create(path)
        .with_context(|| format!("failed to create report file: {}", path.display()))?;
    file.write_all(&data)
        .with_context(|| format!("failed to write report file: {}", path.display()))?;
    file.write_all(b"\n")
        .with_context(|| format!("failed to finalize report file: {}", path.display()))?;

    Ok(())
}

/// Pretty JSON to a locked stdout, for `--json`.
pub fn print_json<T: Serialize>(view: &T) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, view).context("failed to serialize json output")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)
        .with_context(|| format!("failed to open file for hashing: {}", path.display()))?;

    let mut hasher = Sha256::new();
    let mut buf = [0_u8; 8192];

    loop {
        let count = file
            .read(&mut buf)
            .with_context(|| format!("failed to read file for hashing: {}", path.display()))?;
        if count == 0 {
            break;
        }
        hasher.update(&buf[..count]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_envelope_serializes_provenance_fields() {
        let report = Report {
            manifest_version: 1,
            generated_at: now_utc_string(),
            source_path: "evals.csv".to_string(),
            source_sha256: "deadbeef".to_string(),
            record_count: 10,
            filtered_count: 4,
            view: vec![1, 2, 3],
        };

        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("generated_at").is_some());
        assert_eq!(value["source_sha256"], "deadbeef");
        assert_eq!(value["record_count"], 10);
        assert_eq!(value["filtered_count"], 4);
        assert_eq!(value["view"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn timestamps_are_rfc3339_utc() {
        let ts = now_utc_string();
        assert!(ts.ends_with('Z'));
        assert!(ts.contains('T'));
    }
}
