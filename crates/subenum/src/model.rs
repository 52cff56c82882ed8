use crate::error::SourceError;
use crate::Result;
use serde_json::to_string_pretty;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

// region:        --- Models

/// What a worker yields on the shared result channel.
#[derive(Debug)]
pub enum ScanEvent {
    Subdomain(String),
    SourceFailed(SourceFailure),
}

#[derive(Debug)]
pub struct SourceFailure {
    pub domain: String,
    pub source: String,
    pub url: String,
    pub error: SourceError,
}

#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Sorted, no duplicates.
    pub subdomains: Vec<String>,
    pub failures: Vec<SourceFailure>,
}

// endregion:     --- Models

// region:        --- Importing utils

/// One domain per line, trimmed; blank lines and `#` comments are skipped.
pub fn read_domains(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_domains(&content))
}

fn parse_domains(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

// endregion:     --- Importing utils

// region:        --- Exporting utils

pub fn ensure_dir(dir: &Path) -> Result<bool> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        Ok(false)
    } else {
        fs::create_dir_all(dir)?;
        Ok(true)
    }
}

pub fn export_to_text(subdomains: &[String], path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for subdomain in subdomains {
        writeln!(writer, "{}", subdomain)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn export_to_json(subdomains: &[String], path: &Path) -> Result<()> {
    let json = to_string_pretty(subdomains)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

// endregion:     --- Exporting utils
