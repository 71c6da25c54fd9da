//! JSON run report, for CI systems that post-process results.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::models::{RunTally, ScenarioResult};

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub summary: RunTally,
    pub results: &'a [ScenarioResult],
}

impl<'a> JsonReport<'a> {
    pub fn new(results: &'a [ScenarioResult]) -> Self {
        Self {
            generated_at: Utc::now(),
            summary: RunTally::from_results(results),
            results,
        }
    }
}

pub fn write_json_report(results: &[ScenarioResult], output_path: &Path) -> Result<()> {
    let report = JsonReport::new(results);
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize JSON report")?;
    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;
    Ok(())
}
