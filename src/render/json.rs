use anyhow::{Context, Result};

use crate::core::Report;

pub fn render(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize report")
}
