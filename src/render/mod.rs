use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::Report;

mod json;
mod markdown;
mod text;

pub use json::render as render_json;
pub use markdown::render as render_markdown;
pub use text::render as render_text;

pub(crate) const TITLE: &str = "py-env-doctor: environment check";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    #[value(alias = "markdown")]
    Md,
}

impl ReportFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            ReportFormat::Text => "text",
            ReportFormat::Json => "json",
            ReportFormat::Md => "md",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "md" | "markdown" => Ok(ReportFormat::Md),
            other => Err(format!("invalid report format: {other} (expected text|json|md)")),
        }
    }
}

impl TryFrom<String> for ReportFormat {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

pub fn render(report: &Report, format: ReportFormat) -> anyhow::Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(report)),
        ReportFormat::Json => render_json(report),
        ReportFormat::Md => Ok(render_markdown(report)),
    }
}

pub(crate) fn yes_no(v: bool) -> &'static str {
    if v { "yes" } else { "no" }
}

pub(crate) fn pep668_label(externally_managed: bool) -> &'static str {
    if externally_managed {
        "EXTERNALLY MANAGED"
    } else {
        "No"
    }
}
