use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::render::ReportFormat;

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
    pub runtime: RuntimeConfig,
    pub probe: ProbeConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RuntimeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeConfig {
    pub timeout_secs: u64,
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportConfig {
    pub format: ReportFormat,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            probe: ProbeConfig {
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            report: ReportConfig {
                format: ReportFormat::Text,
            },
            config_path: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    runtime: Option<RawRuntimeConfig>,
    probe: Option<RawProbeConfig>,
    report: Option<RawReportConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRuntimeConfig {
    python: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProbeConfig {
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawReportConfig {
    format: Option<ReportFormat>,
}

pub fn default_config_path(home_dir: &Path) -> PathBuf {
    home_dir.join(".config/py-env-doctor/config.toml")
}

pub fn load(config_path: Option<&Path>, home_dir: Option<&Path>) -> Result<EffectiveConfig> {
    let mut cfg = EffectiveConfig::default();

    let path = config_path
        .map(ToOwned::to_owned)
        .or_else(|| home_dir.map(default_config_path));

    if let Some(path) = path {
        if config_path.is_some() || path.exists() {
            let s = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file: {}", path.display()))?;
            let raw: RawConfig = toml::from_str(&s)
                .with_context(|| format!("failed to parse config file (TOML): {}", path.display()))?;
            apply_raw_config(&mut cfg, raw);
            cfg.config_path = Some(path.display().to_string());
            tracing::debug!(path = %path.display(), "config file loaded");
        }
    }

    apply_env_overrides(&mut cfg)?;

    Ok(cfg)
}

fn apply_raw_config(cfg: &mut EffectiveConfig, raw: RawConfig) {
    if let Some(runtime) = raw.runtime {
        if let Some(python) = runtime.python {
            cfg.runtime.python = non_empty(&python);
        }
    }

    if let Some(probe) = raw.probe {
        if let Some(timeout_secs) = probe.timeout_secs {
            cfg.probe.timeout_secs = timeout_secs;
        }
    }

    if let Some(report) = raw.report {
        if let Some(format) = report.format {
            cfg.report.format = format;
        }
    }
}

fn apply_env_overrides(cfg: &mut EffectiveConfig) -> Result<()> {
    if let Ok(v) = std::env::var("PY_ENV_DOCTOR_PYTHON") {
        if let Some(python) = non_empty(&v) {
            cfg.runtime.python = Some(python);
        }
    }
    if let Ok(v) = std::env::var("PY_ENV_DOCTOR_PROBE_TIMEOUT_SECS") {
        cfg.probe.timeout_secs = v
            .trim()
            .parse::<u64>()
            .with_context(|| "PY_ENV_DOCTOR_PROBE_TIMEOUT_SECS")?;
    }
    if let Ok(v) = std::env::var("PY_ENV_DOCTOR_REPORT_FORMAT") {
        cfg.report.format = v
            .parse::<ReportFormat>()
            .map_err(anyhow::Error::msg)
            .with_context(|| "PY_ENV_DOCTOR_REPORT_FORMAT")?;
    }

    Ok(())
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
