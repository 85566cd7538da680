use crate::core::{AdviceItem, Issue, PipInfo, ProjectInfo, RuntimeInfo};
use serde::{Deserialize, Serialize};

pub const REPORT_TYPE: &str = "py_env_doctor_report";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "type")]
    pub report_type: String,
    pub generated_at: String,
    pub python: RuntimeInfo,
    pub pip: PipInfo,
    pub project: ProjectInfo,
    pub issues: Vec<Issue>,
    pub advice: Vec<AdviceItem>,
}
