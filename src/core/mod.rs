mod advice;
mod issue;
mod pip;
mod project;
mod report;
mod runtime;

pub use advice::AdviceItem;
pub use issue::{Issue, IssueCode, Severity};
pub use pip::{PipBinary, PipInfo};
pub use project::{Importability, ProjectInfo, normalize_import_name};
pub use report::{REPORT_TYPE, Report};
pub use runtime::{EnvironmentKind, PlatformInfo, RuntimeInfo, UNKNOWN, major_minor};
