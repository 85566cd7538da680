use crate::core::{
    EnvironmentKind, Importability, Issue, IssueCode, PipInfo, ProjectInfo, RuntimeInfo, Severity,
};
use crate::platform;

/// Maps collected facts to issues.
///
/// Every rule is checked independently, in the fixed order of
/// [`IssueCode::ALL`]; the result keeps that order.
pub fn evaluate_issues(runtime: &RuntimeInfo, pip: &PipInfo, project: &ProjectInfo) -> Vec<Issue> {
    let mut issues = Vec::new();

    if !pip.mismatches.is_empty() {
        issues.push(Issue::with_details(
            IssueCode::Mismatch,
            Severity::Error,
            pip.mismatches.join("; "),
        ));
    }

    if runtime.pep668_externally_managed && runtime.environment_type == EnvironmentKind::System {
        issues.push(Issue::new(IssueCode::SystemManaged, Severity::Warning));
    }

    if project.pyproject && !(runtime.is_venv || runtime.is_conda) {
        issues.push(Issue::new(IssueCode::NoIsolatedEnv, Severity::Warning));
    }

    if project.project_name.is_some()
        && project.package_importable == Importability::NotImportable
    {
        issues.push(Issue::new(IssueCode::NotImportable, Severity::Error));
    }

    if !project.shadowing.is_empty() {
        let mut names: Vec<&str> = project.shadowing.iter().map(String::as_str).collect();
        names.sort_unstable();
        names.dedup();
        issues.push(Issue::with_details(
            IssueCode::Shadowing,
            Severity::Warning,
            names.join(", "),
        ));
    }

    if platform::profile_for(&runtime.platform.system).is_store_runtime(&runtime.executable) {
        issues.push(Issue::new(IssueCode::StoreRuntime, Severity::Warning));
    }

    issues
}
