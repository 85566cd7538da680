use std::collections::HashSet;

use crate::core::{AdviceItem, Issue, IssueCode};
use crate::platform;

pub fn make_advice(system: &str, issues: &[Issue]) -> Vec<AdviceItem> {
    let present: HashSet<IssueCode> = issues.iter().map(|i| i.code).collect();
    IssueCode::ALL
        .into_iter()
        .filter(|code| present.contains(code))
        .map(|code| advice_for(code, system))
        .collect()
}

fn advice_for(code: IssueCode, system: &str) -> AdviceItem {
    let venv_steps = platform::profile_for(system).venv_steps;
    match code {
        IssueCode::Mismatch => AdviceItem::new(
            "Use python -m pip consistently",
            ["Always prefer: python -m pip <cmd>", "Check: python -m pip --version"],
        ),
        IssueCode::SystemManaged => AdviceItem::new(
            "Create and use a virtual environment",
            venv_steps
                .iter()
                .copied()
                .chain(["Install packages inside the virtual environment only."]),
        ),
        IssueCode::NoIsolatedEnv => AdviceItem::new(
            "Set up a project-specific virtual environment",
            venv_steps.iter().copied(),
        ),
        IssueCode::NotImportable => AdviceItem::new(
            "Install your project into the active environment",
            ["python -m pip install -e ."],
        ),
        IssueCode::Shadowing => AdviceItem::new(
            "Resolve module shadowing in project directory",
            [
                "Rename or remove local files/folders that shadow installed packages (e.g., requests.py).",
                "Avoid naming project modules after popular packages.",
            ],
        ),
        IssueCode::StoreRuntime => AdviceItem::new(
            "Avoid Microsoft Store Python for development",
            [
                "Use the Python Launcher: py -3 -m venv .venv",
                "Alternatively, install Python from python.org or use pyenv-win.",
            ],
        ),
    }
}
