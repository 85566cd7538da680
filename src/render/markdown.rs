use std::fmt::Write as _;

use crate::core::Report;
use crate::render::{TITLE, pep668_label, yes_no};

pub fn render(report: &Report) -> String {
    let py = &report.python;
    let pip = &report.pip;
    let proj = &report.project;

    let mut out = String::new();
    let _ = writeln!(out, "# {TITLE}");
    let _ = writeln!(out);

    let _ = writeln!(out, "## Python");
    let _ = writeln!(out);
    let _ = writeln!(out, "- Executable: {}", py.executable);
    let _ = writeln!(out, "- Version: {}", py.version);
    let _ = writeln!(
        out,
        "- Platform: {} ({})",
        py.platform.system,
        py.platform.display_detail()
    );
    let _ = writeln!(out, "- Environment: {}", py.environment_type);
    let _ = writeln!(out, "- PEP 668: {}", pep668_label(py.pep668_externally_managed));
    let _ = writeln!(out);

    let _ = writeln!(out, "## pip");
    let _ = writeln!(out);
    if pip.binaries.is_empty() {
        let _ = writeln!(out, "- No pip binaries found on PATH");
    } else {
        for b in &pip.binaries {
            let ver = b.python_version.as_deref().unwrap_or("?");
            let _ = write!(out, "- `{}` on PATH: {} -> Python {ver}", b.name, b.path);
            if let Some(shebang) = &b.shebang_python {
                let _ = write!(out, " (shebang: `{shebang}`)");
            }
            let _ = writeln!(out);
        }
    }
    if !pip.mismatches.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Mismatches:");
        for m in &pip.mismatches {
            let _ = writeln!(out, "- {m}");
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Project");
    let _ = writeln!(out);
    let _ = writeln!(out, "- Path: {}", proj.path);
    let _ = writeln!(
        out,
        "- pyproject.toml: {}",
        if proj.pyproject { "found" } else { "not found" }
    );
    if let Some(name) = &proj.project_name {
        let _ = writeln!(out, "- project name: {name}");
    }
    if let Some(importable) = proj.package_importable.as_bool() {
        let _ = writeln!(out, "- package importable: {}", yes_no(importable));
    }
    if !proj.shadowing.is_empty() {
        let _ = writeln!(out, "- shadowing: {}", proj.shadowing.join(", "));
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Common issues detected");
    let _ = writeln!(out);
    if report.issues.is_empty() {
        let _ = writeln!(out, "None");
    } else {
        for issue in &report.issues {
            match &issue.details {
                Some(details) => {
                    let _ = writeln!(out, "- {} ({}): {details}", issue.code, issue.severity);
                }
                None => {
                    let _ = writeln!(out, "- {} ({})", issue.code, issue.severity);
                }
            }
        }
    }
    let _ = writeln!(out);

    if !report.advice.is_empty() {
        let _ = writeln!(out, "## Suggested fix");
        let _ = writeln!(out);
        for item in &report.advice {
            let _ = writeln!(out, "- **{}**", item.title);
            let _ = writeln!(out);
            for step in &item.steps {
                let _ = writeln!(out, "    {step}");
            }
            let _ = writeln!(out);
        }
    }

    out
}
