#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicU64, Ordering};

fn doctor_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_py-env-doctor"));
    cmd.env("HOME", home);
    cmd.env("PATH", home.join("bin"));
    cmd.env_remove("PY_ENV_DOCTOR_CONFIG");
    cmd.env_remove("PY_ENV_DOCTOR_PYTHON");
    cmd.env_remove("PY_ENV_DOCTOR_PROBE_TIMEOUT_SECS");
    cmd.env_remove("PY_ENV_DOCTOR_REPORT_FORMAT");
    cmd.env_remove("CONDA_DEFAULT_ENV");
    cmd.env_remove("PYENV_ROOT");
    cmd.env_remove("PYENV_SHELL");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run(home: &Path, args: &[&str]) -> Output {
    doctor_cmd(home).args(args).output().expect("run py-env-doctor")
}

fn make_temp_home() -> PathBuf {
    static HOME_SEQ: AtomicU64 = AtomicU64::new(0);
    let seq = HOME_SEQ.fetch_add(1, Ordering::Relaxed);
    let home = std::env::temp_dir().join(format!(
        "py-env-doctor-render-test-{}-{seq}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&home);
    std::fs::create_dir_all(home.join("bin")).expect("create home");
    home
}

fn write_file(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdirs");
    }
    std::fs::write(path, bytes).expect("write");
}

/// A `python3` without the externally-managed marker, no pip, and a project
/// that is not installed.
fn setup(home: &Path) -> PathBuf {
    let prefix = home.join("fakepy");
    let facts = serde_json::json!({
        "executable": prefix.join("bin/python3"),
        "version": "3.12.1",
        "implementation": "CPython",
        "prefix": prefix,
        "base_prefix": prefix,
        "purelib": prefix.join("lib/python3.12/site-packages"),
        "release": "6.8.0",
    });
    let python = home.join("bin/python3");
    write_file(
        &python,
        format!(
            "#!/bin/sh\ncase \"$2\" in\n  *find_spec*) echo no ;;\n  *) echo '{facts}' ;;\nesac\n"
        )
        .as_bytes(),
    );
    let mut perms = std::fs::metadata(&python).expect("stat").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&python, perms).expect("chmod");

    let project = home.join("project");
    write_file(
        &project.join("pyproject.toml"),
        b"[project]\nname = \"demo-project\"\n",
    );
    project
}

#[test]
fn markdown_report_has_sections_and_advice() {
    let home = make_temp_home();
    let project = setup(&home);
    let out = run(
        &home,
        &[
            "check",
            "--format",
            "markdown",
            "--project-path",
            project.to_str().expect("utf-8 path"),
        ],
    );
    assert!(out.status.success());

    let md = String::from_utf8_lossy(&out.stdout);
    for needle in [
        "# py-env-doctor: environment check",
        "## Python",
        "- Version: 3.12.1",
        "- Environment: unknown",
        "- PEP 668: No",
        "## pip",
        "- No pip binaries found on PATH",
        "## Project",
        "- pyproject.toml: found",
        "- project name: demo-project",
        "- package importable: no",
        "## Common issues detected",
        "- NO_VENV_FOR_PROJECT (warning)",
        "- PROJECT_NOT_IMPORTABLE (error)",
        "## Suggested fix",
        "- **Set up a project-specific virtual environment**",
        "    python3 -m venv .venv",
        "    python -m pip install -e .",
    ] {
        assert!(md.contains(needle), "missing {needle:?} in:\n{md}");
    }
    assert!(!md.contains("PIP_PYTHON_MISMATCH"));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn text_report_is_the_default() {
    let home = make_temp_home();
    let project = setup(&home);
    let out = run(
        &home,
        &["check", "--project-path", project.to_str().expect("utf-8 path")],
    );
    assert!(out.status.success());

    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.starts_with("py-env-doctor: environment check\n"), "{text}");
    for needle in [
        "[Python]",
        "[pip]",
        "[Project]",
        "[Common issues detected]",
        "1) NO_VENV_FOR_PROJECT (warning)",
        "2) PROJECT_NOT_IMPORTABLE (error)",
        "[Suggested fix]",
        "    source .venv/bin/activate",
    ] {
        assert!(text.contains(needle), "missing {needle:?} in:\n{text}");
    }
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn diagnostics_only_omits_suggested_fix_section() {
    let home = make_temp_home();
    let project = setup(&home);
    let out = run(
        &home,
        &[
            "check",
            "--diagnostics-only",
            "--project-path",
            project.to_str().expect("utf-8 path"),
        ],
    );
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("[Common issues detected]"));
    assert!(!text.contains("[Suggested fix]"), "{text}");
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn out_writes_file_and_nothing_to_stdout() {
    let home = make_temp_home();
    let project = setup(&home);
    let report = home.join("reports/nested/report.md");
    let out = run(
        &home,
        &[
            "check",
            "--fmt",
            "md",
            "--project-path",
            project.to_str().expect("utf-8 path"),
            "--out",
            report.to_str().expect("utf-8 path"),
        ],
    );
    assert!(out.status.success());
    assert!(out.stdout.is_empty());

    let md = std::fs::read_to_string(&report).expect("read report");
    assert!(md.starts_with("# py-env-doctor: environment check"));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn clean_project_reports_no_issues() {
    let home = make_temp_home();
    setup(&home);
    let empty = home.join("empty-project");
    std::fs::create_dir_all(&empty).expect("mkdir project");
    let out = run(
        &home,
        &["check", "--project-path", empty.to_str().expect("utf-8 path")],
    );
    assert!(out.status.success());

    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("[Common issues detected]\nNone\n"), "{text}");
    assert!(text.contains("- pyproject.toml: not found"));
    assert!(!text.contains("package importable"));
    let _ = std::fs::remove_dir_all(&home);
}
