use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicU64, Ordering};

fn doctor_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_py-env-doctor"));
    cmd.env("HOME", home);
    cmd.env("PATH", home.join("empty-bin"));
    cmd.env_remove("PY_ENV_DOCTOR_CONFIG");
    cmd.env_remove("PY_ENV_DOCTOR_PYTHON");
    cmd.env_remove("PY_ENV_DOCTOR_PROBE_TIMEOUT_SECS");
    cmd.env_remove("PY_ENV_DOCTOR_REPORT_FORMAT");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run(home: &Path, args: &[&str]) -> Output {
    doctor_cmd(home).args(args).output().expect("run py-env-doctor")
}

fn make_temp_home() -> PathBuf {
    static HOME_SEQ: AtomicU64 = AtomicU64::new(0);

    let temp = std::env::temp_dir();
    let seq = HOME_SEQ.fetch_add(1, Ordering::Relaxed);
    let uniq = format!("py-env-doctor-config-test-{}-{seq}", std::process::id());
    let home = temp.join(uniq);
    let _ = std::fs::remove_dir_all(&home);
    std::fs::create_dir_all(home.join("empty-bin")).expect("create home");
    std::fs::create_dir_all(home.join("project")).expect("create project");
    home
}

fn write_file(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdirs");
    }
    std::fs::write(path, bytes).expect("write");
}

fn write_default_config(home: &Path, body: &str) {
    write_file(
        &home.join(".config/py-env-doctor/config.toml"),
        body.as_bytes(),
    );
}

fn project_arg(home: &Path) -> String {
    home.join("project").display().to_string()
}

fn config_show_json(cmd: &mut Command) -> serde_json::Value {
    let out = cmd
        .args(["config", "--show", "--json"])
        .output()
        .expect("run py-env-doctor");
    assert!(
        out.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );
    serde_json::from_slice(&out.stdout).expect("parse json")
}

#[test]
fn config_show_reports_defaults() {
    let home = make_temp_home();
    let v = config_show_json(&mut doctor_cmd(&home));
    assert_eq!(v["probe"]["timeout_secs"], 5);
    assert_eq!(v["report"]["format"], "text");
    assert!(v.get("config_path").is_none());
    assert!(v["runtime"].get("python").is_none());
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn default_config_file_is_loaded() {
    let home = make_temp_home();
    write_default_config(
        &home,
        "[runtime]\npython = \"python3.12\"\n\n[probe]\ntimeout_secs = 9\n\n[report]\nformat = \"md\"\n",
    );
    let v = config_show_json(&mut doctor_cmd(&home));
    assert_eq!(v["runtime"]["python"], "python3.12");
    assert_eq!(v["probe"]["timeout_secs"], 9);
    assert_eq!(v["report"]["format"], "md");
    let path = v["config_path"].as_str().expect("config_path");
    assert!(path.ends_with("config.toml"), "config_path={path}");
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn env_overrides_config_file() {
    let home = make_temp_home();
    write_default_config(&home, "[probe]\ntimeout_secs = 9\n[report]\nformat = \"md\"\n");
    let v = config_show_json(
        doctor_cmd(&home)
            .env("PY_ENV_DOCTOR_PROBE_TIMEOUT_SECS", "2")
            .env("PY_ENV_DOCTOR_REPORT_FORMAT", "JSON")
            .env("PY_ENV_DOCTOR_PYTHON", "/opt/py/bin/python3"),
    );
    assert_eq!(v["probe"]["timeout_secs"], 2);
    assert_eq!(v["report"]["format"], "json");
    assert_eq!(v["runtime"]["python"], "/opt/py/bin/python3");
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn config_flag_wins_over_env_config_path() {
    let home = make_temp_home();
    let from_env = home.join("env.toml");
    let from_flag = home.join("flag.toml");
    write_file(&from_env, b"[probe]\ntimeout_secs = 3\n");
    write_file(&from_flag, b"[probe]\ntimeout_secs = 4\n");

    let v = config_show_json(
        doctor_cmd(&home)
            .env("PY_ENV_DOCTOR_CONFIG", &from_env)
            .args(["--config", from_flag.to_str().expect("utf-8 path")]),
    );
    assert_eq!(v["probe"]["timeout_secs"], 4);

    let v = config_show_json(doctor_cmd(&home).env("PY_ENV_DOCTOR_CONFIG", &from_env));
    assert_eq!(v["probe"]["timeout_secs"], 3);
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn config_format_applies_and_flag_overrides_it() {
    let home = make_temp_home();
    write_default_config(&home, "[report]\nformat = \"json\"\n");
    let project = project_arg(&home);

    let out = run(&home, &["check", "--project-path", &project]);
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json from config");
    assert_eq!(v["type"], "py_env_doctor_report");

    let out = run(&home, &["check", "--format", "text", "--project-path", &project]);
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.starts_with("py-env-doctor: environment check"), "{text}");
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn unknown_config_key_is_rejected() {
    let home = make_temp_home();
    write_default_config(&home, "[report]\nstyle = \"fancy\"\n");
    let out = run(&home, &["config", "--show"]);
    assert_eq!(out.status.code(), Some(2));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn config_show_toml_round_trips() {
    let home = make_temp_home();
    write_default_config(&home, "[probe]\ntimeout_secs = 7\n");
    let out = run(&home, &["config", "--show"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let table: toml::Table = stdout.parse().expect("toml output");
    assert_eq!(
        table
            .get("probe")
            .and_then(|p| p.get("timeout_secs"))
            .and_then(|t| t.as_integer()),
        Some(7)
    );
    let _ = std::fs::remove_dir_all(&home);
}
