use std::ffi::OsStr;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use wait_timeout::ChildExt;

use crate::core::PlatformInfo;

mod error;
mod profile;
#[cfg(unix)]
mod unix;

pub use error::ProbeError;
pub use profile::{PlatformProfile, profile_for};

#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommandRunOptions {
    pub current_dir: Option<PathBuf>,
}

pub fn run_command(
    cmd: &Path,
    args: &[&str],
    timeout: Duration,
) -> Result<CommandOutput, ProbeError> {
    run_command_with_options(cmd, args, timeout, &CommandRunOptions::default())
}

pub fn run_command_with_options(
    cmd: &Path,
    args: &[&str],
    timeout: Duration,
    options: &CommandRunOptions,
) -> Result<CommandOutput, ProbeError> {
    let cmdline = display_cmdline(cmd, args);
    let mut command = Command::new(cmd);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    if let Some(dir) = &options.current_dir {
        command.current_dir(dir);
    }

    let started = Instant::now();
    let deadline = started + timeout;
    let mut child = command.spawn().map_err(|source| ProbeError::Spawn {
        command: cmdline.clone(),
        source,
    })?;

    // Drain pipes on helper threads so a chatty child cannot block on a full pipe.
    let stdout_rx = child.stdout.take().map(spawn_reader);
    let stderr_rx = child.stderr.take().map(spawn_reader);

    let status = match child.wait_timeout(timeout).map_err(|source| ProbeError::Wait {
        command: cmdline.clone(),
        source,
    })? {
        Some(status) => status,
        None => {
            let _ = child.kill();
            let _ = child.wait();
            tracing::debug!(command = %cmdline, ?timeout, "command timed out");
            return Err(ProbeError::Timeout {
                command: cmdline,
                timeout,
            });
        }
    };

    // A background grandchild may keep the pipes open after the child exits.
    let stdout = drain_reader(stdout_rx, deadline, &cmdline);
    let stderr = drain_reader(stderr_rx, deadline, &cmdline);
    let exit_code = status.code().unwrap_or(-1);

    tracing::debug!(
        command = %cmdline,
        exit_code,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "command finished"
    );

    Ok(CommandOutput {
        exit_code,
        stdout,
        stderr,
    })
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let mut buf = [0u8; 8192];
        loop {
            match pipe.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    if tx.send(buf[..n].to_vec()).is_err() {
                        break;
                    }
                }
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
    });
    rx
}

/// Collects output until the pipe closes or `deadline` passes, keeping
/// whatever arrived before the deadline.
fn drain_reader(rx: Option<Receiver<Vec<u8>>>, deadline: Instant, cmdline: &str) -> String {
    let Some(rx) = rx else {
        return String::new();
    };
    let mut buf = Vec::new();
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(chunk) => buf.extend_from_slice(&chunk),
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                tracing::debug!(command = %cmdline, "output pipe still open at deadline");
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn display_cmdline(cmd: &Path, args: &[&str]) -> String {
    let mut out = cmd.display().to_string();
    for arg in args {
        out.push(' ');
        if arg.contains('\n') {
            out.push_str("<script>");
        } else {
            out.push_str(arg);
        }
    }
    out
}

pub fn which(name: &str) -> Option<PathBuf> {
    match ::which::which(name) {
        Ok(path) => Some(path),
        Err(err) => {
            tracing::debug!(name, %err, "not found on PATH");
            None
        }
    }
}

/// Resolves `name` against an explicit `PATH`-style value; relative paths
/// with a separator resolve against `cwd`.
pub fn which_in(name: &str, path_var: &OsStr, cwd: &Path) -> Option<PathBuf> {
    ::which::which_in(name, Some(path_var), cwd).ok()
}

pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

pub fn system_name() -> String {
    system_name_for(std::env::consts::OS)
}

fn system_name_for(os: &str) -> String {
    match os {
        "linux" => "Linux".to_string(),
        "macos" => "Darwin".to_string(),
        "windows" => "Windows".to_string(),
        "freebsd" => "FreeBSD".to_string(),
        "netbsd" => "NetBSD".to_string(),
        "openbsd" => "OpenBSD".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => crate::core::UNKNOWN.to_string(),
            }
        }
    }
}

pub fn platform_info(fallback_release: Option<&str>) -> PlatformInfo {
    let system = system_name();

    #[cfg(unix)]
    let release = unix::kernel_release();
    #[cfg(not(unix))]
    let release: Option<String> = None;

    let release = release
        .or_else(|| fallback_release.map(str::to_string))
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| crate::core::UNKNOWN.to_string());

    #[cfg(target_os = "linux")]
    let distro = unix::read_os_release(Path::new(unix::OS_RELEASE_PATH));
    #[cfg(not(target_os = "linux"))]
    let distro: Option<String> = None;

    PlatformInfo {
        system,
        release,
        distro,
    }
}

pub fn parse_os_release(content: &str) -> Option<String> {
    let mut pretty_name = None;
    let mut name = None;
    let mut version = None;
    for line in content.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"').to_string();
        match key.trim() {
            "PRETTY_NAME" => pretty_name = Some(value),
            "NAME" => name = Some(value),
            "VERSION" => version = Some(value),
            _ => {}
        }
    }
    let name = pretty_name.filter(|s| !s.is_empty()).or(name)?;
    if name.is_empty() {
        return None;
    }
    match version.filter(|v| !v.is_empty()) {
        Some(version) => Some(format!("{name} {version}")),
        None => Some(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_release_prefers_pretty_name_with_version() {
        let content = "NAME=\"Ubuntu\"\nVERSION=\"24.04 LTS (Noble Numbat)\"\nPRETTY_NAME=\"Ubuntu 24.04 LTS\"\n";
        assert_eq!(
            parse_os_release(content).as_deref(),
            Some("Ubuntu 24.04 LTS 24.04 LTS (Noble Numbat)")
        );
    }

    #[test]
    fn os_release_falls_back_to_name_without_version() {
        assert_eq!(parse_os_release("NAME=Arch Linux\n").as_deref(), Some("Arch Linux"));
        assert_eq!(parse_os_release("ID=foo\n"), None);
        assert_eq!(parse_os_release(""), None);
    }

    #[test]
    fn system_name_uses_conventional_spelling() {
        assert_eq!(system_name_for("linux"), "Linux");
        assert_eq!(system_name_for("macos"), "Darwin");
        assert_eq!(system_name_for("windows"), "Windows");
        assert_eq!(system_name_for("illumos"), "Illumos");
    }

    #[test]
    fn which_in_skips_missing_directories() {
        let path = std::env::join_paths([
            PathBuf::from("/definitely/not/here"),
            PathBuf::from("/also/missing"),
        ])
        .expect("join paths");
        assert_eq!(which_in("pip", &path, &std::env::temp_dir()), None);
    }

    #[cfg(unix)]
    #[test]
    fn run_command_reports_timeout() {
        let err = run_command(Path::new("/bin/sh"), &["-c", "sleep 5"], Duration::from_millis(200))
            .expect_err("should time out");
        assert!(matches!(err, ProbeError::Timeout { .. }), "err={err}");
    }

    #[cfg(unix)]
    #[test]
    fn run_command_captures_both_streams() {
        let out = run_command(
            Path::new("/bin/sh"),
            &["-c", "echo out; echo err 1>&2; exit 3"],
            Duration::from_secs(5),
        )
        .expect("run sh");
        assert_eq!(out.exit_code, 3);
        assert_eq!(out.combined(), "out\nerr\n");
    }

    #[cfg(unix)]
    #[test]
    fn background_grandchild_cannot_outlive_the_timeout() {
        let started = Instant::now();
        let out = run_command(
            Path::new("/bin/sh"),
            &["-c", "sleep 4 & echo hi"],
            Duration::from_millis(500),
        )
        .expect("run sh");
        assert!(
            started.elapsed() < Duration::from_secs(3),
            "elapsed={:?}",
            started.elapsed()
        );
        assert_eq!(out.exit_code, 0);
        assert_eq!(out.stdout, "hi\n");
    }
}
