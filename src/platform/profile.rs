#[derive(Debug)]
pub struct PlatformProfile {
    pub system: &'static str,
    /// Interpreter names tried on PATH, in order, when none is configured.
    pub interpreter_candidates: &'static [&'static str],
    /// Steps that create and activate a project-local virtual environment.
    pub venv_steps: &'static [&'static str],
    /// Executable path segments that identify an app-store distribution.
    pub store_path_markers: &'static [&'static str],
}

impl PlatformProfile {
    pub fn is_store_runtime(&self, executable: &str) -> bool {
        self.store_path_markers
            .iter()
            .any(|marker| executable.contains(marker))
    }
}

static WINDOWS: PlatformProfile = PlatformProfile {
    system: "Windows",
    interpreter_candidates: &["python", "py"],
    venv_steps: &[
        "py -3 -m venv .venv",
        ".\\.venv\\Scripts\\activate",
        "python -m pip install --upgrade pip",
    ],
    store_path_markers: &["WindowsApps", "Microsoft"],
};

static POSIX: PlatformProfile = PlatformProfile {
    system: "posix",
    interpreter_candidates: &["python3", "python"],
    venv_steps: &[
        "python3 -m venv .venv",
        "source .venv/bin/activate",
        "python -m pip install --upgrade pip",
    ],
    store_path_markers: &[],
};

static PROFILES: [&PlatformProfile; 1] = [&WINDOWS];

pub fn profile_for(system: &str) -> &'static PlatformProfile {
    PROFILES
        .iter()
        .copied()
        .find(|p| p.system.eq_ignore_ascii_case(system))
        .unwrap_or(&POSIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_profile_uses_launcher_syntax() {
        let profile = profile_for("Windows");
        assert_eq!(profile.venv_steps[0], "py -3 -m venv .venv");
        assert!(profile.is_store_runtime(
            "C:/Users/User/AppData/Local/Microsoft/WindowsApps/python.exe"
        ));
    }

    #[test]
    fn other_platforms_never_match_store_runtime() {
        for system in ["Linux", "Darwin", "FreeBSD"] {
            let profile = profile_for(system);
            assert_eq!(profile.venv_steps[0], "python3 -m venv .venv");
            assert!(!profile.is_store_runtime("/opt/Microsoft/WindowsApps/python3"));
        }
    }
}
