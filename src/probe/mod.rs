//! Fact collectors. Every collector fails soft: errors are logged and the
//! corresponding field falls back to its absent/false default.

mod environment;
mod interpreter;
mod marker;
mod pip;
mod project;
mod shadowing;

pub use environment::{EnvironmentFlags, detect as detect_environment, detect_with_env};
pub use interpreter::{InterpreterFacts, Interpreter, ModuleResolver, NoInterpreter, parse_facts};
pub use marker::{MARKER_FILE, candidate_dirs, is_externally_managed};
pub use pip::{
    candidate_names as pip_candidate_names, collect as collect_pip, collect_resolved,
    parse_version_output,
};
pub use project::{MANIFEST_FILE, declared_name, inspect as inspect_project};
pub use shadowing::{POPULAR_PACKAGES, collisions, detect as detect_shadowing};

use crate::core::{EnvironmentKind, RuntimeInfo, UNKNOWN};
use crate::platform;

pub fn runtime_info(facts: Option<&InterpreterFacts>) -> RuntimeInfo {
    let flags = facts.map(detect_environment).unwrap_or_default();
    let externally_managed = facts
        .map(|f| is_externally_managed(&candidate_dirs(f)))
        .unwrap_or(false);
    let platform = platform::platform_info(facts.and_then(|f| f.release.as_deref()));
    build_runtime_info(facts, flags, externally_managed, platform)
}

pub fn build_runtime_info(
    facts: Option<&InterpreterFacts>,
    flags: EnvironmentFlags,
    externally_managed: bool,
    platform: crate::core::PlatformInfo,
) -> RuntimeInfo {
    let text = |value: Option<&str>| {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(UNKNOWN)
            .to_string()
    };

    RuntimeInfo {
        executable: text(facts.map(|f| f.executable.as_str())),
        version: text(facts.map(|f| f.version.as_str())),
        implementation: text(facts.map(|f| f.implementation.as_str())),
        environment_type: EnvironmentKind::classify(
            flags.is_venv,
            flags.is_conda,
            flags.is_pyenv,
            externally_managed,
        ),
        is_venv: flags.is_venv,
        is_conda: flags.is_conda,
        is_pyenv: flags.is_pyenv,
        pep668_externally_managed: externally_managed,
        platform,
    }
}
