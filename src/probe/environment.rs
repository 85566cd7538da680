use std::env::VarError;

use crate::probe::InterpreterFacts;

const CONDA_ENV_VAR: &str = "CONDA_DEFAULT_ENV";
const CONDA_PREFIX_TOKEN: &str = "conda";
const PYENV_ROOT_VAR: &str = "PYENV_ROOT";
const PYENV_SHELL_VAR: &str = "PYENV_SHELL";
const PYENV_PATH_SEGMENT: &str = ".pyenv";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvironmentFlags {
    pub is_venv: bool,
    pub is_conda: bool,
    pub is_pyenv: bool,
}

pub fn detect(facts: &InterpreterFacts) -> EnvironmentFlags {
    detect_with_env(facts, |key: &str| std::env::var(key))
}

pub fn detect_with_env<F>(facts: &InterpreterFacts, env_fn: F) -> EnvironmentFlags
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let is_set = |key: &str| env_fn(key).map(|v| !v.is_empty()).unwrap_or(false);

    let is_venv = facts.prefix != facts.base_prefix;
    let is_conda = is_set(CONDA_ENV_VAR)
        || facts
            .prefix
            .to_lowercase()
            .contains(CONDA_PREFIX_TOKEN);

    let exe_in_pyenv = facts.executable.contains(PYENV_PATH_SEGMENT);
    let is_pyenv = (is_set(PYENV_ROOT_VAR) && (is_set(PYENV_SHELL_VAR) || exe_in_pyenv))
        || exe_in_pyenv;

    EnvironmentFlags {
        is_venv,
        is_conda,
        is_pyenv,
    }
}
