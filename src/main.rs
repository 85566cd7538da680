fn main() {
    if let Err(err) = py_env_doctor::cli::run() {
        py_env_doctor::ui::eprintln_error(&err);
        std::process::exit(py_env_doctor::exit::exit_code(&err));
    }
}
