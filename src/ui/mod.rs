use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Error, Result};

pub fn eprintln_error(err: &Error) {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "error: {err}");

    let mut causes = err.chain().skip(1).peekable();
    if causes.peek().is_some() {
        let _ = writeln!(stderr, "caused by:");
        for cause in causes {
            let _ = writeln!(stderr, "  - {cause}");
        }
    }

    let _ = writeln!(
        stderr,
        "hint: rerun with `--verbose` for probe details, or see `py-env-doctor --help`"
    );
}

pub fn write_output(content: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => write_file(path, content),
        None => write_stdout(content),
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write report: {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = content.len(), "report written");
    Ok(())
}

fn write_stdout(content: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match write_line(&mut stdout, content) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err).context("failed to write report to stdout"),
    }
}

fn write_line(w: &mut impl Write, content: &str) -> io::Result<()> {
    w.write_all(content.as_bytes())?;
    w.write_all(b"\n")?;
    w.flush()
}
