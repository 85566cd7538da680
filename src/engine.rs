use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::ValueEnum;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::core::{REPORT_TYPE, Report};
use crate::platform;
use crate::probe::{self, Interpreter, ModuleResolver, NoInterpreter};

#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub timeout: Duration,
    pub python: Option<String>,
    pub show_progress: bool,
}

/// Analysis depth. Accepted for CLI stability; both levels run the same checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Level {
    #[default]
    Basic,
    Full,
}

#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub project_path: PathBuf,
    pub level: Level,
    pub diagnostics_only: bool,
}

pub struct Engine {
    opts: EngineOptions,
}

impl Engine {
    pub fn new(opts: EngineOptions) -> Self {
        Self { opts }
    }

    pub fn check(&self, req: &CheckRequest) -> Result<Report> {
        tracing::info!(
            project = %req.project_path.display(),
            level = ?req.level,
            diagnostics_only = req.diagnostics_only,
            "starting check"
        );

        use std::io::IsTerminal;
        let progress_enabled = self.opts.show_progress && std::io::stderr().is_terminal();
        let pb = if progress_enabled {
            let pb = indicatif::ProgressBar::new_spinner();
            pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
            pb.set_message("Inspecting Python environment...");
            pb.enable_steady_tick(Duration::from_millis(120));
            Some(pb)
        } else {
            None
        };

        let profile = platform::profile_for(&platform::system_name());
        let interpreter =
            match Interpreter::locate(self.opts.python.as_deref(), profile, self.opts.timeout) {
                Ok(interpreter) => Some(interpreter),
                Err(err) => {
                    tracing::warn!(%err, "no Python interpreter available");
                    None
                }
            };

        let facts = interpreter.as_ref().and_then(|i| match i.facts() {
            Ok(facts) => Some(facts),
            Err(err) => {
                tracing::warn!(interpreter = %i.path().display(), %err, "interpreter probe failed");
                None
            }
        });

        let runtime = probe::runtime_info(facts.as_ref());

        if let Some(pb) = &pb {
            pb.set_message("Looking for pip on PATH...");
        }
        let pip_names = probe::pip_candidate_names(&runtime.version);
        let pip = probe::collect_pip(&pip_names, &runtime.version, self.opts.timeout);

        if let Some(pb) = &pb {
            pb.set_message("Inspecting project...");
        }
        // Without interpreter facts the located binary may not even run.
        let resolver: &dyn ModuleResolver = match (&interpreter, &facts) {
            (Some(interpreter), Some(_)) => interpreter,
            _ => &NoInterpreter,
        };
        let mut project = probe::inspect_project(&req.project_path, resolver);
        project.shadowing =
            probe::detect_shadowing(&req.project_path, project.project_name.as_deref());

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        let issues = crate::rules::evaluate_issues(&runtime, &pip, &project);
        let advice = if req.diagnostics_only {
            Vec::new()
        } else {
            crate::advice::make_advice(&runtime.platform.system, &issues)
        };
        tracing::info!(
            issues = issues.len(),
            advice = advice.len(),
            "check finished"
        );

        Ok(Report {
            report_type: REPORT_TYPE.to_string(),
            generated_at: generated_at(OffsetDateTime::now_utc()),
            python: runtime,
            pip,
            project,
            issues,
            advice,
        })
    }
}

fn generated_at(now: OffsetDateTime) -> String {
    let now = now.replace_nanosecond(0).unwrap_or(now);
    now.format(&Rfc3339)
        .unwrap_or_else(|_| crate::core::UNKNOWN.to_string())
}
