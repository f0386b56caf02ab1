//! Policy dispatch and trainer execution.
//!
//! `dispatch` is the single entry point: it captures the positional
//! argv, looks the policy up, builds the trainer command and hands it to
//! a [`ProcessRunner`]. An unrecognized policy is a silent no-op that
//! exits successfully; the trainer's exit status is otherwise passed
//! through unchanged.

use crate::config::LaunchConfig;
use crate::errors::LaunchError;
use crate::invocation::Invocation;
use crate::policy::PolicyName;
use crate::request::InvocationRequest;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Result of a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Trainer ran to completion with this exit code
    Completed { exit_code: i32 },
    /// Command was built but not executed
    DryRun(Invocation),
    /// Policy name matched nothing; no trainer was started
    UnknownPolicy { name: String },
}

impl DispatchOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            DispatchOutcome::Completed { exit_code } => *exit_code,
            DispatchOutcome::DryRun(_) | DispatchOutcome::UnknownPolicy { .. } => 0,
        }
    }
}

/// Executes a built trainer command and reports its exit code.
pub trait ProcessRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<i32, LaunchError>;
}

/// Runs the trainer as a blocking child process with inherited stdio.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<i32, LaunchError> {
        let program = resolve_program(&invocation.program)?;
        log::debug!("Trainer executable: {}", program.display());

        let mut command = Command::new(&program);
        command.args(&invocation.args);
        if let Some((var, value)) = &invocation.device_scope {
            command.env(var, value);
        }
        if let Some(dir) = &invocation.working_dir {
            command.current_dir(dir);
        }

        let status = command
            .status()
            .map_err(|e| LaunchError::spawn(&invocation.program, e))?;

        let code = exit_code_of(status);
        if code == 0 {
            log::info!("Trainer finished successfully");
        } else {
            log::warn!("Trainer exited with status {}", code);
        }
        Ok(code)
    }
}

/// Find the trainer program, searching PATH only for bare names.
pub fn resolve_program(program: &str) -> Result<PathBuf, LaunchError> {
    let path = Path::new(program);
    if path.components().count() > 1 {
        return Ok(path.to_path_buf());
    }
    which::which(program).map_err(|_| LaunchError::TrainerNotFound {
        program: program.to_string(),
    })
}

#[cfg(unix)]
fn exit_code_of(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => {
            log::warn!("Trainer terminated by signal {}", signal);
            128 + signal
        }
        (None, None) => 1,
    }
}

#[cfg(not(unix))]
fn exit_code_of(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

/// Dispatch one launch from the positional argv.
pub fn dispatch<S: AsRef<str>>(
    argv: &[S],
    config: &LaunchConfig,
    runner: &mut dyn ProcessRunner,
    dry_run: bool,
) -> Result<DispatchOutcome, LaunchError> {
    let request = InvocationRequest::from_args(argv);

    let Some(policy) = PolicyName::parse(&request.policy_name) else {
        log::warn!(
            "Unknown policy '{}'; nothing launched. Known policies: {}",
            request.policy_name,
            PolicyName::known_names()
        );
        return Ok(DispatchOutcome::UnknownPolicy {
            name: request.policy_name,
        });
    };

    let bundle = policy.bundle();
    let invocation = Invocation::build(&request, bundle, config);

    log::info!(
        "Policy {} -> {}/{} (seed={})",
        policy,
        bundle.output_dir,
        request.cache_dir,
        request.seed
    );
    if request.extra_args.is_empty() {
        log::debug!("extra args: (none)");
    } else {
        log::info!("extra args: {}", request.extra_args.join(" "));
    }
    match &invocation.device_scope {
        Some((var, value)) => log::debug!("Scoping {}={}", var, value),
        None => log::debug!("No device scoping for policy {}", policy),
    }

    if dry_run {
        return Ok(DispatchOutcome::DryRun(invocation));
    }

    log::debug!("Launching: {}", invocation.render());
    let exit_code = runner.run(&invocation)?;
    Ok(DispatchOutcome::Completed { exit_code })
}
