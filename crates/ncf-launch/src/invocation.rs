//! Trainer command construction.

use crate::config::LaunchConfig;
use crate::policy::{PolicyBundle, COMMON_PREFIX, COMMON_SUFFIX};
use crate::request::InvocationRequest;
use std::path::PathBuf;

/// Fully built trainer command for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Variable set on the child only, as `(name, value)`
    pub device_scope: Option<(String, String)>,
    pub working_dir: Option<PathBuf>,
}

impl Invocation {
    /// Build the trainer command for `request` under `bundle`.
    ///
    /// Layout: script, common prefix, `seed=`, common suffix, the
    /// bundle's fixed flags, the output name, then the extra args
    /// exactly as given. Repeated keys are left for the trainer to
    /// resolve.
    pub fn build(request: &InvocationRequest, bundle: &PolicyBundle, config: &LaunchConfig) -> Self {
        let mut args = Vec::with_capacity(
            1 + COMMON_PREFIX.len()
                + 1
                + COMMON_SUFFIX.len()
                + bundle.fixed_flags.len()
                + 1
                + request.extra_args.len(),
        );

        args.push(config.trainer.script.clone());
        args.extend(COMMON_PREFIX.iter().map(|s| s.to_string()));
        args.push(format!("seed={}", request.seed));
        args.extend(COMMON_SUFFIX.iter().map(|s| s.to_string()));
        args.extend(bundle.fixed_flags.iter().map(|s| s.to_string()));
        args.push(bundle.output_name_flag(&request.cache_dir));
        args.extend(request.extra_args.iter().cloned());

        let device_scope = bundle
            .uses_device_scoping
            .then(|| (config.devices.env_var.clone(), request.device_selector.clone()));

        Self {
            program: config.trainer.interpreter.clone(),
            args,
            device_scope,
            working_dir: config.trainer.working_dir.as_ref().map(PathBuf::from),
        }
    }

    /// Shell-style rendering, e.g. `CUDA_VISIBLE_DEVICES=0 python train.py -m ...`.
    pub fn render(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 2);
        if let Some((var, value)) = &self.device_scope {
            parts.push(format!("{}={}", var, shell_quote(value)));
        }
        parts.push(shell_quote(&self.program));
        parts.extend(self.args.iter().map(|a| shell_quote(a)));
        parts.join(" ")
    }
}

/// Single-quote `arg` when it holds anything outside a conservative safe set.
fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_=./,:@%+".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
