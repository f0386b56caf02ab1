//! ncf-launch CLI entry point.
//!
//! Translates `<device> <seed> <cache> <policy> [extra...]` into one run of
//! the external PPO trainer and exits with the trainer's status.

use anyhow::{Context, Result};
use clap::Parser;
use ncf_launch::{dispatch, DispatchOutcome, LaunchConfig, PolicyName, SystemRunner};
use std::path::PathBuf;
use std::process::ExitCode;

/// ncf-launch version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "ncf-launch")]
#[command(version = VERSION)]
#[command(about = "Launch NCF cupholder policy training runs", long_about = None)]
struct Args {
    /// Print the trainer command instead of running it
    #[arg(long, default_value = "false")]
    dry_run: bool,

    /// Launcher configuration file (TOML format)
    ///
    /// Selects the trainer interpreter, script, working directory and the
    /// device-visibility variable. Built-in defaults apply when absent.
    ///
    /// Example: --config configs/launch.toml
    #[arg(long, env = "NCF_LAUNCH_CONFIG")]
    config: Option<PathBuf>,

    /// List recognized policies and exit
    #[arg(long, default_value = "false")]
    list_policies: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// <DEVICE> <SEED> <CACHE> <POLICY> [EXTRA]...
    ///
    /// Everything from the first positional on is captured verbatim;
    /// launcher options must come before it. Extra arguments are
    /// forwarded to the trainer after the policy's fixed overrides.
    ///
    /// Example: 0 42 run1 proprio train.ppo.minibatch_size=1024
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    argv: Vec<String>,
}

fn list_policies() {
    for policy in PolicyName::ALL {
        let bundle = policy.bundle();
        println!(
            "{:<16} {:<26} device-scoped: {}",
            policy.as_str(),
            bundle.output_dir,
            if bundle.uses_device_scoping { "yes" } else { "no" }
        );
    }
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from((code & 0xff) as u8)
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logger; RUST_LOG wins over the fallback level
    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    log::debug!("ncf-launch {} - Starting", VERSION);

    if args.list_policies {
        list_policies();
        return Ok(ExitCode::SUCCESS);
    }

    let config = LaunchConfig::load(args.config.as_deref()).with_context(|| match &args.config {
        Some(path) => format!("Failed to load launcher config {}", path.display()),
        None => "Invalid default launcher config".to_string(),
    })?;

    let mut runner = SystemRunner;
    match dispatch(args.argv.as_slice(), &config, &mut runner, args.dry_run) {
        Ok(DispatchOutcome::DryRun(invocation)) => {
            println!("{}", invocation.render());
            Ok(ExitCode::SUCCESS)
        }
        Ok(outcome) => Ok(exit_code(outcome.exit_code())),
        Err(err) => {
            log::error!("{}", err);
            Ok(exit_code(err.exit_code()))
        }
    }
}
