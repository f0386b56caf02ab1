//! Integration tests for the ncf-launch binary
//!
//! Runs the built CLI end to end. The trainer is replaced by a small `sh`
//! script that records its argv and device variable into its working
//! directory and exits with a fixed status.
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const FAKE_TRAINER_EXIT: i32 = 3;

fn launcher() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ncf-launch"));
    cmd.env_remove("NCF_LAUNCH_CONFIG")
        .env_remove("CUDA_VISIBLE_DEVICES");
    cmd
}

/// Write a fake trainer and a config pointing at it; returns the config path.
fn fake_trainer(dir: &Path) -> PathBuf {
    let script = dir.join("fake_train.sh");
    fs::write(
        &script,
        format!(
            "printf '%s\\n' \"$@\" > args.txt\n\
             printf '%s' \"${{CUDA_VISIBLE_DEVICES-unset}}\" > device.txt\n\
             exit {}\n",
            FAKE_TRAINER_EXIT
        ),
    )
    .expect("Failed to write fake trainer");

    let config = dir.join("launch.toml");
    fs::write(
        &config,
        format!(
            "[trainer]\ninterpreter = \"sh\"\nscript = '{}'\nworking_dir = '{}'\n",
            script.display(),
            dir.display()
        ),
    )
    .expect("Failed to write config");
    config
}

fn recorded_args(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("args.txt"))
        .expect("Trainer did not record args")
        .lines()
        .map(str::to_string)
        .collect()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_dry_run_prints_command() {
    let output = launcher()
        .args(["--dry-run", "0", "42", "run1", "proprio"])
        .output()
        .expect("Failed to execute ncf-launch");

    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim_end(),
        "CUDA_VISIBLE_DEVICES=0 python train.py -m task=AllegroHandCupholder headless=True \
         seed=42 launcher=slurm task.env.numEnvs=8192 train.ppo.minibatch_size=512 \
         task.env.enableTactile=False train.ppo.use_contact_gt=False train.ppo.use_ncf=False \
         train.ppo.output_name=cupholder_proprio_only/run1"
    );
}

#[test]
fn test_rust_log_controls_launcher_logging() {
    let quiet = launcher()
        .env("RUST_LOG", "off")
        .args(["--dry-run", "0", "42", "run1", "proprio", "x=1"])
        .output()
        .expect("Failed to execute ncf-launch");

    assert!(quiet.status.success());
    assert!(
        quiet.stderr.is_empty(),
        "stderr: {}",
        String::from_utf8_lossy(&quiet.stderr)
    );
    assert!(!stdout(&quiet).is_empty());

    let default = launcher()
        .env_remove("RUST_LOG")
        .args(["--dry-run", "0", "42", "run1", "proprio", "x=1"])
        .output()
        .expect("Failed to execute ncf-launch");

    assert!(default.status.success());
    assert!(String::from_utf8_lossy(&default.stderr).contains("extra args: x=1"));
}

#[test]
fn test_dry_run_tactile_has_no_device_prefix() {
    let output = launcher()
        .args(["--dry-run", "0", "42", "run1", "tactile", "--flag-like", "x=1"])
        .output()
        .expect("Failed to execute ncf-launch");

    assert!(output.status.success());
    let line = stdout(&output);
    assert!(line.starts_with("python train.py "), "got: {}", line);
    assert!(line.trim_end().ends_with("cupholder_tactile/run1 --flag-like x=1"));
}

#[test]
fn test_list_policies() {
    let output = launcher()
        .arg("--list-policies")
        .output()
        .expect("Failed to execute ncf-launch");

    assert!(output.status.success());
    let listing = stdout(&output);
    assert_eq!(listing.lines().count(), 7);
    let tactile = listing
        .lines()
        .find(|l| l.starts_with("tactile "))
        .expect("tactile listed");
    assert!(tactile.ends_with("device-scoped: no"));
    assert!(listing.contains("cupholder_ncf_adapt"));
}

#[test]
fn test_unknown_policy_exits_zero_without_launching() {
    let dir = TempDir::new().unwrap();
    let config = fake_trainer(dir.path());

    let output = launcher()
        .arg("--config")
        .arg(&config)
        .args(["0", "42", "run1", "bogus"])
        .output()
        .expect("Failed to execute ncf-launch");

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).is_empty());
    assert!(!dir.path().join("args.txt").exists());
}

#[test]
fn test_missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let output = launcher()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .args(["0", "42", "run1", "proprio"])
        .output()
        .expect("Failed to execute ncf-launch");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_trainer_exits_127() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("launch.toml");
    fs::write(
        &config,
        "[trainer]\ninterpreter = \"ncf-launch-no-such-python-3f9a\"\n",
    )
    .unwrap();

    let output = launcher()
        .env("NCF_LAUNCH_CONFIG", &config)
        .args(["0", "42", "run1", "proprio"])
        .output()
        .expect("Failed to execute ncf-launch");

    assert_eq!(output.status.code(), Some(127));
}

#[cfg(unix)]
#[test]
fn test_trainer_receives_bundle_and_exit_code_passes_through() {
    let dir = TempDir::new().unwrap();
    let config = fake_trainer(dir.path());

    let output = launcher()
        .arg("--config")
        .arg(&config)
        .args([
            "0",
            "42",
            "run1",
            "proprio",
            "train.ppo.minibatch_size=1024",
            "with space=1",
        ])
        .output()
        .expect("Failed to execute ncf-launch");

    assert_eq!(
        output.status.code(),
        Some(FAKE_TRAINER_EXIT),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        recorded_args(dir.path()),
        vec![
            "-m",
            "task=AllegroHandCupholder",
            "headless=True",
            "seed=42",
            "launcher=slurm",
            "task.env.numEnvs=8192",
            "train.ppo.minibatch_size=512",
            "task.env.enableTactile=False",
            "train.ppo.use_contact_gt=False",
            "train.ppo.use_ncf=False",
            "train.ppo.output_name=cupholder_proprio_only/run1",
            "train.ppo.minibatch_size=1024",
            "with space=1",
        ]
    );
    assert_eq!(fs::read_to_string(dir.path().join("device.txt")).unwrap(), "0");
}

#[cfg(unix)]
#[test]
fn test_tactile_inherits_device_visibility() {
    let dir = TempDir::new().unwrap();
    let config = fake_trainer(dir.path());

    let output = launcher()
        .arg("--config")
        .arg(&config)
        .args(["5", "7", "cache", "tactile"])
        .output()
        .expect("Failed to execute ncf-launch");

    assert_eq!(output.status.code(), Some(FAKE_TRAINER_EXIT));
    assert_eq!(
        fs::read_to_string(dir.path().join("device.txt")).unwrap(),
        "unset"
    );
    let args = recorded_args(dir.path());
    assert_eq!(
        args.last().map(String::as_str),
        Some("train.ppo.output_name=cupholder_tactile/cache")
    );
}

#[cfg(unix)]
#[test]
fn test_missing_positionals_still_launch_known_policy() {
    let dir = TempDir::new().unwrap();
    let config = fake_trainer(dir.path());

    // Empty seed and cache are forwarded as-is.
    let output = launcher()
        .arg("--config")
        .arg(&config)
        .args(["1", "", "", "proprio_ncf_m1"])
        .output()
        .expect("Failed to execute ncf-launch");

    assert_eq!(output.status.code(), Some(FAKE_TRAINER_EXIT));
    let args = recorded_args(dir.path());
    assert!(args.contains(&"seed=".to_string()));
    assert_eq!(
        args.last().map(String::as_str),
        Some("train.ppo.output_name=cupholder_proprio_ncf_m1/")
    );
    assert_eq!(fs::read_to_string(dir.path().join("device.txt")).unwrap(), "1");
}
