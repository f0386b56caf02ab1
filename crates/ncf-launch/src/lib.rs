//! NCF policy launcher.
//!
//! Maps a policy name to a fixed bundle of trainer overrides and runs
//! the external PPO trainer with them:
//!
//! ```bash
//! ncf-launch <device> <seed> <cache> <policy> [extra overrides...]
//! ```
//!
//! The launcher owns argument capture, command construction and device
//! scoping only. Training, simulation and any cluster launching belong
//! to the trainer.

pub mod config;
pub mod dispatch;
pub mod errors;
pub mod invocation;
pub mod policy;
pub mod request;

pub use config::LaunchConfig;
pub use dispatch::{dispatch, DispatchOutcome, ProcessRunner, SystemRunner};
pub use errors::LaunchError;
pub use invocation::Invocation;
pub use policy::{PolicyBundle, PolicyName};
pub use request::InvocationRequest;
