//! Policy table.
//!
//! Each policy selects which input modalities (proprioception, tactile,
//! contact ground truth, neural contact-field estimates) feed the PPO
//! trainer. The overrides below are passed to the trainer verbatim and
//! must stay bit-exact: key names, values and order are part of the
//! trainer's contract.

use std::fmt;

/// Recognized training policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyName {
    Proprio,
    Tactile,
    ProprioGt,
    ProprioNcf,
    ProprioNcfV2,
    ProprioNcfM1,
    NcfAdapt,
}

impl PolicyName {
    pub const ALL: [PolicyName; 7] = [
        PolicyName::Proprio,
        PolicyName::Tactile,
        PolicyName::ProprioGt,
        PolicyName::ProprioNcf,
        PolicyName::ProprioNcfV2,
        PolicyName::ProprioNcfM1,
        PolicyName::NcfAdapt,
    ];

    /// Exact, case-sensitive match against the command-line name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyName::Proprio => "proprio",
            PolicyName::Tactile => "tactile",
            PolicyName::ProprioGt => "proprio_gt",
            PolicyName::ProprioNcf => "proprio_ncf",
            PolicyName::ProprioNcfV2 => "proprio_ncf_v2",
            PolicyName::ProprioNcfM1 => "proprio_ncf_m1",
            PolicyName::NcfAdapt => "ncf_adapt",
        }
    }

    pub fn bundle(self) -> &'static PolicyBundle {
        match self {
            PolicyName::Proprio => &PROPRIO,
            PolicyName::Tactile => &TACTILE,
            PolicyName::ProprioGt => &PROPRIO_GT,
            PolicyName::ProprioNcf => &PROPRIO_NCF,
            PolicyName::ProprioNcfV2 => &PROPRIO_NCF_V2,
            PolicyName::ProprioNcfM1 => &PROPRIO_NCF_M1,
            PolicyName::NcfAdapt => &NCF_ADAPT,
        }
    }

    /// Comma-separated list of every recognized name.
    pub fn known_names() -> String {
        Self::ALL
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for PolicyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed override bundle for one policy.
#[derive(Debug, PartialEq, Eq)]
pub struct PolicyBundle {
    pub name: PolicyName,
    /// Overrides placed after the common prefix, in order
    pub fixed_flags: &'static [&'static str],
    /// Output subdirectory; the cache segment is appended beneath it
    pub output_dir: &'static str,
    /// Whether the run is scoped to the selected devices
    pub uses_device_scoping: bool,
}

impl PolicyBundle {
    /// `train.ppo.output_name=<output_dir>/<cache_dir>`
    pub fn output_name_flag(&self, cache_dir: &str) -> String {
        format!("train.ppo.output_name={}/{}", self.output_dir, cache_dir)
    }
}

/// Trainer entry flags shared by every policy, before `seed=`.
pub const COMMON_PREFIX: &[&str] = &["-m", "task=AllegroHandCupholder", "headless=True"];

/// Trainer entry flags shared by every policy, after `seed=`.
pub const COMMON_SUFFIX: &[&str] = &["launcher=slurm"];

static PROPRIO: PolicyBundle = PolicyBundle {
    name: PolicyName::Proprio,
    fixed_flags: &[
        "task.env.numEnvs=8192",
        "train.ppo.minibatch_size=512",
        "task.env.enableTactile=False",
        "train.ppo.use_contact_gt=False",
        "train.ppo.use_ncf=False",
    ],
    output_dir: "cupholder_proprio_only",
    uses_device_scoping: true,
};

// Runs without device scoping, so every device visible to the launcher
// is visible to the trainer.
static TACTILE: PolicyBundle = PolicyBundle {
    name: PolicyName::Tactile,
    fixed_flags: &[
        "task.env.numEnvs=8192",
        "train.ppo.minibatch_size=512",
        "task.env.enableTactile=True",
        "train.ppo.use_contact_gt=False",
        "train.ppo.use_ncf=False",
    ],
    output_dir: "cupholder_tactile",
    uses_device_scoping: false,
};

static PROPRIO_GT: PolicyBundle = PolicyBundle {
    name: PolicyName::ProprioGt,
    fixed_flags: &[
        "task.env.numEnvs=8192",
        "train.ppo.minibatch_size=512",
        "task.env.enableTactile=False",
        "train.ppo.use_contact_gt=True",
        "train.ppo.use_ncf=False",
    ],
    output_dir: "cupholder_proprio_gt",
    uses_device_scoping: true,
};

static PROPRIO_NCF: PolicyBundle = PolicyBundle {
    name: PolicyName::ProprioNcf,
    fixed_flags: &[
        "task.env.numEnvs=4096",
        "train.ppo.minibatch_size=256",
        "task.env.enableTactile=False",
        "train.ppo.use_contact_gt=False",
        "train.ppo.use_ncf=True",
        "train.ncf.arch=transformer",
        "train.ncf.vae_checkpoint=checkpoints/ncf/vae_cupholder.pth",
    ],
    output_dir: "cupholder_proprio_ncf",
    uses_device_scoping: true,
};

static PROPRIO_NCF_V2: PolicyBundle = PolicyBundle {
    name: PolicyName::ProprioNcfV2,
    fixed_flags: &[
        "task.env.numEnvs=4096",
        "train.ppo.minibatch_size=256",
        "task.env.enableTactile=False",
        "train.ppo.use_contact_gt=False",
        "train.ppo.use_ncf=True",
        "train.ncf.arch=transformer_v2",
        "train.ncf.vae_checkpoint=checkpoints/ncf/vae_cupholder_v2.pth",
    ],
    output_dir: "cupholder_proprio_ncf_v2",
    uses_device_scoping: true,
};

static PROPRIO_NCF_M1: PolicyBundle = PolicyBundle {
    name: PolicyName::ProprioNcfM1,
    fixed_flags: &[
        "task.env.numEnvs=4096",
        "train.ppo.minibatch_size=256",
        "task.env.enableTactile=False",
        "train.ppo.use_contact_gt=False",
        "train.ppo.use_ncf=True",
        "train.ncf.arch=transformer",
        "train.ncf.vae_checkpoint=checkpoints/ncf/vae_cupholder.pth",
        "train.ncf.num_history=1",
    ],
    output_dir: "cupholder_proprio_ncf_m1",
    uses_device_scoping: true,
};

static NCF_ADAPT: PolicyBundle = PolicyBundle {
    name: PolicyName::NcfAdapt,
    fixed_flags: &[
        "task.env.numEnvs=4096",
        "train.ppo.minibatch_size=256",
        "task.env.enableTactile=False",
        "train.ppo.use_contact_gt=False",
        "train.ppo.use_ncf=True",
        "train.ncf.arch=transformer_v2",
        "train.ncf.vae_checkpoint=checkpoints/ncf/vae_cupholder_v2.pth",
        "train.ppo.proprio_adapt=True",
    ],
    output_dir: "cupholder_ncf_adapt",
    uses_device_scoping: true,
};
