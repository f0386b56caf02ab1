//! Positional argument capture.

/// One launch request, built once from the positional argv.
///
/// Missing positionals are captured as empty strings rather than
/// rejected; the trainer is left to report the malformed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    pub device_selector: String,
    pub seed: String,
    pub cache_dir: String,
    pub policy_name: String,
    /// Forwarded verbatim after the policy bundle
    pub extra_args: Vec<String>,
}

impl InvocationRequest {
    /// Number of leading positionals consumed before the extra tail.
    pub const POSITIONALS: usize = 4;

    pub fn from_args<S: AsRef<str>>(argv: &[S]) -> Self {
        let field = |idx: usize| {
            argv.get(idx)
                .map(|s| s.as_ref().to_string())
                .unwrap_or_default()
        };

        let extra_args = argv
            .iter()
            .skip(Self::POSITIONALS)
            .map(|s| s.as_ref().to_string())
            .collect();

        Self {
            device_selector: field(0),
            seed: field(1),
            cache_dir: field(2),
            policy_name: field(3),
            extra_args,
        }
    }
}
