//! Step budget configuration for batch solving.

use std::env;

pub const DEFAULT_STEP_BUDGET: u64 = 10_000;
pub const DEFAULT_BATCH_SIZE: u64 = 100_000;
pub const STEP_BUDGET_ENV: &str = "CORNERED_STEP_BUDGET";

/// Command line wins over the environment, which wins over the default.
/// An unparsable environment value is ignored.
pub fn resolve_step_budget(cli_steps: Option<u64>, env_override: Option<&str>) -> u64 {
    if let Some(steps) = cli_steps {
        return steps;
    }
    env_override
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_STEP_BUDGET)
}

pub fn runtime_step_budget(cli_steps: Option<u64>) -> u64 {
    let env_override = env::var(STEP_BUDGET_ENV).ok();
    resolve_step_budget(cli_steps, env_override.as_deref())
}

/// A missing or zero batch size falls back to the default.
pub fn resolve_batch_size(cli_batch: Option<u64>) -> u64 {
    match cli_batch {
        Some(0) | None => DEFAULT_BATCH_SIZE,
        Some(size) => size,
    }
}
