pub mod board;
pub mod input;
pub mod keymap_file;
pub mod play_loop;
pub mod search_run;
pub mod solve_config;

use cornered_core::{Direction, SolveStopReason};

pub const APP_NAME: &str = "cornered";

/// Format a state fingerprint as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_fingerprint(hash: u64) -> String {
    format!("0x{hash:016x}")
}

/// Run-length form of a path: one `"<move> <n>"` entry per run of equal
/// moves, where `n` is the 1-based index of the run's last move.
pub fn compact_path(path: &[Direction]) -> String {
    let mut entries = Vec::new();
    for (index, action) in path.iter().enumerate() {
        let run_ends = path.get(index + 1).is_none_or(|next| next != action);
        if run_ends {
            entries.push(format!("{} {}", action.name().to_lowercase(), index + 1));
        }
    }
    entries.join(", ")
}

/// Map a `SolveStopReason` to its reason code string.
pub fn stop_reason_code(reason: SolveStopReason) -> &'static str {
    match reason {
        SolveStopReason::BudgetExhausted => "STEP_BUDGET_SPENT",
        SolveStopReason::SearchExhausted => "SEARCH_EXHAUSTED",
    }
}
