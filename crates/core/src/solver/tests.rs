use super::*;

/// States reached by repeating `action` from the initial state until capture.
fn line_until_capture(action: Direction) -> Vec<GameState> {
    let mut states = vec![GameState::new()];
    for _ in 0..1000 {
        let top = states.last().unwrap();
        if top.is_done() {
            return states;
        }
        states.push(transition(top, action).unwrap());
    }
    panic!("repeating {action} never got captured");
}

fn step_until_first_capture(solver: &mut Solver) -> usize {
    for _ in 0..10_000 {
        if let StepOutcome::Backtracked { captured_at, .. } = solver.step().unwrap() {
            return captured_at;
        }
    }
    panic!("no branch was captured within the step limit");
}

#[test]
fn first_step_tries_left() {
    let mut solver = Solver::new();
    assert_eq!(solver.step().unwrap(), StepOutcome::Expanded { depth: 1 });
    assert_eq!(solver.path(), &[Direction::Left]);
    assert!(solver.best_path().is_empty(), "best path is recorded at the start of a step");

    let checkpoint = solver.checkpoint();
    assert_eq!(
        checkpoint.snapshot.pending_moves,
        vec![vec![Direction::Down, Direction::Right, Direction::Up]]
    );
    assert_eq!(checkpoint.snapshot.states.len(), 2);

    solver.step().unwrap();
    assert_eq!(solver.best_path(), &[Direction::Left]);
}

#[test]
fn best_path_covers_the_first_captured_branch() {
    let mut solver = Solver::new();
    let captured_at = step_until_first_capture(&mut solver);

    assert!(captured_at > 0);
    assert!(solver.best_path().len() >= captured_at);
    // The first branch only ever moves left.
    assert!(solver.best_path().iter().all(|&action| action == Direction::Left));

    let report = solver.run(5_000).unwrap();
    assert!(report.best_path.len() >= captured_at);
    assert_eq!(report.stop_reason, SolveStopReason::BudgetExhausted);
    assert_eq!(report.steps_taken, 5_000);
}

#[test]
fn backtracking_resumes_at_the_next_untried_move() {
    let mut solver = Solver::new();
    let captured_at = step_until_first_capture(&mut solver);

    // The captured leaf was reached by LEFT from its parent, so UP is next.
    assert_eq!(solver.depth(), captured_at);
    assert_eq!(solver.path().last(), Some(&Direction::Up));
    assert!(solver.path()[..captured_at - 1].iter().all(|&action| action == Direction::Left));
}

#[test]
fn split_runs_match_a_single_run() {
    let single = solve(3_000, None).unwrap();

    let first = solve(1_234, None).unwrap();
    let second = solve(1_766, Some(first.checkpoint)).unwrap();

    assert_eq!(second.best_path, single.best_path);
    assert_eq!(second.checkpoint, single.checkpoint);
    assert_eq!(second.steps_taken, 1_766);
}

#[test]
fn checkpoint_survives_json_roundtrip() {
    let first = solve(700, None).unwrap();
    let json = serde_json::to_string(&first.checkpoint).unwrap();
    let decoded: SearchCheckpoint = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, first.checkpoint);

    let resumed = solve(300, Some(decoded)).unwrap();
    let single = solve(1_000, None).unwrap();
    assert_eq!(resumed.best_path, single.best_path);
}

#[test]
fn spent_root_exhausts_the_search() {
    // DOWN is the last move tried at every node, so a captured all-DOWN line
    // with nothing pending is the final branch of the whole tree.
    let states = line_until_capture(Direction::Down);
    let depth = states.len() - 1;
    let checkpoint = SearchCheckpoint {
        snapshot: SearchSnapshot {
            states,
            pending_moves: vec![Vec::new(); depth],
            path: vec![Direction::Down; depth],
        },
        best_path: Vec::new(),
    };

    let mut solver = Solver::resume(checkpoint).unwrap();
    assert_eq!(solver.step().unwrap(), StepOutcome::Exhausted);
    assert!(solver.is_exhausted());
    assert_eq!(solver.best_path().len(), depth);

    // Further steps are no-ops.
    assert_eq!(solver.step().unwrap(), StepOutcome::Exhausted);
    let report = solver.run(10).unwrap();
    assert_eq!(report.steps_taken, 0);
    assert_eq!(report.stop_reason, SolveStopReason::SearchExhausted);
    assert!(report.checkpoint.snapshot.is_exhausted());
}

#[test]
fn exhausted_checkpoint_resumes_as_exhausted() {
    let checkpoint = SearchCheckpoint {
        snapshot: SearchSnapshot { states: Vec::new(), pending_moves: Vec::new(), path: Vec::new() },
        best_path: vec![Direction::Left, Direction::Left],
    };
    let report = solve(100, Some(checkpoint)).unwrap();
    assert_eq!(report.stop_reason, SolveStopReason::SearchExhausted);
    assert_eq!(report.best_path, vec![Direction::Left, Direction::Left]);
}

#[test]
fn resume_rejects_mismatched_stacks() {
    let mut checkpoint = solve(20, None).unwrap().checkpoint;
    checkpoint.snapshot.path.pop();

    assert!(matches!(
        Solver::resume(checkpoint),
        Err(SolverError::CorruptSearchState(CorruptReason::StackLengthMismatch { .. }))
    ));
}

#[test]
fn resume_rejects_a_foreign_root() {
    let mut checkpoint = solve(5, None).unwrap().checkpoint;
    checkpoint.snapshot.states[0] = GameState::from_parts(Pos::new(3, 3), Vec::new(), 0);

    assert!(matches!(
        Solver::resume(checkpoint),
        Err(SolverError::CorruptSearchState(CorruptReason::WrongRoot))
    ));
}

#[test]
fn resume_rejects_reordered_pending_moves() {
    let mut checkpoint = solve(5, None).unwrap().checkpoint;
    checkpoint.snapshot.pending_moves[1] = vec![Direction::Up, Direction::Right, Direction::Down];

    assert!(matches!(
        Solver::resume(checkpoint),
        Err(SolverError::CorruptSearchState(CorruptReason::PendingMovesOutOfOrder { depth: 1 }))
    ));
}

#[test]
fn resume_rejects_states_that_do_not_follow_the_path() {
    let mut checkpoint = solve(5, None).unwrap().checkpoint;
    let fake = GameState::from_parts(Pos::new(0, 0), Vec::new(), 2);
    checkpoint.snapshot.states[2] = fake;

    assert!(matches!(
        Solver::resume(checkpoint),
        Err(SolverError::CorruptSearchState(CorruptReason::BrokenTransition { depth: 1 }))
    ));
}

#[test]
fn resume_rejects_a_captured_interior_state() {
    let mut states = line_until_capture(Direction::Left);
    let captured_depth = states.len() - 1;
    // A child above the captured leaf can never come out of a real search.
    states.push(states[captured_depth].clone());
    let depth = captured_depth + 1;

    let checkpoint = SearchCheckpoint {
        snapshot: SearchSnapshot {
            states,
            pending_moves: vec![SEARCH_ORDER[..3].to_vec(); depth],
            path: vec![Direction::Left; depth],
        },
        best_path: Vec::new(),
    };

    assert_eq!(
        Solver::resume(checkpoint).unwrap_err(),
        SolverError::CorruptSearchState(CorruptReason::TerminalInterior { depth: captured_depth })
    );
}

#[test]
fn resume_rejects_a_best_path_that_runs_past_capture() {
    let mut solver = Solver::new();
    let captured_at = step_until_first_capture(&mut solver);

    let mut checkpoint = solver.checkpoint();
    checkpoint.best_path = vec![Direction::Left; captured_at + 1];

    assert_eq!(
        Solver::resume(checkpoint).unwrap_err(),
        SolverError::CorruptSearchState(CorruptReason::InvalidBestPath { index: captured_at })
    );
}

#[test]
fn zero_budget_reports_the_untouched_search() {
    let report = solve(0, None).unwrap();
    assert_eq!(report.steps_taken, 0);
    assert_eq!(report.stop_reason, SolveStopReason::BudgetExhausted);
    assert_eq!(report.checkpoint, SearchCheckpoint::initial());
}
