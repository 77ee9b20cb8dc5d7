//! Per-delivery rules and undo round trips.

use scorebook::scoring::{BallOutcome, InningsState, ScoringEngine, ScoringError};

use crate::support::{init_tracing, opening_state, player_id, striker};

/// A and B both at the crease, A on strike, mid-over.
fn partnership() -> InningsState {
    let mut state = opening_state();
    state.current_over = 2;
    state.current_ball = 3;
    state.batting_team.players[0].balls_faced = 4;
    state.batting_team.players[1].balls_faced = 2;
    state
}

// ============================================================================
// Runs
// ============================================================================

#[test]
fn plain_runs_credit_batsman_team_and_counter() {
    init_tracing();
    let engine = ScoringEngine::default();
    for r in [0u8, 1, 2, 3, 5] {
        let before = partnership();
        let applied = engine
            .apply_ball(&before, BallOutcome::Runs(r), &player_id(1))
            .unwrap();
        let after = &applied.state;
        let a_before = &before.batting_team.players[0];
        let a_after = &after.batting_team.players[0];

        assert_eq!(a_after.balls_faced, a_before.balls_faced + 1, "r={r}");
        assert_eq!(a_after.runs_scored, a_before.runs_scored + u32::from(r));
        assert_eq!(after.batting_team.runs, before.batting_team.runs + u32::from(r));
        assert_eq!((after.current_over, after.current_ball), (2, 4));
        assert!(!applied.requires_new_batsman);

        let expected = if r % 2 == 1 { player_id(2) } else { player_id(1) };
        assert_eq!(striker(after), Some(expected), "r={r}");
    }
}

#[test]
fn odd_runs_without_partner_keep_strike() {
    let engine = ScoringEngine::default();
    let applied = engine
        .apply_ball(&opening_state(), BallOutcome::Runs(3), &player_id(1))
        .unwrap();
    assert_eq!(striker(&applied.state), Some(player_id(1)));
}

#[test]
fn boundaries_are_never_wickets() {
    let engine = ScoringEngine::default();
    for r in [4u8, 6] {
        let applied = engine
            .apply_ball(&partnership(), BallOutcome::Runs(r), &player_id(1))
            .unwrap();
        let a = &applied.state.batting_team.players[0];
        assert_eq!(a.runs_scored, u32::from(r));
        assert!(!a.is_out);
        assert!(!applied.ball.is_wicket);
        assert_eq!(applied.state.batting_team.wickets, 0);
        assert_eq!(striker(&applied.state), Some(player_id(1)));
    }
}

// ============================================================================
// Wickets and no-balls
// ============================================================================

#[test]
fn wicket_dismisses_and_asks_for_a_batsman() {
    let engine = ScoringEngine::default();
    let applied = engine
        .apply_ball(&partnership(), BallOutcome::Out, &player_id(1))
        .unwrap();
    let a = &applied.state.batting_team.players[0];

    assert!(a.is_out);
    assert!(!a.is_on_strike);
    assert_eq!(a.balls_faced, 5);
    assert_eq!(applied.state.batting_team.wickets, 1);
    assert_eq!(applied.state.batting_team.runs, 0);
    assert_eq!(applied.state.current_ball, 4);
    assert!(applied.requires_new_batsman);
    assert_eq!(striker(&applied.state), None);
}

#[test]
fn no_ball_adds_a_run_and_no_legal_ball() {
    let engine = ScoringEngine::default();
    let before = partnership();
    let applied = engine
        .apply_ball(&before, BallOutcome::NoBall, &player_id(1))
        .unwrap();
    let a = &applied.state.batting_team.players[0];

    assert_eq!((applied.state.current_over, applied.state.current_ball), (2, 3));
    assert_eq!(applied.state.batting_team.runs, 1);
    assert_eq!(a.runs_scored, 0);
    assert_eq!(a.balls_faced, 4);
    assert!(applied.ball.is_no_ball);
    assert_eq!(applied.ball.ball_number, 4);
    // One run is odd: the partner takes strike.
    assert_eq!(striker(&applied.state), Some(player_id(2)));
}

// ============================================================================
// Over boundary
// ============================================================================

#[test]
fn last_ball_of_the_over_rolls_over() {
    let engine = ScoringEngine::default();
    let mut state = partnership();
    state.current_ball = 5;
    let applied = engine
        .apply_ball(&state, BallOutcome::Runs(2), &player_id(1))
        .unwrap();
    assert_eq!((applied.state.current_over, applied.state.current_ball), (3, 0));
    assert_eq!(applied.ball.over_number, 2);
    assert_eq!(applied.ball.ball_number, 6);
}

#[test]
fn undo_at_the_start_clamps_to_zero() {
    let engine = ScoringEngine::default();
    let mut state = opening_state();
    let applied = engine
        .apply_ball(&state, BallOutcome::Runs(1), &player_id(1))
        .unwrap();
    state.balls = applied.state.balls.clone();

    let undone = engine.undo_last_ball(&state).unwrap();
    assert_eq!((undone.state.current_over, undone.state.current_ball), (0, 0));
}

#[test]
fn undo_borrows_an_over() {
    let engine = ScoringEngine::default();
    let mut state = partnership();
    state.current_ball = 5;
    let applied = engine
        .apply_ball(&state, BallOutcome::Runs(0), &player_id(1))
        .unwrap();
    let undone = engine.undo_last_ball(&applied.state).unwrap();
    assert_eq!((undone.state.current_over, undone.state.current_ball), (2, 5));
}

// ============================================================================
// Round trips and rejections
// ============================================================================

#[test]
fn undo_restores_the_state_exactly() {
    let engine = ScoringEngine::default();
    for state in [opening_state(), partnership()] {
        for outcome in BallOutcome::ALL {
            let applied = engine.apply_ball(&state, outcome, &player_id(1)).unwrap();
            let undone = engine.undo_last_ball(&applied.state).unwrap();
            assert_eq!(undone.state, state, "outcome {outcome}");
            assert_eq!(undone.ball, applied.ball);
        }
    }
}

#[test]
fn undo_leaves_a_single_striker() {
    let engine = ScoringEngine::default();
    let applied = engine
        .apply_ball(&partnership(), BallOutcome::Runs(1), &player_id(1))
        .unwrap();
    let mut state = applied.state;
    // Someone else was flagged in between.
    state.batting_team.players[2].is_on_strike = true;

    let undone = engine.undo_last_ball(&state).unwrap();
    let flagged: Vec<&str> = undone
        .state
        .batting_team
        .players
        .iter()
        .filter(|p| p.is_on_strike)
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(flagged, vec![player_id(1).as_str()]);
}

#[test]
fn rejections_leave_no_trace() {
    let engine = ScoringEngine::default();
    let state = partnership();

    assert!(matches!(
        engine.apply_ball(&state, BallOutcome::Runs(7), &player_id(1)),
        Err(ScoringError::InvalidOutcome(_))
    ));
    assert_eq!(
        engine.apply_ball(&state, BallOutcome::Runs(1), "m1-t2-p1"),
        Err(ScoringError::NoStrikerResolved("m1-t2-p1".into()))
    );
    assert_eq!(
        engine.undo_last_ball(&state),
        Err(ScoringError::EmptyBallLog)
    );
    assert_eq!(state, partnership());
}
