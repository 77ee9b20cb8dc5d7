//! A worked fragment of an innings, checked ball by ball and then unwound.

use scorebook::scoring::summary::{format_score, overs_display};
use scorebook::scoring::{BallOutcome, ScoringEngine};

use crate::support::{bowl_all, opening_state, player_id, striker};

const SEQUENCE: [BallOutcome; 5] = [
    BallOutcome::Runs(1),
    BallOutcome::Runs(4),
    BallOutcome::Out,
    BallOutcome::NoBall,
    BallOutcome::Runs(6),
];

#[test]
fn one_four_out_noball_six() {
    let engine = ScoringEngine::default();
    let (state, applied) = bowl_all(&engine, opening_state(), &SEQUENCE);
    let team = &state.batting_team;
    let a = team.player(&player_id(1)).unwrap();
    let b = team.player(&player_id(2)).unwrap();

    assert_eq!(state.legal_balls(6), 4);
    assert_eq!(overs_display(state.legal_balls(6), 6), "0.4");
    assert_eq!(format_score(team.runs, team.wickets), "12/1");

    assert_eq!(a.runs_scored, 5);
    // The dismissal counts as a ball faced.
    assert_eq!(a.balls_faced, 3);
    assert!(a.is_out);
    assert!(!a.is_on_strike);

    assert_eq!(b.runs_scored, 6);
    assert_eq!(b.balls_faced, 1);
    assert!(b.is_on_strike);
    assert_eq!(team.balls_faced(), 4);

    let requires: Vec<bool> = applied.iter().map(|a| a.requires_new_batsman).collect();
    assert_eq!(requires, vec![false, false, true, false, false]);

    let ids: Vec<&str> = state.balls.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["m1-b1", "m1-b2", "m1-b3", "m1-b4", "m1-b5"]);
    let numbers: Vec<u32> = state.balls.iter().map(|b| b.ball_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 4]);
}

#[test]
fn unwinding_the_fragment_returns_to_the_start() {
    let engine = ScoringEngine::default();
    let (mut state, _) = bowl_all(&engine, opening_state(), &SEQUENCE);

    // Peel off 6, NOBALL, OUT, leaving A back in after two balls.
    for _ in 0..3 {
        state = engine.undo_last_ball(&state).unwrap().state;
    }
    let a = state.batting_team.player(&player_id(1)).unwrap();
    assert!(!a.is_out);
    assert_eq!((a.runs_scored, a.balls_faced), (5, 2));
    assert_eq!(striker(&state), Some(player_id(1)));
    assert_eq!((state.batting_team.runs, state.batting_team.wickets), (5, 0));
    assert_eq!(state.legal_balls(6), 2);

    for _ in 0..2 {
        state = engine.undo_last_ball(&state).unwrap().state;
    }
    assert_eq!(state, opening_state());
    assert!(engine.undo_last_ball(&state).is_err());
}

#[test]
fn a_full_over_then_the_next() {
    let engine = ScoringEngine::default();
    let mut state = opening_state();
    state.batting_team.players[1].balls_faced = 1;

    let over = [
        BallOutcome::Runs(0),
        BallOutcome::Runs(2),
        BallOutcome::NoBall,
        BallOutcome::Runs(1),
        BallOutcome::Runs(0),
        BallOutcome::Runs(4),
        BallOutcome::Runs(0),
    ];
    let (state, _) = bowl_all(&engine, state, &over);

    assert_eq!((state.current_over, state.current_ball), (1, 0));
    assert_eq!(state.batting_team.runs, 8);
    assert_eq!(state.balls.len(), 7);
    assert_eq!(state.balls.last().map(|b| b.over_number), Some(0));
}
