//! Lifecycle transitions of a single match.

use scorebook::matches::{MatchEvent, TeamTotals};
use scorebook::{BallOutcome, MatchAggregate, MatchError, MatchStatus, ScoringConfig, ScoringError};

use crate::support::{live_match, setup};

#[test]
fn upcoming_then_live_then_completed() {
    let mut game = MatchAggregate::new();
    game.create("m1", &setup(), &ScoringConfig::default()).unwrap();
    assert_eq!(game.status(), MatchStatus::Upcoming);
    assert!(game.batting_team().is_none());
    assert!(!game.needs_striker());

    game.record_toss("m1-t2").unwrap();
    game.start(Some("m1-t2")).unwrap();
    assert_eq!(game.status(), MatchStatus::Live);
    assert_eq!(game.batting_team().map(|t| t.name.as_str()), Some("Hawks"));
    assert_eq!(game.bowling_team().map(|t| t.name.as_str()), Some("Falcons"));
    assert!(game.needs_striker());

    game.complete().unwrap();
    assert_eq!(game.status(), MatchStatus::Completed);
    assert_eq!(game.toss_winner(), Some("m1-t2"));

    let names: Vec<&str> = game
        .entity
        .events()
        .iter()
        .map(|e| e.event_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            MatchEvent::CREATED,
            MatchEvent::TOSS_RECORDED,
            MatchEvent::STARTED,
            MatchEvent::COMPLETED
        ]
    );
}

#[test]
fn upcoming_match_cannot_be_completed_directly() {
    let mut game = MatchAggregate::new();
    game.create("m1", &setup(), &ScoringConfig::default()).unwrap();
    assert_eq!(game.complete(), Err(MatchError::NotLive(MatchStatus::Upcoming)));
}

#[test]
fn back_filled_match_starts_completed() {
    let mut game = MatchAggregate::new();
    game.record_completed("m1", &setup(), &ScoringConfig::default())
        .unwrap();
    assert_eq!(game.status(), MatchStatus::Completed);
    assert_eq!(game.entity.events().len(), 2);
    assert_eq!(game.start(None), Err(MatchError::AlreadyCompleted));
    assert_eq!(game.record_toss("m1-t1"), Err(MatchError::AlreadyCompleted));
}

#[test]
fn unknown_teams_and_players_are_rejected() {
    let mut game = MatchAggregate::new();
    game.create("m1", &setup(), &ScoringConfig::default()).unwrap();
    assert_eq!(
        game.start(Some("m2-t1")),
        Err(MatchError::UnknownTeam("m2-t1".into()))
    );
    game.start(None).unwrap();

    // Bowling side is not batting.
    assert_eq!(
        game.select_striker("m1-t2-p1"),
        Err(MatchError::UnknownPlayer("m1-t2-p1".into()))
    );
    assert_eq!(
        game.record_toss("nobody"),
        Err(MatchError::UnknownTeam("nobody".into()))
    );
}

#[test]
fn dismissed_batsman_cannot_return() {
    let mut game = live_match("m1");
    let applied = game.bowl(BallOutcome::Out, None).unwrap();
    assert!(applied.requires_new_batsman);
    assert!(game.needs_striker());

    assert_eq!(
        game.select_striker("m1-t1-p1"),
        Err(MatchError::PlayerOut("m1-t1-p1".into()))
    );
    assert!(matches!(
        game.bowl(BallOutcome::Runs(1), Some("m1-t1-p1")),
        Err(MatchError::Scoring(ScoringError::NoStrikerResolved(_)))
    ));

    game.select_striker("m1-t1-p2").unwrap();
    assert!(!game.needs_striker());
    assert_eq!(game.striker().map(|p| p.name.as_str()), Some("Bilal"));
}

#[test]
fn explicit_striker_overrides_the_flag() {
    let mut game = live_match("m1");
    let applied = game.bowl(BallOutcome::Runs(2), Some("m1-t1-p3")).unwrap();
    assert_eq!(applied.ball.batsman_id, "m1-t1-p3");
    assert_eq!(game.striker().map(|p| p.id.as_str()), Some("m1-t1-p3"));
    let asha = game.player("m1-t1-p1").unwrap();
    assert!(!asha.is_on_strike);
}

#[test]
fn undo_needs_a_ball() {
    let mut game = live_match("m1");
    assert_eq!(
        game.undo_last_ball(),
        Err(MatchError::Scoring(ScoringError::EmptyBallLog))
    );

    game.bowl(BallOutcome::Runs(4), None).unwrap();
    let undone = game.undo_last_ball().unwrap();
    assert_eq!(undone.id, "m1-b1");
    assert!(game.balls().is_empty());
    assert_eq!(game.batting_team().unwrap().runs, 0);

    // The freed position is reused.
    let again = game.bowl(BallOutcome::Runs(1), None).unwrap();
    assert_eq!(again.ball.id, "m1-b1");
}

#[test]
fn scoreboard_tracks_the_crease() {
    let mut game = live_match("m1");
    game.bowl(BallOutcome::Runs(1), None).unwrap();
    game.bowl(BallOutcome::Runs(4), None).unwrap();
    game.bowl(BallOutcome::Out, None).unwrap();
    game.select_striker("m1-t1-p2").unwrap();
    game.bowl(BallOutcome::NoBall, None).unwrap();
    game.bowl(BallOutcome::Runs(6), None).unwrap();

    let board = game.scoreboard();
    assert_eq!(board.batting_team.as_deref(), Some("Falcons"));
    assert_eq!(board.score, "12/1");
    assert_eq!(board.overs, "0.4");
    assert_eq!(board.run_rate, "18.00");
    assert_eq!(board.at_crease.len(), 1);
    assert_eq!(board.at_crease[0].name, "Bilal");
    assert_eq!(board.at_crease[0].strike_rate, 600.0);
    assert!(board.at_crease[0].on_strike);
    assert!(board.result.is_none());
}

#[test]
fn amended_scorecard_decides_the_result() {
    let mut game = live_match("m1");
    let mut card = game.amendment();
    card.heading = "County Cup Final".into();
    card.team1 = TeamTotals { runs: 150, wickets: 8 };
    card.team2 = TeamTotals { runs: 151, wickets: 3 };
    game.amend_scorecard(&card).unwrap();

    assert_eq!(game.heading(), "County Cup Final");
    assert_eq!(game.status(), MatchStatus::Completed);
    assert_eq!(
        game.scoreboard().result.as_deref(),
        Some("Hawks won by 7 wickets")
    );
    assert!(game.striker().is_none());
}

#[test]
fn squad_limits_come_from_config() {
    let config = ScoringConfig {
        max_players: 5,
        ..ScoringConfig::default()
    };
    let mut game = MatchAggregate::new();
    let err = game.create("m1", &setup(), &config).unwrap_err();
    assert_eq!(
        err,
        MatchError::InvalidSetup("Team 1 can have at most 5 players".into())
    );
}
