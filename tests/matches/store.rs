//! Matches round-tripping through the in-memory record store.

use scorebook::entity::encode_payload;
use scorebook::{
    AggregateBuilder, BallOutcome, Commit, EventRecord, Get, HashMapRepository, MatchAggregate,
    MatchStatus, RepositoryError,
};

use crate::support::live_match;

#[test]
fn committed_match_replays_identically() {
    let repo = HashMapRepository::new();
    let matches = repo.clone().aggregate::<MatchAggregate>();

    let mut game = live_match("m1");
    for outcome in ["1", "4", "OUT"] {
        game.bowl(outcome.parse().unwrap(), None).unwrap();
    }
    game.select_striker("m1-t1-p2").unwrap();
    game.bowl(BallOutcome::NoBall, None).unwrap();
    game.bowl(BallOutcome::Runs(6), None).unwrap();
    game.undo_last_ball().unwrap();
    matches.commit(&mut game).unwrap();

    let loaded = matches.get("m1").unwrap().unwrap();
    assert_eq!(loaded.snapshot(), game.snapshot());
    assert_eq!(loaded.entity.version(), game.entity.version());
    assert!(!loaded.entity.has_uncommitted());
    assert_eq!(loaded.batting_team().unwrap().runs, 6);
}

#[test]
fn snapshot_serializes_for_viewers() {
    let mut game = live_match("m1");
    game.bowl(BallOutcome::Runs(2), None).unwrap();

    let json = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(json["status"], "live");
    assert_eq!(json["batting_team"], "m1-t1");
    assert_eq!(json["balls"][0]["id"], "m1-b1");
    assert_eq!(json["team1"]["players"][0]["runs_scored"], 2);
}

#[test]
fn second_panel_tab_is_rejected() {
    let repo = HashMapRepository::new();
    let matches = repo.aggregate::<MatchAggregate>();
    let mut game = live_match("m1");
    matches.commit(&mut game).unwrap();

    let mut tab_one = matches.get("m1").unwrap().unwrap();
    let mut tab_two = matches.get("m1").unwrap().unwrap();

    tab_one.bowl(BallOutcome::Runs(4), None).unwrap();
    matches.commit(&mut tab_one).unwrap();

    tab_two.bowl(BallOutcome::Runs(1), None).unwrap();
    let err = matches.commit(&mut tab_two).unwrap_err();
    assert!(matches!(err, RepositoryError::ConcurrentWrite { actual: 4, expected: 3, .. }));

    let stored = matches.get("m1").unwrap().unwrap();
    assert_eq!(stored.batting_team().unwrap().runs, 4);
}

#[test]
fn listing_filters_by_status() {
    let matches = HashMapRepository::new().aggregate::<MatchAggregate>();
    for id in ["m1", "m2", "m3"] {
        let mut game = live_match(id);
        if id == "m2" {
            game.complete().unwrap();
        }
        matches.commit(&mut game).unwrap();
    }

    let live: Vec<String> = matches
        .find(|g| g.status() == MatchStatus::Live)
        .unwrap()
        .iter()
        .map(|g| g.id().to_string())
        .collect();
    assert_eq!(live, vec!["m1", "m3"]);
}

#[test]
fn corrupted_stream_fails_to_load() {
    let repo = HashMapRepository::new();
    let mut game = live_match("m1");
    game.bowl(BallOutcome::Runs(1), None).unwrap();
    repo.clone()
        .aggregate::<MatchAggregate>()
        .commit(&mut game)
        .unwrap();

    // Append an undo of a ball that was never bowled.
    let mut entity = repo.get("m1").unwrap().unwrap();
    let payload = encode_payload("BallUndone", &"m1-b9".to_string()).unwrap();
    entity.record("BallUndone", payload);
    repo.commit(&mut entity).unwrap();

    let err = repo
        .aggregate::<MatchAggregate>()
        .get("m1")
        .err()
        .unwrap();
    match err {
        RepositoryError::Replay(message) => {
            assert!(message.starts_with("BallUndone #5"), "{message}");
            assert!(message.contains("m1-b9"), "{message}");
        }
        other => panic!("expected a replay error, got {other}"),
    }
}

#[test]
fn records_keep_their_payload_in_json() {
    let game = live_match("m1");
    let record: &EventRecord = &game.entity.events()[0];
    let json = serde_json::to_string(record).unwrap();
    let back: EventRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, record);
}
