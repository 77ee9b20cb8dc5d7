//! Test domain: a two-team fixture and a live match ready for the first ball.

use scorebook::{MatchAggregate, MatchSetup, ScoringConfig};

pub fn setup() -> MatchSetup {
    MatchSetup {
        heading: "County Cup".into(),
        match_number: 12,
        team1_name: "Falcons".into(),
        team2_name: "Hawks".into(),
        team1_players: ["Asha", "Bilal", "Chen", "Dara", "Eli", "Femi"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        team2_players: ["Gus", "Hana", "Ivo", "Jun", "Kai"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

/// Created, started with team one batting, Asha on strike. Not committed.
pub fn live_match(id: &str) -> MatchAggregate {
    let mut game = MatchAggregate::new();
    game.create(id, &setup(), &ScoringConfig::default()).unwrap();
    game.start(None).unwrap();
    game.select_striker(&format!("{}-t1-p1", id)).unwrap();
    game
}
