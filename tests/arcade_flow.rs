use typerush::game::level::LEVELS;
use typerush::game::{ArcadeGame, FieldSize, Phase};

fn game() -> ArcadeGame {
    ArcadeGame::seeded(FieldSize::DEFAULT, 2024)
}

#[test]
fn lock_on_goes_to_the_lowest_match() {
    let mut g = game();
    let a = g.insert_target("star", 120.0, 400.0);
    let b = g.insert_target("ship", 300.0, 100.0);

    assert!(g.on_key('s'));
    assert_eq!(g.locked(), Some(a));

    // The lock sticks: "ship" is untouched while "star" is finished.
    for ch in "tar".chars() {
        assert!(g.on_key(ch));
    }
    assert_eq!(g.score(), 10);
    assert_eq!(g.locked(), None);
    let remaining: Vec<_> = g.targets().iter().map(|t| t.id).collect();
    assert_eq!(remaining, vec![b]);
    assert_eq!(g.targets()[0].typed_index, 0);
}

#[test]
fn clearing_level_one_moves_to_level_two() {
    let mut g = game();
    for i in 0..LEVELS[0].required_kills {
        g.insert_target("grid", 100.0 + i as f64, 200.0);
        for ch in "grid".chars() {
            g.on_key(ch);
        }
    }
    let snap = g.snapshot();
    assert_eq!(snap.level_index, 1);
    assert_eq!(snap.level_name, LEVELS[1].name);
    assert_eq!(snap.kills, 0);
    assert_eq!(snap.score, LEVELS[0].required_kills * 10);
    assert!(!snap.over);
}

#[test]
fn unattended_game_runs_out_of_lives() {
    let mut g = game();
    let mut frames = 0;
    while g.phase() == Phase::Playing {
        g.update(33.0);
        frames += 1;
        assert!(frames < 10_000, "game never ended");
    }
    assert_eq!(g.lives(), 0);
    // Falling 720 - 50 + 30 units at 60/s takes over eleven seconds.
    assert!(frames as f64 * 33.0 > 11_000.0);

    let snap = g.snapshot();
    assert!(snap.over);
    assert!(!g.update(1000.0));
    assert_eq!(g.snapshot(), snap);

    g.restart();
    assert_eq!(g.phase(), Phase::Playing);
    assert_eq!(g.lives(), 3);
}

#[test]
fn resize_moves_the_floor() {
    let mut g = game();
    g.resize(300.0, 200.0);
    assert_eq!(g.field().floor(), 150.0);
    g.insert_target("cat", 150.0, 149.0);
    g.update(100.0);
    assert_eq!(g.lives(), 2);
}
