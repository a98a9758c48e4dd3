use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info, trace};

use crate::game::level::{LEVELS, Level};
use crate::game::target::{Target, TargetId};

pub const STARTING_LIVES: u32 = 3;
pub const POINTS_PER_KILL: u32 = 10;
/// Horizontal margin kept clear on both sides when spawning.
pub const SPAWN_PADDING: f64 = 70.0;
/// Targets appear just above the visible area.
pub const SPAWN_Y: f64 = -30.0;
/// Distance from the bottom edge at which a target counts as having landed.
pub const FLOOR_MARGIN: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSize {
    pub width: f64,
    pub height: f64,
}

impl FieldSize {
    pub const DEFAULT: FieldSize = FieldSize {
        width: 480.0,
        height: 720.0,
    };

    pub fn floor(&self) -> f64 {
        self.height - FLOOR_MARGIN
    }
}

impl Default for FieldSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Terminal: lives ran out or the last level was cleared.
    Over,
}

/// Immutable per-frame view handed to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcadeSnapshot {
    pub field: FieldSize,
    pub targets: Vec<Target>,
    pub locked: Option<TargetId>,
    pub score: u32,
    pub lives: u32,
    pub level_index: usize,
    pub level_name: &'static str,
    pub kills: u32,
    pub required_kills: u32,
    pub over: bool,
}

pub struct ArcadeGame {
    levels: &'static [Level],
    field: FieldSize,
    targets: Vec<Target>,
    locked: Option<TargetId>,
    next_id: u64,
    clock_ms: f64,
    last_spawn_ms: Option<f64>,
    score: u32,
    lives: u32,
    level_index: usize,
    kills: u32,
    phase: Phase,
    rng: SmallRng,
}

impl ArcadeGame {
    pub fn new(field: FieldSize) -> Self {
        Self::with_levels(LEVELS, field, SmallRng::from_entropy())
    }

    pub fn seeded(field: FieldSize, seed: u64) -> Self {
        Self::with_levels(LEVELS, field, SmallRng::seed_from_u64(seed))
    }

    pub fn with_levels(levels: &'static [Level], field: FieldSize, rng: SmallRng) -> Self {
        Self {
            levels,
            field,
            targets: Vec::new(),
            locked: None,
            next_id: 1,
            clock_ms: 0.0,
            last_spawn_ms: None,
            score: 0,
            lives: STARTING_LIVES,
            level_index: 0,
            kills: 0,
            phase: Phase::Playing,
            rng,
        }
    }

    pub fn level(&self) -> Option<&'static Level> {
        self.levels.get(self.level_index)
    }

    /// One simulation step of `dt_ms` milliseconds: spawn, fall, land.
    pub fn update(&mut self, dt_ms: f64) -> bool {
        if self.phase == Phase::Over {
            return false;
        }
        let Some(level) = self.level() else {
            return false;
        };
        let dt_ms = dt_ms.max(0.0);
        self.clock_ms += dt_ms;

        let spawn_due = self
            .last_spawn_ms
            .is_none_or(|last| self.clock_ms - last > level.spawn_interval_ms);
        if spawn_due {
            self.spawn(level);
            self.last_spawn_ms = Some(self.clock_ms);
        }

        let dy = level.speed * dt_ms / 1000.0;
        for target in &mut self.targets {
            target.y += dy;
        }

        let floor = self.field.floor();
        let mut landed = Vec::new();
        self.targets.retain(|t| {
            if t.y > floor {
                landed.push(t.id);
                false
            } else {
                true
            }
        });
        for id in landed {
            self.lives = self.lives.saturating_sub(1);
            if self.locked == Some(id) {
                self.locked = None;
            }
            debug!(target_id = %id, lives = self.lives, "target reached the floor");
        }

        if self.lives == 0 {
            self.phase = Phase::Over;
            info!(score = self.score, level = self.level_index + 1, "game over");
        }
        true
    }

    fn spawn(&mut self, level: &Level) {
        if level.words.is_empty() {
            return;
        }
        let text = level.words[self.rng.gen_range(0..level.words.len())];
        let span = (self.field.width - SPAWN_PADDING * 2.0).max(0.0);
        let x = self.rng.r#gen::<f64>() * span + SPAWN_PADDING;
        let id = self.insert_target(text, x, SPAWN_Y);
        trace!(target_id = %id, text, x, "spawned target");
    }

    /// Places a target directly, bypassing the spawn timer. Scripted scenarios use this.
    pub fn insert_target(&mut self, text: &str, x: f64, y: f64) -> TargetId {
        let id = TargetId(self.next_id);
        self.next_id += 1;
        self.targets.push(Target::new(id, text, x, y));
        id
    }

    /// Handles a letter key. Returns whether it advanced some target.
    pub fn on_key(&mut self, key: char) -> bool {
        if self.phase == Phase::Over {
            return false;
        }
        let key = key.to_ascii_lowercase();
        if !key.is_ascii_lowercase() || self.targets.is_empty() {
            return false;
        }

        let idx = match self.locked {
            Some(id) => match self.targets.iter().position(|t| t.id == id) {
                Some(idx) => idx,
                None => {
                    self.locked = None;
                    return false;
                }
            },
            None => match self.closest_match(key) {
                Some(idx) => {
                    self.locked = Some(self.targets[idx].id);
                    idx
                }
                None => return false,
            },
        };

        // A wrong key on a locked target is ignored.
        if !self.targets[idx].advance(key) {
            return false;
        }
        if self.targets[idx].is_complete() {
            self.destroy(idx);
        }
        true
    }

    /// Index of the lowest target (largest y) whose next letter is `key`; earlier spawns win ties.
    fn closest_match(&self, key: char) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, target) in self.targets.iter().enumerate() {
            let matches = target
                .next_char()
                .is_some_and(|c| c.eq_ignore_ascii_case(&key));
            if matches && best.is_none_or(|b| target.y > self.targets[b].y) {
                best = Some(i);
            }
        }
        best
    }

    fn destroy(&mut self, idx: usize) {
        let target = self.targets.remove(idx);
        if self.locked == Some(target.id) {
            self.locked = None;
        }
        self.score += POINTS_PER_KILL;
        self.kills += 1;
        debug!(target_id = %target.id, text = %target.text, score = self.score, "target destroyed");

        let Some(level) = self.level() else {
            return;
        };
        if self.kills < level.required_kills {
            return;
        }
        if self.level_index + 1 < self.levels.len() {
            self.level_index += 1;
            self.kills = 0;
            info!(level = self.level_index + 1, "level up");
        } else {
            self.phase = Phase::Over;
            info!(score = self.score, "all levels cleared");
        }
    }

    /// Back to level one with full lives. Target ids keep counting up.
    pub fn restart(&mut self) {
        self.targets.clear();
        self.locked = None;
        self.clock_ms = 0.0;
        self.last_spawn_ms = None;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.level_index = 0;
        self.kills = 0;
        self.phase = Phase::Playing;
        debug!("arcade restarted");
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.field = FieldSize { width, height };
    }

    pub fn field(&self) -> FieldSize {
        self.field
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn locked(&self) -> Option<TargetId> {
        self.locked
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn snapshot(&self) -> ArcadeSnapshot {
        let level = self.level();
        ArcadeSnapshot {
            field: self.field,
            targets: self.targets.clone(),
            locked: self.locked,
            score: self.score,
            lives: self.lives,
            level_index: self.level_index,
            level_name: level.map(|l| l.name).unwrap_or(""),
            kills: self.kills,
            required_kills: level.map(|l| l.required_kills).unwrap_or(0),
            over: self.is_over(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TINY_LEVELS: &[Level] = &[
        Level {
            name: "one",
            words: &["a"],
            spawn_interval_ms: 100_000.0,
            speed: 0.0,
            required_kills: 2,
        },
        Level {
            name: "two",
            words: &["b"],
            spawn_interval_ms: 100_000.0,
            speed: 0.0,
            required_kills: 1,
        },
    ];

    fn game() -> ArcadeGame {
        ArcadeGame::seeded(FieldSize::DEFAULT, 7)
    }

    fn tiny() -> ArcadeGame {
        ArcadeGame::with_levels(TINY_LEVELS, FieldSize::DEFAULT, SmallRng::seed_from_u64(1))
    }

    #[test]
    fn first_update_spawns_within_margins() {
        let mut g = game();
        g.update(16.0);
        assert_eq!(g.targets().len(), 1);
        let t = &g.targets()[0];
        assert!(t.x >= SPAWN_PADDING && t.x <= FieldSize::DEFAULT.width - SPAWN_PADDING);
        assert!((t.y - (SPAWN_Y + 60.0 * 16.0 / 1000.0)).abs() < 1e-9);
        assert!(LEVELS[0].words.contains(&t.text.as_str()));
    }

    #[test]
    fn spawns_follow_the_interval() {
        let mut g = game();
        g.update(16.0);
        g.update(1600.0);
        // Exactly the interval has passed; spawning needs strictly more.
        assert_eq!(g.targets().len(), 1);
        g.update(1.0);
        assert_eq!(g.targets().len(), 2);
    }

    #[test]
    fn targets_fall_by_speed_times_dt() {
        let mut g = game();
        let id = g.insert_target("cat", 200.0, 100.0);
        g.update(500.0);
        let t = g.targets().iter().find(|t| t.id == id).unwrap();
        assert!((t.y - 130.0).abs() < 1e-9);
    }

    #[test]
    fn landing_costs_one_life_and_clears_lock() {
        let mut g = game();
        let floor = g.field().floor();
        let id = g.insert_target("cat", 200.0, floor - 1.0);
        assert!(g.on_key('c'));
        assert_eq!(g.locked(), Some(id));

        g.update(100.0);
        assert_eq!(g.lives(), STARTING_LIVES - 1);
        assert_eq!(g.locked(), None);
        assert!(g.targets().iter().all(|t| t.id != id));
    }

    #[test]
    fn each_landed_target_costs_a_life() {
        let mut g = game();
        let floor = g.field().floor();
        g.insert_target("cat", 100.0, floor - 1.0);
        g.insert_target("dog", 200.0, floor - 2.0);
        g.update(100.0);
        assert_eq!(g.lives(), STARTING_LIVES - 2);
        assert!(!g.is_over());
    }

    #[test]
    fn zero_lives_is_terminal() {
        let mut g = game();
        let floor = g.field().floor();
        for x in [100.0, 200.0, 300.0] {
            g.insert_target("sun", x, floor - 1.0);
        }
        g.update(100.0);
        assert_eq!(g.lives(), 0);
        assert!(g.is_over());

        let frozen = g.snapshot();
        assert!(!g.update(5_000.0));
        assert!(!g.on_key('s'));
        assert_eq!(g.snapshot(), frozen);
    }

    #[test]
    fn lock_on_prefers_the_lowest_target() {
        let mut g = game();
        let a = g.insert_target("star", 100.0, 400.0);
        let b = g.insert_target("ship", 300.0, 100.0);
        assert!(g.on_key('s'));
        assert_eq!(g.locked(), Some(a));
        let targets = g.targets();
        assert_eq!(targets.iter().find(|t| t.id == a).unwrap().typed_index, 1);
        assert_eq!(targets.iter().find(|t| t.id == b).unwrap().typed_index, 0);
    }

    #[test]
    fn equal_height_keeps_the_earlier_spawn() {
        let mut g = game();
        let first = g.insert_target("cat", 100.0, 200.0);
        g.insert_target("code", 300.0, 200.0);
        g.on_key('c');
        assert_eq!(g.locked(), Some(first));
    }

    #[test]
    fn wrong_key_on_locked_target_is_ignored() {
        let mut g = game();
        let id = g.insert_target("dog", 100.0, 100.0);
        g.insert_target("grid", 300.0, 50.0);
        g.on_key('d');
        // 'g' matches the other target's first letter, but the lock holds.
        assert!(!g.on_key('g'));
        assert_eq!(g.locked(), Some(id));
        assert_eq!(g.targets()[0].typed_index, 1);
        assert_eq!(g.targets()[1].typed_index, 0);
        assert_eq!(g.score(), 0);
    }

    #[test]
    fn uppercase_and_non_letters() {
        let mut g = game();
        g.insert_target("cat", 100.0, 100.0);
        assert!(!g.on_key('1'));
        assert!(!g.on_key(' '));
        assert!(g.on_key('C'));
        assert_eq!(g.targets()[0].typed_index, 1);
    }

    #[test]
    fn completing_a_word_rewards_and_unlocks() {
        let mut g = game();
        g.insert_target("cat", 100.0, 100.0);
        for c in "cat".chars() {
            assert!(g.on_key(c));
        }
        assert!(g.targets().is_empty());
        assert_eq!(g.locked(), None);
        assert_eq!(g.score(), POINTS_PER_KILL);
        assert_eq!(g.kills(), 1);
    }

    #[test]
    fn single_letter_word_completes_on_lock() {
        let mut g = tiny();
        g.insert_target("a", 100.0, 100.0);
        assert!(g.on_key('a'));
        assert!(g.targets().is_empty());
        assert_eq!(g.locked(), None);
        assert_eq!(g.kills(), 1);
    }

    #[test]
    fn required_kills_advance_level_then_last_level_ends_game() {
        let mut g = tiny();
        g.insert_target("a", 100.0, 100.0);
        g.insert_target("a", 200.0, 100.0);
        g.on_key('a');
        g.on_key('a');
        assert_eq!(g.level_index(), 1);
        assert_eq!(g.kills(), 0);
        assert!(!g.is_over());

        g.insert_target("b", 100.0, 100.0);
        g.on_key('b');
        assert!(g.is_over());
        assert_eq!(g.score(), 3 * POINTS_PER_KILL);
    }

    #[test]
    fn restart_resets_state_but_not_ids() {
        let mut g = game();
        let before = g.insert_target("cat", 100.0, 100.0);
        g.on_key('c');
        g.restart();
        assert!(g.targets().is_empty());
        assert_eq!(g.locked(), None);
        assert_eq!(g.lives(), STARTING_LIVES);
        assert_eq!(g.score(), 0);
        assert_eq!(g.phase(), Phase::Playing);
        let after = g.insert_target("dog", 100.0, 100.0);
        assert!(after > before);
    }

    #[test]
    fn narrow_field_spawns_at_padding() {
        let mut g = ArcadeGame::seeded(FieldSize { width: 100.0, height: 400.0 }, 3);
        g.update(1.0);
        assert_eq!(g.targets()[0].x, SPAWN_PADDING);
    }
}
