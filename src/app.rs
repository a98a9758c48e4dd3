use std::time::Instant;

use tracing::{debug, info, warn};

use typerush::config::Config;
use typerush::game::{ArcadeGame, FieldSize};
use typerush::generator::{TestMode, TokenSource, WordGenerator};
use typerush::session::timer::Countdown;
use typerush::session::{Key, SessionStatus, TypingSession};

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Typing,
    Results,
    Arcade,
}

pub struct App {
    pub screen: AppScreen,
    pub session: TypingSession,
    pub countdown: Countdown,
    pub arcade: ArcadeGame,
    pub theme: Theme,
    pub config: Config,
    pub should_quit: bool,
    last_frame: Instant,
}

impl App {
    pub fn new(config: Config, theme: Theme) -> Self {
        Self::with_source(
            config,
            theme,
            Box::new(WordGenerator::from_entropy()),
            ArcadeGame::new(FieldSize::DEFAULT),
        )
    }

    pub fn with_source(
        config: Config,
        theme: Theme,
        source: Box<dyn TokenSource>,
        arcade: ArcadeGame,
    ) -> Self {
        let session = TypingSession::new(source, config.test_mode(), config.duration_secs);
        Self {
            screen: AppScreen::Typing,
            session,
            countdown: Countdown::default(),
            arcade,
            theme,
            config,
            should_quit: false,
            last_frame: Instant::now(),
        }
    }

    /// Feeds a key to the typing test, arming the countdown on the first letter.
    pub fn type_key(&mut self, key: Key, now: Instant) {
        let was_idle = self.session.status() == SessionStatus::Idle;
        self.session.on_key(key);
        if was_idle && self.session.status() == SessionStatus::Running {
            self.countdown.arm(self.session.epoch(), now);
        }
    }

    /// Per-frame work: deliver due countdown ticks and step the arcade.
    pub fn advance(&mut self, now: Instant) {
        let due = self.countdown.poll(now);
        if let Some(epoch) = self.countdown.epoch() {
            for _ in 0..due {
                self.session.tick_for(epoch);
            }
        }
        if self.session.status() == SessionStatus::Finished && self.countdown.is_armed() {
            self.countdown.cancel();
            if self.screen == AppScreen::Typing {
                self.screen = AppScreen::Results;
            }
        }

        let dt = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        if self.screen == AppScreen::Arcade {
            self.arcade.update(dt.as_secs_f64() * 1000.0);
        }
    }

    pub fn restart_test(&mut self) {
        self.countdown.cancel();
        self.session.restart(self.session.mode(), self.session.duration_secs());
        self.screen = AppScreen::Typing;
    }

    pub fn select_mode(&mut self, mode: TestMode) {
        if self.session.set_mode(mode) {
            self.countdown.cancel();
            self.config.mode = mode.as_str().to_string();
            self.screen = AppScreen::Typing;
        }
    }

    pub fn select_duration(&mut self, secs: u32) {
        if self.session.set_duration(secs) {
            self.countdown.cancel();
            self.config.duration_secs = secs;
            self.screen = AppScreen::Typing;
        }
    }

    /// Entering or leaving the arcade abandons any test in progress.
    pub fn toggle_arcade(&mut self, now: Instant) {
        if self.screen == AppScreen::Arcade {
            self.restart_test();
            debug!("left arcade");
        } else {
            self.restart_test();
            self.arcade.restart();
            self.screen = AppScreen::Arcade;
            info!("entered arcade");
        }
        self.last_frame = now;
    }

    pub fn arcade_key(&mut self, ch: char) {
        self.arcade.on_key(ch);
    }

    pub fn restart_arcade(&mut self) {
        if self.arcade.is_over() {
            self.arcade.restart();
        }
    }

    pub fn resize_arcade(&mut self, field: FieldSize) {
        self.arcade.resize(field.width, field.height);
    }

    /// Persist the last selected mode and duration.
    pub fn save_preferences(&self) {
        if let Err(err) = self.config.save() {
            warn!(%err, "failed to save config");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn app() -> App {
        App::with_source(
            Config::default(),
            Theme::default(),
            Box::new(WordGenerator::seeded(11)),
            ArcadeGame::seeded(FieldSize::DEFAULT, 11),
        )
    }

    fn first_letter(app: &App) -> char {
        app.session.words()[0].chars().next().unwrap()
    }

    #[test]
    fn first_letter_arms_countdown() {
        let mut app = app();
        let t0 = Instant::now();
        app.type_key(Key::Char('1'), t0);
        assert!(!app.countdown.is_armed());

        let ch = first_letter(&app);
        app.type_key(Key::Char(ch), t0);
        assert!(app.countdown.is_armed());
        assert_eq!(app.countdown.epoch(), Some(app.session.epoch()));
    }

    #[test]
    fn countdown_runs_test_to_results() {
        let mut app = app();
        let t0 = Instant::now();
        let ch = first_letter(&app);
        app.type_key(Key::Char(ch), t0);

        app.advance(t0 + Duration::from_secs(10));
        assert_eq!(app.session.remaining_secs(), 20);
        assert_eq!(app.screen, AppScreen::Typing);

        app.advance(t0 + Duration::from_secs(31));
        assert_eq!(app.session.status(), SessionStatus::Finished);
        assert_eq!(app.screen, AppScreen::Results);
        assert!(!app.countdown.is_armed());
        assert_eq!(app.session.samples().len(), 30);
    }

    #[test]
    fn restart_discards_pending_ticks() {
        let mut app = app();
        let t0 = Instant::now();
        let ch = first_letter(&app);
        app.type_key(Key::Char(ch), t0);
        app.restart_test();
        app.advance(t0 + Duration::from_secs(5));
        assert_eq!(app.session.status(), SessionStatus::Idle);
        assert_eq!(app.session.remaining_secs(), 30);
    }

    #[test]
    fn settings_locked_while_running() {
        let mut app = app();
        let t0 = Instant::now();
        let ch = first_letter(&app);
        app.type_key(Key::Char(ch), t0);

        app.select_mode(TestMode::Numbers);
        app.select_duration(60);
        assert_eq!(app.session.mode(), TestMode::Words);
        assert_eq!(app.session.duration_secs(), 30);
        assert!(app.countdown.is_armed());

        app.restart_test();
        app.select_mode(TestMode::Numbers);
        app.select_duration(60);
        assert_eq!(app.session.mode(), TestMode::Numbers);
        assert_eq!(app.session.duration_secs(), 60);
        assert_eq!(app.config.mode, "numbers");
        assert_eq!(app.config.duration_secs, 60);
    }

    #[test]
    fn arcade_only_steps_while_shown() {
        let mut app = app();
        let t0 = Instant::now();
        app.advance(t0 + Duration::from_millis(100));
        assert!(app.arcade.targets().is_empty());

        app.toggle_arcade(t0);
        assert_eq!(app.screen, AppScreen::Arcade);
        app.advance(t0 + Duration::from_millis(33));
        assert_eq!(app.arcade.targets().len(), 1);

        app.toggle_arcade(t0 + Duration::from_millis(40));
        assert_eq!(app.screen, AppScreen::Typing);
        assert_eq!(app.session.status(), SessionStatus::Idle);
    }
}
