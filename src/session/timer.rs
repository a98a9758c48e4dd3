use std::time::{Duration, Instant};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug)]
struct Armed {
    epoch: u64,
    next_due: Instant,
}

/// Wall-clock driver for a session countdown.
///
/// Armed with the epoch of the session it belongs to, so ticks that come due
/// after a restart can be recognised and dropped by `TypingSession::tick_for`.
#[derive(Clone, Debug, Default)]
pub struct Countdown {
    armed: Option<Armed>,
}

impl Countdown {
    pub fn arm(&mut self, epoch: u64, now: Instant) {
        self.armed = Some(Armed {
            epoch,
            next_due: now + TICK_PERIOD,
        });
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn epoch(&self) -> Option<u64> {
        self.armed.map(|a| a.epoch)
    }

    /// Returns how many whole periods have come due by `now` and moves the deadline past them.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(armed) = self.armed.as_mut() else {
            return 0;
        };
        let mut due = 0;
        while now >= armed.next_due {
            due += 1;
            armed.next_due += TICK_PERIOD;
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unarmed_countdown_never_fires() {
        let mut countdown = Countdown::default();
        assert_eq!(countdown.poll(Instant::now() + Duration::from_secs(10)), 0);
        assert_eq!(countdown.epoch(), None);
    }

    #[test]
    fn fires_once_per_elapsed_second() {
        let t0 = Instant::now();
        let mut countdown = Countdown::default();
        countdown.arm(3, t0);
        assert_eq!(countdown.poll(t0 + Duration::from_millis(999)), 0);
        assert_eq!(countdown.poll(t0 + Duration::from_millis(1000)), 1);
        assert_eq!(countdown.poll(t0 + Duration::from_millis(1500)), 0);
        // A stalled frame catches up on every missed second.
        assert_eq!(countdown.poll(t0 + Duration::from_millis(4200)), 3);
        assert_eq!(countdown.epoch(), Some(3));
    }

    #[test]
    fn cancel_disarms() {
        let t0 = Instant::now();
        let mut countdown = Countdown::default();
        countdown.arm(1, t0);
        countdown.cancel();
        assert!(!countdown.is_armed());
        assert_eq!(countdown.poll(t0 + Duration::from_secs(5)), 0);
    }
}
