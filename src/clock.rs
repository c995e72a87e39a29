//! Cooperative driver for a [`GameSession`].
//!
//! The clock owns no threads or OS timers. The host feeds it elapsed time and
//! it fires the due `tick()` and `change_target()` calls in order. Both
//! cadences are cancelled in the same call that observes the session going
//! inactive, so nothing fires after expiry or stop.

use crate::rules::{target_change_interval, tick_interval};
use crate::session::GameSession;
use rand::Rng;
use std::time::Duration;
use tracing::trace;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Which cadence fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    Tick,
    TargetChange,
}

#[derive(Debug, Clone)]
pub struct GameClock {
    tick_every: Duration,
    rotate_every: Duration,
    armed: bool,
    elapsed: Duration,
    next_tick: Duration,
    next_rotation: Duration,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(tick_interval(), target_change_interval())
    }
}

impl GameClock {
    /// Zero intervals are raised to one millisecond
    pub fn new(tick_every: Duration, rotate_every: Duration) -> Self {
        let tick_every = tick_every.max(MIN_INTERVAL);
        let rotate_every = rotate_every.max(MIN_INTERVAL);
        Self {
            tick_every,
            rotate_every,
            armed: false,
            elapsed: Duration::ZERO,
            next_tick: tick_every,
            next_rotation: rotate_every,
        }
    }

    /// Start both cadences from zero. Call right after starting the session.
    pub fn arm(&mut self) {
        self.armed = true;
        self.elapsed = Duration::ZERO;
        self.next_tick = self.tick_every;
        self.next_rotation = self.rotate_every;
    }

    /// Cancel both cadences
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Advance by `dt`, firing every event that falls due. Returns the events
    /// fired, in order. A tick and a rotation due at the same instant fire
    /// tick first.
    pub fn advance<R: Rng>(
        &mut self,
        dt: Duration,
        session: &mut GameSession<R>,
    ) -> Vec<ClockEvent> {
        let mut fired = Vec::new();
        if !self.armed {
            return fired;
        }
        if !session.is_active() {
            self.disarm();
            return fired;
        }

        let until = self.elapsed + dt;
        loop {
            let tick_first = self.next_tick <= self.next_rotation;
            let due = if tick_first {
                self.next_tick
            } else {
                self.next_rotation
            };
            if due > until {
                break;
            }
            self.elapsed = due;

            if tick_first {
                self.next_tick += self.tick_every;
                fired.push(ClockEvent::Tick);
                trace!(at_ms = due.as_millis() as u64, "clock tick");
                if !session.tick() {
                    self.disarm();
                    return fired;
                }
            } else {
                self.next_rotation += self.rotate_every;
                fired.push(ClockEvent::TargetChange);
                trace!(at_ms = due.as_millis() as u64, "clock rotation");
                session.change_target();
            }
        }
        self.elapsed = until;
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> (GameSession, GameClock) {
        let mut session = GameSession::seeded(31);
        session.start();
        let mut clock = GameClock::default();
        clock.arm();
        (session, clock)
    }

    fn count(events: &[ClockEvent], kind: ClockEvent) -> usize {
        events.iter().filter(|e| **e == kind).count()
    }

    #[test]
    fn test_disarmed_clock_does_nothing() {
        let mut session = GameSession::seeded(1);
        session.start();
        let mut clock = GameClock::default();

        let fired = clock.advance(Duration::from_secs(10), &mut session);
        assert!(fired.is_empty());
        assert_eq!(session.time_left(), 30);
    }

    #[test]
    fn test_ticks_once_per_second() {
        let (mut session, mut clock) = running();

        assert!(clock.advance(Duration::from_millis(999), &mut session).is_empty());
        assert_eq!(session.time_left(), 30);

        let fired = clock.advance(Duration::from_millis(1), &mut session);
        assert_eq!(fired, vec![ClockEvent::Tick]);
        assert_eq!(session.time_left(), 29);
    }

    #[test]
    fn test_small_steps_accumulate() {
        let (mut session, mut clock) = running();
        for _ in 0..35 {
            clock.advance(Duration::from_millis(100), &mut session);
        }
        assert_eq!(session.time_left(), 27);
        assert_eq!(clock.elapsed, Duration::from_millis(3500));
    }

    #[test]
    fn test_rotation_every_five_seconds_tick_first() {
        let (mut session, mut clock) = running();
        let target = session.target_color();

        let fired = clock.advance(Duration::from_secs(5), &mut session);
        assert_eq!(count(&fired, ClockEvent::Tick), 5);
        assert_eq!(count(&fired, ClockEvent::TargetChange), 1);
        assert_eq!(fired.last(), Some(&ClockEvent::TargetChange));
        assert_ne!(session.target_color(), target);
    }

    #[test]
    fn test_full_round_expires_without_late_rotation() {
        let (mut session, mut clock) = running();

        let fired = clock.advance(Duration::from_secs(30), &mut session);
        assert_eq!(count(&fired, ClockEvent::Tick), 30);
        // rotations at 5..=25s; the one due at 30s is cancelled by expiry
        assert_eq!(count(&fired, ClockEvent::TargetChange), 5);
        assert_eq!(fired.last(), Some(&ClockEvent::Tick));
        assert!(!session.is_active());
        assert_eq!(session.time_left(), 0);
        assert!(!clock.is_armed());
    }

    #[test]
    fn test_nothing_fires_after_expiry() {
        let (mut session, mut clock) = running();
        clock.advance(Duration::from_secs(30), &mut session);
        let final_state = session.snapshot().clone();

        let fired = clock.advance(Duration::from_secs(60), &mut session);
        assert!(fired.is_empty());
        assert_eq!(session.snapshot(), &final_state);
    }

    #[test]
    fn test_external_stop_cancels_clock() {
        let (mut session, mut clock) = running();
        clock.advance(Duration::from_millis(4500), &mut session);
        session.stop();
        let stopped = session.snapshot().clone();

        let fired = clock.advance(Duration::from_secs(10), &mut session);
        assert!(fired.is_empty());
        assert!(!clock.is_armed());
        assert_eq!(session.snapshot(), &stopped);
    }

    #[test]
    fn test_disarm_prevents_further_mutation() {
        let (mut session, mut clock) = running();
        clock.advance(Duration::from_secs(2), &mut session);
        clock.disarm();

        clock.advance(Duration::from_secs(10), &mut session);
        assert_eq!(session.time_left(), 28);
        assert!(session.is_active());
    }

    #[test]
    fn test_zero_intervals_are_clamped() {
        let mut session = GameSession::seeded(32);
        session.start();
        let mut clock = GameClock::new(Duration::ZERO, Duration::ZERO);
        clock.arm();

        let fired = clock.advance(Duration::from_millis(3), &mut session);
        assert_eq!(count(&fired, ClockEvent::Tick), 3);
        assert_eq!(count(&fired, ClockEvent::TargetChange), 3);
        assert_eq!(session.time_left(), 27);

        clock.advance(Duration::from_secs(1), &mut session);
        assert!(!session.is_active());
        assert!(!clock.is_armed());
    }

    #[test]
    fn test_rearm_restarts_cadences() {
        let (mut session, mut clock) = running();
        clock.advance(Duration::from_millis(2700), &mut session);

        session.restart();
        clock.arm();
        assert_eq!(clock.elapsed, Duration::ZERO);
        clock.advance(Duration::from_millis(900), &mut session);
        assert_eq!(session.time_left(), 30);
        clock.advance(Duration::from_millis(100), &mut session);
        assert_eq!(session.time_left(), 29);
    }
}
