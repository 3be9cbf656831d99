//! Process-wide real-time source.
//!
//! Growth deadlines and the away-time catch-up both key off wall-clock
//! seconds, not frame time: a pot must keep maturing while the host app is
//! logically paused or showing another room. `GameClock` mirrors
//! `Time<Real>` (which ignores virtual-time pause and scaling) into a plain
//! resource once per frame, and every consumer takes `now` as an explicit
//! argument — so tests drive the whole core with a hand-advanced clock and
//! never tick real time.

use bevy::prelude::*;
use bevy::time::Real;

/// Monotonic real seconds since process start.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct GameClock {
    now: f64,
}

impl GameClock {
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Move the clock forward. Backwards movement is ignored so the clock
    /// stays monotonic even if a caller mixes sources.
    pub fn advance_to(&mut self, now: f64) {
        if now > self.now {
            self.now = now;
        }
    }

    pub fn advance_by(&mut self, secs: f64) {
        if secs > 0.0 {
            self.now += secs;
        }
    }
}

pub struct ClockPlugin;

impl Plugin for ClockPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameClock>()
            .add_systems(First, sync_clock);
    }
}

/// Mirror `Time<Real>` into `GameClock` before any gameplay system runs.
fn sync_clock(time: Res<Time<Real>>, mut clock: ResMut<GameClock>) {
    clock.advance_to(time.elapsed_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_advances() {
        let mut clock = GameClock::default();
        assert_eq!(clock.now(), 0.0);

        clock.advance_to(5.0);
        assert_eq!(clock.now(), 5.0);

        clock.advance_by(2.5);
        assert_eq!(clock.now(), 7.5);
    }

    #[test]
    fn test_clock_never_moves_backwards() {
        let mut clock = GameClock::default();
        clock.advance_to(10.0);
        clock.advance_to(4.0);
        assert_eq!(clock.now(), 10.0);

        clock.advance_by(-3.0);
        assert_eq!(clock.now(), 10.0);
    }
}
