//! Playback clock: advances the playhead from wall-clock ticks.
//!
//! The clock owns no timeline state of its own. Each display tick reports
//! the elapsed wall time since the previous tick; the clock turns that
//! into a playhead advance under an effective speed multiplier, clamping
//! exactly at the end of the project so the playhead never overshoots.

/// Outcome of a single playback tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// New playhead position in seconds.
    pub current_time: f64,
    /// Whether playback is still running after this tick.
    pub playing: bool,
}

/// A free-running playback clock.
///
/// `tick` is pure in the playhead arguments; the struct only remembers
/// whether a tick loop is active so that pausing stops it
/// deterministically (a tick after `pause` is a no-op).
#[derive(Debug, Default)]
pub struct PlaybackClock {
    running: bool,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the tick loop.
    pub fn play(&mut self) {
        self.running = true;
    }

    /// Stop the tick loop. Subsequent ticks leave the playhead unchanged.
    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance the playhead by `wall_dt_secs` of elapsed wall time scaled
    /// by `effective_speed`, clamping at `duration_secs`.
    ///
    /// Returns the new playhead and whether playback continues. When the
    /// clamp fires, `playing` flips to false exactly at the boundary and
    /// the internal loop stops.
    pub fn tick(
        &mut self,
        current_time: f64,
        duration_secs: f64,
        wall_dt_secs: f64,
        effective_speed: f64,
    ) -> TickOutcome {
        if !self.running {
            return TickOutcome {
                current_time,
                playing: false,
            };
        }

        let advance = wall_dt_secs.max(0.0) * effective_speed.max(0.0);
        let next = current_time + advance;

        if next >= duration_secs {
            self.running = false;
            return TickOutcome {
                current_time: duration_secs,
                playing: false,
            };
        }

        TickOutcome {
            current_time: next,
            playing: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_advances_by_scaled_wall_time() {
        let mut clock = PlaybackClock::new();
        clock.play();
        let out = clock.tick(1.0, 60.0, 0.5, 2.0);
        assert!((out.current_time - 2.0).abs() < 1e-9);
        assert!(out.playing);
    }

    #[test]
    fn test_tick_clamps_at_duration_and_stops() {
        let mut clock = PlaybackClock::new();
        clock.play();
        let out = clock.tick(59.9, 60.0, 0.5, 1.0);
        assert_eq!(out.current_time, 60.0);
        assert!(!out.playing);
        assert!(!clock.is_running());

        // A stray tick after the stop must not move the playhead.
        let after = clock.tick(60.0, 60.0, 0.5, 1.0);
        assert_eq!(after.current_time, 60.0);
        assert!(!after.playing);
    }

    #[test]
    fn test_pause_stops_pending_ticks() {
        let mut clock = PlaybackClock::new();
        clock.play();
        clock.pause();
        let out = clock.tick(5.0, 60.0, 1.0, 1.0);
        assert_eq!(out.current_time, 5.0);
        assert!(!out.playing);
    }

    #[test]
    fn test_monotonic_while_playing() {
        let mut clock = PlaybackClock::new();
        clock.play();
        let mut t = 0.0;
        for _ in 0..100 {
            let out = clock.tick(t, 10.0, 0.016, 1.0);
            assert!(out.current_time >= t);
            t = out.current_time;
            if !out.playing {
                break;
            }
        }
    }
}
