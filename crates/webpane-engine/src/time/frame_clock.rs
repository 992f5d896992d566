use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds (clamped).
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots and pacing the loop to a
/// target rate.
///
/// Delta time is clamped to avoid pathological values after debugger pauses or
/// minimization. Pacing never tries to catch up: after a stall the next
/// deadline is measured from "now", not from the missed one.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,

    interval: Option<Duration>,
    next_deadline: Instant,
}

impl FrameClock {
    /// Creates an unpaced clock with default clamps.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last: now,
            frame_index: 0,
            dt_min: Duration::from_micros(100),
            dt_max: Duration::from_millis(250),
            interval: None,
            next_deadline: now,
        }
    }

    /// Creates a clock that paces ticks to `fps` frames per second.
    /// `fps == 0` disables pacing.
    pub fn with_target_fps(fps: u32) -> Self {
        let mut clock = Self::new();
        clock.interval = (fps > 0).then(|| Duration::from_secs_f64(1.0 / fps as f64));
        clock
    }

    /// Target interval between ticks, if paced.
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// When the next tick is due. Unpaced clocks are always due.
    pub fn next_deadline(&self) -> Instant {
        self.next_deadline
    }

    /// True when a tick is due at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_deadline
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        if let Some(interval) = self.interval {
            self.next_deadline = self.next_deadline.max(now) + interval;
        }

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
