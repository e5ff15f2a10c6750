//! Frame pacing.

use std::time::{
    Duration,
    Instant,
};


/// Longest step the simulation will take in one frame, in seconds. Stalls longer than this slow
/// the game down rather than letting the player move far enough to skip through solids.
pub const MAX_FRAME_DT: f32 = 0.1;


/// Tracks frame timing towards a target frame rate, and an optional cap on frame count.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_duration: Duration,
    prev_frame: Option<Instant>,
    frames: u64,
    max_frames: Option<u64>,
}

impl FrameClock {
    pub fn new(fps: u32, max_frames: Option<u64>) -> Self {
        FrameClock {
            frame_duration: Duration::from_secs(1) / fps.max(1),
            prev_frame: None,
            frames: 0,
            max_frames,
        }
    }

    /// Target frame duration in seconds, which is the step used when not running in real time.
    pub fn nominal_dt(&self) -> f32 {
        self.frame_duration.as_secs_f32()
    }

    /// Mark the start of a frame at `now`, returning the seconds elapsed since the start of the
    /// previous frame, or the nominal step if this is the first frame.
    pub fn begin_frame(&mut self, now: Instant) -> f32 {
        let dt = self.prev_frame
            .map(|prev| now.saturating_duration_since(prev).as_secs_f32())
            .unwrap_or_else(|| self.nominal_dt());
        self.prev_frame = Some(now);
        dt.min(MAX_FRAME_DT)
    }

    /// When the next frame should start, if the current one started at `now`.
    pub fn next_frame_target(&self, now: Instant) -> Instant {
        now + self.frame_duration
    }

    /// Count a finished frame. Returns whether the frame cap has been reached.
    pub fn end_frame(&mut self) -> bool {
        self.frames += 1;
        self.max_frames.map(|max| self.frames >= max).unwrap_or(false)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}


#[test]
fn test_frame_cap() {
    let mut clock = FrameClock::new(60, Some(3));
    assert!(!clock.end_frame());
    assert!(!clock.end_frame());
    assert!(clock.end_frame());
    assert_eq!(clock.frames(), 3);

    let mut uncapped = FrameClock::new(60, None);
    for _ in 0..1000 {
        assert!(!uncapped.end_frame());
    }
}

#[test]
fn test_begin_frame_dt() {
    let mut clock = FrameClock::new(50, None);
    let t0 = Instant::now();
    assert_eq!(clock.begin_frame(t0), 0.02);
    assert_eq!(clock.begin_frame(t0 + Duration::from_millis(30)), 0.03);
    assert_eq!(clock.begin_frame(t0 + Duration::from_secs(5)), MAX_FRAME_DT);
    assert_eq!(clock.next_frame_target(t0), t0 + Duration::from_millis(20));
}
