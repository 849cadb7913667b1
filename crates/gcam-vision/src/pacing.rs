//! Classification pacing.
//!
//! Two equivalent strategies exist in the field: gating on elapsed wall time
//! and gating on frame count. Both bound how often classification runs; the
//! previously computed label is held over between runs either way. The
//! strategy is picked once at startup (see `CaptureConfig`), defaulting to
//! the interval gate.

use std::time::{Duration, Instant};

/// How often the loop is allowed to run classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacingPolicy {
    /// Run only if at least this much wall time passed since the last run
    Interval(Duration),
    /// Run only every Nth frame
    EveryNthFrame(u64),
}

impl Default for PacingPolicy {
    fn default() -> Self {
        PacingPolicy::Interval(Duration::from_millis(700))
    }
}

/// Stateful gate over a [`PacingPolicy`].
#[derive(Debug)]
pub struct Pacer {
    policy: PacingPolicy,
    last_run: Option<Instant>,
}

impl Pacer {
    pub fn new(policy: PacingPolicy) -> Self {
        Self {
            policy,
            last_run: None,
        }
    }

    /// Whether classification should run for this iteration.
    ///
    /// `frame_count` is the 1-based count of frames read so far. The
    /// interval gate fires on the very first call; the stride gate fires
    /// once every N frames, starting at frame N.
    pub fn should_run(&mut self, frame_count: u64, now: Instant) -> bool {
        match self.policy {
            PacingPolicy::Interval(interval) => {
                let due = self
                    .last_run
                    .map_or(true, |last| now.duration_since(last) >= interval);
                if due {
                    self.last_run = Some(now);
                }
                due
            }
            PacingPolicy::EveryNthFrame(n) => frame_count % n.max(1) == 0,
        }
    }
}
