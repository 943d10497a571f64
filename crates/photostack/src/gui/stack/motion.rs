use stackring::AxisOffset;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub throttle: Duration,
    pub transition: Duration,
    pub settle: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            throttle: Duration::from_millis(800),
            transition: Duration::from_millis(300),
            settle: Duration::from_millis(150),
        }
    }
}

impl From<&crate::config::MotionConfig> for Timing {
    fn from(cfg: &crate::config::MotionConfig) -> Self {
        Self {
            throttle: Duration::from_millis(cfg.throttle_ms),
            transition: Duration::from_millis(cfg.transition_ms),
            settle: Duration::from_millis(cfg.settle_ms),
        }
    }
}

/// A photo travelling from one offset to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub from: AxisOffset,
    pub to: AxisOffset,
    pub start: Instant,
    /// Time spent holding `from` before moving.
    pub delay: Duration,
    pub duration: Duration,
}

impl Motion {
    pub fn new(from: AxisOffset, to: AxisOffset, start: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            delay: Duration::ZERO,
            duration,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn end(&self) -> Instant {
        self.start + self.delay + self.duration
    }

    pub fn progress(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.start + self.delay);
        if self.duration.is_zero() {
            return if now >= self.start + self.delay { 1.0 } else { 0.0 };
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn sample(&self, now: Instant) -> AxisOffset {
        lerp(self.from, self.to, ease_out_cubic(self.progress(now)))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now >= self.end()
    }
}

pub fn lerp(a: AxisOffset, b: AxisOffset, t: f64) -> AxisOffset {
    AxisOffset {
        vertical: a.vertical + (b.vertical - a.vertical) * t,
        depth: a.depth + (b.depth - a.depth) * t,
    }
}

#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FROM: AxisOffset = AxisOffset {
        vertical: -20.0,
        depth: -10.0,
    };
    const TO: AxisOffset = AxisOffset {
        vertical: 0.0,
        depth: 0.0,
    };

    #[test]
    fn test_ease_out_cubic() {
        assert!((ease_out_cubic(0.0) - 0.0).abs() < 0.001);
        assert!((ease_out_cubic(1.0) - 1.0).abs() < 0.001);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn test_sample_endpoints() {
        let start = Instant::now();
        let motion = Motion::new(FROM, TO, start, Duration::from_millis(300));

        assert_eq!(motion.sample(start), FROM);
        assert_eq!(motion.sample(start + Duration::from_millis(300)), TO);
        assert_eq!(motion.sample(start + Duration::from_secs(5)), TO);
        assert!(motion.is_finished(start + Duration::from_millis(300)));
        assert!(!motion.is_finished(start + Duration::from_millis(299)));
    }

    #[test]
    fn test_delay_holds_the_start_offset() {
        let start = Instant::now();
        let motion = Motion::new(FROM, TO, start, Duration::from_millis(300))
            .with_delay(Duration::from_millis(150));

        assert_eq!(motion.sample(start + Duration::from_millis(100)), FROM);
        assert_eq!(motion.progress(start + Duration::from_millis(150)), 0.0);
        assert_eq!(motion.end(), start + Duration::from_millis(450));
    }

    #[test]
    fn test_zero_duration_jumps() {
        let start = Instant::now();
        let motion = Motion::new(FROM, TO, start, Duration::ZERO);

        assert_eq!(motion.sample(start), TO);
    }

    #[test]
    fn test_lerp_midpoint() {
        let mid = lerp(FROM, TO, 0.5);

        assert_eq!(mid.vertical, -10.0);
        assert_eq!(mid.depth, -5.0);
    }

    #[test]
    fn test_timing_from_config() {
        let timing = Timing::from(&crate::config::MotionConfig::default());

        assert_eq!(timing, Timing::default());
    }
}
