//! Shared utilities

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Simple deterministic RNG using xorshift64
/// Procedural textures use it so the same seed always paints the same texels
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) } // Ensure non-zero
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    /// Get a random f32 in [0, 1)
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() & 0xFFFFFF) as f32 / 0x1000000 as f32
    }

    /// Get a random f32 in [min, max)
    #[inline]
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}

// ============================================================================
// FPS Counter
// ============================================================================

/// FPS counter with rolling average
pub struct FpsCounter {
    frame_times: VecDeque<f32>,
    last_frame: Instant,
    sample_count: usize,
}

impl FpsCounter {
    /// Create a new FPS counter with specified sample window
    pub fn new(sample_count: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(sample_count),
            last_frame: Instant::now(),
            sample_count: sample_count.max(1),
        }
    }

    /// Call at the start of each frame to record timing
    /// Returns (delta_time, average_fps)
    pub fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.record(dt);
        (dt, self.avg_fps())
    }

    fn record(&mut self, dt: f32) {
        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }
    }

    pub fn avg_fps(&self) -> f32 {
        let avg_dt = self.avg_dt();
        if avg_dt > 0.0 {
            1.0 / avg_dt
        } else {
            0.0
        }
    }

    fn avg_dt(&self) -> f32 {
        self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32
    }

    /// Get the average frame time in milliseconds
    pub fn avg_frame_time_ms(&self) -> f32 {
        self.avg_dt() * 1000.0
    }

    /// Get min/max FPS from sample window
    pub fn min_max_fps(&self) -> (f32, f32) {
        if self.frame_times.is_empty() {
            return (0.0, 0.0);
        }
        let min_dt = self.frame_times.iter().copied().fold(f32::INFINITY, f32::min);
        let max_dt = self.frame_times.iter().copied().fold(0.0, f32::max);
        let max_fps = if min_dt > 0.0 { 1.0 / min_dt } else { 0.0 };
        let min_fps = if max_dt > 0.0 { 1.0 / max_dt } else { 0.0 };
        (min_fps, max_fps)
    }
}

// ============================================================================
// Tick pacing
// ============================================================================

/// Holds the host loop to a fixed tick rate.
///
/// Sleeps for the bulk of the remaining time, then spins for the last
/// stretch, since `thread::sleep` routinely overshoots by a millisecond or two.
pub struct TickPacer {
    period: Duration,
    spin: Duration,
    tick_start: Instant,
}

impl TickPacer {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / ticks_per_second.max(1),
            spin: Duration::from_millis(2),
            tick_start: Instant::now(),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left in the current tick
    pub fn remaining(&self) -> Duration {
        self.period.saturating_sub(self.tick_start.elapsed())
    }

    /// Block until the current tick's period has elapsed, then start the next
    pub fn wait(&mut self) {
        let remaining = self.remaining();
        if remaining > self.spin {
            std::thread::sleep(remaining - self.spin);
        }
        while self.tick_start.elapsed() < self.period {
            std::hint::spin_loop();
        }
        self.tick_start = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_usable() {
        let mut rng = Rng::new(0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn test_rng_f32_range() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            let v = rng.range_f32(-2.0, 3.0);
            assert!((-2.0..3.0).contains(&v));
        }
    }

    #[test]
    fn test_fps_counter_window() {
        let mut fps = FpsCounter::new(4);
        for dt in [0.5, 0.5, 0.5, 0.5, 0.25, 0.25, 0.25, 0.25] {
            fps.record(dt);
        }
        assert!((fps.avg_fps() - 4.0).abs() < 1e-4);
        assert!((fps.avg_frame_time_ms() - 250.0).abs() < 1e-3);
        let (min, max) = fps.min_max_fps();
        assert_eq!((min, max), (4.0, 4.0));
    }

    #[test]
    fn test_pacer_holds_period() {
        let mut pacer = TickPacer::new(200);
        assert_eq!(pacer.period(), Duration::from_millis(5));
        let start = Instant::now();
        pacer.wait();
        pacer.wait();
        assert!(start.elapsed() >= Duration::from_millis(9));
    }
}
