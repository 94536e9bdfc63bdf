//! Step timer for the find-center animation.

/// Replays pruning rounds one step at a time.
///
/// At step `k` the first `k` rounds are drawn as pruned. After the last
/// round the center is shown for one extra step before playback ends.
#[derive(Debug, Clone, PartialEq)]
pub struct FindCenterPlayback {
    step: usize,
    elapsed: f32,
    step_secs: f32,
}

impl FindCenterPlayback {
    pub fn new(step_secs: f32) -> Self {
        Self {
            step: 0,
            elapsed: 0.0,
            step_secs: if step_secs > 0.0 { step_secs } else { 0.0 },
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Seconds accumulated towards the next step.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance by `dt` seconds through `rounds` pruning rounds.
    ///
    /// Returns true once playback has finished.
    pub fn advance(&mut self, dt: f32, rounds: usize) -> bool {
        if self.step_secs == 0.0 {
            self.step = rounds + 2;
            return true;
        }
        self.elapsed += dt.max(0.0);
        while self.elapsed >= self.step_secs && !self.is_finished(rounds) {
            self.elapsed -= self.step_secs;
            self.step += 1;
        }
        self.is_finished(rounds)
    }

    pub fn is_finished(&self, rounds: usize) -> bool {
        self.step > rounds + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_every_interval() {
        let mut playback = FindCenterPlayback::new(0.8);
        assert!(!playback.advance(0.5, 3));
        assert_eq!(playback.step(), 0);
        assert!(!playback.advance(0.5, 3));
        assert_eq!(playback.step(), 1);
        assert!((playback.elapsed() - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_finishes_after_hold_step() {
        let mut playback = FindCenterPlayback::new(1.0);
        // Two rounds: steps 1, 2 show them, step 3 holds, step 4 ends.
        for expected in 1..=3 {
            assert!(!playback.advance(1.0, 2));
            assert_eq!(playback.step(), expected);
        }
        assert!(playback.advance(1.0, 2));
        assert_eq!(playback.step(), 4);
    }

    #[test]
    fn test_large_dt_stops_at_end() {
        let mut playback = FindCenterPlayback::new(0.5);
        assert!(playback.advance(100.0, 1));
        assert_eq!(playback.step(), 3);
    }

    #[test]
    fn test_zero_interval_finishes_immediately() {
        let mut playback = FindCenterPlayback::new(0.0);
        assert!(playback.advance(0.0, 5));
        assert!(playback.is_finished(5));
    }
}
