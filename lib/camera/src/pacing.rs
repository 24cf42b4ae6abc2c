use std::{
    thread,
    time::{Duration, Instant},
};

/// Sleeps just long enough to hold a target frame rate.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Option<Duration>,
    last: Option<Instant>,
}

impl FramePacer {
    /// `fps == 0` disables pacing.
    pub fn new(fps: u32) -> Self {
        Self {
            interval: (fps > 0).then(|| Duration::from_millis(1000 / fps as u64)),
            last: None,
        }
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    pub fn wait(&mut self) {
        if let Some(interval) = self.interval
            && let Some(last) = self.last
        {
            let elapsed = last.elapsed();
            if elapsed < interval {
                thread::sleep(interval - elapsed);
            }
        }

        self.last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval() {
        assert_eq!(FramePacer::new(0).interval(), None);
        assert_eq!(
            FramePacer::new(25).interval(),
            Some(Duration::from_millis(40))
        );
    }

    #[test]
    fn test_wait_holds_rate() {
        let mut pacer = FramePacer::new(50);
        let start = Instant::now();
        for _ in 0..4 {
            pacer.wait();
        }
        assert!(start.elapsed() >= Duration::from_millis(60));
    }

    #[test]
    fn test_disabled_pacer_never_sleeps() {
        let mut pacer = FramePacer::new(0);
        let start = Instant::now();
        for _ in 0..100 {
            pacer.wait();
        }
        assert!(start.elapsed() < Duration::from_millis(500));
    }
}
