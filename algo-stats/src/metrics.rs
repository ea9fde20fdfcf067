//! Operation counters and timing for the graph algorithms

use std::fmt;
use std::time::{Duration, Instant};

/// Counters collected while an algorithm runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics {
    pub dfs_visits: u64,
    pub edge_traversals: u64,
    pub queue_pushes: u64,
    pub queue_pops: u64,
    pub relaxations: u64,
    pub elapsed: Duration,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed wall time in milliseconds
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1_000.0
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dfs_visits={} edge_traversals={} queue_pushes={} queue_pops={} relaxations={} time={:.3} ms",
            self.dfs_visits,
            self.edge_traversals,
            self.queue_pushes,
            self.queue_pops,
            self.relaxations,
            self.elapsed_ms()
        )
    }
}

/// Stopwatch that writes its reading into a `Metrics` when stopped
#[derive(Debug)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn stop(self, metrics: &mut Metrics) {
        metrics.elapsed = self.start.elapsed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_ms() {
        let metrics = Metrics {
            elapsed: Duration::from_micros(1_500),
            ..Metrics::default()
        };
        assert!((metrics.elapsed_ms() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_timer_records_elapsed() {
        let mut metrics = Metrics::new();
        let timer = Timer::start();
        std::thread::sleep(Duration::from_millis(2));
        timer.stop(&mut metrics);
        assert!(metrics.elapsed >= Duration::from_millis(2));
    }

    #[test]
    fn test_display() {
        let metrics = Metrics {
            dfs_visits: 3,
            relaxations: 2,
            ..Metrics::default()
        };
        let text = metrics.to_string();
        assert!(text.contains("dfs_visits=3"));
        assert!(text.contains("relaxations=2"));
        assert!(text.ends_with("time=0.000 ms"));
    }
}
