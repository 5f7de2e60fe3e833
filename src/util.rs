//! Stage timing for build logs

use std::time::{Duration, Instant};

/// Logs how long a build stage took when it goes out of scope
///
/// With [`StageTimer::items`] set, the summary also reports the mean time per
/// item, e.g. `Cell construction: 4.210ms (12 cells, 350.8µs each)`.
pub(crate) struct StageTimer {
    stage: &'static str,
    level: log::Level,
    started: Instant,
    items: Option<(usize, &'static str)>,
}

impl StageTimer {
    pub(crate) fn new(stage: &'static str, level: log::Level) -> Self {
        log::trace!("{} started", stage);
        Self {
            stage,
            level,
            started: Instant::now(),
            items: None,
        }
    }

    /// Attach the number of items processed by this stage
    pub(crate) fn items(&mut self, count: usize, unit: &'static str) {
        self.items = Some((count, unit));
    }

    fn summary(&self, elapsed: Duration) -> String {
        match self.items {
            Some((count, unit)) if count > 0 => format!(
                "{}: {:.3?} ({} {}, {:.1?} each)",
                self.stage,
                elapsed,
                count,
                unit,
                elapsed / count as u32
            ),
            _ => format!("{}: {:.3?}", self.stage, elapsed),
        }
    }
}

impl Drop for StageTimer {
    fn drop(&mut self) {
        if log::log_enabled!(self.level) {
            log::log!(self.level, "{}", self.summary(self.started.elapsed()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_without_items() {
        let timer = StageTimer::new("Hulls", log::Level::Debug);
        let line = timer.summary(Duration::from_millis(2));
        assert!(line.starts_with("Hulls: 2"));
        assert!(!line.contains("each"));
    }

    #[test]
    fn test_summary_with_items() {
        let mut timer = StageTimer::new("Cell construction", log::Level::Debug);
        timer.items(4, "cells");
        let line = timer.summary(Duration::from_millis(8));
        assert!(line.contains("(4 cells, 2.0ms each)"), "{}", line);

        // Zero items falls back to the plain form
        timer.items(0, "cells");
        assert!(!timer.summary(Duration::from_millis(8)).contains("each"));
    }
}
