//! Presentation-side carousel state.
//!
//! The state is a plain value: every operation consumes it and returns the
//! next one, so a renderer holds exactly one `CarouselState` and swaps it on
//! each event (click, swipe, timer tick, feed refresh).

use std::time::Duration;

use jobcarousel_shared::{AppConfig, Job};

/// Minimum horizontal travel for a touch drag to count as a swipe.
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// Auto-advance timer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoPlay {
    /// Time between automatic advances.
    pub interval: Duration,
    /// Paused while the user hovers or drags.
    pub paused: bool,
    /// Time accumulated toward the next advance.
    elapsed: Duration,
}

impl AutoPlay {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            paused: false,
            elapsed: Duration::ZERO,
        }
    }
}

impl From<&AppConfig> for AutoPlay {
    fn from(config: &AppConfig) -> Self {
        Self::new(Duration::from_secs(config.carousel.autoplay_secs))
    }
}

impl Default for AutoPlay {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

/// Jobs on display, the current slide and the auto-advance timer.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselState {
    jobs: Vec<Job>,
    current_index: usize,
    autoplay: AutoPlay,
}

impl CarouselState {
    pub fn new(jobs: Vec<Job>, autoplay: AutoPlay) -> Self {
        Self {
            jobs,
            current_index: 0,
            autoplay,
        }
    }

    /// Swap in a freshly loaded job list; the old one is discarded whole.
    pub fn replace_jobs(self, jobs: Vec<Job>) -> Self {
        Self {
            jobs,
            current_index: 0,
            autoplay: AutoPlay {
                elapsed: Duration::ZERO,
                ..self.autoplay
            },
        }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The job on the visible slide, `None` in the "no jobs" state.
    pub fn current(&self) -> Option<&Job> {
        self.jobs.get(self.current_index)
    }

    pub fn autoplay(&self) -> AutoPlay {
        self.autoplay
    }

    /// The distinct "no jobs available" state.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Prev/next controls are only enabled with more than one job.
    pub fn can_navigate(&self) -> bool {
        self.jobs.len() > 1
    }

    /// `(position, total)` for the "3 / 12" counter, 1-based.
    pub fn counter(&self) -> (usize, usize) {
        if self.is_empty() {
            (0, 0)
        } else {
            (self.current_index + 1, self.jobs.len())
        }
    }

    /// Advance one slide, wrapping to the first after the last.
    pub fn next(self) -> Self {
        if self.is_empty() {
            return self;
        }
        let current_index = (self.current_index + 1) % self.jobs.len();
        Self {
            current_index,
            ..self
        }
    }

    /// Go back one slide, wrapping to the last from the first.
    pub fn previous(self) -> Self {
        if self.is_empty() {
            return self;
        }
        let current_index = self
            .current_index
            .checked_sub(1)
            .unwrap_or(self.jobs.len() - 1);
        Self {
            current_index,
            ..self
        }
    }

    /// Jump to a slide; out-of-range indices are ignored.
    pub fn go_to(self, index: usize) -> Self {
        if index >= self.jobs.len() {
            return self;
        }
        Self {
            current_index: index,
            ..self
        }
    }

    /// Apply a finished horizontal drag of `delta_x` (start minus end).
    ///
    /// Positive travel past [`SWIPE_THRESHOLD`] moves forward, negative moves
    /// back, shorter drags are ignored.
    pub fn swipe(self, delta_x: f32) -> Self {
        if delta_x.abs() <= SWIPE_THRESHOLD {
            self
        } else if delta_x > 0.0 {
            self.next()
        } else {
            self.previous()
        }
    }

    pub fn pause(self) -> Self {
        Self {
            autoplay: AutoPlay {
                paused: true,
                ..self.autoplay
            },
            ..self
        }
    }

    /// Resume auto-advance with a fresh interval.
    pub fn resume(self) -> Self {
        Self {
            autoplay: AutoPlay {
                paused: false,
                elapsed: Duration::ZERO,
                ..self.autoplay
            },
            ..self
        }
    }

    /// Feed wall-clock time to the auto-advance timer.
    ///
    /// Advances once per full interval elapsed while running and
    /// navigable; leftover time carries over to the next tick.
    pub fn tick(self, dt: Duration) -> Self {
        if self.autoplay.paused || !self.can_navigate() || self.autoplay.interval.is_zero() {
            return self;
        }

        let mut elapsed = self.autoplay.elapsed + dt;
        let mut state = self;
        while elapsed >= state.autoplay.interval {
            elapsed -= state.autoplay.interval;
            state = state.next();
        }
        state.autoplay.elapsed = elapsed;
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_jobs;

    fn state() -> CarouselState {
        CarouselState::new(sample_jobs(), AutoPlay::default())
    }

    #[test]
    fn next_and_previous_wrap() {
        let s = state();
        assert_eq!(s.current_index(), 0);

        let s = s.next().next().next();
        assert_eq!(s.current_index(), 0);

        let s = s.previous();
        assert_eq!(s.current_index(), 2);
        assert_eq!(s.counter(), (3, 3));
    }

    #[test]
    fn go_to_ignores_out_of_range() {
        let s = state().go_to(1);
        assert_eq!(s.current_index(), 1);
        let s = s.go_to(7);
        assert_eq!(s.current_index(), 1);
    }

    #[test]
    fn empty_state_is_distinct() {
        let s = CarouselState::new(Vec::new(), AutoPlay::default());
        assert!(s.is_empty());
        assert!(!s.can_navigate());
        assert!(s.current().is_none());
        assert_eq!(s.counter(), (0, 0));

        let s = s.next().previous().tick(Duration::from_secs(60));
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn single_job_cannot_navigate() {
        let jobs = sample_jobs().into_iter().take(1).collect();
        let s = CarouselState::new(jobs, AutoPlay::default());
        assert!(!s.can_navigate());
        assert_eq!(s.tick(Duration::from_secs(30)).current_index(), 0);
    }

    #[test]
    fn replace_jobs_resets_index() {
        let s = state().go_to(2);
        let fresh = sample_jobs().into_iter().rev().collect();
        let s = s.replace_jobs(fresh);
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.current().map(|j| j.title.as_str()), Some("USDA SNAP Reviewer"));
    }

    #[test]
    fn swipe_needs_threshold() {
        let s = state().swipe(30.0);
        assert_eq!(s.current_index(), 0);
        let s = s.swipe(80.0);
        assert_eq!(s.current_index(), 1);
        let s = s.swipe(-80.0);
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn tick_advances_per_interval() {
        let s = state().tick(Duration::from_secs(5));
        assert_eq!(s.current_index(), 0);

        let s = s.tick(Duration::from_secs(3));
        assert_eq!(s.current_index(), 1);

        let s = s.tick(Duration::from_secs(14));
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn paused_autoplay_does_not_advance() {
        let s = state().pause().tick(Duration::from_secs(60));
        assert_eq!(s.current_index(), 0);
        assert!(s.autoplay().paused);

        let s = s.resume().tick(Duration::from_secs(7));
        assert_eq!(s.current_index(), 1);
    }
}
