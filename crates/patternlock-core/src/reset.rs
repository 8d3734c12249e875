#![forbid(unsafe_code)]

//! Deferred selection reset.
//!
//! After a rejected pattern the traced path stays visible for a short delay
//! before it is cleared. [`ResetSchedule`] holds that pending action as plain
//! data: a deadline that the owner arms, cancels, and polls with an explicit
//! `now`. Nothing runs in the background.
//!
//! A newer gesture supersedes a pending reset: the owner calls
//! [`cancel`](ResetSchedule::cancel) on `Start`, so a late poll can never wipe
//! the selection of the gesture in progress.

use web_time::{Duration, Instant};

use crate::config::MAX_RESET_DELAY;

/// A single cancellable deadline.
#[derive(Debug, Clone, Default)]
pub struct ResetSchedule {
    deadline: Option<Instant>,
    /// Bumped on every arm and cancel; lets hosts that drive their own timers
    /// tell a stale callback from a live one.
    generation: u64,
}

impl ResetSchedule {
    /// Create an idle schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the reset to fire `delay` after `now`, replacing any pending one.
    ///
    /// Returns the generation of the new arming. A `delay` that overflows the
    /// clock is capped at [`MAX_RESET_DELAY`].
    pub fn schedule(&mut self, now: Instant, delay: Duration) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        let deadline = now
            .checked_add(delay)
            .or_else(|| now.checked_add(MAX_RESET_DELAY))
            .unwrap_or(now);
        self.deadline = Some(deadline);
        self.generation
    }

    /// Drop the pending reset, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        if self.deadline.take().is_some() {
            self.generation = self.generation.wrapping_add(1);
            true
        } else {
            false
        }
    }

    /// Consume the pending reset if its deadline has passed.
    ///
    /// Fires at most once per arming.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// When the pending reset is due.
    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether a reset is pending.
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Current arming generation.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fire only if `generation` still names the live arming.
    ///
    /// For hosts that hand the generation to a one-shot timer callback
    /// instead of polling.
    pub fn fire(&mut self, generation: u64) -> bool {
        if self.generation == generation && self.deadline.is_some() {
            self.deadline = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_500: Duration = Duration::from_millis(500);

    #[test]
    fn fires_once_after_deadline() {
        let mut rs = ResetSchedule::new();
        let t = Instant::now();
        rs.schedule(t, MS_500);
        assert!(!rs.poll(t + Duration::from_millis(499)));
        assert!(rs.poll(t + MS_500));
        assert!(!rs.poll(t + Duration::from_millis(900)));
        assert!(!rs.is_pending());
    }

    #[test]
    fn cancel_prevents_fire() {
        let mut rs = ResetSchedule::new();
        let t = Instant::now();
        rs.schedule(t, MS_500);
        assert!(rs.cancel());
        assert!(!rs.poll(t + Duration::from_secs(2)));
        assert!(!rs.cancel());
    }

    #[test]
    fn reschedule_replaces_deadline() {
        let mut rs = ResetSchedule::new();
        let t = Instant::now();
        rs.schedule(t, MS_500);
        rs.schedule(t + Duration::from_millis(400), MS_500);
        assert!(!rs.poll(t + Duration::from_millis(600)));
        assert!(rs.poll(t + Duration::from_millis(900)));
    }

    #[test]
    fn stale_generation_does_not_fire() {
        let mut rs = ResetSchedule::new();
        let t = Instant::now();
        let first = rs.schedule(t, MS_500);
        let second = rs.schedule(t, MS_500);
        assert_ne!(first, second);
        assert!(!rs.fire(first));
        assert!(rs.fire(second));
        assert!(!rs.fire(second));
    }

    #[test]
    fn cancel_invalidates_generation() {
        let mut rs = ResetSchedule::new();
        let g = rs.schedule(Instant::now(), MS_500);
        rs.cancel();
        assert!(!rs.fire(g));
    }

    #[test]
    fn deadline_reports_due_time() {
        let mut rs = ResetSchedule::new();
        assert!(rs.deadline().is_none());
        let t = Instant::now();
        rs.schedule(t, MS_500);
        assert_eq!(rs.deadline(), Some(t + MS_500));
    }

    #[test]
    fn overflowing_delay_is_capped() {
        let mut rs = ResetSchedule::new();
        let t = Instant::now();
        rs.schedule(t, Duration::MAX);
        assert_eq!(rs.deadline(), Some(t + MAX_RESET_DELAY));
        assert!(!rs.poll(t + Duration::from_secs(59)));
        assert!(rs.poll(t + MAX_RESET_DELAY));
    }
}
