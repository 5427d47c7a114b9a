// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// A one-shot deadline on the host clock.
///
/// Nothing runs in the background: the owner polls [`Timer::fire_if_due`]
/// from [`Surface::tick`](crate::Surface::tick). A fired or cancelled timer
/// stays disarmed until started again.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Timer {
    deadline: Option<u64>,
}

impl Timer {
    /// A timer armed to fire `delay_ms` after `now_ms`.
    pub(crate) fn started(now_ms: u64, delay_ms: u64) -> Self {
        let mut timer = Self::default();
        timer.start(now_ms, delay_ms);
        timer
    }

    /// Arms (or re-arms) the timer.
    pub(crate) fn start(&mut self, now_ms: u64, delay_ms: u64) {
        self.deadline = Some(now_ms.saturating_add(delay_ms));
    }

    pub(crate) fn cancel(&mut self) {
        self.deadline = None;
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Disarms the timer and returns `true` if its deadline has passed.
    pub(crate) fn fire_if_due(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_at_the_deadline() {
        let mut timer = Timer::started(1_000, 250);
        assert!(!timer.fire_if_due(1_249));
        assert!(timer.fire_if_due(1_250));
        assert!(!timer.fire_if_due(2_000));
        assert!(!timer.is_armed());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timer = Timer::started(0, 250);
        timer.cancel();
        timer.cancel();
        assert!(!timer.fire_if_due(10_000));
    }

    #[test]
    fn restart_moves_the_deadline() {
        let mut timer = Timer::started(0, 250);
        timer.start(200, 250);
        assert!(!timer.fire_if_due(300));
        assert!(timer.fire_if_due(450));
    }
}
