use serde::Serialize;

use super::types::VideoCycle;

/// Inputs the cycle reducer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleEvent {
    /// A clip reported it can play.
    ClipReady,
    /// The user activated the preview control.
    Advance,
}

/// Hero reel state. Only [`CycleState::reduce`] produces new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleState {
    pub active_index: usize,
    /// Always `next_after(active_index)`.
    pub queued_index: usize,
    /// Never decreases during a session.
    pub loaded_count: u32,
    /// Latched: once false it stays false.
    pub is_loading: bool,
    pub has_transitioned: bool,
}

impl CycleState {
    pub fn initial(cycle: &VideoCycle) -> Self {
        Self {
            active_index: 1,
            queued_index: cycle.next_after(1),
            loaded_count: 0,
            is_loading: true,
            has_transitioned: false,
        }
    }

    /// Number of ready signals that dismisses the loading overlay.
    ///
    /// One short of the full set so a single stalled clip can't block the page.
    pub fn ready_threshold(cycle: &VideoCycle) -> u32 {
        cycle.len().saturating_sub(1) as u32
    }

    pub fn reduce(self, cycle: &VideoCycle, event: CycleEvent) -> Self {
        match event {
            CycleEvent::ClipReady => {
                let loaded_count = self.loaded_count.saturating_add(1);
                Self {
                    loaded_count,
                    is_loading: self.is_loading && loaded_count < Self::ready_threshold(cycle),
                    ..self
                }
            }
            CycleEvent::Advance => {
                let active_index = self.queued_index;
                Self {
                    active_index,
                    queued_index: cycle.next_after(active_index),
                    has_transitioned: true,
                    ..self
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(state: CycleState, cycle: &VideoCycle, times: usize) -> CycleState {
        (0..times).fold(state, |s, _| s.reduce(cycle, CycleEvent::ClipReady))
    }

    #[test]
    fn initial_state() {
        let cycle = VideoCycle::default();
        let s = CycleState::initial(&cycle);
        assert_eq!(s.active_index, 1);
        assert_eq!(s.queued_index, 2);
        assert_eq!(s.loaded_count, 0);
        assert!(s.is_loading);
        assert!(!s.has_transitioned);
    }

    #[test]
    fn queued_follows_active_around_the_cycle() {
        let cycle = VideoCycle::default();
        let mut s = CycleState::initial(&cycle);
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push((s.active_index, s.queued_index));
            s = s.reduce(&cycle, CycleEvent::Advance);
        }
        assert_eq!(seen, vec![(1, 2), (2, 3), (3, 4), (4, 1)]);
    }

    #[test]
    fn advance_from_last_wraps_to_first() {
        let cycle = VideoCycle::default();
        let mut s = CycleState::initial(&cycle);
        for _ in 0..3 {
            s = s.reduce(&cycle, CycleEvent::Advance);
        }
        assert_eq!(s.active_index, 4);
        let s = s.reduce(&cycle, CycleEvent::Advance);
        assert_eq!(s.active_index, 1);
        assert_eq!(s.queued_index, 2);
    }

    #[test]
    fn advance_marks_transitioned() {
        let cycle = VideoCycle::default();
        let s = CycleState::initial(&cycle).reduce(&cycle, CycleEvent::Advance);
        assert!(s.has_transitioned);
    }

    #[test]
    fn loading_clears_at_n_minus_one() {
        let cycle = VideoCycle::default();
        let s = CycleState::initial(&cycle);
        let two = ready(s, &cycle, 2);
        assert!(two.is_loading);
        let three = ready(two, &cycle, 1);
        assert!(!three.is_loading);
        assert_eq!(three.loaded_count, 3);
    }

    #[test]
    fn loading_never_reverts() {
        let cycle = VideoCycle::default();
        let s = ready(CycleState::initial(&cycle), &cycle, 3);
        let s = s.reduce(&cycle, CycleEvent::ClipReady);
        assert!(!s.is_loading);
        assert_eq!(s.loaded_count, 4);
        let s = ready(s, &cycle, 10);
        assert!(!s.is_loading);
    }

    #[test]
    fn ready_signals_are_order_independent_of_advances() {
        let cycle = VideoCycle::default();
        let s = CycleState::initial(&cycle)
            .reduce(&cycle, CycleEvent::ClipReady)
            .reduce(&cycle, CycleEvent::Advance)
            .reduce(&cycle, CycleEvent::ClipReady)
            .reduce(&cycle, CycleEvent::Advance)
            .reduce(&cycle, CycleEvent::ClipReady);
        assert!(!s.is_loading);
        assert_eq!(s.active_index, 3);
    }

    #[test]
    fn advance_does_not_touch_loading() {
        let cycle = VideoCycle::default();
        let s = CycleState::initial(&cycle).reduce(&cycle, CycleEvent::Advance);
        assert!(s.is_loading);
        assert_eq!(s.loaded_count, 0);
    }
}
