pub mod cycle;
pub mod effects;
pub mod mask;
pub mod types;

use std::collections::BTreeSet;

use crate::settings::{LayoutConfig, TransitionConfig};
use crate::tween::types::Target;
use crate::tween::{AnimationScope, EngineHandle};
use cycle::{CycleEvent, CycleState};
use types::{DisplaySources, VideoCycle};

/// Owns the hero reel: active/queued clip, the loading gate, and the
/// transition animations between clips.
pub struct MediaCycleController {
    cycle: VideoCycle,
    state: CycleState,
    transition: TransitionConfig,
    layout: LayoutConfig,
    /// When set, repeated ready signals for one clip count once.
    dedupe_ready: bool,
    ready_clips: BTreeSet<usize>,
    scope: AnimationScope,
}

impl MediaCycleController {
    pub fn new(
        cycle: VideoCycle,
        transition: TransitionConfig,
        layout: &LayoutConfig,
        dedupe_ready: bool,
        engine: &EngineHandle,
    ) -> Self {
        let scope = AnimationScope::acquire(engine);
        scope.issue_all(effects::mount_commands(layout));
        let state = CycleState::initial(&cycle);
        log::debug!(
            "media cycle: {} clips, overlay clears after {} ready signal(s)",
            cycle.len(),
            CycleState::ready_threshold(&cycle)
        );
        Self {
            cycle,
            state,
            transition,
            layout: layout.clone(),
            dedupe_ready,
            ready_clips: BTreeSet::new(),
            scope,
        }
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn cycle(&self) -> &VideoCycle {
        &self.cycle
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    /// Count one ready signal. No per-clip identity check.
    pub fn report_loaded(&mut self) {
        let was_loading = self.state.is_loading;
        self.dispatch(CycleEvent::ClipReady);
        if was_loading && !self.state.is_loading {
            log::info!(
                "loading gate cleared after {} ready signal(s)",
                self.state.loaded_count
            );
        }
    }

    /// Ready signal from a known clip. Honors the dedupe setting before counting.
    pub fn report_clip_ready(&mut self, clip: Option<usize>) {
        if let Some(clip) = clip {
            if !self.cycle.contains(clip) {
                log::debug!("ready signal for clip {clip} outside 1..={}", self.cycle.len());
            }
            if self.dedupe_ready && !self.ready_clips.insert(clip) {
                log::debug!("ignoring repeated ready signal for clip {clip}");
                return;
            }
        }
        self.report_loaded();
    }

    /// Advance the reel to the queued clip and animate the swap.
    pub fn request_advance(&mut self) {
        self.dispatch(CycleEvent::Advance);
    }

    pub fn display_sources(&self) -> DisplaySources {
        let active = self.state.active_index;
        // Existing policy: the second-to-last clip shows clip 1 in the background.
        let background = if active == self.cycle.len().saturating_sub(1) {
            1
        } else {
            active
        };
        DisplaySources {
            background: self.cycle.source(background),
            preview: self.cycle.source(self.state.queued_index),
            transition: self.cycle.source(active),
        }
    }

    fn dispatch(&mut self, event: CycleEvent) {
        let prev = self.state;
        self.state = prev.reduce(&self.cycle, event);
        log::debug!(
            "cycle {event:?}: active {} -> {}, loaded {}",
            prev.active_index,
            self.state.active_index,
            self.state.loaded_count
        );
        let grow_in_flight = self.scope.is_animating(Target::TransitionVideo);
        self.scope.issue_all(effects::transition_commands(
            &prev,
            &self.state,
            &self.transition,
            &self.layout,
            grow_in_flight,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tween::shared_engine;
    use crate::tween::types::{Prop, PropValue};

    fn controller(engine: &EngineHandle, dedupe: bool) -> MediaCycleController {
        MediaCycleController::new(
            VideoCycle::default(),
            TransitionConfig::default(),
            &LayoutConfig::default(),
            dedupe,
            engine,
        )
    }

    #[test]
    fn display_sources_at_start() {
        let engine = shared_engine();
        let c = controller(&engine, false);
        let s = c.display_sources();
        assert_eq!(s.background, "videos/hero-1.mp4");
        assert_eq!(s.preview, "videos/hero-2.mp4");
        assert_eq!(s.transition, "videos/hero-1.mp4");
    }

    #[test]
    fn background_aliases_second_to_last_clip_to_first() {
        let engine = shared_engine();
        let mut c = controller(&engine, false);
        c.request_advance();
        c.request_advance();
        assert_eq!(c.state().active_index, 3);
        let s = c.display_sources();
        assert_eq!(s.background, "videos/hero-1.mp4");
        assert_eq!(s.preview, "videos/hero-4.mp4");
        assert_eq!(s.transition, "videos/hero-3.mp4");
    }

    #[test]
    fn background_follows_active_otherwise() {
        let engine = shared_engine();
        let mut c = controller(&engine, false);
        for _ in 0..3 {
            c.request_advance();
        }
        assert_eq!(c.display_sources().background, "videos/hero-4.mp4");
    }

    #[test]
    fn duplicate_ready_signals_overcount_by_default() {
        // Same clip reporting three times clears the gate on its own.
        let engine = shared_engine();
        let mut c = controller(&engine, false);
        for _ in 0..3 {
            c.report_clip_ready(Some(2));
        }
        assert!(!c.is_loading());
        assert_eq!(c.state().loaded_count, 3);
    }

    #[test]
    fn dedupe_counts_each_clip_once() {
        let engine = shared_engine();
        let mut c = controller(&engine, true);
        for _ in 0..3 {
            c.report_clip_ready(Some(2));
        }
        assert!(c.is_loading());
        c.report_clip_ready(Some(1));
        c.report_clip_ready(Some(4));
        assert!(!c.is_loading());
    }

    #[test]
    fn anonymous_ready_signals_always_count() {
        let engine = shared_engine();
        let mut c = controller(&engine, true);
        for _ in 0..3 {
            c.report_clip_ready(None);
        }
        assert!(!c.is_loading());
    }

    #[test]
    fn fourth_ready_keeps_overlay_dismissed() {
        let engine = shared_engine();
        let mut c = controller(&engine, false);
        for _ in 0..4 {
            c.report_loaded();
        }
        assert!(!c.is_loading());
    }

    #[test]
    fn advance_drives_engine() {
        let engine = shared_engine();
        let mut c = controller(&engine, false);
        assert_eq!(
            engine.borrow().value(Target::TransitionVideo, Prop::Visibility),
            PropValue::Visible(false)
        );
        c.request_advance();
        assert_eq!(engine.borrow().active_tweens(), 2);
        assert_eq!(
            engine.borrow().value(Target::TransitionVideo, Prop::Visibility),
            PropValue::Visible(true)
        );
        engine.borrow_mut().tick(2.0);
        let e = engine.borrow();
        assert!((e.number(Target::TransitionVideo, Prop::Width) - 100.0).abs() < 1e-4);
        assert!((e.number(Target::PreviewVideo, Prop::Scale) - 1.0).abs() < 1e-4);
    }

    fn overlay_width(engine: &EngineHandle) -> f32 {
        engine.borrow().number(Target::TransitionVideo, Prop::Width)
    }

    fn preview_scale(engine: &EngineHandle) -> f32 {
        engine.borrow().number(Target::PreviewVideo, Prop::Scale)
    }

    #[test]
    fn rapid_advances_restart_in_flight_tweens() {
        let engine = shared_engine();
        let mut c = controller(&engine, false);
        c.request_advance();
        engine.borrow_mut().tick(0.3);
        // power1.inOut(0.3) = 0.18, so 20% + 80% * 0.18.
        let mid = overlay_width(&engine);
        assert!((mid - 34.4).abs() < 1e-3, "mid-grow width {mid}");

        c.request_advance();
        assert_eq!(engine.borrow().active_tweens(), 2);
        assert_eq!(c.state().active_index, 3);
        // Overlay keeps its mid-grow size, preview starts over from nothing.
        assert!((overlay_width(&engine) - mid).abs() < 1e-4);
        assert!(preview_scale(&engine).abs() < 1e-6);

        engine.borrow_mut().tick(0.1);
        let width = overlay_width(&engine);
        assert!(width > mid && width < 40.0, "restarted grow width {width}");
        let scale = preview_scale(&engine);
        assert!(scale > 0.0 && scale < 0.05, "restarted preview scale {scale}");
    }

    #[test]
    fn every_settled_advance_grows_from_preview_box() {
        let engine = shared_engine();
        let mut c = controller(&engine, false);
        c.request_advance();
        engine.borrow_mut().tick(2.0);
        assert!((overlay_width(&engine) - 100.0).abs() < 1e-4);

        c.request_advance();
        assert!((overlay_width(&engine) - 20.0).abs() < 1e-4);
        assert!(preview_scale(&engine).abs() < 1e-6);

        engine.borrow_mut().tick(0.5);
        // Halfway through a symmetric ease: 20% + 80% * 0.5.
        assert!((overlay_width(&engine) - 60.0).abs() < 1e-3);
        engine.borrow_mut().tick(1.0);
        assert!((overlay_width(&engine) - 100.0).abs() < 1e-4);
        assert_eq!(
            engine.borrow().value(Target::TransitionVideo, Prop::Visibility),
            PropValue::Visible(true)
        );
    }

    #[test]
    fn dropping_controller_releases_tweens() {
        let engine = shared_engine();
        let mut c = controller(&engine, false);
        c.request_advance();
        drop(c);
        assert_eq!(engine.borrow().active_tweens(), 0);
    }
}
