use crate::settings::{FrameMaskConfig, LayoutConfig};
use crate::tween::scroll::{ElementBox, ScrollRange};
use crate::tween::types::{ClipPolygon, CornerRadii, Prop, PropValue, Target, TweenCommand};
use crate::tween::{AnimationScope, EngineHandle};

/// Scroll-scrubbed clip-path and corner rounding on the hero frame.
///
/// The clip scrubs from the full rectangle at the start trigger to the
/// configured polygon at the end trigger. With the default center/bottom start
/// the start offset is negative, so at the top of the page the frame is
/// already half closed and never shows the full rectangle. A center/center
/// start puts the full rectangle at scroll 0. No discrete states, only scroll
/// progress.
pub struct FrameMask {
    range: ScrollRange,
    _scope: AnimationScope,
}

impl FrameMask {
    pub fn mount(config: &FrameMaskConfig, layout: &LayoutConfig, engine: &EngineHandle) -> Self {
        let frame = ElementBox {
            top: 0.0,
            height: layout.viewport_height,
        };
        let range =
            ScrollRange::from_triggers(config.start, config.end, &frame, layout.viewport_height);

        let scope = AnimationScope::acquire(engine);
        scope.issue(TweenCommand::Set {
            target: Target::VideoFrame,
            props: vec![
                (Prop::ClipPath, PropValue::Polygon(config.clip.clone())),
                (Prop::BorderRadius, PropValue::Radii(config.radius)),
            ],
        });
        scope.register_scroll_linked(
            Target::VideoFrame,
            vec![
                (Prop::ClipPath, PropValue::Polygon(ClipPolygon::full_rect())),
                (Prop::BorderRadius, PropValue::Radii(CornerRadii::ZERO)),
            ],
            range,
            config.easing,
        );
        log::debug!("frame mask scrubs between y={} and y={}", range.start, range.end);

        Self {
            range,
            _scope: scope,
        }
    }

    pub fn range(&self) -> ScrollRange {
        self.range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tween::scroll::{Anchor, TriggerPoint};
    use crate::tween::shared_engine;

    fn clip(engine: &EngineHandle) -> ClipPolygon {
        match engine.borrow().value(Target::VideoFrame, Prop::ClipPath) {
            PropValue::Polygon(p) => p,
            other => panic!("unexpected clip value {other:?}"),
        }
    }

    #[test]
    fn range_spans_center_bottom_to_bottom_center() {
        let engine = shared_engine();
        let mask = FrameMask::mount(&FrameMaskConfig::default(), &LayoutConfig::default(), &engine);
        assert!((mask.range().start - -360.0).abs() < 1e-3);
        assert!((mask.range().end - 360.0).abs() < 1e-3);
    }

    #[test]
    fn top_of_page_is_halfway_open() {
        let engine = shared_engine();
        let _mask = FrameMask::mount(&FrameMaskConfig::default(), &LayoutConfig::default(), &engine);
        assert_eq!(engine.borrow().link_progress(Target::VideoFrame), Some(0.5));
        // power1.inOut(0.5) == 0.5, so every vertex sits midway.
        let p = clip(&engine);
        assert!((p.points[0][0] - 7.0).abs() < 1e-4);
        assert!((p.points[1][0] - 86.0).abs() < 1e-4);
    }

    #[test]
    fn past_end_trigger_settles_on_mask() {
        let engine = shared_engine();
        let config = FrameMaskConfig::default();
        let _mask = FrameMask::mount(&config, &LayoutConfig::default(), &engine);
        engine.borrow_mut().scroll_to(1000.0);
        assert_eq!(clip(&engine), config.clip);
        assert_eq!(
            engine.borrow().value(Target::VideoFrame, Prop::BorderRadius),
            PropValue::Radii(config.radius)
        );
    }

    #[test]
    fn before_start_trigger_is_full_rect() {
        let engine = shared_engine();
        let _mask = FrameMask::mount(&FrameMaskConfig::default(), &LayoutConfig::default(), &engine);
        engine.borrow_mut().scroll_to(-500.0);
        assert_eq!(clip(&engine), ClipPolygon::full_rect());
    }

    #[test]
    fn center_center_start_is_open_at_top() {
        let engine = shared_engine();
        let config = FrameMaskConfig {
            start: TriggerPoint::new(Anchor::Center, Anchor::Center),
            ..FrameMaskConfig::default()
        };
        let mask = FrameMask::mount(&config, &LayoutConfig::default(), &engine);
        assert!(mask.range().start.abs() < 1e-3);
        engine.borrow_mut().scroll_to(0.0);
        assert_eq!(clip(&engine), ClipPolygon::full_rect());
    }

    #[test]
    fn unmount_stops_scrubbing() {
        let engine = shared_engine();
        let mask = FrameMask::mount(&FrameMaskConfig::default(), &LayoutConfig::default(), &engine);
        drop(mask);
        assert_eq!(engine.borrow().scroll_links(), 0);
    }
}
