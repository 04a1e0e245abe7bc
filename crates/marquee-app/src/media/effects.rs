use crate::settings::{LayoutConfig, TransitionConfig};
use crate::tween::types::{Prop, PropValue, Props, StartAction, Target, TweenCommand, TweenSpec};

use super::cycle::CycleState;

/// Overlay geometry matching the preview box it grows out of.
fn preview_geometry(layout: &LayoutConfig) -> Props {
    let (w, h) = layout.preview_percent();
    vec![
        (Prop::Width, PropValue::Number(w)),
        (Prop::Height, PropValue::Number(h)),
        (Prop::Scale, PropValue::Number(1.0)),
    ]
}

/// Resting styles of the hero video elements before any interaction.
pub fn mount_commands(layout: &LayoutConfig) -> Vec<TweenCommand> {
    let mut props = vec![(Prop::Visibility, PropValue::Visible(false))];
    props.extend(preview_geometry(layout));
    vec![TweenCommand::Set {
        target: Target::TransitionVideo,
        props,
    }]
}

/// Commands for a change of cycle state.
///
/// Nothing is issued until the first user advance, and only when the active
/// clip actually changed. A settled overlay snaps back to the preview box
/// before growing again; one still growing continues from where it is.
/// The grow and the shrink-in run concurrently.
pub fn transition_commands(
    prev: &CycleState,
    next: &CycleState,
    config: &TransitionConfig,
    layout: &LayoutConfig,
    grow_in_flight: bool,
) -> Vec<TweenCommand> {
    if !next.has_transitioned || prev.active_index == next.active_index {
        return Vec::new();
    }

    let mut reveal = vec![(Prop::Visibility, PropValue::Visible(true))];
    if !grow_in_flight {
        reveal.extend(preview_geometry(layout));
    }

    vec![
        TweenCommand::Set {
            target: Target::TransitionVideo,
            props: reveal,
        },
        TweenCommand::To(
            TweenSpec::new(Target::TransitionVideo, config.grow_secs)
                .number(Prop::Scale, 1.0)
                .number(Prop::Width, 100.0)
                .number(Prop::Height, 100.0)
                .ease(config.easing)
                .on_start(StartAction::PlayMedia(Target::TransitionVideo))
                .revert_on_update(),
        ),
        TweenCommand::From(
            TweenSpec::new(Target::PreviewVideo, config.shrink_secs)
                .number(Prop::Scale, 0.0)
                .ease(config.easing)
                .revert_on_update(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::cycle::CycleEvent;
    use crate::media::types::VideoCycle;
    use crate::tween::easing::Easing;

    #[test]
    fn ready_signals_issue_nothing() {
        let cycle = VideoCycle::default();
        let prev = CycleState::initial(&cycle);
        let next = prev.reduce(&cycle, CycleEvent::ClipReady);
        let cmds = transition_commands(
            &prev,
            &next,
            &TransitionConfig::default(),
            &LayoutConfig::default(),
            false,
        );
        assert!(cmds.is_empty());
    }

    #[test]
    fn advance_issues_grow_and_shrink_pair() {
        let cycle = VideoCycle::default();
        let prev = CycleState::initial(&cycle);
        let next = prev.reduce(&cycle, CycleEvent::Advance);
        let cmds = transition_commands(
            &prev,
            &next,
            &TransitionConfig::default(),
            &LayoutConfig::default(),
            false,
        );
        assert_eq!(cmds.len(), 3);

        let TweenCommand::To(grow) = &cmds[1] else {
            panic!("expected grow tween, got {:?}", cmds[1]);
        };
        assert_eq!(grow.target, Target::TransitionVideo);
        assert!((grow.duration - 1.0).abs() < 1e-6);
        assert_eq!(grow.easing, Easing::Power1InOut);
        assert_eq!(
            grow.on_start,
            Some(StartAction::PlayMedia(Target::TransitionVideo))
        );
        assert!(grow.revert_on_update);

        let TweenCommand::From(shrink) = &cmds[2] else {
            panic!("expected shrink tween, got {:?}", cmds[2]);
        };
        assert_eq!(shrink.target, Target::PreviewVideo);
        assert!((shrink.duration - 1.5).abs() < 1e-6);
        assert_eq!(shrink.props, vec![(Prop::Scale, PropValue::Number(0.0))]);
        assert!(shrink.delay.abs() < 1e-6, "pair must start together");
    }

    #[test]
    fn settled_overlay_snaps_back_to_preview_box() {
        let cycle = VideoCycle::default();
        let prev = CycleState::initial(&cycle);
        let next = prev.reduce(&cycle, CycleEvent::Advance);
        let layout = LayoutConfig::default();
        let (w, _) = layout.preview_percent();

        let cmds = transition_commands(&prev, &next, &TransitionConfig::default(), &layout, false);
        let TweenCommand::Set { props, .. } = &cmds[0] else {
            panic!("expected reveal set, got {:?}", cmds[0]);
        };
        assert!(props.contains(&(Prop::Visibility, PropValue::Visible(true))));
        assert!(props.contains(&(Prop::Width, PropValue::Number(w))));

        let cmds = transition_commands(&prev, &next, &TransitionConfig::default(), &layout, true);
        let TweenCommand::Set { props, .. } = &cmds[0] else {
            panic!("expected reveal set, got {:?}", cmds[0]);
        };
        assert_eq!(props, &vec![(Prop::Visibility, PropValue::Visible(true))]);
    }

    #[test]
    fn single_clip_advance_is_silent() {
        let cycle = VideoCycle::new(1, "clip-{index}.mp4");
        let prev = CycleState::initial(&cycle);
        let next = prev.reduce(&cycle, CycleEvent::Advance);
        let cmds = transition_commands(
            &prev,
            &next,
            &TransitionConfig::default(),
            &LayoutConfig::default(),
            false,
        );
        assert!(cmds.is_empty());
    }

    #[test]
    fn mount_hides_transition_overlay() {
        let cmds = mount_commands(&LayoutConfig::default());
        let TweenCommand::Set { target, props } = &cmds[0] else {
            panic!("expected set");
        };
        assert_eq!(*target, Target::TransitionVideo);
        assert!(props.contains(&(Prop::Visibility, PropValue::Visible(false))));
    }
}
