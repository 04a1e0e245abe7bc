use crate::settings::NavConfig;
use crate::tween::types::{Prop, Target, TweenCommand, TweenSpec};

use super::scroll::ScrollState;

/// Slide/fade the nav container when its displayed flags change.
///
/// Re-issuing identical targets is harmless, so only the flag change is gated.
pub fn nav_commands(prev: &ScrollState, next: &ScrollState, config: &NavConfig) -> Vec<TweenCommand> {
    if !prev.flags_differ(next) {
        return Vec::new();
    }
    let (y, opacity) = if next.is_visible {
        (0.0, 1.0)
    } else {
        (config.hidden_offset, 0.0)
    };
    vec![TweenCommand::To(
        TweenSpec::new(Target::NavContainer, config.duration_secs)
            .number(Prop::TranslateY, y)
            .number(Prop::Opacity, opacity)
            .ease(config.easing),
    )]
}
