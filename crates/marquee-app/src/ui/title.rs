use crate::settings::{TitleAnimConfig, TitleConfig};
use crate::tween::scroll::ElementBox;
use crate::tween::types::{Prop, Props, PropValue, Target, TweenCommand, TweenSpec};
use crate::tween::{AnimationScope, EngineHandle};

const LINE_BREAK: &str = "<br />";

/// Split heading markup into lines of words. Inline tags stay inside their word.
pub fn split_words(text: &str) -> Vec<Vec<String>> {
    text.split(LINE_BREAK)
        .map(|line| {
            line.split(' ')
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect()
        })
        .collect()
}

/// Resting pose of a word before it enters: pushed back and turned away.
fn hidden_props() -> Props {
    vec![
        (Prop::Opacity, PropValue::Number(0.0)),
        (Prop::TranslateX, PropValue::Number(10.0)),
        (Prop::TranslateY, PropValue::Number(51.0)),
        (Prop::TranslateZ, PropValue::Number(-60.0)),
        (Prop::RotateY, PropValue::Number(60.0)),
        (Prop::RotateX, PropValue::Number(-40.0)),
    ]
}

fn shown_props() -> Props {
    vec![
        (Prop::Opacity, PropValue::Number(1.0)),
        (Prop::TranslateX, PropValue::Number(0.0)),
        (Prop::TranslateY, PropValue::Number(0.0)),
        (Prop::TranslateZ, PropValue::Number(0.0)),
        (Prop::RotateY, PropValue::Number(0.0)),
        (Prop::RotateX, PropValue::Number(0.0)),
    ]
}

/// A heading whose words stagger in once scrolled into view and back out
/// when scrolled above the trigger again.
pub struct AnimatedTitle {
    index: usize,
    lines: Vec<Vec<String>>,
    start_offset: f32,
    entered: bool,
    anim: TitleAnimConfig,
    scope: AnimationScope,
}

impl AnimatedTitle {
    pub fn mount(
        index: usize,
        title: &TitleConfig,
        anim: &TitleAnimConfig,
        viewport_height: f32,
        engine: &EngineHandle,
    ) -> Self {
        let layout = ElementBox {
            top: title.top,
            height: title.height,
        };
        let lines = split_words(&title.text);
        let scope = AnimationScope::acquire(engine);
        let word_count: usize = lines.iter().map(Vec::len).sum();
        scope.issue_all((0..word_count).map(|word| TweenCommand::Set {
            target: Target::TitleWord { title: index, word },
            props: hidden_props(),
        }));
        Self {
            index,
            lines,
            start_offset: anim.start.scroll_offset(&layout, viewport_height),
            entered: false,
            anim: anim.clone(),
            scope,
        }
    }

    pub fn lines(&self) -> &[Vec<String>] {
        &self.lines
    }

    pub fn word_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }

    pub fn has_entered(&self) -> bool {
        self.entered
    }

    pub fn start_offset(&self) -> f32 {
        self.start_offset
    }

    /// Play on entering the trigger, reverse on leaving it backwards.
    pub fn on_scroll(&mut self, y: f32) {
        let inside = y >= self.start_offset;
        if inside == self.entered {
            return;
        }
        self.entered = inside;
        let count = self.word_count();
        let props = if inside { shown_props() } else { hidden_props() };
        log::debug!(
            "title {} {} ({count} words)",
            self.index,
            if inside { "plays" } else { "reverses" }
        );
        let commands = (0..count).map(|word| {
            let slot = if inside { word } else { count - 1 - word };
            let mut spec = TweenSpec::new(
                Target::TitleWord {
                    title: self.index,
                    word,
                },
                self.anim.word_secs,
            )
            .ease(self.anim.easing)
            .delay(slot as f32 * self.anim.stagger_secs)
            .revert_on_update();
            spec.props = props.clone();
            TweenCommand::To(spec)
        });
        self.scope.issue_all(commands);
    }
}
