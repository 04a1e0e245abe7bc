use std::fmt;

use serde::{Deserialize, Serialize};

use super::easing::Easing;

/// Elements the engine can animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// Full-frame overlay that grows out of the preview on advance (`#next-video`).
    TransitionVideo,
    /// Miniature preview inside the click target (`#current-video`).
    PreviewVideo,
    /// Masked hero frame (`#video-frame`).
    VideoFrame,
    /// Fixed navigation container.
    NavContainer,
    /// A single word of an animated heading.
    TitleWord { title: usize, word: usize },
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::TransitionVideo => f.write_str("#next-video"),
            Target::PreviewVideo => f.write_str("#current-video"),
            Target::VideoFrame => f.write_str("#video-frame"),
            Target::NavContainer => f.write_str("nav"),
            Target::TitleWord { title, word } => write!(f, "title-{title}-word-{word}"),
        }
    }
}

/// Animatable properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Prop {
    Scale,
    /// Percent of the containing frame.
    Width,
    /// Percent of the containing frame.
    Height,
    Opacity,
    TranslateX,
    TranslateY,
    TranslateZ,
    RotateX,
    RotateY,
    Visibility,
    ClipPath,
    BorderRadius,
}

impl Prop {
    /// Value an element has before anything touched it.
    pub fn initial_value(self) -> PropValue {
        match self {
            Prop::Scale | Prop::Opacity => PropValue::Number(1.0),
            Prop::Width | Prop::Height => PropValue::Number(100.0),
            Prop::TranslateX
            | Prop::TranslateY
            | Prop::TranslateZ
            | Prop::RotateX
            | Prop::RotateY => PropValue::Number(0.0),
            Prop::Visibility => PropValue::Visible(true),
            Prop::ClipPath => PropValue::Polygon(ClipPolygon::full_rect()),
            Prop::BorderRadius => PropValue::Radii(CornerRadii::ZERO),
        }
    }
}

/// Clip-path polygon in percent coordinates of the element box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipPolygon {
    pub points: Vec<[f32; 2]>,
}

impl ClipPolygon {
    pub fn new(points: &[[f32; 2]]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }

    /// `polygon(0% 0%, 100% 0%, 100% 100%, 0% 100%)`.
    pub fn full_rect() -> Self {
        Self::new(&[[0.0, 0.0], [100.0, 0.0], [100.0, 100.0], [0.0, 100.0]])
    }

    /// Vertex-wise interpolation. Polygons of differing arity snap instead.
    pub fn lerp(&self, other: &ClipPolygon, t: f32) -> ClipPolygon {
        if self.points.len() != other.points.len() {
            return if t >= 1.0 { other.clone() } else { self.clone() };
        }
        let points = self
            .points
            .iter()
            .zip(&other.points)
            .map(|(a, b)| [lerp(a[0], b[0], t), lerp(a[1], b[1], t)])
            .collect();
        ClipPolygon { points }
    }
}

impl fmt::Display for ClipPolygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("polygon(")?;
        for (i, [x, y]) in self.points.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}% {}%", round2(*x), round2(*y))?;
        }
        f.write_str(")")
    }
}

/// Border radius per corner (top-left, top-right, bottom-right, bottom-left), percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerRadii(pub [f32; 4]);

impl CornerRadii {
    pub const ZERO: CornerRadii = CornerRadii([0.0; 4]);

    pub fn lerp(&self, other: &CornerRadii, t: f32) -> CornerRadii {
        let mut out = [0.0; 4];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = lerp(self.0[i], other.0[i], t);
        }
        CornerRadii(out)
    }
}

impl fmt::Display for CornerRadii {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(
            f,
            "{}% {}% {}% {}%",
            round2(a),
            round2(b),
            round2(c),
            round2(d)
        )
    }
}

/// Concrete value of a property.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    Number(f32),
    Visible(bool),
    Polygon(ClipPolygon),
    Radii(CornerRadii),
}

impl PropValue {
    pub fn as_number(&self) -> Option<f32> {
        match self {
            PropValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_visible(&self) -> Option<bool> {
        match self {
            PropValue::Visible(v) => Some(*v),
            _ => None,
        }
    }

    /// Interpolate towards `to`. Discrete and mismatched values switch at the end.
    pub fn lerp(&self, to: &PropValue, t: f32) -> PropValue {
        match (self, to) {
            (PropValue::Number(a), PropValue::Number(b)) => PropValue::Number(lerp(*a, *b, t)),
            (PropValue::Polygon(a), PropValue::Polygon(b)) => PropValue::Polygon(a.lerp(b, t)),
            (PropValue::Radii(a), PropValue::Radii(b)) => PropValue::Radii(a.lerp(b, t)),
            _ => {
                if t >= 1.0 {
                    to.clone()
                } else {
                    self.clone()
                }
            }
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Number(v) => write!(f, "{}", round2(*v)),
            PropValue::Visible(true) => f.write_str("visible"),
            PropValue::Visible(false) => f.write_str("hidden"),
            PropValue::Polygon(p) => p.fmt(f),
            PropValue::Radii(r) => r.fmt(f),
        }
    }
}

pub type Props = Vec<(Prop, PropValue)>;

/// Side effect the engine reports when a tween begins running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StartAction {
    /// Begin playback of the clip loaded into this video element.
    PlayMedia(Target),
}

/// A timed tween request.
#[derive(Debug, Clone, PartialEq)]
pub struct TweenSpec {
    pub target: Target,
    pub props: Props,
    /// Seconds.
    pub duration: f32,
    /// Seconds before the tween starts.
    pub delay: f32,
    pub easing: Easing,
    pub on_start: Option<StartAction>,
    /// Kill in-flight tweens of the same scope on this target first.
    pub revert_on_update: bool,
}

impl TweenSpec {
    pub fn new(target: Target, duration: f32) -> Self {
        Self {
            target,
            props: Vec::new(),
            duration,
            delay: 0.0,
            easing: Easing::default(),
            on_start: None,
            revert_on_update: false,
        }
    }

    pub fn prop(mut self, prop: Prop, value: PropValue) -> Self {
        self.props.push((prop, value));
        self
    }

    pub fn number(self, prop: Prop, value: f32) -> Self {
        self.prop(prop, PropValue::Number(value))
    }

    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn delay(mut self, secs: f32) -> Self {
        self.delay = secs;
        self
    }

    pub fn on_start(mut self, action: StartAction) -> Self {
        self.on_start = Some(action);
        self
    }

    pub fn revert_on_update(mut self) -> Self {
        self.revert_on_update = true;
        self
    }
}

/// Commands accepted by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum TweenCommand {
    /// Write values immediately, no interpolation.
    Set { target: Target, props: Props },
    /// Animate from current values to the given ones.
    To(TweenSpec),
    /// Animate from the given values back to the element's resting values.
    From(TweenSpec),
}

/// Emitted by the engine while ticking.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Started {
        target: Target,
        action: Option<StartAction>,
    },
    Completed {
        target: Target,
    },
}

pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}
