pub mod easing;
pub mod scroll;
pub mod types;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

use self::easing::Easing;
use self::scroll::ScrollRange;
use self::types::{EngineEvent, Prop, PropValue, Props, StartAction, Target, TweenCommand};

/// Identifies the owner of a group of tweens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

#[derive(Debug, Clone)]
struct Track {
    prop: Prop,
    /// Captured when the tween starts for `to` tweens.
    from: Option<PropValue>,
    to: PropValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TweenKind {
    To,
    From,
}

#[derive(Debug, Clone)]
struct ActiveTween {
    scope: ScopeId,
    target: Target,
    kind: TweenKind,
    tracks: Vec<Track>,
    duration: f32,
    delay: f32,
    easing: Easing,
    elapsed: f32,
    started: bool,
    on_start: Option<StartAction>,
}

/// A scrubbed animation whose progress follows the scroll position.
#[derive(Debug, Clone)]
struct ScrollLink {
    scope: ScopeId,
    target: Target,
    range: ScrollRange,
    easing: Easing,
    tracks: Vec<(Prop, PropValue, PropValue)>,
    progress: f32,
}

/// Frame-driven property animator.
///
/// Holds the current visual value of every touched (target, prop) pair.
/// Commands are fire-and-forget; callers observe results through
/// [`TweenEngine::value`] and the events returned by [`TweenEngine::tick`].
pub struct TweenEngine {
    values: FxHashMap<Target, FxHashMap<Prop, PropValue>>,
    tweens: Vec<ActiveTween>,
    links: Vec<ScrollLink>,
    scroll_y: f32,
    next_scope: u32,
}

impl TweenEngine {
    pub fn new() -> Self {
        Self {
            values: FxHashMap::default(),
            tweens: Vec::new(),
            links: Vec::new(),
            scroll_y: 0.0,
            next_scope: 0,
        }
    }

    pub fn allocate_scope(&mut self) -> ScopeId {
        let id = ScopeId(self.next_scope);
        self.next_scope += 1;
        id
    }

    /// Current value, or the property's initial value if never written.
    pub fn value(&self, target: Target, prop: Prop) -> PropValue {
        self.values
            .get(&target)
            .and_then(|props| props.get(&prop))
            .cloned()
            .unwrap_or_else(|| prop.initial_value())
    }

    pub fn number(&self, target: Target, prop: Prop) -> f32 {
        self.value(target, prop).as_number().unwrap_or(0.0)
    }

    fn write(&mut self, target: Target, prop: Prop, value: PropValue) {
        self.values.entry(target).or_default().insert(prop, value);
    }

    pub fn is_animating(&self, target: Target) -> bool {
        self.tweens.iter().any(|t| t.target == target)
    }

    pub fn active_tweens(&self) -> usize {
        self.tweens.len()
    }

    #[cfg(test)]
    pub fn scroll_links(&self) -> usize {
        self.links.len()
    }

    pub fn apply(&mut self, scope: ScopeId, command: TweenCommand) {
        match command {
            TweenCommand::Set { target, props } => {
                for (prop, value) in props {
                    self.write(target, prop, value);
                }
            }
            TweenCommand::To(spec) => {
                if spec.revert_on_update {
                    self.kill_target(scope, spec.target);
                }
                let tracks = spec
                    .props
                    .into_iter()
                    .map(|(prop, to)| Track {
                        prop,
                        from: None,
                        to,
                    })
                    .collect();
                self.tweens.push(ActiveTween {
                    scope,
                    target: spec.target,
                    kind: TweenKind::To,
                    tracks,
                    duration: spec.duration,
                    delay: spec.delay,
                    easing: spec.easing,
                    elapsed: 0.0,
                    started: false,
                    on_start: spec.on_start,
                });
            }
            TweenCommand::From(spec) => {
                let rest = if spec.revert_on_update {
                    self.kill_target(scope, spec.target)
                } else {
                    Vec::new()
                };
                let mut tracks = Vec::with_capacity(spec.props.len());
                for (prop, from) in spec.props {
                    // A killed `from` tween still knows where the element rests.
                    let to = rest
                        .iter()
                        .find(|(p, _)| *p == prop)
                        .map(|(_, v)| v.clone())
                        .unwrap_or_else(|| self.value(spec.target, prop));
                    self.write(spec.target, prop, from.clone());
                    tracks.push(Track {
                        prop,
                        from: Some(from),
                        to,
                    });
                }
                self.tweens.push(ActiveTween {
                    scope,
                    target: spec.target,
                    kind: TweenKind::From,
                    tracks,
                    duration: spec.duration,
                    delay: spec.delay,
                    easing: spec.easing,
                    elapsed: 0.0,
                    started: false,
                    on_start: spec.on_start,
                });
            }
        }
    }

    /// Drop in-flight tweens of `scope` on `target`, leaving current values in place.
    /// Returns the resting values of any killed `from` tweens.
    fn kill_target(&mut self, scope: ScopeId, target: Target) -> Vec<(Prop, PropValue)> {
        let mut rest = Vec::new();
        self.tweens.retain(|t| {
            if t.scope != scope || t.target != target {
                return true;
            }
            if t.kind == TweenKind::From {
                rest.extend(t.tracks.iter().map(|tr| (tr.prop, tr.to.clone())));
            }
            log::trace!("revert on update: killed tween on {target}");
            false
        });
        rest
    }

    /// Register a scrubbed animation from `from` to the target's current values.
    pub fn register_scroll_linked(
        &mut self,
        scope: ScopeId,
        target: Target,
        from: Props,
        range: ScrollRange,
        easing: Easing,
    ) {
        let tracks = from
            .into_iter()
            .map(|(prop, start)| {
                let end = self.value(target, prop);
                (prop, start, end)
            })
            .collect();
        let mut link = ScrollLink {
            scope,
            target,
            range,
            easing,
            tracks,
            progress: range.progress(self.scroll_y),
        };
        self.render_link(&mut link);
        self.links.push(link);
    }

    fn render_link(&mut self, link: &mut ScrollLink) {
        link.progress = link.range.progress(self.scroll_y);
        let eased = link.easing.sample(link.progress);
        for (prop, start, end) in &link.tracks {
            self.write(link.target, *prop, start.lerp(end, eased));
        }
    }

    /// Feed a scroll sample to every scroll-linked animation.
    pub fn scroll_to(&mut self, y: f32) {
        self.scroll_y = y;
        let mut links = std::mem::take(&mut self.links);
        for link in &mut links {
            self.render_link(link);
        }
        self.links = links;
    }

    pub fn link_progress(&self, target: Target) -> Option<f32> {
        self.links
            .iter()
            .find(|l| l.target == target)
            .map(|l| l.progress)
    }

    /// Advance every active tween by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        let mut tweens = std::mem::take(&mut self.tweens);

        tweens.retain_mut(|tween| {
            tween.elapsed += dt;
            if tween.elapsed < tween.delay {
                return true;
            }

            if !tween.started {
                tween.started = true;
                for track in &mut tween.tracks {
                    if track.from.is_none() {
                        track.from = Some(self.value(tween.target, track.prop));
                    }
                }
                events.push(EngineEvent::Started {
                    target: tween.target,
                    action: tween.on_start,
                });
            }

            let local = if tween.duration > 0.0 {
                ((tween.elapsed - tween.delay) / tween.duration).min(1.0)
            } else {
                1.0
            };
            let eased = tween.easing.sample(local);
            for track in &tween.tracks {
                let value = match &track.from {
                    Some(from) if local < 1.0 => from.lerp(&track.to, eased),
                    _ => track.to.clone(),
                };
                self.write(tween.target, track.prop, value);
            }

            if local >= 1.0 {
                events.push(EngineEvent::Completed {
                    target: tween.target,
                });
                false
            } else {
                true
            }
        });

        // Commands issued while ticking are impossible here, but keep order stable anyway.
        tweens.append(&mut self.tweens);
        self.tweens = tweens;
        events
    }

    /// Release everything a scope owns. Values already written stay.
    pub fn kill_scope(&mut self, scope: ScopeId) {
        let before = self.tweens.len() + self.links.len();
        self.tweens.retain(|t| t.scope != scope);
        self.links.retain(|l| l.scope != scope);
        let released = before - self.tweens.len() - self.links.len();
        if released > 0 {
            log::debug!("released {released} animation(s) for scope {}", scope.0);
        }
    }
}

impl Default for TweenEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to the engine for the single-threaded presentation loop.
pub type EngineHandle = Rc<RefCell<TweenEngine>>;

pub fn shared_engine() -> EngineHandle {
    Rc::new(RefCell::new(TweenEngine::new()))
}

/// Owns a group of animations for as long as it lives.
///
/// Acquired when a controller becomes active; dropping it kills every tween
/// and scroll link it issued, so no animation outlives its controller.
pub struct AnimationScope {
    id: ScopeId,
    engine: Weak<RefCell<TweenEngine>>,
}

impl AnimationScope {
    pub fn acquire(engine: &EngineHandle) -> Self {
        let id = engine.borrow_mut().allocate_scope();
        Self {
            id,
            engine: Rc::downgrade(engine),
        }
    }

    /// Whether any tween on `target` is still running.
    pub fn is_animating(&self, target: Target) -> bool {
        self.engine
            .upgrade()
            .is_some_and(|engine| engine.borrow().is_animating(target))
    }

    pub fn issue(&self, command: TweenCommand) {
        if let Some(engine) = self.engine.upgrade() {
            engine.borrow_mut().apply(self.id, command);
        }
    }

    pub fn issue_all(&self, commands: impl IntoIterator<Item = TweenCommand>) {
        if let Some(engine) = self.engine.upgrade() {
            let mut engine = engine.borrow_mut();
            for command in commands {
                engine.apply(self.id, command);
            }
        }
    }

    pub fn register_scroll_linked(
        &self,
        target: Target,
        from: Props,
        range: ScrollRange,
        easing: Easing,
    ) {
        if let Some(engine) = self.engine.upgrade() {
            engine
                .borrow_mut()
                .register_scroll_linked(self.id, target, from, range, easing);
        }
    }
}

impl Drop for AnimationScope {
    fn drop(&mut self) {
        let Some(engine) = self.engine.upgrade() else {
            return;
        };
        match engine.try_borrow_mut() {
            Ok(mut engine) => engine.kill_scope(self.id),
            Err(_) => log::warn!("engine busy, scope {} not released", self.id.0),
        };
    }
}
