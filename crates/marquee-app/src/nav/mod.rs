pub mod audio;
pub mod effects;
pub mod scroll;

use crate::settings::NavConfig;
use crate::tween::{AnimationScope, EngineHandle};
use audio::AudioState;
use scroll::ScrollState;

/// Scroll-reactive navigation chrome plus its ambient audio toggle.
pub struct ScrollNavController {
    scroll: ScrollState,
    audio: AudioState,
    config: NavConfig,
    scope: AnimationScope,
}

impl ScrollNavController {
    pub fn new(config: NavConfig, engine: &EngineHandle) -> Self {
        Self {
            scroll: ScrollState::default(),
            audio: AudioState::default(),
            config,
            scope: AnimationScope::acquire(engine),
        }
    }

    pub fn scroll(&self) -> ScrollState {
        self.scroll
    }

    pub fn audio(&self) -> AudioState {
        self.audio
    }

    /// Feed one scroll sample. Returns true when the displayed flags changed.
    pub fn on_scroll(&mut self, y: f32) -> bool {
        let prev = self.scroll;
        self.scroll = prev.reduce(y);
        let commands = effects::nav_commands(&prev, &self.scroll, &self.config);
        let changed = !commands.is_empty();
        if changed {
            log::debug!(
                "nav {:?} at y={y}: visible={} floating={}",
                self.scroll.direction,
                self.scroll.is_visible,
                self.scroll.is_floating
            );
        }
        self.scope.issue_all(commands);
        changed
    }

    pub fn toggle_audio(&mut self) -> AudioState {
        self.audio = self.audio.toggled();
        log::debug!("ambient audio playing={}", self.audio.is_playing);
        self.audio
    }
}
