use serde::Serialize;

/// Ambient loop toggle. Playback and indicator bars always flip together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AudioState {
    pub is_playing: bool,
    pub indicator_active: bool,
}

impl AudioState {
    pub fn toggled(self) -> Self {
        Self {
            is_playing: !self.is_playing,
            indicator_active: !self.indicator_active,
        }
    }
}
