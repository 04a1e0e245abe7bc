use serde::Serialize;

use crate::media::types::{DisplaySources, MediaCommand};
use crate::nav::audio::AudioState;
use crate::nav::scroll::ScrollDirection;

/// Everything the shell needs to render one frame.
///
/// Controllers never touch markup; the shell reads this and applies it.
#[derive(Debug, Clone, Serialize)]
pub struct PresentationContext {
    pub is_loading: bool,
    pub sources: DisplaySources,
    pub cycle: CycleView,
    pub nav: NavView,
    pub audio: AudioState,
    pub transition_video: VideoView,
    pub preview_video: VideoView,
    pub frame: FrameView,
    pub titles: Vec<TitleView>,
    pub tilts: Vec<TiltView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CycleView {
    pub active_index: usize,
    pub queued_index: usize,
    pub loaded_count: u32,
    pub has_transitioned: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavView {
    pub is_visible: bool,
    pub is_floating: bool,
    pub direction: ScrollDirection,
    pub translate_y: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoView {
    pub visible: bool,
    pub scale: f32,
    pub width_pct: f32,
    pub height_pct: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameView {
    pub clip_path: String,
    pub border_radius: String,
    pub progress: f32,
    /// Scroll offsets where the mask starts and finishes closing.
    pub scroll_start: f32,
    pub scroll_end: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleView {
    pub index: usize,
    pub entered: bool,
    /// Scroll offset at which the words play in.
    pub trigger_y: f32,
    pub lines: Vec<Vec<String>>,
    pub word_opacity: Vec<f32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TiltView {
    pub card: usize,
    pub transform: String,
}

/// One line of shell output.
#[derive(Debug, Clone, Serialize)]
pub struct ShellFrame {
    pub seq: u64,
    /// Playback changes produced while handling the input.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaCommand>,
    pub view: PresentationContext,
}
