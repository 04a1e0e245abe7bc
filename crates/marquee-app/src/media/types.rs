use serde::Serialize;

/// Placeholder the source template must contain.
pub const INDEX_PLACEHOLDER: &str = "{index}";

/// Ordered, cyclic set of looping hero clips addressed 1..=len.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoCycle {
    len: usize,
    template: String,
}

impl VideoCycle {
    /// `len` is clamped to at least one clip.
    pub fn new(len: usize, template: impl Into<String>) -> Self {
        Self {
            len: len.max(1),
            template: template.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Clip that follows `index`, wrapping from the last back to 1.
    pub fn next_after(&self, index: usize) -> usize {
        (index % self.len) + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        (1..=self.len).contains(&index)
    }

    /// Source path for a clip, e.g. `videos/hero-2.mp4`.
    pub fn source(&self, index: usize) -> String {
        self.template.replace(INDEX_PLACEHOLDER, &index.to_string())
    }
}

impl Default for VideoCycle {
    fn default() -> Self {
        Self::new(4, "videos/hero-{index}.mp4")
    }
}

/// Which clip each of the three hero video elements shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplaySources {
    /// Autoplaying full-bleed background.
    pub background: String,
    /// Miniature preview inside the click target: the queued clip.
    pub preview: String,
    /// Overlay that grows to fill the frame on advance: the active clip.
    pub transition: String,
}

/// Playback instruction for a video or audio element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MediaCommand {
    Play { element: String, source: String },
    Pause { element: String },
}
