use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::media::types::{INDEX_PLACEHOLDER, VideoCycle};
use crate::tween::easing::Easing;
use crate::tween::scroll::{Anchor, TriggerPoint};
use crate::tween::types::{ClipPolygon, CornerRadii};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("clip_count must be at least 1")]
    NoClips,
    #[error("source_template {0:?} has no {{index}} placeholder")]
    Template(String),
}

/// Hero clip swap timings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Overlay grow-to-fill duration, seconds.
    pub grow_secs: f32,
    /// Preview scale-in duration, seconds.
    pub shrink_secs: f32,
    pub easing: Easing,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            grow_secs: 1.0,
            shrink_secs: 1.5,
            easing: Easing::Power1InOut,
        }
    }
}

/// Navigation slide/fade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Vertical offset of the hidden nav, px.
    pub hidden_offset: f32,
    pub duration_secs: f32,
    pub easing: Easing,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            hidden_offset: -100.0,
            duration_secs: 0.2,
            easing: Easing::default(),
        }
    }
}

/// Viewport and hero geometry the shell renders into.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Edge of the square preview control, px.
    pub preview_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            preview_size: 256.0,
        }
    }
}

impl LayoutConfig {
    /// Preview box as percent of the full-viewport hero frame.
    pub fn preview_percent(&self) -> (f32, f32) {
        (
            self.preview_size / self.viewport_width.max(1.0) * 100.0,
            self.preview_size / self.viewport_height.max(1.0) * 100.0,
        )
    }
}

/// Scroll-scrubbed mask on the hero frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameMaskConfig {
    /// Shape the frame settles into once scrolled past the end trigger.
    pub clip: ClipPolygon,
    pub radius: CornerRadii,
    pub start: TriggerPoint,
    pub end: TriggerPoint,
    pub easing: Easing,
}

impl Default for FrameMaskConfig {
    fn default() -> Self {
        Self {
            clip: ClipPolygon::new(&[[14.0, 0.0], [72.0, 0.0], [90.0, 90.0], [0.0, 100.0]]),
            radius: CornerRadii([0.0, 0.0, 40.0, 10.0]),
            start: TriggerPoint::new(Anchor::Center, Anchor::Bottom),
            end: TriggerPoint::new(Anchor::Bottom, Anchor::Center),
            easing: Easing::Power1InOut,
        }
    }
}

/// A heading that animates word by word when scrolled into view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleConfig {
    /// Words separated by spaces, lines by `<br />`. Inline markup is kept.
    pub text: String,
    /// Document offset of the heading, px.
    pub top: f32,
    pub height: f32,
}

fn default_titles() -> Vec<TitleConfig> {
    vec![
        TitleConfig {
            text: "Disc<b>o</b>ver the world's <br /> largest shared <b>a</b>dventure".into(),
            top: 900.0,
            height: 180.0,
        },
        TitleConfig {
            text: "let<b>'</b>s b<b>u</b>ild the <br /> new era of <br /> g<b>a</b>ming t<b>o</b>gether."
                .into(),
            top: 3200.0,
            height: 260.0,
        },
    ]
}

/// Word entrance timings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleAnimConfig {
    pub word_secs: f32,
    pub stagger_secs: f32,
    pub easing: Easing,
    pub start: TriggerPoint,
}

impl Default for TitleAnimConfig {
    fn default() -> Self {
        Self {
            word_secs: 0.5,
            stagger_secs: 0.02,
            easing: Easing::Power2InOut,
            start: TriggerPoint::new(Anchor::Offset(100.0), Anchor::Bottom),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub version: u32,
    pub clip_count: usize,
    /// Clip path with an `{index}` placeholder.
    pub source_template: String,
    /// Ambient loop behind the nav audio toggle.
    pub audio_source: String,
    /// Count repeated ready signals from the same clip only once.
    pub dedupe_ready_signals: bool,
    /// Ticks per second in realtime mode.
    pub frame_rate: u32,
    pub transition: TransitionConfig,
    pub nav: NavConfig,
    pub layout: LayoutConfig,
    pub frame_mask: FrameMaskConfig,
    pub title_anim: TitleAnimConfig,
    pub titles: Vec<TitleConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            version: 1,
            clip_count: 4,
            source_template: "videos/hero-{index}.mp4".to_string(),
            audio_source: "audio/loop.mp3".to_string(),
            dedupe_ready_signals: false,
            frame_rate: 60,
            transition: TransitionConfig::default(),
            nav: NavConfig::default(),
            layout: LayoutConfig::default(),
            frame_mask: FrameMaskConfig::default(),
            title_anim: TitleAnimConfig::default(),
            titles: default_titles(),
        }
    }
}

impl SiteConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("marquee").join("site.json"))
    }

    /// Load from the user config dir, falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using default site config");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::info!("loaded site config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clip_count == 0 {
            return Err(ConfigError::NoClips);
        }
        if !self.source_template.contains(INDEX_PLACEHOLDER) {
            return Err(ConfigError::Template(self.source_template.clone()));
        }
        Ok(())
    }

    pub fn video_cycle(&self) -> VideoCycle {
        VideoCycle::new(self.clip_count, self.source_template.clone())
    }

    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
