use std::collections::BTreeMap;

use crate::media::MediaCycleController;
use crate::media::mask::FrameMask;
use crate::media::types::MediaCommand;
use crate::nav::ScrollNavController;
use crate::settings::SiteConfig;
use crate::shell::script::ShellEvent;
use crate::shell::view::{
    CycleView, FrameView, NavView, PresentationContext, TiltView, TitleView, VideoView,
};
use crate::tween::types::{EngineEvent, Prop, StartAction, Target};
use crate::tween::{EngineHandle, shared_engine};
use crate::ui::tilt::Tilt;
use crate::ui::title::AnimatedTitle;

const AUDIO_ELEMENT: &str = "audio";

/// The landing page: hero reel, navigation, frame mask, headings and cards
/// wired to one shared animation engine.
pub struct App {
    engine: EngineHandle,
    media: MediaCycleController,
    nav: ScrollNavController,
    frame: FrameMask,
    titles: Vec<AnimatedTitle>,
    tilts: BTreeMap<usize, Tilt>,
    audio_source: String,
}

impl App {
    pub fn new(config: &SiteConfig) -> Self {
        let engine = shared_engine();
        let media = MediaCycleController::new(
            config.video_cycle(),
            config.transition.clone(),
            &config.layout,
            config.dedupe_ready_signals,
            &engine,
        );
        let nav = ScrollNavController::new(config.nav.clone(), &engine);
        let frame = FrameMask::mount(&config.frame_mask, &config.layout, &engine);
        let titles = config
            .titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                AnimatedTitle::mount(
                    i,
                    title,
                    &config.title_anim,
                    config.layout.viewport_height,
                    &engine,
                )
            })
            .collect();

        // Settle the mask at the top of the page before the first frame.
        engine.borrow_mut().scroll_to(0.0);

        log::info!(
            "mounted {} clip(s), {} title(s)",
            media.cycle().len(),
            config.titles.len()
        );

        Self {
            engine,
            media,
            nav,
            frame,
            titles,
            tilts: BTreeMap::new(),
            audio_source: config.audio_source.clone(),
        }
    }

    /// Handle one shell input. Returns playback changes the shell must apply.
    pub fn dispatch(&mut self, event: ShellEvent) -> Vec<MediaCommand> {
        match event {
            ShellEvent::Scroll { y } => {
                self.nav.on_scroll(y);
                self.engine.borrow_mut().scroll_to(y);
                for title in &mut self.titles {
                    title.on_scroll(y);
                }
                Vec::new()
            }
            ShellEvent::ClipReady { clip } => {
                self.media.report_clip_ready(clip);
                Vec::new()
            }
            ShellEvent::PreviewClick => {
                self.media.request_advance();
                Vec::new()
            }
            ShellEvent::ToggleAudio => {
                let audio = self.nav.toggle_audio();
                let element = AUDIO_ELEMENT.to_string();
                if audio.is_playing {
                    vec![MediaCommand::Play {
                        element,
                        source: self.audio_source.clone(),
                    }]
                } else {
                    vec![MediaCommand::Pause { element }]
                }
            }
            ShellEvent::Tick { dt } => self.tick(dt),
            ShellEvent::PointerMove { card, x, y, rect } => {
                match Tilt::from_pointer(x, y, &rect) {
                    Some(tilt) => {
                        self.tilts.insert(card, tilt);
                    }
                    None => {
                        self.tilts.remove(&card);
                    }
                }
                Vec::new()
            }
            ShellEvent::PointerLeave { card } => {
                self.tilts.remove(&card);
                Vec::new()
            }
        }
    }

    fn tick(&mut self, dt: f32) -> Vec<MediaCommand> {
        if dt <= 0.0 {
            return Vec::new();
        }
        let events = self.engine.borrow_mut().tick(dt);
        let sources = self.media.display_sources();
        events
            .into_iter()
            .filter_map(|event| match event {
                EngineEvent::Started {
                    action: Some(StartAction::PlayMedia(target)),
                    ..
                } => {
                    let source = match target {
                        Target::PreviewVideo => sources.preview.clone(),
                        _ => sources.transition.clone(),
                    };
                    Some(MediaCommand::Play {
                        element: target.to_string(),
                        source,
                    })
                }
                _ => None,
            })
            .collect()
    }

    /// True while any timed tween is still running.
    pub fn is_animating(&self) -> bool {
        self.engine.borrow().active_tweens() > 0
    }

    pub fn context(&self) -> PresentationContext {
        let engine = self.engine.borrow();
        let state = self.media.state();
        let scroll = self.nav.scroll();

        let video = |target: Target| VideoView {
            visible: engine
                .value(target, Prop::Visibility)
                .as_visible()
                .unwrap_or(true),
            scale: engine.number(target, Prop::Scale),
            width_pct: engine.number(target, Prop::Width),
            height_pct: engine.number(target, Prop::Height),
        };

        let titles = self
            .titles
            .iter()
            .enumerate()
            .map(|(index, title)| TitleView {
                index,
                entered: title.has_entered(),
                trigger_y: title.start_offset(),
                lines: title.lines().to_vec(),
                word_opacity: (0..title.word_count())
                    .map(|word| engine.number(Target::TitleWord { title: index, word }, Prop::Opacity))
                    .collect(),
            })
            .collect();

        PresentationContext {
            is_loading: self.media.is_loading(),
            sources: self.media.display_sources(),
            cycle: CycleView {
                active_index: state.active_index,
                queued_index: state.queued_index,
                loaded_count: state.loaded_count,
                has_transitioned: state.has_transitioned,
            },
            nav: NavView {
                is_visible: scroll.is_visible,
                is_floating: scroll.is_floating,
                direction: scroll.direction,
                translate_y: engine.number(Target::NavContainer, Prop::TranslateY),
                opacity: engine.number(Target::NavContainer, Prop::Opacity),
            },
            audio: self.nav.audio(),
            transition_video: video(Target::TransitionVideo),
            preview_video: video(Target::PreviewVideo),
            frame: FrameView {
                clip_path: engine.value(Target::VideoFrame, Prop::ClipPath).to_string(),
                border_radius: engine
                    .value(Target::VideoFrame, Prop::BorderRadius)
                    .to_string(),
                progress: engine.link_progress(Target::VideoFrame).unwrap_or(0.0),
                scroll_start: self.frame.range().start,
                scroll_end: self.frame.range().end,
            },
            titles,
            tilts: self
                .tilts
                .iter()
                .map(|(&card, tilt)| TiltView {
                    card,
                    transform: tilt.css(),
                })
                .collect(),
        }
    }
}
