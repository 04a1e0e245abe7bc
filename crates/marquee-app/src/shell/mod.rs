pub mod script;
pub mod view;

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::Context;
use crossbeam_channel::{RecvTimeoutError, bounded};

use crate::app::App;
use crate::media::types::MediaCommand;
use crate::settings::SiteConfig;
use script::ShellEvent;
use view::ShellFrame;

const EVENT_QUEUE: usize = 256;
/// Upper bound on frames emitted while letting animations finish after input ends.
const MAX_DRAIN_FRAMES: u32 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellOptions {
    /// Tick at the configured frame rate between events instead of
    /// waiting for explicit `tick` events.
    pub realtime: bool,
    pub frame_rate: u32,
}

impl ShellOptions {
    pub fn from_config(config: &SiteConfig, realtime: bool) -> Self {
        Self {
            realtime,
            frame_rate: config.frame_rate.max(1),
        }
    }

    fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }
}

/// Writes one JSON line per handled input.
struct FrameWriter<W: Write> {
    out: W,
    seq: u64,
}

impl<W: Write> FrameWriter<W> {
    fn emit(&mut self, app: &App, media: Vec<MediaCommand>) -> anyhow::Result<()> {
        let frame = ShellFrame {
            seq: self.seq,
            media,
            view: app.context(),
        };
        let line = serde_json::to_string(&frame).context("failed to encode frame")?;
        writeln!(self.out, "{line}").context("failed to write frame")?;
        self.seq += 1;
        Ok(())
    }
}

/// Drive the page from a JSON-lines event stream, writing frames to `out`.
///
/// Returns the number of frames written.
pub fn run<R, W>(config: &SiteConfig, input: R, out: W, options: ShellOptions) -> anyhow::Result<u64>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    let (tx, rx) = bounded::<ShellEvent>(EVENT_QUEUE);
    let reader = script::spawn_reader(input, tx)?;

    let mut app = App::new(config);
    let mut writer = FrameWriter { out, seq: 0 };
    writer.emit(&app, Vec::new())?;

    if options.realtime {
        let interval = Duration::from_secs_f32(options.frame_dt());
        loop {
            match rx.recv_timeout(interval) {
                Ok(event) => {
                    let media = app.dispatch(event);
                    writer.emit(&app, media)?;
                }
                Err(RecvTimeoutError::Timeout) => {
                    if app.is_animating() {
                        let media = app.dispatch(ShellEvent::Tick {
                            dt: options.frame_dt(),
                        });
                        writer.emit(&app, media)?;
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        drain(&mut app, &mut writer, options.frame_dt())?;
    } else {
        for event in &rx {
            let media = app.dispatch(event);
            writer.emit(&app, media)?;
        }
    }

    if reader.join().is_err() {
        log::error!("event reader thread panicked");
    }
    writer.out.flush().context("failed to flush frames")?;
    log::info!("shell finished after {} frame(s)", writer.seq);
    Ok(writer.seq)
}

fn drain<W: Write>(app: &mut App, writer: &mut FrameWriter<W>, dt: f32) -> anyhow::Result<()> {
    let mut frames = 0;
    while app.is_animating() && frames < MAX_DRAIN_FRAMES {
        let media = app.dispatch(ShellEvent::Tick { dt });
        writer.emit(app, media)?;
        frames += 1;
    }
    if app.is_animating() {
        log::warn!("animations still running after {MAX_DRAIN_FRAMES} drain frames");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn frames(output: &[u8]) -> Vec<serde_json::Value> {
        String::from_utf8_lossy(output)
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn scripted_run_emits_one_frame_per_event() {
        let script = "\
{\"event\":\"clip_ready\",\"clip\":1}
{\"event\":\"clip_ready\",\"clip\":2}
{\"event\":\"clip_ready\",\"clip\":3}
# comment
{\"event\":\"toggle_audio\"}
";
        let mut out = Vec::new();
        let config = SiteConfig::default();
        let written = run(
            &config,
            Cursor::new(script.to_string()),
            &mut out,
            ShellOptions::from_config(&config, false),
        )
        .unwrap();
        assert_eq!(written, 5);

        let frames = frames(&out);
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[0]["seq"], 0);
        assert_eq!(frames[0]["view"]["is_loading"], true);
        assert_eq!(frames[3]["view"]["is_loading"], false);
        assert!(frames[3].get("media").is_none());
        assert_eq!(frames[4]["media"][0]["action"], "play");
        assert_eq!(frames[4]["media"][0]["source"], "audio/loop.mp3");
    }

    #[test]
    fn realtime_run_finishes_transition_after_input_ends() {
        let mut out = Vec::new();
        let config = SiteConfig::default();
        run(
            &config,
            Cursor::new("{\"event\":\"preview_click\"}\n".to_string()),
            &mut out,
            ShellOptions::from_config(&config, true),
        )
        .unwrap();

        let frames = frames(&out);
        let played = frames
            .iter()
            .filter_map(|f| f.get("media"))
            .flat_map(|m| m.as_array().cloned().unwrap_or_default())
            .filter(|m| m["element"] == "#next-video")
            .count();
        assert_eq!(played, 1);

        let last = frames.last().unwrap();
        assert_eq!(last["view"]["cycle"]["active_index"], 2);
        assert_eq!(last["view"]["transition_video"]["width_pct"], 100.0);
    }

    #[test]
    fn empty_input_still_emits_mount_frame() {
        let mut out = Vec::new();
        let config = SiteConfig::default();
        let written = run(
            &config,
            Cursor::new(String::new()),
            &mut out,
            ShellOptions::from_config(&config, false),
        )
        .unwrap();
        assert_eq!(written, 1);
        assert_eq!(frames(&out)[0]["view"]["sources"]["preview"], "videos/hero-2.mp4");
    }
}
