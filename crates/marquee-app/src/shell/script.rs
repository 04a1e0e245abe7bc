use std::io::BufRead;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use serde::Deserialize;

use crate::ui::tilt::CardRect;

/// Raw input forwarded by the presentation shell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ShellEvent {
    /// Window scroll offset sample.
    Scroll { y: f32 },
    /// A video element can play. `clip` identifies it when known.
    ClipReady {
        #[serde(default)]
        clip: Option<usize>,
    },
    /// Preview control activated.
    PreviewClick,
    ToggleAudio,
    /// Advance animations by `dt` seconds.
    Tick { dt: f32 },
    PointerMove {
        card: usize,
        x: f32,
        y: f32,
        rect: CardRect,
    },
    PointerLeave { card: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },
    #[error("failed to read event script: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<ShellEvent>, ScriptError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|source| ScriptError::Parse {
            line: line_no,
            source,
        })
}

/// Spawn a thread that streams parsed events into `tx` until the input ends.
///
/// Dropping the sender on exit is the end-of-script signal for the consumer.
pub fn spawn_reader<R>(reader: R, tx: Sender<ShellEvent>) -> anyhow::Result<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    let handle = thread::Builder::new()
        .name("marquee-script".into())
        .spawn(move || {
            let mut sent = 0usize;
            for (i, line) in reader.lines().enumerate() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        log::error!("{}", ScriptError::from(e));
                        break;
                    }
                };
                match parse_line(i + 1, &line) {
                    Ok(Some(event)) => {
                        if tx.send(event).is_err() {
                            log::debug!("event consumer gone, stopping reader");
                            break;
                        }
                        sent += 1;
                    }
                    Ok(None) => {}
                    Err(e) => log::warn!("skipping event: {e}"),
                }
            }
            log::info!("event script finished ({sent} events)");
        })?;
    Ok(handle)
}
