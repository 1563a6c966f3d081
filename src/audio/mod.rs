//! Audio cues for the story screen
//!
//! Audio is decorative: every load/play/stop failure is logged and
//! swallowed so a playback problem never blocks the slideshow.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Playback seam for the two named cues.
///
/// Cue resources are owned by the screen's lifecycle and released through
/// `stop_all` on teardown.
pub trait CuePlayer {
    /// Start (or restart) the looping ambient track.
    fn play_ambient(&mut self);
    /// Pause ambient and play the rebuild track.
    fn start_rebuild(&mut self);
    /// Stop the rebuild track and resume ambient.
    fn stop_rebuild(&mut self);
    /// Release every cue.
    fn stop_all(&mut self);
}

/// Player that does nothing; used headless and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCuePlayer;

impl CuePlayer for NullCuePlayer {
    fn play_ambient(&mut self) {}
    fn start_rebuild(&mut self) {}
    fn stop_rebuild(&mut self) {}
    fn stop_all(&mut self) {}
}

const TRACK_EXTENSIONS: &[&str] = &[".ogg", ".mp3", ".wav"];

/// Locations of the two bundled tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueAssets {
    pub ambient: PathBuf,
    pub rebuild: PathBuf,
}

impl CueAssets {
    /// Probe `base_dir` for the bundled tracks by name and extension.
    pub fn locate(base_dir: &Path) -> Option<Self> {
        let ambient = find_track(base_dir, &["choir", "ambient"])?;
        let rebuild = find_track(base_dir, &["construction", "rebuild"])?;
        Some(Self { ambient, rebuild })
    }
}

fn find_track(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    for name in names {
        for ext in TRACK_EXTENSIONS {
            let path = dir.join(format!("{name}{ext}"));
            if path.exists() {
                return Some(path);
            }
        }
    }
    None
}

/// rodio-backed player: one looping ambient sink, one rebuild sink.
pub struct RodioCuePlayer {
    _stream: rodio::OutputStream,
    handle: rodio::OutputStreamHandle,
    assets: CueAssets,
    ambient: Option<rodio::Sink>,
    rebuild: Option<rodio::Sink>,
}

impl RodioCuePlayer {
    /// Open the default output device. Returns `None` (logged) when no
    /// device is available, so callers can fall back to `NullCuePlayer`.
    pub fn new(assets: CueAssets) -> Option<Self> {
        match rodio::OutputStream::try_default() {
            Ok((stream, handle)) => Some(Self {
                _stream: stream,
                handle,
                assets,
                ambient: None,
                rebuild: None,
            }),
            Err(err) => {
                log::warn!("audio output unavailable: {err}");
                None
            }
        }
    }

    fn open_sink(&self, path: &Path, looped: bool) -> Option<rodio::Sink> {
        use rodio::Source as _;

        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                log::warn!("cannot open cue {}: {err}", path.display());
                return None;
            }
        };
        let decoder = match rodio::Decoder::new(BufReader::new(file)) {
            Ok(decoder) => decoder,
            Err(err) => {
                log::warn!("cannot decode cue {}: {err}", path.display());
                return None;
            }
        };
        let sink = match rodio::Sink::try_new(&self.handle) {
            Ok(sink) => sink,
            Err(err) => {
                log::warn!("cannot play cue {}: {err}", path.display());
                return None;
            }
        };

        if looped {
            sink.append(decoder.repeat_infinite());
        } else {
            sink.append(decoder);
        }
        Some(sink)
    }
}

impl CuePlayer for RodioCuePlayer {
    fn play_ambient(&mut self) {
        if let Some(old) = self.ambient.take() {
            old.stop();
        }
        self.ambient = self.open_sink(&self.assets.ambient, true);
    }

    fn start_rebuild(&mut self) {
        if let Some(ambient) = &self.ambient {
            ambient.pause();
        }
        if let Some(old) = self.rebuild.take() {
            old.stop();
        }
        self.rebuild = self.open_sink(&self.assets.rebuild, false);
    }

    fn stop_rebuild(&mut self) {
        if let Some(rebuild) = self.rebuild.take() {
            rebuild.stop();
        }
        if let Some(ambient) = &self.ambient {
            ambient.play();
        } else {
            self.play_ambient();
        }
    }

    fn stop_all(&mut self) {
        if let Some(rebuild) = self.rebuild.take() {
            rebuild.stop();
        }
        if let Some(ambient) = self.ambient.take() {
            ambient.stop();
        }
    }
}
