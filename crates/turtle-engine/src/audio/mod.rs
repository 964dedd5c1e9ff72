//! Audio output and playable sources, backed by `rodio`.
//!
//! When no output device could be opened, sources still load and keep their
//! settings but playback calls do nothing.

mod error;
mod source;

use std::path::Path;

use rodio::{OutputStream, OutputStreamHandle};

use crate::session::ErrorReporter;

pub use error::AudioError;
pub use source::{SourceId, SourceKind};

use source::Source;

struct Device {
    // Dropping the stream stops all output.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

pub struct Audio {
    device: Option<Device>,
    sources: Vec<Option<Source>>,
    master_volume: f32,
    errors: ErrorReporter,
}

impl Audio {
    /// Audio without an output device.
    pub fn disabled(errors: ErrorReporter) -> Self {
        Self { device: None, sources: Vec::new(), master_volume: 1.0, errors }
    }

    /// Opens the default output device.
    pub(crate) fn open_device(&mut self) -> Result<(), AudioError> {
        let (stream, handle) = OutputStream::try_default()?;
        self.device = Some(Device { _stream: stream, handle });
        log::info!("audio device opened");
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.device.is_some()
    }

    /// Loads a sound. On failure the error is raised and `None` returned.
    pub fn new_source(&mut self, path: impl AsRef<Path>, kind: SourceKind) -> Option<SourceId> {
        let path = path.as_ref();
        if !path.is_file() {
            self.errors.raise(format!("Sound file does not exist: {}", path.display()));
            return None;
        }
        match Source::open(path.to_path_buf(), kind) {
            Ok(source) => {
                log::debug!("loaded sound {} ({kind:?})", path.display());
                let id = SourceId(self.sources.len());
                self.sources.push(Some(source));
                Some(id)
            }
            Err(e) => {
                self.errors.raise(format!("Could not load sound {}: {e}", path.display()));
                None
            }
        }
    }

    fn source_mut(&mut self, id: SourceId) -> Option<&mut Source> {
        self.sources.get_mut(id.0).and_then(Option::as_mut)
    }

    fn source(&self, id: SourceId) -> Option<&Source> {
        self.sources.get(id.0).and_then(Option::as_ref)
    }

    fn live_sources(&mut self) -> impl Iterator<Item = &mut Source> {
        self.sources.iter_mut().flatten()
    }

    // ── playback ──────────────────────────────────────────────────────────

    pub fn play(&mut self, id: SourceId) {
        let master = self.master_volume;
        let Some(handle) = self.device.as_ref().map(|d| d.handle.clone()) else {
            log::debug!("play ignored: audio is disabled");
            return;
        };
        let Some(source) = self.source_mut(id) else {
            return;
        };
        if let Err(e) = source.play(&handle, master) {
            log::warn!("could not play sound {id:?}: {e}");
        }
    }

    pub fn pause(&mut self, id: SourceId) {
        if let Some(source) = self.source_mut(id) {
            source.pause();
        }
    }

    pub fn stop(&mut self, id: SourceId) {
        if let Some(source) = self.source_mut(id) {
            source.stop();
        }
    }

    pub fn is_playing(&self, id: SourceId) -> bool {
        self.source(id).is_some_and(Source::is_playing)
    }

    /// Number of sources currently playing.
    pub fn active_source_count(&self) -> usize {
        self.sources.iter().flatten().filter(|s| s.is_playing()).count()
    }

    pub fn pause_all(&mut self) {
        self.live_sources().for_each(Source::pause);
    }

    pub fn stop_all(&mut self) {
        self.live_sources().for_each(Source::stop);
    }

    // ── settings ──────────────────────────────────────────────────────────

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.max(0.0);
        let master = self.master_volume;
        for source in self.live_sources() {
            let v = source.volume();
            source.set_volume(v, master);
        }
    }

    pub fn volume(&self, id: SourceId) -> Option<f32> {
        self.source(id).map(Source::volume)
    }

    pub fn set_volume(&mut self, id: SourceId, volume: f32) {
        let master = self.master_volume;
        if let Some(source) = self.source_mut(id) {
            source.set_volume(volume, master);
        }
    }

    pub fn pitch(&self, id: SourceId) -> Option<f32> {
        self.source(id).map(Source::pitch)
    }

    pub fn set_pitch(&mut self, id: SourceId, pitch: f32) {
        if let Some(source) = self.source_mut(id) {
            source.set_pitch(pitch);
        }
    }

    pub fn is_looping(&self, id: SourceId) -> Option<bool> {
        self.source(id).map(Source::is_looping)
    }

    pub fn set_looping(&mut self, id: SourceId, looping: bool) {
        if let Some(source) = self.source_mut(id) {
            source.set_looping(looping);
        }
    }

    // ── teardown ──────────────────────────────────────────────────────────

    pub fn release_source(&mut self, id: SourceId) -> bool {
        match self.sources.get_mut(id.0).and_then(Option::take) {
            Some(mut source) => {
                source.stop();
                true
            }
            None => false,
        }
    }

    /// Stops and drops every source; returns how many were live.
    pub fn release_sources(&mut self) -> usize {
        let mut count = 0;
        for slot in &mut self.sources {
            if let Some(mut source) = slot.take() {
                source.stop();
                count += 1;
            }
        }
        count
    }

    pub fn live_source_count(&self) -> usize {
        self.sources.iter().flatten().count()
    }

    /// Closes the output device. Sources should be released first.
    pub(crate) fn close(&mut self) {
        if self.device.take().is_some() {
            log::info!("audio device closed");
        }
    }
}
