use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::PathBuf;
use std::sync::Arc;

use rodio::{Decoder, OutputStreamHandle, Sink};

use super::AudioError;

/// Opaque handle to a source owned by [`Audio`](super::Audio).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SourceId(pub(crate) usize);

/// How a source keeps its data.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum SourceKind {
    /// The encoded file is read into memory once.
    #[default]
    Static,
    /// The file is reopened and decoded on every play.
    Stream,
}

#[derive(Debug, Clone)]
enum SourceData {
    Memory(Arc<[u8]>),
    File(PathBuf),
}

/// One playable sound and its playback settings.
pub(crate) struct Source {
    data: SourceData,
    volume: f32,
    pitch: f32,
    looping: bool,
    sink: Option<Sink>,
}

impl Source {
    /// Reads `path` according to `kind` and checks that it decodes.
    pub(crate) fn open(path: PathBuf, kind: SourceKind) -> Result<Self, AudioError> {
        let data = match kind {
            SourceKind::Static => SourceData::Memory(std::fs::read(&path)?.into()),
            SourceKind::Stream => SourceData::File(path),
        };
        let source = Self { data, volume: 1.0, pitch: 1.0, looping: false, sink: None };
        source.check_decodes()?;
        Ok(source)
    }

    fn check_decodes(&self) -> Result<(), AudioError> {
        match &self.data {
            SourceData::Memory(bytes) => drop(Decoder::new(Cursor::new(bytes.clone()))?),
            SourceData::File(path) => drop(Decoder::new(BufReader::new(File::open(path)?))?),
        }
        Ok(())
    }

    /// Builds a fresh sink with this source queued, paused.
    fn start(&self, handle: &OutputStreamHandle, master: f32) -> Result<Sink, AudioError> {
        let sink = Sink::try_new(handle)?;
        sink.pause();
        match (&self.data, self.looping) {
            (SourceData::Memory(bytes), false) => {
                sink.append(Decoder::new(Cursor::new(bytes.clone()))?);
            }
            (SourceData::Memory(bytes), true) => {
                sink.append(Decoder::new_looped(Cursor::new(bytes.clone()))?);
            }
            (SourceData::File(path), false) => {
                sink.append(Decoder::new(BufReader::new(File::open(path)?))?);
            }
            (SourceData::File(path), true) => {
                sink.append(Decoder::new_looped(BufReader::new(File::open(path)?))?);
            }
        }
        sink.set_volume(self.volume * master);
        sink.set_speed(self.pitch);
        Ok(sink)
    }

    /// Resumes a paused source, or starts it from the beginning.
    pub(crate) fn play(&mut self, handle: &OutputStreamHandle, master: f32) -> Result<(), AudioError> {
        if let Some(sink) = &self.sink {
            if !sink.empty() {
                sink.play();
                return Ok(());
            }
        }
        let sink = self.start(handle, master)?;
        sink.play();
        self.sink = Some(sink);
        Ok(())
    }

    pub(crate) fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    /// Stops playback and rewinds; the next play starts from the beginning.
    pub(crate) fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| !s.is_paused() && !s.empty())
    }

    pub(crate) fn volume(&self) -> f32 {
        self.volume
    }

    pub(crate) fn set_volume(&mut self, volume: f32, master: f32) {
        self.volume = volume.max(0.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume * master);
        }
    }

    pub(crate) fn pitch(&self) -> f32 {
        self.pitch
    }

    pub(crate) fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.max(f32::EPSILON);
        if let Some(sink) = &self.sink {
            sink.set_speed(self.pitch);
        }
    }

    pub(crate) fn is_looping(&self) -> bool {
        self.looping
    }

    /// Takes effect the next time the source starts from the beginning.
    pub(crate) fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }
}
