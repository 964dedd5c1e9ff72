/// Failures inside the audio backend.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    Device(#[from] rodio::StreamError),
    #[error("could not create audio sink: {0}")]
    Sink(#[from] rodio::PlayError),
    #[error("could not decode sound: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
    #[error("could not read sound: {0}")]
    Io(#[from] std::io::Error),
}
