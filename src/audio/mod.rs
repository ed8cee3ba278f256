pub mod decode;

pub use decode::{decode_audio, WHISPER_SAMPLE_RATE};
