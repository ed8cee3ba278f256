pub mod artifact;
pub mod format;

pub use artifact::write_transcript;
pub use format::{default_single_output, render_console, OutputFormat, TranscriptRecord};
