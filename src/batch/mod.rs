pub mod discover;
pub mod driver;
pub mod request;
pub mod summary;

pub use discover::{discover_audio_files, AUDIO_EXTENSIONS};
pub use driver::{run_batch, BatchObserver, BatchReport, ItemReport, ItemStatus, NoopObserver};
pub use request::TranscriptionRequest;
pub use summary::RunSummary;
