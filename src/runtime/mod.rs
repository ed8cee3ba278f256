pub mod app;

pub use app::{run_batch_command, run_file_command, ConsoleObserver};
