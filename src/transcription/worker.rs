use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, TryRecvError};

use crate::error::{AppError, AppResult};
use crate::transcription::engine::{Transcript, TranscriptionService};

/// Handle to one in-flight background transcription.
///
/// The worker is fire-and-forget: it runs exactly one transcription and
/// delivers exactly one completion message over a capacity-1 channel. There
/// is no cancellation; an interactive surface polls `try_result` from its own
/// event loop to stay responsive while the model call runs.
pub struct TranscriptionTask {
    receiver: Receiver<Result<Transcript, String>>,
}

impl TranscriptionTask {
    /// Non-blocking poll. `None` while the worker is still running.
    pub fn try_result(&self) -> AppResult<Option<Result<Transcript, String>>> {
        match self.receiver.try_recv() {
            Ok(result) => Ok(Some(result)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(AppError::ChannelClosed(
                "transcription worker exited without reporting".to_owned(),
            )),
        }
    }

    /// Blocks until the worker reports.
    pub fn wait(self) -> AppResult<Result<Transcript, String>> {
        self.receiver.recv().map_err(|_| {
            AppError::ChannelClosed("transcription worker exited without reporting".to_owned())
        })
    }
}

/// Spawns the background worker. The error side crosses the channel as a
/// string so the receiving surface only ever sees display text.
pub fn spawn_transcription(
    service: Arc<dyn TranscriptionService>,
    audio_path: PathBuf,
) -> AppResult<TranscriptionTask> {
    let (result_tx, result_rx) = crossbeam_channel::bounded(1);

    thread::Builder::new()
        .name("voxscribe-worker".to_owned())
        .spawn(move || {
            let result = service
                .transcribe(&audio_path)
                .map_err(|error| error.to_string());
            let _ = result_tx.send(result);
        })
        .map_err(|error| {
            AppError::Transcription(format!("failed to spawn worker thread: {error}"))
        })?;

    Ok(TranscriptionTask {
        receiver: result_rx,
    })
}
