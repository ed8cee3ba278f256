use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use crate::batch::request::TranscriptionRequest;
use crate::batch::summary::RunSummary;
use crate::models::ModelSize;
use crate::output::artifact::write_transcript;
use crate::transcription::TranscriptionService;

/// Terminal state of one item. Items move `Pending -> Running -> terminal`;
/// `item_started` marks the running transition, `item_finished` the terminal
/// one. Terminal states are final: no retries, no mid-item cancellation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemStatus {
    Succeeded { text: String, artifact: PathBuf },
    Failed { reason: String },
}

impl ItemStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ItemStatus::Succeeded { .. })
    }
}

/// Produced exactly once per request; immutable thereafter.
#[derive(Debug, Clone, Serialize)]
pub struct ItemReport {
    pub input: PathBuf,
    #[serde(flatten)]
    pub status: ItemStatus,
    pub elapsed_ms: u64,
}

/// Progress seam so per-item outcomes are observable while the run is still
/// going, not only in the final summary.
pub trait BatchObserver {
    fn item_started(&mut self, index: usize, total: usize, input: &Path);
    fn item_finished(&mut self, index: usize, total: usize, report: &ItemReport);
}

pub struct NoopObserver;

impl BatchObserver for NoopObserver {
    fn item_started(&mut self, _index: usize, _total: usize, _input: &Path) {}
    fn item_finished(&mut self, _index: usize, _total: usize, _report: &ItemReport) {}
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub run_id: String,
    pub model: ModelSize,
    pub items: Vec<ItemReport>,
    pub summary: RunSummary,
}

/// Runs the batch strictly sequentially, in input order, against a single
/// model handle. A failing item is recorded and the run continues; nothing an
/// individual item does can abort the batch.
pub fn run_batch(
    service: &dyn TranscriptionService,
    requests: &[TranscriptionRequest],
    observer: &mut dyn BatchObserver,
) -> BatchReport {
    let run_id = uuid::Uuid::new_v4().to_string();
    let total = requests.len();
    let started = Instant::now();
    let mut items = Vec::with_capacity(total);

    tracing::info!(%run_id, total, model = %service.model(), "batch run started");

    for (index, request) in requests.iter().enumerate() {
        observer.item_started(index, total, &request.input);
        let item_started = Instant::now();

        let status = process_item(service, request);
        let report = ItemReport {
            input: request.input.clone(),
            status,
            elapsed_ms: item_started.elapsed().as_millis() as u64,
        };

        match &report.status {
            ItemStatus::Succeeded { artifact, .. } => {
                tracing::info!(input = %request.input.display(), artifact = %artifact.display(), "item succeeded");
            }
            ItemStatus::Failed { reason } => {
                tracing::warn!(input = %request.input.display(), %reason, "item failed");
            }
        }

        observer.item_finished(index, total, &report);
        items.push(report);
    }

    let summary = RunSummary::from_items(&items, started.elapsed());
    tracing::info!(
        %run_id,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "batch run finished"
    );

    BatchReport {
        run_id,
        model: service.model(),
        items,
        summary,
    }
}

fn process_item(service: &dyn TranscriptionService, request: &TranscriptionRequest) -> ItemStatus {
    if !request.input.exists() {
        return ItemStatus::Failed {
            reason: format!("not found: {}", request.input.display()),
        };
    }

    let transcript = match service.transcribe(&request.input) {
        Ok(transcript) => transcript,
        Err(error) => {
            return ItemStatus::Failed {
                reason: error.to_string(),
            }
        }
    };

    let text = transcript.text.trim().to_owned();
    let artifact = request.artifact_path();
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    match write_transcript(
        &artifact,
        &request.source_name(),
        service.model().label(),
        &generated_at,
        &text,
    ) {
        Ok(()) => ItemStatus::Succeeded { text, artifact },
        Err(error) => ItemStatus::Failed {
            reason: error.to_string(),
        },
    }
}
