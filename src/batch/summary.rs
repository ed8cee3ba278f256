use std::time::Duration;

use serde::Serialize;

use crate::batch::driver::ItemReport;

/// Aggregate view of a finished run, derived read-only from the item reports.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub elapsed_seconds: f64,
    /// Omitted entirely for zero-item runs; never NaN.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_seconds: Option<f64>,
}

impl RunSummary {
    pub fn from_items(items: &[ItemReport], elapsed: Duration) -> Self {
        let total = items.len();
        let succeeded = items.iter().filter(|item| item.status.is_success()).count();
        let elapsed_seconds = elapsed.as_secs_f64();
        let average_seconds = (total > 0).then(|| elapsed_seconds / total as f64);

        Self {
            total,
            succeeded,
            failed: total - succeeded,
            elapsed_seconds,
            average_seconds,
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&"=".repeat(50));
        out.push('\n');
        out.push_str("BATCH TRANSCRIPTION COMPLETE\n");
        out.push_str(&"=".repeat(50));
        out.push('\n');
        out.push_str(&format!("Total files processed: {}\n", self.total));
        out.push_str(&format!("Successful: {}\n", self.succeeded));
        out.push_str(&format!("Failed: {}\n", self.failed));
        out.push_str(&format!("Total time: {:.2} seconds\n", self.elapsed_seconds));
        if let Some(average) = self.average_seconds {
            out.push_str(&format!("Average time per file: {average:.2} seconds\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::RunSummary;
    use crate::batch::driver::{ItemReport, ItemStatus};
    use std::path::PathBuf;
    use std::time::Duration;

    fn item(success: bool) -> ItemReport {
        ItemReport {
            input: PathBuf::from("clip.wav"),
            status: if success {
                ItemStatus::Succeeded {
                    text: "hi".to_owned(),
                    artifact: PathBuf::from("clip_transcript.txt"),
                }
            } else {
                ItemStatus::Failed {
                    reason: "boom".to_owned(),
                }
            },
            elapsed_ms: 10,
        }
    }

    #[test]
    fn counts_always_reconcile() {
        let items = vec![item(true), item(false), item(true)];
        let summary = RunSummary::from_items(&items, Duration::from_secs(6));

        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.succeeded + summary.failed, summary.total);
        assert_eq!(summary.average_seconds, Some(2.0));
    }

    #[test]
    fn zero_items_omit_the_average_instead_of_dividing() {
        let summary = RunSummary::from_items(&[], Duration::from_secs(1));

        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_seconds, None);
        assert!(!summary.render_text().contains("Average"));

        let json = serde_json::to_value(&summary).expect("serialize");
        assert!(json.get("average_seconds").is_none());
    }

    #[test]
    fn rendered_summary_lists_every_count() {
        let items = vec![item(true), item(false)];
        let summary = RunSummary::from_items(&items, Duration::from_millis(500));
        let text = summary.render_text();

        assert!(text.contains("BATCH TRANSCRIPTION COMPLETE"));
        assert!(text.contains("Total files processed: 2"));
        assert!(text.contains("Successful: 1"));
        assert!(text.contains("Failed: 1"));
        assert!(text.contains("Average time per file: 0.25 seconds"));
    }
}
