/// Sync pass reporting types
use serde::{Deserialize, Serialize};

/// What triggered a sync pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncTrigger {
    Manual,    // One-shot invocation from the CLI
    Scheduled, // Watch loop tick
}

/// Per-file outcome of a sync pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileAction {
    /// File was downloaded and renamed into place
    Downloaded,
    /// Manifest entry matched the remote entry; no network transfer
    SkippedUnchanged,
    /// Download or local write failed; the pass continued
    Failed { reason: String },
}

/// Outcome for a single remote file within one pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Device-side path of the file
    pub uri: String,
    pub action: FileAction,
}

impl FileOutcome {
    pub fn downloaded(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            action: FileAction::Downloaded,
        }
    }

    pub fn skipped(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            action: FileAction::SkippedUnchanged,
        }
    }

    pub fn failed(uri: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            action: FileAction::Failed {
                reason: reason.into(),
            },
        }
    }
}

/// Summary of one completed sync pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassReport {
    pub trigger: SyncTrigger,
    pub started_at: String,
    pub completed_at: String,
    pub duration_seconds: u64,
    pub files_listed: usize,
    pub outcomes: Vec<FileOutcome>,
}

impl PassReport {
    /// Number of files downloaded in this pass.
    pub fn downloaded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.action == FileAction::Downloaded)
            .count()
    }

    /// Number of files skipped as unchanged.
    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.action == FileAction::SkippedUnchanged)
            .count()
    }

    /// Number of files that failed.
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.action, FileAction::Failed { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let report = PassReport {
            trigger: SyncTrigger::Manual,
            started_at: "2024-01-01T00:00:00Z".to_string(),
            completed_at: "2024-01-01T00:00:05Z".to_string(),
            duration_seconds: 5,
            files_listed: 3,
            outcomes: vec![
                FileOutcome::downloaded("/a.note"),
                FileOutcome::skipped("/b.note"),
                FileOutcome::failed("/c.note", "connection reset"),
            ],
        };

        assert_eq!(report.downloaded(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn test_action_serializes_snake_case() {
        let json = serde_json::to_string(&FileAction::SkippedUnchanged).unwrap();
        assert_eq!(json, "\"skipped_unchanged\"");
    }
}
