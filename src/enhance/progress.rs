use crate::models::{EnhancementKind, Note, SummaryStatus};
use std::collections::HashMap;

/// A generation still running after this long is shown as "taking longer than expected".
pub(crate) const STUCK_AFTER_MS: i64 = 120_000;

// Simulated progress rises towards the ceiling and never reaches 100 on its own.
const PROGRESS_CEILING: f64 = 95.0;
const PROGRESS_TIME_CONSTANT_MS: f64 = 20_000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GenerationPhase {
    Idle,
    Running { progress: u8 },
    Stuck,
}

impl GenerationPhase {
    pub fn is_active(self) -> bool {
        !matches!(self, GenerationPhase::Idle)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Watch {
    started_ms: i64,
    /// Generation timestamp of the variant when the job started; the job is done once it moves.
    baseline: Option<String>,
    /// The backend reported the summary as generating or pending since the watch started.
    saw_busy: bool,
}

/// Client-side view of in-flight enrichment jobs.
///
/// The backend reports an explicit status only for the summary. Every other job is tracked from
/// the moment the user requested it until the variant's generation timestamp changes, the user
/// cancels, or the request fails.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct GenerationTracker {
    watches: HashMap<EnhancementKind, Watch>,
}

impl GenerationTracker {
    pub fn requested(&mut self, kind: EnhancementKind, note: &Note, now_ms: i64) {
        self.watches.insert(
            kind,
            Watch {
                started_ms: now_ms,
                baseline: note.generated_at(kind.content_type()).map(str::to_string),
                saw_busy: false,
            },
        );
    }

    /// Reconcile with a fresh note snapshot.
    pub fn sync(&mut self, note: &Note, now_ms: i64) {
        match note.summary_status {
            Some(SummaryStatus::Generating) | Some(SummaryStatus::Pending) => {
                self.watches
                    .entry(EnhancementKind::Summarize)
                    .or_insert_with(|| Watch {
                        started_ms: now_ms,
                        baseline: note.summary_generated_at.clone(),
                        saw_busy: false,
                    })
                    .saw_busy = true;
            }
            Some(SummaryStatus::Failed) => {
                self.watches.remove(&EnhancementKind::Summarize);
            }
            // A completed status left over from an earlier run does not finish a new request.
            Some(SummaryStatus::Completed) => {
                let finished = self
                    .watches
                    .get(&EnhancementKind::Summarize)
                    .is_some_and(|w| w.saw_busy);
                if finished {
                    self.watches.remove(&EnhancementKind::Summarize);
                }
            }
            None => {}
        }

        let summary_busy = matches!(
            note.summary_status,
            Some(SummaryStatus::Generating) | Some(SummaryStatus::Pending)
        );

        self.watches.retain(|kind, w| {
            if *kind == EnhancementKind::Summarize && summary_busy {
                return true;
            }
            let current = note.generated_at(kind.content_type());
            current.map(str::trim).filter(|t| !t.is_empty()).is_none()
                || current == w.baseline.as_deref()
        });
    }

    /// Drop a job the user dismissed or that failed to start. Returns whether it was tracked.
    pub fn cancel(&mut self, kind: EnhancementKind) -> bool {
        self.watches.remove(&kind).is_some()
    }

    pub fn clear(&mut self) {
        self.watches.clear();
    }

    pub fn is_busy(&self) -> bool {
        !self.watches.is_empty()
    }

    pub fn phase(&self, kind: EnhancementKind, now_ms: i64) -> GenerationPhase {
        let Some(w) = self.watches.get(&kind) else {
            return GenerationPhase::Idle;
        };

        let elapsed = (now_ms - w.started_ms).max(0);
        if elapsed >= STUCK_AFTER_MS {
            return GenerationPhase::Stuck;
        }

        let ratio = 1.0 - (-(elapsed as f64) / PROGRESS_TIME_CONSTANT_MS).exp();
        GenerationPhase::Running {
            progress: (PROGRESS_CEILING * ratio).floor() as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note() -> Note {
        Note {
            id: "n1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_idle_when_nothing_requested() {
        let t = GenerationTracker::default();
        assert_eq!(t.phase(EnhancementKind::Summarize, 0), GenerationPhase::Idle);
        assert!(!t.is_busy());
    }

    #[test]
    fn test_progress_rises_but_stays_below_ceiling() {
        let mut t = GenerationTracker::default();
        t.requested(EnhancementKind::ImproveClarity, &note(), 1_000);

        let p = |now| match t.phase(EnhancementKind::ImproveClarity, now) {
            GenerationPhase::Running { progress } => progress,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(p(1_000), 0);
        assert!(p(11_000) > 0);
        assert!(p(61_000) > p(11_000));
        assert!(p(1_000 + STUCK_AFTER_MS - 1) < 100);
    }

    #[test]
    fn test_generating_summary_becomes_stuck_after_threshold() {
        let n = Note {
            summary_status: Some(SummaryStatus::Generating),
            ..note()
        };
        let mut t = GenerationTracker::default();
        t.sync(&n, 5_000);
        assert!(t.phase(EnhancementKind::Summarize, 5_000).is_active());

        // Later snapshots keep the original start time.
        t.sync(&n, 60_000);
        assert_eq!(
            t.phase(EnhancementKind::Summarize, 5_000 + STUCK_AFTER_MS),
            GenerationPhase::Stuck
        );
    }

    #[test]
    fn test_job_resolves_when_timestamp_moves() {
        let mut n = Note {
            key_points_generated_at: Some("2026-01-01T00:00:00Z".to_string()),
            ..note()
        };
        let mut t = GenerationTracker::default();
        t.requested(EnhancementKind::ExtractKeyPoints, &n, 0);

        t.sync(&n, 1_000);
        assert!(t.is_busy());

        n.key_points_generated_at = Some("2026-10-18T12:00:00Z".to_string());
        t.sync(&n, 2_000);
        assert_eq!(
            t.phase(EnhancementKind::ExtractKeyPoints, 2_000),
            GenerationPhase::Idle
        );
    }

    #[test]
    fn test_summary_failure_and_completion() {
        let mut n = note();
        let mut t = GenerationTracker::default();
        t.requested(EnhancementKind::Summarize, &n, 0);

        // Still "completed" from a previous run: the job is not considered done yet.
        n.summary_status = Some(SummaryStatus::Completed);
        t.sync(&n, 500);
        assert!(t.is_busy());

        n.summary_status = Some(SummaryStatus::Failed);
        t.sync(&n, 1_000);
        assert!(!t.is_busy());
    }

    #[test]
    fn test_summary_completes_without_new_timestamp() {
        let mut n = Note {
            summary_status: Some(SummaryStatus::Generating),
            ..note()
        };
        let mut t = GenerationTracker::default();
        t.sync(&n, 0);
        assert!(t.is_busy());

        n.summary_status = Some(SummaryStatus::Completed);
        n.summary = Some("Cells divide.".to_string());
        t.sync(&n, 1_000);
        assert!(!t.is_busy());
        assert_eq!(
            t.phase(EnhancementKind::Summarize, 130_000),
            GenerationPhase::Idle
        );
    }

    #[test]
    fn test_requested_summary_completes_after_busy_status() {
        let mut n = Note {
            summary_status: Some(SummaryStatus::Completed),
            summary: Some("Old summary.".to_string()),
            ..note()
        };
        let mut t = GenerationTracker::default();
        t.requested(EnhancementKind::Summarize, &n, 0);
        t.sync(&n, 500);
        assert!(t.is_busy());

        n.summary_status = Some(SummaryStatus::Pending);
        t.sync(&n, 1_000);
        n.summary_status = Some(SummaryStatus::Completed);
        n.summary = Some("New summary.".to_string());
        t.sync(&n, 2_000);
        assert!(!t.is_busy());
    }

    #[test]
    fn test_cancel() {
        let mut t = GenerationTracker::default();
        t.requested(EnhancementKind::ConvertToMarkdown, &note(), 0);
        assert!(t.cancel(EnhancementKind::ConvertToMarkdown));
        assert!(!t.cancel(EnhancementKind::ConvertToMarkdown));
        assert!(!t.is_busy());
    }
}
