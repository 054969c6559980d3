//! Sequential, credit-gated bulk chapter generation.
//!
//! Chapters are generated in strict ascending order with exactly one
//! request in flight. The serialization is deliberate: each generation
//! consumes one credit, and the run must observe the balance after every
//! call before issuing the next. The failure policy is asymmetric and must
//! stay that way: credit exhaustion is unrecoverable mid-batch and halts
//! the loop; any other per-chapter failure is logged and the loop moves on.

use tokio::sync::mpsc;

use crate::api::BookApi;
use crate::app::WorkflowEvent;
use crate::core::progress::BatchReport;

/// Runs bulk generation for chapters `1..=chapter_count`.
///
/// This is spawned as a separate task and reports to the UI via events.
/// The returned report is also delivered as [`WorkflowEvent::BatchFinished`];
/// the caller replaces the project's full chapter mapping with
/// `report.chapters` once it arrives.
///
/// `cached_balance` is the advisory local balance: when known and short of
/// `chapter_count`, the run aborts before contacting the backend at all.
/// An unknown balance never blocks the run; the backend enforces charging
/// per chapter regardless.
pub async fn run_bulk_generation(
    api: &dyn BookApi,
    project_id: &str,
    chapter_count: u32,
    cached_balance: Option<u64>,
    tx: &mpsc::Sender<WorkflowEvent>,
) -> BatchReport {
    let mut report = BatchReport::default();

    // Advisory precondition: optimization only, not an authoritative check.
    if let Some(balance) = cached_balance
        && balance < u64::from(chapter_count)
    {
        report.advisory_abort = Some((chapter_count, balance));
        tx.send(WorkflowEvent::BatchFinished(report.clone())).await.ok();
        return report;
    }

    for number in 1..=chapter_count {
        tx.send(WorkflowEvent::ChapterStarted(number)).await.ok();

        match api.generate_chapter(project_id, number).await {
            Ok(chapter) => {
                report.chapters.insert(number, chapter.chapter_content);
                report.credits_spent += chapter.credit_cost;
                tx.send(WorkflowEvent::ChapterCompleted {
                    number,
                    remaining: chapter.remaining_credits,
                })
                .await
                .ok();
            }
            Err(error) => {
                let fatal = error.is_insufficient_credits();
                tx.send(WorkflowEvent::ChapterFailed {
                    number,
                    fatal,
                    message: error.to_string(),
                })
                .await
                .ok();
                if fatal {
                    // Out of credits: chapters beyond this one would fail too.
                    report.halted_at = Some(number);
                    break;
                }
                // Transient failure: not fatal to the batch.
            }
        }
    }

    tx.send(WorkflowEvent::BatchFinished(report.clone())).await.ok();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{Call, ChapterOutcome, MockApi};
    use crate::api::GeneratedChapter;

    fn channel() -> (mpsc::Sender<WorkflowEvent>, mpsc::Receiver<WorkflowEvent>) {
        mpsc::channel(256)
    }

    fn drain(rx: &mut mpsc::Receiver<WorkflowEvent>) -> Vec<WorkflowEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn known_short_balance_issues_zero_requests() {
        let api = MockApi::new();
        let (tx, mut rx) = channel();

        let report = run_bulk_generation(&api, "p1", 10, Some(5), &tx).await;

        assert!(api.recorded_calls().is_empty());
        assert_eq!(report.advisory_abort, Some((10, 5)));
        assert_eq!(report.succeeded(), 0);
        let events = drain(&mut rx);
        assert!(matches!(events.as_slice(), [WorkflowEvent::BatchFinished(_)]));
    }

    #[tokio::test]
    async fn unknown_balance_does_not_block_the_run() {
        let api = MockApi::new();
        let (tx, _rx) = channel();

        let report = run_bulk_generation(&api, "p1", 3, None, &tx).await;

        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.advisory_abort, None);
    }

    #[tokio::test]
    async fn chapters_are_requested_in_strict_ascending_order() {
        let api = MockApi::new();
        let (tx, _rx) = channel();

        run_bulk_generation(&api, "p1", 5, Some(5), &tx).await;

        assert_eq!(api.generated_chapter_numbers(), vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn transient_failure_skips_chapter_and_continues() {
        let api = MockApi::new();
        api.script_chapter(2, ChapterOutcome::Failure("model hiccup".to_string()));
        let (tx, mut rx) = channel();

        let report = run_bulk_generation(&api, "p1", 3, None, &tx).await;

        assert_eq!(api.generated_chapter_numbers(), vec![1, 2, 3]);
        assert_eq!(report.succeeded(), 2);
        assert!(!report.chapters.contains_key(&2));
        assert_eq!(report.halted_at, None);

        let failed: Vec<_> = drain(&mut rx)
            .into_iter()
            .filter(|e| matches!(e, WorkflowEvent::ChapterFailed { fatal: false, .. }))
            .collect();
        assert_eq!(failed.len(), 1);
    }

    #[tokio::test]
    async fn credit_exhaustion_halts_the_batch_early() {
        let api = MockApi::new();
        api.script_chapter(
            3,
            ChapterOutcome::CreditError("need 1 credit, have 0".to_string()),
        );
        let (tx, mut rx) = channel();

        let report = run_bulk_generation(&api, "p1", 5, None, &tx).await;

        // No chapter beyond the failing one is attempted.
        assert_eq!(api.generated_chapter_numbers(), vec![1, 2, 3]);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.halted_at, Some(3));

        let fatal: Vec<_> = drain(&mut rx)
            .into_iter()
            .filter(|e| matches!(e, WorkflowEvent::ChapterFailed { fatal: true, .. }))
            .collect();
        assert_eq!(fatal.len(), 1);
    }

    #[tokio::test]
    async fn authoritative_remaining_credits_flow_through_events() {
        let api = MockApi::new();
        api.script_chapter(
            1,
            ChapterOutcome::Ok(GeneratedChapter {
                chapter_content: "text".to_string(),
                credit_cost: 1,
                remaining_credits: Some(7),
            }),
        );
        let (tx, mut rx) = channel();

        let report = run_bulk_generation(&api, "p1", 1, Some(99), &tx).await;

        assert_eq!(report.credits_spent, 1);
        let remaining: Vec<_> = drain(&mut rx)
            .into_iter()
            .filter_map(|e| match e {
                WorkflowEvent::ChapterCompleted { remaining, .. } => remaining,
                _ => None,
            })
            .collect();
        assert_eq!(remaining, vec![7]);
    }

    #[tokio::test]
    async fn single_request_in_flight_at_a_time() {
        // The mock records calls synchronously per await; interleaved
        // ChapterStarted events would show up between generate calls if the
        // loop ever pipelined. Verify started events pair 1:1 with calls.
        let api = MockApi::new();
        let (tx, mut rx) = channel();

        run_bulk_generation(&api, "p1", 3, None, &tx).await;

        let started: Vec<u32> = drain(&mut rx)
            .into_iter()
            .filter_map(|e| match e {
                WorkflowEvent::ChapterStarted(n) => Some(n),
                _ => None,
            })
            .collect();
        assert_eq!(started, vec![1, 2, 3]);
        assert_eq!(
            api.recorded_calls()
                .iter()
                .filter(|c| matches!(c, Call::GenerateChapter { .. }))
                .count(),
            3
        );
    }
}
