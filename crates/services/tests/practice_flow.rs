use std::sync::Arc;

use practice_core::model::{Answer, QuestionId, SessionPhase, TestId};
use practice_core::time::fixed_clock;
use services::{PracticeError, PracticeService, StaticContent};

fn content() -> StaticContent {
    StaticContent::from_json(
        r#"{
            "r-p1": [
                { "question_id": 1, "rule": "Paris" },
                { "question_id": 2, "rule": ["B", "D"], "weight": 2 }
            ]
        }"#,
    )
    .unwrap()
}

#[tokio::test]
async fn full_attempt_times_out_and_scores() {
    let service = PracticeService::new(Arc::new(content())).with_clock(fixed_clock());
    let mut attempt = service.begin(TestId::new("r-p1"), 20.0).await.unwrap();

    attempt.start();
    assert_eq!(attempt.time_remaining_secs(), 1200);

    attempt.record_answer(QuestionId::new(1), Answer::single("Paris"));
    attempt.record_answer(QuestionId::new(2), Answer::multi(["B", "D"]));

    for _ in 0..1200 {
        attempt.tick();
    }

    assert_eq!(attempt.phase(), SessionPhase::Finished);
    assert_eq!(attempt.time_remaining_secs(), 0);
    assert!(attempt.finished_at().is_some());

    let result = attempt.score();
    assert_eq!(result.points_earned, 3);
    assert_eq!(result.points_possible, 3);
    assert_eq!(result.breakdown.len(), 2);
    assert!(result.breakdown.iter().all(|q| q.is_correct));
}

#[tokio::test]
async fn unanswered_questions_appear_in_the_breakdown() {
    let service = PracticeService::new(Arc::new(content())).with_clock(fixed_clock());
    let mut attempt = service.begin(TestId::new("r-p1"), 20.0).await.unwrap();

    attempt.start();
    attempt.record_answer(QuestionId::new(1), Answer::single("Paris"));
    attempt.finish();

    let result = attempt.score();
    assert_eq!(result.points_earned, 1);
    assert_eq!(result.points_possible, 3);

    let unanswered = &result.breakdown[1];
    assert_eq!(unanswered.question_id, QuestionId::new(2));
    assert_eq!(unanswered.response, None);
    assert!(!unanswered.is_correct);
}

#[tokio::test]
async fn restart_allows_a_fresh_attempt_with_the_same_duration() {
    let service = PracticeService::new(Arc::new(content())).with_clock(fixed_clock());
    let mut attempt = service.begin(TestId::new("r-p1"), 20.0).await.unwrap();

    attempt.start();
    attempt.record_answer(QuestionId::new(1), Answer::single("wrong"));
    attempt.finish();

    attempt.restart();
    attempt.start();

    assert_eq!(attempt.time_remaining_secs(), 1200);
    assert!(attempt.ledger().is_empty());
    assert_eq!(attempt.score().points_earned, 0);
}

#[tokio::test]
async fn begin_fails_for_an_unknown_test() {
    let service = PracticeService::new(Arc::new(content()));
    let err = service.begin(TestId::new("no-such-test"), 20.0).await.unwrap_err();
    assert!(matches!(err, PracticeError::Content(_)));
}
